//! # Split Calculator
//!
//! The single canonical implementation of expense-split math.
//!
//! ## History
//! The original front-end carried at least five inline copies of this logic,
//! disagreeing on rounding and on who absorbs the remainder. Every UI
//! surface now calls this module instead; amounts can no longer diverge
//! between the share editor, the summary card, and the submit payload.
//!
//! ## Computation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute_shares(input)                              │
//! │                                                                         │
//! │  1. Assert: participants non-empty, unique, payer included             │
//! │                                                                         │
//! │  2. Pre-tax shares, by method                                          │
//! │     Equally    ──► subtotal/n each, remainder patched onto LAST        │
//! │     Percentage ──► entered %, last derived = max(0, 100 − Σ others)    │
//! │     Amount     ──► entered RM, last derived = max(0, sub − Σ others)   │
//! │                                                                         │
//! │  3. Final shares = round2(pre_tax × (1 + rate)), then one more         │
//! │     sum-and-patch-to-last so Σ final == grand total EXACTLY            │
//! │                                                                         │
//! │  4. payer_net = grand_total − payer's final share                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! No I/O, no hidden state. The full share set is recomputed from the full
//! current input on every call — incremental patching of a previous result
//! is exactly the drift bug this module replaces. Same input ⇒ bit-identical
//! output.

use std::collections::HashSet;

use crate::error::{CoreResult, SplitError};
use crate::money::{Money, Percent, TaxRate};
use crate::types::{ExpenseInput, MemberShare, SplitMethod, SplitResult};

// =============================================================================
// Public Operations
// =============================================================================

/// Computes the tax amount: `round2(subtotal * rate / 100)`.
///
/// Negative subtotals are treated as zero — inputs originate in free-text
/// fields and a half-typed value must never produce a negative tax.
///
/// ```rust
/// use matesplit_core::money::{Money, TaxRate};
/// use matesplit_core::split::compute_tax;
///
/// let tax = compute_tax(Money::from_sen(9000), TaxRate::from_bps(600));
/// assert_eq!(tax.sen(), 540); // RM 90.00 at 6% = RM 5.40
/// ```
pub fn compute_tax(subtotal: Money, rate: TaxRate) -> Money {
    clamp_subtotal(subtotal).tax(rate)
}

/// Derives the complete split for one expense snapshot.
///
/// ## Guarantees (for any accepted input)
/// - `Σ final_share == round2(subtotal × (1 + rate/100))` to the sen
/// - under `Equally`, pre-tax shares differ by at most the patched remainder
///   on the last participant
/// - calling twice with identical input yields identical output
///
/// ## Failure
/// Only structural problems fail: an empty participant set, a duplicated
/// member, or a payer outside the participant list. Unbalanced percentage or
/// amount entries are NOT errors here — they surface through
/// [`crate::validation::validate`] and block submission instead.
pub fn compute_shares(input: &ExpenseInput) -> CoreResult<SplitResult> {
    if input.participants.is_empty() {
        return Err(SplitError::NoParticipants);
    }
    ensure_unique(input)?;
    if !input.payer_is_participant() {
        return Err(SplitError::PayerNotParticipant {
            payer: input.payer_id.clone(),
        });
    }

    let subtotal = clamp_subtotal(input.subtotal);
    let tax_amount = subtotal.tax(input.tax_rate);
    let grand_total = subtotal + tax_amount;

    let pre_tax = match input.method {
        SplitMethod::Equally => equal_shares(subtotal, input.participant_count()),
        SplitMethod::Percentage => {
            let mut shares: Vec<Money> = entry_percents(input)
                .into_iter()
                .map(|pct| pct.of(subtotal))
                .collect();
            patch_last(&mut shares, subtotal);
            shares
        }
        // Amounts are exact by construction (the last entry is derived from
        // the subtotal), so no remainder patch on the pre-tax side.
        SplitMethod::Amount => entry_amounts(input),
    };

    let mut finals: Vec<Money> = pre_tax
        .iter()
        .map(|share| share.with_tax(input.tax_rate))
        .collect();
    patch_last(&mut finals, grand_total);

    let shares: Vec<MemberShare> = input
        .participants
        .iter()
        .zip(pre_tax.iter().zip(finals.iter()))
        .map(|(p, (&pre, &fin))| MemberShare {
            member_id: p.id.clone(),
            name: p.name.clone(),
            pre_tax: pre,
            final_share: fin,
        })
        .collect();

    let payer_final_share = shares
        .iter()
        .find(|s| s.member_id == input.payer_id)
        .map(|s| s.final_share)
        .unwrap_or_else(Money::zero);

    Ok(SplitResult {
        shares,
        subtotal,
        tax_amount,
        grand_total,
        payer_final_share,
        payer_net: grand_total - payer_final_share,
    })
}

/// Effective percentage per participant: entered values for everyone except
/// the last, whose percentage is derived as `max(0, 100 − Σ others)`.
///
/// Exposed because the share editor renders the derived value in the
/// (disabled) last row, and the validity check sums these same numbers.
pub fn entry_percents(input: &ExpenseInput) -> Vec<Percent> {
    let n = input.participant_count();
    if n == 0 {
        return Vec::new();
    }

    let entered: Vec<Percent> = input
        .participants
        .iter()
        .take(n - 1)
        .map(|p| Percent::parse_lenient(input.entry(&p.id)))
        .collect();

    // Summed in u64: each entry is capped at Percent::MAX_BPS, but a row of
    // runaway entries could still overflow u32.
    let others: u64 = entered.iter().map(|pct| u64::from(pct.bps())).sum();
    // Over-allocation clamps the last person to 0%; validation then rejects
    // the total for not being exactly 100%.
    let last = Percent::from_bps(u64::from(Percent::FULL_BPS).saturating_sub(others) as u32);

    entered.into_iter().chain(std::iter::once(last)).collect()
}

/// Effective pre-tax amount per participant: entered values for everyone
/// except the last, whose amount is derived as `max(0, subtotal − Σ others)`.
pub fn entry_amounts(input: &ExpenseInput) -> Vec<Money> {
    let n = input.participant_count();
    if n == 0 {
        return Vec::new();
    }

    let subtotal = clamp_subtotal(input.subtotal);
    let entered: Vec<Money> = input
        .participants
        .iter()
        .take(n - 1)
        .map(|p| Money::parse_lenient(input.entry(&p.id)))
        .collect();

    let others: Money = entered.iter().copied().sum();
    let last = if others.sen() >= subtotal.sen() {
        Money::zero()
    } else {
        subtotal - others
    };

    entered.into_iter().chain(std::iter::once(last)).collect()
}

// =============================================================================
// Internals
// =============================================================================

/// Negative subtotals cannot happen through `parse_lenient`, but inputs can
/// be constructed directly; clamp rather than propagate nonsense.
fn clamp_subtotal(subtotal: Money) -> Money {
    if subtotal.is_negative() {
        Money::zero()
    } else {
        subtotal
    }
}

fn ensure_unique(input: &ExpenseInput) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(input.participant_count());
    for p in &input.participants {
        if !seen.insert(&p.id) {
            return Err(SplitError::DuplicateParticipant {
                member: p.id.clone(),
            });
        }
    }
    Ok(())
}

/// Identical rounded shares for everyone; the remainder lands on the last.
fn equal_shares(subtotal: Money, n: usize) -> Vec<Money> {
    let base = subtotal.div_round(n);
    let mut shares = vec![base; n];
    patch_last(&mut shares, subtotal);
    shares
}

/// Remainder reconciliation: adds `target − Σ shares` onto the final entry
/// so the shares sum to the target exactly, despite per-share rounding.
fn patch_last(shares: &mut [Money], target: Money) {
    let sum: Money = shares.iter().copied().sum();
    let diff = target - sum;
    if let Some(last) = shares.last_mut() {
        *last += diff;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
