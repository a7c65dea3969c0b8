//! # Submit-Gating Validation
//!
//! Decides whether an expense snapshot may be submitted.
//!
//! ## Issues vs Errors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SplitError (error.rs)          SplitIssue (this file)                  │
//! │  ─────────────────────          ──────────────────────                  │
//! │  compute_shares REFUSES         compute_shares still runs;              │
//! │  to produce a result            the submit action is DISABLED           │
//! │                                                                         │
//! │  structural nonsense            half-filled form states                 │
//! │  (dup member, payer missing)    (RM 0.00, percentages ≠ 100%)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! A user mid-typing is constantly in an "invalid" state; the share preview
//! keeps updating the whole time, and only the submit button cares.
//!
//! ## Gating Rules (all methods)
//! 1. Subtotal must be positive
//! 2. At least [`MIN_SPLIT_PARTICIPANTS`] participants
//! 3. The payer must be among the participants
//!
//! Plus per-method closure:
//! - Percentage: effective percentages (with the derived last) sum to 100%
//! - Amount: effective amounts (with the derived last) sum to the subtotal

use std::fmt;

use crate::money::{Money, Percent};
use crate::split::{entry_amounts, entry_percents};
use crate::types::{ExpenseInput, SplitMethod};

/// Minimum number of participants for a meaningful split.
///
/// An expense split with yourself alone is a no-op; the original product
/// blocked it across every split method, not just equal splits.
pub const MIN_SPLIT_PARTICIPANTS: usize = 2;

// =============================================================================
// Split Issue
// =============================================================================

/// One reason an expense snapshot cannot be submitted yet.
///
/// Ordered roughly by how the form is filled in, so the first issue in the
/// returned list is the most natural one to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitIssue {
    /// Subtotal is zero (empty, garbage, or genuinely RM 0.00).
    ZeroSubtotal,

    /// Fewer than [`MIN_SPLIT_PARTICIPANTS`] participants selected.
    TooFewParticipants { count: usize },

    /// The payer is not among the participants.
    PayerNotParticipant,

    /// Percentage mode: effective percentages do not sum to 100%.
    UnbalancedPercentages { total: Percent },

    /// Amount mode: effective amounts do not sum to the subtotal.
    UnbalancedAmounts { entered: Money, subtotal: Money },
}

impl fmt::Display for SplitIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitIssue::ZeroSubtotal => write!(f, "enter an amount greater than RM 0.00"),
            SplitIssue::TooFewParticipants { count } => write!(
                f,
                "select at least {MIN_SPLIT_PARTICIPANTS} participants ({count} selected)"
            ),
            SplitIssue::PayerNotParticipant => {
                write!(f, "the payer must be included in the split")
            }
            SplitIssue::UnbalancedPercentages { total } => write!(
                f,
                "percentages must add up to 100% (currently {}.{:02}%)",
                total.bps() / 100,
                total.bps() % 100
            ),
            SplitIssue::UnbalancedAmounts { entered, subtotal } => {
                write!(f, "amounts add up to {entered}, expected {subtotal}")
            }
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Collects every reason the snapshot cannot be submitted. Empty = good.
pub fn validate(input: &ExpenseInput) -> Vec<SplitIssue> {
    let mut issues = Vec::new();

    if !input.subtotal.is_positive() {
        issues.push(SplitIssue::ZeroSubtotal);
    }

    let count = input.participant_count();
    if count < MIN_SPLIT_PARTICIPANTS {
        issues.push(SplitIssue::TooFewParticipants { count });
    }

    if count > 0 && !input.payer_is_participant() {
        issues.push(SplitIssue::PayerNotParticipant);
    }

    match input.method {
        SplitMethod::Equally => {}
        SplitMethod::Percentage => {
            // u64 sum: capped entries keep each value in range, but a row of
            // runaway entries could still overflow u32.
            let total: u64 = entry_percents(input)
                .iter()
                .map(|pct| u64::from(pct.bps()))
                .sum();
            // The derived last entry clamps at 0%, so the only way to miss
            // 100% is over-allocation by the others.
            if count > 0 && total != u64::from(Percent::FULL_BPS) {
                issues.push(SplitIssue::UnbalancedPercentages {
                    total: Percent::from_bps(total.min(u64::from(u32::MAX)) as u32),
                });
            }
        }
        SplitMethod::Amount => {
            let entered: Money = entry_amounts(input).into_iter().sum();
            if count > 0 && entered != input.subtotal.max(Money::zero()) {
                issues.push(SplitIssue::UnbalancedAmounts {
                    entered,
                    subtotal: input.subtotal,
                });
            }
        }
    }

    issues
}

/// The submit gate: true when nothing blocks submission.
pub fn is_valid(input: &ExpenseInput) -> bool {
    validate(input).is_empty()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::TaxRate;
    use crate::types::{ExpenseCategory, MemberId, Participant};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn input(
        subtotal: &str,
        method: SplitMethod,
        payer: &str,
        names: &[&str],
        entries: &[(&str, &str)],
    ) -> ExpenseInput {
        ExpenseInput {
            title: "Lunch".to_string(),
            category: ExpenseCategory::FoodAndDrinks,
            subtotal: Money::parse_lenient(subtotal),
            tax_rate: TaxRate::zero(),
            method,
            payer_id: MemberId::new(payer),
            participants: names.iter().map(|n| Participant::new(*n, *n)).collect(),
            entries: entries
                .iter()
                .map(|(id, v)| (MemberId::new(*id), v.to_string()))
                .collect::<HashMap<_, _>>(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_happy_path_is_valid() {
        let input = input("100", SplitMethod::Equally, "A", &["A", "B", "C"], &[]);
        assert!(is_valid(&input));
        assert!(validate(&input).is_empty());
    }

    #[test]
    fn test_zero_subtotal_blocks() {
        let input = input("", SplitMethod::Equally, "A", &["A", "B"], &[]);
        assert_eq!(validate(&input), vec![SplitIssue::ZeroSubtotal]);
    }

    #[test]
    fn test_single_participant_blocks_every_method() {
        for method in [
            SplitMethod::Equally,
            SplitMethod::Percentage,
            SplitMethod::Amount,
        ] {
            let input = input("100", method, "A", &["A"], &[]);
            assert!(
                validate(&input).contains(&SplitIssue::TooFewParticipants { count: 1 }),
                "{method} must require {MIN_SPLIT_PARTICIPANTS} participants"
            );
        }
    }

    #[test]
    fn test_payer_outside_participants_blocks() {
        let input = input("100", SplitMethod::Equally, "Z", &["A", "B"], &[]);
        assert_eq!(validate(&input), vec![SplitIssue::PayerNotParticipant]);
    }

    #[test]
    fn test_percentage_closes_via_derived_last() {
        // A 50%, B 30%, C derived 20% → exactly 100%.
        let input = input(
            "200",
            SplitMethod::Percentage,
            "A",
            &["A", "B", "C"],
            &[("A", "50"), ("B", "30")],
        );
        assert!(is_valid(&input));
    }

    #[test]
    fn test_percentage_over_allocation_blocks() {
        // A 60%, B 60% → derived last clamps to 0%, total 120%.
        let input = input(
            "100",
            SplitMethod::Percentage,
            "A",
            &["A", "B", "C"],
            &[("A", "60"), ("B", "60")],
        );
        assert_eq!(
            validate(&input),
            vec![SplitIssue::UnbalancedPercentages {
                total: Percent::from_bps(12_000)
            }]
        );
    }

    #[test]
    fn test_runaway_percent_entries_block_submission() {
        // A single entry above 100% keeps its magnitude through parsing and
        // fails the total check.
        let single = input(
            "100",
            SplitMethod::Percentage,
            "A",
            &["A", "B"],
            &[("A", "150")],
        );
        assert!(!is_valid(&single));

        // Absurd entries must neither panic the bps sum nor wrap it around
        // to a "valid" 100% total.
        let wrap = input(
            "100",
            SplitMethod::Percentage,
            "A",
            &["A", "B", "C"],
            &[("A", "42949672.95"), ("B", "0.01")],
        );
        assert!(!is_valid(&wrap));

        let pair = input(
            "100",
            SplitMethod::Percentage,
            "A",
            &["A", "B", "C"],
            &[("A", "42949672.95"), ("B", "42949672.95")],
        );
        assert!(!is_valid(&pair));
    }

    #[test]
    fn test_amount_closes_via_derived_last() {
        let input = input(
            "57",
            SplitMethod::Amount,
            "A",
            &["A", "B"],
            &[("A", "20")],
        );
        assert!(is_valid(&input));
    }

    #[test]
    fn test_amount_over_entry_blocks() {
        // Others exceed the subtotal: derived last is RM 0.00, sum RM 70.00.
        let input = input(
            "50",
            SplitMethod::Amount,
            "A",
            &["A", "B", "C"],
            &[("A", "40"), ("B", "30")],
        );
        assert_eq!(
            validate(&input),
            vec![SplitIssue::UnbalancedAmounts {
                entered: Money::from_sen(7000),
                subtotal: Money::from_sen(5000),
            }]
        );
    }

    #[test]
    fn test_issues_accumulate() {
        let input = input("", SplitMethod::Equally, "Z", &["A"], &[]);
        let issues = validate(&input);
        assert!(issues.contains(&SplitIssue::ZeroSubtotal));
        assert!(issues.contains(&SplitIssue::TooFewParticipants { count: 1 }));
        assert!(issues.contains(&SplitIssue::PayerNotParticipant));
    }

    #[test]
    fn test_issue_messages_are_user_facing() {
        assert_eq!(
            SplitIssue::ZeroSubtotal.to_string(),
            "enter an amount greater than RM 0.00"
        );
        let msg = SplitIssue::UnbalancedPercentages {
            total: Percent::from_bps(12_050),
        }
        .to_string();
        assert_eq!(msg, "percentages must add up to 100% (currently 120.50%)");
    }
}
