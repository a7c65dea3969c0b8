//! # Domain Types
//!
//! Core domain types used throughout MateSplit.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Participant    │   │  ExpenseInput   │   │  SplitResult    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (MemberId)  │   │  subtotal       │   │  shares (Vec)   │       │
//! │  │  name           │   │  tax_rate       │   │  tax_amount     │       │
//! │  └─────────────────┘   │  method         │   │  grand_total    │       │
//! │                        │  payer_id       │   │  payer_net      │       │
//! │  ┌─────────────────┐   │  participants   │   └─────────────────┘       │
//! │  │  SplitMethod    │   │  entries (raw)  │                              │
//! │  │  ─────────────  │   └─────────────────┘                              │
//! │  │  Equally        │                                                    │
//! │  │  Percentage     │   ExpenseInput is rebuilt from UI state on every  │
//! │  │  Amount         │   keystroke; SplitResult is derived and never     │
//! │  └─────────────────┘   mutated.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, TaxRate};

// =============================================================================
// Member Identity
// =============================================================================

/// Externally-assigned member identifier.
///
/// The group-membership backend owns identity; the calculator treats it as
/// an opaque, comparable key. Wrapped so a member id can never be confused
/// with an expense or split id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct MemberId(String);

impl MemberId {
    /// Creates a member id from its backend representation.
    pub fn new(id: impl Into<String>) -> Self {
        MemberId(id.into())
    }

    /// Returns the raw id string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        MemberId(id.to_string())
    }
}

// =============================================================================
// Participant
// =============================================================================

/// A group member taking part in one expense split.
///
/// Order matters: participants are supplied in group-member-list order, and
/// the LAST participant absorbs rounding remainders and derived values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Participant {
    /// Externally-assigned member id (unique within one computation).
    pub id: MemberId,

    /// Display name shown in share rows and summaries.
    pub name: String,
}

impl Participant {
    /// Creates a participant.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Participant {
            id: MemberId::new(id),
            name: name.into(),
        }
    }
}

// =============================================================================
// Split Method
// =============================================================================

/// Policy for dividing an expense among participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SplitMethod {
    /// Everyone pays the same pre-tax share.
    #[default]
    Equally,
    /// Each participant enters a percentage; the last auto-fills to 100%.
    Percentage,
    /// Each participant enters a pre-tax amount; the last auto-fills to the
    /// subtotal.
    Amount,
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMethod::Equally => write!(f, "equally"),
            SplitMethod::Percentage => write!(f, "percentage"),
            SplitMethod::Amount => write!(f, "amount"),
        }
    }
}

// =============================================================================
// Expense Category
// =============================================================================

/// Category labels, matching the option list in the expense form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Drinks")]
    FoodAndDrinks,
    #[default]
    Groceries,
    Transport,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseCategory::FoodAndDrinks => write!(f, "Food & Drinks"),
            ExpenseCategory::Groceries => write!(f, "Groceries"),
            ExpenseCategory::Transport => write!(f, "Transport"),
            ExpenseCategory::BillsAndUtilities => write!(f, "Bills & Utilities"),
            ExpenseCategory::Other => write!(f, "Other"),
        }
    }
}

// =============================================================================
// Expense Input
// =============================================================================

/// One complete snapshot of the expense form.
///
/// ## Lifecycle
/// Constructed fresh from current UI state on every recomputation — there is
/// no stored identity and no incremental patching. Per-keystroke patch logic
/// in the old front-end drifted; rebuilding the input kills that bug class.
///
/// ## Payer-Lock Invariant
/// `payer_id` must be a member of `participants`. The UI auto-includes the
/// payer and disallows removing them; the calculator re-asserts this and
/// fails fast if violated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseInput {
    /// Expense title ("Dinner at Jalan Alor").
    pub title: String,

    /// Category shown in feeds and statistics.
    pub category: ExpenseCategory,

    /// Pre-tax subtotal, already coerced from the amount field.
    pub subtotal: Money,

    /// Tax/service charge rate, already coerced from the percent field.
    pub tax_rate: TaxRate,

    /// How the subtotal is divided.
    pub method: SplitMethod,

    /// Who fronted the money.
    pub payer_id: MemberId,

    /// Participants in group-member-list order. The last one absorbs
    /// remainders and derived values.
    pub participants: Vec<Participant>,

    /// Raw per-participant text entries (percent or amount depending on
    /// `method`). Missing or non-numeric entries coerce to zero.
    pub entries: HashMap<MemberId, String>,

    /// Expense date (wire format `YYYY-MM-DD`).
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Free-form notes.
    pub notes: String,
}

impl ExpenseInput {
    /// Number of participants.
    #[inline]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// The designated remainder-absorbing participant (last in order).
    pub fn last_participant(&self) -> Option<&Participant> {
        self.participants.last()
    }

    /// Checks whether the payer is among the participants.
    pub fn payer_is_participant(&self) -> bool {
        self.participants.iter().any(|p| p.id == self.payer_id)
    }

    /// Returns the raw text entry for a participant ("" if absent).
    pub fn entry(&self, id: &MemberId) -> &str {
        self.entries.get(id).map(String::as_str).unwrap_or("")
    }
}

// =============================================================================
// Split Result
// =============================================================================

/// One participant's computed liability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MemberShare {
    /// Who owes this share.
    pub member_id: MemberId,

    /// Display name, frozen from the participant list.
    pub name: String,

    /// Portion of the subtotal before tax.
    pub pre_tax: Money,

    /// What the participant actually owes (pre-tax scaled by the tax rate,
    /// after reconciliation).
    pub final_share: Money,
}

/// The complete, internally-consistent outcome of one split computation.
///
/// ## Invariants
/// - `Σ shares.pre_tax == subtotal` exactly
/// - `Σ shares.final_share == grand_total` exactly
/// - `grand_total == subtotal + tax_amount`
/// - `payer_net == grand_total − payer_final_share` (non-negative while the
///   payer is a participant, by construction)
///
/// Derived, never mutated: each change to inputs produces a wholly new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SplitResult {
    /// Per-participant shares, in participant order.
    pub shares: Vec<MemberShare>,

    /// Pre-tax subtotal (echoed from the input after coercion).
    pub subtotal: Money,

    /// Tax amount derived from subtotal × rate.
    pub tax_amount: Money,

    /// subtotal + tax_amount.
    pub grand_total: Money,

    /// The payer's own final share.
    pub payer_final_share: Money,

    /// What the rest of the group owes the payer once everyone settles.
    pub payer_net: Money,
}

impl SplitResult {
    /// An all-zero result for the no-participants case: the UI still needs
    /// totals to render while the submit action stays disabled.
    pub fn zeroed(subtotal: Money, tax_amount: Money) -> Self {
        SplitResult {
            shares: Vec::new(),
            subtotal,
            tax_amount,
            grand_total: subtotal + tax_amount,
            payer_final_share: Money::zero(),
            payer_net: Money::zero(),
        }
    }

    /// Looks up one participant's share.
    pub fn share_of(&self, id: &MemberId) -> Option<&MemberShare> {
        self.shares.iter().find(|s| &s.member_id == id)
    }

    /// Sum of all pre-tax shares.
    pub fn pre_tax_total(&self) -> Money {
        self.shares.iter().map(|s| s.pre_tax).sum()
    }

    /// Sum of all final shares.
    pub fn final_total(&self) -> Money {
        self.shares.iter().map(|s| s.final_share).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_is_opaque_but_comparable() {
        let a = MemberId::new("17");
        let b = MemberId::from("17");
        let c = MemberId::new("42");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "17");
    }

    #[test]
    fn test_split_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&SplitMethod::Equally).unwrap(),
            "\"equally\""
        );
        assert_eq!(
            serde_json::to_string(&SplitMethod::Percentage).unwrap(),
            "\"percentage\""
        );
        assert_eq!(
            serde_json::to_string(&SplitMethod::Amount).unwrap(),
            "\"amount\""
        );
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::FoodAndDrinks).unwrap(),
            "\"Food & Drinks\""
        );
        assert_eq!(
            serde_json::to_string(&ExpenseCategory::Groceries).unwrap(),
            "\"Groceries\""
        );
    }

    #[test]
    fn test_zeroed_result_keeps_totals() {
        let r = SplitResult::zeroed(Money::from_sen(9000), Money::from_sen(540));
        assert!(r.shares.is_empty());
        assert_eq!(r.grand_total.sen(), 9540);
        assert!(r.payer_net.is_zero());
    }
}
