//! # Wire Types
//!
//! Request/response DTOs for the expense ledger backend.
//!
//! ## Boundary Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INSIDE the process          ON the wire                                │
//! │  ───────────────────         ───────────                                │
//! │  Money (integer sen)    ──►  2-decimal JSON numbers ("amount": 31.80)  │
//! │  MemberId newtype       ──►  plain string                               │
//! │  NaiveDate              ──►  "YYYY-MM-DD"                               │
//! │                                                                         │
//! │  Conversion happens HERE and nowhere else. No arithmetic on f64.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sloppy Backend Keys
//! The backend emits the same fields under several spellings (`memberId`,
//! `member_id`, `userId`, ...). The old front-end chained `??` fallbacks at
//! every call site; here the fallbacks live once, as serde aliases.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use matesplit_core::money::Money;
use matesplit_core::types::{ExpenseCategory, ExpenseInput, MemberId, SplitMethod, SplitResult};

// =============================================================================
// Expense Creation (step 1 of 2)
// =============================================================================

/// `POST /api/v1/expenses` body.
///
/// `amount` is the PRE-TAX subtotal; `tax` is the derived tax AMOUNT (not the
/// rate). The rate rides along for audit and the backend may ignore it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub title: String,
    pub payer_id: MemberId,
    pub amount: f64,
    pub tax: f64,
    pub tax_rate: f64,
    pub split_method: SplitMethod,
    pub date: NaiveDate,
    pub notes: String,
    pub category: ExpenseCategory,
}

impl CreateExpenseRequest {
    /// Builds the request from a form snapshot and its computed result.
    pub fn from_computed(input: &ExpenseInput, result: &SplitResult) -> Self {
        CreateExpenseRequest {
            title: input.title.clone(),
            payer_id: input.payer_id.clone(),
            amount: result.subtotal.as_rm_f64(),
            tax: result.tax_amount.as_rm_f64(),
            tax_rate: input.tax_rate.percentage(),
            split_method: input.method,
            date: input.date,
            notes: input.notes.clone(),
            category: input.category,
        }
    }
}

/// `POST /api/v1/expenses` response. Only the id matters downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
}

// =============================================================================
// Split Attachment (step 2 of 2)
// =============================================================================

/// One participant's final (with-tax) liability on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLine {
    pub member_id: MemberId,
    pub amount: f64,
}

/// `POST /api/v1/split/addSplit` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSplitsRequest {
    pub expense_id: i64,
    pub splits: Vec<SplitLine>,
}

impl AddSplitsRequest {
    /// Builds split lines from a computed result (final shares, with tax).
    pub fn from_computed(expense_id: i64, result: &SplitResult) -> Self {
        AddSplitsRequest {
            expense_id,
            splits: result
                .shares
                .iter()
                .map(|s| SplitLine {
                    member_id: s.member_id.clone(),
                    amount: s.final_share.as_rm_f64(),
                })
                .collect(),
        }
    }

    /// Sum of the lines, back in sen, for the pre-send balance assertion.
    pub fn total(&self) -> Money {
        self.splits
            .iter()
            .map(|line| Money::from_rm_f64(line.amount))
            .sum()
    }
}

// =============================================================================
// Expense Feeds
// =============================================================================

/// One member's slice of a feed expense.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMember {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub paid: bool,

    #[serde(default)]
    pub amount: f64,

    #[serde(default, alias = "userId", alias = "member_id", alias = "user_id")]
    pub member_id: Option<MemberId>,

    #[serde(default, alias = "split_id", alias = "sId", alias = "s_id")]
    pub split_id: Option<i64>,
}

impl FeedMember {
    /// Amount in sen.
    pub fn amount_sen(&self) -> Money {
        Money::from_rm_f64(self.amount)
    }
}

/// One expense in a personal or group feed.
///
/// `total` is the grand total (with tax); `is_settled` folds the backend's
/// two settled flags into one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedExpense {
    pub id: i64,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub total: f64,

    #[serde(default, alias = "isSettled")]
    pub status: bool,

    #[serde(default)]
    pub paid_by: Option<String>,

    #[serde(default, alias = "payerMemberId", alias = "payerId")]
    pub paid_by_member_id: Option<MemberId>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub members: Vec<FeedMember>,
}

impl FeedExpense {
    /// Grand total in sen.
    pub fn total_sen(&self) -> Money {
        Money::from_rm_f64(self.total)
    }

    /// Finds this member's slice of the expense.
    pub fn member_split(&self, id: &MemberId) -> Option<&FeedMember> {
        self.members
            .iter()
            .find(|m| m.member_id.as_ref() == Some(id))
    }

    /// True once this member has settled their share.
    pub fn is_paid_by(&self, id: &MemberId) -> bool {
        self.member_split(id).map(|m| m.paid).unwrap_or(false)
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// `GET /api/v1/split/by-payer/{payerId}` row: one debtor and what they owe
/// the payer across all unsettled expenses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerSettlementRow {
    #[serde(alias = "member_id")]
    pub member_id: MemberId,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, alias = "total_owed")]
    pub total_owed: f64,
}

impl PayerSettlementRow {
    /// Owed amount in sen.
    pub fn owed_sen(&self) -> Money {
        Money::from_rm_f64(self.total_owed)
    }
}

/// `GET /api/v1/groupMember/byMember/{memberId}` response: the profile shown
/// when settling up with someone, QR payment handle included.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: i64,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, alias = "full_name")]
    pub full_name: Option<String>,

    #[serde(default, alias = "pay_qr")]
    pub pay_qr: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use matesplit_core::money::TaxRate;
    use matesplit_core::split::compute_shares;
    use matesplit_core::types::Participant;
    use std::collections::HashMap;

    fn computed() -> (ExpenseInput, SplitResult) {
        let input = ExpenseInput {
            title: "Steamboat".to_string(),
            category: ExpenseCategory::FoodAndDrinks,
            subtotal: Money::parse_lenient("90"),
            tax_rate: TaxRate::parse_lenient("6"),
            method: SplitMethod::Equally,
            payer_id: MemberId::new("17"),
            participants: vec![
                Participant::new("17", "Aisyah"),
                Participant::new("23", "Ben"),
                Participant::new("31", "Chen"),
            ],
            entries: HashMap::new(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            notes: String::new(),
        };
        let result = compute_shares(&input).unwrap();
        (input, result)
    }

    #[test]
    fn test_create_expense_sends_subtotal_and_tax_amount() {
        let (input, result) = computed();
        let req = CreateExpenseRequest::from_computed(&input, &result);
        let json = serde_json::to_value(&req).unwrap();

        // amount is the PRE-TAX subtotal; tax is the derived AMOUNT.
        assert_eq!(json["amount"], 90.0);
        assert_eq!(json["tax"], 5.4);
        assert_eq!(json["taxRate"], 6.0);
        assert_eq!(json["splitMethod"], "equally");
        assert_eq!(json["payerId"], "17");
        assert_eq!(json["date"], "2025-03-14");
        assert_eq!(json["category"], "Food & Drinks");
    }

    #[test]
    fn test_split_lines_carry_final_shares() {
        let (_, result) = computed();
        let req = AddSplitsRequest::from_computed(4217, &result);

        assert_eq!(req.expense_id, 4217);
        assert_eq!(req.splits.len(), 3);
        for line in &req.splits {
            assert_eq!(line.amount, 31.8);
        }
        assert_eq!(req.total(), result.grand_total);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["expenseId"], 4217);
        assert_eq!(json["splits"][0]["memberId"], "17");
    }

    #[test]
    fn test_feed_member_key_fallbacks() {
        // Backend spellings vary by endpoint; every variant must land in the
        // same field.
        for key in ["memberId", "userId", "member_id", "user_id"] {
            let m: FeedMember =
                serde_json::from_str(&format!(r#"{{"{key}": "23", "amount": 31.8}}"#)).unwrap();
            assert_eq!(m.member_id, Some(MemberId::new("23")), "key {key}");
        }

        for key in ["splitId", "split_id", "s_id"] {
            let m: FeedMember =
                serde_json::from_str(&format!(r#"{{"{key}": 9, "amount": 0}}"#)).unwrap();
            assert_eq!(m.split_id, Some(9), "key {key}");
        }
    }

    #[test]
    fn test_feed_expense_settled_fallback_and_lookup() {
        let e: FeedExpense = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Steamboat",
                "date": "2025-03-14",
                "total": 95.4,
                "isSettled": true,
                "members": [
                    {"memberId": "17", "paid": true, "amount": 31.8},
                    {"memberId": "23", "paid": false, "amount": 31.8}
                ]
            }"#,
        )
        .unwrap();

        assert!(e.status);
        assert_eq!(e.total_sen(), Money::from_sen(9540));
        assert!(e.is_paid_by(&MemberId::new("17")));
        assert!(!e.is_paid_by(&MemberId::new("23")));
        assert!(!e.is_paid_by(&MemberId::new("99")));
    }

    #[test]
    fn test_sparse_feed_payload_still_parses() {
        // The backend omits most optional keys on old rows.
        let e: FeedExpense = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(e.id, 7);
        assert!(e.title.is_none());
        assert!(e.total_sen().is_zero());
        assert!(e.members.is_empty());
    }

    #[test]
    fn test_settlement_row() {
        let row: PayerSettlementRow =
            serde_json::from_str(r#"{"memberId": "23", "username": "ben", "totalOwed": 63.6}"#)
                .unwrap();
        assert_eq!(row.owed_sen(), Money::from_sen(6360));
    }

    #[test]
    fn test_member_profile_key_fallbacks() {
        let p: MemberProfile = serde_json::from_str(
            r#"{"id": 5, "username": "ben", "full_name": "Ben Tan", "pay_qr": "qr-data"}"#,
        )
        .unwrap();
        assert_eq!(p.full_name.as_deref(), Some("Ben Tan"));
        assert_eq!(p.pay_qr.as_deref(), Some("qr-data"));
    }
}
