//! # Ledger Client
//!
//! HTTP client for the expense ledger backend.
//!
//! ## Submission Is Two Requests
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      submit_expense(input, result)                      │
//! │                                                                         │
//! │  0. Gate: re-run validation, re-assert Σ lines == grand total          │
//! │                                                                         │
//! │  1. POST /api/v1/expenses          ──► { id }                          │
//! │        title, payerId, amount (pre-tax), tax (amount), ...             │
//! │                                                                         │
//! │  2. POST /api/v1/split/addSplit    ──► liabilities attached            │
//! │        expenseId, splits: [{ memberId, amount (final) }]               │
//! │                                                                         │
//! │  Step 2 failing leaves an ORPHANED expense on the backend. That is     │
//! │  reported as SplitsNotSaved { expense_id } so the caller can retry     │
//! │  the attach or clean up — it is NOT the same as "nothing saved".      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client never computes shares. Amounts enter this module already
//! derived by `matesplit_core::split` and leave it unchanged.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use matesplit_core::types::{ExpenseInput, MemberId, SplitResult};
use matesplit_core::validation::validate;

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::types::{
    AddSplitsRequest, CreateExpenseRequest, ExpenseRecord, FeedExpense, MemberProfile,
    PayerSettlementRow,
};

/// Client for the expense ledger backend.
#[derive(Clone)]
pub struct LedgerClient {
    client: Client,
    base_url: String,
}

impl LedgerClient {
    /// Builds a client from config. Fails only on TLS/system setup problems.
    pub fn new(config: &LedgerConfig) -> LedgerResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Creates the expense shell. Step 1 of submission.
    pub async fn create_expense(&self, req: &CreateExpenseRequest) -> LedgerResult<ExpenseRecord> {
        let url = format!("{}/api/v1/expenses", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        if !response.status().is_success() {
            return Err(LedgerError::Api {
                endpoint: "/api/v1/expenses",
                status: response.status(),
            });
        }

        let record = response.json::<ExpenseRecord>().await?;
        debug!(expense_id = record.id, title = %req.title, "Expense created");
        Ok(record)
    }

    /// Attaches per-member liabilities to an expense. Step 2 of submission.
    pub async fn add_splits(&self, req: &AddSplitsRequest) -> LedgerResult<()> {
        let url = format!("{}/api/v1/split/addSplit", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        if !response.status().is_success() {
            return Err(LedgerError::Api {
                endpoint: "/api/v1/split/addSplit",
                status: response.status(),
            });
        }

        Ok(())
    }

    /// Submits a computed expense: validity gate, balance assertion, then the
    /// two-step create + attach.
    ///
    /// Returns the new expense id. A [`LedgerError::SplitsNotSaved`] carries
    /// that same id when step 2 fails, so callers can retry the attach
    /// without creating a second expense.
    pub async fn submit_expense(
        &self,
        input: &ExpenseInput,
        result: &SplitResult,
    ) -> LedgerResult<i64> {
        let issues = validate(input);
        if !issues.is_empty() {
            let reasons = issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(LedgerError::NotSubmittable { reasons });
        }

        let splits_template = AddSplitsRequest::from_computed(0, result);
        let total = splits_template.total();
        if total != result.grand_total {
            return Err(LedgerError::UnbalancedPayload {
                expected: result.grand_total.sen(),
                actual: total.sen(),
            });
        }

        let expense = self
            .create_expense(&CreateExpenseRequest::from_computed(input, result))
            .await?;

        let splits = AddSplitsRequest {
            expense_id: expense.id,
            ..splits_template
        };
        if let Err(source) = self.add_splits(&splits).await {
            warn!(
                expense_id = expense.id,
                "Expense created but splits were not attached"
            );
            return Err(LedgerError::SplitsNotSaved {
                expense_id: expense.id,
                source: Box::new(source),
            });
        }

        info!(
            expense_id = expense.id,
            grand_total = %result.grand_total,
            participants = result.shares.len(),
            "Expense submitted"
        );
        Ok(expense.id)
    }

    // =========================================================================
    // Settlement
    // =========================================================================

    /// Marks one split line as paid.
    pub async fn mark_split_paid(&self, split_id: i64) -> LedgerResult<()> {
        let url = format!("{}/api/v1/split/markPaid/{}", self.base_url, split_id);
        let response = self.client.put(&url).send().await?;

        if !response.status().is_success() {
            return Err(LedgerError::Api {
                endpoint: "/api/v1/split/markPaid",
                status: response.status(),
            });
        }

        debug!(split_id, "Split marked paid");
        Ok(())
    }

    /// Who owes the payer, aggregated across unsettled expenses.
    ///
    /// Zero and negative rows are dropped; there is nothing to settle there.
    pub async fn owed_to_payer(&self, payer: &MemberId) -> LedgerResult<Vec<PayerSettlementRow>> {
        let url = format!("{}/api/v1/split/by-payer/{}", self.base_url, payer);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LedgerError::Api {
                endpoint: "/api/v1/split/by-payer",
                status: response.status(),
            });
        }

        let rows = response.json::<Vec<PayerSettlementRow>>().await?;
        Ok(rows
            .into_iter()
            .filter(|r| r.owed_sen().is_positive())
            .collect())
    }

    /// Profile (name + payment QR) for one member, shown when settling up.
    pub async fn member_profile(&self, member: &MemberId) -> LedgerResult<MemberProfile> {
        let url = format!("{}/api/v1/groupMember/byMember/{}", self.base_url, member);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LedgerError::Api {
                endpoint: "/api/v1/groupMember/byMember",
                status: response.status(),
            });
        }

        Ok(response.json::<MemberProfile>().await?)
    }

    // =========================================================================
    // Feeds
    // =========================================================================

    /// Expenses this member is involved in.
    pub async fn personal_feed(&self, member: &MemberId) -> LedgerResult<Vec<FeedExpense>> {
        self.feed(
            format!("{}/api/v1/split/personal/{}", self.base_url, member),
            "/api/v1/split/personal",
        )
        .await
    }

    /// Expenses for one group.
    pub async fn group_feed(&self, group_id: &str) -> LedgerResult<Vec<FeedExpense>> {
        self.feed(
            format!("{}/api/v1/split/group/{}", self.base_url, group_id),
            "/api/v1/split/group",
        )
        .await
    }

    async fn feed(&self, url: String, endpoint: &'static str) -> LedgerResult<Vec<FeedExpense>> {
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LedgerError::Api {
                endpoint,
                status: response.status(),
            });
        }

        let mut feed = response.json::<Vec<FeedExpense>>().await?;
        // Newest first, title as tiebreak, matching the transaction list.
        feed.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));
        Ok(feed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
// No mock HTTP server in the test stack; these cover construction, gating,
// and the pre-send balance assertion. The wire formats themselves are tested
// in types.rs.
