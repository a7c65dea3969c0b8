//! # matesplit-ledger: HTTP Layer for MateSplit
//!
//! Talks to the expense ledger backend over REST/JSON. This crate owns every
//! network call in MateSplit and computes nothing itself — amounts arrive
//! from `matesplit-core` already derived and reconciled.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   matesplit-core ──► ExpenseInput + SplitResult                         │
//! │                              │                                          │
//! │  ┌───────────────────────────▼─────────────────────────────────────┐   │
//! │  │              ★ matesplit-ledger (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  config   │  │   types   │  │  client   │  │   error   │  │   │
//! │  │   │ base_url  │  │ wire DTOs │  │ submit,   │  │ Splits-   │  │   │
//! │  │   │ session   │  │ aliases   │  │ feeds,    │  │ NotSaved  │  │   │
//! │  │   │           │  │ f64 edge  │  │ settle    │  │ et al.    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └───────────────────────────┬─────────────────────────────────────┘   │
//! │                              │ REST/JSON                                │
//! │                    Expense ledger backend                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Endpoints Covered
//! - `POST /api/v1/expenses` + `POST /api/v1/split/addSplit` (two-step submit)
//! - `PUT  /api/v1/split/markPaid/{splitId}`
//! - `GET  /api/v1/split/personal/{memberId}` / `GET /api/v1/split/group/{groupId}`
//! - `GET  /api/v1/split/by-payer/{payerId}`
//! - `GET  /api/v1/groupMember/byMember/{memberId}`

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use client::LedgerClient;
pub use config::{LedgerConfig, Session};
pub use error::{LedgerError, LedgerResult};
pub use types::{
    AddSplitsRequest, CreateExpenseRequest, ExpenseRecord, FeedExpense, FeedMember, MemberProfile,
    PayerSettlementRow, SplitLine,
};

// =============================================================================
// Logging
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// Called once by the consuming application, not by this library's own
/// functions. Safe to call twice; the second call is a no-op.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=matesplit=trace` - Trace the matesplit crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,matesplit=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
