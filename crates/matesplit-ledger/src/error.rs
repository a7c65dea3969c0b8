//! # Ledger Error Types
//!
//! Error types for talking to the expense ledger backend.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Ledger Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Submission          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Api (non-2xx)          │ │
//! │  │  InvalidUrl     │  │  (reqwest)      │  │  SplitsNotSaved         │ │
//! │  │  ConfigLoad     │  │                 │  │  UnbalancedPayload      │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The One That Matters: SplitsNotSaved
//! Submission is two requests (create expense, then attach splits). If the
//! second fails, the backend holds an expense with NO liabilities. Callers
//! must be able to tell this apart from "nothing was saved", so it carries
//! the orphaned expense id.

use thiserror::Error;

/// Result type alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger error type covering configuration, transport, and submission
/// failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid ledger configuration.
    #[error("Invalid ledger configuration: {0}")]
    InvalidConfig(String),

    /// Invalid backend base URL.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The HTTP request itself failed (connect, timeout, bad TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // =========================================================================
    // Submission Errors
    // =========================================================================
    /// The backend answered with a non-success status.
    #[error("{endpoint} returned status {status}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    /// The expense was created but attaching its splits failed.
    ///
    /// The expense id is the handle for manual cleanup or retry; losing it
    /// would strand an expense nobody owes anything on.
    #[error("expense {expense_id} was created but its splits were not saved")]
    SplitsNotSaved {
        expense_id: i64,
        #[source]
        source: Box<LedgerError>,
    },

    /// The expense snapshot failed submit-gating validation.
    ///
    /// The UI disables the submit button on these, but nothing stops another
    /// caller from handing us a half-filled form; the gate is re-checked
    /// before any request goes out.
    #[error("expense is not submittable: {reasons}")]
    NotSubmittable { reasons: String },

    /// Refused to send a payload whose split lines do not sum to the total.
    ///
    /// Last line of defense: the calculator guarantees this never fires, but
    /// a mis-built payload must die here rather than in someone's wallet.
    #[error("split lines sum to {actual} sen, expected {expected} sen; payload not sent")]
    UnbalancedPayload { expected: i64, actual: i64 },
}

impl From<std::io::Error> for LedgerError {
    fn from(e: std::io::Error) -> Self {
        LedgerError::ConfigLoadFailed(e.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(e: toml::de::Error) -> Self {
        LedgerError::ConfigLoadFailed(e.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_not_saved_keeps_expense_id() {
        let err = LedgerError::SplitsNotSaved {
            expense_id: 4217,
            source: Box::new(LedgerError::Api {
                endpoint: "/api/v1/split/addSplit",
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("4217"));
        assert!(msg.contains("splits were not saved"));
    }

    #[test]
    fn test_unbalanced_payload_message() {
        let err = LedgerError::UnbalancedPayload {
            expected: 9540,
            actual: 9539,
        };
        assert_eq!(
            err.to_string(),
            "split lines sum to 9539 sen, expected 9540 sen; payload not sent"
        );
    }
}
