//! # Error Types
//!
//! Domain-specific error types for matesplit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  matesplit-core errors (this file)                                     │
//! │  └── SplitError      - Hard failures of the Split Calculator           │
//! │                                                                         │
//! │  matesplit-core validation (validation.rs)                             │
//! │  └── SplitIssue      - Soft submit-blockers, NOT errors                │
//! │                                                                         │
//! │  matesplit-ledger errors (separate crate)                              │
//! │  └── LedgerError     - HTTP/backend failures                           │
//! │                                                                         │
//! │  Flow: SplitError blocks computation; SplitIssue only disables the     │
//! │  submit button; LedgerError surfaces remote failures to the caller.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (member id, counts)
//! 3. Errors are enum variants, never String
//! 4. Malformed numeric TEXT is never an error — it coerces to zero

use thiserror::Error;

use crate::types::MemberId;

// =============================================================================
// Split Error
// =============================================================================

/// Hard failures of the Split Calculator.
///
/// These are the only conditions under which `compute_shares` refuses to
/// produce a result. Everything else (unbalanced percentages, unbalanced
/// amounts, too few participants) is a soft validation issue that merely
/// disables submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Zero participants selected.
    ///
    /// The caller decides whether this is fatal or merely disables the
    /// submit action; the UI typically renders [`crate::SplitResult::zeroed`]
    /// totals instead.
    #[error("no participants selected for this expense")]
    NoParticipants,

    /// The payer is not among the participants.
    ///
    /// Must not occur when the caller enforces payer-lock (the payer chip is
    /// auto-selected and cannot be removed). A violation is rejected here
    /// instead of silently mis-dividing.
    #[error("payer {payer} is not among the participants")]
    PayerNotParticipant { payer: MemberId },

    /// The same member appears twice in the participant list.
    ///
    /// Identity is an opaque key; a duplicate would double-charge one person
    /// and break the sum invariant.
    #[error("participant {member} appears more than once")]
    DuplicateParticipant { member: MemberId },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with SplitError.
pub type CoreResult<T> = Result<T, SplitError>;

// =============================================================================
// Unit Tests
// =============================================================================
