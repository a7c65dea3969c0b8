//! # matesplit-core: Pure Business Logic for MateSplit
//!
//! This crate is the **heart** of MateSplit. It contains the split
//! calculator and everything it needs as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       MateSplit Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      UI Surfaces                                │   │
//! │  │   Expense form ──► Share editor ──► Summary ──► Settle-up      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ matesplit-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │   split   │  │ validation│  │   │
//! │  │   │   Money   │  │ Expense-  │  │  compute_ │  │  submit   │  │   │
//! │  │   │  TaxRate  │  │   Input   │  │   shares  │  │   gate    │  │   │
//! │  │   │  Percent  │  │  Result   │  │ payer_net │  │  issues   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS • INTEGER SEN           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                matesplit-ledger (HTTP Layer)                    │   │
//! │  │        expense + split submission, feeds, settlement            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money, TaxRate, Percent with integer arithmetic (no floats!)
//! - [`types`] - Domain types (Participant, ExpenseInput, SplitResult, ...)
//! - [`split`] - The one canonical split calculator
//! - [`validation`] - Submit-gating rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **One calculator**: every surface derives shares from the same code path
//! 2. **Pure Functions**: same input = same output, recomputed from scratch
//! 3. **Integer Money**: all monetary values are in sen (i64), never floats
//! 4. **Lenient text, strict structure**: garbage text coerces to zero;
//!    structural nonsense (duplicate member, payer missing) is a typed error
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use chrono::NaiveDate;
//! use matesplit_core::money::{Money, TaxRate};
//! use matesplit_core::split::compute_shares;
//! use matesplit_core::types::{
//!     ExpenseCategory, ExpenseInput, MemberId, Participant, SplitMethod,
//! };
//!
//! let input = ExpenseInput {
//!     title: "Mamak run".to_string(),
//!     category: ExpenseCategory::FoodAndDrinks,
//!     subtotal: Money::parse_lenient("90"),
//!     tax_rate: TaxRate::parse_lenient("6"),
//!     method: SplitMethod::Equally,
//!     payer_id: MemberId::new("aisyah"),
//!     participants: vec![
//!         Participant::new("aisyah", "Aisyah"),
//!         Participant::new("ben", "Ben"),
//!         Participant::new("chen", "Chen"),
//!     ],
//!     entries: HashMap::new(),
//!     date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
//!     notes: String::new(),
//! };
//!
//! let result = compute_shares(&input).unwrap();
//! assert_eq!(result.grand_total.sen(), 9540);           // RM 95.40
//! assert_eq!(result.shares[0].final_share.sen(), 3180); // RM 31.80 each
//! assert_eq!(result.payer_net.sen(), 6360);             // owed to Aisyah
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod split;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use matesplit_core::Money` instead of
// `use matesplit_core::money::Money`

pub use error::{CoreResult, SplitError};
pub use money::{Money, Percent, TaxRate};
pub use split::{compute_shares, compute_tax};
pub use types::*;
pub use validation::{is_valid, validate, SplitIssue, MIN_SPLIT_PARTICIPANTS};
