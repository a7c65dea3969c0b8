//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a shared-expense app:                                               │
//! │    RM 100.00 / 3 = RM 33.33 (×3 = RM 99.99)  → Lost RM 0.01!           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Sen                                              │
//! │    10000 sen / 3 = 3333 sen (×3 = 9999 sen)                            │
//! │    We KNOW we lost 1 sen, and patch it onto the last participant       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy
//! Every 2-decimal rounding in this crate is HALF AWAY FROM ZERO, pinned by
//! the integer formula `(value * rate + 5000) / 10000`. Amounts in this
//! domain are non-negative, so this is plain half-up in practice.
//!
//! ## Usage
//! ```rust
//! use matesplit_core::money::{Money, TaxRate};
//!
//! // Create from sen (preferred)
//! let subtotal = Money::from_sen(9000); // RM 90.00
//!
//! // Tax at 6% (600 basis points)
//! let tax = subtotal.tax(TaxRate::from_bps(600));
//! assert_eq!(tax.sen(), 540); // RM 5.40
//!
//! // Free-text field coercion (never panics, never errors)
//! assert_eq!(Money::parse_lenient("12,50").sen(), 1250);
//! assert_eq!(Money::parse_lenient("abc").sen(), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Lenient 2-Decimal Parsing
// =============================================================================

/// Parses free-text decimal input into hundredths (sen / basis points).
///
/// Accepts comma decimal separators (mobile keyboards emit them), rounds a
/// third fractional digit half away from zero, and returns `None` for
/// anything malformed or negative. Callers coerce `None` to zero: raw text
/// comes straight from UI fields and must never abort a computation.
fn parse_hundredths(raw: &str) -> Option<i64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() || cleaned.starts_with('-') || cleaned.starts_with('+') {
        return None;
    }

    let (int_part, frac_part) = match cleaned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (cleaned.as_str(), ""),
    };

    // 12 integer digits keeps us far from i64 overflow after ×100.
    if int_part.len() > 12
        || !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
        || (int_part.is_empty() && frac_part.is_empty())
    {
        return None;
    }

    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };

    let mut frac_digits = frac_part.bytes().map(|b| i64::from(b - b'0'));
    let d1 = frac_digits.next().unwrap_or(0);
    let d2 = frac_digits.next().unwrap_or(0);
    let mut hundredths = whole * 100 + d1 * 10 + d2;
    if frac_digits.next().unwrap_or(0) >= 5 {
        hundredths += 1;
    }
    Some(hundredths)
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in sen (the smallest RM unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate differences during remainder patching
///   can be negative even though user-facing amounts never are
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Raw text field ──► Money::parse_lenient ──► subtotal                   │
/// │                                                                         │
/// │  subtotal ──► tax ──► grand total ──► per-participant shares            │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from sen (the smallest currency unit).
    ///
    /// ```rust
    /// use matesplit_core::money::Money;
    ///
    /// let share = Money::from_sen(3334); // RM 33.34
    /// assert_eq!(share.sen(), 3334);
    /// ```
    #[inline]
    pub const fn from_sen(sen: i64) -> Self {
        Money(sen)
    }

    /// Coerces raw text-field input into Money.
    ///
    /// ## Coercion Rules
    /// - comma decimal separators are accepted ("12,50" = RM 12.50)
    /// - non-numeric or empty input becomes RM 0.00
    /// - negative input is clamped to RM 0.00
    /// - a third decimal digit rounds half away from zero
    ///
    /// ```rust
    /// use matesplit_core::money::Money;
    ///
    /// assert_eq!(Money::parse_lenient("57").sen(), 5700);
    /// assert_eq!(Money::parse_lenient("12.345").sen(), 1235);
    /// assert_eq!(Money::parse_lenient("-5").sen(), 0);
    /// assert_eq!(Money::parse_lenient("").sen(), 0);
    /// ```
    pub fn parse_lenient(raw: &str) -> Self {
        Money(parse_hundredths(raw).unwrap_or(0))
    }

    /// Returns the value in sen.
    #[inline]
    pub const fn sen(&self) -> i64 {
        self.0
    }

    /// Returns the whole-ringgit portion.
    #[inline]
    pub const fn ringgit(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the sen portion (always 0-99).
    #[inline]
    pub const fn sen_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates the tax amount for this value at the given rate.
    ///
    /// Contract: `tax = round2(amount * rate / 100)`, half away from zero.
    ///
    /// ```rust
    /// use matesplit_core::money::{Money, TaxRate};
    ///
    /// // RM 90.00 at 6% = RM 5.40
    /// let tax = Money::from_sen(9000).tax(TaxRate::from_bps(600));
    /// assert_eq!(tax.sen(), 540);
    /// ```
    pub fn tax(&self, rate: TaxRate) -> Money {
        // i128 prevents overflow on large amounts; +5000 rounds the
        // basis-point division half away from zero.
        let sen = (self.0 as i128 * rate.bps() as i128 + 5_000) / 10_000;
        Money(sen as i64)
    }

    /// Scales this value up by the tax rate: `round2(amount * (1 + rate/100))`.
    ///
    /// Used when converting a pre-tax share into a final share.
    pub fn with_tax(&self, rate: TaxRate) -> Money {
        let sen = (self.0 as i128 * (10_000 + rate.bps() as i128) + 5_000) / 10_000;
        Money(sen as i64)
    }

    /// Divides by a participant count, rounding half away from zero.
    ///
    /// The result is one EQUAL share; the division remainder is the caller's
    /// problem (it gets patched onto the last participant).
    ///
    /// ```rust
    /// use matesplit_core::money::Money;
    ///
    /// // RM 100.00 / 3 = RM 33.33
    /// assert_eq!(Money::from_sen(10000).div_round(3).sen(), 3333);
    /// ```
    pub fn div_round(&self, n: usize) -> Money {
        let n = n as i128;
        Money(((2 * self.0 as i128 + n) / (2 * n)) as i64)
    }

    /// Returns the value as a decimal RM number for the JSON wire format.
    ///
    /// The backend speaks 2-decimal JSON numbers ("amount": 33.34). Sen are
    /// exact integers, so the conversion is lossless for any realistic
    /// expense. Wire boundary ONLY; never feed this back into calculations.
    #[inline]
    pub fn as_rm_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts a decimal RM number from the wire back into Money.
    pub fn from_rm_f64(rm: f64) -> Self {
        if !rm.is_finite() {
            return Money::zero();
        }
        Money((rm * 100.0).round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in the app's RM format.
///
/// This is what the UI renders, so the format matches the web front-end:
/// `RM 33.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}RM {}.{:02}", sign, self.ringgit().abs(), self.sen_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax/service-charge rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 600 bps = 6% (Malaysian SST)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Upper bound on a parsed rate: 100%. No tax or service charge exceeds
    /// the bill itself, and an uncapped rate would push `with_tax` out of
    /// i64 range.
    pub const MAX_BPS: u32 = 10_000;

    /// Coerces raw percent text ("6" means 6%) into a rate.
    ///
    /// Absent, non-numeric, or negative input becomes 0% — the tax field is
    /// optional in the expense form. Values above 100% clamp to 100%.
    pub fn parse_lenient(raw: &str) -> Self {
        let bps = parse_hundredths(raw)
            .map(|h| h.min(Self::MAX_BPS as i64) as u32)
            .unwrap_or(0);
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if the tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Percent
// =============================================================================

/// A percentage-mode share entry, in basis points of 100% (10000 = 100%).
///
/// Distinct from [`TaxRate`] even though both are bps: a `Percent` is a
/// participant's claimed portion of the subtotal, and percentage-mode
/// closure arithmetic (`100 − Σ others`) only makes sense on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// 100% in basis points.
    pub const FULL_BPS: u32 = 10_000;

    /// The whole subtotal.
    pub const FULL: Percent = Percent(Self::FULL_BPS);

    /// Upper bound on a parsed entry: 10,000%. Over-allocated entries must
    /// SURVIVE parsing so the validity check can reject the total — a clamp
    /// at 100% would quietly turn "150" into a valid full share. This bound
    /// only exists to keep `of` and the bps summations in integer range.
    pub const MAX_BPS: u32 = 100 * Self::FULL_BPS;

    /// Creates a percent from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Coerces raw percent text ("33.33") into a share percentage.
    /// Non-numeric or negative input becomes 0%; runaway values clamp to
    /// [`Percent::MAX_BPS`], still far past 100% so validation rejects them.
    pub fn parse_lenient(raw: &str) -> Self {
        let bps = parse_hundredths(raw)
            .map(|h| h.min(Self::MAX_BPS as i64) as u32)
            .unwrap_or(0);
        Percent(bps)
    }

    /// Returns the percentage in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Takes this percentage of an amount, rounded half away from zero.
    ///
    /// ```rust
    /// use matesplit_core::money::{Money, Percent};
    ///
    /// // 50% of RM 200.00 = RM 100.00
    /// let half = Percent::from_bps(5000).of(Money::from_sen(20000));
    /// assert_eq!(half.sen(), 10000);
    /// ```
    pub fn of(&self, amount: Money) -> Money {
        let sen = (amount.sen() as i128 * self.0 as i128 + 5_000) / 10_000;
        Money::from_sen(sen as i64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sen() {
        let money = Money::from_sen(1099);
        assert_eq!(money.sen(), 1099);
        assert_eq!(money.ringgit(), 10);
        assert_eq!(money.sen_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_sen(1099)), "RM 10.99");
        assert_eq!(format!("{}", Money::from_sen(500)), "RM 5.00");
        assert_eq!(format!("{}", Money::from_sen(-550)), "-RM 5.50");
        assert_eq!(format!("{}", Money::from_sen(0)), "RM 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_sen(1000);
        let b = Money::from_sen(500);

        assert_eq!((a + b).sen(), 1500);
        assert_eq!((a - b).sen(), 500);

        let sum: Money = [a, b, b].into_iter().sum();
        assert_eq!(sum.sen(), 2000);
    }

    #[test]
    fn test_parse_lenient_basic() {
        assert_eq!(Money::parse_lenient("100").sen(), 10000);
        assert_eq!(Money::parse_lenient("12.5").sen(), 1250);
        assert_eq!(Money::parse_lenient("12.50").sen(), 1250);
        assert_eq!(Money::parse_lenient(".5").sen(), 50);
        assert_eq!(Money::parse_lenient(" 7.25 ").sen(), 725);
    }

    #[test]
    fn test_parse_lenient_comma_separator() {
        // Mobile keyboards emit commas; the original form normalized them.
        assert_eq!(Money::parse_lenient("12,50").sen(), 1250);
    }

    #[test]
    fn test_parse_lenient_rounds_third_digit() {
        assert_eq!(Money::parse_lenient("12.345").sen(), 1235);
        assert_eq!(Money::parse_lenient("12.344").sen(), 1234);
        assert_eq!(Money::parse_lenient("12.3449").sen(), 1234);
    }

    #[test]
    fn test_parse_lenient_coerces_garbage_to_zero() {
        assert_eq!(Money::parse_lenient("").sen(), 0);
        assert_eq!(Money::parse_lenient("abc").sen(), 0);
        assert_eq!(Money::parse_lenient("12.3.4").sen(), 0);
        assert_eq!(Money::parse_lenient("1e3").sen(), 0);
    }

    #[test]
    fn test_parse_lenient_clamps_negative() {
        assert_eq!(Money::parse_lenient("-5").sen(), 0);
        assert_eq!(Money::parse_lenient("-0.01").sen(), 0);
    }

    #[test]
    fn test_tax_basic() {
        // RM 90.00 at 6% = RM 5.40 exactly
        let tax = Money::from_sen(9000).tax(TaxRate::from_bps(600));
        assert_eq!(tax.sen(), 540);
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        // RM 10.00 at 8.25% = RM 0.825 → RM 0.83
        let tax = Money::from_sen(1000).tax(TaxRate::from_bps(825));
        assert_eq!(tax.sen(), 83);
    }

    #[test]
    fn test_tax_zero_rate() {
        let tax = Money::from_sen(12345).tax(TaxRate::zero());
        assert!(tax.is_zero());
    }

    #[test]
    fn test_with_tax() {
        // RM 30.00 * 1.06 = RM 31.80 exactly
        let share = Money::from_sen(3000).with_tax(TaxRate::from_bps(600));
        assert_eq!(share.sen(), 3180);

        // RM 33.33 * 1.06 = RM 35.3298 → RM 35.33
        let share = Money::from_sen(3333).with_tax(TaxRate::from_bps(600));
        assert_eq!(share.sen(), 3533);
    }

    #[test]
    fn test_div_round() {
        assert_eq!(Money::from_sen(10000).div_round(3).sen(), 3333);
        assert_eq!(Money::from_sen(10000).div_round(4).sen(), 2500);
        // RM 0.50 / 4 = 12.5 sen → 13 sen (half away from zero)
        assert_eq!(Money::from_sen(50).div_round(4).sen(), 13);
    }

    #[test]
    fn test_tax_rate_parse_lenient() {
        assert_eq!(TaxRate::parse_lenient("6").bps(), 600);
        assert_eq!(TaxRate::parse_lenient("8.25").bps(), 825);
        assert_eq!(TaxRate::parse_lenient("").bps(), 0);
        assert_eq!(TaxRate::parse_lenient("n/a").bps(), 0);
        assert_eq!(TaxRate::parse_lenient("-6").bps(), 0);
    }

    #[test]
    fn test_tax_rate_clamps_at_one_hundred_percent() {
        assert_eq!(TaxRate::parse_lenient("100").bps(), TaxRate::MAX_BPS);
        assert_eq!(TaxRate::parse_lenient("150").bps(), TaxRate::MAX_BPS);
        assert_eq!(TaxRate::parse_lenient("42949672.95").bps(), TaxRate::MAX_BPS);

        // The cap keeps with_tax inside i64 for any parseable subtotal.
        let huge = Money::parse_lenient("999999999999.99");
        let rate = TaxRate::parse_lenient("42949672.95");
        assert_eq!(huge.with_tax(rate), huge + huge);
    }

    #[test]
    fn test_percent_parse_survives_runaway_input() {
        // A single entry above 100% stays above 100% so the percentage
        // total fails validation instead of quietly becoming a full share.
        assert_eq!(Percent::parse_lenient("150").bps(), 15_000);
        assert_eq!(Percent::parse_lenient("42949672.95").bps(), Percent::MAX_BPS);
        assert!(Percent::parse_lenient("42949672.95").bps() > Percent::FULL_BPS);
    }

    #[test]
    fn test_percent_parse_and_of() {
        assert_eq!(Percent::parse_lenient("50").bps(), 5000);
        assert_eq!(Percent::parse_lenient("33.33").bps(), 3333);
        assert_eq!(Percent::parse_lenient("junk").bps(), 0);

        // 33.33% of RM 200.00 = RM 66.66
        let share = Percent::from_bps(3333).of(Money::from_sen(20000));
        assert_eq!(share.sen(), 6666);
    }

    #[test]
    fn test_wire_round_trip() {
        let m = Money::from_sen(3334);
        assert_eq!(m.as_rm_f64(), 33.34);
        assert_eq!(Money::from_rm_f64(33.34), m);
        assert_eq!(Money::from_rm_f64(f64::NAN), Money::zero());
    }
}
