//! # Display Helpers
//!
//! Formatting for the storefront: Indonesian long dates and the
//! "crossed-out price" percent badges next to discounted products.
//!
//! Everything here is presentation only. No amount that gets charged is
//! ever computed in this module.

use chrono::{DateTime, Datelike, Utc};

use crate::money::Money;

/// Indonesian month names, January first.
const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Formats a timestamp as an Indonesian long date, e.g. `17 Agustus 1945`.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use lunas_core::display::format_date;
///
/// let due = Utc.with_ymd_and_hms(2026, 8, 25, 0, 0, 0).unwrap();
/// assert_eq!(format_date(due), "25 Agustus 2026");
/// ```
pub fn format_date(date: DateTime<Utc>) -> String {
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Percent saved between the crossed-out price and the real one, for
/// the "-25%" badge. Rounded to the nearest whole percent.
///
/// Returns 0 when there is nothing to save: non-positive original, or a
/// "discounted" price at or above the original.
pub fn discount_percentage(original: Money, discounted: Money) -> u32 {
    if !original.is_positive() || discounted >= original {
        return 0;
    }
    let saved = (original - discounted).rupiah() as f64;
    let ratio = saved / original.rupiah() as f64;
    (ratio * 100.0).round() as u32
}

/// Applies a whole-or-fractional percent discount to a price, never
/// going below zero.
///
/// ## Example
/// ```rust
/// use lunas_core::display::price_after_discount;
/// use lunas_core::money::Money;
///
/// let price = Money::from_rupiah(1_000_000);
/// assert_eq!(price_after_discount(price, 10.0).rupiah(), 900_000);
/// ```
pub fn price_after_discount(price: Money, percent: f64) -> Money {
    let bps = (percent * 100.0).round() as u32;
    (price - price.percentage(bps)).max(Money::zero())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date_covers_month_names() {
        let first = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(first), "1 Januari 2025");

        let merdeka = Utc.with_ymd_and_hms(1945, 8, 17, 0, 0, 0).unwrap();
        assert_eq!(format_date(merdeka), "17 Agustus 1945");

        let last = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_date(last), "31 Desember 2026");
    }

    #[test]
    fn test_discount_percentage_rounds() {
        let original = Money::from_rupiah(1_000_000);
        assert_eq!(discount_percentage(original, Money::from_rupiah(750_000)), 25);
        // 333.333 / 1.000.000 = 33.3% → 33
        assert_eq!(discount_percentage(original, Money::from_rupiah(666_667)), 33);
    }

    #[test]
    fn test_discount_percentage_degenerate_inputs() {
        let original = Money::from_rupiah(1_000_000);
        assert_eq!(discount_percentage(Money::zero(), Money::from_rupiah(500)), 0);
        assert_eq!(discount_percentage(original, original), 0);
        assert_eq!(discount_percentage(original, Money::from_rupiah(1_200_000)), 0);
    }

    #[test]
    fn test_price_after_discount() {
        let price = Money::from_rupiah(1_000_000);
        assert_eq!(price_after_discount(price, 10.0).rupiah(), 900_000);
        assert_eq!(price_after_discount(price, 12.5).rupiah(), 875_000);
        assert_eq!(price_after_discount(price, 100.0).rupiah(), 0);
    }

    #[test]
    fn test_price_after_discount_clamps_at_zero() {
        let price = Money::from_rupiah(1_000_000);
        assert_eq!(price_after_discount(price, 150.0).rupiah(), 0);
    }
}
