//! # Installment Module
//!
//! Splits a grand total into per-period amounts, and picks which period
//! of an existing plan gets paid next.
//!
//! ## Two Sources of Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Amounts Come From                            │
//! │                                                                         │
//! │  build_schedule(grand_total, count, authored_rows)                      │
//! │       │                                                                 │
//! │       ├── count ≤ 1 ──────────────► no plan                            │
//! │       │                                                                 │
//! │       ├── authored row for count ─► row amounts VERBATIM               │
//! │       │                             (author decides; sum may differ    │
//! │       │                              from the grand total)             │
//! │       │                                                                 │
//! │       └── otherwise ──────────────► floor(grand / count) per period    │
//! │                                     (every period; shortfall stays)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! For existing plans, only the lowest-numbered PENDING period is ever
//! payable; the backend's ordering is not trusted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{InstallmentPaymentDetail, InstallmentPricingRow};

// =============================================================================
// Installment Schedule
// =============================================================================

/// Where a schedule's amounts came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// An authored pricing row matched the requested count.
    Authored,
    /// No row matched; the grand total was split evenly.
    EvenSplit,
}

/// A concrete payment schedule: one amount per period, in billing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstallmentSchedule {
    /// Number of periods. Always equals `amounts.len()`.
    pub count: u32,

    /// Amount of each period, first to last.
    pub amounts: Vec<Money>,

    /// Where the amounts came from.
    pub source: ScheduleSource,
}

impl InstallmentSchedule {
    /// The first period's amount - what the customer pays now when no
    /// booking fee overrides it.
    pub fn first(&self) -> Option<Money> {
        self.amounts.first().copied()
    }

    /// Sum of all periods. For even splits this may fall short of the
    /// grand total; the shortfall is accepted, not corrected.
    pub fn total(&self) -> Money {
        self.amounts
            .iter()
            .fold(Money::zero(), |acc, amount| acc + *amount)
    }
}

// =============================================================================
// Schedule Construction
// =============================================================================

/// Builds the payment schedule for a grand total.
///
/// ## Rules
/// - `count` ≤ 1 means no plan at all (`None`).
/// - An authored row matching `count` is billed verbatim, in order,
///   even when its sum differs from `grand_total`.
/// - Otherwise every period is `floor(grand_total / count)`. The even
///   split can undershoot by up to `count - 1` rupiah; it is preserved
///   exactly because invoices already went out this way.
///
/// ## Example
/// ```rust
/// use lunas_core::installment::build_schedule;
/// use lunas_core::money::Money;
///
/// let schedule = build_schedule(Money::from_rupiah(1_000_000), 3, &[]).unwrap();
/// let amounts: Vec<i64> = schedule.amounts.iter().map(|m| m.rupiah()).collect();
/// assert_eq!(amounts, vec![333_333, 333_333, 333_333]);
/// ```
pub fn build_schedule(
    grand_total: Money,
    count: u32,
    authored: &[InstallmentPricingRow],
) -> Option<InstallmentSchedule> {
    if count <= 1 {
        return None;
    }

    if let Some(row) = authored.iter().find(|row| row.count == count) {
        return Some(InstallmentSchedule {
            count,
            amounts: row.amounts.iter().copied().map(Money::from_rupiah).collect(),
            source: ScheduleSource::Authored,
        });
    }

    let per_period = grand_total.split_even(count as i64);
    Some(InstallmentSchedule {
        count,
        amounts: vec![per_period; count as usize],
        source: ScheduleSource::EvenSplit,
    })
}

// =============================================================================
// Pending Period Selection
// =============================================================================

/// Picks the next payable period of an existing plan.
///
/// The lowest-numbered PENDING detail wins, whatever order the backend
/// sent them in. Settled, failed, expired, and unknown statuses are
/// never payable. `None` means the plan has nothing left to pay.
pub fn next_pending(details: &[InstallmentPaymentDetail]) -> Option<&InstallmentPaymentDetail> {
    details
        .iter()
        .filter(|detail| detail.is_pending())
        .min_by_key(|detail| detail.number)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InstallmentStatus;

    fn detail(number: u32, status: InstallmentStatus) -> InstallmentPaymentDetail {
        InstallmentPaymentDetail {
            number,
            status,
            grand_total: 500_000,
            expired_date: None,
        }
    }

    #[test]
    fn test_no_plan_for_count_zero_or_one() {
        let grand = Money::from_rupiah(1_000_000);
        assert!(build_schedule(grand, 0, &[]).is_none());
        assert!(build_schedule(grand, 1, &[]).is_none());
    }

    #[test]
    fn test_even_split_floors_every_period() {
        let schedule = build_schedule(Money::from_rupiah(1_000_000), 3, &[]).unwrap();
        assert_eq!(schedule.count, 3);
        assert_eq!(schedule.source, ScheduleSource::EvenSplit);
        let amounts: Vec<i64> = schedule.amounts.iter().map(|m| m.rupiah()).collect();
        assert_eq!(amounts, vec![333_333, 333_333, 333_333]);

        // The rupiah lost to flooring stays lost
        assert_eq!(schedule.total().rupiah(), 999_999);
    }

    #[test]
    fn test_even_split_exact_division() {
        let schedule = build_schedule(Money::from_rupiah(900_000), 3, &[]).unwrap();
        let amounts: Vec<i64> = schedule.amounts.iter().map(|m| m.rupiah()).collect();
        assert_eq!(amounts, vec![300_000, 300_000, 300_000]);
        assert_eq!(schedule.total().rupiah(), 900_000);
    }

    #[test]
    fn test_schedule_length_equals_count() {
        for count in 2..=12u32 {
            let schedule = build_schedule(Money::from_rupiah(2_400_000), count, &[]).unwrap();
            assert_eq!(schedule.amounts.len(), count as usize);
            assert_eq!(schedule.count, count);
        }
    }

    #[test]
    fn test_authored_row_used_verbatim() {
        let rows = vec![InstallmentPricingRow {
            count: 3,
            amounts: vec![500_000, 300_000, 300_000],
        }];

        // Sum is 1.100.000 against a 1.000.000 grand total - accepted as authored
        let schedule = build_schedule(Money::from_rupiah(1_000_000), 3, &rows).unwrap();
        assert_eq!(schedule.source, ScheduleSource::Authored);
        let amounts: Vec<i64> = schedule.amounts.iter().map(|m| m.rupiah()).collect();
        assert_eq!(amounts, vec![500_000, 300_000, 300_000]);
        assert_eq!(schedule.total().rupiah(), 1_100_000);
    }

    #[test]
    fn test_unmatched_count_falls_back_to_even_split() {
        let rows = vec![InstallmentPricingRow {
            count: 3,
            amounts: vec![500_000, 300_000, 300_000],
        }];

        let schedule = build_schedule(Money::from_rupiah(1_000_000), 4, &rows).unwrap();
        assert_eq!(schedule.source, ScheduleSource::EvenSplit);
        let amounts: Vec<i64> = schedule.amounts.iter().map(|m| m.rupiah()).collect();
        assert_eq!(amounts, vec![250_000; 4]);
    }

    #[test]
    fn test_first_period() {
        let schedule = build_schedule(Money::from_rupiah(1_000_000), 2, &[]).unwrap();
        assert_eq!(schedule.first().unwrap().rupiah(), 500_000);
    }

    #[test]
    fn test_next_pending_lowest_number_wins() {
        // Deliberately unsorted, as the backend may send them
        let details = vec![
            detail(3, InstallmentStatus::Pending),
            detail(1, InstallmentStatus::Success),
            detail(2, InstallmentStatus::Pending),
        ];

        let next = next_pending(&details).unwrap();
        assert_eq!(next.number, 2);
    }

    #[test]
    fn test_next_pending_skips_unpayable_statuses() {
        let details = vec![
            detail(1, InstallmentStatus::Success),
            detail(2, InstallmentStatus::Expired),
            detail(3, InstallmentStatus::Failed),
            detail(4, InstallmentStatus::Unknown),
            detail(5, InstallmentStatus::Pending),
        ];

        let next = next_pending(&details).unwrap();
        assert_eq!(next.number, 5);
    }

    #[test]
    fn test_next_pending_none_when_settled() {
        let details = vec![
            detail(1, InstallmentStatus::Success),
            detail(2, InstallmentStatus::Success),
        ];
        assert!(next_pending(&details).is_none());
        assert!(next_pending(&[]).is_none());
    }
}
