//! Semiannual coupon schedules.

use termstruct_core::{CoreResult, Date};

/// Months between consecutive coupon dates.
pub const COUPON_PERIOD_MONTHS: i32 = 6;

/// Coupon payments per year.
pub const COUPONS_PER_YEAR: f64 = 2.0;

/// Generates the future coupon dates of a semiannual bond.
///
/// Dates are produced by stepping backward from `maturity` in 6-month
/// increments, keeping every date strictly after `reference_date`, and are
/// returned in ascending order. The last element is always `maturity` when
/// `maturity > reference_date`; otherwise the schedule is empty.
///
/// Each date is offset from maturity directly (not from the previous date),
/// so a month-end maturity keeps its day wherever the month allows it.
///
/// # Example
///
/// ```
/// use termstruct_bonds::schedule::semiannual_schedule;
/// use termstruct_core::Date;
///
/// let reference = Date::from_ymd(2024, 1, 1).unwrap();
/// let maturity = Date::from_ymd(2025, 3, 1).unwrap();
///
/// let schedule = semiannual_schedule(reference, maturity).unwrap();
/// assert_eq!(schedule.len(), 3);
/// assert_eq!(schedule[0], Date::from_ymd(2024, 3, 1).unwrap());
/// ```
pub fn semiannual_schedule(reference_date: Date, maturity: Date) -> CoreResult<Vec<Date>> {
    let mut dates = Vec::new();
    let mut step = 0;

    loop {
        let date = maturity.add_months(-COUPON_PERIOD_MONTHS * step)?;
        if date <= reference_date {
            break;
        }
        dates.push(date);
        step += 1;
    }

    dates.reverse();
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_schedule_two_years_out() {
        let schedule = semiannual_schedule(d(2024, 1, 1), d(2026, 3, 1)).unwrap();

        assert_eq!(
            schedule,
            vec![
                d(2024, 3, 1),
                d(2024, 9, 1),
                d(2025, 3, 1),
                d(2025, 9, 1),
                d(2026, 3, 1)
            ]
        );
    }

    #[test]
    fn test_coupon_on_reference_date_excluded() {
        let schedule = semiannual_schedule(d(2024, 3, 1), d(2025, 3, 1)).unwrap();

        assert_eq!(schedule, vec![d(2024, 9, 1), d(2025, 3, 1)]);
    }

    #[test]
    fn test_single_coupon() {
        let schedule = semiannual_schedule(d(2024, 1, 15), d(2024, 3, 1)).unwrap();

        assert_eq!(schedule, vec![d(2024, 3, 1)]);
    }

    #[test]
    fn test_matured_is_empty() {
        assert!(semiannual_schedule(d(2024, 3, 1), d(2024, 3, 1))
            .unwrap()
            .is_empty());
        assert!(semiannual_schedule(d(2024, 6, 1), d(2024, 3, 1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_month_end_maturity() {
        let schedule = semiannual_schedule(d(2024, 1, 1), d(2025, 8, 31)).unwrap();

        assert_eq!(
            schedule,
            vec![d(2024, 2, 29), d(2024, 8, 31), d(2025, 2, 28), d(2025, 8, 31)]
        );
    }

    proptest! {
        #[test]
        fn prop_schedule_invariants(ref_offset in 0i64..3650, months_out in 1i32..240) {
            let reference = d(2020, 1, 1).add_days(ref_offset);
            let maturity = d(2020, 1, 1).add_months(months_out).unwrap().add_days(ref_offset);
            prop_assume!(maturity > reference);

            let schedule = semiannual_schedule(reference, maturity).unwrap();

            prop_assert!(!schedule.is_empty());
            prop_assert_eq!(*schedule.last().unwrap(), maturity);
            prop_assert!(schedule[0] > reference);
            prop_assert!(schedule.windows(2).all(|w| w[0] < w[1]));
            // Stepping one more period back would land on or before the reference
            prop_assert!(schedule[0].add_months(-6).unwrap() <= reference);
        }
    }
}
