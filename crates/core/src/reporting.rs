//! Computations backing project reports.

use chrono::NaiveDate;

/// Whole elapsed hours between a project's start and end dates.
///
/// Truncates toward zero and never goes negative: an end date before the
/// start date yields 0 rather than a nonsensical negative duration.
pub fn elapsed_hours(starts_on: NaiveDate, ends_on: NaiveDate) -> i32 {
    let days = (ends_on - starts_on).num_days();
    if days <= 0 {
        return 0;
    }
    // Dates carry no time of day; a whole day is 24 hours.
    (days * 24) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_week_project_is_168_hours() {
        assert_eq!(elapsed_hours(date(2026, 3, 1), date(2026, 3, 8)), 168);
    }

    #[test]
    fn same_day_project_is_zero_hours() {
        assert_eq!(elapsed_hours(date(2026, 3, 1), date(2026, 3, 1)), 0);
    }

    #[test]
    fn inverted_dates_clamp_to_zero() {
        assert_eq!(elapsed_hours(date(2026, 3, 8), date(2026, 3, 1)), 0);
    }
}
