use chrono::{DateTime, Months, Utc};

/// Add whole months with day-of-month clamping: Jan 31 + 1 month lands on the
/// last day of February. chrono's checked month arithmetic implements exactly
/// this rule; the wrappers pin it down and keep call sites infallible.
pub fn add_months_clamped(dt: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    dt.checked_add_months(Months::new(months)).unwrap_or(dt)
}

pub fn sub_months_clamped(dt: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    dt.checked_sub_months(Months::new(months)).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_jan_31_clamps_to_end_of_february() {
        assert_eq!(add_months_clamped(utc(2023, 1, 31), 1), utc(2023, 2, 28));
        // leap year
        assert_eq!(add_months_clamped(utc(2024, 1, 31), 1), utc(2024, 2, 29));
    }

    #[test]
    fn test_mid_month_keeps_day() {
        assert_eq!(add_months_clamped(utc(2024, 3, 15), 1), utc(2024, 4, 15));
        assert_eq!(add_months_clamped(utc(2024, 3, 15), 13), utc(2025, 4, 15));
    }

    #[test]
    fn test_clamps_to_shorter_target_month() {
        // 31st into a 30-day month
        assert_eq!(add_months_clamped(utc(2024, 1, 31), 3), utc(2024, 4, 30));
        assert_eq!(add_months_clamped(utc(2024, 5, 31), 1), utc(2024, 6, 30));
    }

    #[test]
    fn test_zero_months_is_identity() {
        let dt = utc(2024, 7, 9);
        assert_eq!(add_months_clamped(dt, 0), dt);
    }

    #[test]
    fn test_sub_months_clamped() {
        assert_eq!(sub_months_clamped(utc(2024, 3, 31), 1), utc(2024, 2, 29));
        assert_eq!(sub_months_clamped(utc(2024, 4, 30), 1), utc(2024, 3, 30));
    }
}
