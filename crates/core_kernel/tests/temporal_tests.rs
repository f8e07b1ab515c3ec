//! Tests for date ranges and clocks

use chrono::NaiveDate;
use core_kernel::{Clock, DateRange, FixedClock, SystemClock, TemporalError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod date_range {
    use super::*;

    #[test]
    fn test_single_day_range_is_valid() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 1)).unwrap();
        assert!(range.contains(date(2024, 3, 1)));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = DateRange::new(date(2024, 3, 2), date(2024, 3, 1));
        assert!(matches!(result, Err(TemporalError::InvalidRange { .. })));
    }

    #[test]
    fn test_overlaps() {
        let q1 = DateRange::new(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let q2 = DateRange::new(date(2024, 4, 1), date(2024, 6, 30)).unwrap();

        assert!(q1.overlaps(&march));
        assert!(!q1.overlaps(&q2));
    }
}

mod clocks {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let clock = FixedClock(date(2025, 12, 31));
        assert_eq!(clock.today(), clock.today());
        assert_eq!(clock.today(), date(2025, 12, 31));
    }

    #[test]
    fn test_system_clock_returns_a_plausible_date() {
        assert!(SystemClock.today() > date(2020, 1, 1));
    }
}
