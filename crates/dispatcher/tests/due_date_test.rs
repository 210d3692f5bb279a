#[cfg(test)]
mod due_date_tests {
    use hmms_dispatcher::due_date::{initial_due, next_due};

    use chrono::{TimeZone, Utc};
    use hmms_core::models::Frequency;

    #[test]
    fn test_next_due_strictly_advances_for_all_frequencies() {
        let samples = [
            Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap(),
        ];
        let frequencies = [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Yearly,
        ];

        for current in samples {
            for frequency in frequencies {
                let next = next_due(current, frequency);
                assert!(
                    next > current,
                    "next_due({current}, {frequency:?}) 没有严格前进"
                );
            }
        }
    }

    #[test]
    fn test_daily_advances_one_calendar_day() {
        let current = Utc.with_ymd_and_hms(2026, 2, 28, 9, 30, 0).unwrap();
        let next = next_due(current, Frequency::Daily);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_daily_crosses_year_boundary() {
        let current = Utc.with_ymd_and_hms(2026, 12, 31, 23, 0, 0).unwrap();
        let next = next_due(current, Frequency::Daily);
        assert_eq!(next, Utc.with_ymd_and_hms(2027, 1, 1, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_weekly_advances_seven_days() {
        // 2026-02-01 的周计划，下一次到期是 2026-02-08
        let current = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let next = next_due(current, Frequency::Weekly);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_monthly_preserves_day_of_month() {
        let current = Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap();
        let next = next_due(current, Frequency::Monthly);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 4, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_monthly_overflow_clamps_to_end_of_month() {
        // 月末溢出回归基准：1月31日 + 1个月 = 2月28日
        let current = Utc.with_ymd_and_hms(2026, 1, 31, 8, 0, 0).unwrap();
        let next = next_due(current, Frequency::Monthly);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 2, 28, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_monthly_overflow_in_leap_year() {
        let current = Utc.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap();
        let next = next_due(current, Frequency::Monthly);
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_yearly_advances_one_year() {
        let current = Utc.with_ymd_and_hms(2026, 6, 15, 0, 0, 0).unwrap();
        let next = next_due(current, Frequency::Yearly);
        assert_eq!(next, Utc.with_ymd_and_hms(2027, 6, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_yearly_from_leap_day_clamps() {
        let current = Utc.with_ymd_and_hms(2024, 2, 29, 6, 0, 0).unwrap();
        let next = next_due(current, Frequency::Yearly);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 2, 28, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_next_due_is_deterministic() {
        let current = Utc.with_ymd_and_hms(2026, 5, 20, 14, 0, 0).unwrap();
        let first = next_due(current, Frequency::Monthly);
        let second = next_due(current, Frequency::Monthly);
        assert_eq!(first, second);
    }

    #[test]
    fn test_initial_due_matches_one_period() {
        let now = Utc.with_ymd_and_hms(2026, 2, 3, 9, 0, 0).unwrap();
        assert_eq!(initial_due(now, Frequency::Daily), next_due(now, Frequency::Daily));
        assert_eq!(
            initial_due(now, Frequency::Weekly),
            Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_repeated_monthly_advance_does_not_drift_mid_month() {
        // 15号的月度计划连续推进12次仍然是15号
        let mut current = Utc.with_ymd_and_hms(2026, 1, 15, 7, 0, 0).unwrap();
        for _ in 0..12 {
            current = next_due(current, Frequency::Monthly);
        }
        assert_eq!(current, Utc.with_ymd_and_hms(2027, 1, 15, 7, 0, 0).unwrap());
    }
}
