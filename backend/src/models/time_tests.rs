#[cfg(test)]
mod tests {
    use crate::error::ScheduleError;
    use crate::models::{TimeOfDay, TimeRole, MINUTES_PER_DAY};

    #[test]
    fn test_parse_basic() {
        let t = TimeOfDay::parse_start("07:30").unwrap();
        assert_eq!(t.minutes(), 450);
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn test_parse_single_digit_hour() {
        assert_eq!(TimeOfDay::parse_start("7:05").unwrap().minutes(), 425);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(TimeOfDay::parse_end(" 16:30 ").unwrap().minutes(), 990);
    }

    #[test]
    fn test_parse_24_00_depends_on_role() {
        assert_eq!(
            TimeOfDay::parse("24:00", TimeRole::End).unwrap(),
            TimeOfDay::END_OF_DAY
        );
        assert_eq!(
            TimeOfDay::parse("24:00", TimeRole::Start).unwrap(),
            TimeOfDay::MIDNIGHT
        );
    }

    #[test]
    fn test_parse_midnight_is_zero_for_both_roles() {
        assert_eq!(TimeOfDay::parse_start("00:00").unwrap().minutes(), 0);
        assert_eq!(TimeOfDay::parse_end("00:00").unwrap().minutes(), 0);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "7", "07-30", "07:3", "07:300", "ab:cd", "123:00", "-1:00", "07:+5"] {
            let result = TimeOfDay::parse_start(input);
            assert!(
                matches!(result, Err(ScheduleError::InvalidTimeFormat { .. })),
                "expected InvalidTimeFormat for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(TimeOfDay::parse_start("25:00").is_err());
        assert!(TimeOfDay::parse_start("12:60").is_err());
        assert!(TimeOfDay::parse_end("24:15").is_err());
    }

    #[test]
    fn test_new_range() {
        assert!(TimeOfDay::new(0).is_ok());
        assert!(TimeOfDay::new(MINUTES_PER_DAY).is_ok());
        assert!(TimeOfDay::new(MINUTES_PER_DAY + 1).is_err());
    }

    #[test]
    fn test_from_hm() {
        assert_eq!(TimeOfDay::from_hm(23, 30).unwrap().minutes(), 1410);
        assert!(TimeOfDay::from_hm(10, 75).is_err());
        assert!(TimeOfDay::from_hm(2000, 0).is_err());
    }

    #[test]
    fn test_normalize_end() {
        assert_eq!(TimeOfDay::MIDNIGHT.normalize_end(), TimeOfDay::END_OF_DAY);
        assert_eq!(TimeOfDay::END_OF_DAY.normalize_end(), TimeOfDay::END_OF_DAY);
        let t = TimeOfDay::new(450).unwrap();
        assert_eq!(t.normalize_end(), t);
    }

    #[test]
    fn test_plus_minutes_wraps_at_midnight() {
        let t = TimeOfDay::from_hm(23, 30).unwrap();
        assert_eq!(t.plus_minutes(60).minutes(), 30);
        assert_eq!(t.plus_minutes(30), TimeOfDay::MIDNIGHT);
        assert_eq!(t.plus_minutes(30).normalize_end(), TimeOfDay::END_OF_DAY);
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeOfDay::new(450).unwrap().to_string(), "07:30");
        assert_eq!(TimeOfDay::END_OF_DAY.to_string(), "24:00");
        assert_eq!(TimeOfDay::MIDNIGHT.to_string(), "00:00");
    }

    #[test]
    fn test_slots_quarter_hour() {
        let slots: Vec<TimeOfDay> = TimeOfDay::slots(15).collect();
        assert_eq!(slots.len(), 97);
        assert_eq!(slots.first(), Some(&TimeOfDay::MIDNIGHT));
        assert_eq!(slots.last(), Some(&TimeOfDay::END_OF_DAY));
        assert!(slots.iter().all(|s| s.is_aligned(15)));
    }

    #[test]
    fn test_is_aligned() {
        assert!(TimeOfDay::new(450).unwrap().is_aligned(15));
        assert!(!TimeOfDay::new(451).unwrap().is_aligned(15));
        assert!(!TimeOfDay::new(450).unwrap().is_aligned(0));
    }

    #[test]
    fn test_from_naive_time_truncates_seconds() {
        let nt = chrono::NaiveTime::from_hms_opt(6, 29, 59).unwrap();
        assert_eq!(TimeOfDay::from_naive_time(nt).minutes(), 389);
    }

    #[test]
    fn test_serde_minutes() {
        let t: TimeOfDay = serde_json::from_str("990").unwrap();
        assert_eq!(t.minutes(), 990);
        assert_eq!(serde_json::to_string(&t).unwrap(), "990");
        assert!(serde_json::from_str::<TimeOfDay>("1441").is_err());
    }
}
