use crate::domain::model::{CanonicalInstant, ParsedLocalMoment, UtcOffsetValue};

/// 當地時間減去時差即為 UTC
///
/// 不查時區資料庫也不處理夏令時間，時差就是唯一依據。
/// 年份限制在 1-9999 且時差小於一天，相減不會溢位。
pub fn to_utc(moment: &ParsedLocalMoment, offset: &UtcOffsetValue) -> CanonicalInstant {
    let utc = moment.naive() - offset.duration();
    CanonicalInstant::new(utc.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validator::{parse_local_moment, parse_offset};
    use chrono::{Datelike, NaiveDate, TimeDelta};
    use proptest::prelude::*;

    fn instant(date: &str, time: &str, offset: &str) -> String {
        let moment = parse_local_moment(date, time).unwrap();
        let offset = parse_offset(offset).unwrap();
        to_utc(&moment, &offset).to_string()
    }

    #[test]
    fn test_positive_offset_moves_back_across_year() {
        assert_eq!(instant("2024-01-01", "00:30", "+01:00"), "2023-12-31T23:30:00Z");
    }

    #[test]
    fn test_negative_offset_moves_forward() {
        assert_eq!(instant("2024-01-01", "00:30", "-05:00"), "2024-01-01T05:30:00Z");
    }

    #[test]
    fn test_zero_offset_is_identity() {
        assert_eq!(instant("1990-06-15", "08:00", "+00:00"), "1990-06-15T08:00:00Z");
    }

    #[test]
    fn test_half_hour_offsets_and_leap_day() {
        assert_eq!(instant("2024-03-01", "02:00", "+05:30"), "2024-02-29T20:30:00Z");
        assert_eq!(instant("1999-12-31", "22:15", "-03:45"), "2000-01-01T02:00:00Z");
    }

    #[test]
    fn test_range_edges_do_not_overflow() {
        assert_eq!(instant("0001-01-01", "00:00", "+23:59"), "0000-12-31T00:01:00Z");
        let moment = parse_local_moment("9999-12-31", "23:59").unwrap();
        let offset = parse_offset("-23:59").unwrap();
        let utc = to_utc(&moment, &offset).as_datetime();
        assert_eq!((utc.year(), utc.month(), utc.day()), (10000, 1, 1));
    }

    proptest! {
        #[test]
        fn prop_to_utc_is_deterministic_and_exact(
            days in 0i64..3_000_000,
            minute_of_day in 0i64..1440,
            offset_minutes in -(23 * 60 + 59)..=(23 * 60 + 59i64),
        ) {
            let base = NaiveDate::from_ymd_opt(1, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
            let local = base + TimeDelta::days(days) + TimeDelta::minutes(minute_of_day);
            let moment = ParsedLocalMoment::new(local);
            let offset = UtcOffsetValue::new(TimeDelta::minutes(offset_minutes));

            let first = to_utc(&moment, &offset);
            let second = to_utc(&moment, &offset);
            prop_assert_eq!(first, second);

            let back = first.as_datetime().naive_utc() + offset.duration();
            prop_assert_eq!(back, local);
        }
    }
}
