use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Converts a UTC instant to the calendar date in the market's time zone.
///
/// This is the single source of truth for deriving a market date from a
/// timestamp; calendar-relative lookbacks are anchored on it.
pub fn market_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// First instant of `date` in the market's time zone, as UTC.
pub fn local_midnight_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// Same day-of-month one calendar month earlier, clamped to the last day of
/// the shorter month (Mar 31 -> Feb 28/29, May 31 -> Apr 30).
pub fn one_month_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Local midnight one calendar month before `now`'s market date.
pub fn one_month_threshold(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let today = market_date_from_utc(now, tz);
    local_midnight_utc(one_month_before(today), tz)
}

/// First instant of the current calendar year in the market's time zone.
pub fn start_of_year(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let year = market_date_from_utc(now, tz).year();
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    local_midnight_utc(jan_first, tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_month_before_same_day() {
        assert_eq!(one_month_before(date(2026, 6, 15)), date(2026, 5, 15));
    }

    #[test]
    fn test_one_month_before_crosses_year() {
        assert_eq!(one_month_before(date(2026, 1, 15)), date(2025, 12, 15));
        assert_eq!(one_month_before(date(2026, 1, 31)), date(2025, 12, 31));
    }

    #[test]
    fn test_one_month_before_clamps_month_end() {
        assert_eq!(one_month_before(date(2026, 3, 31)), date(2026, 2, 28));
        assert_eq!(one_month_before(date(2028, 3, 31)), date(2028, 2, 29));
        assert_eq!(one_month_before(date(2026, 5, 31)), date(2026, 4, 30));
        assert_eq!(one_month_before(date(2026, 3, 30)), date(2026, 2, 28));
    }

    #[test]
    fn test_market_date_uses_market_zone() {
        // 02:00 UTC on Jan 1 is still Dec 31 in New York.
        let instant = Utc.with_ymd_and_hms(2026, 1, 1, 2, 0, 0).unwrap();
        assert_eq!(market_date_from_utc(instant, New_York), date(2025, 12, 31));
    }

    #[test]
    fn test_start_of_year_is_local_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 6, 10, 16, 0, 0).unwrap();
        assert_eq!(
            start_of_year(now, New_York),
            Utc.with_ymd_and_hms(2026, 1, 1, 5, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_one_month_threshold_in_summer_time() {
        let now = Utc.with_ymd_and_hms(2026, 7, 31, 18, 0, 0).unwrap();
        assert_eq!(
            one_month_threshold(now, New_York),
            Utc.with_ymd_and_hms(2026, 6, 30, 4, 0, 0).unwrap()
        );
    }
}
