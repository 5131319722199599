// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar math and date formatting.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use std::fmt::Display;

/// Midnight on January 1st of `now`'s year, in `now`'s time zone.
pub fn start_of_year<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let year = now.year();
    now.timezone()
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| {
            // Midnight does not exist in `tz` on that day; fall back to UTC.
            NaiveDate::from_ymd_opt(year, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        })
}

/// Format a timestamp as "MM/DD" in the given time zone.
pub fn format_chart_date<Tz>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz).format("%m/%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_start_of_year_utc() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 8, 30, 0).unwrap();
        assert_eq!(
            start_of_year(&now),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_start_of_year_uses_local_midnight() {
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = jst.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();

        // 2025-01-01T00:00+09:00 is 2024-12-31T15:00Z
        assert_eq!(
            start_of_year(&now),
            Utc.with_ymd_and_hms(2024, 12, 31, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_format_chart_date_shifts_zone() {
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        let late_utc = Utc.with_ymd_and_hms(2025, 1, 31, 20, 0, 0).unwrap();

        assert_eq!(format_chart_date(late_utc, &Utc), "01/31");
        assert_eq!(format_chart_date(late_utc, &jst), "02/01");
    }
}
