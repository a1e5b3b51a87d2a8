//! Calendar-day windows in a fixed UTC offset.
//!
//! "Today" for the processed-files view is the partner's civil day, not the
//! host's. `DayWindow::containing` turns an instant into the inclusive
//! `[00:00:00.000, 23:59:59.999]` range of its date in the given offset,
//! expressed as UTC instants so comparisons never depend on the local zone.

use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Utc};

use crate::models::FileEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn containing(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local_midnight = now
            .with_timezone(&offset)
            .date_naive()
            .and_time(NaiveTime::MIN);

        // Local wall clock minus the offset gives the UTC instant
        let start = (local_midnight - TimeDelta::seconds(i64::from(offset.local_minus_utc()))).and_utc();
        let end = start + TimeDelta::days(1) - TimeDelta::milliseconds(1);

        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Keep entries modified inside `window`. Entries without a date are dropped.
pub fn modified_within(entries: Vec<FileEntry>, window: &DayWindow) -> Vec<FileEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.date_modified.is_some_and(|d| window.contains(d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn entry(name: &str, date: Option<&str>) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            size: 10,
            is_directory: false,
            date_modified: date.map(utc),
        }
    }

    #[test]
    fn window_follows_offset_date_not_utc_date() {
        // 01:00Z on the 14th is still 22:00 on the 13th at UTC-3
        let window = DayWindow::containing(utc("2024-06-14T01:00:00Z"), brt());
        assert_eq!(window.start, utc("2024-06-13T03:00:00Z"));
        assert_eq!(window.end, utc("2024-06-14T02:59:59.999Z"));

        assert!(window.contains(utc("2024-06-14T02:59:59.999Z")));
        assert!(!window.contains(utc("2024-06-14T03:00:00.000Z")));

        let next = DayWindow::containing(utc("2024-06-14T03:00:00Z"), brt());
        assert!(next.contains(utc("2024-06-14T03:00:00.000Z")));
    }

    #[test]
    fn boundaries_are_inclusive() {
        let window = DayWindow::containing(utc("2024-06-13T15:00:00Z"), brt());
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - TimeDelta::milliseconds(1)));
        assert!(!window.contains(window.end + TimeDelta::milliseconds(1)));
    }

    #[test]
    fn year_rollover_does_not_drift() {
        let window = DayWindow::containing(utc("2025-01-01T00:30:00Z"), brt());
        assert_eq!(window.start, utc("2024-12-31T03:00:00Z"));
        assert_eq!(window.end, utc("2025-01-01T02:59:59.999Z"));
        assert!(window.contains(utc("2025-01-01T02:59:59Z")));

        let window = DayWindow::containing(utc("2025-01-01T03:00:00Z"), brt());
        assert_eq!(window.start, utc("2025-01-01T03:00:00Z"));
    }

    #[test]
    fn month_rollover_on_leap_day() {
        let window = DayWindow::containing(utc("2024-03-01T02:00:00Z"), brt());
        assert_eq!(window.start, utc("2024-02-29T03:00:00Z"));
        assert_eq!(window.end, utc("2024-03-01T02:59:59.999Z"));
    }

    #[test]
    fn positive_offsets_work_too() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let window = DayWindow::containing(utc("2024-06-13T20:00:00Z"), tokyo);
        assert_eq!(window.start, utc("2024-06-13T15:00:00Z"));
    }

    #[test]
    fn filter_keeps_only_entries_from_today() {
        let window = DayWindow::containing(utc("2024-06-14T01:00:00Z"), brt());
        let entries = vec![
            entry("yesterday.csv", Some("2024-06-13T02:59:59.999Z")),
            entry("start.csv", Some("2024-06-13T03:00:00.000Z")),
            entry("midday.csv", Some("2024-06-13T15:30:00Z")),
            entry("end.csv", Some("2024-06-14T02:59:59.999Z")),
            entry("tomorrow.csv", Some("2024-06-14T03:00:00.000Z")),
            entry("undated.csv", None),
        ];

        let names: Vec<String> = modified_within(entries, &window)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["start.csv", "midday.csv", "end.csv"]);
    }
}
