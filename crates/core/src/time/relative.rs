use chrono::{DateTime, Datelike, Utc};

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 60 * MINUTE_SECS;
const DAY_SECS: i64 = 24 * HOUR_SECS;
const WEEK_SECS: i64 = 7 * DAY_SECS;

/// Coarse "time ago" label for history listings. Older than a week falls back to
/// a short date, with the year only when it differs from `now`'s.
pub fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    // Clock skew can put `at` slightly in the future.
    let secs = (now - at).num_seconds().max(0);

    if secs < MINUTE_SECS {
        return "Just now".to_string();
    }
    if secs < HOUR_SECS {
        return format!("{} min ago", secs / MINUTE_SECS);
    }
    if secs < DAY_SECS {
        let hours = secs / HOUR_SECS;
        return format!("{hours} hour{} ago", plural(hours));
    }
    if secs < WEEK_SECS {
        let days = secs / DAY_SECS;
        return format!("{days} day{} ago", plural(days));
    }

    if at.year() == now.year() {
        at.format("%b %-d").to_string()
    } else {
        at.format("%b %-d, %Y").to_string()
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn recent_buckets() {
        let now = now();
        assert_eq!(relative_label(now - Duration::seconds(30), now), "Just now");
        assert_eq!(relative_label(now + Duration::seconds(5), now), "Just now");
        assert_eq!(relative_label(now - Duration::minutes(5), now), "5 min ago");
        assert_eq!(relative_label(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(relative_label(now - Duration::hours(23), now), "23 hours ago");
        assert_eq!(relative_label(now - Duration::days(1), now), "1 day ago");
        assert_eq!(relative_label(now - Duration::days(6), now), "6 days ago");
    }

    #[test]
    fn older_entries_show_date() {
        let now = now();
        let same_year = Utc.with_ymd_and_hms(2026, 1, 4, 9, 0, 0).unwrap();
        assert_eq!(relative_label(same_year, now), "Jan 4");
        let last_year = Utc.with_ymd_and_hms(2025, 12, 24, 9, 0, 0).unwrap();
        assert_eq!(relative_label(last_year, now), "Dec 24, 2025");
    }
}
