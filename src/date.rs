use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

fn date_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(\d{1,2})月(\d{1,2})日", // 3月30日
            r"(\d{1,2})/(\d{1,2})",    // 3/30
            r"(\d{1,2})／(\d{1,2})",   // 3／30
        ]
        .iter()
        .map(|p| Regex::new(p).expect("date pattern compiles"))
        .collect()
    })
}

/// Finds a month/day in a channel name and formats it as "MM/DD(曜)"
///
/// Months earlier than `today`'s month are taken to be next year's.
/// Returns `None` when nothing matches or the date does not exist.
pub fn extract_date_from_channel_name(channel_name: &str, today: NaiveDate) -> Option<String> {
    let caps = date_patterns().iter().find_map(|p| p.captures(channel_name))?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;

    let mut year = today.year();
    if month < today.month() {
        year += 1;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];

    Some(format!("{:02}/{:02}({})", month, day, weekday))
}
