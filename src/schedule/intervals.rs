use std::sync::OnceLock;

use regex::Regex;

/// Half-open hour interval `[start, end)`
pub type Interval = (u32, u32);

const DASH_LIKE: &[char] = &['~', '〜', '～', '─', '－', '–', '—', '―', '‾', '➙'];
const COMMA_LIKE: &[char] = &['，', '、'];

/// Converts full-width ASCII to half-width and unifies range/list separators
pub fn normalize_time_string(s: &str) -> String {
    s.chars()
        .map(|ch| match ch {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch),
            _ => ch,
        })
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| {
            if DASH_LIKE.contains(&ch) {
                '-'
            } else if COMMA_LIKE.contains(&ch) {
                ','
            } else {
                ch
            }
        })
        .collect()
}

/// Reads the leading decimal digits of a chunk ("14時" -> 14, "+10" -> 10)
fn leading_number(s: &str) -> Option<u32> {
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Parses availability text such as "10-12,15-18" into sorted intervals
///
/// Chunks that do not describe a valid range inside 0-24 are dropped.
pub fn parse_intervals(text: &str) -> Vec<Interval> {
    let normalized = normalize_time_string(text);
    let mut intervals = Vec::new();

    for chunk in normalized.split(',') {
        if chunk.is_empty() {
            continue;
        }
        let parts: Vec<&str> = chunk.split('-').collect();
        if parts.len() != 2 {
            continue;
        }
        let (Some(start), Some(end)) = (leading_number(parts[0]), leading_number(parts[1])) else {
            continue;
        };
        if start < end && end <= 24 {
            intervals.push((start, end));
        }
    }

    intervals.sort_by_key(|&(start, _)| start);
    intervals
}

/// True when the sorted intervals leave a hole ("10-12,13-15"); touching ranges do not
pub fn has_gap_shift(intervals: &[Interval]) -> bool {
    intervals.windows(2).any(|pair| pair[0].1 < pair[1].0)
}

fn time_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})-(\d{1,2})$").expect("time range pattern compiles"))
}

/// Parses a slot label of the exact form "H-H"
pub fn parse_time_range(label: &str) -> Option<Interval> {
    let caps = time_range_pattern().captures(label.trim())?;
    let start: u32 = caps[1].parse().ok()?;
    let end: u32 = caps[2].parse().ok()?;

    if start > 23 || end > 24 || start >= end {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_full_width_and_separators() {
        assert_eq!(normalize_time_string("１０〜１４、１８ー２２"), "10-14,18ー22");
        assert_eq!(normalize_time_string(" 10 ～ 12 ，13—15 "), "10-12,13-15");
    }

    #[test]
    fn parses_and_sorts_intervals() {
        assert_eq!(parse_intervals("18-22,10-14"), vec![(10, 14), (18, 22)]);
        assert_eq!(parse_intervals("１０～１２"), vec![(10, 12)]);
        assert_eq!(parse_intervals("10時-14時"), vec![(10, 14)]);
    }

    #[test]
    fn accepts_explicit_plus_sign() {
        assert_eq!(parse_intervals("+10-12"), vec![(10, 12)]);
        assert_eq!(parse_intervals("10-+12,＋15-18"), vec![(10, 12), (15, 18)]);
        assert!(parse_intervals("+-12").is_empty());
    }

    #[test]
    fn drops_invalid_chunks() {
        assert_eq!(parse_intervals("14-10,9-25,abc,1-2-3,,20-21"), vec![(20, 21)]);
        assert!(parse_intervals("").is_empty());
        assert!(parse_intervals("free all day").is_empty());
    }

    #[test]
    fn every_interval_is_within_the_day() {
        for text in ["0-24", "23-24,0-1", "5-5,3-4", "12-30,-3-4"] {
            let intervals = parse_intervals(text);
            assert!(intervals.iter().all(|&(s, e)| s < e && e <= 24));
            assert!(intervals.windows(2).all(|w| w[0].0 <= w[1].0));
        }
    }

    #[test]
    fn detects_gaps_between_intervals() {
        assert!(!has_gap_shift(&parse_intervals("10-12,12-14")));
        assert!(has_gap_shift(&parse_intervals("10-12,13-15")));
        assert!(!has_gap_shift(&parse_intervals("10-12")));
        assert!(!has_gap_shift(&[]));
    }

    #[test]
    fn parses_strict_slot_labels() {
        assert_eq!(parse_time_range("10-11"), Some((10, 11)));
        assert_eq!(parse_time_range("23-24"), Some((23, 24)));
        assert_eq!(parse_time_range("24-25"), None);
        assert_eq!(parse_time_range("12-10"), None);
        assert_eq!(parse_time_range("10-11 please"), None);
    }
}
