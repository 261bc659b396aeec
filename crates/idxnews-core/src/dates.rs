//! Publication-date normalization for Indonesian news sites.
//!
//! Tag pages mix relative stamps ("5 menit yang lalu"), immediate stamps
//! ("Baru saja") and absolute dates ("Senin, 10 Februari 2026 14:30 WIB").
//! [`parse_published_at`] is total: whatever the input, it returns a
//! concrete timestamp, falling back to the supplied reference instant.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Normalize a raw date string into an absolute timestamp.
///
/// Tries relative parsing first, then absolute parsing. Empty input and
/// every internal failure yield `now`; this function never fails.
#[must_use]
pub fn parse_published_at(text: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    if text.trim().is_empty() {
        return now;
    }

    // Strip timezone suffixes and pipe separators up front; both parsing
    // strategies work on the cleaned lowercase text.
    let cleaned = text
        .to_lowercase()
        .replace('|', "")
        .replace("wib", "")
        .replace("wita", "")
        .replace("wit", "")
        .trim()
        .to_string();

    if let Some(ts) = parse_relative(&cleaned, now) {
        return ts;
    }

    parse_absolute(&cleaned).unwrap_or(now)
}

/// Parse relative stamps such as "5 menit yang lalu" or "2 hours ago".
///
/// Returns `None` when no relative marker is present, or when the marker is
/// there but no magnitude/unit can be extracted; the caller then falls
/// through to absolute parsing.
fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if text.contains("yang lalu") || text.contains("ago") {
        let value = leading_integer(text)?;

        if text.contains("menit") || text.contains("minute") {
            return Some(now - Duration::minutes(value));
        } else if text.contains("jam") || text.contains("hour") {
            return Some(now - Duration::hours(value));
        } else if text.contains("hari") || text.contains("day") {
            return Some(now - Duration::days(value));
        } else if text.contains("detik") || text.contains("second") {
            return Some(now - Duration::seconds(value));
        }
    }

    if text.contains("baru saja") || text.contains("just now") {
        return Some(now);
    }

    None
}

/// Parse absolute dates of the shape "[weekday,] 10 februari 2026 [14:30]".
fn parse_absolute(text: &str) -> Option<DateTime<Utc>> {
    let mut text = text.to_string();
    for day in [
        "senin", "selasa", "rabu", "kamis", "jumat", "sabtu", "minggu",
    ] {
        text = text
            .replace(&format!("{day},"), "")
            .replace(day, "")
            .trim()
            .to_string();
    }

    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month = month_number(parts[1]);
    let year: i32 = parts[2].parse().ok()?;

    let time = match parts.get(3) {
        Some(t) if t.contains(':') => t,
        _ => "00:00",
    };
    let (hour, minute) = time.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let naive: NaiveDateTime = date.and_hms_opt(hour, minute, 0)?;
    Some(naive.and_utc())
}

/// First run of ASCII digits in the text, as a number.
fn leading_integer(text: &str) -> Option<i64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Combined full + abbreviated month table, Indonesian and English.
///
/// Unrecognized names default to January, matching the lenient behavior
/// the rest of the pipeline expects.
fn month_number(name: &str) -> u32 {
    match name {
        "januari" | "jan" => 1,
        "februari" | "feb" => 2,
        "maret" | "mar" => 3,
        "april" | "apr" => 4,
        "mei" | "may" => 5,
        "juni" | "jun" => 6,
        "juli" | "jul" => 7,
        "agustus" | "aug" | "agu" => 8,
        "september" | "sep" => 9,
        "oktober" | "oct" | "okt" => 10,
        "november" | "nov" | "nop" => 11,
        "desember" | "dec" | "des" => 12,
        _ => 1,
    }
}

#[cfg(test)]
#[path = "dates_test.rs"]
mod tests;
