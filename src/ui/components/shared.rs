//! Shared component helpers.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Truncates text to `max_chars`, ending with "..." when cut.
pub fn short_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }

    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

/// Current wall-clock time in unix milliseconds.
pub fn now_unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or_default()
}

/// Formats a unix timestamp (ms) relative to `now_ms`, like "3s ago" or "2m ago".
pub fn short_age(unix_ms: i64, now_ms: i64) -> String {
    let age_ms = (now_ms - unix_ms).max(0) as u64;
    if age_ms < 1_000 {
        return "now".to_owned();
    }

    // Whole seconds keep humantime from printing sub-second units.
    let duration = Duration::from_secs(age_ms / 1_000);
    let formatted = humantime::format_duration(duration).to_string();

    let unit = formatted.split_whitespace().next().unwrap_or("?");
    format!("{unit} ago")
}

#[cfg(test)]
mod tests {
    use super::{short_age, short_preview};

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(short_preview("Thiruvananthapuram", 8), "Thiru...");
        assert_eq!(short_preview("Kochi", 8), "Kochi");
        assert_eq!(short_preview("Kochi", 2), "Ko");
    }

    #[test]
    fn age_uses_most_significant_unit() {
        assert_eq!(short_age(0, 500), "now");
        assert_eq!(short_age(0, 42_000), "42s ago");
        assert_eq!(short_age(0, 125_000), "2m ago");
    }
}
