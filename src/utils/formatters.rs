// Formatting utilities for plain-text output

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format points with suffix (e.g., "1.2k", "3.5M")
pub fn format_points_short(points: u64) -> String {
    if points >= 1_000_000 {
        format!("{:.1}M", points as f64 / 1_000_000.0)
    } else if points >= 1_000 {
        format!("{:.1}k", points as f64 / 1_000.0)
    } else {
        points.to_string()
    }
}

/// Signed percent change, e.g. "+12.5%"
pub fn format_change(change: f64) -> String {
    format!("{:+.1}%", change)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Ordinal label for leaderboard positions
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1000000), "1,000,000");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(0), "0");
    }

    #[test]
    fn test_format_points_short() {
        assert_eq!(format_points_short(500), "500");
        assert_eq!(format_points_short(1500), "1.5k");
        assert_eq!(format_points_short(1500000), "1.5M");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(12.5), "+12.5%");
        assert_eq!(format_change(-3.0), "-3.0%");
        assert_eq!(format_change(0.0), "+0.0%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("日本語のテキスト", 6), "日本語...");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(113), "113th");
    }
}
