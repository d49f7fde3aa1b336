//! Utility functions and helpers

use rust_decimal::Decimal;

/// Format an integer amount in minor currency units with two decimals
pub fn round_off(minor_units: i64) -> String {
    Decimal::new(minor_units, 2).to_string()
}

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_off() {
        assert_eq!(round_off(12345), "123.45");
        assert_eq!(round_off(0), "0.00");
        assert_eq!(round_off(900), "9.00");
        assert_eq!(round_off(5), "0.05");
        assert_eq!(round_off(-250), "-2.50");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>alert('x')</script>"), "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;");
        assert_eq!(escape_html("A & B \"C\""), "A &amp; B &quot;C&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
