//! Flag-value validators shared by clap parsing and console form handling.

/// Parses a strictly positive integer flag value.
pub fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

/// Validates a `#rrggbb` color value and normalizes it to lowercase.
pub fn parse_hex_color(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('#')
        .ok_or_else(|| "color must start with '#'".to_string())?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("color must be in #rrggbb format".to_string());
    }
    Ok(trimmed.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{parse_hex_color, parse_positive_u64};

    #[test]
    fn unit_positive_u64_rejects_zero_and_garbage() {
        assert_eq!(parse_positive_u64("30000"), Ok(30_000));
        assert!(parse_positive_u64("0").is_err());
        assert!(parse_positive_u64("ten").is_err());
    }

    #[test]
    fn unit_hex_color_accepts_rrggbb_only() {
        assert_eq!(parse_hex_color("#2563EB"), Ok("#2563eb".to_string()));
        assert_eq!(parse_hex_color(" #ff7700 "), Ok("#ff7700".to_string()));
        assert!(parse_hex_color("2563eb").is_err());
        assert!(parse_hex_color("#25e").is_err());
        assert!(parse_hex_color("#25g3eb").is_err());
        assert!(parse_hex_color("#2563eb00").is_err());
    }
}
