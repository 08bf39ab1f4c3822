// Display formatting for numeric values.

/// Format a value for display with a K/M/B magnitude suffix.
/// Values under 1,000 render with two fixed decimals and no suffix.
pub fn format_value(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{value:.2}")
    }
}

/// Format a percentage with an explicit sign. Zero and positive values get
/// a leading `+`; negatives keep the `-` from the number itself.
pub fn format_percentage(percent: f64) -> String {
    let percent = percent + 0.0; // -0.0 would pass the sign check yet print "-0.00"
    let sign = if percent >= 0.0 { "+" } else { "" };
    format!("{sign}{percent:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_magnitudes() {
        assert_eq!(format_value(999.0), "999.00");
        assert_eq!(format_value(1_500.0), "1.50K");
        assert_eq!(format_value(2_500_000.0), "2.50M");
        assert_eq!(format_value(3_000_000_000.0), "3.00B");
    }

    #[test]
    fn test_format_value_boundaries() {
        assert_eq!(format_value(0.0), "0.00");
        assert_eq!(format_value(1_000.0), "1.00K");
        assert_eq!(format_value(999_999.0), "1000.00K");
        assert_eq!(format_value(1_000_000.0), "1.00M");
    }

    #[test]
    fn test_format_percentage_signs() {
        assert_eq!(format_percentage(5.2), "+5.20%");
        assert_eq!(format_percentage(-3.1), "-3.10%");
        assert_eq!(format_percentage(0.0), "+0.00%");
    }

    #[test]
    fn test_format_percentage_negative_zero() {
        assert_eq!(format_percentage(-0.0), "+0.00%");
    }
}
