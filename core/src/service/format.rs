use num_format::{Locale, ToFormattedString};

/// ja-JP の桁区切り、小数なし。
pub fn format_number(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::ja)
}

pub fn format_yen(value: f64) -> String {
    format!("¥{}", format_number(value))
}

/// Formats a value for display in the given unit (`¥`, `人`, `件`).
pub fn format_in_unit(value: f64, unit: &str) -> String {
    match unit {
        "¥" => format_yen(value),
        _ => format!("{}{}", format_number(value), unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(999.6), "1,000");
        assert_eq!(format_number(-1500.0), "-1,500");
    }

    #[test]
    fn test_format_in_unit() {
        assert_eq!(format_in_unit(120000.0, "¥"), "¥120,000");
        assert_eq!(format_in_unit(42.0, "人"), "42人");
        assert_eq!(format_in_unit(3.0, "件"), "3件");
    }
}
