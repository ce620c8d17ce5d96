/// Display formatting shared by the transformers and the views.

/// Encoder prefixes the model pipeline puts in front of feature names.
const FEATURE_PREFIXES: [&str; 2] = ["cat__onehot__", "num__scaler__"];

/// Strip the pipeline's encoder prefix from a feature name.
///
/// Only the first occurrence of each prefix is removed. Underscores and
/// casing are left alone (correlation headers and distribution titles show
/// the raw column name).
pub fn strip_feature_prefix(name: &str) -> String {
    FEATURE_PREFIXES
        .iter()
        .fold(name.to_string(), |acc, prefix| acc.replacen(prefix, "", 1))
}

/// Human-readable feature name for chart axes.
///
/// Strips the encoder prefix, turns underscores into spaces and upper-cases
/// the first character:
/// `"cat__onehot__equipment_type"` → `"Equipment type"`.
pub fn format_feature_name(name: &str) -> String {
    let spaced = strip_feature_prefix(name).replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a `[0, 1]` ratio as a percentage with two decimals: `0.8234` → `"82.34%"`.
pub fn format_ratio_pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Group thousands with commas.
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numeric_feature() {
        assert_eq!(format_feature_name("num__scaler__temperature"), "Temperature");
    }

    #[test]
    fn formats_categorical_feature() {
        assert_eq!(
            format_feature_name("cat__onehot__equipment_type"),
            "Equipment type"
        );
    }

    #[test]
    fn formats_unprefixed_and_empty_names() {
        assert_eq!(format_feature_name("vibration_rms"), "Vibration rms");
        assert_eq!(format_feature_name(""), "");
        assert_eq!(format_feature_name("num__scaler__"), "");
    }

    #[test]
    fn strip_keeps_underscores_and_case() {
        assert_eq!(
            strip_feature_prefix("cat__onehot__location_New York"),
            "location_New York"
        );
        assert_eq!(strip_feature_prefix("humidity"), "humidity");
    }

    #[test]
    fn ratio_pct_has_two_decimals() {
        assert_eq!(format_ratio_pct(0.82), "82.00%");
        assert_eq!(format_ratio_pct(0.123456), "12.35%");
        assert_eq!(format_ratio_pct(1.0), "100.00%");
    }

    #[test]
    fn count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
