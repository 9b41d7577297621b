use serde_json::{Number, Value};

/// An inbound config value, as decoded from an update request body.
///
/// Everything that lands in the env file is a string, so each variant has
/// exactly one canonical string form (see [`ConfigValue::coerce`]).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Text(String),
    Flag(bool),
    Number(Number),
    /// Objects, arrays and `null`.
    Other(Value),
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => ConfigValue::Text(s),
            Value::Bool(b) => ConfigValue::Flag(b),
            Value::Number(n) => ConfigValue::Number(n),
            other => ConfigValue::Other(other),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Flag(value)
    }
}

impl ConfigValue {
    /// Canonical string stored for this value.
    ///
    /// - text passes through unchanged
    /// - booleans become `"true"` / `"false"`
    /// - numbers are stored as whole numbers: integers verbatim, anything
    ///   fractional rounded to nearest with ties to even (`45.6` -> `"46"`,
    ///   `2.5` -> `"2"`)
    /// - objects, arrays and `null` are stored as compact JSON
    pub fn coerce(&self) -> String {
        match self {
            ConfigValue::Text(s) => s.clone(),
            ConfigValue::Flag(true) => "true".to_string(),
            ConfigValue::Flag(false) => "false".to_string(),
            ConfigValue::Number(n) => format_number(n),
            ConfigValue::Other(v) => v.to_string(),
        }
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }

    let rounded = n.as_f64().unwrap_or_default().round_ties_even();
    // -0.4 rounds to -0.0
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(v: Value) -> String {
        ConfigValue::from(v).coerce()
    }

    #[test]
    fn strings_pass_through_unchanged() {
        assert_eq!(coerce(json!("x")), "x");
        assert_eq!(coerce(json!("")), "");
        assert_eq!(coerce(json!("3.7")), "3.7");
    }

    #[test]
    fn booleans_become_literals() {
        assert_eq!(coerce(json!(true)), "true");
        assert_eq!(coerce(json!(false)), "false");
    }

    #[test]
    fn integers_are_printed_exactly() {
        assert_eq!(coerce(json!(45)), "45");
        assert_eq!(coerce(json!(-7)), "-7");
        assert_eq!(coerce(json!(u64::MAX)), "18446744073709551615");
    }

    #[test]
    fn fractional_numbers_round_half_to_even() {
        assert_eq!(coerce(json!(45.6)), "46");
        assert_eq!(coerce(json!(3.7)), "4");
        assert_eq!(coerce(json!(3.2)), "3");
        assert_eq!(coerce(json!(2.5)), "2");
        assert_eq!(coerce(json!(3.5)), "4");
        assert_eq!(coerce(json!(-1.5)), "-2");
        assert_eq!(coerce(json!(45.0)), "45");
    }

    #[test]
    fn negative_zero_is_printed_as_zero() {
        assert_eq!(coerce(json!(-0.4)), "0");
        assert_eq!(coerce(json!(0.5)), "0");
    }

    #[test]
    fn other_values_become_compact_json() {
        assert_eq!(coerce(json!(null)), "null");
        assert_eq!(coerce(json!([1, "a"])), r#"[1,"a"]"#);
        assert_eq!(coerce(json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn from_value_picks_the_matching_variant() {
        assert_eq!(ConfigValue::from(json!("s")), ConfigValue::Text("s".into()));
        assert_eq!(ConfigValue::from(json!(true)), ConfigValue::Flag(true));
        assert!(matches!(ConfigValue::from(json!(1.5)), ConfigValue::Number(_)));
        assert!(matches!(ConfigValue::from(json!(null)), ConfigValue::Other(Value::Null)));
    }
}
