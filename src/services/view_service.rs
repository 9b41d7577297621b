use crate::errors::ParseError;
use crate::state::env_store::RawConfig;

pub const SHOULD_STOP_KEY: &str = "SHOULD_STOP";
pub const MAX_RUNTIME_KEY: &str = "MAX_RUNTIME";

/// Typed view of the raw config, as reported by `/should-stop` and
/// `/max-runtime`. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedConfig {
    pub should_stop: bool,
    /// Seconds.
    pub max_runtime: u64,
}

impl Default for TypedConfig {
    fn default() -> Self {
        Self {
            should_stop: true,
            max_runtime: 0,
        }
    }
}

impl TypedConfig {
    /// Total over any input: bad values fall back to defaults.
    pub fn derive(raw: &RawConfig) -> Self {
        let defaults = Self::default();

        let should_stop = match raw.get(SHOULD_STOP_KEY) {
            Some(value) => value.eq_ignore_ascii_case("true"),
            None => defaults.should_stop,
        };

        let max_runtime = match raw.get(MAX_RUNTIME_KEY) {
            Some(value) => parse_seconds(MAX_RUNTIME_KEY, value).unwrap_or_else(|e| {
                tracing::warn!("{e}, using default {}", defaults.max_runtime);
                defaults.max_runtime
            }),
            None => {
                tracing::info!("{MAX_RUNTIME_KEY} not set, using default {}", defaults.max_runtime);
                defaults.max_runtime
            }
        };

        Self {
            should_stop,
            max_runtime,
        }
    }
}

fn parse_seconds(key: &'static str, value: &str) -> Result<u64, ParseError> {
    value.parse::<u64>().map_err(|source| ParseError::Integer {
        key,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let view = TypedConfig::derive(&RawConfig::new());

        assert!(view.should_stop);
        assert_eq!(view.max_runtime, 0);
    }

    #[test]
    fn should_stop_is_case_insensitive() {
        assert!(TypedConfig::derive(&raw(&[("SHOULD_STOP", "TRUE")])).should_stop);
        assert!(TypedConfig::derive(&raw(&[("SHOULD_STOP", "True")])).should_stop);
        assert!(TypedConfig::derive(&raw(&[("SHOULD_STOP", "true")])).should_stop);
    }

    #[test]
    fn should_stop_is_false_for_anything_else() {
        for value in ["yes", "false", "1", "", " true", "truee"] {
            let view = TypedConfig::derive(&raw(&[("SHOULD_STOP", value)]));
            assert!(!view.should_stop, "{value:?} must not count as true");
        }
    }

    #[test]
    fn max_runtime_parses_integers() {
        let view = TypedConfig::derive(&raw(&[("MAX_RUNTIME", "120")]));

        assert_eq!(view.max_runtime, 120);
    }

    #[test]
    fn max_runtime_falls_back_on_bad_values() {
        for value in ["abc", "", "12.5", "-5", "1e3"] {
            let view = TypedConfig::derive(&raw(&[("MAX_RUNTIME", value)]));
            assert_eq!(view.max_runtime, 0, "{value:?} must fall back to 0");
        }
    }

    #[test]
    fn fields_are_derived_independently() {
        let view = TypedConfig::derive(&raw(&[("MAX_RUNTIME", "abc"), ("SHOULD_STOP", "false")]));

        assert_eq!(
            view,
            TypedConfig {
                should_stop: false,
                max_runtime: 0
            }
        );
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let view = TypedConfig::derive(&raw(&[("OTHER", "false")]));

        assert_eq!(view, TypedConfig::default());
    }

    #[test]
    fn parse_error_names_key_and_value() {
        let err = parse_seconds(MAX_RUNTIME_KEY, "abc").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("MAX_RUNTIME"));
        assert!(message.contains("\"abc\""));
    }
}
