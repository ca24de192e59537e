//! Evaluation settings.

use crate::error::{ParseError, ParseErrorKind};
use serde::{Deserialize, Serialize};

/// Settings handed to the structural comparator untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlikeSettings {
    /// Strictness of type comparison (0 = most lenient).
    pub type_mode: u8,
    /// Strictness of attribute comparison (0 = most lenient).
    pub attr_mode: u8,
    /// Longest numeric vector checked for integer-likeness; negative disables
    /// the limit.
    pub fuzzy_int_max_len: i64,
    /// Screen width assumed when formatting diffs.
    pub width: usize,
}

impl Default for AlikeSettings {
    fn default() -> Self {
        AlikeSettings {
            type_mode: 0,
            attr_mode: 0,
            fuzzy_int_max_len: 100,
            width: 80,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Hard ceiling on results recorded during one evaluation.
    pub max_results: usize,
    /// Hard ceiling on tree nesting.
    pub max_depth: usize,
    pub alike: AlikeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_results: 10_000,
            max_depth: 256,
            alike: AlikeSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from YAML. Missing keys take their defaults.
    pub fn from_yaml(input: &str) -> Result<Settings, ParseError> {
        if input.trim().is_empty() {
            return Ok(Settings::default());
        }
        let settings: Settings = serde_saphyr::from_str(input).map_err(|e| {
            let msg = e.to_string();
            ParseError::new(classify_settings_error(&msg), msg)
        })?;
        for (key, value) in [
            ("max_results", settings.max_results),
            ("max_depth", settings.max_depth),
        ] {
            if value == 0 {
                return Err(ParseError {
                    path: Some(key.to_string()),
                    ..ParseError::new(
                        ParseErrorKind::TypeMismatch,
                        format!("{} must be positive", key),
                    )
                });
            }
        }
        Ok(settings)
    }
}

fn classify_settings_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("invalid") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
