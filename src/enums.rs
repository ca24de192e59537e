//! Closed enumerations shared by the evaluator and renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluation mode carried by every node of a validation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    And,
    Or,
    /// Boolean predicate executed against the binding context.
    Check,
    /// Structural ("alike") match against a template value.
    Alike,
}

impl Mode {
    /// Numeric tag used in debug output and serialized traces.
    pub fn code(self) -> u16 {
        match self {
            Mode::And => 1,
            Mode::Or => 2,
            Mode::Check => 10,
            Mode::Alike => 999,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::And => "and",
            Mode::Or => "or",
            Mode::Check => "check",
            Mode::Alike => "alike",
        };
        write!(f, "{}", name)
    }
}

/// Outcome class of a boolean predicate value.
///
/// Only [`Classification::AllTrue`] counts as success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    AllTrue,
    False,
    Na,
    ContainsNa,
    ZeroLength,
    /// Not a logical value; carries the actual type name.
    WrongType(String),
    ContainsNonTrue,
}

impl Classification {
    pub fn is_success(&self) -> bool {
        matches!(self, Classification::AllTrue)
    }

    /// Parenthesized reason used in synthesized diagnostics.
    pub fn reason(&self) -> String {
        match self {
            Classification::AllTrue => "TRUE".to_string(),
            Classification::False => "FALSE".to_string(),
            Classification::Na => "NA".to_string(),
            Classification::ContainsNa => "contains NAs".to_string(),
            Classification::ZeroLength => "zero length".to_string(),
            Classification::WrongType(type_name) => {
                format!("is \"{}\" instead of a \"logical\"", type_name)
            }
            Classification::ContainsNonTrue => "contains non-TRUE values".to_string(),
        }
    }

    /// "is not all TRUE" is reserved for vectors holding a FALSE; every other
    /// class gets the shorter scalar wording.
    pub fn verb(&self) -> &'static str {
        match self {
            Classification::ContainsNonTrue => "is not all TRUE",
            _ => "is not TRUE",
        }
    }
}
