use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
    UnknownVariant,
    Arity,
    /// The tree is larger than the evaluator's settings allow.
    Limit,
}

/// Produced when a validation tree or settings document cannot be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            message: message.into(),
            path: None,
            line: None,
            column: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column, &self.path) {
            (Some(line), Some(col), _) => write!(f, "{}:{}: {}", line, col, self.message),
            (_, _, Some(path)) => write!(f, "{} at {}", self.message, path),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Error kind for expression execution faults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationErrorKind {
    CelError,
    UndefinedReference,
    UnsupportedMethod,
}

/// Produced by an [`ExpressionExecutor`](crate::execute::ExpressionExecutor)
/// when an expression cannot be executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationError {
    pub kind: EvaluationErrorKind,
    pub message: String,
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvaluationError {}

/// Error kind for engine consistency faults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternalErrorKind {
    /// A combinator node without exactly two operands.
    Arity,
    /// More results recorded than `Settings::max_results` allows.
    ResultLimit,
    /// Tree nesting deeper than `Settings::max_depth`.
    DepthLimit,
    Unreachable,
}

/// A defect in the parser/evaluator contract. Never a statement about the
/// value being validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalError {
    pub kind: InternalErrorKind,
    pub message: String,
}

impl InternalError {
    pub(crate) fn new(kind: InternalErrorKind, message: impl Into<String>) -> Self {
        InternalError {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Logic error: {}; contact maintainer.", self.message)
    }
}

impl std::error::Error for InternalError {}

/// Caller misuse of the evaluation entry points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractError {
    pub message: String,
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ContractError {}

/// User-facing validation failure for one argument.
///
/// Produced by [`Outcome::into_result`](crate::types::Outcome::into_result)
/// from the rendered diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentError {
    pub argument: String,
    pub messages: Vec<String>,
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.messages.as_slice() {
            [single] => write!(f, "For argument `{}`, {}", self.argument, single),
            messages => {
                write!(
                    f,
                    "For argument `{}`, at least one of these should pass:",
                    self.argument
                )?;
                for message in messages {
                    write!(f, "\n  - {}", message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArgumentError {}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeError {
    pub message: String,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SerializeError {}

/// Combined error type for the evaluation entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum VetError {
    Parse(ParseError),
    Contract(ContractError),
    /// A predicate or template expression faulted while executing.
    Evaluation {
        argument: String,
        expression: String,
        source: EvaluationError,
    },
    Internal(InternalError),
    /// The value failed validation. Only produced by [`crate::vet`].
    Invalid(ArgumentError),
}

impl fmt::Display for VetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VetError::Parse(e) => write!(f, "Parse error: {}", e),
            VetError::Contract(e) => write!(f, "Contract error: {}", e),
            VetError::Evaluation {
                argument,
                expression,
                source,
            } => write!(
                f,
                "Validation expression for argument `{}` produced an error in `{}`: {}",
                argument, expression, source
            ),
            VetError::Internal(e) => write!(f, "{}", e),
            VetError::Invalid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for VetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VetError::Parse(e) => Some(e),
            VetError::Contract(e) => Some(e),
            VetError::Evaluation { source, .. } => Some(source),
            VetError::Internal(e) => Some(e),
            VetError::Invalid(e) => Some(e),
        }
    }
}

impl From<ParseError> for VetError {
    fn from(e: ParseError) -> Self {
        VetError::Parse(e)
    }
}

impl From<ContractError> for VetError {
    fn from(e: ContractError) -> Self {
        VetError::Contract(e)
    }
}

impl From<InternalError> for VetError {
    fn from(e: InternalError) -> Self {
        VetError::Internal(e)
    }
}
