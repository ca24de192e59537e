//! Validation tree, subject and outcome types.

use crate::enums::Mode;
use crate::error::ArgumentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Expressions ────────────────────────────────────────────────────────────

/// Source text of a leaf, with an optional user-supplied message template.
///
/// Deserializes from either a bare string or `{ expr, message }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExprRepr", into = "ExprRepr")]
pub struct Expr {
    pub source: String,
    pub message: Option<String>,
}

impl Expr {
    pub fn new(source: impl Into<String>) -> Self {
        Expr {
            source: source.into(),
            message: None,
        }
    }

    /// Attach a message template; `%s` is replaced with the quoted source.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl From<&str> for Expr {
    fn from(source: &str) -> Self {
        Expr::new(source)
    }
}

impl From<String> for Expr {
    fn from(source: String) -> Self {
        Expr::new(source)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ExprRepr {
    Bare(String),
    Full {
        expr: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl From<ExprRepr> for Expr {
    fn from(repr: ExprRepr) -> Self {
        match repr {
            ExprRepr::Bare(source) => Expr::new(source),
            ExprRepr::Full { expr, message } => Expr {
                source: expr,
                message,
            },
        }
    }
}

impl From<Expr> for ExprRepr {
    fn from(expr: Expr) -> Self {
        match expr.message {
            None => ExprRepr::Bare(expr.source),
            Some(message) => ExprRepr::Full {
                expr: expr.source,
                message: Some(message),
            },
        }
    }
}

// ─── Nodes ──────────────────────────────────────────────────────────────────

/// A node of a validation tree. Each node carries its own [`Mode`].
///
/// Combinators hold a `Vec` so that malformed trees from a parser stay
/// representable; the evaluator rejects any combinator without exactly two
/// operands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    And(Vec<Node>),
    Or(Vec<Node>),
    Check(Expr),
    Alike(Expr),
}

impl Node {
    pub fn and(left: Node, right: Node) -> Self {
        Node::And(vec![left, right])
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::Or(vec![left, right])
    }

    pub fn check(expr: impl Into<Expr>) -> Self {
        Node::Check(expr.into())
    }

    pub fn alike(expr: impl Into<Expr>) -> Self {
        Node::Alike(expr.into())
    }

    pub fn mode(&self) -> Mode {
        match self {
            Node::And(_) => Mode::And,
            Node::Or(_) => Mode::Or,
            Node::Check(_) => Mode::Check,
            Node::Alike(_) => Mode::Alike,
        }
    }
}

// ─── Subject ────────────────────────────────────────────────────────────────

/// The value under validation.
///
/// `name` is the argument identity and the variable the value is bound to in
/// the evaluation scope. `expr` is the expression that produced the value; it
/// defaults to `name`.
#[derive(Clone, Debug, PartialEq)]
pub struct Subject {
    pub name: String,
    pub expr: String,
    pub value: Value,
}

impl Subject {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        Subject {
            expr: name.clone(),
            name,
            value,
        }
    }

    pub fn with_expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = expr.into();
        self
    }
}

// ─── Outcome ────────────────────────────────────────────────────────────────

/// Result of one evaluation: no diagnostics means the value passed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub diagnostics: Vec<String>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Fold the diagnostics into a single error naming `argument`.
    pub fn into_result(self, argument: &str) -> Result<(), ArgumentError> {
        if self.passed() {
            Ok(())
        } else {
            Err(ArgumentError {
                argument: argument.to_string(),
                messages: self.diagnostics,
            })
        }
    }
}
