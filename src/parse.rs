//! Parser contract and the declarative YAML/JSON tree reader.

use crate::error::{ParseError, ParseErrorKind};
use crate::types::{Expr, Node, Subject};
use serde_json::Value;

/// Extension point turning a raw validation expression into a [`Node`] tree.
///
/// Implementations must only produce binary `And`/`Or` nodes; anything else
/// is reported by the evaluator as an internal fault.
pub trait ExpressionParser {
    fn parse(&self, raw: &str, subject: &Subject, context: &Value) -> Result<Node, ParseError>;
}

/// Parser for validation trees written as YAML (or JSON) documents.
///
/// ```yaml
/// or:
///   - and:
///       - check: "x > 0"
///       - check: { expr: "x < 10", message: "%s must be below ten" }
///   - alike: "0"
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeParser;

impl ExpressionParser for TreeParser {
    fn parse(&self, raw: &str, _subject: &Subject, _context: &Value) -> Result<Node, ParseError> {
        parse(raw)
    }
}

/// Parse a YAML string into a binary validation tree.
///
/// `and`/`or` lists longer than two are folded left into binary chains, so
/// `and: [a, b, c]` becomes `and(and(a, b), c)`.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::new(ParseErrorKind::Syntax, "empty input"));
    }

    check_multi_document(input)?;

    let value: Value = serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        ParseError::new(classify_error(&msg), msg)
    })?;

    if !value.is_object() {
        return Err(ParseError::new(
            ParseErrorKind::TypeMismatch,
            "validation tree root must be a mapping",
        ));
    }

    let node: Node = serde_json::from_value(value).map_err(|e| {
        let msg = e.to_string();
        ParseError::new(classify_error(&msg), msg)
    })?;

    binarize(node, "$")
}

fn binarize(node: Node, path: &str) -> Result<Node, ParseError> {
    match node {
        Node::And(operands) => fold(operands, Node::and, "and", path),
        Node::Or(operands) => fold(operands, Node::or, "or", path),
        Node::Check(expr) => check_leaf(expr, path).map(Node::Check),
        Node::Alike(expr) => check_leaf(expr, path).map(Node::Alike),
    }
}

fn check_leaf(expr: Expr, path: &str) -> Result<Expr, ParseError> {
    if expr.source.trim().is_empty() {
        return Err(ParseError {
            path: Some(path.to_string()),
            ..ParseError::new(ParseErrorKind::TypeMismatch, "empty expression")
        });
    }
    Ok(expr)
}

fn fold(
    operands: Vec<Node>,
    combine: fn(Node, Node) -> Node,
    name: &str,
    path: &str,
) -> Result<Node, ParseError> {
    if operands.len() < 2 {
        return Err(ParseError {
            path: Some(path.to_string()),
            ..ParseError::new(
                ParseErrorKind::Arity,
                format!("`{}` needs at least two operands, got {}", name, operands.len()),
            )
        });
    }

    let mut operands = operands
        .into_iter()
        .enumerate()
        .map(|(i, operand)| binarize(operand, &format!("{}.{}[{}]", path, name, i)));
    let mut acc = match operands.next() {
        Some(first) => first?,
        None => return Err(ParseError::new(ParseErrorKind::Arity, "no operands")),
    };
    for operand in operands {
        acc = combine(acc, operand?);
    }
    Ok(acc)
}

/// Only `---` at column 0 counts, to avoid false positives in block scalars.
fn check_multi_document(input: &str) -> Result<(), ParseError> {
    let markers = input
        .lines()
        .filter(|line| line.starts_with("---") && line[3..].trim().is_empty())
        .count();
    if markers > 1 {
        return Err(ParseError::new(
            ParseErrorKind::Syntax,
            "multi-document YAML is not supported",
        ));
    }
    Ok(())
}

fn classify_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown variant") || lower.contains("unknown field") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("missing field")
        || lower.contains("invalid type")
        || lower.contains("did not match any variant")
        || lower.contains("expected")
    {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
