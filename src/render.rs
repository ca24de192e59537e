//! Rendering of recorded failures into diagnostic messages.

use crate::compare::StructuralComparator;
use crate::config::AlikeSettings;
use crate::error::{InternalError, InternalErrorKind};
use crate::results::{LeafResult, Payload, ResultList};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%[%s]").unwrap());
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n\s*").unwrap());

/// Render the live failures of `results` into diagnostics.
///
/// A list that is empty or ends in a success renders to nothing, whatever
/// failures it recorded earlier. Adjacent identical messages are collapsed.
pub fn render(
    results: &ResultList,
    comparator: &dyn StructuralComparator,
    settings: &AlikeSettings,
) -> Result<Vec<String>, InternalError> {
    if results.passed() {
        return Ok(Vec::new());
    }

    let mut messages: Vec<String> = results
        .live_failures()
        .map(|result| render_failure(result, comparator, settings))
        .collect();
    if messages.is_empty() {
        return Err(InternalError::new(
            InternalErrorKind::Unreachable,
            "failed evaluation left no failures to report",
        ));
    }
    messages.dedup();
    Ok(messages)
}

fn render_failure(
    result: &LeafResult,
    comparator: &dyn StructuralComparator,
    settings: &AlikeSettings,
) -> String {
    match &result.payload {
        Payload::Standard {
            expr,
            classification,
            ..
        } => {
            let quoted = quote(&expr.source);
            match &expr.message {
                Some(template) => substitute(template, &quoted),
                None => format!(
                    "{} {} ({})",
                    quoted,
                    classification.verb(),
                    classification.reason()
                ),
            }
        }
        Payload::Structural { report } => comparator.format(report, settings).join(" "),
    }
}

/// Backtick-quote an expression, collapsed onto a single line.
///
/// Only line breaks and the indentation around them fold into one space;
/// other runs of whitespace are kept as written.
pub fn quote(source: &str) -> String {
    format!("`{}`", LINE_BREAK_RE.replace_all(source.trim(), " "))
}

/// Replace `%s` with `quoted` and `%%` with a literal percent sign.
pub fn substitute(template: &str, quoted: &str) -> String {
    TEMPLATE_RE
        .replace_all(template, |caps: &Captures| match &caps[0] {
            "%%" => "%".to_string(),
            _ => quoted.to_string(),
        })
        .into_owned()
}
