//! Recursive evaluation of validation trees.
//!
//! [`Evaluator::evaluate`] is the top-level entry point: it checks its inputs,
//! parses the raw expression, walks the tree with short-circuit AND/OR
//! semantics and renders the recorded failures.

use crate::classify::classify;
use crate::compare::StructuralComparator;
use crate::config::Settings;
use crate::enums::Mode;
use crate::error::*;
use crate::execute::ExpressionExecutor;
use crate::parse::ExpressionParser;
use crate::render::render;
use crate::results::{LeafResult, Payload, ResultList};
use crate::types::*;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, trace};

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").unwrap());

/// CEL keywords, literals and reserved identifiers.
const RESERVED: &[&str] = &[
    "as", "break", "const", "continue", "else", "false", "for", "function", "if", "import",
    "in", "let", "loop", "package", "namespace", "null", "return", "true", "var", "void",
    "while",
];

/// Evaluation engine wired to its three collaborators.
///
/// Holds no per-call state; every call builds its own [`ResultList`].
pub struct Evaluator<'a> {
    parser: &'a dyn ExpressionParser,
    executor: &'a dyn ExpressionExecutor,
    comparator: &'a dyn StructuralComparator,
    settings: Settings,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        parser: &'a dyn ExpressionParser,
        executor: &'a dyn ExpressionExecutor,
        comparator: &'a dyn StructuralComparator,
    ) -> Self {
        Evaluator {
            parser,
            executor,
            comparator,
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parse `raw` and validate `subject` against it.
    ///
    /// Returns an [`Outcome`] with no diagnostics when the value passes.
    ///
    /// # Errors
    ///
    /// - [`VetError::Contract`] if `subject` or `context` are malformed.
    /// - [`VetError::Parse`] if the parser rejects `raw`, or the tree it
    ///   produces is deeper or has more leaves than [`Settings`] allow.
    /// - [`VetError::Evaluation`] if a leaf expression faults.
    /// - [`VetError::Internal`] on a malformed tree or an exceeded ceiling.
    #[tracing::instrument(skip_all, fields(argument = %subject.name))]
    pub fn evaluate(
        &self,
        raw: &str,
        subject: &Subject,
        context: &Value,
    ) -> Result<Outcome, VetError> {
        check_inputs(subject, context)?;
        let node = self.parser.parse(raw, subject, context)?;
        self.check_extent(&node)?;
        self.evaluate_checked(&node, subject, context)
    }

    /// Reject a parsed tree that would overrun a ceiling during the walk.
    ///
    /// A tree too large for the settings is a property of the expression the
    /// user wrote, so it is reported as a [`ParseError`] before anything runs.
    fn check_extent(&self, node: &Node) -> Result<(), ParseError> {
        let extent = extent(node);
        if extent.depth > self.settings.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::Limit,
                format!(
                    "validation tree nested deeper than {} levels",
                    self.settings.max_depth
                ),
            ));
        }
        if extent.leaves > self.settings.max_results {
            return Err(ParseError::new(
                ParseErrorKind::Limit,
                format!(
                    "validation tree has {} leaves, more than the {} allowed",
                    extent.leaves, self.settings.max_results
                ),
            ));
        }
        Ok(())
    }

    /// Validate `subject` against an already parsed tree.
    pub fn evaluate_tree(
        &self,
        node: &Node,
        subject: &Subject,
        context: &Value,
    ) -> Result<Outcome, VetError> {
        check_inputs(subject, context)?;
        self.evaluate_checked(node, subject, context)
    }

    fn evaluate_checked(
        &self,
        node: &Node,
        subject: &Subject,
        context: &Value,
    ) -> Result<Outcome, VetError> {
        let results = self.run(node, subject, &bind_subject(subject, context))?;
        let diagnostics = render(&results, self.comparator, &self.settings.alike)?;
        debug!(
            results = results.len(),
            failures = results.count_failures(),
            diagnostics = diagnostics.len(),
            "evaluation finished"
        );
        Ok(Outcome { diagnostics })
    }

    /// Walk `node` against an already bound `scope` and return every result
    /// recorded on the way.
    pub fn run(
        &self,
        node: &Node,
        subject: &Subject,
        scope: &Value,
    ) -> Result<ResultList, VetError> {
        let mut results = ResultList::new(self.settings.max_results);
        self.evaluate_node(node, subject, scope, &mut results, 0)?;
        Ok(results)
    }

    /// Returns whether the subtree succeeded, which is always the success flag
    /// of the last result it appended.
    fn evaluate_node(
        &self,
        node: &Node,
        subject: &Subject,
        scope: &Value,
        results: &mut ResultList,
        depth: usize,
    ) -> Result<bool, VetError> {
        if depth > self.settings.max_depth {
            return Err(InternalError::new(
                InternalErrorKind::DepthLimit,
                format!(
                    "validation tree nested deeper than {} levels",
                    self.settings.max_depth
                ),
            )
            .into());
        }

        let mode = node.mode();
        match node {
            Node::And(_) | Node::Or(_) => {
                let chain = unroll(node)?;
                trace!(mode = mode.code(), depth, operands = chain.len(), "combinator");

                // `and(and(a, b), c)` walks as `a, b, c` at one level.
                let start = results.len();
                let mut ok = false;
                for (i, operand) in chain.iter().enumerate() {
                    if i > 0 && matches!((mode, ok), (Mode::And, false) | (Mode::Or, true)) {
                        debug!(
                            %mode,
                            skipped = chain.len() - i,
                            "short-circuit, remaining operands skipped"
                        );
                        break;
                    }
                    ok = self.evaluate_node(operand, subject, scope, results, depth + 1)?;
                    if i > 0 && mode == Mode::Or && ok {
                        results.supersede_from(start);
                    }
                }
                Ok(ok)
            }
            Node::Check(expr) | Node::Alike(expr) => {
                let result = self.evaluate_leaf(mode, expr, subject, scope)?;
                let success = result.success;
                results.append(result)?;
                Ok(success)
            }
        }
    }

    /// Execute one leaf and wrap its outcome.
    ///
    /// Execution faults abort with [`VetError::Evaluation`]; they are never
    /// recorded as failures.
    pub fn evaluate_leaf(
        &self,
        mode: Mode,
        expr: &Expr,
        subject: &Subject,
        scope: &Value,
    ) -> Result<LeafResult, VetError> {
        match mode {
            Mode::Check => {
                let value = self.execute(expr, subject, scope)?;
                let classification = classify(&value);
                debug!(expr = %expr.source, ?classification, "predicate evaluated");
                Ok(LeafResult {
                    success: classification.is_success(),
                    payload: Payload::Standard {
                        expr: expr.clone(),
                        value,
                        classification,
                    },
                })
            }
            Mode::Alike => {
                let template = self.execute(expr, subject, scope)?;
                let comparison = self.comparator.compare(
                    &template,
                    &subject.value,
                    &subject.expr,
                    &self.settings.alike,
                );
                debug!(expr = %expr.source, success = comparison.success, "structural match");
                Ok(LeafResult {
                    success: comparison.success,
                    payload: Payload::Structural {
                        report: comparison.report,
                    },
                })
            }
            Mode::And | Mode::Or => Err(InternalError::new(
                InternalErrorKind::Unreachable,
                format!("`{}` node dispatched as a leaf", mode),
            )
            .into()),
        }
    }

    fn execute(&self, expr: &Expr, subject: &Subject, scope: &Value) -> Result<Value, VetError> {
        self.executor
            .execute(&expr.source, scope)
            .map_err(|source| VetError::Evaluation {
                argument: subject.name.clone(),
                expression: expr.source.clone(),
                source,
            })
    }
}

/// Operands of a run of same-mode combinators down the left operand, in
/// evaluation order.
fn unroll(node: &Node) -> Result<Vec<&Node>, InternalError> {
    let mode = node.mode();
    let mut operands = Vec::new();
    let mut current = node;
    loop {
        let (left, right) = pair(current)?;
        operands.push(right);
        if left.mode() != mode {
            operands.push(left);
            break;
        }
        current = left;
    }
    operands.reverse();
    Ok(operands)
}

fn pair(node: &Node) -> Result<(&Node, &Node), InternalError> {
    let mode = node.mode();
    let (Node::And(operands) | Node::Or(operands)) = node else {
        return Err(InternalError::new(
            InternalErrorKind::Unreachable,
            format!("`{}` leaf walked as a combinator", mode),
        ));
    };
    match operands.as_slice() {
        [left, right] => Ok((left, right)),
        _ => Err(InternalError::new(
            InternalErrorKind::Arity,
            format!("`{}` node has {} operands, expected 2", mode, operands.len()),
        )),
    }
}

#[derive(Clone, Copy, Debug)]
struct Extent {
    depth: usize,
    leaves: usize,
}

/// Deepest level and leaf count of `node`, counted the way the walk counts
/// them. Malformed combinators are measured as they are; the walk reports
/// them.
fn extent(node: &Node) -> Extent {
    if let Node::Check(_) | Node::Alike(_) = node {
        return Extent {
            depth: 0,
            leaves: 1,
        };
    }

    let mode = node.mode();
    let mut total = Extent {
        depth: 1,
        leaves: 0,
    };
    let mut next = Some(node);
    while let Some(current) = next.take() {
        let (Node::And(operands) | Node::Or(operands)) = current else {
            break;
        };
        for (i, operand) in operands.iter().enumerate() {
            if i == 0 && operands.len() == 2 && operand.mode() == mode {
                next = Some(operand);
                continue;
            }
            let inner = extent(operand);
            total.depth = total.depth.max(inner.depth + 1);
            total.leaves += inner.leaves;
        }
    }
    total
}

/// Reject a subject or context that could never be evaluated.
fn check_inputs(subject: &Subject, context: &Value) -> Result<(), ContractError> {
    if RESERVED.contains(&subject.name.as_str()) {
        return Err(ContractError {
            message: format!(
                "argument name `{}` is a reserved word and cannot be referenced",
                subject.name
            ),
        });
    }
    if !IDENT_RE.is_match(&subject.name) {
        return Err(ContractError {
            message: format!(
                "argument name `{}` must be a valid identifier",
                subject.name
            ),
        });
    }
    let expr = subject.expr.trim();
    if expr.is_empty() || serde_json::from_str::<Value>(expr).is_ok() {
        return Err(ContractError {
            message: format!(
                "argument expression for `{}` must be an expression, not a plain value (got `{}`)",
                subject.name, subject.expr
            ),
        });
    }
    if !context.is_object() {
        return Err(ContractError {
            message: "binding context must be a JSON object".to_string(),
        });
    }
    Ok(())
}

/// Copy `context` and bind the subject's value under its name.
fn bind_subject(subject: &Subject, context: &Value) -> Value {
    let mut scope = context.as_object().cloned().unwrap_or_default();
    scope.insert(subject.name.clone(), subject.value.clone());
    Value::Object(scope)
}
