//! Test doubles shared by the conformance suite.

use serde_json::{Value, json};
use std::cell::RefCell;
use vetting::classify::type_name;
use vetting::compare::{Comparison, DiffReport, StructuralComparator};
use vetting::error::{EvaluationError, EvaluationErrorKind};
use vetting::execute::ExpressionExecutor;
use vetting::parse::TreeParser;
use vetting::{AlikeSettings, Evaluator, Node, Outcome, Subject, VetError};

/// Executor resolving each expression as a key of the binding context.
///
/// Records every expression it runs so tests can observe short-circuiting.
/// Unknown keys fault like an undefined variable.
#[derive(Default)]
pub struct LookupExecutor {
    calls: RefCell<Vec<String>>,
}

impl LookupExecutor {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, expression: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == expression).count()
    }
}

impl ExpressionExecutor for LookupExecutor {
    fn execute(&self, expression: &str, context: &Value) -> Result<Value, EvaluationError> {
        self.calls.borrow_mut().push(expression.to_string());
        context
            .get(expression)
            .cloned()
            .ok_or_else(|| EvaluationError {
                kind: EvaluationErrorKind::UndefinedReference,
                message: format!("object '{}' not found", expression),
            })
    }
}

/// Comparator matching on JSON kind only.
pub struct KindComparator;

impl StructuralComparator for KindComparator {
    fn compare(
        &self,
        template: &Value,
        actual: &Value,
        current: &str,
        _settings: &AlikeSettings,
    ) -> Comparison {
        if type_name(template) == type_name(actual) {
            Comparison::matched()
        } else {
            Comparison::mismatched(DiffReport::new(json!({
                "current": current,
                "expected": type_name(template),
                "actual": type_name(actual),
            })))
        }
    }

    fn format(&self, report: &DiffReport, _settings: &AlikeSettings) -> Vec<String> {
        let report = report.as_value();
        vec![
            format!(
                "`{}` should be type \"{}\"",
                report["current"].as_str().unwrap_or("?"),
                report["expected"].as_str().unwrap_or("?")
            ),
            format!("(is \"{}\")", report["actual"].as_str().unwrap_or("?")),
        ]
    }
}

pub fn check(name: &str) -> Node {
    Node::check(name)
}

pub fn alike(name: &str) -> Node {
    Node::alike(name)
}

/// Evaluate `node` for a subject `x` with the given context bindings.
pub fn run(
    executor: &LookupExecutor,
    node: &Node,
    value: Value,
    context: Value,
) -> Result<Outcome, VetError> {
    let evaluator = Evaluator::new(&TreeParser, executor, &KindComparator);
    evaluator.evaluate_tree(node, &Subject::new("x", value), &context)
}

/// Like [`run`] with a fresh executor, for tests that do not inspect calls.
pub fn diagnostics(node: &Node, context: Value) -> Vec<String> {
    let executor = LookupExecutor::default();
    run(&executor, node, json!(1), context)
        .expect("evaluation succeeds")
        .diagnostics
}
