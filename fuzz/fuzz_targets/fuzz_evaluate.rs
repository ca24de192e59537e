#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use vetting::compare::{Comparison, DiffReport, StructuralComparator};
use vetting::error::{EvaluationError, EvaluationErrorKind};
use vetting::parse::TreeParser;
use vetting::{AlikeSettings, Evaluator, Node, Subject, VetError};

const LEAVES: u8 = 4;

struct SameKind;

impl StructuralComparator for SameKind {
    fn compare(&self, template: &Value, actual: &Value, _: &str, _: &AlikeSettings) -> Comparison {
        if std::mem::discriminant(template) == std::mem::discriminant(actual) {
            Comparison::matched()
        } else {
            Comparison::mismatched(DiffReport::new(Value::String("kind differs".into())))
        }
    }

    fn format(&self, report: &DiffReport, _: &AlikeSettings) -> Vec<String> {
        vec![report.as_value().to_string()]
    }
}

/// Build a tree whose combinators may carry any number of operands.
fn arbitrary_node(u: &mut Unstructured<'_>, depth: u32) -> arbitrary::Result<Node> {
    let choice = if depth == 0 { u.int_in_range(2..=3)? } else { u.int_in_range(0..=3)? };
    Ok(match choice {
        0 | 1 => {
            let len = u.int_in_range(0..=3)?;
            let mut operands = Vec::with_capacity(len);
            for _ in 0..len {
                operands.push(arbitrary_node(u, depth - 1)?);
            }
            if choice == 0 { Node::And(operands) } else { Node::Or(operands) }
        }
        2 => Node::check(format!("L{}", u.int_in_range(0..=LEAVES)?)),
        _ => Node::alike(format!("L{}", u.int_in_range(0..=LEAVES)?)),
    })
}

fn arbitrary_value(u: &mut Unstructured<'_>) -> arbitrary::Result<Value> {
    Ok(match u.int_in_range(0..=4)? {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(u)?),
        2 => Value::from(i64::arbitrary(u)?),
        3 => Value::String(String::arbitrary(u)?),
        _ => {
            let len = u.int_in_range(0..=4)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(match u.int_in_range(0..=2)? {
                    0 => Value::Null,
                    _ => Value::Bool(bool::arbitrary(u)?),
                });
            }
            Value::Array(items)
        }
    })
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(node) = arbitrary_node(&mut u, 6) else { return };

    // L4 is left unbound so execution faults are exercised too.
    let mut context = serde_json::Map::new();
    for i in 0..LEAVES {
        let Ok(value) = arbitrary_value(&mut u) else { return };
        context.insert(format!("L{}", i), value);
    }
    let Ok(subject_value) = arbitrary_value(&mut u) else { return };

    let executor = |expr: &str, ctx: &Value| -> Result<Value, EvaluationError> {
        ctx.get(expr).cloned().ok_or_else(|| EvaluationError {
            kind: EvaluationErrorKind::UndefinedReference,
            message: format!("object '{}' not found", expr),
        })
    };
    let evaluator = Evaluator::new(&TreeParser, &executor, &SameKind);
    match evaluator.evaluate_tree(&node, &Subject::new("x", subject_value), &Value::Object(context)) {
        Ok(outcome) => {
            for pair in outcome.diagnostics.windows(2) {
                assert_ne!(pair[0], pair[1]);
            }
        }
        Err(VetError::Internal(e)) => {
            assert_ne!(e.kind, vetting::error::InternalErrorKind::Unreachable, "{}", e);
        }
        Err(_) => {}
    }
});
