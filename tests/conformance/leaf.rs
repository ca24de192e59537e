use super::common::*;
use serde_json::{Value, json};
use vetting::enums::{Classification, Mode};
use vetting::error::InternalErrorKind;
use vetting::parse::TreeParser;
use vetting::results::Payload;
use vetting::{Evaluator, Expr, Node, Subject, VetError};

fn predicate_message(value: Value) -> Vec<String> {
    diagnostics(&check("A"), json!({ "A": value }))
}

// ─── Predicate classification ────────────────────────────────────────────────

#[test]
fn true_scalar_and_true_vector_pass() {
    assert!(predicate_message(json!(true)).is_empty());
    assert!(predicate_message(json!([true])).is_empty());
    assert!(predicate_message(json!([true, true, true])).is_empty());
}

#[test]
fn false_scalar() {
    assert_eq!(predicate_message(json!(false)), vec!["`A` is not TRUE (FALSE)"]);
    assert_eq!(predicate_message(json!([false])), vec!["`A` is not TRUE (FALSE)"]);
}

#[test]
fn na_scalar() {
    assert_eq!(predicate_message(json!(null)), vec!["`A` is not TRUE (NA)"]);
    assert_eq!(predicate_message(json!([null])), vec!["`A` is not TRUE (NA)"]);
}

#[test]
fn zero_length() {
    assert_eq!(
        predicate_message(json!([])),
        vec!["`A` is not TRUE (zero length)"]
    );
}

#[test]
fn vector_with_na_before_false_contains_nas() {
    assert_eq!(
        predicate_message(json!([true, null, false])),
        vec!["`A` is not TRUE (contains NAs)"]
    );
}

#[test]
fn vector_with_false_uses_long_wording() {
    assert_eq!(
        predicate_message(json!([true, false])),
        vec!["`A` is not all TRUE (contains non-TRUE values)"]
    );
    assert_eq!(
        predicate_message(json!([false, null])),
        vec!["`A` is not all TRUE (contains non-TRUE values)"]
    );
}

#[test]
fn non_logical_values_report_their_type() {
    assert_eq!(
        predicate_message(json!(5)),
        vec!["`A` is not TRUE (is \"number\" instead of a \"logical\")"]
    );
    assert_eq!(
        predicate_message(json!("TRUE")),
        vec!["`A` is not TRUE (is \"string\" instead of a \"logical\")"]
    );
    assert_eq!(
        predicate_message(json!({"ok": true})),
        vec!["`A` is not TRUE (is \"object\" instead of a \"logical\")"]
    );
    assert_eq!(
        predicate_message(json!([true, 1])),
        vec!["`A` is not TRUE (is \"array\" instead of a \"logical\")"]
    );
}

#[test]
fn classification_is_recorded_on_success() {
    let executor = LookupExecutor::default();
    let evaluator = Evaluator::new(&TreeParser, &executor, &KindComparator);
    let result = evaluator
        .evaluate_leaf(
            Mode::Check,
            &Expr::new("A"),
            &Subject::new("x", json!(1)),
            &json!({"A": [true, true]}),
        )
        .unwrap();

    assert!(result.success);
    match result.payload {
        Payload::Standard {
            classification,
            value,
            ..
        } => {
            assert_eq!(classification, Classification::AllTrue);
            assert_eq!(value, json!([true, true]));
        }
        other => panic!("expected standard payload, got {:?}", other),
    }
}

#[test]
fn combinator_mode_cannot_be_dispatched_as_leaf() {
    let executor = LookupExecutor::default();
    let evaluator = Evaluator::new(&TreeParser, &executor, &KindComparator);
    let err = evaluator
        .evaluate_leaf(
            Mode::Or,
            &Expr::new("A"),
            &Subject::new("x", json!(1)),
            &json!({"A": true}),
        )
        .unwrap_err();

    assert!(matches!(err, VetError::Internal(ref e) if e.kind == InternalErrorKind::Unreachable));
    assert!(executor.calls().is_empty());
}

// ─── Message templates ───────────────────────────────────────────────────────

#[test]
fn template_replaces_placeholder_with_quoted_expression() {
    let tree = Node::check(Expr::new("A").with_message("%s must be positive"));
    assert_eq!(
        diagnostics(&tree, json!({"A": false})),
        vec!["`A` must be positive"]
    );
}

#[test]
fn template_escapes_percent() {
    let tree = Node::check(Expr::new("A").with_message("100%% of %s must hold"));
    assert_eq!(
        diagnostics(&tree, json!({"A": [true, false]})),
        vec!["100% of `A` must hold"]
    );
}

#[test]
fn template_without_placeholder_is_verbatim() {
    let tree = Node::check(Expr::new("A").with_message("must be a flag"));
    assert_eq!(diagnostics(&tree, json!({"A": 3})), vec!["must be a flag"]);
}

#[test]
fn multiline_expression_is_quoted_on_one_line() {
    let tree = check("A &&\n    B");
    assert_eq!(
        diagnostics(&tree, json!({"A &&\n    B": false})),
        vec!["`A && B` is not TRUE (FALSE)"]
    );
}

// ─── Structural matches ──────────────────────────────────────────────────────

#[test]
fn alike_passes_on_matching_template() {
    let executor = LookupExecutor::default();
    let outcome = run(&executor, &alike("T"), json!(42), json!({"T": 0})).unwrap();
    assert!(outcome.passed());
    assert_eq!(executor.calls(), vec!["T"]);
}

#[test]
fn alike_failure_renders_through_comparator() {
    let executor = LookupExecutor::default();
    let outcome = run(&executor, &alike("T"), json!("abc"), json!({"T": 0})).unwrap();
    assert_eq!(
        outcome.diagnostics,
        vec!["`x` should be type \"number\" (is \"string\")"]
    );
}

#[test]
fn alike_names_value_by_subject_expression() {
    let executor = LookupExecutor::default();
    let evaluator = Evaluator::new(&TreeParser, &executor, &KindComparator);
    let subject = Subject::new("x", json!([1, 2])).with_expr("frame.col");
    let outcome = evaluator
        .evaluate_tree(&alike("T"), &subject, &json!({"T": {}}))
        .unwrap();
    assert_eq!(
        outcome.diagnostics,
        vec!["`frame.col` should be type \"object\" (is \"array\")"]
    );
}

#[test]
fn structural_and_standard_failures_mix() {
    let tree = Node::or(alike("T"), check("A"));
    let executor = LookupExecutor::default();
    let outcome = run(&executor, &tree, json!(1), json!({"T": "", "A": null})).unwrap();
    assert_eq!(
        outcome.diagnostics,
        vec![
            "`x` should be type \"string\" (is \"number\")",
            "`A` is not TRUE (NA)",
        ]
    );
}

#[test]
fn predicate_sees_subject_binding() {
    let executor = LookupExecutor::default();
    let outcome = run(&executor, &check("x"), json!(false), json!({"x": true})).unwrap();
    assert_eq!(outcome.diagnostics, vec!["`x` is not TRUE (FALSE)"]);
}
