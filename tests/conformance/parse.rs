use vetting::error::ParseErrorKind;
use vetting::{Expr, Node, parse, serialize};

#[test]
fn parses_leaf_forms() {
    assert_eq!(parse("check: \"x > 0\"").unwrap(), Node::check("x > 0"));
    assert_eq!(parse("alike: \"0\"").unwrap(), Node::alike("0"));
    assert_eq!(
        parse("check:\n  expr: x > 0\n  message: \"%s must be positive\"\n").unwrap(),
        Node::check(Expr::new("x > 0").with_message("%s must be positive"))
    );
}

#[test]
fn accepts_json_documents() {
    let node = parse(r#"{"and": [{"check": "a"}, {"alike": "b"}]}"#).unwrap();
    assert_eq!(node, Node::and(Node::check("a"), Node::alike("b")));
}

#[test]
fn folds_long_operand_lists_left() {
    let raw = r#"
and:
  - check: a
  - check: b
  - or:
      - check: c
      - check: d
      - check: e
"#;
    let expected = Node::and(
        Node::and(Node::check("a"), Node::check("b")),
        Node::or(
            Node::or(Node::check("c"), Node::check("d")),
            Node::check("e"),
        ),
    );
    assert_eq!(parse(raw).unwrap(), expected);
}

#[test]
fn rejects_single_operand_combinator() {
    let err = parse("or:\n  - check: a\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Arity);
    assert_eq!(err.path.as_deref(), Some("$"));
}

#[test]
fn reports_path_of_nested_arity_error() {
    let err = parse("and:\n  - check: a\n  - or: []\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Arity);
    assert_eq!(err.path.as_deref(), Some("$.and[1]"));
}

#[test]
fn rejects_empty_expression() {
    let err = parse("check: \"  \"").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TypeMismatch);
}

#[test]
fn rejects_empty_input() {
    assert_eq!(parse("  \n").unwrap_err().kind, ParseErrorKind::Syntax);
}

#[test]
fn rejects_non_mapping_root() {
    assert_eq!(
        parse("- check: a\n").unwrap_err().kind,
        ParseErrorKind::TypeMismatch
    );
}

#[test]
fn rejects_unknown_mode() {
    assert_eq!(
        parse("nand: [{check: a}, {check: b}]").unwrap_err().kind,
        ParseErrorKind::UnknownVariant
    );
}

#[test]
fn rejects_multi_document_yaml() {
    let err = parse("---\ncheck: a\n---\ncheck: b\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Syntax);
}

#[test]
fn serialized_tree_parses_back() {
    let tree = Node::or(
        Node::and(
            Node::check(Expr::new("x > 0").with_message("%s must be positive")),
            Node::check("x < 10"),
        ),
        Node::alike("0"),
    );
    let yaml = serialize(&tree).unwrap();
    assert_eq!(parse(&yaml).unwrap(), tree);
}
