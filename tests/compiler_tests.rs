// tests/compiler_tests.rs

use pmql::ast::{ArithOp, Comparator, Expr, FieldPath, Predicate};
use pmql::{CompileError, Compiler, Error, Value, compile};

fn comparison(path: &str, op: Comparator, placeholder: usize) -> Predicate {
    Predicate::Comparison {
        field: FieldPath::from_dotted(path).unwrap(),
        op,
        placeholder,
    }
}

fn and(left: Predicate, right: Predicate) -> Predicate {
    Predicate::And {
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn or(left: Predicate, right: Predicate) -> Predicate {
    Predicate::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[test]
fn test_single_comparison() {
    let compiled = compile(r#"foo = "bar""#).unwrap();
    assert_eq!(compiled.predicate(), &comparison("foo", Comparator::Equal, 0));
    assert_eq!(compiled.bindings(), &[Value::from("bar")]);
}

#[test]
fn test_and_pair_binds_left_to_right() {
    let compiled = compile(r#"foo = "bar" AND cat = "dog""#).unwrap();
    assert_eq!(
        compiled.predicate(),
        &and(
            comparison("foo", Comparator::Equal, 0),
            comparison("cat", Comparator::Equal, 1)
        )
    );
    assert_eq!(compiled.bindings(), &[Value::from("bar"), Value::from("dog")]);
}

#[test]
fn test_precedence_shapes_predicate() {
    let compiled = compile("a = 1 AND b = 2 OR c = 3 AND d = 4").unwrap();
    assert_eq!(
        compiled.predicate(),
        &or(
            and(
                comparison("a", Comparator::Equal, 0),
                comparison("b", Comparator::Equal, 1)
            ),
            and(
                comparison("c", Comparator::Equal, 2),
                comparison("d", Comparator::Equal, 3)
            )
        )
    );
    assert_eq!(
        compiled.bindings(),
        &[
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
            Value::Integer(4)
        ]
    );
}

#[test]
fn test_groupings_are_stripped_but_shape_kept() {
    let compiled = compile(r#"(a = "x") AND ((b = "y" OR c = "z"))"#).unwrap();
    assert_eq!(
        compiled.predicate(),
        &and(
            comparison("a", Comparator::Equal, 0),
            or(
                comparison("b", Comparator::Equal, 1),
                comparison("c", Comparator::Equal, 2)
            )
        )
    );
}

#[test]
fn test_parentheses_do_not_change_node_count() {
    let plain = compile("a = 1 AND b = 2").unwrap();
    let grouped = compile("((a = 1) AND (b = 2))").unwrap();
    assert_eq!(plain, grouped);
    assert_eq!(grouped.predicate().comparison_count(), 2);
}

#[test]
fn test_nested_path_is_preserved() {
    let compiled = compile(r#"data.address.city = "Paris""#).unwrap();
    match compiled.predicate() {
        Predicate::Comparison { field, .. } => {
            assert_eq!(field.segments(), &["data", "address", "city"].map(String::from));
            assert!(field.is_nested());
        }
        other => panic!("Expected comparison, got {:?}", other),
    }
}

#[test]
fn test_placeholders_are_unique_and_in_bounds() {
    let compiled =
        compile(r#"a = 1 OR (b = "2" AND c != 3) OR d LIKE "x%" AND e <= 5"#).unwrap();
    let placeholders = compiled.predicate().placeholders();
    assert_eq!(placeholders, vec![0, 1, 2, 3, 4]);
    assert_eq!(compiled.bindings().len(), placeholders.len());
}

#[test]
fn test_literal_kinds_are_kept() {
    let compiled = compile(r#"a = "42" AND b = 42"#).unwrap();
    assert_eq!(
        compiled.bindings(),
        &[Value::String("42".to_string()), Value::Integer(42)]
    );
}

#[test]
fn test_unescaped_string_is_bound() {
    let compiled = compile(r#"quote = "say \"hi\"""#).unwrap();
    assert_eq!(compiled.bindings(), &[Value::from(r#"say "hi""#)]);
}

#[test]
fn test_hostile_literal_never_enters_predicate() {
    let hostile = r#"x" OR 1=1; DROP TABLE records; --"#;
    let query = format!(r#"name = "{}""#, hostile.replace('"', "\\\""));
    let compiled = compile(&query).unwrap();

    let structure = serde_json::to_string(compiled.predicate()).unwrap();
    assert!(!structure.contains("DROP"));
    assert_eq!(compiled.bindings(), &[Value::from(hostile)]);
}

#[test]
fn test_compile_is_idempotent() {
    let text = r#"data.first_name = "Taylor" OR data.first_name = "Alan""#;
    assert_eq!(compile(text).unwrap(), compile(text).unwrap());
}

#[test]
fn test_syntax_errors_abort_compilation() {
    assert!(matches!(
        compile(r#"data.first_name = "Taylor"""#),
        Err(Error::Syntax(e)) if e.position == 26
    ));
    assert!(matches!(compile(""), Err(Error::Syntax(_))));
    assert!(matches!(compile("1 + 1"), Err(Error::Syntax(_))));
}

#[test]
fn test_compiler_rejects_arithmetic_tree() {
    let expr = Expr::Arithmetic {
        op: ArithOp::Add,
        left: Box::new(Expr::Number(1)),
        right: Box::new(Expr::Number(1)),
        position: 1,
    };
    assert_eq!(
        Compiler::new().compile(&expr),
        Err(CompileError::NotAPredicate {
            node: "arithmetic expression"
        })
    );
}

#[test]
fn test_predicate_serialization() {
    let compiled = compile(r#"foo = "bar" OR n > 3"#).unwrap();
    let json = serde_json::to_value(&compiled).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "predicate": {
                "kind": "or",
                "left": {"kind": "comparison", "field": ["foo"], "op": "equal", "placeholder": 0},
                "right": {"kind": "comparison", "field": ["n"], "op": "greater_than", "placeholder": 1}
            },
            "bindings": ["bar", 3]
        })
    );
}

#[test]
fn test_into_parts() {
    let (predicate, bindings) = compile("n = 1").unwrap().into_parts();
    assert_eq!(predicate, comparison("n", Comparator::Equal, 0));
    assert_eq!(bindings, vec![Value::Integer(1)]);
}
