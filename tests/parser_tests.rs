// tests/parser_tests.rs

use pmql::ast::{ArithOp, Comparator, Connective, Expr, FieldPath};
use pmql::lexer::Lexer;
use pmql::parser::{Parser, parse_arithmetic, parse_query};
use pmql::Value;

fn field(path: &str) -> FieldPath {
    FieldPath::from_dotted(path).unwrap()
}

// ============================================================================
// Arithmetic grammar
// ============================================================================

#[test]
fn test_parse_number() {
    let expr = parse_arithmetic("42").unwrap();
    assert!(matches!(expr, Expr::Number(42)));
}

#[test]
fn test_arithmetic_precedence() {
    let expr = parse_arithmetic("1 + 2 * 3").unwrap();

    // Should be: Add(1, Multiply(2, 3))
    match expr {
        Expr::Arithmetic {
            op: ArithOp::Add,
            left,
            right,
            position,
        } => {
            assert_eq!(position, 2);
            assert!(matches!(*left, Expr::Number(1)));
            match *right {
                Expr::Arithmetic {
                    op: ArithOp::Multiply,
                    left,
                    right,
                    ..
                } => {
                    assert!(matches!(*left, Expr::Number(2)));
                    assert!(matches!(*right, Expr::Number(3)));
                }
                _ => panic!("Expected multiplication"),
            }
        }
        _ => panic!("Expected addition"),
    }
}

#[test]
fn test_parentheses_produce_grouping() {
    let expr = parse_arithmetic("(1 + 2) * 3").unwrap();

    // Should be: Multiply(Grouping(Add(1, 2)), 3)
    match expr {
        Expr::Arithmetic {
            op: ArithOp::Multiply,
            left,
            right,
            ..
        } => {
            match *left {
                Expr::Grouping(inner) => {
                    assert!(matches!(*inner, Expr::Arithmetic { op: ArithOp::Add, .. }));
                }
                _ => panic!("Expected grouping in left"),
            }
            assert!(matches!(*right, Expr::Number(3)));
        }
        _ => panic!("Expected multiplication"),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    let expr = parse_arithmetic("10 - 4 - 3").unwrap();

    // Should be: Subtract(Subtract(10, 4), 3)
    match expr {
        Expr::Arithmetic {
            op: ArithOp::Subtract,
            left,
            right,
            position,
        } => {
            assert_eq!(position, 7);
            assert!(matches!(*left, Expr::Arithmetic { op: ArithOp::Subtract, position: 3, .. }));
            assert!(matches!(*right, Expr::Number(3)));
        }
        _ => panic!("Expected subtraction"),
    }
}

#[test]
fn test_nested_grouping() {
    let expr = parse_arithmetic("((7))").unwrap();
    match expr {
        Expr::Grouping(outer) => {
            assert!(matches!(*outer, Expr::Grouping(ref inner) if **inner == Expr::Number(7)));
        }
        _ => panic!("Expected grouping"),
    }
}

#[test]
fn test_arithmetic_errors() {
    let cases = vec![
        ("", 0, "expected a number or '('"),
        ("1 +", 3, "expected a number or '('"),
        ("* 2", 0, "expected a number or '('"),
        ("(1 + 2", 6, "expected ')' to close '(' at position 0"),
        ("1 2", 2, "unexpected '2' after complete expression"),
        ("(1))", 3, "unexpected ')' after complete expression"),
        ("foo", 0, "expected a number or '('"),
        ("1 + \"a\"", 4, "expected a number or '('"),
    ];

    for (input, position, message) in cases {
        let err = parse_arithmetic(input).unwrap_err();
        assert_eq!(err.position, position, "Wrong position for input: {}", input);
        assert!(
            err.message.contains(message),
            "Input {:?}: message {:?} does not contain {:?}",
            input,
            err.message,
            message
        );
    }
}

// ============================================================================
// Query grammar
// ============================================================================

#[test]
fn test_simple_comparison() {
    let expr = parse_query(r#"foo = "bar""#).unwrap();
    assert_eq!(
        expr,
        Expr::Comparison {
            field: field("foo"),
            op: Comparator::Equal,
            value: Value::from("bar"),
        }
    );
}

#[test]
fn test_dotted_field_becomes_path() {
    let expr = parse_query(r#"data.first_name = "Taylor""#).unwrap();
    match expr {
        Expr::Comparison { field, .. } => {
            assert_eq!(field.segments(), &["data".to_string(), "first_name".to_string()]);
        }
        _ => panic!("Expected comparison"),
    }
}

#[test]
fn test_numeric_literal() {
    let expr = parse_query("age >= 18").unwrap();
    assert_eq!(
        expr,
        Expr::Comparison {
            field: field("age"),
            op: Comparator::GreaterEqual,
            value: Value::Integer(18),
        }
    );
}

#[test]
fn test_all_comparators() {
    let cases = vec![
        ("=", Comparator::Equal),
        ("!=", Comparator::NotEqual),
        ("<", Comparator::LessThan),
        ("<=", Comparator::LessEqual),
        (">", Comparator::GreaterThan),
        (">=", Comparator::GreaterEqual),
        ("LIKE", Comparator::Like),
    ];

    for (symbol, expected) in cases {
        let expr = parse_query(&format!(r#"name {} "x""#, symbol)).unwrap();
        assert!(
            matches!(expr, Expr::Comparison { op, .. } if op == expected),
            "Failed for comparator {}",
            symbol
        );
    }
}

#[test]
fn test_and_binds_tighter_than_or() {
    let expr = parse_query("a = 1 AND b = 2 OR c = 3 AND d = 4").unwrap();

    // Should be: Or(And(a, b), And(c, d))
    match expr {
        Expr::Logical {
            connective: Connective::Or,
            left,
            right,
        } => {
            assert!(matches!(*left, Expr::Logical { connective: Connective::And, .. }));
            assert!(matches!(*right, Expr::Logical { connective: Connective::And, .. }));
        }
        _ => panic!("Expected OR at the root"),
    }
}

#[test]
fn test_connectives_are_left_associative() {
    let expr = parse_query("a = 1 OR b = 2 OR c = 3").unwrap();

    // Should be: Or(Or(a, b), c)
    match expr {
        Expr::Logical {
            connective: Connective::Or,
            left,
            right,
        } => {
            assert!(matches!(*left, Expr::Logical { connective: Connective::Or, .. }));
            assert!(matches!(*right, Expr::Comparison { .. }));
        }
        _ => panic!("Expected OR at the root"),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse_query("a = 1 AND (b = 2 OR c = 3)").unwrap();

    match expr {
        Expr::Logical {
            connective: Connective::And,
            left,
            right,
        } => {
            assert!(matches!(*left, Expr::Comparison { .. }));
            match *right {
                Expr::Grouping(inner) => {
                    assert!(matches!(*inner, Expr::Logical { connective: Connective::Or, .. }));
                }
                _ => panic!("Expected grouping on the right"),
            }
        }
        _ => panic!("Expected AND at the root"),
    }
}

#[test]
fn test_grouping_around_whole_query() {
    let expr = parse_query(r#"(foo = "bar")"#).unwrap();
    assert!(matches!(expr, Expr::Grouping(inner) if matches!(*inner, Expr::Comparison { .. })));
}

#[test]
fn test_query_errors() {
    let cases = vec![
        ("", 0, "expected a field name or '('"),
        (r#"= "bar""#, 0, "expected a field name or '('"),
        (r#"foo "bar""#, 4, "expected a comparator after field 'foo'"),
        ("foo =", 5, "expected a string or number after '='"),
        ("foo = bar", 6, "expected a string or number after '='"),
        (r#"foo = "bar" AND"#, 15, "expected a field name or '('"),
        (r#"foo = "bar" cat = "dog""#, 12, "unexpected 'cat' after complete expression"),
        (r#"(foo = "bar""#, 12, "expected ')' to close '(' at position 0"),
        (r#"foo = "bar")"#, 11, "unexpected ')' after complete expression"),
        ("name LIKE 5", 10, "LIKE requires a string pattern"),
        (r#"foo = "a" "b""#, 10, "unexpected string \"b\" after complete expression"),
        (r#"foo = "bar" and cat = "dog""#, 12, "unexpected 'and' after complete expression"),
        ("1 + 1", 0, "expected a field name or '('"),
    ];

    for (input, position, message) in cases {
        let err = parse_query(input).unwrap_err();
        assert_eq!(err.position, position, "Wrong position for input: {}", input);
        assert!(
            err.message.contains(message),
            "Input {:?}: message {:?} does not contain {:?}",
            input,
            err.message,
            message
        );
    }
}

#[test]
fn test_doubled_quote_fails_in_query() {
    let err = parse_query(r#"data.first_name = "Taylor"""#).unwrap_err();
    assert_eq!(err.position, 26);
}

#[test]
fn test_lexer_error_surfaces_through_parser() {
    let err = parse_query(r#"foo = "unterminated"#).unwrap_err();
    assert_eq!(err.position, 6);
    assert!(err.message.contains("unterminated"));
}

#[test]
fn test_parser_from_lexer() {
    let mut parser = Parser::new(Lexer::new("2 * 3")).unwrap();
    assert!(matches!(
        parser.parse_arithmetic().unwrap(),
        Expr::Arithmetic { op: ArithOp::Multiply, .. }
    ));
}

#[test]
fn test_first_token_error_fails_construction() {
    assert!(Parser::new(Lexer::new("#")).is_err());
}
