//! PMQL: a small filter language for end users, plus integer arithmetic.
//!
//! Text goes through the [`Lexer`] and [`Parser`], then either the
//! [`Evaluator`] (arithmetic mode) or the [`Compiler`] (query mode). A
//! compiled query is a literal-free [`Predicate`] and a list of bound
//! [`Value`]s; hosts execute it through a [`FilterBuilder`].
//!
//! ```
//! assert_eq!(pmql::parse("2*(1+5)").unwrap(), 12);
//!
//! let compiled = pmql::compile(r#"foo = "bar""#).unwrap();
//! assert_eq!(compiled.bindings(), &[pmql::Value::from("bar")]);
//!
//! assert!(pmql::compile(r#"data.first_name = "Taylor"""#).is_err());
//! ```
#[cfg(feature = "cli")]
pub mod cli;

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod source;
pub mod value;

mod observability;

pub use ast::{ArithOp, Comparator, Connective, Expr, FieldPath, Predicate, Token, TokenKind};
pub use builder::FilterBuilder;
pub use compiler::{CompileError, CompiledQuery, Compiler};
pub use error::{Error, SyntaxError};
pub use evaluator::{EvalError, Evaluator};
pub use lexer::{Lexer, tokenize};
pub use parser::Parser;
pub use render::{Dialect, SqlClause, SqlRenderer};
pub use source::{MemorySource, SourceError};
pub use value::Value;

/// Parses and evaluates an arithmetic expression.
pub fn parse(text: &str) -> Result<i64, Error> {
    let expr = parser::parse_arithmetic(text)?;
    Ok(Evaluator::new().eval_expression(&expr)?)
}

/// Parses and compiles a filter query.
///
/// Every failure caused by the text itself is [`Error::Syntax`].
pub fn compile(text: &str) -> Result<CompiledQuery, Error> {
    let expr = parser::parse_query(text)?;
    Ok(Compiler::new().compile(&expr)?)
}
