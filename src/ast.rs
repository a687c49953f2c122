//! # PMQL - Abstract Syntax Tree
//!
//! Types shared by the lexer, parser, evaluator and compiler.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes and field paths
//! - **[operators]** - Arithmetic operators, comparators and connectives
//! - **[predicate]** - Compiled, literal-free filter tree
//!
//! ## Two Grammars
//!
//! Arithmetic mode evaluates integer expressions:
//!
//! ```text
//! 2 * (1 + 5)
//! ```
//!
//! Query mode compiles filters over record fields:
//!
//! ```text
//! data.first_name = "Taylor" OR (age >= 18 AND name LIKE "A%")
//! ```
//!
//! `AND` binds tighter than `OR`, operators of equal precedence associate to
//! the left, and parentheses override both.
//!
//! ## Literal Safety
//!
//! The compiler replaces every literal with a placeholder index into a
//! separate list of bound values. A [`Predicate`] therefore never holds user
//! text, only field paths, comparators and indices.
pub mod expressions;
pub mod operators;
pub mod predicate;
pub mod tokens;

pub use expressions::{Expr, FieldPath};
pub use operators::{ArithOp, Comparator, Connective};
pub use predicate::Predicate;
pub use tokens::{Token, TokenKind};
