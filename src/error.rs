//! Error types shared by the tokenizer, parser, evaluator and adapters.
//!
//! Grammar failures are always a [`SyntaxError`]. Failures that happen after a
//! well-formed expression has been parsed (division by zero, overflow, an
//! adapter refusing a pattern) have their own types so callers never confuse
//! "the user typed something invalid" with "the valid input could not run".

use thiserror::Error;

use crate::compiler::CompileError;
use crate::evaluator::EvalError;
use crate::source::SourceError;

/// A lexical or grammatical failure.
///
/// `position` is the 0-based character index of the offending character or
/// token in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at position {position}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        SyntaxError {
            message: message.into(),
            position,
        }
    }
}

/// Any failure the top-level entry points can return.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Source(#[from] SourceError),
}
