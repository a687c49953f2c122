//! Execute pmql operations for the CLI

use super::{CliError, compiled_to_json, json_to_records};
use crate::{Dialect, MemorySource, SqlRenderer, compile, parse, parser};

/// What the CLI was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Evaluate an arithmetic expression
    Eval,
    /// Compile a query and render it as SQL
    #[default]
    Compile,
    /// Filter JSON records with a query
    Filter,
    /// Only validate syntax, with the arithmetic or query grammar
    Check { arithmetic: bool },
}

/// Options for a CLI run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub mode: Mode,
    /// Expression or query text
    pub text: String,
    /// JSON records for `Filter`
    pub input: Option<String>,
    /// SQL flavour for `Compile`
    pub dialect: Dialect,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Result of a CLI run
#[derive(Debug)]
pub enum RunResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Arithmetic result
    Integer(i64),
    /// JSON output (compiled query or matching records)
    Json(serde_json::Value),
}

/// Execute a pmql CLI operation
pub fn execute(options: &RunOptions) -> Result<RunResult, CliError> {
    let text = &options.text;

    match options.mode {
        Mode::Check { arithmetic } => {
            if arithmetic {
                parser::parse_arithmetic(text)?;
            } else {
                parser::parse_query(text)?;
            }
            Ok(RunResult::SyntaxValid)
        }
        Mode::Eval => Ok(RunResult::Integer(parse(text)?)),
        Mode::Compile => {
            let compiled = compile(text)?;
            let clause = SqlRenderer::new(options.dialect).render(&compiled);
            Ok(RunResult::Json(compiled_to_json(&compiled, &clause)?))
        }
        Mode::Filter => {
            // Compile first so a bad query fails before any input is read.
            let compiled = compile(text)?;

            let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
            let json_value: serde_json::Value = serde_json::from_str(json_str)?;
            let source = MemorySource::new(json_to_records(json_value)?);

            let found = source.filter(&compiled)?;
            Ok(RunResult::Json(serde_json::Value::Array(
                found.into_iter().cloned().collect(),
            )))
        }
    }
}
