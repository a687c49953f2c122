//! CLI support for pmql
//!
//! Provides programmatic access to the pmql CLI operations so other tools
//! can embed them without spawning the binary.

mod convert;
mod docs;
mod run;

pub use convert::{compiled_to_json, json_to_records};
pub use docs::{DocTopic, get_doc_topic, get_docs_overview};
pub use run::{Mode, RunOptions, RunResult, execute};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pmql(#[from] crate::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON records to stdin.")]
    NoInput,

    #[error("Input must be a JSON array of records or a single object, got {0}")]
    NotRecords(&'static str),

    #[error("Unknown topic: '{0}'\nRun 'pmql docs' to see available topics.")]
    UnknownTopic(String),
}

impl From<crate::SyntaxError> for CliError {
    fn from(e: crate::SyntaxError) -> Self {
        CliError::Pmql(e.into())
    }
}

impl From<crate::SourceError> for CliError {
    fn from(e: crate::SourceError) -> Self {
        CliError::Pmql(e.into())
    }
}
