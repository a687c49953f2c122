//! JSON conversion helpers for CLI input and output

use serde_json::{Value as JsonValue, json};

use super::CliError;
use crate::{CompiledQuery, SqlClause};

/// Accept either an array of records or a single record
pub fn json_to_records(v: JsonValue) -> Result<Vec<JsonValue>, CliError> {
    match v {
        JsonValue::Array(records) => Ok(records),
        JsonValue::Object(_) => Ok(vec![v]),
        JsonValue::Null => Err(CliError::NotRecords("null")),
        JsonValue::Bool(_) => Err(CliError::NotRecords("boolean")),
        JsonValue::Number(_) => Err(CliError::NotRecords("number")),
        JsonValue::String(_) => Err(CliError::NotRecords("string")),
    }
}

/// `{ "sql", "bindings", "predicate" }` view of a compiled query
pub fn compiled_to_json(
    compiled: &CompiledQuery,
    clause: &SqlClause,
) -> Result<JsonValue, CliError> {
    Ok(json!({
        "sql": clause.sql,
        "bindings": serde_json::to_value(&clause.bindings)?,
        "predicate": serde_json::to_value(compiled.predicate())?,
    }))
}
