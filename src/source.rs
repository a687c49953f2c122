//! In-memory queryable data source over JSON records.
//!
//! A reference backend for compiled queries: each record is a JSON object,
//! and a [`FieldPath`] walks into it one segment at a time, so
//! `data.first_name` reads `record["data"]["first_name"]`.
//!
//! # Matching rules
//!
//! - A missing field never matches, whatever the comparator (SQL `NULL`)
//! - Strings compare with strings, integers with JSON numbers; mixed kinds
//!   never match
//! - Numbers compare exactly as decimals, so `10` equals `10.0`; values
//!   outside the decimal range fall back to floating-point order
//! - `LIKE` is case-insensitive; `%` matches any run, `_` one character
//!
//! # Examples
//!
//! ```
//! use pmql::source::MemorySource;
//! use serde_json::json;
//!
//! let source = MemorySource::new(vec![
//!     json!({"id": 1, "data": {"first_name": "Taylor"}}),
//!     json!({"id": 2, "data": {"first_name": "Alan"}}),
//! ]);
//!
//! let found = source.pmql(r#"data.first_name = "Taylor""#).unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0]["id"], 1);
//! ```

use std::{cmp::Ordering, str::FromStr};

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::{
    ast::{Comparator, FieldPath},
    builder::FilterBuilder,
    compiler::CompiledQuery,
    error::Error,
    observability::log_debug,
    value::Value,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("invalid LIKE pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A filter ready to run against records.
#[derive(Debug, Clone)]
pub enum Matcher {
    Compare {
        field: FieldPath,
        op: Comparator,
        value: Value,
    },
    Like {
        field: FieldPath,
        pattern: Regex,
    },
    And(Box<Matcher>, Box<Matcher>),
    Or(Box<Matcher>, Box<Matcher>),
}

impl Matcher {
    pub fn matches(&self, record: &JsonValue) -> bool {
        match self {
            Matcher::Compare { field, op, value } => resolve(record, field)
                .and_then(|found| compare(found, value))
                .is_some_and(|ordering| satisfies(*op, ordering)),
            Matcher::Like { field, pattern } => resolve(record, field)
                .and_then(JsonValue::as_str)
                .is_some_and(|text| pattern.is_match(text)),
            Matcher::And(left, right) => left.matches(record) && right.matches(record),
            Matcher::Or(left, right) => left.matches(record) || right.matches(record),
        }
    }
}

/// Builds [`Matcher`]s from a compiled query.
#[derive(Debug, Default)]
pub struct MatcherBuilder;

impl FilterBuilder for MatcherBuilder {
    type Filter = Matcher;
    type Error = SourceError;

    fn comparison(
        &mut self,
        field: &FieldPath,
        op: Comparator,
        _placeholder: usize,
        value: &Value,
    ) -> Result<Matcher, SourceError> {
        match (op, value) {
            (Comparator::Like, Value::String(pattern)) => Ok(Matcher::Like {
                field: field.clone(),
                pattern: like_to_regex(pattern)?,
            }),
            _ => Ok(Matcher::Compare {
                field: field.clone(),
                op,
                value: value.clone(),
            }),
        }
    }

    fn and(&mut self, left: Matcher, right: Matcher) -> Result<Matcher, SourceError> {
        Ok(Matcher::And(Box::new(left), Box::new(right)))
    }

    fn or(&mut self, left: Matcher, right: Matcher) -> Result<Matcher, SourceError> {
        Ok(Matcher::Or(Box::new(left), Box::new(right)))
    }
}

/// Records held in memory, filtered by compiled queries.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<JsonValue>,
}

impl MemorySource {
    pub fn new(records: Vec<JsonValue>) -> Self {
        MemorySource { records }
    }

    pub fn records(&self) -> &[JsonValue] {
        &self.records
    }

    /// Records matching `compiled`, in their original order.
    pub fn filter(&self, compiled: &CompiledQuery) -> Result<Vec<&JsonValue>, SourceError> {
        let matcher = compiled.build(&mut MatcherBuilder)?;
        let found: Vec<&JsonValue> = self
            .records
            .iter()
            .filter(|record| matcher.matches(record))
            .collect();

        log_debug!(
            event = "records_filtered",
            scanned = self.records.len(),
            matched = found.len(),
        );
        Ok(found)
    }

    /// Compiles `text` and filters with it.
    pub fn pmql(&self, text: &str) -> Result<Vec<&JsonValue>, Error> {
        let compiled = crate::compile(text)?;
        Ok(self.filter(&compiled)?)
    }
}

/// Walks `field` into `record`; numeric segments also index arrays.
fn resolve<'a>(record: &'a JsonValue, field: &FieldPath) -> Option<&'a JsonValue> {
    field
        .segments()
        .iter()
        .try_fold(record, |current, segment| match current {
            JsonValue::Object(map) => map.get(segment),
            JsonValue::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        })
}

/// Orders a stored value against a literal, `None` when kinds differ.
fn compare(found: &JsonValue, literal: &Value) -> Option<Ordering> {
    match (found, literal) {
        (JsonValue::String(text), Value::String(s)) => Some(text.as_str().cmp(s.as_str())),
        (JsonValue::Number(number), Value::Integer(n)) => {
            let repr = number.to_string();
            match Decimal::from_str(&repr).or_else(|_| Decimal::from_scientific(&repr)) {
                Ok(stored) => Some(stored.cmp(&Decimal::from(*n))),
                // Beyond the decimal range; magnitude alone decides the order.
                Err(_) => number.as_f64()?.partial_cmp(&(*n as f64)),
            }
        }
        _ => None,
    }
}

fn satisfies(op: Comparator, ordering: Ordering) -> bool {
    match op {
        Comparator::Equal => ordering == Ordering::Equal,
        Comparator::NotEqual => ordering != Ordering::Equal,
        Comparator::LessThan => ordering == Ordering::Less,
        Comparator::LessEqual => ordering != Ordering::Greater,
        Comparator::GreaterThan => ordering == Ordering::Greater,
        Comparator::GreaterEqual => ordering != Ordering::Less,
        // LIKE is built as `Matcher::Like`; a non-string pattern is refused by the parser.
        Comparator::Like => false,
    }
}

/// Translates an SQL `LIKE` pattern into an anchored regex.
fn like_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut re = String::from("(?is)^");
    for ch in pattern.chars() {
        match ch {
            '%' => re.push_str(".*"),
            '_' => re.push('.'),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re)
}
