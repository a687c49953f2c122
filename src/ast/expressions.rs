use std::fmt;

use serde::Serialize;

use crate::{
    ast::{ArithOp, Comparator, Connective},
    value::Value,
};

/// Ordered identifier segments naming a (possibly nested) field.
///
/// A path is never empty and no segment is empty.
///
/// # Examples
/// ```text
/// foo              // ["foo"]
/// data.first_name  // ["data", "first_name"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Builds a path from segments, refusing an empty path or empty segment.
    pub fn new<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(FieldPath(segments))
    }

    /// Splits a dotted identifier such as `data.first_name`.
    pub fn from_dotted(ident: &str) -> Option<Self> {
        Self::new(ident.split('.'))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// First segment, the column or top-level key.
    pub fn root(&self) -> &str {
        &self.0[0]
    }

    pub fn is_nested(&self) -> bool {
        self.0.len() > 1
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Abstract Syntax Tree node produced by either grammar.
///
/// Nodes own their children; the tree has no sharing and no cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Number(i64),

    /// String literal, escapes already resolved
    ///
    /// # Example
    /// ```text
    /// "Taylor"
    /// ```
    String(String),

    /// Field reference
    Field(FieldPath),

    /// Arithmetic on two operands
    ///
    /// `position` is the operator's offset, reported by evaluation errors.
    ///
    /// # Example
    /// ```text
    /// 2 * (1 + 5)
    /// ```
    Arithmetic {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
        position: usize,
    },

    /// Field compared against a literal
    ///
    /// # Examples
    /// ```text
    /// foo = "bar"
    /// data.age >= 18
    /// ```
    Comparison {
        field: FieldPath,
        op: Comparator,
        value: Value,
    },

    /// Two sub-expressions joined by `AND` or `OR`
    Logical {
        connective: Connective,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Explicit parentheses
    ///
    /// Kept in the tree so the written grouping survives until compilation.
    Grouping(Box<Expr>),
}

impl Expr {
    /// Short name of the node kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Number(_) => "number literal",
            Expr::String(_) => "string literal",
            Expr::Field(_) => "field path",
            Expr::Arithmetic { .. } => "arithmetic expression",
            Expr::Comparison { .. } => "comparison",
            Expr::Logical { .. } => "logical expression",
            Expr::Grouping(_) => "grouping",
        }
    }
}
