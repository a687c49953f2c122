use std::fmt;

use serde::Serialize;

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Integer division truncating toward zero (`/`)
    Divide,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Subtract => "-",
            ArithOp::Multiply => "*",
            ArithOp::Divide => "/",
        }
    }
}

/// Comparison operators between a field and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Equal (`=`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// SQL wildcard match (`LIKE`), `%` and `_` wildcards
    Like,
}

impl Comparator {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Equal => "=",
            Comparator::NotEqual => "!=",
            Comparator::LessThan => "<",
            Comparator::LessEqual => "<=",
            Comparator::GreaterThan => ">",
            Comparator::GreaterEqual => ">=",
            Comparator::Like => "like",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Logical connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Connective {
    /// Logical AND (`AND`), binds tighter than OR
    And,
    /// Logical OR (`OR`)
    Or,
}

impl Connective {
    pub fn keyword(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
        }
    }
}
