//! Parameterized SQL rendering for compiled queries.
//!
//! This is a reference adapter: it shows how a host turns a
//! [`CompiledQuery`] into a `WHERE` clause for its own query builder. The
//! output is deterministic and literal-free; values only ever travel in
//! [`SqlClause::bindings`].
//!
//! # Canonical form
//!
//! - The whole clause is wrapped in one pair of parentheses
//! - Comparisons render as `<field> <op> <placeholder>`
//! - Connectives are lower-case `and` / `or`
//! - A nested connective is parenthesized unless it is the left operand of
//!   the same connective, so left-associative chains stay flat
//!
//! # Examples
//!
//! ```
//! use pmql::compile;
//! use pmql::render::{Dialect, SqlRenderer};
//!
//! let compiled = compile(r#"foo = "bar" AND cat = "dog""#).unwrap();
//! let clause = SqlRenderer::new(Dialect::Sqlite).render(&compiled);
//!
//! assert_eq!(clause.sql, r#"("foo" = ? and "cat" = ?)"#);
//! assert_eq!(
//!     clause.to_select("test_records"),
//!     r#"select * from "test_records" where ("foo" = ? and "cat" = ?)"#
//! );
//! ```

use std::convert::Infallible;

use serde::Serialize;

use crate::{
    ast::{Comparator, Connective, FieldPath},
    builder::FilterBuilder,
    compiler::CompiledQuery,
    value::Value,
};

/// Target SQL flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `?` placeholders, `json_extract` for nested paths
    #[default]
    Sqlite,
    /// `$n` placeholders, `->` / `->>` for nested paths
    Postgres,
}

/// A rendered clause and the values to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlClause {
    pub sql: String,
    pub bindings: Vec<Value>,
}

impl SqlClause {
    /// Full `select` statement over `table` filtered by this clause.
    pub fn to_select(&self, table: &str) -> String {
        format!("select * from {} where {}", quote_ident(table), self.sql)
    }
}

/// Partially rendered filter, remembering its top-level connective.
#[derive(Debug, Clone)]
pub struct Fragment {
    sql: String,
    connective: Option<Connective>,
}

impl Fragment {
    /// Text to embed as an operand of `parent`.
    fn operand(self, parent: Connective, is_left: bool) -> String {
        match self.connective {
            Some(c) if c == parent && is_left => self.sql,
            Some(_) => format!("({})", self.sql),
            None => self.sql,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqlRenderer {
    dialect: Dialect,
}

impl SqlRenderer {
    pub fn new(dialect: Dialect) -> Self {
        SqlRenderer { dialect }
    }

    pub fn render(&mut self, compiled: &CompiledQuery) -> SqlClause {
        let fragment = match compiled.build(self) {
            Ok(fragment) => fragment,
            Err(never) => match never {},
        };
        SqlClause {
            sql: format!("({})", fragment.sql),
            bindings: compiled.bindings().to_vec(),
        }
    }

    fn field(&self, field: &FieldPath) -> String {
        let segments = field.segments();
        let column = quote_ident(field.root());
        if !field.is_nested() {
            return column;
        }

        match self.dialect {
            Dialect::Sqlite => {
                let path: String = segments[1..]
                    .iter()
                    .map(|s| format!(".\"{}\"", s.replace('"', "\\\"")))
                    .collect();
                format!("json_extract({}, {})", column, quote_literal(&format!("${}", path)))
            }
            Dialect::Postgres => {
                let last = segments.len() - 1;
                let mut out = column;
                for (i, segment) in segments.iter().enumerate().skip(1) {
                    let arrow = if i == last { "->>" } else { "->" };
                    out.push_str(arrow);
                    out.push_str(&quote_literal(segment));
                }
                out
            }
        }
    }

    fn placeholder(&self, index: usize) -> String {
        match self.dialect {
            Dialect::Sqlite => "?".to_string(),
            Dialect::Postgres => format!("${}", index + 1),
        }
    }

    fn join(&self, connective: Connective, left: Fragment, right: Fragment) -> Fragment {
        Fragment {
            sql: format!(
                "{} {} {}",
                left.operand(connective, true),
                connective.keyword(),
                right.operand(connective, false)
            ),
            connective: Some(connective),
        }
    }
}

impl FilterBuilder for SqlRenderer {
    type Filter = Fragment;
    type Error = Infallible;

    fn comparison(
        &mut self,
        field: &FieldPath,
        op: Comparator,
        placeholder: usize,
        _value: &Value,
    ) -> Result<Fragment, Infallible> {
        Ok(Fragment {
            sql: format!(
                "{} {} {}",
                self.field(field),
                op.symbol(),
                self.placeholder(placeholder)
            ),
            connective: None,
        })
    }

    fn and(&mut self, left: Fragment, right: Fragment) -> Result<Fragment, Infallible> {
        Ok(self.join(Connective::And, left, right))
    }

    fn or(&mut self, left: Fragment, right: Fragment) -> Result<Fragment, Infallible> {
        Ok(self.join(Connective::Or, left, right))
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
