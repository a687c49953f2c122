use serde::Serialize;
use thiserror::Error;

use crate::{
    ast::{Expr, Predicate},
    builder::FilterBuilder,
    observability::log_debug,
    value::Value,
};

/// Errors for trees the query grammar can never produce.
///
/// Only reachable when compiling a hand-built [`Expr`]; text always goes
/// through the parser first, which rejects such shapes as syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("expected a comparison or logical expression, found a {node}")]
    NotAPredicate { node: &'static str },
}

/// A compiled filter: a literal-free predicate plus its bound values.
///
/// Every comparison's placeholder indexes into [`CompiledQuery::bindings`],
/// and bindings appear in the order their literals appear in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    predicate: Predicate,
    bindings: Vec<Value>,
}

impl CompiledQuery {
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    pub fn into_parts(self) -> (Predicate, Vec<Value>) {
        (self.predicate, self.bindings)
    }

    /// Hands the predicate to a backend, depth-first and left to right.
    pub fn build<B: FilterBuilder>(&self, builder: &mut B) -> Result<B::Filter, B::Error> {
        self.build_node(&self.predicate, builder)
    }

    fn build_node<B: FilterBuilder>(
        &self,
        predicate: &Predicate,
        builder: &mut B,
    ) -> Result<B::Filter, B::Error> {
        match predicate {
            Predicate::Comparison {
                field,
                op,
                placeholder,
            } => {
                // Placeholders are assigned by the compiler from this same vector.
                let value = &self.bindings[*placeholder];
                builder.comparison(field, *op, *placeholder, value)
            }
            Predicate::And { left, right } => {
                let left = self.build_node(left, builder)?;
                let right = self.build_node(right, builder)?;
                builder.and(left, right)
            }
            Predicate::Or { left, right } => {
                let left = self.build_node(left, builder)?;
                let right = self.build_node(right, builder)?;
                builder.or(left, right)
            }
        }
    }
}

/// Turns a query tree into a [`CompiledQuery`].
#[derive(Debug, Default)]
pub struct Compiler {
    bindings: Vec<Value>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `expr`, stripping groupings and binding literals in
    /// traversal order.
    ///
    /// # Examples
    ///
    /// ```
    /// use pmql::{Compiler, Value, parser::parse_query};
    ///
    /// let expr = parse_query(r#"foo = "bar" AND cat = "dog""#).unwrap();
    /// let compiled = Compiler::new().compile(&expr).unwrap();
    ///
    /// assert_eq!(
    ///     compiled.bindings(),
    ///     &[Value::from("bar"), Value::from("dog")]
    /// );
    /// ```
    pub fn compile(mut self, expr: &Expr) -> Result<CompiledQuery, CompileError> {
        let predicate = self.compile_node(expr)?;
        log_debug!(
            event = "query_compiled",
            comparisons = predicate.comparison_count(),
            bindings = self.bindings.len(),
        );
        Ok(CompiledQuery {
            predicate,
            bindings: self.bindings,
        })
    }

    fn compile_node(&mut self, expr: &Expr) -> Result<Predicate, CompileError> {
        match expr {
            Expr::Comparison { field, op, value } => {
                let placeholder = self.bindings.len();
                self.bindings.push(value.clone());
                Ok(Predicate::Comparison {
                    field: field.clone(),
                    op: *op,
                    placeholder,
                })
            }
            Expr::Logical {
                connective,
                left,
                right,
            } => {
                let left = self.compile_node(left)?;
                let right = self.compile_node(right)?;
                Ok(Predicate::connective(*connective, left, right))
            }
            Expr::Grouping(inner) => self.compile_node(inner),
            Expr::Number(_) | Expr::String(_) | Expr::Field(_) | Expr::Arithmetic { .. } => {
                Err(CompileError::NotAPredicate {
                    node: expr.kind_name(),
                })
            }
        }
    }
}
