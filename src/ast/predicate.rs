use serde::Serialize;

use crate::ast::{Comparator, Connective, FieldPath};

/// Backend-neutral filter produced by the compiler.
///
/// Comparisons carry a placeholder index into the bound values instead of
/// the literal itself, so no literal text is ever part of the structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Comparison {
        field: FieldPath,
        op: Comparator,
        placeholder: usize,
    },
    And {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
    Or {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
}

impl Predicate {
    pub fn connective(
        connective: Connective,
        left: Predicate,
        right: Predicate,
    ) -> Predicate {
        let (left, right) = (Box::new(left), Box::new(right));
        match connective {
            Connective::And => Predicate::And { left, right },
            Connective::Or => Predicate::Or { left, right },
        }
    }

    /// Number of comparison leaves.
    pub fn comparison_count(&self) -> usize {
        match self {
            Predicate::Comparison { .. } => 1,
            Predicate::And { left, right } | Predicate::Or { left, right } => {
                left.comparison_count() + right.comparison_count()
            }
        }
    }

    /// Placeholder indices in left-to-right order.
    pub fn placeholders(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_placeholders(&mut out);
        out
    }

    fn collect_placeholders(&self, out: &mut Vec<usize>) {
        match self {
            Predicate::Comparison { placeholder, .. } => out.push(*placeholder),
            Predicate::And { left, right } | Predicate::Or { left, right } => {
                left.collect_placeholders(out);
                right.collect_placeholders(out);
            }
        }
    }
}
