use thiserror::Error;

use crate::{
    ast::{ArithOp, Expr},
    observability::log_debug,
};

/// Errors that can occur while evaluating a well-formed arithmetic tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Right operand of `/` evaluated to zero
    #[error("division by zero at position {position}")]
    DivisionByZero { position: usize },

    /// Result does not fit in a 64-bit signed integer
    #[error("integer overflow at position {position}")]
    Overflow { position: usize },

    /// Node that only the query grammar produces
    #[error("cannot evaluate a {node} as arithmetic")]
    NotArithmetic { node: &'static str },
}

/// Reduces arithmetic trees to a single integer.
///
/// The evaluator holds no state; one instance can be shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an arithmetic tree bottom-up with checked `i64` arithmetic.
    ///
    /// Division truncates toward zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pmql::{Evaluator, parser::parse_arithmetic};
    ///
    /// let expr = parse_arithmetic("2*(1+5)").unwrap();
    /// assert_eq!(Evaluator::new().eval_expression(&expr).unwrap(), 12);
    /// ```
    pub fn eval_expression(&self, expr: &Expr) -> Result<i64, EvalError> {
        let result = self.eval(expr)?;
        log_debug!(event = "arithmetic_evaluated");
        Ok(result)
    }

    fn eval(&self, expr: &Expr) -> Result<i64, EvalError> {
        match expr {
            Expr::Number(n) => Ok(*n),
            Expr::Grouping(inner) => self.eval(inner),
            Expr::Arithmetic {
                op,
                left,
                right,
                position,
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.apply(*op, left, right, *position)
            }
            Expr::String(_)
            | Expr::Field(_)
            | Expr::Comparison { .. }
            | Expr::Logical { .. } => Err(EvalError::NotArithmetic {
                node: expr.kind_name(),
            }),
        }
    }

    fn apply(&self, op: ArithOp, left: i64, right: i64, position: usize) -> Result<i64, EvalError> {
        let result = match op {
            ArithOp::Add => left.checked_add(right),
            ArithOp::Subtract => left.checked_sub(right),
            ArithOp::Multiply => left.checked_mul(right),
            ArithOp::Divide => {
                if right == 0 {
                    return Err(EvalError::DivisionByZero { position });
                }
                left.checked_div(right)
            }
        };
        result.ok_or(EvalError::Overflow { position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arith(op: ArithOp, left: Expr, right: Expr) -> Expr {
        Expr::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position: 0,
        }
    }

    #[test]
    fn division_truncates_toward_zero() {
        let e = Evaluator::new();
        assert_eq!(e.apply(ArithOp::Divide, 7, 2, 0), Ok(3));
        assert_eq!(e.apply(ArithOp::Divide, -7, 2, 0), Ok(-3));
    }

    #[test]
    fn division_errors_carry_operator_position() {
        let expr = arith(
            ArithOp::Divide,
            arith(ArithOp::Subtract, Expr::Number(0), Expr::Number(i64::MAX)),
            Expr::Number(0),
        );
        assert_eq!(
            Evaluator::new().eval_expression(&expr),
            Err(EvalError::DivisionByZero { position: 0 })
        );
        assert_eq!(
            Evaluator::new().apply(ArithOp::Divide, i64::MIN, -1, 3),
            Err(EvalError::Overflow { position: 3 })
        );
    }

    #[test]
    fn query_nodes_are_rejected() {
        let expr = Expr::String("x".to_string());
        assert_eq!(
            Evaluator::new().eval_expression(&expr),
            Err(EvalError::NotArithmetic {
                node: "string literal"
            })
        );
    }
}
