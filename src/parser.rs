use std::mem;

use crate::{
    ast::{ArithOp, Comparator, Connective, Expr, FieldPath, Token, TokenKind},
    error::SyntaxError,
    lexer::Lexer,
    observability::log_trace,
    value::Value,
};

/// Recursive-descent parser for both PMQL grammars.
///
/// The caller picks the grammar: [`Parser::parse_arithmetic`] or
/// [`Parser::parse_query`]. Parsing stops at the first error.
///
/// Each level of parentheses costs a few stack frames, so nesting depth is
/// bounded by the thread's call stack. Very deep input (thousands of
/// parentheses) can overflow it.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    consumed: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, SyntaxError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            consumed: 0,
        })
    }

    fn advance(&mut self) -> Result<Token, SyntaxError> {
        let next = self.lexer.next_token()?;
        self.consumed += 1;
        Ok(mem::replace(&mut self.current_token, next))
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        SyntaxError::new(
            format!("expected {}, found {}", expected, self.current_token.describe()),
            self.current_token.offset,
        )
    }

    fn expect_closing_paren(&mut self, open: &Token) -> Result<(), SyntaxError> {
        if self.current_token.kind != TokenKind::RightParen {
            return Err(self.unexpected(&format!(
                "')' to close '(' at position {}",
                open.offset
            )));
        }
        self.advance()?;
        Ok(())
    }

    fn expect_end(&mut self) -> Result<(), SyntaxError> {
        if !self.current_token.is_end() {
            return Err(SyntaxError::new(
                format!(
                    "unexpected {} after complete expression",
                    self.current_token.describe()
                ),
                self.current_token.offset,
            ));
        }
        log_trace!(event = "tokens_parsed", tokens = self.consumed);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Arithmetic grammar
    // ------------------------------------------------------------------

    /// Parses a complete arithmetic expression.
    ///
    /// ```text
    /// expr   := term (('+' | '-') term)*
    /// term   := factor (('*' | '/') factor)*
    /// factor := NUMBER | '(' expr ')'
    /// ```
    pub fn parse_arithmetic(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_additive()?;
        self.expect_end()?;
        Ok(expr)
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token.kind {
                TokenKind::Operator(op @ (ArithOp::Add | ArithOp::Subtract)) => op,
                _ => break,
            };

            let operator = self.advance()?;
            let right = self.parse_multiplicative()?;

            left = Expr::Arithmetic {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position: operator.offset,
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current_token.kind {
                TokenKind::Operator(op @ (ArithOp::Multiply | ArithOp::Divide)) => op,
                _ => break,
            };

            let operator = self.advance()?;
            let right = self.parse_factor()?;

            left = Expr::Arithmetic {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position: operator.offset,
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, SyntaxError> {
        match self.current_token.kind {
            TokenKind::Number(n) => {
                self.advance()?;
                Ok(Expr::Number(n))
            }
            TokenKind::LeftParen => {
                let open = self.advance()?;
                let inner = self.parse_additive()?;
                self.expect_closing_paren(&open)?;
                Ok(Expr::Grouping(Box::new(inner)))
            }
            _ => Err(self.unexpected("a number or '('")),
        }
    }

    // ------------------------------------------------------------------
    // Query grammar
    // ------------------------------------------------------------------

    /// Parses a complete filter query.
    ///
    /// ```text
    /// query      := orExpr
    /// orExpr     := andExpr ('OR' andExpr)*
    /// andExpr    := comparison ('AND' comparison)*
    /// comparison := FIELD COMPARATOR (STRING | NUMBER) | '(' query ')'
    /// ```
    pub fn parse_query(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_or()?;
        self.expect_end()?;
        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_and()?;

        while self.current_token.kind == TokenKind::Connective(Connective::Or) {
            self.advance()?;
            let right = self.parse_and()?;

            left = Expr::Logical {
                connective: Connective::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_comparison()?;

        while self.current_token.kind == TokenKind::Connective(Connective::And) {
            self.advance()?;
            let right = self.parse_comparison()?;

            left = Expr::Logical {
                connective: Connective::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, SyntaxError> {
        match self.current_token.kind {
            TokenKind::LeftParen => {
                let open = self.advance()?;
                let inner = self.parse_or()?;
                self.expect_closing_paren(&open)?;
                Ok(Expr::Grouping(Box::new(inner)))
            }
            TokenKind::Identifier(_) => {
                let field_token = self.advance()?;
                let field = match &field_token.kind {
                    TokenKind::Identifier(name) => FieldPath::from_dotted(name),
                    _ => None,
                }
                .ok_or_else(|| SyntaxError::new("invalid field path", field_token.offset))?;

                let op = match self.current_token.kind {
                    TokenKind::Comparator(op) => op,
                    _ => {
                        return Err(self.unexpected(&format!(
                            "a comparator after field '{}'",
                            field
                        )));
                    }
                };
                self.advance()?;

                let value = self.parse_literal(op)?;
                Ok(Expr::Comparison { field, op, value })
            }
            _ => Err(self.unexpected("a field name or '('")),
        }
    }

    fn parse_literal(&mut self, op: Comparator) -> Result<Value, SyntaxError> {
        let value = match &self.current_token.kind {
            TokenKind::String(s) => Value::String(s.clone()),
            TokenKind::Number(_) if op == Comparator::Like => {
                return Err(SyntaxError::new(
                    "LIKE requires a string pattern",
                    self.current_token.offset,
                ));
            }
            TokenKind::Number(n) => Value::Integer(*n),
            _ => {
                return Err(self.unexpected(&format!(
                    "a string or number after '{}'",
                    op.symbol()
                )));
            }
        };
        self.advance()?;
        Ok(value)
    }
}

/// Parses `text` with the arithmetic grammar.
pub fn parse_arithmetic(text: &str) -> Result<Expr, SyntaxError> {
    Parser::new(Lexer::new(text))?.parse_arithmetic()
}

/// Parses `text` with the query grammar.
pub fn parse_query(text: &str) -> Result<Expr, SyntaxError> {
    Parser::new(Lexer::new(text))?.parse_query()
}
