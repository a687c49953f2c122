use crate::ast::{ArithOp, Comparator, Connective};

/// The kind of a lexical token, decided once by the lexer.
///
/// Downstream code matches on the kind and never looks at the lexeme again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 0
    /// ```
    Number(i64),

    /// String literal enclosed in double quotes, already unescaped
    ///
    /// # Examples
    /// ```text
    /// "Taylor"
    /// "say \"hi\""
    /// ```
    String(String),

    /// Field name, possibly dotted
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// underscores or `.` separators.
    ///
    /// # Examples
    /// ```text
    /// foo
    /// data.first_name
    /// ```
    Identifier(String),

    /// Arithmetic operator (`+`, `-`, `*`, `/`)
    Operator(ArithOp),

    /// Comparator (`=`, `!=`, `<`, `<=`, `>`, `>=`, `LIKE`)
    Comparator(Comparator),

    /// Logical connective (`AND`, `OR`), upper-case only
    ///
    /// # Examples
    /// ```text
    /// foo = "bar" AND cat = "dog"
    /// ```
    Connective(Connective),

    /// Left parenthesis for grouping
    LeftParen,

    /// Right parenthesis
    RightParen,

    /// End of input
    End,
}

/// A token together with the text it was read from and where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token, quotes included for strings.
    pub lexeme: String,
    /// 0-based character index of the first character.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::End => "end of input".to_string(),
            TokenKind::String(_) => format!("string {}", self.lexeme),
            _ => format!("'{}'", self.lexeme),
        }
    }
}
