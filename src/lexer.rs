use crate::{
    ast::{ArithOp, Comparator, Connective, Token, TokenKind},
    error::SyntaxError,
};

/// Turns source text into tokens on demand.
///
/// The lexer is also an [`Iterator`]: it yields every token up to and
/// including [`TokenKind::End`], or stops after the first error.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    done: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            done: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn lexeme(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.lexeme(start), start)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.advance();
        self.token(kind, start)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> Result<Token, SyntaxError> {
        let start = self.position;
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else if ch == '.' {
                // A dot must be followed by the next segment's first character.
                if !self
                    .peek_char(1)
                    .is_some_and(|c| c.is_alphanumeric() || c == '_')
                {
                    return Err(SyntaxError::new(
                        "empty segment in field path",
                        self.position,
                    ));
                }
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match result.as_str() {
            "AND" => TokenKind::Connective(Connective::And),
            "OR" => TokenKind::Connective(Connective::Or),
            "LIKE" => TokenKind::Comparator(Comparator::Like),
            _ => TokenKind::Identifier(result),
        };
        Ok(self.token(kind, start))
    }

    fn read_string(&mut self) -> Result<Token, SyntaxError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    if self.current_char() == Some('"') {
                        return Err(SyntaxError::new(
                            "unexpected quote after string literal",
                            self.position,
                        ));
                    }
                    return Ok(self.token(TokenKind::String(result), start));
                }
                '\\' => {
                    let backslash = self.position;
                    self.advance();
                    match self.current_char() {
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            return Err(SyntaxError::new(
                                format!("invalid escape sequence '\\{}'", other),
                                backslash,
                            ));
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(SyntaxError::new("unterminated string literal", start))
    }

    fn read_number(&mut self) -> Result<Token, SyntaxError> {
        let start = self.position;
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let digits = self.lexeme(start);
        let value = digits
            .parse::<i64>()
            .map_err(|_| SyntaxError::new("numeric literal is too large", start))?;
        Ok(self.token(TokenKind::Number(value), start))
    }

    fn read_comparator(&mut self, short: Comparator, long: Comparator) -> Token {
        let start = self.position;
        if self.peek_char(1) == Some('=') {
            self.advance();
            self.advance();
            self.token(TokenKind::Comparator(long), start)
        } else {
            self.advance();
            self.token(TokenKind::Comparator(short), start)
        }
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::new(TokenKind::End, "", self.position)),
            Some('+') => Ok(self.single(TokenKind::Operator(ArithOp::Add))),
            Some('-') => Ok(self.single(TokenKind::Operator(ArithOp::Subtract))),
            Some('*') => Ok(self.single(TokenKind::Operator(ArithOp::Multiply))),
            Some('/') => Ok(self.single(TokenKind::Operator(ArithOp::Divide))),
            Some('(') => Ok(self.single(TokenKind::LeftParen)),
            Some(')') => Ok(self.single(TokenKind::RightParen)),
            Some('=') => Ok(self.single(TokenKind::Comparator(Comparator::Equal))),
            Some('<') => Ok(self.read_comparator(Comparator::LessThan, Comparator::LessEqual)),
            Some('>') => {
                Ok(self.read_comparator(Comparator::GreaterThan, Comparator::GreaterEqual))
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    let start = self.position;
                    self.advance();
                    self.advance();
                    Ok(self.token(TokenKind::Comparator(Comparator::NotEqual), start))
                } else {
                    Err(SyntaxError::new(
                        "unrecognized character '!' (did you mean '!='?)",
                        self.position,
                    ))
                }
            }
            Some('"') => self.read_string(),
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.read_identifier(),
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => Err(SyntaxError::new(
                format!("unrecognized character '{}'", ch),
                self.position,
            )),
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        if !matches!(&result, Ok(token) if !token.is_end()) {
            self.done = true;
        }
        Some(result)
    }
}

/// Lazily tokenizes `text`.
///
/// Restart by calling again on the same text; the stream is not resumable.
pub fn tokenize(text: &str) -> Lexer {
    Lexer::new(text)
}

#[test]
fn test_keywords_are_case_sensitive() {
    let mut lexer = Lexer::new("AND OR LIKE and");
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Connective(Connective::And)
    );
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Connective(Connective::Or)
    );
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Comparator(Comparator::Like)
    );
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Identifier("and".to_string())
    );
    assert!(lexer.next_token().unwrap().is_end());
}

#[test]
fn test_iterator_stops_after_error() {
    let results: Vec<_> = Lexer::new("foo # bar").collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().position, 4);
}
