//! Arithmetic expression evaluator
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```

use thiserror::Error;

/// Parenthesis/sign nesting allowed before giving up
const MAX_DEPTH: usize = 64;

/// Evaluation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("Empty expression")]
    Empty,

    #[error("Unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unexpected token at position {0}")]
    UnexpectedToken(usize),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFinite,

    #[error("Expression nested too deeply")]
    TooDeep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            ' ' | '\t' => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::Open,
            ')' => Token::Close,
            '0'..='9' | '.' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' {
                        end = i + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[start..end];
                if literal == "." || literal.matches('.').count() > 1 {
                    return Err(ExprError::InvalidNumber(literal.to_string()));
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ExprError::InvalidNumber(literal.to_string()))?;
                Token::Num(value)
            }
            other => return Err(ExprError::UnexpectedChar(other)),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus {
                value + rhs
            } else {
                value - rhs
            };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }

        let value = match self.next() {
            Some(Token::Num(n)) => n,
            Some(Token::Minus) => -self.factor()?,
            Some(Token::Plus) => self.factor()?,
            Some(Token::Open) => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token::Close) => inner,
                    Some(_) => return Err(ExprError::UnexpectedToken(self.pos - 1)),
                    None => return Err(ExprError::UnexpectedEnd),
                }
            }
            Some(_) => return Err(ExprError::UnexpectedToken(self.pos - 1)),
            None => return Err(ExprError::UnexpectedEnd),
        };

        self.depth -= 1;
        Ok(value)
    }
}

/// Evaluates an arithmetic expression
pub fn evaluate(input: &str) -> Result<f64, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ExprError::UnexpectedToken(parser.pos));
    }
    if !value.is_finite() {
        return Err(ExprError::NonFinite);
    }
    Ok(value)
}

/// Formats a result; whole numbers print without a fraction
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
