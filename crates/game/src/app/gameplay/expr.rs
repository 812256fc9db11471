//! Arithmetic evaluator for symbolic level geometry.
//!
//! Supports `+ - * / ( )`, unary minus, decimal literals and identifiers
//! bound in [`Bindings`]. Anything else is rejected.

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

pub const WIN_WIDTH: &str = "WIN_WIDTH";
pub const WIN_HEIGHT: &str = "WIN_HEIGHT";
pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },
    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },
    #[error("expression ended early")]
    UnexpectedEnd,
    #[error("undefined identifier '{name}' at offset {offset}")]
    UnknownIdentifier { name: String, offset: usize },
    #[error("division by zero at offset {offset}")]
    DivisionByZero { offset: usize },
    #[error("expression result is not a finite number")]
    NonFinite,
    #[error("parentheses nest too deeply at offset {offset}")]
    TooDeep { offset: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: BTreeMap<String, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

pub fn evaluate(expression: &str, bindings: &Bindings) -> Result<f64, ExpressionError> {
    let tokens = tokenize(expression)?;
    if tokens.len() == 1 {
        return Err(ExpressionError::Empty);
    }
    let mut parser = Parser {
        tokens: &tokens,
        position: 0,
        depth: 0,
        bindings,
    };
    let value = parser.expr()?;
    match parser.peek() {
        Spanned {
            token: Token::End, ..
        } => {}
        other => {
            return Err(ExpressionError::UnexpectedToken {
                found: other.token.describe(),
                offset: other.offset,
            })
        }
    }
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpressionError::NonFinite)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    End,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(value) => format!("number {value}"),
            Token::Ident(name) => format!("identifier '{name}'"),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::End => "end of expression".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Spanned {
    token: Token,
    offset: usize,
}

fn tokenize(src: &str) -> Result<Vec<Spanned>, ExpressionError> {
    let mut chars = src.char_indices().peekable();
    let mut tokens = Vec::new();

    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => lex_number(src, offset, &mut chars)?,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let end = consume_while(src, offset, &mut chars, |p| {
                    p.is_ascii_alphanumeric() || p == '_'
                });
                Token::Ident(src[offset..end].to_string())
            }
            other => return Err(ExpressionError::UnexpectedChar { ch: other, offset }),
        };
        tokens.push(Spanned { token, offset });
    }

    tokens.push(Spanned {
        token: Token::End,
        offset: src.len(),
    });
    Ok(tokens)
}

fn lex_number(
    src: &str,
    start: usize,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<Token, ExpressionError> {
    let end = consume_while(src, start, chars, |p| p.is_ascii_digit() || p == '.');
    let text = &src[start..end];
    text.parse::<f64>()
        .map(Token::Number)
        .map_err(|_| ExpressionError::InvalidNumber {
            text: text.to_string(),
            offset: start,
        })
}

/// Advances past every char matching `accept` and returns the end byte offset
/// of the run that began at `start`.
fn consume_while(
    src: &str,
    start: usize,
    chars: &mut Peekable<CharIndices<'_>>,
    accept: impl Fn(char) -> bool,
) -> usize {
    let mut end = src[start..]
        .chars()
        .next()
        .map_or(start, |first| start + first.len_utf8());
    while let Some(&(offset, ch)) = chars.peek() {
        if !accept(ch) {
            break;
        }
        end = offset + ch.len_utf8();
        chars.next();
    }
    end
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    position: usize,
    depth: usize,
    bindings: &'a Bindings,
}

impl Parser<'_> {
    fn peek(&self) -> &Spanned {
        // The token list always ends with `Token::End`.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Spanned {
        let current = self.peek().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        current
    }

    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        loop {
            match self.peek().token {
                Token::Plus => {
                    self.bump();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.bump();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        loop {
            match self.peek().token {
                Token::Star => {
                    self.bump();
                    value *= self.unary()?;
                }
                Token::Slash => {
                    let offset = self.bump().offset;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(ExpressionError::DivisionByZero { offset });
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ExpressionError> {
        let mut negate = false;
        while self.peek().token == Token::Minus {
            self.bump();
            negate = !negate;
        }
        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        let Spanned { token, offset } = self.bump();
        match token {
            Token::Number(value) => Ok(value),
            Token::Ident(name) => self
                .bindings
                .get(&name)
                .ok_or(ExpressionError::UnknownIdentifier { name, offset }),
            Token::LParen => {
                if self.depth >= MAX_NESTING {
                    return Err(ExpressionError::TooDeep { offset });
                }
                self.depth += 1;
                let value = self.expr();
                self.depth -= 1;
                let value = value?;
                let closing = self.bump();
                match closing.token {
                    Token::RParen => Ok(value),
                    Token::End => Err(ExpressionError::UnexpectedEnd),
                    other => Err(ExpressionError::UnexpectedToken {
                        found: other.describe(),
                        offset: closing.offset,
                    }),
                }
            }
            Token::End => Err(ExpressionError::UnexpectedEnd),
            other => Err(ExpressionError::UnexpectedToken {
                found: other.describe(),
                offset,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(width: f64, height: f64) -> Bindings {
        Bindings::new()
            .with(WIN_WIDTH, width)
            .with(WIN_HEIGHT, height)
    }

    #[test]
    fn substitutes_window_dimensions() {
        let bindings = window(800.0, 600.0);
        assert_eq!(evaluate("WIN_WIDTH / 2", &bindings), Ok(400.0));
        assert_eq!(evaluate("WIN_HEIGHT - 40", &bindings), Ok(560.0));
        assert_eq!(evaluate("WIN_WIDTH-WIN_HEIGHT", &bindings), Ok(200.0));
    }

    #[test]
    fn respects_precedence_and_parentheses() {
        let bindings = Bindings::new();
        assert_eq!(evaluate("2 + 3 * 4", &bindings), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4", &bindings), Ok(20.0));
        assert_eq!(evaluate("10 - 4 - 3", &bindings), Ok(3.0));
        assert_eq!(evaluate("12 / 3 / 2", &bindings), Ok(2.0));
    }

    #[test]
    fn supports_unary_minus_and_decimals() {
        let bindings = window(800.0, 600.0);
        assert_eq!(evaluate("-5 + 10", &bindings), Ok(5.0));
        assert_eq!(evaluate("--2", &bindings), Ok(2.0));
        assert_eq!(evaluate("WIN_WIDTH * 0.25", &bindings), Ok(200.0));
        assert_eq!(evaluate("-(WIN_HEIGHT / 3)", &bindings), Ok(-200.0));
    }

    #[test]
    fn plain_numeric_string_evaluates_to_itself() {
        assert_eq!(evaluate(" 42 ", &Bindings::new()), Ok(42.0));
    }

    #[test]
    fn unknown_identifier_is_reported_with_offset() {
        let error = evaluate("WIN_WIDTH + DEPTH", &window(800.0, 600.0)).expect_err("unknown");
        assert_eq!(
            error,
            ExpressionError::UnknownIdentifier {
                name: "DEPTH".to_string(),
                offset: 12,
            }
        );
    }

    #[test]
    fn identifiers_are_matched_whole() {
        let error = evaluate("WIN_WIDTH2", &window(800.0, 600.0)).expect_err("unknown");
        assert!(matches!(error, ExpressionError::UnknownIdentifier { name, .. } if name == "WIN_WIDTH2"));
    }

    #[test]
    fn code_like_input_is_rejected() {
        let bindings = window(800.0, 600.0);
        assert!(matches!(
            evaluate("alert(1)", &bindings),
            Err(ExpressionError::UnknownIdentifier { .. })
        ));
        assert!(matches!(
            evaluate("WIN_WIDTH; 1", &bindings),
            Err(ExpressionError::UnexpectedChar { ch: ';', .. })
        ));
        assert!(matches!(
            evaluate("\"800\"", &bindings),
            Err(ExpressionError::UnexpectedChar { ch: '"', .. })
        ));
    }

    #[test]
    fn malformed_arithmetic_is_rejected() {
        let bindings = Bindings::new();
        assert_eq!(evaluate("", &bindings), Err(ExpressionError::Empty));
        assert_eq!(evaluate("   ", &bindings), Err(ExpressionError::Empty));
        assert_eq!(evaluate("1 +", &bindings), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(evaluate("(1 + 2", &bindings), Err(ExpressionError::UnexpectedEnd));
        assert!(matches!(
            evaluate("1 2", &bindings),
            Err(ExpressionError::UnexpectedToken { offset: 2, .. })
        ));
        assert!(matches!(
            evaluate("1..2", &bindings),
            Err(ExpressionError::InvalidNumber { .. })
        ));
        assert!(matches!(
            evaluate("* 3", &bindings),
            Err(ExpressionError::UnexpectedToken { offset: 0, .. })
        ));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            evaluate("4 / (2 - 2)", &Bindings::new()),
            Err(ExpressionError::DivisionByZero { offset: 2 })
        );
    }

    #[test]
    fn long_unary_minus_runs_do_not_recurse() {
        let expression = format!("{}5", "-".repeat(100_001));
        assert_eq!(evaluate(&expression, &Bindings::new()), Ok(-5.0));
    }

    #[test]
    fn nesting_is_capped() {
        let within = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(evaluate(&within, &Bindings::new()), Ok(1.0));

        let deep = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
        assert_eq!(
            evaluate(&deep, &Bindings::new()),
            Err(ExpressionError::TooDeep {
                offset: MAX_NESTING
            })
        );
    }
}
