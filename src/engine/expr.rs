//! Arithmetic evaluation for stored solutions.
//!
//! Only used to check dataset integrity. Hands are never solved at runtime.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExprError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("number literal too large")]
    NumberTooLarge,
    #[error("division by zero")]
    DivisionByZero,
}

/// Evaluate an expression over non-negative integer literals with
/// `+ - * /` (or `×`, `÷`), honoring precedence and parentheses.
pub fn evaluate(expr: &str) -> Result<f64, ExprError> {
    let mut parser = Parser {
        chars: expr.chars().peekable(),
    };
    let value = parser.expression()?;
    match parser.next_token() {
        None => Ok(value),
        Some(ch) => Err(ExprError::UnexpectedChar(ch)),
    }
}

/// Integer literals in the order they appear.
pub fn literals(expr: &str) -> Vec<u32> {
    let mut out = Vec::new();
    let mut current: Option<u32> = None;
    for ch in expr.chars() {
        match ch.to_digit(10) {
            Some(d) => current = Some(current.unwrap_or(0).saturating_mul(10).saturating_add(d)),
            None => {
                if let Some(n) = current.take() {
                    out.push(n);
                }
            }
        }
    }
    out.extend(current);
    out
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn peek_token(&mut self) -> Option<char> {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
        self.chars.peek().copied()
    }

    fn next_token(&mut self) -> Option<char> {
        let ch = self.peek_token();
        self.chars.next();
        ch
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek_token() {
            self.chars.next();
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/' | '×' | '÷')) = self.peek_token() {
            self.chars.next();
            let rhs = self.factor()?;
            value = match op {
                '*' | '×' => value * rhs,
                _ => {
                    if rhs == 0.0 {
                        return Err(ExprError::DivisionByZero);
                    }
                    value / rhs
                }
            };
        }
        Ok(value)
    }

    // factor := number | '(' expression ')'
    fn factor(&mut self) -> Result<f64, ExprError> {
        match self.peek_token() {
            None => Err(ExprError::UnexpectedEnd),
            Some('(') => {
                self.chars.next();
                let value = self.expression()?;
                match self.next_token() {
                    Some(')') => Ok(value),
                    Some(ch) => Err(ExprError::UnexpectedChar(ch)),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.number(),
            Some(ch) => Err(ExprError::UnexpectedChar(ch)),
        }
    }

    fn number(&mut self) -> Result<f64, ExprError> {
        let mut n: u64 = 0;
        while let Some(d) = self.chars.peek().and_then(|c| c.to_digit(10)) {
            self.chars.next();
            n = n
                .checked_mul(10)
                .and_then(|n| n.checked_add(u64::from(d)))
                .ok_or(ExprError::NumberTooLarge)?;
        }
        Ok(n as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_precedence() {
        assert!(approx(evaluate("1+3*8-1").unwrap(), 24.0));
        assert!(approx(evaluate("2*8+2+6").unwrap(), 24.0));
        assert!(approx(evaluate("12/3*2*3").unwrap(), 24.0));
    }

    #[test]
    fn test_parentheses_and_fractions() {
        assert!(approx(evaluate("8/(3-8/3)").unwrap(), 24.0));
        assert!(approx(evaluate("(1+2)*(3+4)").unwrap(), 21.0));
        assert!(approx(evaluate(" ( 10 * ( 2 + 4 / 10 ) ) ").unwrap(), 24.0));
    }

    #[test]
    fn test_display_operators_accepted() {
        assert!(approx(evaluate("8÷(3-8÷3)").unwrap(), 24.0));
        assert!(approx(evaluate("(1+2)×8").unwrap(), 24.0));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(evaluate(""), Err(ExprError::UnexpectedEnd));
        assert_eq!(evaluate("(1+2"), Err(ExprError::UnexpectedEnd));
        assert_eq!(evaluate("1+2)"), Err(ExprError::UnexpectedChar(')')));
        assert_eq!(evaluate("1+a"), Err(ExprError::UnexpectedChar('a')));
        assert_eq!(evaluate("4/(2-2)"), Err(ExprError::DivisionByZero));
    }

    #[test]
    fn test_literals() {
        assert_eq!(literals("12*(11-8)-12"), vec![12, 11, 8, 12]);
        assert_eq!(literals("8/(3-8/3)"), vec![8, 3, 8, 3]);
        assert!(literals("()").is_empty());
    }
}
