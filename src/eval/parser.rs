//! Arithmetic Parser Module
//!
//! Recursive descent evaluator for whitelisted arithmetic expressions.
//!
//! The whitelist is the sole safety barrier between caller input and
//! evaluation: any character outside `{0-9 . + - * / ( ) space}` is rejected
//! before the expression is looked at further. Length and parenthesis depth
//! are bounded as well, so a hostile expression can neither execute anything
//! nor exhaust the worker evaluating it.

use crate::error::{GatewayError, Result};

// == Limits ==
/// Characters permitted in an arithmetic expression.
const WHITELIST: &str = "0123456789.+-*/() ";

/// Maximum accepted expression length in bytes.
pub const MAX_EXPRESSION_LENGTH: usize = 512;

/// Maximum parenthesis nesting depth.
pub const MAX_NESTING_DEPTH: usize = 32;

// == Classification ==
/// Returns true when every character of `expr` is in the arithmetic
/// whitelist. The math tool uses this to choose between local evaluation
/// and the LLM fallback.
pub fn is_arithmetic(expr: &str) -> bool {
    expr.chars().all(|c| WHITELIST.contains(c))
}

// == Evaluate ==
/// Evaluates a whitelisted arithmetic expression.
///
/// Fails with `Evaluation` on a disallowed character, an over-long or
/// over-nested expression, a malformed number, or division by zero.
pub fn evaluate(expr: &str) -> Result<f64> {
    if expr.len() > MAX_EXPRESSION_LENGTH {
        return Err(GatewayError::Evaluation(format!(
            "expression exceeds {MAX_EXPRESSION_LENGTH} characters"
        )));
    }
    if let Some(bad) = expr.chars().find(|c| !WHITELIST.contains(*c)) {
        return Err(GatewayError::Evaluation(format!(
            "disallowed character '{bad}' in expression"
        )));
    }

    let mut parser = Parser::new(expr);
    let value = parser.expression()?;
    parser.skip_spaces();
    if parser.pos < parser.input.len() {
        return Err(GatewayError::Evaluation(format!(
            "unexpected trailing input at position {}",
            parser.pos
        )));
    }
    if !value.is_finite() {
        return Err(GatewayError::Evaluation(
            "expression result is not finite".to_string(),
        ));
    }
    Ok(value)
}

// == Parser ==
/// Grammar:
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := '-' factor | '(' expression ')' | number
/// ```
struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        // Whitelist check already guaranteed pure ASCII.
        Self {
            input: input.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn expression(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        loop {
            self.skip_spaces();
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64> {
        let mut value = self.factor()?;
        loop {
            self.skip_spaces();
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(GatewayError::Evaluation("division by zero".to_string()));
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64> {
        self.skip_spaces();
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(b'(') => {
                self.depth += 1;
                if self.depth > MAX_NESTING_DEPTH {
                    return Err(GatewayError::Evaluation(format!(
                        "nesting deeper than {MAX_NESTING_DEPTH} levels"
                    )));
                }
                self.pos += 1;
                let value = self.expression()?;
                self.skip_spaces();
                if self.peek() != Some(b')') {
                    return Err(GatewayError::Evaluation(
                        "missing closing parenthesis".to_string(),
                    ));
                }
                self.pos += 1;
                self.depth -= 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            Some(c) => Err(GatewayError::Evaluation(format!(
                "unexpected character '{}' at position {}",
                c as char, self.pos
            ))),
            None => Err(GatewayError::Evaluation(
                "unexpected end of expression".to_string(),
            )),
        }
    }

    fn number(&mut self) -> Result<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'.') {
            self.pos += 1;
        }
        let literal = std::str::from_utf8(&self.input[start..self.pos])
            .expect("whitelisted input is ASCII");
        literal
            .parse::<f64>()
            .map_err(|_| GatewayError::Evaluation(format!("invalid number '{literal}'")))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_arithmetic() {
        assert!(is_arithmetic("2+2"));
        assert!(is_arithmetic(" (1.5 * 4) / 2 "));
        assert!(!is_arithmetic("2+2; rm -rf"));
        assert!(!is_arithmetic("what is two plus two"));
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("2+2").unwrap(), 4.0);
        assert_eq!(evaluate("10 - 3").unwrap(), 7.0);
        assert_eq!(evaluate("6*7").unwrap(), 42.0);
        assert_eq!(evaluate("5/2").unwrap(), 2.5);
    }

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
        assert_eq!(evaluate("((1+1))*((2))").unwrap(), 4.0);
    }

    #[test]
    fn test_unary_minus_and_decimals() {
        assert_eq!(evaluate("-3+5").unwrap(), 2.0);
        assert_eq!(evaluate("2*-3").unwrap(), -6.0);
        assert_eq!(evaluate("0.5 + .25").unwrap(), 0.75);
    }

    #[test]
    fn test_disallowed_characters_rejected_before_evaluation() {
        let result = evaluate("2+2; rm -rf");
        match result {
            Err(GatewayError::Evaluation(msg)) => assert!(msg.contains("disallowed character")),
            other => panic!("expected evaluation error, got {other:?}"),
        }

        assert!(matches!(
            evaluate("__import__"),
            Err(GatewayError::Evaluation(_))
        ));
    }

    #[test]
    fn test_division_by_zero() {
        let result = evaluate("1/0");
        match result {
            Err(GatewayError::Evaluation(msg)) => assert!(msg.contains("division by zero")),
            other => panic!("expected evaluation error, got {other:?}"),
        }
        assert!(evaluate("1/(2-2)").is_err());
    }

    #[test]
    fn test_malformed_expressions() {
        assert!(evaluate("").is_err());
        assert!(evaluate("2+").is_err());
        assert!(evaluate("(1+2").is_err());
        assert!(evaluate("1..2").is_err());
        assert!(evaluate("1 2").is_err());
    }

    #[test]
    fn test_length_bound() {
        let long = "1+".repeat(MAX_EXPRESSION_LENGTH) + "1";
        let result = evaluate(&long);
        match result {
            Err(GatewayError::Evaluation(msg)) => assert!(msg.contains("exceeds")),
            other => panic!("expected evaluation error, got {other:?}"),
        }
    }

    #[test]
    fn test_nesting_bound() {
        let nested = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        let result = evaluate(&nested);
        match result {
            Err(GatewayError::Evaluation(msg)) => assert!(msg.contains("nesting")),
            other => panic!("expected evaluation error, got {other:?}"),
        }

        // Depth right at the limit still evaluates.
        let ok = format!("{}1{}", "(".repeat(32), ")".repeat(32));
        assert_eq!(evaluate(&ok).unwrap(), 1.0);
    }
}
