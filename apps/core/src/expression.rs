//! Arithmetic recognition and evaluation for calculator queries.
//!
//! Recognition is a cheap syntactic screen over the raw query; evaluation is
//! a small precedence-climbing parser over `f64`. A query is only a
//! calculation when both succeed and the result is finite.

const OPERATORS: [char; 6] = ['+', '-', '*', '/', '^', '%'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    InvalidNumber(String),
    UnexpectedChar(char),
    UnexpectedToken(String),
    UnexpectedEnd,
    NonFinite,
}

impl std::fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber(raw) => write!(f, "invalid number literal '{raw}'"),
            Self::UnexpectedChar(ch) => write!(f, "unexpected character '{ch}'"),
            Self::UnexpectedToken(token) => write!(f, "unexpected token '{token}'"),
            Self::UnexpectedEnd => write!(f, "unexpected end of expression"),
            Self::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl std::error::Error for ExpressionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub expression: String,
    pub value: String,
}

fn is_operator(ch: char) -> bool {
    OPERATORS.contains(&ch)
}

/// Syntactic screen applied before any evaluation is attempted.
///
/// A leading `-` is rejected because the first character must be a digit
/// or `(`.
pub fn is_valid_expression(query: &str) -> bool {
    let allowed = query.chars().all(|ch| {
        ch.is_ascii_digit() || ch.is_whitespace() || is_operator(ch) || matches!(ch, '(' | ')' | '.')
    });
    if !allowed || !query.chars().any(is_operator) {
        return false;
    }

    let starts_ok = query
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit() || ch == '(');
    let ends_ok = query.chars().last().is_some_and(|ch| !is_operator(ch));
    if !starts_ok || !ends_ok {
        return false;
    }

    let opens = query.matches('(').count();
    let closes = query.matches(')').count();
    if opens != closes {
        return false;
    }

    let chars: Vec<char> = query.chars().collect();
    !chars
        .windows(2)
        .any(|pair| is_operator(pair[0]) && is_operator(pair[1]))
}

/// Recognizes and evaluates `query`, returning `None` when it is not a
/// usable calculation.
pub fn calculate(query: &str) -> Option<Calculation> {
    if !is_valid_expression(query) {
        return None;
    }

    let value = evaluate(query).ok()?;
    Some(Calculation {
        expression: query.to_string(),
        value: format_value(value),
    })
}

pub fn evaluate(input: &str) -> Result<f64, ExpressionError> {
    let tokens = lex(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(ExpressionError::UnexpectedToken(token.to_string()));
    }
    if !value.is_finite() {
        return Err(ExpressionError::NonFinite);
    }
    Ok(value)
}

/// Renders a result with at most 14 significant digits and no trailing
/// zeros. Whole numbers print without a fractional part.
pub fn format_value(value: f64) -> String {
    // LowerExp output of an f64 always parses back; the fallback is unreachable.
    let rounded: f64 = format!("{value:.13e}").parse().unwrap_or(value);
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.abs() >= 1e21 || rounded.abs() < 1e-7 {
        return format!("{rounded:e}");
    }
    format!("{rounded}")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(char),
    Open,
    Close,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Op(op) => write!(f, "{op}"),
            Self::Open => f.write_str("("),
            Self::Close => f.write_str(")"),
        }
    }
}

fn lex(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let mut literal = String::new();
            while let Some(&next) = chars.peek() {
                if next.is_ascii_digit() || next == '.' {
                    literal.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = literal
                .parse::<f64>()
                .map_err(|_| ExpressionError::InvalidNumber(literal.clone()))?;
            tokens.push(Token::Number(value));
            continue;
        }

        let token = match ch {
            '(' => Token::Open,
            ')' => Token::Close,
            op if is_operator(op) => Token::Op(op),
            other => return Err(ExpressionError::UnexpectedChar(other)),
        };
        tokens.push(token);
        chars.next();
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.peek() {
            Some(Token::Op(op)) if ops.contains(&op) => {
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.unary()?;
        while let Some(op) = self.eat_op(&['*', '/', '%']) {
            let rhs = self.unary()?;
            value = match op {
                '*' => value * rhs,
                '/' => value / rhs,
                _ => modulo(value, rhs),
            };
        }
        Ok(value)
    }

    // Sign binds looser than '^', so -2^2 is -4.
    fn unary(&mut self) -> Result<f64, ExpressionError> {
        match self.eat_op(&['+', '-']) {
            Some('-') => Ok(-self.unary()?),
            Some(_) => self.unary(),
            None => self.power(),
        }
    }

    // Right associative: 2^3^2 is 2^9.
    fn power(&mut self) -> Result<f64, ExpressionError> {
        let base = self.primary()?;
        if self.eat_op(&['^']).is_some() {
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, ExpressionError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::Close) => Ok(value),
                    Some(other) => Err(ExpressionError::UnexpectedToken(other.to_string())),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some(other) => Err(ExpressionError::UnexpectedToken(other.to_string())),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

// Floored modulo: the sign follows the divisor.
fn modulo(lhs: f64, rhs: f64) -> f64 {
    lhs - rhs * (lhs / rhs).floor()
}

#[cfg(test)]
mod tests {
    use super::{evaluate, format_value, lex, ExpressionError, Token};

    #[test]
    fn lexes_numbers_operators_and_parens() {
        let tokens = lex("(1.5+2)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Open,
                Token::Number(1.5),
                Token::Op('+'),
                Token::Number(2.0),
                Token::Close
            ]
        );
    }

    #[test]
    fn rejects_malformed_number_literal() {
        assert_eq!(
            lex("1.2.3"),
            Err(ExpressionError::InvalidNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn unary_sign_is_allowed_inside_parens() {
        assert_eq!(evaluate("(-3)+1"), Ok(-2.0));
        assert_eq!(evaluate("(-2^2)"), Ok(-4.0));
    }

    #[test]
    fn modulo_follows_divisor_sign() {
        assert_eq!(evaluate("7 % 3"), Ok(1.0));
        assert_eq!(evaluate("(-7) % 3"), Ok(2.0));
    }

    #[test]
    fn formats_whole_and_fractional_values() {
        assert_eq!(format_value(11.0), "11");
        assert_eq!(format_value(0.1 + 0.2), "0.3");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.0 / 3.0), "0.33333333333333");
    }
}
