//! 公式列表达式。
//!
//! 语法：数字、`[列名]` 引用、`+ - * /`、括号与一元负号。

use std::fmt;

/// 公式解析 / 求值错误。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("unexpected character '{0}' at {1}")]
    UnexpectedChar(char, usize),
    #[error("unterminated column reference")]
    UnterminatedReference,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected token {0}")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unknown column reference [{0}]")]
    UnknownReference(String),
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Reference(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{value}"),
            Token::Reference(name) => write!(f, "[{name}]"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Reference(String),
    Negate(Box<Expr>),
    Binary(Box<Expr>, BinaryOp, Box<Expr>),
}

fn tokenize(source: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = source.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        match ch {
            c if c.is_whitespace() => index += 1,
            '+' => {
                tokens.push(Token::Plus);
                index += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                index += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                index += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                index += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                index += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                index += 1;
            }
            '[' => {
                let start = index + 1;
                let end = chars[start..]
                    .iter()
                    .position(|c| *c == ']')
                    .map(|offset| start + offset)
                    .ok_or(FormulaError::UnterminatedReference)?;
                let name: String = chars[start..end].iter().collect();
                tokens.push(Token::Reference(name.trim().to_string()));
                index = end + 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = index;
                while index < chars.len() && (chars[index].is_ascii_digit() || chars[index] == '.')
                {
                    index += 1;
                }
                let text: String = chars[start..index].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber(text.clone()))?;
                tokens.push(Token::Number(value));
            }
            other => return Err(FormulaError::UnexpectedChar(other, index)),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.position += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.position += 1;
            let rhs = self.factor()?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }
    }

    fn factor(&mut self) -> Result<Expr, FormulaError> {
        match self.next() {
            Some(Token::Minus) => Ok(Expr::Negate(Box::new(self.factor()?))),
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Reference(name)) => Ok(Expr::Reference(name)),
            Some(Token::LParen) => {
                let inner = self.expression()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    Some(other) => Err(FormulaError::UnexpectedToken(other.to_string())),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            Some(other) => Err(FormulaError::UnexpectedToken(other.to_string())),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

/// 解析后的公式。
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    root: Expr,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let mut parser = Parser {
            tokens: tokenize(source)?,
            position: 0,
        };
        let root = parser.expression()?;
        if let Some(extra) = parser.next() {
            return Err(FormulaError::UnexpectedToken(extra.to_string()));
        }
        Ok(Self { root })
    }

    /// 引用到的列名（按出现顺序，可能重复）。
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_references(&self.root, &mut names);
        names
    }

    /// 不在 `columns` 中的引用，按列名忽略大小写与首尾空白比较；结果去重。
    pub fn missing_references<'a>(&'a self, columns: &[&str]) -> Vec<&'a str> {
        let mut seen: Vec<String> = columns.iter().map(|name| normalize_name(name)).collect();
        let mut missing: Vec<&str> = Vec::new();
        for name in self.references() {
            let key = normalize_name(name);
            if !seen.contains(&key) {
                seen.push(key);
                missing.push(name);
            }
        }
        missing
    }

    /// 求值；`lookup` 返回 `None` 的引用视为未知列。
    pub fn evaluate(&self, lookup: &dyn Fn(&str) -> Option<f64>) -> Result<f64, FormulaError> {
        eval(&self.root, lookup)
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn collect_references<'a>(expr: &'a Expr, names: &mut Vec<&'a str>) {
    match expr {
        Expr::Number(_) => {}
        Expr::Reference(name) => names.push(name),
        Expr::Negate(inner) => collect_references(inner, names),
        Expr::Binary(lhs, _, rhs) => {
            collect_references(lhs, names);
            collect_references(rhs, names);
        }
    }
}

fn eval(expr: &Expr, lookup: &dyn Fn(&str) -> Option<f64>) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Reference(name) => {
            lookup(name).ok_or_else(|| FormulaError::UnknownReference(name.clone()))
        }
        Expr::Negate(inner) => Ok(-eval(inner, lookup)?),
        Expr::Binary(lhs, op, rhs) => {
            let left = eval(lhs, lookup)?;
            let right = eval(rhs, lookup)?;
            match op {
                BinaryOp::Add => Ok(left + right),
                BinaryOp::Sub => Ok(left - right),
                BinaryOp::Mul => Ok(left * right),
                BinaryOp::Div if right == 0.0 => Err(FormulaError::DivisionByZero),
                BinaryOp::Div => Ok(left / right),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Formula, FormulaError};

    fn values(name: &str) -> Option<f64> {
        match name {
            "Oil Rate" => Some(120.0),
            "Water Rate" => Some(80.0),
            "Zero" => Some(0.0),
            _ => None,
        }
    }

    fn eval(source: &str) -> Result<f64, FormulaError> {
        Formula::parse(source)?.evaluate(&values)
    }

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(eval("1 + 2 * 3"), Ok(7.0));
        assert_eq!(eval("(1 + 2) * 3"), Ok(9.0));
        assert_eq!(eval("10 - 4 - 3"), Ok(3.0));
        assert_eq!(eval("-(2 + 3) * 2"), Ok(-10.0));
        assert_eq!(eval("2 * -3"), Ok(-6.0));
    }

    #[test]
    fn column_references() {
        assert_eq!(eval("[Oil Rate] + [Water Rate]"), Ok(200.0));
        assert_eq!(
            eval("[Water Rate] / ([Oil Rate] + [Water Rate]) * 100"),
            Ok(40.0)
        );
        let formula = Formula::parse("[ Oil Rate ] * 2 + [Water Rate]").expect("parse");
        assert_eq!(formula.references(), vec!["Oil Rate", "Water Rate"]);
    }

    #[test]
    fn missing_references_ignore_case_and_repeat_once() {
        let formula = Formula::parse("[oil rate] + [Gas] * [GAS] - [Water Rate]").expect("parse");
        assert_eq!(
            formula.missing_references(&["Oil Rate ", "Water Rate"]),
            vec!["Gas"]
        );
        assert!(formula.missing_references(&["Oil Rate", "gas", "water rate"]).is_empty());
    }

    #[test]
    fn failures() {
        assert_eq!(eval("[Oil Rate] / [Zero]"), Err(FormulaError::DivisionByZero));
        assert_eq!(
            eval("[Gas Rate] + 1"),
            Err(FormulaError::UnknownReference("Gas Rate".to_string()))
        );
        assert_eq!(eval("1 +"), Err(FormulaError::UnexpectedEnd));
        assert_eq!(eval("(1 + 2"), Err(FormulaError::UnexpectedEnd));
        assert_eq!(eval("[Oil Rate"), Err(FormulaError::UnterminatedReference));
        assert_eq!(eval("1 2"), Err(FormulaError::UnexpectedToken("2".to_string())));
        assert_eq!(eval("2 % 3"), Err(FormulaError::UnexpectedChar('%', 2)));
        assert_eq!(eval("1.2.3"), Err(FormulaError::InvalidNumber("1.2.3".to_string())));
    }
}
