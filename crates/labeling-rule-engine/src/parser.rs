//! 条件表达式解析器
//!
//! 将规则的条件文本（如 `Price > 10 AND Product = "Chocolate"`）解析为
//! 结构化的表达式树。语法：
//!
//! ```text
//! expr      := term ( (AND|OR) term )*
//! term      := comparison | '(' expr ')'
//! comparison:= FIELD OP LITERAL
//! OP        := '=' | '!=' | '>' | '<' | '>=' | '<='
//! LITERAL   := 带引号字符串 | 数字 | true | false
//! ```
//!
//! 重要：`AND` 不比 `OR` 结合得更紧。链式条件严格从左到右折叠，
//! `A AND B OR C` 解析为 `((A AND B) OR C)`，与常规布尔优先级不同，
//! 这是规则书写时最常见的误解来源；需要其他结合方式时使用括号。
//!
//! 解析是确定性且幂等的：同一条件文本总是产出结构相同的表达式树。

use crate::error::{Result, RuleError};
use crate::models::{ComparisonOp, ConditionExpr, Literal, LogicalOp};

/// 词法单元
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Op(ComparisonOp),
    Literal(Literal),
    And,
    Or,
    LParen,
    RParen,
}

impl Token {
    /// 错误信息中的可读描述
    fn describe(&self) -> String {
        match self {
            Self::Ident(name) => format!("字段 '{}'", name),
            Self::Op(op) => format!("操作符 '{}'", op),
            Self::Literal(lit) => format!("字面量 {}", lit),
            Self::And => "'AND'".to_string(),
            Self::Or => "'OR'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
        }
    }
}

/// 解析条件文本为表达式树
pub fn parse(text: &str) -> Result<ConditionExpr> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(RuleError::Syntax("条件不能为空".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;

    if let Some(extra) = parser.peek() {
        return Err(RuleError::Syntax(format!(
            "条件存在多余内容，从 {} 开始",
            extra.describe()
        )));
    }

    Ok(expr)
}

/// 词法分析
fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' | '\'' => {
                let quote = c;
                chars.next();
                let mut s = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == quote {
                        closed = true;
                        break;
                    }
                    s.push(ch);
                }
                if !closed {
                    return Err(RuleError::Syntax("字符串未闭合".to_string()));
                }
                tokens.push(Token::Literal(Literal::String(s)));
            }
            '>' | '<' => {
                chars.next();
                let with_eq = chars.peek() == Some(&'=');
                if with_eq {
                    chars.next();
                }
                let op = match (c, with_eq) {
                    ('>', true) => ComparisonOp::Gte,
                    ('>', false) => ComparisonOp::Gt,
                    (_, true) => ComparisonOp::Lte,
                    (_, false) => ComparisonOp::Lt,
                };
                tokens.push(Token::Op(op));
            }
            '=' => {
                chars.next();
                tokens.push(Token::Op(ComparisonOp::Eq));
            }
            '!' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Op(ComparisonOp::Neq));
                } else {
                    return Err(RuleError::Syntax("'!' 之后缺少 '='".to_string()));
                }
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut s = String::new();
                s.push(c);
                chars.next();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        s.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let n: f64 = s
                    .parse()
                    .map_err(|_| RuleError::Syntax(format!("无效的数字: '{}'", s)))?;
                tokens.push(Token::Literal(Literal::Number(n)));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut s = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_alphanumeric() || d == '_' || d == '.' {
                        s.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match s.as_str() {
                    "AND" => tokens.push(Token::And),
                    "OR" => tokens.push(Token::Or),
                    "true" => tokens.push(Token::Literal(Literal::Bool(true))),
                    "false" => tokens.push(Token::Literal(Literal::Bool(false))),
                    _ => tokens.push(Token::Ident(s)),
                }
            }
            other => {
                return Err(RuleError::Syntax(format!(
                    "无法识别的字符: '{}'",
                    other
                )));
            }
        }
    }

    Ok(tokens)
}

/// 自左向右的递归下降解析器
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// expr := term ( (AND|OR) term )*
    ///
    /// 从左到右折叠，不区分 AND/OR 优先级
    fn parse_expr(&mut self) -> Result<ConditionExpr> {
        let mut left = self.parse_term()?;

        while let Some(op) = match self.peek() {
            Some(Token::And) => Some(LogicalOp::And),
            Some(Token::Or) => Some(LogicalOp::Or),
            _ => None,
        } {
            self.advance();
            let right = self.parse_term()?;
            left = ConditionExpr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// term := comparison | '(' expr ')'
    fn parse_term(&mut self) -> Result<ConditionExpr> {
        if self.peek() == Some(&Token::LParen) {
            self.advance();
            let expr = self.parse_expr()?;
            match self.advance() {
                Some(Token::RParen) => Ok(expr),
                _ => Err(RuleError::Syntax("括号未闭合".to_string())),
            }
        } else {
            self.parse_comparison()
        }
    }

    /// comparison := FIELD OP LITERAL
    fn parse_comparison(&mut self) -> Result<ConditionExpr> {
        let field = match self.advance() {
            Some(Token::Ident(name)) => name,
            Some(other) => {
                return Err(RuleError::Syntax(format!(
                    "期望字段名，实际为 {}",
                    other.describe()
                )));
            }
            None => return Err(RuleError::Syntax("期望字段名，条件提前结束".to_string())),
        };

        let op = match self.advance() {
            Some(Token::Op(op)) => op,
            Some(other) => {
                return Err(RuleError::Syntax(format!(
                    "期望比较操作符，实际为 {}",
                    other.describe()
                )));
            }
            None => {
                return Err(RuleError::Syntax(format!(
                    "字段 '{}' 之后缺少比较操作符",
                    field
                )));
            }
        };

        let literal = match self.advance() {
            Some(Token::Literal(lit)) => lit,
            Some(other) => {
                return Err(RuleError::Syntax(format!(
                    "期望字面量（带引号字符串、数字或布尔），实际为 {}",
                    other.describe()
                )));
            }
            None => {
                return Err(RuleError::Syntax(format!(
                    "'{} {}' 之后缺少字面量",
                    field, op
                )));
            }
        };

        Ok(ConditionExpr::Comparison { field, op, literal })
    }
}
