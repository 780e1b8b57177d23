//! Stand-in for the external expression collaborator.
//!
//! Understands sums and products of numbers and names, unary minus,
//! parentheses, `sum(..)` (sum over time) and `expec(..)` (expectation over
//! scenarios). `a.b` is a component-scoped reference. Names are classified as
//! parameters or variables through the structure provider.

use std::sync::Arc;

use gems_core::IndexingStructure;

use crate::error::ModelResult;
use crate::expression::{Degree, Expression, ExpressionParser, ExpressionRef};
use crate::provider::IndexingStructureProvider;

#[derive(Debug, Clone, PartialEq)]
enum Term {
    Number(f64),
    Name(String),
    Scoped(String, String),
    Neg(Box<Term>),
    Add(Vec<Term>),
    Mul(Vec<Term>),
    TimeSum(Box<Term>),
    Expectation(Box<Term>),
}

/// Parsed stand-in expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TermExpression {
    text: String,
    term: Term,
}

impl TermExpression {
    pub fn parse(text: &str) -> Result<Self, String> {
        let tokens = tokenize(text)?;
        let mut parser = Parser { tokens, pos: 0 };
        let term = parser.sum()?;
        if parser.pos != parser.tokens.len() {
            return Err(format!("unexpected trailing input in '{text}'"));
        }
        Ok(Self {
            text: text.to_string(),
            term,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Expression for TermExpression {
    fn degree(&self, provider: &dyn IndexingStructureProvider) -> ModelResult<Degree> {
        degree(&self.term, provider)
    }

    fn indexing_structure(
        &self,
        provider: &dyn IndexingStructureProvider,
    ) -> ModelResult<IndexingStructure> {
        structure(&self.term, provider)
    }
}

/// Parser producing [`TermExpression`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermParser;

impl ExpressionParser for TermParser {
    fn parse(&self, text: &str) -> Result<ExpressionRef, String> {
        Ok(Arc::new(TermExpression::parse(text)?))
    }
}

/// Parse `text`, panicking on malformed input. Test helper.
pub fn expr(text: &str) -> ExpressionRef {
    match TermExpression::parse(text) {
        Ok(e) => Arc::new(e),
        Err(message) => panic!("invalid test expression '{text}': {message}"),
    }
}

fn degree(term: &Term, provider: &dyn IndexingStructureProvider) -> ModelResult<Degree> {
    Ok(match term {
        Term::Number(_) => Degree::Constant,
        Term::Name(name) => match provider.parameter_structure(name) {
            Ok(_) => Degree::Constant,
            Err(_) => provider.variable_structure(name).map(|_| Degree::Linear)?,
        },
        Term::Scoped(component, name) => {
            match provider.component_parameter_structure(component, name) {
                Ok(_) => Degree::Constant,
                Err(_) => provider
                    .component_variable_structure(component, name)
                    .map(|_| Degree::Linear)?,
            }
        }
        Term::Neg(inner) | Term::TimeSum(inner) | Term::Expectation(inner) => {
            degree(inner, provider)?
        }
        Term::Add(terms) => {
            let mut acc = Degree::Constant;
            for t in terms {
                acc = acc.max(degree(t, provider)?);
            }
            acc
        }
        Term::Mul(terms) => {
            let mut acc = Degree::Constant;
            for t in terms {
                acc = match (acc, degree(t, provider)?) {
                    (Degree::Constant, d) | (d, Degree::Constant) => d,
                    _ => Degree::NonLinear,
                };
            }
            acc
        }
    })
}

fn structure(
    term: &Term,
    provider: &dyn IndexingStructureProvider,
) -> ModelResult<IndexingStructure> {
    Ok(match term {
        Term::Number(_) => IndexingStructure::CONSTANT,
        Term::Name(name) => match provider.parameter_structure(name) {
            Ok(s) => s,
            Err(_) => provider.variable_structure(name)?,
        },
        Term::Scoped(component, name) => {
            match provider.component_parameter_structure(component, name) {
                Ok(s) => s,
                Err(_) => provider.component_variable_structure(component, name)?,
            }
        }
        Term::Neg(inner) => structure(inner, provider)?,
        Term::Add(terms) | Term::Mul(terms) => {
            let mut acc = IndexingStructure::CONSTANT;
            for t in terms {
                acc = acc | structure(t, provider)?;
            }
            acc
        }
        Term::TimeSum(inner) => IndexingStructure {
            time: false,
            ..structure(inner, provider)?
        },
        Term::Expectation(inner) => IndexingStructure {
            scenario: false,
            ..structure(inner, provider)?
        },
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Open,
    Close,
}

fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '(' | ')' => {
                chars.next();
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '(' => Token::Open,
                    _ => Token::Close,
                });
            }
            c if c.is_ascii_digit() => {
                let mut s = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        s.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = s.parse().map_err(|_| format!("invalid number '{s}'"))?;
                tokens.push(Token::Number(value));
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
                tokens.push(Token::Ident(s));
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn sum(&mut self) -> Result<Term, String> {
        let mut terms = vec![self.product()?];
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    terms.push(self.product()?);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    terms.push(Term::Neg(Box::new(self.product()?)));
                }
                _ => break,
            }
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Term::Add(terms)
        })
    }

    fn product(&mut self) -> Result<Term, String> {
        let mut factors = vec![self.factor()?];
        while self.peek() == Some(&Token::Star) {
            self.pos += 1;
            factors.push(self.factor()?);
        }
        Ok(if factors.len() == 1 {
            factors.remove(0)
        } else {
            Term::Mul(factors)
        })
    }

    fn factor(&mut self) -> Result<Term, String> {
        match self.next() {
            Some(Token::Number(v)) => Ok(Term::Number(v)),
            Some(Token::Minus) => Ok(Term::Neg(Box::new(self.factor()?))),
            Some(Token::Open) => {
                let inner = self.sum()?;
                self.expect_close()?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::Open) {
                    self.pos += 1;
                    let inner = Box::new(self.sum()?);
                    self.expect_close()?;
                    return match name.as_str() {
                        "sum" => Ok(Term::TimeSum(inner)),
                        "expec" => Ok(Term::Expectation(inner)),
                        other => Err(format!("unknown function '{other}'")),
                    };
                }
                match name.split_once('.') {
                    Some((component, member)) => {
                        Ok(Term::Scoped(component.to_string(), member.to_string()))
                    }
                    None => Ok(Term::Name(name)),
                }
            }
            Some(token) => Err(format!("unexpected token {token:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn expect_close(&mut self) -> Result<(), String> {
        match self.next() {
            Some(Token::Close) => Ok(()),
            _ => Err("expected ')'".to_string()),
        }
    }
}
