use super::{expr::Expr, literal::Resolver, operation::Operation, token::Token};
use crate::error::{CalcError, Malformed, Result};

// operators waiting outside an open parenthesis, and how many nodes
// already existed when it was opened
struct Bracket {
    ops: Vec<Operation>,
    floor: usize,
}

/// Builds an expression tree from tokens with an operator stack and a node stack.
///
/// Each `(` parks the current operator stack and starts an empty one, so
/// nothing outside the parenthesis is reduced against anything inside it.
/// An incoming operator first reduces every stacked operator that binds at
/// least as tightly, which makes equal precedence associate to the left.
pub struct Builder<'a> {
    formula: &'a str,
    resolver: Resolver<'a>,
    ops: Vec<Operation>,
    nodes: Vec<Expr>,
    brackets: Vec<Bracket>,
}

impl<'a> Builder<'a> {
    pub fn new(formula: &'a str, resolver: Resolver<'a>) -> Self {
        Self {
            formula,
            resolver,
            ops: Vec::new(),
            nodes: Vec::new(),
            brackets: Vec::new(),
        }
    }

    pub fn build(mut self, tokens: Vec<Token>) -> Result<Expr> {
        for token in tokens {
            match token {
                Token::Operator(op) => self.push_operator(op)?,
                Token::LeftParen => self.open_bracket(),
                Token::RightParen => self.close_bracket()?,
                Token::Text(text) => {
                    let n = self.resolver.resolve(&text).map_err(|source| {
                        CalcError::UnresolvedLiteral {
                            formula: self.formula.to_owned(),
                            source,
                        }
                    })?;
                    self.nodes.push(Expr::Literal(n));
                }
            }
        }

        if !self.brackets.is_empty() {
            return Err(self.malformed(Malformed::MissingClosingParenthesis));
        }
        self.reduce_all()?;

        match self.nodes.len() {
            0 => Err(self.malformed(Malformed::Empty)),
            1 => self.pop_node(),
            _ => Err(self.malformed(Malformed::MissingOperator)),
        }
    }

    fn push_operator(&mut self, op: Operation) -> Result<()> {
        while let Some(&top) = self.ops.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.ops.pop();
            self.reduce(top)?;
        }
        self.ops.push(op);
        Ok(())
    }

    fn open_bracket(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.brackets.push(Bracket {
            ops,
            floor: self.nodes.len(),
        });
    }

    fn close_bracket(&mut self) -> Result<()> {
        if self.brackets.is_empty() {
            return Err(self.malformed(Malformed::UnexpectedClosingParenthesis));
        }
        self.reduce_all()?;

        // the parenthesis must have produced exactly one node
        let floor = self.floor();
        match self.nodes.len() - floor {
            0 => return Err(self.malformed(Malformed::MissingOperand)),
            1 => {}
            _ => return Err(self.malformed(Malformed::MissingOperator)),
        }

        if let Some(bracket) = self.brackets.pop() {
            self.ops = bracket.ops;
        }
        Ok(())
    }

    fn reduce_all(&mut self) -> Result<()> {
        while let Some(op) = self.ops.pop() {
            self.reduce(op)?;
        }
        Ok(())
    }

    fn reduce(&mut self, op: Operation) -> Result<()> {
        let right = self.pop_node()?;
        let left = self.pop_node()?;
        self.nodes.push(Expr::binary(op, left, right));
        Ok(())
    }

    fn pop_node(&mut self) -> Result<Expr> {
        if self.nodes.len() <= self.floor() {
            return Err(self.malformed(Malformed::MissingOperand));
        }
        self.nodes
            .pop()
            .ok_or_else(|| self.malformed(Malformed::MissingOperand))
    }

    fn floor(&self) -> usize {
        self.brackets.last().map_or(0, |b| b.floor)
    }

    fn malformed(&self, reason: Malformed) -> CalcError {
        CalcError::malformed(self.formula, reason)
    }
}

#[cfg(test)]
fn build(formula: &str) -> Result<Expr> {
    Builder::new(formula, Resolver::default()).build(super::token::tokenize(formula))
}

#[cfg(test)]
fn grouping(formula: &str) -> String {
    build(formula).unwrap().to_string()
}

#[test]
fn precedence_grouping_test() {
    assert_eq!(grouping("1+2*3"), "(1 + (2 * 3))");
    assert_eq!(grouping("1*2+3"), "((1 * 2) + 3)");
    assert_eq!(grouping("1|2&3"), "(1 | (2 & 3))");
    assert_eq!(grouping("1-2*3+4"), "((1 - (2 * 3)) + 4)");
}

#[test]
fn left_associative_test() {
    assert_eq!(grouping("100/100/100"), "((100 / 100) / 100)");
    assert_eq!(grouping("1-2-3"), "((1 - 2) - 3)");
    assert_eq!(grouping("1^2|3+4"), "(((1 ^ 2) | 3) + 4)");
    assert_eq!(grouping("8*4&2/1"), "(((8 * 4) & 2) / 1)");
}

#[test]
fn parenthesis_grouping_test() {
    assert_eq!(grouping("(1+2)*3"), "((1 + 2) * 3)");
    assert_eq!(grouping("2*(3+4)-5"), "((2 * (3 + 4)) - 5)");
    assert_eq!(grouping("((7))"), "7");
    assert_eq!(grouping("((10/(100+100))+1)*10"), "(((10 / (100 + 100)) + 1) * 10)");
}

#[test]
fn malformed_test() {
    let reason = |formula: &str| match build(formula) {
        Err(CalcError::MalformedExpression { reason, .. }) => reason,
        other => panic!("expected a malformed expression for {formula:?}, got {other:?}"),
    };
    assert_eq!(reason(""), Malformed::Empty);
    assert_eq!(reason("  "), Malformed::Empty);
    assert_eq!(reason("+"), Malformed::MissingOperand);
    assert_eq!(reason("1+"), Malformed::MissingOperand);
    assert_eq!(reason("*2"), Malformed::MissingOperand);
    assert_eq!(reason("1+*2"), Malformed::MissingOperand);
    assert_eq!(reason("()"), Malformed::MissingOperand);
    assert_eq!(reason("1(+2)"), Malformed::MissingOperand);
    assert_eq!(reason("(1)(2)"), Malformed::MissingOperator);
    assert_eq!(reason("2(3)"), Malformed::MissingOperator);
    assert_eq!(reason("(1+2"), Malformed::MissingClosingParenthesis);
    assert_eq!(reason("1+2)"), Malformed::UnexpectedClosingParenthesis);
}

#[test]
fn unresolved_literal_carries_formula_test() {
    match build("1 + nope") {
        Err(CalcError::UnresolvedLiteral { formula, source }) => {
            assert_eq!(formula, "1 + nope");
            assert_eq!(source.0, "nope");
        }
        other => panic!("expected an unresolved literal, got {other:?}"),
    }
}
