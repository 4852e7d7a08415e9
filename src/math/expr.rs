use std::fmt;

use num_traits::Zero;

use super::{operation::Operation, Num};
use crate::error::Result;

// Chains like `1+1+...+1` build trees as deep as they are long, so every
// walk below keeps its own stack instead of recursing.
pub enum Expr {
    Literal(Num),
    Binary {
        op: Operation,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

enum Step<'a> {
    Visit(&'a Expr),
    Apply(Operation),
}

enum Piece<'a> {
    Node(&'a Expr),
    Text(&'static str),
    Op(Operation),
}

impl Expr {
    pub fn binary(op: Operation, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluates the tree, left operand before right.
    pub fn value(&self) -> Result<Num> {
        let mut steps = vec![Step::Visit(self)];
        let mut values: Vec<Num> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Expr::Literal(n)) => values.push(n.clone()),
                Step::Visit(Expr::Binary { op, left, right }) => {
                    steps.push(Step::Apply(*op));
                    steps.push(Step::Visit(right));
                    steps.push(Step::Visit(left));
                }
                Step::Apply(op) => {
                    let (Some(right), Some(left)) = (values.pop(), values.pop()) else {
                        unreachable!("binary node evaluated without both operands");
                    };
                    values.push(op.apply(&left, &right)?);
                }
            }
        }

        match values.pop() {
            Some(n) => Ok(n),
            None => unreachable!("expression tree produced no value"),
        }
    }

    fn take(&mut self) -> Expr {
        std::mem::replace(self, Expr::Literal(Num::zero()))
    }
}

/// Fully parenthesized form, handy for seeing how a formula was grouped.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Node(Expr::Literal(n)) => write!(f, "{n}")?,
                Piece::Node(Expr::Binary { op, left, right }) => {
                    f.write_str("(")?;
                    pieces.push(Piece::Text(")"));
                    pieces.push(Piece::Node(right));
                    pieces.push(Piece::Op(*op));
                    pieces.push(Piece::Node(left));
                }
                Piece::Text(s) => f.write_str(s)?,
                Piece::Op(op) => write!(f, " {} ", op.char())?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({self})")
    }
}

// children are detached onto a heap stack so dropping never recurses
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let Expr::Binary { left, right, .. } = self {
            pending.push(left.take());
            pending.push(right.take());
        }
        while let Some(mut expr) = pending.pop() {
            if let Expr::Binary { left, right, .. } = &mut expr {
                pending.push(left.take());
                pending.push(right.take());
            }
        }
    }
}

#[cfg(test)]
fn lit(numer: i64, denom: i64) -> Expr {
    Expr::Literal(num!(numer, denom))
}

#[cfg(test)]
fn chain(op: Operation, len: usize) -> Expr {
    let mut expr = lit(1, 1);
    for _ in 1..len {
        expr = Expr::binary(op, expr, lit(1, 1));
    }
    expr
}

#[test]
fn value_test() {
    // (1/2 + 3) * 2
    let sum = Expr::binary(Operation::Add, lit(1, 2), lit(3, 1));
    let expr = Expr::binary(Operation::Mul, sum, lit(2, 1));
    assert_eq!(expr.value().unwrap(), num!(7, 1));
    assert_eq!(expr.to_string(), "((1/2 + 3) * 2)");
}

#[test]
fn value_keeps_operand_order_test() {
    // ((10 - 4) / 3) - 1
    let diff = Expr::binary(Operation::Sub, lit(10, 1), lit(4, 1));
    let quot = Expr::binary(Operation::Div, diff, lit(3, 1));
    let expr = Expr::binary(Operation::Sub, quot, lit(1, 1));
    assert_eq!(expr.value().unwrap(), num!(1, 1));
    assert_eq!(expr.to_string(), "(((10 - 4) / 3) - 1)");
}

#[test]
fn value_propagates_errors_test() {
    let quot = Expr::binary(Operation::Div, lit(1, 1), lit(0, 1));
    let expr = Expr::binary(Operation::Add, lit(1, 1), quot);
    assert_eq!(
        expr.value(),
        Err(crate::error::CalcError::DivisionByZero(num!(1, 1)))
    );
}

#[test]
fn deep_tree_test() {
    let expr = chain(Operation::Add, 200_000);
    assert_eq!(expr.value().unwrap(), num!(200_000, 1));
    let shown = expr.to_string();
    assert!(shown.starts_with("(((("));
    assert!(shown.ends_with(" + 1)"));
    drop(expr);
}
