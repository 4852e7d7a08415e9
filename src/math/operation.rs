use num_traits::{Signed, ToPrimitive, Zero};

use super::Num;
use crate::error::{CalcError, Result};

/// Binding strength of an operator; `High` binds tighter than `Low`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Low,
    High,
}

#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::And,
        Operation::Or,
        Operation::Xor,
    ];

    pub fn char(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Sub => '-',
            Operation::Mul => '*',
            Operation::Div => '/',
            Operation::And => '&',
            Operation::Or => '|',
            Operation::Xor => '^',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operation::Add),
            '-' => Some(Operation::Sub),
            '*' => Some(Operation::Mul),
            '/' => Some(Operation::Div),
            '&' => Some(Operation::And),
            '|' => Some(Operation::Or),
            '^' => Some(Operation::Xor),
            _ => None,
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Operation::Mul | Operation::Div | Operation::And => Precedence::High,
            Operation::Add | Operation::Sub | Operation::Or | Operation::Xor => Precedence::Low,
        }
    }

    pub fn apply(&self, left: &Num, right: &Num) -> Result<Num> {
        let result = match self {
            Operation::Add => left + right,
            Operation::Sub => left - right,
            Operation::Mul => left * right,
            Operation::Div => {
                if right.is_zero() {
                    return Err(CalcError::DivisionByZero(left.clone()));
                }
                left / right
            }
            Operation::And => num!(truncate(left)? & truncate(right)?, 1),
            Operation::Or => num!(truncate(left)? | truncate(right)?, 1),
            Operation::Xor => num!(truncate(left)? ^ truncate(right)?, 1),
        };
        Ok(result)
    }
}

/// Integer part of a non-negative rational that fits in 64 bits.
fn truncate(n: &Num) -> Result<u64> {
    if n.is_negative() {
        return Err(CalcError::TruncationOverflow(n.clone()));
    }
    n.to_integer()
        .to_u64()
        .ok_or_else(|| CalcError::TruncationOverflow(n.clone()))
}

#[test]
fn symbol_test() {
    for op in Operation::ALL {
        assert_eq!(Operation::from_char(op.char()), Some(op));
    }
    assert_eq!(Operation::from_char('%'), None);
}

#[test]
fn precedence_test() {
    assert!(Precedence::High > Precedence::Low);
    assert_eq!(Operation::And.precedence(), Precedence::High);
    assert_eq!(Operation::Xor.precedence(), Precedence::Low);
}

#[test]
fn arithmetic_test() {
    assert_eq!(Operation::Add.apply(&num!(1, 2), &num!(1, 3)).unwrap(), num!(5, 6));
    assert_eq!(Operation::Sub.apply(&num!(1, 2), &num!(1, 3)).unwrap(), num!(1, 6));
    assert_eq!(Operation::Mul.apply(&num!(2, 3), &num!(3, 4)).unwrap(), num!(1, 2));
    assert_eq!(Operation::Div.apply(&num!(1, 1), &num!(5, 10)).unwrap(), num!(2, 1));
}

#[test]
fn divide_by_zero_test() {
    assert_eq!(
        Operation::Div.apply(&num!(7, 1), &num!(0, 1)),
        Err(CalcError::DivisionByZero(num!(7, 1)))
    );
}

#[test]
fn bitwise_truncates_test() {
    assert_eq!(Operation::And.apply(&num!(12, 1), &num!(10, 1)).unwrap(), num!(8, 1));
    assert_eq!(Operation::Or.apply(&num!(12, 1), &num!(3, 1)).unwrap(), num!(15, 1));
    assert_eq!(Operation::Xor.apply(&num!(12, 1), &num!(10, 1)).unwrap(), num!(6, 1));
    // 7/2 truncates to 3
    assert_eq!(Operation::Or.apply(&num!(7, 2), &num!(4, 1)).unwrap(), num!(7, 1));
    assert_eq!(
        Operation::And.apply(&num!(u64::MAX, 1), &num!(u64::MAX, 1)).unwrap(),
        num!(u64::MAX, 1)
    );
}

#[test]
fn bitwise_overflow_test() {
    assert_eq!(
        Operation::And.apply(&num!(-1, 1), &num!(1, 1)),
        Err(CalcError::TruncationOverflow(num!(-1, 1)))
    );
    let big = num!(u64::MAX, 1) + num!(1, 1);
    assert_eq!(
        Operation::Xor.apply(&num!(1, 1), &big),
        Err(CalcError::TruncationOverflow(big.clone()))
    );
    // negative fractions are rejected too, even when they would truncate to zero
    assert!(Operation::Or.apply(&num!(-1, 2), &num!(1, 1)).is_err());
}
