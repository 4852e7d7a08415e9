use crate::math::Num;

pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("could not parse literal in formula `{formula}`: {source}")]
    UnresolvedLiteral {
        formula: String,
        source: UnresolvedLiteral,
    },

    #[error("malformed formula `{formula}`: {reason}")]
    MalformedExpression { formula: String, reason: Malformed },

    #[error("attempted to divide {0} by zero")]
    DivisionByZero(Num),

    #[error("bitwise operand {0} does not truncate to an unsigned 64-bit integer")]
    TruncationOverflow(Num),
}

/// A token that is not a number, a known variable or a fallback name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("could not parse `{0}` as a rational")]
pub struct UnresolvedLiteral(pub String);

/// Why a formula failed to reduce to a single expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("empty expression")]
    Empty,
    #[error("missing an operand")]
    MissingOperand,
    #[error("missing an operator")]
    MissingOperator,
    #[error("missing a closing parenthesis")]
    MissingClosingParenthesis,
    #[error("unexpected closing parenthesis")]
    UnexpectedClosingParenthesis,
}

impl CalcError {
    pub(crate) fn malformed(formula: &str, reason: Malformed) -> Self {
        Self::MalformedExpression {
            formula: formula.to_owned(),
            reason,
        }
    }
}
