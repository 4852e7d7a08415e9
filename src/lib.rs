//! Exact rational formula evaluation.
//!
//! A formula is split into tokens, grouped into a tree by operator
//! precedence and parentheses, and evaluated over arbitrary precision
//! rationals. `* / &` bind tighter than `+ - | ^`, and equal precedence
//! associates to the left.

pub mod calc;
pub mod config;
pub mod error;
pub mod math;
pub mod vars;

pub use calc::{calc, calc_with, parse};
pub use error::{CalcError, Malformed, Result, UnresolvedLiteral};
pub use math::{literal::Resolver, Fallback, Num, NumComponent, Variables};
