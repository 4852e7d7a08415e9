use log::{debug, trace};

use crate::error::Result;
use crate::math::{
    builder::Builder, expr::Expr, literal::Resolver, token::tokenize, Fallback, Num, Variables,
};

/// Evaluates `formula` exactly.
///
/// Names that are not numeric literals are looked up in `variables` first,
/// then handed to `fallback`. Either may be `None`.
///
/// ```
/// use ratcalc::{calc, Num, Variables};
///
/// let vars = Variables::from([("one".to_owned(), Num::from_integer(100.into()))]);
/// let n = calc("(one + 0x10) / 3", Some(&vars), None).unwrap();
/// assert_eq!(n.to_string(), "116/3");
/// ```
pub fn calc(
    formula: &str,
    variables: Option<&Variables>,
    fallback: Option<Fallback<'_>>,
) -> Result<Num> {
    calc_with(formula, &Resolver::new(variables, fallback))
}

pub fn calc_with(formula: &str, resolver: &Resolver<'_>) -> Result<Num> {
    parse(formula, resolver)?.value()
}

/// Builds the expression tree for `formula` without evaluating it.
pub fn parse(formula: &str, resolver: &Resolver<'_>) -> Result<Expr> {
    let tokens = tokenize(formula);
    trace!("tokens of `{formula}`: {tokens:?}");

    let expr = Builder::new(formula, *resolver).build(tokens)?;
    debug!("`{formula}` groups as {expr}");
    Ok(expr)
}
