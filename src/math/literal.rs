use num_traits::Num as _;

use super::{base::NumberBase, parsefmt, Fallback, Num, NumComponent, Variables};
use crate::error::UnresolvedLiteral;

/// Where names in a formula get their values from.
#[derive(Clone, Copy, Default)]
pub struct Resolver<'a> {
    pub variables: Option<&'a Variables>,
    pub fallback: Option<Fallback<'a>>,
}

impl<'a> Resolver<'a> {
    pub fn new(variables: Option<&'a Variables>, fallback: Option<Fallback<'a>>) -> Self {
        Self { variables, fallback }
    }

    /// Turns one text token into a value, trying in order: an integer with an
    /// optional radix prefix, a fraction or decimal, a variable, the fallback.
    pub fn resolve(&self, text: &str) -> Result<Num, UnresolvedLiteral> {
        let s = text.trim();

        if let Some(int) = parse_int(s) {
            return Ok(num!(int, 1));
        }
        if let Some(n) = parsefmt::parse(s) {
            return Ok(n);
        }
        if let Some(n) = self.variables.and_then(|vars| vars.get(s)) {
            return Ok(n.clone());
        }
        if let Some(n) = self.fallback.and_then(|fallback| fallback(s)) {
            return Ok(n);
        }

        Err(UnresolvedLiteral(s.to_owned()))
    }
}

/// Integer literal in any base `NumberBase::detect` understands, with an
/// optional sign and `_` separators between digits.
pub fn parse_int(s: &str) -> Option<NumComponent> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (base, digits) = NumberBase::detect(unsigned);
    if digits.starts_with(['+', '-', '_']) || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    let int = NumComponent::from_str_radix(digits, base.place_value()).ok()?;
    Some(if negative { -int } else { int })
}

#[cfg(test)]
mod tests_support {
    use super::*;

    pub fn vars() -> Variables {
        Variables::from([
            ("one".to_owned(), num!(100, 1)),
            ("two".to_owned(), num!(200, 1)),
            ("half".to_owned(), num!(1, 2)),
        ])
    }
}

#[test]
fn int_bases_test() {
    assert_eq!(parse_int("255"), Some(NumComponent::from(255)));
    assert_eq!(parse_int("0xFF"), Some(NumComponent::from(255)));
    assert_eq!(parse_int("0Xff"), Some(NumComponent::from(255)));
    assert_eq!(parse_int("077"), Some(NumComponent::from(63)));
    assert_eq!(parse_int("0o77"), Some(NumComponent::from(63)));
    assert_eq!(parse_int("0b1010"), Some(NumComponent::from(10)));
    assert_eq!(parse_int("-0x10"), Some(NumComponent::from(-16)));
    assert_eq!(parse_int("1_000"), Some(NumComponent::from(1000)));
    assert_eq!(parse_int("0"), Some(NumComponent::from(0)));
}

#[test]
fn int_rejects_test() {
    assert_eq!(parse_int("0xXX"), None);
    assert_eq!(parse_int("08"), None);
    assert_eq!(parse_int("0x"), None);
    assert_eq!(parse_int("--1"), None);
    assert_eq!(parse_int("0x-1"), None);
    assert_eq!(parse_int("1_"), None);
    assert_eq!(parse_int(""), None);
    assert_eq!(parse_int("1.5"), None);
}

#[test]
fn resolve_order_test() {
    let vars = tests_support::vars();
    let fallback = |name: &str| (name == "three" || name == "one").then(|| num!(300, 1));
    let resolver = Resolver::new(Some(&vars), Some(&fallback));

    assert_eq!(resolver.resolve("  0x10 "), Ok(num!(16, 1)));
    // "08" is not octal but is still a fine decimal
    assert_eq!(resolver.resolve("08"), Ok(num!(8, 1)));
    assert_eq!(resolver.resolve("1.5"), Ok(num!(3, 2)));
    assert_eq!(resolver.resolve(" one"), Ok(num!(100, 1)));
    assert_eq!(resolver.resolve("three"), Ok(num!(300, 1)));
    assert_eq!(
        resolver.resolve("four"),
        Err(UnresolvedLiteral("four".to_owned()))
    );
}

#[test]
fn resolve_without_sources_test() {
    let resolver = Resolver::default();
    assert_eq!(resolver.resolve("42"), Ok(num!(42, 1)));
    assert_eq!(
        resolver.resolve(" unknownVar "),
        Err(UnresolvedLiteral("unknownVar".to_owned()))
    );
}

#[test]
fn resolve_calls_fallback_once_test() {
    let calls = std::cell::Cell::new(0);
    let fallback = |_: &str| -> Option<Num> {
        calls.set(calls.get() + 1);
        None
    };
    let resolver = Resolver::new(None, Some(&fallback));
    assert!(resolver.resolve("nope").is_err());
    assert_eq!(calls.get(), 1);
}

#[test]
fn resolve_copies_variables_test() {
    let mut vars = tests_support::vars();
    let resolved = Resolver::new(Some(&vars), None).resolve("half").unwrap();
    vars.insert("half".to_owned(), num!(0, 1));
    assert_eq!(resolved, num!(1, 2));
}
