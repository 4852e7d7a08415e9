use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{Signed, Zero};

use super::{base::NumberBase, Num, NumComponent};

// exponents beyond this are refused rather than expanded into huge powers of ten
const MAX_EXPONENT: u32 = 4096;

/// Parses the textual forms a rational may take outside of a formula:
/// `a/b` fractions and decimal numbers such as `-1.25`, `.5` or `1.5e3`.
pub fn parse(s: &str) -> Option<Num> {
    let s = s.trim();
    if let Some((numer, denom)) = s.split_once('/') {
        let numer = NumComponent::from_str(numer.trim()).ok()?;
        let denom = NumComponent::from_str(denom.trim()).ok()?;
        if denom.is_zero() {
            return None;
        }
        return Some(Num::new(numer, denom));
    }
    parse_decimal(s)
}

fn parse_decimal(s: &str) -> Option<Num> {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int, fract) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int.is_empty() && fract.is_empty() {
        return None;
    }
    if !int.bytes().chain(fract.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let int = if int.is_empty() {
        Num::zero()
    } else {
        num!(NumComponent::from_str(int).ok()?, 1)
    };
    let mut n = int + parse_fract(fract)?;

    if let Some(exponent) = exponent {
        let exponent = i32::from_str(exponent).ok()?;
        if exponent.unsigned_abs() > MAX_EXPONENT {
            return None;
        }
        let scale = num!(NumComponent::from(10).pow(exponent.unsigned_abs()), 1);
        n = if exponent < 0 { n / scale } else { n * scale };
    }

    Some(if negative { -n } else { n })
}

// digits after the point, so "05" is 5/100
fn parse_fract(s: &str) -> Option<Num> {
    if s.is_empty() {
        return Some(Num::zero());
    }
    let comp = NumComponent::from_str(s).ok()?;
    let bound = NumComponent::from(10).pow(s.len() as u32);
    Some(Num::new(comp, bound))
}

/// Positional rendering in `base`, cut off after `max_fractional_places` digits.
pub fn fmt(n: &Num, base: NumberBase, max_fractional_places: u32) -> String {
    if n.is_negative() {
        return format!("-{}", fmt(&-n, base, max_fractional_places));
    }
    if n.is_integer() {
        fmt_int(&n.to_integer(), base)
    } else {
        let fract = fmt_fract(n.fract(), base, max_fractional_places);
        fmt_int(&n.to_integer(), base) + "." + fract.as_str()
    }
}

/// Fraction rendering, `numer/denom` in `base`, or just the integer.
pub fn fmt_ratio(n: &Num, base: NumberBase) -> String {
    if n.is_integer() {
        fmt_int(n.numer(), base)
    } else {
        format!("{}/{}", fmt_int(n.numer(), base), fmt_int(n.denom(), base))
    }
}

fn fmt_int(n: &NumComponent, base: NumberBase) -> String {
    let sign = if n.is_negative() { "-" } else { "" };
    format!("{sign}{}{}", base.prefix(), digits(n.magnitude(), base))
}

fn digits(n: &BigUint, base: NumberBase) -> String {
    n.to_str_radix(base.place_value()).to_uppercase()
}

fn fmt_fract(n: Num, base: NumberBase, max_places: u32) -> String {
    let mut out = String::new();
    let mut n = n;
    let placevalue = num!(base.place_value(), 1);

    for _ in 0..max_places {
        n = n * placevalue.clone(); // shift a single digit into the integer part
        out += digits(n.trunc().to_integer().magnitude(), base).as_str();
        n = n.fract();
        if n.is_zero() {
            break;
        }
    }

    out
}

#[test]
fn fmt_test() {
    assert_eq!(fmt(&num!(1, 3), NumberBase::Decimal, 8), "0.33333333");
    assert_eq!(fmt(&num!(1, 2), NumberBase::Binary, 32), "0b0.1");
    assert_eq!(fmt(&num!(7, 1), NumberBase::Hexadecimal, 32), "0x7");
    assert_eq!(fmt(&num!(1, 4), NumberBase::Binary, 32), "0b0.01");
    assert_eq!(fmt(&num!(-21, 2), NumberBase::Decimal, 32), "-10.5");
    assert_eq!(fmt(&num!(9, 8), NumberBase::Octal, 32), "0o1.1");
    assert_eq!(fmt(&num!(-687, 16), NumberBase::Hexadecimal, 32), "-0x2A.F");
}

#[test]
fn fmt_ratio_test() {
    assert_eq!(fmt_ratio(&num!(3, 2), NumberBase::Decimal), "3/2");
    assert_eq!(fmt_ratio(&num!(255, 1), NumberBase::Hexadecimal), "0xFF");
    assert_eq!(fmt_ratio(&num!(-1, 2), NumberBase::Binary), "-0b1/0b10");
    assert_eq!(fmt_ratio(&num!(171, 16), NumberBase::Hexadecimal), "0xAB/0x10");
    assert_eq!(fmt_ratio(&num!(-63, 1), NumberBase::Octal), "-0o77");
}

#[test]
fn parse_test() {
    assert_eq!(parse("3.14159"), Some(num!(314159, 100000)));
    assert_eq!(parse("0.05"), Some(num!(1, 20)));
    assert_eq!(parse(".5"), Some(num!(1, 2)));
    assert_eq!(parse("3."), Some(num!(3, 1)));
    assert_eq!(parse("-1.25"), Some(num!(-5, 4)));
    assert_eq!(parse("3/2"), Some(num!(3, 2)));
    assert_eq!(parse(" 6 / 4 "), Some(num!(3, 2)));
    assert_eq!(parse("1.5e3"), Some(num!(1500, 1)));
    assert_eq!(parse("2E-2"), Some(num!(1, 50)));
}

#[test]
fn parse_rejects_test() {
    assert_eq!(parse(""), None);
    assert_eq!(parse("."), None);
    assert_eq!(parse("1/0"), None);
    assert_eq!(parse("1.2.3"), None);
    assert_eq!(parse("abc"), None);
    assert_eq!(parse("1e"), None);
    assert_eq!(parse("1e99999"), None);
}
