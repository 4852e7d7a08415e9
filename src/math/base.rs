use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum NumberBase {
    Decimal,
    Binary,
    Octal,
    Hexadecimal,
}

impl NumberBase {
    pub fn place_value(&self) -> u32 {
        match self {
            NumberBase::Binary => 2,
            NumberBase::Octal => 8,
            NumberBase::Decimal => 10,
            NumberBase::Hexadecimal => 16,
        }
    }

    /// Prefix used when printing in this base.
    pub fn prefix(&self) -> &'static str {
        match self {
            NumberBase::Binary => "0b",
            NumberBase::Octal => "0o",
            NumberBase::Decimal => "",
            NumberBase::Hexadecimal => "0x",
        }
    }

    /// Splits a radix prefix off an unsigned integer literal.
    ///
    /// A bare leading `0` followed by more digits selects octal, as in C.
    pub fn detect(s: &str) -> (Self, &str) {
        let lower = |p: &str| s.len() > 2 && s.get(..2).is_some_and(|h| h.eq_ignore_ascii_case(p));
        if lower("0x") {
            (NumberBase::Hexadecimal, &s[2..])
        } else if lower("0b") {
            (NumberBase::Binary, &s[2..])
        } else if lower("0o") {
            (NumberBase::Octal, &s[2..])
        } else if s.len() > 1 && s.starts_with('0') {
            (NumberBase::Octal, &s[1..])
        } else {
            (NumberBase::Decimal, s)
        }
    }
}

#[test]
fn detect_test() {
    assert_eq!(NumberBase::detect("0xFF"), (NumberBase::Hexadecimal, "FF"));
    assert_eq!(NumberBase::detect("0B101"), (NumberBase::Binary, "101"));
    assert_eq!(NumberBase::detect("0o17"), (NumberBase::Octal, "17"));
    assert_eq!(NumberBase::detect("077"), (NumberBase::Octal, "77"));
    assert_eq!(NumberBase::detect("0"), (NumberBase::Decimal, "0"));
    assert_eq!(NumberBase::detect("42"), (NumberBase::Decimal, "42"));
    // a lone prefix has no digits to hand over
    assert_eq!(NumberBase::detect("0x"), (NumberBase::Octal, "x"));
}

#[test]
fn prefix_test() {
    assert_eq!(NumberBase::Binary.prefix(), "0b");
    assert_eq!(NumberBase::Octal.prefix(), "0o");
    assert_eq!(NumberBase::Decimal.prefix(), "");
    assert_eq!(NumberBase::Hexadecimal.prefix(), "0x");
    // every printed prefix reads back as the same base
    for base in [NumberBase::Binary, NumberBase::Octal, NumberBase::Hexadecimal] {
        let printed = format!("{}17", base.prefix());
        assert_eq!(NumberBase::detect(&printed), (base, "17"));
    }
}
