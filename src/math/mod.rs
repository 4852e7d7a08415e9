macro_rules! num {
    ($numer:expr, $denom:expr) => {
        $crate::math::Num::new(
            $crate::math::NumComponent::from($numer),
            $crate::math::NumComponent::from($denom),
        )
    };
}

pub mod base;
pub mod builder;
pub mod expr;
pub mod literal;
pub mod operation;
pub mod parsefmt;
pub mod token;

use std::collections::HashMap;

pub type Num = num_rational::BigRational;
pub type NumComponent = num_bigint::BigInt;

/// Named values a formula may refer to. Read only during evaluation.
pub type Variables = HashMap<String, Num>;

/// Last-resort lookup for names that are neither literals nor variables.
pub type Fallback<'a> = &'a dyn Fn(&str) -> Option<Num>;
