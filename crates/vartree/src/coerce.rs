//! String-to-number coercion used by the numeric accessors.
//!
//! Leading whitespace is skipped. The rest of the input must be a decimal
//! literal: an optional sign followed by digits for integers, or anything
//! `str::parse` accepts for floats (including `inf` and `NaN`). Any trailing
//! character, whitespace included, is a format error. Integers are parsed as
//! `i128` first, then range-checked against the target width. A non-zero
//! float literal too small for a normal value of the target width is out of
//! range, like one too large.

use std::fmt::{Display, LowerExp};
use std::num::{FpCategory, IntErrorKind};
use std::str::FromStr;

use crate::error::{Bound, Result, VarError};
use crate::kind::Kind;

pub(crate) trait Integer: Copy + Display + TryFrom<i128> {
    const KIND: Kind;
    const MIN: Self;
    const MAX: Self;
}

macro_rules! integer {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Integer for $t {
                const KIND: Kind = Kind::$kind;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
            }
        )*
    };
}

integer! {
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
}

pub(crate) trait Floating: Copy + FromStr + LowerExp {
    const MAX: Self;
    const MIN: Self;
    const MIN_POSITIVE: Self;
    fn classify(self) -> FpCategory;
}

impl Floating for f32 {
    const MAX: Self = f32::MAX;
    const MIN: Self = f32::MIN;
    const MIN_POSITIVE: Self = f32::MIN_POSITIVE;
    fn classify(self) -> FpCategory {
        f32::classify(self)
    }
}

impl Floating for f64 {
    const MAX: Self = f64::MAX;
    const MIN: Self = f64::MIN;
    const MIN_POSITIVE: Self = f64::MIN_POSITIVE;
    fn classify(self) -> FpCategory {
        f64::classify(self)
    }
}

pub(crate) fn parse_integer<T: Integer>(input: &str) -> Result<T> {
    let wide = skip_leading_space(input).parse::<i128>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => overflow(input, T::KIND, Bound::Max(T::MAX.to_string())),
        IntErrorKind::NegOverflow => overflow(input, T::KIND, Bound::Min(T::MIN.to_string())),
        _ => malformed(input, T::KIND),
    })?;

    T::try_from(wide).map_err(|_| {
        let bound = if wide < 0 {
            Bound::Min(T::MIN.to_string())
        } else {
            Bound::Max(T::MAX.to_string())
        };
        overflow(input, T::KIND, bound)
    })
}

/// `target` is passed explicitly because `f64` backs two kinds.
pub(crate) fn parse_floating<T: Floating>(input: &str, target: Kind) -> Result<T> {
    let literal = skip_leading_space(input);
    let value = literal.parse::<T>().map_err(|_| malformed(input, target))?;

    match value.classify() {
        // A finite literal that rounds to infinity is out of range; a
        // spelled-out infinity is accepted as is.
        FpCategory::Infinite if !spells_infinity(literal) => {
            let bound = if literal.starts_with('-') {
                Bound::Min(format!("{:e}", T::MIN))
            } else {
                Bound::Max(format!("{:e}", T::MAX))
            };
            Err(overflow(input, target, bound))
        }
        FpCategory::Zero | FpCategory::Subnormal if has_nonzero_mantissa(literal) => Err(
            overflow(input, target, Bound::Min(format!("{:e}", T::MIN_POSITIVE))),
        ),
        _ => Ok(value),
    }
}

/// Whitespace as C's `isspace` sees it, vertical tab included.
fn skip_leading_space(input: &str) -> &str {
    input.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\u{b}')
}

fn spells_infinity(literal: &str) -> bool {
    let digits = literal.trim_start_matches(['+', '-']);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

fn has_nonzero_mantissa(literal: &str) -> bool {
    literal
        .split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.bytes().any(|b| (b'1'..=b'9').contains(&b)))
}

fn malformed(input: &str, target: Kind) -> VarError {
    VarError::NumericFormat {
        input: input.to_string(),
        target,
    }
}

fn overflow(input: &str, target: Kind, bound: Bound) -> VarError {
    VarError::NumericOverflow {
        input: input.to_string(),
        target,
        bound,
    }
}
