//! Normalization of loosely-typed numeric input into `BigUint`.
//!
//! Quantities, block numbers, moduli and delays arrive as native integers,
//! decimal or hex strings, fixed-point decimals (`"25.000"`) or scientific
//! notation (`"1e18"`). Everything funnels through [`parse_biguint`] so the
//! rest of the engine only ever sees exact non-negative integers.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::constants::MAX_DECIMAL_EXPONENT;
use crate::InputErr;

/// Numeric input in any accepted representation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Numberish {
    Int(u128),
    /// Native signed input; negative values are rejected on normalization
    Signed(i128),
    Text(String),
    Big(BigUint),
}

impl Numberish {
    /// Exact non-negative integer value.
    ///
    /// # Errors
    /// Any `InputErr` from [`parse_biguint`], or `Negative` for a negative
    /// native value.
    pub fn normalize(&self) -> Result<BigUint, InputErr> {
        match self {
            Self::Int(v) => Ok(BigUint::from(*v)),
            Self::Signed(v) => u128::try_from(*v)
                .map(BigUint::from)
                .map_err(|_| InputErr::Negative(v.to_string())),
            Self::Text(s) => parse_biguint(s),
            Self::Big(b) => Ok(b.clone()),
        }
    }

    /// Normalize and narrow to `u64`.
    ///
    /// # Errors
    /// As [`Numberish::normalize`], plus `OutOfRange` above `u64::MAX`.
    pub fn to_u64(&self) -> Result<u64, InputErr> {
        let value = self.normalize()?;
        value
            .to_u64()
            .ok_or_else(|| InputErr::OutOfRange(value.to_string()))
    }
}

macro_rules! numberish_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Numberish {
            fn from(v: $t) -> Self {
                Self::Int(u128::from(v))
            }
        }
    )*};
}

macro_rules! numberish_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Numberish {
            fn from(v: $t) -> Self {
                Self::Signed(i128::from(v))
            }
        }
    )*};
}

numberish_from_unsigned!(u8, u16, u32, u64, u128);
numberish_from_signed!(i8, i16, i32, i64, i128);

impl From<&str> for Numberish {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Numberish {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<BigUint> for Numberish {
    fn from(b: BigUint) -> Self {
        Self::Big(b)
    }
}

/// Parse a non-negative integer from text.
///
/// Accepts, after trimming whitespace and dropping `_` separators:
/// - decimal: `"1000"`, `"+1000"`
/// - hex: `"0x3e8"`
/// - fixed-point with an all-zero fraction: `"1000.00"`
/// - scientific notation with an integral value: `"1e3"`, `"1.5e3"`
///
/// # Errors
/// - `Empty`: nothing but whitespace
/// - `Negative`: leading `-` on a non-zero value
/// - `Fractional`: a non-zero fractional part remains
/// - `NotANumber`: anything else, including non-zero values with exponents
///   beyond `MAX_DECIMAL_EXPONENT`
pub fn parse_biguint(input: &str) -> Result<BigUint, InputErr> {
    let cleaned: String = input.trim().chars().filter(|ch| *ch != '_').collect();
    if cleaned.is_empty() {
        return Err(InputErr::Empty);
    }

    let (negative, body) = match cleaned.as_bytes()[0] {
        b'-' => (true, &cleaned[1..]),
        b'+' => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };

    let magnitude = if let Some(digits) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        parse_radix(digits, 16).ok_or_else(|| InputErr::NotANumber(input.to_string()))?
    } else {
        parse_decimal(body, input)?
    };

    if negative && !magnitude.is_zero() {
        return Err(InputErr::Negative(input.to_string()));
    }
    Ok(magnitude)
}

fn parse_radix(digits: &str, radix: u32) -> Option<BigUint> {
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}

/// `mantissa[.fraction][e[+-]exponent]`
fn parse_decimal(body: &str, original: &str) -> Result<BigUint, InputErr> {
    let not_a_number = || InputErr::NotANumber(original.to_string());

    let (mantissa, exponent) = match body.find(|ch: char| ch == 'e' || ch == 'E') {
        Some(pos) => {
            let exp: i64 = body[pos + 1..].parse().map_err(|_| not_a_number())?;
            (&body[..pos], exp)
        }
        None => (body, 0),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(not_a_number());
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(not_a_number());
    }

    let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let frac_len = i64::try_from(frac_part.len()).map_err(|_| not_a_number())?;
    let scale = exponent.checked_sub(frac_len).ok_or_else(not_a_number)?;

    if scale < 0 {
        let drop = usize::try_from(scale.unsigned_abs()).map_err(|_| not_a_number())?;
        let cut = digits.len().saturating_sub(drop);
        if digits[cut..].iter().any(|d| *d != b'0') {
            return Err(InputErr::Fractional(original.to_string()));
        }
        digits.truncate(cut);
    }
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }

    let value = BigUint::parse_bytes(&digits, 10).ok_or_else(not_a_number)?;
    if value.is_zero() {
        return Ok(value);
    }
    if scale > 0 {
        let pow = u32::try_from(scale)
            .ok()
            .filter(|p| *p <= MAX_DECIMAL_EXPONENT)
            .ok_or_else(not_a_number)?;
        Ok(value * BigUint::from(10u32).pow(pow))
    } else {
        Ok(value)
    }
}
