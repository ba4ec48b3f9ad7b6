use std::{
    fmt,
    str::FromStr,
};

use num_bigint::BigInt;
use num_traits::{
    pow,
    Signed,
    Zero,
};

use super::code::Operable;

pub const DEFAULT_PRECISION: u32 = 15;
pub const DEFAULT_DISPLAY_PRECISION: u32 = 10;

const MAX_EXPONENT: i64 = 4096;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ArithError {
    DivisionByZero,
    InvalidDomain { operation: &'static str, value: String, },
    Malformed { literal: String, },
}

impl fmt::Display for ArithError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithError::DivisionByZero =>
                write!(f, "Division by zero"),
            ArithError::InvalidDomain { operation, value, } =>
                write!(f, "Invalid domain: {} of {}", operation, value),
            ArithError::Malformed { literal, } =>
                write!(f, "Malformed number: {}", literal),
        }
    }
}

impl std::error::Error for ArithError { }

/// Calculation scale and display precision shared by numbers parsed with it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NumberFormat {
    pub precision: u32,
    pub display_precision: u32,
}

impl Default for NumberFormat {
    fn default() -> NumberFormat {
        NumberFormat {
            precision: DEFAULT_PRECISION,
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

impl NumberFormat {
    pub fn new(precision: u32, display_precision: u32) -> NumberFormat {
        NumberFormat { precision, display_precision, }
    }

    pub fn parse(&self, text: &str) -> Option<Number> {
        parse_scaled(text, self.precision)
            .map(|value| Number { value, format: *self, })
    }
}

/// Fixed scale decimal: `value` is the number times `10^precision`.
/// Every rounding step truncates toward zero.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Number {
    value: BigInt,
    format: NumberFormat,
}

impl Number {
    pub fn format(&self) -> NumberFormat {
        self.format
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    /// Full scale representation, trailing zeros kept.
    pub fn to_plain_string(&self) -> String {
        render(&self.value, self.format.precision, false)
    }

    fn with_value(&self, value: BigInt) -> Number {
        Number { value, format: self.format, }
    }

    // operands parsed under another format are brought to this one's scale
    fn scaled_value_of(&self, that: &Number) -> BigInt {
        let shift = self.format.precision as i64 - that.format.precision as i64;
        rescale(that.value.clone(), shift)
    }

    fn unit(&self) -> BigInt {
        pow10(self.format.precision as usize)
    }
}

impl Operable for Number {
    type Error = ArithError;

    fn parse(text: &str) -> Option<Number> {
        NumberFormat::default().parse(text)
    }

    fn add(&self, that: &Number) -> Result<Number, ArithError> {
        Ok(self.with_value(&self.value + self.scaled_value_of(that)))
    }

    fn subtract(&self, that: &Number) -> Result<Number, ArithError> {
        Ok(self.with_value(&self.value - self.scaled_value_of(that)))
    }

    fn multiply(&self, that: &Number) -> Result<Number, ArithError> {
        let product = &self.value * self.scaled_value_of(that);
        Ok(self.with_value(product / self.unit()))
    }

    fn divide(&self, that: &Number) -> Result<Number, ArithError> {
        let divisor = self.scaled_value_of(that);
        if divisor.is_zero() {
            return Err(ArithError::DivisionByZero);
        }
        Ok(self.with_value(&self.value * self.unit() / divisor))
    }

    /// Computed in double precision, then truncated back to scale.
    fn sqrt(&self) -> Result<Number, ArithError> {
        let invalid = || ArithError::InvalidDomain {
            operation: "sqrt",
            value: self.to_string(),
        };
        if self.is_negative() {
            return Err(invalid());
        }
        let plain = self.to_plain_string();
        let approx: f64 = plain.parse()
            .map_err(|_| ArithError::Malformed { literal: plain.clone(), })?;
        let root = approx.sqrt();
        if !root.is_finite() {
            return Err(invalid());
        }
        let literal = root.to_string();
        self.format.parse(&literal)
            .ok_or(ArithError::Malformed { literal, })
    }
}

impl FromStr for Number {
    type Err = ArithError;

    fn from_str(text: &str) -> Result<Number, ArithError> {
        <Number as Operable>::parse(text)
            .ok_or_else(|| ArithError::Malformed { literal: text.to_string(), })
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let NumberFormat { precision, display_precision, } = self.format;
        let shown_digits = display_precision.min(precision);
        let shown = rescale(self.value.clone(), shown_digits as i64 - precision as i64);
        write!(f, "{}", render(&shown, shown_digits, true))
    }
}

fn pow10(exp: usize) -> BigInt {
    pow(BigInt::from(10u32), exp)
}

fn rescale(value: BigInt, shift: i64) -> BigInt {
    if shift >= 0 {
        value * pow10(shift as usize)
    } else {
        value / pow10(shift.unsigned_abs() as usize)
    }
}

fn render(value: &BigInt, scale: u32, trim: bool) -> String {
    let scale = scale as usize;
    let magnitude = value.abs().to_string();
    let padded = if magnitude.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - magnitude.len()), magnitude)
    } else {
        magnitude
    };
    let (integral, fractional) = padded.split_at(padded.len() - scale);
    let fractional = if trim { fractional.trim_end_matches('0') } else { fractional };

    let mut out = String::with_capacity(padded.len() + 2);
    if value.is_negative() {
        out.push('-');
    }
    out.push_str(integral);
    if !fractional.is_empty() {
        out.push('.');
        out.push_str(fractional);
    }
    out
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') =>
            (true, &text[1..]),
        Some(b'+') =>
            (false, &text[1..]),
        _ =>
            (false, text),
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = split_sign(text);
    if digits.is_empty() || digits.len() > 6 || !all_digits(digits) {
        return None;
    }
    let exponent: i64 = digits.parse().ok()?;
    if exponent > MAX_EXPONENT {
        return None;
    }
    Some(if negative { -exponent } else { exponent })
}

fn parse_scaled(text: &str, precision: u32) -> Option<BigInt> {
    let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
        Some(at) =>
            (&text[.. at], parse_exponent(&text[at + 1 ..])?),
        None =>
            (text, 0),
    };
    let (negative, unsigned) = split_sign(mantissa);
    let (integral, fractional) = match unsigned.find('.') {
        Some(at) =>
            (&unsigned[.. at], &unsigned[at + 1 ..]),
        None =>
            (unsigned, ""),
    };
    if integral.is_empty() && fractional.is_empty() {
        return None;
    }
    if !all_digits(integral) || !all_digits(fractional) {
        return None;
    }

    let digits: BigInt = format!("{}{}", integral, fractional).parse().ok()?;
    let shift = precision as i64 + exponent - fractional.len() as i64;
    let magnitude = rescale(digits, shift);
    Some(if negative { -magnitude } else { magnitude })
}
