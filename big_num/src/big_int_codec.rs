//! # Text codec
//! Reads and writes [`BigInt`] values in base 2, 10 and 16.
//!
//! Binary and hexadecimal text is the two's-complement bit pattern itself: a literal whose
//! first digit has its top bit set is negative (`0b1101` is `-3`, `0xf0` is `-16`). Decimal
//! text is an ordinary signed magnitude. Every base accepts a leading `-`, which negates
//! whatever the digits denote, so `-0x80` is `128`.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::big_int_arith::long_divide;
use crate::big_int::BigInt;
use crate::big_num_cache::{ten, POS_CACHE};
use crate::big_num_constants::*;
use crate::{ParseBaseError, ParseError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    Binary,
    #[default]
    Decimal,
    Hexadecimal,
}

impl Base {
    pub fn radix(self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Decimal => 10,
            Base::Hexadecimal => 16,
        }
    }

    /// The literal prefix printed before binary and hex digits.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Base::Binary => Some(BIN_PREFIX),
            Base::Decimal => None,
            Base::Hexadecimal => Some(HEX_PREFIX),
        }
    }

    /// Short name used by the calculator commands.
    pub fn name(self) -> &'static str {
        match self {
            Base::Binary => "bin",
            Base::Decimal => "dec",
            Base::Hexadecimal => "hex",
        }
    }

    fn bits_per_digit(self) -> Option<usize> {
        match self {
            Base::Binary => Some(1),
            Base::Decimal => None,
            Base::Hexadecimal => Some(BITS_IN_NIBBLE),
        }
    }

    fn digit_value(self, c: char) -> Option<usize> {
        c.to_digit(self.radix()).map(|d| d as usize)
    }
}

impl Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Base {
    type Err = ParseBaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bin" => Ok(Base::Binary),
            "dec" => Ok(Base::Decimal),
            "hex" => Ok(Base::Hexadecimal),
            other => Err(ParseBaseError(other.to_string())),
        }
    }
}

fn starts_with_prefix(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// Picks the base announced by a `0b`/`0x` prefix (any case), decimal otherwise.
pub fn detect_base(text: &str) -> Base {
    if starts_with_prefix(text, BIN_PREFIX) {
        Base::Binary
    } else if starts_with_prefix(text, HEX_PREFIX) {
        Base::Hexadecimal
    } else {
        Base::Decimal
    }
}

fn invalid_digit(text: &str, position: usize, base: Base) -> ParseError {
    match text[position..].chars().next() {
        Some(digit) => ParseError::InvalidDigit { digit, position, base },
        None => ParseError::Empty,
    }
}

/// Reads the run of `base` digits starting at byte `start` of `text`.
/// Returns the value and the number of bytes read.
fn parse_digits(text: &str, start: usize, base: Base) -> Result<(BigInt, usize), ParseError> {
    let digits: Vec<usize> = text[start..]
        .chars()
        .map_while(|c| base.digit_value(c))
        .collect();
    if digits.is_empty() {
        return Err(invalid_digit(text, start, base));
    }

    let value = match base.bits_per_digit() {
        Some(bits) => parse_bit_pattern(&digits, bits),
        None => digits
            .iter()
            .fold(BigInt::zero(), |acc, d| &(&acc * ten()) + &POS_CACHE[*d]),
    };
    // Every accepted digit is ASCII.
    Ok((value, digits.len()))
}

/// Places `digits` into a bit string, `bits` bits per digit, then sign-extends it when the
/// first digit has its top bit set.
fn parse_bit_pattern(digits: &[usize], bits: usize) -> BigInt {
    let width = digits.len() * bits;
    let mut value = BigInt::zeroed(width / SEGMENT_BITS + 1);
    for (n, digit) in digits.iter().rev().enumerate() {
        for bit in 0..bits {
            if (digit >> bit) & 1 == 1 {
                value.set_bit(n * bits + bit, true);
            }
        }
    }
    if value.get_bit(width - 1) {
        fill_sign_bits(&mut value, width);
    }
    value.optimize()
}

/// Sets every stored bit from the top down to `width`, the first bit of the literal.
fn fill_sign_bits(value: &mut BigInt, width: usize) {
    for bit in (width..value.bit_count()).rev() {
        value.set_bit(bit, true);
    }
}

/// Parses `text` as a literal of `base`: an optional `-`, the base's own prefix if it has one,
/// then digits up to the end of the text.
pub fn parse_bigint(text: &str, base: Base) -> Result<BigInt, ParseError> {
    let (negative, mut start) = match text.strip_prefix('-') {
        Some(_) => (true, 1),
        None => (false, 0),
    };
    if let Some(prefix) = base.prefix() {
        if starts_with_prefix(&text[start..], prefix) {
            start += prefix.len();
        }
    }
    let (value, consumed) = parse_digits(text, start, base)?;
    if start + consumed != text.len() {
        return Err(invalid_digit(text, start + consumed, base));
    }
    Ok(if negative { value.negate() } else { value })
}

/// Reads the literal at the head of `text`, picking the base from its prefix, and stops at the
/// first character that is not a digit of that base.
/// Returns the value and the number of bytes read, prefix included.
pub fn parse_literal(text: &str) -> Result<(BigInt, usize), ParseError> {
    let base = detect_base(text);
    let start = base.prefix().map_or(0, str::len);
    let (value, consumed) = parse_digits(text, start, base)?;
    Ok((value, start + consumed))
}

impl FromStr for BigInt {
    type Err = ParseError;

    /// Auto-detects the base from the prefix, after an optional `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, offset) = match s.strip_prefix('-') {
            Some(_) => (true, 1),
            None => (false, 0),
        };
        let body = &s[offset..];
        let (value, consumed) = parse_literal(body)?;
        if consumed != body.len() {
            return Err(invalid_digit(s, offset + consumed, detect_base(body)));
        }
        Ok(if negative { value.negate() } else { value })
    }
}

pub fn print_bigint(value: &BigInt, base: Base) -> String {
    match base {
        Base::Binary => print_binary(value),
        Base::Decimal => print_decimal(value),
        Base::Hexadecimal => print_hexadecimal(value),
    }
}

fn bit_char(bit: bool) -> char {
    DIGITS[bit as usize]
}

// The sign bit, then everything below the run of bits that only repeat it.
fn print_binary(value: &BigInt) -> String {
    let msb = value.msb();
    let bits = value.bit_count();
    let first = (0..bits - 1)
        .rev()
        .find(|&bit| value.get_bit(bit) != msb);

    let mut s = String::with_capacity(BIN_PREFIX.len() + bits);
    s.push_str(BIN_PREFIX);
    s.push(bit_char(msb));
    if let Some(top) = first {
        s.extend((0..=top).rev().map(|bit| bit_char(value.get_bit(bit))));
    }
    s
}

fn print_decimal(value: &BigInt) -> String {
    if value.is_zero() {
        return String::from("0");
    }
    let mut digits: Vec<char> = Vec::new();
    let mut rest = value.abs();
    while !rest.is_zero() {
        let (quotient, remainder) = long_divide(&rest, ten());
        digits.push(DIGITS[remainder.get_segment(0) as usize]);
        rest = quotient;
    }

    let mut s = String::with_capacity(digits.len() + 1);
    if value.is_negative() {
        s.push('-');
    }
    s.extend(digits.iter().rev());
    s
}

// Nibbles below the run of pure sign nibbles, with a leading `0` or `f` when the top printed
// nibble would otherwise read as the wrong sign.
fn print_hexadecimal(value: &BigInt) -> String {
    let msb = value.msb();
    let sign_nibble: u8 = if msb { 0xf } else { 0 };
    let nibbles = value.bit_count() / BITS_IN_NIBBLE;

    let mut s = String::with_capacity(HEX_PREFIX.len() + nibbles + 1);
    s.push_str(HEX_PREFIX);
    match (0..nibbles).rev().find(|&n| value.get_nibble(n) != sign_nibble) {
        None => s.push(DIGITS[sign_nibble as usize]),
        Some(top) => {
            let lead = value.get_nibble(top);
            if !msb && lead >= 8 {
                s.push('0');
            } else if msb && lead < 8 {
                s.push('f');
            }
            s.extend((0..=top).rev().map(|n| DIGITS[value.get_nibble(n) as usize]));
        }
    }
    s
}

impl Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_decimal(self))
    }
}

impl BigInt {
    pub fn to_string_radix(&self, base: Base) -> String {
        print_bigint(self, base)
    }
}
