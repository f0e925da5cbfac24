use thiserror::Error;

use crate::Base;

/// Failure to read a [`BigInt`](crate::BigInt) literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty literal")]
    Empty,
    /// `position` is the byte offset of `digit` in the parsed text.
    #[error("invalid digit `{digit}` at position {position} for base {base}")]
    InvalidDigit { digit: char, position: usize, base: Base },
}

/// Failure of an arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error("division by zero")]
    DivByZero,
    #[error("factorial of a negative value")]
    FactorialOfNegative,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown base `{0}`, expected one of bin, dec, hex")]
pub struct ParseBaseError(pub String);
