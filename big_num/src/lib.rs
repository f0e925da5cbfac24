//! Big Num \
//! This crate provides:
//! - [`BigInt`]: arbitrary-precision signed integers stored as two's-complement segments, with
//!   `+ - * << >>` through the `std::ops` traits and checked division, modulo, power and factorial.
//! - [`parse_bigint`] / [`print_bigint`]: text conversion in base 2, 10 and 16.

mod big_int;
mod big_int_arith;
mod big_int_codec;
mod big_num_cache;
mod big_num_constants;
mod error;

pub use big_int::{BigInt, Segment};
pub use big_int_codec::{detect_base, parse_bigint, parse_literal, print_bigint, Base};
pub use big_num_constants::SEGMENT_BITS;
pub use error::{MathError, ParseBaseError, ParseError};
