use std::ops::{
    Add, AddAssign,
    Sub, SubAssign,
    Mul, MulAssign,
    Shl, ShlAssign,
    Shr, ShrAssign,
    Neg,
};

use crate::big_int::{BigInt, Segment};
use crate::big_num_cache::one;
use crate::big_num_constants::SEGMENT_BITS;
use crate::MathError;

// The owned and mixed forms of every operator delegate to the `&BigInt op &BigInt` form.
macro_rules! forward_binop {
    ($op: ident, $method: ident, $op_assign: ident, $method_assign: ident) => {
        impl $op for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl $op<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl $op_assign for BigInt {
            fn $method_assign(&mut self, rhs: Self) {
                *self = (&*self).$method(&rhs);
            }
        }

        impl $op_assign<&BigInt> for BigInt {
            fn $method_assign(&mut self, rhs: &BigInt) {
                *self = (&*self).$method(rhs);
            }
        }
    };
}

macro_rules! forward_shift {
    ($op: ident, $method: ident, $op_assign: ident, $method_assign: ident) => {
        impl $op<usize> for BigInt {
            type Output = BigInt;

            fn $method(self, n: usize) -> Self::Output {
                (&self).$method(n)
            }
        }

        impl $op_assign<usize> for BigInt {
            fn $method_assign(&mut self, n: usize) {
                *self = (&*self).$method(n);
            }
        }
    };
}

// negation
impl BigInt {
    /// Two's-complement negation: complement every stored bit, then add one.
    pub fn negate(&self) -> BigInt {
        let complement = BigInt::from_segments(self.segments().iter().map(|s| !s).collect());
        &complement + one()
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// addition
impl Add for &BigInt {
    type Output = BigInt;

    /// Ripple-carry addition over one segment more than the wider operand, so the carry out
    /// of the top segment always has room and `optimize` can settle the sign.
    fn add(self, rhs: Self) -> Self::Output {
        let width = self.segment_count().max(rhs.segment_count()) + 1;
        let mut segments: Vec<Segment> = Vec::with_capacity(width);
        let mut carry = false;
        for index in 0..width {
            let (partial, carry_a) = self.get_segment(index).overflowing_add(rhs.get_segment(index));
            let (sum, carry_b) = partial.overflowing_add(carry as Segment);
            segments.push(sum);
            carry = carry_a || carry_b;
        }
        BigInt::from_segments(segments)
    }
}

forward_binop!(Add, add, AddAssign, add_assign);

// subtraction
impl Sub for &BigInt {
    type Output = BigInt;

    fn sub(self, rhs: Self) -> Self::Output {
        self + &rhs.negate()
    }
}

forward_binop!(Sub, sub, SubAssign, sub_assign);

// shifts
impl Shl<usize> for &BigInt {
    type Output = BigInt;

    fn shl(self, n: usize) -> Self::Output {
        let n_segments = n / SEGMENT_BITS;
        let n_bits = n % SEGMENT_BITS;
        let count = self.segment_count();
        let mut segments: Vec<Segment> = vec![0; count + n_segments + 1];
        // One sign segment past the stored width supplies the bits shifted into the new top.
        for index in 0..=count {
            let segment = self.get_segment(index);
            segments[index + n_segments] |= segment << n_bits;
            if n_bits != 0 && index + n_segments + 1 < segments.len() {
                segments[index + n_segments + 1] |= segment >> (SEGMENT_BITS - n_bits);
            }
        }
        BigInt::from_segments(segments)
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    /// Arithmetic shift, rounding toward negative infinity.
    fn shr(self, n: usize) -> Self::Output {
        let n_segments = n / SEGMENT_BITS;
        let n_bits = n % SEGMENT_BITS;
        let count = self.segment_count().saturating_sub(n_segments).max(1);
        let segments = (0..count)
            .map(|index| {
                let low = self.get_segment(index + n_segments) >> n_bits;
                if n_bits == 0 {
                    low
                } else {
                    low | self.get_segment(index + n_segments + 1) << (SEGMENT_BITS - n_bits)
                }
            })
            .collect();
        BigInt::from_segments(segments)
    }
}

forward_shift!(Shl, shl, ShlAssign, shl_assign);
forward_shift!(Shr, shr, ShrAssign, shr_assign);

// multiplication
impl Mul for &BigInt {
    type Output = BigInt;

    /// Shift-and-add over the raw bit patterns. Working modulo `2^(2 * max_bits)` keeps the
    /// product right for either operand sign; the result is cut back to that width before
    /// the sign is read off its top bit.
    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return BigInt::zero();
        }
        let max_bits = 2 * self.bit_count().max(rhs.bit_count());
        let mut product = BigInt::zero();
        for i in 0..max_bits {
            if rhs.get_bit(i) {
                product = &product + &(self << i);
            }
        }
        product.truncate_segments(max_bits / SEGMENT_BITS);
        product.optimize()
    }
}

forward_binop!(Mul, mul, MulAssign, mul_assign);

// division
impl BigInt {
    /// Quotient and remainder of truncating division: the quotient rounds toward zero and the
    /// remainder takes the sign of the dividend.
    pub fn div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt), MathError> {
        if divisor.is_zero() {
            return Err(MathError::DivByZero);
        }
        let (quotient, remainder) = long_divide(&self.abs(), &divisor.abs());
        let quotient = if self.is_negative() != divisor.is_negative() {
            quotient.negate()
        } else {
            quotient
        };
        let remainder = if self.is_negative() {
            remainder.negate()
        } else {
            remainder
        };
        Ok((quotient, remainder))
    }

    pub fn checked_div(&self, divisor: &BigInt) -> Result<BigInt, MathError> {
        self.div_rem(divisor).map(|(quotient, _)| quotient)
    }

    pub fn checked_rem(&self, divisor: &BigInt) -> Result<BigInt, MathError> {
        self.div_rem(divisor).map(|(_, remainder)| remainder)
    }
}

/// Restoring binary long division of two non-negative values, one quotient bit per dividend
/// bit from the most significant down. `divisor` must not be zero.
pub(crate) fn long_divide(dividend: &BigInt, divisor: &BigInt) -> (BigInt, BigInt) {
    // The dividend's top bit is its (clear) sign bit, so the quotient never sets it either.
    let mut quotient = BigInt::zeroed(dividend.segment_count());
    let mut remainder = BigInt::zero();
    for bit in (0..dividend.bit_count()).rev() {
        remainder = &remainder << 1;
        remainder.set_bit(0, dividend.get_bit(bit));
        if remainder >= *divisor {
            remainder = &remainder - divisor;
            quotient.set_bit(bit, true);
        }
    }
    (quotient.optimize(), remainder)
}

// exponentiation
impl BigInt {
    /// Square-and-multiply exponentiation. A negative exponent yields zero, a zero exponent one.
    pub fn pow(&self, exponent: &BigInt) -> BigInt {
        if exponent.is_negative() {
            return BigInt::zero();
        }
        let top = match exponent.most_significant_set_bit_position() {
            Some(top) => top,
            None => return one().clone(),
        };
        let mut result = self.clone();
        for bit in (0..top).rev() {
            result = &result * &result;
            if exponent.get_bit(bit) {
                result = &result * self;
            }
        }
        result
    }

    pub fn factorial(&self) -> Result<BigInt, MathError> {
        if self.is_negative() {
            return Err(MathError::FactorialOfNegative);
        }
        let mut result = one().clone();
        let mut factor = one().clone();
        while factor <= *self {
            result = &result * &factor;
            factor = &factor + one();
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn big(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    fn samples() -> Vec<BigInt> {
        [
            "0", "1", "-1", "2", "-2", "3", "-10", "255", "-256",
            "9223372036854775807", "-9223372036854775808", "9223372036854775808",
            "18446744073709551615", "-18446744073709551616",
            "340282366920938463463374607431768211457",
            "-123456789012345678901234567890123456789012345",
        ]
        .iter()
        .map(|s| big(s))
        .collect()
    }

    #[test]
    fn test_add() {
        assert_eq!(&big("100000000000") + &big("25000000001"), big("125000000001"));
        assert_eq!(&big("100000000000") + &big("-25000000001"), big("74999999999"));
        assert_eq!(&big("4") + &big("-25000000001"), big("-24999999997"));
        // carry out of a full segment
        assert_eq!(BigInt::from(u64::MAX) + BigInt::from(1), big("18446744073709551616"));
        assert_eq!(BigInt::from(i64::MAX) + BigInt::from(1), big("9223372036854775808"));
        assert_eq!(BigInt::from(i64::MIN) + BigInt::from(-1), big("-9223372036854775809"));
    }

    #[test]
    fn test_negate() {
        assert_eq!(BigInt::from(5).negate(), BigInt::from(-5));
        assert_eq!(BigInt::zero().negate(), BigInt::zero());
        assert_eq!(BigInt::from(i64::MIN).negate(), big("9223372036854775808"));
        assert_eq!(-big("9223372036854775808"), BigInt::from(i64::MIN));
        for a in samples() {
            assert_eq!(&a + &a.negate(), BigInt::zero(), "a = {}", a);
            assert_eq!(a.negate().negate(), a);
        }
    }

    #[test]
    fn test_sub() {
        assert_eq!(&big("10") - &big("25"), big("-15"));
        assert_eq!(BigInt::zero() - BigInt::from(i64::MIN), big("9223372036854775808"));
        for a in samples() {
            assert_eq!(&a - &a, BigInt::zero());
        }
    }

    #[test]
    fn test_shift() {
        assert_eq!(BigInt::from(1) << 64, big("18446744073709551616"));
        assert_eq!(BigInt::from(3) << 63, big("27670116110564327424"));
        assert_eq!(BigInt::from(-1) << 4, BigInt::from(-16));
        assert_eq!(BigInt::from(-5) << 130, big("-6805647338418769269267492148635364229120"));
        assert_eq!(big("18446744073709551616") >> 64, BigInt::from(1));
        assert_eq!(BigInt::from(-16) >> 2, BigInt::from(-4));
        assert_eq!(BigInt::from(-5) >> 1, BigInt::from(-3));
        assert_eq!(BigInt::from(-5) >> 500, BigInt::from(-1));
        assert_eq!(BigInt::from(5) >> 500, BigInt::zero());
    }

    #[test]
    fn test_mul() {
        assert_eq!(&big("13000000000000") * &big("10"), big("130000000000000"));
        assert_eq!(&big("-2") * &big("871346078019283655"), big("-1742692156038567310"));
        assert_eq!(&big("871346078019283655") * &big("-2"), big("-1742692156038567310"));
        assert_eq!(&big("-3") * &big("-7"), big("21"));
        assert_eq!(&big("0") * &big("-7"), BigInt::zero());
        assert_eq!(
            BigInt::from(u64::MAX) * BigInt::from(u64::MAX),
            big("340282366920938463426481119284349108225")
        );
        assert_eq!(
            BigInt::from(i64::MIN) * BigInt::from(i64::MIN),
            big("85070591730234615865843651857942052864")
        );
        assert_eq!(
            big("-123456789012345678901234567890") * big("987654321098765432109876543210"),
            big("-121932631137021795226185032733622923332237463801111263526900")
        );
    }

    #[test]
    fn test_div() {
        assert_eq!(big("4294967295").checked_div(&big("8")).unwrap(), big("536870911"));
        assert_eq!(big("-10").checked_div(&big("3787890478781928745")).unwrap(), BigInt::zero());
        assert_eq!(big("120").checked_div(&big("13")).unwrap(), big("9"));
        assert_eq!(big("-7").checked_div(&big("2")).unwrap(), big("-3"));
        assert_eq!(big("7").checked_div(&big("-2")).unwrap(), big("-3"));
        assert_eq!(big("-7").checked_div(&big("-2")).unwrap(), big("3"));
        assert_eq!(
            big("10000000000000000000000000000000000").checked_div(&big("1000")).unwrap(),
            big("10000000000000000000000000000000")
        );
        assert_eq!(
            big("9223372036854775808").checked_div(&big("1")).unwrap(),
            big("9223372036854775808")
        );
        assert_eq!(big("5").checked_div(&BigInt::zero()), Err(MathError::DivByZero));
    }

    #[test]
    fn test_mod() {
        assert_eq!(big("4294967295").checked_rem(&big("8")).unwrap(), big("7"));
        assert_eq!(big("4").checked_rem(&big("10")).unwrap(), big("4"));
        assert_eq!(big("-10").checked_rem(&big("3")).unwrap(), big("-1"));
        assert_eq!(big("10").checked_rem(&big("-3")).unwrap(), big("1"));
        assert_eq!(big("12").checked_rem(&big("8")).unwrap(), big("4"));
        assert_eq!(
            big("23456789873625348759607098765432345678909876325346546543456453573434839063464369876543245")
                .checked_rem(&big("526738495607659438721653478560954837265378495607"))
                .unwrap(),
            big("393707270751296419349581795408095683999332705291")
        );
        assert_eq!(big("5").checked_rem(&BigInt::zero()), Err(MathError::DivByZero));
    }

    #[test]
    fn test_div_rem_identity() {
        for a in samples() {
            for b in samples().iter().filter(|b| !b.is_zero()) {
                let (quotient, remainder) = a.div_rem(b).unwrap();
                assert_eq!(&(&quotient * b) + &remainder, a, "{} / {}", a, b);
                assert!(
                    remainder.is_zero() || remainder.is_negative() == a.is_negative(),
                    "{} % {} = {}", a, b, remainder
                );
                assert!(remainder.abs() < b.abs());
            }
        }
    }

    #[test]
    fn test_pow() {
        assert_eq!(big("2").pow(&big("64")), big("18446744073709551616"));
        assert_eq!(big("-2").pow(&big("31")), big("-2147483648"));
        assert_eq!(big("-2").pow(&big("-8")), BigInt::zero());
        assert_eq!(big("3").pow(&big("5")), big("243"));
        assert_eq!(big("10").pow(&big("30")), big("1000000000000000000000000000000"));
        assert_eq!(big("0").pow(&big("3")), BigInt::zero());
        for a in samples() {
            assert_eq!(a.pow(&BigInt::zero()), BigInt::from(1));
            assert_eq!(a.pow(&BigInt::from(1)), a);
            assert_eq!(a.pow(&BigInt::from(-1)), BigInt::zero());
        }
    }

    #[test]
    fn test_factorial() {
        assert_eq!(big("0").factorial().unwrap(), big("1"));
        assert_eq!(big("1").factorial().unwrap(), big("1"));
        assert_eq!(big("4").factorial().unwrap(), big("24"));
        assert_eq!(big("20").factorial().unwrap(), big("2432902008176640000"));
        assert_eq!(
            big("69").factorial().unwrap(),
            big("171122452428141311372468338881272839092270544893520369393648040923257279754140647424000000000000000")
        );
        assert_eq!(big("-1").factorial(), Err(MathError::FactorialOfNegative));
        assert_eq!(big("-100").factorial(), Err(MathError::FactorialOfNegative));
    }
}
