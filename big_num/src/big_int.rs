//! # BigInt
//! Arbitrary-precision signed integers stored as two's-complement segments.
//! The value is one contiguous bit string, segment `0` being the least significant; there is no
//! separate sign field, the sign is the top bit of the top segment.
//! # Example
//! ```
//! use big_num::BigInt;
//!
//! let a: BigInt = "10000000000000".parse().unwrap();
//! let b: BigInt = "-900000000000".parse().unwrap();
//! println!("a = {}", a);
//! println!("a + b = {}", &a + &b);
//! println!("a - b = {}", &a - &b);
//! println!("a * b = {}", &a * &b);
//! println!("a / b = {}", a.checked_div(&b).unwrap());
//! println!("a % b = {}", a.checked_rem(&b).unwrap());
//! println!("a << 10 = {}", &a << 10);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::big_num_constants::*;

/// One storage word of a [`BigInt`].
pub type Segment = u64;

const SIGN_SEGMENT: Segment = Segment::MAX;

#[derive(Clone)]
pub struct BigInt {
    segments: Vec<Segment>,
}

// construction
impl BigInt {
    pub fn zero() -> BigInt {
        BigInt { segments: vec![0] }
    }

    /// Builds a value from raw two's-complement segments, least significant first.
    pub fn from_segments(segments: Vec<Segment>) -> BigInt {
        if segments.is_empty() {
            return BigInt::zero();
        }
        BigInt { segments }.optimize()
    }

    /// A non-canonical zero spanning `count` segments, for callers that set bits up to that width.
    pub(crate) fn zeroed(count: usize) -> BigInt {
        BigInt { segments: vec![0; count.max(1)] }
    }
}

macro_rules! impl_signed_to_big_int {
    ($($i: ty),*) => {
    $(
    impl From<$i> for BigInt {
        fn from(val: $i) -> Self {
            BigInt::from_segments(vec![val as i64 as Segment])
        }
    }
    )*
    };
}

macro_rules! impl_unsigned_to_big_int {
    ($($u: ty),*) => {
    $(
    impl From<$u> for BigInt {
        fn from(val: $u) -> Self {
            BigInt::from_segments(vec![val as u64 as Segment, 0])
        }
    }
    )*
    };
}

impl_signed_to_big_int!(i8, i16, i32, isize, i64);
impl_unsigned_to_big_int!(u8, u16, u32, usize, u64);

// segment and bit access
impl BigInt {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn bit_count(&self) -> usize {
        self.segments.len() * SEGMENT_BITS
    }

    /// Segments past the stored width read as the sign extension.
    pub fn get_segment(&self, index: usize) -> Segment {
        match self.segments.get(index) {
            Some(segment) => *segment,
            None => self.sign_segment(),
        }
    }

    /// Bits past the stored width read as the sign bit.
    pub fn get_bit(&self, index: usize) -> bool {
        match self.segments.get(index / SEGMENT_BITS) {
            Some(segment) => (segment >> (index % SEGMENT_BITS)) & 1 == 1,
            None => self.msb(),
        }
    }

    /// Sets one bit, growing the storage with zero segments when `index` is past the stored width.
    pub fn set_bit(&mut self, index: usize, value: bool) {
        let segment_index = index / SEGMENT_BITS;
        if segment_index >= self.segments.len() {
            self.segments.resize(segment_index + 1, 0);
        }
        let mask = 1 << (index % SEGMENT_BITS);
        if value {
            self.segments[segment_index] |= mask;
        } else {
            self.segments[segment_index] &= !mask;
        }
    }

    pub(crate) fn get_nibble(&self, index: usize) -> u8 {
        let bit = index * BITS_IN_NIBBLE;
        ((self.get_segment(bit / SEGMENT_BITS) >> (bit % SEGMENT_BITS)) & 0xf) as u8
    }

    pub fn msb(&self) -> bool {
        self.segments
            .last()
            .map_or(false, |top| top >> (SEGMENT_BITS - 1) == 1)
    }

    pub(crate) fn sign_segment(&self) -> Segment {
        if self.msb() { SIGN_SEGMENT } else { 0 }
    }

    pub fn is_zero(&self) -> bool {
        self.segments.iter().all(|segment| *segment == 0)
    }

    pub fn is_negative(&self) -> bool {
        self.msb()
    }

    pub fn is_odd(&self) -> bool {
        self.get_bit(0)
    }

    pub fn signum(&self) -> i8 {
        if self.is_negative() {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    /// Position of the highest one bit, `None` for zero. For negative values this is the sign bit.
    pub fn most_significant_set_bit_position(&self) -> Option<usize> {
        self.segments
            .iter()
            .enumerate()
            .rev()
            .find(|(_, segment)| **segment != 0)
            .map(|(index, segment)| {
                index * SEGMENT_BITS + (SEGMENT_BITS - 1 - segment.leading_zeros() as usize)
            })
    }

    pub fn to_i64(&self) -> Option<i64> {
        let low = self.segments[0] as i64;
        let fill = if low < 0 { SIGN_SEGMENT } else { 0 };
        self.segments[1..]
            .iter()
            .all(|segment| *segment == fill)
            .then_some(low)
    }
}

// canonical form
impl BigInt {
    /// Returns the value trimmed to the fewest segments that keep its sign and magnitude.
    pub fn optimize(mut self) -> BigInt {
        self.canonicalize();
        self
    }

    pub(crate) fn canonicalize(&mut self) {
        let negative = self.msb();
        let fill = self.sign_segment();
        let mut len = self.segments.len();
        while len > 1 && self.segments[len - 1] == fill {
            len -= 1;
        }
        self.segments.truncate(len);
        if self.msb() != negative {
            self.segments.push(fill);
        }
        self.segments.shrink_to_fit();
    }

    /// Drops every segment at or above `count`, reinterpreting the new top bit as the sign.
    pub(crate) fn truncate_segments(&mut self, count: usize) {
        self.segments.truncate(count.max(1));
    }

    pub fn abs(&self) -> BigInt {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }
}

// comparison
impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}
impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        // Same sign: sign-extended bit patterns order the same way as the values.
        let width = self.segment_count().max(other.segment_count());
        for index in (0..width).rev() {
            match self.get_segment(index).cmp(&other.get_segment(index)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({})", self)
    }
}

#[test]
fn test_from() {
    assert_eq!(BigInt::from(0u8).segments(), &[0]);
    assert_eq!(BigInt::from(-1i32).segments(), &[Segment::MAX]);
    assert_eq!(BigInt::from(u64::MAX).segments(), &[Segment::MAX, 0]);
    assert_eq!(BigInt::from(i64::MIN).segments(), &[1 << 63]);
    assert_eq!(BigInt::from(1u64 << 63).segments(), &[1 << 63, 0]);
    assert_eq!(BigInt::from(42usize), BigInt::from(42i8));
}

#[test]
fn test_get_past_width_reads_sign() {
    let positive = BigInt::from(5);
    assert_eq!(positive.get_segment(3), 0);
    assert!(!positive.get_bit(1000));

    let negative = BigInt::from(-5);
    assert_eq!(negative.get_segment(3), Segment::MAX);
    assert!(negative.get_bit(1000));
    assert!(negative.msb());
}

#[test]
fn test_set_bit_grows_with_zero_segments() {
    let mut value = BigInt::zero();
    value.set_bit(130, true);
    assert_eq!(value.segment_count(), 3);
    assert_eq!(value.segments(), &[0, 0, 1 << 2]);
    assert_eq!(value.bit_count(), 3 * SEGMENT_BITS);
    assert!(!value.is_negative());

    value.set_bit(130, false);
    assert!(value.is_zero());
    assert_eq!(value.optimize().segment_count(), 1);
}

#[test]
fn test_optimize() {
    // redundant sign segments are trimmed
    let trimmed = BigInt { segments: vec![7, 0, 0] }.optimize();
    assert_eq!(trimmed.segments(), &[7]);
    let trimmed = BigInt { segments: vec![Segment::MAX - 1, Segment::MAX] }.optimize();
    assert_eq!(trimmed.segments(), &[Segment::MAX - 1]);

    // all zeros and all ones keep one segment
    assert_eq!(BigInt { segments: vec![0, 0] }.optimize().segments(), &[0]);
    assert_eq!(
        BigInt { segments: vec![Segment::MAX; 4] }.optimize().segments(),
        &[Segment::MAX]
    );

    // trimming must not flip the sign
    let positive = BigInt { segments: vec![1 << 63, 0, 0] }.optimize();
    assert_eq!(positive.segments(), &[1 << 63, 0]);
    assert!(!positive.is_negative());
    let negative = BigInt { segments: vec![1, Segment::MAX, Segment::MAX] }.optimize();
    assert_eq!(negative.segments(), &[1, Segment::MAX]);
    assert!(negative.is_negative());
}

#[test]
fn test_most_significant_set_bit_position() {
    assert_eq!(BigInt::zero().most_significant_set_bit_position(), None);
    assert_eq!(BigInt::from(1).most_significant_set_bit_position(), Some(0));
    assert_eq!(BigInt::from(64).most_significant_set_bit_position(), Some(6));
    assert_eq!(BigInt::from(u64::MAX).most_significant_set_bit_position(), Some(63));
    assert_eq!(
        BigInt::from_segments(vec![0, 0b100]).most_significant_set_bit_position(),
        Some(66)
    );
    assert_eq!(BigInt::from(-1).most_significant_set_bit_position(), Some(63));
}

#[test]
fn test_compare() {
    let values = [
        BigInt::from_segments(vec![0, Segment::MAX - 3]),
        BigInt::from(i64::MIN),
        BigInt::from(-2),
        BigInt::from(-1),
        BigInt::zero(),
        BigInt::from(1),
        BigInt::from(i64::MAX),
        BigInt::from(u64::MAX),
        BigInt::from_segments(vec![0, 1]),
    ];
    for (i, a) in values.iter().enumerate() {
        for (j, b) in values.iter().enumerate() {
            assert_eq!(a.cmp(b), i.cmp(&j), "{:?} vs {:?}", a, b);
        }
    }
    // equality ignores storage width
    assert_eq!(BigInt { segments: vec![Segment::MAX, Segment::MAX] }, BigInt::from(-1));
}

#[test]
fn test_to_i64() {
    assert_eq!(BigInt::from(-123456789i64).to_i64(), Some(-123456789));
    assert_eq!(BigInt::from(i64::MIN).to_i64(), Some(i64::MIN));
    assert_eq!(BigInt::from(u64::MAX).to_i64(), None);
    assert_eq!(BigInt { segments: vec![3, 0, 0] }.to_i64(), Some(3));
}

#[test]
fn test_signum() {
    assert_eq!(BigInt::from(-9).signum(), -1);
    assert_eq!(BigInt::zero().signum(), 0);
    assert_eq!(BigInt::from(9).signum(), 1);
    assert!(BigInt::from(9).is_odd());
    assert!(!BigInt::from(-8).is_odd());
}
