use lazy_static::*;

use crate::BigInt;
use crate::big_num_constants::*;

lazy_static! {
    /// `0..=MAX_CONSTANT`, used as digit values by the codec and as counters by factorial.
    pub static ref POS_CACHE: [BigInt; MAX_CONSTANT + 1] =
        std::array::from_fn(|n| BigInt::from(n as u64));
}

#[inline(always)]
pub fn one() -> &'static BigInt {
    &POS_CACHE[1]
}

#[inline(always)]
pub fn ten() -> &'static BigInt {
    &POS_CACHE[10]
}
