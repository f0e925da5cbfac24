use crate::big_int::Segment;

pub const SEGMENT_BITS: usize = Segment::BITS as usize;

pub const BITS_IN_NIBBLE: usize = 4;

pub const DIGITS: [char; 16] = [
    '0' , '1' , '2' , '3' , '4' , '5' ,
    '6' , '7' , '8' , '9' , 'a' , 'b' ,
    'c' , 'd' , 'e' , 'f'
];

pub const MAX_CONSTANT: usize = 16;

pub const BIN_PREFIX: &str = "0b";

pub const HEX_PREFIX: &str = "0x";
