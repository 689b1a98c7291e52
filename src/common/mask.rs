use std::ops::Deref;

use super::metadata::EC_LEVEL_L_BITS;

/// Data mask applied to the encoding region. Symbols always use the checkerboard pattern;
/// penalty-based mask selection is not performed.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    /// Pattern reference 000: modules where (row + col) is even are flipped.
    pub const CHECKERBOARD: Self = Self(0b000);
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            _ => unreachable!("Only the checkerboard mask is supported"),
        }
    }
}

// Format information
//------------------------------------------------------------------------------

const FORMAT_INFO_GENERATOR: u32 = 0b10100110111;

const FORMAT_INFO_MASK: u32 = 0b101010000010010;

// BCH(15, 5) code over ec level & mask bits, xored with the format mask
pub const fn format_info_qr(ec_level_bits: u32, mask: MaskPattern) -> u32 {
    let data = (ec_level_bits << 3) | mask.0 as u32;
    let mut rem = data;
    let mut i = 0;
    while i < 10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_INFO_GENERATOR);
        i += 1;
    }
    ((data << 10) | rem) ^ FORMAT_INFO_MASK
}

pub const FORMAT_INFO: u32 = format_info_qr(EC_LEVEL_L_BITS, MaskPattern::CHECKERBOARD);
