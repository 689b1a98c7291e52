use std::ops::{Deref, Not};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Version
//------------------------------------------------------------------------------

pub const MIN_VERSION: usize = 1;

pub const MAX_VERSION: usize = 6;

/// Size class of the symbol. Only versions 1 through 6 at EC level L are supported.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const fn new(v: usize) -> Option<Self> {
        if MIN_VERSION <= v && v <= MAX_VERSION {
            Some(Self(v))
        } else {
            None
        }
    }

    // Versions in ascending order of capacity
    pub(crate) fn all() -> impl Iterator<Item = Self> {
        (MIN_VERSION..=MAX_VERSION).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    fn capacity(self) -> &'static Capacity {
        &CAPACITIES[self.0 - 1]
    }

    pub fn total_codewords(self) -> usize {
        self.capacity().total_codewords
    }

    pub fn data_codewords(self) -> usize {
        self.capacity().data_codewords
    }

    pub fn data_bit_capacity(self) -> usize {
        self.data_codewords() << 3
    }

    pub fn ecc_per_block(self) -> usize {
        self.capacity().ecc_per_block
    }

    pub fn block_count(self) -> usize {
        self.capacity().block_count
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        self.capacity().alignment_pattern
    }

    // Encoding region modules left over after the last full codeword
    pub const fn remainder_bits(self) -> usize {
        match self.0 {
            1 => 0,
            _ => 7,
        }
    }
}


// Capacity table, EC level L
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
struct Capacity {
    total_codewords: usize,
    data_codewords: usize,
    ecc_per_block: usize,
    block_count: usize,
    alignment_pattern: &'static [i16],
}

static CAPACITIES: [Capacity; MAX_VERSION] = [
    Capacity {
        total_codewords: 26,
        data_codewords: 19,
        ecc_per_block: 7,
        block_count: 1,
        alignment_pattern: &[],
    },
    Capacity {
        total_codewords: 44,
        data_codewords: 34,
        ecc_per_block: 10,
        block_count: 1,
        alignment_pattern: &[6, 18],
    },
    Capacity {
        total_codewords: 70,
        data_codewords: 55,
        ecc_per_block: 15,
        block_count: 1,
        alignment_pattern: &[6, 22],
    },
    Capacity {
        total_codewords: 100,
        data_codewords: 80,
        ecc_per_block: 20,
        block_count: 1,
        alignment_pattern: &[6, 26],
    },
    Capacity {
        total_codewords: 134,
        data_codewords: 108,
        ecc_per_block: 26,
        block_count: 1,
        alignment_pattern: &[6, 30],
    },
    Capacity {
        total_codewords: 172,
        data_codewords: 136,
        ecc_per_block: 18,
        block_count: 2,
        alignment_pattern: &[6, 34],
    },
];

// Format information
//------------------------------------------------------------------------------

// EC level L is encoded as 01 in the format data
pub const EC_LEVEL_L_BITS: u32 = 0b01;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

// MSB first, around the top left finder
pub static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

// MSB first, split across the bottom left and top right finders
pub static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];
