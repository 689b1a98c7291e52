use log::debug;

use crate::common::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    metadata::{Version, MAX_VERSION},
};

// Byte mode header & padding
//------------------------------------------------------------------------------

pub const BYTE_MODE: u16 = 0b0100;

pub const MODE_BITS: usize = 4;

// Char count field width for byte mode in versions 1-9
pub const CHAR_CNT_BITS: usize = 8;

// Mode indicator + char count, rounded up to whole codewords
pub const ENCODING_OVERHEAD: usize = (MODE_BITS + CHAR_CNT_BITS + 7) >> 3;

pub const PADDING_CODEWORDS: [u8; 2] = [0b11101100, 0b00010001];

/// Longest payload, in bytes, that fits the largest supported version.
pub const MAX_DATA_LEN: usize = 136 - ENCODING_OVERHEAD;

// Encoder
//------------------------------------------------------------------------------

pub fn encode(data: &[u8]) -> QRResult<(BitStream, Version)> {
    let ver = find_version(data.len())?;
    let bs = encode_with_version(data, ver)?;
    Ok((bs, ver))
}

pub fn encode_with_version(data: &[u8], ver: Version) -> QRResult<BitStream> {
    if data.len() + ENCODING_OVERHEAD > ver.data_codewords() {
        debug!(
            "Data of {} bytes doesn't fit version {}: Capacity {}",
            data.len(),
            *ver,
            ver.data_codewords() - ENCODING_OVERHEAD
        );
        return Err(QRError::CapacityExceeded);
    }

    let mut bs = BitStream::new(ver.data_bit_capacity());
    push_header(data.len(), &mut bs);
    push_byte_data(data, &mut bs);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);

    debug_assert_eq!(
        bs.len() >> 3,
        ver.data_codewords(),
        "Encoded length doesn't match data codewords"
    );
    Ok(bs)
}

// Smallest version whose data capacity holds the data and header
pub fn find_version(data_len: usize) -> QRResult<Version> {
    let required = data_len + ENCODING_OVERHEAD;
    match Version::all().find(|v| v.data_codewords() >= required) {
        Some(ver) => Ok(ver),
        None => {
            debug!(
                "Data of {data_len} bytes exceeds capacity of version {MAX_VERSION}: Max {MAX_DATA_LEN}"
            );
            Err(QRError::CapacityExceeded)
        }
    }
}

// Writer
//------------------------------------------------------------------------------

fn push_header(char_cnt: usize, out: &mut BitStream) {
    debug_assert!(
        char_cnt < (1 << CHAR_CNT_BITS),
        "Char count exceeds bit length: Char count {char_cnt}, Char count bits {CHAR_CNT_BITS}"
    );
    out.push_bits(BYTE_MODE, MODE_BITS);
    out.push_bits(char_cnt as u16, CHAR_CNT_BITS);
}

fn push_byte_data(data: &[u8], out: &mut BitStream) {
    out.extend(data);
}

fn push_terminator(out: &mut BitStream) {
    let bit_len = out.len();
    let bit_capacity = out.capacity();
    if bit_len < bit_capacity {
        let term_len = std::cmp::min(4, bit_capacity - bit_len);
        out.push_bits(0, term_len);
    }
}

fn pad_remaining_capacity(out: &mut BitStream) {
    push_padding_bits(out);
    push_padding_codewords(out);
}

fn push_padding_bits(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        let padding_bits_len = 8 - offset;
        out.push_bits(0, padding_bits_len);
    }
}

fn push_padding_codewords(out: &mut BitStream) {
    let offset = out.len() & 7;
    debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {}", offset);

    let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc as u16, 8);
    });
}

#[cfg(test)]
mod encode_tests {
    use test_case::test_case;

    use super::{
        encode, encode_with_version, find_version, push_header, push_padding_bits,
        push_padding_codewords, push_terminator, MAX_DATA_LEN, PADDING_CODEWORDS,
    };
    use crate::common::{bitstream::BitStream, error::QRError, metadata::Version};

    #[test]
    fn test_push_header() {
        let mut bs = BitStream::new(152);
        push_header(11, &mut bs);
        assert_eq!(bs.len(), 12);
        assert_eq!(bs.data(), [0b01000000, 0b10110000]);
    }

    #[test]
    fn test_push_terminator_full() {
        let mut bs = BitStream::new(16);
        bs.push_bits(0xFFF, 12);
        push_terminator(&mut bs);
        assert_eq!(bs.len(), 16);
    }

    #[test]
    fn test_push_terminator_partial() {
        let mut bs = BitStream::new(16);
        bs.push_bits(0x3FFF, 14);
        push_terminator(&mut bs);
        assert_eq!(bs.len(), 16);
        assert_eq!(bs.data(), [0xFF, 0b11111100]);
    }

    #[test]
    fn test_push_terminator_at_capacity() {
        let mut bs = BitStream::new(16);
        bs.push_bits(0xFFFF, 16);
        push_terminator(&mut bs);
        assert_eq!(bs.len(), 16);
    }

    #[test]
    fn test_push_padding_bits() {
        let mut bs = BitStream::new(32);
        bs.push_bits(0b101, 3);
        push_padding_bits(&mut bs);
        assert_eq!(bs.len(), 8);
        assert_eq!(bs.data(), [0b10100000]);
        push_padding_bits(&mut bs);
        assert_eq!(bs.len(), 8);
    }

    #[test]
    fn test_push_padding_codewords() {
        let mut bs = BitStream::new(48);
        bs.push_bits(0xAB, 8);
        push_padding_codewords(&mut bs);
        assert_eq!(bs.data(), [0xAB, 0xEC, 0x11, 0xEC, 0x11, 0xEC]);
    }

    #[test_case(0, 1)]
    #[test_case(11, 1)]
    #[test_case(17, 1)]
    #[test_case(18, 2)]
    #[test_case(32, 2)]
    #[test_case(33, 3)]
    #[test_case(78, 4)]
    #[test_case(80, 5)]
    #[test_case(106, 5)]
    #[test_case(107, 6)]
    #[test_case(134, 6)]
    fn test_find_version(data_len: usize, exp_ver: usize) {
        let ver = find_version(data_len).unwrap();
        assert_eq!(*ver, exp_ver);
        assert!(ver.data_codewords() >= data_len + 2);
    }

    #[test]
    fn test_find_version_overflow() {
        assert_eq!(find_version(MAX_DATA_LEN + 1), Err(QRError::CapacityExceeded));
    }

    #[test]
    fn test_encode_cybershield() {
        let (bs, ver) = encode(b"CYBERSHIELD").unwrap();
        assert_eq!(*ver, 1);
        let mut exp = vec![0x40, 0xB4, 0x35, 0x94, 0x24, 0x55, 0x25, 0x34, 0x84, 0x94, 0x54, 0xC4];
        exp.extend([0x40]);
        exp.extend(PADDING_CODEWORDS.iter().cycle().take(19 - exp.len()));
        assert_eq!(bs.data(), &exp[..]);
    }

    #[test]
    fn test_encode_empty() {
        let (bs, ver) = encode(b"").unwrap();
        assert_eq!(*ver, 1);
        let mut exp = vec![0x40, 0x00];
        exp.extend(PADDING_CODEWORDS.iter().cycle().take(17));
        assert_eq!(bs.data(), &exp[..]);
    }

    #[test]
    fn test_encode_max_len() {
        let data = vec![b'x'; MAX_DATA_LEN];
        let (bs, ver) = encode(&data).unwrap();
        assert_eq!(*ver, 6);
        assert_eq!(bs.len(), 136 * 8);
        // Header and data leave exactly 4 bits for the terminator
        assert_eq!(bs.data()[135] & 0x0F, 0);
    }

    #[test]
    fn test_encode_with_version_overflow() {
        let ver = Version::new(1).unwrap();
        assert!(encode_with_version(&[0; 17], ver).is_ok());
        assert_eq!(encode_with_version(&[0; 18], ver), Err(QRError::CapacityExceeded));
    }

    #[test]
    fn test_encode_with_larger_version() {
        let ver = Version::new(3).unwrap();
        let bs = encode_with_version(b"A", ver).unwrap();
        assert_eq!(bs.len(), 55 * 8);
    }
}
