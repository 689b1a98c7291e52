mod qr;

#[cfg(test)]
pub(crate) use qr::Module;
pub use qr::QR;

use std::ops::Deref;

use log::{debug, trace};

use crate::common::{
    codec::{encode, encode_with_version},
    ec::Block,
    error::QRResult,
    mask::FORMAT_INFO,
    metadata::Version,
    BitStream,
};

/// Configures and builds a [`QR`] symbol. Byte mode, EC level L and the checkerboard mask are
/// fixed; only the payload and optionally the version can be set.
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Forces a version instead of picking the smallest one that fits.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!("{{ Version: {}, Ec level: L, Mask: Checkerboard }}", *v),
            None => "{ Version: None, Ec level: L, Mask: Checkerboard }".to_string(),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}...", self.metadata());

        debug!("Encoding {} bytes...", self.data.len());
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v)?, v),
            None => encode(self.data)?,
        };
        debug!("Selected version {}", *version);

        debug!("Constructing payload with ecc & interleaving...");
        let payload = Self::build_payload(encoded_data.data(), version);

        debug!("Constructing QR...");
        let mut qr = QR::new(version);

        debug!("Drawing functional patterns...");
        qr.draw_all_function_patterns();

        debug!("Drawing format info...");
        qr.draw_format_info(FORMAT_INFO);

        debug!("Drawing encoding region...");
        qr.draw_encoding_region(&payload);

        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "QR generated: {}, Width: {}, Dark cells: {}, Light cells: {}, Balance: {}%",
            qr.metadata(),
            qr.width(),
            dark_modules,
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }

    // Data codewords interleaved across blocks, followed by the interleaved ecc
    fn build_payload(data: &[u8], version: Version) -> BitStream {
        let blocks = Self::compute_ecc(data, version);

        let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
        let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();

        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));
        payload
    }

    // ECC: Error Correction Codeword generator
    fn compute_ecc(data: &[u8], version: Version) -> Vec<Block<'_>> {
        let ecc_size_per_block = version.ecc_per_block();
        Self::blockify(data, version)
            .into_iter()
            .enumerate()
            .map(|(i, b)| {
                trace!("Block {i}: Data len {}, Ecc len {ecc_size_per_block}", b.len());
                Block::new(b, ecc_size_per_block)
            })
            .collect()
    }

    // Splits data into contiguous blocks. When the split is uneven the later blocks carry
    // one extra codeword.
    pub(crate) fn blockify(data: &[u8], version: Version) -> Vec<&[u8]> {
        let block_count = version.block_count();
        debug_assert!(
            data.len() == version.data_codewords(),
            "Data len doesn't match data codewords: Data len {}, Data codewords {}",
            data.len(),
            version.data_codewords()
        );

        let short_size = data.len() / block_count;
        let long_count = data.len() % block_count;
        let short_count = block_count - long_count;

        let mut data_blocks = Vec::with_capacity(block_count);
        let (short, long) = data.split_at(short_size * short_count);
        data_blocks.extend(short.chunks(short_size.max(1)));
        if long_count > 0 {
            data_blocks.extend(long.chunks(short_size + 1));
        }
        data_blocks
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod builder_tests {
    use test_case::test_case;

    use super::QRBuilder;
    use crate::common::{codec::encode, error::QRError, Version, MAX_DATA_LEN};

    #[test]
    fn test_compute_ecc_single_block() {
        let ver = Version::new(1).unwrap();
        let (encoded, _) = encode(b"CYBERSHIELD").unwrap();
        let blocks = QRBuilder::compute_ecc(encoded.data(), ver);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].data(), encoded.data());
        assert_eq!(blocks[0].ecc().len(), 7);
    }

    #[test]
    fn test_compute_ecc_two_blocks() {
        let ver = Version::new(6).unwrap();
        let data = (0..136).map(|i| i as u8).collect::<Vec<_>>();
        let blocks = QRBuilder::compute_ecc(&data, ver);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].data(), &data[..68]);
        assert_eq!(blocks[1].data(), &data[68..]);
        assert!(blocks.iter().all(|b| b.ecc().len() == 18));
        assert_ne!(blocks[0].ecc(), blocks[1].ecc());
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = QRBuilder::interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }

    #[test]
    fn test_interleave_single_block() {
        let blocks = vec![vec![1, 2, 3]];
        assert_eq!(QRBuilder::interleave(&blocks), vec![1, 2, 3]);
    }

    #[test]
    fn test_build_payload_two_blocks() {
        let ver = Version::new(6).unwrap();
        let data = (0..136).map(|i| i as u8).collect::<Vec<_>>();
        let payload = QRBuilder::build_payload(&data, ver);
        let bytes = payload.data();
        assert_eq!(bytes.len(), 172);
        assert_eq!(bytes[..6], [0, 68, 1, 69, 2, 70]);
        assert_eq!(bytes[134..136], [67, 135]);

        let blocks = QRBuilder::compute_ecc(&data, ver);
        assert_eq!(bytes[136], blocks[0].ecc()[0]);
        assert_eq!(bytes[137], blocks[1].ecc()[0]);
        assert_eq!(bytes[171], blocks[1].ecc()[17]);
    }

    #[test]
    fn test_blockify_even_split() {
        let ver = Version::new(6).unwrap();
        let data = vec![0u8; 136];
        let blocks = QRBuilder::blockify(&data, ver);
        assert_eq!(blocks.iter().map(|b| b.len()).collect::<Vec<_>>(), vec![68, 68]);
    }

    #[test_case("A", 1)]
    #[test_case("CYBERSHIELD", 1)]
    #[test_case("https://cybershield.example/join?room=ABCD-1234-EF", 3)]
    #[test_case(&"x".repeat(80), 5)]
    #[test_case(&"x".repeat(MAX_DATA_LEN), 6)]
    #[test_case("", 1)]
    fn test_builder_version(data: &str, exp_ver: usize) {
        let qr = QRBuilder::new(data.as_bytes()).build().unwrap();
        assert_eq!(*qr.version(), exp_ver);
        assert_eq!(qr.width(), 17 + 4 * exp_ver);
    }

    #[test]
    fn test_builder_forced_version() {
        let qr = QRBuilder::new(b"CYBERSHIELD").version(Version::new(4).unwrap()).build().unwrap();
        assert_eq!(*qr.version(), 4);
        assert_eq!(qr.width(), 33);
    }

    #[test]
    fn test_builder_forced_version_overflow() {
        let data = "x".repeat(18);
        let res = QRBuilder::new(data.as_bytes()).version(Version::new(1).unwrap()).build();
        assert_eq!(res, Err(QRError::CapacityExceeded));
    }

    #[test]
    fn test_builder_data_overflow() {
        let data = "x".repeat(MAX_DATA_LEN + 1);
        let res = QRBuilder::new(data.as_bytes()).build();
        assert_eq!(res, Err(QRError::CapacityExceeded));
    }

    #[test]
    fn test_builder_deterministic() {
        let data = b"https://cybershield.example/join?room=QX7P";
        let a = QRBuilder::new(data).build().unwrap();
        let b = QRBuilder::new(data).build().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_bool_grid(), b.to_bool_grid());
    }
}
