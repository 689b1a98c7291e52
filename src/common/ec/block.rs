use super::encoder::ecc;

// Data codewords of one block paired with the ecc computed over them
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct Block<'a> {
    data: &'a [u8],
    ecc: Vec<u8>,
}

impl<'a> Block<'a> {
    pub fn new(data: &'a [u8], ecc_len: usize) -> Self {
        Self { data, ecc: ecc(data, ecc_len) }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn ecc(&self) -> &[u8] {
        &self.ecc
    }
}

#[cfg(test)]
mod block_tests {
    use super::Block;

    #[test]
    fn test_block() {
        let data = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let block = Block::new(data, 10);
        assert_eq!(block.data(), data);
        assert_eq!(block.ecc(), b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }
}
