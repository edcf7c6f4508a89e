mod symbol;

pub use symbol::Symbol;

use crate::common::bitstream::BitStream;
use crate::common::codec::{fit_version, make_data_stream, to_byte_mode};
use crate::common::error::QRResult;
use crate::common::gf::Polynomial;
use crate::common::mask::{apply_best_mask, MaskPattern};
use crate::common::metadata::{rs_blocks, ECLevel, RSBlock, Version};

// Builder
//------------------------------------------------------------------------------

/// Builds a [`Symbol`] from text, with optional pinning of the version and
/// mask pattern. Anything left unpinned is chosen automatically: the smallest
/// version that fits and the lowest-penalty mask.
pub struct QRBuilder<'a> {
    text: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Symbol> {
        let data = to_byte_mode(self.text);

        let version = match self.version {
            Some(v) => v,
            None => fit_version(data.len(), self.ec_level)?,
        };
        let encoded = make_data_stream(&data, version, self.ec_level)?;

        let blocks = rs_blocks(version, self.ec_level)?;
        let (data_blocks, ecc_blocks) = Self::compute_ecc(encoded.data(), &blocks);

        let mut payload = BitStream::new(version.total_codewords(self.ec_level)? << 3);
        for byte in Self::interleave(&data_blocks) {
            payload.push_bits(byte as u16, 8);
        }
        for byte in Self::interleave(&ecc_blocks) {
            payload.push_bits(byte as u16, 8);
        }

        let mut symbol = Symbol::new(version, self.ec_level);
        symbol.draw_all_function_patterns();
        symbol.draw_encoding_region(&payload);

        match self.mask {
            Some(m) => symbol.apply_mask(m),
            None => {
                apply_best_mask(&mut symbol);
            }
        }

        Ok(symbol)
    }

    fn compute_ecc<'b>(data: &'b [u8], blocks: &[RSBlock]) -> (Vec<&'b [u8]>, Vec<Vec<u8>>) {
        let data_blocks = Self::blockify(data, blocks);
        let ecc_blocks =
            data_blocks.iter().zip(blocks).map(|(b, rs)| Self::ecc(b, rs.ec_len())).collect();
        (data_blocks, ecc_blocks)
    }

    fn blockify<'b>(data: &'b [u8], blocks: &[RSBlock]) -> Vec<&'b [u8]> {
        let total_size: usize = blocks.iter().map(|b| b.data).sum();
        debug_assert!(
            total_size == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {total_size}",
            data.len(),
        );

        let mut data_blocks = Vec::with_capacity(blocks.len());
        let mut pos = 0;
        for block in blocks {
            data_blocks.push(&data[pos..pos + block.data]);
            pos += block.data;
        }
        data_blocks
    }

    // Remainder of the data polynomial times x^ec_len against the generator,
    // left padded back to ec_len codewords
    fn ecc(block: &[u8], ec_len: usize) -> Vec<u8> {
        let rem = Polynomial::new(block, ec_len).rem(&Polynomial::generator(ec_len));
        let mut out = vec![0; ec_len - rem.len()];
        out.extend_from_slice(rem.coeffs());
        out
    }

    // Round-robin: one codeword from each block in turn, shorter blocks
    // dropping out as they run dry
    fn interleave<T: Copy, V: std::ops::Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().expect("Blocks is empty");
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
