use std::fmt::{Display, Formatter};

use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Module color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Light,
    Dark,
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Format information payload bits for this level. The on-wire encoding
    /// flips the second bit, so L=01, M=00, Q=11, H=10.
    pub fn format_bits(self) -> u32 {
        self as u32 ^ 1
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(s)
    }
}

// Version
//------------------------------------------------------------------------------

/// Normal QR symbol version, 1 through 40.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub fn new(version: u8) -> Self {
        debug_assert!((1..=40).contains(&version), "Invalid version: {version}");
        Self(version)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Symbol width and height in modules.
    pub fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    /// Byte-mode character count field width in bits.
    pub fn char_count_bit_len(self) -> usize {
        if self.0 < 10 {
            8
        } else {
            16
        }
    }

    /// Centers of the alignment patterns along one axis; the full set is the
    /// cartesian product minus the corners covered by finders.
    pub fn alignment_coords(self) -> &'static [i16] {
        ALIGNMENT_COORDS[self.0 as usize - 1]
    }

    pub fn total_codewords(self, ec_level: ECLevel) -> QRResult<usize> {
        Ok(rs_block_groups(self, ec_level)?.iter().map(|&(n, total, _)| n * total).sum())
    }

    /// Number of data codewords available at `ec_level`.
    pub fn data_codewords(self, ec_level: ECLevel) -> QRResult<usize> {
        Ok(rs_block_groups(self, ec_level)?.iter().map(|&(n, _, data)| n * data).sum())
    }

    /// Data capacity in bits at `ec_level`.
    pub fn data_bit_capacity(self, ec_level: ECLevel) -> QRResult<usize> {
        Ok(self.data_codewords(ec_level)? << 3)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Reed-Solomon block table
//------------------------------------------------------------------------------

/// One error correction block: `total` codewords of which `data` carry
/// message bytes; the remaining `total - data` are ECC.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RSBlock {
    pub total: usize,
    pub data: usize,
}

impl RSBlock {
    pub fn ec_len(self) -> usize {
        self.total - self.data
    }
}

fn rs_block_groups(
    version: Version,
    ec_level: ECLevel,
) -> QRResult<&'static [(usize, usize, usize)]> {
    let index = (version.0 as usize).wrapping_sub(1) * 4 + ec_level as usize;
    RS_BLOCK_TABLE.get(index).copied().ok_or(QRError::InvalidCapacityConfig)
}

/// Per-block descriptors for `(version, ec_level)`, in transmission order.
/// Fails with [`QRError::InvalidCapacityConfig`] when the lookup misses the
/// table.
pub fn rs_blocks(version: Version, ec_level: ECLevel) -> QRResult<Vec<RSBlock>> {
    let mut blocks = Vec::new();
    for &(count, total, data) in rs_block_groups(version, ec_level)? {
        blocks.extend(std::iter::repeat(RSBlock { total, data }).take(count));
    }
    Ok(blocks)
}

// Groups of (block count, total codewords, data codewords) per version, in
// L, M, Q, H order.
static RS_BLOCK_TABLE: [&[(usize, usize, usize)]; 160] = [
    &[(1, 26, 19)], &[(1, 26, 16)], &[(1, 26, 13)], &[(1, 26, 9)], // 1
    &[(1, 44, 34)], &[(1, 44, 28)], &[(1, 44, 22)], &[(1, 44, 16)], // 2
    &[(1, 70, 55)], &[(1, 70, 44)], &[(2, 35, 17)], &[(2, 35, 13)], // 3
    &[(1, 100, 80)], &[(2, 50, 32)], &[(2, 50, 24)], &[(4, 25, 9)], // 4
    &[(1, 134, 108)], &[(2, 67, 43)], &[(2, 33, 15), (2, 34, 16)], &[(2, 33, 11), (2, 34, 12)], // 5
    &[(2, 86, 68)], &[(4, 43, 27)], &[(4, 43, 19)], &[(4, 43, 15)], // 6
    &[(2, 98, 78)], &[(4, 49, 31)], &[(2, 32, 14), (4, 33, 15)], &[(4, 39, 13), (1, 40, 14)], // 7
    &[(2, 121, 97)], &[(2, 60, 38), (2, 61, 39)], &[(4, 40, 18), (2, 41, 19)], &[(4, 40, 14), (2, 41, 15)], // 8
    &[(2, 146, 116)], &[(3, 58, 36), (2, 59, 37)], &[(4, 36, 16), (4, 37, 17)], &[(4, 36, 12), (4, 37, 13)], // 9
    &[(2, 86, 68), (2, 87, 69)], &[(4, 69, 43), (1, 70, 44)], &[(6, 43, 19), (2, 44, 20)], &[(6, 43, 15), (2, 44, 16)], // 10
    &[(4, 101, 81)], &[(1, 80, 50), (4, 81, 51)], &[(4, 50, 22), (4, 51, 23)], &[(3, 36, 12), (8, 37, 13)], // 11
    &[(2, 116, 92), (2, 117, 93)], &[(6, 58, 36), (2, 59, 37)], &[(4, 46, 20), (6, 47, 21)], &[(7, 42, 14), (4, 43, 15)], // 12
    &[(4, 133, 107)], &[(8, 59, 37), (1, 60, 38)], &[(8, 44, 20), (4, 45, 21)], &[(12, 33, 11), (4, 34, 12)], // 13
    &[(3, 145, 115), (1, 146, 116)], &[(4, 64, 40), (5, 65, 41)], &[(11, 36, 16), (5, 37, 17)], &[(11, 36, 12), (5, 37, 13)], // 14
    &[(5, 109, 87), (1, 110, 88)], &[(5, 65, 41), (5, 66, 42)], &[(5, 54, 24), (7, 55, 25)], &[(11, 36, 12), (7, 37, 13)], // 15
    &[(5, 122, 98), (1, 123, 99)], &[(7, 73, 45), (3, 74, 46)], &[(15, 43, 19), (2, 44, 20)], &[(3, 45, 15), (13, 46, 16)], // 16
    &[(1, 135, 107), (5, 136, 108)], &[(10, 74, 46), (1, 75, 47)], &[(1, 50, 22), (15, 51, 23)], &[(2, 42, 14), (17, 43, 15)], // 17
    &[(5, 150, 120), (1, 151, 121)], &[(9, 69, 43), (4, 70, 44)], &[(17, 50, 22), (1, 51, 23)], &[(2, 42, 14), (19, 43, 15)], // 18
    &[(3, 141, 113), (4, 142, 114)], &[(3, 70, 44), (11, 71, 45)], &[(17, 47, 21), (4, 48, 22)], &[(9, 39, 13), (16, 40, 14)], // 19
    &[(3, 135, 107), (5, 136, 108)], &[(3, 67, 41), (13, 68, 42)], &[(15, 54, 24), (5, 55, 25)], &[(15, 43, 15), (10, 44, 16)], // 20
    &[(4, 144, 116), (4, 145, 117)], &[(17, 68, 42)], &[(17, 50, 22), (6, 51, 23)], &[(19, 46, 16), (6, 47, 17)], // 21
    &[(2, 139, 111), (7, 140, 112)], &[(17, 74, 46)], &[(7, 54, 24), (16, 55, 25)], &[(34, 37, 13)], // 22
    &[(4, 151, 121), (5, 152, 122)], &[(4, 75, 47), (14, 76, 48)], &[(11, 54, 24), (14, 55, 25)], &[(16, 45, 15), (14, 46, 16)], // 23
    &[(6, 147, 117), (4, 148, 118)], &[(6, 73, 45), (14, 74, 46)], &[(11, 54, 24), (16, 55, 25)], &[(30, 46, 16), (2, 47, 17)], // 24
    &[(8, 132, 106), (4, 133, 107)], &[(8, 75, 47), (13, 76, 48)], &[(7, 54, 24), (22, 55, 25)], &[(22, 45, 15), (13, 46, 16)], // 25
    &[(10, 142, 114), (2, 143, 115)], &[(19, 74, 46), (4, 75, 47)], &[(28, 50, 22), (6, 51, 23)], &[(33, 46, 16), (4, 47, 17)], // 26
    &[(8, 152, 122), (4, 153, 123)], &[(22, 73, 45), (3, 74, 46)], &[(8, 53, 23), (26, 54, 24)], &[(12, 45, 15), (28, 46, 16)], // 27
    &[(3, 147, 117), (10, 148, 118)], &[(3, 73, 45), (23, 74, 46)], &[(4, 54, 24), (31, 55, 25)], &[(11, 45, 15), (31, 46, 16)], // 28
    &[(7, 146, 116), (7, 147, 117)], &[(21, 73, 45), (7, 74, 46)], &[(1, 53, 23), (37, 54, 24)], &[(19, 45, 15), (26, 46, 16)], // 29
    &[(5, 145, 115), (10, 146, 116)], &[(19, 75, 47), (10, 76, 48)], &[(15, 54, 24), (25, 55, 25)], &[(23, 45, 15), (25, 46, 16)], // 30
    &[(13, 145, 115), (3, 146, 116)], &[(2, 74, 46), (29, 75, 47)], &[(42, 54, 24), (1, 55, 25)], &[(23, 45, 15), (28, 46, 16)], // 31
    &[(17, 145, 115)], &[(10, 74, 46), (23, 75, 47)], &[(10, 54, 24), (35, 55, 25)], &[(19, 45, 15), (35, 46, 16)], // 32
    &[(17, 145, 115), (1, 146, 116)], &[(14, 74, 46), (21, 75, 47)], &[(29, 54, 24), (19, 55, 25)], &[(11, 45, 15), (46, 46, 16)], // 33
    &[(13, 145, 115), (6, 146, 116)], &[(14, 74, 46), (23, 75, 47)], &[(44, 54, 24), (7, 55, 25)], &[(59, 46, 16), (1, 47, 17)], // 34
    &[(12, 151, 121), (7, 152, 122)], &[(12, 75, 47), (26, 76, 48)], &[(39, 54, 24), (14, 55, 25)], &[(22, 45, 15), (41, 46, 16)], // 35
    &[(6, 151, 121), (14, 152, 122)], &[(6, 75, 47), (34, 76, 48)], &[(46, 54, 24), (10, 55, 25)], &[(2, 45, 15), (64, 46, 16)], // 36
    &[(17, 152, 122), (4, 153, 123)], &[(29, 74, 46), (14, 75, 47)], &[(49, 54, 24), (10, 55, 25)], &[(24, 45, 15), (46, 46, 16)], // 37
    &[(4, 152, 122), (18, 153, 123)], &[(13, 74, 46), (32, 75, 47)], &[(48, 54, 24), (14, 55, 25)], &[(42, 45, 15), (32, 46, 16)], // 38
    &[(20, 147, 117), (4, 148, 118)], &[(40, 75, 47), (7, 76, 48)], &[(43, 54, 24), (22, 55, 25)], &[(10, 45, 15), (67, 46, 16)], // 39
    &[(19, 148, 118), (6, 149, 119)], &[(18, 75, 47), (31, 76, 48)], &[(34, 54, 24), (34, 55, 25)], &[(20, 45, 15), (61, 46, 16)], // 40
];

// Alignment pattern coordinates
//------------------------------------------------------------------------------

static ALIGNMENT_COORDS: [&[i16]; 40] = [
    &[], // 1
    &[6, 18], // 2
    &[6, 22], // 3
    &[6, 26], // 4
    &[6, 30], // 5
    &[6, 34], // 6
    &[6, 22, 38], // 7
    &[6, 24, 42], // 8
    &[6, 26, 46], // 9
    &[6, 28, 50], // 10
    &[6, 30, 54], // 11
    &[6, 32, 58], // 12
    &[6, 34, 62], // 13
    &[6, 26, 46, 66], // 14
    &[6, 26, 48, 70], // 15
    &[6, 26, 50, 74], // 16
    &[6, 30, 54, 78], // 17
    &[6, 30, 56, 82], // 18
    &[6, 30, 58, 86], // 19
    &[6, 34, 62, 90], // 20
    &[6, 28, 50, 72, 94], // 21
    &[6, 26, 50, 74, 98], // 22
    &[6, 30, 54, 78, 102], // 23
    &[6, 28, 54, 80, 106], // 24
    &[6, 32, 58, 84, 110], // 25
    &[6, 30, 58, 86, 114], // 26
    &[6, 34, 62, 90, 118], // 27
    &[6, 26, 50, 74, 98, 122], // 28
    &[6, 30, 54, 78, 102, 126], // 29
    &[6, 26, 52, 78, 104, 130], // 30
    &[6, 30, 56, 82, 108, 134], // 31
    &[6, 34, 60, 86, 112, 138], // 32
    &[6, 30, 58, 86, 114, 142], // 33
    &[6, 34, 62, 90, 118, 146], // 34
    &[6, 30, 54, 78, 102, 126, 150], // 35
    &[6, 24, 50, 76, 102, 128, 154], // 36
    &[6, 28, 54, 80, 106, 132, 158], // 37
    &[6, 32, 58, 84, 110, 136, 162], // 38
    &[6, 26, 54, 82, 110, 138, 166], // 39
    &[6, 30, 58, 86, 114, 142, 170], // 40
];

// Format & version information
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;
pub const VERSION_INFO_BIT_LEN: usize = 18;

// BCH(15, 5) generator for format info, its masking pattern, and the
// BCH(18, 6) generator for version info.
const G15: u32 = 0b101_0011_0111;
const G15_MASK: u32 = 0b101_0100_0001_0010;
const G18: u32 = 0b1_1111_0010_0101;

fn bch_bit_len(value: u32) -> u32 {
    32 - value.leading_zeros()
}

fn bch_rem(value: u32, generator: u32) -> u32 {
    let mut rem = value;
    while bch_bit_len(rem) >= bch_bit_len(generator) {
        rem ^= generator << (bch_bit_len(rem) - bch_bit_len(generator));
    }
    rem
}

/// 15-bit format information word: 5 payload bits (level then mask pattern),
/// 10 BCH check bits, XORed with the fixed mask to avoid all-zero sequences.
pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let payload = (ec_level.format_bits() << 3) | *mask as u32;
    let shifted = payload << 10;
    ((shifted | bch_rem(shifted, G15)) ^ G15_MASK) & 0x7FFF
}

/// 18-bit version information word for versions 7 and up: 6 version bits
/// followed by 12 BCH check bits.
pub fn version_info(version: Version) -> u32 {
    debug_assert!(version.number() >= 7, "No version info below version 7: {version}");

    let shifted = (version.number() as u32) << 12;
    shifted | bch_rem(shifted, G18)
}

// Format info bit coordinates, most significant bit first. Negative
// coordinates count backwards from the far edge.
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
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

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
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

// Version info bit coordinates, most significant bit first: a 3x6 block by
// the top-right finder and its transpose by the bottom-left finder.
pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::super::mask::MaskPattern;
    use super::{format_info, rs_blocks, version_info, ECLevel, RSBlock, Version};

    #[test]
    fn test_width() {
        assert_eq!(Version::new(1).width(), 21);
        assert_eq!(Version::new(7).width(), 45);
        assert_eq!(Version::new(40).width(), 177);
    }

    #[test]
    fn test_char_count_bit_len() {
        assert_eq!(Version::new(9).char_count_bit_len(), 8);
        assert_eq!(Version::new(10).char_count_bit_len(), 16);
    }

    #[test_case(1, ECLevel::M, &[RSBlock { total: 26, data: 16 }])]
    #[test_case(1, ECLevel::H, &[RSBlock { total: 26, data: 9 }])]
    #[test_case(3, ECLevel::Q, &[RSBlock { total: 35, data: 17 }, RSBlock { total: 35, data: 17 }])]
    #[test_case(5, ECLevel::Q, &[RSBlock { total: 33, data: 15 }, RSBlock { total: 33, data: 15 },
        RSBlock { total: 34, data: 16 }, RSBlock { total: 34, data: 16 }])]
    fn test_rs_blocks(version: u8, ec_level: ECLevel, expected: &[RSBlock]) {
        assert_eq!(rs_blocks(Version::new(version), ec_level).unwrap(), expected);
    }

    #[test]
    fn test_total_codewords_match_symbol_size() {
        // Total codewords are a property of the version alone.
        let expected: [usize; 10] = [26, 44, 70, 100, 134, 172, 196, 242, 292, 346];
        for (i, &total) in expected.iter().enumerate() {
            let version = Version::new(i as u8 + 1);
            for ec_level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                assert_eq!(version.total_codewords(ec_level).unwrap(), total);
            }
        }
    }

    #[test]
    fn test_data_capacity() {
        assert_eq!(Version::new(1).data_bit_capacity(ECLevel::M).unwrap(), 128);
        assert_eq!(Version::new(40).data_codewords(ECLevel::L).unwrap(), 2956);
    }

    #[test]
    fn test_alignment_coords() {
        assert!(Version::new(1).alignment_coords().is_empty());
        assert_eq!(Version::new(2).alignment_coords(), &[6, 18]);
        assert_eq!(Version::new(7).alignment_coords(), &[6, 22, 38]);
        assert_eq!(Version::new(40).alignment_coords(), &[6, 30, 58, 86, 114, 142, 170]);
    }

    #[test_case(MaskPattern::new(0), 0b111_0111_1100_0100)]
    #[test_case(MaskPattern::new(1), 0b111_0010_1111_0011)]
    #[test_case(MaskPattern::new(7), 0b110_1001_0111_0110)]
    fn test_format_info_level_l(mask: MaskPattern, expected: u32) {
        assert_eq!(format_info(ECLevel::L, mask), expected);
    }

    #[test]
    fn test_format_info_is_distinct() {
        let mut seen = std::collections::HashSet::new();
        for ec_level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            for pattern in 0..8 {
                assert!(seen.insert(format_info(ec_level, MaskPattern::new(pattern))));
            }
        }
        assert_eq!(seen.len(), 32);
    }

    #[test_case(7, 0b00_0111_1100_1001_0100)]
    #[test_case(18, 0b01_0010_1010_0001_0111)]
    #[test_case(40, 0b10_1000_1100_0110_1001)]
    fn test_version_info(version: u8, expected: u32) {
        assert_eq!(version_info(Version::new(version)), expected);
    }
}
