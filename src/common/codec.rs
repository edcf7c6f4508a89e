use super::bitstream::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

// Byte mode segmentation
//------------------------------------------------------------------------------

/// Expands `text` to byte mode data, one UTF-16 code unit at a time. A code
/// unit above a threshold is spread over continuation bytes; when any unit
/// expanded, a UTF-8 BOM is prepended so readers pick the right charset.
///
/// The thresholds are exclusive, so 0x80 and 0x800 themselves stay in the
/// shorter form. Surrogate halves are expanded independently. Both quirks are
/// kept for compatibility with symbols already in circulation.
pub fn to_byte_mode(text: &str) -> Vec<u8> {
    let units: Vec<u32> = text.encode_utf16().map(u32::from).collect();
    let mut out = Vec::with_capacity(units.len());
    for &code in &units {
        if code > 0x10000 {
            out.push(0xF0 | ((code & 0x1C0000) >> 18) as u8);
            out.push(0x80 | ((code & 0x3F000) >> 12) as u8);
            out.push(0x80 | ((code & 0xFC0) >> 6) as u8);
            out.push(0x80 | (code & 0x3F) as u8);
        } else if code > 0x800 {
            out.push(0xE0 | ((code & 0xF000) >> 12) as u8);
            out.push(0x80 | ((code & 0xFC0) >> 6) as u8);
            out.push(0x80 | (code & 0x3F) as u8);
        } else if code > 0x80 {
            out.push(0xC0 | ((code & 0x7C0) >> 6) as u8);
            out.push(0x80 | (code & 0x3F) as u8);
        } else {
            out.push(code as u8);
        }
    }
    if out.len() != units.len() {
        let mut with_bom = Vec::with_capacity(out.len() + 3);
        with_bom.extend_from_slice(&UTF8_BOM);
        with_bom.extend_from_slice(&out);
        out = with_bom;
    }
    out
}

// Version selection
//------------------------------------------------------------------------------

fn encoded_bit_len(data_len: usize, version: Version) -> usize {
    MODE_INDICATOR_BIT_LEN + version.char_count_bit_len() + (data_len << 3)
}

/// Smallest version whose data capacity at `ec_level` holds `data_len` bytes
/// of byte mode data.
pub fn fit_version(data_len: usize, ec_level: ECLevel) -> QRResult<Version> {
    for v in 1..=40 {
        let version = Version::new(v);
        if encoded_bit_len(data_len, version) <= version.data_bit_capacity(ec_level)? {
            return Ok(version);
        }
    }
    Err(QRError::DataTooLong)
}

// Data stream assembly
//------------------------------------------------------------------------------

/// Packs `data` into the data codeword stream for `(version, ec_level)`: mode
/// indicator, character count, data bytes, then a terminator (shortened if
/// fewer than 4 bits remain), zero fill to a codeword boundary and alternating
/// padding codewords up to capacity.
pub fn make_data_stream(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<BitStream> {
    let capacity = version.data_bit_capacity(ec_level)?;
    if encoded_bit_len(data.len(), version) > capacity {
        return Err(QRError::DataTooLong);
    }

    let mut bs = BitStream::new(capacity);
    bs.push_bits(MODE_INDICATOR, MODE_INDICATOR_BIT_LEN);
    bs.push_bits(data.len() as u16, version.char_count_bit_len());
    for &byte in data {
        bs.push_bits(byte as u16, 8);
    }

    let terminator_len = std::cmp::min(TERMINATOR_BIT_LEN, capacity - bs.len());
    bs.push_bits(0, terminator_len);
    if bs.len() & 7 != 0 {
        bs.push_bits(0, 8 - (bs.len() & 7));
    }
    let mut pad = PADDING_CODEWORDS.iter().cycle();
    while bs.len() < capacity {
        bs.push_bits(*pad.next().unwrap() as u16, 8);
    }
    Ok(bs)
}


// Global constants
//------------------------------------------------------------------------------

const MODE_INDICATOR: u16 = 0b0100;
const MODE_INDICATOR_BIT_LEN: usize = 4;
const TERMINATOR_BIT_LEN: usize = 4;
const PADDING_CODEWORDS: [u8; 2] = [0xEC, 0x11];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
