use crate::common::bitstream::BitStream;
use crate::common::error::{QRError, QRResult};
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{
    format_info, version_info, Color, ECLevel, Version, FORMAT_INFO_BIT_LEN,
    FORMAT_INFO_COORDS_MAIN, FORMAT_INFO_COORDS_SIDE, VERSION_INFO_BIT_LEN,
    VERSION_INFO_COORDS_BL, VERSION_INFO_COORDS_TR,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Module {
    fn color(self) -> Color {
        match self {
            Module::Empty => Color::Light,
            Module::Func(c) | Module::Version(c) | Module::Format(c) | Module::Data(c) => c,
        }
    }
}

// Symbol grid
//------------------------------------------------------------------------------

/// The module grid of one QR symbol. Renderers only need [`module_count`] and
/// [`is_dark`]; everything else describes how the symbol was built.
///
/// [`module_count`]: Symbol::module_count
/// [`is_dark`]: Symbol::is_dark
#[derive(Debug, Clone)]
pub struct Symbol {
    grid: Box<[Module; MAX_GRID_SIZE]>,
    w: usize,
    version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl Symbol {
    pub(crate) fn new(version: Version, ec_level: ECLevel) -> Self {
        let w = version.width();
        Self { grid: Box::new([Module::Empty; MAX_GRID_SIZE]), w, version, ec_level, mask: None }
    }

    /// Symbol width and height in modules.
    pub fn module_count(&self) -> usize {
        self.w
    }

    /// Whether the module at `(r, c)` is dark. Fails with
    /// [`QRError::OutOfBounds`] outside the grid.
    pub fn is_dark(&self, r: usize, c: usize) -> QRResult<bool> {
        if r >= self.w || c >= self.w {
            return Err(QRError::OutOfBounds);
        }
        Ok(self.dark_at(r as i16, c as i16))
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn dark_module_count(&self) -> usize {
        let size = self.w * self.w;
        self.grid[..size].iter().filter(|m| m.color() == Color::Dark).count()
    }

    pub(crate) fn width(&self) -> usize {
        self.w
    }

    pub(crate) fn dark_at(&self, r: i16, c: i16) -> bool {
        self.get(r, c).color() == Color::Dark
    }

    #[cfg(test)]
    pub(crate) fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates count backwards from the far edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row out of range: {r}");
        debug_assert!(-w <= c && c < w, "Column out of range: {c}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub(crate) fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub(crate) fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl Symbol {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 finder centered at (r, c) along with the separator strip,
    // which pushes the bounding box to 8x8 towards the symbol center
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl Symbol {
    fn draw_alignment_patterns(&mut self) {
        let coords = self.version.alignment_coords();
        for &r in coords {
            for &c in coords {
                // Centers landing on a finder are skipped whole
                if self.get(r, c) == Module::Empty {
                    self.draw_alignment_pattern_at(r, c);
                }
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl Symbol {
    // Alternating run along row 6 and column 6 between the finders, starting
    // dark. Cells already taken by alignment patterns are left untouched.
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i16 - 9;
        for i in 8..=last {
            let module =
                if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
            if self.get(6, i) == Module::Empty {
                self.set(6, i, module);
            }
            if self.get(i, 6) == Module::Empty {
                self.set(i, 6, module);
            }
        }
    }

    pub(crate) fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl Symbol {
    // All-ones placeholder so the encoding region iterator treats the format
    // area as taken; the real bits are drawn during masking
    fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, format_info: u32) {
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_MAIN,
        );
        self.draw_number(
            format_info,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_SIDE,
        );
        // Fixed dark module above the bottom-left finder
        self.set(-8, 8, Module::Format(Color::Dark));
    }

    fn draw_version_info(&mut self) {
        if self.version.number() < 7 {
            return;
        }
        let info = version_info(self.version);
        self.draw_number(
            info,
            VERSION_INFO_BIT_LEN,
            Module::Version(Color::Light),
            Module::Version(Color::Dark),
            &VERSION_INFO_COORDS_TR,
        );
        self.draw_number(
            info,
            VERSION_INFO_BIT_LEN,
            Module::Version(Color::Light),
            Module::Version(Color::Dark),
            &VERSION_INFO_COORDS_BL,
        );
    }

    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            let module = if number & mask == 0 { off_clr } else { on_clr };
            self.set(r, c, module);
            mask >>= 1;
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl Symbol {
    pub(crate) fn draw_encoding_region(&mut self, payload: &BitStream) {
        self.reserve_format_area();
        self.draw_version_info();
        self.draw_payload(payload);

        let size = self.w * self.w;
        debug_assert!(!self.grid[..size].contains(&Module::Empty), "Empty module found");
    }

    // Bits go into unclaimed cells along the serpentine scan; leftover cells
    // past the payload are the remainder bits, fixed light
    fn draw_payload(&mut self, payload: &BitStream) {
        let mut coords = EncRegionIter::new(self.version);
        for index in 0..payload.len() {
            let module = Module::Data(if payload.get(index) { Color::Dark } else { Color::Light });
            for (r, c) in coords.by_ref() {
                if self.get(r, c) == Module::Empty {
                    self.set(r, c, module);
                    break;
                }
            }
        }
        for (r, c) in coords {
            if self.get(r, c) == Module::Empty {
                self.set(r, c, Module::Data(Color::Light));
            }
        }
    }

    /// XORs the mask over data modules and writes the matching format info.
    pub(crate) fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) {
                    if let Module::Data(color) = self.get(r, c) {
                        self.set(r, c, Module::Data(!color));
                    }
                }
            }
        }
        self.draw_format_info(format_info(self.ec_level, pattern));
    }
}


// Global constants
//------------------------------------------------------------------------------

// 177 * 177, the version 40 grid
const MAX_GRID_SIZE: usize = 31329;
