use std::ops::Deref;

use crate::builder::Symbol;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern: {pattern}");
        Self(pattern)
    }
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

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match self.0 {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid masking pattern: {}", self.0),
        }
    }
}

// Mask evaluation
//------------------------------------------------------------------------------

/// Scores all 8 mask patterns and applies the lowest-penalty one. Ties break
/// towards the lower pattern number.
pub fn apply_best_mask(symbol: &mut Symbol) -> MaskPattern {
    let best_mask = (0..8)
        .min_by_key(|&m| {
            let mut candidate = symbol.clone();
            candidate.apply_mask(MaskPattern(m));
            compute_total_penalty(&candidate)
        })
        .expect("Should return at least 1 mask");
    let best_mask = MaskPattern(best_mask);
    symbol.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(symbol: &Symbol) -> u32 {
    compute_adjacent_penalty(symbol)
        + compute_block_penalty(symbol)
        + compute_finder_pattern_penalty(symbol, true)
        + compute_finder_pattern_penalty(symbol, false)
        + compute_balance_penalty(symbol)
}

// 3 + (n - 5) for every module with n > 5 same-colored neighbours among its
// up-to-8 surrounding modules.
fn compute_adjacent_penalty(symbol: &Symbol) -> u32 {
    let mut pen = 0;
    let w = symbol.width() as i16;
    for r in 0..w {
        for c in 0..w {
            let dark = symbol.dark_at(r, c);
            let mut same = 0;
            for dr in -1..=1 {
                for dc in -1..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let (rr, cc) = (r + dr, c + dc);
                    if (0..w).contains(&rr)
                        && (0..w).contains(&cc)
                        && symbol.dark_at(rr, cc) == dark
                    {
                        same += 1;
                    }
                }
            }
            if same > 5 {
                pen += 3 + same - 5;
            }
        }
    }
    pen
}

// 3 per 2x2 block of a single color
fn compute_block_penalty(symbol: &Symbol) -> u32 {
    let mut pen = 0;
    let w = symbol.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let dark = symbol.dark_at(r, c);
            if dark == symbol.dark_at(r, c + 1)
                && dark == symbol.dark_at(r + 1, c)
                && dark == symbol.dark_at(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// 40 per 1:1:3:1:1 finder-like run, scanned along both axes
fn compute_finder_pattern_penalty(symbol: &Symbol, is_horizontal: bool) -> u32 {
    const PATTERN: [bool; 7] = [true, false, true, true, true, false, true];

    let mut pen = 0;
    let w = symbol.width() as i16;
    for i in 0..w {
        for j in 0..w - 6 {
            let matches = PATTERN.iter().enumerate().all(|(k, &dark)| {
                let at = j + k as i16;
                let found =
                    if is_horizontal { symbol.dark_at(i, at) } else { symbol.dark_at(at, i) };
                found == dark
            });
            if matches {
                pen += 40;
            }
        }
    }
    pen
}

// 10 per 5% deviation from a 50% dark module ratio
fn compute_balance_penalty(symbol: &Symbol) -> u32 {
    let dark_count = symbol.dark_module_count();
    let total = symbol.width() * symbol.width();
    let ratio = (dark_count * 100 / total) as i32;
    ((ratio - 50).unsigned_abs() / 5) * 10
}
