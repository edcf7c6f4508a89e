//! # qrsym
//!
//! A pure QR code symbol encoder (ISO/IEC 18004, versions 1-40, byte mode)
//! with Reed-Solomon error correction. The output is a module grid; rendering
//! to pixels, vectors or terminals is left to the caller.
//!
//! ## Features
//!
//! - **Byte Mode Encoding**: UTF-16 driven byte segmentation with automatic BOM handling
//! - **Reed-Solomon Error Correction**: Configurable levels (L, M, Q, H) over GF(256)
//! - **Automatic Version Selection**: Smallest version 1-40 that fits the data
//! - **Penalty-Scored Masking**: All 8 mask patterns evaluated, lowest penalty wins
//! - **BCH Format & Version Info**: Computed arithmetically, no lookup tables
//!
//! ## Quick Start
//!
//! ```rust
//! use qrsym::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = encode("Hello, World!", ECLevel::M)?;
//! for r in 0..symbol.module_count() {
//!     for c in 0..symbol.module_count() {
//!         print!("{}", if symbol.is_dark(r, c)? { "##" } else { "  " });
//!     }
//!     println!();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrsym::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new("Hello, World!")
//!     .version(Version::new(2))   // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)       // if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3))  // if not provided, finds best mask by penalty score
//!     .build()?;
//! assert_eq!(symbol.module_count(), 25);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub(crate) mod common;

pub use builder::{QRBuilder, Symbol};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};

/// Encodes `text` at `ec_level`, picking the smallest fitting version and the
/// best mask.
pub fn encode(text: &str, ec_level: ECLevel) -> QRResult<Symbol> {
    QRBuilder::new(text).ec_level(ec_level).build()
}

/// Encodes `text` into a pinned `version`; fails with [`QRError::DataTooLong`]
/// if it doesn't fit.
pub fn encode_with_version(text: &str, ec_level: ECLevel, version: Version) -> QRResult<Symbol> {
    QRBuilder::new(text).ec_level(ec_level).version(version).build()
}
