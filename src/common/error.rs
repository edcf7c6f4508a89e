use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    /// No version up to 40 has enough capacity for the data at the requested
    /// error correction level.
    DataTooLong,
    /// A (version, ec level) capacity lookup missed the static tables.
    InvalidCapacityConfig,
    /// A module coordinate query was outside the symbol grid.
    OutOfBounds,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            Self::DataTooLong => "Data too long",
            Self::InvalidCapacityConfig => "Invalid capacity configuration",
            Self::OutOfBounds => "Coordinate out of bounds",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
