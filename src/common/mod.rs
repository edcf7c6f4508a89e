pub mod bitstream;
pub mod codec;
pub mod error;
pub mod gf;
pub mod iter;
pub mod mask;
pub mod metadata;
