//! context/mod.rs
//! Encode and decode sessions driven through the growable output protocol.

pub mod compress;
pub mod decompress;

pub use compress::CompressionContext;
pub use decompress::DecompressionContext;
