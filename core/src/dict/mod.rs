//! dict/mod.rs
//! Digested dictionaries and the dictionary trainer.
//!
//! Dictionaries are immutable once built and are shared through `Arc`; the
//! last owner (caller or pinning context) frees the engine object.

pub mod compress;
pub mod decompress;
pub mod train;

pub use compress::CompressionDictionary;
pub use decompress::DecompressionDictionary;
pub use train::train;
