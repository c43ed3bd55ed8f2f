//! zstd-handle-core
//!
//! Handle-based Zstandard binding: streaming contexts with a growable output
//! protocol, parameter sets, shared dictionaries and one-shot frame helpers.
//! No Python, no PyO3. Engine FFI lives in `engine` only.

#![deny(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Engine boundary
#[allow(unsafe_code)]
pub mod engine;

pub mod handle;
pub mod params;
pub mod stream;
pub mod telemetry;

// Handle objects
pub mod context;
pub mod dict;
pub mod frame;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::context::{CompressionContext, DecompressionContext};
    pub use crate::dict::{CompressionDictionary, DecompressionDictionary};
    pub use crate::frame::{compress, decompress, get_frame_content_size, is_frame};
    pub use crate::params::{CompressionParameterSet, ParameterDescriptor};
    pub use crate::stream::StreamConfig;
    pub use crate::types::{Direction, EndMode, ResetMode, ZstdError};
}
