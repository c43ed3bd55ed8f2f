//! engine/mod.rs
//! The only place that talks to the compression engine directly.
//!
//! Everything above this module works with owning wrappers and `Result`s; no
//! other module needs `unsafe`.

pub mod error;
pub mod handles;
pub mod session;

pub use error::{check, codes, EngineError};
pub use handles::{frame_content_size, is_frame, RawCCtx, RawCCtxParams, RawCDict, RawDCtx, RawDDict};
pub use session::PinnedDCtx;
