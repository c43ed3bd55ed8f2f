//! engine/error.rs
//! Engine result codes.
//!
//! The engine reports failures in-band: a `size_t` result is an error when it
//! falls in the top range, and the error number is its two's-complement
//! negation. Error numbers are stable across engine releases.

use std::fmt;

/// Stable engine error numbers (subset we classify on).
pub mod codes {
    pub const GENERIC: usize = 1;
    pub const PREFIX_UNKNOWN: usize = 10;
    pub const VERSION_UNSUPPORTED: usize = 12;
    pub const FRAME_PARAMETER_UNSUPPORTED: usize = 14;
    pub const FRAME_PARAMETER_WINDOW_TOO_LARGE: usize = 16;
    pub const CORRUPTION_DETECTED: usize = 20;
    pub const CHECKSUM_WRONG: usize = 22;
    pub const LITERALS_HEADER_WRONG: usize = 24;
    pub const DICTIONARY_CORRUPTED: usize = 30;
    pub const DICTIONARY_WRONG: usize = 32;
    pub const PARAMETER_UNSUPPORTED: usize = 40;
    pub const PARAMETER_COMBINATION_UNSUPPORTED: usize = 41;
    pub const PARAMETER_OUT_OF_BOUND: usize = 42;
    pub const STAGE_WRONG: usize = 60;
    pub const MEMORY_ALLOCATION: usize = 64;
    pub const DST_SIZE_TOO_SMALL: usize = 70;
    pub const SRC_SIZE_WRONG: usize = 72;
}

/// A failure reported by the engine, with its stable number and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineError {
    pub code: usize,
    pub name: &'static str,
}

impl EngineError {
    /// Decode a raw engine result that is known to be an error.
    pub fn from_result(result: usize) -> Self {
        Self {
            code: result.wrapping_neg(),
            name: zstd_safe::get_error_name(result),
        }
    }

    pub fn is_memory(&self) -> bool {
        self.code == codes::MEMORY_ALLOCATION
    }

    /// Failures caused by the shape of the input data rather than by usage.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self.code,
            codes::PREFIX_UNKNOWN
                | codes::VERSION_UNSUPPORTED
                | codes::FRAME_PARAMETER_UNSUPPORTED
                | codes::FRAME_PARAMETER_WINDOW_TOO_LARGE
                | codes::CORRUPTION_DETECTED
                | codes::CHECKSUM_WRONG
                | codes::LITERALS_HEADER_WRONG
                | codes::DICTIONARY_CORRUPTED
                | codes::DICTIONARY_WRONG
        )
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zstd error {} ({})", self.code, self.name)
    }
}

impl std::error::Error for EngineError {}

/// Split a raw engine result into value or error.
#[inline]
pub fn check(result: usize) -> Result<usize, EngineError> {
    // SAFETY: pure classification of an integer, no memory is touched.
    if unsafe { zstd_sys::ZSTD_isError(result) } != 0 {
        Err(EngineError::from_result(result))
    } else {
        Ok(result)
    }
}
