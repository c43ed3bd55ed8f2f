//! types.rs
//! Shared enums and the unified error type.
//!
//! Design notes:
//! - `ZstdError::is_usage()` separates caller bugs (raised at the call site by
//!   host bindings) from runtime data/resource failures (returned as values).
//! - Engine failures keep their stable engine number and name.

use std::fmt;
use std::str::FromStr;

use num_enum::TryFromPrimitive;
use thiserror::Error;
use zstd_sys::{ZSTD_EndDirective, ZSTD_ResetDirective};

use crate::engine::EngineError;
use crate::utils::enum_name_or_hex;

/// Which side of the engine a parameter or handle belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Compress,
    Decompress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Compress => "compression",
            Direction::Decompress => "decompression",
        })
    }
}

/// Flush directive for one streaming compression call.
/// Discriminants are the engine's directive numbers.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum EndMode {
    /// Buffer input, emit whatever full blocks are ready.
    #[default]
    Continue = 0,
    /// Emit everything consumed so far; the frame stays open.
    Flush = 1,
    /// Emit everything and close the frame.
    End = 2,
}

impl EndMode {
    pub const NAMES: [&'static str; 3] = ["continue", "flush", "end"];

    pub fn verify(raw: u8) -> Result<Self, ZstdError> {
        Self::try_from_primitive(raw).map_err(|_| ZstdError::InvalidOption {
            what: "end mode",
            value: enum_name_or_hex::<EndMode>(raw),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndMode::Continue => "continue",
            EndMode::Flush => "flush",
            EndMode::End => "end",
        }
    }

    pub(crate) fn to_engine(self) -> ZSTD_EndDirective {
        match self {
            EndMode::Continue => ZSTD_EndDirective::ZSTD_e_continue,
            EndMode::Flush => ZSTD_EndDirective::ZSTD_e_flush,
            EndMode::End => ZSTD_EndDirective::ZSTD_e_end,
        }
    }
}

impl FromStr for EndMode {
    type Err = ZstdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "continue" => Ok(EndMode::Continue),
            "flush" => Ok(EndMode::Flush),
            "end" => Ok(EndMode::End),
            other => Err(ZstdError::InvalidOption { what: "end mode", value: other.to_owned() }),
        }
    }
}

impl fmt::Display for EndMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a context reset re-initialises.
/// Discriminants are the engine's reset directive numbers.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum ResetMode {
    /// Abandon the current frame; parameters and dictionary survive.
    #[default]
    Session = 1,
    /// Restore default parameters and drop any dictionary.
    Params = 2,
    /// Both of the above.
    All = 3,
}

impl ResetMode {
    pub const NAMES: [&'static str; 3] = ["session", "params", "all"];

    pub fn verify(raw: u8) -> Result<Self, ZstdError> {
        Self::try_from_primitive(raw).map_err(|_| ZstdError::InvalidOption {
            what: "reset mode",
            value: enum_name_or_hex::<ResetMode>(raw),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResetMode::Session => "session",
            ResetMode::Params => "params",
            ResetMode::All => "all",
        }
    }

    pub(crate) fn to_engine(self) -> ZSTD_ResetDirective {
        match self {
            ResetMode::Session => ZSTD_ResetDirective::ZSTD_reset_session_only,
            ResetMode::Params => ZSTD_ResetDirective::ZSTD_reset_parameters,
            ResetMode::All => ZSTD_ResetDirective::ZSTD_reset_session_and_parameters,
        }
    }
}

impl FromStr for ResetMode {
    type Err = ZstdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session" => Ok(ResetMode::Session),
            "params" => Ok(ResetMode::Params),
            "all" => Ok(ResetMode::All),
            other => Err(ZstdError::InvalidOption { what: "reset mode", value: other.to_owned() }),
        }
    }
}

impl fmt::Display for ResetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle families, used to name the handle in lifecycle errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    CompressionContext,
    CompressionParameterSet,
    CompressionDictionary,
    DecompressionContext,
    DecompressionDictionary,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandleKind::CompressionContext => "compression context",
            HandleKind::CompressionParameterSet => "compression parameter set",
            HandleKind::CompressionDictionary => "compression dictionary",
            HandleKind::DecompressionContext => "decompression context",
            HandleKind::DecompressionDictionary => "decompression dictionary",
        })
    }
}

/// Unified error covering usage faults, data faults and engine failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZstdError {
    /// Name not in the fixed parameter table for that direction.
    #[error("unknown {direction} parameter '{name}'")]
    UnknownParameter { direction: Direction, name: String },

    /// The engine rejected a parameter value.
    #[error("invalid value {value} for parameter '{name}': {source}")]
    InvalidParameterValue {
        name: &'static str,
        value: i32,
        #[source]
        source: EngineError,
    },

    /// Argument outside its documented domain.
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: i64 },

    /// Option string not in its fixed set.
    #[error("invalid {what} '{value}'")]
    InvalidOption { what: &'static str, value: String },

    /// Working buffer or engine allocation failed.
    #[error("not enough memory")]
    OutOfMemory,

    /// Malformed compressed input.
    #[error("{0}")]
    CorruptData(EngineError),

    /// Input is not a frame (or its header is truncated).
    #[error("invalid frame data")]
    InvalidFrame,

    /// Frame header does not record the decoded size.
    #[error("unknown content size")]
    UnknownContentSize,

    /// Streaming decode called with zero bytes.
    #[error("empty data")]
    EmptyInput,

    /// Handle used after it was closed.
    #[error("{0} is closed")]
    HandleClosed(HandleKind),

    /// Any other engine failure (wrong stage, wrong source size, ...).
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ZstdError {
    /// Classify an engine failure that happened while moving data.
    pub fn from_stream(e: EngineError) -> Self {
        if e.is_memory() {
            ZstdError::OutOfMemory
        } else if e.is_corruption() {
            ZstdError::CorruptData(e)
        } else {
            ZstdError::Engine(e)
        }
    }

    /// Caller bugs: host bindings raise these immediately instead of
    /// returning them as values.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            ZstdError::UnknownParameter { .. }
                | ZstdError::InvalidParameterValue { .. }
                | ZstdError::OutOfRange { .. }
                | ZstdError::InvalidOption { .. }
                | ZstdError::EmptyInput
                | ZstdError::HandleClosed(_)
        )
    }

    /// Engine failure behind this error, if any.
    pub fn engine_error(&self) -> Option<&EngineError> {
        match self {
            ZstdError::InvalidParameterValue { source, .. } => Some(source),
            ZstdError::CorruptData(e) | ZstdError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T, E = ZstdError> = std::result::Result<T, E>;
