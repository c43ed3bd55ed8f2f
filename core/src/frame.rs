//! frame.rs
//! One-shot frame helpers: whole-buffer encode/decode and header probes.

use log::trace;

use crate::constants::{CONTENTSIZE_ERROR, CONTENTSIZE_UNKNOWN};
use crate::engine::{self, EngineError};
use crate::types::{Result, ZstdError};

pub fn min_level() -> i32 {
    zstd_safe::min_c_level()
}

pub fn max_level() -> i32 {
    zstd_safe::max_c_level()
}

/// Encode `data` as a single frame at `level` (0 selects the engine default).
pub fn compress(data: &[u8], level: i32) -> Result<Vec<u8>> {
    if level < min_level() || level > max_level() {
        return Err(ZstdError::OutOfRange { what: "compression level", value: level as i64 });
    }
    let bound = zstd_safe::compress_bound(data.len());
    let mut dst = Vec::new();
    dst.try_reserve_exact(bound).map_err(|_| ZstdError::OutOfMemory)?;
    zstd_safe::compress(&mut dst, data, level)
        .map_err(|code| ZstdError::from_stream(EngineError::from_result(code)))?;
    trace!("compress(level {}): {} -> {} bytes", level, data.len(), dst.len());
    Ok(dst)
}

/// Decode a single frame whose header records its content size.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let size = get_frame_content_size(data)?;
    let size = usize::try_from(size).map_err(|_| ZstdError::OutOfMemory)?;
    let mut dst = Vec::new();
    dst.try_reserve_exact(size).map_err(|_| ZstdError::OutOfMemory)?;
    zstd_safe::decompress(&mut dst, data)
        .map_err(|code| ZstdError::from_stream(EngineError::from_result(code)))?;
    trace!("decompress: {} -> {} bytes", data.len(), dst.len());
    Ok(dst)
}

pub fn is_frame(data: &[u8]) -> bool {
    engine::is_frame(data)
}

/// Decoded size recorded in the frame header.
pub fn get_frame_content_size(data: &[u8]) -> Result<u64> {
    match engine::frame_content_size(data) {
        CONTENTSIZE_ERROR => Err(ZstdError::InvalidFrame),
        CONTENTSIZE_UNKNOWN => Err(ZstdError::UnknownContentSize),
        size => Ok(size),
    }
}
