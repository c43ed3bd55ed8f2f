//! dict/train.rs
//! Dictionary training, delegated to the engine's trainer.

use log::debug;

use crate::engine::EngineError;
use crate::types::{Result, ZstdError};

/// Train a dictionary of at most `max_size` bytes from `samples`.
///
/// The trainer needs a reasonable corpus (hundreds of samples); with too
/// little material the engine fails and the error is returned as is.
pub fn train<S: AsRef<[u8]>>(samples: &[S], max_size: usize) -> Result<Vec<u8>> {
    if samples.is_empty() {
        return Err(ZstdError::OutOfRange { what: "sample count", value: 0 });
    }
    if max_size == 0 {
        return Err(ZstdError::OutOfRange { what: "dictionary size", value: 0 });
    }

    let total: usize = samples.iter().map(|s| s.as_ref().len()).sum();
    let mut joined = Vec::new();
    joined.try_reserve_exact(total).map_err(|_| ZstdError::OutOfMemory)?;
    let mut sizes = Vec::with_capacity(samples.len());
    for s in samples {
        joined.extend_from_slice(s.as_ref());
        sizes.push(s.as_ref().len());
    }

    let mut dict = Vec::new();
    dict.try_reserve_exact(max_size).map_err(|_| ZstdError::OutOfMemory)?;
    zstd_safe::train_from_buffer(&mut dict, &joined, &sizes)
        .map_err(|code| ZstdError::Engine(EngineError::from_result(code)))?;

    debug!("trained {} byte dictionary from {} samples ({} bytes)", dict.len(), samples.len(), total);
    Ok(dict)
}
