//! dict/compress.rs

use std::fmt;

use log::debug;

use crate::engine::RawCDict;
use crate::params::CompressionParameterSet;
use crate::types::{Result, ZstdError};

/// Encode-side dictionary, digested once with a parameter set.
pub struct CompressionDictionary {
    raw: RawCDict,
    size: usize,
}

impl CompressionDictionary {
    /// Digest `data` (copied) using `params`; the set is not retained.
    pub fn new(data: &[u8], params: &CompressionParameterSet) -> Result<Self> {
        let raw = RawCDict::create(data, params.raw()?).ok_or(ZstdError::OutOfMemory)?;
        debug!("compression dictionary built: {} bytes, id {}", data.len(), raw.id());
        Ok(Self { raw, size: data.len() })
    }

    /// Embedded dictionary id, 0 for raw-content dictionaries.
    pub fn id(&self) -> u32 {
        self.raw.id()
    }

    /// Size of the source bytes the dictionary was built from.
    pub fn source_len(&self) -> usize {
        self.size
    }

    pub(crate) fn raw(&self) -> &RawCDict {
        &self.raw
    }
}

impl fmt::Debug for CompressionDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionDictionary")
            .field("id", &self.id())
            .field("source_len", &self.size)
            .finish()
    }
}
