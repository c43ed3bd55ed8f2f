//! dict/decompress.rs

use std::fmt;

use log::debug;

use crate::engine::RawDDict;
use crate::types::{Result, ZstdError};

/// Decode-side dictionary. Contexts pin it with an `Arc` while referenced.
pub struct DecompressionDictionary {
    raw: RawDDict,
    size: usize,
}

impl DecompressionDictionary {
    /// Digest `data` (copied, content type detected).
    pub fn new(data: &[u8]) -> Result<Self> {
        let raw = RawDDict::create(data).ok_or(ZstdError::OutOfMemory)?;
        debug!("decompression dictionary built: {} bytes, id {}", data.len(), raw.id());
        Ok(Self { raw, size: data.len() })
    }

    /// Embedded dictionary id, 0 for raw-content dictionaries.
    pub fn id(&self) -> u32 {
        self.raw.id()
    }

    pub fn source_len(&self) -> usize {
        self.size
    }

    pub(crate) fn raw(&self) -> &RawDDict {
        &self.raw
    }
}

impl AsRef<RawDDict> for DecompressionDictionary {
    fn as_ref(&self) -> &RawDDict {
        &self.raw
    }
}

impl fmt::Debug for DecompressionDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecompressionDictionary")
            .field("id", &self.id())
            .field("source_len", &self.size)
            .finish()
    }
}
