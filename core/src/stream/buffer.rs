//! stream/buffer.rs
//! Destination buffer with realloc semantics.
//!
//! Design notes:
//! - Growth keeps bytes `[0, old_len)`; the new tail is zeroed.
//! - Allocation failure is reported, never aborts (`try_reserve_exact`).
//! - An optional ceiling turns runaway growth into `OutOfMemory`.

use log::debug;

use crate::types::{Result, ZstdError};
use crate::utils::human_size;

#[derive(Debug)]
pub struct GrowBuffer {
    data: Vec<u8>,
    max_capacity: Option<usize>,
    grows: u32,
}

impl GrowBuffer {
    pub fn new(capacity: usize, max_capacity: Option<usize>) -> Result<Self> {
        let mut buf = Self { data: Vec::new(), max_capacity, grows: 0 };
        let first = match max_capacity {
            Some(max) => capacity.min(max),
            None => capacity,
        };
        buf.resize(first)?;
        Ok(buf)
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn grows(&self) -> u32 {
        self.grows
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Next size is `max(cap * 2, cap + hint)`, clamped to the ceiling.
    pub fn grow(&mut self, hint: usize) -> Result<()> {
        let cap = self.capacity();
        let mut next = cap.saturating_mul(2).max(cap.saturating_add(hint)).max(1);
        if let Some(max) = self.max_capacity {
            if cap >= max {
                debug!("output buffer hit its ceiling of {}", human_size(max));
                return Err(ZstdError::OutOfMemory);
            }
            next = next.min(max);
        }
        self.resize(next)?;
        self.grows += 1;
        debug!("output buffer grown {} -> {}", human_size(cap), human_size(next));
        Ok(())
    }

    /// Keep the first `len` bytes and hand them over.
    pub fn into_output(mut self, len: usize) -> Vec<u8> {
        self.data.truncate(len);
        self.data.shrink_to_fit();
        self.data
    }

    fn resize(&mut self, len: usize) -> Result<()> {
        let extra = len.saturating_sub(self.data.len());
        self.data.try_reserve_exact(extra).map_err(|_| ZstdError::OutOfMemory)?;
        self.data.resize(len, 0);
        Ok(())
    }
}
