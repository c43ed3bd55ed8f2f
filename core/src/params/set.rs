//! params/set.rs
//! Standalone bag of encode parameters.
//!
//! A parameter set is never pinned: contexts and dictionaries read it at the
//! moment it is applied and keep no reference afterwards.

use log::debug;

use crate::engine::RawCCtxParams;
use crate::handle::Handle;
use crate::params::registry::{resolve, ParameterDescriptor};
use crate::types::{Direction, HandleKind, Result, ZstdError};

pub struct CompressionParameterSet {
    inner: Handle<RawCCtxParams>,
}

impl CompressionParameterSet {
    pub fn new() -> Result<Self> {
        let raw = RawCCtxParams::create().ok_or(ZstdError::OutOfMemory)?;
        Ok(Self { inner: Handle::new(HandleKind::CompressionParameterSet, raw) })
    }

    pub fn get(&self, name: &str) -> Result<i32> {
        self.get_descriptor(resolve(Direction::Compress, name)?)
    }

    pub fn set(&mut self, name: &str, value: i32) -> Result<()> {
        self.set_descriptor(resolve(Direction::Compress, name)?, value)
    }

    pub fn get_descriptor(&self, param: ParameterDescriptor) -> Result<i32> {
        let key = param.encode_key()?;
        Ok(self.inner.get()?.get_parameter(key)?)
    }

    pub fn set_descriptor(&mut self, param: ParameterDescriptor, value: i32) -> Result<()> {
        let key = param.encode_key()?;
        self.inner
            .get_mut()?
            .set_parameter(key, value)
            .map_err(|source| ZstdError::InvalidParameterValue { name: param.name(), value, source })?;
        debug!("parameter set: {} = {}", param.name(), value);
        Ok(())
    }

    /// Restore engine defaults.
    pub fn reset(&mut self) -> Result<()> {
        self.inner.get_mut()?.reset()?;
        Ok(())
    }

    pub fn close(&mut self) -> bool {
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub(crate) fn raw(&self) -> Result<&RawCCtxParams> {
        self.inner.get()
    }
}
