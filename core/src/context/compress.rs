//! context/compress.rs
//! Streaming encode session.
//!
//! Design notes:
//! - The context owns its engine session exclusively; it holds no references
//!   to parameter sets or dictionaries after a call returns.
//! - `compress_stream` runs the growable output protocol with the encode
//!   completion rule (see `EncodeStep::next_action`).
//! - Single-shot helpers (`compress_block`, `compress_using_dictionary`) leave
//!   the session reset, so a following stream starts a fresh frame.

use log::{debug, trace};

use crate::constants::{CONTENTSIZE_UNKNOWN, PLEDGED_SIZE_UNKNOWN};
use crate::dict::CompressionDictionary;
use crate::engine::{EngineError, RawCCtx};
use crate::handle::Handle;
use crate::params::{resolve, CompressionParameterSet, ParameterDescriptor};
use crate::stream::{drive, NextAction, StepReport, StreamConfig, StreamStep};
use crate::telemetry::StreamCounters;
use crate::types::{Direction, EndMode, HandleKind, ResetMode, Result, ZstdError};

struct EncodeStep<'a> {
    cctx: &'a mut RawCCtx,
    mode: EndMode,
}

impl StreamStep for EncodeStep<'_> {
    fn step(
        &mut self,
        dst: &mut [u8],
        dst_pos: &mut usize,
        src: &[u8],
        src_pos: &mut usize,
    ) -> std::result::Result<usize, EngineError> {
        self.cctx.compress_stream(dst, dst_pos, src, src_pos, self.mode.to_engine())
    }

    fn next_action(&self, r: &StepReport) -> NextAction {
        if r.remaining == 0 && r.input_consumed() {
            return NextAction::Finish;
        }
        if r.output_full() {
            return NextAction::Grow { hint: r.remaining };
        }
        if !r.progressed {
            // Worker threads may still hold buffered input in `continue`
            // mode; it comes out on a later flush or end.
            if self.mode == EndMode::Continue && r.input_consumed() {
                return NextAction::Finish;
            }
            return NextAction::Grow { hint: r.remaining };
        }
        NextAction::Retry
    }
}

pub struct CompressionContext {
    inner: Handle<RawCCtx>,
    config: StreamConfig,
    counters: StreamCounters,
}

impl CompressionContext {
    pub fn new() -> Result<Self> {
        Self::with_config(StreamConfig::default())
    }

    pub fn with_config(config: StreamConfig) -> Result<Self> {
        let raw = RawCCtx::create().ok_or(ZstdError::OutOfMemory)?;
        debug!("compression context created ({:?})", config);
        Ok(Self {
            inner: Handle::new(HandleKind::CompressionContext, raw),
            config,
            counters: StreamCounters::default(),
        })
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn get_parameter(&self, name: &str) -> Result<i32> {
        self.get_descriptor(resolve(Direction::Compress, name)?)
    }

    pub fn set_parameter(&mut self, name: &str, value: i32) -> Result<()> {
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
        debug!("compression context: {} = {}", param.name(), value);
        Ok(())
    }

    /// Copy every parameter from `params`; the set is not retained.
    pub fn set_parameters(&mut self, params: &CompressionParameterSet) -> Result<()> {
        let raw = params.raw()?;
        self.inner.get_mut()?.set_parameters(raw)?;
        Ok(())
    }

    /// Announce the total input size of the next frame; `-1` means unknown.
    pub fn set_pledged_src_size(&mut self, size: i64) -> Result<()> {
        let pledged = match size {
            PLEDGED_SIZE_UNKNOWN => CONTENTSIZE_UNKNOWN,
            n if n >= 0 => n as u64,
            n => return Err(ZstdError::OutOfRange { what: "pledged source size", value: n }),
        };
        self.inner.get_mut()?.set_pledged_src_size(pledged)?;
        Ok(())
    }

    /// Feed `input` and collect whatever output `mode` makes available.
    pub fn compress_stream(&mut self, input: &[u8], mode: EndMode) -> Result<Vec<u8>> {
        let cctx = self.inner.get_mut()?;
        let mut step = EncodeStep { cctx, mode };
        let out = drive(input, &self.config, &mut step)?;
        trace!(
            "compress_stream({}): {} -> {} bytes, {} grows",
            mode,
            input.len(),
            out.data.len(),
            out.grows
        );
        self.counters.record_stream(&out);
        Ok(out.data)
    }

    pub fn reset(&mut self, mode: ResetMode) -> Result<()> {
        self.inner.get_mut()?.reset(mode.to_engine())?;
        debug!("compression context reset ({})", mode);
        Ok(())
    }

    /// Encode one raw block (no frame header) at the context's current
    /// compression level, or with `dict`'s parameters when given.
    ///
    /// An empty result means the block is not compressible and must be
    /// stored raw by the caller. Any frame in progress is abandoned.
    pub fn compress_block(
        &mut self,
        input: &[u8],
        dict: Option<&CompressionDictionary>,
    ) -> Result<Vec<u8>> {
        let cctx = self.inner.get_mut()?;
        let level = cctx.get_parameter(zstd_sys::ZSTD_cParameter::ZSTD_c_compressionLevel)?;
        cctx.begin_block(dict.map(|d| d.raw()), level)?;

        let limit = cctx.block_size();
        if input.len() > limit {
            cctx.reset(ResetMode::Session.to_engine())?;
            return Err(ZstdError::OutOfRange { what: "block size", value: input.len() as i64 });
        }

        let capacity = zstd_safe::compress_bound(input.len());
        let mut dst = Vec::new();
        dst.try_reserve_exact(capacity).map_err(|_| ZstdError::OutOfMemory)?;
        dst.resize(capacity, 0);

        let result = cctx.compress_block(&mut dst, input);
        cctx.reset(ResetMode::Session.to_engine())?;
        let n = result.map_err(ZstdError::from_stream)?;
        dst.truncate(n);

        self.counters.record_single(input.len(), n, capacity);
        Ok(dst)
    }

    /// One-shot frame encode with a digested dictionary. No pin is kept.
    pub fn compress_using_dictionary(
        &mut self,
        input: &[u8],
        dict: &CompressionDictionary,
    ) -> Result<Vec<u8>> {
        let cctx = self.inner.get_mut()?;
        let capacity = zstd_safe::compress_bound(input.len());
        let mut dst = Vec::new();
        dst.try_reserve_exact(capacity).map_err(|_| ZstdError::OutOfMemory)?;
        dst.resize(capacity, 0);

        let result = cctx.compress_using_cdict(&mut dst, input, dict.raw());
        cctx.reset(ResetMode::Session.to_engine())?;
        let n = result.map_err(ZstdError::from_stream)?;
        dst.truncate(n);

        self.counters.record_single(input.len(), n, capacity);
        Ok(dst)
    }

    /// Free the engine session. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}
