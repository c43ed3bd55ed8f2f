//! context/decompress.rs
//! Streaming decode session with dictionary pinning.
//!
//! Design notes:
//! - A referenced dictionary is pinned (`Arc`) beside the engine session; it
//!   outlives every caller handle for as long as the engine may read it.
//! - `reset(Session)` keeps the pin; `reset(Params | All)` drops it after the
//!   engine has forgotten the dictionary. Dictionaries referenced with
//!   `refMultipleDDicts` enabled stay pinned until close.
//! - Closing frees the engine session first, then the pin.
//! - A call stops at the end of a frame; bytes after it are not decoded.

use std::sync::Arc;

use log::{debug, trace};
use zstd_sys::ZSTD_dParameter;

use crate::constants::BLOCK_SIZE_MAX;
use crate::dict::DecompressionDictionary;
use crate::engine::{EngineError, PinnedDCtx, RawDCtx};
use crate::handle::Handle;
use crate::params::{resolve, ParameterDescriptor};
use crate::stream::{drive, NextAction, StepReport, StreamConfig, StreamStep};
use crate::telemetry::StreamCounters;
use crate::types::{Direction, HandleKind, ResetMode, Result, ZstdError};

struct DecodeStep<'a> {
    dctx: &'a mut RawDCtx,
}

impl StreamStep for DecodeStep<'_> {
    fn step(
        &mut self,
        dst: &mut [u8],
        dst_pos: &mut usize,
        src: &[u8],
        src_pos: &mut usize,
    ) -> std::result::Result<usize, EngineError> {
        self.dctx.decompress_stream(dst, dst_pos, src, src_pos)
    }

    fn next_action(&self, r: &StepReport) -> NextAction {
        // A clean frame end stops the call, even with input left over.
        if r.remaining == 0 {
            return NextAction::Finish;
        }
        if r.output_full() {
            NextAction::Grow { hint: 0 }
        } else {
            NextAction::Finish
        }
    }
}

pub struct DecompressionContext {
    inner: Handle<PinnedDCtx<DecompressionDictionary>>,
    config: StreamConfig,
    counters: StreamCounters,
}

impl DecompressionContext {
    pub fn new() -> Result<Self> {
        Self::with_config(StreamConfig::default())
    }

    pub fn with_config(config: StreamConfig) -> Result<Self> {
        let raw = RawDCtx::create().ok_or(ZstdError::OutOfMemory)?;
        debug!("decompression context created ({:?})", config);
        Ok(Self {
            inner: Handle::new(HandleKind::DecompressionContext, PinnedDCtx::new(raw)),
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
        self.get_descriptor(resolve(Direction::Decompress, name)?)
    }

    pub fn set_parameter(&mut self, name: &str, value: i32) -> Result<()> {
        self.set_descriptor(resolve(Direction::Decompress, name)?, value)
    }

    pub fn get_descriptor(&self, param: ParameterDescriptor) -> Result<i32> {
        let key = param.decode_key()?;
        Ok(self.inner.get()?.dctx().get_parameter(key)?)
    }

    pub fn set_descriptor(&mut self, param: ParameterDescriptor, value: i32) -> Result<()> {
        let key = param.decode_key()?;
        self.inner
            .get_mut()?
            .dctx_mut()
            .set_parameter(key, value)
            .map_err(|source| ZstdError::InvalidParameterValue { name: param.name(), value, source })?;
        debug!("decompression context: {} = {}", param.name(), value);
        Ok(())
    }

    /// Decode frames with `dict` from now on. The context keeps `dict` alive
    /// until a parameter reset or until the context is closed.
    pub fn ref_dictionary(&mut self, dict: Arc<DecompressionDictionary>) -> Result<()> {
        let id = dict.id();
        self.inner.get_mut()?.ref_dictionary(dict)?;
        debug!("decompression context pinned dictionary {}", id);
        Ok(())
    }

    /// Id of the currently referenced dictionary, if any.
    pub fn pinned_dictionary_id(&self) -> Result<Option<u32>> {
        Ok(self.inner.get()?.active().map(|d| d.id()))
    }

    /// Dictionaries kept alive for the engine's multi-dictionary lookup
    /// (`refMultipleDDicts`). They are released when the context closes.
    pub fn registered_dictionary_count(&self) -> Result<usize> {
        Ok(self.inner.get()?.registered().len())
    }

    /// Feed `input` and collect the decoded output. The flag is `true` when
    /// a frame ended; the call returns there and ignores any input after it.
    pub fn decompress_stream(&mut self, input: &[u8]) -> Result<(Vec<u8>, bool)> {
        let session = self.inner.get_mut()?;
        if input.is_empty() {
            return Err(ZstdError::EmptyInput);
        }
        let mut step = DecodeStep { dctx: session.dctx_mut() };
        let out = drive(input, &self.config, &mut step)?;
        let is_end = out.remaining == 0;
        trace!(
            "decompress_stream: {} of {} bytes -> {} bytes, end {}, {} grows",
            out.consumed,
            input.len(),
            out.data.len(),
            is_end,
            out.grows
        );
        self.counters.record_stream(&out);
        if is_end {
            self.counters.record_frame_end();
        }
        Ok((out.data, is_end))
    }

    /// Decode one raw block (no frame header), primed with `dict` when given.
    /// Any frame in progress is abandoned.
    pub fn decompress_block(
        &mut self,
        input: &[u8],
        dict: Option<&DecompressionDictionary>,
    ) -> Result<Vec<u8>> {
        let dctx = self.inner.get_mut()?.dctx_mut();
        let window_log = dctx.get_parameter(ZSTD_dParameter::ZSTD_d_windowLogMax)?;
        let capacity = u32::try_from(window_log)
            .ok()
            .and_then(|log| 1usize.checked_shl(log))
            .map_or(BLOCK_SIZE_MAX, |window| window.min(BLOCK_SIZE_MAX));

        let mut dst = Vec::new();
        dst.try_reserve_exact(capacity).map_err(|_| ZstdError::OutOfMemory)?;
        dst.resize(capacity, 0);

        let result = dctx.decompress_block(&mut dst, input, dict.map(|d| d.raw()));
        dctx.reset(ResetMode::Session.to_engine())?;
        let n = result.map_err(ZstdError::from_stream)?;
        dst.truncate(n);

        self.counters.record_single(input.len(), n, capacity);
        Ok(dst)
    }

    pub fn reset(&mut self, mode: ResetMode) -> Result<()> {
        self.inner.get_mut()?.reset(mode.to_engine())?;
        debug!("decompression context reset ({})", mode);
        Ok(())
    }

    /// Free the engine session, then release the dictionary pin.
    pub fn close(&mut self) -> bool {
        self.inner.close()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}
