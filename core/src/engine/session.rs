//! engine/session.rs
//! Decode session that keeps every dictionary it references alive.
//!
//! Design notes:
//! - The engine stores raw pointers to referenced dictionaries. Each one is
//!   pinned here (`Arc`) for as long as the engine may still read it.
//! - The engine is told first; pins change only once it accepted.
//! - `active` is the single referenced dictionary; a parameter reset makes
//!   the engine forget it, so the pin goes too.
//! - With `refMultipleDDicts` enabled the engine also files each dictionary in
//!   a lookup set that survives resets and is only freed with the session.
//!   Those dictionaries stay in `registered` until drop, one per id.
//! - Field order matters: the engine session is freed before any pin drops.

use std::sync::Arc;

use zstd_sys::{ZSTD_ResetDirective, ZSTD_dParameter};

use crate::engine::error::EngineError;
use crate::engine::handles::{RawDCtx, RawDDict};

pub struct PinnedDCtx<D: AsRef<RawDDict>> {
    dctx: RawDCtx,
    active: Option<Arc<D>>,
    registered: Vec<Arc<D>>,
}

impl<D: AsRef<RawDDict>> PinnedDCtx<D> {
    pub fn new(dctx: RawDCtx) -> Self {
        Self { dctx, active: None, registered: Vec::new() }
    }

    pub fn dctx(&self) -> &RawDCtx {
        &self.dctx
    }

    /// Session access for calls that never change the dictionary reference.
    pub fn dctx_mut(&mut self) -> &mut RawDCtx {
        &mut self.dctx
    }

    pub fn active(&self) -> Option<&Arc<D>> {
        self.active.as_ref()
    }

    /// Dictionaries filed in the engine's multi-dictionary set.
    pub fn registered(&self) -> &[Arc<D>] {
        &self.registered
    }

    pub fn ref_dictionary(&mut self, dict: Arc<D>) -> Result<(), EngineError> {
        let multiple = self
            .dctx
            .get_parameter(ZSTD_dParameter::ZSTD_d_experimentalParam4)
            .map(|v| v != 0)
            .unwrap_or(false);
        // SAFETY: `dict` is stored below right after the engine accepts it and
        // is kept until the engine can no longer reach it (see module notes).
        unsafe { self.dctx.ref_ddict(Some((*dict).as_ref()))? };
        if multiple {
            self.register(&dict);
        }
        self.active = Some(dict);
        Ok(())
    }

    /// The engine's set holds one dictionary per id; a same-id entry is
    /// replaced, so the pin follows the dictionary the engine kept.
    fn register(&mut self, dict: &Arc<D>) {
        let id = (**dict).as_ref().id();
        match self
            .registered
            .iter_mut()
            .find(|d| Arc::ptr_eq(d, dict) || (***d).as_ref().id() == id)
        {
            Some(slot) => *slot = Arc::clone(dict),
            None => self.registered.push(Arc::clone(dict)),
        }
    }

    /// Reset the engine; the active pin goes only once the engine forgot it.
    pub fn reset(&mut self, mode: ZSTD_ResetDirective) -> Result<(), EngineError> {
        self.dctx.reset(mode)?;
        if !matches!(mode, ZSTD_ResetDirective::ZSTD_reset_session_only) {
            self.active = None;
        }
        Ok(())
    }
}
