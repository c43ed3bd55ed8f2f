//! engine/handles.rs
//! Owning wrappers around the engine's opaque objects.
//!
//! Design notes:
//! - Each wrapper owns exactly one engine allocation and frees it in `Drop`.
//! - Constructors return `None` when the engine cannot allocate.
//! - Buffers are passed as slices; positions are advanced in place by the engine.
//! - Contexts are `Send` (the engine has no thread affinity); dictionaries are
//!   also `Sync` because they are read-only after construction.

use std::os::raw::{c_int, c_void};
use std::ptr::{self, NonNull};

use log::warn;
use zstd_sys::{
    ZSTD_CCtx, ZSTD_CCtx_params, ZSTD_CDict, ZSTD_DCtx, ZSTD_DDict, ZSTD_EndDirective,
    ZSTD_ResetDirective, ZSTD_cParameter, ZSTD_customMem, ZSTD_dParameter,
    ZSTD_dictContentType_e, ZSTD_dictLoadMethod_e,
};

use crate::engine::error::{check, EngineError};

fn default_mem() -> ZSTD_customMem {
    ZSTD_customMem {
        customAlloc: None,
        customFree: None,
        opaque: ptr::null_mut(),
    }
}

fn release(what: &str, result: usize) {
    if let Err(e) = check(result) {
        warn!("engine refused to free {}: {}", what, e);
    }
}

// -----------------------------------------------------------------------------
// Encode session
// -----------------------------------------------------------------------------

pub struct RawCCtx(NonNull<ZSTD_CCtx>);

// SAFETY: an encode session has no thread affinity; `&mut self` on every
// mutating call keeps access exclusive.
unsafe impl Send for RawCCtx {}

impl RawCCtx {
    pub fn create() -> Option<Self> {
        // SAFETY: plain constructor, null on allocation failure.
        NonNull::new(unsafe { zstd_sys::ZSTD_createCCtx() }).map(Self)
    }

    pub fn get_parameter(&self, param: ZSTD_cParameter) -> Result<c_int, EngineError> {
        let mut value: c_int = 0;
        // SAFETY: live handle, `value` outlives the call.
        check(unsafe { zstd_sys::ZSTD_CCtx_getParameter(self.0.as_ptr(), param, &mut value) })?;
        Ok(value)
    }

    pub fn set_parameter(&mut self, param: ZSTD_cParameter, value: c_int) -> Result<(), EngineError> {
        // SAFETY: live handle.
        check(unsafe { zstd_sys::ZSTD_CCtx_setParameter(self.0.as_ptr(), param, value) })?;
        Ok(())
    }

    pub fn set_parameters(&mut self, params: &RawCCtxParams) -> Result<(), EngineError> {
        // SAFETY: both handles live; the engine copies the parameters.
        check(unsafe {
            zstd_sys::ZSTD_CCtx_setParametersUsingCCtxParams(self.0.as_ptr(), params.0.as_ptr())
        })?;
        Ok(())
    }

    pub fn set_pledged_src_size(&mut self, size: u64) -> Result<(), EngineError> {
        // SAFETY: live handle.
        check(unsafe { zstd_sys::ZSTD_CCtx_setPledgedSrcSize(self.0.as_ptr(), size) })?;
        Ok(())
    }

    /// One engine step. Returns the number of bytes still waiting to be
    /// flushed (0 when the engine has nothing pending).
    pub fn compress_stream(
        &mut self,
        dst: &mut [u8],
        dst_pos: &mut usize,
        src: &[u8],
        src_pos: &mut usize,
        op: ZSTD_EndDirective,
    ) -> Result<usize, EngineError> {
        // SAFETY: pointers and lengths come from live slices; the engine
        // validates both positions against their capacities.
        check(unsafe {
            zstd_sys::ZSTD_compressStream2_simpleArgs(
                self.0.as_ptr(),
                dst.as_mut_ptr().cast::<c_void>(),
                dst.len(),
                dst_pos,
                src.as_ptr().cast::<c_void>(),
                src.len(),
                src_pos,
                op,
            )
        })
    }

    pub fn reset(&mut self, mode: ZSTD_ResetDirective) -> Result<(), EngineError> {
        // SAFETY: live handle.
        check(unsafe { zstd_sys::ZSTD_CCtx_reset(self.0.as_ptr(), mode) })?;
        Ok(())
    }

    pub fn compress_using_cdict(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
        cdict: &RawCDict,
    ) -> Result<usize, EngineError> {
        // SAFETY: slices are live for the call; the dictionary is borrowed
        // for the whole call.
        check(unsafe {
            zstd_sys::ZSTD_compress_usingCDict(
                self.0.as_ptr(),
                dst.as_mut_ptr().cast::<c_void>(),
                dst.len(),
                src.as_ptr().cast::<c_void>(),
                src.len(),
                cdict.0.as_ptr(),
            )
        })
    }

    /// Start a raw block session, optionally primed with a dictionary.
    pub fn begin_block(&mut self, cdict: Option<&RawCDict>, level: c_int) -> Result<(), EngineError> {
        // SAFETY: live handles.
        let result = unsafe {
            match cdict {
                Some(d) => zstd_sys::ZSTD_compressBegin_usingCDict(self.0.as_ptr(), d.0.as_ptr()),
                None => zstd_sys::ZSTD_compressBegin(self.0.as_ptr(), level),
            }
        };
        check(result)?;
        Ok(())
    }

    /// Maximum input accepted by [`Self::compress_block`] in the current session.
    pub fn block_size(&self) -> usize {
        // SAFETY: live handle.
        unsafe { zstd_sys::ZSTD_getBlockSize(self.0.as_ptr()) }
    }

    pub fn compress_block(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize, EngineError> {
        // SAFETY: slices are live for the call.
        check(unsafe {
            zstd_sys::ZSTD_compressBlock(
                self.0.as_ptr(),
                dst.as_mut_ptr().cast::<c_void>(),
                dst.len(),
                src.as_ptr().cast::<c_void>(),
                src.len(),
            )
        })
    }
}

impl Drop for RawCCtx {
    fn drop(&mut self) {
        // SAFETY: we own the allocation and drop runs once.
        release("compression context", unsafe { zstd_sys::ZSTD_freeCCtx(self.0.as_ptr()) });
    }
}

// -----------------------------------------------------------------------------
// Encode parameter bag
// -----------------------------------------------------------------------------

pub struct RawCCtxParams(NonNull<ZSTD_CCtx_params>);

// SAFETY: plain parameter storage, no thread affinity.
unsafe impl Send for RawCCtxParams {}

impl RawCCtxParams {
    pub fn create() -> Option<Self> {
        // SAFETY: plain constructor, null on allocation failure.
        NonNull::new(unsafe { zstd_sys::ZSTD_createCCtxParams() }).map(Self)
    }

    pub fn get_parameter(&self, param: ZSTD_cParameter) -> Result<c_int, EngineError> {
        let mut value: c_int = 0;
        // SAFETY: live handle, `value` outlives the call.
        check(unsafe { zstd_sys::ZSTD_CCtxParams_getParameter(self.0.as_ptr(), param, &mut value) })?;
        Ok(value)
    }

    pub fn set_parameter(&mut self, param: ZSTD_cParameter, value: c_int) -> Result<(), EngineError> {
        // SAFETY: live handle.
        check(unsafe { zstd_sys::ZSTD_CCtxParams_setParameter(self.0.as_ptr(), param, value) })?;
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), EngineError> {
        // SAFETY: live handle.
        check(unsafe { zstd_sys::ZSTD_CCtxParams_reset(self.0.as_ptr()) })?;
        Ok(())
    }
}

impl Drop for RawCCtxParams {
    fn drop(&mut self) {
        // SAFETY: we own the allocation and drop runs once.
        release("parameter set", unsafe { zstd_sys::ZSTD_freeCCtxParams(self.0.as_ptr()) });
    }
}

// -----------------------------------------------------------------------------
// Digested dictionaries
// -----------------------------------------------------------------------------

pub struct RawCDict(NonNull<ZSTD_CDict>);

// SAFETY: immutable after construction; the engine only reads it.
unsafe impl Send for RawCDict {}
unsafe impl Sync for RawCDict {}

impl RawCDict {
    /// Digest `dict` (copied) with the given parameters.
    pub fn create(dict: &[u8], params: &RawCCtxParams) -> Option<Self> {
        // SAFETY: `dict` is copied by the engine (`byCopy`), `params` is only
        // read during the call.
        NonNull::new(unsafe {
            zstd_sys::ZSTD_createCDict_advanced2(
                dict.as_ptr().cast::<c_void>(),
                dict.len(),
                ZSTD_dictLoadMethod_e::ZSTD_dlm_byCopy,
                ZSTD_dictContentType_e::ZSTD_dct_auto,
                params.0.as_ptr(),
                default_mem(),
            )
        })
        .map(Self)
    }

    pub fn id(&self) -> u32 {
        // SAFETY: live handle.
        unsafe { zstd_sys::ZSTD_getDictID_fromCDict(self.0.as_ptr()) }
    }
}

impl Drop for RawCDict {
    fn drop(&mut self) {
        // SAFETY: we own the allocation and drop runs once.
        release("compression dictionary", unsafe { zstd_sys::ZSTD_freeCDict(self.0.as_ptr()) });
    }
}

pub struct RawDDict(NonNull<ZSTD_DDict>);

// SAFETY: immutable after construction; the engine only reads it.
unsafe impl Send for RawDDict {}
unsafe impl Sync for RawDDict {}

impl RawDDict {
    /// Digest `dict` (copied, content type detected).
    pub fn create(dict: &[u8]) -> Option<Self> {
        // SAFETY: the engine copies `dict` before returning.
        NonNull::new(unsafe {
            zstd_sys::ZSTD_createDDict(dict.as_ptr().cast::<c_void>(), dict.len())
        })
        .map(Self)
    }

    pub fn id(&self) -> u32 {
        // SAFETY: live handle.
        unsafe { zstd_sys::ZSTD_getDictID_fromDDict(self.0.as_ptr()) }
    }
}

impl Drop for RawDDict {
    fn drop(&mut self) {
        // SAFETY: we own the allocation and drop runs once.
        release("decompression dictionary", unsafe { zstd_sys::ZSTD_freeDDict(self.0.as_ptr()) });
    }
}

// -----------------------------------------------------------------------------
// Decode session
// -----------------------------------------------------------------------------

pub struct RawDCtx(NonNull<ZSTD_DCtx>);

// SAFETY: a decode session has no thread affinity; `&mut self` on every
// mutating call keeps access exclusive.
unsafe impl Send for RawDCtx {}

impl RawDCtx {
    pub fn create() -> Option<Self> {
        // SAFETY: plain constructor, null on allocation failure.
        NonNull::new(unsafe { zstd_sys::ZSTD_createDCtx() }).map(Self)
    }

    pub fn get_parameter(&self, param: ZSTD_dParameter) -> Result<c_int, EngineError> {
        let mut value: c_int = 0;
        // SAFETY: live handle; the getter does not mutate despite its
        // non-const signature.
        check(unsafe { zstd_sys::ZSTD_DCtx_getParameter(self.0.as_ptr(), param, &mut value) })?;
        Ok(value)
    }

    pub fn set_parameter(&mut self, param: ZSTD_dParameter, value: c_int) -> Result<(), EngineError> {
        // SAFETY: live handle.
        check(unsafe { zstd_sys::ZSTD_DCtx_setParameter(self.0.as_ptr(), param, value) })?;
        Ok(())
    }

    /// One engine step. Returns 0 when a frame has been fully decoded and
    /// flushed, otherwise a hint for the next input size.
    pub fn decompress_stream(
        &mut self,
        dst: &mut [u8],
        dst_pos: &mut usize,
        src: &[u8],
        src_pos: &mut usize,
    ) -> Result<usize, EngineError> {
        // SAFETY: pointers and lengths come from live slices; the engine
        // validates both positions against their capacities.
        check(unsafe {
            zstd_sys::ZSTD_decompressStream_simpleArgs(
                self.0.as_ptr(),
                dst.as_mut_ptr().cast::<c_void>(),
                dst.len(),
                dst_pos,
                src.as_ptr().cast::<c_void>(),
                src.len(),
                src_pos,
            )
        })
    }

    pub fn reset(&mut self, mode: ZSTD_ResetDirective) -> Result<(), EngineError> {
        // SAFETY: live handle.
        check(unsafe { zstd_sys::ZSTD_DCtx_reset(self.0.as_ptr(), mode) })?;
        Ok(())
    }

    /// Point the session at `ddict` (or at no dictionary).
    ///
    /// # Safety
    /// The engine keeps the raw pointer. The caller must keep `ddict` alive
    /// until the session is freed, reset with parameters, or re-pointed.
    pub unsafe fn ref_ddict(&mut self, ddict: Option<&RawDDict>) -> Result<(), EngineError> {
        let ptr = ddict.map_or(ptr::null(), |d| d.0.as_ptr() as *const ZSTD_DDict);
        check(zstd_sys::ZSTD_DCtx_refDDict(self.0.as_ptr(), ptr))?;
        Ok(())
    }

    /// Decode one raw block, primed with `ddict` when given. The dictionary
    /// is only needed for the duration of this call.
    pub fn decompress_block(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
        ddict: Option<&RawDDict>,
    ) -> Result<usize, EngineError> {
        let dict_ptr = ddict.map_or(ptr::null(), |d| d.0.as_ptr() as *const ZSTD_DDict);
        // SAFETY: the dictionary (if any) and both slices are borrowed for
        // the whole call; block state is rebuilt by the next stream start.
        unsafe {
            check(zstd_sys::ZSTD_decompressBegin_usingDDict(self.0.as_ptr(), dict_ptr))?;
            check(zstd_sys::ZSTD_decompressBlock(
                self.0.as_ptr(),
                dst.as_mut_ptr().cast::<c_void>(),
                dst.len(),
                src.as_ptr().cast::<c_void>(),
                src.len(),
            ))
        }
    }
}

impl Drop for RawDCtx {
    fn drop(&mut self) {
        // SAFETY: we own the allocation and drop runs once.
        release("decompression context", unsafe { zstd_sys::ZSTD_freeDCtx(self.0.as_ptr()) });
    }
}

// -----------------------------------------------------------------------------
// Frame probes
// -----------------------------------------------------------------------------

pub fn is_frame(data: &[u8]) -> bool {
    // SAFETY: read-only probe over a live slice.
    unsafe { zstd_sys::ZSTD_isFrame(data.as_ptr().cast::<c_void>(), data.len()) != 0 }
}

/// Raw content-size probe; see `constants::CONTENTSIZE_*` for sentinels.
pub fn frame_content_size(data: &[u8]) -> u64 {
    // SAFETY: read-only probe over a live slice.
    unsafe { zstd_sys::ZSTD_getFrameContentSize(data.as_ptr().cast::<c_void>(), data.len()) }
}
