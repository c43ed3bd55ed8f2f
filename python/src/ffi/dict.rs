//! ffi/dict.rs
//! Dictionary handles. Closing a Python handle drops only the caller's
//! reference; a decompression context that pinned the dictionary keeps it.

use std::sync::Arc;

use pyo3::prelude::*;

use zstd_handle::{
    dict::{CompressionDictionary, DecompressionDictionary},
    handle::Handle,
    types::HandleKind,
};

use crate::ffi::errors::to_py_err;
use crate::ffi::params::PyCompressionParameterSet;

#[pyclass(name = "CompressionDictionary", module = "rust_zstd")]
pub struct PyCompressionDictionary {
    pub(crate) inner: Handle<CompressionDictionary>,
}

#[pymethods]
impl PyCompressionDictionary {
    #[new]
    fn new(data: &[u8], params: PyRef<'_, PyCompressionParameterSet>) -> PyResult<Self> {
        let dict = CompressionDictionary::new(data, &params.inner).map_err(to_py_err)?;
        Ok(Self { inner: Handle::new(HandleKind::CompressionDictionary, dict) })
    }

    fn id(&self) -> PyResult<u32> {
        Ok(self.inner.get().map_err(to_py_err)?.id())
    }

    fn close(&mut self) -> bool {
        self.inner.close()
    }

    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_closed()
    }
}

#[pyclass(name = "DecompressionDictionary", module = "rust_zstd")]
pub struct PyDecompressionDictionary {
    pub(crate) inner: Handle<Arc<DecompressionDictionary>>,
}

#[pymethods]
impl PyDecompressionDictionary {
    #[new]
    fn new(data: &[u8]) -> PyResult<Self> {
        let dict = DecompressionDictionary::new(data).map_err(to_py_err)?;
        Ok(Self { inner: Handle::new(HandleKind::DecompressionDictionary, Arc::new(dict)) })
    }

    fn id(&self) -> PyResult<u32> {
        Ok(self.inner.get().map_err(to_py_err)?.id())
    }

    fn close(&mut self) -> bool {
        self.inner.close()
    }

    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_closed()
    }
}
