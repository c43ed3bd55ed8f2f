//! ffi/params.rs

use pyo3::prelude::*;

use zstd_handle::params::CompressionParameterSet;

use crate::ffi::errors::to_py_err;

#[pyclass(name = "CompressionParameterSet", module = "rust_zstd")]
pub struct PyCompressionParameterSet {
    pub(crate) inner: CompressionParameterSet,
}

#[pymethods]
impl PyCompressionParameterSet {
    #[new]
    fn new() -> PyResult<Self> {
        let inner = CompressionParameterSet::new().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn get(&self, name: &str) -> PyResult<i32> {
        self.inner.get(name).map_err(to_py_err)
    }

    fn set(&mut self, name: &str, value: i32) -> PyResult<()> {
        self.inner.set(name, value).map_err(to_py_err)
    }

    /// Restore engine defaults.
    fn reset(&mut self) -> PyResult<()> {
        self.inner.reset().map_err(to_py_err)
    }

    fn close(&mut self) -> bool {
        self.inner.close()
    }

    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_closed()
    }
}
