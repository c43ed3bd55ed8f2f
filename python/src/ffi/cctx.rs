//! ffi/cctx.rs

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use zstd_handle::{context::CompressionContext, stream::StreamConfig, types::Direction};

use crate::ffi::dict::PyCompressionDictionary;
use crate::ffi::errors::{data_result, to_py_err};
use crate::ffi::options;
use crate::ffi::params::PyCompressionParameterSet;
use crate::ffi::stats::stats_dict;

#[pyclass(name = "CompressionContext", module = "rust_zstd")]
pub struct PyCompressionContext {
    inner: CompressionContext,
}

#[pymethods]
impl PyCompressionContext {
    #[new]
    #[pyo3(signature = (initial_capacity = None, max_capacity = None))]
    fn new(initial_capacity: Option<usize>, max_capacity: Option<usize>) -> PyResult<Self> {
        let config = StreamConfig::new(initial_capacity, max_capacity);
        let inner = CompressionContext::with_config(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn get_parameter(&self, name: &str) -> PyResult<i32> {
        self.inner.get_parameter(name).map_err(to_py_err)
    }

    fn set_parameter(&mut self, name: &str, value: i32) -> PyResult<()> {
        self.inner.set_parameter(name, value).map_err(to_py_err)
    }

    fn set_parameters(&mut self, params: PyRef<'_, PyCompressionParameterSet>) -> PyResult<()> {
        self.inner.set_parameters(&params.inner).map_err(to_py_err)
    }

    /// `-1` means unknown.
    fn set_pledged_src_size(&mut self, size: i64) -> PyResult<()> {
        self.inner.set_pledged_src_size(size).map_err(to_py_err)
    }

    /// Returns compressed bytes, or `(None, message)` on failure.
    #[pyo3(signature = (data, mode = None))]
    fn compress_stream(
        &mut self,
        py: Python<'_>,
        data: &[u8],
        mode: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<PyObject> {
        let mode = options::end_mode(mode)?;
        let inner = &mut self.inner;
        let result = py.allow_threads(|| inner.compress_stream(data, mode));
        data_result(py, result, |v| PyBytes::new_bound(py, &v).into_any().unbind())
    }

    /// Raw block without frame header; empty bytes mean "store raw".
    #[pyo3(signature = (data, dictionary = None))]
    fn compress_block(
        &mut self,
        py: Python<'_>,
        data: &[u8],
        dictionary: Option<PyRef<'_, PyCompressionDictionary>>,
    ) -> PyResult<PyObject> {
        let dict = match &dictionary {
            Some(d) => Some(d.inner.get().map_err(to_py_err)?),
            None => None,
        };
        let result = self.inner.compress_block(data, dict);
        data_result(py, result, |v| PyBytes::new_bound(py, &v).into_any().unbind())
    }

    fn compress_using_dictionary(
        &mut self,
        py: Python<'_>,
        data: &[u8],
        dictionary: PyRef<'_, PyCompressionDictionary>,
    ) -> PyResult<PyObject> {
        let dict = dictionary.inner.get().map_err(to_py_err)?;
        let result = self.inner.compress_using_dictionary(data, dict);
        data_result(py, result, |v| PyBytes::new_bound(py, &v).into_any().unbind())
    }

    #[pyo3(signature = (mode = None))]
    fn reset(&mut self, mode: Option<&Bound<'_, PyAny>>) -> PyResult<()> {
        let mode = options::reset_mode(mode)?;
        self.inner.reset(mode).map_err(to_py_err)
    }

    fn stats<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        stats_dict(py, self.inner.counters(), Direction::Compress)
    }

    fn close(&mut self) -> bool {
        self.inner.close()
    }

    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_closed()
    }

    fn __enter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    #[pyo3(signature = (_exc_type = None, _exc = None, _tb = None))]
    fn __exit__(
        &mut self,
        _exc_type: Option<&Bound<'_, PyAny>>,
        _exc: Option<&Bound<'_, PyAny>>,
        _tb: Option<&Bound<'_, PyAny>>,
    ) -> bool {
        self.inner.close();
        false
    }
}
