//! ffi/dctx.rs

use std::sync::Arc;

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use zstd_handle::{context::DecompressionContext, stream::StreamConfig, types::Direction};

use crate::ffi::dict::PyDecompressionDictionary;
use crate::ffi::errors::{data_result, to_py_err};
use crate::ffi::options;
use crate::ffi::stats::stats_dict;

#[pyclass(name = "DecompressionContext", module = "rust_zstd")]
pub struct PyDecompressionContext {
    inner: DecompressionContext,
}

#[pymethods]
impl PyDecompressionContext {
    #[new]
    #[pyo3(signature = (initial_capacity = None, max_capacity = None))]
    fn new(initial_capacity: Option<usize>, max_capacity: Option<usize>) -> PyResult<Self> {
        let config = StreamConfig::new(initial_capacity, max_capacity);
        let inner = DecompressionContext::with_config(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn get_parameter(&self, name: &str) -> PyResult<i32> {
        self.inner.get_parameter(name).map_err(to_py_err)
    }

    fn set_parameter(&mut self, name: &str, value: i32) -> PyResult<()> {
        self.inner.set_parameter(name, value).map_err(to_py_err)
    }

    /// Pin `dictionary`; it stays usable here even after its handle is closed.
    fn ref_dictionary(&mut self, dictionary: PyRef<'_, PyDecompressionDictionary>) -> PyResult<()> {
        let dict = Arc::clone(dictionary.inner.get().map_err(to_py_err)?);
        self.inner.ref_dictionary(dict).map_err(to_py_err)
    }

    fn pinned_dictionary_id(&self) -> PyResult<Option<u32>> {
        self.inner.pinned_dictionary_id().map_err(to_py_err)
    }

    /// Returns `(bytes, is_end)`, or `(None, message)` on failure.
    fn decompress_stream(&mut self, py: Python<'_>, data: &[u8]) -> PyResult<PyObject> {
        let inner = &mut self.inner;
        let result = py.allow_threads(|| inner.decompress_stream(data));
        data_result(py, result, |(v, is_end)| {
            (PyBytes::new_bound(py, &v), is_end).into_py(py)
        })
    }

    #[pyo3(signature = (data, dictionary = None))]
    fn decompress_block(
        &mut self,
        py: Python<'_>,
        data: &[u8],
        dictionary: Option<PyRef<'_, PyDecompressionDictionary>>,
    ) -> PyResult<PyObject> {
        let dict = match &dictionary {
            Some(d) => Some(Arc::clone(d.inner.get().map_err(to_py_err)?)),
            None => None,
        };
        let result = self.inner.decompress_block(data, dict.as_deref());
        data_result(py, result, |v| PyBytes::new_bound(py, &v).into_any().unbind())
    }

    #[pyo3(signature = (mode = None))]
    fn reset(&mut self, mode: Option<&Bound<'_, PyAny>>) -> PyResult<()> {
        let mode = options::reset_mode(mode)?;
        self.inner.reset(mode).map_err(to_py_err)
    }

    fn stats<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        stats_dict(py, self.inner.counters(), Direction::Decompress)
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
