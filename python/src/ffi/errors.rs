//! ffi/errors.rs
//! Error conversion and the `(None, message)` data-path convention.
//!
//! Usage faults (unknown parameter, bad argument, closed handle, empty input)
//! always raise. Runtime faults on data paths are returned as
//! `(None, message)`; control operations raise them instead.

use log::debug;
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyKeyError, PyMemoryError, PyValueError};
use pyo3::prelude::*;

use zstd_handle::types::ZstdError as CoreError;

create_exception!(rust_zstd, ZstdError, PyException, "Failure reported by the zstd engine.");

/// Raise form of a core error.
pub fn to_py_err(e: CoreError) -> PyErr {
    let msg = e.to_string();
    match e {
        CoreError::UnknownParameter { .. } => PyKeyError::new_err(msg),
        CoreError::OutOfMemory => PyMemoryError::new_err(msg),
        e if e.is_usage() => PyValueError::new_err(msg),
        _ => ZstdError::new_err(msg),
    }
}

/// Data-path form: value on success, `(None, message)` on runtime faults.
pub fn data_result<T, F>(py: Python<'_>, result: Result<T, CoreError>, ok: F) -> PyResult<PyObject>
where
    F: FnOnce(T) -> PyObject,
{
    match result {
        Ok(v) => Ok(ok(v)),
        Err(e) if e.is_usage() => Err(to_py_err(e)),
        Err(e) => {
            debug!("data call failed: {}", e);
            Ok((py.None(), e.to_string()).into_py(py))
        }
    }
}
