//! ffi/mod.rs
//! Module registration and the free functions of `rust_zstd`.

use std::fs::OpenOptions;
use std::sync::Once;

use log::{debug, LevelFilter};
use pyo3::exceptions::PyIOError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use zstd_handle::{constants, dict as core_dict, frame};

mod cctx;
mod dctx;
mod dict;
mod errors;
mod options;
mod params;
mod stats;

use errors::{data_result, to_py_err, ZstdError};

//==================================================================================
// I. One-shot helpers
//==================================================================================

/// Single frame at `level`; `(None, message)` on engine failure.
#[pyfunction]
#[pyo3(signature = (data, level = constants::DEFAULT_LEVEL))]
fn compress(py: Python<'_>, data: &[u8], level: i32) -> PyResult<PyObject> {
    let result = py.allow_threads(|| frame::compress(data, level));
    data_result(py, result, |v| PyBytes::new_bound(py, &v).into_any().unbind())
}

/// Needs a frame that records its content size.
#[pyfunction]
fn decompress(py: Python<'_>, data: &[u8]) -> PyResult<PyObject> {
    let result = py.allow_threads(|| frame::decompress(data));
    data_result(py, result, |v| PyBytes::new_bound(py, &v).into_any().unbind())
}

#[pyfunction]
fn is_frame(data: &[u8]) -> bool {
    frame::is_frame(data)
}

#[pyfunction]
fn get_frame_content_size(py: Python<'_>, data: &[u8]) -> PyResult<PyObject> {
    data_result(py, frame::get_frame_content_size(data), |n| n.into_py(py))
}

#[pyfunction]
fn min_level() -> i32 {
    frame::min_level()
}

#[pyfunction]
fn max_level() -> i32 {
    frame::max_level()
}

#[pyfunction]
fn train_dictionary(py: Python<'_>, samples: Vec<Vec<u8>>, max_size: usize) -> PyResult<PyObject> {
    let result = py.allow_threads(|| core_dict::train(&samples, max_size));
    match result {
        Ok(v) => Ok(PyBytes::new_bound(py, &v).into_any().unbind()),
        Err(e) => Err(to_py_err(e)),
    }
}

//==================================================================================
// II. Logging
//==================================================================================

static INIT_LOGGER: Once = Once::new();

/// Route the crate's `log` output to stderr, or append it to `log_file`.
/// Only the first call configures the logger.
#[pyfunction]
#[pyo3(signature = (log_file = None))]
fn enable_verbose_logging(log_file: Option<String>) -> PyResult<()> {
    let file = match log_file {
        Some(path) => Some(
            OpenOptions::new()
                .append(true)
                .create(true)
                .open(&path)
                .map_err(|e| PyIOError::new_err(format!("cannot open log file {path}: {e}")))?,
        ),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())?;
            buf.flush()?;
            Ok(())
        });
        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        if let Err(e) = builder.try_init() {
            debug!("verbose logging not installed, a logger is already set: {}", e);
        }
    });
    Ok(())
}

//==================================================================================
// III. Module Definition
//==================================================================================

pub fn register(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("_NAME", constants::MODNAME)?;
    m.add("_VERSION", constants::VERSION)?;
    m.add("ZstdError", py.get_type_bound::<ZstdError>())?;

    m.add_class::<params::PyCompressionParameterSet>()?;
    m.add_class::<dict::PyCompressionDictionary>()?;
    m.add_class::<dict::PyDecompressionDictionary>()?;
    m.add_class::<cctx::PyCompressionContext>()?;
    m.add_class::<dctx::PyDecompressionContext>()?;

    m.add_function(wrap_pyfunction!(compress, m)?)?;
    m.add_function(wrap_pyfunction!(decompress, m)?)?;
    m.add_function(wrap_pyfunction!(is_frame, m)?)?;
    m.add_function(wrap_pyfunction!(get_frame_content_size, m)?)?;
    m.add_function(wrap_pyfunction!(min_level, m)?)?;
    m.add_function(wrap_pyfunction!(max_level, m)?)?;
    m.add_function(wrap_pyfunction!(train_dictionary, m)?)?;
    m.add_function(wrap_pyfunction!(enable_verbose_logging, m)?)?;
    Ok(())
}
