//! ffi/options.rs
//! Option arguments: accepted as their names or as engine directive numbers.

use pyo3::prelude::*;

use zstd_handle::types::{EndMode, ResetMode, ZstdError as CoreError};

use crate::ffi::errors::to_py_err;

pub fn end_mode(arg: Option<&Bound<'_, PyAny>>) -> PyResult<EndMode> {
    let Some(arg) = arg else { return Ok(EndMode::default()) };
    if let Ok(name) = arg.extract::<String>() {
        return name.parse().map_err(to_py_err);
    }
    let raw: u8 = arg.extract().map_err(|_| {
        to_py_err(CoreError::InvalidOption { what: "end mode", value: arg.to_string() })
    })?;
    EndMode::verify(raw).map_err(to_py_err)
}

pub fn reset_mode(arg: Option<&Bound<'_, PyAny>>) -> PyResult<ResetMode> {
    let Some(arg) = arg else { return Ok(ResetMode::default()) };
    if let Ok(name) = arg.extract::<String>() {
        return name.parse().map_err(to_py_err);
    }
    let raw: u8 = arg.extract().map_err(|_| {
        to_py_err(CoreError::InvalidOption { what: "reset mode", value: arg.to_string() })
    })?;
    ResetMode::verify(raw).map_err(to_py_err)
}
