//! C-ABI wrapper around `curlconv-core`.
//!
//! # Overview
//! Exposes parsing and code generation through `extern "C"` functions so any
//! language with a C FFI can convert curl commands without linking Rust's
//! async runtime or serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary; a caught panic yields null.
//! - `curlconv_parse` hands out a `FfiRequestModel`; `curlconv_generate`
//!   accepts one (ours or caller-built) and returns the Python snippet.
//! - The C caller owns all returned pointers and must call the matching
//!   `curlconv_free_*` function to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;

use types::*;

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

/// Parse a curl command into a request model.
///
/// Returns null if `command` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `curlconv_free_model`.
#[unsafe(no_mangle)]
pub extern "C" fn curlconv_parse(command: *const c_char) -> *mut FfiRequestModel {
    catch_unwind(|| {
        if command.is_null() {
            return std::ptr::null_mut();
        }
        let command = unsafe { read_c_string(command) };
        FfiRequestModel::from_core(curlconv_core::parse(&command))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse a curl command and return the model serialized as JSON, using the
/// same field names as the HTTP API (`url`, `method`, `headers`, `data`,
/// `form_data`).
///
/// Returns null if `command` is null. Free with `curlconv_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn curlconv_parse_json(command: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        if command.is_null() {
            return std::ptr::null_mut();
        }
        let command = unsafe { read_c_string(command) };
        match serde_json::to_string(&curlconv_core::parse(&command)) {
            Ok(json) => into_c_string(json),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

/// Render a request model as a Python `requests` snippet.
///
/// Returns null if `model` is null. Free with `curlconv_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn curlconv_generate(model: *const FfiRequestModel) -> *mut c_char {
    catch_unwind(|| {
        if model.is_null() {
            return std::ptr::null_mut();
        }
        let model = unsafe { (*model).to_core() };
        into_c_string(curlconv_core::generate(&model))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse a curl command and render it as Python in one call.
///
/// Returns null if `command` is null. Free with `curlconv_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn curlconv_convert(command: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        if command.is_null() {
            return std::ptr::null_mut();
        }
        let command = unsafe { read_c_string(command) };
        into_c_string(curlconv_core::convert(&command))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a model returned by `curlconv_parse`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn curlconv_free_model(model: *mut FfiRequestModel) {
    if !model.is_null() {
        let _ = catch_unwind(|| unsafe { FfiRequestModel::free(model) });
    }
}

/// Free a string returned by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn curlconv_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| unsafe { free_c_string(s) });
    }
}
