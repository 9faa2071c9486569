//! FFI bindings for Benford conformity analysis
//!
//! This module provides C-compatible functions for calling the analyzer from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `benford_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::digit::DigitExtractor;
use crate::input::InputFormat;
use crate::pipeline::{analyze_json, BenfordAnalyzer};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Analysis API
// ============================================================================

/// Analyze a JSON array of numbers or numeric strings and return the report JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `benford_free_string`.
/// - Returns NULL on error; call `benford_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn benford_analyze_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match analyze_json(json_str) {
        Ok(payload) => string_to_cstr(&payload),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Analyze a JSON array with a JSON configuration document.
///
/// # Safety
/// - `json` and `config_json` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `benford_free_string`.
/// - Returns NULL on error; call `benford_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn benford_analyze_json_with_config(
    json: *const c_char,
    config_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let config_str = match cstr_to_string(config_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid config string pointer");
            return ptr::null_mut();
        }
    };

    let result = BenfordAnalyzer::from_config_json(&config_str)
        .and_then(|analyzer| analyzer.analyze_text(&json_str, InputFormat::Json, None, "ffi"));

    match result {
        Ok(payload) => string_to_cstr(&payload),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Extract the leading significant digit of `value` into `out_digit`.
///
/// # Safety
/// - `out_digit` must be a valid, writable pointer.
/// - Returns 0 on success, non-zero on error.
/// - On error, call `benford_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn benford_first_digit(value: f64, out_digit: *mut u8) -> i32 {
    clear_last_error();

    if out_digit.is_null() {
        set_last_error("Null output pointer");
        return -1;
    }

    match DigitExtractor::first_digit(value) {
        Ok(digit) => {
            *out_digit = digit;
            0
        }
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by analysis functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a `benford_*` function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn benford_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next `benford_*` call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn benford_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn benford_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_ffi_analyze_json() {
        let json = CString::new(r#"[123, "45.6", 0.0789, 1.2e6]"#).unwrap();

        unsafe {
            let result = benford_analyze_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let payload: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(payload["summary"]["total_valid_observations"], 4);

            benford_free_string(result);
        }
    }

    #[test]
    fn test_ffi_analyze_with_config() {
        let json = CString::new("[1, 2, 3]").unwrap();
        let config = CString::new(r#"{"preview_limit": 1}"#).unwrap();

        unsafe {
            let result = benford_analyze_json_with_config(json.as_ptr(), config.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let payload: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(payload["preview"]["remaining"], 2);

            benford_free_string(result);
        }
    }

    #[test]
    fn test_ffi_first_digit() {
        let mut digit = 0u8;
        unsafe {
            assert_eq!(benford_first_digit(-0.0456, &mut digit), 0);
            assert_eq!(digit, 4);

            assert_eq!(benford_first_digit(f64::NAN, &mut digit), -1);
            assert!(!benford_last_error().is_null());

            assert_eq!(benford_first_digit(1.0, ptr::null_mut()), -1);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = benford_analyze_json(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = benford_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(!error_str.is_empty());

            assert!(benford_analyze_json(ptr::null()).is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = benford_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, env!("CARGO_PKG_VERSION"));
        }
    }
}
