//! FFI bindings for Progress Flux
//!
//! This module provides C-compatible functions for calling Flux from the mobile
//! app. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `progress_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::calendar::dates_in_period;
use crate::pipeline::snapshot_to_report_json;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

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
// Analytics API
// ============================================================================

/// Analyze a progress snapshot and return the report JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `progress_free_string`.
/// - Returns NULL on error; call `progress_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn progress_report_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match snapshot_to_report_json(json_str) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Return the date axis for the last `days` days as a JSON array of
/// `YYYY-MM-DD` keys, ending today in the device's local calendar.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with `progress_free_string`.
/// - Returns NULL if `days` is not positive.
#[no_mangle]
pub unsafe extern "C" fn progress_dates_in_period(days: i32) -> *mut c_char {
    clear_last_error();

    if days <= 0 {
        set_last_error("Period length must be positive");
        return ptr::null_mut();
    }

    match serde_json::to_string(&dates_in_period(days as usize)) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a string returned by Flux functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Flux function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn progress_free_string(ptr: *mut c_char) {
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
/// - The returned pointer is valid until the next Flux function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn progress_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Flux library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn progress_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot_json() -> CString {
        CString::new(
            r#"{
            "period_days": 7,
            "today": "2024-03-10",
            "actions": [{ "id": "walk", "name": "Walk" }],
            "signals": [{ "id": "doc-1", "signal_id": "energy", "name": "Energy" }],
            "action_logs": [
                { "habit_id": "walk", "date": "2024-03-05", "completed": true },
                { "habit_id": "walk", "date": "2024-03-08", "completed": true }
            ],
            "check_ins": [
                { "signal_id": "energy", "date": "2024-03-04", "value": 3 },
                { "signal_id": "energy", "date": "2024-03-05", "value": 4 },
                { "signal_id": "energy", "date": "2024-03-08", "value": 4 },
                { "signal_id": "energy", "date": "2024-03-10", "value": 3 }
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_report_json() {
        let json = sample_snapshot_json();

        unsafe {
            let result = progress_report_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let payload: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(payload["overview"]["active_days"], 2);
            assert_eq!(payload["signals"][0]["coverage"], 4);
            assert_eq!(payload["relations"][0]["relation"]["has_relation"], true);

            progress_free_string(result);
        }
    }

    #[test]
    fn test_ffi_dates_in_period() {
        unsafe {
            let result = progress_dates_in_period(14);
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let dates: Vec<String> = serde_json::from_str(result_str).unwrap();
            assert_eq!(dates.len(), 14);

            progress_free_string(result);

            assert!(progress_dates_in_period(0).is_null());
            assert!(!progress_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();

            let result = progress_report_json(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = progress_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(!error_str.is_empty());

            let result = progress_report_json(ptr::null());
            assert!(result.is_null());
        }
    }

    #[test]
    fn test_ffi_clears_error_on_success() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            assert!(progress_report_json(invalid_json.as_ptr()).is_null());

            let json = sample_snapshot_json();
            let result = progress_report_json(json.as_ptr());
            assert!(!result.is_null());
            assert!(progress_last_error().is_null());

            progress_free_string(result);
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = progress_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
