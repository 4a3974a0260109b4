use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::PathBuf;
use std::ptr;
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::model::choice_label;
use crate::mutation::{apply_mutation, error_response};
use crate::query::Query;
use crate::schema::schema_with_limits;
use crate::sql::generate_ddl;

lazy_static! {
    static ref CATALOG: Mutex<Option<Catalog>> = Mutex::new(None);
}

/// Result code for FFI functions
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfdResult {
    Ok = 0,
    /// Null pointer, bad UTF-8 or malformed JSON.
    InvalidInput = 1,
    /// The catalog refused the request; `error_out` holds the structured error.
    Rejected = 2,
    NotInitialized = 3,
    InternalError = 4,
}

fn lock_catalog() -> MutexGuard<'static, Option<Catalog>> {
    // A panic while holding the lock leaves the last committed state behind.
    match CATALOG.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn not_initialized() -> CatalogError {
    CatalogError::Config("catalog is not initialized, call vfd_catalog_init first".to_string())
}

/// Open the process-wide catalog.
///
/// `config_json` is a `CatalogConfig` document; NULL reads the configuration
/// from the environment (`VFD_CATALOG_CONFIG`, `VFD_CATALOG_SNAPSHOT`). An
/// existing snapshot at the configured path is loaded.
///
/// # Safety
/// - `config_json` must be NULL or a valid null-terminated C string
/// - On failure `error_out` receives a string to free with `vfd_catalog_free_string`
#[no_mangle]
pub unsafe extern "C" fn vfd_catalog_init(
    config_json: *const c_char,
    error_out: *mut *mut c_char,
) -> VfdResult {
    let config = if config_json.is_null() {
        CatalogConfig::from_env()
    } else {
        match read_str(config_json) {
            Ok(input) => CatalogConfig::from_json_str(input),
            Err(message) => {
                set_error(error_out, &message);
                return VfdResult::InvalidInput;
            }
        }
    };

    match config.and_then(Catalog::open) {
        Ok(catalog) => {
            info!(rows = ?catalog.row_counts(), "catalog initialized");
            *lock_catalog() = Some(catalog);
            VfdResult::Ok
        }
        Err(e) => {
            set_error(error_out, &error_json(&e));
            VfdResult::Rejected
        }
    }
}

/// Drop the process-wide catalog. Unsaved changes are lost.
#[no_mangle]
pub extern "C" fn vfd_catalog_reset() -> VfdResult {
    *lock_catalog() = None;
    VfdResult::Ok
}

/// Apply one mutation document
///
/// # Arguments
/// * `mutation_json` - {"type":"insert|update|delete","entity":"...","id":N,"fields":{...}}
///   or {"type":"link|unlink","relation":"...","from":N,"to":M}
///
/// # Returns
/// JSON: {"valid":true,"entity":"...","id":N} or {"valid":false,"error":{...},"message":"..."}.
/// Free it with `vfd_catalog_free_string`.
///
/// # Safety
/// `mutation_json` must be a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn vfd_catalog_apply_mutation(mutation_json: *const c_char) -> *mut c_char {
    let mutation: Value = match read_str(mutation_json).and_then(|s| {
        serde_json::from_str(s).map_err(|e| format!("Invalid mutation JSON: {}", e))
    }) {
        Ok(value) => value,
        Err(message) => {
            let error = CatalogError::invalid("Mutation", "document", message);
            return into_c_string(error_response(&error).to_string());
        }
    };

    let mut guard = lock_catalog();
    let result = match guard.as_mut() {
        Some(catalog) => apply_mutation(catalog, &mutation),
        None => error_response(&not_initialized()),
    };
    into_c_string(result.to_string())
}

/// Run a browsing query; returns the matching rows as a JSON array.
///
/// # Safety
/// - `query_json` must be a valid null-terminated C string
/// - Returns NULL on error, check `error_out` for details
#[no_mangle]
pub unsafe extern "C" fn vfd_catalog_query(
    query_json: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let query = match read_str(query_json) {
        Ok(input) => match Query::from_json(input) {
            Ok(q) => q,
            Err(e) => {
                set_error(error_out, &error_json(&e));
                return ptr::null_mut();
            }
        },
        Err(message) => {
            set_error(error_out, &message);
            return ptr::null_mut();
        }
    };

    let guard = lock_catalog();
    let rows = match guard.as_ref() {
        Some(catalog) => catalog.run_query(&query),
        None => Err(not_initialized()),
    };
    match rows {
        Ok(rows) => into_c_string(rows.to_string()),
        Err(e) => {
            set_error(error_out, &error_json(&e));
            ptr::null_mut()
        }
    }
}

/// Write a snapshot of the catalog.
///
/// `path` NULL uses the configured snapshot path.
///
/// # Safety
/// `path` must be NULL or a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn vfd_catalog_save(
    path: *const c_char,
    error_out: *mut *mut c_char,
) -> VfdResult {
    let explicit = if path.is_null() {
        None
    } else {
        match read_str(path) {
            Ok(p) => Some(PathBuf::from(p)),
            Err(message) => {
                set_error(error_out, &message);
                return VfdResult::InvalidInput;
            }
        }
    };

    let guard = lock_catalog();
    let Some(catalog) = guard.as_ref() else {
        set_error(error_out, &error_json(&not_initialized()));
        return VfdResult::NotInitialized;
    };
    let Some(target) = explicit.or_else(|| catalog.config().snapshot_path.clone()) else {
        let error = CatalogError::Config("no snapshot path configured".to_string());
        set_error(error_out, &error_json(&error));
        return VfdResult::Rejected;
    };

    match catalog.save_snapshot(&target) {
        Ok(()) => VfdResult::Ok,
        Err(e) => {
            warn!(error = %e, "snapshot save failed");
            set_error(error_out, &error_json(&e));
            VfdResult::Rejected
        }
    }
}

/// PostgreSQL DDL for the catalog, using the active column widths when a
/// catalog is open and the defaults otherwise.
///
/// # Safety
/// Caller must free the returned string with `vfd_catalog_free_string`.
#[no_mangle]
pub unsafe extern "C" fn vfd_catalog_generate_ddl(error_out: *mut *mut c_char) -> *mut c_char {
    let limits = lock_catalog()
        .as_ref()
        .map(|catalog| catalog.config().limits.clone())
        .unwrap_or_default();

    match generate_ddl(&schema_with_limits(&limits)) {
        Ok(ddl) => into_c_string(ddl.to_script()),
        Err(e) => {
            set_error(error_out, &format!("DDL generation error: {}", e));
            ptr::null_mut()
        }
    }
}

/// Display label of a coded series attribute, e.g. ("protection_degree", 3) → "IP55".
///
/// # Safety
/// `field` must be a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn vfd_catalog_choice_label(
    field: *const c_char,
    code: u16,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let field = match read_str(field) {
        Ok(f) => f,
        Err(message) => {
            set_error(error_out, &message);
            return ptr::null_mut();
        }
    };
    match choice_label(field, code) {
        Ok(label) => into_c_string(label.to_string()),
        Err(e) => {
            set_error(error_out, &error_json(&e));
            ptr::null_mut()
        }
    }
}

/// Free a string allocated by Rust
#[no_mangle]
pub unsafe extern "C" fn vfd_catalog_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the version of the library
#[no_mangle]
pub extern "C" fn vfd_catalog_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}

// ============================================================
// HELPER FUNCTIONS
// ============================================================

unsafe fn read_str<'a>(input: *const c_char) -> Result<&'a str, String> {
    if input.is_null() {
        return Err("Input string is null".to_string());
    }
    CStr::from_ptr(input)
        .to_str()
        .map_err(|e| format!("Invalid UTF-8: {}", e))
}

fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn error_json(error: &CatalogError) -> String {
    serde_json::to_string(error).unwrap_or_else(|_| {
        r#"{"kind":"InternalError","data":{"message":"Failed to serialize error"}}"#.to_string()
    })
}

unsafe fn set_error(error_out: *mut *mut c_char, message: &str) {
    if !error_out.is_null() {
        if let Ok(c_str) = CString::new(message) {
            *error_out = c_str.into_raw();
        }
    }
}
