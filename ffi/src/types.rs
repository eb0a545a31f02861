//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of an ordered
//! map, and enums with explicit discriminants. Conversion in both directions
//! lives here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use curlconv_core::{Body, FieldMap, Method, RequestModel};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Patch = 4,
    Head = 5,
    Options = 6,
}

impl From<Method> for FfiMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => FfiMethod::Get,
            Method::Post => FfiMethod::Post,
            Method::Put => FfiMethod::Put,
            Method::Delete => FfiMethod::Delete,
            Method::Patch => FfiMethod::Patch,
            Method::Head => FfiMethod::Head,
            Method::Options => FfiMethod::Options,
        }
    }
}

impl From<FfiMethod> for Method {
    fn from(m: FfiMethod) -> Self {
        match m {
            FfiMethod::Get => Method::Get,
            FfiMethod::Post => Method::Post,
            FfiMethod::Put => Method::Put,
            FfiMethod::Delete => Method::Delete,
            FfiMethod::Patch => Method::Patch,
            FfiMethod::Head => Method::Head,
            FfiMethod::Options => Method::Options,
        }
    }
}

/// Tells how `FfiRequestModel::body` is to be read.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiBodyKind {
    /// No body; `body` is null.
    None = 0,
    Raw = 1,
    JsonLiteral = 2,
}

// ---------------------------------------------------------------------------
// Request model
// ---------------------------------------------------------------------------

/// One key/value entry of a header or form-field list.
#[repr(C)]
pub struct FfiField {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A parsed request as C-compatible plain data.
///
/// Produced by `curlconv_parse` and released with `curlconv_free_model`.
/// `headers` and `form_fields` are arrays in first-seen order; they are null
/// when their length is zero.
#[repr(C)]
pub struct FfiRequestModel {
    pub url: *mut c_char,
    pub method: FfiMethod,
    pub headers: *mut FfiField,
    pub headers_len: u32,
    pub body_kind: FfiBodyKind,
    pub body: *mut c_char,
    pub form_fields: *mut FfiField,
    pub form_fields_len: u32,
}

impl FfiRequestModel {
    /// Convert a core `RequestModel` into a heap-allocated `FfiRequestModel`.
    pub(crate) fn from_core(model: RequestModel) -> *mut Self {
        let (body_kind, body) = match model.body {
            None => (FfiBodyKind::None, std::ptr::null_mut()),
            Some(Body::Raw(text)) => (FfiBodyKind::Raw, into_c_string(text)),
            Some(Body::JsonLiteral(text)) => (FfiBodyKind::JsonLiteral, into_c_string(text)),
        };
        let (headers, headers_len) = fields_into_raw(model.headers);
        let (form_fields, form_fields_len) = fields_into_raw(model.form_fields);

        Box::into_raw(Box::new(FfiRequestModel {
            url: into_c_string(model.url),
            method: model.method.into(),
            headers,
            headers_len,
            body_kind,
            body,
            form_fields,
            form_fields_len,
        }))
    }

    /// Copy the C data back into a core `RequestModel`.
    ///
    /// # Safety
    /// Every non-null pointer must be a valid NUL-terminated string, and the
    /// field arrays must hold at least `*_len` entries.
    pub(crate) unsafe fn to_core(&self) -> RequestModel {
        let body = match self.body_kind {
            FfiBodyKind::None => None,
            FfiBodyKind::Raw => Some(Body::Raw(unsafe { read_c_string(self.body) })),
            FfiBodyKind::JsonLiteral => Some(Body::JsonLiteral(unsafe { read_c_string(self.body) })),
        };
        RequestModel {
            url: unsafe { read_c_string(self.url) },
            method: self.method.into(),
            headers: unsafe { fields_from_raw(self.headers, self.headers_len) },
            body,
            form_fields: unsafe { fields_from_raw(self.form_fields, self.form_fields_len) },
        }
    }

    /// Release everything owned by a model created by `from_core`.
    ///
    /// # Safety
    /// `ptr` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(ptr: *mut Self) {
        let model = unsafe { Box::from_raw(ptr) };
        unsafe {
            free_c_string(model.url);
            free_c_string(model.body);
            free_fields(model.headers, model.headers_len);
            free_fields(model.form_fields, model.form_fields_len);
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Hand a Rust string to C. Interior NULs cannot be represented and are
/// dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

/// Read a C string, replacing invalid UTF-8. Null reads as empty.
pub(crate) unsafe fn read_c_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

pub(crate) unsafe fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

fn fields_into_raw(map: FieldMap) -> (*mut FfiField, u32) {
    if map.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let fields: Box<[FfiField]> = map
        .into_iter()
        .map(|(key, value)| FfiField {
            key: into_c_string(key),
            value: into_c_string(value),
        })
        .collect();
    let len = fields.len() as u32;
    (Box::into_raw(fields) as *mut FfiField, len)
}

unsafe fn fields_from_raw(ptr: *const FfiField, len: u32) -> FieldMap {
    let mut map = FieldMap::new();
    if ptr.is_null() {
        return map;
    }
    for field in unsafe { std::slice::from_raw_parts(ptr, len as usize) } {
        let key = unsafe { read_c_string(field.key) };
        let value = unsafe { read_c_string(field.value) };
        map.insert(key, value);
    }
    map
}

unsafe fn free_fields(ptr: *mut FfiField, len: u32) {
    if ptr.is_null() {
        return;
    }
    let fields = unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len as usize)) };
    for field in fields.iter() {
        unsafe {
            free_c_string(field.key);
            free_c_string(field.value);
        }
    }
}
