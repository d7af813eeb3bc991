//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible fields: `*mut c_char`
//! instead of `String`, a pointer plus length instead of `Vec`, and enums
//! with explicit discriminants. Conversions live here so `lib.rs` stays
//! focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use shortener_core::error::ShortenError;
use shortener_core::http::HttpMethod;

/// Opaque handle to a `ShortenClient`.
pub struct FfiShortenClient {
    pub(crate) inner: shortener_core::ShortenClient,
}

/// Opaque handle to a completed `ShortenerProxy`.
///
/// The C strings are built once so the accessors can hand out borrowed
/// pointers that stay valid until `shortener_proxy_free`.
pub struct FfiShortenerProxy {
    pub(crate) url: CString,
    pub(crate) error: CString,
    pub(crate) is_error: bool,
}

impl FfiShortenerProxy {
    pub(crate) fn from_core(proxy: shortener_core::ShortenerProxy) -> *mut Self {
        let handle = Box::new(FfiShortenerProxy {
            url: to_c_string(proxy.url()),
            error: to_c_string(proxy.error()),
            is_error: proxy.is_error(),
        });
        Box::into_raw(handle)
    }
}

/// Convert to a C string, dropping interior NULs rather than failing.
pub(crate) fn to_c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

/// Read a borrowed C string. `None` for invalid UTF-8.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string.
pub(crate) unsafe fn read_c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `shortener_build_request`. The C caller executes it and passes
/// the reply to `shortener_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: shortener_core::HttpRequest) -> *mut Self {
        let url = to_c_string(&req.url).into_raw();
        let body = match req.body {
            Some(b) => to_c_string(&b).into_raw(),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(&k).into_raw(),
                    value: to_c_string(&v).into_raw(),
                })
                .collect();
            // Boxed slice so capacity == len when reclaimed.
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP reply described as C-compatible plain data.
///
/// The C caller builds this after executing the request. The FFI layer reads
/// but does not free these fields. A null `body` reads as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiShortenResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Serialization = 2,
    Protocol = 3,
    Service = 4,
    Panic = 5,
    NullArg = 6,
}

/// Result envelope for `shortener_parse_response`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `short_url`
/// holds the short URL. On failure `short_url` is null and `error_message`
/// holds the user-facing message.
#[repr(C)]
pub struct FfiShortenResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub short_url: *mut c_char,
}

impl FfiShortenResult {
    pub(crate) fn ok(short_url: &str, http_status: u16) -> *mut Self {
        Box::into_raw(Box::new(FfiShortenResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status,
            short_url: to_c_string(short_url).into_raw(),
        }))
    }

    pub(crate) fn from_error(err: ShortenError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ShortenError::Transport(_) => (FfiErrorCode::Transport, 0),
            ShortenError::Serialization(_) => (FfiErrorCode::Serialization, 0),
            ShortenError::Protocol { status, .. } => (FfiErrorCode::Protocol, *status),
            ShortenError::Service { status, .. } => (FfiErrorCode::Service, *status),
        };
        Self::failure(error_code, http_status, &err.user_message())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg)
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiShortenResult {
            error_code,
            error_message: to_c_string(msg).into_raw(),
            http_status,
            short_url: std::ptr::null_mut(),
        }))
    }
}
