//! C-ABI wrapper around `shortener-core`.
//!
//! # Overview
//! Two ways in for a host written in another language:
//! - host-does-IO: `shortener_build_request` hands out the request,
//!   the host sends it, `shortener_parse_response` reads the reply;
//! - Rust-does-IO: `shortener_proxy_new` performs the call and the host reads
//!   the outcome through `shortener_proxy_url` / `_error` / `_is_error`.
//!
//! # Design
//! - Every `extern "C"` body runs inside `catch_unwind`.
//! - Null arguments are checked before any dereference.
//! - Pointers returned as `*mut` are owned by the caller and released with the
//!   matching `shortener_*_free` function. Strings returned by the proxy
//!   accessors are borrowed from the proxy and die with it.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use shortener_core::{HttpResponse, ShortenClient, ShortenerConfig, ShortenerProxy};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a `ShortenClient` for `base_url` authenticated with `api_key`.
///
/// Returns null if either argument is null or not UTF-8. Free with
/// `shortener_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_client_new(
    base_url: *const c_char,
    api_key: *const c_char,
) -> *mut FfiShortenClient {
    catch_unwind(|| {
        if base_url.is_null() || api_key.is_null() {
            return std::ptr::null_mut();
        }
        let (Some(base_url), Some(api_key)) = (unsafe { (read_c_str(base_url), read_c_str(api_key)) }) else {
            return std::ptr::null_mut();
        };
        let inner = ShortenClient::new(base_url, api_key);
        Box::into_raw(Box::new(FfiShortenClient { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `shortener_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_client_free(client: *mut FfiShortenClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Host-does-IO
// ---------------------------------------------------------------------------

/// Build the `POST /api/new` request for `longlink`.
///
/// Returns null if `client` or `longlink` is null, or `longlink` is not
/// UTF-8. Free with
/// `shortener_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_build_request(
    client: *const FfiShortenClient,
    longlink: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || longlink.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(longlink) = (unsafe { read_c_str(longlink) }) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_shorten(longlink) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse the reply to a request from `shortener_build_request`.
///
/// Always returns a result; free it with `shortener_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_parse_response(
    client: *const FfiShortenClient,
    response: *const FfiHttpResponse,
) -> *mut FfiShortenResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiShortenResult::null_arg("client");
        }
        if response.is_null() {
            return FfiShortenResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            String::new()
        } else {
            // Same as the network path: undecodable bytes are left to the parser.
            unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
        };
        let status = resp.status;
        let core_resp = HttpResponse {
            status,
            headers: Vec::new(),
            body,
        };
        match client.inner.parse_shorten(core_resp) {
            Ok(url) => FfiShortenResult::ok(&url, status),
            Err(e) => FfiShortenResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiShortenResult::panic("panic in shortener_parse_response"))
}

// ---------------------------------------------------------------------------
// Rust-does-IO
// ---------------------------------------------------------------------------

/// Shorten `longlink` over HTTP, blocking until the call completes.
///
/// Returns null only if an argument is null or not UTF-8; every call failure
/// is captured in the proxy. Free with `shortener_proxy_free`.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_proxy_new(
    base_url: *const c_char,
    api_key: *const c_char,
    longlink: *const c_char,
) -> *mut FfiShortenerProxy {
    catch_unwind(|| {
        if base_url.is_null() || api_key.is_null() || longlink.is_null() {
            return std::ptr::null_mut();
        }
        let (Some(base_url), Some(api_key), Some(longlink)) =
            (unsafe { (read_c_str(base_url), read_c_str(api_key), read_c_str(longlink)) })
        else {
            return std::ptr::null_mut();
        };
        let config = ShortenerConfig::new(base_url, api_key);
        FfiShortenerProxy::from_core(ShortenerProxy::new(&config, longlink))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// The short URL, or `""`. Borrowed from `proxy`; null if `proxy` is null.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_proxy_url(proxy: *const FfiShortenerProxy) -> *const c_char {
    if proxy.is_null() {
        return std::ptr::null();
    }
    unsafe { &*proxy }.url.as_ptr()
}

/// The error message, or `""`. Borrowed from `proxy`; null if `proxy` is null.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_proxy_error(proxy: *const FfiShortenerProxy) -> *const c_char {
    if proxy.is_null() {
        return std::ptr::null();
    }
    unsafe { &*proxy }.error.as_ptr()
}

/// True iff the call failed. False for a null `proxy`.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_proxy_is_error(proxy: *const FfiShortenerProxy) -> bool {
    !proxy.is_null() && unsafe { &*proxy }.is_error
}

/// Free a proxy created by `shortener_proxy_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_proxy_free(proxy: *mut FfiShortenerProxy) {
    if !proxy.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(proxy) });
        });
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `shortener_build_request`. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free a result returned by `shortener_parse_response`. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn shortener_free_result(result: *mut FfiShortenResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.short_url.is_null() {
            drop(unsafe { CString::from_raw(result.short_url) });
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
