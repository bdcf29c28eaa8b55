/// One-shot messages carried across a redirect
///
/// A handler that redirects with something to say sets a `flash` cookie
/// holding a short code. The next page view reads the code, shows its
/// message and expires the cookie.

use axum::{
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::AppendHeaders,
};
use chrono::Duration;
use planner_shared::auth::middleware::{build_cookie, expire_cookie, read_cookie};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    DuplicateUsername,
    LoginRequired,
}

impl Flash {
    pub fn code(&self) -> &'static str {
        match self {
            Flash::DuplicateUsername => "duplicate_username",
            Flash::LoginRequired => "login_required",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "duplicate_username" => Some(Flash::DuplicateUsername),
            "login_required" => Some(Flash::LoginRequired),
            _ => None,
        }
    }

    /// Text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Flash::DuplicateUsername => "Username already exists. Please choose a different one.",
            Flash::LoginRequired => "Please log in to access this page.",
        }
    }
}

/// Response header that stores `flash` for the next request
pub fn set(flash: Flash) -> AppendHeaders<Option<(HeaderName, HeaderValue)>> {
    let cookie = build_cookie(FLASH_COOKIE, flash.code(), Duration::minutes(5), false);

    AppendHeaders(cookie.map(|c| (header::SET_COOKIE, c)))
}

/// Reads the pending flash, if any
///
/// Unknown codes are treated as absent.
pub fn peek(headers: &HeaderMap) -> Option<Flash> {
    read_cookie(headers, FLASH_COOKIE).and_then(Flash::from_code)
}

/// Whether the request carries a flash cookie that should be cleared
pub fn is_pending(headers: &HeaderMap) -> bool {
    read_cookie(headers, FLASH_COOKIE).is_some()
}

/// Response header that discards the flash cookie
pub fn clear() -> AppendHeaders<Option<(HeaderName, HeaderValue)>> {
    AppendHeaders(expire_cookie(FLASH_COOKIE).map(|c| (header::SET_COOKIE, c)))
}
