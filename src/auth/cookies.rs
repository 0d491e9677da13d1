//! Session cookie construction
//!
//! The session token travels in an HTTP-only, same-site-strict cookie.
//! Logout responds with a matching removal cookie; there is no
//! server-side revocation.

use axum_extra::extract::cookie::{Cookie, SameSite};

pub const AUTH_COOKIE: &str = "auth_token";

/// Cookie carrying a freshly issued session token
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .build()
}

/// Removal cookie with attributes matching `session_cookie`
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}
