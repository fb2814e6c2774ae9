//! Session cookie formatting.

use std::time::Duration;

use axum::http::HeaderValue;

use super::super::state::SessionSettings;

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(settings: &SessionSettings, token: &str, ttl: Duration) -> Option<HeaderValue> {
    format_cookie(settings, token, ttl.as_secs())
}

/// `Set-Cookie` value that removes the session cookie.
pub fn cleared_cookie(settings: &SessionSettings) -> Option<HeaderValue> {
    format_cookie(settings, "", 0)
}

fn format_cookie(settings: &SessionSettings, value: &str, max_age: u64) -> Option<HeaderValue> {
    // Browsers drop SameSite=None cookies that are not also Secure.
    let attributes = if settings.secure_cookie {
        "SameSite=None; Secure"
    } else {
        "SameSite=Lax"
    };
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; {}; Max-Age={}",
        settings.cookie_name, value, attributes, max_age
    );
    HeaderValue::from_str(&cookie).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_cookie_has_cross_site_attributes() {
        let cookie = session_cookie(&SessionSettings::default(), "abc", Duration::from_secs(60))
            .unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "imx_token=abc; Path=/; HttpOnly; SameSite=None; Secure; Max-Age=60"
        );
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        let settings = SessionSettings {
            secure_cookie: false,
            ..Default::default()
        };
        let cookie = cleared_cookie(&settings).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "imx_token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }
}
