//! Credentials presented on an inbound call.

use super::SessionToken;

/// Every channel a token may arrive on, already pulled out of the request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Raw `Authorization` header value.
    pub authorization: Option<String>,
    /// Value of the session cookie.
    pub cookie: Option<String>,
    /// Value of the `X-Auth-Token` header.
    pub header_token: Option<String>,
    /// Value of the `token` query parameter.
    pub query_token: Option<String>,
}

impl Credentials {
    /// Picks the token to authenticate with.
    ///
    /// Priority: bearer header, cookie, then (only when `allow_fallback`)
    /// the `X-Auth-Token` header and the `token` query parameter.
    pub fn token(&self, allow_fallback: bool) -> Option<SessionToken> {
        let bearer = self.authorization.as_deref().and_then(bearer_token);
        let cookie = self.cookie.as_deref().and_then(SessionToken::parse);
        let primary = bearer.or(cookie);
        if primary.is_some() || !allow_fallback {
            return primary;
        }
        self.header_token
            .as_deref()
            .and_then(SessionToken::parse)
            .or_else(|| self.query_token.as_deref().and_then(SessionToken::parse))
    }
}

/// Extracts the token from `Bearer <token>`; the scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<SessionToken> {
    let header = header.trim();
    let (scheme, rest) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    SessionToken::parse(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials {
            authorization: Some("Bearer from-header".into()),
            cookie: Some("from-cookie".into()),
            header_token: Some("from-x-auth".into()),
            query_token: Some("from-query".into()),
        }
    }

    fn token(c: &Credentials, fallback: bool) -> Option<String> {
        c.token(fallback).map(|t| t.as_str().to_string())
    }

    #[test]
    fn bearer_wins_over_everything() {
        assert_eq!(token(&creds(), true).as_deref(), Some("from-header"));
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let c = Credentials {
            authorization: Some("bEaReR   abc  ".into()),
            ..Default::default()
        };
        assert_eq!(token(&c, false).as_deref(), Some("abc"));
    }

    #[test]
    fn non_bearer_scheme_falls_through_to_cookie() {
        let mut c = creds();
        c.authorization = Some("Basic dXNlcjpwYXNz".into());
        assert_eq!(token(&c, false).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn empty_bearer_falls_through() {
        let mut c = creds();
        c.authorization = Some("Bearer    ".into());
        assert_eq!(token(&c, false).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn fallback_channels_need_opt_in() {
        let c = Credentials {
            header_token: Some("from-x-auth".into()),
            query_token: Some("from-query".into()),
            ..Default::default()
        };
        assert_eq!(token(&c, false), None);
        assert_eq!(token(&c, true).as_deref(), Some("from-x-auth"));

        let c = Credentials {
            query_token: Some("from-query".into()),
            ..Default::default()
        };
        assert_eq!(token(&c, true).as_deref(), Some("from-query"));
    }

    #[test]
    fn nothing_presented_yields_none() {
        assert!(Credentials::default().token(true).is_none());
    }
}
