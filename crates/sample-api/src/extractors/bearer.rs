//! Bearer token extractor.
//!
//! [`Authenticated`] establishes who is calling. Extraction fails with a
//! localized 401 problem when the `Authorization` header is missing or the
//! token does not verify. Routes reach it through the
//! [`Authorized`](super::Authorized) guard, which calls
//! [`Authenticated::require`] with the authority the route demands and fails
//! with a localized 403 problem.
//!
//! Authorities are `{resource}:{action}` strings carried in the token's role
//! list. The `ROOT` role bypasses all authority checks.

use axum::extract::FromRequestParts;
use http::header;
use http::request::Parts;
use restcheck_conformance::token::{self, ClaimSet};
use tracing::debug;

use crate::error::ApiError;

/// Response language negotiated from `Accept-Language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// English, the fallback.
    #[default]
    En,
    /// Japanese, selected by any `ja` language tag.
    Ja,
}

impl Locale {
    /// Picks the response language from request headers.
    pub fn from_headers(headers: &http::HeaderMap) -> Self {
        let accept = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        let japanese = accept.split(',').any(|entry| {
            let tag = entry.split(';').next().unwrap_or("").trim();
            let primary = tag.split('-').next().unwrap_or("");
            primary.eq_ignore_ascii_case("ja")
        });

        if japanese { Locale::Ja } else { Locale::En }
    }

    /// Detail line for a 401 response.
    pub fn unauthorized_detail(self) -> &'static str {
        match self {
            Locale::En => "Full authentication is required to access this resource",
            Locale::Ja => "このリソースにアクセスするには認証をする必要があります",
        }
    }

    /// Detail line for a 403 response.
    pub fn forbidden_detail(self) -> &'static str {
        match self {
            Locale::En => "Access is denied",
            Locale::Ja => "アクセスが拒否されました",
        }
    }
}

/// The verified caller identity.
#[derive(Debug, Clone)]
pub struct Authenticated {
    claims: ClaimSet,
    locale: Locale,
}

impl Authenticated {
    /// Returns the decoded token claims.
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Returns the negotiated response language.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Checks that the caller holds `authority` or the root role.
    pub fn require(&self, authority: &str) -> Result<(), ApiError> {
        if self.claims.has_role(token::ROOT_ROLE) || self.claims.has_role(authority) {
            Ok(())
        } else {
            debug!(
                subject = %self.claims.subject,
                authority,
                "denying request without authority"
            );
            Err(ApiError::Forbidden {
                locale: self.locale,
            })
        }
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);

        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized { locale })?;

        let claims = token::decode(bearer).map_err(|err| {
            debug!(error = %err, "rejecting bearer token");
            ApiError::Unauthorized { locale }
        })?;

        Ok(Self { claims, locale })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue};

    fn headers_with_language(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_locale_defaults_to_english() {
        assert_eq!(Locale::from_headers(&HeaderMap::new()), Locale::En);
        assert_eq!(
            Locale::from_headers(&headers_with_language("en-US,en;q=0.9")),
            Locale::En
        );
    }

    #[test]
    fn test_locale_selects_japanese() {
        assert_eq!(Locale::from_headers(&headers_with_language("ja")), Locale::Ja);
        assert_eq!(
            Locale::from_headers(&headers_with_language("ja-JP,ja;q=0.9,en;q=0.8")),
            Locale::Ja
        );
        assert_eq!(
            Locale::from_headers(&headers_with_language("en-US;q=0.9, ja;q=0.8")),
            Locale::Ja
        );
    }

    #[test]
    fn test_locale_ignores_lookalike_tags() {
        assert_eq!(
            Locale::from_headers(&headers_with_language("jax")),
            Locale::En
        );
        assert_eq!(
            Locale::from_headers(&headers_with_language("de-DE")),
            Locale::En
        );
    }

    #[test]
    fn test_require_with_root_role() {
        let claims = token::decode(&token::default_access_token()).expect("decode");
        let auth = Authenticated {
            claims,
            locale: Locale::En,
        };
        assert!(auth.require("tasks:list").is_ok());
    }

    #[test]
    fn test_require_with_exact_authority() {
        let claims =
            token::decode(&token::access_token_with_roles(&["tasks:list"])).expect("decode");
        let auth = Authenticated {
            claims,
            locale: Locale::En,
        };
        assert!(auth.require("tasks:list").is_ok());
        assert!(auth.require("tasks:create").is_err());
    }

    #[test]
    fn test_require_rejects_insufficient_roles() {
        let claims = token::decode(&token::access_token_with_roles(&[token::INSUFFICIENT_ROLE]))
            .expect("decode");
        let auth = Authenticated {
            claims,
            locale: Locale::Ja,
        };
        let err = auth.require("tasks:list").unwrap_err();
        assert!(matches!(
            err,
            ApiError::Forbidden {
                locale: Locale::Ja
            }
        ));
    }
}
