//! Dummy opaque bearer tokens.
//!
//! Scenarios need to impersonate differently privileged callers without a
//! real OAuth2 authorization server. This module issues self-contained dummy
//! tokens that a service under test can decode and trust in its test profile:
//! a base64url claims payload joined by a dot to a hex SHA-256 signature over
//! the payload and a fixed development secret.
//!
//! The tokens are deliberately not JWTs. They carry just enough structure for
//! conformance scenarios (subject, roles, scopes, lifetime) and nothing else.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Subject used by the standard test identity.
pub const DEFAULT_SUBJECT: &str = "example-user";

/// Role granting access to every operation.
pub const ROOT_ROLE: &str = "ROOT";

/// Role used to exercise 403 paths; services must not grant it any authority.
pub const INSUFFICIENT_ROLE: &str = "ACTUATOR";

/// Scopes carried by the standard test identity.
pub const DEFAULT_SCOPES: [&str; 2] = ["openid", "profile"];

/// Shared secret for signing dummy tokens. Development use only.
const SIGNING_SECRET: &str = "restcheck-dummy-secret";

/// Errors raised while decoding a dummy token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token is not in `payload.signature` form.
    #[error("token is not in payload.signature form")]
    InvalidFormat,

    /// The payload is not valid base64url.
    #[error("token payload is not valid base64url: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The payload decoded but is not valid claims JSON.
    #[error("token payload is not valid claims JSON: {0}")]
    MalformedClaims(#[from] serde_json::Error),

    /// A claims timestamp falls outside the representable range.
    #[error("token timestamp out of range")]
    TimestampOutOfRange,

    /// The signature does not match the payload.
    #[error("token signature does not match payload")]
    InvalidSignature,

    /// The token expired.
    #[error("token expired at {expires_at}")]
    Expired {
        /// When the token stopped being valid.
        expires_at: DateTime<Utc>,
    },
}

/// Decoded claims of a dummy token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    /// Token subject (the authenticated user).
    pub subject: String,
    /// Granted roles.
    pub roles: Vec<String>,
    /// Granted OAuth2 scopes.
    pub scopes: Vec<String>,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl ClaimSet {
    /// Returns true when the claims carry the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns true when the claims carry the given scope.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Wire form of the claims payload.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    roles: Vec<String>,
    scp: Vec<String>,
    iat: i64,
    exp: i64,
}

/// Issues a signed dummy token.
///
/// # Arguments
///
/// * `subject` - Token subject
/// * `roles` - Granted roles
/// * `scopes` - Granted scopes
/// * `issued_at` - Issue instant
/// * `ttl` - Lifetime; the token expires at `issued_at + ttl`
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use restcheck_conformance::token;
///
/// let bearer = token::issue(
///     "example-user",
///     &["ROOT"],
///     &["openid", "profile"],
///     Utc::now(),
///     Duration::seconds(60),
/// );
/// assert!(token::decode(&bearer).is_ok());
/// ```
pub fn issue(
    subject: &str,
    roles: &[&str],
    scopes: &[&str],
    issued_at: DateTime<Utc>,
    ttl: Duration,
) -> String {
    let claims = WireClaims {
        sub: subject.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        scp: scopes.iter().map(|s| s.to_string()).collect(),
        iat: issued_at.timestamp_millis(),
        exp: (issued_at + ttl).timestamp_millis(),
    };

    // WireClaims serialization cannot fail: no maps, no non-string keys.
    let json = serde_json::to_string(&claims).expect("claims serialize to JSON");
    let payload = URL_SAFE_NO_PAD.encode(json.as_bytes());
    let signature = sign(&payload);

    format!("{payload}.{signature}")
}

/// Issues the standard test identity: `example-user` with the `ROOT` role,
/// `openid` and `profile` scopes, and a 60-second lifetime starting now.
pub fn default_access_token() -> String {
    issue(
        DEFAULT_SUBJECT,
        &[ROOT_ROLE],
        &DEFAULT_SCOPES,
        Utc::now(),
        Duration::seconds(60),
    )
}

/// Issues a token for the standard subject with the given roles and a
/// 60-second lifetime. Used by 403 checks that only vary the role set.
pub fn access_token_with_roles(roles: &[&str]) -> String {
    issue(
        DEFAULT_SUBJECT,
        roles,
        &DEFAULT_SCOPES,
        Utc::now(),
        Duration::seconds(60),
    )
}

/// Decodes and verifies a dummy token.
///
/// Verifies the signature before reading the payload, then rejects expired
/// tokens.
pub fn decode(token: &str) -> Result<ClaimSet, TokenError> {
    let (payload, signature) = token.split_once('.').ok_or(TokenError::InvalidFormat)?;
    if payload.is_empty() || signature.is_empty() || signature.contains('.') {
        return Err(TokenError::InvalidFormat);
    }

    if sign(payload) != signature {
        return Err(TokenError::InvalidSignature);
    }

    let json = URL_SAFE_NO_PAD.decode(payload.as_bytes())?;
    let wire: WireClaims = serde_json::from_slice(&json)?;

    let issued_at =
        DateTime::from_timestamp_millis(wire.iat).ok_or(TokenError::TimestampOutOfRange)?;
    let expires_at =
        DateTime::from_timestamp_millis(wire.exp).ok_or(TokenError::TimestampOutOfRange)?;

    if expires_at <= Utc::now() {
        return Err(TokenError::Expired { expires_at });
    }

    Ok(ClaimSet {
        subject: wire.sub,
        roles: wire.roles,
        scopes: wire.scp,
        issued_at,
        expires_at,
    })
}

/// Signs an encoded payload with the development secret.
fn sign(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(b".");
    hasher.update(SIGNING_SECRET.as_bytes());
    hex::encode(hasher.finalize())
}
