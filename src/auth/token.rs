use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::blocklist::Blocklist;

/// Failure modes of token issuance and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signing or serializing a new token failed.
    Creation(String),
    /// The token is malformed, has a bad signature, or carries the wrong
    /// claim set for the requested check.
    Invalid,
    /// The token's `exp` lies in the past.
    Expired,
    /// The token is well-formed and in date but its id has been revoked.
    Revoked,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Creation(msg) => write!(f, "failed to create token: {}", msg),
            TokenError::Invalid => write!(f, "invalid token"),
            TokenError::Expired => write!(f, "token has expired"),
            TokenError::Revoked => write!(f, "token has been revoked"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Claims carried by an access token.
///
/// `user_id` is a dedicated numeric claim, so handlers never parse it out
/// of a string subject.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// The id of the authenticated user.
    pub user_id: i32,
    /// Unique token id, the unit of revocation.
    pub jti: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Claims carried by a refresh token. The subject is the stringified user
/// id, which keeps the refresh flavor structurally distinct from
/// [`AccessClaims`]: decoding a token as the wrong flavor fails.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    /// Stringified id of the user this token can mint sessions for.
    pub sub: String,
    /// Unique token id, the unit of revocation.
    pub jti: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl RefreshClaims {
    /// Parses the string subject back into a user id.
    pub fn user_id(&self) -> Result<i32, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

/// The claim fields shared by both token flavors. Used when revoking, where
/// either flavor is acceptable.
#[derive(Debug, Deserialize)]
struct RevocableClaims {
    jti: Uuid,
    exp: i64,
}

/// An access/refresh token pair as returned by login and refresh.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies the two JWT flavors of a session.
///
/// The signing secret, lifetimes and revocation store are all injected at
/// construction, so a test can build a fully working instance with a
/// throwaway secret and short (or negative) lifetimes.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    blocklist: Arc<dyn Blocklist>,
}

impl TokenService {
    pub fn new(
        secret: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
        blocklist: Arc<dyn Blocklist>,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
            blocklist,
        }
    }

    /// Mints a fresh access/refresh pair for a user.
    ///
    /// Both tokens get their own random `jti` so each can be revoked
    /// independently.
    pub fn issue(&self, user_id: i32) -> Result<TokenPair, TokenError> {
        let now = Utc::now();

        let access = AccessClaims {
            user_id,
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };
        let refresh = RefreshClaims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        Ok(TokenPair {
            access_token: self.encode(&access)?,
            refresh_token: self.encode(&refresh)?,
        })
    }

    /// Verifies an access token: signature, expiry, claim shape, and the
    /// blocklist, in that order.
    ///
    /// # Returns
    /// The decoded [`AccessClaims`] if the token is a live access token.
    /// `TokenError::Invalid` covers refresh tokens presented here, since
    /// their claims do not decode as `AccessClaims`.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let claims: AccessClaims = self.decode(token)?;
        if self.blocklist.contains(&claims.jti) {
            return Err(TokenError::Revoked);
        }
        Ok(claims)
    }

    /// Verifies a refresh token the same way [`verify_access`] checks an
    /// access token.
    ///
    /// [`verify_access`]: TokenService::verify_access
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let claims: RefreshClaims = self.decode(token)?;
        if self.blocklist.contains(&claims.jti) {
            return Err(TokenError::Revoked);
        }
        Ok(claims)
    }

    /// Verifies a refresh token and mints a fresh pair for its subject.
    ///
    /// The presented refresh token stays valid until it expires: pairs are
    /// not rotated on refresh, so a leaked refresh token keeps working for
    /// its full lifetime unless it is revoked explicitly.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, TokenError> {
        let claims = self.verify_refresh(refresh_token)?;
        self.issue(claims.user_id()?)
    }

    /// Revokes a still-valid token of either flavor by blocklisting its id
    /// until the token's own expiry. Revoking an already-revoked token is a
    /// no-op.
    pub fn revoke(&self, token: &str) -> Result<(), TokenError> {
        let claims: RevocableClaims = self.decode(token)?;
        self.blocklist.insert(claims.jti, claims.exp);
        Ok(())
    }

    fn encode<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    fn decode<C: serde::de::DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<C>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
