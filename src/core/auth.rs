//! Authentication for the vocabulary API
//!
//! Turns a bearer token into a [`Principal`]. Token issuance and verification
//! use HS256 JWTs signed with the secret from [`AuthConfig`]; the secret is
//! handed in explicitly, never read from the environment here.
//!
//! The resulting principal is trusted verbatim by the access controller.

use async_trait::async_trait;
use axum::http::{HeaderMap, header::AUTHORIZATION};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AuthConfig, MAX_TOKEN_TTL_SECS};
use crate::core::access::{Principal, Role};
use crate::core::error::{ApiError, ApiResult};

/// Claims embedded in every issued token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    /// Tokens issued without a role are treated as plain users
    #[serde(default)]
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    pub fn principal(&self) -> Principal {
        Principal::new(self.sub, self.role)
    }
}

/// Issues and verifies signed tokens
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    issuer: Option<String>,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(config.token_ttl_secs.min(MAX_TOKEN_TTL_SECS) as i64),
            issuer: config.issuer.clone(),
        }
    }

    /// Sign a token for the given account
    pub fn issue(&self, user_id: Uuid, email: &str, role: Role) -> ApiResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("failed to sign token: {}", e)))
    }

    /// Verify signature, expiry and issuer, returning the decoded claims
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

/// Extract the token from an `Authorization` header
///
/// Accepts `Bearer <token>` as well as a bare token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest,
        _ => value,
    }
    .trim();
    (!token.is_empty()).then_some(token)
}

/// Trait for auth providers
///
/// The server asks the provider for a principal once per protected request.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the principal behind a request
    async fn authenticate(&self, headers: &HeaderMap) -> ApiResult<Principal>;
}

/// JWT-backed provider used by the server
#[derive(Clone)]
pub struct JwtAuthProvider {
    tokens: TokenService,
}

impl JwtAuthProvider {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn authenticate(&self, headers: &HeaderMap) -> ApiResult<Principal> {
        let token = bearer_token(headers)
            .ok_or_else(|| ApiError::unauthenticated("Access denied. No token provided."))?;

        let claims = self.tokens.verify(token)?;
        Ok(claims.principal())
    }
}
