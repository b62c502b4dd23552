//! JWT 토큰 처리.
//!
//! 가입/로그인 시 발급되는 서명 토큰의 생성과 검증 로직.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use portal_core::Role;

/// Access Token 수명 (분).
pub const ACCESS_TTL_MINUTES: i64 = 30;

/// Refresh Token 수명 (분).
pub const REFRESH_TTL_MINUTES: i64 = 7 * 24 * 60;

/// 가입 직후 발급되는 토큰의 수명 (분).
pub const REGISTRATION_TTL_MINUTES: i64 = 24 * 60;

/// JWT 페이로드.
///
/// 발급 시점마다 새로 구성되며 영속화되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 계정 ID
    pub sub: String,
    /// 계정 역할
    pub role: Role,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `account_id` - 계정 ID
    /// * `role` - 계정 역할
    /// * `expires_in_minutes` - 만료 시간 (분)
    pub fn new(account_id: i64, role: Role, expires_in_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expires_in_minutes)).timestamp(),
        }
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Access Token + Refresh Token 페어.
///
/// 로그인 성공 시 두 토큰이 같은 claim 구조로, 다른 만료 시간으로 발급됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access Token (30분)
    pub access_token: String,
    /// Refresh Token (7일)
    pub refresh_token: String,
}

/// JWT 토큰 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰 디코딩 실패")]
    DecodingError,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("잘못된 토큰 형식")]
    InvalidToken,
}

/// 토큰 발급.
///
/// 계정 ID와 역할, 절대 만료 시각(현재 시간 + ttl)을 담아 HS256으로 서명합니다.
pub fn issue_token(
    account_id: i64,
    role: Role,
    expires_in_minutes: i64,
    secret: &str,
) -> Result<String, JwtError> {
    let claims = Claims::new(account_id, role, expires_in_minutes);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// 로그인용 Access + Refresh 토큰 쌍 발급.
pub fn issue_login_tokens(account_id: i64, role: Role, secret: &str) -> Result<TokenPair, JwtError> {
    let access_token = issue_token(account_id, role, ACCESS_TTL_MINUTES, secret)?;
    let refresh_token = issue_token(account_id, role, REFRESH_TTL_MINUTES, secret)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// JWT 토큰 디코딩 및 검증.
///
/// 발급에 사용한 것과 같은 시크릿을 사용하며, 만료는 절대 시각으로 검사합니다.
pub fn decode_token(token: &str, secret: &str) -> Result<TokenData<Claims>, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidToken => JwtError::InvalidToken,
        _ => JwtError::DecodingError,
    })
}
