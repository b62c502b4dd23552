//! Axum용 JWT 인증 미들웨어.
//!
//! 보호된 라우트에서 사용할 Bearer 토큰 추출기.
//! 토큰 발급과 같은 시크릿을 공유합니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use portal_core::{Role, DEV_JWT_SECRET};

use super::jwt::{decode_token, Claims, JwtError};

/// JWT 인증 추출기.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(claims): JwtAuth,
/// ) -> impl IntoResponse {
///     format!("account: {}", claims.sub)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// JWT 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("권한이 부족합니다")]
    InsufficientPermission,
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            JwtAuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            JwtAuthError::InvalidAuthHeader => (StatusCode::UNAUTHORIZED, "INVALID_AUTH_HEADER"),
            JwtAuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            JwtAuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            JwtAuthError::InsufficientPermission => {
                (StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSION")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

/// JWT 비밀 키 저장소.
///
/// 라우터 조립 시 Extension으로 주입되어 추출기가 읽습니다.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(JwtAuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(JwtAuthError::InvalidAuthHeader)?;

        // Extension에 시크릿이 없으면 환경 변수, 마지막으로 개발용 기본값
        let jwt_secret = parts
            .extensions
            .get::<JwtConfig>()
            .map(|c| c.secret.clone())
            .unwrap_or_else(|| {
                std::env::var("PORTAL__AUTH__JWT_SECRET")
                    .unwrap_or_else(|_| DEV_JWT_SECRET.to_string())
            });

        let token_data = decode_token(token, &jwt_secret).map_err(|e| match e {
            JwtError::TokenExpired => JwtAuthError::TokenExpired,
            _ => JwtAuthError::InvalidToken,
        })?;

        Ok(JwtAuth(token_data.claims))
    }
}

/// 관리자 권한을 요구합니다.
pub fn require_admin(claims: &Claims) -> Result<(), JwtAuthError> {
    if claims.role == Role::Admin {
        Ok(())
    } else {
        Err(JwtAuthError::InsufficientPermission)
    }
}

/// Admin 권한을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JwtAuth(claims) = JwtAuth::from_request_parts(parts, state).await?;
        require_admin(&claims)?;
        Ok(AdminAuth(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let admin = Claims::new(1, Role::Admin, 60);
        let staff = Claims::new(2, Role::Staff, 60);
        let user = Claims::new(3, Role::User, 60);

        assert!(require_admin(&admin).is_ok());
        assert!(require_admin(&staff).is_err());
        assert!(require_admin(&user).is_err());
    }

    #[test]
    fn test_jwt_auth_error_responses() {
        let errors = vec![
            JwtAuthError::MissingToken,
            JwtAuthError::InvalidAuthHeader,
            JwtAuthError::TokenExpired,
            JwtAuthError::InvalidToken,
            JwtAuthError::InsufficientPermission,
        ];

        for error in errors {
            let response = error.into_response();
            let status = response.status();

            match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {}
                _ => panic!("Unexpected status code: {}", status),
            }
        }
    }
}
