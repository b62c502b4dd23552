//! REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (가입/로그인/교직원 승인)
//! - 자격 증명 수명주기와 토큰 발급 코어
//! - JWT 인증 미들웨어
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 인증 코어 (비밀번호, 토큰, 승인 게이트, 서비스)
//! - [`repository`]: 데이터베이스 접근 계층
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    hash_password, verify_password, AccountStore, AuthError, AuthService, Claims, JwtAuth,
    JwtAuthError, JwtConfig, PgAccountStore, TokenPair,
};
pub use error::{ApiErrorResponse, ApiResult};
pub use routes::create_api_router;
pub use state::AppState;
