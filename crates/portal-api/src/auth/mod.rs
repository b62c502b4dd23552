//! 인증 및 권한 부여.
//!
//! 자격 증명 수명주기와 토큰 발급의 핵심 로직을 제공합니다.
//!
//! # 구성 요소
//!
//! - [`AuthService`]: 가입/로그인 조율
//! - [`AccountStore`]: 좁은 데이터 접근 계약 (운영: [`PgAccountStore`])
//! - [`Claims`]: JWT 페이로드 구조체
//! - 비밀번호 해싱/검증 함수
//! - 교직원 승인 게이트
//! - [`JwtAuth`] / [`AdminAuth`]: Axum 미들웨어용 추출기

pub mod approval;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;
pub mod store;

pub use approval::{can_login, initial_approval_policy, ApprovalPolicy, LoginDenied};
pub use jwt::{
    decode_token, issue_login_tokens, issue_token, Claims, JwtError, TokenPair,
    ACCESS_TTL_MINUTES, REFRESH_TTL_MINUTES, REGISTRATION_TTL_MINUTES,
};
pub use middleware::{AdminAuth, JwtAuth, JwtAuthError, JwtConfig};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{AuthError, AuthService, LoginOutcome, RegisterOutcome, Registration};
pub use store::{AccountStore, PgAccountStore, StoreError};
