//! 인증 endpoint.
//!
//! 가입과 로그인을 위한 REST API를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/auth/register` - 계정 가입
//! - `POST /api/v1/auth/login` - 로그인 (Access + Refresh 토큰 발급)

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use portal_core::{Role, StaffStatus};

use crate::auth::{AuthError, LoginOutcome, RegisterOutcome, Registration};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

// ==================== Request/Response 타입 ====================

/// 가입 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// 이름
    pub first_name: String,
    /// 성
    pub last_name: String,
    /// 이메일 (전체 계정에서 유일)
    pub email: String,
    /// 비밀번호 (평문, 저장 전 해싱됨)
    pub password: String,
    /// 역할 이름 (대소문자 무시)
    pub role: String,
    /// 학번
    pub roll_number: String,
    /// 학과
    pub branch: String,
}

/// 가입 응답.
///
/// 교직원은 `status: "pending"`에 토큰 없이, 일반 사용자는
/// 가입 토큰과 프로필을 담아 돌려줍니다.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// 안내 메시지
    pub message: String,
    /// 승인 대기 여부 표시 (교직원만 "pending")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// 가입 토큰 (일반 사용자만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// 가입된 계정 프로필 (일반 사용자만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<RegisteredUser>,
}

/// 가입 직후 반환되는 프로필 투영.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUser {
    /// 계정 ID
    pub id: i64,
    /// 이메일
    pub email: String,
    /// 역할 이름
    pub role: Role,
    /// 이름
    pub first_name: String,
    /// 성
    pub last_name: String,
    /// 학번
    pub roll_number: Option<String>,
    /// 학과
    pub branch: Option<String>,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// 이메일
    pub email: String,
    /// 비밀번호
    pub password: String,
}

/// 로그인 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Access Token (30분)
    pub access_token: String,
    /// Refresh Token (7일)
    pub refresh_token: String,
    /// 계정 프로필
    pub user: LoginUser,
}

/// 로그인 시 반환되는 프로필 투영 (승인 상태 포함).
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUser {
    /// 계정 ID
    pub id: i64,
    /// 이메일
    pub email: String,
    /// 역할 이름
    pub role: Role,
    /// 이름
    pub first_name: String,
    /// 성
    pub last_name: String,
    /// 학번
    pub roll_number: Option<String>,
    /// 학과
    pub branch: Option<String>,
    /// 교직원 승인 상태 (교직원 외 역할은 null)
    pub staff_status: Option<StaffStatus>,
}

// ==================== 에러 매핑 ====================

/// AuthError를 상태 코드와 에러 바디로 변환.
///
/// 내부 오류는 일반적인 메시지에 원인 상세를 details로 실어 보냅니다.
fn error_response(
    err: AuthError,
    internal_message: &str,
) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, code) = match &err {
        AuthError::InvalidRole => (StatusCode::BAD_REQUEST, "INVALID_ROLE"),
        AuthError::EmailTaken => (StatusCode::CONFLICT, "EMAIL_TAKEN"),
        AuthError::AccountNotFound => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
        AuthError::PendingApproval => (StatusCode::FORBIDDEN, "PENDING_APPROVAL"),
        AuthError::Rejected => (StatusCode::FORBIDDEN, "STAFF_REJECTED"),
        AuthError::BadCredentials => (StatusCode::UNAUTHORIZED, "BAD_CREDENTIALS"),
        AuthError::Internal(detail) => {
            error!(error = %detail, "auth operation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::with_details(
                    "INTERNAL_ERROR",
                    internal_message,
                    serde_json::json!({ "error": detail }),
                )),
            );
        }
    };

    (status, Json(ApiErrorResponse::new(code, err.to_string())))
}

// ==================== 핸들러 ====================

/// 계정 가입.
///
/// POST /api/v1/auth/register
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "가입 성공 (교직원은 승인 대기)", body = RegisterResponse),
        (status = 400, description = "알 수 없는 역할", body = ApiErrorResponse),
        (status = 409, description = "이미 등록된 이메일", body = ApiErrorResponse),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let registration = Registration {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password: req.password,
        role: req.role,
        roll_number: req.roll_number,
        branch: req.branch,
    };

    let outcome = state
        .auth
        .register(registration)
        .await
        .map_err(|e| error_response(e, "Registration failed."))?;

    let response = match outcome {
        RegisterOutcome::StaffPending => RegisterResponse {
            message: "Staff registration submitted! Await admin approval.".to_string(),
            status: Some("pending".to_string()),
            token: None,
            user: None,
        },
        RegisterOutcome::Registered { token, account } => RegisterResponse {
            message: "Registration successful!".to_string(),
            status: None,
            token: Some(token),
            user: Some(RegisteredUser {
                id: account.id,
                email: account.email,
                role: account.role,
                first_name: account.first_name,
                last_name: account.last_name,
                roll_number: account.roll_number,
                branch: account.branch,
            }),
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// 로그인.
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 401, description = "비밀번호 불일치", body = ApiErrorResponse),
        (status = 403, description = "교직원 승인 대기/거절", body = ApiErrorResponse),
        (status = 404, description = "계정 없음", body = ApiErrorResponse),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let LoginOutcome { tokens, account } = state
        .auth
        .login(&req.email, &req.password)
        .await
        .map_err(|e| error_response(e, "Login failed"))?;

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: LoginUser {
            id: account.id,
            email: account.email,
            role: account.role,
            first_name: account.first_name,
            last_name: account.last_name,
            roll_number: account.roll_number,
            branch: account.branch,
            staff_status: account.staff_status,
        },
    }))
}

/// 인증 라우터.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
