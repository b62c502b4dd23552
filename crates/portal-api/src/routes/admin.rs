//! 관리자 endpoint.
//!
//! 교직원 승인 상태의 Pending → Approved/Rejected 전이가 여기서 일어나며,
//! 인증 코어는 그 결과 상태를 읽기만 합니다. 모든 엔드포인트는
//! 관리자 토큰을 요구합니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/admin/staff` - 교직원 목록과 승인 상태 조회
//! - `PATCH /api/v1/admin/staff/{id}/status` - 승인 상태 변경

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use portal_core::StaffStatus;

use crate::auth::AdminAuth;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::repository::{AccountRepository, StaffAccountRow};
use crate::state::AppState;

// ==================== Request/Response 타입 ====================

/// 교직원 목록 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffListResponse {
    /// 교직원 계정 목록
    pub staff: Vec<StaffAccountRow>,
    /// 전체 수
    pub total: usize,
}

/// 승인 상태 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStaffStatusRequest {
    /// 새 상태 ("pending" | "approved" | "rejected", 대소문자 무시)
    pub status: String,
}

/// 승인 상태 변경 응답.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateStaffStatusResponse {
    /// 안내 메시지
    pub message: String,
    /// 대상 계정 ID
    pub id: i64,
    /// 적용된 상태
    pub status: StaffStatus,
}

// ==================== 핸들러 ====================

fn db_pool(state: &AppState) -> Result<&PgPool, (StatusCode, Json<ApiErrorResponse>)> {
    state.db_pool.as_ref().ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiErrorResponse::simple(
            "DB_NOT_CONFIGURED",
            "Database not configured",
        )),
    ))
}

/// 교직원 목록 조회.
///
/// GET /api/v1/admin/staff
#[utoipa::path(
    get,
    path = "/api/v1/admin/staff",
    responses(
        (status = 200, description = "교직원 목록", body = StaffListResponse),
        (status = 401, description = "인증 필요"),
        (status = 403, description = "관리자 권한 필요"),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_staff(
    State(state): State<Arc<AppState>>,
    AdminAuth(_claims): AdminAuth,
) -> ApiResult<Json<StaffListResponse>> {
    let pool = db_pool(&state)?;

    let staff = AccountRepository::list_staff(pool).await.map_err(|e| {
        error!(error = %e, "failed to list staff accounts");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("DB_ERROR", e.to_string())),
        )
    })?;

    let total = staff.len();
    Ok(Json(StaffListResponse { staff, total }))
}

/// 교직원 승인 상태 변경.
///
/// PATCH /api/v1/admin/staff/{id}/status
#[utoipa::path(
    patch,
    path = "/api/v1/admin/staff/{id}/status",
    request_body = UpdateStaffStatusRequest,
    params(("id" = i64, Path, description = "교직원 계정 ID")),
    responses(
        (status = 200, description = "상태 변경 완료", body = UpdateStaffStatusResponse),
        (status = 400, description = "알 수 없는 상태 값", body = ApiErrorResponse),
        (status = 404, description = "교직원 계정 아님", body = ApiErrorResponse),
        (status = 500, description = "서버 오류", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn update_staff_status(
    State(state): State<Arc<AppState>>,
    AdminAuth(claims): AdminAuth,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStaffStatusRequest>,
) -> ApiResult<Json<UpdateStaffStatusResponse>> {
    let pool = db_pool(&state)?;

    let status = StaffStatus::parse(&req.status).ok_or((
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("INVALID_STATUS", "Invalid status")),
    ))?;

    let updated = AccountRepository::update_staff_status(pool, id, status)
        .await
        .map_err(|e| {
            error!(error = %e, staff_id = id, "failed to update staff status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("DB_ERROR", e.to_string())),
            )
        })?;

    if !updated {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiErrorResponse::new(
                "STAFF_NOT_FOUND",
                "Staff member not found",
            )),
        ));
    }

    info!(
        staff_id = id,
        status = %status,
        admin = %claims.sub,
        "staff status updated"
    );

    Ok(Json(UpdateStaffStatusResponse {
        message: "Status updated".to_string(),
        id,
        status,
    }))
}

/// 관리자 라우터.
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/staff", get(list_staff))
        .route("/staff/{id}/status", patch(update_staff_status))
}
