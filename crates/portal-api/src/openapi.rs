//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::repository::StaffAccountRow;
use crate::routes::{
    ComponentHealth, ComponentStatus, HealthResponse, LoginRequest, LoginResponse, LoginUser,
    RegisterRequest, RegisterResponse, RegisteredUser, StaffListResponse,
    UpdateStaffStatusRequest, UpdateStaffStatusResponse,
};
use portal_core::StaffStatus;

/// Bearer 인증 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Campus Portal Auth API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Portal Auth API",
        version = "0.1.0",
        description = r#"
# 캠퍼스 포털 인증 게이트웨이 REST API

계정 가입, 로그인, 교직원 승인 관리를 위한 REST API입니다.

## 주요 기능

- **가입**: 역할 기반 가입 (교직원은 관리자 승인 대기)
- **로그인**: Access(30분) + Refresh(7일) 토큰 발급
- **교직원 승인**: 관리자의 Pending → Approved/Rejected 전이

## 인증

관리자 엔드포인트는 JWT Bearer 토큰 인증이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(
            name = "Campus Portal Team",
            url = "https://github.com/user/portal"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 가입 및 로그인"),
        (name = "admin", description = "관리자 - 교직원 승인 관리")
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,
            StaffStatus,

            // ===== Auth =====
            RegisterRequest,
            RegisterResponse,
            RegisteredUser,
            LoginRequest,
            LoginResponse,
            LoginUser,

            // ===== Admin =====
            StaffListResponse,
            StaffAccountRow,
            UpdateStaffStatusRequest,
            UpdateStaffStatusResponse,
        )
    ),
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::register,
        crate::routes::auth::login,

        // ===== Admin =====
        crate::routes::admin::list_staff,
        crate::routes::admin::update_staff_status,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Campus Portal Auth API"));
        assert!(json.contains("/api/v1/auth/register"));
        assert!(json.contains("/api/v1/auth/login"));
        assert!(json.contains("/api/v1/admin/staff"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("RegisterRequest"));
        assert!(json.contains("LoginResponse"));
        assert!(json.contains("ApiErrorResponse"));
    }
}
