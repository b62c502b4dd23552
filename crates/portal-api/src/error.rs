//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "EMAIL_TAKEN",
///   "message": "Email already registered. Please log in.",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_ROLE", "BAD_CREDENTIALS")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 타임스탬프 없는 간단한 에러.
    pub fn simple(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: None,
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (axum::http::StatusCode, axum::Json<ApiErrorResponse>)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
    }

    #[test]
    fn test_api_error_response_simple() {
        let error = ApiErrorResponse::simple("TEST_ERROR", "Test message");
        assert!(error.timestamp.is_none());
        assert!(error.details.is_none());
    }

    #[test]
    fn test_json_serialization_simple() {
        let error = ApiErrorResponse::simple("NOT_FOUND", "Resource not found");
        let json = serde_json::to_string(&error).unwrap();

        // 선택적 필드는 직렬화에서 빠져야 함
        assert!(!json.contains("timestamp"));
        assert!(!json.contains("details"));
        assert!(json.contains(r#""code":"NOT_FOUND""#));
        assert!(json.contains(r#""message":"Resource not found""#));
    }

    #[test]
    fn test_with_details() {
        let details = serde_json::json!({"error": "connection refused"});
        let error = ApiErrorResponse::with_details("INTERNAL_ERROR", "Login failed", details);
        assert!(error.details.is_some());
        assert!(error.timestamp.is_some());
    }
}
