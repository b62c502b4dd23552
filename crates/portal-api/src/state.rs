//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//! 인증 서비스와 연결 풀은 시작 시 한 번 구성되고 이후 변하지 않습니다.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::auth::AuthService;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 인증 서비스 - 가입/로그인 조율
    pub auth: AuthService,

    /// 데이터베이스 연결 풀 (테스트에서는 None)
    pub db_pool: Option<PgPool>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(auth: AuthService, db_pool: Option<PgPool>) -> Self {
        Self {
            auth,
            db_pool,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// DB 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        match &self.db_pool {
            Some(pool) => sqlx::query("SELECT 1").fetch_one(pool).await.is_ok(),
            None => false,
        }
    }
}
