//! 역할 Repository.
//!
//! 역할 테이블은 영속 계층이 시딩하는 참조 데이터로, 여기서는 조회만 합니다.

use sqlx::PgPool;

use portal_core::RoleRecord;

/// 역할 조회 Repository.
pub struct RoleRepository;

impl RoleRepository {
    /// 이름으로 역할 조회.
    ///
    /// 호출자가 소문자로 정규화한 이름을 받아 대소문자 무시 일치로 찾습니다.
    pub async fn find_by_name(
        pool: &PgPool,
        name_lowercased: &str,
    ) -> Result<Option<RoleRecord>, sqlx::Error> {
        sqlx::query_as::<_, RoleRecord>("SELECT id, name FROM roles WHERE LOWER(name) = $1")
            .bind(name_lowercased)
            .fetch_optional(pool)
            .await
    }
}
