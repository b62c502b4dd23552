//! 인증 코어가 소비하는 데이터 접근 계약.
//!
//! AuthService는 이 좁은 트레이트만 바라봅니다. 운영에서는 `PgAccountStore`가
//! Repository 계층에 위임하고, 테스트는 케이스마다 새 인메모리 구현을
//! 만들어 주입합니다. 이 코어에 갱신/삭제 연산은 필요하지 않습니다.

use async_trait::async_trait;
use sqlx::PgPool;

use portal_core::{Account, NewAccount, RoleRecord};

use crate::repository::{AccountRepository, RoleRepository};

/// 데이터 접근 에러.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 이메일 UNIQUE 제약 위반 (동시 가입 경합의 최종 방어선)
    #[error("이메일이 이미 등록되어 있습니다")]
    DuplicateEmail,
    /// 그 외 데이터베이스 오류
    #[error("데이터베이스 오류: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
            _ => StoreError::Database(e.to_string()),
        }
    }
}

/// 계정 저장소 계약.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// 소문자로 정규화된 이름으로 역할 조회.
    async fn find_role_by_name(
        &self,
        name_lowercased: &str,
    ) -> Result<Option<RoleRecord>, StoreError>;

    /// 이메일로 계정 조회 (역할 포함).
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// 새 계정 삽입 후 생성된 ID 반환.
    async fn insert_account(&self, account: NewAccount) -> Result<i64, StoreError>;
}

/// PostgreSQL 기반 계정 저장소.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// 연결 풀로 저장소 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_role_by_name(
        &self,
        name_lowercased: &str,
    ) -> Result<Option<RoleRecord>, StoreError> {
        Ok(RoleRepository::find_by_name(&self.pool, name_lowercased).await?)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(AccountRepository::find_by_email(&self.pool, email).await?)
    }

    async fn insert_account(&self, account: NewAccount) -> Result<i64, StoreError> {
        Ok(AccountRepository::insert(&self.pool, &account).await?)
    }
}
