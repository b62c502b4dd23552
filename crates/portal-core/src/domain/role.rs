//! 역할 정의.
//!
//! 포털에서 계정의 권한 수준을 나타내는 닫힌 역할 집합입니다.
//! 역할 이름은 경계(RoleResolver)에서 한 번만 문자열로 비교되고,
//! 이후 로직은 전부 이 enum 변형으로 분기합니다.

use serde::{Deserialize, Serialize};

/// 계정 역할.
///
/// 역할 테이블에 저장된 이름과 1:1 대응됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 일반 사용자 (학생) - 가입 즉시 승인
    User,
    /// 교직원 - 관리자 승인 후 로그인 가능
    Staff,
    /// 관리자 - 저장소에 직접 시딩되며 자가 가입 불가
    Admin,
}

impl Role {
    /// 문자열에서 역할 파싱 (대소문자 무시).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "staff" => Some(Role::Staff),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// 역할 이름 반환 (역할 테이블 표기와 동일한 소문자).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 역할 테이블 레코드.
///
/// 영속 계층이 소유하는 참조 데이터이며 이 코어에서는 읽기 전용입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct RoleRecord {
    /// 역할 ID
    pub id: i64,
    /// 역할 이름
    pub name: String,
}
