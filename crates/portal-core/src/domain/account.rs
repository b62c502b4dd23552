//! 계정 도메인 모델.
//!
//! 가입으로 생성되는 계정과 교직원 승인 상태를 정의합니다.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// 교직원 승인 상태.
///
/// 역할이 `Staff`인 계정에만 의미가 있으며, `Pending`으로 생성된 뒤
/// 관리자에 의해 `Approved` 또는 `Rejected`로 전이됩니다.
/// 그 외 역할의 계정은 상태가 NULL이고 로그인 시 참조되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "PascalCase")]
pub enum StaffStatus {
    /// 승인 대기 (초기 상태)
    Pending,
    /// 관리자 승인 완료
    Approved,
    /// 관리자 거절 (로그인 불가)
    Rejected,
}

impl StaffStatus {
    /// 문자열에서 상태 파싱 (대소문자 무시).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(StaffStatus::Pending),
            "approved" => Some(StaffStatus::Approved),
            "rejected" => Some(StaffStatus::Rejected),
            _ => None,
        }
    }

    /// DB 컬럼에 저장되는 표기.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffStatus::Pending => "Pending",
            StaffStatus::Approved => "Approved",
            StaffStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 계정.
///
/// 역할 테이블과 조인된 형태로 조회되며, `role`은 조인된 역할 이름을
/// 변형으로 해석한 값입니다. 이 코어는 계정을 삭제하지 않습니다.
#[derive(Debug, Clone)]
pub struct Account {
    /// 계정 ID
    pub id: i64,
    /// 이름
    pub first_name: String,
    /// 성
    pub last_name: String,
    /// 표시 이름 ("이름 성")
    pub name: String,
    /// 이메일 (전체 계정에서 유일)
    pub email: String,
    /// 비밀번호 해시 (PHC 문자열, 평문은 어디에도 저장하지 않음)
    pub password_hash: String,
    /// 역할 ID (roles 테이블 FK)
    pub role_id: i64,
    /// 해석된 역할
    pub role: Role,
    /// 승인 여부 (교직원 외 역할은 생성 시점부터 true)
    pub is_approved: bool,
    /// 교직원 승인 상태 (교직원 외 역할은 NULL)
    pub staff_status: Option<StaffStatus>,
    /// 학번
    pub roll_number: Option<String>,
    /// 학과
    pub branch: Option<String>,
}

/// 가입 시 영속 계층에 넘기는 새 계정 필드 (ID 제외).
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// 표시 이름 ("이름 성")
    pub name: String,
    /// 이름
    pub first_name: String,
    /// 성
    pub last_name: String,
    /// 이메일
    pub email: String,
    /// 비밀번호 해시
    pub password_hash: String,
    /// 역할 ID
    pub role_id: i64,
    /// 승인 여부
    pub is_approved: bool,
    /// 교직원 승인 상태
    pub staff_status: Option<StaffStatus>,
    /// 학번
    pub roll_number: String,
    /// 학과
    pub branch: String,
}
