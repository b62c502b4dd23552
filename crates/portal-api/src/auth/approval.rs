//! 교직원 승인 게이트.
//!
//! 교직원 계정의 승인 상태 기계와, 가입/로그인 시점에 AuthService가
//! 참조하는 두 가지 정책을 제공합니다. Pending → Approved/Rejected 전이는
//! 관리자 엔드포인트에서 수행되고, 여기서는 결과 상태를 읽기만 합니다.

use portal_core::{Role, StaffStatus};

/// 가입 시점의 초기 승인 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalPolicy {
    /// 승인 여부
    pub is_approved: bool,
    /// 교직원 승인 상태 (교직원 외에는 NULL)
    pub staff_status: Option<StaffStatus>,
}

/// 역할별 초기 승인 정책을 반환합니다.
///
/// 교직원은 승인 대기로 생성되고, 그 외 역할은 즉시 승인됩니다.
pub fn initial_approval_policy(role: Role) -> ApprovalPolicy {
    match role {
        Role::Staff => ApprovalPolicy {
            is_approved: false,
            staff_status: Some(StaffStatus::Pending),
        },
        _ => ApprovalPolicy {
            is_approved: true,
            staff_status: None,
        },
    }
}

/// 로그인 거부 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginDenied {
    #[error("교직원 계정이 승인 대기 중입니다")]
    PendingApproval,
    #[error("교직원 계정이 거절되었습니다")]
    Rejected,
}

/// 해당 역할/상태의 계정이 로그인할 수 있는지 판단합니다.
///
/// 교직원 외 역할은 상태를 참조하지 않고 항상 허용됩니다.
/// 교직원 행의 NULL 상태는 Pending으로 취급합니다 (다른 작성자가 만든
/// 행에 대한 안전망으로, 이 코어는 교직원을 항상 Pending으로 생성합니다).
pub fn can_login(role: Role, staff_status: Option<StaffStatus>) -> Result<(), LoginDenied> {
    if role != Role::Staff {
        return Ok(());
    }

    match staff_status.unwrap_or(StaffStatus::Pending) {
        StaffStatus::Pending => Err(LoginDenied::PendingApproval),
        StaffStatus::Rejected => Err(LoginDenied::Rejected),
        StaffStatus::Approved => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_policy_staff_is_pending() {
        let policy = initial_approval_policy(Role::Staff);
        assert!(!policy.is_approved);
        assert_eq!(policy.staff_status, Some(StaffStatus::Pending));
    }

    #[test]
    fn test_initial_policy_non_staff_is_approved() {
        for role in [Role::User, Role::Admin] {
            let policy = initial_approval_policy(role);
            assert!(policy.is_approved);
            assert_eq!(policy.staff_status, None);
        }
    }

    #[test]
    fn test_staff_login_gate() {
        assert_eq!(
            can_login(Role::Staff, Some(StaffStatus::Pending)),
            Err(LoginDenied::PendingApproval)
        );
        assert_eq!(
            can_login(Role::Staff, Some(StaffStatus::Rejected)),
            Err(LoginDenied::Rejected)
        );
        assert_eq!(can_login(Role::Staff, Some(StaffStatus::Approved)), Ok(()));
    }

    #[test]
    fn test_staff_null_status_treated_as_pending() {
        assert_eq!(can_login(Role::Staff, None), Err(LoginDenied::PendingApproval));
    }

    #[test]
    fn test_non_staff_never_consults_status() {
        // 상태가 어떤 값이든 교직원 외 역할은 항상 허용
        for status in [
            None,
            Some(StaffStatus::Pending),
            Some(StaffStatus::Rejected),
        ] {
            assert_eq!(can_login(Role::User, status), Ok(()));
            assert_eq!(can_login(Role::Admin, status), Ok(()));
        }
    }
}
