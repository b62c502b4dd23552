//! 인증 서비스.
//!
//! 가입/로그인 두 공개 연산을 조율합니다: 역할 해석, 이메일 유일성 검사,
//! 비밀번호 해싱/검증, 승인 게이트, 토큰 발급. 저장소 계약과 서명 시크릿은
//! 생성 시 한 번 주입되며 호출마다 다시 읽지 않습니다.

use std::sync::Arc;

use tracing::{debug, info, warn};

use portal_core::{Account, NewAccount, Role};

use super::approval::{can_login, initial_approval_policy, LoginDenied};
use super::jwt::{issue_login_tokens, issue_token, JwtError, TokenPair, REGISTRATION_TTL_MINUTES};
use super::password::{hash_password, verify_password, PasswordError};
use super::store::{AccountStore, StoreError};

/// 인증 연산의 실패 분류.
///
/// 호출자에게 노출되는 모든 실패는 이 중 하나로 변환되며,
/// 하위 계층의 에러가 연산 경계를 그대로 통과하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// 알 수 없는 역할 또는 자가 가입이 허용되지 않는 역할
    #[error("Invalid role specified.")]
    InvalidRole,
    /// 이미 등록된 이메일
    #[error("Email already registered. Please log in.")]
    EmailTaken,
    /// 해당 이메일의 계정 없음
    #[error("No account with this email. Please register.")]
    AccountNotFound,
    /// 교직원 승인 대기 중
    #[error("Staff account is pending admin approval.")]
    PendingApproval,
    /// 교직원 가입 거절됨
    #[error("Your staff account was rejected by admin.")]
    Rejected,
    /// 비밀번호 불일치
    #[error("Incorrect password.")]
    BadCredentials,
    /// 저장소/서명 등 내부 오류 (재시도 없이 호출자에게 보고)
    #[error("인증 처리 중 내부 오류: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::EmailTaken,
            StoreError::Database(detail) => AuthError::Internal(detail),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

impl From<LoginDenied> for AuthError {
    fn from(e: LoginDenied) -> Self {
        match e {
            LoginDenied::PendingApproval => AuthError::PendingApproval,
            LoginDenied::Rejected => AuthError::Rejected,
        }
    }
}

/// 가입 요청 필드.
///
/// 필드 누락은 전송 계층의 역직렬화에서 걸러지며, 이 코어는
/// 역할 존재와 이메일 유일성 이상을 검증하지 않습니다.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub roll_number: String,
    pub branch: String,
}

/// 가입 결과.
#[derive(Debug)]
pub enum RegisterOutcome {
    /// 교직원: 토큰 없이 관리자 승인 대기
    StaffPending,
    /// 일반 사용자: 가입 토큰 발급
    Registered { token: String, account: Account },
}

/// 로그인 결과.
#[derive(Debug)]
pub struct LoginOutcome {
    /// Access + Refresh 토큰 쌍
    pub tokens: TokenPair,
    /// 조회된 계정 (프로필 투영용, staff_status 포함)
    pub account: Account,
}

/// 인증 서비스.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    jwt_secret: String,
}

impl AuthService {
    /// 저장소와 서명 시크릿으로 서비스 생성.
    pub fn new(store: Arc<dyn AccountStore>, jwt_secret: impl Into<String>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// 서명 시크릿 반환 (미들웨어 공유용).
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// 계정 가입.
    ///
    /// 역할 해석 → 이메일 유일성 → 해싱 → 초기 승인 정책 → 삽입 →
    /// (일반 사용자만) 토큰 발급 순서로 진행하며, 역할이 거부되면
    /// 어떤 변경도 일어나기 전에 실패합니다.
    pub async fn register(&self, req: Registration) -> Result<RegisterOutcome, AuthError> {
        let role_name = req.role.trim().to_lowercase();
        debug!(email = %req.email, role = %role_name, "register requested");

        let record = self
            .store
            .find_role_by_name(&role_name)
            .await?
            .ok_or(AuthError::InvalidRole)?;

        // 역할 테이블에 있어도 닫힌 역할 집합 밖이면 거부
        let role = Role::parse(&record.name).ok_or(AuthError::InvalidRole)?;

        // 관리자는 저장소에 직접 시딩되며 자가 가입 불가.
        // 변경이 일어나기 전에 거부한다.
        if role == Role::Admin {
            warn!(email = %req.email, "admin self-registration rejected");
            return Err(AuthError::InvalidRole);
        }

        if self
            .store
            .find_account_by_email(&req.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(&req.password)?;
        let policy = initial_approval_policy(role);
        let display_name = format!("{} {}", req.first_name, req.last_name);

        let new_account = NewAccount {
            name: display_name.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            password_hash: password_hash.clone(),
            role_id: record.id,
            is_approved: policy.is_approved,
            staff_status: policy.staff_status,
            roll_number: req.roll_number.clone(),
            branch: req.branch.clone(),
        };

        // 사전 중복 검사와 이 삽입은 원자적이지 않음. 동시 가입이 둘 다
        // 검사를 통과한 경우 UNIQUE 제약 위반이 EmailTaken으로 변환된다.
        let id = self.store.insert_account(new_account).await?;

        info!(account_id = id, role = %role, "account registered");

        if role == Role::Staff {
            return Ok(RegisterOutcome::StaffPending);
        }

        // 여기 도달하면 role은 User뿐이다 (Admin은 위에서 거부됨)
        let token = issue_token(id, role, REGISTRATION_TTL_MINUTES, &self.jwt_secret)?;
        let account = Account {
            id,
            first_name: req.first_name,
            last_name: req.last_name,
            name: display_name,
            email: req.email,
            password_hash,
            role_id: record.id,
            role,
            is_approved: policy.is_approved,
            staff_status: policy.staff_status,
            roll_number: Some(req.roll_number),
            branch: Some(req.branch),
        };
        Ok(RegisterOutcome::Registered { token, account })
    }

    /// 로그인.
    ///
    /// 계정 조회 → 교직원 승인 게이트 → 비밀번호 검증 → 토큰 쌍 발급.
    /// 부수 효과 없음 (감사 로그, 마지막 로그인 시각 갱신 등 없음).
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let account = self
            .store
            .find_account_by_email(email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        // 비밀번호 검증보다 먼저 승인 게이트를 통과해야 함
        can_login(account.role, account.staff_status)?;

        if !verify_password(password, &account.password_hash) {
            return Err(AuthError::BadCredentials);
        }

        let tokens = issue_login_tokens(account.id, account.role, &self.jwt_secret)?;

        info!(account_id = account.id, role = %account.role, "login succeeded");

        Ok(LoginOutcome { tokens, account })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::decode_token;
    use portal_core::{RoleRecord, StaffStatus};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    const TEST_SECRET: &str = "service-test-secret";

    /// 케이스마다 새로 만드는 인메모리 저장소.
    struct MemoryStore {
        roles: Vec<RoleRecord>,
        accounts: Mutex<Vec<Account>>,
        next_id: AtomicI64,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                roles: vec![
                    RoleRecord {
                        id: 1,
                        name: "user".to_string(),
                    },
                    RoleRecord {
                        id: 2,
                        name: "staff".to_string(),
                    },
                    RoleRecord {
                        id: 3,
                        name: "admin".to_string(),
                    },
                ],
                accounts: Mutex::new(Vec::new()),
                next_id: AtomicI64::new(1),
            }
        }

        fn account_count(&self) -> usize {
            self.accounts.lock().unwrap().len()
        }

        fn set_staff_status(&self, email: &str, status: StaffStatus) {
            let mut accounts = self.accounts.lock().unwrap();
            let account = accounts
                .iter_mut()
                .find(|a| a.email == email)
                .expect("account not found");
            account.staff_status = Some(status);
            account.is_approved = status == StaffStatus::Approved;
        }
    }

    #[async_trait::async_trait]
    impl AccountStore for MemoryStore {
        async fn find_role_by_name(
            &self,
            name_lowercased: &str,
        ) -> Result<Option<RoleRecord>, StoreError> {
            Ok(self
                .roles
                .iter()
                .find(|r| r.name == name_lowercased)
                .cloned())
        }

        async fn find_account_by_email(
            &self,
            email: &str,
        ) -> Result<Option<Account>, StoreError> {
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.email == email)
                .cloned())
        }

        async fn insert_account(&self, account: NewAccount) -> Result<i64, StoreError> {
            let mut accounts = self.accounts.lock().unwrap();

            // UNIQUE 제약 흉내
            if accounts.iter().any(|a| a.email == account.email) {
                return Err(StoreError::DuplicateEmail);
            }

            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let role = Role::parse(
                self.roles
                    .iter()
                    .find(|r| r.id == account.role_id)
                    .map(|r| r.name.as_str())
                    .unwrap_or(""),
            )
            .expect("unknown role id");

            accounts.push(Account {
                id,
                first_name: account.first_name,
                last_name: account.last_name,
                name: account.name,
                email: account.email,
                password_hash: account.password_hash,
                role_id: account.role_id,
                role,
                is_approved: account.is_approved,
                staff_status: account.staff_status,
                roll_number: Some(account.roll_number),
                branch: Some(account.branch),
            });

            Ok(id)
        }
    }

    fn service() -> (Arc<MemoryStore>, AuthService) {
        let store = Arc::new(MemoryStore::new());
        let service = AuthService::new(store.clone(), TEST_SECRET);
        (store, service)
    }

    fn registration(role: &str, email: &str) -> Registration {
        Registration {
            first_name: "Jiho".to_string(),
            last_name: "Park".to_string(),
            email: email.to_string(),
            password: "Pw1!".to_string(),
            role: role.to_string(),
            roll_number: "21B031".to_string(),
            branch: "CSE".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_user_issues_token_with_claims() {
        let (_, service) = service();

        let outcome = service
            .register(registration("user", "a@x.com"))
            .await
            .unwrap();

        match outcome {
            RegisterOutcome::Registered { token, account } => {
                let claims = decode_token(&token, TEST_SECRET).unwrap().claims;
                // 토큰 claim에 새 계정의 ID와 역할이 담겨야 함
                assert_eq!(claims.sub, account.id.to_string());
                assert_eq!(claims.role, Role::User);
                assert!(account.is_approved);
                assert_eq!(account.staff_status, None);
            }
            other => panic!("expected Registered, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_staff_is_pending_without_token() {
        let (store, service) = service();

        let outcome = service
            .register(registration("staff", "s@x.com"))
            .await
            .unwrap();

        assert!(matches!(outcome, RegisterOutcome::StaffPending));

        let stored = store.find_account_by_email("s@x.com").await.unwrap().unwrap();
        assert!(!stored.is_approved);
        assert_eq!(stored.staff_status, Some(StaffStatus::Pending));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_rejected() {
        let (store, service) = service();

        service
            .register(registration("user", "dup@x.com"))
            .await
            .unwrap();

        // 다른 필드가 달라도 이메일이 같으면 거부
        let mut second = registration("staff", "dup@x.com");
        second.first_name = "Minsu".to_string();
        second.password = "Different1!".to_string();

        let err = service.register(second).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(store.account_count(), 1);
    }

    #[tokio::test]
    async fn test_register_unknown_role_is_rejected_before_insert() {
        let (store, service) = service();

        let err = service
            .register(registration("wizard", "w@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidRole));
        assert_eq!(store.account_count(), 0);
    }

    #[tokio::test]
    async fn test_register_admin_is_rejected_before_insert() {
        // 관리자는 시딩 전용 - 가입 경로로 만들 수 없음
        let (store, service) = service();

        let err = service
            .register(registration("admin", "root@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidRole));
        assert_eq!(store.account_count(), 0);
    }

    #[tokio::test]
    async fn test_register_role_name_is_case_insensitive() {
        let (store, service) = service();

        let outcome = service
            .register(registration("STAFF", "cap@x.com"))
            .await
            .unwrap();

        assert!(matches!(outcome, RegisterOutcome::StaffPending));
        assert_eq!(store.account_count(), 1);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (_, service) = service();

        let err = service.login("ghost@x.com", "Pw1!").await.unwrap_err();
        assert!(matches!(err, AuthError::AccountNotFound));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (_, service) = service();
        service
            .register(registration("user", "a@x.com"))
            .await
            .unwrap();

        let err = service.login("a@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::BadCredentials));
    }

    #[tokio::test]
    async fn test_login_user_returns_token_pair() {
        let (_, service) = service();
        service
            .register(registration("user", "a@x.com"))
            .await
            .unwrap();

        let outcome = service.login("a@x.com", "Pw1!").await.unwrap();

        let access = decode_token(&outcome.tokens.access_token, TEST_SECRET).unwrap();
        let refresh = decode_token(&outcome.tokens.refresh_token, TEST_SECRET).unwrap();
        assert!(access.claims.exp < refresh.claims.exp);
        assert_eq!(outcome.account.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_pending_staff_is_gated_even_with_correct_password() {
        let (_, service) = service();
        service
            .register(registration("staff", "s@x.com"))
            .await
            .unwrap();

        let err = service.login("s@x.com", "Pw1!").await.unwrap_err();
        assert!(matches!(err, AuthError::PendingApproval));
    }

    #[tokio::test]
    async fn test_login_rejected_staff() {
        let (store, service) = service();
        service
            .register(registration("staff", "s@x.com"))
            .await
            .unwrap();
        store.set_staff_status("s@x.com", StaffStatus::Rejected);

        let err = service.login("s@x.com", "Pw1!").await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected));
    }

    #[tokio::test]
    async fn test_login_approved_staff_succeeds() {
        let (store, service) = service();
        service
            .register(registration("staff", "s@x.com"))
            .await
            .unwrap();
        store.set_staff_status("s@x.com", StaffStatus::Approved);

        let outcome = service.login("s@x.com", "Pw1!").await.unwrap();
        assert_eq!(outcome.account.staff_status, Some(StaffStatus::Approved));

        let access = decode_token(&outcome.tokens.access_token, TEST_SECRET).unwrap();
        assert_eq!(access.claims.role, Role::Staff);
    }
}
