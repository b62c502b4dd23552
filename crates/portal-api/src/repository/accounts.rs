//! 계정 Repository.
//!
//! users 테이블에 대한 조회/삽입과 관리자용 교직원 상태 갱신을 담당합니다.
//! 이메일 유일성은 users.email의 UNIQUE 제약이 최종 방어선입니다
//! (애플리케이션의 사전 중복 검사는 동시 가입 경합에서 뚫릴 수 있음).

use sqlx::PgPool;

use portal_core::{Account, NewAccount, Role, StaffStatus};

/// DB에서 조회한 계정 row (역할 이름 조인 포함).
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    first_name: String,
    last_name: String,
    name: String,
    email: String,
    password_hash: String,
    role_id: i64,
    role: String,
    is_approved: bool,
    staff_status: Option<String>,
    roll_number: Option<String>,
    branch: Option<String>,
}

impl AccountRow {
    /// row를 도메인 모델로 변환.
    ///
    /// 역할 이름이 닫힌 역할 집합 밖이거나 상태 표기가 손상된 경우
    /// 디코드 에러로 처리합니다.
    fn into_account(self) -> Result<Account, sqlx::Error> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown role name in roles table: {}", self.role).into())
        })?;

        let staff_status = match self.staff_status {
            Some(raw) => Some(StaffStatus::parse(&raw).ok_or_else(|| {
                sqlx::Error::Decode(format!("unknown staff_status value: {}", raw).into())
            })?),
            None => None,
        };

        Ok(Account {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role_id: self.role_id,
            role,
            is_approved: self.is_approved,
            staff_status,
            roll_number: self.roll_number,
            branch: self.branch,
        })
    }
}

/// 관리자 화면용 교직원 목록 row.
#[derive(Debug, sqlx::FromRow, serde::Serialize, utoipa::ToSchema)]
pub struct StaffAccountRow {
    /// 계정 ID
    pub id: i64,
    /// 표시 이름
    pub name: String,
    /// 이메일
    pub email: String,
    /// 승인 상태 (NULL은 Pending으로 표시)
    pub staff_status: String,
}

/// 계정 Repository.
pub struct AccountRepository;

impl AccountRepository {
    /// 이메일로 계정 조회 (역할 조인).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.name, u.email,
                   u.password AS password_hash, u.role_id, r.name AS role,
                   u.is_approved, u.staff_status, u.roll_number, u.branch
            FROM users u
            JOIN roles r ON u.role_id = r.id
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    /// 새 계정 삽입 후 생성된 ID 반환.
    pub async fn insert(pool: &PgPool, account: &NewAccount) -> Result<i64, sqlx::Error> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users
                (name, first_name, last_name, email, password, role_id,
                 is_approved, staff_status, roll_number, branch)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&account.name)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role_id)
        .bind(account.is_approved)
        .bind(account.staff_status.map(|s| s.as_str()))
        .bind(&account.roll_number)
        .bind(&account.branch)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// 교직원 계정 목록 조회 (관리자용).
    pub async fn list_staff(pool: &PgPool) -> Result<Vec<StaffAccountRow>, sqlx::Error> {
        sqlx::query_as::<_, StaffAccountRow>(
            r#"
            SELECT u.id, u.name, u.email,
                   COALESCE(u.staff_status, 'Pending') AS staff_status
            FROM users u
            JOIN roles r ON u.role_id = r.id
            WHERE LOWER(r.name) = 'staff'
            ORDER BY u.id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// 교직원 승인 상태 갱신 (관리자 전이: Pending → Approved/Rejected).
    ///
    /// is_approved도 함께 동기화해 두 컬럼이 어긋나지 않게 합니다.
    /// 대상이 교직원 계정이 아니면 아무 행도 갱신되지 않습니다.
    ///
    /// # Returns
    ///
    /// 갱신된 행이 있으면 true
    pub async fn update_staff_status(
        pool: &PgPool,
        id: i64,
        status: StaffStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users u
            SET staff_status = $1, is_approved = $2
            FROM roles r
            WHERE u.id = $3 AND u.role_id = r.id AND LOWER(r.name) = 'staff'
            "#,
        )
        .bind(status.as_str())
        .bind(status == StaffStatus::Approved)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
