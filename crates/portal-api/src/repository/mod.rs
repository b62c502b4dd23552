//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러와 서비스에서 분리하여 관리합니다.
//! 모든 Repository는 static methods 패턴을 사용합니다.

pub mod accounts;
pub mod roles;

pub use accounts::{AccountRepository, StaffAccountRow};
pub use roles::RoleRepository;
