//! 도메인 모델.
//!
//! 계정, 역할, 교직원 승인 상태 등 인증 게이트웨이의 핵심 타입.

pub mod account;
pub mod role;

pub use account::{Account, NewAccount, StaffStatus};
pub use role::{Role, RoleRecord};
