//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하여 비밀번호를 해싱합니다.
/// 솔트는 호출마다 자동으로 생성되며, 비용 계수는 고정입니다.
///
/// # Returns
///
/// PHC 형식의 해시 문자열 (솔트 포함)
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 저장된 해시와 입력된 비밀번호를 비교합니다. 비교 자체는
/// Argon2 검증 프리미티브에 위임되어 입력 바이트에 따른 시간 차이가 없습니다.
/// 저장된 해시가 PHC 형식이 아니면 검증 실패로 처리합니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "저장된 비밀번호 해시 형식이 유효하지 않습니다");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
