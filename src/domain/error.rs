//! 도메인 값 생성 시 검증 실패를 표현하는 오류.

use thiserror::Error;

/// 도메인 불변식 위반.
/// 생성 시점에 즉시 실패하며, 상위 계층에서 보정하지 않는다.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// 필수 문자열 필드가 비어 있다.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// PR 번호는 양의 정수여야 한다.
    #[error("pull request number must be positive (got {0})")]
    NonPositiveNumber(u64),

    /// 알 수 없는 리뷰 상태 문자열.
    #[error("unknown review state: {0}")]
    UnknownReviewState(String),

    /// 알 수 없는 PR 상태 문자열.
    #[error("unknown pull request status: {0}")]
    UnknownPrStatus(String),

    /// 알 수 없는 action 라벨.
    #[error("unknown action label: {0}")]
    UnknownAction(String),

    /// `owner/name` 형식이 아닌 저장소 표기.
    #[error("repository must be written as owner/name: {0}")]
    InvalidRepository(String),
}

/// 공백만 있는 값을 포함해 빈 문자열을 거부한다.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}
