//! 포트/파이프라인 수준 오류 분류.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::domain::error::DomainError;

/// 응답 헤더(`X-RateLimit-*`)에서 읽은 호출 한도 정보.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: u32,
    pub remaining: u32,
    /// 한도가 초기화되는 Unix 시각(초).
    pub reset_at: u64,
}

impl RateLimitInfo {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// 초기화까지 남은 초. 이미 지났거나 시스템 시각을 못 읽으면 0.
    pub fn seconds_until_reset(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.reset_at.saturating_sub(now)
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// `PullRequestSource` 호출 실패.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error(
        "rate limit exceeded ({}/{} remaining, resets at {})",
        .0.remaining,
        .0.limit,
        .0.reset_at
    )]
    RateLimited(RateLimitInfo),

    /// 그 외 비정상 응답, 타임아웃, 전송 오류. 타임아웃/전송 오류는 status가 없다.
    #[error("upstream error{}: {message}", status_suffix(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// 단건 조회 결과에 대상 저장소 정보가 없다.
    #[error("pull request {id} has no destination repository")]
    MissingRepository { id: String },

    #[error(transparent)]
    Invariant(#[from] DomainError),
}

impl FetchError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }
}

/// 동기화 전체를 중단시키는 오류.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error(
        "GitHub API rate limit exceeded; retry in {}s",
        .0.seconds_until_reset()
    )]
    RateLimited(RateLimitInfo),

    #[error("upstream error{}: {message}", status_suffix(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("invariant violation: {0}")]
    InvariantViolation(DomainError),
}

impl From<FetchError> for SyncError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::RateLimited(info) => Self::RateLimited(info),
            FetchError::Upstream { status, message } => Self::Upstream { status, message },
            FetchError::Invariant(inner) => Self::InvariantViolation(inner),
            missing @ FetchError::MissingRepository { .. } => Self::Upstream {
                status: None,
                message: missing.to_string(),
            },
        }
    }
}

impl From<DomainError> for SyncError {
    fn from(err: DomainError) -> Self {
        Self::InvariantViolation(err)
    }
}
