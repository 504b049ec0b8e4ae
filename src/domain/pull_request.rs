//! 풀 리퀘스트 엔티티/값 객체.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::comment::{Comment, CommentSummary};
use crate::domain::error::{DomainError, require_non_empty};
use crate::domain::policy::resolve_action;
use crate::domain::review::{Review, ReviewStatus, latest_reviews};

/// 전역 고유 PR 식별자.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PrId(String);

impl PrId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        require_non_empty("pull request id", &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PrNumber(u64);

impl PrNumber {
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::NonPositiveNumber(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, DomainError> {
        let owner = owner.into();
        let name = name.into();
        require_non_empty("repository owner", &owner)?;
        require_non_empty("repository name", &name)?;
        Ok(Self { owner, name })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = DomainError;

    /// `owner/name` 표기를 해석한다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) => Self::new(owner, name)
                .map_err(|_| DomainError::InvalidRepository(s.to_string())),
            _ => Err(DomainError::InvalidRepository(s.to_string())),
        }
    }
}

/// PR 작성자/리뷰어처럼 로그인으로 식별되는 계정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Actor {
    pub fn new(login: impl Into<String>, avatar_url: Option<String>) -> Result<Self, DomainError> {
        let login = login.into();
        require_non_empty("login", &login)?;
        Ok(Self { login, avatar_url })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStatus {
    Open,
    Draft,
    Merged,
    Closed,
}

impl PrStatus {
    /// API의 state/draft/merged 정보를 단일 상태로 접는다. draft 플래그가 가장 우선한다.
    pub fn derive(state: &str, draft: bool, merged: bool) -> Self {
        if draft {
            Self::Draft
        } else if state == "closed" {
            if merged { Self::Merged } else { Self::Closed }
        } else {
            Self::Open
        }
    }
}

impl FromStr for PrStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "draft" => Ok(Self::Draft),
            "merged" => Ok(Self::Merged),
            "closed" => Ok(Self::Closed),
            _ => Err(DomainError::UnknownPrStatus(s.to_string())),
        }
    }
}

/// 뷰어 기준으로 다음에 해야 할 일.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionNeeded {
    Review,
    AddressFeedback,
    RespondComments,
    ReadyToMerge,
    Waiting,
    None,
}

impl ActionNeeded {
    pub fn label(self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::AddressFeedback => "address_feedback",
            Self::RespondComments => "respond_comments",
            Self::ReadyToMerge => "ready_to_merge",
            Self::Waiting => "waiting",
            Self::None => "none",
        }
    }
}

impl FromStr for ActionNeeded {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "review" => Ok(Self::Review),
            "address_feedback" => Ok(Self::AddressFeedback),
            "respond_comments" => Ok(Self::RespondComments),
            "ready_to_merge" => Ok(Self::ReadyToMerge),
            "waiting" => Ok(Self::Waiting),
            "none" => Ok(Self::None),
            _ => Err(DomainError::UnknownAction(s.to_string())),
        }
    }
}

/// 단건 조회로 얻은 PR 상세(코멘트/리뷰 보강 전).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDetail {
    pub id: PrId,
    pub number: PrNumber,
    pub title: String,
    pub url: String,
    pub repository: RepositoryRef,
    pub author: Actor,
    pub assignees: Vec<String>,
    pub requested_reviewers: Vec<String>,
    pub status: PrStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 동기화 1회분의 PR 스냅샷. 갱신은 새 스냅샷 생성으로만 이뤄진다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: PrId,
    pub number: PrNumber,
    pub title: String,
    pub url: String,
    pub repository: RepositoryRef,
    pub author: Actor,
    pub assignees: Vec<String>,
    pub requested_reviewers: Vec<String>,
    pub status: PrStatus,
    pub review_status: ReviewStatus,
    pub comments: CommentSummary,
    pub action_needed: ActionNeeded,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_synced_at: DateTime<Utc>,
}

impl PullRequest {
    /// 상세 + 코멘트 + 리뷰로 뷰어 기준 스냅샷을 만든다.
    pub fn assemble(
        detail: PullRequestDetail,
        comments: &[Comment],
        reviews: &[Review],
        viewer: &str,
        synced_at: DateTime<Utc>,
    ) -> Self {
        let latest = latest_reviews(reviews);
        let review_status = ReviewStatus::calculate(&detail.requested_reviewers, reviews);
        let summary = CommentSummary::from_comments(comments);
        let action_needed = resolve_action(
            &detail.author.login,
            viewer,
            &detail.requested_reviewers,
            &latest,
            summary.unresolved,
        );

        Self {
            id: detail.id,
            number: detail.number,
            title: detail.title,
            url: detail.url,
            repository: detail.repository,
            author: detail.author,
            assignees: detail.assignees,
            requested_reviewers: detail.requested_reviewers,
            status: detail.status,
            review_status,
            comments: summary,
            action_needed,
            created_at: detail.created_at,
            updated_at: detail.updated_at,
            last_synced_at: synced_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_and_numbers_are_validated() {
        assert!(PrId::new("").is_err());
        assert!(PrId::new("  ").is_err());
        assert_eq!(PrId::new("42").unwrap().as_str(), "42");
        assert_eq!(PrNumber::new(0), Err(DomainError::NonPositiveNumber(0)));
        assert_eq!(PrNumber::new(7).unwrap().get(), 7);
    }

    #[test]
    fn repository_parses_owner_and_name() {
        let repo: RepositoryRef = "rust-lang/cargo".parse().unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "cargo");
        assert_eq!(repo.full_name(), "rust-lang/cargo");

        assert!("cargo".parse::<RepositoryRef>().is_err());
        assert!("a/b/c".parse::<RepositoryRef>().is_err());
        assert!("/cargo".parse::<RepositoryRef>().is_err());
    }

    #[test]
    fn status_derivation_prefers_draft_then_merge() {
        assert_eq!(PrStatus::derive("open", true, false), PrStatus::Draft);
        assert_eq!(PrStatus::derive("closed", false, true), PrStatus::Merged);
        assert_eq!(PrStatus::derive("closed", false, false), PrStatus::Closed);
        assert_eq!(PrStatus::derive("open", false, false), PrStatus::Open);
    }

    #[test]
    fn action_labels_round_trip_through_from_str() {
        for action in [
            ActionNeeded::Review,
            ActionNeeded::AddressFeedback,
            ActionNeeded::RespondComments,
            ActionNeeded::ReadyToMerge,
            ActionNeeded::Waiting,
            ActionNeeded::None,
        ] {
            assert_eq!(action.label().parse::<ActionNeeded>().unwrap(), action);
        }
        assert_eq!(
            "ready-to-merge".parse::<ActionNeeded>().unwrap(),
            ActionNeeded::ReadyToMerge
        );
        assert!("merge".parse::<ActionNeeded>().is_err());
    }
}
