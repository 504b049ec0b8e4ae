//! GitHub REST 응답 모델과 도메인 변환.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::application::error::FetchError;
use crate::domain::comment::{AuthorKind, Comment, CommentAuthor};
use crate::domain::pull_request::{
    Actor, PrId, PrNumber, PrStatus, PullRequestDetail, RepositoryRef,
};
use crate::domain::review::{Review, ReviewState};
use crate::domain::search::SearchItem;

/// 삭제된 계정은 API에서 `user: null`로 온다.
const GHOST_LOGIN: &str = "ghost";

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchIssue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchIssue {
    pub id: u64,
    pub number: u64,
    pub repository_url: Option<String>,
}

impl From<SearchIssue> for SearchItem {
    fn from(issue: SearchIssue) -> Self {
        SearchItem {
            id: issue.id.to_string(),
            number: issue.number,
            repository_url: issue.repository_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub login: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginOnly {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepoOwner {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepoResponse {
    pub name: String,
    pub owner: RepoOwner,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchResponse {
    pub repo: Option<RepoResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullResponse {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: String,
    #[serde(default)]
    pub draft: bool,
    pub merged_at: Option<DateTime<Utc>>,
    pub user: Option<UserResponse>,
    pub base: Option<BranchResponse>,
    #[serde(default)]
    pub assignees: Vec<LoginOnly>,
    #[serde(default)]
    pub requested_reviewers: Vec<LoginOnly>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 이슈 코멘트와 리뷰(diff) 코멘트가 공유하는 필드.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentResponse {
    pub id: u64,
    pub user: Option<UserResponse>,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewResponse {
    pub id: u64,
    pub user: Option<UserResponse>,
    pub state: String,
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: Option<String>,
}

fn actor(user: Option<UserResponse>) -> Result<Actor, FetchError> {
    match user {
        Some(u) => Ok(Actor::new(u.login, u.avatar_url)?),
        None => Ok(Actor::new(GHOST_LOGIN, None)?),
    }
}

impl PullResponse {
    /// 대상(base) 저장소가 없으면 `MissingRepository`.
    pub fn into_detail(self) -> Result<PullRequestDetail, FetchError> {
        let repo = self
            .base
            .and_then(|b| b.repo)
            .ok_or_else(|| FetchError::MissingRepository {
                id: self.id.to_string(),
            })?;

        Ok(PullRequestDetail {
            id: PrId::new(self.id.to_string())?,
            number: PrNumber::new(self.number)?,
            title: self.title,
            url: self.html_url,
            repository: RepositoryRef::new(repo.owner.login, repo.name)?,
            author: actor(self.user)?,
            assignees: self.assignees.into_iter().map(|a| a.login).collect(),
            requested_reviewers: self
                .requested_reviewers
                .into_iter()
                .map(|r| r.login)
                .collect(),
            status: PrStatus::derive(&self.state, self.draft, self.merged_at.is_some()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl CommentResponse {
    /// 본문이 비어 있는 코멘트는 `None`으로 건너뛴다.
    pub fn into_comment(self) -> Result<Option<Comment>, FetchError> {
        let Some(body) = self.body.filter(|b| !b.trim().is_empty()) else {
            debug!(id = self.id, "skipping comment without body");
            return Ok(None);
        };

        let author = match self.user {
            Some(u) => {
                let kind = match u.kind.as_deref() {
                    Some("Bot") => AuthorKind::Bot,
                    _ => AuthorKind::Human,
                };
                CommentAuthor::new(u.login, kind, u.avatar_url)?
            }
            None => CommentAuthor::new(GHOST_LOGIN, AuthorKind::Human, None)?,
        };

        Ok(Some(Comment::new(
            self.id.to_string(),
            author,
            body,
            self.created_at,
            self.html_url,
        )?))
    }
}

impl ReviewResponse {
    /// 제출되지 않은 리뷰(`submitted_at` 없음)는 `None`.
    pub fn into_review(self) -> Result<Option<Review>, FetchError> {
        let Some(submitted_at) = self.submitted_at else {
            debug!(id = self.id, "skipping unsubmitted review");
            return Ok(None);
        };

        let state: ReviewState = self.state.parse()?;
        Ok(Some(Review::new(
            self.id.to_string(),
            actor(self.user)?,
            state,
            submitted_at,
            self.body.filter(|b| !b.is_empty()),
        )?))
    }
}
