//! 리뷰 엔티티와 리뷰 상태 집계.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::{DomainError, require_non_empty};
use crate::domain::policy::looks_like_bot;
use crate::domain::pull_request::Actor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
}

impl FromStr for ReviewState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(Self::Approved),
            "CHANGES_REQUESTED" => Ok(Self::ChangesRequested),
            "COMMENTED" => Ok(Self::Commented),
            "DISMISSED" => Ok(Self::Dismissed),
            "PENDING" => Ok(Self::Pending),
            other => Err(DomainError::UnknownReviewState(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub reviewer: Actor,
    pub state: ReviewState,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Review {
    pub fn new(
        id: impl Into<String>,
        reviewer: Actor,
        state: ReviewState,
        submitted_at: DateTime<Utc>,
        body: Option<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        require_non_empty("review id", &id)?;
        Ok(Self {
            id,
            reviewer,
            state,
            submitted_at,
            body,
        })
    }
}

/// 집계에 기여한 리뷰어 표시 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerIdentity {
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub is_bot: bool,
}

impl ReviewerIdentity {
    fn from_actor(actor: &Actor) -> Self {
        Self {
            login: actor.login.clone(),
            avatar_url: actor.avatar_url.clone(),
            is_bot: looks_like_bot(&actor.login),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatus {
    pub approved: usize,
    pub changes_requested: usize,
    pub commented: usize,
    pub pending: usize,
    pub approved_by: Vec<ReviewerIdentity>,
    pub changes_requested_by: Vec<ReviewerIdentity>,
}

impl ReviewStatus {
    /// 리뷰어별 최신 리뷰만으로 상태를 집계한다.
    ///
    /// `pending`은 요청 리뷰어 수에서 어떤 리뷰든 남긴 고유 리뷰어 수를 뺀 값이며 0 아래로 내려가지 않는다.
    pub fn calculate(requested_reviewers: &[String], reviews: &[Review]) -> Self {
        let latest = latest_reviews(reviews);

        let mut status = Self {
            pending: requested_reviewers.len().saturating_sub(latest.len()),
            ..Self::default()
        };

        for review in &latest {
            match review.state {
                ReviewState::Approved => {
                    status.approved += 1;
                    status
                        .approved_by
                        .push(ReviewerIdentity::from_actor(&review.reviewer));
                }
                ReviewState::ChangesRequested => {
                    status.changes_requested += 1;
                    status
                        .changes_requested_by
                        .push(ReviewerIdentity::from_actor(&review.reviewer));
                }
                ReviewState::Commented => status.commented += 1,
                ReviewState::Dismissed | ReviewState::Pending => {}
            }
        }

        status
    }
}

/// 리뷰어 로그인별로 `submitted_at`이 가장 늦은 리뷰 하나만 남긴다.
///
/// 시각이 정확히 같으면 입력 순서상 뒤에 오는 리뷰가 이긴다.
/// 결과는 리뷰어가 처음 등장한 순서를 따른다.
pub fn latest_reviews(reviews: &[Review]) -> Vec<Review> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut latest: Vec<&Review> = Vec::new();

    for review in reviews {
        match slots.get(review.reviewer.login.as_str()) {
            Some(&idx) => {
                if review.submitted_at >= latest[idx].submitted_at {
                    latest[idx] = review;
                }
            }
            None => {
                slots.insert(review.reviewer.login.as_str(), latest.len());
                latest.push(review);
            }
        }
    }

    latest.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, minute, 0).unwrap()
    }

    fn review(id: &str, login: &str, state: ReviewState, minute: u32) -> Review {
        Review::new(
            id,
            Actor::new(login, None).unwrap(),
            state,
            at(minute),
            None,
        )
        .unwrap()
    }

    fn logins(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn later_changes_request_replaces_earlier_approval() {
        let reviews = vec![
            review("1", "r1", ReviewState::Approved, 1),
            review("2", "r1", ReviewState::ChangesRequested, 2),
        ];

        let status = ReviewStatus::calculate(&logins(&["r1", "r2"]), &reviews);

        assert_eq!(status.approved, 0);
        assert_eq!(status.changes_requested, 1);
        assert_eq!(status.commented, 0);
        assert_eq!(status.pending, 1);
        assert_eq!(status.changes_requested_by[0].login, "r1");
        assert!(status.approved_by.is_empty());
    }

    #[test]
    fn reduction_uses_timestamps_not_input_order() {
        let reviews = vec![
            review("2", "r1", ReviewState::Approved, 9),
            review("1", "r1", ReviewState::ChangesRequested, 3),
        ];

        let latest = latest_reviews(&reviews);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].state, ReviewState::Approved);
    }

    #[test]
    fn exact_timestamp_tie_keeps_the_later_input() {
        let reviews = vec![
            review("1", "r1", ReviewState::Commented, 5),
            review("2", "r1", ReviewState::Approved, 5),
        ];

        let latest = latest_reviews(&reviews);
        assert_eq!(latest[0].id, "2");
    }

    #[test]
    fn pending_never_goes_negative() {
        let reviews = vec![
            review("1", "a", ReviewState::Commented, 1),
            review("2", "b", ReviewState::Approved, 2),
            review("3", "c", ReviewState::Dismissed, 3),
        ];

        let status = ReviewStatus::calculate(&logins(&["a"]), &reviews);
        assert_eq!(status.pending, 0);
        assert_eq!(status.commented, 1);
        assert_eq!(status.approved, 1);
    }

    #[test]
    fn each_reviewer_counts_once() {
        let reviews = vec![
            review("1", "a", ReviewState::Commented, 1),
            review("2", "a", ReviewState::Commented, 2),
            review("3", "a", ReviewState::Approved, 3),
            review("4", "b", ReviewState::Commented, 1),
        ];

        let status = ReviewStatus::calculate(&[], &reviews);
        assert_eq!(status.approved + status.changes_requested + status.commented, 2);
        assert_eq!(status.approved, 1);
        assert_eq!(status.commented, 1);
    }

    #[test]
    fn bot_flag_uses_reviewer_login_heuristic() {
        let reviews = vec![
            review("1", "renovate[bot]", ReviewState::Approved, 1),
            review("2", "carol", ReviewState::Approved, 2),
        ];

        let status = ReviewStatus::calculate(&[], &reviews);
        assert!(status.approved_by[0].is_bot);
        assert!(!status.approved_by[1].is_bot);
    }

    #[test]
    fn unknown_state_is_an_invariant_violation() {
        assert_eq!(
            "LGTM".parse::<ReviewState>(),
            Err(DomainError::UnknownReviewState("LGTM".into()))
        );
    }
}
