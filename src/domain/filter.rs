//! 동기화 결과를 좁히는 표시용 필터.

use chrono::{DateTime, Utc};

use crate::domain::pull_request::{ActionNeeded, PrStatus, PullRequest, RepositoryRef};

/// 모든 조건은 선택이며 AND로 결합한다.
#[derive(Debug, Clone, Default)]
pub struct PrFilter {
    pub repository: Option<RepositoryRef>,
    pub status: Option<PrStatus>,
    pub assignee: Option<String>,
    pub action: Option<ActionNeeded>,
    pub updated_from: Option<DateTime<Utc>>,
    pub updated_to: Option<DateTime<Utc>>,
    pub search: Option<String>,
}

impl PrFilter {
    pub fn is_empty(&self) -> bool {
        self.repository.is_none()
            && self.status.is_none()
            && self.assignee.is_none()
            && self.action.is_none()
            && self.updated_from.is_none()
            && self.updated_to.is_none()
            && self.search.is_none()
    }

    pub fn matches(&self, pr: &PullRequest) -> bool {
        if let Some(repo) = &self.repository
            && pr.repository != *repo
        {
            return false;
        }
        if let Some(status) = self.status
            && pr.status != status
        {
            return false;
        }
        if let Some(assignee) = &self.assignee
            && !pr.assignees.iter().any(|a| a.eq_ignore_ascii_case(assignee))
        {
            return false;
        }
        if let Some(action) = self.action
            && pr.action_needed != action
        {
            return false;
        }
        if self.updated_from.is_some_and(|from| pr.updated_at < from) {
            return false;
        }
        if self.updated_to.is_some_and(|to| pr.updated_at > to) {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = pr.title.to_lowercase().contains(&needle)
                || pr.repository.full_name().to_lowercase().contains(&needle)
                || pr.author.login.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }

    /// 순서를 유지한 채 조건에 맞는 PR만 남긴다.
    pub fn apply(&self, prs: Vec<PullRequest>) -> Vec<PullRequest> {
        if self.is_empty() {
            return prs;
        }
        prs.into_iter().filter(|pr| self.matches(pr)).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::comment::CommentSummary;
    use crate::domain::pull_request::{Actor, PrId, PrNumber};
    use crate::domain::review::ReviewStatus;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, d, 0, 0, 0).unwrap()
    }

    fn pr(id: &str, repo: &str, title: &str, updated: u32) -> PullRequest {
        PullRequest {
            id: PrId::new(id).unwrap(),
            number: PrNumber::new(1).unwrap(),
            title: title.into(),
            url: format!("https://github.com/{repo}/pull/1"),
            repository: repo.parse().unwrap(),
            author: Actor::new("alice", None).unwrap(),
            assignees: vec!["Bob".into()],
            requested_reviewers: vec![],
            status: PrStatus::Open,
            review_status: ReviewStatus::default(),
            comments: CommentSummary::default(),
            action_needed: ActionNeeded::Waiting,
            created_at: day(1),
            updated_at: day(updated),
            last_synced_at: day(20),
        }
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let prs = vec![pr("1", "o/a", "x", 3), pr("2", "o/b", "y", 2)];
        let out = PrFilter::default().apply(prs.clone());
        assert_eq!(out, prs);
    }

    #[test]
    fn criteria_combine_with_and() {
        let prs = vec![
            pr("1", "octo/api", "Fix login flow", 3),
            pr("2", "octo/web", "Fix login page", 5),
            pr("3", "octo/api", "Bump deps", 7),
        ];

        let filter = PrFilter {
            repository: Some("octo/api".parse().unwrap()),
            search: Some("LOGIN".into()),
            ..PrFilter::default()
        };
        let ids: Vec<String> = filter
            .apply(prs)
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, ["1"]);
    }

    #[test]
    fn updated_range_is_inclusive() {
        let prs = vec![pr("1", "o/r", "a", 2), pr("2", "o/r", "b", 4), pr("3", "o/r", "c", 6)];
        let filter = PrFilter {
            updated_from: Some(day(4)),
            updated_to: Some(day(6)),
            ..PrFilter::default()
        };
        assert_eq!(filter.apply(prs).len(), 2);
    }

    #[test]
    fn assignee_and_action_must_match() {
        let item = pr("1", "o/r", "a", 2);
        let by_assignee = PrFilter {
            assignee: Some("bob".into()),
            ..PrFilter::default()
        };
        assert!(by_assignee.matches(&item));

        let by_action = PrFilter {
            action: Some(ActionNeeded::Review),
            ..PrFilter::default()
        };
        assert!(!by_action.matches(&item));
    }
}
