//! 단위 테스트용 인메모리 `PullRequestSource`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::application::error::{FetchError, RateLimitInfo};
use crate::application::ports::PullRequestSource;
use crate::domain::comment::{AuthorKind, Comment, CommentAuthor};
use crate::domain::pull_request::{
    Actor, PrId, PrNumber, PrStatus, PullRequestDetail, RepositoryRef,
};
use crate::domain::review::{Review, ReviewState};
use crate::domain::search::{SearchItem, SearchQuery};

pub(crate) fn rate_limit() -> RateLimitInfo {
    RateLimitInfo {
        limit: 5000,
        remaining: 0,
        reset_at: 1_700_000_000,
    }
}

pub(crate) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
}

pub(crate) fn detail(id: &str, owner: &str, repo: &str, number: u64) -> PullRequestDetail {
    PullRequestDetail {
        id: PrId::new(id).unwrap(),
        number: PrNumber::new(number).unwrap(),
        title: format!("PR {id}"),
        url: format!("https://github.com/{owner}/{repo}/pull/{number}"),
        repository: RepositoryRef::new(owner, repo).unwrap(),
        author: Actor::new("alice", None).unwrap(),
        assignees: vec![],
        requested_reviewers: vec![],
        status: PrStatus::Open,
        created_at: at(0),
        updated_at: at(number as u32 % 24),
    }
}

pub(crate) fn human_comment(id: &str, login: &str) -> Comment {
    Comment::new(
        id,
        CommentAuthor::new(login, AuthorKind::Human, None).unwrap(),
        "looks good",
        at(1),
        None,
    )
    .unwrap()
}

pub(crate) fn review(id: &str, login: &str, state: ReviewState, hour: u32) -> Review {
    Review::new(id, Actor::new(login, None).unwrap(), state, at(hour), None).unwrap()
}

#[derive(Default)]
pub(crate) struct FakeSource {
    searches: HashMap<&'static str, Result<Vec<SearchItem>, FetchError>>,
    details: HashMap<u64, Result<PullRequestDetail, FetchError>>,
    comments: HashMap<u64, Result<Vec<Comment>, FetchError>>,
    reviews: HashMap<u64, Result<Vec<Review>, FetchError>>,
    detail_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_search(mut self, query: SearchQuery, items: &[(&str, &str, &str, u64)]) -> Self {
        let list = self
            .searches
            .entry(query.qualifier())
            .or_insert_with(|| Ok(Vec::new()));
        if let Ok(list) = list {
            for (id, owner, repo, number) in items {
                list.push(SearchItem {
                    id: id.to_string(),
                    number: *number,
                    repository_url: Some(format!("https://api.github.com/repos/{owner}/{repo}")),
                });
            }
        }
        self
    }

    pub fn with_raw_search(mut self, query: SearchQuery, item: SearchItem) -> Self {
        if let Ok(list) = self
            .searches
            .entry(query.qualifier())
            .or_insert_with(|| Ok(Vec::new()))
        {
            list.push(item);
        }
        self
    }

    pub fn with_search_error(mut self, query: SearchQuery, err: FetchError) -> Self {
        self.searches.insert(query.qualifier(), Err(err));
        self
    }

    pub fn with_detail(self, id: &str, owner: &str, repo: &str, number: u64) -> Self {
        self.with_detail_value(detail(id, owner, repo, number))
    }

    pub fn with_detail_value(mut self, value: PullRequestDetail) -> Self {
        self.details.insert(value.number.get(), Ok(value));
        self
    }

    pub fn with_detail_error(mut self, number: u64, err: FetchError) -> Self {
        self.details.insert(number, Err(err));
        self
    }

    pub fn with_comments(mut self, number: u64, comments: Result<Vec<Comment>, FetchError>) -> Self {
        self.comments.insert(number, comments);
        self
    }

    pub fn with_reviews(mut self, number: u64, reviews: Result<Vec<Review>, FetchError>) -> Self {
        self.reviews.insert(number, reviews);
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PullRequestSource for FakeSource {
    async fn search_open_prs(
        &self,
        query: SearchQuery,
        _login: &str,
    ) -> Result<Vec<SearchItem>, FetchError> {
        self.searches
            .get(query.qualifier())
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_pr(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<PullRequestDetail, FetchError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(&number)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::upstream(Some(404), "Not Found")))
    }

    async fn get_comments(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<Vec<Comment>, FetchError> {
        self.comments
            .get(&number)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_reviews(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<Vec<Review>, FetchError> {
        self.reviews
            .get(&number)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
