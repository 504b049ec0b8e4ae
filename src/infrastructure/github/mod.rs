//! GitHub REST 연동 계층.
//! 검색/상세/코멘트/리뷰 조회를 `PullRequestSource` 포트로 제공한다.

mod client;
mod models;
mod rate_limit;

pub use client::{GitHubClient, MAX_SEARCH_PAGES, PER_PAGE, PUBLIC_API_BASE};
pub use rate_limit::{classify_failure, rate_limit_info};
