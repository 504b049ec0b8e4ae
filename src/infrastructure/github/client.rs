//! GitHub REST API 연동 구현.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{CommentResponse, PullResponse, ReviewResponse, SearchResponse};
use super::rate_limit::classify_failure;
use crate::application::error::FetchError;
use crate::application::ports::PullRequestSource;
use crate::domain::comment::Comment;
use crate::domain::pull_request::PullRequestDetail;
use crate::domain::review::Review;
use crate::domain::search::{SearchItem, SearchQuery};

pub const PUBLIC_API_BASE: &str = "https://api.github.com";
pub const PER_PAGE: usize = 100;
/// 검색 API는 최대 1000건(10페이지)까지만 돌려준다.
pub const MAX_SEARCH_PAGES: u32 = 10;

/// owner/repo 경로 세그먼트용. GitHub 이름에 쓰이는 `-`, `_`, `.`은 그대로 둔다.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// 요청별 타임아웃을 적용한 클라이언트를 생성한다.
    pub fn new(api_base: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("github: failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// github.com은 공개 API, 그 외는 Enterprise 기본 경로를 사용한다.
    pub fn default_api_base(host: &str) -> String {
        if host == "github.com" {
            PUBLIC_API_BASE.to_string()
        } else {
            format!("https://{host}/api/v3")
        }
    }

    fn pull_endpoint(&self, owner: &str, repo: &str, number: u64, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}{}",
            self.api_base,
            encode_segment(owner),
            encode_segment(repo),
            number,
            suffix
        )
    }

    fn issue_comments_endpoint(&self, owner: &str, repo: &str, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base,
            encode_segment(owner),
            encode_segment(repo),
            number
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "prradar")
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    /// GET 한 번. 비정상 응답은 rate limit / upstream 오류로 분류한다.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let resp = self
            .request(Method::GET, url)
            .query(query)
            .send()
            .await
            .map_err(|err| transport_error(url, err))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|err| transport_error(url, err))?;

        if !status.is_success() {
            return Err(classify_failure(status, &headers, &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            FetchError::upstream(Some(status.as_u16()), format!("invalid JSON from {url}: {err}"))
        })
    }

    /// 페이지 크기보다 적게 오는 페이지에서 멈춘다.
    async fn get_paginated<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, FetchError> {
        let mut out = Vec::new();
        let mut page = 1u32;
        loop {
            let batch: Vec<T> = self
                .get_json(
                    url,
                    &[("per_page", PER_PAGE.to_string()), ("page", page.to_string())],
                )
                .await?;
            let len = batch.len();
            out.extend(batch);

            if len < PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(out)
    }
}

fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

fn transport_error(url: &str, err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() { "timed out" } else { "request failed" };
    FetchError::upstream(err.status().map(|s| s.as_u16()), format!("github: {kind} for {url}: {err}"))
}

#[async_trait]
impl PullRequestSource for GitHubClient {
    async fn search_open_prs(
        &self,
        query: SearchQuery,
        login: &str,
    ) -> Result<Vec<SearchItem>, FetchError> {
        let url = format!("{}/search/issues", self.api_base);
        let q = query.to_search_string(login);
        let mut out = Vec::new();

        for page in 1..=MAX_SEARCH_PAGES {
            let resp: SearchResponse = self
                .get_json(
                    &url,
                    &[
                        ("q", q.clone()),
                        ("per_page", PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;
            let len = resp.items.len();
            out.extend(resp.items.into_iter().map(SearchItem::from));
            if len < PER_PAGE {
                break;
            }
        }

        debug!(query = %q, count = out.len(), "github: search finished");
        Ok(out)
    }

    async fn get_pr(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestDetail, FetchError> {
        let pull: PullResponse = self
            .get_json(&self.pull_endpoint(owner, repo, number, ""), &[])
            .await?;
        pull.into_detail()
    }

    async fn get_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Comment>, FetchError> {
        let issue: Vec<CommentResponse> = self
            .get_paginated(&self.issue_comments_endpoint(owner, repo, number))
            .await?;
        let review_line: Vec<CommentResponse> = self
            .get_paginated(&self.pull_endpoint(owner, repo, number, "/comments"))
            .await?;

        let mut out = Vec::with_capacity(issue.len() + review_line.len());
        for raw in issue.into_iter().chain(review_line) {
            if let Some(comment) = raw.into_comment()? {
                out.push(comment);
            }
        }
        Ok(out)
    }

    async fn get_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Review>, FetchError> {
        let raw: Vec<ReviewResponse> = self
            .get_paginated(&self.pull_endpoint(owner, repo, number, "/reviews"))
            .await?;

        let mut out = Vec::with_capacity(raw.len());
        for review in raw {
            if let Some(review) = review.into_review()? {
                out.push(review);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enterprise_hosts_use_api_v3() {
        assert_eq!(
            GitHubClient::default_api_base("github.com"),
            "https://api.github.com"
        );
        assert_eq!(
            GitHubClient::default_api_base("ghe.example.com"),
            "https://ghe.example.com/api/v3"
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let client =
            GitHubClient::new("https://api.github.com/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.pull_endpoint("octo", "my repo", 3, "/reviews"),
            "https://api.github.com/repos/octo/my%20repo/pulls/3/reviews"
        );
        assert_eq!(
            client.issue_comments_endpoint("octo-org", "api.rs", 3),
            "https://api.github.com/repos/octo-org/api.rs/issues/3/comments"
        );
    }
}
