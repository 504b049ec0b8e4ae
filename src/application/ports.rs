//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::config::{Config, HostConfig};
use crate::application::error::FetchError;
use crate::domain::comment::Comment;
use crate::domain::pull_request::{PullRequest, PullRequestDetail};
use crate::domain::review::Review;
use crate::domain::search::{SearchItem, SearchQuery};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 호스트 토큰 해석 결과. `source`는 진단용 출처 라벨(예: `env:GITHUB_TOKEN`).
#[derive(Debug, Clone, Default)]
pub struct HostTokenResolution {
    pub token: Option<String>,
    pub source: Option<String>,
}

/// 호스트 설정(token/env/cmd)을 실제 토큰으로 바꾸는 포트.
pub trait HostTokenResolver: Send + Sync {
    fn resolve(&self, host: &str, host_cfg: Option<&HostConfig>) -> Result<HostTokenResolution>;
}

/// PR 원격 저장소(GitHub REST) 조회 포트.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// 질의 하나의 열린 PR 참조를 모든 페이지에 걸쳐 모은다.
    async fn search_open_prs(
        &self,
        query: SearchQuery,
        login: &str,
    ) -> Result<Vec<SearchItem>, FetchError>;

    async fn get_pr(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestDetail, FetchError>;

    /// 이슈 코멘트와 리뷰(diff) 코멘트를 합친 목록.
    async fn get_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Comment>, FetchError>;

    async fn get_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Review>, FetchError>;
}

/// 호스트 설정에 맞는 PR 조회 클라이언트를 생성하는 팩토리 포트.
pub trait SourceFactory: Send + Sync {
    fn build(
        &self,
        host: &str,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Box<dyn PullRequestSource>>;
}

/// 동기화 결과 배치를 받아 내보내는 포트. 동기화 1회당 한 번 호출된다.
pub trait PullRequestSink: Send + Sync {
    fn publish(
        &self,
        viewer: &str,
        synced_at: DateTime<Utc>,
        pull_requests: &[PullRequest],
    ) -> Result<()>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
}
