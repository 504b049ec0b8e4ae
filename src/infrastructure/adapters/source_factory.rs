//! PR 조회 클라이언트 팩토리 포트 구현 어댑터.

use std::time::Duration;

use anyhow::Result;

use crate::application::config::HostConfig;
use crate::application::ports::{PullRequestSource, SourceFactory};
use crate::infrastructure::github::GitHubClient;

/// 호스트 설정의 `api_base`가 없으면 호스트 이름으로 기본 API 주소를 정한다.
pub struct GitHubSourceFactory;

impl SourceFactory for GitHubSourceFactory {
    fn build(
        &self,
        host: &str,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Box<dyn PullRequestSource>> {
        let api_base = host_cfg
            .and_then(|h| h.api_base.clone())
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| GitHubClient::default_api_base(host));

        Ok(Box::new(GitHubClient::new(api_base, token, timeout)?))
    }
}
