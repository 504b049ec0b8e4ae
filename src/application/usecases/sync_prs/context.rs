//! 동기화 실행 컨텍스트(설정/뷰어/조회 클라이언트) 준비 단계.

use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::application::config::Config;
use crate::application::ports::PullRequestSource;
use crate::application::usecases::sync_prs::{SyncOptions, SyncPrsUseCase};

/// 동기화 유스케이스 전 구간에서 공유되는 실행 상태.
pub(super) struct SyncContext {
    pub config: Config,
    pub host: String,
    pub viewer: String,
    pub source: Box<dyn PullRequestSource>,
}

/// 설정 로딩, 뷰어 결정, 토큰 해석, 클라이언트 생성까지 선행한다.
pub(super) fn load_sync_context(
    use_case: &SyncPrsUseCase<'_>,
    options: &SyncOptions,
) -> Result<SyncContext> {
    use_case.reporter.section("Load Config");
    let config = use_case
        .config_repo
        .load()
        .context("failed to load prradar config")?;

    let host = options
        .host
        .clone()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| config.host());

    let viewer = options
        .viewer
        .clone()
        .or_else(|| config.defaults.viewer.clone())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let Some(viewer) = viewer else {
        bail!("missing viewer login. Pass it as an argument or set defaults.viewer in config");
    };

    let host_cfg = config.host_config_or_default(&host);
    let resolution = use_case
        .host_token_resolver
        .resolve(&host, Some(&host_cfg))
        .with_context(|| format!("failed to resolve token for host '{host}'"))?;

    if resolution.token.is_none() {
        bail!(
            "missing GitHub token for host '{}'. Configure hosts.{}.token or hosts.{}.token_env in config, or log in with `gh auth login`",
            host,
            host,
            host,
        );
    }

    use_case.reporter.kv("Host", &host);
    use_case.reporter.kv("Viewer", &viewer);
    use_case
        .reporter
        .kv("Token", resolution.source.as_deref().unwrap_or("unknown"));

    let timeout = Duration::from_millis(config.request_timeout_ms());
    let source = use_case
        .source_factory
        .build(&host, Some(&host_cfg), resolution.token, timeout)
        .context("failed to build GitHub client")?;

    Ok(SyncContext {
        config,
        host,
        viewer,
        source,
    })
}
