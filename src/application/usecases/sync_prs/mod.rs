//! 뷰어 관련 열린 PR을 모아 스냅샷으로 내보내는 유스케이스.

mod aggregate;
mod context;
mod details;
#[cfg(test)]
mod fake;
mod synchronizer;

use anyhow::Result;
use chrono::Utc;

use crate::application::ports::{
    ConfigRepository, HostTokenResolver, PullRequestSink, Reporter, SourceFactory,
};
use crate::domain::filter::PrFilter;

use context::load_sync_context;
pub use synchronizer::Synchronizer;

/// CLI에서 넘어오는 동기화 옵션.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// 생략 시 `defaults.viewer`.
    pub viewer: Option<String>,
    /// 생략 시 `defaults.host`.
    pub host: Option<String>,
    pub filter: PrFilter,
}

/// 동기화 결과 요약.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub published: usize,
}

/// 설정 로딩부터 GitHub 조회, 필터링, 결과 게시까지 전체 흐름을 조율한다.
pub struct SyncPrsUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub host_token_resolver: &'a dyn HostTokenResolver,
    pub source_factory: &'a dyn SourceFactory,
    pub sink: &'a dyn PullRequestSink,
    pub reporter: &'a dyn Reporter,
}

impl<'a> SyncPrsUseCase<'a> {
    /// 동기화 본 실행 진입점.
    /// 실패 시 아무것도 게시하지 않는다.
    pub async fn execute(&self, options: SyncOptions) -> Result<SyncReport> {
        let ctx = load_sync_context(self, &options)?;

        self.reporter.section("Sync");
        self.reporter.status("GitHub", "searching open pull requests");
        let synced_at = Utc::now();
        let prs = Synchronizer::new(ctx.source.as_ref(), ctx.config.concurrency())
            .synchronize_at(&ctx.viewer, synced_at)
            .await?;
        let fetched = prs.len();
        self.reporter.kv("Fetched", &fetched.to_string());

        let prs = options.filter.apply(prs);
        if !options.filter.is_empty() {
            self.reporter.kv("Filtered", &prs.len().to_string());
        }

        self.sink.publish(&ctx.viewer, synced_at, &prs)?;
        self.reporter
            .status("Done", &format!("{} pull requests on {}", prs.len(), ctx.host));

        Ok(SyncReport {
            fetched,
            published: prs.len(),
        })
    }
}
