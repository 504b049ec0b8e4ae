//! 뷰어 기준 PR 목록 동기화 파이프라인.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use super::aggregate::aggregate_open_prs;
use super::details::fetch_activity;
use crate::application::error::SyncError;
use crate::application::ports::PullRequestSource;
use crate::domain::error::DomainError;
use crate::domain::policy::sort_by_updated_desc;
use crate::domain::pull_request::{PullRequest, PullRequestDetail};

/// 검색 집계 → 상세 보강 → 코멘트/리뷰 조회 → 스냅샷 조립 → 정렬.
///
/// 중간 실패로 반환되면 부분 결과는 버린다.
pub struct Synchronizer<'a> {
    source: &'a dyn PullRequestSource,
    concurrency: usize,
}

impl<'a> Synchronizer<'a> {
    pub fn new(source: &'a dyn PullRequestSource, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn synchronize(&self, viewer: &str) -> Result<Vec<PullRequest>, SyncError> {
        self.synchronize_at(viewer, Utc::now()).await
    }

    /// 모든 스냅샷에 같은 `synced_at`을 찍는다.
    pub async fn synchronize_at(
        &self,
        viewer: &str,
        synced_at: DateTime<Utc>,
    ) -> Result<Vec<PullRequest>, SyncError> {
        let viewer = viewer.trim();
        if viewer.is_empty() {
            return Err(DomainError::EmptyField { field: "viewer" }.into());
        }

        let details = aggregate_open_prs(self.source, viewer, self.concurrency).await?;
        info!(viewer, count = details.len(), "hydrated open pull requests");

        let mut prs: Vec<PullRequest> = stream::iter(details)
            .map(|detail| self.assemble(detail, viewer, synced_at))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        sort_by_updated_desc(&mut prs);
        Ok(prs)
    }

    async fn assemble(
        &self,
        detail: PullRequestDetail,
        viewer: &str,
        synced_at: DateTime<Utc>,
    ) -> Result<PullRequest, SyncError> {
        let activity = fetch_activity(self.source, &detail).await?;
        Ok(PullRequest::assemble(
            detail,
            &activity.comments,
            &activity.reviews,
            viewer,
            synced_at,
        ))
    }
}
