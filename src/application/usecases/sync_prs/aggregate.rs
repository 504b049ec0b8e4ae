//! 검색 질의 집계와 PR 상세 보강(hydration) 단계.

use std::collections::HashSet;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, warn};

use crate::application::error::{FetchError, SyncError};
use crate::application::ports::PullRequestSource;
use crate::domain::pull_request::PullRequestDetail;
use crate::domain::search::{SearchItem, SearchQuery};

/// 다섯 질의를 순서대로 실행하고, 처음 본 참조만 남긴 뒤 상세를 붙인다.
pub(super) async fn aggregate_open_prs(
    source: &dyn PullRequestSource,
    viewer: &str,
    concurrency: usize,
) -> Result<Vec<PullRequestDetail>, SyncError> {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();

    for query in SearchQuery::ALL {
        let items = source.search_open_prs(query, viewer).await?;
        let total = items.len();
        let before = refs.len();
        for item in items {
            if seen.insert(item.id.clone()) {
                refs.push(item);
            }
        }
        debug!(
            query = query.qualifier(),
            total,
            new = refs.len() - before,
            "search query finished"
        );
    }

    let resolved: Vec<(SearchItem, String, String)> = refs
        .into_iter()
        .filter_map(|item| match item.repository() {
            Some((owner, repo)) => Some((item, owner, repo)),
            None => {
                warn!(
                    id = %item.id,
                    repository_url = item.repository_url.as_deref().unwrap_or("<none>"),
                    "dropping search result with unresolvable repository reference"
                );
                None
            }
        })
        .collect();

    let hydrated: Vec<Option<PullRequestDetail>> = stream::iter(resolved)
        .map(|(item, owner, repo)| hydrate(source, item, owner, repo))
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    // 검색 id와 상세 id가 다를 수 있어 한 번 더 거른다.
    let mut seen_details = HashSet::new();
    Ok(hydrated
        .into_iter()
        .flatten()
        .filter(|detail| seen_details.insert(detail.id.clone()))
        .collect())
}

async fn hydrate(
    source: &dyn PullRequestSource,
    item: SearchItem,
    owner: String,
    repo: String,
) -> Result<Option<PullRequestDetail>, SyncError> {
    match source.get_pr(&owner, &repo, item.number).await {
        Ok(detail) => Ok(Some(detail)),
        Err(err @ (FetchError::Upstream { .. } | FetchError::MissingRepository { .. })) => {
            warn!(
                id = %item.id,
                repository = %format!("{owner}/{repo}"),
                number = item.number,
                error = %err,
                "dropping pull request that could not be hydrated"
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
