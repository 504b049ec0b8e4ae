//! PR별 코멘트/리뷰 조회 단계. 한쪽이 실패해도 다른 쪽 결과는 살린다.

use futures::join;
use tracing::warn;

use crate::application::error::{FetchError, SyncError};
use crate::application::ports::PullRequestSource;
use crate::domain::comment::Comment;
use crate::domain::pull_request::PullRequestDetail;
use crate::domain::review::Review;

pub(super) struct PrActivity {
    pub comments: Vec<Comment>,
    pub reviews: Vec<Review>,
}

/// 코멘트와 리뷰를 동시에 조회한다.
///
/// 일반 조회 실패는 빈 목록으로 대체하고 경고만 남긴다.
/// rate limit과 불변식 위반은 배치 전체를 중단시킨다.
pub(super) async fn fetch_activity(
    source: &dyn PullRequestSource,
    detail: &PullRequestDetail,
) -> Result<PrActivity, SyncError> {
    let owner = detail.repository.owner.as_str();
    let repo = detail.repository.name.as_str();
    let number = detail.number.get();

    let (comments, reviews) = join!(
        source.get_comments(owner, repo, number),
        source.get_reviews(owner, repo, number),
    );

    Ok(PrActivity {
        comments: absorb(comments, "comments", detail)?,
        reviews: absorb(reviews, "reviews", detail)?,
    })
}

fn absorb<T>(
    result: Result<Vec<T>, FetchError>,
    kind: &'static str,
    detail: &PullRequestDetail,
) -> Result<Vec<T>, SyncError> {
    match result {
        Ok(items) => Ok(items),
        Err(FetchError::RateLimited(info)) => Err(SyncError::RateLimited(info)),
        Err(FetchError::Invariant(err)) => Err(SyncError::InvariantViolation(err)),
        Err(err) => {
            warn!(
                id = %detail.id,
                repository = %detail.repository.full_name(),
                number = detail.number.get(),
                kind,
                error = %err,
                "detail fetch failed; continuing with empty list"
            );
            Ok(Vec::new())
        }
    }
}
