//! 도메인 정책(봇 판정, action 결정, 결과 정렬 규칙).

use crate::domain::pull_request::{ActionNeeded, PullRequest};
use crate::domain::review::{Review, ReviewState};

const BOT_LOGIN_PATTERNS: [&str; 6] = [
    "[bot]",
    "copilot",
    "coderabbit",
    "dependabot",
    "renovate",
    "github-actions",
];

/// 리뷰어 표시용 봇 판정. 로그인 문자열만 보고 판단한다.
pub fn looks_like_bot(login: &str) -> bool {
    let login = login.to_lowercase();
    BOT_LOGIN_PATTERNS
        .iter()
        .any(|pattern| login.contains(pattern))
}

fn same_login(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// 뷰어 기준 action을 결정한다. 위에서부터 처음 맞는 규칙이 이긴다.
///
/// 1. 뷰어가 작성자: 변경 요청 > 미해결 코멘트 > 승인 > 대기
/// 2. 뷰어가 요청 리뷰어: review
/// 3. 그 외: none
///
/// `latest_reviews`는 리뷰어별 최신 리뷰여야 한다(`review::latest_reviews`).
pub fn resolve_action(
    author: &str,
    viewer: &str,
    requested_reviewers: &[String],
    latest_reviews: &[Review],
    unresolved_comments: usize,
) -> ActionNeeded {
    if same_login(author, viewer) {
        let has_state = |state: ReviewState| latest_reviews.iter().any(|r| r.state == state);

        if has_state(ReviewState::ChangesRequested) {
            return ActionNeeded::AddressFeedback;
        }
        if unresolved_comments > 0 {
            return ActionNeeded::RespondComments;
        }
        if has_state(ReviewState::Approved) {
            return ActionNeeded::ReadyToMerge;
        }
        return ActionNeeded::Waiting;
    }

    if requested_reviewers
        .iter()
        .any(|reviewer| same_login(reviewer, viewer))
    {
        return ActionNeeded::Review;
    }

    ActionNeeded::None
}

/// `updated_at` 내림차순 안정 정렬.
pub fn sort_by_updated_desc(prs: &mut [PullRequest]) {
    prs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
