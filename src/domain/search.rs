//! 뷰어 기준 PR 검색 질의와 검색 결과 참조 해석.

use url::Url;

/// 고정 검색 질의. 선언 순서가 곧 실행/중복 제거 우선순위다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchQuery {
    AuthoredBy,
    ReviewRequestedFor,
    CommentedOn,
    ReviewedBy,
    AssignedTo,
}

impl SearchQuery {
    pub const ALL: [SearchQuery; 5] = [
        SearchQuery::AuthoredBy,
        SearchQuery::ReviewRequestedFor,
        SearchQuery::CommentedOn,
        SearchQuery::ReviewedBy,
        SearchQuery::AssignedTo,
    ];

    /// GitHub 검색 qualifier 이름.
    pub fn qualifier(self) -> &'static str {
        match self {
            Self::AuthoredBy => "author",
            Self::ReviewRequestedFor => "review-requested",
            Self::CommentedOn => "commenter",
            Self::ReviewedBy => "reviewed-by",
            Self::AssignedTo => "assignee",
        }
    }

    /// 열린 PR만 대상으로 하는 검색 문자열.
    pub fn to_search_string(self, login: &str) -> String {
        format!("type:pr {}:{} state:open", self.qualifier(), login)
    }
}

/// 검색 API가 돌려주는 참조 전용 항목(저장소 상세 없음).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub id: String,
    pub number: u64,
    pub repository_url: Option<String>,
}

impl SearchItem {
    /// `.../repos/<owner>/<repo>` 형태의 저장소 참조에서 (owner, repo)를 뽑는다.
    pub fn repository(&self) -> Option<(String, String)> {
        parse_repository_url(self.repository_url.as_deref()?)
    }
}

fn parse_repository_url(input: &str) -> Option<(String, String)> {
    let url = Url::parse(input).ok()?;
    let segments: Vec<&str> = url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .collect();

    // Enterprise는 /api/v3/repos/... 이므로 마지막 "repos" 뒤를 본다.
    let idx = segments.iter().rposition(|s| *s == "repos")?;
    match &segments[idx + 1..] {
        [owner, repo] => Some((owner.to_string(), repo.to_string())),
        _ => None,
    }
}
