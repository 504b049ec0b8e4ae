//! 코멘트 엔티티와 작성자 기반 출처 분류.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::{DomainError, require_non_empty};

/// 코멘트 작성자 계정 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorKind {
    Human,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub login: String,
    #[serde(rename = "type")]
    pub kind: AuthorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl CommentAuthor {
    pub fn new(
        login: impl Into<String>,
        kind: AuthorKind,
        avatar_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let login = login.into();
        require_non_empty("comment author login", &login)?;
        Ok(Self {
            login,
            kind,
            avatar_url,
        })
    }
}

/// 코멘트 출처 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSource {
    Reviewer,
    Bot,
    Copilot,
    Coderabbit,
    Other,
}

impl CommentSource {
    /// 작성자 유형과 로그인으로 출처를 결정한다.
    ///
    /// 봇 계정만 로그인 문자열을 본다(대소문자 무시).
    /// 리뷰어 표시용 봇 판정(`policy::looks_like_bot`)과는 별개의 규칙이다.
    pub fn classify(author: &CommentAuthor) -> Self {
        match author.kind {
            AuthorKind::Human => Self::Reviewer,
            AuthorKind::Bot => {
                let login = author.login.to_lowercase();
                if login.contains("copilot") {
                    Self::Copilot
                } else if login.contains("coderabbit") {
                    Self::Coderabbit
                } else {
                    Self::Bot
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: CommentAuthor,
    pub text: String,
    pub source: CommentSource,
    pub created_at: DateTime<Utc>,
    pub is_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Comment {
    /// 코멘트를 생성하면서 출처를 분류한다. 새 코멘트는 미해결 상태로 시작한다.
    pub fn new(
        id: impl Into<String>,
        author: CommentAuthor,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
        url: Option<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let text = text.into();
        require_non_empty("comment id", &id)?;
        require_non_empty("comment text", &text)?;

        let source = CommentSource::classify(&author);
        Ok(Self {
            id,
            author,
            text,
            source,
            created_at,
            is_resolved: false,
            url,
        })
    }

    pub fn resolved(self) -> Self {
        Self {
            is_resolved: true,
            ..self
        }
    }
}

/// PR 단위 코멘트 집계.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSummary {
    pub total: usize,
    pub unresolved: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_comment_at: Option<DateTime<Utc>>,
    /// 코멘트가 하나도 없으면 `None`(0으로 채운 맵이 아님).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts_by_source: Option<BTreeMap<CommentSource, usize>>,
}

impl CommentSummary {
    pub fn from_comments(comments: &[Comment]) -> Self {
        if comments.is_empty() {
            return Self::default();
        }

        let mut counts = BTreeMap::new();
        for comment in comments {
            *counts.entry(comment.source).or_insert(0) += 1;
        }

        Self {
            total: comments.len(),
            unresolved: comments.iter().filter(|c| !c.is_resolved).count(),
            last_comment_at: comments.iter().map(|c| c.created_at).max(),
            counts_by_source: Some(counts),
        }
    }

    pub fn count_for(&self, source: CommentSource) -> usize {
        self.counts_by_source
            .as_ref()
            .and_then(|counts| counts.get(&source).copied())
            .unwrap_or(0)
    }

    pub fn has_new_since(&self, since: DateTime<Utc>) -> bool {
        self.last_comment_at.is_some_and(|last| last > since)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn author(login: &str, kind: AuthorKind) -> CommentAuthor {
        CommentAuthor::new(login, kind, None).expect("valid author")
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn human_authors_are_reviewers_even_with_bot_like_names() {
        let source = CommentSource::classify(&author("copilot-fan", AuthorKind::Human));
        assert_eq!(source, CommentSource::Reviewer);
    }

    #[test]
    fn bot_logins_are_matched_case_insensitively() {
        assert_eq!(
            CommentSource::classify(&author("Copilot", AuthorKind::Bot)),
            CommentSource::Copilot
        );
        assert_eq!(
            CommentSource::classify(&author("CodeRabbitAI[bot]", AuthorKind::Bot)),
            CommentSource::Coderabbit
        );
        assert_eq!(
            CommentSource::classify(&author("dependabot[bot]", AuthorKind::Bot)),
            CommentSource::Bot
        );
    }

    #[test]
    fn blank_comment_text_is_rejected() {
        let err = Comment::new("1", author("alice", AuthorKind::Human), "  ", at(1), None)
            .expect_err("blank text must fail");
        assert_eq!(
            err,
            DomainError::EmptyField {
                field: "comment text"
            }
        );
    }

    #[test]
    fn empty_summary_omits_source_counts() {
        let summary = CommentSummary::from_comments(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.unresolved, 0);
        assert!(summary.counts_by_source.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("countsBySource").is_none());
        assert!(json.get("lastCommentAt").is_none());
    }

    #[test]
    fn summary_counts_sources_and_tracks_latest_comment() {
        let comments = vec![
            Comment::new("1", author("alice", AuthorKind::Human), "nit", at(3), None).unwrap(),
            Comment::new("2", author("copilot[bot]", AuthorKind::Bot), "hint", at(5), None)
                .unwrap(),
            Comment::new("3", author("bob", AuthorKind::Human), "ok", at(4), None)
                .unwrap()
                .resolved(),
        ];

        let summary = CommentSummary::from_comments(&comments);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.unresolved, 2);
        assert_eq!(summary.last_comment_at, Some(at(5)));
        assert_eq!(summary.count_for(CommentSource::Reviewer), 2);
        assert_eq!(summary.count_for(CommentSource::Copilot), 1);
        assert_eq!(summary.count_for(CommentSource::Coderabbit), 0);
        assert!(summary.has_new_since(at(4)));
        assert!(!summary.has_new_since(at(5)));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["countsBySource"]["reviewer"], 2);
        assert_eq!(json["countsBySource"]["copilot"], 1);
    }
}
