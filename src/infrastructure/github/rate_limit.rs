//! 비정상 응답을 rate limit / 일반 upstream 오류로 분류한다.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::application::error::{FetchError, RateLimitInfo};

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// `u32` 범위를 벗어난 값은 헤더가 없는 것으로 본다.
fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    header_u64(headers, name).and_then(|v| u32::try_from(v).ok())
}

/// `X-RateLimit-*` 헤더를 읽는다. remaining 헤더가 없거나 읽을 수 없으면 `None`.
pub fn rate_limit_info(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = header_u32(headers, REMAINING_HEADER)?;
    Some(RateLimitInfo {
        limit: header_u32(headers, LIMIT_HEADER).unwrap_or(0),
        remaining,
        reset_at: header_u64(headers, RESET_HEADER).unwrap_or(0),
    })
}

/// 403 + 남은 호출 0이면 `RateLimited`, 나머지는 상태 코드를 담은 `Upstream`.
///
/// remaining 헤더가 없는 403은 0으로 간주하지 않는다. 권한 부족 403이
/// rate limit으로 잘못 보고되지 않도록 `Upstream(403)`으로 남긴다.
pub fn classify_failure(status: StatusCode, headers: &HeaderMap, body: &str) -> FetchError {
    if status == StatusCode::FORBIDDEN
        && let Some(info) = rate_limit_info(headers)
        && info.is_exhausted()
    {
        return FetchError::RateLimited(info);
    }

    let message = upstream_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string()
    });
    FetchError::upstream(Some(status.as_u16()), message)
}

/// GitHub 오류 본문(`{"message": ...}`)의 메시지만 꺼낸다.
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")?
        .as_str()
        .map(str::to_string)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderName, HeaderValue};

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(HeaderName::from_static(k), HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn forbidden_with_zero_remaining_is_rate_limited() {
        let h = headers(&[
            ("x-ratelimit-limit", "5000"),
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1700000000"),
        ]);
        assert_eq!(
            classify_failure(StatusCode::FORBIDDEN, &h, ""),
            FetchError::RateLimited(RateLimitInfo {
                limit: 5000,
                remaining: 0,
                reset_at: 1_700_000_000,
            })
        );
    }

    #[test]
    fn forbidden_without_remaining_header_is_upstream() {
        let err = classify_failure(
            StatusCode::FORBIDDEN,
            &HeaderMap::new(),
            r#"{"message":"Resource not accessible by integration"}"#,
        );
        assert_eq!(
            err,
            FetchError::upstream(Some(403), "Resource not accessible by integration")
        );
    }

    #[test]
    fn forbidden_with_quota_left_is_upstream() {
        let h = headers(&[("x-ratelimit-remaining", "12")]);
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, &h, ""),
            FetchError::Upstream {
                status: Some(403),
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_remaining_is_treated_as_absent() {
        let h = headers(&[
            ("x-ratelimit-limit", "5000"),
            ("x-ratelimit-remaining", "4294967296"),
        ]);
        assert_eq!(rate_limit_info(&h), None);
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, &h, ""),
            FetchError::Upstream {
                status: Some(403),
                ..
            }
        ));

        let h = headers(&[
            ("x-ratelimit-limit", "99999999999"),
            ("x-ratelimit-remaining", "0"),
        ]);
        assert_eq!(
            rate_limit_info(&h),
            Some(RateLimitInfo {
                limit: 0,
                remaining: 0,
                reset_at: 0,
            })
        );
    }

    #[test]
    fn other_statuses_fall_back_to_reason_phrase() {
        assert_eq!(
            classify_failure(StatusCode::BAD_GATEWAY, &HeaderMap::new(), "<html>"),
            FetchError::upstream(Some(502), "Bad Gateway")
        );
    }
}
