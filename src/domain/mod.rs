//! Domain layer
//! PR 집계/리뷰 상태/action 결정 규칙을 I/O 없이 표현한다.

pub mod comment;
pub mod error;
pub mod filter;
pub mod policy;
pub mod pull_request;
pub mod review;
pub mod search;
