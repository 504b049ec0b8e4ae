//! 동기화 결과를 JSON 문서로 내보내는 싱크 어댑터.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::PullRequestSink;
use crate::domain::pull_request::PullRequest;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncEnvelope<'a> {
    viewer: &'a str,
    synced_at: DateTime<Utc>,
    pull_requests: &'a [PullRequest],
}

/// `{viewer, syncedAt, pullRequests}` 봉투를 pretty JSON으로 쓴다.
pub struct JsonSink<W: Write + Send> {
    out: Mutex<W>,
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> PullRequestSink for JsonSink<W> {
    fn publish(
        &self,
        viewer: &str,
        synced_at: DateTime<Utc>,
        pull_requests: &[PullRequest],
    ) -> Result<()> {
        let envelope = SyncEnvelope {
            viewer,
            synced_at,
            pull_requests,
        };
        let rendered = serde_json::to_string_pretty(&envelope)?;

        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow::anyhow!("json sink writer lock poisoned"))?;
        writeln!(out, "{rendered}").context("failed to write sync result")?;
        out.flush().context("failed to flush sync result")
    }
}
