//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// GitHub 호스트별 인증/엔드포인트 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 대상 호스트(기본 github.com)
    pub host: Option<String>,
    /// CLI에서 생략 시 사용할 뷰어 로그인
    pub viewer: Option<String>,
    /// PR 단위 조회 동시 실행 수
    pub concurrency: Option<usize>,
    /// 요청별 타임아웃(ms)
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HostConfig {
    /// 고정 토큰(민감정보: 권장하지 않음)
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름
    pub token_env: Option<String>,
    /// 토큰을 stdout으로 출력하는 커맨드(예: ["gh","auth","token"])
    pub token_command: Option<Vec<String>>,
    /// API base URL override(선택)
    pub api_base: Option<String>,
}

impl Config {
    pub fn host(&self) -> String {
        self.defaults
            .host
            .clone()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn concurrency(&self) -> usize {
        self.defaults
            .concurrency
            .unwrap_or(DEFAULT_CONCURRENCY)
            .max(1)
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.defaults
            .request_timeout_ms
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 설정이 없는 호스트는 `GITHUB_TOKEN` 또는 `gh auth token`으로 토큰을 찾는다.
    pub fn host_config_or_default(&self, host: &str) -> HostConfig {
        self.host_config(host)
            .cloned()
            .unwrap_or_else(HostConfig::github_cli_default)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.viewer.is_some() {
            self.viewer = other.viewer;
        }
        if other.concurrency.is_some() {
            self.concurrency = other.concurrency;
        }
        if other.request_timeout_ms.is_some() {
            self.request_timeout_ms = other.request_timeout_ms;
        }
    }
}

impl HostConfig {
    pub fn github_cli_default() -> Self {
        Self {
            token: None,
            token_env: Some(DEFAULT_TOKEN_ENV.to_string()),
            token_command: Some(vec!["gh".into(), "auth".into(), "token".into()]),
            api_base: None,
        }
    }

    pub fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.token_command.is_some() {
            self.token_command = other.token_command;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}
