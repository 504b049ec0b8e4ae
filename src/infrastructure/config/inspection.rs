//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_host_token;
use crate::application::config::{Config, DefaultsConfig, HostConfig};
use crate::infrastructure::github::GitHubClient;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub hosts: BTreeMap<String, HostInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub host: String,
    pub viewer: Option<String>,
    pub concurrency: usize,
    pub request_timeout_ms: u64,
}

/// 토큰 값 자체는 노출하지 않고 출처/해석 여부만 보여준다.
#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub configured: bool,
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: String,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let mut hosts = BTreeMap::new();
        for (host, cfg) in &config.hosts {
            hosts.insert(host.clone(), host_inspection(host, cfg, true));
        }

        // 기본 호스트는 설정이 없어도 대체 경로(GITHUB_TOKEN, gh)로 점검한다.
        let default_host = config.host();
        if !hosts.contains_key(&default_host) {
            let fallback = config.host_config_or_default(&default_host);
            hosts.insert(
                default_host.clone(),
                host_inspection(&default_host, &fallback, false),
            );
        }

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: effective_defaults(config),
            hosts,
        }
    }
}

fn effective_defaults(config: &Config) -> EffectiveDefaults {
    EffectiveDefaults {
        host: config.host(),
        viewer: config.defaults.viewer.clone(),
        concurrency: config.concurrency(),
        request_timeout_ms: config.request_timeout_ms(),
    }
}

fn host_inspection(host: &str, cfg: &HostConfig, configured: bool) -> HostInspection {
    let token_resolution = resolve_host_token(Some(cfg)).ok();
    HostInspection {
        configured,
        token_source: token_resolution.as_ref().and_then(|r| r.source.clone()),
        token_resolved: token_resolution
            .as_ref()
            .and_then(|r| r.token.as_ref())
            .is_some(),
        api_base: cfg
            .api_base
            .clone()
            .unwrap_or_else(|| GitHubClient::default_api_base(host)),
    }
}
