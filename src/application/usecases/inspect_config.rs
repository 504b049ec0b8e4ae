//! 병합된 설정과 호스트별 토큰 해석 상태를 보여주는 유스케이스.

use anyhow::{Context, Result};

use crate::application::ports::ConfigRepository;

/// 토큰 값은 숨기고 출처만 담은 진단 JSON을 만든다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo
            .inspect_pretty_json()
            .context("failed to inspect prradar config")
    }
}
