//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::sync_prs::SyncPrsUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, GitHubSourceFactory, HostTokenResolverAdapter, JsonConfigRepository,
    JsonSink,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    host_token_resolver: HostTokenResolverAdapter,
    source_factory: GitHubSourceFactory,
    sink: JsonSink<std::io::Stdout>,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(ConsoleReporter::new())
    }
}

impl AppComposition {
    /// 리포터를 외부에서 주입한다(예: `--quiet` 대응, 테스트).
    pub fn new(reporter: ConsoleReporter) -> Self {
        Self {
            config_repo: JsonConfigRepository,
            host_token_resolver: HostTokenResolverAdapter,
            source_factory: GitHubSourceFactory,
            sink: JsonSink::stdout(),
            reporter,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// PR 동기화 유스케이스를 생성한다.
    pub fn sync_usecase(&self) -> SyncPrsUseCase<'_> {
        SyncPrsUseCase {
            config_repo: &self.config_repo,
            host_token_resolver: &self.host_token_resolver,
            source_factory: &self.source_factory,
            sink: &self.sink,
            reporter: &self.reporter,
        }
    }
}
