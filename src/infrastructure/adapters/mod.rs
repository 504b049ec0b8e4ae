//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod host_token_resolver;
mod json_sink;
mod reporter;
mod source_factory;

pub use config_repository::JsonConfigRepository;
pub use host_token_resolver::HostTokenResolverAdapter;
pub use json_sink::JsonSink;
pub use reporter::ConsoleReporter;
pub use source_factory::GitHubSourceFactory;
