//! prradar library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::usecases::sync_prs::{SyncOptions, SyncReport};
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 동기화 함수. 결과 JSON은 stdout으로 나간다.
pub async fn sync(options: SyncOptions) -> Result<SyncReport> {
    let composition = AppComposition::default();
    composition.sync_usecase().execute(options).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute()
}
