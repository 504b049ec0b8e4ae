//! `prradar` 바이너리 진입점.

use prradar::application::error::SyncError;
use prradar::interface::cli::{AppComposition, Cli, CliAction};

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_RATE_LIMITED: i32 = 3;
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(EXIT_USAGE);
        }
    };

    let composition = AppComposition::default();

    match action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(EXIT_FAILURE);
            }
        },
        CliAction::Sync(options) => {
            // Ctrl-C 시 진행 중인 요청 future를 버리고 아무것도 출력하지 않는다.
            let use_case = composition.sync_usecase();
            let result = tokio::select! {
                result = use_case.execute(options) => result,
                _ = tokio::signal::ctrl_c() => {
                    eprintln!("interrupted");
                    std::process::exit(EXIT_INTERRUPTED);
                }
            };

            if let Err(err) = result {
                eprintln!("error: {err:#}");
                let code = match err.downcast_ref::<SyncError>() {
                    Some(SyncError::RateLimited(_)) => EXIT_RATE_LIMITED,
                    _ => EXIT_FAILURE,
                };
                std::process::exit(code);
            }
        }
    }
}
