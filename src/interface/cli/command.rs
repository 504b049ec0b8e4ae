//! CLI 명령 파싱 모듈.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::application::usecases::sync_prs::SyncOptions;
use crate::domain::filter::PrFilter;
use crate::domain::pull_request::{ActionNeeded, PrStatus, RepositoryRef};

#[derive(Debug, Parser)]
#[command(name = "prradar")]
#[command(about = "Collect open GitHub pull requests that need your attention")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, classify and print open PRs related to the viewer as JSON
    Sync(SyncArgs),
    /// Show effective merged config and token resolution
    Config,
}

#[derive(Debug, Args)]
struct SyncArgs {
    /// GitHub login to sync for (defaults.viewer if omitted)
    viewer: Option<String>,

    /// GitHub host (github.com or an Enterprise host)
    #[arg(long)]
    host: Option<String>,

    /// Only PRs in this repository (owner/name)
    #[arg(long)]
    repo: Option<RepositoryRef>,

    /// Only PRs with this status (open, draft, merged, closed)
    #[arg(long)]
    status: Option<PrStatus>,

    /// Only PRs assigned to this login
    #[arg(long)]
    assignee: Option<String>,

    /// Only PRs needing this action (review, address-feedback, respond-comments, ready-to-merge, waiting, none)
    #[arg(long)]
    action: Option<ActionNeeded>,

    /// Only PRs updated at or after this instant (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_from_instant)]
    updated_from: Option<DateTime<Utc>>,

    /// Only PRs updated at or before this instant (RFC 3339 or YYYY-MM-DD, inclusive day)
    #[arg(long, value_parser = parse_to_instant)]
    updated_to: Option<DateTime<Utc>>,

    /// Case-insensitive match on title, repository or author
    #[arg(long)]
    search: Option<String>,
}

pub enum CliAction {
    InspectConfig,
    Sync(SyncOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    pub fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Commands::Config => Ok(CliAction::InspectConfig),
            Commands::Sync(args) => {
                if let (Some(from), Some(to)) = (args.updated_from, args.updated_to)
                    && from > to
                {
                    return Err("--updated-from must not be later than --updated-to".into());
                }

                Ok(CliAction::Sync(SyncOptions {
                    viewer: args.viewer,
                    host: args.host,
                    filter: PrFilter {
                        repository: args.repo,
                        status: args.status,
                        assignee: args.assignee,
                        action: args.action,
                        updated_from: args.updated_from,
                        updated_to: args.updated_to,
                        search: args.search.filter(|s| !s.trim().is_empty()),
                    },
                }))
            }
        }
    }
}

fn parse_instant(raw: &str, day_time: NaiveTime) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(day_time).and_utc())
        .map_err(|_| format!("invalid date '{raw}' (expected RFC 3339 or YYYY-MM-DD)"))
}

fn parse_from_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(raw, NaiveTime::MIN)
}

fn parse_to_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let end_of_day =
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).ok_or("invalid end-of-day time")?;
    parse_instant(raw, end_of_day)
}
