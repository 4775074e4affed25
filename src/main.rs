use anyhow::Result;
use clap::Parser;
use dfund_smoke::{clock::SystemClock, config::Config, workflow::WorkflowError};
use log::warn;
use std::process::ExitCode;

/// dfund-smoke - end-to-end smoke test for the D-fund API
///
/// Registers a throwaway user, creates an opportunity and an application,
/// then submits, reviews and queries it. Exits non-zero if registration or
/// either creation step is rejected.
///
/// Examples:
///   dfund-smoke                                   # Against http://localhost:3001/api/v1
///   dfund-smoke --api-url http://staging:3001/api/v1
#[derive(Parser, Debug)]
#[command(author, version = env!("DFUND_SMOKE_VERSION"), about)]
struct Cli {
    /// API base URL (defaults to http://localhost:3001/api/v1)
    #[arg(long = "api-url", env = "DFUND_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Password for the generated account (defaults to Password123!)
    #[arg(long, env = "DFUND_SMOKE_PASSWORD", value_name = "PASSWORD")]
    password: Option<String>,

    /// Send the bearer token on the list-by-user and list-by-opportunity queries
    #[arg(long = "with-token-on-queries")]
    token_on_queries: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config::new(self.api_url, self.password, self.token_on_queries)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = Cli::parse().into_config();

    match dfund_smoke::workflow::run_with(config, SystemClock).await {
        Ok(report) => {
            if let Some(summary) = report.soft_failure_summary() {
                warn!("{}", summary);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match e.downcast_ref::<WorkflowError>() {
            Some(failure) => {
                eprintln!("{}", failure);
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}
