use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use panchangam_backend::config::Config;
use panchangam_backend::presenter::StdoutPresenter;
use panchangam_backend::scheduler::RefreshScheduler;

#[tokio::main]
async fn main() -> ExitCode {
    // Menu payloads go to stdout; keep logs on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().await;
    let (scheduler, handle) = RefreshScheduler::new(config, Arc::new(StdoutPresenter));

    // The frontend drives wake and manual-refresh triggers over stdin,
    // one command per line.
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match line.trim() {
                "refresh" => handle.manual_refresh(),
                "wake" => handle.wake(),
                "" => {}
                other => warn!(command = %other, "Unknown trigger command"),
            }
        }
        info!("Trigger input closed");
    });

    match scheduler.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "Scheduler stopped");
            ExitCode::FAILURE
        }
    }
}
