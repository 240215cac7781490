use anyhow::Context;

use docroot::config::Config;
use docroot::log::{Event, EventLog, FileLog};
use docroot::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load(std::env::args().skip(1)).context("invalid configuration")?;

    let log = FileLog::create(&cfg.log.path)
        .with_context(|| format!("cannot create event log {}", cfg.log.path.display()))?;
    log.record(&Event::ApplicationStarted);

    tracing::info!(
        root = %cfg.server.web_root.display(),
        log = %log.path().display(),
        "Serving"
    );

    tokio::select! {
        res = server::listener::run(&cfg, &log) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
