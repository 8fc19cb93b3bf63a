use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use cli::App;
use commands::Context;
use config::Config;

mod cli;
mod commands;
mod config;
mod logging;
mod transfer;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();
    logging::init(app.verbose);

    let config = Config::load(app.config.as_deref())?;
    let cancel = CancellationToken::new();

    // partial files stay valid resume points, so ctrl-c only stops the stream
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping after the current chunk");
            on_signal.cancel();
        }
    });

    let ctx = Context { config, cancel };
    commands::dispatch(app.cmd, &ctx).await
}
