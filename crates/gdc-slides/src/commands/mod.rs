use anyhow::{Context as _, Result};
use gdc_api::GdcClient;
use gdc_transfer::ReqwestClient;
use tokio_util::sync::CancellationToken;

use crate::cli::Commands;
use crate::config::Config;
use crate::transfer::Downloader;

pub mod download;
pub mod fetch;
pub mod labels;
pub mod plan;
pub mod subtypes;

/// State shared by every subcommand.
pub struct Context {
    pub config: Config,
    pub cancel: CancellationToken,
}

impl Context {
    /// Metadata client and downloader sharing one connection pool.
    pub fn remote(&self) -> Result<(GdcClient, Downloader<ReqwestClient>)> {
        let http = self
            .config
            .client_setting()?
            .build()
            .context("failed to build http client")?;

        let api = GdcClient::new(http.clone(), self.config.api_base.clone());
        let downloader = Downloader::new(
            ReqwestClient::from_client(http),
            api.data_endpoint(),
            &self.config,
            self.cancel.clone(),
        );
        Ok((api, downloader))
    }
}

pub async fn dispatch(cmd: Commands, ctx: &Context) -> Result<()> {
    match cmd {
        Commands::Download(arg) => download::run(arg, ctx).await,
        Commands::Fetch(arg) => fetch::run(arg, ctx).await,
        Commands::Plan(arg) => plan::run(arg).await,
        Commands::Labels(arg) => labels::run(arg),
        Commands::Subtypes(arg) => subtypes::run(arg),
    }
}
