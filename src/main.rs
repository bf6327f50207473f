mod cli;
mod commands;
mod error;
mod logging;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use devbyte_cache::DatabaseProvider;
use devbyte_config::Config;
use devbyte_library::VideosRepository;
use devbyte_network::{HttpPlaylistSource, SourceHandle};
use exn::ResultExt;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let provider = DatabaseProvider::new(config.data_dir().or_raise(|| ErrorKind::Config)?);
    let db = provider.get().await.or_raise(|| ErrorKind::Database)?;
    let source: SourceHandle = Arc::new(
        HttpPlaylistSource::new(&config.network.playlist_url, config.network.timeout())
            .or_raise(|| ErrorKind::Network)?,
    );
    let repository = VideosRepository::new(&db, source).with_prune_stale(config.cache.prune_stale);

    let mut out = std::io::stdout();
    let result = match cli.command {
        Command::Refresh => commands::refresh(&repository, &mut out).await,
        Command::List { full } => commands::list(&repository, full, &mut out).await,
        Command::Watch { refresh } => {
            let shutdown = async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::warn!(%err, "could not listen for ctrl-c");
                    std::future::pending::<()>().await;
                }
            };
            commands::watch(&repository, refresh, &mut out, shutdown).await
        },
    };
    db.close().await;
    result
}
