//! session-debug - exports an in-memory player over MPRIS.
//!
//! Loads the catalog from the configuration file and serves it as a media
//! session, so desktop controllers (playerctl, shell widgets, lock screens)
//! can drive it and the published state can be inspected.

use std::{error::Error, path::PathBuf, sync::Arc};

use clap::Parser;
use mediasession::{
    config::Config,
    services::{
        CatalogPreparer, ExecutionContext, MemoryPlayer, MprisSession, SessionConnector,
        TimelineQueueNavigator, session::MediaItem,
    },
    tracing_config,
};
use tracing::{Level, error, info, span};

#[derive(Parser)]
#[command(name = "session-debug")]
#[command(about = "Serve a catalog as an MPRIS media session")]
struct Cli {
    /// Configuration file to load instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the MPRIS bus name suffix
    #[arg(short, long)]
    bus_name: Option<String>,

    /// Also write logs to the rotating log file
    #[arg(long)]
    log_file: bool,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    print_schema: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.print_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(bus_name) = cli.bus_name {
        config.session.bus_name = bus_name;
    }

    let _guard = if cli.log_file {
        Some(tracing_config::init_with_file(config.general.log_level)?)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };
    let _span = span!(Level::INFO, "session_debug").entered();

    let catalog: Vec<MediaItem> = config.catalog.iter().map(MediaItem::from).collect();
    info!(items = catalog.len(), "Catalog loaded");

    let session = Arc::new(MprisSession::start(&config.session).await?);
    if let Some(unique_name) = session.connection().unique_name() {
        info!(%unique_name, "Connected to session bus");
    }

    let context = ExecutionContext::MAIN;
    let player = Arc::new(MemoryPlayer::new(context));
    let preparer = Arc::new(CatalogPreparer::new(Arc::clone(&player), catalog));

    let mut connector = SessionConnector::new(
        context,
        session.clone(),
        preparer,
        Arc::new(TimelineQueueNavigator::new()),
    );
    connector.set_player(Some(player))?;

    let handle = connector.handle();
    let connector_task = tokio::spawn(connector.run());

    tokio::signal::ctrl_c().await?;
    info!("Interrupted, shutting down");

    if let Err(e) = handle.shutdown() {
        error!(error = %e, "Connector already stopped");
    }
    connector_task.await?;

    let final_status = session.state().playback_state().map(|state| state.status);
    info!(?final_status, "Session closed");

    Ok(())
}
