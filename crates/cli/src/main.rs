use clap::Parser;
use mgosrv_services::{ConfiguredService, MongoService, MongoSession, Service};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Starts a MongoDB service from configuration, pings through a session and stops it.
#[derive(Debug, Parser)]
#[command(name = "mgosrv-check", version)]
struct Args {
    /// Configuration file layered on top of config/mongo.*
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix of the environment variables to read, e.g. MGOSRV__ADDRESSES
    #[arg(long, default_value = mgosrv_config::DEFAULT_ENV_PREFIX)]
    prefix: String,

    /// Restart the service once before pinging
    #[arg(long)]
    restart: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mgosrv_services=debug,mgosrv_db=debug,mgosrv_check=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut service = ConfiguredService::new(MongoService::new()).with_prefix(args.prefix);
    if let Some(path) = args.config {
        service = service.with_file(path);
    }

    service.reload_configuration().await?;
    info!(configuration = ?service.configuration(), "Configuration loaded");

    service.start().await?;
    if args.restart {
        service.restart().await?;
    }

    let result = service
        .run_with_session(async |session: &mut MongoSession| -> anyhow::Result<()> {
            session.ping().await?;
            Ok(())
        })
        .await;

    service.stop().await?;

    match result {
        Ok(()) => {
            info!("MongoDB answered the ping");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "Ping through session failed");
            Err(err)
        }
    }
}
