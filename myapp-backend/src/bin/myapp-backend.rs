use std::time::Duration;

use anyhow::{
    Context,
    Result,
};
use battler_wamp::peer::{
    PeerConfig,
    new_web_socket_peer,
};
use battler_wamp_uri::Uri;
use battler_wamprat::peer::{
    PeerConnectionConfig,
    PeerConnectionType,
};
use clap::Parser;
use log::{
    error,
    info,
};
use myapp_backend::{
    BackendConfig,
    Modules,
    run_myapp_backend,
};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "myapp-backend",
    about = "Registers the myapp procedures on a WAMP router"
)]
struct Args {
    /// WebSocket URL of the router.
    #[arg(long, default_value = myapp_schema::DEFAULT_URL)]
    url: String,

    /// Realm to join.
    #[arg(long, default_value = myapp_schema::DEFAULT_REALM)]
    realm: String,

    /// Peer name, used in logs.
    #[arg(long, default_value = "myapp-backend")]
    name: String,

    /// Consecutive connection failures tolerated before giving up.
    #[arg(long, default_value_t = 3)]
    max_consecutive_failures: u32,

    /// Delay between connection attempts, in seconds.
    #[arg(long, default_value_t = 5)]
    reconnect_delay_secs: u64,
}

impl Args {
    fn backend_config(&self) -> Result<BackendConfig> {
        let mut connection = PeerConnectionConfig::new(PeerConnectionType::Remote(self.url.clone()));
        connection.max_consecutive_failures = self.max_consecutive_failures;
        connection.reconnect_delay = Duration::from_secs(self.reconnect_delay_secs);
        Ok(BackendConfig {
            connection,
            realm: Uri::try_from(self.realm.as_str())
                .with_context(|| format!("invalid realm {:?}", self.realm))?,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.backend_config()?;
    let peer = new_web_socket_peer(PeerConfig {
        name: args.name.clone(),
        ..Default::default()
    })?;

    let (stop_tx, stop_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for interrupt: {err}");
            // Dropping the sender would stop the backend.
            std::future::pending::<()>().await;
        }
        info!("Interrupted, stopping");
        stop_tx.send(()).ok();
    });

    info!("Connecting to {} on realm {}", args.url, args.realm);
    run_myapp_backend(
        config,
        peer,
        Modules {
            stop_rx: Some(stop_rx),
            started_tx: None,
        },
    )
    .await
}
