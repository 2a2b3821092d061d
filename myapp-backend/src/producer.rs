use std::{
    sync::Arc,
    time::Duration,
};

use anyhow::{
    Error,
    Result,
};
use battler_wamp_uri::Uri;
use battler_wamprat::peer::{
    PeerBuilder,
    PeerHandle,
};
use log::{
    error,
    info,
    warn,
};
use myapp_schema::{
    AppError1,
    CHECK_NAME_PROCEDURE,
    COMPARE_PROCEDURE,
    ERROR1_URI,
    SQRT_PROCEDURE,
};
use tokio::sync::{
    broadcast,
    oneshot,
};

use crate::{
    BackendConfig,
    ErrorMap,
    ErrorMapError,
    handlers::{
        check_name,
        compare,
        sqrt,
    },
};

const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Optional hooks into the backend's lifecycle.
#[derive(Default)]
pub struct Modules {
    /// Stops the backend when a message is received or the channel is closed.
    ///
    /// If unset, the backend runs until the task is dropped.
    pub stop_rx: Option<broadcast::Receiver<()>>,
    /// Notified once all procedures are registered for the first time.
    pub started_tx: Option<oneshot::Sender<()>>,
}

/// Declares every error kind raised by the procedures.
pub fn declare_errors() -> Result<ErrorMap, ErrorMapError> {
    let mut errors = ErrorMap::new();
    errors.define::<AppError1>(Uri::from_known(ERROR1_URI))?;
    Ok(errors)
}

/// Runs the backend: declares errors, registers all procedures on the configured realm, and keeps
/// them registered across reconnections until stopped.
///
/// Fails if the first session cannot be established or any procedure fails to register.
pub async fn run_myapp_backend<S>(
    config: BackendConfig,
    peer: battler_wamp::peer::Peer<S>,
    modules: Modules,
) -> Result<()>
where
    S: Send + 'static,
{
    // Errors must be declared before any procedure that raises them is registered.
    let errors = Arc::new(declare_errors()?);
    for (kind, uri) in errors.declarations() {
        info!("Declared error {kind} as {uri}");
    }

    let mut builder = PeerBuilder::new(config.connection.connection_type);
    builder.connection_config_mut().max_consecutive_failures =
        config.connection.max_consecutive_failures;
    builder.connection_config_mut().reconnect_delay = config.connection.reconnect_delay;

    builder.add_procedure(Uri::from_known(SQRT_PROCEDURE), sqrt::Handler);
    builder.add_procedure(Uri::from_known(CHECK_NAME_PROCEDURE), check_name::Handler);
    builder.add_procedure(
        Uri::from_known(COMPARE_PROCEDURE),
        compare::Handler {
            errors: errors.clone(),
        },
    );

    let (handle, mut join_handle) = builder.start(peer, config.realm.clone());

    if let Err(err) = handle.wait_until_ready().await {
        // The peer retries in the background, so it must be torn down here.
        handle.cancel().ok();
        join_handle.abort();
        return Err(err.context(format!(
            "failed to register procedures on realm {}",
            config.realm
        )));
    }
    log_ready(&handle, &config.realm).await;

    if let Some(started_tx) = modules.started_tx {
        started_tx.send(()).ok();
    }

    let result = run_myapp_backend_internal(&handle, &config.realm, modules.stop_rx).await;

    handle.cancel()?;
    // A peer waiting to reconnect does not observe cancellation.
    match tokio::time::timeout(STOP_TIMEOUT, &mut join_handle).await {
        Ok(joined) => joined?,
        Err(_) => {
            warn!("Peer did not stop within {STOP_TIMEOUT:?}, aborting it");
            join_handle.abort();
        }
    }
    info!("Backend stopped");
    result
}

async fn run_myapp_backend_internal<S>(
    handle: &PeerHandle<S>,
    realm: &Uri,
    mut stop_rx: Option<broadcast::Receiver<()>>,
) -> Result<()>
where
    S: Send + 'static,
{
    let mut session_finished_rx = handle.session_finished_rx();
    let mut ready = true;
    loop {
        if ready {
            tokio::select! {
                _ = stopped(&mut stop_rx) => break,
                result = session_finished_rx.recv() => match result {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        warn!("Session on realm {realm} finished, waiting for reconnection");
                        ready = false;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(Error::msg("peer stopped unexpectedly"));
                    }
                },
            }
        } else {
            tokio::select! {
                _ = stopped(&mut stop_rx) => break,
                result = handle.wait_until_ready() => match result {
                    Ok(()) => {
                        log_ready(handle, realm).await;
                        ready = true;
                    }
                    Err(err) => error!("Failed to restore session on realm {realm}: {err:#}"),
                },
            }
        }
    }
    Ok(())
}

async fn stopped(stop_rx: &mut Option<broadcast::Receiver<()>>) {
    match stop_rx {
        Some(stop_rx) => {
            stop_rx.recv().await.ok();
        }
        None => std::future::pending().await,
    }
}

async fn log_ready<S>(handle: &PeerHandle<S>, realm: &Uri)
where
    S: Send + 'static,
{
    match handle.current_session_id().await {
        Some(id) => info!("Session {id} attached to realm {realm}"),
        None => info!("Session attached to realm {realm}"),
    }
    info!("Procedures registered on realm {realm}");
}
