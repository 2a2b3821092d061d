use anyhow::Result;
use battler_wamp::router::{
    EmptyConnectionPolicies,
    EmptyPubSubPolicies,
    EmptyRpcPolicies,
    RealmAuthenticationConfig,
    RealmConfig,
    RouterConfig,
    RouterHandle,
    new_web_socket_router,
};
use battler_wamp_uri::Uri;
use tokio::task::JoinHandle;

/// Starts an in-process WebSocket router serving a single realm without authentication.
///
/// Port 0 picks any free port. Tests that restart the router must pass a stable port so that
/// peers can reconnect.
pub async fn start_router(realm: &str, port: u16) -> Result<(RouterHandle, JoinHandle<()>)> {
    let mut config = RouterConfig::default();
    config.port = port;
    config.realms.push(RealmConfig {
        name: realm.to_owned(),
        uri: Uri::try_from(realm)?,
        authentication: RealmAuthenticationConfig::default(),
    });
    let router = new_web_socket_router(
        config,
        Box::new(EmptyConnectionPolicies::default()),
        Box::new(EmptyPubSubPolicies::default()),
        Box::new(EmptyRpcPolicies::default()),
    )?;
    router.start().await
}

/// The WebSocket URL peers use to reach a router started by [`start_router`].
pub fn router_url(router_handle: &RouterHandle) -> String {
    format!("ws://{}", router_handle.local_addr())
}
