use battler_wamp_uri::Uri;
use battler_wamprat::peer::{
    PeerConnectionConfig,
    PeerConnectionType,
};

/// Configuration for running the backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Connection to the router, including reconnection behavior.
    pub connection: PeerConnectionConfig,
    /// Realm the procedures are registered on.
    pub realm: Uri,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            connection: PeerConnectionConfig::new(PeerConnectionType::Remote(
                myapp_schema::DEFAULT_URL.to_owned(),
            )),
            realm: Uri::from_known(myapp_schema::DEFAULT_REALM),
        }
    }
}
