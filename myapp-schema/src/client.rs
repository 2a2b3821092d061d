use anyhow::{
    Error,
    Result,
};
use battler_wamp::core::error::WampError;
use battler_wamp_uri::Uri;
use battler_wamprat::peer::{
    CallOptions,
    PeerBuilder,
    PeerConnectionConfig,
    PeerHandle,
};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{
    ApplicationError,
    CHECK_NAME_PROCEDURE,
    COMPARE_PROCEDURE,
    CheckNameInput,
    CheckNameInputArgs,
    CheckNameOutput,
    CompareInput,
    CompareInputArgs,
    CompareOutput,
    ERROR_URI_PREFIX,
    Number,
    SQRT_PROCEDURE,
    SqrtInput,
    SqrtInputArgs,
    SqrtOutput,
};

/// An error resulting from calling a procedure through [`MyAppClient`].
#[derive(Debug, Error)]
pub enum CallError {
    /// An application error raised by the backend.
    #[error("application error: {0}")]
    Application(ApplicationError),
    /// Any other error, such as a generic runtime error or a connection failure.
    #[error(transparent)]
    Other(Error),
}

impl From<Error> for CallError {
    fn from(value: Error) -> Self {
        match value.downcast::<WampError>() {
            Ok(error) if error.reason().as_ref().starts_with(ERROR_URI_PREFIX) => {
                Self::Application(ApplicationError::from(error))
            }
            Ok(error) => Self::Other(Error::new(error)),
            Err(error) => Self::Other(error),
        }
    }
}

/// A typed consumer of the myapp backend procedures.
pub struct MyAppClient<S> {
    handle: PeerHandle<S>,
    join_handle: JoinHandle<()>,
}

impl<S> MyAppClient<S>
where
    S: Send + 'static,
{
    /// Starts the client in the background, connecting to the given realm.
    pub fn start(
        connection: PeerConnectionConfig,
        realm: Uri,
        peer: battler_wamp::peer::Peer<S>,
    ) -> Self {
        let mut builder = PeerBuilder::new(connection.connection_type);
        builder.connection_config_mut().max_consecutive_failures =
            connection.max_consecutive_failures;
        builder.connection_config_mut().reconnect_delay = connection.reconnect_delay;
        let (handle, join_handle) = builder.start(peer, realm);
        Self {
            handle,
            join_handle,
        }
    }

    /// The underlying peer handle, for untyped calls.
    pub fn handle(&self) -> &PeerHandle<S> {
        &self.handle
    }

    /// Waits until the client is connected to the router.
    pub async fn wait_until_ready(&self) -> Result<()> {
        self.handle.wait_until_ready().await
    }

    /// Stops the client, waiting for the peer to disconnect.
    pub async fn stop(self) -> Result<()> {
        self.handle.cancel()?;
        self.join_handle.await?;
        Ok(())
    }

    /// Calls `com.myapp.sqrt`.
    pub async fn sqrt(&self, x: f64) -> Result<f64, CallError> {
        let output = self
            .handle
            .call_and_wait::<SqrtInput, SqrtOutput>(
                Uri::from_known(SQRT_PROCEDURE),
                SqrtInput(SqrtInputArgs { x: Number(x) }),
                CallOptions::default(),
            )
            .await?;
        Ok(output.0.value.value())
    }

    /// Calls `com.myapp.checkname`.
    pub async fn check_name(&self, name: &str) -> Result<(), CallError> {
        self.handle
            .call_and_wait::<CheckNameInput, CheckNameOutput>(
                Uri::from_known(CHECK_NAME_PROCEDURE),
                CheckNameInput(CheckNameInputArgs {
                    name: name.to_owned(),
                }),
                CallOptions::default(),
            )
            .await?;
        Ok(())
    }

    /// Calls `com.myapp.compare`.
    pub async fn compare(&self, a: f64, b: f64) -> Result<(), CallError> {
        self.handle
            .call_and_wait::<CompareInput, CompareOutput>(
                Uri::from_known(COMPARE_PROCEDURE),
                CompareInput(CompareInputArgs {
                    a: Number(a),
                    b: Number(b),
                }),
                CallOptions::default(),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod client_test {
    use anyhow::Error;
    use battler_wamp::core::error::{
        BasicError,
        WampError,
    };
    use battler_wamp_uri::Uri;
    use battler_wamp_values::{
        Dictionary,
        List,
        Value,
    };

    use crate::CallError;

    #[test]
    fn decodes_application_errors_under_prefix() {
        let error = Error::new(WampError::new_with_payload(
            Uri::from_known("com.myapp.error1"),
            "unknown error",
            List::from_iter([Value::Integer(1)]),
            Dictionary::default(),
        ));
        assert_matches::assert_matches!(CallError::from(error), CallError::Application(error) => {
            assert_eq!(error.uri().as_ref(), "com.myapp.error1");
            pretty_assertions::assert_eq!(error.arguments(), &List::from_iter([Value::Integer(1)]));
        });
    }

    #[test]
    fn keeps_generic_errors_opaque() {
        let error = Error::new(WampError::new(
            Uri::from_known("com.battler_wamp.unknown_error"),
            "math domain error",
        ));
        assert_matches::assert_matches!(CallError::from(error), CallError::Other(error) => {
            assert_matches::assert_matches!(error.downcast::<WampError>(), Ok(error) => {
                assert_eq!(error.reason().as_ref(), "com.battler_wamp.unknown_error");
                assert_eq!(error.message(), "math domain error");
            });
        });

        let error: WampError = BasicError::Internal("oops".to_owned()).into();
        assert_matches::assert_matches!(CallError::from(Error::new(error)), CallError::Other(_));

        assert_matches::assert_matches!(
            CallError::from(Error::msg("connection lost")),
            CallError::Other(_)
        );
    }
}
