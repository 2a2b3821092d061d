use battler_wamp_uri::Uri;
use battler_wamp_values::WampSerializeError;
use battler_wamprat_message::WampApplicationMessage;
use myapp_schema::ApplicationError;
use thiserror::Error;

/// A local error kind that procedures raise as an application error.
///
/// The error value itself is the payload (positional and keyword arguments). The URI it is sent
/// under is not known to the error: it is declared once in an [`ErrorMap`] at startup.
pub trait DeclaredError: WampApplicationMessage {
    /// Stable name identifying the error kind.
    const KIND: &'static str;
}

/// An error resulting from declaring or raising a [`DeclaredError`].
#[derive(Debug, Error)]
pub enum ErrorMapError {
    #[error("error kind {kind} is already declared as {existing}, cannot redeclare it as {requested}")]
    Conflict {
        kind: &'static str,
        existing: Uri,
        requested: Uri,
    },
    #[error("error kind {0} was raised without being declared")]
    Undeclared(&'static str),
    #[error("failed to serialize payload of error kind {kind}")]
    Payload {
        kind: &'static str,
        #[source]
        error: WampSerializeError,
    },
}

/// Table of declared error kinds and the URIs they are sent under.
///
/// Built once before any procedure is registered, then shared read-only with the handlers.
#[derive(Debug, Default)]
pub struct ErrorMap {
    uris: ahash::HashMap<&'static str, Uri>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the URI of an error kind.
    ///
    /// Declaring the same kind under the same URI again has no effect.
    pub fn define<E>(&mut self, uri: Uri) -> Result<(), ErrorMapError>
    where
        E: DeclaredError,
    {
        match self.uris.get(E::KIND) {
            Some(existing) if *existing == uri => Ok(()),
            Some(existing) => Err(ErrorMapError::Conflict {
                kind: E::KIND,
                existing: existing.clone(),
                requested: uri,
            }),
            None => {
                self.uris.insert(E::KIND, uri);
                Ok(())
            }
        }
    }

    /// The URI an error kind is declared under.
    pub fn uri_for<E>(&self) -> Option<&Uri>
    where
        E: DeclaredError,
    {
        self.uris.get(E::KIND)
    }

    /// Declared kinds, with their URIs.
    pub fn declarations(&self) -> impl Iterator<Item = (&'static str, &Uri)> {
        self.uris.iter().map(|(kind, uri)| (*kind, uri))
    }

    /// Converts a raised error into the application error visible to the caller.
    pub fn map<E>(&self, error: E) -> Result<ApplicationError, ErrorMapError>
    where
        E: DeclaredError,
    {
        let uri = self
            .uri_for::<E>()
            .ok_or(ErrorMapError::Undeclared(E::KIND))?;
        ApplicationError::with_payload(uri.clone(), error).map_err(|error| {
            ErrorMapError::Payload {
                kind: E::KIND,
                error,
            }
        })
    }
}
