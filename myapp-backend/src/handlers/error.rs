use anyhow::Error;
use battler_wamp::core::error::{
    BasicError,
    WampError,
};
use battler_wamp_values::WampSerializeError;
use log::error;
use myapp_schema::ApplicationError;
use thiserror::Error;

use crate::{
    DeclaredError,
    ErrorMap,
};

/// An error raised by a procedure, local to a single invocation.
#[derive(Debug, Error)]
pub enum ProcedureError {
    /// An application error, sent to the caller with its URI and arguments intact.
    #[error(transparent)]
    Application(#[from] ApplicationError),
    /// A generic runtime error, sent to the caller under a library-defined URI with its message.
    #[error(transparent)]
    Runtime(#[from] Error),
}

impl ProcedureError {
    /// Raises a declared error kind under the URI it was declared with.
    ///
    /// An undeclared kind is a programming error. It is logged and reported to the caller as an
    /// internal error.
    pub fn declared<E>(errors: &ErrorMap, error: E) -> Self
    where
        E: DeclaredError,
    {
        match errors.map(error) {
            Ok(error) => Self::Application(error),
            Err(err) => {
                error!("Failed to raise declared error: {err:#}");
                Self::Runtime(Error::new(BasicError::Internal(err.to_string())))
            }
        }
    }
}

impl From<WampSerializeError> for ProcedureError {
    fn from(value: WampSerializeError) -> Self {
        Self::Runtime(Error::new(value))
    }
}

impl Into<WampError> for ProcedureError {
    fn into(self) -> WampError {
        match self {
            Self::Application(error) => error.into(),
            Self::Runtime(error) => error.into(),
        }
    }
}

#[cfg(test)]
mod procedure_error_test {
    use anyhow::Error;
    use battler_wamp::core::error::WampError;
    use battler_wamp_uri::Uri;
    use battler_wamp_values::{
        List,
        Value,
    };
    use myapp_schema::{
        AppError1,
        AppError1Args,
        ApplicationError,
        Number,
    };

    use crate::{
        ErrorMap,
        ProcedureError,
        declare_errors,
    };

    #[test]
    fn runtime_error_uses_generic_uri_and_message() {
        let error: WampError = ProcedureError::Runtime(Error::msg("math domain error")).into();
        assert_eq!(error.reason().as_ref(), "com.battler_wamp.unknown_error");
        assert_eq!(error.message(), "math domain error");
    }

    #[test]
    fn application_error_keeps_uri_and_arguments() {
        let error: WampError = ProcedureError::Application(
            ApplicationError::new(Uri::from_known("com.myapp.error.reserved"))
                .with_arguments(List::from_iter([Value::Integer(2)])),
        )
        .into();
        assert_eq!(error.reason().as_ref(), "com.myapp.error.reserved");
        assert_eq!(error.message(), "");
        pretty_assertions::assert_eq!(error.arguments(), &List::from_iter([Value::Integer(2)]));
    }

    #[test]
    fn declared_error_maps_through_error_map() {
        let errors = declare_errors().unwrap();
        let error = ProcedureError::declared(
            &errors,
            AppError1(AppError1Args {
                difference: Number(3.0),
            }),
        );
        assert_matches::assert_matches!(error, ProcedureError::Application(error) => {
            assert_eq!(error.uri().as_ref(), "com.myapp.error1");
            pretty_assertions::assert_eq!(error.arguments(), &List::from_iter([Value::Integer(3)]));
        });
    }

    #[test]
    fn undeclared_error_is_internal() {
        let error = ProcedureError::declared(
            &ErrorMap::new(),
            AppError1(AppError1Args {
                difference: Number(3.0),
            }),
        );
        assert_matches::assert_matches!(&error, ProcedureError::Runtime(_));
        let error: WampError = error.into();
        assert_eq!(error.reason().as_ref(), "wamp.error.internal");
    }
}
