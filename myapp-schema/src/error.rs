use battler_wamp::core::error::WampError;
use battler_wamp_uri::Uri;
use battler_wamp_values::{
    Dictionary,
    List,
    Value,
    WampDeserializeError,
    WampSerializeError,
};
use battler_wamprat_message::WampApplicationMessage;
use thiserror::Error;

/// Common prefix of every application error URI owned by the backend.
pub const ERROR_URI_PREFIX: &str = "com.myapp.";

/// Raised by `compare` when `a < b`.
pub const ERROR1_URI: &str = "com.myapp.error1";

/// Raised by `checkname` for a reserved name.
pub const RESERVED_URI: &str = "com.myapp.error.reserved";

/// Raised by `checkname` for a name that is not uniformly cased.
pub const MIXED_CASE_URI: &str = "com.myapp.error.mixed_case";

/// Raised by `checkname` for a name of invalid length.
pub const INVALID_LENGTH_URI: &str = "com.myapp.error.invalid_length";

/// An application error, visible to callers.
///
/// Unlike generic runtime errors, application errors are a stable contract: a URI identifying the
/// error, plus positional and keyword arguments. No message is attached, so the payload delivered to
/// the caller is exactly the arguments given here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{uri}")]
pub struct ApplicationError {
    uri: Uri,
    arguments: List,
    arguments_keyword: Dictionary,
}

impl ApplicationError {
    /// Creates a new application error without any payload.
    pub fn new(uri: Uri) -> Self {
        Self {
            uri,
            arguments: List::default(),
            arguments_keyword: Dictionary::default(),
        }
    }

    /// Creates a new application error with the payload of an application message.
    pub fn with_payload<T>(uri: Uri, payload: T) -> Result<Self, WampSerializeError>
    where
        T: WampApplicationMessage,
    {
        let (arguments, arguments_keyword) = payload.wamp_serialize_application_message()?;
        Ok(Self {
            uri,
            arguments,
            arguments_keyword,
        })
    }

    /// Sets the positional arguments.
    pub fn with_arguments(mut self, arguments: List) -> Self {
        self.arguments = arguments;
        self
    }

    /// Sets the keyword arguments.
    pub fn with_arguments_keyword(mut self, arguments_keyword: Dictionary) -> Self {
        self.arguments_keyword = arguments_keyword;
        self
    }

    /// The error URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The positional arguments.
    pub fn arguments(&self) -> &List {
        &self.arguments
    }

    /// The keyword arguments.
    pub fn arguments_keyword(&self) -> &Dictionary {
        &self.arguments_keyword
    }

    /// Reads the payload as a typed application message.
    pub fn payload<T>(&self) -> Result<T, WampDeserializeError>
    where
        T: WampApplicationMessage,
    {
        T::wamp_deserialize_application_message(
            self.arguments.clone(),
            self.arguments_keyword.clone(),
        )
    }
}

impl Into<WampError> for ApplicationError {
    fn into(self) -> WampError {
        WampError::new_with_payload(self.uri, "", self.arguments, self.arguments_keyword)
    }
}

/// Message the peer assigns to an error received without one.
const MISSING_MESSAGE: &str = "unknown error";

impl From<WampError> for ApplicationError {
    fn from(value: WampError) -> Self {
        let mut arguments = value.arguments().clone();
        // A lone string argument is received as the message, and removed from the arguments.
        if arguments.is_empty() && !value.message().is_empty() && value.message() != MISSING_MESSAGE
        {
            arguments.push(Value::String(value.message().to_owned()));
        }
        Self {
            uri: value.reason().clone(),
            arguments,
            arguments_keyword: value.arguments_keyword().clone(),
        }
    }
}

#[cfg(test)]
mod error_test {
    use battler_wamp::core::error::WampError;
    use battler_wamp_uri::Uri;
    use battler_wamp_values::{
        Dictionary,
        List,
        Value,
    };

    use crate::{
        ApplicationError,
        InvalidLengthError,
        LengthBounds,
        MIXED_CASE_URI,
        MixedCaseArgs,
        MixedCaseError,
    };

    #[test]
    fn converts_to_wamp_error_without_message() {
        let error = ApplicationError::new(Uri::from_known("com.myapp.error.reserved"))
            .with_arguments(List::from_iter([Value::Integer(1)]));
        let error: WampError = error.into();
        assert_eq!(error.reason().as_ref(), "com.myapp.error.reserved");
        assert_eq!(error.message(), "");
        pretty_assertions::assert_eq!(error.arguments(), &List::from_iter([Value::Integer(1)]));
        assert!(error.arguments_keyword().is_empty());
    }

    #[test]
    fn serializes_typed_payload() {
        assert_matches::assert_matches!(
            ApplicationError::with_payload(
                Uri::from_known(MIXED_CASE_URI),
                MixedCaseError(MixedCaseArgs {
                    lower: "abc".to_owned(),
                    upper: "ABC".to_owned(),
                }),
            ),
            Ok(error) => {
                pretty_assertions::assert_eq!(
                    error.arguments(),
                    &List::from_iter([
                        Value::String("abc".to_owned()),
                        Value::String("ABC".to_owned()),
                    ])
                );
                assert!(error.arguments_keyword().is_empty());
            }
        );
    }

    #[test]
    fn reads_typed_payload() {
        let error = ApplicationError::new(Uri::from_known("com.myapp.error.invalid_length"))
            .with_arguments_keyword(Dictionary::from_iter([
                ("min".to_owned(), Value::Integer(3)),
                ("max".to_owned(), Value::Integer(10)),
            ]));
        assert_matches::assert_matches!(
            error.payload::<InvalidLengthError>(),
            Ok(InvalidLengthError(LengthBounds { min: 3, max: 10 }))
        );
        assert_matches::assert_matches!(error.payload::<MixedCaseError>(), Err(_));
    }

    #[test]
    fn converts_from_wamp_error() {
        let error = WampError::new_with_payload(
            Uri::from_known("com.myapp.error1"),
            "unknown error",
            List::from_iter([Value::Integer(1)]),
            Dictionary::default(),
        );
        pretty_assertions::assert_eq!(
            ApplicationError::from(error),
            ApplicationError::new(Uri::from_known("com.myapp.error1"))
                .with_arguments(List::from_iter([Value::Integer(1)]))
        );
    }

    #[test]
    fn restores_lone_string_argument_from_message() {
        let error = WampError::new_with_payload(
            Uri::from_known("com.myapp.error1"),
            "1.5",
            List::default(),
            Dictionary::default(),
        );
        pretty_assertions::assert_eq!(
            ApplicationError::from(error),
            ApplicationError::new(Uri::from_known("com.myapp.error1"))
                .with_arguments(List::from_iter([Value::String("1.5".to_owned())]))
        );
    }

    #[test]
    fn keeps_arguments_empty_without_message() {
        for message in ["", "unknown error"] {
            let error = WampError::new_with_payload(
                Uri::from_known("com.myapp.error.reserved"),
                message,
                List::default(),
                Dictionary::default(),
            );
            pretty_assertions::assert_eq!(
                ApplicationError::from(error),
                ApplicationError::new(Uri::from_known("com.myapp.error.reserved"))
            );
        }
    }
}
