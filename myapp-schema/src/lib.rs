//! WAMP schema for the myapp backend.
//!
//! Contains the procedure URIs registered by the backend, the application messages they exchange,
//! and the application errors they raise.

mod client;
mod error;
mod number;

use battler_wamp_values::{
    Integer,
    WampDictionary,
    WampList,
};
use battler_wamprat_message::WampApplicationMessage;
pub use client::{
    CallError,
    MyAppClient,
};
pub use error::{
    ApplicationError,
    ERROR_URI_PREFIX,
    ERROR1_URI,
    INVALID_LENGTH_URI,
    MIXED_CASE_URI,
    RESERVED_URI,
};
pub use number::Number;

/// Default router URL.
pub const DEFAULT_URL: &str = "ws://127.0.0.1:8080/ws";

/// Default realm.
pub const DEFAULT_REALM: &str = "realm1";

pub const SQRT_PROCEDURE: &str = "com.myapp.sqrt";
pub const CHECK_NAME_PROCEDURE: &str = "com.myapp.checkname";
pub const COMPARE_PROCEDURE: &str = "com.myapp.compare";

#[derive(Debug, PartialEq, WampList)]
pub struct SqrtInputArgs {
    pub x: Number,
}

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct SqrtInput(#[arguments] pub SqrtInputArgs);

#[derive(Debug, PartialEq, WampList)]
pub struct SqrtOutputArgs {
    pub value: Number,
}

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct SqrtOutput(#[arguments] pub SqrtOutputArgs);

#[derive(Debug, PartialEq, WampList)]
pub struct CheckNameInputArgs {
    pub name: String,
}

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct CheckNameInput(#[arguments] pub CheckNameInputArgs);

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct CheckNameOutput;

#[derive(Debug, PartialEq, WampList)]
pub struct CompareInputArgs {
    pub a: Number,
    pub b: Number,
}

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct CompareInput(#[arguments] pub CompareInputArgs);

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct CompareOutput;

/// Payload of [`ERROR1_URI`]: how far `a` falls short of `b`.
#[derive(Debug, PartialEq, WampList)]
pub struct AppError1Args {
    pub difference: Number,
}

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct AppError1(#[arguments] pub AppError1Args);

/// Payload of [`MIXED_CASE_URI`]: the name in lowercase and in uppercase.
#[derive(Debug, PartialEq, WampList)]
pub struct MixedCaseArgs {
    pub lower: String,
    pub upper: String,
}

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct MixedCaseError(#[arguments] pub MixedCaseArgs);

/// Payload of [`INVALID_LENGTH_URI`]: inclusive bounds on the name length.
#[derive(Debug, PartialEq, WampDictionary)]
pub struct LengthBounds {
    pub min: Integer,
    pub max: Integer,
}

#[derive(Debug, PartialEq, WampApplicationMessage)]
pub struct InvalidLengthError(#[arguments_keyword] pub LengthBounds);
