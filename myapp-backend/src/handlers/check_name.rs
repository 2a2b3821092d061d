use battler_wamp_uri::Uri;
use battler_wamp_values::Integer;
use battler_wamprat::procedure::{
    Invocation,
    TypedProcedure,
};
use myapp_schema::{
    ApplicationError,
    CheckNameInput,
    CheckNameOutput,
    INVALID_LENGTH_URI,
    InvalidLengthError,
    LengthBounds,
    MIXED_CASE_URI,
    MixedCaseArgs,
    MixedCaseError,
    RESERVED_URI,
};

use crate::ProcedureError;

const RESERVED_NAMES: [&str; 2] = ["foo", "bar"];
const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 10;

/// Validates a name. Checks run in order and the first failure is reported.
pub(crate) fn check_name(name: &str) -> Result<(), ProcedureError> {
    if RESERVED_NAMES.contains(&name) {
        return Err(ApplicationError::new(Uri::from_known(RESERVED_URI)).into());
    }

    let lower = name.to_lowercase();
    let upper = name.to_uppercase();
    if name != lower && name != upper {
        return Err(ApplicationError::with_payload(
            Uri::from_known(MIXED_CASE_URI),
            MixedCaseError(MixedCaseArgs { lower, upper }),
        )?
        .into());
    }

    // Length is counted in characters, not bytes.
    let length = name.chars().count();
    if length < MIN_LENGTH || length > MAX_LENGTH {
        return Err(ApplicationError::with_payload(
            Uri::from_known(INVALID_LENGTH_URI),
            InvalidLengthError(LengthBounds {
                min: MIN_LENGTH as Integer,
                max: MAX_LENGTH as Integer,
            }),
        )?
        .into());
    }

    Ok(())
}

pub(crate) struct Handler;

impl TypedProcedure for Handler {
    type Input = CheckNameInput;
    type Output = CheckNameOutput;
    type Error = ProcedureError;

    async fn invoke(
        &self,
        _: Invocation,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        check_name(&input.0.name)?;
        Ok(CheckNameOutput)
    }
}
