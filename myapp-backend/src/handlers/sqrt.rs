use anyhow::{
    Error,
    Result,
};
use battler_wamprat::procedure::{
    Invocation,
    TypedProcedure,
};
use myapp_schema::{
    Number,
    SqrtInput,
    SqrtOutput,
    SqrtOutputArgs,
};

use crate::ProcedureError;

/// Square root of `x`.
///
/// Zero and negative inputs fail with generic errors, which are never mapped to an application
/// error URI.
pub(crate) fn sqrt(x: f64) -> Result<f64> {
    if x == 0.0 {
        return Err(Error::msg("don't ask foolish questions;)"));
    }
    if x < 0.0 {
        return Err(Error::msg("math domain error"));
    }
    Ok(x.sqrt())
}

pub(crate) struct Handler;

impl TypedProcedure for Handler {
    type Input = SqrtInput;
    type Output = SqrtOutput;
    type Error = ProcedureError;

    async fn invoke(
        &self,
        _: Invocation,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        let value = sqrt(input.0.x.value())?;
        Ok(SqrtOutput(SqrtOutputArgs {
            value: Number(value),
        }))
    }
}
