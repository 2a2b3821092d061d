use std::sync::Arc;

use battler_wamprat::procedure::{
    Invocation,
    TypedProcedure,
};
use myapp_schema::{
    AppError1,
    AppError1Args,
    CompareInput,
    CompareOutput,
    Number,
};

use crate::{
    DeclaredError,
    ErrorMap,
    ProcedureError,
};

impl DeclaredError for AppError1 {
    const KIND: &'static str = "AppError1";
}

/// Fails with [`AppError1`], carrying `b - a`, if and only if `a < b`.
///
/// A difference too large to represent is reported as [`f64::MAX`].
pub(crate) fn compare(errors: &ErrorMap, a: f64, b: f64) -> Result<(), ProcedureError> {
    if a < b {
        return Err(ProcedureError::declared(
            errors,
            AppError1(AppError1Args {
                difference: Number((b - a).min(f64::MAX)),
            }),
        ));
    }
    Ok(())
}

pub(crate) struct Handler {
    pub errors: Arc<ErrorMap>,
}

impl TypedProcedure for Handler {
    type Input = CompareInput;
    type Output = CompareOutput;
    type Error = ProcedureError;

    async fn invoke(
        &self,
        _: Invocation,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        compare(&self.errors, input.0.a.value(), input.0.b.value())?;
        Ok(CompareOutput)
    }
}
