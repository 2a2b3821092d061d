use std::fmt::Display;

use battler_wamp_values::{
    Integer,
    Value,
    WampDeserialize,
    WampDeserializeError,
    WampSerialize,
    WampSerializeError,
};

/// 2^53, the largest integer below which every integer is exactly representable as an `f64`.
const MAX_EXACT_INTEGER: f64 = 9007199254740992.0;

/// A real number exchanged in WAMP application messages.
///
/// WAMP values only carry unsigned integers. Finite, non-negative integral numbers (up to 2^53)
/// are sent as [`Value::Integer`]. Every other finite number is sent as a decimal
/// [`Value::String`]. Both forms are accepted when deserializing.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Number(pub f64);

impl Number {
    /// The underlying floating point value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Integer> for Number {
    fn from(value: Integer) -> Self {
        Self(value as f64)
    }
}

impl From<Number> for f64 {
    fn from(value: Number) -> Self {
        value.0
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl WampSerialize for Number {
    fn wamp_serialize(self) -> Result<Value, WampSerializeError> {
        if !self.0.is_finite() {
            return Err(WampSerializeError::new(format!(
                "{} is not a finite number",
                self.0
            )));
        }
        if self.0 >= 0.0 && self.0.fract() == 0.0 && self.0 <= MAX_EXACT_INTEGER {
            return Ok(Value::Integer(self.0 as Integer));
        }
        Ok(Value::String(self.0.to_string()))
    }
}

impl WampDeserialize for Number {
    fn wamp_deserialize(value: Value) -> Result<Self, WampDeserializeError> {
        let number = match value {
            Value::Integer(value) => value as f64,
            Value::String(value) => value.trim().parse::<f64>().map_err(|err| {
                WampDeserializeError::new(format!("invalid number {value:?}: {err}"))
            })?,
            _ => return Err(WampDeserializeError::new("value must be a number")),
        };
        if !number.is_finite() {
            return Err(WampDeserializeError::new(format!(
                "{number} is not a finite number"
            )));
        }
        Ok(Self(number))
    }
}
