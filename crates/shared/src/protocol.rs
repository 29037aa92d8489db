use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PERFORM_ADDITION_PATH: &str = "/performaddition";

/// Body of `POST /performaddition`. Operands travel as the raw input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionRequest {
    pub firstnumber: String,
    pub secondnumber: String,
}

impl AdditionRequest {
    pub fn new(firstnumber: impl Into<String>, secondnumber: impl Into<String>) -> Self {
        Self {
            firstnumber: firstnumber.into(),
            secondnumber: secondnumber.into(),
        }
    }
}

/// Decoded success body of the addition service.
///
/// Keeps whatever the `result` lookup produced; absent means the reply had no
/// such field (or was not a JSON object at all).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl AdditionReply {
    pub fn with_result(result: impl Into<Value>) -> Self {
        Self {
            result: Some(result.into()),
        }
    }

    /// Reads a success body without rejecting unexpected shapes.
    pub fn from_body(body: &[u8]) -> Self {
        let result = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| match value {
                Value::Object(mut fields) => fields.remove("result"),
                _ => None,
            });
        Self { result }
    }

    /// The sum as a number, if the reply carried something coercible to one.
    pub fn result_value(&self) -> Option<f64> {
        match self.result.as_ref()? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
