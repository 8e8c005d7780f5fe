//! Decision request (JSON) and its validated form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, RemedyError};
use crate::model::{Environment, EventType};

/// Decision request as received on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionRequest {
    /// One of `dev`, `stage`, `prod`.
    pub environment: String,
    /// One of `crash`, `overload`, `false_failure`.
    pub event_type: String,
    /// Opaque key-value payload; a missing key means `{}`, an explicit `null` is kept.
    #[serde(default = "empty_object")]
    pub event_data: Value,
}

/// Boundary-validated request, safe to hand to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionInput {
    pub environment: Environment,
    pub event_type: EventType,
    pub event_data: Value,
}

impl DecisionRequest {
    pub fn new(environment: impl Into<String>, event_type: impl Into<String>, event_data: Value) -> Self {
        Self {
            environment: environment.into(),
            event_type: event_type.into(),
            event_data,
        }
    }

    /// Parse a JSON body and validate it in one step.
    pub fn decode(bytes: &[u8]) -> Result<DecisionInput> {
        let req: DecisionRequest = serde_json::from_slice(bytes)
            .map_err(|e| RemedyError::BadRequest(format!("invalid decision request: {e}")))?;
        req.validate()
    }

    pub fn validate(self) -> Result<DecisionInput> {
        let environment = self.environment.parse::<Environment>()?;
        let event_type = self.event_type.parse::<EventType>()?;

        let event_data = match self.event_data {
            v @ (Value::Null | Value::Object(_)) => v,
            other => {
                return Err(RemedyError::BadRequest(format!(
                    "event_data must be an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        Ok(DecisionInput {
            environment,
            event_type,
            event_data,
        })
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_event_data_becomes_empty_object() {
        let input = DecisionRequest::decode(br#"{"environment":"stage","event_type":"crash"}"#).unwrap();
        assert_eq!(input.environment, Environment::Stage);
        assert_eq!(input.event_data, json!({}));
    }

    #[test]
    fn null_event_data_is_echoed_as_null() {
        let input =
            DecisionRequest::decode(br#"{"environment":"dev","event_type":"overload","event_data":null}"#)
                .unwrap();
        assert_eq!(input.event_data, Value::Null);
    }

    #[test]
    fn array_event_data_is_rejected() {
        let err = DecisionRequest::new("dev", "crash", json!([1, 2])).validate().unwrap_err();
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
        assert!(err.to_string().contains("got array"));
    }

    #[test]
    fn environment_checked_before_event_type() {
        let err = DecisionRequest::new("qa", "meltdown", json!({})).validate().unwrap_err();
        assert_eq!(err.client_code().as_str(), "UNKNOWN_ENVIRONMENT");
    }
}
