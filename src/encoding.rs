//! Payloads handed to a renderer.
//!
//! Every recordable type implements [`Serializable`], which produces a
//! JSON payload without recording anything. [`encode`] turns a payload
//! into bytes in one of the supported encodings.

use crate::error::{EngineError, Result};
use crate::state::{State, StateSet};
use crate::structures::{TrackedString, Variable};
use serde::{Deserialize, Serialize};

/// Payload encoding format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadEncoding {
    #[default]
    Json,
    MessagePack,
}

/// A value that can be turned into a renderer payload.
pub trait Serializable {
    fn to_payload(&self) -> Result<serde_json::Value>;
}

/// Produce the payload for `value`.
pub fn serialize<T: Serializable + ?Sized>(value: &T) -> Result<serde_json::Value> {
    value.to_payload()
}

/// Produce the payload for `value` and encode it.
pub fn encode<T: Serializable + ?Sized>(value: &T, encoding: PayloadEncoding) -> Result<Vec<u8>> {
    let payload = value.to_payload()?;
    match encoding {
        PayloadEncoding::Json => Ok(serde_json::to_vec(&payload)?),
        PayloadEncoding::MessagePack => Ok(rmp_serde::to_vec_named(&payload)?),
    }
}

/// Wire form of a whole set.
#[derive(Serialize, Deserialize)]
struct SetPayload {
    states: Vec<State>,
    autoplay: Option<bool>,
}

/// Read back the states of an encoded [`StateSet`] payload, in order.
pub fn decode_states(bytes: &[u8], encoding: PayloadEncoding) -> Result<Vec<State>> {
    let payload: SetPayload = match encoding {
        PayloadEncoding::Json => serde_json::from_slice(bytes)
            .map_err(|e| EngineError::Deserialization(e.to_string()))?,
        PayloadEncoding::MessagePack => rmp_serde::from_slice(bytes)?,
    };
    Ok(payload.states)
}

impl Serializable for State {
    fn to_payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serializable for StateSet {
    fn to_payload(&self) -> Result<serde_json::Value> {
        let payload = SetPayload {
            states: self.states(),
            autoplay: self.autoplay(),
        };
        Ok(serde_json::to_value(payload)?)
    }
}

impl<T: Serialize> Serializable for Variable<T> {
    fn to_payload(&self) -> Result<serde_json::Value> {
        let value = serde_json::to_value(self.value())?;
        Ok(serde_json::json!({
            "id": serde_json::Value::from(self.id()),
            "variable_name": self.name(),
            "value": value,
        }))
    }
}

impl Serializable for TrackedString {
    fn to_payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "id": serde_json::Value::from(self.id()),
            "variable_name": self.name(),
            "body": self.body(),
        }))
    }
}
