use crate::{BusError, BusErrorResult, EventType, is_refresh_event};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied fields carried next to `type` and `timestamp`
pub type Payload = Map<String, Value>;

pub const TYPE_KEY: &str = "type";
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Serialize caller data into a payload; anything but a JSON object is refused.
pub(crate) fn payload_from<T: Serialize>(data: &T) -> BusErrorResult<Payload> {
    match serde_json::to_value(data)? {
        Value::Object(payload) => Ok(payload),
        other => Err(BusError::payload_not_object(&other)),
    }
}

/// One update notification.
///
/// On the wire this is a flat JSON object:
/// `{"type": "...", "timestamp": "<RFC 3339>", ...payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastMessage {
    #[serde(rename = "type")]
    event_type: String,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    payload: Payload,
}

impl BroadcastMessage {
    /// Stamp a message with the current time.
    ///
    /// Payload fields are applied after `type` and `timestamp`, so a
    /// colliding key overrides them: a string `type` replaces the event type
    /// and an RFC 3339 `timestamp` replaces the send time. Reserved keys with
    /// unusable values are dropped.
    pub fn new(event_type: impl Into<String>, payload: Payload) -> Self {
        Self::with_timestamp(event_type, Utc::now(), payload)
    }

    pub fn with_timestamp(
        event_type: impl Into<String>,
        timestamp: DateTime<Utc>,
        mut payload: Payload,
    ) -> Self {
        let mut event_type = event_type.into();
        let mut timestamp = timestamp;

        match payload.remove(TYPE_KEY) {
            Some(Value::String(overridden)) => event_type = overridden,
            Some(other) => log::warn!(
                "Dropping non-string '{}' payload field on {} message: {}",
                TYPE_KEY,
                event_type,
                other
            ),
            None => {}
        }

        if let Some(value) = payload.remove(TIMESTAMP_KEY) {
            match value
                .as_str()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            {
                Some(parsed) => timestamp = parsed.with_timezone(&Utc),
                None => log::warn!(
                    "Dropping unparseable '{}' payload field on {} message: {}",
                    TIMESTAMP_KEY,
                    event_type,
                    value
                ),
            }
        }

        Self {
            event_type,
            timestamp,
            payload,
        }
    }

    /// Build a message from serializable caller data, which must serialize
    /// to a JSON object.
    pub fn from_serializable<T: Serialize>(
        event_type: impl Into<String>,
        data: &T,
    ) -> BusErrorResult<Self> {
        payload_from(data).map(|payload| Self::new(event_type, payload))
    }

    /// Parse a wire object. The object must carry a string `type`; a missing
    /// or unparseable `timestamp` is stamped with the receive time.
    pub fn from_value(value: Value) -> BusErrorResult<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => return Err(BusError::payload_not_object(&other)),
        };

        let event_type = match object.remove(TYPE_KEY) {
            Some(Value::String(event_type)) => event_type,
            Some(other) => {
                return Err(BusError::invalid_message(format!(
                    "'{TYPE_KEY}' must be a string, got {other}"
                )));
            }
            None => {
                return Err(BusError::invalid_message(format!(
                    "missing '{TYPE_KEY}' field"
                )));
            }
        };

        Ok(Self::new(event_type, object))
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Catalog kind, if the type is one the application knows
    pub fn known_type(&self) -> Option<EventType> {
        self.event_type.parse().ok()
    }

    pub fn is_refresh(&self) -> bool {
        is_refresh_event(&self.event_type)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn to_json(&self) -> BusErrorResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
