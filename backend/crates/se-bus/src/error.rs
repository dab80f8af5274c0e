use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BusError {
    #[error("Channel hub is shut down {location}")]
    HubClosed { location: ErrorLocation },

    #[error("Channel limit exceeded: {current} channels (max: {max}) {location}")]
    ChannelLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Handle limit exceeded on channel {channel}: {current} handles (max: {max}) {location}")]
    HandleLimitExceeded {
        channel: String,
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Invalid channel name: {message} {location}")]
    InvalidChannelName {
        message: String,
        location: ErrorLocation,
    },

    #[error("Channel hub lock poisoned {location}")]
    LockPoisoned { location: ErrorLocation },

    #[error("No async runtime available to run the subscriber {location}")]
    NoRuntime { location: ErrorLocation },

    #[error("Payload serialization failed: {source} {location}")]
    PayloadSerialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Payload must be a JSON object, got {kind} {location}")]
    PayloadNotObject {
        kind: &'static str,
        location: ErrorLocation,
    },

    #[error("Invalid message: {message} {location}")]
    InvalidMessage {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown event type: {value} {location}")]
    UnknownEventType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Receiver lagged, missed {missed_count} messages {location}")]
    Lagged {
        missed_count: u64,
        location: ErrorLocation,
    },
}

impl BusError {
    #[track_caller]
    pub fn hub_closed() -> Self {
        Self::HubClosed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn lock_poisoned() -> Self {
        Self::LockPoisoned {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_channel_name<S: Into<String>>(message: S) -> Self {
        Self::InvalidChannelName {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_message<S: Into<String>>(message: S) -> Self {
        Self::InvalidMessage {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn payload_not_object(value: &serde_json::Value) -> Self {
        let kind = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::PayloadNotObject {
            kind,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short stable code, used in log lines and relay responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::HubClosed { .. } => "HUB_CLOSED",
            Self::ChannelLimitExceeded { .. } => "CHANNEL_LIMIT",
            Self::HandleLimitExceeded { .. } => "HANDLE_LIMIT",
            Self::InvalidChannelName { .. } => "INVALID_CHANNEL_NAME",
            Self::LockPoisoned { .. } => "LOCK_POISONED",
            Self::NoRuntime { .. } => "NO_RUNTIME",
            Self::PayloadSerialization { .. } => "PAYLOAD_SERIALIZATION",
            Self::PayloadNotObject { .. } => "PAYLOAD_NOT_OBJECT",
            Self::InvalidMessage { .. } => "INVALID_MESSAGE",
            Self::UnknownEventType { .. } => "UNKNOWN_EVENT_TYPE",
            Self::Lagged { .. } => "LAGGED",
        }
    }
}

impl From<serde_json::Error> for BusError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::PayloadSerialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type BusErrorResult<T> = StdResult<T, BusError>;
