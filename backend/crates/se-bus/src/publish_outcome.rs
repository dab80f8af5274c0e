use serde::Serialize;

/// Best-effort result of a publish. Never an error for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Handed to this many listening handles
    Delivered { receivers: usize },
    /// Sent, but nobody was listening
    NoListeners,
    /// Dropped; the reason was logged
    Failed { reason: &'static str },
}

impl PublishOutcome {
    pub fn from_receiver_count(receivers: usize) -> Self {
        if receivers == 0 {
            Self::NoListeners
        } else {
            Self::Delivered { receivers }
        }
    }

    pub fn receivers(&self) -> usize {
        match self {
            Self::Delivered { receivers } => *receivers,
            Self::NoListeners | Self::Failed { .. } => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
