use crate::{EventType, Payload, PublishOutcome, UpdateBus};

use serde_json::Value;

/// Typed helpers for announcing entity changes after a CRUD action
pub struct UpdateNotifier<'a> {
    bus: &'a dyn UpdateBus,
}

impl<'a> UpdateNotifier<'a> {
    pub fn new(bus: &'a dyn UpdateBus) -> Self {
        Self { bus }
    }

    /// Announce `event` for one entity, e.g. `{"type": "JOB_CREATED", "jobId": "SE001234"}`
    pub fn notify(&self, event: EventType, entity_id: &str) -> PublishOutcome {
        self.notify_with(event, entity_id, Payload::new())
    }

    /// Announce a status change; the new status travels as `status`
    pub fn notify_status(&self, event: EventType, entity_id: &str, status: &str) -> PublishOutcome {
        let mut extra = Payload::new();
        extra.insert(String::from("status"), Value::String(status.to_string()));
        self.notify_with(event, entity_id, extra)
    }

    pub fn notify_with(&self, event: EventType, entity_id: &str, mut extra: Payload) -> PublishOutcome {
        extra.insert(
            event.family().id_key().to_string(),
            Value::String(entity_id.to_string()),
        );
        self.bus.publish(event.as_str(), extra)
    }
}
