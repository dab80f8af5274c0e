use crate::{
    BroadcastMessage, EventType, MessageCallback, Payload, PublishOutcome, Subscription,
    SubscriptionFilter, UpdateBus, UpdateNotifier,
};

use std::sync::Mutex;

use serde_json::json;

/// Records publishes instead of broadcasting them
#[derive(Default)]
struct RecordingBus {
    published: Mutex<Vec<BroadcastMessage>>,
}

impl RecordingBus {
    fn published(&self) -> Vec<BroadcastMessage> {
        self.published.lock().unwrap().clone()
    }
}

impl UpdateBus for RecordingBus {
    fn publish(&self, event_type: &str, payload: Payload) -> PublishOutcome {
        self.published
            .lock()
            .unwrap()
            .push(BroadcastMessage::new(event_type, payload));
        PublishOutcome::Delivered { receivers: 1 }
    }

    fn subscribe_filtered(
        &self,
        _filter: SubscriptionFilter,
        _callback: MessageCallback,
    ) -> Subscription {
        Subscription::noop()
    }
}

#[test]
fn given_job_created_when_notified_then_job_id_key_used() {
    // Given
    let bus = RecordingBus::default();
    let notifier = UpdateNotifier::new(&bus);

    // When
    let outcome = notifier.notify(EventType::JobCreated, "SE001234");

    // Then
    assert_eq!(outcome, PublishOutcome::Delivered { receivers: 1 });
    let published = bus.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].event_type(), "JOB_CREATED");
    assert_eq!(published[0].get("jobId"), Some(&json!("SE001234")));
}

#[test]
fn given_status_change_when_notified_then_status_included() {
    let bus = RecordingBus::default();
    let notifier = UpdateNotifier::new(&bus);

    notifier.notify_status(EventType::InvoiceStatusUpdated, "INV-3", "paid");

    let published = bus.published();
    assert_eq!(published[0].get("invoiceId"), Some(&json!("INV-3")));
    assert_eq!(published[0].get("status"), Some(&json!("paid")));
}

#[test]
fn given_extra_fields_when_notified_then_merged_with_id() {
    let bus = RecordingBus::default();
    let notifier = UpdateNotifier::new(&bus);
    let mut extra = Payload::new();
    extra.insert(String::from("containerRef"), json!("MSKU-1"));

    notifier.notify_with(EventType::BatchShipped, "B-12", extra);

    let published = bus.published();
    assert_eq!(published[0].get("batchId"), Some(&json!("B-12")));
    assert_eq!(published[0].get("containerRef"), Some(&json!("MSKU-1")));
}

#[test]
fn given_unserializable_shape_when_publish_serialized_then_failed_not_panic() {
    let bus = RecordingBus::default();

    let outcome = bus.publish_serialized("JOB_CREATED", &"just a string");

    assert!(outcome.is_failed());
    assert!(bus.published().is_empty());
}

#[test]
fn given_non_object_data_when_published_or_built_then_same_rejection() {
    // Given
    let bus = RecordingBus::default();

    // When
    let outcome = bus.publish_serialized("JOB_CREATED", &vec![1, 2, 3]);
    let built = BroadcastMessage::from_serializable("JOB_CREATED", &vec![1, 2, 3]);

    // Then
    assert_eq!(
        outcome,
        PublishOutcome::Failed {
            reason: "PAYLOAD_NOT_OBJECT"
        }
    );
    let error = built.unwrap_err();
    assert_eq!(error.error_code(), "PAYLOAD_NOT_OBJECT");
    assert!(bus.published().is_empty());
}

#[test]
fn given_noop_subscription_when_disposed_twice_then_nothing_happens() {
    let bus = RecordingBus::default();
    let subscription = bus.subscribe(Box::new(|_| {}));

    subscription.dispose();
    subscription.dispose();

    assert_eq!(subscription.state(), crate::SubscriptionState::Inactive);
}
