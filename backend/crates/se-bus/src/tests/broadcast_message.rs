use crate::{BroadcastMessage, EventType, Payload};

use chrono::{DateTime, TimeZone, Utc};
use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serde::Serialize;
use serde_json::{Value, json};

fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => panic!("test payload must be an object"),
    }
}

#[test]
fn given_payload_when_serialized_then_flat_object_with_type_and_timestamp() {
    // Given
    let message = BroadcastMessage::new("JOB_CREATED", payload(json!({ "jobId": "SE001234" })));

    // When
    let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

    // Then
    assert_eq!(value["type"], "JOB_CREATED");
    assert_eq!(value["jobId"], "SE001234");
    let timestamp = value["timestamp"].as_str().unwrap();
    assert_that!(DateTime::parse_from_rfc3339(timestamp), ok(anything()));
}

#[test]
fn given_message_when_created_then_timestamp_is_send_time() {
    let before = Utc::now();
    let message = BroadcastMessage::new("BATCH_SHIPPED", Payload::new());
    let after = Utc::now();

    assert!(message.timestamp() >= before);
    assert!(message.timestamp() <= after);
}

#[test]
fn given_payload_with_type_key_when_created_then_payload_wins() {
    let message = BroadcastMessage::new("JOB_CREATED", payload(json!({ "type": "JOB_DELETED" })));

    assert_that!(message.event_type(), eq("JOB_DELETED"));
    assert!(message.get("type").is_none());
}

#[test]
fn given_payload_with_valid_timestamp_when_created_then_payload_wins() {
    let message = BroadcastMessage::new(
        "JOB_UPDATED",
        payload(json!({ "timestamp": "2024-03-01T10:00:00Z" })),
    );

    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    assert_eq!(message.timestamp(), expected);
    assert!(message.get("timestamp").is_none());
}

#[test]
fn given_payload_with_garbage_reserved_keys_when_created_then_dropped() {
    let message = BroadcastMessage::new(
        "JOB_UPDATED",
        payload(json!({ "type": 42, "timestamp": "yesterday", "jobId": "SE1" })),
    );

    assert_eq!(message.event_type(), "JOB_UPDATED");
    assert_eq!(message.payload().len(), 1);
    assert_eq!(message.get("jobId"), Some(&json!("SE1")));
}

#[test]
fn given_non_catalog_type_when_created_then_accepted() {
    let message = BroadcastMessage::new("RANDOM_EVENT", Payload::new());

    assert_eq!(message.event_type(), "RANDOM_EVENT");
    assert!(message.known_type().is_none());
    assert!(!message.is_refresh());
}

#[test]
fn given_catalog_type_when_created_then_known_type_resolves() {
    let message = BroadcastMessage::new("INVOICE_CREATED", Payload::new());

    assert_eq!(message.known_type(), Some(EventType::InvoiceCreated));
    assert!(message.is_refresh());
}

#[test]
fn given_wire_object_when_parsed_then_fields_extracted() {
    let message = BroadcastMessage::from_value(json!({
        "type": "CUSTOMER_UPDATED",
        "customerId": "C-77",
        "name": "Ama"
    }))
    .unwrap();

    assert_eq!(message.event_type(), "CUSTOMER_UPDATED");
    assert_eq!(message.payload().len(), 2);
    assert_eq!(message.get("name"), Some(&json!("Ama")));
}

#[test]
fn given_wire_object_without_type_when_parsed_then_error() {
    let result = BroadcastMessage::from_value(json!({ "jobId": "SE1" }));

    assert_that!(result, err(anything()));
    assert_eq!(result.unwrap_err().error_code(), "INVALID_MESSAGE");
}

#[test]
fn given_wire_array_when_parsed_then_error() {
    let result = BroadcastMessage::from_value(json!(["JOB_CREATED"]));

    assert_eq!(result.unwrap_err().error_code(), "PAYLOAD_NOT_OBJECT");
}

#[test]
fn given_serializable_struct_when_converted_then_fields_become_payload() {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct StatusChange<'a> {
        batch_id: &'a str,
        status: &'a str,
    }

    let message = BroadcastMessage::from_serializable(
        "BATCH_STATUS_UPDATED",
        &StatusChange {
            batch_id: "B-9",
            status: "in_transit",
        },
    )
    .unwrap();

    assert_eq!(message.get("batchId"), Some(&json!("B-9")));
    assert_eq!(message.get("status"), Some(&json!("in_transit")));
}

#[test]
fn given_non_object_data_when_converted_then_error() {
    let result = BroadcastMessage::from_serializable("JOB_CREATED", &vec![1, 2, 3]);

    assert_eq!(result.unwrap_err().error_code(), "PAYLOAD_NOT_OBJECT");
}

#[test]
fn given_serialized_message_when_deserialized_then_equal() {
    let original = BroadcastMessage::new(
        "JOB_STATUS_UPDATED",
        payload(json!({ "jobId": "SE5", "status": "delivered" })),
    );

    let parsed: BroadcastMessage = serde_json::from_str(&original.to_json().unwrap()).unwrap();

    assert_eq!(parsed, original);
}
