use crate::{EntityFamily, EventType, is_refresh_event};

use std::str::FromStr;

#[test]
fn given_every_catalog_type_when_round_tripped_through_str_then_same_variant() {
    for event in EventType::ALL {
        assert_eq!(EventType::from_str(event.as_str()).unwrap(), event);
    }
}

#[test]
fn given_every_catalog_type_when_checked_then_is_refresh_event() {
    for event in EventType::ALL {
        assert!(
            is_refresh_event(event.as_str()),
            "{} should trigger a refresh",
            event
        );
    }
}

#[test]
fn given_unknown_type_when_checked_then_not_refresh_event() {
    assert!(is_refresh_event("INVOICE_STATUS_UPDATED"));
    assert!(!is_refresh_event("RANDOM_EVENT"));
}

#[test]
fn given_empty_string_when_checked_then_not_refresh_event() {
    assert!(!is_refresh_event(""));
}

#[test]
fn given_case_variant_when_checked_then_not_refresh_event() {
    assert!(!is_refresh_event("job_created"));
    assert!(!is_refresh_event("Job_Created"));
    assert!(!is_refresh_event(" JOB_CREATED"));
}

#[test]
fn given_unknown_type_when_parsed_then_error_names_value() {
    let err = EventType::from_str("BATCH_LOST").unwrap_err();

    assert_eq!(err.error_code(), "UNKNOWN_EVENT_TYPE");
    assert!(err.to_string().contains("BATCH_LOST"));
}

#[test]
fn given_catalog_when_grouped_then_families_match_prefix() {
    assert_eq!(EventType::JobDeleted.family(), EntityFamily::Job);
    assert_eq!(EventType::BatchShipped.family(), EntityFamily::Batch);
    assert_eq!(EventType::CustomerUpdated.family(), EntityFamily::Customer);
    assert_eq!(
        EventType::InvoiceStatusUpdated.family(),
        EntityFamily::Invoice
    );

    for event in EventType::ALL {
        let prefix = event.family().as_str().to_uppercase();
        assert!(event.as_str().starts_with(&prefix));
    }
}

#[test]
fn given_event_type_when_serialized_then_uses_wire_identifier() {
    let json = serde_json::to_string(&EventType::BatchStatusUpdated).unwrap();
    assert_eq!(json, "\"BATCH_STATUS_UPDATED\"");
}
