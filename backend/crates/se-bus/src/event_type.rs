use crate::{BusError, BusErrorResult, EntityFamily};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Every update kind the application broadcasts.
///
/// Wire identifiers are SCREAMING_SNAKE_CASE and matched case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    // Job events
    JobCreated,
    JobUpdated,
    JobStatusUpdated,
    JobDeleted,

    // Batch events
    BatchCreated,
    BatchUpdated,
    BatchShipped,
    BatchStatusUpdated,

    // Other entity events
    CustomerCreated,
    CustomerUpdated,
    InvoiceCreated,
    InvoiceUpdated,
    InvoiceStatusUpdated,
}

impl EventType {
    pub const ALL: [EventType; 13] = [
        Self::JobCreated,
        Self::JobUpdated,
        Self::JobStatusUpdated,
        Self::JobDeleted,
        Self::BatchCreated,
        Self::BatchUpdated,
        Self::BatchShipped,
        Self::BatchStatusUpdated,
        Self::CustomerCreated,
        Self::CustomerUpdated,
        Self::InvoiceCreated,
        Self::InvoiceUpdated,
        Self::InvoiceStatusUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JobCreated => "JOB_CREATED",
            Self::JobUpdated => "JOB_UPDATED",
            Self::JobStatusUpdated => "JOB_STATUS_UPDATED",
            Self::JobDeleted => "JOB_DELETED",
            Self::BatchCreated => "BATCH_CREATED",
            Self::BatchUpdated => "BATCH_UPDATED",
            Self::BatchShipped => "BATCH_SHIPPED",
            Self::BatchStatusUpdated => "BATCH_STATUS_UPDATED",
            Self::CustomerCreated => "CUSTOMER_CREATED",
            Self::CustomerUpdated => "CUSTOMER_UPDATED",
            Self::InvoiceCreated => "INVOICE_CREATED",
            Self::InvoiceUpdated => "INVOICE_UPDATED",
            Self::InvoiceStatusUpdated => "INVOICE_STATUS_UPDATED",
        }
    }

    pub fn family(&self) -> EntityFamily {
        match self {
            Self::JobCreated | Self::JobUpdated | Self::JobStatusUpdated | Self::JobDeleted => {
                EntityFamily::Job
            }
            Self::BatchCreated
            | Self::BatchUpdated
            | Self::BatchShipped
            | Self::BatchStatusUpdated => EntityFamily::Batch,
            Self::CustomerCreated | Self::CustomerUpdated => EntityFamily::Customer,
            Self::InvoiceCreated | Self::InvoiceUpdated | Self::InvoiceStatusUpdated => {
                EntityFamily::Invoice
            }
        }
    }

    /// Whether views showing this entity should refetch.
    /// New variants must be placed on one side of this match explicitly.
    pub fn triggers_refresh(&self) -> bool {
        match self {
            Self::JobCreated
            | Self::JobUpdated
            | Self::JobStatusUpdated
            | Self::JobDeleted
            | Self::BatchCreated
            | Self::BatchUpdated
            | Self::BatchShipped
            | Self::BatchStatusUpdated
            | Self::CustomerCreated
            | Self::CustomerUpdated
            | Self::InvoiceCreated
            | Self::InvoiceUpdated
            | Self::InvoiceStatusUpdated => true,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = BusError;

    #[track_caller]
    fn from_str(s: &str) -> BusErrorResult<Self> {
        match s {
            "JOB_CREATED" => Ok(Self::JobCreated),
            "JOB_UPDATED" => Ok(Self::JobUpdated),
            "JOB_STATUS_UPDATED" => Ok(Self::JobStatusUpdated),
            "JOB_DELETED" => Ok(Self::JobDeleted),
            "BATCH_CREATED" => Ok(Self::BatchCreated),
            "BATCH_UPDATED" => Ok(Self::BatchUpdated),
            "BATCH_SHIPPED" => Ok(Self::BatchShipped),
            "BATCH_STATUS_UPDATED" => Ok(Self::BatchStatusUpdated),
            "CUSTOMER_CREATED" => Ok(Self::CustomerCreated),
            "CUSTOMER_UPDATED" => Ok(Self::CustomerUpdated),
            "INVOICE_CREATED" => Ok(Self::InvoiceCreated),
            "INVOICE_UPDATED" => Ok(Self::InvoiceUpdated),
            "INVOICE_STATUS_UPDATED" => Ok(Self::InvoiceStatusUpdated),
            _ => Err(BusError::UnknownEventType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Does a message of this type warrant a view refresh?
///
/// Unknown identifiers (including case variants and the empty string) are
/// not refresh events.
pub fn is_refresh_event(event_type: &str) -> bool {
    event_type
        .parse::<EventType>()
        .is_ok_and(|event| event.triggers_refresh())
}
