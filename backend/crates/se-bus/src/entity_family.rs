use serde::{Deserialize, Serialize};

/// Backend entity a catalog event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityFamily {
    Job,
    Batch,
    Customer,
    Invoice,
}

impl EntityFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Batch => "batch",
            Self::Customer => "customer",
            Self::Invoice => "invoice",
        }
    }

    /// Payload key that carries the entity id for this family
    pub fn id_key(&self) -> &'static str {
        match self {
            Self::Job => "jobId",
            Self::Batch => "batchId",
            Self::Customer => "customerId",
            Self::Invoice => "invoiceId",
        }
    }
}

impl std::fmt::Display for EntityFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
