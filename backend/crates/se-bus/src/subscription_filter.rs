use crate::{BroadcastMessage, EntityFamily};

use std::collections::HashSet;

/// Narrows which messages reach a subscriber callback
#[derive(Debug, Clone, Default)]
pub struct SubscriptionFilter {
    families: Option<HashSet<EntityFamily>>,
    event_types: Option<HashSet<String>>,
    refresh_only: bool,
}

impl SubscriptionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only catalog events about these entity families
    pub fn families(mut self, families: impl IntoIterator<Item = EntityFamily>) -> Self {
        self.families = Some(families.into_iter().collect());
        self
    }

    /// Only these exact type identifiers (catalog or not)
    pub fn event_types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.event_types = Some(types.into_iter().map(|t| t.into()).collect());
        self
    }

    /// Only messages whose type warrants a view refresh
    pub fn refresh_only(mut self) -> Self {
        self.refresh_only = true;
        self
    }

    pub fn matches(&self, message: &BroadcastMessage) -> bool {
        if self.refresh_only && !message.is_refresh() {
            return false;
        }

        if let Some(ref types) = self.event_types
            && !types.contains(message.event_type())
        {
            return false;
        }

        if let Some(ref families) = self.families {
            match message.known_type() {
                Some(event) if families.contains(&event.family()) => {}
                _ => return false,
            }
        }

        true
    }

    pub fn is_wildcard(&self) -> bool {
        self.families.is_none() && self.event_types.is_none() && !self.refresh_only
    }
}
