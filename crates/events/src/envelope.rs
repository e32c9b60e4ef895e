use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::event::Event;

/// Envelope for an event, carrying the metadata consumers route on.
///
/// `payload` is the domain-agnostic event body; typed events are usually
/// serialised to JSON via [`EventEnvelope::from_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    aggregate_id: Uuid,
    aggregate_type: String,

    event_type: String,
    event_version: u32,
    occurred_at: DateTime<Utc>,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        aggregate_id: Uuid,
        aggregate_type: impl Into<String>,
        event_type: impl Into<String>,
        event_version: u32,
        occurred_at: DateTime<Utc>,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            event_type: event_type.into(),
            event_version,
            occurred_at,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> Uuid {
        self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn event_version(&self) -> u32 {
        self.event_version
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl EventEnvelope<JsonValue> {
    /// Wrap a typed event, serialising its body to JSON.
    pub fn from_event<T>(
        aggregate_type: impl Into<String>,
        aggregate_id: Uuid,
        event: &T,
    ) -> Result<Self, serde_json::Error>
    where
        T: Event + Serialize,
    {
        Ok(Self::new(
            Uuid::now_v7(),
            aggregate_id,
            aggregate_type,
            event.event_type(),
            event.version(),
            event.occurred_at(),
            serde_json::to_value(event)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct ItemRestocked {
        units: u32,
        occurred_at: DateTime<Utc>,
    }

    impl Event for ItemRestocked {
        fn event_type(&self) -> &'static str {
            "inventory.item.restocked"
        }

        fn version(&self) -> u32 {
            2
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.occurred_at
        }
    }

    #[test]
    fn from_event_copies_metadata_and_serialises_the_body() {
        let event = ItemRestocked {
            units: 12,
            occurred_at: Utc::now(),
        };
        let item_id = Uuid::now_v7();

        let envelope = EventEnvelope::from_event("inventory.item", item_id, &event).unwrap();

        assert_eq!(envelope.aggregate_id(), item_id);
        assert_eq!(envelope.aggregate_type(), "inventory.item");
        assert_eq!(envelope.event_type(), "inventory.item.restocked");
        assert_eq!(envelope.event_version(), 2);
        assert_eq!(envelope.occurred_at(), event.occurred_at);
        assert_ne!(envelope.event_id(), item_id);

        let body: ItemRestocked = serde_json::from_value(envelope.into_payload()).unwrap();
        assert_eq!(body, event);
    }
}
