//! Domain events emitted by asset store operations.
//!
//! Events are published on the change feed and consumed by live
//! subscriptions and the CLI's watch mode.

pub mod asset;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use asset::{ArticleEvent, AssetEvent};

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The caller who caused the event (if known).
    pub actor: Option<String>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A virtual asset changed.
    Asset(AssetEvent),
    /// An article's block sequence changed.
    Article(ArticleEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor: Option<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor,
            payload,
        }
    }

    /// Shorthand for an asset event.
    pub fn asset(actor: Option<String>, event: AssetEvent) -> Self {
        Self::new(actor, EventPayload::Asset(event))
    }

    /// Shorthand for an article event.
    pub fn article(actor: Option<String>, event: ArticleEvent) -> Self {
        Self::new(actor, EventPayload::Article(event))
    }

    /// The asset event carried by this envelope, if any.
    pub fn as_asset(&self) -> Option<&AssetEvent> {
        match &self.payload {
            EventPayload::Asset(event) => Some(event),
            EventPayload::Article(_) => None,
        }
    }
}
