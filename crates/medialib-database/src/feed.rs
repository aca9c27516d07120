//! In-process change feed for live subscriptions.

use tokio::sync::broadcast;
use tracing::trace;

use medialib_core::events::DomainEvent;

/// Broadcast channel carrying every committed asset and article mutation.
///
/// Subscribers that fall behind receive `RecvError::Lagged` and are
/// expected to re-read the repository, so they converge on the same
/// state as one-shot reads.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<DomainEvent>,
}

impl ChangeFeed {
    /// Create a feed buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: DomainEvent) {
        let delivered = self.sender.send(event).unwrap_or(0);
        trace!(delivered, "Published change event");
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medialib_core::events::AssetEvent;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let feed = ChangeFeed::new(8);
        let mut rx = feed.subscribe();
        feed.publish(DomainEvent::asset(
            None,
            AssetEvent::CreditUpdated { url: "u".into() },
        ));
        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event.as_asset(),
            Some(AssetEvent::CreditUpdated { url }) if url == "u"
        ));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let feed = ChangeFeed::new(8);
        feed.publish(DomainEvent::asset(
            None,
            AssetEvent::CreditUpdated { url: "u".into() },
        ));
        assert_eq!(feed.subscriber_count(), 0);
    }
}
