//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{BattleEvent, EconomyEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle progress (start, turns, result)
    Battle,
    /// Currency, energy and inventory changes
    Economy,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Battle(BattleEvent),
    Economy(EconomyEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle(_) => Topic::Battle,
            Event::Economy(_) => Topic::Economy,
        }
    }
}

impl From<BattleEvent> for Event {
    fn from(event: BattleEvent) -> Self {
        Event::Battle(event)
    }
}

impl From<EconomyEvent> for Event {
    fn from(event: EconomyEvent) -> Self {
        Event::Economy(event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Clones share the same channels.
#[derive(Clone, Debug)]
pub struct EventBus {
    battle: broadcast::Sender<Event>,
    economy: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            battle: broadcast::channel(capacity).0,
            economy: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Economy => &self.economy,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{BattleOutcome, EconomyEvent};
    use crate::repository::PlayerId;

    fn player() -> PlayerId {
        PlayerId::new("ash").unwrap()
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(BattleEvent::Finished {
            player: player(),
            outcome: BattleOutcome::Defeat,
            rounds: 3,
        });
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut economy = bus.subscribe(Topic::Economy);
        let mut battle = bus.subscribe(Topic::Battle);

        bus.publish(EconomyEvent::CoinsSpent {
            player: player(),
            amount: 500,
            remaining: 500,
        });

        let event = economy.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Economy);
        assert!(battle.try_recv().is_err());
    }
}
