use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Events that can be emitted by components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Query lifecycle events
    QueryReceived {
        query: String,
    },
    EmptyInput,
    ResolutionCompleted {
        category: String,
        difficulty: String,
        fallback: bool,
    },
    ValidationFailed {
        violations: usize,
    },

    // System events
    ConfigLoaded {
        path: Option<String>,
    },
    SystemReady,
    ShutdownRequested,
}

/// Event bus for component communication
pub struct EventBus {
    sender: broadcast::Sender<Event>,
    metrics: Arc<RwLock<Metrics>>,
}

/// Accumulated session metrics from events
#[derive(Debug, Default, Clone)]
pub struct Metrics {
    pub queries_resolved: usize,
    pub rule_matches: usize,
    pub fallbacks: usize,
    pub validation_failures: usize,
    pub empty_inputs: usize,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            metrics: Arc::new(RwLock::new(Metrics::default())),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    pub async fn emit(&self, event: Event) -> Result<()> {
        // Update metrics based on event
        self.update_metrics(&event).await;

        // Send event to subscribers
        match self.sender.send(event) {
            Ok(_) => Ok(()),
            Err(_) => {
                // No receivers, but that's okay
                Ok(())
            }
        }
    }

    /// Get current metrics
    pub async fn get_metrics(&self) -> Metrics {
        self.metrics.read().await.clone()
    }

    /// Update metrics based on event
    async fn update_metrics(&self, event: &Event) {
        let mut metrics = self.metrics.write().await;

        match event {
            Event::ResolutionCompleted { fallback, .. } => {
                metrics.queries_resolved += 1;
                if *fallback {
                    metrics.fallbacks += 1;
                } else {
                    metrics.rule_matches += 1;
                }
            }
            Event::ValidationFailed { .. } => {
                metrics.validation_failures += 1;
            }
            Event::EmptyInput => {
                metrics.empty_inputs += 1;
            }
            _ => {}
        }
    }
}

/// Trait for components that can emit events
#[async_trait::async_trait]
pub trait EventEmitter {
    fn set_event_bus(&mut self, bus: Arc<EventBus>);

    #[allow(dead_code)]
    async fn emit_event(&self, event: Event) -> Result<()>;
}

/// Helper macro to implement EventEmitter trait
#[macro_export]
macro_rules! impl_event_emitter {
    ($type:ty) => {
        #[async_trait::async_trait]
        impl EventEmitter for $type {
            fn set_event_bus(&mut self, bus: Arc<EventBus>) {
                self.event_bus = Some(bus);
            }

            async fn emit_event(&self, event: Event) -> Result<()> {
                if let Some(bus) = &self.event_bus {
                    bus.emit(event).await
                } else {
                    Ok(())
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_emission() {
        let bus = EventBus::new(100);
        let mut receiver = bus.subscribe();

        let event = Event::QueryReceived {
            query: "teleport in unity".to_string(),
        };

        bus.emit(event.clone()).await.unwrap();

        let received = receiver.recv().await.unwrap();
        match received {
            Event::QueryReceived { query } => {
                assert_eq!(query, "teleport in unity");
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[tokio::test]
    async fn test_metrics_update() {
        let bus = EventBus::new(100);

        bus.emit(Event::ResolutionCompleted {
            category: "Unity".to_string(),
            difficulty: "Intermediate".to_string(),
            fallback: false,
        })
        .await
        .unwrap();

        bus.emit(Event::ResolutionCompleted {
            category: "General".to_string(),
            difficulty: "N/A".to_string(),
            fallback: true,
        })
        .await
        .unwrap();

        bus.emit(Event::ValidationFailed { violations: 2 })
            .await
            .unwrap();

        let metrics = bus.get_metrics().await;
        assert_eq!(metrics.queries_resolved, 2);
        assert_eq!(metrics.rule_matches, 1);
        assert_eq!(metrics.fallbacks, 1);
        assert_eq!(metrics.validation_failures, 1);
    }
}
