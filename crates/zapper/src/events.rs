//! Lifecycle notifications for observers outside the engine.
//!
//! The bus is synchronous: `publish` invokes every subscriber in registration
//! order before it returns, so observers see events in exactly the order the
//! engine produced them. Subscribers are registered once at startup and live
//! for the process lifetime; there is no unsubscription.

use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Published right before the playlist request is sent.
    DownloadStart { url: String },
    /// Published once the request resolved; `success` means HTTP 200 exactly.
    DownloadEnd { success: bool },
    /// Published once, right before rotation begins.
    Init { total: usize },
    /// Published at the start of every rotation step.
    Progress {
        current: usize,
        total: usize,
        channel_url: String,
        channel_title: String,
    },
}

type Subscriber = Box<dyn Fn(&LifecycleEvent) + Send + Sync>;

#[derive(Default)]
pub struct EventBus {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&LifecycleEvent) + Send + Sync + 'static) {
        self.subscribers
            .write()
            .expect("event bus lock poisoned")
            .push(Box::new(subscriber));
    }

    pub fn publish(&self, event: LifecycleEvent) {
        for subscriber in self
            .subscribers
            .read()
            .expect("event bus lock poisoned")
            .iter()
        {
            subscriber(&event);
        }
    }
}
