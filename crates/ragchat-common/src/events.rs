use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// The notifications a widget dispatches on its mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetEventKind {
    #[serde(rename = "rag-connected")]
    Connected,
    #[serde(rename = "rag-error")]
    Error,
}

impl WidgetEventKind {
    /// DOM event name observed by the host page.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEventKind::Connected => "rag-connected",
            WidgetEventKind::Error => "rag-error",
        }
    }
}

/// Payload carried by every widget notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetail {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEvent {
    #[serde(rename = "type")]
    pub kind: WidgetEventKind,
    pub detail: EventDetail,
}

impl WidgetEvent {
    /// Stamp a notification with the current wall-clock time.
    pub fn now(kind: WidgetEventKind) -> Self {
        Self {
            kind,
            detail: EventDetail {
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn timestamp(&self) -> i64 {
        self.detail.timestamp
    }
}

/// A notification together with the mount point it was dispatched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEvent {
    pub mount_id: String,
    pub event: WidgetEvent,
}

pub struct EventBus {
    sender: broadcast::Sender<MountEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MountEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: MountEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
