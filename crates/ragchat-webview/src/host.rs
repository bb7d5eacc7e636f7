//! The host page a widget is mounted into.
//!
//! [`HostPage`] is the seam between the widget and whatever actually shows
//! it (a browser DOM bridge, a native webview, a test double). [`Document`]
//! is the in-memory implementation: it keeps the last rendered content of
//! every mount point, the registered stylesheets and every dispatched
//! notification, and republishes notifications on an [`EventBus`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ragchat_common::{EventBus, MountEvent, WidgetEvent};
use tokio::sync::broadcast;
use tracing::debug;

use crate::status::WidgetView;

/// Operations a widget performs on its host page.
///
/// Widgets call these while holding their own state lock, so
/// implementations must not call back into the widget.
pub trait HostPage: Send + Sync {
    /// Whether an element with this id exists.
    fn has_mount(&self, mount_id: &str) -> bool;

    /// Replace the mount point's content with freshly rendered widget markup.
    fn render(&self, mount_id: &str, view: &WidgetView, html: &str);

    /// Empty the mount point.
    fn clear(&self, mount_id: &str);

    /// Dispatch a notification on the mount point.
    fn dispatch(&self, mount_id: &str, event: WidgetEvent);

    /// Add a stylesheet to the page unless one is already registered under
    /// `key`. Returns `true` if it was newly added.
    fn register_style(&self, key: &str, css: &str) -> bool;
}

#[derive(Debug, Default)]
struct MountSlot {
    html: String,
    view: Option<WidgetView>,
}

#[derive(Debug, Default)]
struct DocumentState {
    mounts: HashMap<String, MountSlot>,
    styles: Vec<(String, String)>,
    events: Vec<MountEvent>,
}

/// In-memory host page.
pub struct Document {
    state: Mutex<DocumentState>,
    bus: EventBus,
}

impl Document {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DocumentState::default()),
            bus: EventBus::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an empty element widgets can mount into.
    pub fn add_mount(&self, mount_id: impl Into<String>) {
        self.lock()
            .mounts
            .entry(mount_id.into())
            .or_default();
    }

    pub fn remove_mount(&self, mount_id: &str) -> bool {
        self.lock().mounts.remove(mount_id).is_some()
    }

    /// Current markup of a mount point, or `None` if it does not exist.
    pub fn content(&self, mount_id: &str) -> Option<String> {
        self.lock().mounts.get(mount_id).map(|m| m.html.clone())
    }

    /// Last view rendered into a mount point (`None` once cleared).
    pub fn view(&self, mount_id: &str) -> Option<WidgetView> {
        self.lock().mounts.get(mount_id).and_then(|m| m.view)
    }

    /// Keys of registered stylesheets, in registration order.
    pub fn style_keys(&self) -> Vec<String> {
        self.lock().styles.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn style(&self, key: &str) -> Option<String> {
        self.lock()
            .styles
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, css)| css.clone())
    }

    /// All notifications dispatched so far.
    pub fn events(&self) -> Vec<MountEvent> {
        self.lock().events.clone()
    }

    /// Notifications dispatched on one mount point.
    pub fn events_for(&self, mount_id: &str) -> Vec<WidgetEvent> {
        self.lock()
            .events
            .iter()
            .filter(|e| e.mount_id == mount_id)
            .map(|e| e.event)
            .collect()
    }

    /// Listen for notifications as they are dispatched.
    pub fn subscribe(&self) -> broadcast::Receiver<MountEvent> {
        self.bus.subscribe()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPage for Document {
    fn has_mount(&self, mount_id: &str) -> bool {
        self.lock().mounts.contains_key(mount_id)
    }

    fn render(&self, mount_id: &str, view: &WidgetView, html: &str) {
        if let Some(slot) = self.lock().mounts.get_mut(mount_id) {
            slot.html = html.to_string();
            slot.view = Some(*view);
        }
    }

    fn clear(&self, mount_id: &str) {
        if let Some(slot) = self.lock().mounts.get_mut(mount_id) {
            slot.html.clear();
            slot.view = None;
        }
    }

    fn dispatch(&self, mount_id: &str, event: WidgetEvent) {
        let mount_event = MountEvent {
            mount_id: mount_id.to_string(),
            event,
        };
        self.lock().events.push(mount_event.clone());
        let listeners = self.bus.publish(mount_event);
        debug!(mount = mount_id, event = event.name(), listeners, "event dispatched");
    }

    fn register_style(&self, key: &str, css: &str) -> bool {
        let mut state = self.lock();
        if state.styles.iter().any(|(k, _)| k == key) {
            return false;
        }
        state.styles.push((key.to_string(), css.to_string()));
        true
    }
}
