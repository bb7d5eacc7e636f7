//! Embed widget lifecycle.
//!
//! An [`EmbedWidget`] renders the frame markup into a mount point, folds
//! frame and health-probe signals into its status, and polls the health
//! endpoint while the host page is visible.
//!
//! Probes run as independent tasks so a slow one never delays the next tick.
//! Each probe is tagged with a sequence number when it starts; a result
//! older than the newest applied one is dropped, so a late answer cannot
//! overwrite a fresher status. After [`EmbedWidget::destroy`] every result
//! and signal is ignored.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ragchat_common::{
    ConnectionStatus, EmbedError, FrameEvent, Visibility, WidgetEvent, WidgetEventKind, WidgetId,
};
use ragchat_config::WidgetConfig;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::host::HostPage;
use crate::markup;
use crate::probe::{HealthProbe, ProbeOutcome};
use crate::status::{Signal, StatusMachine, WidgetView};
use crate::styles;


/// Mutable widget state, guarded by one lock so host updates happen in the
/// same order as the status changes they reflect.
struct State {
    machine: StatusMachine,
    destroyed: bool,
    /// The only polling task; `None` while the page is hidden or after destroy.
    poller: Option<JoinHandle<()>>,
    /// Sequence number handed to the most recently started probe.
    last_started: u64,
    /// Sequence number of the newest probe whose result was applied.
    last_applied: u64,
}

struct Inner {
    id: WidgetId,
    mount_id: String,
    config: WidgetConfig,
    health_url: String,
    host: Arc<dyn HostPage>,
    probe: Arc<dyn HealthProbe>,
    runtime: Handle,
    status_tx: watch::Sender<ConnectionStatus>,
    state: Mutex<State>,
}

/// A frame embedding the hosted application, mounted into a host page.
pub struct EmbedWidget {
    inner: Arc<Inner>,
}

impl EmbedWidget {
    /// Mount a widget and start its lifecycle.
    ///
    /// Registers the theme stylesheet (once per page), renders the markup in
    /// the `Connecting` state and starts health polling. Must be called from
    /// within a tokio runtime; polling tasks are spawned on it.
    pub fn create(
        mount_id: impl Into<String>,
        config: WidgetConfig,
        host: Arc<dyn HostPage>,
        probe: Arc<dyn HealthProbe>,
    ) -> Result<Self, EmbedError> {
        let mount_id = mount_id.into();
        if !host.has_mount(&mount_id) {
            return Err(EmbedError::MountNotFound(mount_id));
        }
        let runtime = Handle::try_current().map_err(|e| {
            EmbedError::Other(format!("embed widget needs a tokio runtime: {e}"))
        })?;

        let theme = config.resolved_theme();
        if host.register_style(&styles::style_key(theme), &styles::stylesheet(theme)) {
            debug!(theme = theme.name(), "widget stylesheet registered");
        }

        let machine = StatusMachine::new();
        let (status_tx, _) = watch::channel(machine.status());
        let inner = Arc::new(Inner {
            id: WidgetId::new(),
            health_url: config.health_url(),
            mount_id,
            config,
            host,
            probe,
            runtime,
            status_tx,
            state: Mutex::new(State {
                machine,
                destroyed: false,
                poller: None,
                last_started: 0,
                last_applied: 0,
            }),
        });

        {
            let state = inner.lock();
            inner.render(&state.machine.view());
        }
        info!(
            widget = inner.id.short(),
            mount = %inner.mount_id,
            url = %inner.config.api_url(),
            "embed widget mounted"
        );

        inner.start_polling();
        Ok(Self { inner })
    }

    pub fn id(&self) -> &WidgetId {
        &self.inner.id
    }

    pub fn mount_id(&self) -> &str {
        &self.inner.mount_id
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    pub fn status(&self) -> ConnectionStatus {
        self.inner.lock().machine.status()
    }

    pub fn view(&self) -> WidgetView {
        self.inner.lock().machine.view()
    }

    /// Watch status changes. The receiver starts at the current status.
    pub fn subscribe_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Whether a polling task is currently scheduled.
    pub fn is_polling(&self) -> bool {
        self.inner
            .lock()
            .poller
            .as_ref()
            .is_some_and(|p| !p.is_finished())
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.lock().destroyed
    }

    /// Feed a load or error signal from the embedded frame.
    pub fn handle_frame_event(&self, event: FrameEvent) {
        self.inner.apply(Signal::from(event));
    }

    /// React to the host page being hidden or shown.
    ///
    /// Hiding cancels the polling task. Showing restarts it, which probes
    /// immediately and then resumes the interval.
    pub fn set_visibility(&self, visibility: Visibility) {
        match visibility {
            Visibility::Hidden => {
                if self.inner.stop_polling() {
                    debug!(widget = self.inner.id.short(), "page hidden, polling paused");
                }
            }
            Visibility::Visible => {
                debug!(widget = self.inner.id.short(), "page visible, polling resumed");
                self.inner.start_polling();
            }
        }
    }

    /// Cancel polling and empty the mount point. Safe to call repeatedly.
    pub fn destroy(&self) {
        let mut state = self.inner.lock();
        if let Some(poller) = state.poller.take() {
            poller.abort();
        }
        if !state.destroyed {
            state.destroyed = true;
            info!(widget = self.inner.id.short(), mount = %self.inner.mount_id, "embed widget destroyed");
        }
        self.inner.host.clear(&self.inner.mount_id);
    }
}

impl Drop for EmbedWidget {
    /// Dropping suspends the widget like `destroy()` but leaves the mount
    /// point's content in place.
    fn drop(&mut self) {
        let mut state = self.inner.lock();
        if let Some(poller) = state.poller.take() {
            poller.abort();
        }
        state.destroyed = true;
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render(&self, view: &WidgetView) {
        let html = markup::render_widget(&self.config, view);
        self.host.render(&self.mount_id, view, &html);
    }

    /// Replace any running poller with a fresh one.
    fn start_polling(self: &Arc<Self>) {
        let mut state = self.lock();
        if state.destroyed {
            return;
        }
        if let Some(previous) = state.poller.take() {
            previous.abort();
        }
        let inner = Arc::clone(self);
        state.poller = Some(self.runtime.spawn(inner.poll_loop()));
    }

    /// Cancel the poller. Returns whether one was running.
    fn stop_polling(&self) -> bool {
        match self.lock().poller.take() {
            Some(poller) => {
                poller.abort();
                true
            }
            None => false,
        }
    }

    async fn poll_loop(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.config.health_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // The first tick completes immediately.
            ticker.tick().await;

            let Some(seq) = self.begin_probe() else {
                break;
            };
            let inner = Arc::clone(&self);
            self.runtime.spawn(async move {
                let outcome = inner.probe.check(&inner.health_url).await;
                inner.finish_probe(seq, outcome);
            });
        }
    }

    /// Allocate the next probe sequence number, or `None` once destroyed.
    fn begin_probe(&self) -> Option<u64> {
        let mut state = self.lock();
        if state.destroyed {
            return None;
        }
        state.last_started += 1;
        debug!(widget = self.id.short(), seq = state.last_started, url = %self.health_url, "health probe");
        Some(state.last_started)
    }

    fn finish_probe(&self, seq: u64, outcome: ProbeOutcome) {
        let mut state = self.lock();
        if state.destroyed {
            debug!(widget = self.id.short(), seq, "probe finished after destroy, ignored");
            return;
        }
        if seq <= state.last_applied {
            debug!(
                widget = self.id.short(),
                seq,
                newest = state.last_applied,
                "stale probe result discarded"
            );
            return;
        }
        state.last_applied = seq;

        match &outcome {
            ProbeOutcome::Healthy => {}
            ProbeOutcome::Unavailable(code) => {
                warn!(widget = self.id.short(), seq, code, "health endpoint unavailable");
            }
            ProbeOutcome::Unreachable(reason) => {
                warn!(widget = self.id.short(), seq, %reason, "health endpoint unreachable");
            }
        }
        self.apply_locked(&mut state, outcome.signal());
    }

    fn apply(&self, signal: Signal) {
        let mut state = self.lock();
        self.apply_locked(&mut state, signal);
    }

    fn apply_locked(&self, state: &mut State, signal: Signal) {
        if state.destroyed {
            debug!(widget = self.id.short(), ?signal, "signal after destroy, ignored");
            return;
        }

        let step = state.machine.apply(signal);
        let view = state.machine.view();
        if step.changed {
            debug!(widget = self.id.short(), ?signal, status = ?view.status, "status changed");
            self.render(&view);
            self.status_tx.send_replace(view.status);
        }

        if let Some(kind) = step.notify {
            match kind {
                WidgetEventKind::Connected => {
                    info!(widget = self.id.short(), "RAG PDF Chat application connected");
                }
                WidgetEventKind::Error => {
                    error!(widget = self.id.short(), status = ?view.status, "RAG PDF Chat application connection failed");
                }
            }
            self.host.dispatch(&self.mount_id, WidgetEvent::now(kind));
        }
    }
}
