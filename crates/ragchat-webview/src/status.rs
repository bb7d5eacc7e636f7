//! Connection status state machine.
//!
//! Pure and synchronous: [`StatusMachine::apply`] folds one lifecycle signal
//! into the current [`WidgetView`] and reports whether anything visible
//! changed and which notification (if any) the host page should receive.
//!
//! A frame load failure is sticky: once the frame reports an error the
//! widget stays in `Error` until it is destroyed, whatever later probes say.

use ragchat_common::{ConnectionStatus, FrameEvent, WidgetEventKind};
use serde::{Deserialize, Serialize};

/// State of the loading overlay drawn above the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadingIndicator {
    /// Spinner and "Loading..." text.
    Visible,
    /// Frame finished loading; overlay hidden.
    Hidden,
    /// Frame failed; overlay shows an error message instead of the spinner.
    Failed,
}

/// Everything the host page needs to draw the widget's dynamic parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetView {
    pub status: ConnectionStatus,
    pub loading: LoadingIndicator,
}

impl Default for WidgetView {
    fn default() -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            loading: LoadingIndicator::Visible,
        }
    }
}

/// A lifecycle signal observed by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    FrameLoaded,
    FrameFailed,
    /// Health endpoint answered 2xx.
    ProbeHealthy,
    /// Health endpoint answered with any other status.
    ProbeUnavailable,
    /// Health request never got an answer.
    ProbeUnreachable,
}

impl From<FrameEvent> for Signal {
    fn from(event: FrameEvent) -> Self {
        match event {
            FrameEvent::Load => Signal::FrameLoaded,
            FrameEvent::Error => Signal::FrameFailed,
        }
    }
}

/// Result of applying one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// The view differs from before and must be re-rendered.
    pub changed: bool,
    /// Notification to dispatch on the mount point.
    pub notify: Option<WidgetEventKind>,
}

#[derive(Debug, Clone, Default)]
pub struct StatusMachine {
    view: WidgetView,
}

impl StatusMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> WidgetView {
        self.view
    }

    pub fn status(&self) -> ConnectionStatus {
        self.view.status
    }

    pub fn apply(&mut self, signal: Signal) -> Step {
        let before = self.view;
        if before.status == ConnectionStatus::Error {
            return Step::default();
        }

        let mut next = before;
        let notify = match signal {
            Signal::FrameLoaded => {
                next.loading = LoadingIndicator::Hidden;
                next.status = ConnectionStatus::Connected;
                entered(before, next, WidgetEventKind::Connected)
            }
            Signal::FrameFailed => {
                next.loading = LoadingIndicator::Failed;
                next.status = ConnectionStatus::Error;
                Some(WidgetEventKind::Error)
            }
            Signal::ProbeHealthy => {
                next.status = ConnectionStatus::Connected;
                entered(before, next, WidgetEventKind::Connected)
            }
            Signal::ProbeUnavailable => {
                next.status = ConnectionStatus::Unavailable;
                None
            }
            Signal::ProbeUnreachable => {
                next.status = ConnectionStatus::Lost;
                entered(before, next, WidgetEventKind::Error)
            }
        };

        self.view = next;
        Step {
            changed: next != before,
            notify,
        }
    }
}

/// Notify only when the status actually changed into the new value.
fn entered(before: WidgetView, next: WidgetView, kind: WidgetEventKind) -> Option<WidgetEventKind> {
    (before.status != next.status).then_some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_in(signals: &[Signal]) -> StatusMachine {
        let mut machine = StatusMachine::new();
        for s in signals {
            machine.apply(*s);
        }
        machine
    }

    #[test]
    fn starts_connecting_with_spinner() {
        let machine = StatusMachine::new();
        assert_eq!(machine.status(), ConnectionStatus::Connecting);
        assert_eq!(machine.view().loading, LoadingIndicator::Visible);
    }

    #[test]
    fn frame_load_connects_and_hides_spinner_once() {
        let mut machine = StatusMachine::new();

        let step = machine.apply(Signal::FrameLoaded);
        assert!(step.changed);
        assert_eq!(step.notify, Some(WidgetEventKind::Connected));
        assert_eq!(machine.status(), ConnectionStatus::Connected);
        assert_eq!(machine.view().loading, LoadingIndicator::Hidden);

        let again = machine.apply(Signal::FrameLoaded);
        assert_eq!(again, Step::default());
    }

    #[test]
    fn frame_failure_is_sticky() {
        let mut machine = StatusMachine::new();

        let step = machine.apply(Signal::FrameFailed);
        assert!(step.changed);
        assert_eq!(step.notify, Some(WidgetEventKind::Error));
        assert_eq!(machine.view().loading, LoadingIndicator::Failed);

        for s in [
            Signal::ProbeHealthy,
            Signal::FrameLoaded,
            Signal::ProbeUnreachable,
            Signal::FrameFailed,
        ] {
            assert_eq!(machine.apply(s), Step::default());
            assert_eq!(machine.status(), ConnectionStatus::Error);
        }
    }

    #[test]
    fn healthy_probe_is_reentrant() {
        let mut machine = StatusMachine::new();
        let first = machine.apply(Signal::ProbeHealthy);
        assert_eq!(first.notify, Some(WidgetEventKind::Connected));
        // Spinner stays until the frame itself loads.
        assert_eq!(machine.view().loading, LoadingIndicator::Visible);

        let second = machine.apply(Signal::ProbeHealthy);
        assert_eq!(second, Step::default());
    }

    #[test]
    fn frame_load_after_healthy_probe_only_hides_spinner() {
        let mut machine = machine_in(&[Signal::ProbeHealthy]);
        let step = machine.apply(Signal::FrameLoaded);
        assert!(step.changed);
        assert_eq!(step.notify, None);
        assert_eq!(machine.view().loading, LoadingIndicator::Hidden);
    }

    #[test]
    fn unavailable_never_notifies() {
        let mut machine = machine_in(&[Signal::FrameLoaded]);
        let step = machine.apply(Signal::ProbeUnavailable);
        assert!(step.changed);
        assert_eq!(step.notify, None);
        assert_eq!(machine.status(), ConnectionStatus::Unavailable);
        // Loading overlay is untouched by probes.
        assert_eq!(machine.view().loading, LoadingIndicator::Hidden);
    }

    #[test]
    fn unreachable_notifies_error_on_entry_only() {
        let mut machine = machine_in(&[Signal::FrameLoaded]);
        let first = machine.apply(Signal::ProbeUnreachable);
        assert_eq!(first.notify, Some(WidgetEventKind::Error));
        assert_eq!(machine.status(), ConnectionStatus::Lost);

        let second = machine.apply(Signal::ProbeUnreachable);
        assert_eq!(second, Step::default());
    }

    #[test]
    fn recovery_notifies_connected_again() {
        let mut machine = machine_in(&[Signal::FrameLoaded, Signal::ProbeUnavailable]);
        let step = machine.apply(Signal::ProbeHealthy);
        assert_eq!(step.notify, Some(WidgetEventKind::Connected));
        assert_eq!(machine.status(), ConnectionStatus::Connected);
    }

    #[test]
    fn frame_events_map_to_signals() {
        assert_eq!(Signal::from(FrameEvent::Load), Signal::FrameLoaded);
        assert_eq!(Signal::from(FrameEvent::Error), Signal::FrameFailed);
    }
}
