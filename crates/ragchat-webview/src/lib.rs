//! Embeds the RAG PDF Chat web application in a host page.
//!
//! Provides:
//! - [`EmbedWidget`]: mounts the frame, tracks its status, polls the health endpoint
//! - A pure status state machine ([`StatusMachine`])
//! - Markup and per-theme stylesheet rendering
//! - The [`HostPage`] seam with an in-memory [`Document`]
//! - The [`HealthProbe`] seam with an HTTP implementation

pub mod host;
pub mod markup;
pub mod probe;
pub mod status;
pub mod styles;
pub mod widget;

pub use host::{Document, HostPage};
pub use probe::{HealthProbe, HttpHealthProbe, ProbeOutcome};
pub use status::{LoadingIndicator, Signal, StatusMachine, Step, WidgetView};
pub use widget::EmbedWidget;
