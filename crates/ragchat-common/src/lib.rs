pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, EmbedError};
pub use events::{EventBus, MountEvent, WidgetEvent, WidgetEventKind};
pub use id::{new_id, WidgetId};
pub use types::{ConnectionStatus, FrameEvent, IndicatorClass, Visibility};
