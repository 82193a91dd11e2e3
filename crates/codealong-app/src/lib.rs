// codealong application layer: the session orchestrator plus the settings,
// video and theme state it carries, and the host binary's CLI and watcher.

pub mod args;
pub mod session;
pub mod settings;
pub mod theme;
pub mod video;
pub mod watch;

pub use session::{DragHandlers, Session, SessionConfig};
pub use settings::{CodealongSettings, SettingsError};
pub use theme::Theme;
pub use video::{VideoError, VideoId};
