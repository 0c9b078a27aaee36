//! Waypoint editor core.
//!
//! An ordered waypoint list edited through map gestures. Every gesture goes
//! through [`EditorState::dispatch`] as an [`EditorEvent`]; the renderer reads
//! [`EditorSnapshot`]s and never mutates state directly.

pub mod config;
pub mod event;
pub mod mode;
pub mod notification;
pub mod state;
pub mod store;
pub mod view;

pub use config::{ConfigError, EditorConfig, RightClickPolicy};
pub use event::EditorEvent;
pub use mode::{GestureSet, Mode};
pub use notification::{NotificationTimer, NotificationToken, Shown};
pub use state::{Dispatch, EditorSnapshot, EditorState};
pub use store::{Waypoint, WaypointStore};
