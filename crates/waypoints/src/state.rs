use foundation::ids::WaypointId;
use foundation::math::LatLng;
use foundation::time::Time;
use runtime::event_bus::EventBus;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{EditorConfig, RightClickPolicy};
use crate::event::EditorEvent;
use crate::mode::{GestureSet, Mode};
use crate::notification::{NotificationTimer, Shown};
use crate::store::{Waypoint, WaypointStore};
use crate::view::{
    CoordinateListing, Marker, MarkerContext, PathGeometry, build_listing, build_markers,
    build_path, path_length_m,
};

/// Journal kinds recorded for every dispatched event.
pub const JOURNAL_APPLIED: &str = "applied";
pub const JOURNAL_IGNORED: &str = "ignored";
pub const JOURNAL_EXPIRED: &str = "expired";

/// Result of one [`EditorState::dispatch`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dispatch {
    /// Observable state changed; the renderer should take a new snapshot.
    pub changed: bool,
    /// A notification was shown and its expiry should be armed.
    pub notification: Option<Shown>,
}

impl Dispatch {
    fn changed(changed: bool) -> Self {
        Self {
            changed,
            notification: None,
        }
    }
}

/// Read-only view handed to the renderer after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorSnapshot {
    pub mode: Mode,
    pub gestures: GestureSet,
    pub waypoints: Vec<Waypoint>,
    pub drag_target: Option<WaypointId>,
    pub delete_target: Option<WaypointId>,
    pub notification: Option<String>,
    pub path: PathGeometry,
    pub path_length_m: f64,
    pub listing: CoordinateListing,
    pub markers: Vec<Marker>,
}

/// Whole editor state, mutated only through [`EditorState::dispatch`].
///
/// Single-threaded: every event is applied synchronously and completely before
/// the next one is accepted.
#[derive(Debug)]
pub struct EditorState {
    config: EditorConfig,
    store: WaypointStore,
    mode: Mode,
    drag_target: Option<WaypointId>,
    delete_target: Option<WaypointId>,
    notification: NotificationTimer,
    journal: EventBus,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        let notification = NotificationTimer::new(config.notification_ttl);
        Self {
            config,
            store: WaypointStore::new(),
            mode: Mode::default(),
            drag_target: None,
            delete_target: None,
            notification,
            journal: EventBus::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn gestures(&self) -> GestureSet {
        self.mode.gestures(self.config.delete_requires_dragging)
    }

    pub fn drag_target(&self) -> Option<WaypointId> {
        self.drag_target
    }

    pub fn delete_target(&self) -> Option<WaypointId> {
        self.delete_target
    }

    pub fn notification(&self) -> &NotificationTimer {
        &self.notification
    }

    pub fn journal(&self) -> &EventBus {
        &self.journal
    }

    pub fn dispatch(&mut self, event: EditorEvent, now: Time) -> Dispatch {
        let outcome = match event {
            EditorEvent::Clicked { lat, lng } => {
                Dispatch::changed(self.on_click(LatLng::new(lat, lng)))
            }
            EditorEvent::DragStarted { id } => Dispatch::changed(self.on_drag_start(id)),
            EditorEvent::Dragged { id, lat, lng } => {
                Dispatch::changed(self.on_drag(id, LatLng::new(lat, lng)))
            }
            EditorEvent::DragEnded { .. } => Dispatch::changed(self.drag_target.take().is_some()),
            EditorEvent::RightClicked { id } => Dispatch::changed(self.on_right_click(id)),
            EditorEvent::DeleteRequested { id } => Dispatch::changed(self.on_delete(id)),
            EditorEvent::ModeToggled => self.on_toggle(now),
            EditorEvent::Cleared => Dispatch::changed(self.on_clear()),
            EditorEvent::NotificationExpired { token } => {
                Dispatch::changed(self.notification.expire(token))
            }
        };

        if outcome.changed {
            debug!(kind = event.kind(), waypoints = self.store.len(), "event applied");
            self.journal.emit(now, JOURNAL_APPLIED, format!("{event:?}"));
        } else {
            trace!(kind = event.kind(), mode = ?self.mode, "event ignored");
            self.journal.emit(now, JOURNAL_IGNORED, format!("{event:?}"));
        }
        outcome
    }

    /// Moves the notification clock to `now`. Returns `true` if a message expired.
    pub fn advance(&mut self, now: Time) -> bool {
        let cleared = self.notification.advance(now);
        if cleared {
            debug!(at = now.0, "notification expired");
            self.journal.emit(now, JOURNAL_EXPIRED, "notification cleared");
        }
        cleared
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        let waypoints = self.store.waypoints();
        let gestures = self.gestures();
        let ctx = MarkerContext {
            mode: self.mode,
            draggable: gestures.markers_draggable,
            drag_target: self.drag_target,
            delete_target: self.delete_target,
        };
        EditorSnapshot {
            mode: self.mode,
            gestures,
            waypoints: waypoints.to_vec(),
            drag_target: self.drag_target,
            delete_target: self.delete_target,
            notification: self.notification.message().map(str::to_string),
            path: build_path(waypoints),
            path_length_m: path_length_m(waypoints),
            listing: build_listing(waypoints, self.config.listing_precision),
            markers: build_markers(waypoints, &ctx),
        }
    }

    fn on_click(&mut self, position: LatLng) -> bool {
        // Any map click dismisses a pending delete.
        let mut changed = self.delete_target.take().is_some();
        if self.gestures().click_places {
            changed |= self.store.add(position).is_some();
        }
        changed
    }

    fn on_drag_start(&mut self, id: WaypointId) -> bool {
        if !self.gestures().markers_draggable || !self.store.contains(id) {
            return false;
        }
        self.drag_target.replace(id) != Some(id)
    }

    fn on_drag(&mut self, id: WaypointId, position: LatLng) -> bool {
        if !self.gestures().markers_draggable {
            return false;
        }
        self.store.update_position(id, position)
    }

    fn on_right_click(&mut self, id: WaypointId) -> bool {
        if !self.gestures().delete_affordance || !self.store.contains(id) {
            return false;
        }
        let next = match self.config.right_click {
            RightClickPolicy::Toggle if self.delete_target == Some(id) => None,
            RightClickPolicy::Toggle | RightClickPolicy::ForceOpen => Some(id),
        };
        std::mem::replace(&mut self.delete_target, next) != next
    }

    fn on_delete(&mut self, id: WaypointId) -> bool {
        let removed = self.store.remove(id).is_some();
        let closed = self.delete_target.take().is_some();
        // The dragged id is gone or renumbered; holding it would point at the wrong marker.
        let released = removed && self.drag_target.is_some_and(|d| d >= id);
        if released {
            self.drag_target = None;
        }
        removed || closed || released
    }

    fn on_toggle(&mut self, now: Time) -> Dispatch {
        self.mode = self.mode.toggled();
        let gestures = self.gestures();
        if !gestures.markers_draggable {
            self.drag_target = None;
        }
        if !gestures.delete_affordance {
            self.delete_target = None;
        }
        let shown = self.notification.show(self.mode.label(), now);
        debug!(mode = %self.mode, token = shown.token.get(), "mode toggled");
        Dispatch {
            changed: true,
            notification: Some(shown),
        }
    }

    fn on_clear(&mut self) -> bool {
        let changed =
            !self.store.is_empty() || self.drag_target.is_some() || self.delete_target.is_some();
        self.store.clear();
        self.drag_target = None;
        self.delete_target = None;
        changed
    }
}
