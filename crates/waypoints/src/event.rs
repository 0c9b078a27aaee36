use foundation::ids::WaypointId;
use foundation::math::LatLng;
use serde::{Deserialize, Serialize};

use crate::notification::NotificationToken;

/// Everything the map widget (or a driver) can tell the editor.
///
/// Serialized internally tagged, e.g. `{"type":"clicked","lat":13.7,"lng":100.5}`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    Clicked { lat: f64, lng: f64 },
    DragStarted { id: WaypointId },
    /// Fires at pointer-move frequency during one drag gesture.
    Dragged { id: WaypointId, lat: f64, lng: f64 },
    DragEnded { id: WaypointId },
    RightClicked { id: WaypointId },
    DeleteRequested { id: WaypointId },
    ModeToggled,
    Cleared,
    NotificationExpired { token: NotificationToken },
}

impl EditorEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            EditorEvent::Clicked { .. } => "clicked",
            EditorEvent::DragStarted { .. } => "drag_started",
            EditorEvent::Dragged { .. } => "dragged",
            EditorEvent::DragEnded { .. } => "drag_ended",
            EditorEvent::RightClicked { .. } => "right_clicked",
            EditorEvent::DeleteRequested { .. } => "delete_requested",
            EditorEvent::ModeToggled => "mode_toggled",
            EditorEvent::Cleared => "cleared",
            EditorEvent::NotificationExpired { .. } => "notification_expired",
        }
    }

    /// Geographic payload, for events that carry one.
    pub fn position(&self) -> Option<LatLng> {
        match *self {
            EditorEvent::Clicked { lat, lng } | EditorEvent::Dragged { lat, lng, .. } => {
                Some(LatLng::new(lat, lng))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EditorEvent;
    use foundation::ids::WaypointId;
    use foundation::math::LatLng;

    #[test]
    fn parses_tagged_json() {
        let e: EditorEvent =
            serde_json::from_str(r#"{"type":"dragged","id":2,"lat":1.5,"lng":-3.0}"#).unwrap();
        assert_eq!(
            e,
            EditorEvent::Dragged {
                id: WaypointId::new(2),
                lat: 1.5,
                lng: -3.0
            }
        );
        assert_eq!(e.position(), Some(LatLng::new(1.5, -3.0)));

        let e: EditorEvent = serde_json::from_str(r#"{"type":"mode_toggled"}"#).unwrap();
        assert_eq!(e, EditorEvent::ModeToggled);
        assert_eq!(e.position(), None);
    }

    #[test]
    fn kind_matches_serde_tag() {
        let e = EditorEvent::RightClicked {
            id: WaypointId::new(1),
        };
        let json = serde_json::to_value(e).unwrap();
        assert_eq!(json["type"], e.kind());
    }
}
