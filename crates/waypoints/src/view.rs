//! Derived views: pure functions of the waypoint list.
//!
//! Recomputed in full after every mutation; waypoint counts are small.

use foundation::ids::WaypointId;
use foundation::math::{LatLng, haversine_m};
use serde::Serialize;

use crate::mode::Mode;
use crate::store::Waypoint;

pub const EMPTY_LISTING_PLACEHOLDER: &str = "No waypoints yet. Click on the map to add one.";

/// Open polyline through every waypoint in store order, as `[lng, lat]` vertices.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PathGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl PathGeometry {
    /// Fewer than two vertices: nothing to draw.
    pub fn is_degenerate(&self) -> bool {
        self.coordinates.len() < 2
    }
}

pub fn build_path(waypoints: &[Waypoint]) -> PathGeometry {
    PathGeometry {
        coordinates: waypoints.iter().map(|w| w.position.to_lng_lat()).collect(),
    }
}

/// Sum of great-circle segment lengths (meters).
pub fn path_length_m(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| haversine_m(pair[0].position, pair[1].position))
        .sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinateRow {
    pub id: WaypointId,
    pub lat: String,
    pub lng: String,
}

impl std::fmt::Display for CoordinateRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}: {}, {}", self.id, self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CoordinateListing {
    Empty { placeholder: &'static str },
    Rows { rows: Vec<CoordinateRow> },
}

impl CoordinateListing {
    pub fn rows(&self) -> &[CoordinateRow] {
        match self {
            CoordinateListing::Empty { .. } => &[],
            CoordinateListing::Rows { rows } => rows,
        }
    }
}

pub fn build_listing(waypoints: &[Waypoint], precision: usize) -> CoordinateListing {
    if waypoints.is_empty() {
        return CoordinateListing::Empty {
            placeholder: EMPTY_LISTING_PLACEHOLDER,
        };
    }
    let rows = waypoints
        .iter()
        .map(|w| CoordinateRow {
            id: w.id,
            lat: format!("{:.*}", precision, w.position.lat),
            lng: format!("{:.*}", precision, w.position.lng),
        })
        .collect();
    CoordinateListing::Rows { rows }
}

/// Marker look, strongest state first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerVariant {
    /// The marker under the active drag.
    Dragging,
    /// Delete affordance open on this marker.
    DeletePending,
    /// Dragging mode, not currently dragged.
    Movable,
    /// Placing mode.
    Fixed,
}

/// Render primitive for one waypoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: WaypointId,
    #[serde(flatten)]
    pub position: LatLng,
    pub draggable: bool,
    pub variant: MarkerVariant,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerContext {
    pub mode: Mode,
    pub draggable: bool,
    pub drag_target: Option<WaypointId>,
    pub delete_target: Option<WaypointId>,
}

pub fn build_markers(waypoints: &[Waypoint], ctx: &MarkerContext) -> Vec<Marker> {
    waypoints
        .iter()
        .map(|w| {
            let variant = if ctx.drag_target == Some(w.id) {
                MarkerVariant::Dragging
            } else if ctx.delete_target == Some(w.id) {
                MarkerVariant::DeletePending
            } else if ctx.mode == Mode::Dragging {
                MarkerVariant::Movable
            } else {
                MarkerVariant::Fixed
            };
            Marker {
                id: w.id,
                position: w.position,
                draggable: ctx.draggable,
                variant,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WaypointStore;
    use pretty_assertions::assert_eq;

    fn store(points: &[(f64, f64)]) -> WaypointStore {
        let mut s = WaypointStore::new();
        for &(lat, lng) in points {
            s.add(LatLng::new(lat, lng));
        }
        s
    }

    #[test]
    fn path_has_one_lng_lat_vertex_per_waypoint() {
        let s = store(&[(13.70, 100.50), (13.80, 100.60), (13.90, 100.40)]);
        let path = build_path(s.waypoints());
        assert_eq!(path.coordinates.len(), s.len());
        assert_eq!(
            path.coordinates,
            vec![[100.50, 13.70], [100.60, 13.80], [100.40, 13.90]]
        );
        assert!(!path.is_degenerate());
    }

    #[test]
    fn zero_or_one_waypoint_is_degenerate() {
        assert!(build_path(&[]).is_degenerate());
        let s = store(&[(1.0, 2.0)]);
        let path = build_path(s.waypoints());
        assert!(path.is_degenerate());
        assert_eq!(path_length_m(s.waypoints()), 0.0);
    }

    #[test]
    fn path_length_sums_segments() {
        let s = store(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]);
        let whole = path_length_m(s.waypoints());
        let half = haversine_m(LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0));
        assert!((whole - 2.0 * half).abs() < 1e-6);
    }

    #[test]
    fn listing_rounds_to_precision() {
        let s = store(&[(13.123456789, 100.5), (-33.8688197, -179.999999)]);
        let listing = build_listing(s.waypoints(), 5);
        let rendered: Vec<String> = listing.rows().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["#1: 13.12346, 100.50000", "#2: -33.86882, -180.00000"]
        );
    }

    #[test]
    fn empty_listing_shows_placeholder() {
        assert_eq!(
            build_listing(&[], 5),
            CoordinateListing::Empty {
                placeholder: EMPTY_LISTING_PLACEHOLDER
            }
        );
        assert!(build_listing(&[], 5).rows().is_empty());
    }

    #[test]
    fn marker_variants_follow_precedence() {
        let s = store(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let ctx = MarkerContext {
            mode: Mode::Dragging,
            draggable: true,
            drag_target: Some(WaypointId::new(1)),
            delete_target: Some(WaypointId::new(2)),
        };
        let variants: Vec<_> = build_markers(s.waypoints(), &ctx)
            .into_iter()
            .map(|m| m.variant)
            .collect();
        assert_eq!(
            variants,
            vec![
                MarkerVariant::Dragging,
                MarkerVariant::DeletePending,
                MarkerVariant::Movable
            ]
        );

        let placing = MarkerContext {
            mode: Mode::Placing,
            draggable: false,
            drag_target: None,
            delete_target: None,
        };
        let markers = build_markers(s.waypoints(), &placing);
        assert!(markers.iter().all(|m| !m.draggable && m.variant == MarkerVariant::Fixed));
    }
}
