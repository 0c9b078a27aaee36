use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// Mean earth radius `(2a + b) / 3` used for spherical distances (meters).
pub const MEAN_EARTH_RADIUS_M: f64 = (2.0 * WGS84_A + WGS84_B) / 3.0;

pub const LAT_RANGE_DEG: (f64, f64) = (-90.0, 90.0);
pub const LNG_RANGE_DEG: (f64, f64) = (-180.0, 180.0);

/// Geographic position in degrees.
///
/// Field order follows the map convention `(lat, lng)`; geometry output uses
/// `[lng, lat]` (see [`LatLng::to_lng_lat`]).
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `[longitude, latitude]`, the vertex order of line geometry.
    pub fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub fn is_in_range(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (LAT_RANGE_DEG.0..=LAT_RANGE_DEG.1).contains(&self.lat)
            && (LNG_RANGE_DEG.0..=LNG_RANGE_DEG.1).contains(&self.lng)
    }
}

/// Great-circle distance between two positions (meters, haversine on a sphere
/// of radius [`MEAN_EARTH_RADIUS_M`]).
pub fn haversine_m(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng * 0.5).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
