use serde::{Deserialize, Serialize};

/// Externally visible waypoint id: the 1-based display position.
///
/// Not a stable handle. Every deletion renumbers the survivors, so an id held
/// across a removal may name a different waypoint (or none).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(u32);

impl WaypointId {
    pub fn new(n: u32) -> Self {
        WaypointId(n)
    }

    /// Id of the waypoint stored at 0-based `index`, or `None` past `u32::MAX` ids.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok()?.checked_add(1).map(WaypointId)
    }

    /// 0-based position, or `None` for the invalid id `0`.
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for WaypointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable creation key. Monotonic, never reused and never renumbered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointKey(u64);

impl WaypointKey {
    pub fn new(n: u64) -> Self {
        WaypointKey(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}
