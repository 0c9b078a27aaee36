use foundation::ids::{WaypointId, WaypointKey};
use foundation::math::LatLng;
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub id: WaypointId,
    /// Creation key; survives renumbering. Not part of the rendered identity.
    #[serde(skip)]
    pub key: WaypointKey,
    #[serde(flatten)]
    pub position: LatLng,
}

/// Ordered waypoint collection.
///
/// Ordering contract:
/// - Waypoints are kept in creation order; removal preserves the survivors' order.
/// - `waypoints()[i].id == i + 1` after every mutation.
///
/// Mode gating is the caller's job; the store accepts every call.
#[derive(Debug, Default, Clone)]
pub struct WaypointStore {
    next_key: u64,
    waypoints: Vec<Waypoint>,
}

impl WaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints.iter()
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id.index()?)
    }

    pub fn contains(&self, id: WaypointId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a waypoint with `id = len + 1`.
    ///
    /// Ids are `u32`; once `u32::MAX` waypoints are stored further adds are
    /// refused with `None`.
    pub fn add(&mut self, position: LatLng) -> Option<Waypoint> {
        let id = WaypointId::from_index(self.waypoints.len())?;
        let key = WaypointKey::new(self.next_key);
        self.next_key += 1;
        let waypoint = Waypoint { id, key, position };
        self.waypoints.push(waypoint);
        Some(waypoint)
    }

    /// Moves the waypoint currently numbered `id`.
    ///
    /// Returns `true` if the stored position changed; unknown ids and repeated
    /// positions are no-ops.
    pub fn update_position(&mut self, id: WaypointId, position: LatLng) -> bool {
        let Some(waypoint) = id.index().and_then(|idx| self.waypoints.get_mut(idx)) else {
            return false;
        };
        if waypoint.position == position {
            return false;
        }
        waypoint.position = position;
        true
    }

    /// Removes the waypoint currently numbered `id` and renumbers the rest.
    ///
    /// The returned waypoint still carries its old id.
    pub fn remove(&mut self, id: WaypointId) -> Option<Waypoint> {
        let idx = id.index().filter(|&idx| idx < self.waypoints.len())?;
        let removed = self.waypoints.remove(idx);
        self.renumber();
        Some(removed)
    }

    /// Empties the store. Creation keys keep counting.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    fn renumber(&mut self) {
        // `add` caps the length at u32::MAX, so the zip never runs short.
        for (waypoint, n) in self.waypoints.iter_mut().zip(1u32..) {
            waypoint.id = WaypointId::new(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WaypointStore;
    use foundation::ids::WaypointId;
    use foundation::math::LatLng;
    use pretty_assertions::assert_eq;

    fn id(n: u32) -> WaypointId {
        WaypointId::new(n)
    }

    fn ids(store: &WaypointStore) -> Vec<u32> {
        store.iter().map(|w| w.id.get()).collect()
    }

    fn store_with(n: usize) -> WaypointStore {
        let mut store = WaypointStore::new();
        for i in 0..n {
            store.add(LatLng::new(i as f64, i as f64 * 2.0));
        }
        store
    }

    #[test]
    fn add_assigns_dense_ids_in_call_order() {
        let store = store_with(5);
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5]);
        assert_eq!(store.get(id(3)).unwrap().position, LatLng::new(2.0, 4.0));
    }

    #[test]
    fn remove_middle_renumbers_survivors_in_order() {
        let mut store = store_with(4);
        let removed = store.remove(id(2)).unwrap();
        assert_eq!(removed.position, LatLng::new(1.0, 2.0));

        assert_eq!(ids(&store), vec![1, 2, 3]);
        let lats: Vec<f64> = store.iter().map(|w| w.position.lat).collect();
        assert_eq!(lats, vec![0.0, 2.0, 3.0]);
    }

    #[test]
    fn every_removal_position_keeps_ids_dense() {
        for n in 1..6usize {
            for k in 1..=n as u32 {
                let mut store = store_with(n);
                let before: Vec<_> = store.iter().map(|w| w.key).collect();
                store.remove(id(k)).unwrap();

                let expected_ids: Vec<u32> = (1..n as u32).collect();
                assert_eq!(ids(&store), expected_ids);

                let mut expected_keys = before;
                expected_keys.remove(k as usize - 1);
                let keys: Vec<_> = store.iter().map(|w| w.key).collect();
                assert_eq!(keys, expected_keys);
            }
        }
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut store = store_with(2);
        assert!(store.remove(id(0)).is_none());
        assert!(store.remove(id(3)).is_none());
        assert!(!store.update_position(id(9), LatLng::new(1.0, 1.0)));
        assert!(!store.contains(id(0)));
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[test]
    fn update_position_is_idempotent() {
        let mut store = store_with(3);
        let target = LatLng::new(45.0, 90.0);

        assert!(store.update_position(id(2), target));
        let once: Vec<_> = store.waypoints().to_vec();
        assert!(!store.update_position(id(2), target));
        assert_eq!(store.waypoints(), once.as_slice());

        assert_eq!(store.get(id(1)).unwrap().position, LatLng::new(0.0, 0.0));
        assert_eq!(store.get(id(3)).unwrap().position, LatLng::new(2.0, 4.0));
    }

    #[test]
    fn ids_are_not_stable_across_removal() {
        let mut store = store_with(3);
        let third = store.get(id(3)).unwrap().key;
        store.remove(id(1));

        assert!(store.get(id(3)).is_none());
        assert_eq!(store.get(id(2)).unwrap().key, third);
    }

    #[test]
    fn clear_empties_but_keys_keep_counting() {
        let mut store = store_with(2);
        store.clear();
        assert!(store.is_empty());

        let w = store.add(LatLng::new(1.0, 1.0)).unwrap();
        assert_eq!(w.id, id(1));
        assert_eq!(w.key.get(), 2);
    }
}
