//! Device registry.
//!
//! [`DeviceRegistry`] maps each tracked device to its live
//! [`GestureAccumulator`]. It is owned by the router and lives exactly as long as
//! the router does; nothing else mutates it.
//!
//! Absence is a normal outcome: a device may never have qualified, may have been
//! removed already, or its add event may have been missed.

use crate::accumulator::GestureAccumulator;
use crate::device::DeviceId;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<DeviceId, GestureAccumulator>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `id` with a fresh accumulator, replacing any previous entry.
    pub fn register(&mut self, id: DeviceId) {
        self.devices.insert(id, GestureAccumulator::new());
    }

    /// Stop tracking `id`. Returns `false` if it was not tracked.
    pub fn unregister(&mut self, id: &DeviceId) -> bool {
        self.devices.remove(id).is_some()
    }

    #[inline]
    pub fn get_mut(&mut self, id: &DeviceId) -> Option<&mut GestureAccumulator> {
        self.devices.get_mut(id)
    }

    #[inline]
    pub fn get(&self, id: &DeviceId) -> Option<&GestureAccumulator> {
        self.devices.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &DeviceId) -> bool {
        self.devices.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Iterate tracked device ids (unordered).
    pub fn ids(&self) -> impl Iterator<Item = &DeviceId> {
        self.devices.keys()
    }

    pub fn clear(&mut self) {
        self.devices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut reg = DeviceRegistry::new();
        let id = DeviceId::new("/dev/input/event5");
        reg.register(id.clone());
        assert!(reg.contains(&id));
        assert_eq!(reg.len(), 1);
        assert!(reg.get_mut(&id).is_some());
        assert!(reg.get_mut(&DeviceId::new("/dev/input/event6")).is_none());
    }

    #[test]
    fn re_register_replaces_state() {
        let mut reg = DeviceRegistry::new();
        let id = DeviceId::new("/dev/input/event5");
        reg.register(id.clone());
        if let Some(acc) = reg.get_mut(&id) {
            acc.update_swipe(100.0, 0.0);
        }
        reg.register(id.clone());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&id).map(|a| a.dx_total), Some(0.0));
    }

    #[test]
    fn unregister_missing_is_noop() {
        let mut reg = DeviceRegistry::new();
        assert!(!reg.unregister(&DeviceId::new("/dev/input/event9")));
        assert!(reg.is_empty());
    }

    #[test]
    fn unregister_removes_entry() {
        let mut reg = DeviceRegistry::new();
        let id = DeviceId::new("/dev/input/event5");
        reg.register(id.clone());
        assert!(reg.unregister(&id));
        assert!(!reg.contains(&id));
        assert!(reg.get_mut(&id).is_none());
    }

    #[test]
    fn ids_and_clear() {
        let mut reg = DeviceRegistry::new();
        reg.register(DeviceId::new("a"));
        reg.register(DeviceId::new("b"));
        let mut ids: Vec<_> = reg.ids().map(|d| d.as_str().to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
        reg.clear();
        assert!(reg.is_empty());
    }
}
