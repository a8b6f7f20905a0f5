use std::hash::Hash;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

/// Mutations to wait for between compaction sweeps, before scaling by the
/// map's size.
const MIN_COMPACT_INTERVAL: u64 = 100;

/// A map whose entries can be toggled between retained and reclaimable.
///
/// A retained entry owns its value and never vanishes. A reclaimable entry is
/// kept alive only by outstanding [`Rc`] handles: once [`collect`] has dropped
/// the map's own share and every external handle is gone, the entry is dead
/// and lookups treat it as missing. Dead entries are evicted lazily, either
/// on access or by an amortized compaction sweep.
///
/// `len` may shrink spontaneously between calls; callers must not assume
/// stability between accesses to reclaimable entries.
///
/// [`collect`]: ReclaimableMap::collect
#[derive(Debug)]
pub struct ReclaimableMap<K, V> {
    slots: FxHashMap<K, Slot<V>>,
    version: u64,
    clean_version: u64,
    saw_dead: bool,
}

#[derive(Debug)]
struct Slot<V> {
    /// The map's own share. `Some` while retained, and between a release and
    /// the next collect.
    strong: Option<Rc<V>>,
    retained: bool,
    weak: Weak<V>,
}

impl<V> Slot<V> {
    fn new(value: &Rc<V>, retained: bool) -> Slot<V> {
        Slot {
            strong: Some(Rc::clone(value)),
            retained,
            weak: Rc::downgrade(value),
        }
    }

    fn upgrade(&self) -> Option<Rc<V>> {
        match &self.strong {
            Some(rc) => Some(Rc::clone(rc)),
            None => self.weak.upgrade(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> ReclaimableMap<K, V> {
    pub fn new() -> ReclaimableMap<K, V> {
        ReclaimableMap {
            slots: FxHashMap::default(),
            version: 0,
            clean_version: 0,
            saw_dead: false,
        }
    }

    /// Insert a value. Panics when a live entry already exists for the key;
    /// a dead slot is silently reused.
    pub fn insert(&mut self, key: K, value: &Rc<V>, retained: bool) {
        if let Some(slot) = self.slots.get(&key) {
            assert!(
                slot.upgrade().is_none(),
                "a live entry already exists for this key"
            );
            self.saw_dead = true;
        }
        self.slots.insert(key, Slot::new(value, retained));
        self.bump(1);
    }

    /// Look up a live entry. A dead entry is evicted and reported missing.
    pub fn get(&mut self, key: &K) -> Option<Rc<V>> {
        match self.slots.get(key) {
            Some(slot) => match slot.upgrade() {
                Some(value) => Some(value),
                None => {
                    self.slots.remove(key);
                    self.saw_dead = true;
                    self.bump(1);
                    None
                }
            },
            None => {
                self.bump(1);
                None
            }
        }
    }

    /// Look up and promote to retained.
    pub fn get_and_retain(&mut self, key: &K) -> Option<Rc<V>> {
        let value = self.get(key)?;
        let slot = self.slots.get_mut(key).unwrap();
        slot.strong = Some(Rc::clone(&value));
        slot.retained = true;
        Some(value)
    }

    /// Look up and demote to reclaimable. The entry stays readable until the
    /// next [`collect`](ReclaimableMap::collect) and handle drop.
    pub fn get_and_release(&mut self, key: &K) -> Option<Rc<V>> {
        let value = self.get(key)?;
        self.slots.get_mut(key).unwrap().retained = false;
        Some(value)
    }

    /// Demote to reclaimable without reading.
    pub fn release(&mut self, key: &K) {
        if let Some(slot) = self.slots.get_mut(key) {
            slot.retained = false;
        } else {
            self.bump(1);
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<Rc<V>> {
        let value = self.slots.remove(key).and_then(|slot| slot.upgrade());
        self.bump(1);
        value
    }

    /// Number of live entries.
    pub fn len(&mut self) -> usize {
        let mut dead = 0;
        let live = self
            .slots
            .values()
            .filter(|slot| {
                let alive = slot.upgrade().is_some();
                if !alive {
                    dead += 1;
                }
                alive
            })
            .count();
        if dead > 0 {
            self.saw_dead = true;
        }
        self.bump(dead as u64);
        live
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Iterate over live entries. Dead entries are skipped and counted
    /// towards the next compaction.
    pub fn iter(&mut self) -> impl Iterator<Item = (K, Rc<V>)> {
        let mut dead = 0;
        let live: Vec<(K, Rc<V>)> = self
            .slots
            .iter()
            .filter_map(|(key, slot)| match slot.upgrade() {
                Some(value) => Some((key.clone(), value)),
                None => {
                    dead += 1;
                    None
                }
            })
            .collect();
        if dead > 0 {
            self.saw_dead = true;
        }
        self.bump(dead);
        live.into_iter()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.version = 0;
        self.clean_version = 0;
        self.saw_dead = false;
    }

    /// Reclamation point: drop the map's own share of every non-retained
    /// entry, then evict entries with no surviving handle.
    pub fn collect(&mut self) {
        for slot in self.slots.values_mut() {
            if !slot.retained {
                slot.strong = None;
            }
        }
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.upgrade().is_some());
        if self.slots.len() < before {
            self.saw_dead = true;
        }
    }

    /// Run a full sweep once enough mutations accumulated, and only if a
    /// reclamation has actually been observed since the last sweep.
    fn bump(&mut self, increment: u64) {
        self.version += increment;
        let delta = self.version - self.clean_version;
        if delta <= MIN_COMPACT_INTERVAL + self.slots.len() as u64 {
            return;
        }

        if self.saw_dead {
            self.slots.retain(|_, slot| slot.upgrade().is_some());
            self.saw_dead = false;
            self.clean_version = self.version;
        } else {
            // Nothing can have died; wait a little longer.
            self.clean_version += MIN_COMPACT_INTERVAL;
        }
    }
}

impl<K: Eq + Hash + Clone, V> Default for ReclaimableMap<K, V> {
    fn default() -> Self {
        ReclaimableMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retained_entries_survive_collection() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let value = Rc::new("kept".to_string());
        map.insert(1, &value, true);
        drop(value);

        map.collect();
        assert!(map.get(&1).is_some());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn reclaimable_entries_die_once_handles_drop() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let value = Rc::new("gone".to_string());
        map.insert(1, &value, false);
        drop(value);

        // Still readable: the map's own share has not been collected yet.
        assert!(map.get(&1).is_some());
        map.collect();
        assert!(map.get(&1).is_none());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn external_handles_keep_reclaimable_entries_alive() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let value = Rc::new("held".to_string());
        map.insert(1, &value, false);

        map.collect();
        assert!(map.get(&1).is_some());
        drop(value);
        assert!(map.get(&1).is_none());
    }

    #[test]
    fn release_and_retain_toggle_the_mode() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let value = Rc::new("toggle".to_string());
        map.insert(1, &value, true);
        drop(value);

        map.release(&1);
        let handle = map.get_and_retain(&1).unwrap();
        map.collect();
        assert!(map.get(&1).is_some());

        map.get_and_release(&1).unwrap();
        drop(handle);
        map.collect();
        assert!(map.get(&1).is_none());
    }

    #[test]
    fn dead_slot_is_reused_on_insert() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let first = Rc::new("first".to_string());
        map.insert(1, &first, false);
        drop(first);
        map.collect();

        let second = Rc::new("second".to_string());
        map.insert(1, &second, true);
        assert_eq!(*map.get(&1).unwrap(), "second");
    }

    #[test]
    #[should_panic(expected = "live entry already exists")]
    fn double_insert_panics() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let value = Rc::new("x".to_string());
        map.insert(1, &value, true);
        map.insert(1, &value, true);
    }

    #[test]
    fn iteration_skips_dead_entries() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let kept = Rc::new("kept".to_string());
        let dropped = Rc::new("dropped".to_string());
        map.insert(1, &kept, true);
        map.insert(2, &dropped, false);
        drop(dropped);
        map.collect();
        drop(kept);

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, 1);
    }

    #[test]
    fn compaction_waits_for_an_observed_reclamation() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let live = Rc::new("live".to_string());
        map.insert(1, &live, true);

        // A slot that dies silently: released, collected, then the last
        // handle drops without the map noticing.
        let doomed = Rc::new("doomed".to_string());
        map.insert(2, &doomed, false);
        map.collect();
        drop(doomed);
        map.saw_dead = false;

        // Plenty of misses on unrelated keys, but no observed reclamation:
        // the dead slot must survive the deferred sweep.
        for key in 100..300 {
            map.get(&key);
        }
        assert!(map.slots.contains_key(&2));

        // Touching the dead slot evicts it directly.
        map.get(&2);
        assert!(!map.slots.contains_key(&2));
    }

    #[test]
    fn compaction_sweeps_unobserved_dead_slots() {
        let mut map: ReclaimableMap<u64, String> = ReclaimableMap::new();
        let a = Rc::new("a".to_string());
        let b = Rc::new("b".to_string());
        map.insert(1, &a, false);
        map.insert(2, &b, false);
        map.collect();
        drop(a);
        drop(b);
        map.saw_dead = false;

        // Observing one dead slot arms the sweep; the other is removed by it.
        map.get(&1);
        assert!(!map.slots.contains_key(&1));
        assert!(map.slots.contains_key(&2));
        for key in 100..300 {
            map.get(&key);
        }
        assert!(!map.slots.contains_key(&2));
    }
}
