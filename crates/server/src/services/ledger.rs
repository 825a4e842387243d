use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Recap episodes dispatched per record since its last advance.
///
/// Recaps leave no trace in the store, so without this a recap stays matchable
/// on every tick until the record moves on. Episodes are keyed in half steps.
#[derive(Debug, Default)]
pub struct DispatchLedger {
    entries: Mutex<HashMap<String, HashSet<i64>>>,
}

impl DispatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(episode: f64) -> i64 {
        (episode * 2.0).round() as i64
    }

    /// Returns false if the episode was already recorded
    pub fn record(&self, name: &str, episode: f64) -> bool {
        self.entries
            .lock()
            .entry(name.to_string())
            .or_default()
            .insert(Self::key(episode))
    }

    pub fn contains(&self, name: &str, episode: f64) -> bool {
        self.entries
            .lock()
            .get(name)
            .is_some_and(|episodes| episodes.contains(&Self::key(episode)))
    }

    /// Forget a record once it advances or retires
    pub fn clear(&self, name: &str) {
        self.entries.lock().remove(name);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
