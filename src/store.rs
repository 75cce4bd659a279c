use indexmap::IndexMap;
use log::debug;

/// In-memory keyed store that forgets its oldest entries once it grows past
/// `limit`.
#[derive(Debug)]
pub struct BoundedStore<V> {
    limit: usize,
    entries: IndexMap<String, V>,
}

impl<V> BoundedStore<V> {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: IndexMap::new(),
        }
    }

    /// Stores `value` under a fresh random id and returns the id.
    pub fn insert(&mut self, value: V) -> String {
        let mut id = new_id();
        while self.entries.contains_key(&id) {
            id = new_id();
        }
        self.entries.insert(id.clone(), value);
        self.evict_overflow();
        id
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.entries.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<V> {
        // shift keeps the remaining entries in insertion order
        self.entries.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn evict_overflow(&mut self) {
        let excess = self.entries.len().saturating_sub(self.limit);
        if excess > 0 {
            self.entries.drain(..excess);
            debug!("Evicted {} oldest entries (limit {})", excess, self.limit);
        }
    }
}

fn new_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}
