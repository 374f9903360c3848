use std::collections::{HashMap, VecDeque};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Bounded cache mapping a precomputed key to a result. When full, the
/// oldest entry is evicted. Owned by the analysis pipeline, not a global.
#[derive(Debug)]
pub struct ResultCache<V> {
    capacity: usize,
    entries: HashMap<u64, V>,
    order: VecDeque<u64>,
}

impl<V> ResultCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: u64) -> Option<&V> {
        self.entries.get(&key)
    }

    pub fn insert(&mut self, key: u64, value: V) {
        if self.entries.insert(key, value).is_none() {
            self.order.push_back(key);
            if self.order.len() > self.capacity
                && let Some(oldest) = self.order.pop_front()
            {
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Key for a classification run: the hash of the ordered comment list.
pub fn comments_key(comments: &[String]) -> u64 {
    let mut hasher = DefaultHasher::new();
    comments.hash(&mut hasher);
    hasher.finish()
}

/// Key for a theme run: the ordered comment list plus the requested count.
pub fn themes_key(comments: &[String], count: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    comments.hash(&mut hasher);
    count.hash(&mut hasher);
    hasher.finish()
}
