// src/story/map.rs
use std::collections::HashMap;

/// Insertion-ordered map keyed by story id.
///
/// Iteration follows first-insertion order; re-inserting an existing id
/// replaces the value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for StoryMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> StoryMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
            index: HashMap::with_capacity(cap),
        }
    }

    /// Returns the previous value when `id` was already present.
    pub fn insert(&mut self, id: impl Into<String>, value: V) -> Option<V> {
        let id = id.into();
        if let Some(&pos) = self.index.get(&id) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, value));
        None
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.index.get(id).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for StoryMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StoryMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V> IntoIterator for StoryMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
