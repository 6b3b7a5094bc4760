use std::collections::HashMap;

use crate::dns::ReverseAnswer;

/// Ordered map from address text to reverse lookup result.
///
/// Keys are unique and iterate in insertion order. Inserting an existing key
/// replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NearbyMap {
    entries: Vec<(String, ReverseAnswer)>,
    // Key -> position in `entries`
    index: HashMap<String, usize>,
}

impl NearbyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, ip: String, answer: ReverseAnswer) {
        match self.index.get(&ip) {
            Some(&position) => self.entries[position].1 = answer,
            None => {
                self.index.insert(ip.clone(), self.entries.len());
                self.entries.push((ip, answer));
            }
        }
    }

    /// Looks up an address.
    pub fn get(&self, ip: &str) -> Option<&ReverseAnswer> {
        self.index
            .get(ip)
            .map(|&position| &self.entries[position].1)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Addresses in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReverseAnswer)> {
        self.entries.iter().map(|(key, answer)| (key.as_str(), answer))
    }

    /// Address to primary hostname pairs, in insertion order.
    pub fn hostnames(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .map(|(key, answer)| (key, answer.hostname().unwrap_or_default()))
    }
}
