//! Peer registry of a collider
//!
//! Maps the colliders this one cares about to a one-character label, so
//! gameplay can ask "am I touching anything labelled `E`?" without walking
//! the whole world. Entries are only removed explicitly; a peer whose
//! entity was destroyed stays listed and is skipped at query time.

use std::collections::HashMap;

use crate::ecs::Entity;

/// Peer -> label map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRegistry {
    entries: HashMap<Entity, char>,
}

impl TagRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Label `peer`. Returns the label it had before, if any.
    pub fn insert(&mut self, peer: Entity, label: char) -> Option<char> {
        self.entries.insert(peer, label)
    }

    /// Forget `peer`
    pub fn remove(&mut self, peer: Entity) -> Option<char> {
        self.entries.remove(&peer)
    }

    /// Label of `peer`
    pub fn get(&self, peer: Entity) -> Option<char> {
        self.entries.get(&peer).copied()
    }

    /// Whether `peer` is registered
    pub fn contains(&self, peer: Entity) -> bool {
        self.entries.contains_key(&peer)
    }

    /// Number of registered peers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No peers registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every peer
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, char)> + '_ {
        self.entries.iter().map(|(peer, label)| (*peer, *label))
    }

    /// Peers carrying `label`
    pub fn peers_with(&self, label: char) -> impl Iterator<Item = Entity> + '_ {
        self.entries
            .iter()
            .filter(move |(_, l)| **l == label)
            .map(|(peer, _)| *peer)
    }

    /// Keep only the peers for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(Entity, char) -> bool) {
        self.entries.retain(|peer, label| keep(*peer, *label));
    }
}

impl FromIterator<(Entity, char)> for TagRegistry {
    fn from_iter<I: IntoIterator<Item = (Entity, char)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Entity, char)> for TagRegistry {
    fn extend<I: IntoIterator<Item = (Entity, char)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn entities(count: usize) -> Vec<Entity> {
        let mut map: SlotMap<Entity, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_insert_overwrites_label() {
        let e = entities(1);
        let mut tags = TagRegistry::new();
        assert_eq!(tags.insert(e[0], 'E'), None);
        assert_eq!(tags.insert(e[0], 'W'), Some('E'));
        assert_eq!(tags.get(e[0]), Some('W'));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_peers_with() {
        let e = entities(3);
        let tags: TagRegistry = [(e[0], 'E'), (e[1], 'W'), (e[2], 'E')].into_iter().collect();

        let mut enemies: Vec<Entity> = tags.peers_with('E').collect();
        enemies.sort();
        let mut expected = vec![e[0], e[2]];
        expected.sort();
        assert_eq!(enemies, expected);
        assert_eq!(tags.peers_with('X').count(), 0);
    }

    #[test]
    fn test_remove_and_retain() {
        let e = entities(3);
        let mut tags: TagRegistry = [(e[0], 'E'), (e[1], 'W'), (e[2], 'E')].into_iter().collect();

        assert_eq!(tags.remove(e[1]), Some('W'));
        assert_eq!(tags.remove(e[1]), None);

        tags.retain(|peer, _| peer != e[0]);
        assert!(!tags.contains(e[0]));
        assert!(tags.contains(e[2]));

        tags.clear();
        assert!(tags.is_empty());
    }
}
