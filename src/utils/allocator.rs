use serde::{Deserialize, Serialize};

/// Stable handle to an item stored in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Append-only storage that hands out ids and iterates in insertion order.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn insert(&mut self, item: T) -> EntityId {
        let id = EntityId(self.items.len());
        self.items.push(item);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.get_mut(id.index())
    }

    /// First item matching `predicate`, with its id.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<(EntityId, &T)> {
        self.iter_with_ids().find(|(_, item)| predicate(item))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_with_ids(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (EntityId(index), item))
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
