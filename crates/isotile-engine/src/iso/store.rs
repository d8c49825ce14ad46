use core::fmt;

use crate::coords::Vec3;

use super::Entity;

/// Generational handle into an [`EntityStore`].
///
/// A handle outlives its entity safely: once the slot is reused the generation
/// no longer matches and lookups return `None`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Owning arena of every entity in a scene.
#[derive(Debug, Default)]
pub struct EntityStore {
    slots: Vec<Slot>,
    free_indices: Vec<u32>,
    len: usize,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.len += 1;

        // Reuse a previously freed slot in O(1).
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityId { index, generation: slot.generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, entity: Some(entity) });
        EntityId { index, generation: 0 }
    }

    /// Removes an entity, invalidating every outstanding handle to it.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slot_mut(id)?;
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_indices.push(id.index);
        self.len -= 1;
        Some(entity)
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.entity.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slot_mut(id).and_then(|s| s.entity.as_mut())
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.get(id).map(Entity::position)
    }

    /// Moves an entity. Returns `true` only when the position actually changed.
    pub fn set_position(&mut self, id: EntityId, position: Vec3) -> bool {
        self.get_mut(id).is_some_and(|e| e.set_position(position))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.entity.as_ref().map(|e| {
                (EntityId { index: i as u32, generation: s.generation }, e)
            })
        })
    }

    fn slot_mut(&mut self, id: EntityId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
    }
}
