use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::iso::EntityId;

/// Per-entity placement handed to the renderer.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Transform {
    pub translation: Vec2,
}

impl Transform {
    #[inline]
    pub const fn from_translation(translation: Vec2) -> Self {
        Self { translation }
    }

    #[inline]
    pub fn translated(self, offset: Vec2) -> Self {
        Self::from_translation(self.translation + offset)
    }
}

/// Receiver of draw calls, in back-to-front order.
///
/// The scene decides what is drawn and in which order; how an entity is drawn
/// is entirely up to the implementor.
pub trait DrawTarget {
    fn draw(&mut self, entity: EntityId, transform: Transform);
}

impl<F> DrawTarget for F
where
    F: FnMut(EntityId, Transform),
{
    #[inline]
    fn draw(&mut self, entity: EntityId, transform: Transform) {
        self(entity, transform)
    }
}

/// GPU-friendly instance record. Layout matches a `vec2<f32>, vec2<u32>` vertex attribute pair.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub translation: [f32; 2],
    pub entity: [u32; 2],
}

impl DrawInstance {
    #[inline]
    pub fn new(entity: EntityId, transform: Transform) -> Self {
        Self {
            translation: [transform.translation.x, transform.translation.y],
            entity: [entity.index(), entity.generation()],
        }
    }
}

/// Records draw calls as instance data, ready for a single buffer upload.
///
/// Reuses its allocation across frames; call `clear` before each draw pass.
#[derive(Debug, Default)]
pub struct InstanceBuffer {
    instances: Vec<DrawInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    #[inline]
    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    /// Raw bytes of the recorded instances, in draw order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl DrawTarget for InstanceBuffer {
    #[inline]
    fn draw(&mut self, entity: EntityId, transform: Transform) {
        self.instances.push(DrawInstance::new(entity, transform));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iso::{Entity, EntityStore};

    #[test]
    fn instance_bytes_are_tightly_packed() {
        let mut store = EntityStore::new();
        let id = store.spawn(Entity::default());

        let mut buf = InstanceBuffer::new();
        buf.draw(id, Transform::from_translation(Vec2::new(1.0, 2.0)));
        buf.draw(id, Transform::default());

        assert_eq!(core::mem::size_of::<DrawInstance>(), 16);
        assert_eq!(buf.as_bytes().len(), 32);
        assert_eq!(buf.instances()[0].translation, [1.0, 2.0]);
    }

    #[test]
    fn closures_are_draw_targets() {
        let mut store = EntityStore::new();
        let id = store.spawn(Entity::default());

        let mut seen = Vec::new();
        let mut target = |e: EntityId, t: Transform| seen.push((e, t));
        target.draw(id, Transform::default().translated(Vec2::new(3.0, 0.0)));
        assert_eq!(seen, vec![(id, Transform::from_translation(Vec2::new(3.0, 0.0)))]);
    }
}
