//! Scene context.
//!
//! A `Stage` owns everything one scene needs: the entity store, the depth
//! buffer over those entities, optional ground, and the movers. One
//! `update(elapsed)` call drives all of them through a shared scheduler.

use core::fmt;
use std::collections::HashMap;

use crate::coords::{GridPos, Vec2};
use crate::iso::{Entity, EntityId, EntityStore};
use crate::mobility::{Mobility, MobilityConfig, MobilityError, MobilityEvent, MobilityPolicy, MoveCtx};
use crate::scene::{DrawTarget, SceneBuffer, SceneBufferConfig};
use crate::terrain::Ground;
use crate::time::Scheduler;

#[derive(Debug, Clone, Default)]
pub struct StageConfig {
    pub buffer: SceneBufferConfig,
}

/// Handle to a mover attached to a [`Stage`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MoverId(u32);

impl fmt::Display for MoverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mover#{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Tickable {
    Buffer,
    Mover(MoverId),
}

pub struct Stage {
    entities: EntityStore,
    buffer: SceneBuffer,
    ground: Option<Box<dyn Ground>>,

    movers: HashMap<MoverId, Mobility>,
    next_mover: u32,
    scheduler: Scheduler<Tickable>,

    events: Vec<(MoverId, MobilityEvent)>,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let mut scheduler = Scheduler::new();
        // Registered first, so dispatched after every mover.
        scheduler.register(Tickable::Buffer);

        Self {
            entities: EntityStore::new(),
            buffer: SceneBuffer::new(config.buffer),
            ground: None,
            movers: HashMap::new(),
            next_mover: 0,
            scheduler,
            events: Vec::new(),
        }
    }

    pub fn with_ground(mut self, ground: impl Ground + 'static) -> Self {
        self.ground = Some(Box::new(ground));
        self
    }

    #[inline]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Direct store access. Moved entities are picked up by the next buffer step.
    #[inline]
    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    #[inline]
    pub fn buffer(&self) -> &SceneBuffer {
        &self.buffer
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut SceneBuffer {
        &mut self.buffer
    }

    pub fn ground(&self) -> Option<&dyn Ground> {
        self.ground.as_deref()
    }

    /// Adds an entity to the store and the depth buffer.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.entities.spawn(entity);
        self.buffer.add(&self.entities, id);
        id
    }

    /// Removes an entity together with its buffer node and any mover bound to it.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.despawn(id)?;
        self.buffer.remove(id);

        let bound: Vec<MoverId> = self
            .movers
            .iter()
            .filter(|(_, m)| m.target() == id)
            .map(|(&mid, _)| mid)
            .collect();
        for mid in bound {
            self.detach_mobility(mid);
        }
        Some(entity)
    }

    /// Binds a mover to `target` and registers it for ticking.
    pub fn attach_mobility(
        &mut self,
        target: EntityId,
        policy: MobilityPolicy,
        config: MobilityConfig,
    ) -> Result<MoverId, MobilityError> {
        let mut ctx = MoveCtx { entities: &mut self.entities, ground: self.ground.as_deref() };
        let mobility = Mobility::bind(target, policy, config, &mut ctx)?;

        let id = MoverId(self.next_mover);
        self.next_mover += 1;
        self.movers.insert(id, mobility);
        self.scheduler.register(Tickable::Mover(id));
        Ok(id)
    }

    pub fn detach_mobility(&mut self, id: MoverId) -> Option<Mobility> {
        self.scheduler.deregister(Tickable::Mover(id));
        self.movers.remove(&id)
    }

    #[inline]
    pub fn mover(&self, id: MoverId) -> Option<&Mobility> {
        self.movers.get(&id)
    }

    #[inline]
    pub fn mover_mut(&mut self, id: MoverId) -> Option<&mut Mobility> {
        self.movers.get_mut(&id)
    }

    /// Sends mover `id` towards `destination` under its policy.
    ///
    /// Strides issued immediately are recorded alongside tick events. A handle
    /// that was never attached, or has been detached, is an error.
    pub fn move_to(&mut self, id: MoverId, destination: GridPos) -> Result<(), MobilityError> {
        let Some(mobility) = self.movers.get_mut(&id) else {
            return Err(MobilityError::UnknownMover(id));
        };
        let mut ctx = MoveCtx { entities: &mut self.entities, ground: self.ground.as_deref() };
        let result = mobility.move_to(&mut ctx, destination);
        self.events.extend(mobility.drain_events().map(|e| (id, e)));
        result
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.scheduler.is_frozen()
    }

    /// Freezes every mover and the buffer at once.
    #[inline]
    pub fn set_frozen(&mut self, frozen: bool) {
        self.scheduler.set_frozen(frozen);
    }

    /// Advances the scene by `elapsed` seconds: movers first, then the buffer resort.
    pub fn update(&mut self, elapsed: f32) {
        let Self { entities, buffer, ground, movers, scheduler, events, .. } = self;
        let ground = ground.as_deref();

        scheduler.dispatch(elapsed, |key, dt| match key {
            Tickable::Buffer => {
                buffer.tick(entities, dt);
            }
            Tickable::Mover(id) => {
                if let Some(mobility) = movers.get_mut(&id) {
                    let mut ctx = MoveCtx { entities: &mut *entities, ground };
                    mobility.tick(&mut ctx, dt);
                    events.extend(mobility.drain_events().map(|e| (id, e)));
                }
            }
        });
    }

    /// Drains mover events collected since the last call, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, (MoverId, MobilityEvent)> {
        self.events.drain(..)
    }

    /// Emits the scene back to front through `target`.
    pub fn draw(&self, origin: Vec2, target: &mut impl DrawTarget) {
        self.buffer.draw(&self.entities, origin, target);
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec3};
    use crate::terrain::HeightField;

    #[test]
    fn spawn_registers_with_buffer() {
        let mut stage = Stage::default();
        let id = stage.spawn(Entity::new(Vec3::zero()));
        assert!(stage.buffer().contains(id));

        stage.despawn(id);
        assert!(!stage.buffer().contains(id));
        assert!(stage.entities().is_empty());
    }

    #[test]
    fn despawn_detaches_movers() {
        let mut stage = Stage::default();
        let id = stage.spawn(Entity::new(Vec3::zero()));
        let mover = stage
            .attach_mobility(id, MobilityPolicy::Direct, MobilityConfig::default())
            .unwrap();

        stage.despawn(id);
        assert!(stage.mover(mover).is_none());
        stage.update(1.0);
    }

    #[test]
    fn move_to_detached_mover_is_rejected() {
        let mut stage = Stage::default();
        let id = stage.spawn(Entity::new(Vec3::zero()));
        let mover = stage
            .attach_mobility(id, MobilityPolicy::Direct, MobilityConfig::default())
            .unwrap();

        stage.detach_mobility(mover);
        assert_eq!(
            stage.move_to(mover, GridPos::new(3, 0)),
            Err(MobilityError::UnknownMover(mover))
        );
        assert_eq!(stage.drain_events().count(), 0);
        assert_eq!(
            MobilityError::UnknownMover(mover).to_string(),
            format!("unknown mover {mover}")
        );
    }

    #[test]
    fn update_moves_then_resorts() {
        let sprite = Rect::new(-200.0, -200.0, 400.0, 400.0);
        let mut stage = Stage::new(StageConfig::default()).with_ground(HeightField::flat(8, 8, 0.0));
        let walker = stage.spawn(Entity::new(Vec3::new(0.0, 0.0, 0.0)).with_bounds(sprite));
        let post = stage.spawn(Entity::new(Vec3::new(2.0, 2.0, 0.0)).with_bounds(sprite));
        stage.update(1.0 / 30.0);
        assert_eq!(stage.buffer().order(), &[walker, post]);

        let mover = stage
            .attach_mobility(walker, MobilityPolicy::Direct, MobilityConfig { speed: 4.0, framerate: 60.0 })
            .unwrap();
        stage.move_to(mover, GridPos::new(4, 4)).unwrap();

        for _ in 0..120 {
            stage.update(1.0 / 60.0);
        }

        assert_eq!(stage.entities().position(walker), Some(Vec3::new(4.0, 4.0, 0.0)));
        assert_eq!(stage.buffer().order(), &[post, walker]);
        assert!(stage
            .drain_events()
            .any(|(id, e)| id == mover && matches!(e, MobilityEvent::Arrived { .. })));
    }

    #[test]
    fn frozen_stage_holds_still() {
        let mut stage = Stage::default();
        let id = stage.spawn(Entity::new(Vec3::zero()));
        let mover = stage
            .attach_mobility(id, MobilityPolicy::Direct, MobilityConfig::default())
            .unwrap();
        stage.move_to(mover, GridPos::new(3, 0)).unwrap();

        stage.set_frozen(true);
        stage.update(1.0);
        assert_eq!(stage.entities().position(id), Some(Vec3::zero()));

        stage.set_frozen(false);
        stage.update(1.0);
        let x = stage.entities().position(id).unwrap().x;
        assert!((x - 1.0).abs() < 1e-3, "x = {x}");
        assert!(stage.mover(mover).unwrap().is_moving());
    }
}
