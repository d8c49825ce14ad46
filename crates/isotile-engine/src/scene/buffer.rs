use crate::coords::Vec2;
use crate::iso::{EntityId, EntityStore, IsoProjection};
use crate::time::{Ticker, DEFAULT_FRAMERATE};

use super::draw::{DrawTarget, Transform};
use super::node::Node;
use super::order::draws_over;
use super::topo::topological_order;

/// Scene buffer configuration.
///
/// `full_sort_ratio` is the dirty fraction above which a tick rebuilds the
/// whole graph instead of patching it. It only trades speed; both paths
/// produce the same order.
#[derive(Debug, Clone)]
pub struct SceneBufferConfig {
    pub projection: IsoProjection,
    pub framerate: f32,
    pub full_sort_ratio: f32,
}

impl Default for SceneBufferConfig {
    fn default() -> Self {
        Self {
            projection: IsoProjection::default(),
            framerate: DEFAULT_FRAMERATE,
            full_sort_ratio: 0.5,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SortKind {
    Full,
    Partial,
}

/// Summary of one resort.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SortStats {
    pub kind: SortKind,
    pub nodes: usize,
    pub dirty: usize,
    pub edges: usize,
    pub cycles: usize,
}

/// Painter's-order buffer over a dynamic set of entities.
///
/// The buffer does not own entities. It keeps one node per registered
/// `EntityId` and, on each step, polls the store for entities that moved or
/// were despawned.
///
/// Nodes are kept in registration order; slot order doubles as the tie-break
/// order of the occlusion test.
#[derive(Debug)]
pub struct SceneBuffer {
    config: SceneBufferConfig,
    ticker: Ticker,
    nodes: Vec<Node>,

    order: Vec<EntityId>,
    scratch: Vec<usize>,
    dirty: bool,

    #[cfg(test)]
    polls: usize,
}

impl SceneBuffer {
    pub fn new(config: SceneBufferConfig) -> Self {
        let ticker = Ticker::new(config.framerate);
        Self {
            config,
            ticker,
            nodes: Vec::new(),
            order: Vec::new(),
            scratch: Vec::new(),
            dirty: false,
            #[cfg(test)]
            polls: 0,
        }
    }

    #[inline]
    pub fn projection(&self) -> IsoProjection {
        self.config.projection
    }

    #[inline]
    pub fn ticker_mut(&mut self) -> &mut Ticker {
        &mut self.ticker
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `true` when the order is stale and the next step will resort.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn dirty_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.dirty).count()
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Back-to-front order produced by the most recent sort.
    #[inline]
    pub fn order(&self) -> &[EntityId] {
        &self.order
    }

    /// Registers an entity. Returns `false` if it is unknown to `store` or already registered.
    pub fn add(&mut self, store: &EntityStore, id: EntityId) -> bool {
        let Some(entity) = store.get(id) else {
            log::debug!("scene buffer: refusing unknown entity {id}");
            return false;
        };
        if self.contains(id) {
            return false;
        }

        let bounds = entity.global_bounds(self.config.projection);
        self.nodes.push(Node::new(id, bounds, entity.revision()));
        self.dirty = true;

        log::debug!("scene buffer: added {id} ({} nodes)", self.nodes.len());
        true
    }

    /// Unregisters an entity and detaches it from every other node.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slot_of(id) else {
            return false;
        };
        self.remove_slot(slot);
        log::debug!("scene buffer: removed {id} ({} nodes)", self.nodes.len());
        true
    }

    /// Drops every node at once, skipping per-node detach work.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.dirty = false;
    }

    /// Polls the store: moved entities get fresh bounds and a dirty mark,
    /// despawned entities lose their node. Returns how many nodes were dirtied.
    pub fn refresh(&mut self, store: &EntityStore) -> usize {
        #[cfg(test)]
        {
            self.polls += 1;
        }
        let projection = self.config.projection;
        let mut moved = 0;
        let mut slot = 0;

        while slot < self.nodes.len() {
            let node = &mut self.nodes[slot];
            match store.get(node.entity) {
                None => {
                    log::debug!("scene buffer: dropping despawned {}", node.entity);
                    self.remove_slot(slot);
                    continue;
                }
                Some(entity) => {
                    if entity.revision() != node.revision {
                        node.revision = entity.revision();
                        node.bounds = entity.global_bounds(projection);
                        if !node.dirty {
                            node.dirty = true;
                            moved += 1;
                        }
                        self.dirty = true;
                    }
                }
            }
            slot += 1;
        }

        moved
    }

    /// Full rebuild: every overlapping pair is tested once.
    pub fn sort(&mut self, store: &EntityStore) -> SortStats {
        self.refresh(store);
        self.sort_refreshed(store)
    }

    /// Incremental rebuild: only edges touching a dirty node are recomputed.
    pub fn partial_sort(&mut self, store: &EntityStore) -> SortStats {
        self.refresh(store);
        self.partial_sort_refreshed(store)
    }

    /// Resorts if anything is stale, choosing full or partial by the dirty fraction.
    pub fn resolve(&mut self, store: &EntityStore) -> Option<SortStats> {
        self.refresh(store);
        if !self.dirty {
            return None;
        }

        let threshold = self.nodes.len() as f32 * self.config.full_sort_ratio;
        if self.dirty_count() as f32 > threshold {
            Some(self.sort_refreshed(store))
        } else {
            Some(self.partial_sort_refreshed(store))
        }
    }

    fn sort_refreshed(&mut self, store: &EntityStore) -> SortStats {
        let dirty = self.dirty_count();

        for node in &mut self.nodes {
            node.children.clear();
        }

        for a in 0..self.nodes.len() {
            for b in (a + 1)..self.nodes.len() {
                if self.nodes[a].bounds.intersects(self.nodes[b].bounds) {
                    self.attach(store, a, b);
                }
            }
            self.nodes[a].dirty = false;
        }

        self.finish(SortKind::Full, dirty)
    }

    fn partial_sort_refreshed(&mut self, store: &EntityStore) -> SortStats {
        let dirty_slots: Vec<usize> = (0..self.nodes.len()).filter(|&s| self.nodes[s].dirty).collect();

        for slot in 0..self.nodes.len() {
            if self.nodes[slot].dirty {
                self.nodes[slot].children.clear();
            } else {
                let nodes = &self.nodes;
                let keep: Vec<usize> = nodes[slot]
                    .children
                    .iter()
                    .copied()
                    .filter(|&c| !nodes[c].dirty)
                    .collect();
                self.nodes[slot].children = keep;
            }
        }

        for &d in &dirty_slots {
            for other in 0..self.nodes.len() {
                // Dirty pairs are handled once, from the earlier slot.
                if other == d || (self.nodes[other].dirty && other < d) {
                    continue;
                }
                if self.nodes[d].bounds.intersects(self.nodes[other].bounds) {
                    self.attach(store, d.min(other), d.max(other));
                }
            }
        }
        for &d in &dirty_slots {
            self.nodes[d].dirty = false;
        }

        self.finish(SortKind::Partial, dirty_slots.len())
    }

    /// Advances the buffer's own clock; every whole step resolves pending changes.
    /// Returns the stats of the last resort performed, if any.
    pub fn tick(&mut self, store: &EntityStore, elapsed: f32) -> Option<SortStats> {
        let steps = self.ticker.advance(elapsed);
        let mut last = None;
        for _ in 0..steps {
            if let Some(stats) = self.resolve(store) {
                last = Some(stats);
            }
        }
        last
    }

    /// Emits the last computed order, each entity translated to its screen position plus `origin`.
    pub fn draw(&self, store: &EntityStore, origin: Vec2, target: &mut impl DrawTarget) {
        let projection = self.config.projection;
        for &id in &self.order {
            if let Some(entity) = store.get(id) {
                let screen = entity.screen_position(projection);
                target.draw(id, Transform::from_translation(origin + screen));
            }
        }
    }

    fn slot_of(&self, id: EntityId) -> Option<usize> {
        self.nodes.iter().position(|n| n.entity == id)
    }

    fn remove_slot(&mut self, slot: usize) {
        let node = self.nodes.remove(slot);
        for other in &mut self.nodes {
            other.forget_slot(slot);
        }
        self.order.retain(|&e| e != node.entity);
    }

    /// Adds the single edge between `a` and `b` (`a < b`) as the occlusion test dictates.
    fn attach(&mut self, store: &EntityStore, a: usize, b: usize) {
        debug_assert!(a < b);
        let (Some(ea), Some(eb)) = (store.get(self.nodes[a].entity), store.get(self.nodes[b].entity)) else {
            return;
        };

        if draws_over(ea, eb) {
            self.nodes[a].attach_child(b);
        } else {
            self.nodes[b].attach_child(a);
        }
    }

    fn finish(&mut self, kind: SortKind, dirty: usize) -> SortStats {
        let cycles = topological_order(&mut self.nodes, &mut self.scratch);

        self.order.clear();
        self.order.extend(self.scratch.iter().map(|&s| self.nodes[s].entity));
        self.dirty = false;

        let stats = SortStats {
            kind,
            nodes: self.nodes.len(),
            dirty,
            edges: self.nodes.iter().map(|n| n.children.len()).sum(),
            cycles,
        };
        log::trace!(
            "scene buffer: {:?} sort, {} nodes, {} dirty, {} edges",
            stats.kind,
            stats.nodes,
            stats.dirty,
            stats.edges
        );
        stats
    }
}

impl Default for SceneBuffer {
    fn default() -> Self {
        Self::new(SceneBufferConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec3};
    use crate::iso::{Entity, HeightProfile};

    fn sprite() -> Rect {
        Rect::new(-16.0, -32.0, 32.0, 40.0)
    }

    fn spawn(store: &mut EntityStore, x: f32, y: f32, z: f32) -> EntityId {
        store.spawn(Entity::new(Vec3::new(x, y, z)).with_bounds(sprite()))
    }

    fn index_of(order: &[EntityId], id: EntityId) -> usize {
        order.iter().position(|&e| e == id).unwrap()
    }

    #[test]
    fn add_rejects_unknown_and_duplicate() {
        let mut store = EntityStore::new();
        let a = spawn(&mut store, 0.0, 0.0, 0.0);
        let ghost = spawn(&mut store, 1.0, 0.0, 0.0);
        store.despawn(ghost);

        let mut buf = SceneBuffer::default();
        assert!(buf.add(&store, a));
        assert!(!buf.add(&store, a));
        assert!(!buf.add(&store, ghost));
        assert_eq!(buf.len(), 1);
        assert!(buf.is_dirty());
    }

    #[test]
    fn pillar_draws_after_decal() {
        let mut store = EntityStore::new();
        let decal = store.spawn(
            Entity::new(Vec3::zero())
                .with_height(HeightProfile::Constant(0.0))
                .with_bounds(sprite()),
        );
        let pillar = store.spawn(
            Entity::new(Vec3::zero())
                .with_height(HeightProfile::Constant(2.0))
                .with_bounds(sprite()),
        );

        // Registration order must not matter.
        for (first, second) in [(decal, pillar), (pillar, decal)] {
            let mut buf = SceneBuffer::default();
            buf.add(&store, first);
            buf.add(&store, second);
            buf.sort(&store);
            assert!(index_of(buf.order(), decal) < index_of(buf.order(), pillar));
        }
    }

    #[test]
    fn row_of_tiles_sorts_back_to_front() {
        let mut store = EntityStore::new();
        let ids: Vec<EntityId> = (0..4).rev().map(|x| spawn(&mut store, x as f32, 0.0, 0.0)).collect();

        let mut buf = SceneBuffer::default();
        for &id in &ids {
            buf.add(&store, id);
        }
        let stats = buf.sort(&store);
        assert_eq!(stats.kind, SortKind::Full);
        assert_eq!(stats.cycles, 0);

        // ids were spawned front (x = 3) to back (x = 0).
        let expected: Vec<EntityId> = ids.iter().rev().copied().collect();
        assert_eq!(buf.order(), expected.as_slice());
    }

    #[test]
    fn distant_entities_share_no_edges() {
        let mut store = EntityStore::new();
        let a = spawn(&mut store, 0.0, 0.0, 0.0);
        let b = spawn(&mut store, 20.0, 20.0, 0.0);

        let mut buf = SceneBuffer::default();
        buf.add(&store, a);
        buf.add(&store, b);
        let stats = buf.sort(&store);
        assert_eq!(stats.edges, 0);
        assert_eq!(buf.order().len(), 2);
    }

    #[test]
    fn partial_sort_matches_full_sort_after_move() {
        let mut store = EntityStore::new();
        let mut ids = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                ids.push(spawn(&mut store, x as f32, y as f32, 0.0));
            }
        }
        let walker = spawn(&mut store, 0.0, 0.0, 1.0);
        ids.push(walker);

        let mut incremental = SceneBuffer::default();
        let mut reference = SceneBuffer::default();
        for &id in &ids {
            incremental.add(&store, id);
            reference.add(&store, id);
        }
        incremental.sort(&store);

        store.set_position(walker, Vec3::new(2.0, 1.0, 1.0));
        let stats = incremental.partial_sort(&store);
        assert_eq!(stats.kind, SortKind::Partial);
        assert_eq!(stats.dirty, 1);

        reference.sort(&store);
        assert_eq!(incremental.order(), reference.order());
    }

    #[test]
    fn remove_detaches_and_drops_from_order() {
        let mut store = EntityStore::new();
        let a = spawn(&mut store, 0.0, 0.0, 0.0);
        let b = spawn(&mut store, 1.0, 0.0, 0.0);
        let c = spawn(&mut store, 2.0, 0.0, 0.0);

        let mut buf = SceneBuffer::default();
        for id in [a, b, c] {
            buf.add(&store, id);
        }
        buf.sort(&store);

        assert!(buf.remove(b));
        assert!(!buf.remove(b));
        assert_eq!(buf.order(), &[a, c]);

        let stats = buf.sort(&store);
        assert_eq!(stats.nodes, 2);
        assert_eq!(buf.order(), &[a, c]);
    }

    #[test]
    fn despawned_entity_is_dropped_on_refresh() {
        let mut store = EntityStore::new();
        let a = spawn(&mut store, 0.0, 0.0, 0.0);
        let b = spawn(&mut store, 1.0, 0.0, 0.0);

        let mut buf = SceneBuffer::default();
        buf.add(&store, a);
        buf.add(&store, b);
        buf.sort(&store);

        store.despawn(a);
        buf.refresh(&store);
        assert!(!buf.contains(a));
        assert_eq!(buf.order(), &[b]);
    }

    #[test]
    fn resolve_picks_sort_kind_by_dirty_fraction() {
        let mut store = EntityStore::new();
        let ids: Vec<EntityId> = (0..4).map(|x| spawn(&mut store, x as f32, 0.0, 0.0)).collect();

        let mut buf = SceneBuffer::default();
        for &id in &ids {
            buf.add(&store, id);
        }
        assert_eq!(buf.resolve(&store).map(|s| s.kind), Some(SortKind::Full));
        assert_eq!(buf.resolve(&store), None);

        store.set_position(ids[0], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(buf.resolve(&store).map(|s| s.kind), Some(SortKind::Partial));

        for (i, &id) in ids.iter().take(3).enumerate() {
            store.set_position(id, Vec3::new(i as f32, 2.0, 0.0));
        }
        assert_eq!(buf.resolve(&store).map(|s| s.kind), Some(SortKind::Full));
    }

    #[test]
    fn resolve_polls_store_once() {
        let mut store = EntityStore::new();
        let ids: Vec<EntityId> = (0..4).map(|x| spawn(&mut store, x as f32, 0.0, 0.0)).collect();

        let mut buf = SceneBuffer::default();
        for &id in &ids {
            buf.add(&store, id);
        }
        buf.resolve(&store);
        assert_eq!(buf.polls, 1);

        store.set_position(ids[1], Vec3::new(1.0, 1.0, 0.0));
        let stats = buf.resolve(&store).unwrap();
        assert_eq!((stats.kind, stats.dirty), (SortKind::Partial, 1));
        assert_eq!(buf.polls, 2);

        buf.sort(&store);
        assert_eq!(buf.polls, 3);
    }

    #[test]
    fn tick_resolves_on_whole_steps_only() {
        let mut store = EntityStore::new();
        let a = spawn(&mut store, 0.0, 0.0, 0.0);

        let mut buf = SceneBuffer::default();
        buf.add(&store, a);
        assert_eq!(buf.tick(&store, 0.001), None);
        assert!(buf.is_dirty());

        let stats = buf.tick(&store, 0.1).unwrap();
        assert_eq!(stats.nodes, 1);
        assert!(!buf.is_dirty());
        assert_eq!(buf.order(), &[a]);
    }

    #[test]
    fn draw_translates_to_screen_position() {
        let mut store = EntityStore::new();
        let a = spawn(&mut store, 1.0, 0.0, 0.0);
        let b = spawn(&mut store, 1.0, 0.0, 1.0);

        let mut buf = SceneBuffer::default();
        buf.add(&store, a);
        buf.add(&store, b);
        buf.sort(&store);

        let mut calls = Vec::new();
        buf.draw(&store, Vec2::new(100.0, 50.0), &mut |e: EntityId, t: Transform| calls.push((e, t)));
        assert_eq!(
            calls,
            vec![
                (a, Transform::from_translation(Vec2::new(116.0, 62.0))),
                (b, Transform::from_translation(Vec2::new(116.0, 54.0))),
            ]
        );
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = EntityStore::new();
        let a = spawn(&mut store, 0.0, 0.0, 0.0);
        let mut buf = SceneBuffer::default();
        buf.add(&store, a);
        buf.sort(&store);
        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.order().is_empty());
        assert_eq!(buf.resolve(&store), None);
    }
}
