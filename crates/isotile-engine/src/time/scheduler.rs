use std::collections::VecDeque;

/// Explicit registry of tick sources for one scene.
///
/// Keys are whatever the owner uses to find its tickables. Dispatch visits the
/// most recently registered key first; the depth-ordering graph, not this
/// order, decides what ends up on screen.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    entries: VecDeque<K>,
    frozen: bool,
}

impl<K: Copy + Eq> Scheduler<K> {
    pub fn new() -> Self {
        Self { entries: VecDeque::new(), frozen: false }
    }

    /// Registers `key` at the front of the dispatch order. Duplicate keys are ignored.
    pub fn register(&mut self, key: K) {
        if !self.entries.contains(&key) {
            self.entries.push_front(key);
        }
    }

    pub fn deregister(&mut self, key: K) -> bool {
        match self.entries.iter().position(|k| *k == key) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freezes every tick source at once.
    #[inline]
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Dispatch order, newest first.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().copied()
    }

    /// Hands `elapsed` to every registered key unless the scheduler is frozen.
    pub fn dispatch(&self, elapsed: f32, mut f: impl FnMut(K, f32)) {
        if self.frozen {
            return;
        }
        for key in self.keys() {
            f(key, elapsed);
        }
    }
}

impl<K: Copy + Eq> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
