use crate::coords::Rect;
use crate::iso::EntityId;

/// Traversal state of a node during one topological pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub(crate) enum Mark {
    #[default]
    Unvisited,
    InProgress,
    Done,
}

/// One entity's vertex in the draws-before graph.
///
/// `children` holds slot indices of nodes drawn behind this one, kept sorted
/// and free of duplicates.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub entity: EntityId,
    pub bounds: Rect,
    pub revision: u64,
    pub dirty: bool,
    pub mark: Mark,
    pub children: Vec<usize>,
}

impl Node {
    pub fn new(entity: EntityId, bounds: Rect, revision: u64) -> Self {
        Self {
            entity,
            bounds,
            revision,
            dirty: true,
            mark: Mark::Unvisited,
            children: Vec::new(),
        }
    }

    /// Inserts `child` into the ordered child set. Returns `false` if already present.
    pub fn attach_child(&mut self, child: usize) -> bool {
        match self.children.binary_search(&child) {
            Ok(_) => false,
            Err(at) => {
                self.children.insert(at, child);
                true
            }
        }
    }

    /// Fixes child indices after the node at `removed` left the slot list.
    pub fn forget_slot(&mut self, removed: usize) {
        self.children.retain(|&c| c != removed);
        for c in &mut self.children {
            if *c > removed {
                *c -= 1;
            }
        }
    }
}
