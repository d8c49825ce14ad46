use std::collections::{HashSet, VecDeque};

use crate::coords::GridPos;

/// Search frontier entry. `parent` indexes into the token arena of the same search.
#[derive(Debug, Copy, Clone)]
struct Token {
    position: GridPos,
    remaining: usize,
    parent: Option<usize>,
}

/// Shortest route from `source` to `destination` in at most `max_length` steps.
///
/// The result starts at the cell after `source` and ends at `destination`.
/// An empty result means either `source == destination` or no route exists
/// within the budget; neither is an error.
///
/// `is_valid_step(from, to)` is asked once per candidate edge. Neighbours are
/// tried west, east, north, south, which fixes the winner among equal-length routes.
pub fn shortest_path(
    source: GridPos,
    destination: GridPos,
    max_length: usize,
    mut is_valid_step: impl FnMut(GridPos, GridPos) -> bool,
) -> Vec<GridPos> {
    let mut tokens = vec![Token { position: source, remaining: max_length, parent: None }];
    let mut visited = HashSet::from([source]);
    let mut queue = VecDeque::from([0usize]);
    let mut found = None;

    while let Some(current) = queue.pop_front() {
        let token = tokens[current];

        if token.position == destination {
            found = Some(current);
            break;
        }

        if token.remaining == 0 {
            continue;
        }

        for next in token.position.neighbors() {
            if !visited.contains(&next) && is_valid_step(token.position, next) {
                visited.insert(next);
                tokens.push(Token {
                    position: next,
                    remaining: token.remaining - 1,
                    parent: Some(current),
                });
                queue.push_back(tokens.len() - 1);
            }
        }
    }

    let Some(mut at) = found else {
        log::debug!(
            "no path {source} -> {destination} within {max_length} steps ({} cells explored)",
            tokens.len()
        );
        return Vec::new();
    };

    let mut path = Vec::new();
    while let Some(parent) = tokens[at].parent {
        path.push(tokens[at].position);
        at = parent;
    }
    path.reverse();
    path
}

/// `shortest_path` without a length budget. Only terminates on bounded grids,
/// i.e. when `is_valid_step` rejects everything outside some finite region.
pub fn shortest_path_unbounded(
    source: GridPos,
    destination: GridPos,
    is_valid_step: impl FnMut(GridPos, GridPos) -> bool,
) -> Vec<GridPos> {
    shortest_path(source, destination, usize::MAX, is_valid_step)
}
