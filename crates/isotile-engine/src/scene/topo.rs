use super::node::{Mark, Node};

/// Depth-first postorder over every node, emitting each node after all of its
/// children. Uses an explicit `(node, next child)` stack, so graph depth does
/// not touch the call stack.
///
/// Roots are taken in slot order. A child found still in progress closes a
/// cycle; that edge is skipped and counted. Returns the number of such edges.
pub(crate) fn topological_order(nodes: &mut [Node], out: &mut Vec<usize>) -> usize {
    out.clear();
    for node in nodes.iter_mut() {
        node.mark = Mark::Unvisited;
    }

    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut cycles = 0;

    for root in 0..nodes.len() {
        if nodes[root].mark != Mark::Unvisited {
            continue;
        }
        nodes[root].mark = Mark::InProgress;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (current, cursor) = *top;

            match nodes[current].children.get(cursor).copied() {
                Some(child) => {
                    top.1 += 1;
                    match nodes[child].mark {
                        Mark::Unvisited => {
                            nodes[child].mark = Mark::InProgress;
                            stack.push((child, 0));
                        }
                        Mark::InProgress => {
                            cycles += 1;
                            log::warn!(
                                "draw-order cycle between {} and {}",
                                nodes[current].entity,
                                nodes[child].entity
                            );
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    nodes[current].mark = Mark::Done;
                    out.push(current);
                    stack.pop();
                }
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::iso::{Entity, EntityStore};

    fn graph(edges: &[(usize, usize)], n: usize) -> Vec<Node> {
        let mut store = EntityStore::new();
        let mut nodes: Vec<Node> = (0..n)
            .map(|_| Node::new(store.spawn(Entity::default()), Rect::default(), 0))
            .collect();
        for &(parent, child) in edges {
            nodes[parent].attach_child(child);
        }
        nodes
    }

    fn position(order: &[usize], slot: usize) -> usize {
        order.iter().position(|&s| s == slot).unwrap()
    }

    #[test]
    fn children_come_first() {
        // 0 in front of 1, 1 in front of 2.
        let mut nodes = graph(&[(0, 1), (1, 2)], 3);
        let mut out = Vec::new();
        assert_eq!(topological_order(&mut nodes, &mut out), 0);
        assert_eq!(out, vec![2, 1, 0]);
    }

    #[test]
    fn every_node_emitted_once() {
        let mut nodes = graph(&[(3, 0), (3, 1), (1, 0), (4, 2)], 5);
        let mut out = Vec::new();
        topological_order(&mut nodes, &mut out);

        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
        assert!(position(&out, 0) < position(&out, 1));
        assert!(position(&out, 1) < position(&out, 3));
        assert!(position(&out, 2) < position(&out, 4));
    }

    #[test]
    fn cycle_is_reported_not_fatal() {
        let mut nodes = graph(&[(0, 1), (1, 2), (2, 0)], 3);
        let mut out = Vec::new();
        assert_eq!(topological_order(&mut nodes, &mut out), 1);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let n = 50_000;
        let edges: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        let mut nodes = graph(&edges, n);
        let mut out = Vec::new();
        topological_order(&mut nodes, &mut out);
        assert_eq!(out.first(), Some(&(n - 1)));
        assert_eq!(out.last(), Some(&0));
    }
}
