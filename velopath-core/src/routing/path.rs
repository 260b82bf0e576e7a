//! Predecessor-map walk back into an ordered route

use hashbrown::HashMap;

use crate::NodeId;

/// Rebuilds the start-to-goal node sequence from a predecessor map.
///
/// Walks backward from `goal` until `start` is reached or the chain
/// breaks; a broken chain yields the partial suffix collected so far,
/// so callers confirm completeness by checking that the first element
/// equals `start`.
pub fn reconstruct_path(
    predecessors: &HashMap<NodeId, Option<NodeId>>,
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);

    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = predecessors.get(&node).copied().flatten();
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_back_to_start() {
        let predecessors: HashMap<_, _> =
            [(1, None), (2, Some(1)), (3, Some(2))].into_iter().collect();

        assert_eq!(reconstruct_path(&predecessors, 1, 3), vec![1, 2, 3]);
        assert_eq!(reconstruct_path(&predecessors, 1, 1), vec![1]);
    }

    #[test]
    fn broken_chain_yields_partial_suffix() {
        // 3's chain never reaches 1
        let predecessors: HashMap<_, _> = [(1, None), (3, Some(2))].into_iter().collect();

        let partial = reconstruct_path(&predecessors, 1, 3);
        assert_eq!(partial, vec![2, 3]);
        assert_ne!(partial.first(), Some(&1));
    }
}
