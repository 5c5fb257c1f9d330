use std::collections::VecDeque;

use crate::population::NodeId;

use super::NetworkError;

/// Orders the nodes such that every node comes after all of its children,
/// i.e. from the tips towards the root (Kahn's algorithm).
///
/// `num_children[i]` counts the child edges of node `i`, and
/// `parent_nodes[i]` lists the parent node index of each of its parent edges.
pub(super) fn reverse_topological_order(
    ids: &[NodeId],
    num_children: &[usize],
    parent_nodes: &[Vec<usize>],
) -> Result<Vec<usize>, NetworkError> {
    let mut pending_children = num_children.to_vec();

    let mut ready = pending_children
        .iter()
        .enumerate()
        .filter_map(|(i, pending)| (*pending == 0).then_some(i))
        .collect::<VecDeque<_>>();

    let mut order = Vec::with_capacity(ids.len());

    while let Some(node) = ready.pop_front() {
        order.push(node);

        // Parallel edges list the same parent twice, once per edge
        for parent in &parent_nodes[node] {
            pending_children[*parent] -= 1;

            if pending_children[*parent] == 0 {
                ready.push_back(*parent);
            }
        }
    }

    if order.len() < ids.len() {
        let stuck = pending_children
            .iter()
            .position(|pending| *pending > 0)
            .unwrap_or_default();

        return Err(NetworkError::Cycle(ids[stuck]));
    }

    Ok(order)
}
