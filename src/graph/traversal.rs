use super::connection::Connection;
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Borrowed adjacency view over a connection list (edge = source -> target).
///
/// Built fresh for every query; graphs on a canvas stay small enough that
/// an O(V + E) walk per validation is cheap.
pub(crate) struct Adjacency<'a> {
    outgoing: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    pub(crate) fn new(connections: &'a [Connection]) -> Self {
        let mut outgoing: AHashMap<&'a str, Vec<&'a str>> = AHashMap::new();
        for connection in connections {
            outgoing
                .entry(connection.source.as_str())
                .or_default()
                .push(connection.target.as_str());
        }
        Self { outgoing }
    }

    /// Iterative depth-first search: is `to` reachable from `from` along outgoing edges?
    pub(crate) fn has_path(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }
        let mut visited: AHashSet<&str> = AHashSet::new();
        let mut stack: Vec<&str> = vec![from];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(next) = self.outgoing.get(current) else {
                continue;
            };
            for &neighbour in next {
                if neighbour == to {
                    return true;
                }
                if !visited.contains(neighbour) {
                    stack.push(neighbour);
                }
            }
        }
        false
    }

    /// Whether adding `source -> target` would close a cycle.
    pub(crate) fn would_close_cycle(&self, source: &str, target: &str) -> bool {
        self.has_path(target, source)
    }

    /// Kahn ordering of `node_ids`. Ties keep the order in which ids were given.
    /// Edges touching ids outside `node_ids` are ignored.
    pub(crate) fn topological_order(&self, node_ids: &[&'a str]) -> Vec<String> {
        let known: AHashSet<&str> = node_ids.iter().copied().collect();
        let mut in_degree: AHashMap<&str, usize> = node_ids.iter().map(|id| (*id, 0)).collect();
        for (source, targets) in &self.outgoing {
            if !known.contains(source) {
                continue;
            }
            for target in targets {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree += 1;
                }
            }
        }

        let mut queue: VecDeque<&str> = node_ids
            .iter()
            .copied()
            .filter(|id| in_degree.get(id).copied() == Some(0))
            .collect();
        let mut order = Vec::with_capacity(node_ids.len());

        while let Some(current) = queue.pop_front() {
            order.push(current.to_string());
            let Some(targets) = self.outgoing.get(current) else {
                continue;
            };
            for target in targets {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(*target);
                    }
                }
            }
        }
        order
    }
}
