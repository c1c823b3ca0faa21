use crate::error::{QueryError, Result};
use crate::graph::{NavGraph, Path, PathSegment};

/// Computes the shortest path between two vertices with Dijkstra's
/// algorithm over the dense adjacency matrix.
pub struct DijkstraPath {
    source: usize,
    target: usize,
}

impl DijkstraPath {
    /// Creates a new `DijkstraPath` query between two dense vertex
    /// indices.
    #[must_use]
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    /// Executes the search.
    ///
    /// Relaxes every vertex (O(V²) with linear minimum scans), then
    /// reconstructs the path by walking parent pointers from the target
    /// back to the source. `source == target` is a valid one-segment
    /// path with distance 0.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoPath`] if no chain of traversable edges
    /// connects source to target.
    ///
    /// # Panics
    ///
    /// Panics if the graph is dirty or either index is out of range.
    pub fn execute(&self, graph: &mut NavGraph) -> Result<Path> {
        graph.assert_ready();
        graph.assert_vertex(self.source);
        graph.assert_vertex(self.target);

        let (n, matrix, _, scratch) = graph.search_parts();

        let dist = &mut scratch.dist;
        let parent = &mut scratch.parent;
        let unsettled = &mut scratch.unsettled;
        let settled = &mut scratch.settled;

        dist.clear();
        dist.resize(n, f64::INFINITY);
        parent.clear();
        parent.resize(n, None);
        settled.clear();
        settled.resize(n, false);
        unsettled.clear();
        unsettled.extend(0..n);

        dist[self.source] = 0.0;

        while !unsettled.is_empty() {
            // Linear scan for the closest unsettled vertex.
            let mut best = 0;
            for (slot, &v) in unsettled.iter().enumerate() {
                if dist[v] < dist[unsettled[best]] {
                    best = slot;
                }
            }
            let v = unsettled.swap_remove(best);
            settled[v] = true;

            for i in 0..n {
                let weight = matrix[v * n + i];
                if weight < 0.0 || settled[i] {
                    continue;
                }
                let candidate = dist[v] + weight;
                if candidate < dist[i] {
                    dist[i] = candidate;
                    parent[i] = Some(v);
                }
            }
        }

        // Walk the parent chain target -> source.
        let mut reversed = vec![self.target];
        let mut current = self.target;
        while current != self.source {
            let Some(p) = parent[current] else {
                return Err(QueryError::NoPath {
                    source: self.source,
                    target: self.target,
                }
                .into());
            };
            current = p;
            reversed.push(current);
        }

        let segments = reversed
            .iter()
            .rev()
            .map(|&v| PathSegment {
                vertex: v,
                distance: graph.scratch.dist[v],
                position: graph.position(v),
            })
            .collect();

        Ok(Path { segments })
    }
}
