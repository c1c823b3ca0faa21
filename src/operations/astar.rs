use crate::error::{QueryError, Result};
use crate::graph::{NavGraph, Path, PathSegment, Scratch, SearchNode};

/// Computes the shortest path between two vertices with A*, using
/// straight-line distance to the target as the heuristic.
///
/// Because edge weights are the Euclidean distances between their
/// endpoints, the heuristic is admissible and consistent, and A* returns
/// the same total distance as [`DijkstraPath`](super::DijkstraPath).
pub struct AstarPath {
    source: usize,
    target: usize,
}

impl AstarPath {
    /// Creates a new `AstarPath` query between two dense vertex indices.
    #[must_use]
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    /// Executes the search.
    ///
    /// Open and closed lists are scanned linearly; the open node with
    /// the lowest f-cost wins, ties broken by the lowest h-cost, first
    /// such node found. The linear scan keeps the tie-break order
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoPath`] if the open list empties before
    /// the target is reached.
    ///
    /// # Panics
    ///
    /// Panics if the graph is dirty or either index is out of range.
    pub fn execute(&self, graph: &mut NavGraph) -> Result<Path> {
        graph.assert_ready();
        graph.assert_vertex(self.source);
        graph.assert_vertex(self.target);

        let (n, matrix, positions, scratch) = graph.search_parts();
        let Scratch { open, closed, .. } = scratch;
        open.clear();
        closed.clear();

        let target_pos = positions[self.target];

        open.push(SearchNode {
            vertex: self.source,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
        });

        let mut found = None;

        while !open.is_empty() {
            let mut best = 0;
            for (slot, node) in open.iter().enumerate().skip(1) {
                let leader = &open[best];
                if node.f < leader.f || (node.f == leader.f && node.h < leader.h) {
                    best = slot;
                }
            }
            let current = open.swap_remove(best);
            closed.push(current);
            let current_slot = closed.len() - 1;

            if current.vertex == self.target {
                found = Some(current_slot);
                break;
            }

            for i in 0..n {
                let weight = matrix[current.vertex * n + i];
                if weight < 0.0 {
                    continue;
                }
                if closed.iter().any(|node| node.vertex == i) {
                    continue;
                }

                let g = current.g + weight;
                let h = (positions[i] - target_pos).norm();
                let candidate = SearchNode {
                    vertex: i,
                    g,
                    h,
                    f: g + h,
                    parent: Some(current_slot),
                };

                if let Some(existing) = open.iter_mut().find(|node| node.vertex == i) {
                    if candidate.f < existing.f {
                        *existing = candidate;
                    }
                } else {
                    open.push(candidate);
                }
            }
        }

        let Some(mut slot) = found else {
            return Err(QueryError::NoPath {
                source: self.source,
                target: self.target,
            }
            .into());
        };

        // Walk the closed-list parent chain back to the source.
        let mut reversed = Vec::new();
        loop {
            let node = graph.scratch.closed[slot];
            reversed.push(node);
            match node.parent {
                Some(p) => slot = p,
                None => break,
            }
        }

        let segments = reversed
            .iter()
            .rev()
            .map(|node| PathSegment {
                vertex: node.vertex,
                distance: node.g,
                position: graph.position(node.vertex),
            })
            .collect();

        Ok(Path { segments })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::WaygraphError;
    use crate::math::Point3;
    use crate::operations::DijkstraPath;
    use crate::topology::{EdgeData, VertexData};

    fn unit_cycle() -> (NavGraph, [usize; 4]) {
        let mut g = NavGraph::new();
        let v0 = g.add_vertex(VertexData::new(Point3::new(0.0, 0.0, 0.0)));
        let v1 = g.add_vertex(VertexData::new(Point3::new(1.0, 0.0, 0.0)));
        let v2 = g.add_vertex(VertexData::new(Point3::new(1.0, 1.0, 0.0)));
        let v3 = g.add_vertex(VertexData::new(Point3::new(0.0, 1.0, 0.0)));
        g.add_edge(EdgeData::bidirectional(v0, v1));
        g.add_edge(EdgeData::bidirectional(v1, v2));
        g.add_edge(EdgeData::bidirectional(v2, v3));
        g.add_edge(EdgeData::bidirectional(v3, v0));
        g.rebuild().unwrap();
        let idx = [
            g.index_of(v0).unwrap(),
            g.index_of(v1).unwrap(),
            g.index_of(v2).unwrap(),
            g.index_of(v3).unwrap(),
        ];
        (g, idx)
    }

    /// Irregular three-dimensional graph used for the reference
    /// cross-check below.
    fn crooked_graph() -> NavGraph {
        let mut g = NavGraph::new();
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(4.0, 0.0, 1.0),
            Point3::new(1.0, 3.0, 0.0),
            Point3::new(3.0, 3.0, 2.0),
            Point3::new(5.0, 2.0, 0.0),
        ];
        let ids: Vec<_> = points
            .iter()
            .map(|p| g.add_vertex(VertexData::new(*p)))
            .collect();
        for &(a, b) in &[(0, 1), (1, 2), (0, 3), (3, 4), (4, 5), (2, 5), (1, 4)] {
            g.add_edge(EdgeData::bidirectional(ids[a], ids[b]));
        }
        g.rebuild().unwrap();
        g
    }

    /// All-pairs shortest distances by Floyd-Warshall, straight off the
    /// compiled matrix.
    fn floyd_warshall(g: &NavGraph) -> Vec<Vec<f64>> {
        let n = g.vertex_count();
        let mut d = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = 0.0;
            for (j, cell) in row.iter_mut().enumerate() {
                let w = g.weight(i, j);
                if w >= 0.0 && w < *cell {
                    *cell = w;
                }
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let via = d[i][k] + d[k][j];
                    if via < d[i][j] {
                        d[i][j] = via;
                    }
                }
            }
        }
        d
    }

    #[test]
    fn agrees_with_dijkstra_and_reference() {
        let mut g = crooked_graph();
        let reference = floyd_warshall(&g);
        let n = g.vertex_count();
        for s in 0..n {
            for t in 0..n {
                let astar = AstarPath::new(s, t).execute(&mut g).unwrap();
                let dijkstra = DijkstraPath::new(s, t).execute(&mut g).unwrap();
                assert!(
                    (astar.total_distance() - reference[s][t]).abs() < 1e-9,
                    "a* {s}->{t}: {} vs {}",
                    astar.total_distance(),
                    reference[s][t]
                );
                assert!(
                    (dijkstra.total_distance() - reference[s][t]).abs() < 1e-9,
                    "dijkstra {s}->{t}: {} vs {}",
                    dijkstra.total_distance(),
                    reference[s][t]
                );
            }
        }
    }

    #[test]
    fn cycle_opposite_corners() {
        let (mut g, [v0, v1, v2, v3]) = unit_cycle();
        let path = AstarPath::new(v0, v2).execute(&mut g).unwrap();
        assert!((path.total_distance() - 2.0).abs() < 1e-12);
        assert_eq!(path.len(), 3);
        let mid = path.segments[1].vertex;
        assert!(mid == v1 || mid == v3);
    }

    #[test]
    fn source_equals_target() {
        let (mut g, [v0, ..]) = unit_cycle();
        let path = AstarPath::new(v0, v0).execute(&mut g).unwrap();
        assert_eq!(path.len(), 1);
        assert!(path.total_distance().abs() < 1e-12);
    }

    #[test]
    fn one_way_edge_blocks_reverse_travel() {
        let mut g = NavGraph::new();
        let a = g.add_vertex(VertexData::new(Point3::new(0.0, 0.0, 0.0)));
        let b = g.add_vertex(VertexData::new(Point3::new(7.0, 0.0, 0.0)));
        g.add_edge(EdgeData::one_way(a, b));
        g.rebuild().unwrap();
        let (ia, ib) = (g.index_of(a).unwrap(), g.index_of(b).unwrap());

        let forward = AstarPath::new(ia, ib).execute(&mut g).unwrap();
        assert!((forward.total_distance() - 7.0).abs() < 1e-12);

        let back = AstarPath::new(ib, ia).execute(&mut g);
        assert!(matches!(
            back,
            Err(WaygraphError::Query(QueryError::NoPath { .. }))
        ));
    }

    #[test]
    fn disconnected_target_fails() {
        let mut g = NavGraph::new();
        let a = g.add_vertex(VertexData::new(Point3::new(0.0, 0.0, 0.0)));
        let island = g.add_vertex(VertexData::new(Point3::new(9.0, 0.0, 0.0)));
        g.rebuild().unwrap();
        let (ia, ii) = (g.index_of(a).unwrap(), g.index_of(island).unwrap());
        let result = AstarPath::new(ia, ii).execute(&mut g);
        assert!(matches!(
            result,
            Err(WaygraphError::Query(QueryError::NoPath { .. }))
        ));
    }

    #[test]
    fn equal_f_tie_breaks_on_lower_h() {
        // Two routes of identical total length; the detour vertices sit
        // on the source-target line, so both open candidates carry
        // f = 4 and the one nearer the target (lower h) must win.
        let mut g = NavGraph::new();
        let s = g.add_vertex(VertexData::new(Point3::new(0.0, 0.0, 0.0)));
        let near = g.add_vertex(VertexData::new(Point3::new(1.0, 0.0, 0.0)));
        let far = g.add_vertex(VertexData::new(Point3::new(3.0, 0.0, 0.0)));
        let t = g.add_vertex(VertexData::new(Point3::new(4.0, 0.0, 0.0)));
        g.add_edge(EdgeData::bidirectional(s, near));
        g.add_edge(EdgeData::bidirectional(s, far));
        g.add_edge(EdgeData::bidirectional(near, t));
        g.add_edge(EdgeData::bidirectional(far, t));
        g.rebuild().unwrap();

        let (is, it) = (g.index_of(s).unwrap(), g.index_of(t).unwrap());
        let path = AstarPath::new(is, it).execute(&mut g).unwrap();
        assert!((path.total_distance() - 4.0).abs() < 1e-12);
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments[1].vertex, g.index_of(far).unwrap());
    }

    #[test]
    #[should_panic(expected = "stale")]
    fn dirty_graph_query_panics() {
        let (mut g, [v0, _, v2, _]) = unit_cycle();
        g.add_vertex(VertexData::new(Point3::new(9.0, 9.0, 9.0)));
        let _ = AstarPath::new(v0, v2).execute(&mut g);
    }
}
