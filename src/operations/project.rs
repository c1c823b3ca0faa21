use crate::error::{QueryError, Result};
use crate::graph::NavGraph;
use crate::math::nearest_sort::sort_by_distance;
use crate::math::{Point3, TOLERANCE, Vector3};

/// Visibility test injected into [`ProjectPosition`].
///
/// `blocked` answers whether a ray from `origin` along the unit vector
/// `direction` hits an obstruction within `max_distance`. Any
/// implementation works: a physics raycast, a grid lookup, or a stub
/// that always answers `false`.
pub trait ObstructionTest {
    fn blocked(&self, origin: Point3, direction: Vector3, max_distance: f64) -> bool;
}

impl<F> ObstructionTest for F
where
    F: Fn(Point3, Vector3, f64) -> bool,
{
    fn blocked(&self, origin: Point3, direction: Vector3, max_distance: f64) -> bool {
        self(origin, direction, max_distance)
    }
}

/// Result of projecting a world position onto the graph.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Dense index of the nearest visible vertex.
    pub vertex: usize,
    /// Other endpoint of the edge the query lies along, if any.
    pub toward: Option<usize>,
    /// Raw distance in world units from `vertex` along that edge to the
    /// query's projected point. Not a 0..1 ratio; callers wanting one
    /// divide by the edge length themselves. Zero when `toward` is
    /// `None`.
    pub progress: f64,
}

/// Maps an arbitrary world position onto the nearest reachable part of
/// the graph: a vertex, and optionally the edge the position lies along.
pub struct ProjectPosition {
    query: Point3,
}

impl ProjectPosition {
    /// Creates a new `ProjectPosition` query.
    #[must_use]
    pub fn new(query: Point3) -> Self {
        Self { query }
    }

    /// Executes the projection.
    ///
    /// Vertices are visited in ascending distance from the query; the
    /// first one the obstruction test can see becomes the anchor. A
    /// query within [`TOLERANCE`] of a vertex is trivially visible (the
    /// ray direction is not normalizable). The query is then matched
    /// against every edge touching the anchor: it aligns with an edge
    /// only when its projection falls strictly between the endpoints,
    /// and the aligning edge with the smallest perpendicular offset
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoVisibleVertex`] if every vertex is
    /// obstructed from the query position (or the graph has no
    /// vertices).
    ///
    /// # Panics
    ///
    /// Panics if the graph is dirty.
    pub fn execute(
        &self,
        graph: &mut NavGraph,
        obstruction: &impl ObstructionTest,
    ) -> Result<Projection> {
        graph.assert_ready();

        let query = self.query;
        let (positions, edges, index, scratch) = graph.project_parts();

        let keys = &mut scratch.sort_keys;
        let order = &mut scratch.sort_order;
        keys.clear();
        order.clear();
        for (i, p) in positions.iter().enumerate() {
            keys.push((query - p).norm());
            order.push(i);
        }
        sort_by_distance(keys, order);

        let mut anchor = None;
        for (slot, &v) in order.iter().enumerate() {
            let distance = keys[slot];
            let visible = if distance < TOLERANCE {
                true
            } else {
                let direction = (query - positions[v]) / distance;
                !obstruction.blocked(positions[v], direction, distance)
            };
            if visible {
                anchor = Some(v);
                break;
            }
        }
        let Some(vertex) = anchor else {
            return Err(QueryError::NoVisibleVertex.into());
        };

        let anchor_pos = positions[vertex];
        let mut best: Option<(usize, f64, f64)> = None;

        for edge in edges.values() {
            let (Some(&ea), Some(&eb)) = (index.get(edge.a), index.get(edge.b)) else {
                continue;
            };
            let second = if ea == vertex {
                eb
            } else if eb == vertex {
                ea
            } else {
                continue;
            };

            let second_pos = positions[second];
            let along = second_pos - anchor_pos;
            let to_query = query - anchor_pos;
            let from_second = query - second_pos;

            // The projection must fall strictly between the endpoints.
            let forward = along.dot(&to_query);
            if forward <= 0.0 || (-along).dot(&from_second) <= 0.0 {
                continue;
            }

            let progress = forward / along.norm();
            let offset_sq = to_query.norm_squared() - progress * progress;
            if best.is_none_or(|(_, _, best_sq)| offset_sq < best_sq) {
                best = Some((second, progress, offset_sq));
            }
        }

        Ok(match best {
            Some((second, progress, _)) => Projection {
                vertex,
                toward: Some(second),
                progress,
            },
            None => Projection {
                vertex,
                toward: None,
                progress: 0.0,
            },
        })
    }
}
