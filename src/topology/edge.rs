use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a waypoint edge.
    pub struct EdgeId;
}

/// Which directions of travel an edge permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Travel is permitted both ways.
    Bidirectional,
    /// Travel is permitted only from vertex `a` to vertex `b`.
    AToB,
    /// Travel is permitted only from vertex `b` to vertex `a`.
    BToA,
}

/// Data associated with a waypoint edge.
///
/// Endpoints are referenced by stable [`VertexId`], not by array
/// position, so an edge stays valid while unrelated vertices are added
/// or removed. The compiled adjacency matrix resolves Ids to dense
/// indices when the graph is rebuilt.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// First endpoint.
    pub a: VertexId,
    /// Second endpoint.
    pub b: VertexId,
    /// Permitted directions of travel.
    pub direction: EdgeDirection,
    /// Whether the edge currently admits travel at all. A
    /// non-traversable edge contributes nothing to the adjacency matrix.
    pub traversable: bool,
}

impl EdgeData {
    /// Creates a traversable edge permitting travel in both directions.
    #[must_use]
    pub fn bidirectional(a: VertexId, b: VertexId) -> Self {
        Self {
            a,
            b,
            direction: EdgeDirection::Bidirectional,
            traversable: true,
        }
    }

    /// Creates a traversable one-way edge from `a` to `b`.
    #[must_use]
    pub fn one_way(a: VertexId, b: VertexId) -> Self {
        Self {
            a,
            b,
            direction: EdgeDirection::AToB,
            traversable: true,
        }
    }

    /// Returns the endpoint opposite `v`, or `None` if `v` is not an
    /// endpoint of this edge.
    #[must_use]
    pub fn other_endpoint(&self, v: VertexId) -> Option<VertexId> {
        if v == self.a {
            Some(self.b)
        } else if v == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::topology::VertexData;
    use slotmap::SlotMap;

    #[test]
    fn other_endpoint_resolves_both_ways() {
        let mut vertices: SlotMap<VertexId, VertexData> = SlotMap::with_key();
        let a = vertices.insert(VertexData::new(Point3::new(0.0, 0.0, 0.0)));
        let b = vertices.insert(VertexData::new(Point3::new(1.0, 0.0, 0.0)));
        let c = vertices.insert(VertexData::new(Point3::new(2.0, 0.0, 0.0)));

        let edge = EdgeData::bidirectional(a, b);
        assert_eq!(edge.other_endpoint(a), Some(b));
        assert_eq!(edge.other_endpoint(b), Some(a));
        assert_eq!(edge.other_endpoint(c), None);
    }

    #[test]
    fn one_way_defaults() {
        let mut vertices: SlotMap<VertexId, VertexData> = SlotMap::with_key();
        let a = vertices.insert(VertexData::new(Point3::new(0.0, 0.0, 0.0)));
        let b = vertices.insert(VertexData::new(Point3::new(1.0, 0.0, 0.0)));

        let edge = EdgeData::one_way(a, b);
        assert_eq!(edge.direction, EdgeDirection::AToB);
        assert!(edge.traversable);
    }
}
