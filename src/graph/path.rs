use crate::math::Point3;

/// One waypoint of a computed path.
#[derive(Debug, Clone, Copy)]
pub struct PathSegment {
    /// Dense index of the vertex this segment passes through.
    pub vertex: usize,
    /// Accumulated travel distance from the path's source.
    pub distance: f64,
    /// Vertex position, copied when the path was built.
    pub position: Point3,
}

/// An ordered walk across the graph: first segment is the source,
/// last is the target, and segment distances are non-decreasing.
#[derive(Debug, Clone, Default)]
pub struct Path {
    /// Segments in travel order.
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// Total travel distance from source to target.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.distance)
    }

    /// Number of waypoints in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path holds no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
