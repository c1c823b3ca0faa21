use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a waypoint vertex.
    ///
    /// Generational: stays valid across unrelated insertions and
    /// removals, and is never reused after its vertex is removed.
    pub struct VertexId;
}

/// Data associated with a waypoint vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 3D position of the vertex. Multiple vertices may coincide.
    pub point: Point3,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }
}
