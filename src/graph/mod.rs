mod path;

pub use path::{Path, PathSegment};

use slotmap::{SecondaryMap, SlotMap};

use crate::error::TopologyError;
use crate::math::Point3;
use crate::topology::{EdgeData, EdgeDirection, EdgeId, VertexData, VertexId};

/// Adjacency matrix sentinel: travel between the two vertices is not
/// permitted. Legal entries are always `>= 0`.
pub const NO_EDGE: f64 = -1.0;

/// Central arena that owns the waypoint topology and its compiled form.
///
/// Vertices and edges are authored through stable generational Ids, in
/// any order. [`NavGraph::rebuild`] then compiles them into the dense
/// representation the queries run against: a vertex ordering, copied
/// positions, an Id-to-index table, and the adjacency matrix. Every
/// authoring mutation marks the graph dirty; queries on a dirty graph
/// panic rather than answer from a stale matrix.
///
/// Queries borrow the graph mutably because it also owns their reusable
/// scratch buffers, so at most one query can be in flight per instance.
#[derive(Debug, Default)]
pub struct NavGraph {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,

    // Compiled at rebuild time.
    order: Vec<VertexId>,
    index: SecondaryMap<VertexId, usize>,
    positions: Vec<Point3>,
    matrix: Vec<f64>,
    dirty: bool,

    pub(crate) scratch: Scratch,
}

/// Reusable per-instance query buffers.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    pub(crate) dist: Vec<f64>,
    pub(crate) parent: Vec<Option<usize>>,
    pub(crate) unsettled: Vec<usize>,
    pub(crate) settled: Vec<bool>,
    pub(crate) open: Vec<SearchNode>,
    pub(crate) closed: Vec<SearchNode>,
    pub(crate) sort_keys: Vec<f64>,
    pub(crate) sort_order: Vec<usize>,
}

/// A* bookkeeping for one vertex on the open or closed list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchNode {
    pub(crate) vertex: usize,
    pub(crate) g: f64,
    pub(crate) h: f64,
    pub(crate) f: f64,
    /// Index of the predecessor in the closed list.
    pub(crate) parent: Option<usize>,
}

impl NavGraph {
    /// Creates a new, empty graph. It starts dirty: [`NavGraph::rebuild`]
    /// must run before any query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    // --- Authoring ---

    /// Inserts a vertex and returns its stable Id.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.dirty = true;
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not found.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex data and marks the
    /// graph dirty.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not found.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.dirty = true;
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Removes a vertex, returning its data if it existed.
    ///
    /// Edges referencing the vertex are left in place; the next
    /// [`NavGraph::rebuild`] reports them as dangling.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<VertexData> {
        self.dirty = true;
        self.vertices.remove(id)
    }

    /// Inserts an edge and returns its stable Id.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.dirty = true;
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Returns a mutable reference to the edge data and marks the
    /// graph dirty.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.dirty = true;
        self.edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Removes an edge, returning its data if it existed.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<EdgeData> {
        self.dirty = true;
        self.edges.remove(id)
    }

    /// Iterates over all authored edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    // --- Compilation ---

    /// Compiles the authored topology into the dense form queries use.
    ///
    /// Assigns every live vertex a dense index, copies positions, and
    /// fills the adjacency matrix: for each traversable edge the entry
    /// is the Euclidean distance between its endpoints, written in the
    /// directions the edge permits; everything else stays [`NO_EDGE`].
    /// Must be called after any vertex or edge mutation; clears the
    /// dirty flag.
    ///
    /// # Errors
    ///
    /// Returns an error if any edge references a removed vertex.
    pub fn rebuild(&mut self) -> Result<(), TopologyError> {
        let n = self.vertices.len();

        self.order.clear();
        self.order.reserve(n);
        self.positions.clear();
        self.positions.reserve(n);
        self.index.clear();

        for (id, data) in &self.vertices {
            self.index.insert(id, self.order.len());
            self.order.push(id);
            self.positions.push(data.point);
        }

        self.matrix.clear();
        self.matrix.resize(n * n, NO_EDGE);

        for edge in self.edges.values() {
            let ia = *self
                .index
                .get(edge.a)
                .ok_or(TopologyError::DanglingEdge)?;
            let ib = *self
                .index
                .get(edge.b)
                .ok_or(TopologyError::DanglingEdge)?;

            if !edge.traversable {
                continue;
            }

            let weight = (self.positions[ia] - self.positions[ib]).norm();
            match edge.direction {
                EdgeDirection::Bidirectional => {
                    self.matrix[ia * n + ib] = weight;
                    self.matrix[ib * n + ia] = weight;
                }
                EdgeDirection::AToB => self.matrix[ia * n + ib] = weight,
                EdgeDirection::BToA => self.matrix[ib * n + ia] = weight,
            }
        }

        self.dirty = false;
        Ok(())
    }

    /// Whether the compiled form is out of date (or was never built).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // --- Compiled accessors ---

    /// Number of vertices in the compiled graph.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Dense index of a vertex as of the last rebuild, or `None` if the
    /// vertex was not part of it. This is the revalidation step for any
    /// index a caller held across a structural edit.
    #[must_use]
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Stable Id of the vertex at a dense index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn vertex_id(&self, index: usize) -> VertexId {
        self.order[index]
    }

    /// Position of the vertex at a dense index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn position(&self, index: usize) -> Point3 {
        self.positions[index]
    }

    /// Compiled adjacency entry for travel `from -> to`: the edge
    /// weight, or [`NO_EDGE`] if travel is not permitted.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        assert!(from < self.order.len() && to < self.order.len());
        self.matrix[from * self.order.len() + to]
    }

    /// Splits the graph into the pieces a path search needs: vertex
    /// count, row-major adjacency matrix, positions, and the scratch
    /// buffers. A field-level split so the matrix can be read while the
    /// scratch is written.
    pub(crate) fn search_parts(&mut self) -> (usize, &[f64], &[Point3], &mut Scratch) {
        (
            self.order.len(),
            &self.matrix,
            &self.positions,
            &mut self.scratch,
        )
    }

    /// Splits the graph into the pieces the position projector needs.
    pub(crate) fn project_parts(
        &mut self,
    ) -> (
        &[Point3],
        &SlotMap<EdgeId, EdgeData>,
        &SecondaryMap<VertexId, usize>,
        &mut Scratch,
    ) {
        (&self.positions, &self.edges, &self.index, &mut self.scratch)
    }

    /// Fails fast when a query reaches a graph whose compiled form is
    /// stale. A stale matrix would not error, it would silently return
    /// wrong paths.
    pub(crate) fn assert_ready(&self) {
        assert!(
            !self.dirty,
            "navigation graph queried before rebuild(); the adjacency matrix is stale"
        );
    }

    /// Fails fast on an out-of-range vertex index.
    pub(crate) fn assert_vertex(&self, index: usize) {
        assert!(
            index < self.order.len(),
            "vertex index {index} out of range for graph of {} vertices",
            self.order.len()
        );
    }
}
