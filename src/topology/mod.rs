pub mod edge;
pub mod vertex;

pub use edge::{EdgeData, EdgeDirection, EdgeId};
pub use vertex::{VertexData, VertexId};
