mod astar;
mod dijkstra;
mod project;

pub use astar::AstarPath;
pub use dijkstra::DijkstraPath;
pub use project::{ObstructionTest, ProjectPosition, Projection};
