mod edges;
mod graph;
mod layout;
mod render;

pub use graph::{AdjacencyList, Graph};
pub use layout::relax;
pub use render::render;
