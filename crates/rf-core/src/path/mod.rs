//! Traversal graph, pathfinding and room scoring.

pub mod builder;
pub mod graph;
pub mod score;

pub use builder::generate_paths;
pub use graph::{remove_intersecting_connections, AnchorGraph};
pub use score::InterestingnessResult;
