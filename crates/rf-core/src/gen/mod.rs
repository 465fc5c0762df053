//! Room generation passes, in pipeline order.

pub mod compat;
pub mod connector;
pub mod expand;
pub mod fill;
pub mod pipeline;
pub mod zone;

pub use pipeline::{generate_room, GenParams};
pub use zone::Zone;
