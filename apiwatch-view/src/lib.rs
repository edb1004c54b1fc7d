pub mod projector;

pub use projector::{Projection, project};
