//! Render-side view of the simulation
//!
//! Produces GPU-ready instance data and a chase camera. Owns no sim state;
//! a host renderer uploads `collect_instances` output once per frame.

pub mod camera;
pub mod instance;

pub use camera::Camera;
pub use instance::{Instance, InstanceKind, collect_instances, colors};
