//! Trajectory data model: elements, atoms, frames.

/// Atoms and their resolved display data.
pub mod atom;
/// Element table.
pub mod element;
/// Frames and trajectories.
pub mod frame;

pub use atom::Atom;
pub use element::Element;
pub use frame::{AtomicOrbital, Frame, GaussianPrimitive, Trajectory};
