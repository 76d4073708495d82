//! Small utilities shared by the scene.

/// Time-driven trajectory frame sequencing.
pub mod trajectory;
