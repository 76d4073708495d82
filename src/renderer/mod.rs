//! CPU-side geometry handed to the external wgpu pipeline.
//!
//! The renderer owns no GPU state. It produces one
//! [`geometry::mesh::MeshBuffers`] per frame whose vertex layout is
//! described by [`geometry::mesh::Vertex::buffer_layout`].

pub mod geometry;
