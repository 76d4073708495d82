// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Geometry pipeline for molecular trajectories and orbital isosurfaces.
//!
//! Each trajectory frame becomes one triangle mesh: atoms as spheres, bonds
//! as two-colored cylinders, and the positive and negative lobes of a
//! molecular orbital as marching-cubes isosurfaces. The output is a plain
//! vertex/index buffer pair laid out for an external wgpu pipeline.
//!
//! # Key entry points
//!
//! - [`scene::Scene`] - trajectory playback with per-frame mesh rebuilds
//! - [`scene::generate_frame_mesh`] - one-shot mesh for a single frame
//! - [`molecule::Frame`] - atoms plus orbital basis data of one frame
//! - [`options::Options`] - bond, orbital and playback settings (TOML
//!   presets)
//!
//! # Architecture
//!
//! Per frame, [`kernel::bonds`] infers bonds by distance and
//! [`renderer::geometry::ball_and_stick`] instances the primitive meshes.
//! [`kernel::orbital`] evaluates the contracted Gaussian basis at any point;
//! [`renderer::geometry::isosurface`] samples it on a coarse lattice and
//! refines only the cells that straddle the isovalue, triangulating the
//! finest cells with [`renderer::geometry::marching_cubes`]. Every append
//! into [`renderer::geometry::mesh::MeshBuffers`] is capacity checked
//! first, so a failed build never leaves partial instances behind.

pub mod error;
pub mod kernel;
pub mod molecule;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
