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
// GPU / graphics allowances: casts between pixel sizes and floats are
// intentional, and graphics math compares against exact constants.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

//! Real-time 3D scene viewer for classic shading techniques, built on wgpu.
//!
//! Shadelab renders a fixed scene (a textured ground plane, five rotating
//! boxes, a light marker, a normal-mapped wall and an optional skybox) with
//! per-fragment Phong / Blinn-Phong lighting, exponential distance fog,
//! tangent-space normal and parallax mapping, and a monochrome
//! post-processing pass. A first-person camera is driven by the keyboard
//! and mouse.
//!
//! # Key entry points
//!
//! - [`camera::Camera`] - yaw/pitch orientation model and view transform
//! - [`modes::RenderModes`] - the toggleable rendering modes
//! - [`engine::ViewerState`] - all non-GPU application state
//! - [`engine::FramePlan`] - the ordered, mode-dependent draw sequence
//! - [`engine::ViewerEngine`] - GPU resources and per-frame orchestration
//! - [`options::Options`] - TOML-backed runtime configuration
//!
//! # Architecture
//!
//! Everything runs on one thread. Each frame the engine advances the
//! [`engine::ViewerState`] (elapsed time, held movement keys, toggle edges),
//! builds a [`engine::FramePlan`] from the current modes, and records a
//! scene pass (ground, boxes, wall, light marker, skybox) into either the
//! swapchain or an offscreen target. When monochrome is active a final
//! screen-space pass converts the offscreen image to grayscale.

pub mod camera;
pub mod engine;
mod error;
pub mod gpu;
pub mod input;
pub mod modes;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;

pub use engine::{ViewerEngine, ViewerState};
pub use error::ViewerError;
pub use input::{InputEvent, KeyAction};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
