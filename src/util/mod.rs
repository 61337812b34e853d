//! Shared utilities for the viewer.

/// Wall-clock frame timer.
pub mod frame_timing;
