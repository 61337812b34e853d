//! Post-processing passes applied after the scene is drawn offscreen.

pub mod monochrome;
pub mod screen_pass;

pub use monochrome::MonochromePass;
pub use screen_pass::ScreenPass;
