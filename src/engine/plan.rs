//! Per-frame draw ordering.
//!
//! A [`FramePlan`] is built from the current modes before any GPU work, so
//! the ordering rules can be checked without a device: opaque geometry first,
//! the skybox after it, and the monochrome pass last.

use crate::modes::RenderModes;
use crate::scene::Scene;

/// Where the scene's color output goes this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    /// Straight to the swapchain image.
    Display,
    /// To the monochrome pass's offscreen texture.
    Offscreen,
}

/// One draw call in the scene pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStep {
    /// The ground plane.
    Ground,
    /// Box `i` of the scene table.
    Box(usize),
    /// The normal-mapped wall; `height_map` binds the parallax height map.
    Wall {
        /// Whether the real height map is bound.
        height_map: bool,
    },
    /// The unlit light marker cube.
    LightMarker,
    /// The cube-mapped background.
    Skybox,
}

/// The ordered work for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlan {
    /// Target the scene pass writes color to.
    pub color_target: ColorTarget,
    /// Draws in submission order.
    pub steps: Vec<DrawStep>,
    /// Whether the monochrome pass runs after the scene.
    pub post_pass: bool,
}

impl FramePlan {
    /// Plan a frame of `scene` under `modes`.
    #[must_use]
    pub fn new(modes: RenderModes, scene: &Scene) -> Self {
        let mut steps = Vec::with_capacity(scene.boxes.len() + 4);
        steps.push(DrawStep::Ground);
        steps.extend((0..scene.boxes.len()).map(DrawStep::Box));
        if scene.wall.is_some() {
            steps.push(DrawStep::Wall {
                height_map: modes.parallax,
            });
        }
        if modes.lighting {
            steps.push(DrawStep::LightMarker);
        }
        if modes.skybox {
            steps.push(DrawStep::Skybox);
        }

        let color_target = if modes.monochrome {
            ColorTarget::Offscreen
        } else {
            ColorTarget::Display
        };

        Self {
            color_target,
            steps,
            post_pass: modes.monochrome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes() -> Vec<DrawStep> {
        (0..5).map(DrawStep::Box).collect()
    }

    #[test]
    fn default_modes_draw_lit_scene_to_display() {
        let plan = FramePlan::new(RenderModes::default(), &Scene::DEFAULT);
        let mut expected = vec![DrawStep::Ground];
        expected.extend(boxes());
        expected.push(DrawStep::Wall { height_map: false });
        expected.push(DrawStep::LightMarker);

        assert_eq!(plan.color_target, ColorTarget::Display);
        assert_eq!(plan.steps, expected);
        assert!(!plan.post_pass);
    }

    #[test]
    fn skybox_is_drawn_after_all_geometry() {
        let modes = RenderModes {
            skybox: true,
            ..Default::default()
        };
        let plan = FramePlan::new(modes, &Scene::DEFAULT);
        assert_eq!(plan.steps.last(), Some(&DrawStep::Skybox));
        assert_eq!(plan.steps.iter().filter(|s| **s == DrawStep::Skybox).count(), 1);
    }

    #[test]
    fn monochrome_renders_offscreen_then_post_pass() {
        let modes = RenderModes {
            monochrome: true,
            ..Default::default()
        };
        let plan = FramePlan::new(modes, &Scene::DEFAULT);
        assert_eq!(plan.color_target, ColorTarget::Offscreen);
        assert!(plan.post_pass);
    }

    #[test]
    fn lighting_off_hides_marker() {
        let modes = RenderModes {
            lighting: false,
            ..Default::default()
        };
        let plan = FramePlan::new(modes, &Scene::DEFAULT);
        assert!(!plan.steps.contains(&DrawStep::LightMarker));
        assert_eq!(plan.steps[0], DrawStep::Ground);
    }

    #[test]
    fn parallax_binds_height_map() {
        let modes = RenderModes {
            parallax: true,
            ..Default::default()
        };
        let plan = FramePlan::new(modes, &Scene::DEFAULT);
        assert!(plan.steps.contains(&DrawStep::Wall { height_map: true }));
    }

    #[test]
    fn scene_without_wall_skips_it() {
        let scene = Scene {
            wall: None,
            ..Scene::DEFAULT
        };
        let plan = FramePlan::new(RenderModes::default(), &scene);
        assert!(!plan
            .steps
            .iter()
            .any(|s| matches!(s, DrawStep::Wall { .. })));
        assert_eq!(plan.steps.len(), 1 + 5 + 1);
    }
}
