//! Camera and object transforms for one frame.

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::scene::Scene;

/// Near and far clip distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlanes {
    /// Near plane distance.
    pub znear: f32,
    /// Far plane distance.
    pub zfar: f32,
}

impl Default for ClipPlanes {
    fn default() -> Self {
        Self {
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

/// An object's model matrix and specular exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    /// Object to world transform.
    pub model: Mat4,
    /// Specular exponent.
    pub shininess: f32,
}

/// Every matrix a frame needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTransforms {
    /// World to view.
    pub view: Mat4,
    /// View to clip.
    pub projection: Mat4,
    /// Projection times the translation-free view.
    pub sky_view_projection: Mat4,
    /// Eye position.
    pub view_position: Vec3,
    /// Ground transform.
    pub ground: ObjectTransform,
    /// One entry per scene box, in table order.
    pub boxes: Vec<ObjectTransform>,
    /// Wall transform, when the scene has a wall.
    pub wall: Option<ObjectTransform>,
    /// Light marker transform.
    pub light: Mat4,
}

impl FrameTransforms {
    /// Evaluate the camera and every scene object at `elapsed_total`
    /// seconds since start.
    #[must_use]
    pub fn compute(
        camera: &Camera,
        aspect: f32,
        clip: ClipPlanes,
        scene: &Scene,
        elapsed_total: f32,
    ) -> Self {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix(aspect, clip.znear, clip.zfar);

        Self {
            view,
            projection,
            sky_view_projection: projection * camera.sky_view_matrix(),
            view_position: camera.position,
            ground: ObjectTransform {
                model: scene.ground.model(),
                shininess: scene.ground.shininess,
            },
            boxes: scene
                .boxes
                .iter()
                .map(|b| ObjectTransform {
                    model: b.model(elapsed_total),
                    shininess: b.shininess,
                })
                .collect(),
            wall: scene.wall.map(|w| ObjectTransform {
                model: w.model(elapsed_total),
                shininess: w.shininess,
            }),
            light: scene.light.model(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sky_matrix_ignores_camera_translation() {
        let mut camera = Camera::default();
        let scene = Scene::DEFAULT;
        let a = FrameTransforms::compute(&camera, 4.0 / 3.0, ClipPlanes::default(), &scene, 0.0);
        camera.position += Vec3::new(5.0, -2.0, 7.0);
        let b = FrameTransforms::compute(&camera, 4.0 / 3.0, ClipPlanes::default(), &scene, 0.0);

        assert!(a.sky_view_projection.abs_diff_eq(b.sky_view_projection, 1e-5));
        assert!(!a.view.abs_diff_eq(b.view, 1e-3));
    }

    #[test]
    fn one_transform_per_box_with_its_shininess() {
        let scene = Scene::DEFAULT;
        let t = FrameTransforms::compute(&Camera::default(), 1.0, ClipPlanes::default(), &scene, 2.0);
        assert_eq!(t.boxes.len(), scene.boxes.len());
        for (transform, b) in t.boxes.iter().zip(scene.boxes) {
            assert_eq!(transform.shininess, b.shininess);
            assert!(transform.model.abs_diff_eq(b.model(2.0), 1e-6));
        }
        assert_eq!(t.ground.model, Mat4::IDENTITY);
        assert!(t.wall.is_some());
    }

    #[test]
    fn projection_uses_zoom_and_aspect() {
        let camera = Camera::default();
        let t = FrameTransforms::compute(&camera, 2.0, ClipPlanes::default(), &Scene::DEFAULT, 0.0);
        let expected = Mat4::perspective_rh(camera.zoom().to_radians(), 2.0, 0.1, 100.0);
        assert!(t.projection.abs_diff_eq(expected, 1e-6));
        assert_eq!(t.view_position, camera.position);
    }

    #[test]
    fn light_marker_sits_at_light() {
        let scene = Scene::with_light(Vec3::new(2.0, 3.0, 4.0));
        let t = FrameTransforms::compute(&Camera::default(), 1.0, ClipPlanes::default(), &scene, 0.0);
        assert!(t
            .light
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(2.0, 3.0, 4.0), 1e-6));
    }
}
