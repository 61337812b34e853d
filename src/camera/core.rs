use glam::{Mat3, Mat4, Vec3};

use crate::options::CameraOptions;

/// Default yaw in degrees. Together with [`DEFAULT_PITCH`] this looks down
/// the +Z axis, slightly downward.
pub const DEFAULT_YAW: f32 = -270.0;
/// Default pitch in degrees.
pub const DEFAULT_PITCH: f32 = -10.0;
/// Default movement speed in world units per second.
pub const DEFAULT_SPEED: f32 = 5.0;
/// Default mouse sensitivity in degrees per input unit.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Default (and maximum) vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 45.0;
/// Pitch is kept inside `[-PITCH_LIMIT, PITCH_LIMIT]` when constrained.
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view reachable by zooming, in degrees.
pub const MIN_ZOOM: f32 = 1.0;
/// Widest field of view reachable by zooming, in degrees.
pub const MAX_ZOOM: f32 = 45.0;

/// Discrete movement directions, relative to the camera orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along the front vector.
    Forward,
    /// Against the front vector.
    Backward,
    /// Against the right vector.
    Left,
    /// Along the right vector.
    Right,
}

/// First-person camera driven by yaw and pitch angles.
///
/// `front`, `right` and `up` are never set directly: every change to yaw or
/// pitch goes through [`Camera::update_vectors`], so the three always form a
/// right-handed orthonormal basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Reference up direction used to derive `right`.
    pub world_up: Vec3,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Degrees of rotation per unit of look input.
    pub sensitivity: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 12.0, -23.6), Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }
}

impl Camera {
    /// Create a camera at `position` with the given world-up vector and
    /// angles in degrees. Speed, sensitivity and zoom take their defaults.
    #[must_use]
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            world_up,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            yaw,
            pitch,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    /// Create a camera from the `[camera]` options section.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let mut camera = Self::new(
            Vec3::from_array(options.position),
            Vec3::Y,
            options.yaw,
            options.pitch,
        );
        camera.speed = options.speed;
        camera.sensitivity = options.sensitivity;
        camera.zoom = options.fovy.clamp(MIN_ZOOM, MAX_ZOOM);
        camera
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector pointing to the camera's right.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit vector pointing up relative to the view.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Right-handed look-at transform from the current position and basis.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// View matrix with the translation removed, for geometry that must
    /// appear infinitely far away.
    #[must_use]
    pub fn sky_view_matrix(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_mat4(self.view_matrix()))
    }

    /// Perspective projection using the current zoom as vertical FOV.
    ///
    /// `perspective_rh` already maps depth to `[0, 1]` (wgpu convention).
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, znear, zfar)
    }

    /// Move along the front or right vector by `speed * elapsed`.
    pub fn process_movement(&mut self, direction: CameraMovement, elapsed: f32) {
        let velocity = self.speed * elapsed;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Rotate by a look delta scaled by the sensitivity.
    ///
    /// With `constrain_pitch` the pitch is clamped to
    /// `[-PITCH_LIMIT, PITCH_LIMIT]` so the basis never flips at the poles.
    pub fn process_look(&mut self, delta_x: f32, delta_y: f32, constrain_pitch: bool) {
        self.yaw += delta_x * self.sensitivity;
        self.pitch += delta_y * self.sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Narrow (positive delta) or widen the field of view.
    pub fn process_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_vectors(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();

        self.front =
            Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(camera: &Camera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
        // right-handed: right x up == -front (camera looks down -Z in view space)
        assert!(r.cross(u).abs_diff_eq(-f, 1e-4));
    }

    #[test]
    fn basis_is_orthonormal_across_angles() {
        for yaw_step in -8..=8 {
            for pitch_step in -8..=8 {
                let yaw = yaw_step as f32 * 47.5;
                let pitch = pitch_step as f32 * 11.125;
                let camera = Camera::new(Vec3::ZERO, Vec3::Y, yaw, pitch);
                assert_orthonormal(&camera);
            }
        }
        let camera = Camera::new(Vec3::ZERO, Vec3::Y, 123.0, PITCH_LIMIT);
        assert_orthonormal(&camera);
    }

    #[test]
    fn default_camera_looks_down_positive_z() {
        let camera = Camera::default();
        let front = camera.front();
        assert!(front.z > 0.9);
        assert!(front.y < 0.0);
        assert!(front.x.abs() < EPS);
    }

    #[test]
    fn zero_look_delta_is_idempotent() {
        let mut camera = Camera::default();
        let before = (camera.front(), camera.right(), camera.up());
        for _ in 0..100 {
            camera.process_look(0.0, 0.0, true);
        }
        assert_eq!(before, (camera.front(), camera.right(), camera.up()));
    }

    #[test]
    fn pitch_clamps_exactly_at_limit() {
        let mut camera = Camera::default();
        camera.process_look(0.0, 1.0e6, true);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        camera.process_look(0.0, -1.0e7, true);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
        assert_orthonormal(&camera);
    }

    #[test]
    fn unconstrained_pitch_passes_limit() {
        let mut camera = Camera::default();
        camera.process_look(0.0, 1000.0, false);
        assert!(camera.pitch() > PITCH_LIMIT);
    }

    #[test]
    fn look_delta_scales_by_sensitivity() {
        let mut camera = Camera::default();
        camera.process_look(10.0, 20.0, true);
        assert!((camera.yaw() - (DEFAULT_YAW + 1.0)).abs() < EPS);
        assert!((camera.pitch() - (DEFAULT_PITCH + 2.0)).abs() < EPS);
    }

    #[test]
    fn zoom_saturates_in_range() {
        let mut camera = Camera::default();
        for _ in 0..10 {
            camera.process_zoom(100.0);
        }
        assert_eq!(camera.zoom(), MIN_ZOOM);
        for _ in 0..10 {
            camera.process_zoom(-100.0);
        }
        assert_eq!(camera.zoom(), MAX_ZOOM);
        camera.process_zoom(4.0);
        assert_eq!(camera.zoom(), 41.0);
    }

    #[test]
    fn forward_movement_follows_front() {
        let mut camera = Camera::default();
        let start = camera.position;
        let front = camera.front();
        camera.process_movement(CameraMovement::Forward, 1.0);
        assert!(camera.position.abs_diff_eq(start + 5.0 * front, EPS));
    }

    #[test]
    fn opposite_movements_cancel() {
        let mut camera = Camera::default();
        let start = camera.position;
        camera.process_movement(CameraMovement::Left, 0.25);
        camera.process_movement(CameraMovement::Right, 0.25);
        camera.process_movement(CameraMovement::Backward, 0.5);
        camera.process_movement(CameraMovement::Forward, 0.5);
        assert!(camera.position.abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let camera = Camera::default();
        let eye = camera.view_matrix().transform_point3(camera.position);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-4));
        let ahead = camera
            .view_matrix()
            .transform_point3(camera.position + camera.front());
        assert!(ahead.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn sky_view_has_no_translation() {
        let camera = Camera::default();
        let sky = camera.sky_view_matrix();
        assert_eq!(sky.w_axis, glam::Vec4::W);
        let view = camera.view_matrix();
        assert!(sky.x_axis.truncate().abs_diff_eq(view.x_axis.truncate(), EPS));
    }
}
