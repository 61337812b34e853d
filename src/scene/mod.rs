//! The fixed scene: ground, rotating boxes, normal-mapped wall, light and
//! skybox.
//!
//! Every object is described by a row in a compile-time table and consumed
//! by a uniform loop in the renderer. Objects own no mutable state; their
//! transforms are pure functions of the total elapsed time.

pub mod geometry;

use glam::{Mat4, Vec3};

/// Static textured ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    /// Specular exponent.
    pub shininess: f32,
    /// Diffuse texture file name.
    pub texture: &'static str,
}

impl Ground {
    /// The ground is modelled in world space.
    #[must_use]
    pub fn model(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}

/// A box spinning about a fixed axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxInstance {
    /// World-space center.
    pub position: Vec3,
    /// Rotation axis (need not be normalized).
    pub axis: Vec3,
    /// Rotation speed in radians per second.
    pub speed: f32,
    /// Uniform scale applied to the unit box.
    pub scale: f32,
    /// Specular exponent.
    pub shininess: f32,
    /// Diffuse texture file name.
    pub texture: &'static str,
}

impl BoxInstance {
    /// `translate(position) * rotate(speed * t, axis) * scale(scale)`.
    #[must_use]
    pub fn model(&self, elapsed_total: f32) -> Mat4 {
        spin_model(self.position, self.axis, self.speed * elapsed_total, self.scale)
    }
}

/// A normal-mapped quad with optional parallax height map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallInstance {
    /// World-space center.
    pub position: Vec3,
    /// Rotation axis.
    pub axis: Vec3,
    /// Rotation speed in radians per second.
    pub speed: f32,
    /// Uniform scale applied to the unit quad.
    pub scale: f32,
    /// Specular exponent.
    pub shininess: f32,
    /// Diffuse texture file name.
    pub diffuse: &'static str,
    /// Tangent-space normal map file name.
    pub normal_map: &'static str,
    /// Height map file name, sampled only in parallax mode.
    pub height_map: &'static str,
    /// Maximum parallax displacement in texture units.
    pub height_scale: f32,
}

impl WallInstance {
    /// `translate(position) * rotate(speed * t, axis) * scale(scale)`.
    #[must_use]
    pub fn model(&self, elapsed_total: f32) -> Mat4 {
        spin_model(self.position, self.axis, self.speed * elapsed_total, self.scale)
    }
}

/// The point light and its unlit marker cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightMarker {
    /// Light position in world space.
    pub position: Vec3,
    /// Scale applied to the unit marker cube.
    pub scale: f32,
}

impl LightMarker {
    /// `translate(position) * scale(scale)`.
    #[must_use]
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// The complete fixed scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Ground plane.
    pub ground: Ground,
    /// Rotating boxes, drawn in order.
    pub boxes: &'static [BoxInstance],
    /// Optional normal-mapped wall.
    pub wall: Option<WallInstance>,
    /// Light marker.
    pub light: LightMarker,
    /// Cube-map faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub skybox_faces: [&'static str; 6],
}

const BOXES: [BoxInstance; 5] = [
    BoxInstance {
        position: Vec3::new(0.0, 1.2, 0.0),
        axis: Vec3::Y,
        speed: 0.25,
        scale: 1.25,
        shininess: 25.0,
        texture: "granite.jpg",
    },
    BoxInstance {
        position: Vec3::new(-3.2, 5.5, 4.3),
        axis: Vec3::new(3.4, 1.1, 2.8),
        speed: 0.5,
        scale: 0.5,
        shininess: 10.0,
        texture: "bricks.jpg",
    },
    BoxInstance {
        position: Vec3::new(6.1, 2.7, 2.4),
        axis: Vec3::new(-4.1, 2.5, -1.7),
        speed: 0.75,
        scale: 0.75,
        shininess: 20.0,
        texture: "stone.jpg",
    },
    BoxInstance {
        position: Vec3::new(7.6, 3.9, -5.8),
        axis: Vec3::new(-2.0, 1.5, 4.5),
        speed: 1.25,
        scale: 1.1,
        shininess: 15.0,
        texture: "wood.png",
    },
    BoxInstance {
        position: Vec3::new(-5.9, 4.4, -3.3),
        axis: Vec3::new(1.4, 3.3, -3.6),
        speed: 1.0,
        scale: 0.9,
        shininess: 10.0,
        texture: "yellowstone.jpg",
    },
];

impl Scene {
    /// The demo scene.
    pub const DEFAULT: Self = Self {
        ground: Ground {
            shininess: 2.0,
            texture: "Cement.jpg",
        },
        boxes: &BOXES,
        wall: Some(WallInstance {
            position: Vec3::new(0.0, 3.0, 9.5),
            axis: Vec3::Y,
            speed: -0.1,
            scale: 2.5,
            shininess: 32.0,
            diffuse: "brickwall.jpg",
            normal_map: "brickwall_normal.jpg",
            height_map: "brickwall_height.jpg",
            height_scale: 0.1,
        }),
        light: LightMarker {
            position: Vec3::new(0.0, 10.0, 0.0),
            scale: 0.1,
        },
        skybox_faces: [
            "posx.jpg", "negx.jpg", "posy.jpg", "negy.jpg", "posz.jpg", "negz.jpg",
        ],
    };

    /// The demo scene with the light moved to `light_position`.
    #[must_use]
    pub fn with_light(light_position: Vec3) -> Self {
        let mut scene = Self::DEFAULT;
        scene.light.position = light_position;
        scene
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn spin_model(position: Vec3, axis: Vec3, angle: f32, scale: f32) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_axis_angle(axis.normalize(), angle)
        * Mat4::from_scale(Vec3::splat(scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_five_boxes_with_distinct_parameters() {
        let scene = Scene::DEFAULT;
        assert_eq!(scene.boxes.len(), 5);
        let speeds: Vec<f32> = scene.boxes.iter().map(|b| b.speed).collect();
        assert_eq!(speeds, vec![0.25, 0.5, 0.75, 1.25, 1.0]);
        assert_eq!(scene.ground.shininess, 2.0);
    }

    #[test]
    fn box_model_at_time_zero_is_translate_scale() {
        let b = Scene::DEFAULT.boxes[1];
        let model = b.model(0.0);
        let expected =
            Mat4::from_translation(b.position) * Mat4::from_scale(Vec3::splat(b.scale));
        assert!(model.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn box_rotates_about_its_axis() {
        let b = Scene::DEFAULT.boxes[0];
        // Quarter turn about +Y after (pi/2) / 0.25 seconds.
        let t = std::f32::consts::FRAC_PI_2 / b.speed;
        let corner = b.model(t).transform_point3(Vec3::X);
        let expected = b.position + Vec3::new(0.0, 0.0, -b.scale);
        assert!(corner.abs_diff_eq(expected, 1e-4), "{corner}");
    }

    #[test]
    fn rotation_preserves_points_on_axis() {
        for b in Scene::DEFAULT.boxes {
            let on_axis = b.axis.normalize();
            let moved = b.model(3.7).transform_point3(on_axis);
            assert!(moved.abs_diff_eq(b.position + on_axis * b.scale, 1e-4));
        }
    }

    #[test]
    fn wall_turns_slowly_backwards() {
        let wall = Scene::DEFAULT.wall.unwrap();
        let ahead = wall.model(1.0).transform_vector3(Vec3::X);
        // Negative speed about +Y swings +X toward +Z.
        assert!(ahead.z > 0.0);
        assert!((ahead.length() - wall.scale).abs() < 1e-4);
    }

    #[test]
    fn light_marker_is_small_cube_at_light() {
        let light = Scene::with_light(Vec3::new(1.0, 2.0, 3.0)).light;
        let model = light.model();
        assert!(model
            .transform_point3(Vec3::ONE)
            .abs_diff_eq(Vec3::new(1.1, 2.1, 3.1), 1e-6));
    }
}
