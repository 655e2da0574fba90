use bytemuck::{Pod, Zeroable};
use cgmath::{perspective, InnerSpace, Matrix4, Point3, Rad, Vector3};

use crate::rendering::camera::OPENGL_TO_WGPU_MATRIX;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct LightUniform {
    /// Light-space view-projection, used by the shadow pass and the shadow
    /// lookup in the forward pass. Must stay the first field: the shadow
    /// pipeline binds only this matrix.
    pub view_proj: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub color: [f32; 4],
    /// x = cos(cone angle), y = shadow depth bias.
    pub params: [f32; 4],
}

#[derive(Debug, Clone, Copy)]
pub struct ShadowSettings {
    pub near: f32,
    pub far: f32,
    pub bias: f32,
    pub map_size: u32,
}

#[derive(Debug, Clone)]
pub struct SpotLight {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
    /// Half-angle of the cone, in radians.
    pub angle: f32,
    pub shadow: ShadowSettings,
}

#[derive(Debug, Clone)]
pub struct Lighting {
    pub ambient: Vector3<f32>,
    pub spot: SpotLight,
}

impl Lighting {
    /// The demo lighting rig: near-white ambient plus one shadow-casting
    /// spot above the scene.
    pub fn demo_default() -> Self {
        Self {
            ambient: Vector3::new(0.94, 0.94, 0.94),
            spot: SpotLight {
                position: Point3::new(0.0, 15.0, 2.0),
                target: Point3::new(0.0, 0.0, 0.0),
                color: Vector3::new(1.0, 1.0, 1.0),
                intensity: 1.5,
                angle: std::f32::consts::PI * 0.2,
                shadow: ShadowSettings {
                    near: 2.0,
                    far: 20.0,
                    bias: -0.000222,
                    map_size: 1024,
                },
            },
        }
    }

    pub fn light_view_projection(&self) -> Matrix4<f32> {
        let spot = &self.spot;
        let view = Matrix4::look_at_rh(spot.position, spot.target, Vector3::unit_y());
        let proj = perspective(
            Rad(spot.angle * 2.0),
            1.0,
            spot.shadow.near,
            spot.shadow.far,
        );
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    pub fn to_uniform(&self) -> LightUniform {
        let spot = &self.spot;
        let direction = (spot.target - spot.position).normalize();
        let color = spot.color * spot.intensity;

        LightUniform {
            view_proj: self.light_view_projection().into(),
            ambient: [self.ambient.x, self.ambient.y, self.ambient.z, 1.0],
            position: [spot.position.x, spot.position.y, spot.position.z, 1.0],
            direction: [direction.x, direction.y, direction.z, 0.0],
            color: [color.x, color.y, color.z, 1.0],
            params: [spot.angle.cos(), spot.shadow.bias, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_carries_shadow_bias() {
        let lighting = Lighting::demo_default();
        let uniform = lighting.to_uniform();
        assert_eq!(uniform.params[1], -0.000222);
        assert!(uniform.params[0] > 0.0 && uniform.params[0] < 1.0);
    }

    #[test]
    fn test_spot_direction_points_down() {
        let uniform = Lighting::demo_default().to_uniform();
        assert!(uniform.direction[1] < 0.0);
    }
}
