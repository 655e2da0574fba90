//! Conversions between the rendering math types (cgmath) and the physics
//! engine's types (nalgebra).

/// Physics translation to render-side vector.
pub fn to_render_vec(v: &nalgebra::Vector3<f32>) -> cgmath::Vector3<f32> {
    cgmath::Vector3::new(v.x, v.y, v.z)
}

/// Physics rotation to render-side quaternion.
pub fn to_render_quat(q: &nalgebra::UnitQuaternion<f32>) -> cgmath::Quaternion<f32> {
    cgmath::Quaternion::new(q.w, q.i, q.j, q.k)
}

/// Render-side vector to physics translation.
pub fn to_physics_vec(v: &cgmath::Vector3<f32>) -> nalgebra::Vector3<f32> {
    nalgebra::Vector3::new(v.x, v.y, v.z)
}

/// Render-side quaternion to physics rotation.
pub fn to_physics_quat(q: &cgmath::Quaternion<f32>) -> nalgebra::UnitQuaternion<f32> {
    nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q.s, q.v.x, q.v.y, q.v.z))
}

/// Pose from a plain translation, no rotation.
pub fn isometry_from_translation(t: [f32; 3]) -> nalgebra::Isometry3<f32> {
    nalgebra::Isometry3::translation(t[0], t[1], t[2])
}
