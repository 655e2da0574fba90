use cgmath::{perspective, Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The demo viewpoint: high corner vantage looking into the scene.
    pub fn demo_default(aspect: f32) -> Self {
        Self {
            eye: (50.0, 50.0, 50.0).into(),
            target: (5.0, 5.0, 5.0).into(),
            up: Vector3::unit_y(),
            aspect,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = perspective(Deg(self.fovy), self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    /// Re-fit the aspect ratio to a new viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.eye).normalize()
    }

    /// Project a world point to screen pixels. `None` behind the camera.
    pub fn project(&self, point: Point3<f32>, viewport: (f32, f32)) -> Option<(f32, f32)> {
        let clip = self.build_view_projection_matrix() * point.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        let x = clip.x / clip.w;
        let y = clip.y / clip.w;
        Some((
            (x + 1.0) * 0.5 * viewport.0,
            (1.0 - y) * 0.5 * viewport.1,
        ))
    }

    /// Cast a ray through a screen pixel; returns origin and direction.
    pub fn unproject(
        &self,
        screen: (f32, f32),
        viewport: (f32, f32),
    ) -> Option<(Point3<f32>, Vector3<f32>)> {
        let inv = self.build_view_projection_matrix().invert()?;
        let ndc_x = screen.0 / viewport.0 * 2.0 - 1.0;
        let ndc_y = 1.0 - screen.1 / viewport.1 * 2.0;

        let near = inv * Vector4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near.w.abs() < f32::EPSILON || far.w.abs() < f32::EPSILON {
            return None;
        }

        let near = Point3::from_vec(near.truncate() / near.w);
        let far = Point3::from_vec(far.truncate() / far.w);
        let dir = (far - near).normalize();
        Some((near, dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_is_idempotent() {
        let mut camera = Camera::demo_default(1.0);
        camera.resize(1280, 720);
        let once = camera.aspect;
        camera.resize(1280, 720);
        assert_eq!(camera.aspect, once);
    }

    #[test]
    fn test_resize_ignores_zero_dimensions() {
        let mut camera = Camera::demo_default(16.0 / 9.0);
        camera.resize(0, 720);
        assert_eq!(camera.aspect, 16.0 / 9.0);
    }

    #[test]
    fn test_project_unproject_consistency() {
        let camera = Camera::demo_default(16.0 / 9.0);
        let viewport = (1280.0, 720.0);
        let point = Point3::new(3.0, 4.0, -2.0);

        let screen = camera.project(point, viewport).unwrap();
        let (origin, dir) = camera.unproject(screen, viewport).unwrap();

        // The ray through the projected pixel passes close to the point.
        let to_point = point - origin;
        let along = to_point.dot(dir);
        let closest = origin + dir * along;
        assert!((point - closest).magnitude() < 0.05);
    }

    #[test]
    fn test_point_behind_camera_does_not_project() {
        let camera = Camera::demo_default(1.0);
        // Opposite direction from the view target.
        let behind = Point3::new(200.0, 200.0, 200.0);
        assert!(camera.project(behind, (800.0, 600.0)).is_none());
    }
}
