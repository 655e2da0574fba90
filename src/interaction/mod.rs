//! Pointer bindings: orbit camera control and the drag gizmo on the
//! pointer target. Only one of the two manipulates state at a time.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};
use tracing::debug;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::rendering::camera::Camera;
use crate::scene::Scene;

const MIN_ORBIT_DISTANCE: f32 = 1.0;
const MAX_PITCH: f32 = 1.54;
/// Pixel radius around the pointer target's screen position that starts a
/// gizmo drag instead of an orbit.
const PICK_RADIUS: f32 = 40.0;

/// Orbit-style camera control: left-drag rotates around the camera target,
/// scroll dollies in and out.
pub struct OrbitController {
    pub enabled: bool,
    speed: f32,
    rotating: bool,
    last_cursor: Option<(f32, f32)>,
}

impl OrbitController {
    pub fn new(speed: f32) -> Self {
        Self {
            enabled: true,
            speed,
            rotating: false,
            last_cursor: None,
        }
    }

    fn begin_rotate(&mut self, cursor: (f32, f32)) {
        if self.enabled {
            self.rotating = true;
            self.last_cursor = Some(cursor);
        }
    }

    fn end_rotate(&mut self) {
        self.rotating = false;
        self.last_cursor = None;
    }

    fn rotate_to(&mut self, camera: &mut Camera, cursor: (f32, f32)) -> bool {
        if !self.rotating || !self.enabled {
            return false;
        }
        let Some(last) = self.last_cursor else {
            self.last_cursor = Some(cursor);
            return false;
        };
        let dx = cursor.0 - last.0;
        let dy = cursor.1 - last.1;
        self.last_cursor = Some(cursor);
        self.orbit(camera, dx, dy);
        true
    }

    /// Rotate the eye around the target by a cursor delta.
    pub fn orbit(&self, camera: &mut Camera, dx: f32, dy: f32) {
        let offset = camera.eye - camera.target;
        let radius = offset.magnitude();
        let mut yaw = offset.z.atan2(offset.x);
        let mut pitch = (offset.y / radius).asin();

        yaw += dx * self.speed * 0.01;
        pitch = (pitch + dy * self.speed * 0.01).clamp(-MAX_PITCH, MAX_PITCH);

        let new_offset = Vector3::new(
            radius * pitch.cos() * yaw.cos(),
            radius * pitch.sin(),
            radius * pitch.cos() * yaw.sin(),
        );
        camera.eye = camera.target + new_offset;
    }

    /// Dolly toward or away from the target.
    pub fn zoom(&self, camera: &mut Camera, amount: f32) {
        let offset = camera.eye - camera.target;
        let radius = (offset.magnitude() * (1.0 - amount * 0.1)).max(MIN_ORBIT_DISTANCE);
        camera.eye = camera.target + offset.normalize() * radius;
    }
}

/// Drag gizmo attached to the scene's pointer target: dragging moves the
/// target in the camera-facing plane through it.
pub struct DragGizmo {
    dragging: bool,
}

impl DragGizmo {
    pub fn new() -> Self {
        Self { dragging: false }
    }

    pub fn active(&self) -> bool {
        self.dragging
    }

    fn begin_drag(
        &mut self,
        cursor: (f32, f32),
        camera: &Camera,
        scene: &Scene,
        viewport: (f32, f32),
    ) -> bool {
        let target = scene.node(scene.pointer_target).transform.translation;
        let Some(screen) = camera.project(Point3::from_vec(target), viewport) else {
            return false;
        };
        let dist = ((screen.0 - cursor.0).powi(2) + (screen.1 - cursor.1).powi(2)).sqrt();
        if dist <= PICK_RADIUS {
            self.dragging = true;
            debug!("Gizmo drag started");
        }
        self.dragging
    }

    fn end_drag(&mut self) {
        if self.dragging {
            debug!("Gizmo drag ended");
        }
        self.dragging = false;
    }

    fn drag_to(
        &self,
        cursor: (f32, f32),
        camera: &Camera,
        scene: &mut Scene,
        viewport: (f32, f32),
    ) -> bool {
        if !self.dragging {
            return false;
        }
        let Some((origin, dir)) = camera.unproject(cursor, viewport) else {
            return false;
        };

        // Intersect the pick ray with the camera-facing plane through the
        // target's current position.
        let normal = camera.forward();
        let target = scene.node(scene.pointer_target).transform.translation;
        let denom = dir.dot(normal);
        if denom.abs() < 1e-6 {
            return false;
        }
        let t = (Point3::from_vec(target) - origin).dot(normal) / denom;
        if t <= 0.0 {
            return false;
        }

        let hit = origin + dir * t;
        scene.node_mut(scene.pointer_target).transform.translation = hit.to_vec();
        true
    }
}

impl Default for DragGizmo {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds the orbit control and the drag gizmo to the window's pointer
/// events. While a gizmo drag is active the orbit control is disabled.
pub struct InteractionController {
    pub orbit: OrbitController,
    pub gizmo: DragGizmo,
    cursor: (f32, f32),
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            orbit: OrbitController::new(0.2),
            gizmo: DragGizmo::new(),
            cursor: (0.0, 0.0),
        }
    }

    /// Feed a window event through the controls. Returns true when the event
    /// changed the camera or the pointer target.
    pub fn process_events(
        &mut self,
        event: &WindowEvent,
        camera: &mut Camera,
        scene: &mut Scene,
        viewport: (f32, f32),
    ) -> bool {
        match event {
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.left_pressed(camera, scene, viewport);
                false
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                self.left_released();
                false
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(
                (position.x as f32, position.y as f32),
                camera,
                scene,
                viewport,
            ),
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.02,
                };
                self.scrolled(amount, camera)
            }
            _ => false,
        }
    }

    pub fn left_pressed(&mut self, camera: &Camera, scene: &Scene, viewport: (f32, f32)) {
        if self.gizmo.begin_drag(self.cursor, camera, scene, viewport) {
            self.orbit.enabled = false;
        } else {
            self.orbit.begin_rotate(self.cursor);
        }
    }

    pub fn left_released(&mut self) {
        self.gizmo.end_drag();
        self.orbit.end_rotate();
        self.orbit.enabled = true;
    }

    pub fn cursor_moved(
        &mut self,
        cursor: (f32, f32),
        camera: &mut Camera,
        scene: &mut Scene,
        viewport: (f32, f32),
    ) -> bool {
        self.cursor = cursor;
        if self.gizmo.active() {
            self.gizmo.drag_to(self.cursor, camera, scene, viewport)
        } else {
            self.orbit.rotate_to(camera, self.cursor)
        }
    }

    pub fn scrolled(&mut self, amount: f32, camera: &mut Camera) -> bool {
        if amount != 0.0 {
            self.orbit.zoom(camera, amount);
            return true;
        }
        false
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn test_orbit_preserves_distance() {
        let controller = OrbitController::new(0.2);
        let mut camera = Camera::demo_default(1.0);
        let before = (camera.eye - camera.target).magnitude();

        controller.orbit(&mut camera, 120.0, -45.0);

        let after = (camera.eye - camera.target).magnitude();
        assert!((before - after).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_moves_eye_toward_target() {
        let controller = OrbitController::new(0.2);
        let mut camera = Camera::demo_default(1.0);
        let before = (camera.eye - camera.target).magnitude();

        controller.zoom(&mut camera, 1.0);

        let after = (camera.eye - camera.target).magnitude();
        assert!(after < before);
    }

    #[test]
    fn test_zoom_clamps_minimum_distance() {
        let controller = OrbitController::new(0.2);
        let mut camera = Camera::demo_default(1.0);

        for _ in 0..200 {
            controller.zoom(&mut camera, 5.0);
        }

        let dist = (camera.eye - camera.target).magnitude();
        assert!(dist >= MIN_ORBIT_DISTANCE - 1e-4);
    }

    #[test]
    fn test_gizmo_drag_disables_orbit() {
        let mut controller = InteractionController::new();
        let mut camera = Camera::demo_default(16.0 / 9.0);
        let mut scene = Scene::new();
        let viewport = (1280.0, 720.0);

        // Put the pointer target in front of the camera and the cursor on
        // top of its screen projection.
        scene.node_mut(scene.pointer_target).transform.translation = Vector3::new(5.0, 5.0, 5.0);
        let screen = camera
            .project(Point3::new(5.0, 5.0, 5.0), viewport)
            .unwrap();
        controller.cursor_moved(screen, &mut camera, &mut scene, viewport);
        controller.left_pressed(&camera, &scene, viewport);

        assert!(controller.gizmo.active());
        assert!(!controller.orbit.enabled);

        controller.left_released();

        assert!(!controller.gizmo.active());
        assert!(controller.orbit.enabled);
    }

    #[test]
    fn test_press_away_from_target_starts_orbit() {
        let mut controller = InteractionController::new();
        let mut camera = Camera::demo_default(16.0 / 9.0);
        let mut scene = Scene::new();
        let viewport = (1280.0, 720.0);

        scene.node_mut(scene.pointer_target).transform.translation = Vector3::new(5.0, 5.0, 5.0);
        controller.cursor_moved((10.0, 10.0), &mut camera, &mut scene, viewport);
        controller.left_pressed(&camera, &scene, viewport);

        assert!(!controller.gizmo.active());
        assert!(controller.orbit.enabled);

        let eye_before = camera.eye;
        controller.cursor_moved((140.0, 60.0), &mut camera, &mut scene, viewport);
        assert!((camera.eye - eye_before).magnitude() > 1e-3);
    }

    #[test]
    fn test_gizmo_drag_moves_target_in_view_plane() {
        let controller = DragGizmo { dragging: true };
        let camera = Camera::demo_default(16.0 / 9.0);
        let mut scene = Scene::new();
        let viewport = (1280.0, 720.0);
        scene.node_mut(scene.pointer_target).transform.translation = Vector3::new(5.0, 5.0, 5.0);

        let before = scene.node(scene.pointer_target).transform.translation;
        let screen = camera
            .project(Point3::from_vec(before), viewport)
            .unwrap();
        let moved = controller.drag_to(
            (screen.0 + 80.0, screen.1),
            &camera,
            &mut scene,
            viewport,
        );
        assert!(moved);

        let after = scene.node(scene.pointer_target).transform.translation;
        assert!((after - before).magnitude() > 0.1);
        // The target stays in the camera-facing plane through its old
        // position.
        let normal = camera.forward();
        assert!((after - before).dot(normal).abs() < 0.05);
    }
}
