//! Visual scene description: nodes, transforms, and the demo scene layout.
//!
//! The scene is CPU-side state only; `rendering::engine` mirrors it into GPU
//! resources. Nodes are append-only, so GPU mirrors never go stale.

pub mod geometry;

use cgmath::{Matrix4, Quaternion, Vector3};

use crate::rendering::light::Lighting;

pub type NodeId = usize;

/// Translation + rotation of one node. Demo geometry bakes its size into the
/// mesh, so no scale component is needed.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation) * Matrix4::from(self.rotation)
    }
}

/// What a node looks like.
#[derive(Debug, Clone)]
pub enum Geometry {
    /// Solid box, lit and shadow-casting.
    Box { half_extents: [f32; 3] },
    /// Ground-plane helper grid, drawn as lines.
    Grid { size: f32, divisions: u32 },
    /// Coordinate-axes helper, drawn as lines.
    Axes { size: f32 },
}

impl Geometry {
    /// Line geometry is unlit and casts no shadow.
    pub fn is_lines(&self) -> bool {
        matches!(self, Geometry::Grid { .. } | Geometry::Axes { .. })
    }
}

/// One entry in the scene.
#[derive(Debug, Clone)]
pub struct Node {
    pub transform: Transform,
    pub geometry: Geometry,
    pub color: [f32; 4],
}

/// The visual scene: an ordered node list, lighting, and the pointer target.
pub struct Scene {
    pub nodes: Vec<Node>,
    pub lighting: Lighting,
    /// The node manipulated by the drag gizmo.
    pub pointer_target: NodeId,
}

pub const GRID_SIZE: f32 = 200.0;
pub const GRID_DIVISIONS: u32 = 200;
pub const AXES_SIZE: f32 = 1.0;
pub const POINTER_TARGET_SIZE: f32 = 0.5;

impl Scene {
    /// Build the base demo scene: grid helper, coordinate axes, pointer
    /// target, and default lighting.
    pub fn new() -> Self {
        let mut nodes = Vec::new();

        nodes.push(Node {
            transform: Transform::identity(),
            geometry: Geometry::Grid {
                size: GRID_SIZE,
                divisions: GRID_DIVISIONS,
            },
            // Faint grey helper lines.
            color: [0.35, 0.35, 0.35, 0.25],
        });

        nodes.push(Node {
            transform: Transform::identity(),
            geometry: Geometry::Axes { size: AXES_SIZE },
            color: [1.0, 1.0, 1.0, 1.0],
        });

        let pointer_target = nodes.len();
        nodes.push(Node {
            transform: Transform::identity(),
            geometry: Geometry::Axes {
                size: POINTER_TARGET_SIZE,
            },
            color: [1.0, 1.0, 1.0, 1.0],
        });

        Self {
            nodes,
            lighting: Lighting::demo_default(),
            pointer_target,
        }
    }

    /// Append a solid box node, returning its id.
    pub fn add_box(
        &mut self,
        half_extents: [f32; 3],
        transform: Transform,
        color: [f32; 4],
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            transform,
            geometry: Geometry::Box { half_extents },
            color,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_scene_layout() {
        let scene = Scene::new();
        // Grid, axes, pointer target.
        assert_eq!(scene.nodes.len(), 3);
        assert!(scene.node(0).geometry.is_lines());
        assert!(scene.node(scene.pointer_target).geometry.is_lines());
    }

    #[test]
    fn test_nodes_are_append_only() {
        let mut scene = Scene::new();
        let base = scene.nodes.len();
        let a = scene.add_box([1.0, 1.0, 1.0], Transform::identity(), [1.0; 4]);
        let b = scene.add_box([2.0, 1.0, 0.5], Transform::identity(), [1.0; 4]);
        assert_eq!(a, base);
        assert_eq!(b, base + 1);
    }

    #[test]
    fn test_transform_matrix_translates() {
        let t = Transform::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let m = t.matrix();
        assert_eq!(m.w.x, 1.0);
        assert_eq!(m.w.y, 2.0);
        assert_eq!(m.w.z, 3.0);
    }
}
