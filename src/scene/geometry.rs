//! CPU-side vertex data for the demo geometry.

use bytemuck::{Pod, Zeroable};

/// Vertex format for lit, solid geometry.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;

        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Vertex format for unlit line geometry (helpers and gizmos).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;

        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Box mesh with per-face normals, sized by half-extents.
pub fn box_mesh(half_extents: [f32; 3]) -> (Vec<MeshVertex>, Vec<u16>) {
    let [hx, hy, hz] = half_extents;

    // (normal, four corners counter-clockwise when viewed from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [1.0, 0.0, 0.0],
            [
                [hx, -hy, -hz],
                [hx, hy, -hz],
                [hx, hy, hz],
                [hx, -hy, hz],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [-hx, -hy, hz],
                [-hx, hy, hz],
                [-hx, hy, -hz],
                [-hx, -hy, -hz],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [-hx, hy, hz],
                [hx, hy, hz],
                [hx, hy, -hz],
                [-hx, hy, -hz],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [-hx, -hy, -hz],
                [hx, -hy, -hz],
                [hx, -hy, hz],
                [-hx, -hy, hz],
            ],
        ),
        (
            [0.0, 0.0, 1.0],
            [
                [-hx, -hy, hz],
                [hx, -hy, hz],
                [hx, hy, hz],
                [-hx, hy, hz],
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                [hx, -hy, -hz],
                [-hx, -hy, -hz],
                [-hx, hy, -hz],
                [hx, hy, -hz],
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in faces {
        let base = vertices.len() as u16;
        for position in corners {
            vertices.push(MeshVertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// Ground-plane grid in the XZ plane, centered at the origin.
pub fn grid_lines(size: f32, divisions: u32, color: [f32; 4]) -> Vec<LineVertex> {
    let half = size / 2.0;
    let step = size / divisions as f32;
    let mut vertices = Vec::with_capacity(((divisions + 1) * 4) as usize);

    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        vertices.push(LineVertex {
            position: [offset, 0.0, -half],
            color,
        });
        vertices.push(LineVertex {
            position: [offset, 0.0, half],
            color,
        });
        vertices.push(LineVertex {
            position: [-half, 0.0, offset],
            color,
        });
        vertices.push(LineVertex {
            position: [half, 0.0, offset],
            color,
        });
    }

    vertices
}

/// X/Y/Z axes as red/green/blue line segments from the origin.
pub fn axes_lines(size: f32) -> Vec<LineVertex> {
    let origin = [0.0, 0.0, 0.0];
    let red = [1.0, 0.0, 0.0, 1.0];
    let green = [0.0, 1.0, 0.0, 1.0];
    let blue = [0.0, 0.0, 1.0, 1.0];

    vec![
        LineVertex {
            position: origin,
            color: red,
        },
        LineVertex {
            position: [size, 0.0, 0.0],
            color: red,
        },
        LineVertex {
            position: origin,
            color: green,
        },
        LineVertex {
            position: [0.0, size, 0.0],
            color: green,
        },
        LineVertex {
            position: origin,
            color: blue,
        },
        LineVertex {
            position: [0.0, 0.0, size],
            color: blue,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_mesh_counts() {
        let (vertices, indices) = box_mesh([1.0, 2.0, 0.5]);
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        // All positions sit on the box surface.
        for v in &vertices {
            assert!(v.position[0].abs() <= 1.0 + f32::EPSILON);
            assert!(v.position[1].abs() <= 2.0 + f32::EPSILON);
            assert!(v.position[2].abs() <= 0.5 + f32::EPSILON);
        }
    }

    #[test]
    fn test_grid_vertex_count() {
        let vertices = grid_lines(200.0, 200, [1.0; 4]);
        assert_eq!(vertices.len(), 201 * 4);
    }

    #[test]
    fn test_axes_are_three_segments() {
        let vertices = axes_lines(1.0);
        assert_eq!(vertices.len(), 6);
    }
}
