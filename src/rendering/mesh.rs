use wgpu::util::DeviceExt;
use wgpu::{Buffer, BufferUsages};

use crate::scene::geometry::{LineVertex, MeshVertex};

/// GPU-resident geometry. Indexed triangle lists for solids, raw vertex
/// runs for line helpers.
pub struct Mesh {
    pub vertex_buffer: Buffer,
    pub index_buffer: Option<Buffer>,
    pub num_elements: u32,
}

impl Mesh {
    pub fn with_indices(
        device: &wgpu::Device,
        vertices: &[MeshVertex],
        indices: &[u16],
        label: &str,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(indices),
            usage: BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer: Some(index_buffer),
            num_elements: indices.len() as u32,
        }
    }

    pub fn from_lines(device: &wgpu::Device, vertices: &[LineVertex], label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Line Buffer", label)),
            contents: bytemuck::cast_slice(vertices),
            usage: BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            index_buffer: None,
            num_elements: vertices.len() as u32,
        }
    }
}
