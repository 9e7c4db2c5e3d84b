//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const STAR: [f32; 4] = [0.85, 0.85, 0.92, 1.0];
    pub const SHIP_HULL: [f32; 4] = [0.75, 0.78, 0.9, 1.0];
    pub const SHIP_COCKPIT: [f32; 4] = [0.45, 0.75, 1.0, 1.0];
    pub const LASER: [f32; 4] = [0.45, 0.95, 0.85, 1.0];
    pub const METEOR: [f32; 4] = [0.55, 0.42, 0.32, 1.0];
    pub const METEOR_RIM: [f32; 4] = [0.35, 0.26, 0.2, 1.0];
    pub const EXPLOSION: [f32; 4] = [1.0, 0.6, 0.2, 0.9];
    pub const SCORE: [f32; 4] = [0.9, 0.9, 0.95, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const BUTTON: [f32; 4] = [0.75, 0.78, 0.9, 1.0];
    pub const BUTTON_TEXT: [f32; 4] = [0.08, 0.08, 0.12, 1.0];
}
