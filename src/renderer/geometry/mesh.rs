//! Vertex format and the capacity-guarded vertex/index accumulator.

use glam::Vec3;

use crate::error::OrbvizError;

/// Largest vertex count addressable by the `u32` index buffer.
pub const INDEX_CAPACITY: usize = u32::MAX as usize;

// ==================== VERTEX FORMAT ====================

/// How a vertex is shaded by the external pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum RenderType {
    /// Instanced sphere/cylinder surface.
    Solid = 0,
    /// Orbital isosurface.
    Isosurface = 1,
}

/// 40-byte vertex shared by atoms, bonds and orbital lobes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position.
    pub position: [f32; 3],
    /// RGB color.
    pub color: [f32; 3],
    /// Surface normal. Spheres carry their object-space position here;
    /// isosurface vertices carry zero.
    pub normal: [f32; 3],
    /// [`RenderType`] discriminant.
    pub render_type: u32,
}

impl Vertex {
    /// Build a vertex from glam vectors.
    #[must_use]
    pub fn new(
        position: Vec3,
        color: [f32; 3],
        normal: Vec3,
        render_type: RenderType,
    ) -> Self {
        Self {
            position: position.to_array(),
            color,
            normal: normal.to_array(),
            render_type: render_type as u32,
        }
    }

    /// Vertex buffer layout for the render pipeline (locations 0..=3).
    #[must_use]
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x3,
            3 => Uint32
        ];
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

// ==================== MESH BUFFERS ====================

/// Vertices plus triangle-list indices, with a hard vertex capacity.
///
/// Every append checks the capacity first and fails without touching the
/// buffers, so a failed build never leaves a half-written instance behind.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    capacity: usize,
}

impl Default for MeshBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuffers {
    /// Empty buffers limited by [`INDEX_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity_limit(INDEX_CAPACITY)
    }

    /// Empty buffers limited to `capacity` vertices (clamped to
    /// [`INDEX_CAPACITY`]).
    #[must_use]
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            capacity: capacity.min(INDEX_CAPACITY),
        }
    }

    /// Vertex limit enforced by the append guards.
    #[must_use]
    pub fn capacity_limit(&self) -> usize {
        self.capacity
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether no geometry has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Drop all geometry, keeping the capacity limit.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Fail if `additional` more vertices would exceed the capacity.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::CapacityExceeded`].
    pub fn reserve_vertices(
        &self,
        additional: usize,
    ) -> Result<(), OrbvizError> {
        let required = self.vertices.len().saturating_add(additional);
        if required > self.capacity {
            return Err(OrbvizError::CapacityExceeded {
                required,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Append a self-contained patch whose triangle indices are local to
    /// `vertices`; indices are offset by the current vertex count.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::CapacityExceeded`] without modifying the
    /// buffers if the patch does not fit.
    pub fn append_indexed<I>(
        &mut self,
        vertices: &[Vertex],
        triangles: I,
    ) -> Result<(), OrbvizError>
    where
        I: IntoIterator<Item = [u32; 3]>,
    {
        self.reserve_vertices(vertices.len())?;
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        for [a, b, c] in triangles {
            self.indices.extend_from_slice(&[base + a, base + b, base + c]);
        }
        Ok(())
    }

    /// Raw vertex bytes for GPU upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for GPU upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
