//! Interleaved vertex data produced for one primitive.
//!
//! Every vertex is two three-component `f32` streams back to back:
//! position first, then normal (triangles) or color (points).

use nalgebra::Point3;

use super::decode::{decode_vec3, VEC3_SIZE};
use super::error::GltfError;
use super::types::{Bounds, Topology};

/// Floats per interleaved vertex.
pub const VERTEX_STRIDE: usize = 6;
/// Bytes per interleaved vertex.
pub const VERTEX_STRIDE_BYTES: usize = VERTEX_STRIDE * std::mem::size_of::<f32>();
/// Byte offset of the second attribute within a vertex.
pub const ATTRIBUTE_OFFSET_BYTES: usize = VEC3_SIZE;

/// Upload-ready geometry for a single primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveGeometry {
    pub topology: Topology,
    /// Interleaved `[x, y, z, a, b, c]` records.
    pub vertices: Vec<f32>,
    /// Widened indices; `None` for point primitives.
    pub indices: Option<Vec<u32>>,
    /// Declared POSITION bounds, if the accessor carried them.
    pub bounds: Option<Bounds>,
}

impl PrimitiveGeometry {
    /// Number of interleaved vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    /// Number of indices (0 for non-indexed primitives).
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Vec::len)
    }

    /// Vertex data as raw bytes for a vertex buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw `u32` bytes for an index buffer upload.
    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.indices.as_deref().map(bytemuck::cast_slice)
    }

    /// Iterate over `(position, attribute)` pairs.
    pub fn iter_vertices(&self) -> impl Iterator<Item = ([f32; 3], [f32; 3])> + '_ {
        self.vertices
            .chunks_exact(VERTEX_STRIDE)
            .map(|v| ([v[0], v[1], v[2]], [v[3], v[4], v[5]]))
    }

    /// Bounds computed from the decoded positions.
    pub fn computed_bounds(&self) -> Option<Bounds> {
        let mut positions = self.iter_vertices().map(|(p, _)| Point3::from(p));
        let first = positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        });
        Some(Bounds { min, max })
    }
}

/// Walk two vec3 streams in lockstep, appending one element of each per
/// vertex. Stops when the shorter stream is exhausted.
pub(crate) fn interleave_streams(first: &[u8], second: &[u8]) -> Result<Vec<f32>, GltfError> {
    let len = first.len().min(second.len());
    let mut vertices = Vec::with_capacity(len.div_ceil(VEC3_SIZE) * VERTEX_STRIDE);

    for offset in (0..len).step_by(VEC3_SIZE) {
        decode_vec3(first, offset, &mut vertices)?;
        decode_vec3(second, offset, &mut vertices)?;
    }

    Ok(vertices)
}

/// Check that the interleaved array holds exactly `count` vertices.
pub(crate) fn check_vertex_count(vertices: &[f32], count: usize) -> Result<(), GltfError> {
    if count.checked_mul(VERTEX_STRIDE) != Some(vertices.len()) {
        return Err(GltfError::Consistency(format!(
            "POSITION count {count} expects {} vertex floats, decoded {}",
            count.saturating_mul(VERTEX_STRIDE),
            vertices.len()
        )));
    }
    Ok(())
}

/// Check that the decoded index array matches the accessor count.
pub(crate) fn check_index_count(indices: &[u32], count: usize) -> Result<(), GltfError> {
    if indices.len() != count {
        return Err(GltfError::Consistency(format!(
            "index accessor count {count}, decoded {}",
            indices.len()
        )));
    }
    Ok(())
}
