//! Little-endian decoding of raw buffer bytes into typed values.
//!
//! All reads are bounds-checked and decode explicitly by byte order, so
//! results do not depend on the host's endianness.

use super::error::GltfError;
use super::types::ComponentType;

/// Bytes in one three-component `f32` element.
pub const VEC3_SIZE: usize = 12;

/// Borrow `len` bytes at `offset`, or fail with [`GltfError::Decode`].
fn read_bytes(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], GltfError> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or(GltfError::Decode {
            offset,
            len,
            available: bytes.len(),
        })
}

/// Read one little-endian `f32` at `offset`.
pub fn read_f32(bytes: &[u8], offset: usize) -> Result<f32, GltfError> {
    let b = read_bytes(bytes, offset, 4)?;
    Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Decode three consecutive little-endian `f32` values starting at
/// `offset` and append them to `out` in order.
///
/// On error nothing is appended.
pub fn decode_vec3(bytes: &[u8], offset: usize, out: &mut Vec<f32>) -> Result<(), GltfError> {
    let b = read_bytes(bytes, offset, VEC3_SIZE)?;
    out.extend(
        b.chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])),
    );
    Ok(())
}

/// Decode an index byte range, widening every value to `u32`.
///
/// `U16` walks the range in 2-byte strides and `U32` in 4-byte strides.
/// Other component types fail with [`GltfError::UnsupportedComponentType`];
/// a range that is not a whole number of strides fails with
/// [`GltfError::Decode`].
pub fn decode_indices(bytes: &[u8], component_type: ComponentType) -> Result<Vec<u32>, GltfError> {
    let stride = match component_type {
        ComponentType::U16 => 2,
        ComponentType::U32 => 4,
        other => return Err(GltfError::UnsupportedComponentType(other)),
    };

    let remainder = bytes.len() % stride;
    if remainder != 0 {
        return Err(GltfError::Decode {
            offset: bytes.len() - remainder,
            len: stride,
            available: bytes.len(),
        });
    }

    let indices = match component_type {
        ComponentType::U16 => bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]) as u32)
            .collect(),
        _ => bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    };

    Ok(indices)
}
