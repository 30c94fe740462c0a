//! glTF mesh geometry extraction.
//!
//! Turns the accessors and buffer views of a parsed glTF document into
//! flat, interleaved vertex arrays and widened `u32` index arrays ready for
//! a vertex/index buffer upload.
//!
//! The pieces, leaf first:
//!
//! - [`resolve`] maps an accessor index to its accessor, buffer view and
//!   buffer ([`Located`]).
//! - [`decode_vec3`] / [`decode_indices`] reinterpret raw little-endian
//!   bytes as `f32` triples or `u16`/`u32` indices.
//! - [`assemble_primitive`] and [`MeshAssembler`] combine them per
//!   primitive: points interleave `POSITION` with `COLOR_0`, triangles
//!   interleave `POSITION` with `NORMAL` and decode their indices.
//!
//! Every vertex is laid out as `[x, y, z, a, b, c]` (see [`VERTEX_STRIDE`]).
//!
//! # Example
//!
//! ```no_run
//! use gleaner_core::gltf::{load_document, MeshAssembler};
//! use std::path::Path;
//!
//! let document = load_document(Path::new("models/dragon.gltf")).unwrap();
//! let assembly = MeshAssembler::new(&document).assemble().unwrap();
//! for primitive in &assembly.primitives {
//!     let vertices: &[u8] = primitive.geometry.vertex_bytes();
//!     let indices: Option<&[u8]> = primitive.geometry.index_bytes();
//!     // ... upload ...
//! #   let _ = (vertices, indices);
//! }
//! ```

mod assembler;
mod decode;
mod error;
#[cfg(feature = "import")]
mod loader;
mod locator;
#[cfg(test)]
mod tests;
pub mod types;
mod vertex;

pub use assembler::{
    assemble_document, assemble_primitive, AssembleOptions, AssembledPrimitive, Assembly,
    ErrorPolicy, MeshAssembler, PrimitiveFailure, Stage, StreamMismatch, UnknownIndexType,
};
pub use decode::{decode_indices, decode_vec3, read_f32, VEC3_SIZE};
pub use error::{ErrorClass, GltfError, LookupKind};
#[cfg(feature = "import")]
pub use loader::{load_document, load_document_from_slice};
pub use locator::{resolve, Located};
pub use types::*;
pub use vertex::{PrimitiveGeometry, ATTRIBUTE_OFFSET_BYTES, VERTEX_STRIDE, VERTEX_STRIDE_BYTES};
