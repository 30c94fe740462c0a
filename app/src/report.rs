//! Human-readable output for an assembled document.

use std::fmt::Write as _;

use gleaner_core::gltf::{AssembledPrimitive, Assembly, PrimitiveFailure, VERTEX_STRIDE};

/// One summary line for an assembled primitive.
pub fn primitive_line(primitive: &AssembledPrimitive) -> String {
    let geometry = &primitive.geometry;
    let mut line = format!(
        "node {} mesh {} '{}' primitive {}: {:?}, {} vertices",
        primitive.node,
        primitive.mesh,
        primitive.mesh_name.as_deref().unwrap_or("unnamed"),
        primitive.primitive,
        geometry.topology,
        geometry.vertex_count(),
    );
    if let Some(indices) = &geometry.indices {
        let _ = write!(line, ", {} indices", indices.len());
    }
    if let Some(bounds) = geometry.bounds.or_else(|| geometry.computed_bounds()) {
        let c = bounds.center();
        let _ = write!(line, ", center ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
    }
    line
}

pub fn failure_line(failure: &PrimitiveFailure) -> String {
    format!("failed: {failure}")
}

/// Vertex rows followed by the index list.
pub fn dump(primitive: &AssembledPrimitive) -> String {
    let mut out = String::new();
    for vertex in primitive.geometry.vertices.chunks_exact(VERTEX_STRIDE) {
        let _ = writeln!(
            out,
            "  v [{}, {}, {}] [{}, {}, {}]",
            vertex[0], vertex[1], vertex[2], vertex[3], vertex[4], vertex[5]
        );
    }
    if let Some(indices) = &primitive.geometry.indices {
        let _ = writeln!(out, "  i {indices:?}");
    }
    out
}

/// Totals for the whole document.
pub fn totals(assembly: &Assembly) -> String {
    format!(
        "{} primitives assembled ({} vertices, {} indices), {} failed",
        assembly.primitives.len(),
        assembly.vertex_count(),
        assembly.index_count(),
        assembly.failures.len()
    )
}
