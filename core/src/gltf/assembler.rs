//! Per-primitive mesh assembly.
//!
//! Every primitive goes through the same stages: its attribute and index
//! accessors are resolved, their byte ranges decoded, and the decoded
//! arrays validated against the accessor counts. Each primitive yields a
//! fresh [`PrimitiveGeometry`]; nothing is shared between primitives.

use std::fmt;

use super::decode::decode_indices;
use super::error::{GltfError, LookupKind};
use super::locator::{resolve, Located};
use super::types::{Document, Primitive, Semantic, Topology};
use super::vertex::{check_index_count, check_vertex_count, interleave_streams, PrimitiveGeometry};

/// What to do when a primitive fails to assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the failure, record it, and continue with the next primitive.
    #[default]
    SkipPrimitive,
    /// Stop at the first failure.
    Abort,
}

/// How to handle a point primitive whose POSITION and COLOR_0 buffer
/// views differ in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMismatch {
    /// Fail with [`GltfError::Consistency`].
    #[default]
    Reject,
    /// Walk both streams until the shorter one ends.
    Truncate,
}

/// How to handle index accessors that are neither u16 nor u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownIndexType {
    /// Fail with [`GltfError::UnsupportedComponentType`].
    #[default]
    Reject,
    /// Decode zero indices and let the count check decide.
    Empty,
}

/// Assembly configuration.
///
/// # Example
///
/// ```
/// use gleaner_core::gltf::{AssembleOptions, ErrorPolicy};
///
/// let options = AssembleOptions::default().with_error_policy(ErrorPolicy::Abort);
/// assert_eq!(options.error_policy, ErrorPolicy::Abort);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssembleOptions {
    pub error_policy: ErrorPolicy,
    pub stream_mismatch: StreamMismatch,
    pub unknown_index_type: UnknownIndexType,
}

impl AssembleOptions {
    /// Options that reproduce the permissive legacy behavior: abort on the
    /// first error, truncate point streams, ignore unknown index types.
    pub fn legacy() -> Self {
        Self {
            error_policy: ErrorPolicy::Abort,
            stream_mismatch: StreamMismatch::Truncate,
            unknown_index_type: UnknownIndexType::Empty,
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_stream_mismatch(mut self, mismatch: StreamMismatch) -> Self {
        self.stream_mismatch = mismatch;
        self
    }

    pub fn with_unknown_index_type(mut self, handling: UnknownIndexType) -> Self {
        self.unknown_index_type = handling;
        self
    }
}

/// Assembly stage in which a primitive failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ResolvingAttributes,
    Decoding,
    Validating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolvingAttributes => f.write_str("resolving attributes"),
            Self::Decoding => f.write_str("decoding"),
            Self::Validating => f.write_str("validating"),
        }
    }
}

/// A primitive (or a node's mesh reference) that could not be assembled.
#[derive(Debug, thiserror::Error)]
#[error("node {node}, mesh {mesh}{}: failed while {stage}: {error}", .primitive.map(|p| format!(", primitive {p}")).unwrap_or_default())]
pub struct PrimitiveFailure {
    pub node: usize,
    pub mesh: usize,
    /// `None` when the node's mesh reference itself was invalid.
    pub primitive: Option<usize>,
    pub stage: Stage,
    #[source]
    pub error: GltfError,
}

/// Geometry for one primitive together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPrimitive {
    pub node: usize,
    pub mesh: usize,
    pub primitive: usize,
    pub mesh_name: Option<String>,
    pub geometry: PrimitiveGeometry,
}

/// Result of assembling a whole document.
#[derive(Debug, Default)]
pub struct Assembly {
    pub primitives: Vec<AssembledPrimitive>,
    /// Failures skipped under [`ErrorPolicy::SkipPrimitive`].
    pub failures: Vec<PrimitiveFailure>,
}

impl Assembly {
    /// Total vertices across all assembled primitives.
    pub fn vertex_count(&self) -> usize {
        self.primitives
            .iter()
            .map(|p| p.geometry.vertex_count())
            .sum()
    }

    /// Total indices across all assembled primitives.
    pub fn index_count(&self) -> usize {
        self.primitives
            .iter()
            .map(|p| p.geometry.index_count())
            .sum()
    }

    /// True if there were primitives to assemble and all of them failed.
    pub fn all_failed(&self) -> bool {
        self.primitives.is_empty() && !self.failures.is_empty()
    }
}

type Staged<T> = Result<T, (Stage, GltfError)>;

trait AtStage<T> {
    fn at(self, stage: Stage) -> Staged<T>;
}

impl<T> AtStage<T> for Result<T, GltfError> {
    fn at(self, stage: Stage) -> Staged<T> {
        self.map_err(|e| (stage, e))
    }
}

/// Assemble a single primitive.
///
/// Points interleave POSITION with COLOR_0 and carry no indices. Triangles
/// (and primitives without a declared mode) interleave POSITION with
/// NORMAL and decode the index accessor.
pub fn assemble_primitive(
    document: &Document,
    primitive: &Primitive,
    options: &AssembleOptions,
) -> Result<PrimitiveGeometry, GltfError> {
    assemble_staged(document, primitive, options).map_err(|(_, e)| e)
}

fn assemble_staged(
    document: &Document,
    primitive: &Primitive,
    options: &AssembleOptions,
) -> Staged<PrimitiveGeometry> {
    match primitive.topology {
        Topology::Points => assemble_points(document, primitive, options),
        topology if topology.is_triangles() => assemble_triangles(document, primitive, options),
        other => Err((
            Stage::ResolvingAttributes,
            GltfError::UnsupportedTopology(other),
        )),
    }
}

fn resolve_semantic<'a>(
    document: &'a Document,
    primitive: &Primitive,
    semantic: Semantic,
) -> Result<Located<'a>, GltfError> {
    resolve(document, primitive.attributes.require(semantic)?)
}

fn check_stream_lengths(
    position: &Located<'_>,
    other: &Located<'_>,
    semantic: Semantic,
    mismatch: StreamMismatch,
) -> Result<(), GltfError> {
    if position.byte_length() == other.byte_length() {
        return Ok(());
    }
    match mismatch {
        StreamMismatch::Reject => Err(GltfError::Consistency(format!(
            "POSITION buffer view is {} bytes but {semantic} buffer view is {} bytes",
            position.byte_length(),
            other.byte_length()
        ))),
        StreamMismatch::Truncate => {
            log::warn!(
                "POSITION ({} bytes) and {semantic} ({} bytes) differ; truncating to the shorter stream",
                position.byte_length(),
                other.byte_length()
            );
            Ok(())
        }
    }
}

fn assemble_points(
    document: &Document,
    primitive: &Primitive,
    options: &AssembleOptions,
) -> Staged<PrimitiveGeometry> {
    let position = resolve_semantic(document, primitive, Semantic::Position)
        .at(Stage::ResolvingAttributes)?;
    let color =
        resolve_semantic(document, primitive, Semantic::Color0).at(Stage::ResolvingAttributes)?;
    check_stream_lengths(&position, &color, Semantic::Color0, options.stream_mismatch)
        .at(Stage::ResolvingAttributes)?;

    let vertices = interleave_streams(
        position.bytes().at(Stage::Decoding)?,
        color.bytes().at(Stage::Decoding)?,
    )
    .at(Stage::Decoding)?;

    check_vertex_count(&vertices, position.accessor.count).at(Stage::Validating)?;

    Ok(PrimitiveGeometry {
        topology: primitive.topology,
        vertices,
        indices: None,
        bounds: position.accessor.bounds,
    })
}

fn assemble_triangles(
    document: &Document,
    primitive: &Primitive,
    options: &AssembleOptions,
) -> Staged<PrimitiveGeometry> {
    let index_accessor = primitive
        .indices
        .ok_or(GltfError::MissingIndices)
        .at(Stage::ResolvingAttributes)?;
    let indices_view = resolve(document, index_accessor).at(Stage::ResolvingAttributes)?;
    let position = resolve_semantic(document, primitive, Semantic::Position)
        .at(Stage::ResolvingAttributes)?;
    let normal =
        resolve_semantic(document, primitive, Semantic::Normal).at(Stage::ResolvingAttributes)?;
    // Triangles always require matching streams.
    check_stream_lengths(&position, &normal, Semantic::Normal, StreamMismatch::Reject)
        .at(Stage::ResolvingAttributes)?;

    let component_type = indices_view.accessor.component_type;
    let indices = match decode_indices(indices_view.bytes().at(Stage::Decoding)?, component_type) {
        Err(GltfError::UnsupportedComponentType(ty))
            if options.unknown_index_type == UnknownIndexType::Empty =>
        {
            log::warn!("Ignoring index accessor {index_accessor} with component type {ty:?}");
            Vec::new()
        }
        other => other.at(Stage::Decoding)?,
    };
    let vertices = interleave_streams(
        position.bytes().at(Stage::Decoding)?,
        normal.bytes().at(Stage::Decoding)?,
    )
    .at(Stage::Decoding)?;

    check_index_count(&indices, indices_view.accessor.count).at(Stage::Validating)?;
    check_vertex_count(&vertices, position.accessor.count).at(Stage::Validating)?;

    Ok(PrimitiveGeometry {
        topology: primitive.topology,
        vertices,
        indices: Some(indices),
        bounds: position.accessor.bounds,
    })
}

/// Walks every mesh-bearing node of a document and assembles its
/// primitives in document order.
#[derive(Debug, Clone, Copy)]
pub struct MeshAssembler<'a> {
    document: &'a Document,
    options: AssembleOptions,
}

impl<'a> MeshAssembler<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            options: AssembleOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Assemble each primitive and hand it to `visit` before moving on.
    ///
    /// Returns the skipped failures, or the first failure under
    /// [`ErrorPolicy::Abort`].
    pub fn for_each(
        &self,
        mut visit: impl FnMut(AssembledPrimitive),
    ) -> Result<Vec<PrimitiveFailure>, PrimitiveFailure> {
        let mut failures = Vec::new();

        for (node_index, node) in self.document.nodes.iter().enumerate() {
            let Some(mesh_index) = node.mesh else {
                log::trace!("Node {node_index} has no mesh, skipping");
                continue;
            };

            let Some(mesh) = self.document.meshes.get(mesh_index) else {
                self.record(
                    PrimitiveFailure {
                        node: node_index,
                        mesh: mesh_index,
                        primitive: None,
                        stage: Stage::ResolvingAttributes,
                        error: GltfError::lookup(
                            LookupKind::Mesh,
                            mesh_index,
                            self.document.meshes.len(),
                        ),
                    },
                    &mut failures,
                )?;
                continue;
            };

            log::debug!(
                "Mesh '{}' (node {node_index}): {} primitives",
                mesh.display_name(),
                mesh.primitives.len()
            );

            for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
                match assemble_staged(self.document, primitive, &self.options) {
                    Ok(geometry) => {
                        log::debug!(
                            "  primitive {primitive_index} ({:?}): {} vertex floats, {} indices",
                            geometry.topology,
                            geometry.vertices.len(),
                            geometry.index_count()
                        );
                        visit(AssembledPrimitive {
                            node: node_index,
                            mesh: mesh_index,
                            primitive: primitive_index,
                            mesh_name: mesh.name.clone(),
                            geometry,
                        });
                    }
                    Err((stage, error)) => self.record(
                        PrimitiveFailure {
                            node: node_index,
                            mesh: mesh_index,
                            primitive: Some(primitive_index),
                            stage,
                            error,
                        },
                        &mut failures,
                    )?,
                }
            }
        }

        Ok(failures)
    }

    /// Assemble the whole document into an [`Assembly`].
    pub fn assemble(&self) -> Result<Assembly, PrimitiveFailure> {
        let mut primitives = Vec::new();
        let failures = self.for_each(|p| primitives.push(p))?;
        Ok(Assembly {
            primitives,
            failures,
        })
    }

    fn record(
        &self,
        failure: PrimitiveFailure,
        failures: &mut Vec<PrimitiveFailure>,
    ) -> Result<(), PrimitiveFailure> {
        match self.options.error_policy {
            ErrorPolicy::Abort => Err(failure),
            ErrorPolicy::SkipPrimitive => {
                log::warn!("Skipping {failure}");
                failures.push(failure);
                Ok(())
            }
        }
    }
}

/// Assemble every primitive of `document` with the given options.
pub fn assemble_document(
    document: &Document,
    options: AssembleOptions,
) -> Result<Assembly, PrimitiveFailure> {
    MeshAssembler::new(document).with_options(options).assemble()
}
