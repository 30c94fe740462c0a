//! Error types for glTF mesh extraction.

use std::fmt;

use super::types::{ComponentType, Semantic, Topology};

/// The kind of document list an out-of-range index pointed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Mesh,
    Accessor,
    BufferView,
    Buffer,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mesh => f.write_str("mesh"),
            Self::Accessor => f.write_str("accessor"),
            Self::BufferView => f.write_str("buffer view"),
            Self::Buffer => f.write_str("buffer"),
        }
    }
}

/// Coarse classification of a [`GltfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// An index into the document was out of range or dangling.
    Lookup,
    /// A primitive lacks an attribute or index accessor it needs.
    MissingAttribute,
    /// Two streams disagree on their element count, or a post-decode
    /// length check failed.
    Consistency,
    /// The primitive topology is not one the assembler handles.
    UnsupportedTopology,
    /// A byte-range read fell outside its source buffer, or the bytes
    /// could not be interpreted.
    Decode,
    /// The document could not be parsed or its buffers resolved.
    Load,
}

/// Errors that can occur while locating, decoding or assembling mesh data.
#[derive(Debug, thiserror::Error)]
pub enum GltfError {
    /// An index is out of range for the list it refers to.
    #[error("{kind} index {index} out of range (document has {len})")]
    Lookup {
        kind: LookupKind,
        index: usize,
        len: usize,
    },
    /// An accessor has no buffer view (sparse or zero-filled accessors).
    #[error("accessor {accessor} has no buffer view")]
    MissingBufferView { accessor: usize },
    /// A primitive is missing a semantic attribute.
    #[error("primitive has no {semantic} attribute")]
    MissingAttribute { semantic: Semantic },
    /// A triangle primitive has no index accessor.
    #[error("triangle primitive has no index accessor")]
    MissingIndices,
    /// Stream lengths disagree.
    #[error("consistency check failed: {0}")]
    Consistency(String),
    /// The primitive topology is not handled.
    #[error("unsupported topology: {0:?}")]
    UnsupportedTopology(Topology),
    /// A read of `len` bytes at `offset` exceeds the `available` bytes.
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {available} bytes")]
    Decode {
        offset: usize,
        len: usize,
        available: usize,
    },
    /// Index data uses a component type other than u16/u32.
    #[error("unsupported index component type: {0:?}")]
    UnsupportedComponentType(ComponentType),
    /// Failed to parse the glTF document.
    #[error("glTF parse error: {0}")]
    Parse(String),
    /// Failed to resolve buffer data for the document.
    #[error("buffer error: {0}")]
    Buffer(String),
}

impl GltfError {
    /// Shorthand for a [`GltfError::Lookup`].
    pub(crate) fn lookup(kind: LookupKind, index: usize, len: usize) -> Self {
        Self::Lookup { kind, index, len }
    }

    /// Map this error onto its [`ErrorClass`].
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Lookup { .. } | Self::MissingBufferView { .. } => ErrorClass::Lookup,
            Self::MissingAttribute { .. } | Self::MissingIndices => ErrorClass::MissingAttribute,
            Self::Consistency(_) => ErrorClass::Consistency,
            Self::UnsupportedTopology(_) => ErrorClass::UnsupportedTopology,
            Self::Decode { .. } | Self::UnsupportedComponentType(_) => ErrorClass::Decode,
            Self::Parse(_) | Self::Buffer(_) => ErrorClass::Load,
        }
    }
}

#[cfg(feature = "import")]
impl From<gltf_dep::Error> for GltfError {
    fn from(e: gltf_dep::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
