//! Resolution of accessor indices to their buffer view and backing buffer.

use super::error::{GltfError, LookupKind};
use super::types::{Accessor, Buffer, BufferView, Document};

/// The records backing one accessor.
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub index: usize,
    pub accessor: &'a Accessor,
    pub view: &'a BufferView,
    pub buffer: &'a Buffer,
}

impl<'a> Located<'a> {
    /// The bytes covered by the buffer view.
    ///
    /// Fails with [`GltfError::Decode`] when the view extends past the end
    /// of its buffer.
    pub fn bytes(&self) -> Result<&'a [u8], GltfError> {
        // byte_range saturates, so an overflowing view is simply out of range.
        self.buffer
            .data
            .get(self.view.byte_range())
            .ok_or(GltfError::Decode {
                offset: self.view.byte_offset,
                len: self.view.byte_length,
                available: self.buffer.len(),
            })
    }

    /// Length in bytes of the buffer view.
    pub fn byte_length(&self) -> usize {
        self.view.byte_length
    }
}

/// Resolve an accessor index to its accessor, buffer view and buffer.
///
/// Never mutates the document. Any out-of-range index along the chain
/// yields [`GltfError::Lookup`].
pub fn resolve(document: &Document, accessor_index: usize) -> Result<Located<'_>, GltfError> {
    let accessor = document.accessors.get(accessor_index).ok_or_else(|| {
        GltfError::lookup(
            LookupKind::Accessor,
            accessor_index,
            document.accessors.len(),
        )
    })?;

    let view_index = accessor
        .buffer_view
        .ok_or(GltfError::MissingBufferView {
            accessor: accessor_index,
        })?;
    let view = document.buffer_views.get(view_index).ok_or_else(|| {
        GltfError::lookup(
            LookupKind::BufferView,
            view_index,
            document.buffer_views.len(),
        )
    })?;

    let buffer = document.buffers.get(view.buffer).ok_or_else(|| {
        GltfError::lookup(LookupKind::Buffer, view.buffer, document.buffers.len())
    })?;

    Ok(Located {
        index: accessor_index,
        accessor,
        view,
        buffer,
    })
}
