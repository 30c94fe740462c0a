//! Scenario tests over synthetic documents.

use crate::gltf::{
    Accessor, Attributes, Bounds, Buffer, BufferView, ComponentType, Document, Mesh, Node,
    Primitive, Semantic, Topology,
};


/// Builds a [`Document`] whose buffer views all live in one buffer.
#[derive(Default)]
pub(super) struct DocumentBuilder {
    document: Document,
    bytes: Vec<u8>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bytes` to the buffer and add a view over them.
    pub fn view(&mut self, bytes: &[u8]) -> usize {
        let offset = self.bytes.len();
        self.bytes.extend_from_slice(bytes);
        // Keep every view 4-byte aligned.
        while self.bytes.len() % 4 != 0 {
            self.bytes.push(0);
        }
        self.document
            .buffer_views
            .push(BufferView::new(0, offset, bytes.len()));
        self.document.buffer_views.len() - 1
    }

    pub fn accessor(&mut self, accessor: Accessor) -> usize {
        self.document.accessors.push(accessor);
        self.document.accessors.len() - 1
    }

    pub fn vec3_accessor(&mut self, values: &[[f32; 3]]) -> usize {
        let bytes: Vec<u8> = values
            .iter()
            .flatten()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let view = self.view(&bytes);
        self.accessor(Accessor::new(view, values.len(), ComponentType::F32))
    }

    pub fn u16_indices(&mut self, indices: &[u16]) -> usize {
        let bytes: Vec<u8> = indices.iter().flat_map(|v| v.to_le_bytes()).collect();
        let view = self.view(&bytes);
        self.accessor(Accessor::new(view, indices.len(), ComponentType::U16))
    }

    pub fn u32_indices(&mut self, indices: &[u32]) -> usize {
        let bytes: Vec<u8> = indices.iter().flat_map(|v| v.to_le_bytes()).collect();
        let view = self.view(&bytes);
        self.accessor(Accessor::new(view, indices.len(), ComponentType::U32))
    }

    pub fn mesh(&mut self, name: &str, primitives: Vec<Primitive>) -> usize {
        self.document.meshes.push(Mesh {
            name: Some(name.to_string()),
            primitives,
        });
        self.document.meshes.len() - 1
    }

    pub fn node(&mut self, mesh: Option<usize>) -> usize {
        self.document.nodes.push(Node { name: None, mesh });
        self.document.nodes.len() - 1
    }

    pub fn build(mut self) -> Document {
        self.document.buffers.push(Buffer::new(self.bytes));
        self.document
    }
}

pub(super) fn triangles(position: usize, normal: usize, indices: usize) -> Primitive {
    Primitive {
        topology: Topology::Triangles,
        attributes: Attributes::new()
            .with(Semantic::Position, position)
            .with(Semantic::Normal, normal),
        indices: Some(indices),
    }
}

pub(super) fn points(position: usize, color: usize) -> Primitive {
    Primitive {
        topology: Topology::Points,
        attributes: Attributes::new()
            .with(Semantic::Position, position)
            .with(Semantic::Color0, color),
        indices: None,
    }
}

/// One mesh, one triangle primitive: a right triangle in the XY plane
/// facing +Z, indexed with u16.
pub(super) fn single_triangle() -> Document {
    let mut b = DocumentBuilder::new();
    let position = b.vec3_accessor(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let normal = b.vec3_accessor(&[[0.0, 0.0, 1.0]; 3]);
    let indices = b.u16_indices(&[0, 1, 2]);
    b.document.accessors[position].bounds = Some(Bounds::new([0.0; 3], [1.0, 1.0, 0.0]));
    let mesh = b.mesh("triangle", vec![triangles(position, normal, indices)]);
    b.node(Some(mesh));
    b.build()
}
