//! Conversion of a parsed glTF document into the core [`Document`].
//!
//! Parsing and buffer resolution (data URIs and external `.bin` files) are
//! delegated to the `gltf` crate. Anything the assembler ignores is
//! reported as a warning rather than rejected.

use std::path::Path;

use super::error::GltfError;
use super::types::*;

/// Load a `.gltf` document from disk, resolving external buffers relative
/// to the file's directory.
pub fn load_document(path: &Path) -> Result<Document, GltfError> {
    let result = gltf_dep::Gltf::open(path)
        .map_err(GltfError::from)
        .and_then(|gltf| convert(gltf, path.parent()));

    match &result {
        Ok(_) => log::info!("Loaded glTF : {}", path.display()),
        Err(e) => log::error!("Failed to load glTF : {} ({e})", path.display()),
    }
    result
}

/// Load a glTF document from bytes.
///
/// `base_dir` is used to resolve relative buffer URIs; without it only
/// embedded (data URI) buffers can be loaded.
pub fn load_document_from_slice(
    data: &[u8],
    base_dir: Option<&Path>,
) -> Result<Document, GltfError> {
    let gltf = gltf_dep::Gltf::from_slice(data)?;
    let document = convert(gltf, base_dir)?;
    log::info!(
        "Loaded glTF document: {} nodes, {} meshes, {} accessors",
        document.nodes.len(),
        document.meshes.len(),
        document.accessors.len()
    );
    Ok(document)
}

fn convert(gltf: gltf_dep::Gltf, base_dir: Option<&Path>) -> Result<Document, GltfError> {
    let gltf_dep::Gltf { document, blob } = gltf;

    let buffers = gltf_dep::import_buffers(&document, base_dir, blob)
        .map_err(|e| GltfError::Buffer(e.to_string()))?
        .into_iter()
        .map(|data| Buffer::new(data.0))
        .collect();

    Ok(Document {
        nodes: document.nodes().map(load_node).collect(),
        meshes: document.meshes().map(|m| load_mesh(&m)).collect(),
        accessors: document.accessors().map(|a| load_accessor(&a)).collect(),
        buffer_views: document
            .views()
            .map(|view| {
                if let Some(stride) = view.stride() {
                    log::warn!(
                        "Buffer view {} declares byte stride {stride}; elements are read tightly packed",
                        view.index()
                    );
                }
                BufferView::new(view.buffer().index(), view.offset(), view.length())
            })
            .collect(),
        buffers,
    })
}

fn load_node(node: gltf_dep::Node<'_>) -> Node {
    Node {
        name: node.name().map(String::from),
        mesh: node.mesh().map(|m| m.index()),
    }
}

fn load_mesh(mesh: &gltf_dep::Mesh<'_>) -> Mesh {
    let primitives = mesh
        .primitives()
        .map(|primitive| {
            let mut attributes = Attributes::new();
            for (semantic, accessor) in primitive.attributes() {
                if let Some(semantic) = map_semantic(&semantic) {
                    attributes.insert(semantic, accessor.index());
                }
            }

            Primitive {
                topology: Topology::from_mode(map_mode(primitive.mode())),
                attributes,
                indices: primitive.indices().map(|a| a.index()),
            }
        })
        .collect();

    Mesh {
        name: mesh.name().map(String::from),
        primitives,
    }
}

fn load_accessor(accessor: &gltf_dep::Accessor<'_>) -> Accessor {
    if accessor.offset() != 0 {
        log::warn!(
            "Accessor {} has byte offset {}; the whole buffer view is decoded",
            accessor.index(),
            accessor.offset()
        );
    }
    if accessor.sparse().is_some() {
        log::warn!(
            "Accessor {} is sparse; sparse substitution is not applied",
            accessor.index()
        );
    }

    let bounds = match (vec3_value(accessor.min()), vec3_value(accessor.max())) {
        (Some(min), Some(max)) => Some(Bounds::new(min, max)),
        _ => None,
    };

    Accessor {
        buffer_view: accessor.view().map(|v| v.index()),
        count: accessor.count(),
        component_type: map_data_type(accessor.data_type()),
        bounds,
    }
}

/// Map a glTF semantic; sets other than the first color are ignored.
fn map_semantic(semantic: &gltf_dep::Semantic) -> Option<Semantic> {
    match semantic {
        gltf_dep::Semantic::Positions => Some(Semantic::Position),
        gltf_dep::Semantic::Normals => Some(Semantic::Normal),
        gltf_dep::Semantic::Colors(0) => Some(Semantic::Color0),
        _ => None,
    }
}

fn map_mode(mode: gltf_dep::mesh::Mode) -> i32 {
    use gltf_dep::mesh::Mode;

    match mode {
        Mode::Points => 0,
        Mode::Lines => 1,
        Mode::LineLoop => 2,
        Mode::LineStrip => 3,
        Mode::Triangles => 4,
        Mode::TriangleStrip => 5,
        Mode::TriangleFan => 6,
    }
}

fn map_data_type(data_type: gltf_dep::accessor::DataType) -> ComponentType {
    use gltf_dep::accessor::DataType;

    match data_type {
        DataType::I8 => ComponentType::I8,
        DataType::U8 => ComponentType::U8,
        DataType::I16 => ComponentType::I16,
        DataType::U16 => ComponentType::U16,
        DataType::U32 => ComponentType::U32,
        DataType::F32 => ComponentType::F32,
    }
}

/// Read a three-element numeric JSON array.
fn vec3_value(value: Option<gltf_dep::json::Value>) -> Option<[f32; 3]> {
    let value = value?;
    let array = value.as_array()?;
    if array.len() != 3 {
        return None;
    }
    let mut out = [0.0f32; 3];
    for (dst, src) in out.iter_mut().zip(array) {
        *dst = src.as_f64()? as f32;
    }
    Some(out)
}
