//! In-memory document model consumed by the mesh assembler.
//!
//! These records hold only what mesh extraction needs: nodes with an
//! optional mesh reference, meshes with their primitives, accessors,
//! buffer views and raw buffers. They are read-only to the assembler.

use std::fmt;
use std::ops::Range;

use nalgebra::Point3;

use super::error::GltfError;

/// glTF primitive mode for points.
pub const MODE_POINTS: i32 = 0;
/// glTF primitive mode for triangle lists.
pub const MODE_TRIANGLES: i32 = 4;
/// Mode value used when a primitive does not declare one.
pub const MODE_DEFAULT: i32 = -1;

/// A parsed scene description with all buffer data resolved.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Nodes in document order.
    pub nodes: Vec<Node>,
    /// Meshes in document order.
    pub meshes: Vec<Mesh>,
    /// Accessors in document order.
    pub accessors: Vec<Accessor>,
    /// Buffer views in document order.
    pub buffer_views: Vec<BufferView>,
    /// Raw buffers in document order.
    pub buffers: Vec<Buffer>,
}

impl Document {
    /// Iterate over `(node_index, mesh_index)` for every node that
    /// references a mesh.
    pub fn mesh_nodes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.mesh.map(|m| (i, m)))
    }

    /// Total number of primitives across all meshes.
    pub fn primitive_count(&self) -> usize {
        self.meshes.iter().map(|m| m.primitives.len()).sum()
    }
}

/// A scene node. Only the mesh reference matters for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub name: Option<String>,
    /// Index into [`Document::meshes`], or `None` when the node has no mesh.
    pub mesh: Option<usize>,
}

impl Node {
    /// Create a node referencing the given mesh.
    pub fn with_mesh(mesh: usize) -> Self {
        Self {
            name: None,
            mesh: Some(mesh),
        }
    }

    /// Build a node from a signed mesh index where any negative value
    /// (conventionally `-1`) means "no mesh".
    pub fn from_raw_mesh_index(index: i64) -> Self {
        Self {
            name: None,
            mesh: usize::try_from(index).ok(),
        }
    }
}

/// A named list of primitives.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
}

impl Mesh {
    /// Name used in diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

/// How a primitive's vertices are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Each vertex is a separate point (mode 0).
    Points,
    /// Every three indexed vertices form a triangle (mode 4).
    Triangles,
    /// No mode declared; handled exactly like [`Topology::Triangles`].
    #[default]
    Default,
    /// Any other glTF mode (lines, strips, fans, or garbage).
    Other(i32),
}

impl Topology {
    /// Map a glTF mode value.
    pub fn from_mode(mode: i32) -> Self {
        match mode {
            MODE_POINTS => Self::Points,
            MODE_TRIANGLES => Self::Triangles,
            MODE_DEFAULT => Self::Default,
            other => Self::Other(other),
        }
    }

    /// The glTF mode value for this topology.
    pub fn mode(&self) -> i32 {
        match self {
            Self::Points => MODE_POINTS,
            Self::Triangles => MODE_TRIANGLES,
            Self::Default => MODE_DEFAULT,
            Self::Other(mode) => *mode,
        }
    }

    /// Whether this primitive is treated as an indexed triangle list.
    pub fn is_triangles(&self) -> bool {
        matches!(self, Self::Triangles | Self::Default)
    }
}

/// Vertex attribute semantics the assembler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantic {
    Position,
    Normal,
    Color0,
}

impl Semantic {
    pub const ALL: [Semantic; 3] = [Self::Position, Self::Normal, Self::Color0];

    /// The glTF attribute name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Normal => "NORMAL",
            Self::Color0 => "COLOR_0",
        }
    }

    /// Parse a glTF attribute name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic-keyed accessor indices for one primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    position: Option<usize>,
    normal: Option<usize>,
    color0: Option<usize>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, semantic: Semantic) -> &Option<usize> {
        match semantic {
            Semantic::Position => &self.position,
            Semantic::Normal => &self.normal,
            Semantic::Color0 => &self.color0,
        }
    }

    fn slot_mut(&mut self, semantic: Semantic) -> &mut Option<usize> {
        match semantic {
            Semantic::Position => &mut self.position,
            Semantic::Normal => &mut self.normal,
            Semantic::Color0 => &mut self.color0,
        }
    }

    /// Accessor index for a semantic, if present.
    pub fn get(&self, semantic: Semantic) -> Option<usize> {
        *self.slot(semantic)
    }

    /// Set the accessor for a semantic, returning the previous one.
    pub fn insert(&mut self, semantic: Semantic, accessor: usize) -> Option<usize> {
        self.slot_mut(semantic).replace(accessor)
    }

    /// Builder form of [`Attributes::insert`].
    pub fn with(mut self, semantic: Semantic, accessor: usize) -> Self {
        self.insert(semantic, accessor);
        self
    }

    /// Accessor index for a semantic the caller cannot do without.
    pub fn require(&self, semantic: Semantic) -> Result<usize, GltfError> {
        self.get(semantic)
            .ok_or(GltfError::MissingAttribute { semantic })
    }

    /// Iterate over the attributes that are present.
    pub fn iter(&self) -> impl Iterator<Item = (Semantic, usize)> + '_ {
        Semantic::ALL
            .into_iter()
            .filter_map(move |s| self.get(s).map(|a| (s, a)))
    }
}

/// One drawable unit within a mesh.
#[derive(Debug, Clone, Default)]
pub struct Primitive {
    pub topology: Topology,
    pub attributes: Attributes,
    /// Index accessor, or `None` for non-indexed primitives.
    pub indices: Option<usize>,
}

/// Numeric type of the components an accessor stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
    /// A tag outside the glTF 2.0 set.
    Unknown(u32),
}

impl ComponentType {
    /// Map a GL enum value (5120..=5126).
    pub fn from_gl_enum(value: u32) -> Self {
        match value {
            5120 => Self::I8,
            5121 => Self::U8,
            5122 => Self::I16,
            5123 => Self::U16,
            5125 => Self::U32,
            5126 => Self::F32,
            other => Self::Unknown(other),
        }
    }

    /// The GL enum value for this component type.
    pub fn as_gl_enum(&self) -> u32 {
        match self {
            Self::I8 => 5120,
            Self::U8 => 5121,
            Self::I16 => 5122,
            Self::U16 => 5123,
            Self::U32 => 5125,
            Self::F32 => 5126,
            Self::Unknown(value) => *value,
        }
    }

    /// Size in bytes of one component, if known.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::I8 | Self::U8 => Some(1),
            Self::I16 | Self::U16 => Some(2),
            Self::U32 | Self::F32 => Some(4),
            Self::Unknown(_) => None,
        }
    }
}

/// Declared axis-aligned bounds of a POSITION accessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Bounds {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self {
            min: Point3::from(min),
            max: Point3::from(max),
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Typed view metadata over a buffer view.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    /// Backing buffer view; `None` for sparse/zero-initialized accessors.
    pub buffer_view: Option<usize>,
    /// Number of elements.
    pub count: usize,
    pub component_type: ComponentType,
    /// Advisory min/max (POSITION accessors only).
    pub bounds: Option<Bounds>,
}

impl Accessor {
    pub fn new(buffer_view: usize, count: usize, component_type: ComponentType) -> Self {
        Self {
            buffer_view: Some(buffer_view),
            count,
            component_type,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// A byte range within one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferView {
    pub buffer: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
}

impl BufferView {
    pub fn new(buffer: usize, byte_offset: usize, byte_length: usize) -> Self {
        Self {
            buffer,
            byte_offset,
            byte_length,
        }
    }

    /// The half-open byte range this view covers.
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_offset..self.byte_offset.saturating_add(self.byte_length)
    }
}

/// Owned raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    pub data: Vec<u8>,
}

impl Buffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_from_mode() {
        assert_eq!(Topology::from_mode(0), Topology::Points);
        assert_eq!(Topology::from_mode(4), Topology::Triangles);
        assert_eq!(Topology::from_mode(-1), Topology::Default);
        assert_eq!(Topology::from_mode(1), Topology::Other(1));
        assert!(Topology::Default.is_triangles());
        assert!(Topology::Triangles.is_triangles());
        assert!(!Topology::Points.is_triangles());
        assert!(!Topology::Other(5).is_triangles());
    }

    #[test]
    fn test_node_negative_mesh_index() {
        assert_eq!(Node::from_raw_mesh_index(-1).mesh, None);
        assert_eq!(Node::from_raw_mesh_index(0).mesh, Some(0));
        assert_eq!(Node::from_raw_mesh_index(3).mesh, Some(3));
    }

    #[test]
    fn test_attributes_require() {
        let attrs = Attributes::new().with(Semantic::Position, 2);
        assert_eq!(attrs.require(Semantic::Position).unwrap(), 2);
        match attrs.require(Semantic::Normal) {
            Err(GltfError::MissingAttribute { semantic }) => {
                assert_eq!(semantic, Semantic::Normal)
            }
            other => panic!("expected MissingAttribute, got {other:?}"),
        }
        assert_eq!(attrs.iter().collect::<Vec<_>>(), vec![(Semantic::Position, 2)]);
    }

    #[test]
    fn test_semantic_names() {
        assert_eq!(Semantic::from_name("COLOR_0"), Some(Semantic::Color0));
        assert_eq!(Semantic::from_name("TEXCOORD_0"), None);
        assert_eq!(Semantic::Normal.to_string(), "NORMAL");
    }

    #[test]
    fn test_component_type_roundtrip() {
        for value in [5120, 5121, 5122, 5123, 5125, 5126, 5124] {
            assert_eq!(ComponentType::from_gl_enum(value).as_gl_enum(), value);
        }
        assert_eq!(ComponentType::from_gl_enum(5123).size(), Some(2));
        assert_eq!(ComponentType::from_gl_enum(5124).size(), None);
    }

    #[test]
    fn test_mesh_nodes_skips_meshless() {
        let doc = Document {
            nodes: vec![
                Node::from_raw_mesh_index(-1),
                Node::with_mesh(0),
                Node::default(),
            ],
            ..Default::default()
        };
        assert_eq!(doc.mesh_nodes().collect::<Vec<_>>(), vec![(1, 0)]);
    }
}
