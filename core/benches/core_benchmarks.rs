use criterion::{Criterion, black_box, criterion_group, criterion_main};

use gleaner_core::gltf::{
    assemble_document, decode_indices, Accessor, AssembleOptions, Attributes, Buffer, BufferView,
    ComponentType, Document, Mesh, Node, Primitive, Semantic, Topology,
};

fn push_view(data: &mut Vec<u8>, bytes: Vec<u8>) -> BufferView {
    let view = BufferView::new(0, data.len(), bytes.len());
    data.extend_from_slice(&bytes);
    while data.len() % 4 != 0 {
        data.push(0);
    }
    view
}

/// A grid of `size * size` vertices split into two triangles per cell.
fn grid_document(size: u32) -> Document {
    let mut data = Vec::new();

    let positions: Vec<u8> = (0..size * size)
        .flat_map(|i| [(i % size) as f32, (i / size) as f32, 0.0])
        .flat_map(f32::to_le_bytes)
        .collect();
    let normals: Vec<u8> = (0..size * size)
        .flat_map(|_| [0.0f32, 0.0, 1.0])
        .flat_map(f32::to_le_bytes)
        .collect();
    let indices: Vec<u8> = (0..size - 1)
        .flat_map(|y| (0..size - 1).map(move |x| y * size + x))
        .flat_map(|i| [i, i + 1, i + size, i + 1, i + size + 1, i + size])
        .flat_map(u32::to_le_bytes)
        .collect();

    let vertex_count = (size * size) as usize;
    let index_count = indices.len() / 4;
    let buffer_views = vec![
        push_view(&mut data, positions),
        push_view(&mut data, normals),
        push_view(&mut data, indices),
    ];

    Document {
        nodes: vec![Node::with_mesh(0)],
        meshes: vec![Mesh {
            name: Some("grid".to_string()),
            primitives: vec![Primitive {
                topology: Topology::Triangles,
                attributes: Attributes::new()
                    .with(Semantic::Position, 0)
                    .with(Semantic::Normal, 1),
                indices: Some(2),
            }],
        }],
        accessors: vec![
            Accessor::new(0, vertex_count, ComponentType::F32),
            Accessor::new(1, vertex_count, ComponentType::F32),
            Accessor::new(2, index_count, ComponentType::U32),
        ],
        buffer_views,
        buffers: vec![Buffer::new(data)],
    }
}

// ---------------------------------------------------------------------------
// Index decoding
// ---------------------------------------------------------------------------

fn bench_decode_u16_indices(c: &mut Criterion) {
    let bytes: Vec<u8> = (0..65_535u16).flat_map(u16::to_le_bytes).collect();
    c.bench_function("decode_indices_u16_64k", |b| {
        b.iter(|| decode_indices(black_box(&bytes), ComponentType::U16));
    });
}

fn bench_decode_u32_indices(c: &mut Criterion) {
    let bytes: Vec<u8> = (0..65_535u32).flat_map(u32::to_le_bytes).collect();
    c.bench_function("decode_indices_u32_64k", |b| {
        b.iter(|| decode_indices(black_box(&bytes), ComponentType::U32));
    });
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

fn bench_assemble_grid_small(c: &mut Criterion) {
    let document = grid_document(32);
    c.bench_function("assemble_grid_32x32", |b| {
        b.iter(|| assemble_document(black_box(&document), AssembleOptions::default()));
    });
}

fn bench_assemble_grid_large(c: &mut Criterion) {
    let document = grid_document(256);
    c.bench_function("assemble_grid_256x256", |b| {
        b.iter(|| assemble_document(black_box(&document), AssembleOptions::default()));
    });
}

criterion_group!(
    benches,
    bench_decode_u16_indices,
    bench_decode_u32_indices,
    bench_assemble_grid_small,
    bench_assemble_grid_large,
);
criterion_main!(benches);
