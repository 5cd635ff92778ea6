//! Benchmarks for mesh operations.

use criterion::{criterion_group, criterion_main, Criterion};
use massing::algo::offset::{offset_mesh, OffsetOptions};
use massing::prelude::*;
use nalgebra::Point3;

fn create_grid_mesh(n: usize) -> Mesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n);

    // Create grid vertices
    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    // Create quads
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;
            faces.push(vec![v00, v10, v11, v01]);
        }
    }

    Mesh::from_parts(vertices, faces)
}

fn bench_topology(c: &mut Criterion) {
    let mesh = create_grid_mesh(100);

    c.bench_function("build_topology_100x100", |b| b.iter(|| mesh.build_topology()));

    c.bench_function("weld_vertices_100x100", |b| {
        let mut separated = mesh.clone();
        separated.separate_vertices();
        b.iter(|| {
            let mut welded = separated.clone();
            welded.weld_vertices();
            welded
        });
    });
}

fn bench_face_subdivision(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);
    let sequential = MeshSubdivider::default();
    let parallel = MeshSubdivider::new(SubdivideOptions::default().with_parallel(true));

    c.bench_function("grid_4x4_sequential", |b| {
        b.iter(|| sequential.grid(&mesh, 4, 4).unwrap())
    });
    c.bench_function("grid_4x4_parallel", |b| {
        b.iter(|| parallel.grid(&mesh, 4, 4).unwrap())
    });
    c.bench_function("extrude_capped", |b| {
        b.iter(|| sequential.extrude(&mesh, 1.0, true).unwrap())
    });
}

fn bench_catmull_clark(c: &mut Criterion) {
    let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);

    c.bench_function("catmull_clark_box_4_sequential", |b| {
        let options = CatmullClarkOptions::new(4);
        b.iter(|| catmull_clark(&block, &options).unwrap())
    });
    c.bench_function("catmull_clark_box_4_parallel", |b| {
        let options = CatmullClarkOptions::new(4).with_parallel(true);
        b.iter(|| catmull_clark(&block, &options).unwrap())
    });
}

fn bench_offset(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);
    let options = OffsetOptions::new(0.2);

    c.bench_function("offset_closed_50x50", |b| {
        b.iter(|| offset_mesh(&mesh, &options).unwrap())
    });
}

criterion_group!(
    benches,
    bench_topology,
    bench_face_subdivision,
    bench_catmull_clark,
    bench_offset
);
criterion_main!(benches);
