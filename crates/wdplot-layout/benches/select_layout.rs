use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use wdplot_graph::Digraph;
use wdplot_layout::{LayoutOptions, SpringOptions, is_planar, select_layout};

fn grid(w: usize, h: usize) -> Digraph {
    let mut g = Digraph::new();
    for v in 0..w * h {
        g.add_vertex(v);
    }
    for y in 0..h {
        for x in 0..w {
            let v = y * w + x;
            if x + 1 < w {
                g.add_edge(v, v + 1, 1.0);
            }
            if y + 1 < h {
                g.add_edge(v + w, v, 2.5);
            }
        }
    }
    g
}

/// A ring with chords every `step` vertices; dense enough to stop being planar.
fn chorded_ring(n: usize, step: usize) -> Digraph {
    let mut g = Digraph::new();
    for v in 0..n {
        g.add_edge(v, (v + 1) % n, 1.0);
        g.add_edge(v, (v + step) % n, 0.5);
        g.add_edge(v, (v + 2 * step + 1) % n, 0.25);
    }
    g
}

fn bench_select_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_layout");
    group.measurement_time(Duration::from_secs(10));

    let options = LayoutOptions {
        spring: SpringOptions {
            seed: Some(1),
            ..SpringOptions::default()
        },
        ..LayoutOptions::default()
    };

    let cases = [
        ("grid_10x10", grid(10, 10)),
        ("grid_25x20", grid(25, 20)),
        ("chorded_ring_60", chorded_ring(60, 7)),
        ("chorded_ring_200", chorded_ring(200, 13)),
    ];

    for (name, g) in &cases {
        group.bench_with_input(BenchmarkId::new("is_planar", name), g, |b, g| {
            b.iter(|| black_box(is_planar(black_box(g))))
        });
        group.bench_with_input(BenchmarkId::new("select_layout", name), g, |b, g| {
            b.iter(|| {
                let layout = select_layout(black_box(g), &options).expect("layout");
                black_box(layout.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_select_layout);
criterion_main!(benches);
