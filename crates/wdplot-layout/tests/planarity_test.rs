use wdplot_graph::Digraph;
use wdplot_layout::{check_planarity, is_planar};

fn digraph(n: usize, arcs: &[(usize, usize)]) -> Digraph {
    let mut g = Digraph::new();
    for v in 0..n {
        g.add_vertex(v);
    }
    for &(a, b) in arcs {
        g.add_edge(a, b, 1.0);
    }
    g
}

fn complete(n: usize) -> Digraph {
    let mut arcs = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            arcs.push((a, b));
        }
    }
    digraph(n, &arcs)
}

fn petersen() -> Digraph {
    let mut arcs = Vec::new();
    for i in 0..5 {
        arcs.push((i, (i + 1) % 5));
        arcs.push((i, i + 5));
        arcs.push((i + 5, (i + 2) % 5 + 5));
    }
    digraph(10, &arcs)
}

fn grid(w: usize, h: usize) -> Digraph {
    let mut arcs = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let v = y * w + x;
            if x + 1 < w {
                arcs.push((v, v + 1));
            }
            if y + 1 < h {
                arcs.push((v, v + w));
            }
        }
    }
    digraph(w * h, &arcs)
}

#[test]
fn small_complete_graphs_are_planar() {
    for n in 0..=4 {
        assert!(is_planar(&complete(n)), "K{n} should be planar");
    }
}

#[test]
fn kuratowski_graphs_are_not_planar() {
    assert!(!is_planar(&complete(5)));

    let mut k33 = Vec::new();
    for a in 0..3 {
        for b in 3..6 {
            k33.push((a, b));
        }
    }
    assert!(!is_planar(&digraph(6, &k33)));
    assert!(check_planarity(&digraph(6, &k33)).unwrap().is_none());
}

#[test]
fn petersen_graph_is_not_planar() {
    // 15 edges on 10 vertices passes the edge-count bound, so the full test must decide.
    assert!(!is_planar(&petersen()));
}

#[test]
fn direction_and_self_loops_are_ignored() {
    // K4 with every arc doubled in both directions and a self-loop on each vertex.
    let mut arcs = Vec::new();
    for a in 0..4 {
        arcs.push((a, a));
        for b in 0..4 {
            if a != b {
                arcs.push((a, b));
            }
        }
    }
    let g = digraph(4, &arcs);
    assert_eq!(g.edge_count(), 16);
    assert!(is_planar(&g));
}

#[test]
fn embeddings_satisfy_euler_formula() {
    for g in [complete(4), grid(5, 4), digraph(7, &[(0, 1), (2, 3), (3, 4), (4, 2)])] {
        let embedding = check_planarity(&g).unwrap().expect("planar");
        assert_eq!(embedding.node_count(), g.vertex_count());
        embedding.check_structure().unwrap();
    }
}

#[test]
fn embedding_rotations_cover_every_neighbour() {
    let g = grid(3, 3);
    let embedding = check_planarity(&g).unwrap().expect("planar");
    // Centre vertex of a 3x3 grid has four neighbours.
    let mut around = embedding.neighbors_cw_order(4).unwrap();
    around.sort_unstable();
    assert_eq!(around, vec![1, 3, 5, 7]);
}

#[test]
fn planarity_is_deterministic() {
    let g = grid(4, 4);
    let a = check_planarity(&g).unwrap().expect("planar");
    let b = check_planarity(&g).unwrap().expect("planar");
    for v in 0..g.vertex_count() {
        assert_eq!(a.neighbors_cw_order(v).unwrap(), b.neighbors_cw_order(v).unwrap());
    }
}
