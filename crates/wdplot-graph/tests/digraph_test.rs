use wdplot_graph::{Digraph, Edge, EdgeKey};

#[test]
fn add_vertex_is_idempotent() {
    let mut g = Digraph::new();
    assert!(g.add_vertex(3));
    assert!(!g.add_vertex(3));
    assert_eq!(g.vertex_count(), 1);
    assert!(g.has_vertex(3));
    assert!(!g.has_vertex(0));
}

#[test]
fn add_edge_creates_missing_endpoints() {
    let mut g = Digraph::new();
    assert_eq!(g.add_edge(0, 1, 4.5), None);
    assert!(g.has_vertex(0));
    assert!(g.has_vertex(1));
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.weight(0, 1), Some(4.5));
}

#[test]
fn arcs_are_directed() {
    let mut g = Digraph::new();
    g.add_edge(0, 1, 1.0);

    assert!(g.has_edge(0, 1));
    assert!(!g.has_edge(1, 0));
    assert_eq!(g.successors(0), vec![1]);
    assert_eq!(g.successors(1), Vec::<usize>::new());
    assert_eq!(g.predecessors(1), vec![0]);

    g.add_edge(1, 0, 2.0);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.weight(1, 0), Some(2.0));
    assert_eq!(g.weight(0, 1), Some(1.0));
}

#[test]
fn reversed_key_finds_the_antiparallel_arc() {
    let mut g = Digraph::new();
    g.add_edge(0, 1, 1.0);
    g.add_edge(1, 2, 1.0);
    g.add_edge(2, 1, 3.0);

    let keys: Vec<EdgeKey> = g.edges().map(|e| e.key()).collect();
    assert_eq!(keys[0], EdgeKey::new(0, 1));
    assert_eq!(keys[1].reversed(), EdgeKey::new(2, 1));
    assert!(!g.contains_key(keys[0].reversed()));
    assert!(g.contains_key(keys[1].reversed()));
    assert!(g.contains_key(keys[2].reversed()));
}

#[test]
fn duplicate_arc_keeps_slot_and_last_weight() {
    let mut g = Digraph::new();
    g.add_edge(0, 1, 1.0);
    g.add_edge(1, 2, 2.0);
    assert_eq!(g.add_edge(0, 1, 7.25), Some(1.0));

    assert_eq!(g.edge_count(), 2);
    let edges: Vec<Edge> = g.edges().collect();
    assert_eq!(
        edges,
        vec![
            Edge {
                from: 0,
                to: 1,
                weight: 7.25
            },
            Edge {
                from: 1,
                to: 2,
                weight: 2.0
            },
        ]
    );
    assert_eq!(g.out_edges(0).len(), 1);
}

#[test]
fn self_loops_are_representable() {
    let mut g = Digraph::new();
    g.add_edge(0, 0, 1.0);

    assert_eq!(g.vertex_count(), 1);
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.self_loop_count(), 1);
    assert_eq!(g.successors(0), vec![0]);
    assert_eq!(g.predecessors(0), vec![0]);
    assert!(g.edges().next().unwrap().is_self_loop());
}

#[test]
fn vertices_iterate_in_insertion_order() {
    let mut g = Digraph::new();
    g.add_edge(2, 0, 1.0);
    g.add_vertex(1);
    g.add_vertex(0);

    assert_eq!(g.vertices().collect::<Vec<_>>(), vec![2, 0, 1]);
    assert_eq!(g.vertex_position(2), Some(0));
    assert_eq!(g.vertex_position(1), Some(2));
    assert_eq!(g.vertex_position(9), None);
}

#[test]
fn display_lists_out_arcs_per_vertex() {
    let mut g = Digraph::new();
    g.add_edge(1, 2, 2.0);
    g.add_edge(0, 1, 4.5);
    g.add_edge(0, 2, 0.25);
    g.add_vertex(3);

    let text = g.to_string();
    assert_eq!(
        text,
        "Digraph (V=4, E=3)\n\
         Vertex 0: --4.5-->(1), --0.25-->(2)\n\
         Vertex 1: --2.0-->(2)\n\
         Vertex 2: \n\
         Vertex 3: \n"
    );
}

#[test]
fn empty_graph_is_empty() {
    let g = Digraph::new();
    assert!(g.is_empty());
    assert_eq!(g.vertices().len(), 0);
    assert_eq!(g.edges().len(), 0);
    assert_eq!(g.to_string(), "Digraph (V=0, E=0)\n");
}
