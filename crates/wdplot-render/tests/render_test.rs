use indexmap::IndexMap;
use wdplot_graph::Digraph;
use wdplot_layout::{Layout, LayoutOptions, LayoutStrategy, Point, select_layout};
use wdplot_render::{
    DeterministicTextMeasurer, EdgePath, Error, Scene, SvgRenderOptions, build_scene,
    render_scene_svg, render_svg,
};

fn weighted(n: usize, arcs: &[(usize, usize, f64)]) -> Digraph {
    let mut g = Digraph::new();
    for v in 0..n {
        g.add_vertex(v);
    }
    for &(a, b, w) in arcs {
        g.add_edge(a, b, w);
    }
    g
}

fn path3() -> Digraph {
    weighted(3, &[(0, 1, 4.5), (1, 2, 2.0)])
}

fn scene_for(g: &Digraph, options: &SvgRenderOptions) -> Scene {
    let layout = select_layout(g, &LayoutOptions::default()).expect("layout ok");
    build_scene(g, &layout, options, &DeterministicTextMeasurer::default()).expect("scene ok")
}

fn with_weights() -> SvgRenderOptions {
    SvgRenderOptions {
        show_weights: true,
        ..SvgRenderOptions::default()
    }
}

#[test]
fn weight_labels_render_when_enabled() {
    let g = path3();
    let layout = select_layout(&g, &LayoutOptions::default()).expect("layout ok");
    assert_eq!(layout.strategy, LayoutStrategy::Planar);

    let svg = render_svg(&g, &layout, &with_weights()).expect("render ok");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"class="edge-labels""#));
    assert!(svg.contains(">4.5</text>"));
    assert!(svg.contains(">2.0</text>"));
}

#[test]
fn weight_labels_are_omitted_by_default() {
    let g = path3();
    let layout = select_layout(&g, &LayoutOptions::default()).expect("layout ok");
    let svg = render_svg(&g, &layout, &SvgRenderOptions::default()).expect("render ok");
    assert!(!svg.contains(">4.5</text>"));
    assert!(!svg.contains(">2.0</text>"));
    assert!(!svg.contains(r#"class="edge-label""#));

    let scene = scene_for(&g, &SvgRenderOptions::default());
    assert!(scene.edges.iter().all(|e| e.label.is_none()));
}

#[test]
fn every_vertex_and_arc_is_drawn() {
    let g = path3();
    let svg = render_svg(
        &g,
        &select_layout(&g, &LayoutOptions::default()).expect("layout ok"),
        &SvgRenderOptions::default(),
    )
    .expect("render ok");
    assert_eq!(svg.matches("<circle").count(), 3);
    assert_eq!(svg.matches(r#"<path class="edge""#).count(), 2);
    assert_eq!(svg.matches(r#"marker-end="url(#wdplot-arrow)""#).count(), 2);
    assert!(svg.contains(r#"<marker id="wdplot-arrow""#));
    for label in [">0</text>", ">1</text>", ">2</text>"] {
        assert!(svg.contains(label), "missing {label}");
    }
}

#[test]
fn nodes_stay_inside_the_canvas() {
    let g = weighted(
        5,
        &[
            (0, 1, 1.0),
            (1, 2, 1.0),
            (2, 3, 1.0),
            (3, 4, 1.0),
            (4, 0, 1.0),
            (0, 2, 1.0),
        ],
    );
    let options = SvgRenderOptions::default();
    let scene = scene_for(&g, &options);
    let inset = options.margin + scene.node_radius - 1e-9;
    for node in &scene.nodes {
        assert!(node.cx >= inset && node.cx <= options.width - inset);
        assert!(node.cy >= inset && node.cy <= options.height - inset);
    }
}

#[test]
fn self_loop_is_drawn_as_a_loop() {
    let g = weighted(1, &[(0, 0, 1.0)]);
    let scene = scene_for(&g, &with_weights());
    assert_eq!(scene.edges.len(), 1);
    let edge = &scene.edges[0];
    let EdgePath::Loop { start, end, .. } = edge.path else {
        panic!("expected a loop path, got {:?}", edge.path);
    };
    assert!(start != end);
    assert_eq!(edge.label.as_ref().map(|l| l.text.as_str()), Some("1.0"));

    let svg = render_scene_svg(&scene, &with_weights());
    assert!(svg.contains(" d=\"M"));
    assert!(svg.contains('C'));
    assert!(svg.contains(">1.0</text>"));
}

#[test]
fn antiparallel_arcs_are_curved() {
    let g = weighted(3, &[(0, 1, 1.0), (1, 0, 2.0), (1, 2, 3.0)]);
    let scene = scene_for(&g, &SvgRenderOptions::default());
    let kinds: Vec<_> = scene
        .edges
        .iter()
        .map(|e| matches!(e.path, EdgePath::Quadratic { .. }))
        .collect();
    assert_eq!(kinds, vec![true, true, false]);
}

#[test]
fn wide_labels_enlarge_every_circle() {
    let mut g = Digraph::new();
    g.add_vertex(7);
    g.add_vertex(1_000_000_000);
    g.add_edge(7, 1_000_000_000, 1.0);

    let options = SvgRenderOptions::default();
    let scene = scene_for(&g, &options);
    // Ten columns at 0.6 * 15px.
    assert!((scene.node_radius - (45.0 + 4.0)).abs() < 1e-9);
}

#[test]
fn empty_graph_renders_a_blank_canvas() {
    let g = Digraph::new();
    let layout = select_layout(&g, &LayoutOptions::default()).expect("layout ok");
    let svg = render_svg(&g, &layout, &with_weights()).expect("render ok");
    assert!(svg.contains(r#"width="800" height="600""#));
    assert!(!svg.contains("<circle"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn missing_position_is_an_error() {
    let g = path3();
    let mut positions = IndexMap::new();
    positions.insert(0, Point::new(0.0, 0.0));
    positions.insert(2, Point::new(1.0, 0.0));
    let layout = Layout {
        strategy: LayoutStrategy::Planar,
        seed: None,
        positions,
    };
    let err = render_svg(&g, &layout, &SvgRenderOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingPosition { vertex: 1 }));
    assert_eq!(err.to_string(), "layout has no position for vertex 1");
}

#[test]
fn text_is_escaped() {
    let options = SvgRenderOptions {
        diagram_id: Some("a<b".to_string()),
        font_family: "\"Fira Sans\", serif".to_string(),
        ..SvgRenderOptions::default()
    };
    let g = path3();
    let layout = select_layout(&g, &LayoutOptions::default()).expect("layout ok");
    let svg = render_svg(&g, &layout, &options).expect("render ok");
    assert!(svg.contains(r#"<svg id="a&lt;b""#));
    assert!(svg.contains("url(#a&lt;b-arrow)"));
    assert!(svg.contains("font-family:&quot;Fira Sans&quot;, serif"));
    assert!(!svg.contains("a<b"));
}

#[test]
fn scene_round_trips_through_json() {
    let g = weighted(2, &[(0, 1, 0.25), (1, 1, 3.0)]);
    let scene = scene_for(&g, &with_weights());
    let json = serde_json::to_string(&scene).expect("serialize");
    assert!(json.contains(r#""strategy":"planar""#));
    assert!(json.contains(r#""kind":"loop""#));

    let back: Scene = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.nodes.len(), 2);
    assert_eq!(back.edges.len(), 2);
    assert!(matches!(back.edges[1].path, EdgePath::Loop { .. }));
    assert_eq!(
        back.edges[0].label.as_ref().map(|l| l.text.as_str()),
        Some("0.25")
    );
    assert_eq!(
        render_scene_svg(&back, &with_weights()),
        render_scene_svg(&scene, &with_weights())
    );
}

#[test]
fn options_load_from_json_with_defaults() {
    let options = SvgRenderOptions::from_json_str(
        r#"{ "show_weights": true, "width": 400, "theme": { "edge": "red" } }"#,
    )
    .expect("options");
    assert!(options.show_weights);
    assert_eq!(options.width, 400.0);
    assert_eq!(options.height, 600.0);
    assert_eq!(options.font_size, 15.0);
    assert_eq!(options.theme.edge, "red");
    assert_eq!(options.theme.node_fill, "#1f78b4");

    let err = SvgRenderOptions::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}
