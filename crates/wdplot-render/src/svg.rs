mod util;

use crate::model::{EdgePath, Scene};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use util::{escape_xml, fmt};

/// Colours used by the SVG writer. Any CSS colour string is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub node_fill: String,
    pub node_stroke: String,
    pub node_label: String,
    pub edge: String,
    pub edge_label: String,
    pub edge_label_background: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            node_fill: "#1f78b4".to_string(),
            node_stroke: "#1f78b4".to_string(),
            node_label: "white".to_string(),
            edge: "#000000".to_string(),
            edge_label: "#000000".to_string(),
            edge_label_background: "white".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgRenderOptions {
    /// Root element id; also prefixes marker ids so several plots can share a page.
    pub diagram_id: Option<String>,
    /// Draw the weight of every arc at its midpoint.
    pub show_weights: bool,
    pub width: f64,
    pub height: f64,
    /// Empty space kept between the drawing and the canvas border.
    pub margin: f64,
    /// Minimum vertex radius; grows when an id label would not fit.
    pub node_radius: f64,
    pub font_family: String,
    pub font_size: f64,
    pub edge_label_font_size: f64,
    pub edge_width: f64,
    pub theme: Theme,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            show_weights: false,
            width: 800.0,
            height: 600.0,
            margin: 48.0,
            node_radius: 18.0,
            font_family: "sans-serif".to_string(),
            font_size: 15.0,
            edge_label_font_size: 12.0,
            edge_width: 1.5,
            theme: Theme::default(),
        }
    }
}

impl SvgRenderOptions {
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub(crate) fn diagram_id(&self) -> &str {
        self.diagram_id.as_deref().unwrap_or("wdplot")
    }
}

fn write_style(out: &mut String, options: &SvgRenderOptions) {
    let theme = &options.theme;
    let font = escape_xml(&options.font_family);
    let _ = write!(
        out,
        "<style>\
.edge{{fill:none;stroke:{edge};stroke-width:{edge_width};}}\
.arrowMarkerPath{{fill:{edge};stroke:none;}}\
.node circle{{fill:{node_fill};stroke:{node_stroke};stroke-width:1;}}\
.node text{{fill:{node_label};font-family:{font};font-size:{font_size}px;}}\
.edge-label rect{{fill:{label_bg};stroke:none;}}\
.edge-label text{{fill:{label};font-family:{font};font-size:{label_size}px;}}\
</style>",
        edge = escape_xml(&theme.edge),
        edge_width = fmt(options.edge_width),
        node_fill = escape_xml(&theme.node_fill),
        node_stroke = escape_xml(&theme.node_stroke),
        node_label = escape_xml(&theme.node_label),
        font = font,
        font_size = fmt(options.font_size),
        label_bg = escape_xml(&theme.edge_label_background),
        label = escape_xml(&theme.edge_label),
        label_size = fmt(options.edge_label_font_size),
    );
}

fn write_path_data(out: &mut String, path: &EdgePath) {
    match path {
        EdgePath::Line { start, end } => {
            let _ = write!(
                out,
                "M{},{}L{},{}",
                fmt(start.x),
                fmt(start.y),
                fmt(end.x),
                fmt(end.y)
            );
        }
        EdgePath::Quadratic {
            start,
            control,
            end,
        } => {
            let _ = write!(
                out,
                "M{},{}Q{},{},{},{}",
                fmt(start.x),
                fmt(start.y),
                fmt(control.x),
                fmt(control.y),
                fmt(end.x),
                fmt(end.y)
            );
        }
        EdgePath::Loop {
            start,
            control1,
            control2,
            end,
        } => {
            let _ = write!(
                out,
                "M{},{}C{},{},{},{},{},{}",
                fmt(start.x),
                fmt(start.y),
                fmt(control1.x),
                fmt(control1.y),
                fmt(control2.x),
                fmt(control2.y),
                fmt(end.x),
                fmt(end.y)
            );
        }
    }
}

/// Serialises `scene` as a standalone SVG document.
pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> String {
    let diagram_id_esc = escape_xml(options.diagram_id());
    let w = fmt(scene.width);
    let h = fmt(scene.height);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="weighted-digraph" data-layout="{strategy}">"#,
        id = diagram_id_esc,
        w = w,
        h = h,
        strategy = scene.strategy,
    );
    write_style(&mut out, options);
    let _ = write!(
        &mut out,
        r#"<defs><marker id="{id}-arrow" viewBox="0 0 10 10" refX="10" refY="5" markerUnits="userSpaceOnUse" markerWidth="10" markerHeight="10" orient="auto"><path d="M 0 0 L 10 5 L 0 10 z" class="arrowMarkerPath"/></marker></defs>"#,
        id = diagram_id_esc
    );
    let _ = write!(
        &mut out,
        r#"<rect class="background" x="0" y="0" width="{w}" height="{h}" fill="{fill}"/>"#,
        fill = escape_xml(&options.theme.background)
    );

    out.push_str(r#"<g class="edges">"#);
    for edge in &scene.edges {
        let _ = write!(
            &mut out,
            r#"<path class="edge" id="{id}-e{from}-{to}" d=""#,
            id = diagram_id_esc,
            from = edge.from,
            to = edge.to
        );
        write_path_data(&mut out, &edge.path);
        let _ = write!(&mut out, r#"" marker-end="url(#{id}-arrow)"/>"#, id = diagram_id_esc);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &scene.nodes {
        let _ = write!(
            &mut out,
            r#"<g class="node" id="{id}-v{v}" transform="translate({x},{y})"><circle r="{r}"/><text text-anchor="middle" dominant-baseline="central">{label}</text></g>"#,
            id = diagram_id_esc,
            v = node.vertex,
            x = fmt(node.cx),
            y = fmt(node.cy),
            r = fmt(scene.node_radius),
            label = escape_xml(&node.label)
        );
    }
    out.push_str("</g>");

    let labels: Vec<_> = scene.edges.iter().filter_map(|e| e.label.as_ref()).collect();
    if !labels.is_empty() {
        out.push_str(r#"<g class="edge-labels">"#);
        for label in labels {
            let _ = write!(
                &mut out,
                r#"<g class="edge-label" transform="translate({x},{y}) rotate({a})"><rect x="{rx}" y="{ry}" width="{rw}" height="{rh}" rx="3" ry="3"/><text text-anchor="middle" dominant-baseline="central">{text}</text></g>"#,
                x = fmt(label.x),
                y = fmt(label.y),
                a = fmt(label.angle),
                rx = fmt(-label.width / 2.0),
                ry = fmt(-label.height / 2.0),
                rw = fmt(label.width),
                rh = fmt(label.height),
                text = escape_xml(&label.text)
            );
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>\n");
    out
}
