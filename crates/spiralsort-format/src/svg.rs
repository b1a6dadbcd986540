//! SVG preview of a spiral-sorted cloud.
//!
//! Projects the nodes onto the XY plane and draws them, in order, as a
//! single `<path>`. The first node (the start node) is marked with a
//! filled circle. Built with the [`svg`] crate, which handles XML
//! escaping and path data formatting.
//!
//! The projection fits the cloud into a square document with the Y axis
//! pointing up, so a counterclockwise spiral appears counterclockwise.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Description, Path, Title};
use svg::node::{Text, Value};

use spiralsort::{Node, Point3};

/// Document width and height in user units.
const DOCUMENT_SIZE: f64 = 800.0;
/// Blank border around the projected cloud.
const MARGIN: f64 = 20.0;
/// Radius of the start-node marker.
const START_MARKER_RADIUS: f64 = 4.0;

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`. Typically the input file stem.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`. Typically the start
    /// node and the sort parameters.
    pub description: Option<&'a str>,
}

/// Maps cloud XY coordinates into document coordinates.
#[derive(Debug, Clone, Copy)]
struct Projection {
    min_x: f64,
    max_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    /// Fit the XY bounding box of `nodes` into the document, keeping the
    /// aspect ratio and centring the shorter axis.
    fn fit(nodes: &[Node]) -> Self {
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for node in nodes {
            let p = node.position;
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        if nodes.is_empty() {
            (min_x, max_x, min_y, max_y) = (0.0, 0.0, 0.0, 0.0);
        }

        let span_x = max_x - min_x;
        let span_y = max_y - min_y;
        let span = span_x.max(span_y);
        let drawable = 2.0f64.mul_add(-MARGIN, DOCUMENT_SIZE);
        let scale = if span > 0.0 { drawable / span } else { 1.0 };

        Self {
            min_x,
            max_y,
            scale,
            offset_x: span_x.mul_add(-scale, drawable) / 2.0 + MARGIN,
            offset_y: span_y.mul_add(-scale, drawable) / 2.0 + MARGIN,
        }
    }

    fn apply(self, p: Point3) -> (f64, f64) {
        (
            (p.x - self.min_x).mul_add(self.scale, self.offset_x),
            (self.max_y - p.y).mul_add(self.scale, self.offset_y),
        )
    }
}

/// Build the path `d` attribute visiting `nodes` in order.
///
/// Returns an empty string for fewer than 2 nodes.
fn build_path_data(nodes: &[Node], projection: Projection) -> String {
    let Some((first, rest)) = nodes.split_first() else {
        return String::new();
    };
    if rest.is_empty() {
        return String::new();
    }

    let mut data = Data::new().move_to(projection.apply(first.position));
    for node in rest {
        data = data.line_to(projection.apply(node.position));
    }
    String::from(Value::from(data))
}

/// Render sorted nodes as an SVG preview of the spiral path.
///
/// # Examples
///
/// ```
/// use spiralsort::Node;
/// use spiralsort_format::{SvgMetadata, to_svg};
///
/// let nodes = vec![Node::new("a", 0.0, 0.0, 0.0), Node::new("b", 1.0, 1.0, 0.0)];
/// let metadata = SvgMetadata {
///     title: Some("cloud"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&nodes, &metadata);
/// assert!(svg.contains("<title>cloud</title>"));
/// assert!(svg.contains("M20,780 L780,20"));
/// ```
#[must_use]
pub fn to_svg(nodes: &[Node], metadata: &SvgMetadata<'_>) -> String {
    let projection = Projection::fit(nodes);
    let mut doc = Document::new()
        .set("width", DOCUMENT_SIZE)
        .set("height", DOCUMENT_SIZE)
        .set("viewBox", (0, 0, DOCUMENT_SIZE, DOCUMENT_SIZE));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    let d = build_path_data(nodes, projection);
    if !d.is_empty() {
        let path = Path::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1);
        doc = doc.add(path);
    }

    if let Some(start) = nodes.first() {
        let (cx, cy) = projection.apply(start.position);
        let marker = Circle::new()
            .set("id", "start")
            .set("cx", cx)
            .set("cy", cy)
            .set("r", START_MARKER_RADIUS)
            .set("fill", "red");
        doc = doc.add(marker);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_meta() -> SvgMetadata<'static> {
        SvgMetadata::default()
    }

    #[test]
    fn empty_cloud_produces_valid_svg_without_path() {
        let svg = to_svg(&[], &no_meta());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn single_node_is_only_marked() {
        let svg = to_svg(&[Node::new("a", 3.0, 4.0, 5.0)], &no_meta());
        assert!(!svg.contains("<path"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn path_visits_nodes_in_order_with_y_up() {
        let nodes = vec![
            Node::new("a", 0.0, 0.0, 0.0),
            Node::new("b", 1.0, 0.0, 0.0),
            Node::new("c", 1.0, 1.0, 0.0),
        ];
        let svg = to_svg(&nodes, &no_meta());
        assert!(svg.contains("M20,780 L780,780 L780,20"), "{svg}");
    }

    #[test]
    fn shorter_axis_is_centred() {
        let nodes = vec![Node::new("a", 0.0, 0.0, 0.0), Node::new("b", 2.0, 0.0, 0.0)];
        let svg = to_svg(&nodes, &no_meta());
        assert!(svg.contains("M20,400 L780,400"), "{svg}");
    }

    #[test]
    fn z_is_ignored() {
        let flat = vec![Node::new("a", 0.0, 0.0, 0.0), Node::new("b", 1.0, 1.0, 0.0)];
        let lifted = vec![Node::new("a", 0.0, 0.0, 7.0), Node::new("b", 1.0, 1.0, -2.0)];
        assert_eq!(to_svg(&flat, &no_meta()), to_svg(&lifted, &no_meta()));
    }

    #[test]
    fn start_marker_sits_on_first_node() {
        let nodes = vec![Node::new("a", 1.0, 1.0, 0.0), Node::new("b", 0.0, 0.0, 0.0)];
        let svg = to_svg(&nodes, &no_meta());
        assert!(svg.contains(r#"cx="780""#), "{svg}");
        assert!(svg.contains(r#"cy="20""#), "{svg}");
    }

    #[test]
    fn title_and_desc_emitted_and_escaped() {
        let metadata = SvgMetadata {
            title: Some("a <cloud>"),
            description: Some("start N_01 & friends"),
        };
        let svg = to_svg(&[], &metadata);
        assert!(svg.contains("<title>a &lt;cloud&gt;</title>"), "{svg}");
        assert!(svg.contains("<desc>start N_01 &amp; friends</desc>"), "{svg}");
    }

    #[test]
    fn svg_ends_with_closing_tag() {
        let svg = to_svg(&[Node::new("a", 0.0, 0.0, 0.0)], &no_meta());
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
