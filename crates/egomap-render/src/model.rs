use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

/// Placement of one stakeholder node, recomputed on every layout pass and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub record_id: String,
    pub label: String,
    pub category: String,
    /// Final angle in radians (category base angle plus in-group offset).
    pub angle: f64,
    /// Radial distance from the center, driven by proximity.
    pub radius: f64,
    /// Cartesian position (center plus polar offset).
    pub x: f64,
    pub y: f64,
    /// Circle radius, driven by importance.
    pub node_radius: f64,
}

/// The stalk from the center "You" node out to a stakeholder node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkLayout {
    pub record_id: String,
    pub source: LayoutPoint,
    pub target: LayoutPoint,
    /// Stroke width, driven by relational strength.
    pub stroke_width: f64,
}

/// Anchor for the legend block (top-right corner of the viewport).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendLayout {
    pub x: f64,
    pub y: f64,
}

/// Output of one layout pass: pure geometry, no draw state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub max_radius: f64,
    /// Reference ring radii at proximity 20/40/60/80/100.
    pub ring_radii: Vec<f64>,
    pub positions: Vec<NodeLayout>,
    pub links: Vec<LinkLayout>,
    pub legend: LegendLayout,
}

impl MapLayout {
    /// A zero-size viewport lays out as all-zero radii; rendering such a
    /// layout is a no-op.
    pub fn is_degenerate(&self) -> bool {
        !(self.viewport_width > 0.0 && self.viewport_height > 0.0)
    }

    pub fn node(&self, record_id: &str) -> Option<&NodeLayout> {
        self.positions.iter().find(|n| n.record_id == record_id)
    }

    pub fn link(&self, record_id: &str) -> Option<&LinkLayout> {
        self.links.iter().find(|l| l.record_id == record_id)
    }
}
