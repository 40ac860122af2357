use crate::model::{LayoutPoint, LegendLayout, LinkLayout, MapLayout, NodeLayout};
use crate::scale::LinearScale;
use egomap_core::StakeholderRecord;
use indexmap::IndexMap;

/// `max_radius = min(width, height) * MAX_RADIUS_FACTOR`.
pub const MAX_RADIUS_FACTOR: f64 = 0.42;
/// Node circle radius range driven by importance 0..=100.
pub const NODE_RADIUS_RANGE: (f64, f64) = (8.0, 48.0);
/// Stalk stroke width range driven by strength 0..=10.
pub const LINK_WIDTH_RANGE: (f64, f64) = (1.0, 10.0);
/// Same-category records spread over `base ± GROUP_ARC_SPREAD` radians.
pub const GROUP_ARC_SPREAD: f64 = 0.3;
/// Proximity values of the background reference rings.
pub const RING_PROXIMITIES: [f64; 5] = [20.0, 40.0, 60.0, 80.0, 100.0];
/// Radius of the center "You" node.
pub const CENTER_NODE_RADIUS: f64 = 12.0;
/// Legend block width reserved at the right viewport edge.
pub const LEGEND_BLOCK_WIDTH: f64 = 210.0;

fn polar_xy(cx: f64, cy: f64, radius: f64, angle: f64) -> LayoutPoint {
    LayoutPoint {
        x: cx + radius * angle.cos(),
        y: cy + radius * angle.sin(),
    }
}

/// In-group angular offset for member `i` of a group of `count`.
///
/// Offsets are spread evenly over `[-GROUP_ARC_SPREAD, +GROUP_ARC_SPREAD]`
/// and are symmetric around zero; a singleton group collapses to the base
/// angle.
fn group_offset(i: usize, count: usize) -> f64 {
    if count < 2 {
        return 0.0;
    }
    -GROUP_ARC_SPREAD + (i as f64) * (2.0 * GROUP_ARC_SPREAD) / ((count - 1) as f64)
}

/// Computes the full radial layout for one record list and viewport.
///
/// Pure function of its inputs: equal records and viewport always produce an
/// equal layout. Records are grouped by category in first-seen order; each
/// distinct category gets an evenly spaced base angle over the full circle,
/// and members fan out around it by small symmetric offsets. Proximity maps
/// directly to radial distance (the scale is not inverted; the legend caption
/// states the resulting reading).
pub fn layout_map(
    records: &[StakeholderRecord],
    viewport_width: f64,
    viewport_height: f64,
) -> MapLayout {
    let degenerate = !(viewport_width > 0.0 && viewport_height > 0.0);
    let width = if degenerate { 0.0 } else { viewport_width };
    let height = if degenerate { 0.0 } else { viewport_height };

    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let max_radius = width.min(height) * MAX_RADIUS_FACTOR;

    let size = LinearScale::new((0.0, 100.0), NODE_RADIUS_RANGE);
    let radius = LinearScale::new((0.0, 100.0), (max_radius * 0.2, max_radius));
    let link_width = LinearScale::new((0.0, 10.0), LINK_WIDTH_RANGE);

    let ring_radii: Vec<f64> = RING_PROXIMITIES.iter().map(|p| radius.apply(*p)).collect();

    // Group by category, preserving first-seen order.
    let mut groups: IndexMap<&str, Vec<&StakeholderRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.category.as_str())
            .or_default()
            .push(record);
    }

    let group_count = groups.len();
    let mut positions: Vec<NodeLayout> = Vec::with_capacity(records.len());
    let mut links: Vec<LinkLayout> = Vec::with_capacity(records.len());

    for (group_idx, (_cat, members)) in groups.iter().enumerate() {
        let base = if group_count < 2 {
            0.0
        } else {
            (group_idx as f64) * std::f64::consts::TAU / (group_count as f64)
        };
        let count = members.len();
        for (i, record) in members.iter().enumerate() {
            let angle = base + group_offset(i, count);
            let r = radius.apply(record.proximity as f64);
            let at = polar_xy(center_x, center_y, r, angle);
            positions.push(NodeLayout {
                record_id: record.id.clone(),
                label: record.name.clone(),
                category: record.category.clone(),
                angle,
                radius: r,
                x: at.x,
                y: at.y,
                node_radius: size.apply(record.importance as f64),
            });
            links.push(LinkLayout {
                record_id: record.id.clone(),
                source: LayoutPoint {
                    x: center_x,
                    y: center_y,
                },
                target: at,
                stroke_width: link_width.apply(record.strength),
            });
        }
    }

    tracing::debug!(
        records = records.len(),
        categories = group_count,
        max_radius,
        "layout pass"
    );

    MapLayout {
        viewport_width: width,
        viewport_height: height,
        center_x,
        center_y,
        max_radius,
        ring_radii,
        positions,
        links,
        legend: LegendLayout {
            x: width - LEGEND_BLOCK_WIDTH,
            y: 20.0,
        },
    }
}
