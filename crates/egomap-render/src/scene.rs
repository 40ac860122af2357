use crate::layout::{CENTER_NODE_RADIUS, layout_map};
use crate::model::MapLayout;
use crate::surface::{DrawOp, Surface, TextAnchor};
use egomap_core::StakeholderRecord;
use rustc_hash::FxHashMap;

/// Pointer offset of the tooltip overlay.
const TOOLTIP_OFFSET: f64 = 12.0;
/// "You" label sits this far above the center node.
const CENTER_LABEL_OFFSET: f64 = 22.0;
const LABEL_FONT_SIZE: f64 = 12.0;

/// Per-node drag gesture state. A node not present in the map is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Dragging,
}

#[derive(Debug, Clone, PartialEq)]
struct HoverState {
    record_id: String,
    x: f64,
    y: f64,
}

/// Stateful owner of the rendered map.
///
/// Holds the current layout plus renderer-local state the layout engine must
/// not know about: per-node drag overrides, raise order and the hover
/// tooltip. The scene never mutates the record store; it keeps a transient
/// copy of the records for relayout and tooltip content.
///
/// Every fresh layout pass ([`MapScene::relayout`], [`MapScene::resize`],
/// [`MapScene::set_records`]) recomputes canonical positions and discards
/// all drag and hover state.
#[derive(Debug, Clone)]
pub struct MapScene {
    records: Vec<StakeholderRecord>,
    layout: MapLayout,
    /// Screen positions superseding the computed layout while present.
    overrides: FxHashMap<String, (f64, f64)>,
    drag: FxHashMap<String, DragState>,
    /// Record ids raised above their siblings, in raise order.
    raised: Vec<String>,
    hover: Option<HoverState>,
}

impl MapScene {
    pub fn new(records: &[StakeholderRecord], width: f64, height: f64) -> Self {
        Self {
            records: records.to_vec(),
            layout: layout_map(records, width, height),
            overrides: FxHashMap::default(),
            drag: FxHashMap::default(),
            raised: Vec::new(),
            hover: None,
        }
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    /// Replaces the record snapshot and runs a fresh layout pass.
    pub fn set_records(&mut self, records: &[StakeholderRecord]) {
        self.records = records.to_vec();
        let (w, h) = (self.layout.viewport_width, self.layout.viewport_height);
        self.relayout(w, h);
    }

    /// Viewport resize: full layout pass, drag overrides discarded.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.relayout(width, height);
    }

    /// Recomputes canonical positions and clears all transient interaction
    /// state.
    pub fn relayout(&mut self, width: f64, height: f64) {
        self.layout = layout_map(&self.records, width, height);
        self.overrides.clear();
        self.drag.clear();
        self.raised.clear();
        self.hover = None;
    }

    /// The position a node renders at: its drag override while one is
    /// present, the computed layout position otherwise.
    pub fn node_position(&self, record_id: &str) -> Option<(f64, f64)> {
        if let Some(&(x, y)) = self.overrides.get(record_id) {
            return Some((x, y));
        }
        self.layout.node(record_id).map(|n| (n.x, n.y))
    }

    /// The far endpoint of a node's stalk (tracks the drag override).
    pub fn link_endpoint(&self, record_id: &str) -> Option<(f64, f64)> {
        self.layout.link(record_id)?;
        self.node_position(record_id)
    }

    /// Starts a drag gesture on a node: idle → dragging, and the node is
    /// raised above its siblings for subsequent draws. A node already
    /// mid-gesture or unknown to the layout is ignored.
    pub fn drag_start(&mut self, record_id: &str) -> bool {
        if self.drag.contains_key(record_id) || self.layout.node(record_id).is_none() {
            return false;
        }
        self.drag.insert(record_id.to_string(), DragState::Dragging);
        self.raised.retain(|id| id != record_id);
        self.raised.push(record_id.to_string());
        true
    }

    /// Moves a mid-drag node. The node follows the pointer free-form; only
    /// this node's override (and thus its stalk's far endpoint) changes.
    pub fn drag_move(&mut self, record_id: &str, x: f64, y: f64) -> bool {
        if self.drag.get(record_id) != Some(&DragState::Dragging) {
            return false;
        }
        self.overrides.insert(record_id.to_string(), (x, y));
        true
    }

    /// Ends a gesture: dragging → idle. No snap-back; the override stays
    /// until the next full layout pass.
    pub fn drag_end(&mut self, record_id: &str) -> bool {
        self.drag.remove(record_id).is_some()
    }

    /// Pointer hover over a node; the tooltip follows the pointer.
    pub fn hover_move(&mut self, record_id: &str, x: f64, y: f64) {
        if self.layout.node(record_id).is_none() {
            return;
        }
        self.hover = Some(HoverState {
            record_id: record_id.to_string(),
            x,
            y,
        });
    }

    pub fn hover_leave(&mut self) {
        self.hover = None;
    }

    /// Tooltip content for a record: name, attribute lines, and a notes line
    /// only when notes are non-empty. Raw text; markup surfaces escape it.
    fn tooltip_lines(&self, record_id: &str) -> Option<Vec<String>> {
        let record = self.records.iter().find(|r| r.id == record_id)?;
        let mut lines = vec![
            record.name.clone(),
            format!("Category: {}", record.category),
            format!("Importance: {}", record.importance),
            format!("Proximity: {}", record.proximity),
            format!("Strength: {}", fmt_rating(record.strength)),
        ];
        if !record.notes.is_empty() {
            lines.push(format!("Notes: {}", record.notes));
        }
        Some(lines)
    }

    /// Draws one frame, back to front: rings → center → links → nodes →
    /// legend → tooltip. A degenerate (zero-size) viewport draws nothing.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.layout.is_degenerate() {
            return;
        }
        let layout = &self.layout;
        surface.begin_frame(layout.viewport_width, layout.viewport_height);

        for r in &layout.ring_radii {
            surface.draw(&DrawOp::Ring {
                cx: layout.center_x,
                cy: layout.center_y,
                radius: *r,
            });
        }

        surface.draw(&DrawOp::Center {
            cx: layout.center_x,
            cy: layout.center_y,
            radius: CENTER_NODE_RADIUS,
        });
        surface.draw(&DrawOp::Text {
            x: layout.center_x,
            y: layout.center_y - CENTER_LABEL_OFFSET,
            text: "You".to_string(),
            anchor: TextAnchor::Middle,
            font_size: LABEL_FONT_SIZE,
        });

        for link in &layout.links {
            let (x2, y2) = self
                .node_position(&link.record_id)
                .unwrap_or((link.target.x, link.target.y));
            surface.draw(&DrawOp::Link {
                record_id: link.record_id.clone(),
                x1: link.source.x,
                y1: link.source.y,
                x2,
                y2,
                stroke_width: link.stroke_width,
            });
        }

        // Raised nodes render after (on top of) their siblings.
        let mut order: Vec<&str> = layout
            .positions
            .iter()
            .map(|n| n.record_id.as_str())
            .filter(|id| !self.raised.iter().any(|r| r == id))
            .collect();
        order.extend(self.raised.iter().map(String::as_str));

        for id in order {
            let Some(node) = layout.node(id) else {
                continue;
            };
            let (x, y) = self.node_position(id).unwrap_or((node.x, node.y));
            surface.draw(&DrawOp::Node {
                record_id: node.record_id.clone(),
                x,
                y,
                radius: node.node_radius,
            });
            surface.draw(&DrawOp::Text {
                x,
                y,
                text: node.label.clone(),
                anchor: TextAnchor::Middle,
                font_size: LABEL_FONT_SIZE,
            });
        }

        self.draw_legend(surface);

        if let Some(hover) = &self.hover {
            if let Some(lines) = self.tooltip_lines(&hover.record_id) {
                surface.draw(&DrawOp::Tooltip {
                    x: hover.x + TOOLTIP_OFFSET,
                    y: hover.y + TOOLTIP_OFFSET,
                    lines,
                });
            }
        }

        surface.end_frame();
    }

    fn draw_legend(&self, surface: &mut dyn Surface) {
        let legend = self.layout.legend;
        surface.draw(&DrawOp::Text {
            x: legend.x,
            y: legend.y,
            text: "Legend".to_string(),
            anchor: TextAnchor::Start,
            font_size: LABEL_FONT_SIZE,
        });
        surface.draw(&DrawOp::SwatchCircle {
            cx: legend.x + 16.0,
            cy: legend.y + 26.0,
            radius: 8.0,
        });
        surface.draw(&DrawOp::Text {
            x: legend.x + 36.0,
            y: legend.y + 30.0,
            text: "Size = Importance".to_string(),
            anchor: TextAnchor::Start,
            font_size: LABEL_FONT_SIZE,
        });
        surface.draw(&DrawOp::SwatchLine {
            x1: legend.x + 8.0,
            y1: legend.y + 48.0,
            x2: legend.x + 32.0,
            y2: legend.y + 48.0,
            stroke_width: 6.0,
        });
        surface.draw(&DrawOp::Text {
            x: legend.x + 36.0,
            y: legend.y + 52.0,
            text: "Width = Strength".to_string(),
            anchor: TextAnchor::Start,
            font_size: LABEL_FONT_SIZE,
        });
        surface.draw(&DrawOp::Text {
            x: legend.x,
            y: legend.y + 74.0,
            text: "Closer to center = higher proximity".to_string(),
            anchor: TextAnchor::Start,
            font_size: LABEL_FONT_SIZE,
        });
    }
}

/// Trims a rating for display: `6.0` → `6`, `6.5` → `6.5`.
fn fmt_rating(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn rec(id: &str, category: &str) -> StakeholderRecord {
        StakeholderRecord {
            id: id.to_string(),
            name: format!("Name {id}"),
            category: category.to_string(),
            ..StakeholderRecord::default()
        }
    }

    fn scene_ab() -> MapScene {
        MapScene::new(&[rec("a", "Work"), rec("b", "Family")], 800.0, 600.0)
    }

    fn link_target(surface: &RecordingSurface, id: &str) -> (f64, f64) {
        surface
            .links()
            .find_map(|op| match op {
                DrawOp::Link {
                    record_id, x2, y2, ..
                } if record_id == id => Some((*x2, *y2)),
                _ => None,
            })
            .expect("link drawn")
    }

    #[test]
    fn drag_updates_only_the_dragged_link() {
        let mut scene = scene_ab();
        let b_before = scene.link_endpoint("b").unwrap();

        assert!(scene.drag_start("a"));
        assert!(scene.drag_move("a", 42.0, 24.0));
        scene.drag_end("a");

        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface);
        assert_eq!(link_target(&surface, "a"), (42.0, 24.0));
        assert_eq!(link_target(&surface, "b"), b_before);
        // The near endpoint never moves off center.
        let center = (scene.layout().center_x, scene.layout().center_y);
        for op in surface.links() {
            if let DrawOp::Link { x1, y1, .. } = op {
                assert_eq!((*x1, *y1), center);
            }
        }
    }

    #[test]
    fn drag_moves_are_ignored_outside_a_gesture() {
        let mut scene = scene_ab();
        assert!(!scene.drag_move("a", 1.0, 2.0));
        assert_eq!(
            scene.node_position("a").unwrap(),
            (scene.layout().node("a").unwrap().x, scene.layout().node("a").unwrap().y)
        );

        // One gesture per node at a time.
        assert!(scene.drag_start("a"));
        assert!(!scene.drag_start("a"));
        assert!(scene.drag_end("a"));
        assert!(!scene.drag_end("a"));
    }

    #[test]
    fn concurrent_gestures_on_different_nodes_are_independent() {
        let mut scene = scene_ab();
        assert!(scene.drag_start("a"));
        assert!(scene.drag_start("b"));
        scene.drag_move("a", 10.0, 10.0);
        scene.drag_move("b", 90.0, 90.0);
        assert_eq!(scene.node_position("a").unwrap(), (10.0, 10.0));
        assert_eq!(scene.node_position("b").unwrap(), (90.0, 90.0));
    }

    #[test]
    fn no_snap_back_until_fresh_layout_pass() {
        let mut scene = scene_ab();
        scene.drag_start("a");
        scene.drag_move("a", 42.0, 24.0);
        scene.drag_end("a");
        // Dropped position survives the gesture...
        assert_eq!(scene.node_position("a").unwrap(), (42.0, 24.0));

        // ...but a fresh layout pass discards every override.
        scene.resize(800.0, 600.0);
        let canonical = scene.layout().node("a").unwrap();
        assert_eq!(scene.node_position("a").unwrap(), (canonical.x, canonical.y));
    }

    #[test]
    fn raised_node_draws_above_siblings() {
        let mut scene = scene_ab();
        scene.drag_start("a");

        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface);
        let node_ids: Vec<&str> = surface
            .nodes()
            .filter_map(|op| match op {
                DrawOp::Node { record_id, .. } => Some(record_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(node_ids, ["b", "a"]);
    }

    #[test]
    fn zero_size_viewport_draws_nothing() {
        let scene = MapScene::new(&[rec("a", "Work")], 0.0, 0.0);
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface);
        assert_eq!(surface.frames, 0);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn empty_map_still_draws_rings_center_and_legend() {
        let scene = MapScene::new(&[], 800.0, 600.0);
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface);

        let rings = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Ring { .. }))
            .count();
        assert_eq!(rings, 5);
        assert!(surface.ops.iter().any(|op| matches!(op, DrawOp::Center { .. })));
        assert!(surface.ops.iter().any(
            |op| matches!(op, DrawOp::Text { text, .. } if text == "Legend")
        ));
        assert!(surface.nodes().next().is_none());
    }

    #[test]
    fn draw_order_is_back_to_front() {
        let scene = scene_ab();
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface);

        let rank = |op: &DrawOp| match op {
            DrawOp::Ring { .. } => 0,
            DrawOp::Center { .. } => 1,
            DrawOp::Link { .. } => 2,
            DrawOp::Node { .. } => 3,
            _ => 4,
        };
        let first_link = surface.ops.iter().position(|op| rank(op) == 2).unwrap();
        let first_node = surface.ops.iter().position(|op| rank(op) == 3).unwrap();
        let last_ring = surface
            .ops
            .iter()
            .rposition(|op| rank(op) == 0)
            .unwrap();
        assert!(last_ring < first_link);
        assert!(first_link < first_node);
    }

    #[test]
    fn tooltip_follows_hover_and_omits_empty_notes() {
        let mut with_notes = rec("a", "Work");
        with_notes.notes = "met at conf".to_string();
        let mut scene = MapScene::new(&[with_notes, rec("b", "Family")], 800.0, 600.0);

        scene.hover_move("a", 100.0, 50.0);
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface);
        let tooltip = surface
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Tooltip { x, y, lines } => Some((*x, *y, lines.clone())),
                _ => None,
            })
            .expect("tooltip drawn");
        assert_eq!((tooltip.0, tooltip.1), (112.0, 62.0));
        assert_eq!(tooltip.2[0], "Name a");
        assert!(tooltip.2.contains(&"Notes: met at conf".to_string()));

        // No notes line for a record without notes.
        scene.hover_move("b", 0.0, 0.0);
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface);
        let lines = surface
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Tooltip { lines, .. } => Some(lines.clone()),
                _ => None,
            })
            .unwrap();
        assert!(!lines.iter().any(|l| l.starts_with("Notes:")));

        scene.hover_leave();
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface);
        assert!(!surface.ops.iter().any(|op| matches!(op, DrawOp::Tooltip { .. })));
    }

    #[test]
    fn set_records_runs_a_fresh_pass() {
        let mut scene = scene_ab();
        scene.drag_start("a");
        scene.drag_move("a", 1.0, 1.0);

        scene.set_records(&[rec("c", "New")]);
        assert_eq!(scene.node_position("a"), None);
        assert!(scene.node_position("c").is_some());
    }
}
