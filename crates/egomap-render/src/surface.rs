/// Text anchoring for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// One primitive drawing operation.
///
/// The scene describes a frame as a back-to-front sequence of these ops;
/// surfaces turn them into side effects. Keeping the ops data-shaped lets
/// tests record and inspect a frame without a display.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Reference guide circle around the center.
    Ring { cx: f64, cy: f64, radius: f64 },
    /// The center "You" node.
    Center { cx: f64, cy: f64, radius: f64 },
    /// A stalk from the center to a stakeholder node.
    Link {
        record_id: String,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width: f64,
    },
    /// A stakeholder node circle.
    Node {
        record_id: String,
        x: f64,
        y: f64,
        radius: f64,
    },
    /// A text label. `text` is raw user/application text; markup surfaces
    /// must escape it before insertion.
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: TextAnchor,
        font_size: f64,
    },
    /// Legend swatch: filled circle ("Size = Importance").
    SwatchCircle { cx: f64, cy: f64, radius: f64 },
    /// Legend swatch: stroked line ("Width = Strength").
    SwatchLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width: f64,
    },
    /// Tooltip overlay near the pointer. Lines are raw text, escaped by
    /// markup surfaces.
    Tooltip { x: f64, y: f64, lines: Vec<String> },
}

/// A drawing surface.
///
/// This is the seam that keeps the layout engine and the scene fully
/// decoupled from side-effecting drawing calls: the scene emits [`DrawOp`]s
/// in draw order, and a surface interprets them (SVG markup, a recording
/// buffer in tests, ...).
pub trait Surface {
    /// Starts a frame for the given viewport. Previous frame content is
    /// discarded.
    fn begin_frame(&mut self, width: f64, height: f64);

    fn draw(&mut self, op: &DrawOp);

    /// Ends the frame. Called once per frame after all ops.
    fn end_frame(&mut self);
}

/// Surface that records ops instead of drawing, for tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: usize,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Link { .. }))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Node { .. }))
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self, _width: f64, _height: f64) {
        self.frames += 1;
        self.ops.clear();
    }

    fn draw(&mut self, op: &DrawOp) {
        self.ops.push(op.clone());
    }

    fn end_frame(&mut self) {}
}
