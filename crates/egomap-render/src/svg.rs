use crate::scene::MapScene;
use crate::surface::{DrawOp, Surface, TextAnchor};
use std::fmt::Write as _;

/// Deterministic per-character width estimate for tooltip boxes. Headless
/// output has no font metrics; a fixed estimate keeps frames reproducible.
const TOOLTIP_CHAR_WIDTH: f64 = 7.2;
const TOOLTIP_LINE_HEIGHT: f64 = 16.0;
const TOOLTIP_PADDING: f64 = 8.0;

/// Escapes user-supplied text for insertion into SVG markup.
///
/// All five of `& < > " '` are escaped; every string that reaches the writer
/// goes through here.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trims a coordinate to at most three decimals, dropping trailing zeros.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut r = (v * 1000.0).round() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }
    let mut s = format!("{r:.3}");
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

fn map_css() -> String {
    let mut out = String::new();
    out.push_str(".ring{fill:none;stroke:#2a3443;stroke-dasharray:3 4;}");
    out.push_str(".center{fill:#e8eef7;stroke:#6ea8fe;stroke-width:2;}");
    out.push_str(".link{stroke:#9fb6d4;stroke-opacity:0.55;stroke-linecap:round;}");
    out.push_str(".node{fill:#6ea8fe;fill-opacity:0.85;stroke:#0b1017;stroke-width:1.5;}");
    out.push_str(".label{fill:#c7ced9;}");
    out.push_str(".swatch-line{stroke:#9fb6d4;}");
    out.push_str(".tooltip-box{fill:#0b1017;fill-opacity:0.92;stroke:#2a3443;}");
    out.push_str(".tooltip-text{fill:#e8eef7;font-size:12px;}");
    out
}

/// SVG drawing surface.
///
/// Interprets scene draw ops into a deterministic SVG document. A surface
/// that never receives a frame yields an empty string (the zero-size
/// viewport no-op).
#[derive(Debug, Default)]
pub struct SvgSurface {
    out: String,
    open: bool,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished document. Empty until a frame has completed.
    pub fn into_svg(self) -> String {
        self.out
    }

    pub fn as_svg(&self) -> &str {
        &self.out
    }

    fn draw_text_op(&mut self, x: f64, y: f64, text: &str, anchor: TextAnchor, font_size: f64) {
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let _ = write!(
            &mut self.out,
            r#"<text class="label" x="{x}" y="{y}" text-anchor="{anchor}" font-size="{fs}">{text}</text>"#,
            x = fmt(x),
            y = fmt(y),
            fs = fmt(font_size),
            text = escape_xml(text),
        );
    }

    fn draw_tooltip_op(&mut self, x: f64, y: f64, lines: &[String]) {
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let box_w = (longest as f64) * TOOLTIP_CHAR_WIDTH + 2.0 * TOOLTIP_PADDING;
        let box_h = (lines.len() as f64) * TOOLTIP_LINE_HEIGHT + 2.0 * TOOLTIP_PADDING;
        let _ = write!(
            &mut self.out,
            r#"<g class="tooltip" transform="translate({x}, {y})"><rect class="tooltip-box" width="{w}" height="{h}" rx="4"/>"#,
            x = fmt(x),
            y = fmt(y),
            w = fmt(box_w),
            h = fmt(box_h),
        );
        for (i, line) in lines.iter().enumerate() {
            let ty = TOOLTIP_PADDING + TOOLTIP_LINE_HEIGHT * ((i + 1) as f64) - 4.0;
            let _ = write!(
                &mut self.out,
                r#"<text class="tooltip-text" x="{x}" y="{y}">{text}</text>"#,
                x = fmt(TOOLTIP_PADDING),
                y = fmt(ty),
                text = escape_xml(line),
            );
        }
        self.out.push_str("</g>");
    }
}

impl Surface for SvgSurface {
    fn begin_frame(&mut self, width: f64, height: f64) {
        self.out.clear();
        self.open = true;
        let _ = write!(
            &mut self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="background-color: #0b1017;">"#,
            w = fmt(width),
            h = fmt(height),
        );
        let _ = write!(&mut self.out, "<style>{}</style>", map_css());
    }

    fn draw(&mut self, op: &DrawOp) {
        if !self.open {
            return;
        }
        match op {
            DrawOp::Ring { cx, cy, radius } => {
                let _ = write!(
                    &mut self.out,
                    r#"<circle class="ring" cx="{cx}" cy="{cy}" r="{r}"/>"#,
                    cx = fmt(*cx),
                    cy = fmt(*cy),
                    r = fmt(*radius),
                );
            }
            DrawOp::Center { cx, cy, radius } => {
                let _ = write!(
                    &mut self.out,
                    r#"<circle class="center" cx="{cx}" cy="{cy}" r="{r}"/>"#,
                    cx = fmt(*cx),
                    cy = fmt(*cy),
                    r = fmt(*radius),
                );
            }
            DrawOp::Link {
                record_id,
                x1,
                y1,
                x2,
                y2,
                stroke_width,
            } => {
                let _ = write!(
                    &mut self.out,
                    r#"<line class="link" data-id="{id}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke-width="{sw}"/>"#,
                    id = escape_xml(record_id),
                    x1 = fmt(*x1),
                    y1 = fmt(*y1),
                    x2 = fmt(*x2),
                    y2 = fmt(*y2),
                    sw = fmt(*stroke_width),
                );
            }
            DrawOp::Node {
                record_id,
                x,
                y,
                radius,
            } => {
                let _ = write!(
                    &mut self.out,
                    r#"<circle class="node" data-id="{id}" cx="{cx}" cy="{cy}" r="{r}"/>"#,
                    id = escape_xml(record_id),
                    cx = fmt(*x),
                    cy = fmt(*y),
                    r = fmt(*radius),
                );
            }
            DrawOp::Text {
                x,
                y,
                text,
                anchor,
                font_size,
            } => self.draw_text_op(*x, *y, text, *anchor, *font_size),
            DrawOp::SwatchCircle { cx, cy, radius } => {
                let _ = write!(
                    &mut self.out,
                    r#"<circle class="node" cx="{cx}" cy="{cy}" r="{r}"/>"#,
                    cx = fmt(*cx),
                    cy = fmt(*cy),
                    r = fmt(*radius),
                );
            }
            DrawOp::SwatchLine {
                x1,
                y1,
                x2,
                y2,
                stroke_width,
            } => {
                let _ = write!(
                    &mut self.out,
                    r#"<line class="swatch-line" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke-width="{sw}"/>"#,
                    x1 = fmt(*x1),
                    y1 = fmt(*y1),
                    x2 = fmt(*x2),
                    y2 = fmt(*y2),
                    sw = fmt(*stroke_width),
                );
            }
            DrawOp::Tooltip { x, y, lines } => self.draw_tooltip_op(*x, *y, lines),
        }
    }

    fn end_frame(&mut self) {
        if self.open {
            self.out.push_str("</svg>\n");
            self.open = false;
        }
    }
}

/// Renders the scene's current frame as an SVG document.
pub fn render_map_svg(scene: &MapScene) -> String {
    let mut surface = SvgSurface::new();
    scene.draw(&mut surface);
    surface.into_svg()
}
