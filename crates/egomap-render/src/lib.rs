#![forbid(unsafe_code)]

//! Radial layout + SVG renderer for stakeholder maps (headless).
//!
//! Split along the layout/draw seam:
//! - [`layout`] is a pure function of records + viewport (testable without a
//!   display)
//! - [`scene`] owns renderer-local state (drag overrides, raise order,
//!   hover) and emits draw ops through the [`surface::Surface`] trait
//! - [`svg`] interprets draw ops into deterministic SVG markup

pub mod layout;
pub mod model;
pub mod scale;
pub mod scene;
pub mod surface;
pub mod svg;

pub use layout::layout_map;
pub use model::MapLayout;
pub use scene::MapScene;
pub use surface::{DrawOp, RecordingSurface, Surface, TextAnchor};
pub use svg::{SvgSurface, render_map_svg};
