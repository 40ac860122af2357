#![forbid(unsafe_code)]

//! `egomap` is a headless stakeholder-map implementation: an ordered record
//! store plus a deterministic radial layout and renderer, centered on "You".
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`egomap::render`)
//! - `raster`: enable PNG output via pure-Rust SVG rasterization

pub use egomap_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use egomap_render::model::MapLayout;
    pub use egomap_render::surface::{DrawOp, RecordingSurface, Surface, TextAnchor};
    pub use egomap_render::{MapScene, layout_map, render_map_svg};

    #[cfg(feature = "raster")]
    pub mod raster;

    use egomap_core::StakeholderRecord;

    /// Synchronous SVG render helper (executor-free).
    ///
    /// Returns `None` for a zero-size viewport, which is specified as a
    /// no-op render rather than an error.
    pub fn render_svg_sync(
        records: &[StakeholderRecord],
        viewport_width: f64,
        viewport_height: f64,
    ) -> Option<String> {
        let scene = MapScene::new(records, viewport_width, viewport_height);
        let svg = render_map_svg(&scene);
        if svg.is_empty() { None } else { Some(svg) }
    }

    pub async fn render_svg(
        records: &[StakeholderRecord],
        viewport_width: f64,
        viewport_height: f64,
    ) -> Option<String> {
        render_svg_sync(records, viewport_width, viewport_height)
    }

    /// Convenience wrapper bundling a viewport and a scene for UI
    /// integrations, so per-event handlers don't thread viewport sizes
    /// around. Runtime-agnostic: all work is CPU-bound.
    #[derive(Debug, Clone)]
    pub struct MapRenderer {
        scene: MapScene,
    }

    impl MapRenderer {
        pub fn new(records: &[StakeholderRecord], viewport_width: f64, viewport_height: f64) -> Self {
            Self {
                scene: MapScene::new(records, viewport_width, viewport_height),
            }
        }

        pub fn scene(&self) -> &MapScene {
            &self.scene
        }

        pub fn scene_mut(&mut self) -> &mut MapScene {
            &mut self.scene
        }

        /// Full re-render: fresh layout pass over the given records (drag
        /// overrides are discarded by the pass).
        pub fn rerender(&mut self, records: &[StakeholderRecord]) {
            self.scene.set_records(records);
        }

        /// Viewport resize: fresh layout pass at the new size.
        pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) {
            self.scene.resize(viewport_width, viewport_height);
        }

        pub fn render_svg_sync(&self) -> Option<String> {
            let svg = render_map_svg(&self.scene);
            if svg.is_empty() { None } else { Some(svg) }
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            options: &raster::RasterOptions,
        ) -> raster::Result<Option<Vec<u8>>> {
            let Some(svg) = self.render_svg_sync() else {
                return Ok(None);
            };
            Ok(Some(raster::svg_to_png(&svg, options)?))
        }
    }
}

#[cfg(all(test, feature = "render"))]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn async_render_matches_sync() {
        let records = vec![StakeholderRecord::fresh("Alice")];
        let sync = render::render_svg_sync(&records, 800.0, 600.0).unwrap();
        let asynced = block_on(render::render_svg(&records, 800.0, 600.0)).unwrap();
        assert_eq!(sync, asynced);
    }

    #[test]
    fn zero_viewport_renders_nothing() {
        let records = vec![StakeholderRecord::fresh("Alice")];
        assert_eq!(render::render_svg_sync(&records, 0.0, 600.0), None);
    }

    #[test]
    fn renderer_resize_discards_drag_overrides() {
        let records = vec![StakeholderRecord::fresh("Alice")];
        let id = records[0].id.clone();
        let mut renderer = render::MapRenderer::new(&records, 800.0, 600.0);

        renderer.scene_mut().drag_start(&id);
        renderer.scene_mut().drag_move(&id, 5.0, 5.0);
        renderer.scene_mut().drag_end(&id);
        assert_eq!(renderer.scene().node_position(&id).unwrap(), (5.0, 5.0));

        renderer.resize(1024.0, 768.0);
        let canonical = renderer.scene().layout().node(&id).unwrap();
        assert_eq!(
            renderer.scene().node_position(&id).unwrap(),
            (canonical.x, canonical.y)
        );
    }
}
