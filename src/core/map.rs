//! The map component: one authoritative instance owning the data model,
//! viewport, filters, tooltip, and scene.
//!
//! Rendering is gated behind both dataset loads; until they resolve (and
//! after a failed load, forever) there is no scene and nothing draws. All
//! state changes go through the operations below; each is synchronous and
//! cheap, with the full redraw reserved for data and surface-size changes.

use crate::core::config::MapOptions;
use crate::core::geo::Point;
use crate::core::projection::FittedProjection;
use crate::core::viewport::{ViewTransform, ViewportController};
use crate::data::ingest::{self, DataPoint, RegionFeature};
use crate::data::source::{load_datasets, DataSource};
use crate::filter::{Category, FilterState};
use crate::layout::{SurfaceSize, SurfaceTracker};
use crate::render::scene::Scene;
use crate::spatial::index::PointIndex;
use crate::ui::legend::LegendAction;
use crate::ui::tooltip::Tooltip;
use std::time::Instant;

/// Load lifecycle of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapState {
    /// Datasets not yet requested or still in flight
    Loading,
    /// Both datasets resolved; the map draws
    Ready,
    /// A load failed; the map stays un-rendered, with no retry
    Failed,
}

/// The interactive point map.
pub struct PointMap {
    options: MapOptions,
    state: MapState,
    regions: Vec<RegionFeature>,
    points: Vec<DataPoint>,
    surface: SurfaceTracker,
    viewport: ViewportController,
    filters: FilterState,
    tooltip: Tooltip,
    scene: Option<Scene>,
    index: Option<PointIndex>,
    hovered: Option<usize>,
    redraws: usize,
}

impl PointMap {
    pub fn new(options: MapOptions) -> Self {
        let tooltip = Tooltip::new(options.tooltip_offset);
        let viewport = ViewportController::new(&options, SurfaceSize::default());
        Self {
            options,
            state: MapState::Loading,
            regions: Vec::new(),
            points: Vec::new(),
            surface: SurfaceTracker::new(),
            viewport,
            filters: FilterState::new(),
            tooltip,
            scene: None,
            index: None,
            hovered: None,
            redraws: 0,
        }
    }

    /// Loads both datasets concurrently and ingests them. On failure the
    /// map transitions to [`MapState::Failed`] and never renders; the
    /// error itself has already been logged at the source seam.
    pub async fn load(&mut self, source: &dyn DataSource) {
        match load_datasets(source).await {
            Ok((boundary, points)) => {
                self.regions = ingest::ingest_regions(&boundary);
                self.points = ingest::ingest_points(&points);
                self.state = MapState::Ready;
                log::debug!(
                    "datasets ready: {} regions, {} points",
                    self.regions.len(),
                    self.points.len()
                );
                if self.surface.current().is_some() {
                    self.redraw();
                }
            }
            Err(_) => {
                self.state = MapState::Failed;
            }
        }
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == MapState::Ready
    }

    /// Publishes a surface measurement. A changed size (including the
    /// first) triggers the full redraw path; identical measurements are
    /// free.
    pub fn set_surface_size(&mut self, size: SurfaceSize) {
        if self.surface.observe(size).is_some() && self.is_ready() {
            self.redraw();
        }
    }

    /// Full clear-and-redraw: refit the projection, rebuild the scene and
    /// hit index, and reset the viewport to identity (a resize recenters).
    /// Invoking it again with unchanged inputs yields the identical scene.
    fn redraw(&mut self) {
        let Some(size) = self.surface.current() else {
            return;
        };
        if !size.is_drawable() {
            return;
        }

        let extent = ingest::regions_extent(&self.regions);
        let projection = FittedProjection::fit(&extent, size);
        let scene = Scene::build(&self.regions, &self.points, &projection, &self.filters);

        self.index = Some(PointIndex::build(scene.points()));
        self.scene = Some(scene);
        self.viewport.reset(size);
        self.hovered = None;
        self.tooltip.hide();
        self.redraws += 1;
        log::debug!("scene rebuilt at {}x{}", size.width, size.height);
    }

    /// Number of full rebuilds so far; transform and filter updates do not
    /// advance it.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    // --- viewport commands -----------------------------------------------

    /// One continuous gesture tick with a fully proposed transform.
    pub fn apply_gesture(&mut self, k: f64, x: f64, y: f64) {
        self.viewport.apply_gesture(k, x, y);
        self.apply_viewport();
    }

    /// Drag gesture convenience: pan by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.viewport.pan_by(&delta);
        self.apply_viewport();
    }

    /// Scroll gesture convenience: rescale around the pointer.
    pub fn zoom_at(&mut self, focus: Point, factor: f64) {
        self.viewport.zoom_at(&focus, factor);
        self.apply_viewport();
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn recenter(&mut self) {
        self.viewport.recenter();
    }

    /// Advances any animated transition and reapplies the transform to the
    /// scene. Returns true when something moved and a repaint is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.viewport.tick(now) {
            self.apply_viewport();
            true
        } else {
            false
        }
    }

    pub fn is_animating(&self) -> bool {
        self.viewport.is_animating()
    }

    pub fn transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    fn apply_viewport(&mut self) {
        let transform = self.viewport.transform();
        if let Some(scene) = &mut self.scene {
            scene.apply_transform(&transform);
        }
    }

    // --- filter commands -------------------------------------------------

    /// Toggles one category in its dimension and reapplies visibility over
    /// the full point set, in place.
    pub fn toggle_filter(&mut self, category: Category) {
        self.filters.toggle(category);
        if let Some(scene) = &mut self.scene {
            scene.apply_filters(&self.filters);
        }
    }

    /// Dispatches a legend click.
    pub fn handle_legend(&mut self, action: LegendAction) {
        match action {
            LegendAction::Toggle(category) => self.toggle_filter(category),
            LegendAction::ZoomIn => self.zoom_in(),
            LegendAction::ZoomOut => self.zoom_out(),
            LegendAction::Recenter => self.recenter(),
        }
    }

    // --- pointer ---------------------------------------------------------

    /// Hover hit-feedback: shows the tooltip over a hit point, hides it
    /// otherwise.
    pub fn pointer_moved(&mut self, pointer: Point) {
        let (Some(scene), Some(index)) = (&self.scene, &self.index) else {
            return;
        };

        let transform = scene.transform();
        let base_pointer = transform.invert(&pointer);

        match index.hit_test(&base_pointer, transform.k) {
            Some(slot) => {
                self.hovered = Some(slot);
                if let Some(point) = self.points.get(slot) {
                    self.tooltip.show(point, pointer);
                }
            }
            None => {
                self.hovered = None;
                self.tooltip.hide();
            }
        }
    }

    /// The pointer left the surface entirely.
    pub fn pointer_left(&mut self) {
        self.hovered = None;
        self.tooltip.hide();
    }

    /// Index into the point list of the currently hovered point.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    // --- accessors -------------------------------------------------------

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn regions(&self) -> &[RegionFeature] {
        &self.regions
    }
}

impl Default for PointMap {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}
