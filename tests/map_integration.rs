//! End-to-end behavior of the map component over its public API: load
//! gating, redraw policy, viewport clamping, filtering, and hover feedback.

use seismap::data::geojson::{Feature, FeatureCollection, Geometry, Properties};
use seismap::data::source::{StaticSource, UnavailableSource};
use seismap::filter::Category;
use seismap::prelude::*;
use std::time::{Duration, Instant};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn boundary_collection() -> FeatureCollection {
    let ring = vec![
        [-170.0, -80.0],
        [170.0, -80.0],
        [170.0, 80.0],
        [-170.0, 80.0],
        [-170.0, -80.0],
    ];
    FeatureCollection::new(vec![Feature {
        id: None,
        geometry: Some(Geometry::Polygon {
            coordinates: vec![ring],
        }),
        properties: Some(Properties {
            name: Some("world".to_string()),
            ..Default::default()
        }),
    }])
}

fn point_feature(
    lng: f64,
    lat: f64,
    depth_category: Option<&str>,
    magnitude_category: Option<&str>,
    place: &str,
) -> Feature {
    Feature {
        id: None,
        geometry: Some(Geometry::Point {
            coordinates: [lng, lat],
        }),
        properties: Some(Properties {
            place: Some(place.to_string()),
            time: Some("2023-07-16 06:06:13".to_string()),
            mag: Some(5.5),
            mag_type: Some("mww".to_string()),
            mag_error: Some(0.06),
            depth: Some(23.0),
            depth_error: Some(1.8),
            dmin: Some(0.8),
            depth_category: depth_category.map(str::to_string),
            magnitude_category: magnitude_category.map(str::to_string),
            ..Default::default()
        }),
    }
}

fn points_collection() -> FeatureCollection {
    FeatureCollection::new(vec![
        point_feature(10.0, 20.0, Some("shallow"), Some("major"), "Alpha Ridge"),
        point_feature(-60.0, -30.0, Some("deep"), Some("major"), "Beta Trench"),
        point_feature(140.0, 35.0, None, None, "Gamma Basin"),
    ])
}

async fn ready_map() -> PointMap {
    init_logging();
    let mut map = PointMap::new(MapOptions::default());
    let source = StaticSource::new(boundary_collection(), points_collection());
    map.load(&source).await;
    map.set_surface_size(SurfaceSize::new(800.0, 600.0));
    assert!(map.is_ready());
    map
}

#[tokio::test]
async fn test_load_failure_leaves_map_unrendered() {
    init_logging();
    let mut map = PointMap::new(MapOptions::default());
    map.load(&UnavailableSource::new("offline")).await;

    assert_eq!(map.state(), MapState::Failed);
    map.set_surface_size(SurfaceSize::new(800.0, 600.0));
    assert!(map.scene().is_none());
    assert_eq!(map.redraw_count(), 0);
}

#[tokio::test]
async fn test_ready_map_builds_scene() {
    let map = ready_map().await;
    let scene = map.scene().unwrap();

    assert_eq!(scene.regions().len(), 1);
    assert_eq!(scene.points().len(), 3);
    assert_eq!(map.redraw_count(), 1);
}

#[tokio::test]
async fn test_empty_point_dataset_renders_base_layer_only() {
    init_logging();
    let mut map = PointMap::new(MapOptions::default());
    let source = StaticSource::new(boundary_collection(), FeatureCollection::default());
    map.load(&source).await;
    map.set_surface_size(SurfaceSize::new(800.0, 600.0));

    let scene = map.scene().unwrap();
    assert_eq!(scene.regions().len(), 1);
    assert!(scene.points().is_empty());
}

#[tokio::test]
async fn test_missing_categories_get_defaults() {
    let map = ready_map().await;
    let gamma = &map.points()[2];

    assert_eq!(gamma.depth_category, DepthCategory::Unknown);
    assert_eq!(gamma.magnitude_category, MagnitudeCategory::Minor);
}

#[tokio::test]
async fn test_resize_refits_projection() {
    let mut map = ready_map().await;
    map.apply_gesture(3.0, 20.0, -10.0);

    let before: Vec<_> = map
        .scene()
        .unwrap()
        .points()
        .iter()
        .map(|point| point.base)
        .collect();

    map.set_surface_size(SurfaceSize::new(400.0, 300.0));
    let scene = map.scene().unwrap();

    for (sprite, old_base) in scene.points().iter().zip(&before) {
        assert_ne!(sprite.base, *old_base);
    }
    // Model-space coordinates are untouched by the refit.
    assert_eq!(map.points()[0].position, LatLng::new(20.0, 10.0));
    // The redraw recenters: any prior zoom/pan is discarded.
    assert_eq!(map.transform(), ViewTransform::identity());
    assert_eq!(map.redraw_count(), 2);
}

#[tokio::test]
async fn test_same_size_does_not_redraw() {
    let mut map = ready_map().await;
    map.set_surface_size(SurfaceSize::new(800.0, 600.0));
    map.set_surface_size(SurfaceSize::new(800.0, 600.0));
    assert_eq!(map.redraw_count(), 1);
}

#[tokio::test]
async fn test_radius_tracks_zoom_exactly() {
    let mut map = ready_map().await;

    for k in [0.5, 1.0, 2.5, 17.0, 30.0] {
        map.apply_gesture(k, 0.0, 0.0);
        let scene = map.scene().unwrap();
        for sprite in scene.points() {
            assert_eq!(sprite.radius, magnitude_radius(sprite.magnitude_category) / k);
        }
    }
}

#[tokio::test]
async fn test_gestures_never_escape_clamps() {
    let mut map = ready_map().await;

    // The visible window, mapped into base coordinates, must stay inside
    // the canvas padded by 100 units on every side.
    let assert_within_padded_bounds = |t: ViewTransform| {
        assert!(t.k >= 0.5 && t.k <= 30.0);
        if t.k >= 1.0 {
            assert!(t.invert_x(0.0) >= -100.0 - 1e-6);
            assert!(t.invert_x(800.0) <= 900.0 + 1e-6);
            assert!(t.invert_y(0.0) >= -100.0 - 1e-6);
            assert!(t.invert_y(600.0) <= 700.0 + 1e-6);
        }
    };

    map.apply_gesture(1e9, 1e9, -1e9);
    assert_within_padded_bounds(map.transform());

    map.apply_gesture(1e-9, 0.0, 0.0);
    assert!(map.transform().k >= 0.5);

    map.apply_gesture(1.0, 0.0, 0.0);
    map.pan_by(Point::new(1e7, 1e7));
    let t = map.transform();
    // At identity scale the padded window rule reduces to |offset| <= 100.
    assert!((t.x - 100.0).abs() < 1e-6);
    assert!((t.y - 100.0).abs() < 1e-6);
    assert_within_padded_bounds(t);

    map.pan_by(Point::new(-1e7, -1e7));
    let t = map.transform();
    assert!((t.x + 100.0).abs() < 1e-6);
    assert!((t.y + 100.0).abs() < 1e-6);
    assert_within_padded_bounds(t);
}

#[tokio::test]
async fn test_programmatic_zoom_steps() {
    let mut map = ready_map().await;

    map.zoom_in();
    assert!(map.is_animating());
    map.tick(Instant::now() + Duration::from_millis(400));
    assert!((map.transform().k - 1.5).abs() < 1e-9);

    map.zoom_out();
    map.tick(Instant::now() + Duration::from_millis(400));
    assert!((map.transform().k - 0.75).abs() < 1e-9);

    map.recenter();
    map.tick(Instant::now() + Duration::from_millis(400));
    assert_eq!(map.transform(), ViewTransform::identity());
}

#[tokio::test]
async fn test_filter_visibility_rule() {
    let mut map = ready_map().await;
    map.toggle_filter(Category::Depth(DepthCategory::Shallow));

    let scene = map.scene().unwrap();
    // shallow/major passes both dimensions; deep/major fails depth.
    assert_eq!(scene.points()[0].opacity, 1.0);
    assert_eq!(scene.points()[1].opacity, 0.05);
}

#[tokio::test]
async fn test_filter_toggle_roundtrip() {
    let mut map = ready_map().await;

    let before: Vec<_> = map
        .scene()
        .unwrap()
        .points()
        .iter()
        .map(|sprite| sprite.opacity)
        .collect();

    map.toggle_filter(Category::Magnitude(MagnitudeCategory::Major));
    map.toggle_filter(Category::Magnitude(MagnitudeCategory::Major));

    let after: Vec<_> = map
        .scene()
        .unwrap()
        .points()
        .iter()
        .map(|sprite| sprite.opacity)
        .collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_filter_updates_do_not_rebuild_scene() {
    let mut map = ready_map().await;
    map.toggle_filter(Category::Depth(DepthCategory::Deep));
    map.apply_gesture(2.0, 5.0, 5.0);
    assert_eq!(map.redraw_count(), 1);
}

#[tokio::test]
async fn test_hover_shows_and_clears_tooltip() {
    let mut map = ready_map().await;

    let target = map.scene().unwrap().points()[0].screen;
    map.pointer_moved(target);

    assert!(map.tooltip().is_visible());
    assert_eq!(map.tooltip().opacity(), 1.0);
    assert_eq!(map.hovered(), Some(0));
    let content = map.tooltip().content().unwrap().to_string();
    assert!(content.contains("Alpha Ridge"));

    map.pointer_moved(Point::new(1.0, 1.0));
    assert!(!map.tooltip().is_visible());
    assert_eq!(map.tooltip().opacity(), 0.0);
    assert!(map.tooltip().content().is_none());
    assert_eq!(map.hovered(), None);
}

#[tokio::test]
async fn test_hover_tracks_zoomed_positions() {
    let mut map = ready_map().await;
    map.apply_gesture(4.0, 37.0, -12.0);

    let target = map.scene().unwrap().points()[1].screen;
    map.pointer_moved(target);

    assert_eq!(map.hovered(), Some(1));
    let content = map.tooltip().content().unwrap();
    assert!(content.contains("Beta Trench"));
}

#[tokio::test]
async fn test_pointer_leave_clears_tooltip() {
    let mut map = ready_map().await;
    let target = map.scene().unwrap().points()[0].screen;
    map.pointer_moved(target);
    assert!(map.tooltip().is_visible());

    map.pointer_left();
    assert!(!map.tooltip().is_visible());
    assert!(map.tooltip().content().is_none());
}

#[tokio::test]
async fn test_legend_actions_dispatch() {
    let mut map = ready_map().await;

    map.handle_legend(LegendAction::Toggle(Category::Depth(DepthCategory::Deep)));
    assert!(!map.filters().is_empty());

    map.handle_legend(LegendAction::ZoomIn);
    map.tick(Instant::now() + Duration::from_millis(400));
    assert!((map.transform().k - 1.5).abs() < 1e-9);

    map.handle_legend(LegendAction::Recenter);
    map.tick(Instant::now() + Duration::from_millis(400));
    assert_eq!(map.transform(), ViewTransform::identity());
}

#[tokio::test]
async fn test_surface_before_load_draws_once_ready() {
    init_logging();
    let mut map = PointMap::new(MapOptions::default());
    map.set_surface_size(SurfaceSize::new(800.0, 600.0));
    assert!(map.scene().is_none());

    let source = StaticSource::new(boundary_collection(), points_collection());
    map.load(&source).await;

    assert!(map.is_ready());
    assert!(map.scene().is_some());
    assert_eq!(map.redraw_count(), 1);
}
