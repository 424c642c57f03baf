//! egui widget for the point map.
//!
//! The widget owns no map state: each frame it feeds egui input into the
//! core operations, then paints the current scene, legend, controls, and
//! tooltip. Region polygons are triangulated once per scene rebuild (via
//! earcut) and cached in egui's id-keyed memory; per frame only the
//! viewport transform is applied to the cached vertices.

use crate::core::geo::Point;
use crate::core::map::PointMap;
use crate::core::viewport::ViewTransform;
use crate::layout::SurfaceSize;
use crate::render::style::Rgb;
use crate::ui::legend::{Legend, LegendAction, LegendEntry};
use egui::{
    Align2, Color32, FontId, Mesh, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2, Widget,
};
use std::sync::Arc;
use std::time::Instant;

const SWATCH_SIZE: f32 = 12.0;
const LEGEND_ROW_HEIGHT: f32 = 18.0;
const LEGEND_MARGIN: f32 = 10.0;
const CONTROL_SIZE: f32 = 26.0;
const TOOLTIP_PADDING: f32 = 6.0;

/// One region polygon triangulated in base coordinates.
#[derive(Debug, Clone)]
struct TessellatedPolygon {
    vertices: Vec<Point>,
    indices: Vec<u32>,
    rings: Vec<Vec<Point>>,
}

/// Triangulation of the whole base layer, valid for one scene generation.
#[derive(Debug, Clone)]
struct TessellationCache {
    generation: usize,
    polygons: Vec<TessellatedPolygon>,
}

/// Immediate-mode widget over a [`PointMap`].
pub struct MapWidget<'a> {
    map: &'a mut PointMap,
}

impl<'a> MapWidget<'a> {
    pub fn new(map: &'a mut PointMap) -> Self {
        Self { map }
    }
}

impl<'a> Widget for MapWidget<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let desired_size = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        self.map.set_surface_size(SurfaceSize::new(
            rect.width() as f64,
            rect.height() as f64,
        ));

        if self.map.tick(Instant::now()) || self.map.is_animating() {
            ui.ctx().request_repaint();
        }

        // Continuous gestures first, so this frame draws their result.
        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                self.map.pan_by(Point::new(delta.x as f64, delta.y as f64));
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                if let Some(pointer) = response.hover_pos() {
                    let focus = Point::new(
                        (pointer.x - rect.min.x) as f64,
                        (pointer.y - rect.min.y) as f64,
                    );
                    let factor = ((scroll as f64) * 0.002).exp();
                    self.map.zoom_at(focus, factor);
                }
            }
        }

        match response.hover_pos() {
            Some(pointer) if !response.dragged() => {
                self.map.pointer_moved(Point::new(
                    (pointer.x - rect.min.x) as f64,
                    (pointer.y - rect.min.y) as f64,
                ));
            }
            Some(_) => {}
            None => self.map.pointer_left(),
        }

        let painter = ui.painter().with_clip_rect(rect);
        painter.rect_filled(rect, 0.0, Color32::from_rgb(0xf7, 0xf7, 0xf7));

        if self.map.is_ready() {
            let cache = tessellation_for(ui, &response, self.map);
            draw_base_layer(&painter, rect, self.map, &cache);
            draw_points(&painter, rect, self.map);
        }

        draw_legend(ui, rect, self.map);
        draw_controls(ui, rect, self.map);
        draw_tooltip(&painter, rect, self.map);

        response
    }
}

fn color32(color: Rgb, opacity: f64) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r,
        color.g,
        color.b,
        (opacity.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

fn to_screen(rect: Rect, transform: &ViewTransform, base: &Point) -> Pos2 {
    let p = transform.apply(base);
    Pos2::new(rect.min.x + p.x as f32, rect.min.y + p.y as f32)
}

/// Returns the cached triangulation for the current scene generation,
/// rebuilding it after each full redraw.
fn tessellation_for(ui: &Ui, response: &Response, map: &PointMap) -> Arc<TessellationCache> {
    let cache_id = response.id.with("tessellation");
    let generation = map.redraw_count();

    let cached = ui
        .ctx()
        .memory(|mem| mem.data.get_temp::<Arc<TessellationCache>>(cache_id));
    if let Some(cache) = cached {
        if cache.generation == generation {
            return cache;
        }
    }

    let mut polygons = Vec::new();
    if let Some(scene) = map.scene() {
        for region in scene.regions() {
            for polygon in &region.polygons {
                if let Some(tessellated) = tessellate(&polygon.exterior, &polygon.holes) {
                    polygons.push(tessellated);
                }
            }
        }
    }

    let cache = Arc::new(TessellationCache {
        generation,
        polygons,
    });
    ui.ctx()
        .memory_mut(|mem| mem.data.insert_temp(cache_id, cache.clone()));
    cache
}

fn tessellate(exterior: &[Point], holes: &[Vec<Point>]) -> Option<TessellatedPolygon> {
    let mut vertices: Vec<Point> = Vec::new();
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();
    let mut rings: Vec<Vec<Point>> = Vec::new();

    for (ring_index, ring) in std::iter::once(exterior)
        .chain(holes.iter().map(Vec::as_slice))
        .enumerate()
    {
        let mut points = ring.to_vec();
        drop_closing_duplicate(&mut points);
        if points.len() < 3 {
            continue;
        }

        if ring_index > 0 {
            hole_indices.push(vertices.len());
        }

        for point in &points {
            coords.push(point.x);
            coords.push(point.y);
        }
        vertices.extend(points.iter().copied());
        rings.push(points);
    }

    if vertices.len() < 3 {
        return None;
    }

    let indices = match earcutr::earcut(&coords, &hole_indices, 2) {
        Ok(indices) => indices,
        Err(_) => return None,
    };

    Some(TessellatedPolygon {
        vertices,
        indices: indices.into_iter().map(|index| index as u32).collect(),
        rings,
    })
}

fn drop_closing_duplicate(points: &mut Vec<Point>) {
    if points.len() >= 2 {
        let first = points[0];
        let last = points[points.len() - 1];
        if (first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9 {
            points.pop();
        }
    }
}

fn draw_base_layer(
    painter: &egui::Painter,
    rect: Rect,
    map: &PointMap,
    cache: &TessellationCache,
) {
    let Some(scene) = map.scene() else {
        return;
    };
    let transform = scene.transform();
    let fill = color32(map.options().region_fill, 1.0);
    let stroke_color = color32(map.options().region_stroke, 1.0);
    let stroke_width = transform.k as f32;

    for polygon in &cache.polygons {
        let mut mesh = Mesh::default();
        for vertex in &polygon.vertices {
            mesh.colored_vertex(to_screen(rect, &transform, vertex), fill);
        }
        for triangle in polygon.indices.chunks_exact(3) {
            mesh.add_triangle(triangle[0], triangle[1], triangle[2]);
        }
        painter.add(Shape::mesh(mesh));

        for ring in &polygon.rings {
            let points = ring
                .iter()
                .map(|point| to_screen(rect, &transform, point))
                .collect();
            painter.add(Shape::closed_line(
                points,
                Stroke::new(stroke_width, stroke_color),
            ));
        }
    }
}

fn draw_points(painter: &egui::Painter, rect: Rect, map: &PointMap) {
    let Some(scene) = map.scene() else {
        return;
    };

    for point in scene.points() {
        let center = Pos2::new(
            rect.min.x + point.screen.x as f32,
            rect.min.y + point.screen.y as f32,
        );
        painter.circle_filled(center, point.radius as f32, color32(point.color, point.opacity));
    }
}

fn draw_legend(ui: &mut Ui, rect: Rect, map: &mut PointMap) {
    let depth_entries = Legend::depth_entries();
    let magnitude_entries = Legend::magnitude_entries();

    let depth_origin = Pos2::new(
        rect.min.x + LEGEND_MARGIN,
        rect.max.y - LEGEND_MARGIN - depth_entries.len() as f32 * LEGEND_ROW_HEIGHT,
    );
    let magnitude_origin = Pos2::new(
        rect.min.x + LEGEND_MARGIN + 110.0,
        rect.max.y - LEGEND_MARGIN - magnitude_entries.len() as f32 * LEGEND_ROW_HEIGHT,
    );

    draw_legend_column(ui, map, depth_origin, &depth_entries);
    draw_legend_column(ui, map, magnitude_origin, &magnitude_entries);
}

fn draw_legend_column(ui: &mut Ui, map: &mut PointMap, origin: Pos2, entries: &[LegendEntry]) {
    for (row, entry) in entries.iter().enumerate() {
        let row_rect = Rect::from_min_size(
            Pos2::new(origin.x, origin.y + row as f32 * LEGEND_ROW_HEIGHT),
            Vec2::new(100.0, LEGEND_ROW_HEIGHT),
        );
        let response = ui.allocate_rect(row_rect, Sense::click());
        if response.clicked() {
            map.handle_legend(Legend::click(entry));
        }

        let opacity = Legend::swatch_opacity(map.filters(), entry);
        let painter = ui.painter();
        let swatch_center = Pos2::new(
            row_rect.min.x + SWATCH_SIZE / 2.0,
            row_rect.center().y,
        );

        if let Some(color) = entry.color {
            let swatch = Rect::from_center_size(swatch_center, Vec2::splat(SWATCH_SIZE));
            painter.rect_filled(swatch, 2.0, color32(color, opacity));
        }
        if let Some(radius) = entry.radius {
            painter.circle_filled(
                swatch_center,
                radius as f32,
                color32(Rgb::new(0x44, 0x44, 0x44), opacity),
            );
        }

        painter.text(
            Pos2::new(row_rect.min.x + SWATCH_SIZE + 6.0, row_rect.center().y),
            Align2::LEFT_CENTER,
            entry.label,
            FontId::proportional(11.0),
            Color32::from_rgba_unmultiplied(0x22, 0x22, 0x22, (opacity * 255.0) as u8),
        );
    }
}

fn draw_controls(ui: &mut Ui, rect: Rect, map: &mut PointMap) {
    let buttons = [
        ("+", LegendAction::ZoomIn),
        ("\u{2212}", LegendAction::ZoomOut),
        ("\u{2302}", LegendAction::Recenter),
    ];

    for (index, (label, action)) in buttons.iter().enumerate() {
        let button_rect = Rect::from_min_size(
            Pos2::new(
                rect.max.x - LEGEND_MARGIN - CONTROL_SIZE,
                rect.min.y + LEGEND_MARGIN + index as f32 * (CONTROL_SIZE + 5.0),
            ),
            Vec2::splat(CONTROL_SIZE),
        );

        let response = ui.allocate_rect(button_rect, Sense::click());
        if response.clicked() {
            map.handle_legend(*action);
        }

        let background = if response.hovered() {
            Color32::from_gray(0xe0)
        } else {
            Color32::WHITE
        };

        let painter = ui.painter();
        painter.rect_filled(button_rect, 4.0, background);
        painter.rect_stroke(
            button_rect,
            4.0,
            Stroke::new(1.0, Color32::from_gray(0x99)),
        );
        painter.text(
            button_rect.center(),
            Align2::CENTER_CENTER,
            *label,
            FontId::proportional(14.0),
            Color32::BLACK,
        );
    }
}

fn draw_tooltip(painter: &egui::Painter, rect: Rect, map: &PointMap) {
    let tooltip = map.tooltip();
    if !tooltip.is_visible() {
        return;
    }
    let Some(content) = tooltip.content() else {
        return;
    };

    let anchor = Pos2::new(
        rect.min.x + tooltip.position().x as f32,
        rect.min.y + tooltip.position().y as f32,
    );

    let galley = painter.layout_no_wrap(
        content.to_string(),
        FontId::proportional(11.0),
        Color32::BLACK,
    );
    let background = Rect::from_min_size(
        anchor,
        galley.size() + Vec2::splat(TOOLTIP_PADDING * 2.0),
    );

    painter.rect_filled(
        background,
        3.0,
        Color32::from_rgba_unmultiplied(0xff, 0xff, 0xff, 0xf0),
    );
    painter.rect_stroke(background, 3.0, Stroke::new(1.0, Color32::from_gray(0x66)));
    painter.galley(anchor + Vec2::splat(TOOLTIP_PADDING), galley);
}
