use std::f32::consts::TAU;

use eframe::egui::{self, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot, Points};

use crate::color::{generate_palette, PriceScale};
use crate::data::model::ListingTable;
use crate::views::{self, SunburstSector, ViewKind, ViewParams};

// ---------------------------------------------------------------------------
// View dispatch
// ---------------------------------------------------------------------------

/// Render one view: chart title, then the chart matching the view's kind.
pub fn render(ui: &mut Ui, id: &str, table: &ListingTable, params: &ViewParams) {
    ui.label(RichText::new(params.title).strong());
    ui.add_space(4.0);

    match params.kind {
        ViewKind::Bar => bar_view(ui, id, table, params),
        ViewKind::Sunburst => sunburst_view(ui, table, params),
        ViewKind::MapScatter | ViewKind::GeoScatter => location_scatter(ui, id, table, params),
    }
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

fn bar_view(ui: &mut Ui, id: &str, table: &ListingTable, params: &ViewParams) {
    let entries = views::bar_entries(table, params);
    let scale = PriceScale::from_values(entries.iter().map(|e| e.value));

    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let fill = scale
                .map(|s| s.color_for(entry.value))
                .unwrap_or(Color32::LIGHT_BLUE);
            let name = if entry.hover.is_empty() {
                entry.label.clone()
            } else {
                format!("{}\n{}", entry.label, entry.hover)
            };
            Bar::new(i as f64, entry.value)
                .width(0.6)
                .name(name)
                .fill(fill)
        })
        .collect();

    let tick_labels: Vec<String> = entries.iter().map(|e| e.label.clone()).collect();
    let (x_label, y_label) = (
        params.x.map(|c| c.name()).unwrap_or_default(),
        params.y.map(|c| c.name()).unwrap_or_default(),
    );

    Plot::new(id.to_owned())
        .height(320.0)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round() as i64;
            if (mark.value - i as f64).abs() > 1e-6 || i < 0 {
                return String::new();
            }
            tick_labels
                .get(i as usize)
                .map(|l| truncate_label(l))
                .unwrap_or_default()
        })
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n{:.2}", value.y)
            }
        })
        .show_grid(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn truncate_label(label: &str) -> String {
    const MAX: usize = 14;
    if label.chars().count() <= MAX {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Scatter maps
// ---------------------------------------------------------------------------

/// Longitude/latitude scatter, coloured by price.  With `params.size` set,
/// point radius scales with that column (the geo view's `accommodates`).
fn location_scatter(ui: &mut Ui, id: &str, table: &ListingTable, params: &ViewParams) {
    let (Some(x_col), Some(y_col)) = (params.x, params.y) else {
        return;
    };
    let scale = params.color.and_then(|col| {
        PriceScale::from_values(table.rows.iter().filter_map(|r| r.number(col)))
    });

    Plot::new(id.to_owned())
        .height(360.0)
        .data_aspect(1.0)
        .x_axis_label(x_col.name())
        .y_axis_label(y_col.name())
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.4}, {:.4}", value.x, value.y)
            } else {
                name.to_string()
            }
        })
        .show(ui, |plot_ui| {
            for row in &table.rows {
                let (Some(x), Some(y)) = (row.number(x_col), row.number(y_col)) else {
                    continue;
                };

                let color = params
                    .color
                    .and_then(|col| Some(scale?.color_for(row.number(col)?)))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let radius = params
                    .size
                    .and_then(|col| row.number(col))
                    .map(|v| (2.0 + v.max(0.0).sqrt() * 1.5) as f32)
                    .unwrap_or(3.0);

                plot_ui.points(
                    Points::new(vec![[x, y]])
                        .color(color)
                        .radius(radius)
                        .name(views::hover_text(row, params.hover)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Sunburst
// ---------------------------------------------------------------------------

fn sunburst_view(ui: &mut Ui, table: &ListingTable, params: &ViewParams) {
    let Some(value_col) = params.y else {
        return;
    };
    let sectors = views::sunburst_sectors(table, params.path, value_col);
    sunburst(ui, &sectors);
}

/// Painter-drawn sunburst: one ring per grouping level, sector angles from
/// the pre-computed aggregation.  Colours follow each innermost sector,
/// fading towards white on outer rings.
pub fn sunburst(ui: &mut Ui, sectors: &[SunburstSector]) {
    let levels = sectors.iter().map(|s| s.level + 1).max().unwrap_or(0);
    if levels == 0 {
        ui.label("No data for the current selection.");
        return;
    }

    let size = ui.available_width().clamp(200.0, 420.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let max_radius = rect.width().min(rect.height()) * 0.5 - 4.0;
    // Inner hole is one ring wide.
    let ring = max_radius / (levels as f32 + 1.0);

    let n_roots = sectors.iter().filter(|s| s.level == 0).count();
    let palette = generate_palette(n_roots);
    let bg = ui.visuals().window_fill();

    let mut root_idx = 0usize;
    let mut base_color = Color32::GRAY;
    for sector in sectors {
        if sector.level == 0 {
            base_color = palette.get(root_idx).copied().unwrap_or(Color32::GRAY);
            root_idx += 1;
        }
        if sector.span <= 0.0 {
            continue;
        }

        let fill = fade_towards(base_color, Color32::WHITE, sector.level as f32 * 0.25);
        let r_inner = ring * (sector.level as f32 + 1.0);
        let r_outer = ring * (sector.level as f32 + 2.0);
        let a0 = sector.start as f32 * TAU;
        let a1 = (sector.start + sector.span) as f32 * TAU;

        draw_ring_segment(
            &painter,
            center,
            r_inner,
            r_outer,
            a0,
            a1,
            fill,
            Stroke::new(1.0, bg),
        );
    }

    // Hover tooltip: hit-test the pointer against ring and angle.
    if let Some(pos) = response.hover_pos() {
        if let Some(sector) = hit_test(sectors, center, ring, pos) {
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                ui.layer_id(),
                response.id.with("sunburst_tip"),
                |ui| {
                    ui.label(format!("{}: {:.0}", sector.label, sector.value));
                },
            );
        }
    }
}

fn draw_ring_segment(
    painter: &egui::Painter,
    center: Pos2,
    r_inner: f32,
    r_outer: f32,
    a0: f32,
    a1: f32,
    fill: Color32,
    stroke: Stroke,
) {
    // Tessellate into small quads; a single concave path would fill badly.
    let sweep = a1 - a0;
    let steps = ((sweep / 0.08).ceil() as usize).clamp(1, 256);
    for i in 0..steps {
        let b0 = a0 + sweep * i as f32 / steps as f32;
        let b1 = a0 + sweep * (i + 1) as f32 / steps as f32;
        let quad = vec![
            polar(center, r_inner, b0),
            polar(center, r_outer, b0),
            polar(center, r_outer, b1),
            polar(center, r_inner, b1),
        ];
        painter.add(Shape::convex_polygon(quad, fill, stroke));
    }
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    // Angle 0 at 12 o'clock, clockwise.
    center + Vec2::new(angle.sin(), -angle.cos()) * radius
}

fn hit_test<'a>(
    sectors: &'a [SunburstSector],
    center: Pos2,
    ring: f32,
    pos: Pos2,
) -> Option<&'a SunburstSector> {
    let offset = pos - center;
    let radius = offset.length();
    if radius < ring {
        return None;
    }
    let level = (radius / ring) as usize;
    if level == 0 {
        return None;
    }
    let level = level - 1;

    let mut angle = offset.x.atan2(-offset.y);
    if angle < 0.0 {
        angle += TAU;
    }
    let frac = (angle / TAU) as f64;

    sectors.iter().find(|s| {
        s.level == level && s.span > 0.0 && frac >= s.start && frac < s.start + s.span
    })
}

fn fade_towards(color: Color32, target: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 0.8);
    let lerp = |a: u8, b: u8| -> u8 { (a as f32 + (b as f32 - a as f32) * t) as u8 };
    Color32::from_rgb(
        lerp(color.r(), target.r()),
        lerp(color.g(), target.g()),
        lerp(color.b(), target.b()),
    )
}
