use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, Points, Polygon};

use crate::color::{ColorMap, FAILURE_COLOR, SUCCESS_COLOR};
use crate::data::aggregate::OutcomeChart;
use crate::data::filter::{FilteredSubset, SCATTER_TITLE, SCATTER_X_LABEL, SCATTER_Y_LABEL};
use crate::data::model::PayloadBounds;

/// Arc resolution for a full turn of the pie.
const SEGMENTS_PER_TURN: f64 = 96.0;

/// Largest wedge drawn as one polygon; keeps every polygon convex.
const MAX_WEDGE_TURN: f64 = 0.25;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// Point on the unit circle `turn` fractions clockwise from 12 o'clock.
fn unit_point(turn: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - turn * TAU;
    [angle.cos(), angle.sin()]
}

/// Convex wedges covering the slice between `start` and `end` (fractions of
/// a turn).  Each wedge starts at the centre.
pub fn slice_wedges(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    let mut wedges = Vec::new();
    let mut a = start;
    while a < end {
        let b = (a + MAX_WEDGE_TURN).min(end);
        let steps = ((b - a) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push([0.0, 0.0]);
        for i in 0..=steps {
            points.push(unit_point(a + (b - a) * i as f64 / steps as f64));
        }
        wedges.push(points);
        a = b;
    }
    wedges
}

/// `(start, end)` fractions for each value; zero values get an empty span.
pub fn slice_spans(values: &[usize]) -> Vec<(f64, f64)> {
    let total: usize = values.iter().sum();
    if total == 0 {
        return vec![(0.0, 0.0); values.len()];
    }
    let mut acc = 0.0;
    values
        .iter()
        .map(|&v| {
            let start = acc;
            acc += v as f64 / total as f64;
            (start, acc)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Outcome pie
// ---------------------------------------------------------------------------

pub fn outcome_pie(ui: &mut Ui, chart: &OutcomeChart) {
    ui.heading(&chart.title);

    let values: Vec<usize> = chart.slices.iter().map(|(_, v)| *v).collect();
    let spans = slice_spans(&values);
    let colors = [SUCCESS_COLOR, FAILURE_COLOR];

    Plot::new("outcome_pie")
        .height(300.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            if chart.is_empty() {
                let outline: Vec<[f64; 2]> = (0..=SEGMENTS_PER_TURN as usize)
                    .map(|i| unit_point(i as f64 / SEGMENTS_PER_TURN))
                    .collect();
                plot_ui.line(Line::new(outline).color(Color32::GRAY).name("No launches"));
                return;
            }
            for (((label, value), (start, end)), color) in
                chart.slices.iter().zip(spans).zip(colors)
            {
                let name = format!("{label} ({value})");
                for wedge in slice_wedges(start, end) {
                    plot_ui.polygon(
                        Polygon::new(wedge)
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }
            }
        });

    match chart.summary.success_rate() {
        Some(rate) => ui.label(format!(
            "{} launches, {:.1}% successful",
            chart.summary.total(),
            rate * 100.0
        )),
        None => ui.label("No launches for this selection"),
    };
}

// ---------------------------------------------------------------------------
// Payload scatter
// ---------------------------------------------------------------------------

/// One plotted point with the detail shown on hover.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPoint {
    pub booster: String,
    pub payload: f64,
    pub outcome: f64,
    pub site: String,
}

/// Hover text for the point under the cursor.  Falls back to plain
/// coordinates when the cursor is not on a plotted point.
pub fn hover_text(points: &[HoverPoint], series: &str, value: &PlotPoint) -> String {
    let mut sites: Vec<&str> = points
        .iter()
        .filter(|p| p.booster == series && p.payload == value.x && p.outcome == value.y)
        .map(|p| p.site.as_str())
        .collect();
    sites.sort_unstable();
    sites.dedup();

    if sites.is_empty() {
        return format!("{:.0} kg", value.x);
    }
    let result = if value.y >= 0.5 { "Success" } else { "Failure" };
    format!(
        "Booster: {series}\nPayload: {:.0} kg\n{result}\nLaunch Site: {}",
        value.x,
        sites.join(", ")
    )
}

pub fn payload_scatter(ui: &mut Ui, subset: &FilteredSubset, colors: &ColorMap, bounds: PayloadBounds) {
    ui.heading(SCATTER_TITLE);

    let groups = subset.by_booster();
    let hover: Vec<HoverPoint> = subset
        .rows()
        .map(|r| HoverPoint {
            booster: r.booster_version_category.clone(),
            payload: r.payload_mass_kg,
            outcome: r.outcome.as_f64(),
            site: r.launch_site.clone(),
        })
        .collect();

    Plot::new("payload_scatter")
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label(SCATTER_X_LABEL)
        .y_axis_label(SCATTER_Y_LABEL)
        .include_x(bounds.min)
        .include_x(bounds.max)
        .include_y(-0.25)
        .include_y(1.25)
        .label_formatter(move |name, value| hover_text(&hover, name, value))
        .show(ui, |plot_ui| {
            for (booster, rows) in &groups {
                let points: Vec<[f64; 2]> = rows
                    .iter()
                    .map(|r| [r.payload_mass_kg, r.outcome.as_f64()])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(booster)
                        .color(colors.color_for(booster))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });

    if subset.is_empty() {
        ui.label("No launches in this payload range");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius(p: [f64; 2]) -> f64 {
        (p[0] * p[0] + p[1] * p[1]).sqrt()
    }

    #[test]
    fn test_slice_spans() {
        assert_eq!(slice_spans(&[3, 1]), vec![(0.0, 0.75), (0.75, 1.0)]);
        assert_eq!(slice_spans(&[0, 4]), vec![(0.0, 0.0), (0.0, 1.0)]);
        assert_eq!(slice_spans(&[0, 0]), vec![(0.0, 0.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_wedges_split_large_slices() {
        let wedges = slice_wedges(0.0, 0.6);
        assert_eq!(wedges.len(), 3);
        for w in &wedges {
            assert_eq!(w[0], [0.0, 0.0]);
            assert!(w[1..].iter().all(|&p| (radius(p) - 1.0).abs() < 1e-9));
        }
        assert!(slice_wedges(0.3, 0.3).is_empty());
    }

    #[test]
    fn test_pie_starts_at_twelve_oclock() {
        let w = &slice_wedges(0.0, 0.25)[0];
        let first = w[1];
        let last = w[w.len() - 1];
        assert!(first[0].abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn test_hover_text_includes_site() {
        let points = vec![HoverPoint {
            booster: "FT".into(),
            payload: 2490.0,
            outcome: 1.0,
            site: "KSC LC-39A".into(),
        }];
        let text = hover_text(&points, "FT", &PlotPoint::new(2490.0, 1.0));
        assert!(text.contains("Launch Site: KSC LC-39A"));
        assert!(text.contains("Success"));
        assert_eq!(hover_text(&points, "B4", &PlotPoint::new(2490.0, 1.0)), "2490 kg");
    }

    #[test]
    fn test_hover_text_lists_each_site_once() {
        let point = |site: &str| HoverPoint {
            booster: "B5".into(),
            payload: 3600.0,
            outcome: 1.0,
            site: site.into(),
        };
        let points = vec![point("KSC LC-39A"), point("CCAFS SLC-40"), point("KSC LC-39A")];
        let text = hover_text(&points, "B5", &PlotPoint::new(3600.0, 1.0));
        assert!(text.ends_with("Launch Site: CCAFS SLC-40, KSC LC-39A"), "{text}");
    }
}
