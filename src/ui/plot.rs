use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot, PlotPoint, PlotPoints,
    Points, Polygon, Text,
};

use crate::charts::{BarEntry, BoxGroup, Chart, ChartKind};
use crate::color::{ColorScale, Rgb};
use crate::data::stats::HistogramBin;
use crate::view::ChartOutput;

const PLOT_HEIGHT: f32 = 460.0;

/// Heat-maps larger than this skip the per-cell value labels.
const MAX_ANNOTATED_CELLS: usize = 12;

// ---------------------------------------------------------------------------
// Chart region
// ---------------------------------------------------------------------------

/// Render a chart region: a chart, or an explicit error / no-data state.
pub fn chart_output(ui: &mut Ui, output: &ChartOutput) {
    match output {
        ChartOutput::Chart(chart) => chart_view(ui, chart),
        ChartOutput::Error { message } => placeholder(ui, &format!("Error: {message}"), Color32::RED),
        ChartOutput::InsufficientData { message } => placeholder(
            ui,
            &format!("Datos insuficientes: {message}"),
            Color32::LIGHT_GRAY,
        ),
    }
}

fn placeholder(ui: &mut Ui, text: &str, color: Color32) {
    ui.allocate_ui(egui::vec2(ui.available_width(), 120.0), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(text).size(18.0).color(color));
        });
    });
}

fn chart_view(ui: &mut Ui, chart: &Chart) {
    ui.label(RichText::new(&chart.title).size(16.0).strong());
    match &chart.kind {
        ChartKind::Histogram { bins, color } => histogram(ui, chart, bins, *color),
        ChartKind::Bar { bars, annotate } => bar_chart(ui, chart, bars, *annotate),
        ChartKind::Heatmap {
            labels,
            values,
            scale,
            min,
            max,
        } => {
            heatmap(ui, labels, values, *scale, *min, *max);
            ui.add_space(12.0);
            correlation_table(ui, labels, values);
        }
        ChartKind::BoxPlot { groups } => box_plot(ui, chart, groups),
    }
}

/// Axis formatter printing `labels[i]` at integer ticks and nothing between.
/// Plot memory (pan, zoom, bounds) is keyed per chart, so switching the
/// selected column starts from fresh auto-bounds.
fn plot_id(kind: &str, chart: &Chart) -> egui::Id {
    egui::Id::new((kind, &chart.title))
}

fn index_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

fn histogram(ui: &mut Ui, chart: &Chart, bins: &[HistogramBin], color: Rgb) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(b.end - b.start)
                .name(format!("{:.2} – {:.2}", b.start, b.end))
        })
        .collect();

    Plot::new(plot_id("histogram", chart))
        .height(PLOT_HEIGHT)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color.to_color32()));
        });
}

// ---------------------------------------------------------------------------
// Category bars
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, chart: &Chart, bars: &[BarEntry], annotate: bool) {
    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();

    Plot::new(plot_id("bar_chart", chart))
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .x_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            for (i, entry) in bars.iter().enumerate() {
                let color = entry.color.to_color32();
                let bar = Bar::new(i as f64, entry.value as f64)
                    .width(0.7)
                    .fill(color)
                    .name(&entry.label);
                plot_ui.bar_chart(BarChart::new(vec![bar]).color(color).name(&entry.label));

                if annotate {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, entry.value as f64),
                            RichText::new(entry.value.to_string()).strong(),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heat-map
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, labels: &[String], values: &[Vec<f64>], scale: ColorScale, min: f64, max: f64) {
    let n = labels.len();
    // Row 0 is drawn at the top.
    let row_labels: Vec<String> = labels.iter().rev().cloned().collect();

    Plot::new("correlation_heatmap")
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(index_formatter(labels.to_vec()))
        .y_axis_formatter(index_formatter(row_labels))
        .show(ui, |plot_ui| {
            for (i, row) in values.iter().enumerate() {
                let y = (n - 1 - i) as f64;
                for (j, &v) in row.iter().enumerate() {
                    let x = j as f64;
                    let cell = PlotPoints::new(vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ]);
                    plot_ui.polygon(
                        Polygon::new(cell)
                            .fill_color(scale.sample(v, min, max).to_color32())
                            .stroke(Stroke::NONE),
                    );
                    if n <= MAX_ANNOTATED_CELLS && v.is_finite() {
                        plot_ui.text(
                            Text::new(PlotPoint::new(x, y), format!("{v:.2}"))
                                .color(Color32::WHITE),
                        );
                    }
                }
            }
        });

    color_bar(ui, scale, min, max);
}

fn color_bar(ui: &mut Ui, scale: ColorScale, min: f64, max: f64) {
    const STEPS: usize = 48;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{min:.2}"));
        let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 14.0), egui::Sense::hover());
        let step = rect.width() / STEPS as f32;
        for k in 0..STEPS {
            let t = min + (max - min) * (k as f64 + 0.5) / STEPS as f64;
            let x0 = rect.left() + k as f32 * step;
            let cell = egui::Rect::from_min_max(
                egui::pos2(x0, rect.top()),
                egui::pos2(x0 + step + 0.5, rect.bottom()),
            );
            ui.painter()
                .rect_filled(cell, 0.0, scale.sample(t, min, max).to_color32());
        }
        ui.label(format!("{max:.2}"));
    });
}

fn correlation_table(ui: &mut Ui, labels: &[String], values: &[Vec<f64>]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .columns(Column::auto().at_least(64.0), labels.len())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.label("");
            });
            for label in labels {
                header.col(|ui| {
                    ui.strong(label);
                });
            }
        })
        .body(|mut body| {
            for (label, row) in labels.iter().zip(values) {
                body.row(20.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.strong(label);
                    });
                    for v in row {
                        table_row.col(|ui| {
                            if v.is_finite() {
                                ui.monospace(format!("{v:+.3}"));
                            } else {
                                ui.weak("—");
                            }
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

fn box_plot(ui: &mut Ui, chart: &Chart, groups: &[BoxGroup]) {
    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();

    Plot::new(plot_id("box_plot", chart))
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .x_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            for (i, group) in groups.iter().enumerate() {
                let color = group.color.to_color32();
                let s = &group.stats;
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                )
                .name(&group.label)
                .box_width(0.6)
                .fill(color.gamma_multiply(0.35))
                .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&group.label).color(color));

                if !s.outliers.is_empty() {
                    let outliers: Vec<[f64; 2]> =
                        s.outliers.iter().map(|&v| [i as f64, v]).collect();
                    plot_ui.points(
                        Points::new(PlotPoints::new(outliers))
                            .color(color)
                            .radius(2.5)
                            .name(&group.label),
                    );
                }
            }
        });
}
