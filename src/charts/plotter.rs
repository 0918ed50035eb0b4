//! Chart Plotter Module
//! Draws figures with egui_plot.

use crate::charts::{Figure, FigureKind};
use crate::stats::{CorrelationMatrix, HistogramBin};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

pub const BAR_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const NAN_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

// Diverging scale end points and midpoint for [-1, 1].
const COOL: (f32, f32, f32) = (59.0, 76.0, 192.0);
const NEUTRAL: (f32, f32, f32) = (221.0, 221.0, 221.0);
const WARM: (f32, f32, f32) = (180.0, 4.0, 38.0);

/// Creates the exploratory charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Map a correlation in [-1, 1] onto a blue-white-red scale.
    pub fn diverging_color(value: f64) -> Color32 {
        if !value.is_finite() {
            return NAN_COLOR;
        }
        let t = ((value.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32;
        let (from, to, f) = if t < 0.5 {
            (COOL, NEUTRAL, t * 2.0)
        } else {
            (NEUTRAL, WARM, (t - 0.5) * 2.0)
        };
        let lerp = |a: f32, b: f32| (a + (b - a) * f).round() as u8;
        Color32::from_rgb(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
    }

    /// Two-decimal cell annotation.
    pub fn annotation(value: f64) -> String {
        if value.is_finite() {
            format!("{:.2}", value)
        } else {
            "nan".to_string()
        }
    }

    pub fn draw(ui: &mut egui::Ui, figure: &Figure) {
        ui.label(RichText::new(&figure.title).size(18.0).strong());
        ui.add_space(8.0);

        match &figure.kind {
            FigureKind::Histogram(bins) => Self::draw_histogram(ui, figure, bins),
            FigureKind::Heatmap(matrix) => Self::draw_heatmap(ui, figure, matrix),
            FigureKind::Scatter(points) => Self::draw_scatter(ui, figure, points),
        }
    }

    fn draw_histogram(ui: &mut egui::Ui, figure: &Figure, bins: &[HistogramBin]) {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|bin| {
                Bar::new(bin.start as f64 + 0.5, bin.count as f64)
                    .width(1.0)
                    .fill(BAR_COLOR)
                    .stroke(Stroke::new(1.0, Color32::BLACK))
            })
            .collect();

        Plot::new(format!("histogram_{}", figure.title))
            .x_axis_label(figure.x_label.as_str())
            .y_axis_label(figure.y_label.as_str())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&figure.x_label));
            });
    }

    fn draw_scatter(ui: &mut egui::Ui, figure: &Figure, points: &[[f64; 2]]) {
        let color = Color32::from_rgba_unmultiplied(31, 119, 180, 128);

        Plot::new(format!("scatter_{}", figure.title))
            .x_axis_label(figure.x_label.as_str())
            .y_axis_label(figure.y_label.as_str())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(color),
                );
            });
    }

    /// Cell (row, col) occupies x in [col, col + 1] and y in [-row - 1, -row],
    /// so the first column label sits at the top-left.
    fn draw_heatmap(ui: &mut egui::Ui, figure: &Figure, matrix: &CorrelationMatrix) {
        let n = matrix.len();
        let x_labels = matrix.labels.clone();
        let y_labels = matrix.labels.clone();

        let centers = move |_input: egui_plot::GridInput| -> Vec<GridMark> {
            (0..n)
                .map(|i| GridMark {
                    value: i as f64 + 0.5,
                    step_size: 1.0,
                })
                .collect()
        };
        let row_centers = move |_input: egui_plot::GridInput| -> Vec<GridMark> {
            (0..n)
                .map(|i| GridMark {
                    value: -(i as f64) - 0.5,
                    step_size: 1.0,
                })
                .collect()
        };

        Plot::new(format!("heatmap_{}", figure.title))
            .data_aspect(1.0)
            .show_grid(false)
            .allow_scroll(false)
            .x_grid_spacer(centers)
            .y_grid_spacer(row_centers)
            .x_axis_formatter(move |mark, _range| {
                let idx = (mark.value - 0.5).round();
                if idx >= 0.0 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(move |mark, _range| {
                let idx = (-mark.value - 0.5).round();
                if idx >= 0.0 {
                    y_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for row in 0..n {
                    for col in 0..n {
                        let value = matrix.get(row, col);
                        let (x0, x1) = (col as f64, col as f64 + 1.0);
                        let (y0, y1) = (-(row as f64) - 1.0, -(row as f64));

                        plot_ui.polygon(
                            Polygon::new(PlotPoints::new(vec![
                                [x0, y0],
                                [x1, y0],
                                [x1, y1],
                                [x0, y1],
                            ]))
                            .fill_color(Self::diverging_color(value))
                            .stroke(Stroke::new(0.5, Color32::WHITE)),
                        );

                        let text_color = if value.abs() > 0.7 {
                            Color32::WHITE
                        } else {
                            Color32::BLACK
                        };
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(x0 + 0.5, y0 + 0.5),
                                RichText::new(Self::annotation(value)).size(10.0),
                            )
                            .color(text_color),
                        );
                    }
                }
            });
    }
}
