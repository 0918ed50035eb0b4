//! Figure Window
//! Shows the exploratory figures one at a time; each stays up until the user moves on.

use crate::charts::{ChartPlotter, Figure};
use egui::{RichText, TopBottomPanel};
use log::info;

/// Main application window.
pub struct FigureWindow {
    figures: Vec<Figure>,
    current: usize,
}

impl FigureWindow {
    pub fn new(_cc: &eframe::CreationContext<'_>, figures: Vec<Figure>) -> Self {
        if let Some(first) = figures.first() {
            info!("Showing figure 1/{}: {}", figures.len(), first.title);
        }
        Self {
            figures,
            current: 0,
        }
    }

    fn is_last(&self) -> bool {
        self.current + 1 >= self.figures.len()
    }

    fn advance(&mut self) {
        self.current += 1;
        if let Some(figure) = self.figures.get(self.current) {
            info!(
                "Showing figure {}/{}: {}",
                self.current + 1,
                self.figures.len(),
                figure.title
            );
        }
    }
}

impl eframe::App for FigureWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let total = self.figures.len();

        TopBottomPanel::bottom("figure_controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Figure {} of {}", self.current + 1, total)).size(13.0),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.is_last() {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    } else if ui.button("Next").clicked() {
                        self.advance();
                    }
                });
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(figure) = self.figures.get(self.current) {
                ChartPlotter::draw(ui, figure);
            }
        });
    }
}
