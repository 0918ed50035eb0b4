//! GUI module - Native figure window

mod app;

pub use app::FigureWindow;

use crate::charts::Figure;
use eframe::egui;

/// Open the figure window and block until it is closed.
pub fn show_figures(figures: Vec<Figure>) -> eframe::Result<()> {
    if figures.is_empty() {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("NY Tax Statistics"),
        ..Default::default()
    };

    eframe::run_native(
        "NY Tax Statistics",
        options,
        Box::new(|cc| Ok(Box::new(FigureWindow::new(cc, figures)))),
    )
}
