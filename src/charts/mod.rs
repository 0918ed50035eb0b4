//! Charts module - Figure data and rendering

mod figures;
mod plotter;

pub use figures::{Figure, FigureKind};
pub use plotter::ChartPlotter;
