//! Rendering of comparison results to PNG figures.
//!
//! Each result entry becomes one figure: a horizontal strip holding
//! optional gold/compare panels, the difference panel, and an optional
//! histogram. Rendering goes through a staging directory so a failed run
//! never leaves a half-written output tree.

pub mod canvas;
pub mod error;
pub mod glyphs;
pub mod gradient;
pub mod output;
pub mod plot;
pub mod png;

pub use canvas::Canvas;
pub use error::{PlotError, Result};
pub use gradient::{Color, Colormap};
pub use output::OutputStage;
pub use plot::{plot_filename, render_entry, PlotOptions, PANEL_HEIGHT, PANEL_WIDTH};
