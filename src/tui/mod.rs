//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the stroke screening form and the risk result view.

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::ClinicalTheme;
