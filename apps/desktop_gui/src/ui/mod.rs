//! UI layer: the status panel shell.

pub mod app;

pub use app::StatusPanelApp;
