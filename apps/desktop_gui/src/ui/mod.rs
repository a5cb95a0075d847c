//! UI layer for the desktop board: app shell, overlays and theme settings.

pub mod app;
pub mod theme;

pub use app::OrderBoardApp;
