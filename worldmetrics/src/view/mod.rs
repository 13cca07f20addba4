//! View components for the WorldMetrics application.

pub mod chart;
pub mod controls;
pub mod dashboard;
pub mod downloads;
pub mod formatting;
pub mod theme;
