//! WorldMetrics - country indicator dashboard.
//!
//! This library exposes the core components for testing.

pub mod app;
pub mod args;
pub mod message;
pub mod mock;
pub mod request;
pub mod selection;
pub mod snapshot;
pub mod view;

// Re-export commonly used types
pub use app::WorldMetrics;
pub use message::Message;
