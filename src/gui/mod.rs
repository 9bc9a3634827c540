//! GUI module

pub mod app;
pub mod components;
pub mod theme;
pub mod views;

// Re-export for convenience
pub use app::Message;
pub use app::VidgrabApp;
