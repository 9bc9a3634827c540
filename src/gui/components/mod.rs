//! GUI components

pub mod progress_bar;
pub mod quality_menu;
pub mod url_input;

// Re-export for convenience
pub use progress_bar::progress_bar;
pub use quality_menu::quality_menu;
pub use url_input::url_input;
