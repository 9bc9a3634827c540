//! Utility modules for error handling

pub mod error;

// Re-export for convenience
pub use error::VidgrabError;
