//! Data models for the results table and the stroke replay

pub mod column;
pub mod row;
pub mod stroke;

// Re-export commonly used types
pub use column::*;
pub use row::*;
pub use stroke::*;
