pub mod render;

// Re-export for the CLI and tests
pub use render::{parse_u32, render, OutputFormat};
