// RDV-Rust: rigid-body demo viewer in Rust
// Declarative scenes over rapier3d, rendered with wgpu

pub mod app;
pub mod config;
pub mod demos;
pub mod interaction;
pub mod rendering;
pub mod scene;
pub mod utils;
pub mod world;

// Re-export commonly used types for convenience
pub use app::Session;
pub use config::{load_settings, save_settings, ViewerSettings};
pub use demos::DemoSpec;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
