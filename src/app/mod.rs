pub mod session;
pub mod viewer;

pub use session::Session;
pub use viewer::{run, Viewer};
