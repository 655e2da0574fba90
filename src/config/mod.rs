pub mod settings;

pub use settings::{
    load_settings, save_settings, PhysicsSettings, ViewerSettings, WindowSettings,
};
