use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// World gravity vector in m/s².
    pub gravity: [f32; 3],
    /// Fixed simulation timestep in seconds.
    pub timestep: f32,
    /// Contact stiffness (the engine's natural-frequency form of the
    /// error-reduction knob).
    pub contact_natural_frequency: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            timestep: 1.0 / 60.0,
            contact_natural_frequency: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    pub window: WindowSettings,
    pub physics: PhysicsSettings,
    /// Name of the demo to run, see `demos::builtin`.
    pub demo: String,
    /// When set, ticks are coalesced so at most one runs per 1/fps interval.
    pub target_fps: Option<f32>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            physics: PhysicsSettings::default(),
            demo: "motor-hinge".to_string(),
            target_fps: None,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rdv-rust").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Load settings from the platform config directory, falling back to defaults.
pub fn load_settings() -> ViewerSettings {
    let Some(path) = config_path() else {
        return ViewerSettings::default();
    };

    match fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}, using defaults", path, e);
                ViewerSettings::default()
            }
        },
        Err(_) => ViewerSettings::default(),
    }
}

/// Persist settings to the platform config directory.
pub fn save_settings(settings: &ViewerSettings) -> anyhow::Result<()> {
    let path =
        config_path().ok_or_else(|| anyhow::anyhow!("no config directory on this platform"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(settings)?;
    fs::write(&path, contents)?;
    info!("Saved settings to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let original = ViewerSettings {
            window: WindowSettings {
                width: 800,
                height: 600,
            },
            physics: PhysicsSettings {
                gravity: [0.0, -3.71, 0.0],
                timestep: 1.0 / 120.0,
                contact_natural_frequency: 20.0,
            },
            demo: "box-drop".to_string(),
            target_fps: Some(30.0),
        };

        let serialized = toml::to_string(&original).unwrap();
        let restored: ViewerSettings = toml::from_str(&serialized).unwrap();

        assert_eq!(restored.window.width, original.window.width);
        assert_eq!(restored.window.height, original.window.height);
        assert_eq!(restored.physics.gravity, original.physics.gravity);
        assert_eq!(restored.physics.timestep, original.physics.timestep);
        assert_eq!(restored.demo, original.demo);
        assert_eq!(restored.target_fps, original.target_fps);
    }

    #[test]
    fn test_defaults() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.physics.gravity[1], -9.81);
        assert_eq!(settings.demo, "motor-hinge");
        assert!(settings.target_fps.is_none());
    }
}
