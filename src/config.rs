use anyhow::Result;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete demo configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemoConfig {
    pub camera: CameraConfigData,
    pub world: WorldConfigData,
    pub assets: AssetConfigData,
}

impl DemoConfig {
    /// Load configuration from JSON file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: DemoConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file with pretty formatting
    pub fn save(&self, path: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_default(path: &str) -> Self {
        Self::load(path).unwrap_or_else(|_| {
            let config = Self::default();
            let _ = config.save(path);
            config
        })
    }
}

/// Camera configuration (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfigData {
    #[serde(with = "vec3_serde")]
    pub position: Vec3,

    #[serde(default, with = "opt_vec3_serde")]
    pub look_at: Option<Vec3>,

    /// Field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfigData {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            look_at: Some(Vec3::ZERO),
            fov: 45.0,
            aspect: 16.0 / 9.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

/// Physics and stepping configuration (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfigData {
    #[serde(with = "vec3_serde")]
    pub gravity: Vec3,

    /// Fixed timestep for the demo loop, in seconds
    pub timestep: f32,
}

impl Default for WorldConfigData {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// Asset paths used by the demo scenes (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfigData {
    pub surface_texture: String,
    pub background: String,
    pub model: String,
}

impl Default for AssetConfigData {
    fn default() -> Self {
        Self {
            surface_texture: "content/textures/wood.png".to_string(),
            background: "content/textures/sky.png".to_string(),
            model: "content/models/crate.obj".to_string(),
        }
    }
}

/// Custom serialization for Vec3
mod vec3_serde {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    pub(super) struct Vec3Data {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    pub fn serialize<S>(vec: &Vec3, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Vec3Data {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = Vec3Data::deserialize(deserializer)?;
        Ok(Vec3::new(data.x, data.y, data.z))
    }
}

/// Custom serialization for Option<Vec3>
mod opt_vec3_serde {
    use super::vec3_serde::Vec3Data;
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(vec: &Option<Vec3>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        vec.map(|v| Vec3Data {
            x: v.x,
            y: v.y,
            z: v.z,
        })
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec3>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = Option::<Vec3Data>::deserialize(deserializer)?;
        Ok(data.map(|d| Vec3::new(d.x, d.y, d.z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert_eq!(config.camera.position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(config.world.gravity.y, -9.81);
    }

    #[test]
    fn test_save_load() {
        let config = DemoConfig::default();
        let path = "test_demo_config.json";

        config.save(path).unwrap();
        let loaded = DemoConfig::load(path).unwrap();

        assert_eq!(loaded.camera.fov, config.camera.fov);
        assert_eq!(loaded.world.timestep, config.world.timestep);

        // Cleanup
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_vec3_serializes_by_field() {
        let config = DemoConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"x\":5.0"));
    }
}
