use std::path::Path;

use anyhow::Context;
use pushbox_physics::PushConfig;
use serde::Deserialize;

use crate::script::Keyframe;

/// Configuration loaded from a TOML file
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PushboxConfig {
    #[serde(default)]
    pub push: PushConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Scripted manipulator keyframes; empty means the built-in script
    #[serde(default)]
    pub script: Vec<Keyframe>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Fixed physics timestep in seconds
    #[serde(default = "default_timestep")]
    pub timestep: f32,
    /// Render frame rate driving the input cadence
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    /// Total simulated time in seconds
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default = "default_box_half_extent")]
    pub box_half_extent: f32,
    #[serde(default = "default_floor_half_extent")]
    pub floor_half_extent: f32,
}

fn default_timestep() -> f32 {
    0.02 // 50 Hz
}

fn default_frame_rate() -> f32 {
    72.0
}

fn default_duration() -> f32 {
    6.0
}

fn default_box_half_extent() -> f32 {
    0.5
}

fn default_floor_half_extent() -> f32 {
    50.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: default_timestep(),
            frame_rate: default_frame_rate(),
            duration: default_duration(),
            box_half_extent: default_box_half_extent(),
            floor_half_extent: default_floor_half_extent(),
        }
    }
}

impl PushboxConfig {
    /// Check everything the simulation divides by or loops over
    pub fn validate(&self) -> anyhow::Result<()> {
        self.push.validate()?;

        let sim = &self.simulation;
        for (name, value) in [
            ("timestep", sim.timestep),
            ("frame_rate", sim.frame_rate),
            ("duration", sim.duration),
            ("box_half_extent", sim.box_half_extent),
            ("floor_half_extent", sim.floor_half_extent),
        ] {
            anyhow::ensure!(value.is_finite(), "simulation.{name} must be finite, got {value}");
        }
        anyhow::ensure!(sim.timestep > 0.0, "simulation.timestep must be positive");
        anyhow::ensure!(sim.frame_rate > 0.0, "simulation.frame_rate must be positive");
        anyhow::ensure!(sim.duration >= 0.0, "simulation.duration must not be negative");
        anyhow::ensure!(
            sim.box_half_extent > 0.0,
            "simulation.box_half_extent must be positive"
        );
        anyhow::ensure!(
            sim.floor_half_extent > 0.0,
            "simulation.floor_half_extent must be positive"
        );
        Ok(())
    }
}

/// Parse a configuration from TOML text
pub fn parse_config(text: &str) -> anyhow::Result<PushboxConfig> {
    let config: PushboxConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> anyhow::Result<PushboxConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.push, PushConfig::default());
        assert_eq!(config.simulation.timestep, 0.02);
        assert!(config.script.is_empty());
    }

    #[test]
    fn test_partial_tables() {
        let config = parse_config(
            r#"
            [push]
            box_mass = 4.0

            [simulation]
            duration = 1.5

            [[script]]
            at = 0.0
            position = [0.0, 1.0, -1.0]
            press = true
            direction = [0.0, 1.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.push.box_mass, 4.0);
        assert_eq!(config.push.push_force, 100.0);
        assert_eq!(config.simulation.duration, 1.5);
        assert_eq!(config.script.len(), 1);
        assert!(config.script[0].press);
    }

    #[test]
    fn test_invalid_mass_is_rejected() {
        let err = parse_config("[push]\nbox_mass = 0.0").unwrap_err();
        assert!(err.to_string().contains("box_mass"), "{err}");
    }

    #[test]
    fn test_non_finite_simulation_values_are_rejected() {
        let fields = [
            "timestep",
            "frame_rate",
            "duration",
            "box_half_extent",
            "floor_half_extent",
        ];
        for field in fields {
            for value in ["inf", "nan"] {
                let text = format!("[simulation]\n{field} = {value}");
                let err = parse_config(&text).unwrap_err();
                assert!(err.to_string().contains(field), "{field} = {value}: {err}");
            }
        }
    }

    #[test]
    fn test_cli_style_override_is_revalidated() {
        let mut config = PushboxConfig::default();
        config.simulation.frame_rate = f32::INFINITY;
        assert!(config.validate().is_err());
        assert!(crate::Simulation::new(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nframe_rate = 90.0").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.simulation.frame_rate, 90.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/pushbox.toml")).is_err());
    }

    #[test]
    fn test_shipped_config_parses() {
        let text = include_str!("../config.toml");
        let config = parse_config(text).unwrap();
        assert_eq!(config.script.len(), 4);
    }
}
