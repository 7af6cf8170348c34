//! Configuration loading for Anveshak

use crate::core::Cell;
use crate::error::{AnveshakError, Result};
use serde::Deserialize;
use std::path::Path;

/// Engine configuration for one episode
#[derive(Clone, Debug, Deserialize)]
pub struct AgentConfig {
    /// Side length of the square world (default: 4)
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    /// Per-cell pit prior (default: 0.2)
    #[serde(default = "default_pit_prior")]
    pub pit_prior: f64,

    /// Per-cell wumpus prior (default: 1 / grid_size)
    #[serde(default)]
    pub wumpus_prior: Option<f64>,

    /// Give up exploring once every frontier is riskier than this (default: 0.5)
    #[serde(default = "default_risk_threshold")]
    pub risk_threshold: f64,

    /// Largest coupled variable set solved by exact enumeration (default: 20)
    #[serde(default = "default_max_exact_variables")]
    pub max_exact_variables: usize,

    /// Start and exit cell (default: (0, 0))
    #[serde(default)]
    pub origin: Cell,
}

// Default value functions
fn default_grid_size() -> usize {
    4
}
fn default_pit_prior() -> f64 {
    0.2
}
fn default_risk_threshold() -> f64 {
    0.5
}
fn default_max_exact_variables() -> usize {
    20
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            pit_prior: default_pit_prior(),
            wumpus_prior: None,
            risk_threshold: default_risk_threshold(),
            max_exact_variables: default_max_exact_variables(),
            origin: Cell::default(),
        }
    }
}

impl AgentConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnveshakError::Config(format!("Failed to read config file: {}", e)))?;
        let config: AgentConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Wumpus prior, falling back to one expected instance per row.
    pub fn effective_wumpus_prior(&self) -> f64 {
        self.wumpus_prior
            .unwrap_or(1.0 / self.grid_size.max(1) as f64)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            return Err(AnveshakError::InvalidGrid(self.grid_size));
        }
        for (name, p) in [
            ("pit_prior", self.pit_prior),
            ("wumpus_prior", self.effective_wumpus_prior()),
        ] {
            if !(p > 0.0 && p < 1.0) {
                return Err(AnveshakError::Config(format!(
                    "{name} must be in (0, 1), got {p}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.risk_threshold) {
            return Err(AnveshakError::Config(format!(
                "risk_threshold must be in [0, 1], got {}",
                self.risk_threshold
            )));
        }
        if self.max_exact_variables == 0 || self.max_exact_variables >= usize::BITS as usize {
            return Err(AnveshakError::Config(format!(
                "max_exact_variables must be in 1..{}, got {}",
                usize::BITS,
                self.max_exact_variables
            )));
        }
        if self.origin.row >= self.grid_size || self.origin.col >= self.grid_size {
            return Err(AnveshakError::CellOutOfBounds {
                cell: self.origin,
                size: self.grid_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_validate() {
        let config = AgentConfig::default();
        config.validate().unwrap();
        assert_relative_eq!(config.effective_wumpus_prior(), 0.25);
        assert_relative_eq!(config.risk_threshold, 0.5);
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "grid_size = 6\nrisk_threshold = 0.3").unwrap();

        let config = AgentConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_size, 6);
        assert_relative_eq!(config.risk_threshold, 0.3);
        assert_relative_eq!(config.pit_prior, 0.2);
        assert_relative_eq!(config.effective_wumpus_prior(), 1.0 / 6.0);
        assert_eq!(config.origin, Cell::new(0, 0));
    }

    #[test]
    fn test_load_origin_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "wumpus_prior = 0.1\n[origin]\nrow = 1\ncol = 2").unwrap();

        let config = AgentConfig::load(file.path()).unwrap();
        assert_eq!(config.origin, Cell::new(1, 2));
        assert_relative_eq!(config.effective_wumpus_prior(), 0.1);
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pit_prior = 1.5").unwrap();
        assert!(matches!(
            AgentConfig::load(file.path()),
            Err(AnveshakError::Config(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "grid_size = \"big\"").unwrap();
        assert!(matches!(
            AgentConfig::load(file.path()),
            Err(AnveshakError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AgentConfig::load(Path::new("/nonexistent/anveshak.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_origin_must_be_on_grid() {
        let config = AgentConfig {
            origin: Cell::new(4, 0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnveshakError::CellOutOfBounds { .. })
        ));
    }
}
