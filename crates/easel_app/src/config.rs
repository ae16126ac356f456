//! Sketch configuration
//!
//! Loaded from a TOML file; every field is optional:
//!
//! ```toml
//! title = "Orbits"
//! width = 1024
//! height = 768
//! frame_rate = 30.0
//! background = [18, 18, 24, 255]
//! log_filter = "easel_paint=debug"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EaselError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Window title
    pub title: String,
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    /// Frames per second for paced runs
    pub frame_rate: f32,
    /// RGBA8 color cleared before every `draw`; `None` keeps the last frame
    pub background: Option<[u8; 4]>,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            title: "Easel Sketch".to_string(),
            width: 800,
            height: 600,
            frame_rate: 60.0,
            background: None,
            log_filter: "info".to_string(),
        }
    }
}

impl SketchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SketchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded sketch config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EaselError::InvalidConfig(format!(
                "size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(EaselError::InvalidConfig(format!(
                "frame_rate must be > 0, got {}",
                self.frame_rate
            )));
        }
        Ok(())
    }

    /// Install the global subscriber, filtered by `RUST_LOG` or `log_filter`
    pub fn init_logging(&self) -> Result<()> {
        crate::logging::init_logging(&self.log_filter)
    }

    /// Time budget of one frame at `frame_rate`
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate))
    }
}
