//! Configuration
//!
//! Cup size and animation timings. Values come from an optional JSON file,
//! then from the environment, and are validated once at the end.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cup::DEFAULT_CAPACITY;
use crate::error::{CupError, Result};

/// Environment variable overriding [`CupConfig::capacity`]
pub const CAPACITY_ENV: &str = "DROMMEKOPP_CAPACITY";

/// Largest supported capacity: one slot per percent
pub const MAX_CAPACITY: usize = 100;

/// Timings handed to the renderer, in seconds unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay between consecutive new bands appearing
    pub enter_stagger_secs: f64,
    pub enter_duration_secs: f64,
    pub pour_fade_in_secs: f64,
    pub pour_fade_out_secs: f64,
    pub straw_rotation_deg: f64,
    pub straw_wiggle_secs: f64,
    pub straw_repeats: u32,
    pub fall_duration_secs: f64,
    /// Vertical distance of one slot in the cup drawing, in pixels
    pub slot_height_px: f64,
    pub fade_out_secs: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enter_stagger_secs: 0.3,
            enter_duration_secs: 1.2,
            pour_fade_in_secs: 1.0,
            pour_fade_out_secs: 2.0,
            straw_rotation_deg: 3.0,
            straw_wiggle_secs: 1.5,
            straw_repeats: 3,
            fall_duration_secs: 0.4,
            slot_height_px: 14.0,
            fade_out_secs: 0.5,
        }
    }
}

impl AnimationConfig {
    fn validate(&self) -> Result<()> {
        let timings = [
            ("enter_stagger_secs", self.enter_stagger_secs),
            ("enter_duration_secs", self.enter_duration_secs),
            ("pour_fade_in_secs", self.pour_fade_in_secs),
            ("pour_fade_out_secs", self.pour_fade_out_secs),
            ("straw_wiggle_secs", self.straw_wiggle_secs),
            ("fall_duration_secs", self.fall_duration_secs),
            ("slot_height_px", self.slot_height_px),
            ("fade_out_secs", self.fade_out_secs),
        ];

        for (name, value) in timings {
            if !value.is_finite() || value < 0.0 {
                return Err(CupError::InvalidConfig {
                    reason: format!("{name} must be finite and not negative, got {value}"),
                });
            }
        }

        if !self.straw_rotation_deg.is_finite() {
            return Err(CupError::InvalidConfig {
                reason: "straw_rotation_deg must be finite".to_string(),
            });
        }

        Ok(())
    }
}

/// Builder session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CupConfig {
    /// Number of layer slots in the cup
    pub capacity: usize,
    pub animation: AnimationConfig,
}

impl Default for CupConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            animation: AnimationConfig::default(),
        }
    }
}

impl CupConfig {
    /// Load configuration from an optional file plus the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                info!("No config file given, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| CupError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// [`CupConfig::load`])
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(CAPACITY_ENV) {
            let capacity = raw.trim().parse::<usize>().map_err(|e| {
                warn!("Invalid {CAPACITY_ENV} value '{raw}': {e}");
                CupError::InvalidConfig {
                    reason: format!("{CAPACITY_ENV} is not a slot count: '{raw}'"),
                }
            })?;
            info!("{CAPACITY_ENV} set, using capacity {capacity}");
            self.capacity = capacity;
        }
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(CupError::InvalidConfig {
                reason: format!(
                    "capacity must be between 1 and {MAX_CAPACITY}, got {}",
                    self.capacity
                ),
            });
        }
        self.animation.validate()
    }
}
