//! Tunable constants of the clash pipeline.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Thresholds and execution settings for clash detection.
///
/// Lengths are in model length units, volumes in model volume units.
///
/// ```toml
/// volume_epsilon = 1e-6
/// area_precision = 5
/// time_budget_ms = 30000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClashConfig {
    /// Intersection volume above which two solids overlap.
    pub volume_epsilon: f64,
    /// Decimal places used when comparing union and summed surface areas.
    pub area_precision: u32,
    /// Margin by which bounding boxes must overlap to survive the broad
    /// phase when looking for intersections.
    ///
    /// Pairs overlapping by less than this on any axis are never evaluated,
    /// even when their intersection volume exceeds `volume_epsilon`: two
    /// 10 × 10 slabs overlapping by `5e-8` in height share `5e-6` of volume.
    /// Set it to `0.0` to keep every overlap down to shared faces.
    pub overlap_tolerance: f64,
    /// Gap up to which bounding boxes still count as touching when looking
    /// for touching pairs.
    pub contact_tolerance: f64,
    /// Growth applied to the outer box in the containment test.
    pub containment_tolerance: f64,
    /// Deepest instance nesting the extractor will follow.
    pub max_instance_depth: usize,
    /// Wall-clock budget for one detection run, unbounded if absent.
    pub time_budget_ms: Option<u64>,
    /// Distribute pair tests over the rayon pool.
    pub parallel: bool,
}

impl Default for ClashConfig {
    fn default() -> Self {
        Self {
            volume_epsilon: 1e-6,
            area_precision: 5,
            overlap_tolerance: 1e-7,
            contact_tolerance: 1e-7,
            containment_tolerance: 1e-3,
            max_instance_depth: 64,
            time_budget_ms: None,
            parallel: true,
        }
    }
}

impl ClashConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or a value is out of range.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or holds
    /// an out-of-range value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.volume_epsilon.is_finite() && self.volume_epsilon > 0.0) {
            return Err(ConfigError::Invalid {
                field: "volume_epsilon",
                reason: format!("{} is not a positive number", self.volume_epsilon),
            });
        }
        for (field, value) in [
            ("overlap_tolerance", self.overlap_tolerance),
            ("contact_tolerance", self.contact_tolerance),
            ("containment_tolerance", self.containment_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a non-negative number"),
                });
            }
        }
        if self.area_precision > 12 {
            return Err(ConfigError::Invalid {
                field: "area_precision",
                reason: format!("{} decimal places exceed f64 precision", self.area_precision),
            });
        }
        Ok(())
    }

    /// The time budget as a duration.
    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}
