//! Analysis configuration.
//!
//! Handles loading and validating an optional `bitplanes.toml`.
//! Every value has a default equal to the fixed constant the analysis has
//! always used, so running without a config file reproduces the classic
//! behaviour exactly.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! bit_depth = 8             # Only 8-bit grayscale is supported
//! threshold_cutoff = 127    # Global threshold: value > cutoff → 255
//! edge_low = 100.0          # Edge hysteresis: continue an edge
//! edge_high = 200.0         # Edge hysteresis: start an edge
//!
//! [preview]
//! width = 64                # Terminal columns for a single image preview
//! gallery_columns = 4       # Images per row in a gallery
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Bits per sample. The codec only handles 8.
pub const BIT_DEPTH: u32 = 8;
/// Default global threshold cutoff.
pub const DEFAULT_THRESHOLD_CUTOFF: u8 = 127;
/// Default lower hysteresis threshold for edge detection.
pub const DEFAULT_EDGE_LOW: f32 = 100.0;
/// Default upper hysteresis threshold for edge detection.
pub const DEFAULT_EDGE_HIGH: f32 = 200.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Analysis configuration loaded from a TOML file.
///
/// User config files need only specify the values they want to override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Bits per sample of the source image.
    pub bit_depth: u32,
    /// Samples strictly above this value threshold to 255.
    pub threshold_cutoff: u8,
    /// Edge-detector gradient magnitude needed to continue an edge.
    pub edge_low: f32,
    /// Edge-detector gradient magnitude needed to start an edge.
    pub edge_high: f32,
    /// Terminal preview layout.
    pub preview: PreviewConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bit_depth: BIT_DEPTH,
            threshold_cutoff: DEFAULT_THRESHOLD_CUTOFF,
            edge_low: DEFAULT_EDGE_LOW,
            edge_high: DEFAULT_EDGE_HIGH,
            preview: PreviewConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bit_depth != BIT_DEPTH {
            return Err(ConfigError::Validation(format!(
                "bit_depth must be {BIT_DEPTH}, got {}",
                self.bit_depth
            )));
        }
        if !self.edge_low.is_finite() || !self.edge_high.is_finite() {
            return Err(ConfigError::Validation(
                "edge_low and edge_high must be finite".into(),
            ));
        }
        if self.edge_low < 0.0 {
            return Err(ConfigError::Validation(
                "edge_low must not be negative".into(),
            ));
        }
        if self.edge_low > self.edge_high {
            return Err(ConfigError::Validation(
                "edge_low must not exceed edge_high".into(),
            ));
        }
        if self.preview.width == 0 {
            return Err(ConfigError::Validation(
                "preview.width must be non-zero".into(),
            ));
        }
        if self.preview.gallery_columns == 0 {
            return Err(ConfigError::Validation(
                "preview.gallery_columns must be non-zero".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Terminal preview layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Character columns used for a single image preview.
    pub width: usize,
    /// Number of images per row when showing a gallery.
    pub gallery_columns: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 64,
            gallery_columns: 4,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of images analyzed in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse config text and validate it.
///
/// Missing keys, including missing keys inside `[preview]` and
/// `[processing]`, take their defaults.
pub fn parse_config(text: &str) -> Result<AnalysisConfig, ConfigError> {
    let config: AnalysisConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load the analysis config.
///
/// With no path the stock defaults are returned. With a path the file must
/// exist; unknown keys are rejected and the result is validated.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    match path {
        Some(path) => parse_config(&fs::read_to_string(path)?),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Bitplanes Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# Bits per sample of the source image. Only 8 is supported.
bit_depth = 8

# Global thresholding: samples strictly above the cutoff become 255,
# everything else becomes 0.
threshold_cutoff = 127

# Edge detection hysteresis on the L1 Sobel magnitude (0-2040).
# A pixel above edge_high starts an edge; pixels above edge_low extend it.
edge_low = 100.0
edge_high = 200.0

# ---------------------------------------------------------------------------
# Terminal preview
# ---------------------------------------------------------------------------
[preview]
# Character columns used to draw a single image.
width = 64

# Images per row when drawing a gallery (bit planes, comparison methods).
gallery_columns = 4

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum images analyzed in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
