//! Search Configuration
//!
//! All knobs of a search run in one serde struct, with YAML load/save and
//! up-front validation. The defaults are the reference 16-bit search: odd
//! integers, runs limited to three ones / two zeros, single-bit shift
//! correlation capped at 9, inner correlation required above 7, sixteen
//! symbols separated by more than 8 bits.
//!
//! The correlation and distance thresholds were tuned by trial for the
//! reference link; they are configuration, not constants.
//!
//! ## Example Configuration
//!
//! ```yaml
//! width: 16
//! start: 1
//! stride: 2
//! run_length:
//!   max_ones: 3
//!   max_zeros: 2
//! shift: 1
//! max_shift_correlation: 9
//! min_inner_correlation: 7
//! target_count: 16
//! distance_threshold: 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pipeline::CandidatePipeline;
use crate::run_length::RunLengthLimits;
use crate::selector::CodewordSelector;
use crate::sequence_space::{EnumerationStrategy, SequenceSpace};
use crate::types::{SearchError, SearchResult, MAX_WIDTH};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Validation(#[from] SearchError),
}

/// Parameters of one codeword search run.
///
/// Immutable for the duration of the run; every search is a pure function
/// of its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Sequence width in bits (1..=32, even).
    pub width: u8,
    /// First enumerated value.
    pub start: u32,
    /// Enumeration step; 2 with an odd start keeps a trailing one bit.
    pub stride: u32,
    /// Run-length limits.
    pub run_length: RunLengthLimits,
    /// Shift amount for the shift-correlation stage.
    pub shift: u8,
    /// Reject candidates whose shift correlation exceeds this score.
    pub max_shift_correlation: u32,
    /// Keep only candidates whose inner correlation exceeds this score.
    pub min_inner_correlation: u32,
    /// Number of data symbols that need codewords.
    pub target_count: usize,
    /// Codeword pairs must differ in strictly more than this many bits.
    pub distance_threshold: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            width: 16,
            start: 1,
            stride: 2,
            run_length: RunLengthLimits::default(),
            shift: 1,
            max_shift_correlation: 9,
            min_inner_correlation: 7,
            target_count: 16,
            distance_threshold: 8,
        }
    }
}

impl SearchConfig {
    /// Check every parameter against its documented range.
    pub fn validate(&self) -> SearchResult<()> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(SearchError::InvalidWidth(self.width));
        }
        if self.width % 2 != 0 {
            // The reference pipeline always carries an inner-correlation
            // stage, which needs equal halves.
            return Err(SearchError::OddWidth(self.width));
        }
        if self.stride == 0 {
            return Err(SearchError::ZeroStride);
        }
        if self.shift > self.width {
            return Err(SearchError::ShiftTooLarge {
                shift: self.shift,
                width: self.width,
            });
        }
        if self.max_shift_correlation > self.width as u32 {
            return Err(SearchError::ThresholdOutOfRange {
                name: "shift correlation",
                value: self.max_shift_correlation,
                max: self.width as u32,
            });
        }
        if self.min_inner_correlation > self.width as u32 / 2 {
            return Err(SearchError::ThresholdOutOfRange {
                name: "inner correlation",
                value: self.min_inner_correlation,
                max: self.width as u32 / 2,
            });
        }
        if self.distance_threshold > self.width as u32 {
            return Err(SearchError::ThresholdOutOfRange {
                name: "distance",
                value: self.distance_threshold,
                max: self.width as u32,
            });
        }
        Ok(())
    }

    /// The sequence space this configuration enumerates.
    pub fn space(&self) -> SearchResult<SequenceSpace> {
        SequenceSpace::new(
            self.width,
            EnumerationStrategy::Stride {
                start: self.start,
                stride: self.stride,
            },
        )
    }

    /// The reference filter pipeline for this configuration.
    pub fn pipeline(&self) -> CandidatePipeline {
        CandidatePipeline::reference(
            self.run_length,
            self.shift,
            self.max_shift_correlation,
            self.min_inner_correlation,
        )
    }

    /// The selector for this configuration.
    pub fn selector(&self) -> CodewordSelector {
        CodewordSelector::new(self.target_count, self.distance_threshold)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
