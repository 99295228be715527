//! Moving-Deviation Shock Detector
//!
//! Tracks an exponentially weighted moving average of magnitude and an
//! exponentially weighted mean absolute deviation around it:
//!
//! ```text
//! avg ← (1 − α)·avg + α·magnitude
//! dev ← (1 − β)·dev + β·|magnitude − avg|      (uses the updated avg)
//! event ⇔ dev > threshold
//! ```
//!
//! The state is never reset, not even after a detection. While the
//! deviation stays elevated, every cycle reports an event; debouncing is
//! left to the caller (the capture state machine ignores detections while
//! a capture is in flight).

use crate::constants::detection::{
    DETECTION_THRESHOLD, DEVIATION_BETA, EMA_ALPHA, INITIAL_MOVING_AVERAGE, INITIAL_MOVING_DEVIATION,
};
use crate::errors::{positive_finite, ConfigError, ConfigResult};

/// Detector parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorConfig {
    /// Moving average smoothing factor α
    pub alpha: f32,

    /// Moving deviation smoothing factor β
    pub beta: f32,

    /// Deviation above which a cycle is an event
    pub threshold: f32,

    /// Seed of the moving average
    pub initial_average: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            alpha: EMA_ALPHA,
            beta: DEVIATION_BETA,
            threshold: DETECTION_THRESHOLD,
            initial_average: INITIAL_MOVING_AVERAGE,
        }
    }
}

impl DetectorConfig {
    /// Override the smoothing factors
    pub fn with_smoothing(mut self, alpha: f32, beta: f32) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Override the threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Override the moving average seed
    pub fn with_initial_average(mut self, initial_average: f32) -> Self {
        self.initial_average = initial_average;
        self
    }

    /// Check parameters are usable
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidSmoothing { name, value });
            }
        }
        if !positive_finite(self.threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold,
            });
        }
        Ok(())
    }
}

/// Running statistics
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorState {
    /// Moving average of magnitude
    pub moving_avg: f32,

    /// Moving mean absolute deviation of magnitude
    pub moving_dev: f32,
}

/// EMA / mean-absolute-deviation anomaly detector
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    config: DetectorConfig,
    state: DetectorState,
}

impl AnomalyDetector {
    /// Detector seeded from `config`
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            state: DetectorState {
                moving_avg: config.initial_average,
                moving_dev: INITIAL_MOVING_DEVIATION,
            },
            config,
        }
    }

    /// Fold one magnitude into the statistics and return the new deviation
    pub fn update(&mut self, magnitude: f32) -> f32 {
        let DetectorConfig { alpha, beta, .. } = self.config;
        let state = &mut self.state;

        state.moving_avg = (1.0 - alpha) * state.moving_avg + alpha * magnitude;
        state.moving_dev =
            (1.0 - beta) * state.moving_dev + beta * libm::fabsf(magnitude - state.moving_avg);

        state.moving_dev
    }

    /// True if `deviation` exceeds the threshold
    pub fn exceeds(&self, deviation: f32) -> bool {
        deviation > self.config.threshold
    }

    /// True if the current deviation exceeds the threshold
    pub fn is_triggered(&self) -> bool {
        self.exceeds(self.state.moving_dev)
    }

    /// Current statistics
    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Parameters in use
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
