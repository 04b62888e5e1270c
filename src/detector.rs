//! Threshold spike detector with warm-up window and refractory suppression.

use crate::config::DetectorConfig;
use crate::fixed;

/// Stateful spike detector
///
/// Detection is disabled for the first `window_size` samples. After a spike
/// the next `refractory_period` samples are never flagged, whatever their
/// amplitude.
#[derive(Debug, Clone)]
pub struct SpikeDetector {
    config: DetectorConfig,
    /// Index the next call to [`SpikeDetector::push`] will use
    next_index: usize,
    refractory: u32,
}

impl SpikeDetector {
    /// Create a detector in its reset state
    #[must_use]
    pub const fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            next_index: 0,
            refractory: 0,
        }
    }

    /// Classify the filtered sample at `index`
    ///
    /// Calls must be made in increasing index order. Samples inside the
    /// warm-up window leave the detector state untouched.
    pub fn detect(&mut self, sample: i32, index: usize) -> bool {
        self.next_index = index.saturating_add(1);

        if index < self.config.window_size {
            return false;
        }
        if self.refractory > 0 {
            self.refractory -= 1;
            return false;
        }
        // Threshold is an exact multiple of 2^-16, so comparing raw magnitudes
        // gives the same answer as comparing real values. A negative threshold
        // is below every magnitude.
        if i64::from(fixed::magnitude(sample)) > i64::from(self.config.threshold) {
            self.refractory = self.config.refractory_period;
            return true;
        }
        false
    }

    /// Classify the next sample, tracking the index internally
    pub fn push(&mut self, sample: i32) -> bool {
        self.detect(sample, self.next_index)
    }

    /// Samples left in the current refractory window
    #[must_use]
    pub const fn refractory_remaining(&self) -> u32 {
        self.refractory
    }

    /// Detector parameters
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl Default for SpikeDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
