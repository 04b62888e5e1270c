//! 4th order IIR filter over Q16.16 samples.

use crate::config::FilterCoefficients;
use crate::constants::TAPS;
use crate::fixed;

/// Direct-form difference-equation filter
///
/// ```text
/// y[n] = sum(b[i] * x[n-i], i = 0..4) - sum(a[i] * y[n-i], i = 1..4)
/// ```
///
/// Each product goes through [`fixed::mul`], the nine products are summed in
/// 64 bits and the sum is truncated to 32 bits. History starts at zero, so the
/// first four outputs carry the same cold-start transient as the hardware.
#[derive(Debug, Clone)]
pub struct IirFilter {
    coeff: FilterCoefficients,
    /// `x[n-1]..x[n-4]`, most recent first
    x_hist: [i32; TAPS - 1],
    /// `y[n-1]..y[n-4]`, most recent first
    y_hist: [i32; TAPS - 1],
}

impl IirFilter {
    /// Create a filter with zeroed history
    #[must_use]
    pub const fn new(coeff: FilterCoefficients) -> Self {
        Self {
            coeff,
            x_hist: [0; TAPS - 1],
            y_hist: [0; TAPS - 1],
        }
    }

    /// Filter one sample, advancing the history by one
    #[inline]
    pub fn filter(&mut self, sample: i32) -> i32 {
        let FilterCoefficients { b, a } = &self.coeff;

        let mut acc = i64::from(fixed::mul(b[0], sample));
        for i in 1..TAPS {
            acc += i64::from(fixed::mul(b[i], self.x_hist[i - 1]));
            acc -= i64::from(fixed::mul(a[i], self.y_hist[i - 1]));
        }
        let out = acc as i32;

        self.x_hist.rotate_right(1);
        self.x_hist[0] = sample;
        self.y_hist.rotate_right(1);
        self.y_hist[0] = out;

        out
    }

    /// Filter a whole slice from the current state
    pub fn filter_all(&mut self, samples: &[i32]) -> Vec<i32> {
        samples.iter().map(|&s| self.filter(s)).collect()
    }

    /// Coefficients this filter was built with
    #[must_use]
    pub const fn coefficients(&self) -> &FilterCoefficients {
        &self.coeff
    }
}

impl Default for IirFilter {
    fn default() -> Self {
        Self::new(FilterCoefficients::hardware())
    }
}
