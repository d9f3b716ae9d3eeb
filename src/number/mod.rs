/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Numeric domain: quantization, tolerance equality, and the number supply.

mod range;
mod supply;

pub use range::RangeError;
pub use supply::{DrawRequest, NumberSupply};

use crate::config::ConfigError;

/// Absolute tolerance under which a value counts as zero.
pub const TOLERANCE: f64 = 1e-6;

/// Largest scaled bound, `2^53`: every step below it is exact in `f64` and
/// candidate counts cannot overflow `i64`.
const MAX_UNITS: f64 = 9_007_199_254_740_992.0;

/// Returns whether `value` is zero within [`TOLERANCE`].
pub fn is_zero(value: f64) -> bool {
    value.abs() < TOLERANCE
}

/// Tolerance equality over optional values.
///
/// Two unknown values compare equal, unknown against known does not.
pub fn is_equal(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => is_zero(a - b),
        _ => false,
    }
}

/// Value range and precision shared by every number in one puzzle run.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberDomain {
    minimum: f64,
    maximum: f64,
    step: f64,
    decimals: u32,
}

impl NumberDomain {
    /// Creates a domain over `[minimum, maximum]` quantized to `step`.
    pub fn new(minimum: f64, maximum: f64, step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidStep(step));
        }
        if !minimum.is_finite() || !maximum.is_finite() || minimum > maximum {
            return Err(ConfigError::InvalidBounds { minimum, maximum });
        }
        let domain = Self {
            minimum,
            maximum,
            step,
            decimals: decimals_of(step),
        };
        // Steps below the finest supported precision round to zero units.
        if domain.to_units(step) == 0 {
            return Err(ConfigError::InvalidStep(step));
        }
        let scale = domain.scale();
        if (minimum * scale).abs() > MAX_UNITS || (maximum * scale).abs() > MAX_UNITS {
            return Err(ConfigError::InvalidBounds { minimum, maximum });
        }
        Ok(domain)
    }

    /// Lower bound (inclusive).
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Upper bound (inclusive).
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Quantization step.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Decimal precision implied by the step (`0.25` -> 2, `10` -> 0).
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Quantizes `value` to the nearest multiple of the domain step.
    pub fn fix(&self, value: f64) -> f64 {
        self.quantize(value, self.step)
    }

    /// Quantizes `value` to the nearest multiple of a coarser `step`.
    ///
    /// Fails when `step` is finer than the domain step.
    pub fn fix_with_step(&self, value: f64, step: f64) -> Result<f64, RangeError> {
        if !step.is_finite() || (step < self.step && !is_zero(step - self.step)) {
            return Err(RangeError::StepTooFine {
                step,
                domain_step: self.step,
            });
        }
        Ok(self.quantize(value, step))
    }

    /// Renders `value` with the domain precision.
    pub fn format(&self, value: f64) -> String {
        self.format_with(value, self.decimals)
    }

    /// Renders `value` with an explicit number of decimals.
    pub fn format_with(&self, value: f64, decimals: u32) -> String {
        format!("{:.*}", decimals as usize, value)
    }

    /// `10^decimals`, the factor that turns domain values into integers.
    pub(crate) fn scale(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    /// Scaled integer form of a value at domain precision.
    pub(crate) fn to_units(&self, value: f64) -> i64 {
        (value * self.scale()).round() as i64
    }

    fn quantize(&self, value: f64, step: f64) -> f64 {
        let snapped = (value / step).round() * step;
        let scale = self.scale();
        let fixed = (snapped * scale).round() / scale;
        // Collapse -0.0 so formatting never shows a signed zero.
        if fixed == 0.0 {
            0.0
        } else {
            fixed
        }
    }
}

fn decimals_of(step: f64) -> u32 {
    let text = format!("{step:.10}");
    let trimmed = text.trim_end_matches('0');
    trimmed
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as u32)
}
