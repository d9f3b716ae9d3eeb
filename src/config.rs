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

//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::number::NumberDomain;
use crate::operator::Operator;
use crate::resolver::SearchLimits;

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Step is zero, negative, or not finite.
    #[error("step must be a positive finite number, got {0}")]
    InvalidStep(f64),
    /// Bounds are inverted or not finite.
    #[error("invalid bounds: minimum {minimum}, maximum {maximum}")]
    InvalidBounds { minimum: f64, maximum: f64 },
    /// The operator list is empty.
    #[error("at least one operator is required")]
    NoOperators,
    /// The `=` separator was listed as a usable operator.
    #[error("'=' is a separator and cannot be used as an operator")]
    SeparatorOperator,
    /// A search budget is zero.
    #[error("{0} must be greater than zero")]
    ZeroBudget(&'static str),
}

/// Settings for one [`crate::ExpressionResolver`].
///
/// Deserializes from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Global lower bound for every number.
    pub minimum: f64,
    /// Global upper bound for every number.
    pub maximum: f64,
    /// Quantization step.
    pub step: f64,
    /// Allowed computable operators.
    pub operators: Vec<Operator>,
    /// Attempts per resolution.
    pub max_attempts: usize,
    /// Wall-clock budget per resolution, in milliseconds.
    pub time_budget_ms: u64,
    /// How often a free operator order is replayed before giving up on it.
    pub operator_passes: usize,
    /// Seed for reproducible draws.
    pub seed: Option<u64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            minimum: 1.0,
            maximum: 10.0,
            step: 1.0,
            operators: Operator::COMPUTABLE.to_vec(),
            max_attempts: 8,
            time_budget_ms: 100,
            operator_passes: 2,
            seed: None,
        }
    }
}

impl ResolverConfig {
    /// Checks every field without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.domain()?;
        if self.operators.contains(&Operator::Eq) {
            return Err(ConfigError::SeparatorOperator);
        }
        if self.operators.is_empty() {
            return Err(ConfigError::NoOperators);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroBudget("max_attempts"));
        }
        if self.time_budget_ms == 0 {
            return Err(ConfigError::ZeroBudget("time_budget_ms"));
        }
        if self.operator_passes == 0 {
            return Err(ConfigError::ZeroBudget("operator_passes"));
        }
        Ok(())
    }

    /// Builds the numeric domain described by the bounds and step.
    pub fn domain(&self) -> Result<NumberDomain, ConfigError> {
        NumberDomain::new(self.minimum, self.maximum, self.step)
    }

    /// Wall-clock budget as a [`Duration`].
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Search limits applied to each resolution.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_attempts: self.max_attempts,
            time_budget: self.time_budget(),
            operator_passes: self.operator_passes,
        }
    }
}
