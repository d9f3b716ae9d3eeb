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

//! Random number supply with usage statistics.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::{NumberDomain, RangeError, TOLERANCE, is_zero};

/// Default wall-clock ceiling for one draw.
const DEFAULT_DRAW_BUDGET: Duration = Duration::from_millis(100);

/// How many candidates are enumerated between clock checks.
const CLOCK_CHECK_INTERVAL: usize = 256;

/// Constraints for one [`NumberSupply::next`] draw.
///
/// Bounds are intersected with the supply's own domain. Every constraint
/// is optional; a default request draws any domain value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub(crate) minimum: Option<f64>,
    pub(crate) maximum: Option<f64>,
    pub(crate) divisible_by: Option<f64>,
    pub(crate) divides: Option<f64>,
    pub(crate) zero_allowed: bool,
}

impl Default for DrawRequest {
    fn default() -> Self {
        Self {
            minimum: None,
            maximum: None,
            divisible_by: None,
            divides: None,
            zero_allowed: true,
        }
    }
}

impl DrawRequest {
    /// Creates an unconstrained request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an inclusive lower bound.
    pub fn minimum(mut self, value: f64) -> Self {
        self.minimum = Some(value);
        self
    }

    /// Sets an inclusive upper bound.
    pub fn maximum(mut self, value: f64) -> Self {
        self.maximum = Some(value);
        self
    }

    /// Restricts candidates to multiples of `value`.
    ///
    /// A zero divisor means no extra constraint.
    pub fn divisible_by(mut self, value: f64) -> Self {
        self.divisible_by = Some(value);
        self
    }

    /// Restricts candidates to values that divide `value` exactly at
    /// domain precision.
    pub fn divides(mut self, value: f64) -> Self {
        self.divides = Some(value);
        self
    }

    /// Excludes zero from the candidates.
    pub fn non_zero(mut self) -> Self {
        self.zero_allowed = false;
        self
    }
}

/// Draws quantized numbers inside a [`NumberDomain`].
///
/// The supply owns its random generator and the usage counters fed by
/// [`NumberSupply::fly_back`]. Counters never influence correctness.
#[derive(Debug, Clone)]
pub struct NumberSupply {
    domain: NumberDomain,
    rng: ChaCha8Rng,
    draw_budget: Duration,
    usage: BTreeMap<String, usize>,
}

impl NumberSupply {
    /// Creates a supply seeded from system entropy.
    pub fn new(domain: NumberDomain) -> Self {
        Self::with_rng(domain, ChaCha8Rng::from_entropy())
    }

    /// Creates a supply with a reproducible draw sequence.
    pub fn with_seed(domain: NumberDomain, seed: u64) -> Self {
        Self::with_rng(domain, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(domain: NumberDomain, rng: ChaCha8Rng) -> Self {
        Self {
            domain,
            rng,
            draw_budget: DEFAULT_DRAW_BUDGET,
            usage: BTreeMap::new(),
        }
    }

    /// Overrides the wall-clock ceiling of a single draw.
    pub fn with_draw_budget(mut self, budget: Duration) -> Self {
        self.draw_budget = budget;
        self
    }

    /// Returns the domain numbers are drawn from.
    pub fn domain(&self) -> &NumberDomain {
        &self.domain
    }

    /// Draws one value uniformly among the candidates allowed by `request`.
    pub fn next(&mut self, request: DrawRequest) -> Result<f64, RangeError> {
        let minimum = request
            .minimum
            .map_or(self.domain.minimum(), |m| m.max(self.domain.minimum()));
        let maximum = request
            .maximum
            .map_or(self.domain.maximum(), |m| m.min(self.domain.maximum()));
        if minimum > maximum && !is_zero(minimum - maximum) {
            return Err(RangeError::EmptyRange { minimum, maximum });
        }

        let unit = self.unit(request.divisible_by)?;
        let scale = self.domain.scale();
        // Candidates are `k * unit` for every integer k in [first, last].
        let first = ((minimum * scale) / unit as f64 - TOLERANCE).ceil() as i64;
        let last = ((maximum * scale) / unit as f64 + TOLERANCE).floor() as i64;
        let no_candidate = RangeError::NoCandidate { minimum, maximum };
        if first > last {
            return Err(no_candidate);
        }

        let picked = match request.divides {
            None => self.pick_multiple(first, last, request.zero_allowed),
            // Every non-zero value divides zero.
            Some(target) if is_zero(target) => self.pick_multiple(first, last, false),
            Some(target) => self.pick_divisor(first, last, unit, target)?,
        };
        let k = picked.ok_or(no_candidate)?;
        Ok(self.domain.fix(k as f64 * unit as f64 / scale))
    }

    /// Records one accepted use of `value`.
    pub fn fly_back(&mut self, value: f64) {
        let key = self.domain.format(value);
        *self.usage.entry(key).or_insert(0) += 1;
    }

    /// Returns how often `value` was flown back.
    pub fn usage(&self, value: f64) -> usize {
        self.usage
            .get(&self.domain.format(value))
            .copied()
            .unwrap_or(0)
    }

    /// Usage counters keyed by formatted value, most used first.
    pub fn statistics(&self) -> Vec<(String, usize)> {
        let mut stats: Vec<(String, usize)> = self
            .usage
            .iter()
            .map(|(value, count)| (value.clone(), *count))
            .collect();
        // BTreeMap order breaks count ties deterministically.
        stats.sort_by(|a, b| b.1.cmp(&a.1));
        stats
    }

    /// Scaled size of one candidate increment.
    fn unit(&self, divisible_by: Option<f64>) -> Result<i64, RangeError> {
        let step_units = self.domain.to_units(self.domain.step());
        let Some(divisor) = divisible_by.filter(|d| !is_zero(*d)) else {
            return Ok(step_units);
        };
        let divisor = divisor.abs();
        let raw = divisor * self.domain.scale();
        let units = raw.round() as i64;
        if (raw - raw.round()).abs() > TOLERANCE || units == 0 || units % step_units != 0 {
            return Err(RangeError::IndivisibleStep {
                divisor,
                step: self.domain.step(),
            });
        }
        Ok(units)
    }

    fn pick_multiple(&mut self, first: i64, last: i64, zero_allowed: bool) -> Option<i64> {
        let spans_zero = first <= 0 && last >= 0;
        let mut count = last - first + 1;
        if !zero_allowed && spans_zero {
            count -= 1;
        }
        if count <= 0 {
            return None;
        }
        let mut k = first + self.rng.gen_range(0..count);
        // Skip over the zero slot instead of redrawing.
        if !zero_allowed && spans_zero && k >= 0 {
            k += 1;
        }
        Some(k)
    }

    /// Picks `k` in `[first, last]` such that `k * unit` divides `target`
    /// with a quotient on the step grid.
    ///
    /// Only divisors of the target are enumerated, so the work is bounded by
    /// the target and not by the domain width.
    fn pick_divisor(
        &mut self,
        first: i64,
        last: i64,
        unit: i64,
        target: f64,
    ) -> Result<Option<i64>, RangeError> {
        let started = Instant::now();
        let scale = self.domain.scale() as i128;
        let step_units = self.domain.to_units(self.domain.step()) as i128;
        let dividend = (self.domain.to_units(target) as i128 * scale).abs();
        // `k * grain` must divide the dividend, so `k` divides `cofactor`.
        let grain = unit as i128 * step_units;
        if dividend % grain != 0 {
            return Ok(None);
        }
        let cofactor = dividend / grain;

        let mut matches = Vec::new();
        let mut push = |k: i128| {
            for signed in [k, -k] {
                if (first as i128..=last as i128).contains(&signed) {
                    matches.push(signed as i64);
                }
            }
        };
        let mut k: i128 = 1;
        while k * k <= cofactor {
            if k as usize % CLOCK_CHECK_INTERVAL == 1 && started.elapsed() >= self.draw_budget {
                return Err(RangeError::Timeout {
                    budget: self.draw_budget,
                });
            }
            if cofactor % k == 0 {
                push(k);
                if k * k != cofactor {
                    push(cofactor / k);
                }
            }
            k += 1;
        }
        Ok(matches.choose(&mut self.rng).copied())
    }
}
