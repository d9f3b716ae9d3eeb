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

//! Failures raised when a numeric constraint cannot be met.

use std::time::Duration;
use thiserror::Error;

/// A number draw or quantization request that the domain cannot satisfy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// The effective bounds are inverted.
    #[error("empty range: minimum {minimum} exceeds maximum {maximum}")]
    EmptyRange { minimum: f64, maximum: f64 },
    /// A `divisible_by` constraint is not itself a multiple of the step.
    #[error("{divisor} is not a multiple of the step {step}")]
    IndivisibleStep { divisor: f64, step: f64 },
    /// A quantization step finer than the domain precision.
    #[error("step {step} is finer than the domain step {domain_step}")]
    StepTooFine { step: f64, domain_step: f64 },
    /// Bounds are valid but no value meets the remaining constraints.
    #[error("no candidate in [{minimum}, {maximum}] satisfies the draw constraints")]
    NoCandidate { minimum: f64, maximum: f64 },
    /// Candidate enumeration ran past its time budget.
    #[error("number draw exceeded its time budget of {budget:?}")]
    Timeout { budget: Duration },
}
