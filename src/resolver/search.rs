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

//! Bounded operator/draw search shared by all strategies.

use std::time::{Duration, Instant};
use tracing::trace;

use super::{ResolveContext, ResolveError};
use crate::expression::Expression;
use crate::number::RangeError;
use crate::operator::Operator;

/// Per-resolution search ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Attempts before giving up.
    pub max_attempts: usize,
    /// Wall-clock budget before giving up.
    pub time_budget: Duration,
    /// How often a free operator order is replayed.
    pub operator_passes: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            time_budget: Duration::from_millis(100),
            operator_passes: 2,
        }
    }
}

/// Attempt counter plus deadline.
#[derive(Debug)]
pub(crate) struct Budget {
    limits: SearchLimits,
    started: Instant,
    attempts: usize,
}

impl Budget {
    pub(crate) fn start(limits: SearchLimits) -> Self {
        Self {
            limits,
            started: Instant::now(),
            attempts: 0,
        }
    }

    /// Takes one attempt, or returns `false` once a ceiling is reached.
    pub(crate) fn try_consume(&mut self) -> bool {
        if self.attempts >= self.limits.max_attempts || self.elapsed() >= self.limits.time_budget {
            return false;
        }
        self.attempts += 1;
        true
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Why one attempt produced no expression.
#[derive(Debug)]
pub(crate) enum Reject {
    /// The candidate failed arithmetic, range or zero-divisor checks.
    Invalid(&'static str),
    /// A draw constrained only by fixed slots had no candidate.
    Unsatisfiable(RangeError),
    /// A draw constrained by an earlier draw had no candidate.
    DrawFailed(RangeError),
    /// A draw ran out of time. Never proves anything.
    OutOfTime(RangeError),
    /// Resolution must stop immediately.
    Fault(ResolveError),
}

impl Reject {
    /// Classifies a failed draw that depended on an earlier draw.
    pub(crate) fn dependent(err: RangeError) -> Self {
        match err {
            RangeError::Timeout { .. } => Reject::OutOfTime(err),
            err => Reject::DrawFailed(err),
        }
    }
}

impl From<RangeError> for Reject {
    fn from(err: RangeError) -> Self {
        match err {
            RangeError::Timeout { .. } => Reject::OutOfTime(err),
            err => Reject::Unsatisfiable(err),
        }
    }
}

/// How the candidate operators are walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchMode {
    /// Every attempt is deterministic: try each operator once, and a miss on
    /// all of them is final.
    Exhaustive,
    /// Attempts draw numbers: replay the operator order under the budget.
    Budgeted,
}

/// Runs `attempt` over `candidates` until one yields an expression.
pub(crate) fn run<F>(
    ctx: &mut ResolveContext<'_>,
    partial: &Expression,
    candidates: &[Operator],
    mode: SearchMode,
    mut attempt: F,
) -> Result<Expression, ResolveError>
where
    F: FnMut(&mut ResolveContext<'_>, Operator) -> Result<Expression, Reject>,
{
    if candidates.is_empty() {
        return Err(ResolveError::not_resolvable(partial, "no admissible operator"));
    }
    let operator_fixed = partial.operator().is_known();

    if mode == SearchMode::Exhaustive {
        let started = Instant::now();
        let mut last_range = None;
        let mut timed_out = false;
        for &operator in candidates {
            match attempt(ctx, operator) {
                Ok(expression) => return Ok(expression),
                Err(Reject::Invalid(why)) => trace!(%operator, why, "candidate rejected"),
                Err(Reject::Unsatisfiable(err) | Reject::DrawFailed(err)) => {
                    trace!(%operator, %err, "draw failed");
                    last_range = Some(err);
                }
                Err(Reject::OutOfTime(err)) => {
                    trace!(%operator, %err, "draw timed out");
                    timed_out = true;
                }
                Err(Reject::Fault(err)) => return Err(err),
            }
        }
        if timed_out {
            return Err(ResolveError::MaybeNotResolvable {
                expression: *partial,
                attempts: candidates.len(),
                elapsed: started.elapsed(),
            });
        }
        return Err(ResolveError::NotResolvable {
            expression: *partial,
            reason: "every operator was rejected".to_string(),
            source: last_range,
        });
    }

    let passes = if operator_fixed {
        usize::MAX
    } else {
        ctx.limits.operator_passes
    };
    let mut stream = candidates
        .iter()
        .copied()
        .cycle()
        .take(candidates.len().saturating_mul(passes));
    let mut budget = Budget::start(ctx.limits);
    loop {
        if !budget.try_consume() {
            return Err(ResolveError::MaybeNotResolvable {
                expression: *partial,
                attempts: budget.attempts(),
                elapsed: budget.elapsed(),
            });
        }
        let Some(operator) = stream.next() else {
            return Err(ResolveError::not_resolvable(
                partial,
                "operator order exhausted",
            ));
        };
        match attempt(ctx, operator) {
            Ok(expression) => return Ok(expression),
            Err(Reject::Invalid(why)) => trace!(%operator, why, "candidate rejected"),
            Err(Reject::Unsatisfiable(err)) if operator_fixed => {
                return Err(ResolveError::NotResolvable {
                    expression: *partial,
                    reason: format!("no valid draw for fixed operator '{operator}'"),
                    source: Some(err),
                });
            }
            Err(Reject::Unsatisfiable(err) | Reject::DrawFailed(err)) => {
                trace!(%operator, %err, "draw failed");
            }
            Err(Reject::OutOfTime(err)) => trace!(%operator, %err, "draw timed out"),
            Err(Reject::Fault(err)) => return Err(err),
        }
    }
}

/// Final gate every strategy passes its candidate through.
pub(crate) fn accept(
    ctx: &ResolveContext<'_>,
    partial: &Expression,
    candidate: Expression,
) -> Result<Expression, Reject> {
    if !partial.is_match(&candidate) {
        return Err(Reject::Fault(ResolveError::internal(
            partial,
            format!("candidate `{candidate}` changes a fixed slot"),
        )));
    }
    if !ctx.validator.validate(&candidate) {
        return Err(Reject::Invalid("validator rejected candidate"));
    }
    Ok(candidate)
}
