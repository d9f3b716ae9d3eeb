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

//! Expression resolution engine.
//!
//! [`ExpressionResolver`] picks one [`Strategy`] per partial expression,
//! lets it draw candidates from the owned supplies, and gates every
//! candidate through [`ExpressionValidator`] and [`Expression::is_match`].
//!
//! Failures are typed so the grid filler can tell a permanently dead shape
//! ([`FailureKind::NotResolvable`]) from a budget give-up
//! ([`FailureKind::MaybeNotResolvable`]).

mod errors;
mod operator_unknown;
mod result_known;
mod result_unknown;
mod search;
mod stats;
mod strategy;

pub use errors::{FailureKind, ResolveError};
pub use search::SearchLimits;
pub use stats::ResolverStatistics;
pub use strategy::Strategy;

use tracing::{debug, instrument};

use crate::config::{ConfigError, ResolverConfig};
use crate::expression::{Expression, ExpressionValidator, Slot};
use crate::number::{NumberSupply, is_zero};
use crate::operator::{Operator, OperatorSupply};
use crate::parser::parse_expression;

/// Borrowed engine state handed to a strategy for one resolution.
pub(crate) struct ResolveContext<'a> {
    pub(crate) validator: &'a ExpressionValidator,
    pub(crate) numbers: &'a mut NumberSupply,
    pub(crate) operators: &'a OperatorSupply,
    pub(crate) limits: SearchLimits,
}

impl ResolveContext<'_> {
    /// Quantizes with the number domain.
    pub(crate) fn fix(&self, value: f64) -> f64 {
        self.numbers.domain().fix(value)
    }

    /// Operators to try: the fixed one, or the weighted order without
    /// division when the divisor is a fixed zero.
    pub(crate) fn candidate_operators(
        &self,
        partial: &Expression,
    ) -> Result<Vec<Operator>, ResolveError> {
        let zero_divisor = partial.operand2().known().is_some_and(is_zero);
        match partial.operator() {
            Slot::Known(Operator::Div) if zero_divisor => Err(ResolveError::not_resolvable(
                partial,
                "division by a fixed zero divisor",
            )),
            Slot::Known(operator) => Ok(vec![operator]),
            Slot::Unknown if zero_divisor => Ok(self.operators.operators_weighted(&[Operator::Div])),
            Slot::Unknown => Ok(self.operators.operators_weighted(&[])),
        }
    }
}

/// Resolves partial expressions into valid complete ones.
///
/// The resolver owns its supplies; create one per worker when filling grids
/// in parallel.
#[derive(Debug, Clone)]
pub struct ExpressionResolver {
    validator: ExpressionValidator,
    numbers: NumberSupply,
    operators: OperatorSupply,
    limits: SearchLimits,
}

impl ExpressionResolver {
    /// Creates a resolver from explicitly built parts and default limits.
    pub fn new(
        validator: ExpressionValidator,
        numbers: NumberSupply,
        operators: OperatorSupply,
    ) -> Self {
        Self {
            validator,
            numbers,
            operators,
            limits: SearchLimits::default(),
        }
    }

    /// Builds validator, supplies and limits from one configuration.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let domain = config.domain()?;
        let validator = ExpressionValidator::for_domain(&domain);
        let numbers = match config.seed {
            Some(seed) => NumberSupply::with_seed(domain, seed),
            None => NumberSupply::new(domain),
        }
        .with_draw_budget(config.time_budget());
        let operators = OperatorSupply::new(config.operators.clone())?;
        Ok(Self::new(validator, numbers, operators).with_limits(config.search_limits()))
    }

    /// Replaces the search limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validator used as the acceptance gate.
    pub fn validator(&self) -> &ExpressionValidator {
        &self.validator
    }

    /// Owned number supply.
    pub fn number_supply(&self) -> &NumberSupply {
        &self.numbers
    }

    /// Owned operator supply.
    pub fn operator_supply(&self) -> &OperatorSupply {
        &self.operators
    }

    /// Search limits applied to each resolution.
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Current fly-back counters of both supplies.
    pub fn statistics(&self) -> ResolverStatistics {
        ResolverStatistics {
            numbers: self.numbers.statistics(),
            operators: self.operators.statistics(),
        }
    }

    /// Completes `expression` without touching its known slots.
    ///
    /// A fully known input is returned unchanged when valid.
    #[instrument(level = "debug", skip(self, expression), fields(expression = %expression))]
    pub fn resolve(&mut self, expression: &Expression) -> Result<Expression, ResolveError> {
        if expression.is_complete() {
            return if self.validator.validate(expression) {
                Ok(*expression)
            } else {
                Err(ResolveError::not_resolvable(
                    expression,
                    "fixed expression is invalid",
                ))
            };
        }
        let Some(strategy) = Strategy::select(expression) else {
            return Err(ResolveError::internal(
                expression,
                "no strategy accepts the expression",
            ));
        };
        debug!(strategy = strategy.name(), "resolving expression");

        let mut ctx = ResolveContext {
            validator: &self.validator,
            numbers: &mut self.numbers,
            operators: &self.operators,
            limits: self.limits,
        };
        match strategy.resolve(&mut ctx, expression) {
            Ok(resolved) => {
                debug!(%resolved, "expression resolved");
                self.fly_back(expression, &resolved);
                Ok(resolved)
            }
            Err(err) => {
                debug!(kind = ?err.kind(), %err, "resolution failed");
                Err(err)
            }
        }
    }

    /// Parses `6 ? 3 = ?`-style text and resolves it.
    pub fn resolve_str(&mut self, source: &str) -> Result<Expression, ResolveError> {
        let expression = parse_expression(source)?;
        self.resolve(&expression)
    }

    /// Records usage for the slots the resolver filled.
    fn fly_back(&mut self, base: &Expression, resolved: &Expression) {
        let filled_numbers = [
            (base.operand1(), resolved.operand1()),
            (base.operand2(), resolved.operand2()),
            (base.result(), resolved.result()),
        ];
        for (before, after) in filled_numbers {
            if let (Slot::Unknown, Slot::Known(value)) = (before, after) {
                self.numbers.fly_back(value);
            }
        }
        if let (Slot::Unknown, Slot::Known(operator)) = (base.operator(), resolved.operator()) {
            self.operators.fly_back(operator);
        }
    }
}
