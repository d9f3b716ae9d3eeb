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

//! Closed set of resolution strategies, selected in priority order.

use super::{ResolveContext, ResolveError, operator_unknown, result_known, result_unknown};
use crate::expression::Expression;

/// One way of completing a partial expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `result` unknown: fill operands, then compute the result.
    ResultUnknown,
    /// Both operands and result fixed, operator unknown.
    OperatorUnknown,
    /// `result` fixed, at least one operand unknown: invert the operator.
    ResultKnown,
}

impl Strategy {
    /// Evaluation order for [`Strategy::select`].
    pub const PRIORITY: [Strategy; 3] = [
        Strategy::ResultUnknown,
        Strategy::OperatorUnknown,
        Strategy::ResultKnown,
    ];

    /// Returns the first strategy in priority order that accepts `expression`.
    ///
    /// Fully known expressions match none.
    pub fn select(expression: &Expression) -> Option<Strategy> {
        Self::PRIORITY
            .into_iter()
            .find(|strategy| strategy.matches(expression))
    }

    /// Returns whether this strategy can resolve `expression`.
    pub fn matches(self, expression: &Expression) -> bool {
        match self {
            Strategy::ResultUnknown => expression.result().is_unknown(),
            Strategy::OperatorUnknown => {
                expression.operand1().is_known()
                    && expression.operand2().is_known()
                    && expression.result().is_known()
                    && expression.operator().is_unknown()
            }
            Strategy::ResultKnown => {
                expression.result().is_known()
                    && (expression.operand1().is_unknown() || expression.operand2().is_unknown())
            }
        }
    }

    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::ResultUnknown => "result-unknown",
            Strategy::OperatorUnknown => "operator-unknown",
            Strategy::ResultKnown => "result-known",
        }
    }

    pub(crate) fn resolve(
        self,
        ctx: &mut ResolveContext<'_>,
        expression: &Expression,
    ) -> Result<Expression, ResolveError> {
        match self {
            Strategy::ResultUnknown => result_unknown::resolve(ctx, expression),
            Strategy::OperatorUnknown => operator_unknown::resolve(ctx, expression),
            Strategy::ResultKnown => result_known::resolve(ctx, expression),
        }
    }
}
