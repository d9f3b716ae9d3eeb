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

//! Strategy for expressions with a fixed result and a missing operand.
//!
//! One missing operand is solved by inverting the operator. With both
//! operands missing, one of them is drawn first and the other follows.

use super::search::{self, Reject, SearchMode};
use super::{ResolveContext, ResolveError};
use crate::expression::{Expression, Slot};
use crate::number::{DrawRequest, is_zero};
use crate::operator::Operator;

pub(super) fn resolve(
    ctx: &mut ResolveContext<'_>,
    partial: &Expression,
) -> Result<Expression, ResolveError> {
    let Slot::Known(result) = partial.result() else {
        return Err(ResolveError::internal(
            partial,
            "inverse search needs a fixed result",
        ));
    };
    let candidates = ctx.candidate_operators(partial)?;
    // One known operand pins the other, so each operator is tried once.
    let mode = if partial.operand1().is_known() || partial.operand2().is_known() {
        SearchMode::Exhaustive
    } else {
        SearchMode::Budgeted
    };
    search::run(ctx, partial, &candidates, mode, |ctx, operator| {
        attempt(ctx, partial, operator, result)
    })
}

fn attempt(
    ctx: &mut ResolveContext<'_>,
    partial: &Expression,
    operator: Operator,
    result: f64,
) -> Result<Expression, Reject> {
    let (operand1, operand2) = match (partial.operand1(), partial.operand2()) {
        (Slot::Known(a), Slot::Unknown) => (a, solve_operand2(ctx, operator, a, result)?),
        (Slot::Unknown, Slot::Known(b)) => (solve_operand1(ctx, operator, b, result)?, b),
        (Slot::Unknown, Slot::Unknown) => draw_operands(ctx, operator, result)?,
        (Slot::Known(_), Slot::Known(_)) => {
            return Err(Reject::Fault(ResolveError::internal(
                partial,
                "inverse search dispatched with both operands fixed",
            )));
        }
    };
    search::accept(
        ctx,
        partial,
        Expression::resolved(operand1, operator, operand2, result),
    )
}

/// Solves `? op b = r`.
fn solve_operand1(
    ctx: &mut ResolveContext<'_>,
    operator: Operator,
    b: f64,
    r: f64,
) -> Result<f64, Reject> {
    let raw = match operator {
        Operator::Add => r - b,
        Operator::Sub => r + b,
        // `? * 0 = 0` holds for any left operand.
        Operator::Mul if is_zero(b) && is_zero(r) => return Ok(ctx.numbers.next(DrawRequest::new())?),
        Operator::Mul if is_zero(b) => return Err(Reject::Invalid("zero factor with non-zero product")),
        Operator::Mul => r / b,
        Operator::Div if is_zero(b) => return Err(Reject::Invalid("division by zero")),
        Operator::Div => r * b,
        Operator::Eq => return Err(Reject::Invalid("separator is not computable")),
    };
    Ok(ctx.fix(raw))
}

/// Solves `a op ? = r`.
fn solve_operand2(
    ctx: &mut ResolveContext<'_>,
    operator: Operator,
    a: f64,
    r: f64,
) -> Result<f64, Reject> {
    let raw = match operator {
        Operator::Add => r - a,
        Operator::Sub => a - r,
        // `0 * ? = 0` holds for any right operand.
        Operator::Mul if is_zero(a) && is_zero(r) => return Ok(ctx.numbers.next(DrawRequest::new())?),
        Operator::Mul if is_zero(a) => return Err(Reject::Invalid("zero factor with non-zero product")),
        Operator::Mul => r / a,
        // `0 / ? = 0` holds for any non-zero divisor.
        Operator::Div if is_zero(r) && is_zero(a) => {
            return Ok(ctx.numbers.next(DrawRequest::new().non_zero())?);
        }
        Operator::Div if is_zero(r) => return Err(Reject::Invalid("zero quotient with non-zero dividend")),
        Operator::Div => a / r,
        Operator::Eq => return Err(Reject::Invalid("separator is not computable")),
    };
    Ok(ctx.fix(raw))
}

/// Solves `? op ? = r` by drawing one operand and deriving the other.
fn draw_operands(
    ctx: &mut ResolveContext<'_>,
    operator: Operator,
    r: f64,
) -> Result<(f64, f64), Reject> {
    let (low, high) = (ctx.validator.minimum(), ctx.validator.maximum());
    match operator {
        Operator::Add => {
            let a = ctx
                .numbers
                .next(DrawRequest::new().minimum(r - high).maximum(r - low))?;
            Ok((a, ctx.fix(r - a)))
        }
        Operator::Sub => {
            let b = ctx
                .numbers
                .next(DrawRequest::new().minimum(low - r).maximum(high - r))?;
            Ok((ctx.fix(r + b), b))
        }
        Operator::Mul => {
            let a = ctx.numbers.next(DrawRequest::new().divides(r).non_zero())?;
            Ok((a, ctx.fix(r / a)))
        }
        Operator::Div => {
            let mut request = DrawRequest::new().non_zero();
            if r > 0.0 && !is_zero(r) {
                // Keeps the dividend `r * b` inside the range.
                request = request.minimum(low / r).maximum(high / r);
            }
            let b = ctx.numbers.next(request)?;
            Ok((ctx.fix(r * b), b))
        }
        Operator::Eq => Err(Reject::Invalid("separator is not computable")),
    }
}
