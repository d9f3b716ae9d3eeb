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

//! Strategy for expressions whose result slot is unknown.
//!
//! Missing operands are drawn, then the result is computed and quantized.
//! Draw bounds are narrowed so the computed result lands inside the
//! validator range whenever the operator allows it.

use super::search::{self, Reject, SearchMode};
use super::{ResolveContext, ResolveError};
use crate::expression::{Expression, Slot};
use crate::number::{DrawRequest, is_zero};
use crate::operator::Operator;

pub(super) fn resolve(
    ctx: &mut ResolveContext<'_>,
    partial: &Expression,
) -> Result<Expression, ResolveError> {
    let candidates = ctx.candidate_operators(partial)?;
    // With both operands fixed nothing is drawn, so one pass decides.
    let mode = if partial.operand1().is_known() && partial.operand2().is_known() {
        SearchMode::Exhaustive
    } else {
        SearchMode::Budgeted
    };
    search::run(ctx, partial, &candidates, mode, |ctx, operator| {
        attempt(ctx, partial, operator)
    })
}

fn attempt(
    ctx: &mut ResolveContext<'_>,
    partial: &Expression,
    operator: Operator,
) -> Result<Expression, Reject> {
    let operand1 = match partial.operand1() {
        Slot::Known(value) => value,
        Slot::Unknown => {
            let request = first_operand_request(ctx, operator, partial.operand2().known());
            ctx.numbers.next(request)?
        }
    };
    let operand2 = match partial.operand2() {
        Slot::Known(value) => value,
        Slot::Unknown => {
            let request = second_operand_request(ctx, operator, operand1);
            let drawn = ctx.numbers.next(request);
            if partial.operand1().is_known() {
                drawn?
            } else {
                drawn.map_err(Reject::dependent)?
            }
        }
    };
    let Some(raw) = operator.apply(operand1, operand2) else {
        return Err(Reject::Invalid("division by zero"));
    };
    let result = ctx.fix(raw);
    search::accept(
        ctx,
        partial,
        Expression::resolved(operand1, operator, operand2, result),
    )
}

fn first_operand_request(
    ctx: &ResolveContext<'_>,
    operator: Operator,
    operand2: Option<f64>,
) -> DrawRequest {
    let (low, high) = (ctx.validator.minimum(), ctx.validator.maximum());
    let smallest = ctx.numbers.domain().minimum();
    match (operator, operand2) {
        (Operator::Add, Some(b)) => DrawRequest::new().minimum(low - b).maximum(high - b),
        (Operator::Sub, Some(b)) => DrawRequest::new().minimum(b + low).maximum(b + high),
        (Operator::Mul, Some(b)) if b > 0.0 && !is_zero(b) => {
            DrawRequest::new().minimum(low / b).maximum(high / b)
        }
        (Operator::Div, Some(b)) if b > 0.0 && !is_zero(b) => DrawRequest::new()
            .divisible_by(b)
            .minimum(low * b)
            .maximum(high * b),
        (Operator::Div, Some(b)) if !is_zero(b) => DrawRequest::new().divisible_by(b),
        // The second operand is at least the domain minimum.
        (Operator::Add, None) => DrawRequest::new().maximum(high - smallest),
        (Operator::Sub, None) => DrawRequest::new().minimum(low + smallest),
        _ => DrawRequest::new(),
    }
}

fn second_operand_request(ctx: &ResolveContext<'_>, operator: Operator, a: f64) -> DrawRequest {
    let (low, high) = (ctx.validator.minimum(), ctx.validator.maximum());
    match operator {
        Operator::Add => DrawRequest::new().minimum(low - a).maximum(high - a),
        // With a non-negative range this caps the subtrahend at `a`.
        Operator::Sub => DrawRequest::new().minimum(a - high).maximum(a - low),
        Operator::Mul if a > 0.0 && !is_zero(a) => {
            DrawRequest::new().minimum(low / a).maximum(high / a)
        }
        Operator::Div => DrawRequest::new().divides(a).non_zero(),
        _ => DrawRequest::new(),
    }
}
