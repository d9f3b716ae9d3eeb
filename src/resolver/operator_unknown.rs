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

//! Strategy for `a ? b = c`: both operands and the result fixed.

use super::search::{self, Reject, SearchMode};
use super::{ResolveContext, ResolveError};
use crate::expression::{Expression, Slot};
use crate::number::is_zero;

/// Tries every admissible operator once; the first exact hit wins.
pub(super) fn resolve(
    ctx: &mut ResolveContext<'_>,
    partial: &Expression,
) -> Result<Expression, ResolveError> {
    let (Slot::Known(operand1), Slot::Known(operand2), Slot::Known(result)) =
        (partial.operand1(), partial.operand2(), partial.result())
    else {
        return Err(ResolveError::internal(
            partial,
            "operator search needs both operands and the result",
        ));
    };
    let candidates = ctx.candidate_operators(partial)?;
    search::run(
        ctx,
        partial,
        &candidates,
        SearchMode::Exhaustive,
        |ctx, operator| {
            let Some(raw) = operator.apply(operand1, operand2) else {
                return Err(Reject::Invalid("division by zero"));
            };
            if !is_zero(ctx.fix(raw) - result) {
                return Err(Reject::Invalid("operator yields a different result"));
            }
            search::accept(
                ctx,
                partial,
                Expression::resolved(operand1, operator, operand2, result),
            )
        },
    )
}
