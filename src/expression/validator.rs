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

//! Accept/reject gate for resolved expressions.

use super::{Expression, Slot};
use crate::number::{NumberDomain, is_equal};

/// Pure arithmetic and range check for fully known expressions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpressionValidator {
    minimum: f64,
    maximum: f64,
}

impl ExpressionValidator {
    /// Creates a validator accepting numbers in `[minimum, maximum]`.
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self { minimum, maximum }
    }

    /// Uses the domain bounds as global bounds.
    pub fn for_domain(domain: &NumberDomain) -> Self {
        Self::new(domain.minimum(), domain.maximum())
    }

    /// Lower bound (inclusive).
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Upper bound (inclusive).
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Returns `true` when every slot is known and in range, the divisor is
    /// non-zero, and the arithmetic holds within tolerance.
    pub fn validate(&self, expression: &Expression) -> bool {
        let (Slot::Known(operand1), Slot::Known(operator), Slot::Known(operand2), Slot::Known(result)) = (
            expression.operand1(),
            expression.operator(),
            expression.operand2(),
            expression.result(),
        ) else {
            return false;
        };
        if !self.contains(operand1) || !self.contains(operand2) || !self.contains(result) {
            return false;
        }
        // `apply` refuses the separator and zero divisors.
        operator
            .apply(operand1, operand2)
            .is_some_and(|computed| is_equal(Some(computed), Some(result)))
    }

    fn contains(&self, value: f64) -> bool {
        self.minimum <= value && value <= self.maximum
    }
}
