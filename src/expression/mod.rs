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

//! Five-slot equation model: `operand1 operator operand2 = result`.

mod validator;

pub use validator::ExpressionValidator;

use std::fmt;

use crate::diagnostics::FormatError;
use crate::number::is_equal;
use crate::operator::Operator;

/// Number of slots in an expression, separator included.
pub const EXPRESSION_LENGTH: usize = 5;

/// One slot that is either fixed by the caller or left for the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<T> {
    /// Value supplied by the caller or by resolution.
    Known(T),
    /// Value still to be filled.
    Unknown,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Unknown
    }
}

impl<T: Copy> Slot<T> {
    /// Returns the value when known.
    pub fn known(self) -> Option<T> {
        match self {
            Slot::Known(value) => Some(value),
            Slot::Unknown => None,
        }
    }

    /// Returns `true` for [`Slot::Known`].
    pub fn is_known(&self) -> bool {
        matches!(self, Slot::Known(_))
    }

    /// Returns `true` for [`Slot::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, Slot::Unknown)
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Slot::Known(value),
            None => Slot::Unknown,
        }
    }
}

/// Raw slot content as read from a grid row or column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A numeric cell.
    Number(f64),
    /// An operator cell, including the `=` separator.
    Operator(Operator),
    /// An empty cell.
    Unknown,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{value}"),
            Token::Operator(operator) => write!(f, "{operator}"),
            Token::Unknown => write!(f, "?"),
        }
    }
}

/// Slot-level rejection from [`Expression::check_values`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SlotIssue {
    /// Zero-based slot index, `None` when the slot count itself is wrong.
    pub(crate) slot: Option<usize>,
    pub(crate) message: String,
}

impl SlotIssue {
    fn at(slot: usize, message: impl Into<String>) -> Self {
        Self {
            slot: Some(slot),
            message: message.into(),
        }
    }
}

/// A possibly partial arithmetic equation.
///
/// The `=` separator is implicit. A resolved expression has all four
/// slots known and satisfies `operand1 operator operand2 == result`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Expression {
    operand1: Slot<f64>,
    operator: Slot<Operator>,
    operand2: Slot<f64>,
    result: Slot<f64>,
}

impl Expression {
    /// Creates an expression with every slot unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an expression from five grid slots.
    ///
    /// Slots 1, 3 and 5 take numbers, slot 2 a computable operator, and
    /// slot 4 the `=` separator; any slot may be unknown.
    pub fn from_values(values: &[Token]) -> Result<Self, FormatError> {
        Self::check_values(values).map_err(|issue| FormatError::message_only(issue.message))
    }

    pub(crate) fn check_values(values: &[Token]) -> Result<Self, SlotIssue> {
        if values.len() != EXPRESSION_LENGTH {
            return Err(SlotIssue {
                slot: None,
                message: format!(
                    "Expected {EXPRESSION_LENGTH} slots, found {}",
                    values.len()
                ),
            });
        }
        let operand1 = number_slot(values, 0, "operand1")?;
        let operator = match values[1] {
            Token::Operator(op) if op.is_computable() => Slot::Known(op),
            Token::Unknown => Slot::Unknown,
            _ => {
                return Err(SlotIssue::at(
                    1,
                    "Slot 2 (operator) must be one of '+', '-', '*', '/' or '?'",
                ));
            }
        };
        let operand2 = number_slot(values, 2, "operand2")?;
        if !matches!(values[3], Token::Operator(Operator::Eq) | Token::Unknown) {
            return Err(SlotIssue::at(3, "Slot 4 must be '=' or '?'"));
        }
        let result = number_slot(values, 4, "result")?;
        Ok(Self {
            operand1,
            operator,
            operand2,
            result,
        })
    }

    /// Builds a fully known expression without validating it.
    pub(crate) fn resolved(operand1: f64, operator: Operator, operand2: f64, result: f64) -> Self {
        Self {
            operand1: Slot::Known(operand1),
            operator: Slot::Known(operator),
            operand2: Slot::Known(operand2),
            result: Slot::Known(result),
        }
    }

    /// Left operand.
    pub fn operand1(&self) -> Slot<f64> {
        self.operand1
    }

    /// Operator slot.
    pub fn operator(&self) -> Slot<Operator> {
        self.operator
    }

    /// Right operand.
    pub fn operand2(&self) -> Slot<f64> {
        self.operand2
    }

    /// Result slot.
    pub fn result(&self) -> Slot<f64> {
        self.result
    }

    /// Slot count, separator included.
    pub fn length(&self) -> usize {
        EXPRESSION_LENGTH
    }

    /// The five slots in grid order, with `=` in the fourth.
    pub fn values(&self) -> [Token; EXPRESSION_LENGTH] {
        let number = |slot: Slot<f64>| slot.known().map_or(Token::Unknown, Token::Number);
        [
            number(self.operand1),
            self.operator
                .known()
                .map_or(Token::Unknown, Token::Operator),
            number(self.operand2),
            Token::Operator(Operator::Eq),
            number(self.result),
        ]
    }

    /// Returns `true` when all four slots are unknown.
    pub fn is_empty(&self) -> bool {
        self.operand1.is_unknown()
            && self.operator.is_unknown()
            && self.operand2.is_unknown()
            && self.result.is_unknown()
    }

    /// Returns `true` when all four slots are known.
    pub fn is_complete(&self) -> bool {
        self.operand1.is_known()
            && self.operator.is_known()
            && self.operand2.is_known()
            && self.result.is_known()
    }

    /// Checks that `candidate` keeps every slot known in `self`.
    ///
    /// Numbers compare within tolerance, operators exactly. Slots unknown in
    /// `self` accept anything.
    pub fn is_match(&self, candidate: &Expression) -> bool {
        let number_matches = |own: Slot<f64>, other: Slot<f64>| {
            own.is_unknown() || is_equal(own.known(), other.known())
        };
        number_matches(self.operand1, candidate.operand1)
            && (self.operator.is_unknown() || self.operator == candidate.operator)
            && number_matches(self.operand2, candidate.operand2)
            && number_matches(self.result, candidate.result)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [operand1, operator, operand2, separator, result] = self.values();
        write!(f, "{operand1} {operator} {operand2} {separator} {result}")
    }
}

fn number_slot(values: &[Token], index: usize, name: &str) -> Result<Slot<f64>, SlotIssue> {
    match values[index] {
        Token::Number(value) if value.is_finite() => Ok(Slot::Known(value)),
        Token::Unknown => Ok(Slot::Unknown),
        _ => Err(SlotIssue::at(
            index,
            format!("Slot {} ({name}) must be a finite number or '?'", index + 1),
        )),
    }
}
