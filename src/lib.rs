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

//! Resolution engine for crossword-style arithmetic puzzles.
//!
//! This crate provides:
//! - A five-slot [`Expression`] model (`a op b = c`) with unknown slots.
//! - A quantized [`NumberDomain`] with tolerance equality.
//! - Usage-weighted [`NumberSupply`] and [`OperatorSupply`].
//! - An [`ExpressionResolver`] that completes partial expressions under
//!   attempt and time budgets.
//! - A textual form (`6 ? 3 = ?`) with line/column/caret diagnostics.
//!
//! # Pipeline
//!
//! 1. Build a partial expression from grid slots or text.
//! 2. Select a [`Strategy`] from the slots that are unknown.
//! 3. Draw and compute candidates, then gate them through
//!    [`ExpressionValidator`] and [`Expression::is_match`].
//! 4. Fly back the filled slots so later draws favor unused values.
//!
//! # Failures
//!
//! [`ResolveError::kind`] separates shapes that can never resolve
//! ([`FailureKind::NotResolvable`]) from budget give-ups
//! ([`FailureKind::MaybeNotResolvable`]). Only the former is safe to
//! memoize.

mod ast;
mod config;
mod diagnostics;
mod expression;
mod number;
mod operator;
mod parser;
mod resolver;

pub use config::{ConfigError, ResolverConfig};
pub use diagnostics::FormatError;
pub use expression::{EXPRESSION_LENGTH, Expression, ExpressionValidator, Slot, Token};
pub use number::{
    DrawRequest, NumberDomain, NumberSupply, RangeError, TOLERANCE, is_equal, is_zero,
};
pub use operator::{Operator, OperatorSupply, WeightedOperators};
pub use parser::parse_expression;
pub use resolver::{
    ExpressionResolver, FailureKind, ResolveError, ResolverStatistics, SearchLimits, Strategy,
};

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;
