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

//! Resolution failures and their classification.

use std::time::Duration;
use thiserror::Error;

use crate::diagnostics::FormatError;
use crate::expression::Expression;
use crate::number::RangeError;

/// Classification that tells the caller how to react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Malformed input. A caller bug.
    Format,
    /// Finite search exhausted; the expression shape is dead for good.
    NotResolvable,
    /// Budget ran out before the search space did.
    MaybeNotResolvable,
    /// A resolved candidate broke a fixed slot. A resolver bug.
    InternalInconsistency,
}

impl FailureKind {
    /// Whether a caller may remember this shape as permanently dead.
    pub fn is_memoizable(self) -> bool {
        self == FailureKind::NotResolvable
    }

    /// Whether the run should abort instead of backtracking.
    pub fn is_fatal(self) -> bool {
        matches!(self, FailureKind::Format | FailureKind::InternalInconsistency)
    }
}

/// Errors returned by [`crate::ExpressionResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// Input could not be read as an expression.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// No completion exists under the fixed slots.
    #[error("expression `{expression}` is not resolvable: {reason}")]
    NotResolvable {
        expression: Expression,
        reason: String,
        #[source]
        source: Option<RangeError>,
    },
    /// Attempts or time ran out.
    #[error(
        "expression `{expression}` may not be resolvable: gave up after {attempts} attempts in {elapsed:?}"
    )]
    MaybeNotResolvable {
        expression: Expression,
        attempts: usize,
        elapsed: Duration,
    },
    /// An invariant broke during resolution.
    #[error("internal inconsistency while resolving `{partial}`: {detail}")]
    InternalInconsistency { partial: Expression, detail: String },
}

impl ResolveError {
    pub(crate) fn not_resolvable(expression: &Expression, reason: impl Into<String>) -> Self {
        ResolveError::NotResolvable {
            expression: *expression,
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn internal(partial: &Expression, detail: impl Into<String>) -> Self {
        ResolveError::InternalInconsistency {
            partial: *partial,
            detail: detail.into(),
        }
    }

    /// Returns the failure classification.
    pub fn kind(&self) -> FailureKind {
        match self {
            ResolveError::Format(_) => FailureKind::Format,
            ResolveError::NotResolvable { .. } => FailureKind::NotResolvable,
            ResolveError::MaybeNotResolvable { .. } => FailureKind::MaybeNotResolvable,
            ResolveError::InternalInconsistency { .. } => FailureKind::InternalInconsistency,
        }
    }

    /// Returns the partial expression the failure refers to, if any.
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            ResolveError::Format(_) => None,
            ResolveError::NotResolvable { expression, .. }
            | ResolveError::MaybeNotResolvable { expression, .. } => Some(expression),
            ResolveError::InternalInconsistency { partial, .. } => Some(partial),
        }
    }
}
