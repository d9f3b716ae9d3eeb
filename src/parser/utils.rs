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

//! Whitespace and token-boundary helpers.

use crate::ast::Span;
use nom::Parser;
use nom::{
    branch::alt,
    character::complete::{multispace0, multispace1},
    combinator::{eof, peek, value},
};

use super::PResult;

/// Skips zero-or-more whitespace.
pub(super) fn ws0(input: Span<'_>) -> PResult<'_, ()> {
    value((), multispace0).parse(input)
}

/// Succeeds without consuming when the next char ends a token.
///
/// Keeps inputs like `6x` or `3?` from splitting into two slots.
pub(super) fn boundary(input: Span<'_>) -> PResult<'_, ()> {
    peek(alt((value((), multispace1), value((), eof)))).parse(input)
}
