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

//! `nom` parser for the textual expression form.
//!
//! The grammar is five whitespace-separated tokens, for example
//! `6 ? 3 = ?`:
//! - `?` marks an unknown slot
//! - numbers accept an optional sign, decimals and exponents
//! - operators are `+ - * /` and the `=` separator
//!
//! Slot kinds are checked by [`Expression::from_values`] rules, so the
//! text form and grid form reject the same inputs.

mod utils;

use crate::ast::{SlotToken, SourceSpan, Span};
use crate::diagnostics::FormatError;
use crate::expression::{EXPRESSION_LENGTH, Expression, Token};
use crate::operator::Operator;
use nom::Parser;
use nom::{
    IResult,
    branch::alt,
    character::complete::{char, one_of},
    combinator::{map, map_opt, map_res},
    error::{VerboseError, VerboseErrorKind},
    multi::many0,
    number::complete::recognize_float,
    sequence::{preceded, terminated},
};

use self::utils::{boundary, ws0};

type PResult<'a, O> = IResult<Span<'a>, O, VerboseError<Span<'a>>>;

/// Parses `6 ? 3 = ?`-style text into a partial [`Expression`].
pub fn parse_expression(source: &str) -> Result<Expression, FormatError> {
    let tokens = parse_tokens(source)?;
    let values: Vec<Token> = tokens.iter().map(|token| token.token).collect();
    Expression::check_values(&values).map_err(|issue| {
        // Surplus tokens are reported at the first one past the last slot.
        let anchor = issue.slot.or(Some(EXPRESSION_LENGTH));
        match anchor.and_then(|slot| tokens.get(slot)) {
            Some(token) => FormatError::from_span(issue.message, source, &token.span),
            None => FormatError::message_only(issue.message),
        }
    })
}

/// Splits source text into spanned slot tokens.
pub(crate) fn parse_tokens(source: &str) -> Result<Vec<SlotToken>, FormatError> {
    let input = Span::new(source);
    let (rest, tokens) = match preceded(ws0, many0(terminated(slot_token, ws0))).parse(input) {
        Ok(v) => v,
        Err(err) => return Err(parse_error_to_format_error(err, source)),
    };

    // Trailing whitespace is already consumed, so `rest` starts at the
    // offending token.
    if let Some(word) = rest.fragment().split_whitespace().next() {
        let span = SourceSpan::with_len(rest, word.len());
        return Err(FormatError::from_span(
            format!("Syntax error: unexpected '{word}'"),
            source,
            &span,
        ));
    }
    Ok(tokens)
}

/// Parses one token and records its span.
fn slot_token(input: Span<'_>) -> PResult<'_, SlotToken> {
    let start = input;
    let (input, token) = terminated(alt((unknown, number, operator)), boundary).parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((input, SlotToken { token, span }))
}

fn unknown(input: Span<'_>) -> PResult<'_, Token> {
    map(char('?'), |_| Token::Unknown).parse(input)
}

/// Numbers are tried before operators so `-3` reads as one token.
fn number(input: Span<'_>) -> PResult<'_, Token> {
    map(
        map_res(recognize_float, |s: Span<'_>| s.fragment().parse::<f64>()),
        Token::Number,
    )
    .parse(input)
}

fn operator(input: Span<'_>) -> PResult<'_, Token> {
    map(
        map_opt(one_of("+-*/="), Operator::from_symbol),
        Token::Operator,
    )
    .parse(input)
}

/// Converts a `nom` verbose error to a crate-level format error.
fn parse_error_to_format_error(
    err: nom::Err<VerboseError<Span<'_>>>,
    source: &str,
) -> FormatError {
    match err {
        nom::Err::Incomplete(_) => FormatError::message_only("Incomplete input"),
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            // Use the deepest recorded parser error as the diagnostic anchor.
            if let Some((span, kind)) = e.errors.last() {
                let span = SourceSpan::from_bounds(*span, *span);
                let detail = match kind {
                    VerboseErrorKind::Context(ctx) => format!("Syntax error: expected {ctx}"),
                    VerboseErrorKind::Char(c) => format!("Syntax error: expected '{c}'"),
                    VerboseErrorKind::Nom(kind) => format!("Syntax error near {kind:?}"),
                };
                FormatError::from_span(detail, source, &span)
            } else {
                FormatError::message_only("Syntax error")
            }
        }
    }
}
