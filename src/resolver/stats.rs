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

//! Usage report assembled from both supplies.

use serde::Serialize;
use std::fmt;

use crate::operator::Operator;

/// Snapshot of fly-back counters at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverStatistics {
    /// `(formatted value, count)`, most used first.
    pub numbers: Vec<(String, usize)>,
    /// `(operator, count)` in configured order.
    pub operators: Vec<(Operator, usize)>,
}

impl fmt::Display for ResolverStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "numbers:")?;
        for (value, count) in &self.numbers {
            writeln!(f, "  {value}: {count}")?;
        }
        writeln!(f, "operators:")?;
        for (operator, count) in &self.operators {
            writeln!(f, "  {operator}: {count}")?;
        }
        Ok(())
    }
}
