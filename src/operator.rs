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

//! Binary operators and the weighted operator supply.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::ConfigError;
use crate::number::is_zero;

/// Operator symbols that may appear in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (`+`).
    #[serde(rename = "+")]
    Add,
    /// Subtraction (`-`).
    #[serde(rename = "-")]
    Sub,
    /// Multiplication (`*`).
    #[serde(rename = "*")]
    Mul,
    /// Division (`/`).
    #[serde(rename = "/")]
    Div,
    /// Equals separator (`=`). Structural only, never computed.
    #[serde(rename = "=")]
    Eq,
}

impl Operator {
    /// Every operator that can be computed, in canonical order.
    pub const COMPUTABLE: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Returns the textual symbol.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Eq => '=',
        }
    }

    /// Parses a textual symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '=' => Some(Operator::Eq),
            _ => None,
        }
    }

    /// Returns `false` only for the `=` separator.
    pub fn is_computable(self) -> bool {
        self != Operator::Eq
    }

    /// Computes `left op right`.
    ///
    /// Returns `None` for the separator and for division by zero.
    pub fn apply(self, left: f64, right: f64) -> Option<f64> {
        match self {
            Operator::Add => Some(left + right),
            Operator::Sub => Some(left - right),
            Operator::Mul => Some(left * right),
            Operator::Div if is_zero(right) => None,
            Operator::Div => Some(left / right),
            Operator::Eq => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Supplies usable operators, least used first.
#[derive(Debug, Clone)]
pub struct OperatorSupply {
    operators: Vec<Operator>,
    usage: HashMap<Operator, usize>,
}

impl Default for OperatorSupply {
    fn default() -> Self {
        Self {
            operators: Operator::COMPUTABLE.to_vec(),
            usage: HashMap::new(),
        }
    }
}

impl OperatorSupply {
    /// Creates a supply over `operators`, keeping their order for ties.
    pub fn new(operators: Vec<Operator>) -> Result<Self, ConfigError> {
        if operators.contains(&Operator::Eq) {
            return Err(ConfigError::SeparatorOperator);
        }
        let mut unique = Vec::with_capacity(operators.len());
        for operator in operators {
            if !unique.contains(&operator) {
                unique.push(operator);
            }
        }
        if unique.is_empty() {
            return Err(ConfigError::NoOperators);
        }
        Ok(Self {
            operators: unique,
            usage: HashMap::new(),
        })
    }

    /// Configured operators in declaration order.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Returns how often `operator` was flown back.
    pub fn usage(&self, operator: Operator) -> usize {
        self.usage.get(&operator).copied().unwrap_or(0)
    }

    /// All operators except `excludes`, ordered by ascending usage.
    pub fn operators_weighted(&self, excludes: &[Operator]) -> Vec<Operator> {
        self.iterate_weighted(excludes).collect()
    }

    /// Lazy variant of [`OperatorSupply::operators_weighted`].
    pub fn iterate_weighted<'a>(&'a self, excludes: &'a [Operator]) -> WeightedOperators<'a> {
        WeightedOperators {
            supply: self,
            excludes,
            yielded: Vec::new(),
        }
    }

    /// Records one accepted use of `operator`.
    pub fn fly_back(&mut self, operator: Operator) {
        *self.usage.entry(operator).or_insert(0) += 1;
    }

    /// Usage counters in declaration order.
    pub fn statistics(&self) -> Vec<(Operator, usize)> {
        self.operators
            .iter()
            .map(|operator| (*operator, self.usage(*operator)))
            .collect()
    }
}

/// Iterator returned by [`OperatorSupply::iterate_weighted`].
///
/// Each step picks the least used operator not yet yielded; ties keep the
/// configured order.
#[derive(Debug, Clone)]
pub struct WeightedOperators<'a> {
    supply: &'a OperatorSupply,
    excludes: &'a [Operator],
    yielded: Vec<Operator>,
}

impl Iterator for WeightedOperators<'_> {
    type Item = Operator;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self
            .supply
            .operators
            .iter()
            .copied()
            .filter(|op| !self.excludes.contains(op) && !self.yielded.contains(op))
            .min_by_key(|op| self.supply.usage(*op))?;
        self.yielded.push(next);
        Some(next)
    }
}
