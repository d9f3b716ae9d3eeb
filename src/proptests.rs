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

//! Property-based tests for quantization and resolution.

mod tests {
    use proptest::prelude::*;

    use crate::{
        Expression, ExpressionResolver, NumberDomain, Operator, ResolverConfig, Token, is_equal,
        is_zero,
    };

    fn step() -> impl Strategy<Value = f64> {
        prop_oneof![Just(0.1), Just(0.25), Just(0.5), Just(1.0), Just(2.0)]
    }

    fn computable() -> impl Strategy<Value = Operator> {
        prop_oneof![
            Just(Operator::Add),
            Just(Operator::Sub),
            Just(Operator::Mul),
            Just(Operator::Div),
        ]
    }

    // Integer operands whose result stays inside [0, 100].
    fn solvable() -> impl Strategy<Value = (f64, Operator, f64, f64)> {
        (1i64..=10, 1i64..=10, computable()).prop_map(|(x, y, operator)| match operator {
            Operator::Sub => {
                let (a, b) = (x.max(y), x.min(y));
                (a as f64, operator, b as f64, (a - b) as f64)
            }
            // Build the dividend from the quotient so division is exact.
            Operator::Div => ((x * y) as f64, operator, y as f64, x as f64),
            _ => {
                let result = operator.apply(x as f64, y as f64).unwrap_or_default();
                (x as f64, operator, y as f64, result)
            }
        })
    }

    fn resolver(seed: u64) -> ExpressionResolver {
        let config = ResolverConfig {
            minimum: 0.0,
            maximum: 100.0,
            seed: Some(seed),
            ..ResolverConfig::default()
        };
        ExpressionResolver::from_config(&config).unwrap()
    }

    fn masked(slots: (f64, Operator, f64, f64), mask: u8) -> Expression {
        let (a, operator, b, r) = slots;
        let number = |value: f64, bit: u8| {
            if mask & bit != 0 {
                Token::Unknown
            } else {
                Token::Number(value)
            }
        };
        let operator = if mask & 0b0010 != 0 {
            Token::Unknown
        } else {
            Token::Operator(operator)
        };
        Expression::from_values(&[
            number(a, 0b0001),
            operator,
            number(b, 0b0100),
            Token::Operator(Operator::Eq),
            number(r, 0b1000),
        ])
        .unwrap()
    }

    proptest! {
        #[test]
        fn fix_is_idempotent(value in -1000.0f64..1000.0, step in step()) {
            let domain = NumberDomain::new(-1000.0, 1000.0, step).unwrap();
            let once = domain.fix(value);
            prop_assert!(is_zero(domain.fix(once) - once));
        }

        #[test]
        fn fix_lands_on_the_step_grid(value in -1000.0f64..1000.0, step in step()) {
            let domain = NumberDomain::new(-1000.0, 1000.0, step).unwrap();
            let fixed = domain.fix(value);
            prop_assert!(is_zero((fixed / step).round() * step - fixed));
            prop_assert!((fixed - value).abs() <= step / 2.0 + 1e-9);
        }

        #[test]
        fn equality_is_symmetric(a in -100.0f64..100.0, b in -100.0f64..100.0) {
            prop_assert_eq!(is_equal(Some(a), Some(b)), is_equal(Some(b), Some(a)));
            prop_assert!(is_equal(Some(a), Some(a)));
        }

        #[test]
        fn resolution_is_sound(slots in solvable(), mask in 0u8..16, seed in any::<u64>()) {
            let partial = masked(slots, mask);
            let mut resolver = resolver(seed);
            match resolver.resolve(&partial) {
                Ok(resolved) => {
                    prop_assert!(resolver.validator().validate(&resolved));
                    prop_assert!(partial.is_match(&resolved));
                }
                Err(err) => prop_assert!(!err.kind().is_fatal(), "fatal failure: {}", err),
            }
        }

        #[test]
        fn operator_search_is_exhaustive(slots in solvable(), seed in any::<u64>()) {
            // Only the operator is unknown, so a solution is known to exist.
            let partial = masked(slots, 0b0010);
            let mut resolver = resolver(seed);
            let resolved = resolver.resolve(&partial);
            prop_assert!(resolved.is_ok(), "{} failed: {:?}", partial, resolved);
        }

        #[test]
        fn fixed_operands_resolve_exhaustively(slots in solvable(), seed in any::<u64>()) {
            let partial = masked(slots, 0b1010);
            let mut resolver = resolver(seed);
            let resolved = resolver.resolve(&partial);
            prop_assert!(resolved.is_ok(), "{} failed: {:?}", partial, resolved);
        }
    }
}
