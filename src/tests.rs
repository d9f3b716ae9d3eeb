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

//! Crate unit tests.

use super::*;
use std::collections::BTreeSet;
use std::time::Duration;

fn first_caret_column(pointer: &str) -> Option<usize> {
    pointer.chars().position(|ch| ch == '^').map(|idx| idx + 1)
}

fn resolver_with(minimum: f64, maximum: f64, step: f64, seed: u64) -> ExpressionResolver {
    let config = ResolverConfig {
        minimum,
        maximum,
        step,
        seed: Some(seed),
        ..ResolverConfig::default()
    };
    ExpressionResolver::from_config(&config).expect("config should be valid")
}

fn resolver() -> ExpressionResolver {
    resolver_with(1.0, 10.0, 1.0, 7)
}

fn expr(source: &str) -> Expression {
    parse_expression(source).expect("expression should parse")
}

fn resolve_text(resolver: &mut ExpressionResolver, source: &str) -> String {
    resolver
        .resolve_str(source)
        .expect("expression should resolve")
        .to_string()
}

fn assert_format_error_case(case_name: &str, source: &str, expected_column: usize, needle: &str) {
    let err = parse_expression(source).expect_err("parse should fail");
    assert_eq!(err.line, 1, "{case_name}: unexpected error line");
    assert_eq!(
        err.column, expected_column,
        "{case_name}: unexpected error column"
    );
    assert!(
        err.message.contains(needle),
        "{case_name}: unexpected message '{}'",
        err.message
    );
    assert_eq!(
        err.snippet,
        source.lines().next().unwrap_or_default(),
        "{case_name}: snippet should match source line"
    );
    assert_eq!(
        first_caret_column(&err.pointer),
        Some(err.column),
        "{case_name}: caret column mismatch"
    );
}

fn draw_all(supply: &mut NumberSupply, request: DrawRequest, rounds: usize) -> BTreeSet<String> {
    (0..rounds)
        .map(|_| {
            let value = supply.next(request).expect("draw should succeed");
            supply.domain().format(value)
        })
        .collect()
}

fn domain(minimum: f64, maximum: f64, step: f64) -> NumberDomain {
    NumberDomain::new(minimum, maximum, step).expect("domain should be valid")
}

#[test]
fn quantizes_to_the_domain_step() {
    let quarter = domain(0.0, 10.0, 0.25);
    assert_eq!(quarter.decimals(), 2);
    assert_eq!(quarter.fix(1.13), 1.25);
    assert_eq!(quarter.fix(1.12), 1.0);
    assert_eq!(quarter.format(1.5), "1.50");
    assert_eq!(quarter.format_with(1.5, 0), "2");

    let tenth = domain(0.0, 10.0, 0.1);
    assert_eq!(tenth.decimals(), 1);
    assert_eq!(tenth.fix(0.1 + 0.2), 0.3);
    assert_eq!(domain(0.0, 100.0, 10.0).decimals(), 0);
}

#[test]
fn fix_never_yields_negative_zero() {
    let whole = domain(-10.0, 10.0, 1.0);
    let fixed = whole.fix(-0.2);
    assert!(fixed.is_sign_positive());
    assert_eq!(whole.format(fixed), "0");
}

#[test]
fn fix_with_step_refuses_finer_steps() {
    let tenth = domain(0.0, 10.0, 0.1);
    assert_eq!(tenth.fix_with_step(1.13, 0.5), Ok(1.0));
    assert_eq!(tenth.fix_with_step(1.13, 0.1), Ok(1.1));
    assert!(matches!(
        tenth.fix_with_step(1.13, 0.05),
        Err(RangeError::StepTooFine { .. })
    ));
}

#[test]
fn rejects_invalid_domains() {
    assert_eq!(
        NumberDomain::new(1.0, 10.0, 0.0),
        Err(ConfigError::InvalidStep(0.0))
    );
    assert!(matches!(
        NumberDomain::new(10.0, 1.0, 1.0),
        Err(ConfigError::InvalidBounds { .. })
    ));
    assert!(matches!(
        NumberDomain::new(f64::NAN, 1.0, 1.0),
        Err(ConfigError::InvalidBounds { .. })
    ));
}

#[test]
fn rejects_steps_and_bounds_beyond_precision() {
    assert_eq!(
        NumberDomain::new(1.0, 10.0, 1e-11),
        Err(ConfigError::InvalidStep(1e-11))
    );
    assert!(NumberDomain::new(1.0, 10.0, 1e-10).is_ok());
    assert!(matches!(
        NumberDomain::new(-1e19, 1e19, 1.0),
        Err(ConfigError::InvalidBounds { .. })
    ));
    assert!(matches!(
        NumberDomain::new(0.0, 1e6, 1e-10),
        Err(ConfigError::InvalidBounds { .. })
    ));

    let config = ResolverConfig {
        minimum: -1e19,
        maximum: 1e19,
        ..ResolverConfig::default()
    };
    assert!(matches!(
        ExpressionResolver::from_config(&config),
        Err(ConfigError::InvalidBounds { .. })
    ));
}

#[test]
fn compares_within_tolerance() {
    assert!(is_zero(1e-7));
    assert!(!is_zero(1e-3));
    assert!(is_equal(Some(0.3), Some(0.1 + 0.2)));
    assert!(is_equal(None, None));
    assert!(!is_equal(Some(1.0), None));
    assert!(!is_equal(None, Some(1.0)));
    assert!(!is_equal(Some(1.0), Some(1.01)));
}

#[test]
fn draws_stay_inside_requested_bounds() {
    let mut supply = NumberSupply::with_seed(domain(1.0, 10.0, 1.0), 3);
    let drawn = draw_all(&mut supply, DrawRequest::new().minimum(4.0).maximum(6.0), 200);
    let expected: BTreeSet<String> = ["4", "5", "6"].iter().map(|s| s.to_string()).collect();
    assert_eq!(drawn, expected);
}

#[test]
fn request_bounds_are_clamped_to_the_domain() {
    let mut supply = NumberSupply::with_seed(domain(1.0, 10.0, 1.0), 3);
    let drawn = draw_all(&mut supply, DrawRequest::new().minimum(-50.0).maximum(2.0), 100);
    let expected: BTreeSet<String> = ["1", "2"].iter().map(|s| s.to_string()).collect();
    assert_eq!(drawn, expected);
}

#[test]
fn draws_multiples_for_divisible_by() {
    let cases = [
        ("integer", domain(1.0, 10.0, 1.0), 2.0, vec!["2", "4", "6", "8", "10"]),
        ("tenths", domain(0.0, 3.0, 0.1), 0.7, vec!["0.0", "0.7", "1.4", "2.1", "2.8"]),
        ("fifths", domain(1.0, 3.0, 0.2), 0.8, vec!["1.6", "2.4"]),
    ];
    for (case_name, domain, divisor, expected) in cases {
        let mut supply = NumberSupply::with_seed(domain, 11);
        let drawn = draw_all(&mut supply, DrawRequest::new().divisible_by(divisor), 300);
        let expected: BTreeSet<String> = expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(drawn, expected, "{case_name}: unexpected candidates");
    }
}

#[test]
fn zero_divisible_by_means_no_constraint() {
    let mut supply = NumberSupply::with_seed(domain(1.0, 3.0, 1.0), 5);
    let drawn = draw_all(&mut supply, DrawRequest::new().divisible_by(0.0), 100);
    assert_eq!(drawn.len(), 3);
}

#[test]
fn rejects_divisors_off_the_step_grid() {
    let mut supply = NumberSupply::with_seed(domain(0.0, 10.0, 0.2), 1);
    let err = supply
        .next(DrawRequest::new().divisible_by(0.3))
        .expect_err("0.3 is not a multiple of 0.2");
    assert!(matches!(err, RangeError::IndivisibleStep { .. }));
}

#[test]
fn reports_empty_and_unsatisfiable_draws() {
    let mut supply = NumberSupply::with_seed(domain(1.0, 10.0, 1.0), 1);
    assert!(matches!(
        supply.next(DrawRequest::new().minimum(8.0).maximum(3.0)),
        Err(RangeError::EmptyRange { .. })
    ));
    assert!(matches!(
        supply.next(DrawRequest::new().minimum(20.0)),
        Err(RangeError::EmptyRange { .. })
    ));
    assert!(matches!(
        supply.next(DrawRequest::new().minimum(3.0).maximum(3.0).divisible_by(2.0)),
        Err(RangeError::NoCandidate { .. })
    ));

    let mut zero_only = NumberSupply::with_seed(domain(0.0, 0.0, 1.0), 1);
    assert!(matches!(
        zero_only.next(DrawRequest::new().non_zero()),
        Err(RangeError::NoCandidate { .. })
    ));
}

#[test]
fn non_zero_draws_skip_zero() {
    let mut supply = NumberSupply::with_seed(domain(-1.0, 1.0, 1.0), 9);
    let drawn = draw_all(&mut supply, DrawRequest::new().non_zero(), 200);
    let expected: BTreeSet<String> = ["-1", "1"].iter().map(|s| s.to_string()).collect();
    assert_eq!(drawn, expected);
}

#[test]
fn divides_keeps_the_quotient_on_the_step_grid() {
    let mut supply = NumberSupply::with_seed(domain(1.0, 10.0, 0.5), 13);
    let drawn = draw_all(&mut supply, DrawRequest::new().divides(3.0), 400);
    let expected: BTreeSet<String> = ["1.0", "1.5", "2.0", "3.0", "6.0"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(drawn, expected);

    let mut integers = NumberSupply::with_seed(domain(1.0, 10.0, 1.0), 13);
    assert!(matches!(
        integers.next(DrawRequest::new().divides(7.0).minimum(2.0).maximum(6.0)),
        Err(RangeError::NoCandidate { .. })
    ));
}

#[test]
fn divides_enumerates_divisors_of_the_target() {
    let mut supply = NumberSupply::with_seed(domain(1.0, 1e9, 1.0), 2);
    let drawn = draw_all(&mut supply, DrawRequest::new().divides(12.0), 300);
    let expected: BTreeSet<String> = ["1", "2", "3", "4", "6", "12"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(drawn, expected);

    let mut signed = NumberSupply::with_seed(domain(-10.0, 10.0, 1.0), 2);
    let drawn = draw_all(&mut signed, DrawRequest::new().divides(-4.0), 300);
    let expected: BTreeSet<String> = ["-4", "-2", "-1", "1", "2", "4"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(drawn, expected);
}

#[test]
fn divides_zero_draws_any_non_zero_value() {
    let mut supply = NumberSupply::with_seed(domain(0.0, 3.0, 1.0), 6);
    let drawn = draw_all(&mut supply, DrawRequest::new().divides(0.0), 200);
    let expected: BTreeSet<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();
    assert_eq!(drawn, expected);
}

#[test]
fn divisor_draw_stops_at_its_time_budget() {
    let mut supply =
        NumberSupply::with_seed(domain(1.0, 10.0, 1.0), 1).with_draw_budget(Duration::ZERO);
    assert_eq!(
        supply.next(DrawRequest::new().divides(12.0)),
        Err(RangeError::Timeout {
            budget: Duration::ZERO
        })
    );
    // Plain draws never enumerate, so they ignore the budget.
    assert!(supply.next(DrawRequest::new()).is_ok());
}

#[test]
fn seeded_supplies_repeat_their_draws() {
    let request = DrawRequest::new();
    let mut a = NumberSupply::with_seed(domain(0.0, 100.0, 0.5), 42);
    let mut b = NumberSupply::with_seed(domain(0.0, 100.0, 0.5), 42);
    for _ in 0..20 {
        assert_eq!(a.next(request), b.next(request));
    }
}

#[test]
fn number_usage_is_keyed_by_formatted_value() {
    let mut supply = NumberSupply::with_seed(domain(0.0, 10.0, 0.5), 1);
    supply.fly_back(2.5);
    supply.fly_back(2.5000000001);
    supply.fly_back(4.0);
    assert_eq!(supply.usage(2.5), 2);
    assert_eq!(supply.usage(4.0), 1);
    assert_eq!(supply.usage(1.0), 0);
    assert_eq!(
        supply.statistics(),
        vec![("2.5".to_string(), 2), ("4.0".to_string(), 1)]
    );
}

#[test]
fn operators_round_trip_symbols() {
    for operator in Operator::COMPUTABLE {
        assert_eq!(Operator::from_symbol(operator.symbol()), Some(operator));
        assert!(operator.is_computable());
    }
    assert_eq!(Operator::from_symbol('='), Some(Operator::Eq));
    assert!(!Operator::Eq.is_computable());
    assert_eq!(Operator::from_symbol('x'), None);
    assert_eq!(Operator::Div.apply(6.0, 3.0), Some(2.0));
    assert_eq!(Operator::Div.apply(6.0, 0.0), None);
    assert_eq!(Operator::Eq.apply(1.0, 1.0), None);
}

#[test]
fn operator_order_prefers_least_used() {
    let mut supply = OperatorSupply::default();
    assert_eq!(supply.operators_weighted(&[]), Operator::COMPUTABLE.to_vec());

    supply.fly_back(Operator::Add);
    supply.fly_back(Operator::Add);
    supply.fly_back(Operator::Mul);
    assert_eq!(
        supply.operators_weighted(&[]),
        vec![Operator::Sub, Operator::Div, Operator::Mul, Operator::Add]
    );
    assert_eq!(
        supply.operators_weighted(&[Operator::Div]),
        vec![Operator::Sub, Operator::Mul, Operator::Add]
    );
    assert_eq!(
        supply.iterate_weighted(&[Operator::Sub]).next(),
        Some(Operator::Div)
    );
    assert_eq!(
        supply.statistics(),
        vec![
            (Operator::Add, 2),
            (Operator::Sub, 0),
            (Operator::Mul, 1),
            (Operator::Div, 0)
        ]
    );
}

#[test]
fn operator_supply_validates_its_list() {
    assert!(matches!(
        OperatorSupply::new(vec![Operator::Add, Operator::Eq]),
        Err(ConfigError::SeparatorOperator)
    ));
    assert!(matches!(
        OperatorSupply::new(Vec::new()),
        Err(ConfigError::NoOperators)
    ));
    let supply = OperatorSupply::new(vec![Operator::Mul, Operator::Add, Operator::Mul])
        .expect("supply should build");
    assert_eq!(supply.operators(), &[Operator::Mul, Operator::Add]);
}

#[test]
fn builds_expressions_from_grid_slots() {
    let expression = Expression::from_values(&[
        Token::Number(6.0),
        Token::Unknown,
        Token::Number(3.0),
        Token::Operator(Operator::Eq),
        Token::Unknown,
    ])
    .expect("slots should be accepted");
    assert_eq!(expression.operand1(), Slot::Known(6.0));
    assert_eq!(expression.operator(), Slot::Unknown);
    assert_eq!(expression.operand2(), Slot::Known(3.0));
    assert_eq!(expression.result(), Slot::Unknown);
    assert_eq!(expression.length(), EXPRESSION_LENGTH);
    assert_eq!(expression.to_string(), "6 ? 3 = ?");
    assert_eq!(
        expression.values(),
        [
            Token::Number(6.0),
            Token::Unknown,
            Token::Number(3.0),
            Token::Operator(Operator::Eq),
            Token::Unknown,
        ]
    );
    assert!(!expression.is_empty());
    assert!(!expression.is_complete());
    assert!(Expression::empty().is_empty());
    assert_eq!(Expression::empty().to_string(), "? ? ? = ?");
}

#[test]
fn rejects_malformed_grid_slots() {
    let n = Token::Number(1.0);
    let eq = Token::Operator(Operator::Eq);
    let add = Token::Operator(Operator::Add);
    let cases = vec![
        ("too short", vec![n, add, n, eq], "Expected 5 slots, found 4"),
        ("separator as operator", vec![n, eq, n, eq, n], "Slot 2 (operator)"),
        ("number as operator", vec![n, n, n, eq, n], "Slot 2 (operator)"),
        ("operator as separator", vec![n, add, n, add, n], "Slot 4"),
        ("operator as operand", vec![add, add, n, eq, n], "Slot 1 (operand1)"),
        ("operator as result", vec![n, add, n, eq, add], "Slot 5 (result)"),
        (
            "non-finite operand",
            vec![n, add, Token::Number(f64::INFINITY), eq, n],
            "Slot 3 (operand2)",
        ),
    ];
    for (case_name, values, needle) in cases {
        let err = Expression::from_values(&values).expect_err("slots should be rejected");
        assert!(
            err.message.contains(needle),
            "{case_name}: unexpected message '{}'",
            err.message
        );
        assert_eq!(err.line, 0, "{case_name}: grid errors carry no location");
    }
}

#[test]
fn unknown_separator_slot_is_accepted() {
    let expression = Expression::from_values(&[
        Token::Number(1.0),
        Token::Operator(Operator::Add),
        Token::Number(1.0),
        Token::Unknown,
        Token::Number(2.0),
    ])
    .expect("slots should be accepted");
    assert!(expression.is_complete());
}

#[test]
fn match_preserves_known_slots() {
    let partial = expr("6 ? ? = ?");
    assert!(partial.is_match(&expr("6 + 3 = 9")));
    assert!(partial.is_match(&expr("6.0000001 + 3 = 9")));
    assert!(!partial.is_match(&expr("7 + 3 = 10")));
    assert!(!partial.is_match(&expr("? + 3 = 9")));

    let fixed_operator = expr("? + ? = ?");
    assert!(fixed_operator.is_match(&expr("1 + 1 = 2")));
    assert!(!fixed_operator.is_match(&expr("1 * 1 = 1")));
    assert!(Expression::empty().is_match(&expr("1 - 1 = 0")));
}

#[test]
fn validator_checks_range_and_arithmetic() {
    let validator = ExpressionValidator::new(1.0, 10.0);
    assert!(validator.validate(&expr("6 / 3 = 2")));
    assert!(!validator.validate(&expr("0.1 + 0.2 = 0.3")));
    assert!(!validator.validate(&expr("6 * 3 = 18")));
    assert!(!validator.validate(&expr("6 + 3 = 10")));
    assert!(!validator.validate(&expr("6 + ? = 9")));

    let with_zero = ExpressionValidator::new(0.0, 10.0);
    assert!(with_zero.validate(&expr("0.1 + 0.2 = 0.3")));
    assert!(!with_zero.validate(&expr("5 / 0 = 0")));
    assert!(with_zero.validate(&expr("0 / 5 = 0")));
}

#[test]
fn validator_follows_domain_bounds() {
    let validator = ExpressionValidator::for_domain(&domain(-5.0, 5.0, 1.0));
    assert_eq!(validator.minimum(), -5.0);
    assert_eq!(validator.maximum(), 5.0);
    assert!(validator.validate(&expr("-3 - 2 = -5")));
}

#[test]
fn parses_textual_expressions() {
    let expression = expr("  6 ? 3 = ?  ");
    assert_eq!(expression.to_string(), "6 ? 3 = ?");
    assert_eq!(expr("-3 * 2.5 = -7.5").to_string(), "-3 * 2.5 = -7.5");
    assert_eq!(expr("? ? ? ? ?"), Expression::empty());
    assert_eq!(expr("1e1 - 4 = 6").operand1(), Slot::Known(10.0));
}

#[test]
fn reports_format_errors_with_caret() {
    assert_format_error_case("unknown word", "6 x 3 = ?", 3, "unexpected 'x'");
    assert_format_error_case("glued tokens", "6+3 = ? ?", 1, "unexpected '6+3'");
    assert_format_error_case("too many slots", "6 ? 3 = ? ?", 11, "Expected 5 slots, found 6");
    assert_format_error_case("bad operator", "6 = 3 = ?", 3, "Slot 2 (operator)");
    assert_format_error_case("bad separator", "6 + 3 + ?", 7, "Slot 4");
    assert_format_error_case("operator as operand", "6 + * = ?", 5, "Slot 3 (operand2)");
}

#[test]
fn format_error_display_includes_location() {
    let err = parse_expression("6 x 3 = ?").expect_err("parse should fail");
    let rendered = err.to_string();
    assert!(rendered.contains("line 1, column 3"));
    assert!(rendered.contains("6 x 3 = ?"));

    let short = parse_expression("6 + 3").expect_err("parse should fail");
    assert_eq!(short.line, 0);
    assert_eq!(short.to_string(), "Expected 5 slots, found 3");
}

#[test]
fn selects_strategies_in_priority_order() {
    assert_eq!(
        Strategy::select(&expr("? + ? = ?")),
        Some(Strategy::ResultUnknown)
    );
    assert_eq!(
        Strategy::select(&expr("4 ? 5 = ?")),
        Some(Strategy::ResultUnknown)
    );
    assert_eq!(
        Strategy::select(&expr("4 ? 5 = 9")),
        Some(Strategy::OperatorUnknown)
    );
    assert_eq!(
        Strategy::select(&expr("? ? 5 = 9")),
        Some(Strategy::ResultKnown)
    );
    assert_eq!(
        Strategy::select(&expr("4 + ? = 9")),
        Some(Strategy::ResultKnown)
    );
    assert_eq!(Strategy::select(&expr("4 + 5 = 9")), None);
}

#[test]
fn resolves_fully_unknown_addition_in_range() {
    let mut resolver = resolver();
    for _ in 0..20 {
        let resolved = resolver
            .resolve_str("? + ? = ?")
            .expect("addition should resolve");
        assert!(resolved.is_complete());
        assert!(resolver.validator().validate(&resolved));
        assert_eq!(resolved.operator(), Slot::Known(Operator::Add));
    }
}

#[test]
fn free_operator_follows_usage_order() {
    let mut resolver = resolver();
    assert_eq!(resolve_text(&mut resolver, "6 ? 3 = ?"), "6 + 3 = 9");
    assert_eq!(resolve_text(&mut resolver, "6 ? 3 = ?"), "6 - 3 = 3");
    // `6 * 3` leaves the range, so division is next.
    assert_eq!(resolve_text(&mut resolver, "6 ? 3 = ?"), "6 / 3 = 2");
    assert_eq!(resolver.operator_supply().usage(Operator::Mul), 0);
}

#[test]
fn zero_result_never_divides_by_zero() {
    for seed in 0..20 {
        let mut resolver = resolver_with(0.0, 10.0, 1.0, seed);
        for _ in 0..8 {
            let resolved = resolver
                .resolve_str("? ? ? = 0")
                .expect("zero result should resolve");
            assert!(resolver.validator().validate(&resolved));
            if resolved.operator() == Slot::Known(Operator::Div) {
                assert_ne!(resolved.operand2(), Slot::Known(0.0));
            }
        }
    }
}

#[test]
fn fixed_operands_are_never_rewritten() {
    let mut resolver = resolver();
    for _ in 0..5 {
        assert_eq!(resolve_text(&mut resolver, "4 + 5 = ?"), "4 + 5 = 9");
    }
}

#[test]
fn operator_search_finds_the_matching_operator() {
    let mut resolver = resolver();
    for _ in 0..5 {
        assert_eq!(resolve_text(&mut resolver, "4 ? 5 = 9"), "4 + 5 = 9");
    }
    assert_eq!(resolve_text(&mut resolver, "8 ? 2 = 4"), "8 / 2 = 4");
    assert_eq!(resolver.operator_supply().usage(Operator::Add), 5);
}

#[test]
fn operator_search_fails_when_nothing_matches() {
    let mut resolver = resolver();
    let err = resolver
        .resolve_str("4 ? 5 = 7")
        .expect_err("no operator yields 7");
    assert_eq!(err.kind(), FailureKind::NotResolvable);
    assert_eq!(err.expression(), Some(&expr("4 ? 5 = 7")));
}

#[test]
fn fixed_zero_divisor_is_not_resolvable() {
    let mut resolver = resolver();
    let err = resolver
        .resolve_str("10 / 0 = ?")
        .expect_err("division by zero cannot resolve");
    assert_eq!(err.kind(), FailureKind::NotResolvable);
    assert!(err.kind().is_memoizable());
    assert!(!err.kind().is_fatal());

    let mut with_zero = resolver_with(0.0, 10.0, 1.0, 1);
    assert_eq!(resolve_text(&mut with_zero, "10 ? 0 = ?"), "10 + 0 = 10");
}

#[test]
fn inverts_operators_for_one_missing_operand() {
    let mut resolver = resolver();
    let cases = [
        ("? + 3 = 9", "6 + 3 = 9"),
        ("? - 3 = 4", "7 - 3 = 4"),
        ("8 - ? = 3", "8 - 5 = 3"),
        ("? * 3 = 9", "3 * 3 = 9"),
        ("2 * ? = 8", "2 * 4 = 8"),
        ("? / 2 = 4", "8 / 2 = 4"),
        ("8 / ? = 4", "8 / 2 = 4"),
        ("? ? 3 = 9", "6 + 3 = 9"),
    ];
    for (source, expected) in cases {
        assert_eq!(resolve_text(&mut resolver, source), expected, "{source}");
    }
}

#[test]
fn zero_factor_draws_the_free_operand() {
    let mut resolver = resolver_with(0.0, 10.0, 1.0, 4);
    for source in ["0 * ? = 0", "? * 0 = 0", "0 / ? = 0"] {
        let resolved = resolver.resolve_str(source).expect("zero product resolves");
        assert!(resolver.validator().validate(&resolved), "{source}");
        assert!(expr(source).is_match(&resolved), "{source}");
    }
    let err = resolver
        .resolve_str("0 * ? = 5")
        .expect_err("zero factor cannot yield 5");
    assert_eq!(err.kind(), FailureKind::NotResolvable);
}

#[test]
fn inexact_inverse_is_not_resolvable() {
    let mut resolver = resolver();
    let err = resolver
        .resolve_str("? * 3 = 10")
        .expect_err("10 is not a multiple of 3");
    assert_eq!(err.kind(), FailureKind::NotResolvable);
}

#[test]
fn resolves_both_operands_from_a_known_result() {
    let mut resolver = resolver_with(0.0, 20.0, 1.0, 21);
    for source in ["? + ? = 12", "? - ? = 3", "? * ? = 12", "? / ? = 4", "? ? ? = 6"] {
        for _ in 0..10 {
            let resolved = resolver.resolve_str(source).expect("shape should resolve");
            assert!(resolver.validator().validate(&resolved), "{source}");
            assert!(expr(source).is_match(&resolved), "{source}");
        }
    }
}

#[test]
fn unsatisfiable_fixed_operator_is_not_resolvable() {
    let mut resolver = resolver();
    let err = resolver
        .resolve_str("? + ? = 0")
        .expect_err("two positive addends cannot sum to 0");
    assert_eq!(err.kind(), FailureKind::NotResolvable);
    assert!(matches!(
        err,
        ResolveError::NotResolvable {
            source: Some(RangeError::EmptyRange { .. }),
            ..
        }
    ));
}

#[test]
fn budget_exhaustion_is_maybe_not_resolvable() {
    let mut resolver = resolver();
    let err = resolver
        .resolve_str("? ? ? = 0")
        .expect_err("0 lies outside [1, 10]");
    assert_eq!(err.kind(), FailureKind::MaybeNotResolvable);
    assert!(!err.kind().is_memoizable());
    match err {
        ResolveError::MaybeNotResolvable { attempts, .. } => assert_eq!(attempts, 8),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn wide_domain_product_resolves() {
    let mut resolver = resolver_with(1.0, 1e9, 1.0, 12);
    for _ in 0..10 {
        let resolved = resolver
            .resolve_str("? * ? = 12")
            .expect("12 has divisors in range");
        assert!(resolver.validator().validate(&resolved));
    }
}

#[test]
fn draw_timeout_is_never_memoizable() {
    let domain = domain(1.0, 10.0, 1.0);
    let cases = [
        ("both factors drawn", Operator::Mul, "? * ? = 12"),
        ("divisor of a fixed dividend", Operator::Div, "6 / ? = ?"),
        ("divisor of a drawn dividend", Operator::Div, "? / ? = ?"),
    ];
    for (case_name, operator, source) in cases {
        let mut resolver = ExpressionResolver::new(
            ExpressionValidator::for_domain(&domain),
            NumberSupply::with_seed(domain.clone(), 3).with_draw_budget(Duration::ZERO),
            OperatorSupply::new(vec![operator]).expect("supply should build"),
        );
        let err = resolver
            .resolve_str(source)
            .expect_err("every divisor draw times out");
        assert_eq!(
            err.kind(),
            FailureKind::MaybeNotResolvable,
            "{case_name}: unexpected failure {err:?}"
        );
        assert!(!err.kind().is_memoizable(), "{case_name}");
    }
}

#[test]
fn short_operator_order_runs_out_before_the_budget() {
    let mut resolver = resolver().with_limits(SearchLimits {
        operator_passes: 1,
        ..SearchLimits::default()
    });
    let err = resolver
        .resolve_str("? ? ? = 0")
        .expect_err("0 lies outside [1, 10]");
    assert_eq!(err.kind(), FailureKind::NotResolvable);
}

#[test]
fn fly_back_counts_only_filled_slots() {
    let mut resolver = resolver();
    let resolved = resolver
        .resolve_str("6 + ? = ?")
        .expect("expression should resolve");
    let supply = resolver.number_supply();
    assert_eq!(supply.usage(6.0), 0);
    let total: usize = supply.statistics().iter().map(|(_, count)| count).sum();
    assert_eq!(total, 2);
    if let (Slot::Known(operand2), Slot::Known(result)) = (resolved.operand2(), resolved.result()) {
        assert_eq!(supply.usage(operand2), 1);
        assert_eq!(supply.usage(result), 1);
    }
    assert_eq!(resolver.operator_supply().usage(Operator::Add), 0);
}

#[test]
fn complete_input_is_checked_not_resolved() {
    let mut resolver = resolver();
    assert_eq!(resolve_text(&mut resolver, "4 + 5 = 9"), "4 + 5 = 9");
    let err = resolver
        .resolve_str("4 + 5 = 10")
        .expect_err("fixed expression is wrong");
    assert_eq!(err.kind(), FailureKind::NotResolvable);

    let stats = resolver.statistics();
    assert!(stats.numbers.is_empty());
    assert!(stats.operators.iter().all(|(_, count)| *count == 0));
}

#[test]
fn malformed_text_is_a_fatal_format_error() {
    let mut resolver = resolver();
    let err = resolver
        .resolve_str("6 ? 3")
        .expect_err("three slots are not an expression");
    assert_eq!(err.kind(), FailureKind::Format);
    assert!(err.kind().is_fatal());
    assert_eq!(err.expression(), None);
    assert_eq!(err.to_string(), "Expected 5 slots, found 3");
}

#[test]
fn subtraction_stays_non_negative() {
    let mut resolver = resolver_with(0.0, 10.0, 1.0, 17);
    for _ in 0..30 {
        let resolved = resolver
            .resolve_str("? - ? = ?")
            .expect("subtraction should resolve");
        assert!(resolver.validator().validate(&resolved));
    }
}

#[test]
fn resolves_on_a_fractional_step() {
    let mut resolver = resolver_with(0.0, 10.0, 0.5, 8);
    for _ in 0..20 {
        let added = resolver
            .resolve_str("1.5 + ? = ?")
            .expect("addition should resolve");
        assert!(resolver.validator().validate(&added));

        let divided = resolver
            .resolve_str("? / 1.5 = ?")
            .expect("division should resolve");
        assert!(resolver.validator().validate(&divided));
        if let Slot::Known(result) = divided.result() {
            assert!(is_zero(result - result.round()));
        }
    }
}

#[test]
fn seeded_resolvers_are_reproducible() {
    let mut a = resolver_with(0.0, 50.0, 1.0, 99);
    let mut b = resolver_with(0.0, 50.0, 1.0, 99);
    for _ in 0..10 {
        assert_eq!(a.resolve_str("? ? ? = ?"), b.resolve_str("? ? ? = ?"));
    }
}

#[test]
fn statistics_render_both_supplies() {
    let mut resolver = resolver();
    resolve_text(&mut resolver, "4 ? 5 = ?");
    let stats = resolver.statistics();
    assert_eq!(stats.numbers, vec![("9".to_string(), 1)]);
    assert_eq!(
        stats.to_string(),
        "numbers:\n  9: 1\noperators:\n  +: 1\n  -: 0\n  *: 0\n  /: 0\n"
    );
}

#[test]
fn config_loads_from_json_with_defaults() {
    let config: ResolverConfig = serde_json::from_str(
        r#"{ "minimum": 0, "maximum": 20, "operators": ["+", "*"], "seed": 42 }"#,
    )
    .expect("config should deserialize");
    assert_eq!(config.minimum, 0.0);
    assert_eq!(config.maximum, 20.0);
    assert_eq!(config.step, 1.0);
    assert_eq!(config.operators, vec![Operator::Add, Operator::Mul]);
    assert_eq!(config.max_attempts, 8);
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.validate(), Ok(()));

    let mut resolver = ExpressionResolver::from_config(&config).expect("config should build");
    let resolved = resolver.resolve_str("? ? ? = ?").expect("should resolve");
    assert!(matches!(
        resolved.operator(),
        Slot::Known(Operator::Add | Operator::Mul)
    ));
}

#[test]
fn config_validation_rejects_bad_settings() {
    let cases = vec![
        (
            "zero step",
            ResolverConfig {
                step: 0.0,
                ..ResolverConfig::default()
            },
            ConfigError::InvalidStep(0.0),
        ),
        (
            "separator",
            ResolverConfig {
                operators: vec![Operator::Eq],
                ..ResolverConfig::default()
            },
            ConfigError::SeparatorOperator,
        ),
        (
            "no operators",
            ResolverConfig {
                operators: Vec::new(),
                ..ResolverConfig::default()
            },
            ConfigError::NoOperators,
        ),
        (
            "no attempts",
            ResolverConfig {
                max_attempts: 0,
                ..ResolverConfig::default()
            },
            ConfigError::ZeroBudget("max_attempts"),
        ),
    ];
    for (case_name, config, expected) in cases {
        assert_eq!(config.validate(), Err(expected.clone()), "{case_name}");
        assert!(
            ExpressionResolver::from_config(&config).is_err(),
            "{case_name}: resolver should not build"
        );
    }
}

#[test]
fn explicit_parts_build_a_resolver() {
    let domain = domain(1.0, 10.0, 1.0);
    let mut resolver = ExpressionResolver::new(
        ExpressionValidator::for_domain(&domain),
        NumberSupply::with_seed(domain, 5),
        OperatorSupply::new(vec![Operator::Sub]).expect("supply should build"),
    );
    assert_eq!(resolver.limits(), SearchLimits::default());
    let resolved = resolver.resolve_str("? ? ? = ?").expect("should resolve");
    assert_eq!(resolved.operator(), Slot::Known(Operator::Sub));
}
