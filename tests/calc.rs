use ratcalc::{calc, parse, CalcError, Malformed, Num, Resolver, Variables};

fn rat(numer: i64, denom: i64) -> Num {
    Num::new(numer.into(), denom.into())
}

fn int(n: i64) -> Num {
    rat(n, 1)
}

fn assert_calc(formula: &str, expected: Num) {
    match calc(formula, None, None) {
        Ok(n) => assert_eq!(n, expected, "formula: {formula}"),
        Err(e) => panic!("formula {formula:?} failed: {e}"),
    }
}

fn numbers() -> Variables {
    Variables::from([
        ("one".to_owned(), int(100)),
        ("two".to_owned(), int(200)),
        ("three".to_owned(), int(300)),
    ])
}

#[test]
fn constant() {
    assert_calc("100", int(100));
    assert_calc("  42  ", int(42));
}

#[test]
fn basic_operations() {
    assert_calc("100+100", int(200));
    assert_calc("100-50", int(50));
    assert_calc("100*100", int(10000));
    assert_calc("100/100", int(1));
    assert_calc("3/2", rat(3, 2));
}

// there is no unary minus, so negative operands are written as a subtraction
fn operand(n: i64) -> String {
    if n < 0 {
        format!("(0-{})", -n)
    } else {
        n.to_string()
    }
}

#[test]
fn division_is_exact() {
    for (a, b) in [(1, 3), (-7, 5), (22, 7), (10, 4), (0, 9), (123456789, -1000)] {
        assert_calc(&format!("{}/{}", operand(a), operand(b)), rat(a, b));
    }
}

#[test]
fn equal_precedence_is_left_associative() {
    assert_calc("100/100/100", rat(1, 100));
    assert_calc("100-10-1", int(89));
    assert_calc("2*3/4", rat(3, 2));
    assert_calc("12|3^5", int(10));
}

#[test]
fn associativity_matches_explicit_grouping() {
    for (a, b, c) in [("1/2", "1/3", "1/6"), ("7", "0.25", "3/4"), ("0x10", "077", "1.5")] {
        let flat = calc(&format!("{a}+{b}+{c}"), None, None).unwrap();
        let grouped = calc(&format!("({a}+{b})+{c}"), None, None).unwrap();
        assert_eq!(flat, grouped);
    }
}

#[test]
fn precedence_and_parentheses() {
    for (a, b, c) in [(2i64, 3i64, 4i64), (10, 0, 7), (1, 100, 1000)] {
        assert_calc(&format!("{a}+{b}*{c}"), int(a + b * c));
        assert_calc(&format!("({a}+{b})*{c}"), int((a + b) * c));
    }
    assert_calc("(100+100)*100", int(20000));
    assert_calc("100*(100+100)", int(20000));
    assert_calc("(100+100)/100", int(2));
    assert_calc("100/(100+100)", rat(1, 2));
    assert_calc("1-2*3+4", int(-1));
}

#[test]
fn nested_parentheses() {
    assert_calc("(100*(100-100)+100)*100", int(10000));
    assert_calc("100*((100+100)/100+100)", int(10200));
    assert_calc("((100+100)/100+8)/2*10", int(50));
    assert_calc("(10*(100+100))/10/2", int(100));
    assert_calc("((10/(100+100))+1)*10", rat(21, 2));
    assert_calc("1/(5/10)", int(2));
}

#[test]
fn negative_intermediate_results() {
    assert_calc("1+(10-100)", int(-89));
    assert_calc("(10-100)*(10-100)", int(8100));
    assert_eq!(calc("1+(10-100)", None, None).unwrap().to_string(), "-89");
}

#[test]
fn named_values() {
    let vars = numbers();
    assert_eq!(calc("one", Some(&vars), None), Ok(int(100)));
    assert_eq!(calc("two", Some(&vars), None), Ok(int(200)));
    assert_eq!(calc("one+two", Some(&vars), None), Ok(int(300)));
    assert_eq!(calc("100+one", Some(&vars), None), Ok(int(200)));
    assert_eq!(calc("one+two+three", Some(&vars), None), Ok(int(600)));
    assert_eq!(calc("two/400", Some(&vars), None), Ok(rat(1, 2)));
    assert_eq!(calc("one/two/three", Some(&vars), None), Ok(rat(1, 600)));
}

#[test]
fn avoid_zero_division_by_adding_constant() {
    let vars = Variables::from([("one".to_owned(), int(10)), ("two".to_owned(), int(0))]);
    assert_eq!(calc("one/(two+1)", Some(&vars), None), Ok(int(10)));
}

#[test]
fn fallback_resolves_unknown_names() {
    let vars = Variables::from([("one".to_owned(), int(100)), ("two".to_owned(), int(200))]);
    let fallback = |name: &str| (name == "three").then(|| int(300));
    assert_eq!(
        calc("one+two*three", Some(&vars), Some(&fallback)),
        Ok(int(100 + 200 * 300))
    );
}

#[test]
fn variables_win_over_fallback() {
    let vars = numbers();
    let fallback = |_: &str| Some(int(-1));
    assert_eq!(calc("one+four", Some(&vars), Some(&fallback)), Ok(int(99)));
}

#[test]
fn whitespace_is_ignored() {
    let vars = numbers();
    let spaced = calc("one + two   *   three", Some(&vars), None).unwrap();
    let packed = calc("one+two*three", Some(&vars), None).unwrap();
    assert_eq!(spaced, packed);
    assert_eq!(spaced, int(60100));
    assert_calc(" ( 1 ) + ( 2 ) ", int(3));
}

#[test]
fn base_prefixes() {
    assert_calc("0xFF", int(255));
    assert_calc("077", int(63));
    assert_calc("0b1010+0o10", int(18));
    assert_calc("08", int(8));
}

#[test]
fn decimal_literals() {
    assert_calc("1.5*2", int(3));
    assert_calc("0.1+0.2", rat(3, 10));
    assert_calc("2.5e2/.5", int(500));
}

#[test]
fn bitwise_operators() {
    assert_calc("12&10", int(8));
    assert_calc("12|3", int(15));
    assert_calc("12^10", int(6));
    assert_calc("0xF0|0x0F", int(255));
    assert_calc("7/2|4", int(7));
    // & binds like *, | and ^ like +
    assert_calc("1|6&3", int(3));
    assert_calc("2*3&7", int(6));
}

#[test]
fn bitwise_overflow() {
    assert_eq!(
        calc("(0-1)&1", None, None),
        Err(CalcError::TruncationOverflow(int(-1)))
    );
    assert!(matches!(
        calc("0x10000000000000000|1", None, None),
        Err(CalcError::TruncationOverflow(_))
    ));
}

#[test]
fn invalid_literal() {
    match calc("0xXX", None, None) {
        Err(CalcError::UnresolvedLiteral { formula, source }) => {
            assert_eq!(formula, "0xXX");
            assert_eq!(source.0, "0xXX");
        }
        other => panic!("expected an unresolved literal, got {other:?}"),
    }
}

#[test]
fn unknown_variable() {
    let vars = numbers();
    let fallback = |name: &str| (name == "handle").then(|| int(400));
    assert!(matches!(
        calc("unknownVar", None, None),
        Err(CalcError::UnresolvedLiteral { .. })
    ));
    assert!(matches!(
        calc("four", Some(&vars), Some(&fallback)),
        Err(CalcError::UnresolvedLiteral { .. })
    ));
    assert!(matches!(
        calc("one+two+handle+four", Some(&vars), None),
        Err(CalcError::UnresolvedLiteral { .. })
    ));
}

#[test]
fn division_by_zero() {
    assert_eq!(calc("1/0", None, None), Err(CalcError::DivisionByZero(int(1))));
    assert_eq!(
        calc("5/(3-3)", None, None),
        Err(CalcError::DivisionByZero(int(5)))
    );
}

#[test]
fn malformed_formulas() {
    for (formula, expected) in [
        ("", Malformed::Empty),
        ("+", Malformed::MissingOperand),
        ("1+", Malformed::MissingOperand),
        ("*1", Malformed::MissingOperand),
        ("(1+2", Malformed::MissingClosingParenthesis),
        ("1+2)", Malformed::UnexpectedClosingParenthesis),
        ("(1)(2)", Malformed::MissingOperator),
    ] {
        match calc(formula, None, None) {
            Err(CalcError::MalformedExpression { reason, .. }) => {
                assert_eq!(reason, expected, "formula: {formula:?}")
            }
            other => panic!("formula {formula:?}: expected {expected:?}, got {other:?}"),
        }
    }
}

#[test]
fn long_flat_chain() {
    let formula = vec!["1"; 100_000].join("+");
    assert_eq!(calc(&formula, None, None), Ok(int(100_000)));

    let grouped = parse(&formula, &Resolver::default()).unwrap().to_string();
    assert!(grouped.starts_with("(((("));
    assert!(grouped.ends_with("+ 1)"));
}

#[test]
fn deeply_nested_parentheses() {
    let depth = 50_000;
    let formula = format!("{}1{}", "(1+".repeat(depth), ")".repeat(depth));
    assert_eq!(calc(&formula, None, None), Ok(int(depth as i64 + 1)));
}

#[test]
fn result_renders_as_fraction() {
    let n = calc("3/2", None, None).unwrap();
    assert_eq!(n.to_string(), "3/2");
    assert_eq!((n.numer().to_string(), n.denom().to_string()), ("3".to_owned(), "2".to_owned()));
}

#[test]
fn error_messages_mention_formula() {
    let e = calc("1 + what", None, None).unwrap_err();
    assert_eq!(
        e.to_string(),
        "could not parse literal in formula `1 + what`: could not parse `what` as a rational"
    );
}
