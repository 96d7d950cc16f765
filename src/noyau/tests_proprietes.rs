//! Tests de propriétés (campagne) : précédence, postfixes, modes, bornes, erreurs typées.
//!
//! Chaque propriété est vérifiée dans les DEUX représentations quand elle ne dépend pas
//! de l’arrondi : la précision ne change que la valeur, jamais la structure.

use super::eval::{compiler, ModeAngle, ModePrecision, Session};
use super::jetons::format_tokens;
use super::EvalError;

const MODES: [ModePrecision; 2] = [ModePrecision::Decimal, ModePrecision::Number];

fn session(precision: ModePrecision) -> Session {
    Session::new(ModeAngle::Deg, precision)
}

fn eval_ok(s: &Session, expr: &str) -> String {
    s.evaluate(expr, "")
        .unwrap_or_else(|e| panic!("expr={expr:?} mode={:?} err={e}", s.precision_mode()))
        .text
}

fn eval_err(s: &Session, expr: &str) -> EvalError {
    match s.evaluate(expr, "") {
        Ok(r) => panic!("expr={expr:?} devait échouer, a donné {:?}", r.text),
        Err(e) => e,
    }
}

fn assert_partout(expr: &str, attendu: &str) {
    for m in MODES {
        assert_eq!(eval_ok(&session(m), expr), attendu, "expr={expr:?} mode={m:?}");
    }
}

fn assert_erreur_partout(expr: &str, attendue: EvalError) {
    for m in MODES {
        assert_eq!(eval_err(&session(m), expr), attendue, "expr={expr:?} mode={m:?}");
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn prop_moins_unaire_plus_faible_que_puissance() {
    assert_partout("-2^2", "-4");
    assert_partout("(-2)^2", "4");
    assert_partout("2^(-1)", "0.5");
    // neg dépile le '^' : exposant sans opérande droit
    assert_erreur_partout("2^-1", EvalError::InsufficientOperands("^".into()));
    assert_erreur_partout("2^-3", EvalError::InsufficientOperands("^".into()));
}

#[test]
fn prop_puissance_associative_a_droite() {
    assert_partout("2^3^2", "512");
    assert_partout("(2^3)^2", "64");
}

#[test]
fn prop_gauche_a_droite() {
    assert_partout("8/4/2", "1");
    assert_partout("10-4-3", "3");
    assert_partout("2*3+4*5", "26");
}

/* ------------------------ Multiplication implicite ------------------------ */

#[test]
fn prop_multiplication_implicite() {
    for m in MODES {
        let s = session(m);
        assert_eq!(eval_ok(&s, "2pi"), eval_ok(&s, "2*pi"));
        assert_eq!(eval_ok(&s, "3(4+5)"), "27");
        assert_eq!(eval_ok(&s, "(1+1)(2+2)"), "8");
        assert_eq!(eval_ok(&s, "3!2"), "12");
    }
    assert_eq!(
        eval_ok(&session(ModePrecision::Decimal), "2pi"),
        "6.2831853071795864769252867665590057683943387987502"
    );
    assert_eq!(
        eval_ok(&session(ModePrecision::Decimal), "2e"),
        "5.43656365691809047072057494270532499551449418739992"
    );
}

/* ------------------------ Postfixes ------------------------ */

#[test]
fn prop_postfixes() {
    assert_partout("0!", "1");
    assert_partout("5!", "120");
    assert_partout("50%", "0.5");
    assert_partout("200*10%", "20");
    assert_partout("(5!)-3", "117");
    assert_partout("3!!", "720");
    // après un postfixe, '-' est préfixe : deux valeurs restent sur la pile
    assert_erreur_partout("5!-3", EvalError::MalformedExpression);
    assert_erreur_partout("50%+1", EvalError::MalformedExpression);
    assert_partout("20!", "2432902008176640000");
}

#[test]
fn prop_factorielle_bornes() {
    assert_erreur_partout("5001!", EvalError::FactorialTooLarge);
    assert_erreur_partout("2.5!", EvalError::InvalidFactorialOperand);
    assert_erreur_partout("(-1)!", EvalError::InvalidFactorialOperand);
    // postfixe avant négation : -(1!)
    assert_partout("-1!", "-1");
}

#[test]
fn prop_factorielle_5000_exacte_puis_arrondie() {
    assert_eq!(
        eval_ok(&session(ModePrecision::Decimal), "5000!"),
        "4.22857792660554352220106420023358440539078667462664674884978e+16325"
    );
    // hors de portée d’un double
    assert_eq!(eval_ok(&session(ModePrecision::Number), "5000!"), "Infinity");
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn prop_division_par_zero() {
    assert_erreur_partout("1/0", EvalError::DivisionByZero);
    assert_erreur_partout("1/(2-2)", EvalError::DivisionByZero);
    assert_erreur_partout("5/0%", EvalError::DivisionByZero);
}

#[test]
fn prop_entrees_mal_formees() {
    assert_erreur_partout("(2+3", EvalError::MismatchedParentheses);
    assert_erreur_partout("2+3)", EvalError::MismatchedParentheses);
    assert_erreur_partout("2+", EvalError::InsufficientOperands("+".into()));
    assert_erreur_partout("2 3 +", EvalError::InsufficientOperands("+".into()));
    assert_erreur_partout("()", EvalError::MalformedExpression);
    assert_erreur_partout("2#", EvalError::UnrecognizedCharacter('#'));
    assert_erreur_partout("2 foo", EvalError::UnknownIdentifier("foo".into()));
    assert_erreur_partout(".", EvalError::InvalidNumber(".".into()));
}

#[test]
fn prop_racine_negative() {
    assert_erreur_partout("sqrt(-4)", EvalError::NegativeSqrt);
    assert_erreur_partout("√(0-1)", EvalError::NegativeSqrt);
    assert_partout("√16", "4");
}

/* ------------------------ Modes ------------------------ */

#[test]
fn prop_mode_angle() {
    for m in MODES {
        let mut s = session(m);
        assert_eq!(eval_ok(&s, "sin(90)"), "1");
        assert_eq!(eval_ok(&s, "cos(0)"), "1");

        s.set_angle_mode(ModeAngle::Rad);
        assert_eq!(eval_ok(&s, "sin(pi/2)"), "1");
        assert_eq!(eval_ok(&s, "cos(0)"), "1");
    }
}

#[test]
fn prop_trig_toujours_en_double() {
    // même flottant quel que soit le mode : sin(30°) n’est pas exactement 1/2
    assert_partout("sin(30)", "0.49999999999999994");
}

#[test]
fn prop_precision_ne_change_pas_la_structure() {
    // la RPN ne dépend que du texte
    assert_eq!(format_tokens(&compiler("2pi(1+x)").unwrap()), "2 pi * 1 x + *");

    for expr in ["1/3", "-2^2+sin(30)", "5!%", "sqrt(2)^2", "ln(10)*log(2)"] {
        let d: f64 = eval_ok(&session(ModePrecision::Decimal), expr).parse().unwrap();
        let n: f64 = eval_ok(&session(ModePrecision::Number), expr).parse().unwrap();
        assert!((d - n).abs() <= 1e-12 * n.abs().max(1.0), "expr={expr:?} d={d} n={n}");
    }

    let d = eval_ok(&session(ModePrecision::Decimal), "1/3");
    let n = eval_ok(&session(ModePrecision::Number), "1/3");
    assert_eq!(d, format!("0.{}", "3".repeat(60)));
    assert_eq!(n, "0.3333333333333333");

    assert_eq!(eval_ok(&session(ModePrecision::Decimal), "0.1+0.2"), "0.3");
    assert_eq!(
        eval_ok(&session(ModePrecision::Number), "0.1+0.2"),
        "0.30000000000000004"
    );
}

#[test]
fn prop_domaines_par_representation() {
    let d = session(ModePrecision::Decimal);
    let n = session(ModePrecision::Number);

    assert_eq!(eval_err(&d, "ln(0)"), EvalError::OutOfDomain("ln"));
    assert_eq!(eval_ok(&n, "ln(0)"), "-Infinity");

    assert_eq!(eval_err(&d, "(-8)^(1/3)"), EvalError::OutOfDomain("^"));
    assert_eq!(eval_ok(&n, "(-8)^(1/3)"), "NaN");

    assert_eq!(eval_ok(&d, "log(1000)"), "3");
    assert_eq!(eval_ok(&d, "ln(1)"), "0");
    assert_eq!(eval_ok(&d, "abs(-2.5)"), "2.5");
    assert_eq!(eval_ok(&n, "abs(-2.5)"), "2.5");
}

/* ------------------------ Pureté / aller-retour ------------------------ */

#[test]
fn prop_determinisme() {
    for m in MODES {
        let s = session(m);
        for expr in ["2^0.5", "ln(7)/3", "tan(45)", "e^pi", "100!"] {
            assert_eq!(s.evaluate(expr, ""), s.evaluate(expr, ""), "expr={expr:?}");
        }
    }
}

#[test]
fn prop_reevaluation_idempotente() {
    for m in MODES {
        let s = session(m);
        for expr in [
            "1/3", "-2^2", "2^0.5", "25!", "1/7e9", "pi*1e30", "-1.5e-8", "ln(2)", "sin(1)",
        ] {
            let premier = s.evaluate(expr, "").unwrap();
            let second = s.evaluate(&premier.text, "").unwrap();
            assert_eq!(premier, second, "expr={expr:?} mode={m:?}");
        }
    }
}

#[test]
fn prop_alias_unicode() {
    assert_partout("2×3÷4", "1.5");
    assert_partout("−5+2", "-3");
    for m in MODES {
        let s = session(m);
        assert_eq!(eval_ok(&s, "2π"), eval_ok(&s, "2pi"));
    }
}

#[test]
fn prop_exposant_litteral() {
    assert_partout("1.5e3", "1500");
    assert_partout("2E-2", "0.02");
    assert_partout("1e21", "1e+21");
    assert_partout("3e-7", "3e-7");
}
