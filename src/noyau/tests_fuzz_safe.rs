//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur est typée (jamais de panique) ; un succès relu redonne le même résultat

use std::time::{Duration, Instant};

use super::eval::{eval_expression, ModeAngle, ModePrecision};
use super::EvalError;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choisir<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const ATOMES: &[&str] = &[
    "0", "1", "2", "3", "7", "10", "0.5", "2.5", "1e3", "4e-2", "pi", "e", "ans", "x",
];
const BINAIRES: &[&str] = &["+", "-", "*", "/", "^"];
const FONCTIONS: &[&str] = &["sin", "cos", "tan", "log", "ln", "sqrt", "abs", "√"];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return rng.choisir(ATOMES).to_string();
    }

    match rng.pick(7) {
        0 => rng.choisir(ATOMES).to_string(),
        1 | 2 => {
            let op = rng.choisir(BINAIRES);
            format!("({}{op}{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1))
        }
        3 => format!("{}({})", rng.choisir(FONCTIONS), gen_expr(rng, depth - 1)),
        4 => format!("-{}", gen_expr(rng, depth - 1)),
        5 => {
            // postfixes sur petits entiers (la factorielle reste bornée)
            let n = rng.pick(12);
            if rng.coin() {
                format!("{n}!")
            } else {
                format!("{}%", gen_expr(rng, depth - 1))
            }
        }
        _ => {
            // juxtaposition : multiplication implicite
            format!("{}({})", rng.choisir(ATOMES), gen_expr(rng, depth - 1))
        }
    }
}

/// Texte quelconque : caractères valides et parasites mélangés.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[&str] = &[
        "1", "2", ".", "e", "E", "+", "-", "*", "/", "^", "!", "%", "(", ")", " ", "pi", "sin",
        "x", "#", "×", "÷", "−", "π", "√", "foo", "1e", "..",
    ];
    let n = 1 + rng.pick(12) as usize;
    (0..n).map(|_| rng.choisir(ALPHABET)).collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

const MODES: [ModePrecision; 2] = [ModePrecision::Decimal, ModePrecision::Number];

#[test]
fn fuzz_safe_determinisme_et_relecture() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for i in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let precision = MODES[i % 2];
        let angle = if rng.coin() { ModeAngle::Deg } else { ModeAngle::Rad };

        let r1 = eval_expression(&expr, angle, precision, "2", "3");
        // Même entrée => même sortie (déterminisme)
        let r2 = eval_expression(&expr, angle, precision, "2", "3");
        assert_eq!(r1, r2, "non déterministe: expr={expr:?}");

        match r1 {
            Ok(r) => {
                assert!(!r.text.is_empty(), "texte vide: expr={expr:?}");
                // un texte numérique relu redonne la même valeur (NaN / ±∞ exclus)
                if !r.text.contains("NaN") && !r.text.contains("Infinity") {
                    let relu = eval_expression(&r.text, angle, precision, "0", "")
                        .unwrap_or_else(|e| panic!("relecture {:?} impossible: {e}", r.text));
                    assert_eq!(relu.text, r.text, "expr={expr:?}");
                }
                seen_ok += 1;
            }
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for i in 0..400 {
        budget(t0, max);

        let texte = gen_bruit(&mut rng);
        // seule exigence : Ok ou Err typée
        let r = eval_expression(&texte, ModeAngle::Deg, MODES[i % 2], "0", "1");
        if let Err(e) = r {
            assert!(!e.to_string().is_empty(), "message vide pour {texte:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let expr = somme_balancee("1/2", 800);

    for precision in MODES {
        let r = eval_expression(&expr, ModeAngle::Deg, precision, "0", "")
            .unwrap_or_else(|e| panic!("err: {e}"));
        budget(t0, max);

        // 800*(1/2) = 400
        assert_eq!(r.text, "400");
    }
}

#[test]
fn fuzz_safe_factorielles_bornees() {
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..40 {
        let n = rng.pick(5100);
        let expr = format!("{n}!");
        let r = eval_expression(&expr, ModeAngle::Deg, ModePrecision::Decimal, "0", "");
        if n > 5000 {
            assert_eq!(r, Err(EvalError::FactorialTooLarge), "n={n}");
        } else {
            assert!(r.is_ok(), "n={n} : {r:?}");
        }
    }
}
