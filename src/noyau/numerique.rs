// src/noyau/numerique.rs
//
// Deux représentations numériques derrière une seule capacité (`Arithmetique`).
// Le mode est choisi une fois par appel ; l’évaluateur ne regarde jamais le type des valeurs.
//
// - Natif   : f64 (IEEE-754), NaN / ±∞ conservés comme en calcul flottant
// - Decimale : 60 chiffres significatifs, arrondi half-up (voir decimal.rs)

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use super::decimal::Decimal;
use super::erreur::EvalError;
use super::format::format_f64;

/// Valeur brute d’un résultat.
#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Natif(f64),
    Decimal(Decimal),
}

pub trait Arithmetique {
    type Nombre: Clone;

    /// Littéral (jeton, ans, x).
    fn lire(&self, texte: &str) -> Result<Self::Nombre, EvalError>;
    /// Résultat exact de la factorielle.
    fn depuis_entier(&self, n: &BigUint) -> Result<Self::Nombre, EvalError>;
    /// Retour d’un calcul trigonométrique (toujours en f64).
    fn depuis_f64(&self, x: f64, origine: &'static str) -> Result<Self::Nombre, EvalError>;
    fn vers_f64(&self, a: &Self::Nombre) -> f64;

    fn ajouter(&self, a: &Self::Nombre, b: &Self::Nombre) -> Result<Self::Nombre, EvalError>;
    fn soustraire(&self, a: &Self::Nombre, b: &Self::Nombre) -> Result<Self::Nombre, EvalError>;
    fn multiplier(&self, a: &Self::Nombre, b: &Self::Nombre) -> Result<Self::Nombre, EvalError>;
    fn diviser(&self, a: &Self::Nombre, b: &Self::Nombre) -> Result<Self::Nombre, EvalError>;
    fn puissance(&self, a: &Self::Nombre, b: &Self::Nombre) -> Result<Self::Nombre, EvalError>;

    fn negatif(&self, a: &Self::Nombre) -> Self::Nombre;
    fn valeur_absolue(&self, a: &Self::Nombre) -> Self::Nombre;
    fn pourcent(&self, a: &Self::Nombre) -> Result<Self::Nombre, EvalError>;
    fn racine(&self, a: &Self::Nombre) -> Result<Self::Nombre, EvalError>;
    fn ln(&self, a: &Self::Nombre) -> Result<Self::Nombre, EvalError>;
    fn log10(&self, a: &Self::Nombre) -> Result<Self::Nombre, EvalError>;

    /// Entier ≥ 0 (saturé), None si négatif ou non entier.
    fn entier_naturel(&self, a: &Self::Nombre) -> Option<u64>;

    fn rendre(&self, a: &Self::Nombre) -> String;
    fn valeur(&self, a: Self::Nombre) -> Valeur;
}

/* ------------------------ Natif (f64) ------------------------ */

#[derive(Clone, Copy, Debug, Default)]
pub struct Natif;

impl Arithmetique for Natif {
    type Nombre = f64;

    fn lire(&self, texte: &str) -> Result<f64, EvalError> {
        let t = texte.trim();
        // un résultat natif validé peut revenir par ans
        match t {
            "NaN" => return Ok(f64::NAN),
            "Infinity" => return Ok(f64::INFINITY),
            "-Infinity" => return Ok(f64::NEG_INFINITY),
            _ => {}
        }
        // même grammaire que le décimal (refuse "inf", "nan", "1_0"...) ; 1e999 donne ∞
        if let Err(e @ EvalError::InvalidNumber(_)) = t.parse::<Decimal>() {
            return Err(e);
        }
        t.parse::<f64>()
            .map_err(|_| EvalError::InvalidNumber(texte.to_string()))
    }

    fn depuis_entier(&self, n: &BigUint) -> Result<f64, EvalError> {
        Ok(n.to_f64().unwrap_or(f64::INFINITY))
    }

    fn depuis_f64(&self, x: f64, _origine: &'static str) -> Result<f64, EvalError> {
        Ok(x)
    }

    fn vers_f64(&self, a: &f64) -> f64 {
        *a
    }

    fn ajouter(&self, a: &f64, b: &f64) -> Result<f64, EvalError> {
        Ok(a + b)
    }

    fn soustraire(&self, a: &f64, b: &f64) -> Result<f64, EvalError> {
        Ok(a - b)
    }

    fn multiplier(&self, a: &f64, b: &f64) -> Result<f64, EvalError> {
        Ok(a * b)
    }

    fn diviser(&self, a: &f64, b: &f64) -> Result<f64, EvalError> {
        if *b == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(a / b)
    }

    fn puissance(&self, a: &f64, b: &f64) -> Result<f64, EvalError> {
        Ok(a.powf(*b))
    }

    fn negatif(&self, a: &f64) -> f64 {
        -a
    }

    fn valeur_absolue(&self, a: &f64) -> f64 {
        a.abs()
    }

    fn pourcent(&self, a: &f64) -> Result<f64, EvalError> {
        Ok(a / 100.0)
    }

    fn racine(&self, a: &f64) -> Result<f64, EvalError> {
        if *a < 0.0 {
            return Err(EvalError::NegativeSqrt);
        }
        Ok(a.sqrt())
    }

    fn ln(&self, a: &f64) -> Result<f64, EvalError> {
        Ok(a.ln())
    }

    fn log10(&self, a: &f64) -> Result<f64, EvalError> {
        Ok(a.log10())
    }

    fn entier_naturel(&self, a: &f64) -> Option<u64> {
        if !a.is_finite() || *a < 0.0 || a.fract() != 0.0 {
            return None;
        }
        // `as` sature au-delà de u64::MAX
        Some(*a as u64)
    }

    fn rendre(&self, a: &f64) -> String {
        format_f64(*a)
    }

    fn valeur(&self, a: f64) -> Valeur {
        Valeur::Natif(a)
    }
}

/* ------------------------ Décimal (60 chiffres) ------------------------ */

#[derive(Clone, Copy, Debug, Default)]
pub struct Decimale;

impl Arithmetique for Decimale {
    type Nombre = Decimal;

    fn lire(&self, texte: &str) -> Result<Decimal, EvalError> {
        // ans validé en mode natif : pas de valeur décimale finie
        match texte.trim() {
            "Infinity" | "-Infinity" => Err(EvalError::Overflow),
            "NaN" => Err(EvalError::OutOfDomain("NaN")),
            t => t.parse(),
        }
    }

    fn depuis_entier(&self, n: &BigUint) -> Result<Decimal, EvalError> {
        Decimal::depuis_entier(n.clone().into())
    }

    fn depuis_f64(&self, x: f64, origine: &'static str) -> Result<Decimal, EvalError> {
        Decimal::depuis_f64(x).ok_or(EvalError::OutOfDomain(origine))
    }

    fn vers_f64(&self, a: &Decimal) -> f64 {
        a.vers_f64()
    }

    fn ajouter(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, EvalError> {
        a.ajouter(b)
    }

    fn soustraire(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, EvalError> {
        a.soustraire(b)
    }

    fn multiplier(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, EvalError> {
        a.multiplier(b)
    }

    fn diviser(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, EvalError> {
        a.diviser(b)
    }

    fn puissance(&self, a: &Decimal, b: &Decimal) -> Result<Decimal, EvalError> {
        a.puissance(b)
    }

    fn negatif(&self, a: &Decimal) -> Decimal {
        a.neg()
    }

    fn valeur_absolue(&self, a: &Decimal) -> Decimal {
        a.abs()
    }

    fn pourcent(&self, a: &Decimal) -> Result<Decimal, EvalError> {
        a.pourcent()
    }

    fn racine(&self, a: &Decimal) -> Result<Decimal, EvalError> {
        a.racine()
    }

    fn ln(&self, a: &Decimal) -> Result<Decimal, EvalError> {
        a.ln()
    }

    fn log10(&self, a: &Decimal) -> Result<Decimal, EvalError> {
        a.log10()
    }

    fn entier_naturel(&self, a: &Decimal) -> Option<u64> {
        a.entier_naturel()
    }

    fn rendre(&self, a: &Decimal) -> String {
        a.to_string()
    }

    fn valeur(&self, a: Decimal) -> Valeur {
        Valeur::Decimal(a)
    }
}
