// src/noyau/decimal.rs
//
// Décimal à précision fixe (60 chiffres significatifs, arrondi “half-up”).
// ---------------------------------------------------------------------
// Valeur = mantisse × 10^exposant, toujours normalisée :
// - au plus PRECISION chiffres dans la mantisse
// - pas de zéro final (zéro = 0 × 10^0)
//
// ln / exp : séries en virgule fixe (entiers “scalés” × 10^ECHELLE), arrondies une seule fois.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::EvalError;
use super::format::notation;

/// Chiffres significatifs.
pub const PRECISION: u32 = 60;

/// Chiffres de garde pour les calculs intermédiaires.
const GARDE: u32 = 20;

/// Virgule fixe des séries ln / exp.
const ECHELLE: u32 = 130;

/// ln : nombre de racines carrées avant la série atanh.
const RACINES: u32 = 7;

/// exp : nombre de divisions par 2 avant Taylor (puis autant de mises au carré).
const MOITIES: u32 = 10;

/// Borne de l’exposant (au-delà : dépassement ; en deçà : zéro).
const EXPOSANT_MAX: i64 = 9_000_000_000_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    mantisse: BigInt,
    exposant: i64,
}

/* ------------------------ Outils entiers ------------------------ */

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

fn pow10u(n: u32) -> BigUint {
    BigUint::from(10u32).pow(n)
}

fn nb_chiffres(m: &BigUint) -> u32 {
    if m.is_zero() {
        1
    } else {
        m.to_str_radix(10).len() as u32
    }
}

/// Normalise (mantisse, exposant) à `precision` chiffres, arrondi half-up (loin de zéro).
fn arrondir(mantisse: BigInt, exposant: i64, precision: u32) -> Result<Decimal, EvalError> {
    if mantisse.is_zero() {
        return Ok(Decimal::zero());
    }

    let signe = mantisse.sign();
    let mut m = mantisse.magnitude().clone();
    let mut e = exposant;

    let n = nb_chiffres(&m);
    if n > precision {
        let d = n - precision;
        let diviseur = pow10u(d);
        let reste = &m % &diviseur;
        m /= &diviseur;
        if reste * 2u32 >= diviseur {
            m += 1u32;
        }
        e = e.checked_add(i64::from(d)).ok_or(EvalError::Overflow)?;
    }

    // zéros finaux
    let dix = BigUint::from(10u32);
    while (&m % &dix).is_zero() {
        m /= &dix;
        e += 1;
    }

    let haut = e + i64::from(nb_chiffres(&m)) - 1;
    if haut > EXPOSANT_MAX {
        return Err(EvalError::Overflow);
    }
    if haut < -EXPOSANT_MAX {
        return Ok(Decimal::zero());
    }

    Ok(Decimal {
        mantisse: BigInt::from_biguint(signe, m),
        exposant: e,
    })
}

/* ------------------------ Séries en virgule fixe ------------------------ */

/// ln(g) pour g ∈ [1, 10] (entiers scalés × 10^ECHELLE).
/// g -> g^(1/2^RACINES) puis ln g = 2·atanh((g-1)/(g+1)).
fn ln_fixe(g: &BigInt) -> BigInt {
    let s = pow10(ECHELLE);

    let mut g = g.clone();
    for _ in 0..RACINES {
        g = (&g * &s).sqrt();
    }

    let z = ((&g - &s) * &s) / (&g + &s);
    let z2 = (&z * &z) / &s;

    let mut puissance = z;
    let mut somme = BigInt::zero();
    let mut k: u32 = 0;
    loop {
        let terme = &puissance / BigInt::from(2 * k + 1);
        if terme.is_zero() {
            break;
        }
        somme += terme;
        puissance = (&puissance * &z2) / &s;
        k += 1;
    }

    somme * BigInt::from(2u64 << RACINES)
}

fn ln10_fixe() -> &'static BigInt {
    static LN10: OnceLock<BigInt> = OnceLock::new();
    LN10.get_or_init(|| ln_fixe(&(BigInt::from(10) * pow10(ECHELLE))))
}

/// exp(r) pour |r| < 2.31 (scalé).
fn exp_fixe(r: &BigInt) -> BigInt {
    let s = pow10(ECHELLE);
    let r = r / BigInt::from(1u32 << MOITIES);

    let mut somme = s.clone();
    let mut terme = s.clone();
    let mut n: u32 = 1;
    loop {
        terme = (&terme * &r) / (&s * BigInt::from(n));
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        n += 1;
    }

    for _ in 0..MOITIES {
        somme = (&somme * &somme) / &s;
    }
    somme
}

/* ------------------------ Décimal ------------------------ */

impl Decimal {
    pub fn zero() -> Decimal {
        Decimal {
            mantisse: BigInt::zero(),
            exposant: 0,
        }
    }

    pub fn un() -> Decimal {
        Decimal {
            mantisse: BigInt::one(),
            exposant: 0,
        }
    }

    /// Entier exact (factorielle) arrondi à 60 chiffres.
    pub fn depuis_entier(n: BigInt) -> Result<Decimal, EvalError> {
        arrondir(n, 0, PRECISION)
    }

    /// Passe par l’écriture décimale la plus courte du double.
    pub fn depuis_f64(x: f64) -> Option<Decimal> {
        if !x.is_finite() {
            return None;
        }
        format!("{x:e}").parse().ok()
    }

    pub fn vers_f64(&self) -> f64 {
        format!("{}e{}", self.mantisse, self.exposant)
            .parse()
            .unwrap_or(f64::NAN)
    }

    pub fn is_zero(&self) -> bool {
        self.mantisse.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantisse.is_negative()
    }

    pub fn est_entier(&self) -> bool {
        self.exposant >= 0
    }

    fn signe(&self) -> i8 {
        match self.mantisse.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// Exposant du premier chiffre significatif (123 -> 2, 0.05 -> -2).
    fn haut(&self) -> i64 {
        self.exposant + i64::from(nb_chiffres(self.mantisse.magnitude())) - 1
    }

    fn est_pair(&self) -> bool {
        self.exposant > 0 || (&self.mantisse % 2u32).is_zero()
    }

    /// Entier positif ou nul (saturé à u64::MAX), sinon None.
    pub fn entier_naturel(&self) -> Option<u64> {
        if !self.est_entier() || self.is_negative() {
            return None;
        }
        if self.haut() > 18 {
            return Some(u64::MAX);
        }
        (self.mantisse.magnitude() * pow10u(self.exposant as u32)).to_u64()
    }

    pub fn neg(&self) -> Decimal {
        Decimal {
            mantisse: -&self.mantisse,
            exposant: self.exposant,
        }
    }

    pub fn abs(&self) -> Decimal {
        Decimal {
            mantisse: self.mantisse.abs(),
            exposant: self.exposant,
        }
    }

    /// Valeur × 10^ECHELLE, tronquée (|valeur| raisonnable seulement).
    fn vers_fixe(&self) -> BigInt {
        let k = self.exposant + i64::from(ECHELLE);
        if k >= 0 {
            &self.mantisse * pow10(k as u32)
        } else if -k > i64::from(PRECISION + GARDE + ECHELLE) {
            BigInt::zero()
        } else {
            &self.mantisse / pow10((-k) as u32)
        }
    }

    /* ------------------------ Opérations (précision p) ------------------------ */

    fn ajouter_p(&self, o: &Decimal, p: u32) -> Result<Decimal, EvalError> {
        if self.is_zero() {
            return arrondir(o.mantisse.clone(), o.exposant, p);
        }
        if o.is_zero() {
            return arrondir(self.mantisse.clone(), self.exposant, p);
        }

        // terme négligeable : ne peut pas changer l’arrondi
        let marge = i64::from(p) + 5;
        if o.haut() < self.haut() - marge {
            return arrondir(self.mantisse.clone(), self.exposant, p);
        }
        if self.haut() < o.haut() - marge {
            return arrondir(o.mantisse.clone(), o.exposant, p);
        }

        let e = self.exposant.min(o.exposant);
        let a = &self.mantisse * pow10((self.exposant - e) as u32);
        let b = &o.mantisse * pow10((o.exposant - e) as u32);
        arrondir(a + b, e, p)
    }

    fn multiplier_p(&self, o: &Decimal, p: u32) -> Result<Decimal, EvalError> {
        arrondir(&self.mantisse * &o.mantisse, self.exposant + o.exposant, p)
    }

    fn diviser_p(&self, o: &Decimal, p: u32) -> Result<Decimal, EvalError> {
        if o.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Decimal::zero());
        }

        // quotient d’au moins p + 5 chiffres ; la troncature ne fausse pas le half-up
        let da = nb_chiffres(self.mantisse.magnitude());
        let db = nb_chiffres(o.mantisse.magnitude());
        let s = (p + 6 + db).saturating_sub(da);

        let q = (&self.mantisse * pow10(s)) / &o.mantisse;
        arrondir(q, self.exposant - o.exposant - i64::from(s), p)
    }

    fn ln_p(&self, p: u32) -> Result<Decimal, EvalError> {
        if self.signe() <= 0 {
            return Err(EvalError::OutOfDomain("ln"));
        }

        // x = f × 10^k, f ∈ [1, 10)
        let d = nb_chiffres(self.mantisse.magnitude());
        let k = self.haut();
        let f = &self.mantisse * pow10(ECHELLE + 1 - d);

        let l = ln_fixe(&f) + BigInt::from(k) * ln10_fixe();
        arrondir(l, -i64::from(ECHELLE), p)
    }

    fn exp_p(&self, p: u32) -> Result<Decimal, EvalError> {
        if self.is_zero() {
            return Ok(Decimal::un());
        }
        // e^(10^17) dépasse largement 10^EXPOSANT_MAX
        if self.haut() > 17 {
            return if self.is_negative() {
                Ok(Decimal::zero())
            } else {
                Err(EvalError::Overflow)
            };
        }

        // t = k·ln10 + r
        let t = self.vers_fixe();
        let ln10 = ln10_fixe();
        let k = &t / ln10;
        let r = &t - &k * ln10;
        let k = k.to_i64().ok_or(EvalError::Overflow)?;

        arrondir(exp_fixe(&r), k - i64::from(ECHELLE), p)
    }

    fn puissance_entiere(&self, n: i64) -> Result<Decimal, EvalError> {
        let p = PRECISION + GARDE;

        let mut b = if n < 0 {
            Decimal::un().diviser_p(self, p)?
        } else {
            self.clone()
        };
        let mut e = n.unsigned_abs();
        let mut acc = Decimal::un();

        while e > 0 {
            if (e & 1) == 1 {
                acc = acc.multiplier_p(&b, p)?;
            }
            e >>= 1;
            if e > 0 {
                b = b.multiplier_p(&b, p)?;
            }
        }

        arrondir(acc.mantisse, acc.exposant, PRECISION)
    }

    /* ------------------------ API (60 chiffres) ------------------------ */

    pub fn ajouter(&self, o: &Decimal) -> Result<Decimal, EvalError> {
        self.ajouter_p(o, PRECISION)
    }

    pub fn soustraire(&self, o: &Decimal) -> Result<Decimal, EvalError> {
        self.ajouter_p(&o.neg(), PRECISION)
    }

    pub fn multiplier(&self, o: &Decimal) -> Result<Decimal, EvalError> {
        self.multiplier_p(o, PRECISION)
    }

    pub fn diviser(&self, o: &Decimal) -> Result<Decimal, EvalError> {
        self.diviser_p(o, PRECISION)
    }

    /// self / 100 (exact).
    pub fn pourcent(&self) -> Result<Decimal, EvalError> {
        arrondir(self.mantisse.clone(), self.exposant - 2, PRECISION)
    }

    pub fn racine(&self) -> Result<Decimal, EvalError> {
        if self.is_negative() {
            return Err(EvalError::NegativeSqrt);
        }
        if self.is_zero() {
            return Ok(Decimal::zero());
        }

        // mantisse élargie à au moins 2(p+6) chiffres, exposant pair
        let d = i64::from(nb_chiffres(self.mantisse.magnitude()));
        let mut t = (2 * (i64::from(PRECISION) + 6) - d).max(0);
        if (self.exposant - t).rem_euclid(2) != 0 {
            t += 1;
        }

        let r = (self.mantisse.magnitude() * pow10u(t as u32)).sqrt();
        arrondir(BigInt::from(r), (self.exposant - t) / 2, PRECISION)
    }

    pub fn ln(&self) -> Result<Decimal, EvalError> {
        self.ln_p(PRECISION)
    }

    /// log10(x) = ln(x) / ln(10), avec chiffres de garde.
    pub fn log10(&self) -> Result<Decimal, EvalError> {
        if self.signe() <= 0 {
            return Err(EvalError::OutOfDomain("log"));
        }
        let p = PRECISION + GARDE;
        let dix = Decimal {
            mantisse: BigInt::one(),
            exposant: 1,
        };
        let q = self.ln_p(p)?.diviser_p(&dix.ln_p(p)?, p)?;
        arrondir(q.mantisse, q.exposant, PRECISION)
    }

    /// x^y : entier => exponentiation binaire ; sinon exp(y·ln x), x > 0.
    pub fn puissance(&self, y: &Decimal) -> Result<Decimal, EvalError> {
        if y.is_zero() {
            return Ok(Decimal::un());
        }
        if self.is_zero() {
            return if y.is_negative() {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Decimal::zero())
            };
        }

        if y.est_entier() && y.haut() < 18 {
            if let Some(n) = (&y.mantisse * pow10(y.exposant as u32)).to_i64() {
                return self.puissance_entiere(n);
            }
        }

        if self.is_negative() {
            if !y.est_entier() {
                return Err(EvalError::OutOfDomain("^"));
            }
            let r = self.abs().puissance(y)?;
            return Ok(if y.est_pair() { r } else { r.neg() });
        }

        let p = PRECISION + GARDE;
        let t = y.multiplier_p(&self.ln_p(p)?, p)?;
        t.exp_p(PRECISION)
    }
}

impl FromStr for Decimal {
    type Err = EvalError;

    /// [signe] chiffres [. chiffres] [e [signe] chiffres]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalide = || EvalError::InvalidNumber(s.to_string());

        let t = s.trim();
        let (negatif, corps) = match t.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, t.strip_prefix('+').unwrap_or(t)),
        };

        let (nombre, exp_txt) = match corps.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => (&corps[..pos], Some(&corps[pos + 1..])),
            None => (corps, None),
        };
        let (entier, frac) = nombre.split_once('.').unwrap_or((nombre, ""));

        let chiffres_ok = |x: &str| x.bytes().all(|b| b.is_ascii_digit());
        if (entier.is_empty() && frac.is_empty()) || !chiffres_ok(entier) || !chiffres_ok(frac) {
            return Err(invalide());
        }

        let exposant: i64 = match exp_txt {
            None => 0,
            Some(x) => {
                let (neg_e, chiffres) = match x.strip_prefix('-') {
                    Some(reste) => (true, reste),
                    None => (false, x.strip_prefix('+').unwrap_or(x)),
                };
                if chiffres.is_empty() || !chiffres_ok(chiffres) {
                    return Err(invalide());
                }
                match chiffres.parse::<i64>() {
                    Ok(v) if v <= 2 * EXPOSANT_MAX => {
                        if neg_e {
                            -v
                        } else {
                            v
                        }
                    }
                    // exposant gigantesque
                    _ if neg_e => return Ok(Decimal::zero()),
                    _ => {
                        if entier.bytes().chain(frac.bytes()).all(|b| b == b'0') {
                            return Ok(Decimal::zero());
                        }
                        return Err(EvalError::Overflow);
                    }
                }
            }
        };

        let texte = format!("{entier}{frac}");
        let mut m = BigInt::parse_bytes(texte.as_bytes(), 10).ok_or_else(invalide)?;
        if negatif {
            m = -m;
        }

        arrondir(m, exposant - frac.len() as i64, PRECISION)
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (sa, sb) = (self.signe(), other.signe());
        if sa != sb {
            return sa.cmp(&sb);
        }
        if sa == 0 {
            return Ordering::Equal;
        }

        let magnitude = match self.haut().cmp(&other.haut()) {
            Ordering::Equal => {
                let e = self.exposant.min(other.exposant);
                let a = self.mantisse.magnitude() * pow10u((self.exposant - e) as u32);
                let b = other.mantisse.magnitude() * pow10u((other.exposant - e) as u32);
                a.cmp(&b)
            }
            o => o,
        };

        if sa > 0 {
            magnitude
        } else {
            magnitude.reverse()
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let chiffres = self.mantisse.magnitude().to_str_radix(10);
        f.write_str(&notation(self.is_negative(), &chiffres, self.haut()))
    }
}
