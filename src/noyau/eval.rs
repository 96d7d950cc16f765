//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> résolution -> multiplications implicites -> RPN -> pile d’opérandes -> texte
//!
//! Remarque : le mode de précision est lu une seule fois par appel et choisit la représentation
//! (f64 ou décimal 60 chiffres) pour TOUTES les opérandes, constantes comprises.

use std::f64::consts::PI;
use std::sync::{Mutex, MutexGuard, PoisonError};

use num_bigint::BigUint;
use num_traits::One;
use tracing::{debug, info, trace};

use super::erreur::{EvalError, LIMITE_FACTORIELLE};
use super::jetons::{format_tokens, tokenize, Constante, Fonction, Tok};
use super::numerique::{Arithmetique, Decimale, Natif, Valeur};
use super::operateurs::Op;
use super::resolution::{inserer_multiplications, resoudre};
use super::rpn::to_rpn;

pub const PI_TEXTE: &str = "3.14159265358979323846264338327950288419716939937510";
pub const E_TEXTE: &str = "2.71828182845904523536028747135266249775724709369996";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Deg,
    Rad,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModePrecision {
    /// Décimal 60 chiffres.
    #[default]
    Decimal,
    /// f64.
    Number,
}

/// Résultat d’un appel : texte canonique + valeur brute.
#[derive(Clone, Debug, PartialEq)]
pub struct Resultat {
    pub text: String,
    pub raw: Valeur,
}

/// Ce que l’évaluateur lit hors de l’expression.
struct Contexte<'a> {
    angle: ModeAngle,
    dernier: &'a str,
    variable: &'a str,
}

/* ------------------------ Pipeline ------------------------ */

/// Texte -> RPN (aucune dépendance au mode).
pub fn compiler(expr_str: &str) -> Result<Vec<Tok>, EvalError> {
    if expr_str.trim().is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let jetons = inserer_multiplications(resoudre(tokenize(expr_str)?)?);
    debug!(jetons = %format_tokens(&jetons), "jetons");

    let rpn = to_rpn(&jetons)?;
    debug!(rpn = %format_tokens(&rpn), "rpn");

    Ok(rpn)
}

/// API publique : fonction pure de (expression, angle, précision, ans, x).
pub fn eval_expression(
    expr_str: &str,
    angle: ModeAngle,
    precision: ModePrecision,
    dernier: &str,
    variable: &str,
) -> Result<Resultat, EvalError> {
    let rpn = compiler(expr_str)?;
    let ctx = Contexte {
        angle,
        dernier,
        variable,
    };

    match precision {
        ModePrecision::Number => executer(&Natif, &rpn, &ctx),
        ModePrecision::Decimal => executer(&Decimale, &rpn, &ctx),
    }
}

fn executer<A: Arithmetique>(
    num: &A,
    rpn: &[Tok],
    ctx: &Contexte<'_>,
) -> Result<Resultat, EvalError> {
    let v = evaluer_rpn(num, rpn, ctx)?;
    Ok(Resultat {
        text: num.rendre(&v),
        raw: num.valeur(v),
    })
}

/* ------------------------ Évaluateur postfixe ------------------------ */

fn depiler<N>(pile: &mut Vec<N>, symbole: &str) -> Result<N, EvalError> {
    pile.pop()
        .ok_or_else(|| EvalError::InsufficientOperands(symbole.to_string()))
}

fn evaluer_rpn<A: Arithmetique>(
    num: &A,
    rpn: &[Tok],
    ctx: &Contexte<'_>,
) -> Result<A::Nombre, EvalError> {
    let mut pile: Vec<A::Nombre> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        let v = match tok {
            Tok::Num(texte) => num.lire(texte)?,
            Tok::Const(k) => constante(num, *k, ctx)?,
            Tok::Op(op) => appliquer_operateur(num, *op, &mut pile)?,
            Tok::Func(f) => {
                let x = depiler(&mut pile, f.nom())?;
                appliquer_fonction(num, *f, &x, ctx.angle)?
            }
            Tok::LPar | Tok::RPar | Tok::Ident(_) => return Err(EvalError::MalformedExpression),
        };
        pile.push(v);
    }

    if pile.len() != 1 {
        return Err(EvalError::MalformedExpression);
    }
    pile.pop().ok_or(EvalError::MalformedExpression)
}

fn constante<A: Arithmetique>(
    num: &A,
    k: Constante,
    ctx: &Contexte<'_>,
) -> Result<A::Nombre, EvalError> {
    match k {
        Constante::Pi => num.lire(PI_TEXTE),
        Constante::E => num.lire(E_TEXTE),
        Constante::Ans => num.lire(ctx.dernier),
        Constante::X => {
            let v = ctx.variable.trim();
            if v.is_empty() {
                return Err(EvalError::EmptyVariable);
            }
            num.lire(v).map_err(|e| match e {
                EvalError::InvalidNumber(_) => EvalError::InvalidVariableValue(v.to_string()),
                autre => autre,
            })
        }
    }
}

/// n! exact (entiers non bornés), quel que soit le mode.
fn factorielle(n: u64) -> BigUint {
    (2..=n).fold(BigUint::one(), |acc, k| acc * k)
}

fn appliquer_operateur<A: Arithmetique>(
    num: &A,
    op: Op,
    pile: &mut Vec<A::Nombre>,
) -> Result<A::Nombre, EvalError> {
    if op.spec().arite == 2 {
        // b d’abord, puis a : a op b
        let b = depiler(pile, op.symbole())?;
        let a = depiler(pile, op.symbole())?;
        return match op {
            Op::Plus => num.ajouter(&a, &b),
            Op::Minus => num.soustraire(&a, &b),
            Op::Star => num.multiplier(&a, &b),
            Op::Slash => num.diviser(&a, &b),
            Op::Caret => num.puissance(&a, &b),
            _ => Err(EvalError::MalformedExpression),
        };
    }

    let a = depiler(pile, op.symbole())?;
    match op {
        Op::Neg => Ok(num.negatif(&a)),
        Op::Percent => num.pourcent(&a),
        Op::Bang => {
            let n = num
                .entier_naturel(&a)
                .ok_or(EvalError::InvalidFactorialOperand)?;
            if n > LIMITE_FACTORIELLE {
                return Err(EvalError::FactorialTooLarge);
            }
            num.depuis_entier(&factorielle(n))
        }
        _ => Err(EvalError::MalformedExpression),
    }
}

fn appliquer_fonction<A: Arithmetique>(
    num: &A,
    f: Fonction,
    x: &A::Nombre,
    angle: ModeAngle,
) -> Result<A::Nombre, EvalError> {
    match f {
        Fonction::Sqrt => num.racine(x),
        Fonction::Abs => Ok(num.valeur_absolue(x)),
        Fonction::Ln => num.ln(x),
        Fonction::Log => num.log10(x),

        // trig : toujours en f64, jamais en précision arbitraire
        Fonction::Sin | Fonction::Cos | Fonction::Tan => {
            let v = num.vers_f64(x);
            let rad = match angle {
                ModeAngle::Deg => v * PI / 180.0,
                ModeAngle::Rad => v,
            };
            let r = match f {
                Fonction::Sin => rad.sin(),
                Fonction::Cos => rad.cos(),
                _ => rad.tan(),
            };
            num.depuis_f64(r, f.nom())
        }
    }
}

/* ------------------------ Session (état du processus) ------------------------ */

/// Angle, précision et dernier résultat validé (`ans`).
#[derive(Clone, Debug)]
pub struct Session {
    angle: ModeAngle,
    precision: ModePrecision,
    dernier: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            angle: ModeAngle::Deg,
            precision: ModePrecision::Decimal,
            dernier: "0".to_string(),
        }
    }
}

impl Session {
    pub fn new(angle: ModeAngle, precision: ModePrecision) -> Self {
        Self {
            angle,
            precision,
            ..Self::default()
        }
    }

    pub fn angle_mode(&self) -> ModeAngle {
        self.angle
    }

    pub fn precision_mode(&self) -> ModePrecision {
        self.precision
    }

    pub fn last_result(&self) -> &str {
        &self.dernier
    }

    pub fn set_angle_mode(&mut self, angle: ModeAngle) {
        trace!(?angle, "mode d’angle");
        self.angle = angle;
    }

    pub fn set_precision_mode(&mut self, precision: ModePrecision) {
        trace!(?precision, "mode de précision");
        self.precision = precision;
    }

    /// Aperçu : n’écrit rien.
    pub fn evaluate(&self, expression: &str, variable: &str) -> Result<Resultat, EvalError> {
        eval_expression(
            expression,
            self.angle,
            self.precision,
            &self.dernier,
            variable,
        )
    }

    /// Validation : un succès non vide devient `ans` ; un échec ne touche à rien.
    pub fn commit(&mut self, expression: &str, variable: &str) -> Result<Resultat, EvalError> {
        match self.evaluate(expression, variable) {
            Ok(r) => {
                if !r.text.is_empty() {
                    info!(resultat = %r.text, "ans mis à jour");
                    self.dernier = r.text.clone();
                }
                Ok(r)
            }
            Err(e) => {
                debug!(erreur = %e, "validation refusée");
                Err(e)
            }
        }
    }
}

/// Session partagée entre fils : un seul verrou pour les trois champs, tenu pendant tout l’appel.
#[derive(Debug, Default)]
pub struct MoteurPartage {
    session: Mutex<Session>,
}

impl MoteurPartage {
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    fn verrou(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn apercu(&self, expression: &str, variable: &str) -> Result<Resultat, EvalError> {
        self.verrou().evaluate(expression, variable)
    }

    pub fn valider(&self, expression: &str, variable: &str) -> Result<Resultat, EvalError> {
        self.verrou().commit(expression, variable)
    }

    pub fn set_angle_mode(&self, angle: ModeAngle) {
        self.verrou().set_angle_mode(angle);
    }

    pub fn set_precision_mode(&self, precision: ModePrecision) {
        self.verrou().set_precision_mode(precision);
    }

    pub fn last_result(&self) -> String {
        self.verrou().last_result().to_string()
    }
}
