//! Calculatrice RPN : expressions infixes -> RPN -> résultat (f64 ou décimal 60 chiffres).

pub mod noyau;

pub use noyau::{
    eval_expression, EvalError, ModeAngle, ModePrecision, MoteurPartage, Resultat, Session, Valeur,
};
