//! Noyau RPN (évaluation d’expressions infixes)
//!
//! Organisation interne :
//! - erreur.rs     : taxonomie des erreurs (EvalError)
//! - jetons.rs     : normalisation + tokenisation
//! - resolution.rs : identifiants -> fonctions/constantes, multiplications implicites
//! - operateurs.rs : table précédence / associativité / arité
//! - rpn.rs        : shunting-yard
//! - decimal.rs    : décimal 60 chiffres (entiers non bornés)
//! - numerique.rs  : deux représentations derrière `Arithmetique`
//! - format.rs     : texte canonique des résultats
//! - eval.rs       : pipeline complet + session

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod numerique;
pub mod operateurs;
pub mod resolution;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::EvalError;
pub use eval::{eval_expression, ModeAngle, ModePrecision, MoteurPartage, Resultat, Session};
pub use numerique::Valeur;
