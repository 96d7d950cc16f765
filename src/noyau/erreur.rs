// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Toute erreur termine l’appel en cours : pas de résultat partiel, pas de valeur par défaut.

use thiserror::Error;

/// Borne supérieure de la factorielle (seul garde-fou contre un calcul non borné).
pub const LIMITE_FACTORIELLE: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("entrée vide")]
    EmptyExpression,

    #[error("caractère inattendu: '{0}'")]
    UnrecognizedCharacter(char),

    #[error("identifiant inconnu: {0}")]
    UnknownIdentifier(String),

    #[error("nombre invalide: {0}")]
    InvalidNumber(String),

    #[error("parenthèses non appariées")]
    MismatchedParentheses,

    /// Opérateur ou fonction sans assez d’opérandes (symbole en charge utile).
    #[error("opérande manquant pour '{0}'")]
    InsufficientOperands(String),

    /// Pile finale de taille ≠ 1.
    #[error("expression invalide")]
    MalformedExpression,

    #[error("division par zéro")]
    DivisionByZero,

    #[error("factorielle : entier positif ou nul attendu")]
    InvalidFactorialOperand,

    #[error("factorielle trop grande (n <= {})", LIMITE_FACTORIELLE)]
    FactorialTooLarge,

    #[error("racine carrée d’un nombre négatif")]
    NegativeSqrt,

    #[error("la variable x est vide")]
    EmptyVariable,

    #[error("valeur de x invalide: {0}")]
    InvalidVariableValue(String),

    /// Pas de résultat réel en mode décimal (ln d’un négatif, etc.).
    #[error("{0} : hors domaine")]
    OutOfDomain(&'static str),

    #[error("dépassement de capacité")]
    Overflow,
}
