// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir la suite de Tok (résolue + multiplications implicites) en RPN (postfix)
//
// Règles:
// - Num / Const : sortie directe
// - Func / LPar : empilés ; une fonction sort juste après la parenthèse fermante de son argument
// - '+' / '-' en position préfixe : '+' est ignoré, '-' devient Neg
// - Tout opérateur (Neg compris) dépile ceux qui le dominent, puis la classe devient “opérateur”

use super::erreur::EvalError;
use super::jetons::Tok;
use super::operateurs::Op;

/// Classe du jeton précédent (sert à détecter le signe préfixe).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Precedent {
    Rien,
    Valeur,
    Operateur,
    ParG,
    Fonction,
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Func(sin), LPar, Const(pi), Op(/), Num(2), RPar]
///   rpn:    [Const(pi), Num(2), Op(/), Func(sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, EvalError> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();
    let mut prev = Precedent::Rien;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Const(_) => {
                out.push(tok);
                prev = Precedent::Valeur;
            }

            Tok::Func(_) => {
                ops.push(tok);
                prev = Precedent::Fonction;
            }

            Tok::LPar => {
                ops.push(tok);
                prev = Precedent::ParG;
            }

            Tok::RPar => {
                // dépile jusqu’à '(' ; pile vidée sans la trouver => erreur
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(EvalError::MismatchedParentheses),
                    }
                }

                // si une fonction est au sommet, elle s’attache à l’argument
                if let Some(Tok::Func(_)) = ops.last() {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev = Precedent::Valeur;
            }

            Tok::Op(op) => {
                let prefixe = matches!(
                    prev,
                    Precedent::Rien | Precedent::Operateur | Precedent::ParG | Precedent::Fonction
                );

                let op = match op {
                    Op::Plus if prefixe => continue,
                    Op::Minus if prefixe => Op::Neg,
                    autre => autre,
                };

                // dépile tant que l’opérateur du haut domine (arrêt sur '(' ou fonction)
                while let Some(Tok::Op(top)) = ops.last() {
                    if !op.cede_devant(*top) {
                        break;
                    }
                    if let Some(t) = ops.pop() {
                        out.push(t);
                    }
                }

                ops.push(Tok::Op(op));
                prev = Precedent::Operateur;
            }

            Tok::Ident(name) => return Err(EvalError::UnknownIdentifier(name)),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::RPar) {
            return Err(EvalError::MismatchedParentheses);
        }
        out.push(op);
    }

    Ok(out)
}
