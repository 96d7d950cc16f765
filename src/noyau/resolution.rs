// src/noyau/resolution.rs
//
// Entre tokenizer et RPN :
// - résolution des identifiants (fonction / constante / rejet)
// - multiplication implicite : 2pi, 3(4+5), (1)(2), 3!2, 2sin(30)

use super::erreur::EvalError;
use super::jetons::{Constante, Fonction, Tok};
use super::operateurs::Op;

/// Remplace chaque Ident par Func ou Const. Les autres jetons passent tels quels.
pub fn resoudre(tokens: Vec<Tok>) -> Result<Vec<Tok>, EvalError> {
    tokens
        .into_iter()
        .map(|tok| match tok {
            Tok::Ident(name) => {
                if let Some(f) = Fonction::depuis_nom(&name) {
                    Ok(Tok::Func(f))
                } else if let Some(k) = Constante::depuis_nom(&name) {
                    Ok(Tok::Const(k))
                } else {
                    Err(EvalError::UnknownIdentifier(name))
                }
            }
            autre => Ok(autre),
        })
        .collect()
}

/// Jeton qui termine une valeur.
fn produit_valeur(t: &Tok) -> bool {
    match t {
        Tok::Num(_) | Tok::Const(_) | Tok::RPar => true,
        Tok::Op(op) => op.est_postfixe(),
        _ => false,
    }
}

/// Jeton qui commence une valeur.
fn commence_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Const(_) | Tok::LPar | Tok::Func(_))
}

/// Une seule passe gauche -> droite ; la décision ne dépend que de la paire (courant, suivant).
pub fn inserer_multiplications(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() * 2);
    let mut iter = tokens.into_iter().peekable();

    while let Some(courant) = iter.next() {
        let inserer = matches!(iter.peek(), Some(suivant) if produit_valeur(&courant) && commence_valeur(suivant));
        out.push(courant);
        if inserer {
            out.push(Tok::Op(Op::Star));
        }
    }

    out
}
