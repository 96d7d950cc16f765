// src/noyau/operateurs.rs
//
// Table des opérateurs (statique, lecture seule).
// Niveaux (bas -> haut) : additif(1) < multiplicatif(2) < neg(3) < ^(4, droite) < postfixes ! %(5)

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorSpec {
    pub precedence: u8,
    pub assoc: Assoc,
    pub arite: u8,
    pub postfixe: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    /// Moins unaire (jamais produit par le tokenizer, seulement par la conversion RPN).
    Neg,
    Bang,
    Percent,
}

impl Op {
    /// Opérateur écrit tel quel dans l’entrée.
    pub fn depuis_symbole(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            '^' => Some(Op::Caret),
            '!' => Some(Op::Bang),
            '%' => Some(Op::Percent),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Slash => "/",
            Op::Caret => "^",
            Op::Neg => "neg",
            Op::Bang => "!",
            Op::Percent => "%",
        }
    }

    pub const fn spec(self) -> OperatorSpec {
        const fn s(precedence: u8, assoc: Assoc, arite: u8, postfixe: bool) -> OperatorSpec {
            OperatorSpec {
                precedence,
                assoc,
                arite,
                postfixe,
            }
        }

        match self {
            Op::Plus | Op::Minus => s(1, Assoc::Gauche, 2, false),
            Op::Star | Op::Slash => s(2, Assoc::Gauche, 2, false),
            Op::Neg => s(3, Assoc::Droite, 1, false),
            Op::Caret => s(4, Assoc::Droite, 2, false),
            Op::Bang | Op::Percent => s(5, Assoc::Gauche, 1, true),
        }
    }

    pub fn est_postfixe(self) -> bool {
        self.spec().postfixe
    }

    /// Faut-il sortir `sommet` de la pile avant d’empiler `self` ?
    pub fn cede_devant(self, sommet: Op) -> bool {
        let (entrant, haut) = (self.spec(), sommet.spec());
        match entrant.assoc {
            Assoc::Gauche => entrant.precedence <= haut.precedence,
            Assoc::Droite => entrant.precedence < haut.precedence,
        }
    }
}
