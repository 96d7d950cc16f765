// src/noyau/jetons.rs

use super::erreur::EvalError;
use super::operateurs::Op;

/// Fonctions reconnues (unaire, argument entre parenthèses ou collé).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Abs,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        match nom {
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "log" => Some(Fonction::Log),
            "ln" => Some(Fonction::Ln),
            "sqrt" => Some(Fonction::Sqrt),
            "abs" => Some(Fonction::Abs),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Sqrt => "sqrt",
            Fonction::Abs => "abs",
        }
    }
}

/// Constantes, variable x et registre ans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
    Ans,
    X,
}

impl Constante {
    pub fn depuis_nom(nom: &str) -> Option<Constante> {
        match nom {
            "pi" => Some(Constante::Pi),
            "e" => Some(Constante::E),
            "ans" => Some(Constante::Ans),
            "x" => Some(Constante::X),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
            Constante::Ans => "ans",
            Constante::X => "x",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Texte littéral (peut contenir un exposant : 1.5e-3).
    Num(String),

    /// Identifiant brut (minuscules), avant résolution.
    Ident(String),

    Const(Constante),
    Func(Fonction),
    Op(Op),

    LPar,
    RPar,
}

/// Réécrit les symboles unicode du clavier en ASCII.
pub fn normaliser(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '×' => out.push('*'),
            '÷' => out.push('/'),
            '−' => out.push('-'),
            'π' => out.push_str("pi"),
            '√' => out.push_str("sqrt"),
            _ => out.push(c),
        }
    }
    out
}

/// Tokenize une chaîne en jetons bruts.
/// Supporte:
/// - nombres : chiffres + au plus un point, exposant optionnel (e, E, signe, chiffres)
/// - identifiants [a-zA-Z]+ (normalisés en minuscules)
/// - opérateurs + - * / ^ ! %
/// - parenthèses ( )
/// - alias unicode × ÷ − π √
pub fn tokenize(s: &str) -> Result<Vec<Tok>, EvalError> {
    let chars: Vec<char> = normaliser(s).chars().collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : un second '.' arrête la lecture (1.2.3 => 1.2 puis .3)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if point {
                        break;
                    }
                    point = true;
                }
                i += 1;
            }

            // Exposant seulement s’il y a au moins un chiffre ; sinon 'e' reste la constante.
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                let debut_chiffres = j;
                while j < chars.len() && chars[j].is_ascii_digit() {
                    j += 1;
                }
                if j > debut_chiffres {
                    i = j;
                }
            }

            out.push(Tok::Num(chars[start..i].iter().collect()));
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_ascii_lowercase()));
            continue;
        }

        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        if let Some(op) = Op::depuis_symbole(c) {
            out.push(Tok::Op(op));
            i += 1;
            continue;
        }

        return Err(EvalError::UnrecognizedCharacter(c));
    }

    Ok(out)
}

/// Format utilitaire (journal / démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => n.as_str(),
            Tok::Ident(name) => name.as_str(),
            Tok::Const(k) => k.nom(),
            Tok::Func(f) => f.nom(),
            Tok::Op(op) => op.symbole(),
            Tok::LPar => "(",
            Tok::RPar => ")",
        };
        out.push(s);
    }
    out.join(" ")
}
