// src/app/vue.rs
//
// Vue terminal : une ligne = une commande ou une expression
// ---------------------------------------------------------
// - `:deg` `:rad` `:decimal` `:number`  : modes
// - `:x VALEUR`                          : champ x (vide => efface)
// - `:ans`                               : dernier résultat validé
// - `:? EXPR`                            : aperçu (sans toucher à ans)
// - `:q`                                 : quitter
// - toute autre ligne non vide est validée

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use calculatrice_rpn::{ModeAngle, ModePrecision};

use super::etat::AppCalc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Commande {
    Angle(ModeAngle),
    Precision(ModePrecision),
    Variable(String),
    Ans,
    Apercu(String),
    Quitter,
    Valider(String),
    Rien,
    Inconnue(String),
}

impl Commande {
    pub fn lire(ligne: &str) -> Self {
        let t = ligne.trim();
        if t.is_empty() {
            return Commande::Rien;
        }
        let Some(cmd) = t.strip_prefix(':') else {
            return Commande::Valider(t.to_string());
        };

        let (nom, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));
        match nom {
            "deg" => Commande::Angle(ModeAngle::Deg),
            "rad" => Commande::Angle(ModeAngle::Rad),
            "decimal" => Commande::Precision(ModePrecision::Decimal),
            "number" => Commande::Precision(ModePrecision::Number),
            "x" => Commande::Variable(arg.trim().to_string()),
            "ans" => Commande::Ans,
            "?" => Commande::Apercu(arg.trim().to_string()),
            "q" => Commande::Quitter,
            _ => Commande::Inconnue(nom.to_string()),
        }
    }
}

impl AppCalc {
    /// Applique une commande ; renvoie la ligne à afficher (None = rien), ou Break pour quitter.
    pub fn executer(&mut self, commande: Commande) -> ControlFlow<(), Option<String>> {
        let sortie = match commande {
            Commande::Rien => None,
            Commande::Quitter => return ControlFlow::Break(()),
            Commande::Angle(a) => {
                self.set_angle_mode(a);
                Some(format!("angle : {a:?}"))
            }
            Commande::Precision(p) => {
                self.set_precision_mode(p);
                Some(format!("précision : {p:?}"))
            }
            Commande::Variable(v) => {
                self.set_variable(&v);
                Some(format!("x = {}", self.variable))
            }
            Commande::Ans => Some(self.session().last_result().to_string()),
            Commande::Apercu(expr) => {
                self.entree = expr;
                self.apercu();
                Some(self.affichage())
            }
            Commande::Valider(expr) => {
                self.entree = expr;
                self.valider();
                Some(self.affichage())
            }
            Commande::Inconnue(nom) => Some(format!("commande inconnue : :{nom}")),
        };
        ControlFlow::Continue(sortie)
    }

    fn affichage(&self) -> String {
        if self.message.is_empty() {
            format!("= {}", self.apercu)
        } else {
            format!("erreur : {}", self.message)
        }
    }

    /// Boucle interactive (stdin -> stdout).
    pub fn boucle(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        write!(stdout, "> ")?;
        stdout.flush()?;

        for ligne in stdin.lock().lines() {
            match self.executer(Commande::lire(&ligne?)) {
                ControlFlow::Continue(Some(texte)) => writeln!(stdout, "{texte}")?,
                ControlFlow::Continue(None) => {}
                ControlFlow::Break(()) => break,
            }
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        Ok(())
    }
}
