//! src/app/etat.rs
//!
//! État de l’hôte (sans affichage).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, aperçu, message, variable x, session)
//! et offrir aperçu / validation sans logique d’affichage.
//!
//! Contrats :
//! - Aucune analyse ici : tout passe par la session du noyau.
//! - Un échec ne change que le message ; l’état validé (ans, entrée) reste intact.

use calculatrice_rpn::{EvalError, ModeAngle, ModePrecision, Session};

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    pub variable: String, // champ x (texte brut)

    // --- sorties ---
    pub apercu: String,  // dernier aperçu réussi
    pub message: String, // message d’erreur (si l’évaluation échoue)

    // --- paramètres + ans ---
    session: Session,
}

impl AppCalc {
    pub fn new(session: Session, variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            session,
            ..Self::default()
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_angle_mode(&mut self, angle: ModeAngle) {
        self.session.set_angle_mode(angle);
    }

    pub fn set_precision_mode(&mut self, precision: ModePrecision) {
        self.session.set_precision_mode(precision);
    }

    /// `:x` : vide => efface.
    pub fn set_variable(&mut self, valeur: &str) {
        self.variable = valeur.trim().to_string();
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On CONSERVE l’entrée pour ne pas “effacer l’écran” sur une faute ; l’aperçu est coupé.
    pub fn set_erreur(&mut self, e: &EvalError) {
        self.message = e.to_string();
        self.apercu.clear();
    }

    /// Aperçu de `entree` : n’écrit jamais `ans`.
    pub fn apercu(&mut self) {
        if self.entree.trim().is_empty() {
            self.apercu.clear();
            self.message.clear();
            return;
        }

        match self.session.evaluate(&self.entree, &self.variable) {
            Ok(r) => {
                self.apercu = r.text;
                self.message.clear();
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    /// Validation : le résultat devient `ans` ET la nouvelle entrée.
    pub fn valider(&mut self) {
        if self.entree.trim().is_empty() {
            return;
        }

        match self.session.commit(&self.entree, &self.variable) {
            Ok(r) => {
                self.entree = r.text.clone();
                self.apercu = r.text;
                self.message.clear();
            }
            Err(e) => self.message = e.to_string(),
        }
    }
}
