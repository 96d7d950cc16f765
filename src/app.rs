// src/app.rs
//
// Calculatrice RPN — module App (racine)
// --------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
//
// L’hôte n’appelle que le contrat de la session : aperçu, validation, modes, champ x.

pub mod etat;
pub mod vue;

pub use etat::AppCalc;
pub use vue::Commande;
