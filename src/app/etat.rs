//! src/app/etat.rs
//!
//! État du front-end (sans affichage).
//!
//! Rôle : contenir l’entrée, la précision et le dernier résultat,
//! et offrir des actions simples (saisir, évaluer, effacer) sans logique d’affichage.
//!
//! Contrats :
//! - Toute l’évaluation passe par `noyau::eval_expression`.
//! - Défense en profondeur : bornes sur la précision (digits).

use crate::noyau::{self, Resultat};

/// Précision par défaut (chiffres significatifs).
pub const DIGITS_DEFAUT: i64 = 20;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
const DIGITS_MAX: i64 = 1000;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- paramètres ---
    pub digits: i64,

    // --- sortie (None tant que rien n’a été évalué) ---
    pub resultat: Option<Resultat<String>>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            digits: DIGITS_DEFAUT,
            resultat: None,
        }
    }
}

impl AppCalc {
    /// Nouvelle entrée : le résultat précédent n’a plus de sens.
    pub fn set_entree(&mut self, texte: impl Into<String>) {
        self.entree = texte.into();
        self.clear_resultats();
    }

    pub fn clear_resultats(&mut self) {
        self.resultat = None;
    }

    /// Borne haute seulement : le solveur ramène lui-même les valeurs <= 0 à 1.
    pub fn set_digits(&mut self, digits: i64) {
        if digits > DIGITS_MAX {
            log::warn!("précision {digits} ramenée à {DIGITS_MAX}");
        }
        self.digits = digits.min(DIGITS_MAX);
    }

    pub fn evaluer(&mut self) {
        let r = noyau::eval_expression(&self.entree, self.digits);
        if let Err(e) = &r {
            log::debug!("échec sur {:?} : {e}", self.entree);
        }
        self.resultat = Some(r);
    }

    pub fn en_erreur(&self) -> bool {
        matches!(self.resultat, Some(Err(_)))
    }
}
