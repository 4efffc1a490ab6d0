// src/noyau/erreur.rs
//
// Deux familles d’erreurs seulement :
// - EntreeInvalide : texte mal formé, symbole inconnu, parenthèses, arbre irrésoluble
// - Domaine        : opération mathématiquement indéfinie (division par zéro, √ négative…)
//
// Aucune reprise : l’erreur remonte telle quelle jusqu’au front.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error("entrée invalide : {0}")]
    EntreeInvalide(String),

    /// Le message est destiné à l’utilisateur (affiché tel quel par le front).
    #[error("{0}")]
    Domaine(String),
}

impl ErreurCalcul {
    pub fn invalide(msg: impl Into<String>) -> Self {
        ErreurCalcul::EntreeInvalide(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        ErreurCalcul::Domaine(msg.into())
    }

    pub fn division_par_zero() -> Self {
        ErreurCalcul::Domaine("division par zéro".into())
    }

    pub fn est_domaine(&self) -> bool {
        matches!(self, ErreurCalcul::Domaine(_))
    }
}

pub type Resultat<T> = Result<T, ErreurCalcul>;
