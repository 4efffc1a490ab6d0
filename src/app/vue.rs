// src/app/vue.rs
//
// Vue (ligne de sortie unique)
// ----------------------------
// - succès            : la forme courte
// - erreur de domaine : le message tel quel
// - entrée invalide   : message fixe (le détail part dans le journal)
// - rien d’évalué     : ligne vide

use std::io::{self, Write};

use super::etat::AppCalc;
use crate::noyau::ErreurCalcul;

pub const MESSAGE_ECHEC: &str = "Sorry, we cannot solve this expression";

impl AppCalc {
    pub fn ligne(&self) -> &str {
        match &self.resultat {
            None => "",
            Some(Ok(sortie)) => sortie.as_str(),
            Some(Err(ErreurCalcul::Domaine(msg))) => msg.as_str(),
            Some(Err(ErreurCalcul::EntreeInvalide(_))) => MESSAGE_ECHEC,
        }
    }

    pub fn afficher(&self, sortie: &mut impl Write) -> io::Result<()> {
        writeln!(sortie, "{}", self.ligne())
    }
}
