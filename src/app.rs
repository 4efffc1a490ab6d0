// src/app.rs
//
// Calculatrice rationnelle : module App (racine)
// ----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use app::AppCalc;)
// - Fournir la boucle de session (une expression par ligne)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use app::AppCalc;`
pub use etat::AppCalc;

use std::io::{self, BufRead, Write};

impl AppCalc {
    /// Évalue chaque ligne non vide de `lecteur` et écrit une ligne de sortie par expression.
    /// Renvoie `true` si au moins une expression a échoué.
    pub fn session(&mut self, lecteur: impl BufRead, mut sortie: impl Write) -> io::Result<bool> {
        let mut echec = false;

        for ligne in lecteur.lines() {
            let ligne = ligne?;
            if ligne.trim().is_empty() {
                continue;
            }

            self.set_entree(ligne);
            self.evaluer();
            self.afficher(&mut sortie)?;
            echec |= self.en_erreur();
        }

        sortie.flush()?;
        Ok(echec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_une_ligne_par_expression() {
        let mut app = AppCalc::default();
        app.set_digits(3);

        let entree = "2+3*4\n\n   \n1/0\n0.0005\n";
        let mut sortie = Vec::new();
        let echec = app.session(entree.as_bytes(), &mut sortie).unwrap();

        assert!(echec);
        assert_eq!(
            String::from_utf8(sortie).unwrap(),
            "1.40*10^1\ndivision par zéro\n5.00*10^(-4)\n"
        );
    }

    #[test]
    fn session_sans_erreur() {
        let mut app = AppCalc::default();
        let mut sortie = Vec::new();
        assert!(!app.session("3!\n".as_bytes(), &mut sortie).unwrap());
        assert_eq!(app.ligne(), "6.0000000000000000000");
    }
}
