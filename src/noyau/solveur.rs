// src/noyau/solveur.rs
//
// Solveur : réduction post-ordre de l’arbre en un seul BigRational
// ----------------------------------------------------------------
// - chaque opération est calculée à P + GARDE décimales,
//   puis ré-arrondie à P + GARDE - 1 avant d’être consommée par la suivante
// - littéraux exacts ; constantes développées à P + GARDE
// - l’arbre est consommé : chaque sous-arbre est remplacé par sa valeur
//
// P = précision demandée (>= 1, les valeurs <= 0 sont ramenées à 1).

use super::arbre::{Expression, Noeud, Operation, Valeur};
use super::erreur::Resultat;
use super::rationnel::BigRational;

/// Décimales de garde (réglable ; 9 suffit sur les imbrications testées).
pub const GARDE: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Solveur {
    precision: usize,
}

impl Solveur {
    pub fn new(precision: i64) -> Self {
        let mut s = Solveur { precision: 1 };
        s.set_precision(precision);
        s
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn set_precision(&mut self, precision: i64) {
        self.precision = usize::try_from(precision).map_or(1, |p| p.max(1));
    }

    /// Précision de calcul d’une opération.
    pub fn precision_calcul(&self) -> usize {
        self.precision + GARDE
    }

    /// Précision de stockage d’un résultat intermédiaire.
    pub fn precision_arrondi(&self) -> usize {
        self.precision + GARDE - 1
    }

    pub fn resoudre(&self, expr: Expression) -> Resultat<BigRational> {
        let valeur = match expr.into_racine() {
            // chemin court : une seule feuille
            Noeud::Feuille(v) => self.valeur(&v)?.round(self.precision_arrondi()),
            noeud => self.reduire(noeud)?,
        };

        log::debug!("valeur (P = {}) : {valeur}", self.precision);
        Ok(valeur)
    }

    fn valeur(&self, v: &Valeur) -> Resultat<BigRational> {
        match v {
            Valeur::Litteral(r) => Ok(r.clone()),
            Valeur::Constante(c) => c.valeur(self.precision_calcul()),
        }
    }

    /// Droite puis gauche, puis le nœud lui-même.
    fn reduire(&self, noeud: Noeud) -> Resultat<BigRational> {
        let p = self.precision_calcul();

        let brut = match noeud {
            Noeud::Feuille(v) => return self.valeur(&v),

            Noeud::Unaire { fonction, droite } => {
                let x = self.reduire(*droite)?;
                fonction.resoudre_unaire(&x, p)?
            }

            Noeud::Binaire {
                operation,
                droite,
                gauche,
            } => {
                let a = self.reduire(*droite)?;
                let b = self.reduire(*gauche)?;
                match operation {
                    Operation::Operateur(o) => o.resoudre(&a, &b, p)?,
                    Operation::Fonction(f) => f.resoudre_binaire(&a, &b, p)?,
                }
            }
        };

        let valeur = brut.round(self.precision_arrondi());
        log::trace!("réduit : {valeur}");
        Ok(valeur)
    }
}
