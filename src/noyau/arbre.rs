// src/noyau/arbre.rs
//
// Parseur : jetons (inversés) -> arbre d’expression
// --------------------------------------------------
// Découpage récursif d’intervalles, cascade dans cet ordre :
//   1) + -        2) * /        3) ^
//   4) fonction binaire réécrite (log)
//   5) fonction préfixe en fin de liste inversée (= en tête du texte)
//   6) intervalle entièrement parenthésé : on retire les parenthèses
//
// La liste étant inversée, le premier jeton trouvé à profondeur 0 est le plus
// à droite dans le texte : chaque niveau est associatif à gauche (2^3^2 = 64).
//
// Convention des fils :
// - `droite` = premier opérande (à gauche dans le texte)
// - `gauche` = second opérande

use std::fmt;

use super::entites::{Constante, Fonction, Niveau, Operateur};
use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{self, Jeton};
use super::rationnel::BigRational;

/// Garde-fou : profondeur de récursion du parseur (anti-débordement de pile).
const PROFONDEUR_MAX: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Valeur {
    Litteral(BigRational),
    Constante(Constante),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Operateur(Operateur),
    Fonction(Fonction),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Noeud {
    Feuille(Valeur),
    Unaire {
        fonction: Fonction,
        droite: Box<Noeud>,
    },
    Binaire {
        operation: Operation,
        droite: Box<Noeud>,
        gauche: Box<Noeud>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    racine: Noeud,
}

impl Expression {
    pub fn depuis_texte(texte: &str) -> Resultat<Self> {
        let jetons = jetons::tokenize(texte)?;
        log::debug!("jetons (inversés) : {}", jetons::format_tokens(&jetons));

        let expr = Self::depuis_jetons(&jetons)?;
        log::debug!("arbre : {expr}");
        Ok(expr)
    }

    /// `jetons` en ordre inversé (sortie de `tokenize`).
    pub fn depuis_jetons(jetons: &[Jeton]) -> Resultat<Self> {
        if jetons.is_empty() {
            return Err(ErreurCalcul::invalide("expression vide"));
        }
        Ok(Expression {
            racine: construire(jetons, 0)?,
        })
    }

    pub fn into_racine(self) -> Noeud {
        self.racine
    }
}

/* ------------------------ Découpage ------------------------ */

/// Premier jeton (dans l’ordre inversé) à profondeur 0 satisfaisant `pred`.
/// “)” ouvre un niveau, “(” le ferme ; “(” à profondeur 0 = déséquilibre.
fn chercher(j: &[Jeton], pred: impl Fn(&Jeton) -> bool) -> Resultat<Option<usize>> {
    let mut profondeur = 0usize;

    for (k, jeton) in j.iter().enumerate() {
        match jeton {
            Jeton::ParFermante => profondeur += 1,
            Jeton::ParOuvrante => {
                profondeur = profondeur
                    .checked_sub(1)
                    .ok_or_else(|| ErreurCalcul::invalide("parenthèses déséquilibrées"))?;
            }
            autre if profondeur == 0 && pred(autre) => return Ok(Some(k)),
            _ => {}
        }
    }

    Ok(None)
}

fn construire(j: &[Jeton], profondeur: usize) -> Resultat<Noeud> {
    if profondeur > PROFONDEUR_MAX {
        return Err(ErreurCalcul::invalide("expression trop imbriquée"));
    }

    match j {
        [] => return Err(ErreurCalcul::invalide("opérande manquant")),
        [seul] => return feuille(seul),
        _ => {}
    }
    let suivant = profondeur + 1;

    // 1) à 3) : opérateurs binaires, du moins prioritaire au plus prioritaire
    for niveau in [Niveau::Additif, Niveau::Multiplicatif, Niveau::Puissance] {
        let trouve = chercher(j, |t| matches!(t, Jeton::Operateur(o) if o.niveau() == niveau))?;
        if let Some(k) = trouve {
            let operateur = match j[k] {
                Jeton::Operateur(o) => o,
                _ => return Err(ErreurCalcul::invalide("opérateur attendu")),
            };
            return Ok(Noeud::Binaire {
                operation: Operation::Operateur(operateur),
                droite: Box::new(construire(&j[k + 1..], suivant)?),
                gauche: Box::new(construire(&j[..k], suivant)?),
            });
        }
    }

    // 4) fonction binaire (log réécrit en infixe)
    if let Some(k) = chercher(j, |t| matches!(t, Jeton::FonctionInfixe(_)))? {
        let fonction = match j[k] {
            Jeton::FonctionInfixe(f) => f,
            _ => return Err(ErreurCalcul::invalide("fonction attendue")),
        };
        return Ok(Noeud::Binaire {
            operation: Operation::Fonction(fonction),
            droite: Box::new(construire(&j[k + 1..], suivant)?),
            gauche: Box::new(construire(&j[..k], suivant)?),
        });
    }

    let dernier = j.len() - 1;

    // 5) fonction préfixe appliquée à tout le reste
    if let Jeton::Fonction(fonction) = j[dernier] {
        return Ok(Noeud::Unaire {
            fonction,
            droite: Box::new(construire(&j[..dernier], suivant)?),
        });
    }

    // 6) ( ... ) : parenthèses englobantes
    if j[0] == Jeton::ParFermante && j[dernier] == Jeton::ParOuvrante {
        return construire(&j[1..dernier], suivant);
    }

    Err(ErreurCalcul::invalide("expression irrésoluble"))
}

fn feuille(jeton: &Jeton) -> Resultat<Noeud> {
    match jeton {
        Jeton::Constante(c) => Ok(Noeud::Feuille(Valeur::Constante(*c))),
        Jeton::Nombre(s) => Ok(Noeud::Feuille(Valeur::Litteral(s.parse()?))),
        autre => Err(ErreurCalcul::invalide(format!("jeton isolé : {autre}"))),
    }
}

/* ------------------------ Affichage (journal) ------------------------ */

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Litteral(r) => write!(f, "{r}"),
            Valeur::Constante(c) => write!(f, "{c}"),
        }
    }
}

impl fmt::Display for Noeud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Noeud::Feuille(v) => write!(f, "{v}"),
            Noeud::Unaire { fonction, droite } => write!(f, "{fonction}({droite})"),
            Noeud::Binaire {
                operation: Operation::Operateur(o),
                droite,
                gauche,
            } => write!(f, "({droite} {o} {gauche})"),
            Noeud::Binaire {
                operation: Operation::Fonction(fct),
                droite,
                gauche,
            } => write!(f, "{fct}({droite}, {gauche})"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.racine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arbre(texte: &str) -> String {
        Expression::depuis_texte(texte).unwrap().to_string()
    }

    fn refuse(texte: &str) {
        let e = Expression::depuis_texte(texte).unwrap_err();
        assert!(!e.est_domaine(), "{texte:?} : {e}");
    }

    #[test]
    fn priorites() {
        assert_eq!(arbre("2+3*4"), "(2 + (3 * 4))");
        assert_eq!(arbre("(2+3)*4"), "((2 + 3) * 4)");
        assert_eq!(arbre("2*3^2"), "(2 * (3 ^ 2))");
        assert_eq!(arbre("1-2+3"), "((1 - 2) + 3)");
    }

    #[test]
    fn associativite_a_gauche() {
        assert_eq!(arbre("2^3^2"), "((2 ^ 3) ^ 2)");
        assert_eq!(arbre("8/4/2"), "((8 / 4) / 2)");
        assert_eq!(arbre("10-3-2"), "((10 - 3) - 2)");
    }

    #[test]
    fn unaires_et_implicites() {
        assert_eq!(arbre("-2(3)"), "((-1 * 2) * 3)");
        assert_eq!(arbre("-2^2"), "(-1 * (2 ^ 2))");
        assert_eq!(arbre("2pi"), "(2 * pi)");
        assert_eq!(arbre("0.5"), "1/2");
    }

    #[test]
    fn fonctions() {
        assert_eq!(arbre("sin(pi/2)"), "sin((pi / 2))");
        assert_eq!(arbre("3!"), "!(3)");
        assert_eq!(arbre("2^3!"), "(2 ^ !(3))");
        assert_eq!(arbre("sqrt(4)+1"), "(sqrt(4) + 1)");
        assert_eq!(arbre("log(2,8)"), "log(2, 8)");
        assert_eq!(arbre("log(2,8)^2"), "(log(2, 8) ^ 2)");
        assert_eq!(arbre("sin(log(2,8))"), "sin(log(2, 8))");
    }

    #[test]
    fn feuille_unique() {
        let e = Expression::depuis_texte("pi").unwrap();
        assert_eq!(e.into_racine(), Noeud::Feuille(Valeur::Constante(Constante::Pi)));
        assert_eq!(arbre("((7))"), "7");
    }

    #[test]
    fn erreurs_de_syntaxe() {
        refuse("");
        refuse("   ");
        refuse("2+*3");
        refuse("2+");
        refuse("*2");
        refuse("(1+2");
        refuse("1+2)");
        refuse("()");
        refuse("1.2.3");
        refuse("2,3");
        refuse("sin");
    }

    #[test]
    fn imbrication_bornee() {
        let profond = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
        refuse(&profond);
        let juste_au_dessus = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        refuse(&juste_au_dessus);
        let raisonnable = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(arbre(&raisonnable), "1");
    }
}
