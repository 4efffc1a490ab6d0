// src/noyau/jetons.rs
//
// Tokenisation
// ------------
// Passe unique gauche → droite sur le texte sans espaces, puis deux retouches :
// - multiplication implicite : 2(3), 2pi, 3 sin(x), (1)(2)
// - + / - unaires (en tête, après “(” ou “,”) : “+” disparaît, “-” devient “-1 *”
// - ! et !! deviennent des fonctions préfixes placées devant leur opérande
// - log(a, b) est réécrit en ((a) log (b)) : le parseur le traite comme un opérateur
//
// La liste finale est INVERSÉE : le parseur la lit de droite à gauche.

use std::fmt;

use super::entites::{Constante, Fonction, Operateur};
use super::erreur::{ErreurCalcul, Resultat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    /// Littéral brut (validé à la construction de la feuille).
    Nombre(String),
    Constante(Constante),
    Operateur(Operateur),
    /// Fonction préfixe (y compris ! et !! déplacés).
    Fonction(Fonction),
    /// Fonction binaire réécrite en position infixe.
    FonctionInfixe(Fonction),
    ParOuvrante,
    ParFermante,
    Virgule,
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jeton::Nombre(s) => f.write_str(s),
            Jeton::Constante(c) => write!(f, "{c}"),
            Jeton::Operateur(o) => write!(f, "{o}"),
            Jeton::Fonction(fct) | Jeton::FonctionInfixe(fct) => write!(f, "{fct}"),
            Jeton::ParOuvrante => f.write_str("("),
            Jeton::ParFermante => f.write_str(")"),
            Jeton::Virgule => f.write_str(","),
        }
    }
}

/// Un opérande commence : multiplication implicite si le jeton précédent
/// n’est ni “,”, ni “(”, ni un opérateur, ni une fonction.
fn pousser_operande(out: &mut Vec<Jeton>, jeton: Jeton) {
    let implicite = match out.last() {
        None => false,
        Some(Jeton::Virgule | Jeton::ParOuvrante | Jeton::Operateur(_) | Jeton::Fonction(_)) => {
            false
        }
        Some(_) => true,
    };
    if implicite {
        out.push(Jeton::Operateur(Operateur::Fois));
    }
    out.push(jeton);
}

/// Place la marque factorielle devant l’opérande qui la précède
/// (devant la fonction si l’opérande est une application de fonction).
fn placer_factorielle(out: &mut Vec<Jeton>, marque: Fonction) -> Resultat<()> {
    let mut debut = match out.last() {
        Some(Jeton::Nombre(_) | Jeton::Constante(_)) => out.len() - 1,
        Some(Jeton::ParFermante) => {
            let mut profondeur = 0usize;
            let mut j = out.len();
            loop {
                j = j.checked_sub(1).ok_or_else(|| {
                    ErreurCalcul::invalide(format!("{marque} : parenthèses déséquilibrées"))
                })?;
                match out[j] {
                    Jeton::ParFermante => profondeur += 1,
                    Jeton::ParOuvrante => {
                        profondeur -= 1;
                        if profondeur == 0 {
                            break j;
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {
            return Err(ErreurCalcul::invalide(format!("{marque} : opérande manquant")));
        }
    };

    while debut > 0 && matches!(out[debut - 1], Jeton::Fonction(_)) {
        debut -= 1;
    }

    out.insert(debut, Jeton::Fonction(marque));
    Ok(())
}

/// log ( a , b )  =>  ( ( a ) log ( b ) )
fn reecrire_binaires(mut jetons: Vec<Jeton>) -> Resultat<Vec<Jeton>> {
    while let Some((i, fonction)) = jetons.iter().enumerate().find_map(|(k, j)| match j {
        Jeton::Fonction(f) if f.est_binaire() => Some((k, *f)),
        _ => None,
    }) {
        if jetons.get(i + 1) != Some(&Jeton::ParOuvrante) {
            return Err(ErreurCalcul::invalide(format!(
                "{fonction} : parenthèse ouvrante attendue"
            )));
        }

        let mut profondeur = 0usize;
        let mut separateur = None;
        let mut fermante = None;
        for (k, j) in jetons.iter().enumerate().skip(i + 1) {
            match j {
                Jeton::ParOuvrante => profondeur += 1,
                Jeton::ParFermante => {
                    profondeur -= 1;
                    if profondeur == 0 {
                        fermante = Some(k);
                        break;
                    }
                }
                Jeton::Virgule if profondeur == 1 => {
                    if separateur.is_some() {
                        return Err(ErreurCalcul::invalide(format!(
                            "{fonction} : deux arguments attendus"
                        )));
                    }
                    separateur = Some(k);
                }
                _ => {}
            }
        }

        let fermante = fermante.ok_or_else(|| {
            ErreurCalcul::invalide(format!("{fonction} : parenthèses déséquilibrées"))
        })?;
        let separateur = separateur.ok_or_else(|| {
            ErreurCalcul::invalide(format!("{fonction} : deux arguments attendus"))
        })?;

        jetons[i] = Jeton::ParOuvrante;
        jetons.splice(
            separateur..=separateur,
            [
                Jeton::ParFermante,
                Jeton::FonctionInfixe(fonction),
                Jeton::ParOuvrante,
            ],
        );
        // la fermante a glissé de 2 positions
        jetons.insert(fermante + 3, Jeton::ParFermante);
    }

    Ok(jetons)
}

/// Tokenise une expression. Le résultat est en ordre INVERSE.
///
/// Supporte :
/// - nombres décimaux (chiffres et points, validés plus tard)
/// - opérateurs + - * / ^, parenthèses, virgule
/// - constantes pi / π / e, fonctions (insensible à la casse), √
/// - ! et !! postfixés
pub fn tokenize(texte: &str) -> Resultat<Vec<Jeton>> {
    let chars: Vec<char> = texte.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out: Vec<Jeton> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        // Parenthèses / séparateur
        if c == '(' {
            pousser_operande(&mut out, Jeton::ParOuvrante);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::ParFermante);
            i += 1;
            continue;
        }
        if c == ',' {
            out.push(Jeton::Virgule);
            i += 1;
            continue;
        }

        // Factorielles
        if c == '!' {
            let double = chars.get(i + 1) == Some(&'!');
            let marque = if double {
                Fonction::DoubleFactorielle
            } else {
                Fonction::Factorielle
            };
            placer_factorielle(&mut out, marque)?;
            i += if double { 2 } else { 1 };
            continue;
        }

        // Opérateurs (+ / - unaires réécrits)
        if let Some(op) = Operateur::depuis_symbole(c) {
            let unaire = matches!(
                out.last(),
                None | Some(Jeton::ParOuvrante) | Some(Jeton::Virgule)
            );
            match (unaire, op) {
                (true, Operateur::Plus) => {}
                (true, Operateur::Moins) => {
                    out.push(Jeton::Nombre("-1".into()));
                    out.push(Jeton::Operateur(Operateur::Fois));
                }
                _ => out.push(Jeton::Operateur(op)),
            }
            i += 1;
            continue;
        }

        // π et √ : symboles d’un seul caractère
        if c == 'π' {
            pousser_operande(&mut out, Jeton::Constante(Constante::Pi));
            i += 1;
            continue;
        }
        if c == '√' {
            pousser_operande(&mut out, Jeton::Fonction(Fonction::Racine));
            i += 1;
            continue;
        }

        // Nombre : chiffres et points (glouton)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let nombre: String = chars[start..i].iter().collect();
            pousser_operande(&mut out, Jeton::Nombre(nombre));
            continue;
        }

        // Identifiant : lettres (glouton), doit être une constante ou une fonction
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect::<String>().to_lowercase();

            let jeton = if let Some(k) = Constante::depuis_nom(&mot) {
                Jeton::Constante(k)
            } else if let Some(f) = Fonction::depuis_nom(&mot) {
                Jeton::Fonction(f)
            } else {
                return Err(ErreurCalcul::invalide(format!("symbole inconnu : {mot}")));
            };
            pousser_operande(&mut out, jeton);
            continue;
        }

        return Err(ErreurCalcul::invalide(format!("caractère inattendu : '{c}'")));
    }

    let mut jetons = reecrire_binaires(out)?;
    jetons.reverse();
    Ok(jetons)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(Jeton::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
