// src/noyau/calculatrice.rs
//
// Calculatrice : texte -> arbre -> valeur -> forme courte
// -------------------------------------------------------
// Forme courte (P chiffres significatifs) :
// - zéro                 : "0"
// - |v| < 1              : D.DD…*10^(-N)
// - |v| >= 1, exposant 0 : D.DD…
// - |v| >= 1, exposant N : D.DD…*10^N
// Arrondi demi loin de zéro sur le (P+1)-ième chiffre significatif ;
// une retenue (9.99… -> 10.0…) décale l’exposant.

use num_traits::One;

use super::arbre::Expression;
use super::entier::BigInteger;
use super::erreur::Resultat;
use super::solveur::Solveur;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calculatrice {
    solveur: Solveur,
}

impl Calculatrice {
    pub fn new(precision: i64) -> Self {
        Calculatrice {
            solveur: Solveur::new(precision),
        }
    }

    pub fn calculer(&self, texte: &str) -> Resultat<String> {
        let expr = Expression::depuis_texte(texte)?;
        let valeur = self.solveur.resoudre(expr)?;

        let brut = valeur.to_decimal(self.solveur.precision_arrondi());
        log::debug!("décimal brut : {brut}");

        Ok(forme_courte(&brut, self.solveur.precision()))
    }
}

/// Décimal brut ("-123.456", "0.00050") -> forme courte à `precision` chiffres significatifs.
pub fn forme_courte(brut: &str, precision: usize) -> String {
    let precision = precision.max(1);
    let (negatif, corps) = match brut.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, brut),
    };
    let (entiere, fraction) = corps.split_once('.').unwrap_or((corps, ""));

    let entiere = entiere.trim_start_matches('0');
    let (mut exposant, significatifs): (i64, String) = if entiere.is_empty() {
        let zeros = fraction.len() - fraction.trim_start_matches('0').len();
        if zeros == fraction.len() {
            return "0".into();
        }
        (-(zeros as i64) - 1, fraction[zeros..].to_string())
    } else {
        (entiere.len() as i64 - 1, format!("{entiere}{fraction}"))
    };

    // P chiffres + 1 pour l’arrondi (complété par des zéros)
    let mut chiffres: Vec<u8> = significatifs.bytes().take(precision + 1).collect();
    chiffres.resize(precision + 1, b'0');
    let arrondir = chiffres[precision] >= b'5';
    chiffres.truncate(precision);

    let mut mantisse: String = chiffres.iter().map(|&c| c as char).collect();
    if arrondir {
        let plus_un = mantisse
            .parse::<BigInteger>()
            .map(|m| m + BigInteger::one())
            .map(|m| m.to_string())
            .unwrap_or_else(|_| mantisse.clone());
        mantisse = if plus_un.len() > precision {
            exposant += 1;
            plus_un[..precision].to_string()
        } else {
            plus_un
        };
    }

    let mut out = String::with_capacity(precision + 16);
    if negatif {
        out.push('-');
    }
    out.push_str(&mantisse[..1]);
    // P = 1 : chiffre nu, sans point décimal
    if precision > 1 {
        out.push('.');
        out.push_str(&mantisse[1..]);
    }
    match exposant {
        0 => {}
        e if e > 0 => out.push_str(&format!("*10^{e}")),
        e => out.push_str(&format!("*10^({e})")),
    }
    out
}
