//! Noyau de calcul en précision arbitraire
//!
//! Organisation interne :
//! - erreur.rs       : ErreurCalcul (entrée invalide / domaine)
//! - entier.rs       : BigInteger (base 10^9, Karatsuba, division par encadrement)
//! - rationnel.rs    : BigRational (toujours réduit, arrondi décimal)
//! - fonctions.rs    : π, e, exp, ln, log, trig, factorielles (précision p)
//! - entites.rs      : constantes / opérateurs / fonctions nommés
//! - jetons.rs       : tokenisation (implicites, unaires, log réécrit, inversion)
//! - arbre.rs        : parseur récursif -> arbre d’expression
//! - solveur.rs      : réduction post-ordre avec décimales de garde
//! - calculatrice.rs : pipeline complet + forme courte

/// Implémente `$Trait` (4 combinaisons valeur / référence) et `$Assign`
/// à partir d’une fonction `fn(&T, &T) -> T` (traits importés par l’appelant).
macro_rules! operations_binaires {
    ($T:ident, $Trait:ident, $methode:ident, $Assign:ident, $methode_assign:ident, $f:ident) => {
        impl<'a, 'b> $Trait<&'b $T> for &'a $T {
            type Output = $T;
            fn $methode(self, rhs: &'b $T) -> $T {
                $f(self, rhs)
            }
        }

        impl $Trait<$T> for $T {
            type Output = $T;
            fn $methode(self, rhs: $T) -> $T {
                $f(&self, &rhs)
            }
        }

        impl<'b> $Trait<&'b $T> for $T {
            type Output = $T;
            fn $methode(self, rhs: &'b $T) -> $T {
                $f(&self, rhs)
            }
        }

        impl<'a> $Trait<$T> for &'a $T {
            type Output = $T;
            fn $methode(self, rhs: $T) -> $T {
                $f(self, &rhs)
            }
        }

        impl $Assign<$T> for $T {
            fn $methode_assign(&mut self, rhs: $T) {
                *self = $f(&*self, &rhs);
            }
        }

        impl<'b> $Assign<&'b $T> for $T {
            fn $methode_assign(&mut self, rhs: &'b $T) {
                *self = $f(&*self, rhs);
            }
        }
    };
}

pub mod arbre;
pub mod calculatrice;
pub mod entier;
pub mod entites;
pub mod erreur;
pub mod fonctions;
pub mod jetons;
pub mod rationnel;
pub mod solveur;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

pub use calculatrice::Calculatrice;
pub use erreur::{ErreurCalcul, Resultat};

/// API publique minimale : texte -> forme courte à `precision` chiffres.
pub fn eval_expression(texte: &str, precision: i64) -> Resultat<String> {
    Calculatrice::new(precision).calculer(texte)
}
