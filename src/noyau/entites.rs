// src/noyau/entites.rs
//
// Entités nommées : constantes, opérateurs, fonctions
// ---------------------------------------------------
// - classification d’un nom (depuis_nom / depuis_symbole ; est_binaire pour log)
// - évaluation sur des BigRational à une précision de travail donnée
//
// Tout ce qui n’est pas de l’arithmétique de base est délégué à fonctions.rs.

use std::fmt;

use super::erreur::{ErreurCalcul, Resultat};
use super::fonctions;
use super::rationnel::BigRational;

/* ------------------------ Constantes ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "pi" | "π" => Some(Constante::Pi),
            "e" => Some(Constante::E),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
        }
    }

    /// Valeur à p décimales.
    pub fn valeur(self, p: usize) -> Resultat<BigRational> {
        match self {
            Constante::Pi => Ok(fonctions::pi(p)),
            Constante::E => fonctions::e(p),
        }
    }
}

impl fmt::Display for Constante {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

/* ------------------------ Opérateurs ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

/// Niveau dans la cascade de découpage (le plus faible est essayé d’abord).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Niveau {
    Additif,
    Multiplicatif,
    Puissance,
}

impl Operateur {
    pub fn depuis_symbole(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            '^' => Some(Operateur::Puissance),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Puissance => '^',
        }
    }

    pub fn niveau(self) -> Niveau {
        match self {
            Operateur::Plus | Operateur::Moins => Niveau::Additif,
            Operateur::Fois | Operateur::Divise => Niveau::Multiplicatif,
            Operateur::Puissance => Niveau::Puissance,
        }
    }

    /// a ∘ b
    pub fn resoudre(self, a: &BigRational, b: &BigRational, p: usize) -> Resultat<BigRational> {
        match self {
            Operateur::Plus => Ok(a + b),
            Operateur::Moins => Ok(a - b),
            Operateur::Fois => Ok(a * b),
            Operateur::Divise => a.checked_div(b),
            Operateur::Puissance => fonctions::puissance(a, b, p),
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}

/* ------------------------ Fonctions ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Racine,
    Exp,
    Log,
    Ln,
    Lb,
    Lg,
    Sin,
    Cos,
    Tan,
    Cot,
    Asin,
    Acos,
    Atan,
    Acot,
    Factorielle,
    DoubleFactorielle,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        use Fonction::*;
        Some(match nom {
            "sqrt" | "√" => Racine,
            "exp" => Exp,
            "log" => Log,
            "ln" => Ln,
            "lb" => Lb,
            "lg" => Lg,
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "cot" => Cot,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "acot" => Acot,
            "!" => Factorielle,
            "!!" => DoubleFactorielle,
            _ => return None,
        })
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Racine => "sqrt",
            Exp => "exp",
            Log => "log",
            Ln => "ln",
            Lb => "lb",
            Lg => "lg",
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Cot => "cot",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Acot => "acot",
            Factorielle => "!",
            DoubleFactorielle => "!!",
        }
    }

    /// log(a, b) est la seule fonction à deux arguments.
    pub fn est_binaire(self) -> bool {
        matches!(self, Fonction::Log)
    }

    pub fn resoudre_unaire(self, x: &BigRational, p: usize) -> Resultat<BigRational> {
        use Fonction::*;
        match self {
            Racine => fonctions::racine(x, p),
            Exp => fonctions::exp(x, p),
            Ln => fonctions::ln(x, p),
            Lb => fonctions::lb(x, p),
            Lg => fonctions::lg(x, p),
            Sin => fonctions::sin(x, p),
            Cos => fonctions::cos(x, p),
            Tan => fonctions::tan(x, p),
            Cot => fonctions::cot(x, p),
            Asin => fonctions::asin(x, p),
            Acos => fonctions::acos(x, p),
            Atan => fonctions::atan(x, p),
            Acot => fonctions::acot(x, p),
            Factorielle => fonctions::factorielle(x),
            DoubleFactorielle => fonctions::double_factorielle(x),
            Log => Err(ErreurCalcul::invalide("log attend deux arguments")),
        }
    }

    pub fn resoudre_binaire(
        self,
        a: &BigRational,
        b: &BigRational,
        p: usize,
    ) -> Resultat<BigRational> {
        match self {
            Fonction::Log => fonctions::log(a, b, p),
            autre => Err(ErreurCalcul::invalide(format!(
                "{} attend un seul argument",
                autre.nom()
            ))),
        }
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}
