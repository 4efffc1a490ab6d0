// src/noyau/rationnel.rs
//
// BigRational : fraction exacte toujours réduite
// ----------------------------------------------
// Invariants (après CHAQUE construction / opération) :
// - numérateur et dénominateur stockés en magnitude (>= 0), signe séparé
// - dénominateur > 0
// - pgcd(numérateur, dénominateur) = 1
// - zéro = 0/1, positif
//
// Lecture décimale : arrondi “demi loin de zéro” sur le premier chiffre écarté.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_traits::{One, ToPrimitive, Zero};

use super::entier::BigInteger;
use super::erreur::{ErreurCalcul, Resultat};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigRational {
    numerateur: BigInteger,
    denominateur: BigInteger,
    negatif: bool,
}

impl BigRational {
    pub fn new(numerateur: BigInteger, denominateur: BigInteger) -> Resultat<Self> {
        if denominateur.is_zero() {
            return Err(ErreurCalcul::division_par_zero());
        }
        Ok(Self::reduire(numerateur, denominateur))
    }

    /// Dénominateur non nul supposé.
    fn reduire(numerateur: BigInteger, denominateur: BigInteger) -> Self {
        if numerateur.is_zero() {
            return Self::zero();
        }
        let negatif = numerateur.is_negative() != denominateur.is_negative();
        let (n, d) = (numerateur.abs(), denominateur.abs());

        let g = n.gcd(&d);
        let (n, d) = if g.is_one() {
            (n, d)
        } else {
            (n.div_rem_non_nul(&g).0, d.div_rem_non_nul(&g).0)
        };

        BigRational {
            numerateur: n,
            denominateur: d,
            negatif,
        }
    }

    pub fn from_integer(n: BigInteger) -> Self {
        BigRational {
            negatif: n.is_negative(),
            numerateur: n.abs(),
            denominateur: BigInteger::one(),
        }
    }

    /// Numérateur signé.
    pub fn numer(&self) -> BigInteger {
        if self.negatif {
            -&self.numerateur
        } else {
            self.numerateur.clone()
        }
    }

    pub fn denom(&self) -> &BigInteger {
        &self.denominateur
    }

    pub fn is_negative(&self) -> bool {
        self.negatif
    }

    pub fn abs(&self) -> Self {
        BigRational {
            numerateur: self.numerateur.clone(),
            denominateur: self.denominateur.clone(),
            negatif: false,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.denominateur.is_one()
    }

    /// Partie entière tronquée vers zéro.
    pub fn trunc(&self) -> BigInteger {
        self.numer().div_rem_non_nul(&self.denominateur).0
    }

    pub fn recip(&self) -> Resultat<Self> {
        if self.is_zero() {
            return Err(ErreurCalcul::division_par_zero());
        }
        Ok(BigRational {
            numerateur: self.denominateur.clone(),
            denominateur: self.numerateur.clone(),
            negatif: self.negatif,
        })
    }

    pub fn checked_div(&self, rhs: &Self) -> Resultat<Self> {
        if rhs.is_zero() {
            return Err(ErreurCalcul::division_par_zero());
        }
        Ok(Self::reduire(
            self.numer() * &rhs.denominateur,
            &self.denominateur * rhs.numer(),
        ))
    }

    /// Puissance entière exacte (exposant négatif => inverse).
    pub fn powi(&self, exp: i64) -> Resultat<Self> {
        let e = u32::try_from(exp.unsigned_abs())
            .map_err(|_| ErreurCalcul::domaine("puissance : exposant trop grand"))?;

        // pgcd(n^e, d^e) = 1 : rien à réduire
        let p = BigRational {
            numerateur: self.numerateur.pow(e),
            denominateur: self.denominateur.pow(e),
            negatif: self.negatif && e % 2 == 1,
        };

        if exp < 0 {
            p.recip()
        } else {
            Ok(p)
        }
    }

    /// round(|v| · 10^chiffres), demi loin de zéro.
    fn magnitude_arrondie(&self, chiffres: usize) -> BigInteger {
        let n = &self.numerateur * BigInteger::pow10(chiffres + 1);
        let (q, _) = n.div_rem_non_nul(&self.denominateur);
        (q + BigInteger::from(5u32))
            .div_rem_non_nul(&BigInteger::from(10u32))
            .0
    }

    /// Re-quantifie la valeur à `chiffres` décimales.
    pub fn round(&self, chiffres: usize) -> Self {
        let m = self.magnitude_arrondie(chiffres);
        let m = if self.negatif { -m } else { m };
        Self::reduire(m, BigInteger::pow10(chiffres))
    }

    /// Entier “scalé” : trunc(v · 10^chiffres) (virgule fixe).
    pub fn echelle(&self, chiffres: usize) -> BigInteger {
        (self.numer() * BigInteger::pow10(chiffres))
            .div_rem_non_nul(&self.denominateur)
            .0
    }

    /// Inverse de `echelle` : x / 10^chiffres.
    pub fn depuis_echelle(x: BigInteger, chiffres: usize) -> Self {
        Self::reduire(x, BigInteger::pow10(chiffres))
    }

    /// Texte décimal avec exactement `chiffres` décimales (arrondi).
    /// Pas de signe si le résultat arrondi est nul.
    pub fn to_decimal(&self, chiffres: usize) -> String {
        let m = self.magnitude_arrondie(chiffres);
        let nul = m.is_zero();
        let m = m.to_string();

        let texte = if chiffres == 0 {
            m
        } else {
            let m = format!("{m:0>largeur$}", largeur = chiffres + 1);
            let (ent, frac) = m.split_at(m.len() - chiffres);
            format!("{ent}.{frac}")
        };

        if self.negatif && !nul {
            format!("-{texte}")
        } else {
            texte
        }
    }
}

/* ------------------------ Arithmétique ------------------------ */

fn somme(a: &BigRational, b: &BigRational) -> BigRational {
    if a.denominateur == b.denominateur {
        return BigRational::reduire(a.numer() + b.numer(), a.denominateur.clone());
    }
    BigRational::reduire(
        a.numer() * &b.denominateur + b.numer() * &a.denominateur,
        &a.denominateur * &b.denominateur,
    )
}

fn difference(a: &BigRational, b: &BigRational) -> BigRational {
    somme(a, &-b)
}

fn produit(a: &BigRational, b: &BigRational) -> BigRational {
    BigRational::reduire(a.numer() * b.numer(), &a.denominateur * &b.denominateur)
}

operations_binaires!(BigRational, Add, add, AddAssign, add_assign, somme);
operations_binaires!(BigRational, Sub, sub, SubAssign, sub_assign, difference);
operations_binaires!(BigRational, Mul, mul, MulAssign, mul_assign, produit);

impl Neg for BigRational {
    type Output = BigRational;

    fn neg(self) -> BigRational {
        let negatif = !self.negatif && !self.is_zero();
        BigRational { negatif, ..self }
    }
}

impl Neg for &BigRational {
    type Output = BigRational;

    fn neg(self) -> BigRational {
        -self.clone()
    }
}

impl Ord for BigRational {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numer() * &other.denominateur).cmp(&(other.numer() * &self.denominateur))
    }
}

impl PartialOrd for BigRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Zero for BigRational {
    fn zero() -> Self {
        BigRational {
            numerateur: BigInteger::zero(),
            denominateur: BigInteger::one(),
            negatif: false,
        }
    }

    fn is_zero(&self) -> bool {
        self.numerateur.is_zero()
    }
}

impl One for BigRational {
    fn one() -> Self {
        BigRational::from_integer(BigInteger::one())
    }
}

impl ToPrimitive for BigRational {
    fn to_i64(&self) -> Option<i64> {
        self.trunc().to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.trunc().to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        self.to_decimal(20).parse().ok()
    }
}

impl From<BigInteger> for BigRational {
    fn from(n: BigInteger) -> Self {
        BigRational::from_integer(n)
    }
}

impl From<i64> for BigRational {
    fn from(v: i64) -> Self {
        BigRational::from_integer(BigInteger::from(v))
    }
}

impl FromStr for BigRational {
    type Err = ErreurCalcul;

    /// Littéral décimal : `[-]chiffres[.chiffres]` (au moins un chiffre, un seul point).
    fn from_str(s: &str) -> Resultat<Self> {
        let invalide = || ErreurCalcul::invalide(format!("nombre invalide : {s:?}"));

        let (negatif, corps) = match s.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, s),
        };
        let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));

        let chiffres_ok = |t: &str| t.bytes().all(|c| c.is_ascii_digit());
        if (ent.is_empty() && frac.is_empty()) || !chiffres_ok(ent) || !chiffres_ok(frac) {
            return Err(invalide());
        }

        let mut texte = String::with_capacity(ent.len() + frac.len() + 2);
        if negatif {
            texte.push('-');
        }
        texte.push_str(ent);
        texte.push_str(frac);

        let n: BigInteger = texte.parse().map_err(|_| invalide())?;
        Ok(BigRational::reduire(n, BigInteger::pow10(frac.len())))
    }
}

impl fmt::Display for BigRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negatif {
            f.write_str("-")?;
        }
        if self.is_integer() {
            write!(f, "{}", self.numerateur)
        } else {
            write!(f, "{}/{}", self.numerateur, self.denominateur)
        }
    }
}
