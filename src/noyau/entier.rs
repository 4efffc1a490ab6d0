// src/noyau/entier.rs
//
// BigInteger : entier signé de précision arbitraire
// -------------------------------------------------
// Représentation :
// - tranches base 10^9, poids faible d’abord
// - signe séparé ; zéro = [0] toujours positif (pas de “-0”)
// - aucune tranche nulle en tête (sauf le zéro lui-même)
//
// Algorithmes :
// - addition / soustraction en colonne (retenue / emprunt)
// - multiplication polynomiale sous SEUIL_KARATSUBA tranches, Karatsuba au-delà
// - division courte (diviseur d’une tranche) ou encadrement + dichotomie
// - racine carrée chiffre à chiffre (base 10, pas base 10^9)
//
// Pas d’opérateur `/` ni `%` : la division par zéro est une erreur de domaine,
// donc div_rem / checked_div / checked_rem renvoient un Resultat.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_traits::{One, ToPrimitive, Zero};

use super::erreur::{ErreurCalcul, Resultat};

const BASE: u64 = 1_000_000_000;
const BASE_CHIFFRES: usize = 9;

/// En dessous (sur l’un des deux opérandes), multiplication polynomiale.
pub const SEUIL_KARATSUBA: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigInteger {
    tranches: Vec<u32>,
    negatif: bool,
}

/* ------------------------ Magnitudes (tranches brutes) ------------------------ */

fn normaliser(v: &mut Vec<u32>) {
    while v.len() > 1 && v.last() == Some(&0) {
        v.pop();
    }
    if v.is_empty() {
        v.push(0);
    }
}

fn est_nul(v: &[u32]) -> bool {
    v.iter().all(|&t| t == 0)
}

/// Longueur sans les tranches nulles de tête.
fn longueur_utile(v: &[u32]) -> usize {
    let mut n = v.len();
    while n > 0 && v[n - 1] == 0 {
        n -= 1;
    }
    n
}

/// Nombre de tranches nulles de poids faible.
fn zeros_bas(v: &[u32]) -> usize {
    v.iter().take_while(|&&t| t == 0).count()
}

fn comparer(a: &[u32], b: &[u32]) -> Ordering {
    let (la, lb) = (longueur_utile(a), longueur_utile(b));
    if la != lb {
        return la.cmp(&lb);
    }
    for i in (0..la).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            autre => return autre,
        }
    }
    Ordering::Equal
}

fn additionner(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len().max(b.len());
    let mut res = Vec::with_capacity(n + 1);
    let mut retenue = 0u64;

    for i in 0..n {
        let s = u64::from(a.get(i).copied().unwrap_or(0))
            + u64::from(b.get(i).copied().unwrap_or(0))
            + retenue;
        res.push((s % BASE) as u32);
        retenue = s / BASE;
    }
    if retenue > 0 {
        res.push(retenue as u32);
    }

    normaliser(&mut res);
    res
}

/// a - b, avec a >= b (les tranches de b au-delà de a doivent être nulles).
fn soustraire(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut res = Vec::with_capacity(a.len());
    let mut emprunt = 0i64;

    for (i, &t) in a.iter().enumerate() {
        let mut d = i64::from(t) - i64::from(b.get(i).copied().unwrap_or(0)) - emprunt;
        if d < 0 {
            d += BASE as i64;
            emprunt = 1;
        } else {
            emprunt = 0;
        }
        res.push(d as u32);
    }
    debug_assert_eq!(emprunt, 0, "soustraire: a < b");

    normaliser(&mut res);
    res
}

/// v * BASE^k
fn decaler(v: &[u32], k: usize) -> Vec<u32> {
    if est_nul(v) {
        return vec![0];
    }
    let mut res = vec![0u32; k];
    res.extend_from_slice(v);
    normaliser(&mut res);
    res
}

/// Produit “polynôme” (convolution + normalisation des retenues).
fn multiplier_polynomial(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return vec![0];
    }

    let mut res = vec![0u64; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut retenue = 0u64;
        for (j, &y) in b.iter().enumerate() {
            // res[i+j] < BASE et retenue < BASE : pas de débordement u64
            let cur = res[i + j] + u64::from(x) * u64::from(y) + retenue;
            res[i + j] = cur % BASE;
            retenue = cur / BASE;
        }
        res[i + b.len()] = retenue;
    }

    let mut v: Vec<u32> = res.into_iter().map(|t| t as u32).collect();
    normaliser(&mut v);
    v
}

/// Karatsuba : A·B = p0 + p1·BASE^m + p2·BASE^2m
///
/// p0 = A0·B0, p2 = A1·B1, p1 = (A0 + A1)(B0 + B1) - p0 - p2
/// (A0, B0 : moitiés basses ; A1, B1 : moitiés hautes)
fn karatsuba(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.len() < SEUIL_KARATSUBA || b.len() < SEUIL_KARATSUBA {
        return multiplier_polynomial(a, b);
    }

    let m = a.len().max(b.len()) / 2;
    let (a0, a1) = a.split_at(m.min(a.len()));
    let (b0, b1) = b.split_at(m.min(b.len()));

    let p0 = karatsuba(a0, b0);
    let p2 = karatsuba(a1, b1);
    let p1 = karatsuba(&additionner(a0, a1), &additionner(b0, b1));
    let p1 = soustraire(&soustraire(&p1, &p0), &p2);

    let res = additionner(&p0, &decaler(&p1, m));
    additionner(&res, &decaler(&p2, 2 * m))
}

/// Multiplication de magnitudes.
/// Les tranches nulles de poids faible sont retirées (puis remises),
/// et au-delà du seuil les opérandes sont complétés à une même longueur paire.
fn multiplier(a: &[u32], b: &[u32]) -> Vec<u32> {
    if est_nul(a) || est_nul(b) {
        return vec![0];
    }

    let (za, zb) = (zeros_bas(a), zeros_bas(b));
    let a = &a[za..longueur_utile(a)];
    let b = &b[zb..longueur_utile(b)];

    let produit = if a.len() < SEUIL_KARATSUBA || b.len() < SEUIL_KARATSUBA {
        multiplier_polynomial(a, b)
    } else {
        let mut n = a.len().max(b.len());
        if n % 2 == 1 {
            n += 1;
        }
        let mut ga = a.to_vec();
        let mut gb = b.to_vec();
        ga.resize(n, 0);
        gb.resize(n, 0);
        karatsuba(&ga, &gb)
    };

    decaler(&produit, za + zb)
}

/// Division par un “petit” diviseur (0 < d <= BASE), avec reste.
fn diviser_court(a: &[u32], d: u64) -> (Vec<u32>, u64) {
    debug_assert!(d > 0 && d <= BASE);

    let mut q = vec![0u32; a.len()];
    let mut reste = 0u64;
    for i in (0..a.len()).rev() {
        let cur = reste * BASE + u64::from(a[i]);
        q[i] = (cur / d) as u32;
        reste = cur % d;
    }

    normaliser(&mut q);
    (q, reste)
}

/// Retire les k tranches de poids faible (division entière par BASE^k).
fn tronquer_bas(v: Vec<u32>, k: usize) -> Vec<u32> {
    if v.len() <= k {
        return vec![0];
    }
    let mut r = v[k..].to_vec();
    normaliser(&mut r);
    r
}

/// Quotient exact dans [gauche, droite] par dichotomie (multiplier + comparer).
fn dichotomie(a: &[u32], b: &[u32], mut gauche: Vec<u32>, mut droite: Vec<u32>) -> Vec<u32> {
    let un = [1u32];

    while comparer(&soustraire(&droite, &gauche), &un) == Ordering::Greater {
        let (milieu, _) = diviser_court(&additionner(&gauche, &droite), 2);
        if comparer(&multiplier(b, &milieu), a) == Ordering::Greater {
            droite = milieu;
        } else {
            gauche = milieu;
        }
    }

    if comparer(&multiplier(b, &droite), a) != Ordering::Greater {
        droite
    } else {
        gauche
    }
}

/// Division de magnitudes (b non nul) : (quotient, reste).
///
/// Encadrement : A/(b_tete + 1) <= q <= A/(b_tete - 1), b_tete = tranche de tête de B,
/// puis on retire les (B.len() - 1) tranches basses des deux bornes.
fn diviser(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    if comparer(a, b) == Ordering::Less {
        let mut r = a.to_vec();
        normaliser(&mut r);
        return (vec![0], r);
    }

    let b_utile = &b[..longueur_utile(b)];
    if b_utile.len() == 1 {
        let (q, r) = diviser_court(a, u64::from(b_utile[0]));
        return (q, vec![r as u32]);
    }

    // zéros de poids faible communs : le quotient ne change pas
    let a_utile = &a[..longueur_utile(a)];
    let zeros = zeros_bas(a_utile).min(zeros_bas(b_utile));
    let (a_red, b_red) = (&a_utile[zeros..], &b_utile[zeros..]);

    let n = b_red.len();
    let tete = u64::from(b_red[n - 1]);

    let gauche = tronquer_bas(diviser_court(a_red, tete + 1).0, n - 1);
    let droite = if tete > 1 {
        tronquer_bas(diviser_court(a_red, tete - 1).0, n - 1)
    } else {
        let mut v = a_red.to_vec();
        if let Some(haut) = v.last_mut() {
            *haut = (BASE - 1) as u32;
        }
        tronquer_bas(v, n - 1)
    };

    let q = if gauche == droite {
        gauche
    } else {
        dichotomie(a_red, b_red, gauche, droite)
    };

    let r = soustraire(a_utile, &multiplier(b_utile, &q));
    (q, r)
}

fn racine_u64(x: u64) -> u64 {
    let mut r = 0u64;
    while (r + 1) * (r + 1) <= x {
        r += 1;
    }
    r
}

/* ------------------------ BigInteger ------------------------ */

impl BigInteger {
    fn depuis_tranches(mut tranches: Vec<u32>, negatif: bool) -> Self {
        normaliser(&mut tranches);
        let negatif = negatif && !est_nul(&tranches);
        BigInteger { tranches, negatif }
    }

    /// 10^n
    pub fn pow10(n: usize) -> Self {
        let mut tranches = vec![0u32; n / BASE_CHIFFRES];
        tranches.push(10u32.pow((n % BASE_CHIFFRES) as u32));
        Self::depuis_tranches(tranches, false)
    }

    pub fn is_negative(&self) -> bool {
        self.negatif
    }

    pub fn abs(&self) -> Self {
        BigInteger {
            tranches: self.tranches.clone(),
            negatif: false,
        }
    }

    /// Nombre de chiffres décimaux de la valeur absolue (0 compte pour 1).
    pub fn digit_count(&self) -> usize {
        let haut = self.tranches[self.tranches.len() - 1];
        (self.tranches.len() - 1) * BASE_CHIFFRES + haut.to_string().len()
    }

    /// Division tronquée vers zéro ; le reste a le signe du dividende.
    pub fn div_rem(&self, rhs: &Self) -> Resultat<(Self, Self)> {
        if rhs.is_zero() {
            return Err(ErreurCalcul::division_par_zero());
        }
        Ok(self.div_rem_non_nul(rhs))
    }

    /// Même chose que `div_rem`, pour un diviseur connu non nul
    /// (dénominateur d’un BigRational, puissance de 10…).
    pub(crate) fn div_rem_non_nul(&self, rhs: &Self) -> (Self, Self) {
        debug_assert!(!rhs.is_zero());
        let (q, r) = diviser(&self.tranches, &rhs.tranches);
        (
            Self::depuis_tranches(q, self.negatif != rhs.negatif),
            Self::depuis_tranches(r, self.negatif),
        )
    }

    pub fn checked_div(&self, rhs: &Self) -> Resultat<Self> {
        self.div_rem(rhs).map(|(q, _)| q)
    }

    pub fn checked_rem(&self, rhs: &Self) -> Resultat<Self> {
        self.div_rem(rhs).map(|(_, r)| r)
    }

    /// Exponentiation rapide (carré-multiplication).
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut acc = Self::one();
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = &acc * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        acc
    }

    /// PGCD (Euclide), toujours positif ; pgcd(0, 0) = 0.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.tranches.clone();
        let mut b = other.tranches.clone();
        while !est_nul(&b) {
            let (_, r) = diviser(&a, &b);
            a = b;
            b = r;
        }
        Self::depuis_tranches(a, false)
    }

    /// Racine carrée entière (partie entière), extraite chiffre à chiffre.
    ///
    /// Faces de deux chiffres depuis la droite ; à chaque face, on cherche par
    /// dichotomie le plus grand chiffre c tel que (20·r + c)·c <= reste.
    pub fn sqrt(&self) -> Resultat<Self> {
        if self.negatif {
            return Err(ErreurCalcul::domaine("racine carrée hors domaine"));
        }

        let texte = self.to_string();
        let octets = texte.as_bytes();
        let valeur_face = |face: &[u8]| {
            face.iter()
                .fold(0u64, |acc, &c| acc * 10 + u64::from(c - b'0'))
        };

        let tete = if octets.len() % 2 == 1 { 1 } else { 2 };
        let premiere = valeur_face(&octets[..tete]);
        let graine = racine_u64(premiere);

        let mut resultat = BigInteger::from(graine);
        let mut reste = BigInteger::from(premiere - graine * graine);
        let cent = BigInteger::from(100u32);
        let vingt = BigInteger::from(20u32);
        let dix = BigInteger::from(10u32);

        for face in octets[tete..].chunks(2) {
            reste = &reste * &cent + BigInteger::from(valeur_face(face));
            let double = &resultat * &vingt;

            let (mut bas, mut haut) = (0u64, 10u64);
            while bas < haut {
                let milieu = (bas + haut) / 2;
                let essai = (&double + BigInteger::from(milieu)) * BigInteger::from(milieu);
                if essai > reste {
                    haut = milieu;
                } else {
                    bas = milieu + 1;
                }
            }
            let chiffre = haut - 1;

            reste -= (&double + BigInteger::from(chiffre)) * BigInteger::from(chiffre);
            resultat = &resultat * &dix + BigInteger::from(chiffre);
        }

        Ok(resultat)
    }

    fn magnitude_u64(&self) -> Option<u64> {
        self.tranches.iter().rev().try_fold(0u64, |acc, &t| {
            acc.checked_mul(BASE)?.checked_add(u64::from(t))
        })
    }
}

fn somme(a: &BigInteger, b: &BigInteger) -> BigInteger {
    if a.negatif == b.negatif {
        return BigInteger::depuis_tranches(additionner(&a.tranches, &b.tranches), a.negatif);
    }
    match comparer(&a.tranches, &b.tranches) {
        Ordering::Less => {
            BigInteger::depuis_tranches(soustraire(&b.tranches, &a.tranches), b.negatif)
        }
        _ => BigInteger::depuis_tranches(soustraire(&a.tranches, &b.tranches), a.negatif),
    }
}

fn difference(a: &BigInteger, b: &BigInteger) -> BigInteger {
    somme(a, &-b)
}

fn produit(a: &BigInteger, b: &BigInteger) -> BigInteger {
    BigInteger::depuis_tranches(multiplier(&a.tranches, &b.tranches), a.negatif != b.negatif)
}

operations_binaires!(BigInteger, Add, add, AddAssign, add_assign, somme);
operations_binaires!(BigInteger, Sub, sub, SubAssign, sub_assign, difference);
operations_binaires!(BigInteger, Mul, mul, MulAssign, mul_assign, produit);

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        let negatif = !self.negatif && !self.is_zero();
        BigInteger {
            tranches: self.tranches,
            negatif,
        }
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        -self.clone()
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negatif, other.negatif) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => comparer(&self.tranches, &other.tranches),
            (true, true) => comparer(&other.tranches, &self.tranches),
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Zero for BigInteger {
    fn zero() -> Self {
        BigInteger {
            tranches: vec![0],
            negatif: false,
        }
    }

    fn is_zero(&self) -> bool {
        est_nul(&self.tranches)
    }
}

impl One for BigInteger {
    fn one() -> Self {
        BigInteger {
            tranches: vec![1],
            negatif: false,
        }
    }
}

impl ToPrimitive for BigInteger {
    fn to_i64(&self) -> Option<i64> {
        let m = self.magnitude_u64()?;
        if !self.negatif {
            return i64::try_from(m).ok();
        }
        if m == 1u64 << 63 {
            return Some(i64::MIN);
        }
        i64::try_from(m).ok().map(|v| -v)
    }

    fn to_u64(&self) -> Option<u64> {
        if self.negatif {
            return None;
        }
        self.magnitude_u64()
    }
}

impl From<u64> for BigInteger {
    fn from(mut v: u64) -> Self {
        let mut tranches = Vec::with_capacity(3);
        loop {
            tranches.push((v % BASE) as u32);
            v /= BASE;
            if v == 0 {
                break;
            }
        }
        BigInteger::depuis_tranches(tranches, false)
    }
}

impl From<i64> for BigInteger {
    fn from(v: i64) -> Self {
        let m = BigInteger::from(v.unsigned_abs());
        if v < 0 {
            -m
        } else {
            m
        }
    }
}

impl From<u32> for BigInteger {
    fn from(v: u32) -> Self {
        BigInteger::from(u64::from(v))
    }
}

impl From<i32> for BigInteger {
    fn from(v: i32) -> Self {
        BigInteger::from(i64::from(v))
    }
}

impl From<usize> for BigInteger {
    fn from(v: usize) -> Self {
        BigInteger::from(v as u64)
    }
}

impl FromStr for BigInteger {
    type Err = ErreurCalcul;

    /// Accepte `[-]chiffres` uniquement.
    fn from_str(s: &str) -> Resultat<Self> {
        let (negatif, chiffres) = match s.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, s),
        };
        if chiffres.is_empty() || !chiffres.bytes().all(|c| c.is_ascii_digit()) {
            return Err(ErreurCalcul::invalide(format!("entier invalide : {s:?}")));
        }

        let octets = chiffres.as_bytes();
        let mut tranches = Vec::with_capacity(octets.len() / BASE_CHIFFRES + 1);
        let mut fin = octets.len();
        while fin > 0 {
            let debut = fin.saturating_sub(BASE_CHIFFRES);
            let t = octets[debut..fin]
                .iter()
                .fold(0u32, |acc, &c| acc * 10 + u32::from(c - b'0'));
            tranches.push(t);
            fin = debut;
        }

        Ok(BigInteger::depuis_tranches(tranches, negatif))
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::with_capacity(self.tranches.len() * BASE_CHIFFRES + 1);
        if self.negatif {
            s.push('-');
        }
        let mut iter = self.tranches.iter().rev();
        if let Some(haut) = iter.next() {
            s.push_str(&haut.to_string());
        }
        for t in iter {
            s.push_str(&format!("{t:09}"));
        }
        f.write_str(&s)
    }
}
