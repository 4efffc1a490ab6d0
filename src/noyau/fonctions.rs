// src/noyau/fonctions.rs
//
// Bibliothèque numérique (fonctions nommées)
// ------------------------------------------
// Entrées : BigRational exacts + précision de travail p (nombre de décimales).
// Sortie  : BigRational arrondi à p décimales, exact à ~10^-p près.
//
// Calculs en virgule fixe : entier “scalé” ×10^w, w = p + GARDE_INTERNE
// (+ marge selon l’opération). Séries de Taylor / atanh, π par Machin (cache).
//
// Domaine : toute valeur indéfinie => ErreurCalcul::Domaine (message lisible).

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use num_traits::{One, ToPrimitive, Zero};

use super::entier::BigInteger;
use super::erreur::{ErreurCalcul, Resultat};
use super::rationnel::BigRational;

/// Décimales supplémentaires en interne (troncatures des séries).
const GARDE_INTERNE: usize = 10;

/// exp refuse au-delà (≈ 4343 chiffres entiers).
const EXP_MAX: u64 = 10_000;

/// Taille maximale (en chiffres) d’une puissance entière exacte.
const PUISSANCE_MAX_CHIFFRES: u128 = 200_000;

/// n! et n!! refusés au-delà.
const FACTORIELLE_MAX: u64 = 10_000;

/// sin/cos/tan/cot : nombre de chiffres entiers maximal de l’argument.
const ARG_TRIG_MAX_CHIFFRES: usize = 1_000;

const LOG2_10: f64 = std::f64::consts::LOG2_10;
const LOG10_E: f64 = std::f64::consts::LOG10_E;

/* ------------------------ Virgule fixe ------------------------ */

/// Contexte “entier scalé” : x ↦ trunc(x · 10^w).
struct Fixe {
    w: usize,
    s: BigInteger,
}

impl Fixe {
    fn new(w: usize) -> Self {
        Fixe {
            w,
            s: BigInteger::pow10(w),
        }
    }

    fn de(&self, x: &BigRational) -> BigInteger {
        x.echelle(self.w)
    }

    fn vers(&self, x: BigInteger, p: usize) -> BigRational {
        BigRational::depuis_echelle(x, self.w).round(p)
    }

    fn mul(&self, a: &BigInteger, b: &BigInteger) -> BigInteger {
        (a * b).div_rem_non_nul(&self.s).0
    }

    fn div(&self, a: &BigInteger, b: &BigInteger) -> Resultat<BigInteger> {
        (a * &self.s).checked_div(b)
    }

    /// a / n, n > 0
    fn div_petit(&self, a: &BigInteger, n: u64) -> BigInteger {
        a.div_rem_non_nul(&BigInteger::from(n)).0
    }

    fn un(&self) -> BigInteger {
        self.s.clone()
    }
}

fn hors_domaine(nom: &str) -> ErreurCalcul {
    ErreurCalcul::domaine(format!("{nom} : hors domaine"))
}

/* ------------------------ π (Machin) + cache ------------------------ */

/// atan(1/q) scalé (troncature) : 1/q - 1/(3q^3) + 1/(5q^5) - ...
fn atan_inverse_fixe(q: u32, s: &BigInteger) -> BigInteger {
    let q = BigInteger::from(q);
    let q2 = &q * &q;

    let mut puissance = q; // q^(2k+1)
    let mut somme = BigInteger::zero();
    let mut k: u64 = 0;
    let mut positif = true;

    loop {
        let d = &puissance * BigInteger::from(2 * k + 1);
        let terme = s.div_rem_non_nul(&d).0;
        if terme.is_zero() {
            break;
        }

        if positif {
            somme += &terme;
        } else {
            somme -= &terme;
        }

        puissance *= &q2;
        positif = !positif;
        k += 1;
    }

    somme
}

fn pi_fixe_calcul(w: usize) -> BigInteger {
    let extra = 10usize;
    let s = BigInteger::pow10(w + extra);

    // Machin : π = 16·atan(1/5) - 4·atan(1/239)
    let a = atan_inverse_fixe(5, &s);
    let b = atan_inverse_fixe(239, &s);
    let pi = BigInteger::from(16u32) * a - BigInteger::from(4u32) * b;

    pi.div_rem_non_nul(&BigInteger::pow10(extra)).0
}

static PI_CACHE: OnceLock<Mutex<HashMap<usize, BigInteger>>> = OnceLock::new();

fn pi_fixe(w: usize) -> BigInteger {
    let m = PI_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut garde = m.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(v) = garde.get(&w) {
        return v.clone();
    }

    log::trace!("π : calcul à {w} décimales");
    let v = pi_fixe_calcul(w);
    garde.insert(w, v.clone());
    v
}

pub fn pi(p: usize) -> BigRational {
    let f = Fixe::new(p + GARDE_INTERNE);
    f.vers(pi_fixe(f.w), p)
}

pub fn e(p: usize) -> Resultat<BigRational> {
    exp(&BigRational::one(), p)
}

/* ------------------------ Puissances ------------------------ */

/// a^b : exposant entier => exact (si la taille le permet) ; sinon exp(b · ln a) pour a > 0.
pub fn puissance(a: &BigRational, b: &BigRational, p: usize) -> Resultat<BigRational> {
    if b.is_integer() {
        return puissance_entiere(a, b, p);
    }

    if a.is_zero() {
        return if b.is_negative() {
            Err(ErreurCalcul::domaine("puissance : 0 à un exposant négatif"))
        } else {
            Ok(BigRational::zero())
        };
    }
    if a.is_negative() {
        return Err(ErreurCalcul::domaine(
            "puissance : base négative et exposant non entier",
        ));
    }

    puissance_reelle(a, b, p)
}

/// a^b = exp(b · ln a), a > 0.
fn puissance_reelle(a: &BigRational, b: &BigRational, p: usize) -> Resultat<BigRational> {
    // ordre de grandeur du résultat : chiffres entiers à garder en plus
    let estimation = (ln_positif(a, 8)? * b).to_f64().unwrap_or(f64::MAX);
    if estimation > EXP_MAX as f64 {
        return Err(ErreurCalcul::domaine("puissance : résultat trop grand"));
    }
    let chiffres = if estimation > 0.0 {
        (estimation * LOG10_E).ceil() as usize
    } else {
        0
    };

    let q = p + chiffres + b.trunc().digit_count() + GARDE_INTERNE;
    let y = ln_positif(a, q)? * b;
    exp(&y, p)
}

fn puissance_entiere(a: &BigRational, b: &BigRational, p: usize) -> Resultat<BigRational> {
    let n = b.trunc();
    let impair = !n.checked_rem(&BigInteger::from(2u32))?.is_zero();

    if a.is_zero() {
        return if n.is_zero() {
            Err(ErreurCalcul::domaine("puissance : 0^0 indéfini"))
        } else if n.is_negative() {
            Err(ErreurCalcul::domaine("puissance : 0 à un exposant négatif"))
        } else {
            Ok(BigRational::zero())
        };
    }
    if a.abs().is_one() {
        let negatif = a.is_negative() && impair;
        return Ok(if negatif { -BigRational::one() } else { BigRational::one() });
    }

    let taille_chiffres = a.numer().digit_count().max(a.denom().digit_count()) as u128;
    let exact = n
        .to_i64()
        .filter(|e| taille_chiffres * u128::from(e.unsigned_abs()) <= PUISSANCE_MAX_CHIFFRES);

    match exact {
        Some(e) => a.powi(e),
        // forme exacte trop grosse : |a|^b par exp / ln, signe selon la parité
        None => {
            let m = puissance_reelle(&a.abs(), b, p)?;
            Ok(if a.is_negative() && impair { -m } else { m })
        }
    }
}

pub fn racine(x: &BigRational, p: usize) -> Resultat<BigRational> {
    if x.is_negative() {
        return Err(ErreurCalcul::domaine("racine carrée hors domaine"));
    }
    let f = Fixe::new(p + GARDE_INTERNE);
    Ok(f.vers(racine_fixe(x, &f)?, p))
}

/// trunc(√x · 10^w)
fn racine_fixe(x: &BigRational, f: &Fixe) -> Resultat<BigInteger> {
    x.echelle(2 * f.w).sqrt()
}

/* ------------------------ exp / ln / log ------------------------ */

pub fn exp(x: &BigRational, p: usize) -> Resultat<BigRational> {
    if x.is_negative() {
        let oppose = -x;
        if oppose.trunc().to_u64().map_or(true, |n| n > EXP_MAX) {
            // e^-x < 10^-4343 : nul à toute précision raisonnable
            return Ok(BigRational::zero());
        }
        return Ok(exp_positif(&oppose, p + GARDE_INTERNE)?.recip()?.round(p));
    }
    exp_positif(x, p)
}

/// exp(x), x >= 0 : x/2^k, Taylor, puis k élévations au carré.
fn exp_positif(x: &BigRational, p: usize) -> Resultat<BigRational> {
    let n = x
        .trunc()
        .to_u64()
        .filter(|&n| n <= EXP_MAX)
        .ok_or_else(|| ErreurCalcul::domaine("exp : argument trop grand"))?;

    let k = (64 - n.leading_zeros()) as usize + 8;
    let chiffres_entiers = (n as f64 * LOG10_E) as usize + 1;
    let f = Fixe::new(p + GARDE_INTERNE + chiffres_entiers + k / 3 + 1);

    let deux_k = BigInteger::from(2u32).pow(k as u32);
    let r = f.de(x).div_rem_non_nul(&deux_k).0;

    let mut somme = f.un() + &r;
    let mut terme = r.clone();
    let mut i: u64 = 2;
    loop {
        terme = f.div_petit(&f.mul(&terme, &r), i);
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        i += 1;
    }

    for _ in 0..k {
        somme = f.mul(&somme, &somme);
    }

    Ok(f.vers(somme, p))
}

/// atanh(z) scalé : z + z^3/3 + z^5/5 + ...
fn atanh_fixe(z: &BigInteger, f: &Fixe) -> BigInteger {
    let z2 = f.mul(z, z);
    let mut puissance = z.clone();
    let mut somme = z.clone();
    let mut i: u64 = 1;

    loop {
        puissance = f.mul(&puissance, &z2);
        let terme = f.div_petit(&puissance, 2 * i + 1);
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        i += 1;
    }

    somme
}

/// ln 2 = 2·atanh(1/3)
fn ln2_fixe(f: &Fixe) -> BigInteger {
    let tiers = f.div_petit(&f.un(), 3);
    atanh_fixe(&tiers, f) * BigInteger::from(2u32)
}

fn puissance_de_deux(k: i64) -> Resultat<BigRational> {
    let e = u32::try_from(k.unsigned_abs())
        .map_err(|_| ErreurCalcul::domaine("ln : argument trop grand"))?;
    let p = BigRational::from_integer(BigInteger::from(2u32).pow(e));
    if k < 0 {
        p.recip()
    } else {
        Ok(p)
    }
}

pub fn ln(x: &BigRational, p: usize) -> Resultat<BigRational> {
    if x.is_negative() || x.is_zero() {
        return Err(hors_domaine("ln"));
    }
    ln_positif(x, p)
}

/// ln x = k·ln 2 + 2·atanh((m - 1)/(m + 1)), x = m·2^k, m ∈ [2/3, 4/3]
fn ln_positif(x: &BigRational, p: usize) -> Resultat<BigRational> {
    if x.is_one() {
        return Ok(BigRational::zero());
    }

    let ecart = x.numer().digit_count() as f64 - x.denom().digit_count() as f64;
    let mut k = (ecart * LOG2_10).round() as i64;
    let mut m = x * puissance_de_deux(-k)?;

    let haut = BigRational::new(BigInteger::from(4u32), BigInteger::from(3u32))?;
    let bas = BigRational::new(BigInteger::from(2u32), BigInteger::from(3u32))?;
    let deux = BigRational::from(2i64);
    let demi = deux.recip()?;
    while m > haut {
        m *= &demi;
        k += 1;
    }
    while m < bas {
        m *= &deux;
        k -= 1;
    }

    let f = Fixe::new(p + GARDE_INTERNE + BigInteger::from(k).digit_count());
    let un = BigRational::one();
    let z = (&m - &un).checked_div(&(&m + &un))?;

    let res = BigInteger::from(k) * ln2_fixe(&f) + atanh_fixe(&f.de(&z), &f) * BigInteger::from(2u32);
    Ok(f.vers(res, p))
}

/// Décimales nulles en tête de |x| (x ≠ 0, |x| < 1) ; 0 sinon.
fn zeros_de_tete(x: &BigRational, p: usize) -> usize {
    let e = x.abs().echelle(p);
    if e.is_zero() {
        return p;
    }
    p.saturating_sub(e.digit_count())
}

/// log(a, b) = logarithme de b en base a.
pub fn log(a: &BigRational, b: &BigRational, p: usize) -> Resultat<BigRational> {
    if a.is_negative() || a.is_zero() || a.is_one() || b.is_negative() || b.is_zero() {
        return Err(hors_domaine("log"));
    }

    // ln a petit (base proche de 1) : la division amplifie l’erreur
    let q = p + GARDE_INTERNE;
    let mut la = ln_positif(a, q)?;
    let perte = zeros_de_tete(&la, q);
    if perte > 0 {
        la = ln_positif(a, q + 2 * perte)?;
    }
    let lb = ln_positif(b, q + 2 * perte)?;

    Ok(lb.checked_div(&la)?.round(p))
}

pub fn lb(x: &BigRational, p: usize) -> Resultat<BigRational> {
    if x.is_negative() || x.is_zero() {
        return Err(hors_domaine("lb"));
    }
    log(&BigRational::from(2i64), x, p)
}

pub fn lg(x: &BigRational, p: usize) -> Resultat<BigRational> {
    if x.is_negative() || x.is_zero() {
        return Err(hors_domaine("lg"));
    }
    log(&BigRational::from(10i64), x, p)
}

/* ------------------------ Trigonométrie ------------------------ */

/// Contexte adapté à un angle x (chiffres entiers de x en plus).
fn contexte_angle(x: &BigRational, p: usize, nom: &str) -> Resultat<Fixe> {
    let chiffres = x.trunc().digit_count();
    if chiffres > ARG_TRIG_MAX_CHIFFRES {
        return Err(ErreurCalcul::domaine(format!("{nom} : argument trop grand")));
    }
    Ok(Fixe::new(p + GARDE_INTERNE + chiffres))
}

/// x ramené dans [-π, π] (scalé).
fn reduire_angle(x: &BigRational, f: &Fixe) -> BigInteger {
    let pi = pi_fixe(f.w);
    let tour = &pi * BigInteger::from(2u32);

    let mut r = f.de(x).div_rem_non_nul(&tour).1;
    if r > pi {
        r -= &tour;
    } else if r < -&pi {
        r += &tour;
    }
    r
}

fn sin_fixe(r: &BigInteger, f: &Fixe) -> BigInteger {
    let r2 = f.mul(r, r);
    let mut terme = r.clone();
    let mut somme = r.clone();
    let mut i: u64 = 1;

    loop {
        terme = -f.div_petit(&f.mul(&terme, &r2), (2 * i) * (2 * i + 1));
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        i += 1;
    }
    somme
}

fn cos_fixe(r: &BigInteger, f: &Fixe) -> BigInteger {
    let r2 = f.mul(r, r);
    let mut terme = f.un();
    let mut somme = f.un();
    let mut i: u64 = 1;

    loop {
        terme = -f.div_petit(&f.mul(&terme, &r2), (2 * i - 1) * (2 * i));
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        i += 1;
    }
    somme
}

/// Diviseur indiscernable de zéro à la précision des opérandes (p - 2 décimales).
fn quasi_nul(v: &BigInteger, f: &Fixe, p: usize) -> bool {
    let seuil = BigInteger::pow10(f.w - p.saturating_sub(2).min(f.w));
    v.abs() * BigInteger::from(2u32) < seuil
}

pub fn sin(x: &BigRational, p: usize) -> Resultat<BigRational> {
    let f = contexte_angle(x, p, "sin")?;
    let r = reduire_angle(x, &f);
    Ok(f.vers(sin_fixe(&r, &f), p))
}

pub fn cos(x: &BigRational, p: usize) -> Resultat<BigRational> {
    let f = contexte_angle(x, p, "cos")?;
    let r = reduire_angle(x, &f);
    Ok(f.vers(cos_fixe(&r, &f), p))
}

pub fn tan(x: &BigRational, p: usize) -> Resultat<BigRational> {
    let f = contexte_angle(x, p, "tan")?;
    let r = reduire_angle(x, &f);
    let (s, c) = (sin_fixe(&r, &f), cos_fixe(&r, &f));
    if quasi_nul(&c, &f, p) {
        return Err(hors_domaine("tan"));
    }
    Ok(f.vers(f.div(&s, &c)?, p))
}

pub fn cot(x: &BigRational, p: usize) -> Resultat<BigRational> {
    let f = contexte_angle(x, p, "cot")?;
    let r = reduire_angle(x, &f);
    let (s, c) = (sin_fixe(&r, &f), cos_fixe(&r, &f));
    if quasi_nul(&s, &f, p) {
        return Err(hors_domaine("cot"));
    }
    Ok(f.vers(f.div(&c, &s)?, p))
}

/// atan(y) scalé pour |y| <= 1 : deux demi-angles puis Taylor.
///
/// atan(y) = 2·atan(y / (1 + √(1 + y²)))
fn atan_fixe(y: &BigInteger, f: &Fixe) -> Resultat<BigInteger> {
    if y.is_negative() {
        return Ok(-atan_fixe(&-y, f)?);
    }

    let mut t = y.clone();
    for _ in 0..2 {
        let rac = (&f.s * &f.s + &t * &t).sqrt()?;
        t = f.div(&t, &(&f.s + rac))?;
    }

    let t2 = f.mul(&t, &t);
    let mut puissance = t.clone();
    let mut somme = t;
    let mut i: u64 = 1;
    loop {
        puissance = -f.mul(&puissance, &t2);
        let terme = f.div_petit(&puissance, 2 * i + 1);
        if terme.is_zero() {
            break;
        }
        somme += &terme;
        i += 1;
    }

    Ok(somme * BigInteger::from(4u32))
}

/// atan(x) scalé, x rationnel quelconque.
fn atan_rationnel(x: &BigRational, f: &Fixe) -> Resultat<BigInteger> {
    if x.is_negative() {
        return Ok(-atan_rationnel(&-x, f)?);
    }
    if *x > BigRational::one() {
        // atan(x) = π/2 - atan(1/x)
        let demi_pi = f.div_petit(&pi_fixe(f.w), 2);
        return Ok(demi_pi - atan_fixe(&f.de(&x.recip()?), f)?);
    }
    atan_fixe(&f.de(x), f)
}

/// asin(x) scalé : 2·atan(x / (1 + √(1 - x²))), |x| <= 1.
fn asin_fixe(x: &BigRational, f: &Fixe) -> Resultat<BigInteger> {
    let reste = BigRational::one() - x * x;
    let rac = racine_fixe(&reste, f)?;
    let t = f.div(&f.de(x), &(f.un() + rac))?;
    Ok(atan_fixe(&t, f)? * BigInteger::from(2u32))
}

pub fn atan(x: &BigRational, p: usize) -> Resultat<BigRational> {
    let f = Fixe::new(p + GARDE_INTERNE);
    Ok(f.vers(atan_rationnel(x, &f)?, p))
}

pub fn acot(x: &BigRational, p: usize) -> Resultat<BigRational> {
    let f = Fixe::new(p + GARDE_INTERNE);
    let demi_pi = f.div_petit(&pi_fixe(f.w), 2);
    Ok(f.vers(demi_pi - atan_rationnel(x, &f)?, p))
}

pub fn asin(x: &BigRational, p: usize) -> Resultat<BigRational> {
    if x.abs() > BigRational::one() {
        return Err(hors_domaine("asin"));
    }
    let f = Fixe::new(p + GARDE_INTERNE);
    Ok(f.vers(asin_fixe(x, &f)?, p))
}

pub fn acos(x: &BigRational, p: usize) -> Resultat<BigRational> {
    if x.abs() > BigRational::one() {
        return Err(hors_domaine("acos"));
    }
    let f = Fixe::new(p + GARDE_INTERNE);
    let demi_pi = f.div_petit(&pi_fixe(f.w), 2);
    Ok(f.vers(demi_pi - asin_fixe(x, &f)?, p))
}

/* ------------------------ Factorielles ------------------------ */

fn argument_factoriel(x: &BigRational, nom: &str) -> Resultat<u64> {
    if !x.is_integer() || x.is_negative() {
        return Err(hors_domaine(nom));
    }
    x.trunc()
        .to_u64()
        .filter(|&n| n <= FACTORIELLE_MAX)
        .ok_or_else(|| ErreurCalcul::domaine(format!("{nom} : argument trop grand")))
}

/// n · (n - pas) · (n - 2·pas) · ... (facteurs > 1)
fn produit_pas(n: u64, pas: u64) -> BigInteger {
    let mut acc = BigInteger::one();
    let mut k = n;
    while k > 1 {
        acc *= BigInteger::from(k);
        k -= pas;
    }
    acc
}

pub fn factorielle(x: &BigRational) -> Resultat<BigRational> {
    let n = argument_factoriel(x, "factorielle")?;
    Ok(BigRational::from_integer(produit_pas(n, 1)))
}

pub fn double_factorielle(x: &BigRational) -> Resultat<BigRational> {
    let n = argument_factoriel(x, "double factorielle")?;
    Ok(BigRational::from_integer(produit_pas(n, 2)))
}
