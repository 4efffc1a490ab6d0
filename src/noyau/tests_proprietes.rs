//! Tests de propriétés : BigInteger / BigRational contre les oracles num-bigint / num-rational.
//!
//! - tailles jusqu’à ~1500 chiffres (au-delà du seuil Karatsuba)
//! - division tronquée : a = q·b + r, |r| < |b|, signe(r) = signe(a)
//! - rationnels toujours réduits, arrondi à une demi-unité près

use num_traits::{Signed, Zero};
use proptest::prelude::*;

use super::entier::BigInteger;
use super::rationnel::BigRational;

fn big(s: &str) -> BigInteger {
    s.parse().unwrap()
}

fn oracle(s: &str) -> num_bigint::BigInt {
    s.parse().unwrap()
}

fn entier() -> impl Strategy<Value = String> {
    prop_oneof![
        "-?[0-9]{1,30}",
        "-?[1-9][0-9]{200,1500}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn somme_et_produit_conformes(a in entier(), b in entier()) {
        let (x, y) = (big(&a), big(&b));
        let (ox, oy) = (oracle(&a), oracle(&b));
        prop_assert_eq!((&x + &y).to_string(), (&ox + &oy).to_string());
        prop_assert_eq!((&x - &y).to_string(), (&ox - &oy).to_string());
        prop_assert_eq!((&x * &y).to_string(), (&ox * &oy).to_string());
    }

    #[test]
    fn division_tronquee(a in entier(), b in entier()) {
        let (x, y) = (big(&a), big(&b));
        prop_assume!(!y.is_zero());

        let (q, r) = x.div_rem(&y).unwrap();
        prop_assert_eq!(&(&q * &y) + &r, x.clone());
        prop_assert!(r.abs() < y.abs());
        prop_assert!(r.is_zero() || r.is_negative() == x.is_negative());

        let (ox, oy) = (oracle(&a), oracle(&b));
        prop_assert_eq!(q.to_string(), (&ox / &oy).to_string());
        prop_assert_eq!(r.to_string(), (&ox % &oy).to_string());
    }

    #[test]
    fn racine_entiere_encadree(a in "[0-9]{1,400}") {
        let x = big(&a);
        let s = x.sqrt().unwrap();
        let s1 = &s + BigInteger::from(1u32);
        prop_assert!(&s * &s <= x);
        prop_assert!(&s1 * &s1 > x);
    }

    #[test]
    fn accord_avec_i64(a in any::<i32>(), b in any::<i32>()) {
        let (x, y) = (BigInteger::from(a), BigInteger::from(b));
        let (a, b) = (i64::from(a), i64::from(b));
        prop_assert_eq!(BigInteger::from(a + b), &x + &y);
        prop_assert_eq!(BigInteger::from(a * b), &x * &y);
        prop_assert_eq!(BigInteger::from(a - b), &x - &y);
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
    }

    #[test]
    fn rationnel_toujours_reduit(n in "-?[0-9]{1,40}", d in "-?[1-9][0-9]{0,40}") {
        let r = BigRational::new(big(&n), big(&d)).unwrap();
        let o = num_rational::BigRational::new(oracle(&n), oracle(&d));
        prop_assert_eq!(r.to_string(), o.to_string());
        prop_assert!(r.numer().gcd(r.denom()) <= BigInteger::from(1u32));
        prop_assert!(!r.denom().is_negative());
        prop_assert_eq!(r.is_negative(), o.is_negative());
    }

    #[test]
    fn arrondi_a_une_demi_unite(
        n in "-?[0-9]{1,40}",
        d in "[1-9][0-9]{0,20}",
        chiffres in 0usize..30,
    ) {
        let r = BigRational::new(big(&n), big(&d)).unwrap();
        let arrondi = r.round(chiffres);
        let ecart = (&arrondi - &r).abs();
        let demi = BigRational::new(BigInteger::from(5u32), BigInteger::pow10(chiffres + 1)).unwrap();
        prop_assert!(ecart <= demi);

        // lecture du texte décimal = valeur arrondie
        let texte = r.to_decimal(chiffres);
        prop_assert_eq!(texte.parse::<BigRational>().unwrap(), arrondi);
    }
}
