//! Tests scientifiques (campagne) : pipeline complet texte -> forme courte.
//!
//! But : vérifier les valeurs, pas seulement l’absence d’erreur.
//! - priorités / associativité / implicites
//! - fonctions transcendantes contre des valeurs de référence (mpmath, 60 chiffres)
//! - décimales de garde : résultat à P == résultat à P+30 ramené à P
//! - erreurs : domaine vs entrée invalide
//! - stress borné (grands entiers) avec budget temps

use std::time::{Duration, Instant};

use super::arbre::Expression;
use super::calculatrice::forme_courte;
use super::eval_expression;
use super::rationnel::BigRational;
use super::solveur::Solveur;

fn eval_ok(expr: &str, precision: i64) -> String {
    eval_expression(expr, precision).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn valeur(expr: &str, precision: i64) -> BigRational {
    let arbre = Expression::depuis_texte(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    Solveur::new(precision)
        .resoudre(arbre)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn q(s: &str) -> BigRational {
    s.parse().unwrap()
}

fn assert_domaine(expr: &str) {
    let e = eval_expression(expr, 20).unwrap_err();
    assert!(e.est_domaine(), "expr={expr:?} err={e}");
}

fn assert_invalide(expr: &str) {
    let e = eval_expression(expr, 20).unwrap_err();
    assert!(!e.est_domaine(), "expr={expr:?} err={e}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Grammaire ------------------------ */

#[test]
fn sci_priorites_et_associativite() {
    assert_eq!(valeur("2+3*4", 20), q("14"));
    assert_eq!(valeur("(2+3)*4", 20), q("20"));
    assert_eq!(valeur("2^3^2", 20), q("64"));
    assert_eq!(valeur("8/4/2", 20), q("1"));
    assert_eq!(valeur("10-3-2", 20), q("5"));
    assert_eq!(valeur("2*3^2", 20), q("18"));
    assert_eq!(valeur("-2^2", 20), q("-4"));
}

#[test]
fn sci_implicites_et_unaires() {
    assert_eq!(valeur("-2(3)", 20), q("-6"));
    assert_eq!(valeur("2(3)(4)", 20), q("24"));
    assert_eq!(valeur("(1+1)(2+2)", 20), q("8"));
    assert_eq!(valeur("+5", 20), q("5"));
    assert_eq!(valeur("3*(-2)", 20), q("-6"));
    assert_eq!(eval_ok("2pi", 20), eval_ok("2*pi", 20));
    assert_eq!(eval_ok("2 sqrt(2)", 20), eval_ok("2*sqrt(2)", 20));
}

#[test]
fn sci_factorielles() {
    assert_eq!(valeur("3!", 20), q("6"));
    assert_eq!(valeur("5!!", 20), q("15"));
    assert_eq!(valeur("0!", 20), q("1"));
    assert_eq!(valeur("2^3!", 20), q("64"));
    assert_eq!(valeur("(1+2)!", 20), q("6"));
    assert_eq!(eval_ok("100!", 5), "9.3326*10^157");
}

/* ------------------------ Fonctions (valeurs de référence) ------------------------ */

#[test]
fn sci_constantes() {
    assert_eq!(eval_ok("pi", 30), "3.14159265358979323846264338328");
    assert_eq!(eval_ok("π", 30), "3.14159265358979323846264338328");
    assert_eq!(eval_ok("e", 20), "2.7182818284590452354");
    assert_eq!(eval_ok("e^pi", 20), "2.3140692632779269006*10^1");
}

#[test]
fn sci_racines_et_puissances() {
    assert_eq!(eval_ok("sqrt(2)", 20), "1.4142135623730950488");
    assert_eq!(eval_ok("√2", 20), "1.4142135623730950488");
    assert_eq!(eval_ok("2^0.5", 20), "1.4142135623730950488");
    assert_eq!(eval_ok("1/7", 6), "1.42857*10^(-1)");
    assert_eq!(valeur("2^(-2)", 20), q("0.25"));
    assert_eq!(valeur("sqrt(144)", 20), q("12"));
}

#[test]
fn sci_puissances_entieres_de_grande_taille() {
    assert_eq!(eval_ok("1.0000001^1000000", 10), "1.105170913");
    assert_eq!(eval_ok("(-1.0000001)^1000001", 10), "-1.105171023");
    assert_eq!(eval_ok("0.5^1000000", 10), "0");
    assert_eq!(eval_ok("2^(-1000000)", 10), "0");
    assert_domaine("10^1000000");
}

#[test]
fn sci_exp_et_logarithmes() {
    assert_eq!(eval_ok("exp(10)", 10), "2.202646579*10^4");
    assert_eq!(eval_ok("ln(10)", 25), "2.302585092994045684017991");
    assert_eq!(eval_ok("lg(2)", 12), "3.01029995664*10^(-1)");
    assert_eq!(eval_ok("lb(10)", 12), "3.32192809489");
    assert_eq!(eval_ok("log(2,1024)", 10), "1.000000000*10^1");
    assert_eq!(eval_ok("exp(ln(7))", 15), "7.00000000000000");
}

#[test]
fn sci_trigonometrie() {
    assert_eq!(eval_ok("sin(1)", 15), "8.41470984807897*10^(-1)");
    assert_eq!(eval_ok("cos(pi/3)", 12), "5.00000000000*10^(-1)");
    assert_eq!(eval_ok("acos(-1)", 15), "3.14159265358979");
    assert_eq!(eval_ok("4atan(1)", 20), eval_ok("pi", 20));
    // périodicité : sin(x + 2π) = sin(x)
    assert_eq!(eval_ok("sin(pi/6+2pi)", 20), eval_ok("sin(pi/6)", 20));
    assert_eq!(eval_ok("sin(0)", 20), "0");
}

/* ------------------------ Décimales de garde ------------------------ */

#[test]
fn sci_garde_suffisante_sur_imbrications() {
    let expressions = [
        "sin(cos(tan(1)))",
        "(1+1/3)^12",
        "sqrt(2)*sqrt(3)-sqrt(6)+1",
        "exp(sin(1))/ln(3)",
        "atan(1/5)*16-atan(1/239)*4",
        "log(3,7)^2+cos(2)",
        "(2^0.5)^(2^0.5)",
    ];

    for precision in [5i64, 12, 25] {
        for expr in expressions {
            let obtenu = eval_ok(expr, precision);

            let reference = valeur(expr, precision + 30);
            let attendu = forme_courte(&reference.to_decimal(precision as usize + 38), precision as usize);

            assert_eq!(obtenu, attendu, "expr={expr:?} P={precision}");
        }
    }
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_erreurs_de_domaine() {
    assert_domaine("1/0");
    assert_domaine("1/(2-2)");
    assert_domaine("sqrt(-1)");
    assert_domaine("ln(0)");
    assert_domaine("ln(-1)");
    assert_domaine("log(1,5)");
    assert_domaine("asin(2)");
    assert_domaine("tan(pi/2)");
    assert_domaine("cot(0)");
    assert_domaine("(-1)!");
    assert_domaine("0.5!");
    assert_domaine("0^0");
}

#[test]
fn sci_entrees_invalides() {
    assert_invalide("");
    assert_invalide("2+*3");
    assert_invalide("(2+3");
    assert_invalide("2+3)");
    assert_invalide("foo(2)");
    assert_invalide("2 # 3");
    assert_invalide("log(2)");
    assert_invalide("sin(1,2)");
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_grands_entiers() {
    let t0 = Instant::now();
    let max = Duration::from_secs(20);

    assert_eq!(eval_ok("1000!", 8), "4.0238726*10^2567");
    budget(t0, max);

    assert_eq!(eval_ok("2^10000", 5), "1.9951*10^3010");
    budget(t0, max);

    assert_eq!(valeur("(10^50+1)*(10^50-1)-10^100", 10), q("-1"));
    budget(t0, max);
}
