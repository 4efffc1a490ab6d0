//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - seules les erreurs de DOMAINE sont acceptées (les expressions générées sont bien formées)
//! - invariant clé : même entrée + même précision => même sortie

use std::time::{Duration, Instant};

use super::calculatrice::Calculatrice;
use super::erreur::ErreurCalcul;
use super::eval_expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let a = rng.pick(10);
    match rng.pick(3) {
        0 => format!("{a}"),
        1 => format!("{a}.{}", rng.pick(1000)),
        _ => format!("{a}/{}", 1 + rng.pick(9)),
    }
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 => gen_nombre(rng),
        2 => "pi".to_string(),
        3 => "e".to_string(),
        4 => format!("sqrt({})", rng.pick(20)),
        // parenthésé : le coefficient peut être négatif
        _ => format!("({}*pi/{})", rng.pick(13) as i32 - 6, [1, 2, 3, 4, 6][rng.pick(5) as usize]),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    let d = depth - 1;
    match rng.pick(12) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, d), gen_expr(rng, d)),
        2 => format!("({}-{})", gen_expr(rng, d), gen_expr(rng, d)),
        3 => format!("({}*{})", gen_expr(rng, d), gen_expr(rng, d)),
        4 => format!("({}/{})", gen_expr(rng, d), gen_expr(rng, d)),
        5 => format!("({})^2", gen_expr(rng, d)),
        6 => format!("sin({})", gen_expr(rng, d)),
        7 => format!("cos({})", gen_expr(rng, d)),
        8 => format!("tan({})", gen_expr(rng, d)),
        9 => format!("ln({})", gen_expr(rng, d)),
        10 => format!("atan({})", gen_expr(rng, d)),
        // exp borné : argument simple
        _ => {
            if rng.coin() {
                format!("exp({})", gen_nombre(rng))
            } else {
                format!("({})!", rng.pick(30))
            }
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_erreurs_de_domaine() {
    let t0 = Instant::now();
    let max = Duration::from_secs(30);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let calc = Calculatrice::new(30);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..120 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match calc.calculer(&expr) {
            Ok(sortie) => {
                assert_eq!(calc.calculer(&expr).ok(), Some(sortie), "expr={expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert!(e.est_domaine(), "erreur non attendue: expr={expr:?} err={e}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_texte_arbitraire_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let alphabet: Vec<char> = "0123456789.+-*/^()!,pies√π qrtlogcna".chars().collect();
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let n = 1 + rng.pick(16) as usize;
        let texte: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        // Ok ou Err : seule une panique ferait échouer le test.
        let _ = eval_expression(&texte, 8);
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);

    let expr = somme_balancee("1/2", 800);
    let sortie = eval_expression(&expr, 10).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(sortie, "4.000000000*10^2");
}

#[test]
fn fuzz_safe_chaine_plate_bornee() {
    // chaîne plate : profondeur de découpage = nombre d’opérateurs
    let courte = vec!["1"; 200].join("+");
    assert_eq!(eval_expression(&courte, 5).unwrap(), "2.0000*10^2");

    for n in [300, 5000] {
        let longue = vec!["1"; n].join("+");
        let e = eval_expression(&longue, 5).unwrap_err();
        assert!(matches!(e, ErreurCalcul::EntreeInvalide(_)), "n={n} err={e}");
    }
}
