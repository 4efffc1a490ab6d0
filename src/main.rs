// src/main.rs
//
// Calculatrice rationnelle : point d’entrée (ligne de commande)
// -------------------------------------------------------------
// - `calculatrice_rationnelle [-p N] <EXPRESSION>...` : une évaluation, une ligne
// - sans expression : une expression par ligne sur l’entrée standard
// - RUST_LOG=debug  : jetons / arbre / valeur sur stderr
//
// Code de sortie non nul si une évaluation échoue.

use std::io;
use std::process::ExitCode;

use clap::Parser;

mod app;
mod noyau;

use app::AppCalc;

#[derive(Parser, Debug)]
#[command(name = "calculatrice_rationnelle")]
#[command(about = "Calculatrice en précision arbitraire")]
#[command(version)]
struct Cli {
    /// Chiffres significatifs du résultat
    #[arg(
        short,
        long,
        default_value_t = app::etat::DIGITS_DEFAUT,
        allow_negative_numbers = true
    )]
    precision: i64,

    /// Expression à évaluer (les mots sont joints par des espaces)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut app = AppCalc::default();
    app.set_digits(cli.precision);

    let echec = if cli.expression.is_empty() {
        app.session(io::stdin().lock(), io::stdout().lock())
            .unwrap_or_else(|e| {
                log::error!("entrée/sortie : {e}");
                true
            })
    } else {
        app.set_entree(cli.expression.join(" "));
        app.evaluer();
        println!("{}", app.ligne());
        app.en_erreur()
    };

    if echec {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
