// src/main.rs
//
// Calculatrice RPN — point d’entrée terminal
// ------------------------------------------
// - Sans expression : boucle interactive (voir app/vue.rs)
// - Avec expressions : chacune est validée dans l’ordre, résultat ou erreur affiché
// - Journal (tracing) sur stderr, filtre RUST_LOG (défaut : warn)

use std::ops::ControlFlow;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use calculatrice_rpn::{ModeAngle, ModePrecision, Session};

mod app;

use app::{AppCalc, Commande};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Angle {
    Deg,
    Rad,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Precision {
    /// 60 chiffres significatifs
    Decimal,
    /// double IEEE-754
    Number,
}

/// Calculatrice à expressions infixes (RPN interne, degrés ou radians, décimal 60 chiffres ou double).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Unité des angles pour sin/cos/tan.
    #[arg(long, value_enum, default_value_t = Angle::Deg)]
    angle: Angle,

    /// Représentation numérique.
    #[arg(long, value_enum, default_value_t = Precision::Decimal)]
    precision: Precision,

    /// Valeur initiale de la variable x.
    #[arg(short = 'x', long, default_value = "")]
    variable: String,

    /// Expressions à valider dans l’ordre (sinon : mode interactif).
    expressions: Vec<String>,
}

fn installer_journal() -> Result<()> {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("initialisation du journal")
}

fn main() -> Result<()> {
    let args = Args::parse();
    installer_journal()?;

    let angle = match args.angle {
        Angle::Deg => ModeAngle::Deg,
        Angle::Rad => ModeAngle::Rad,
    };
    let precision = match args.precision {
        Precision::Decimal => ModePrecision::Decimal,
        Precision::Number => ModePrecision::Number,
    };

    let mut app = AppCalc::new(Session::new(angle, precision), args.variable);

    if args.expressions.is_empty() {
        return app.boucle().context("lecture de l’entrée standard");
    }

    for expr in args.expressions {
        if let ControlFlow::Continue(Some(texte)) = app.executer(Commande::lire(&expr)) {
            println!("{texte}");
        }
    }
    Ok(())
}
