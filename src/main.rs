//! montecarlo - run a dice simulation and print the analysis

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use montecarlo::{Analyzer, Game, Layout, PlayResults, SimConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Map, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Which analysis to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Report {
    Results,
    Jackpot,
    Faces,
    Permutations,
    Combos,
    All,
}

/// Weighted dice Monte Carlo simulator
#[derive(Parser, Debug)]
#[command(name = "montecarlo", version, about = "Roll weighted dice and analyze the outcomes")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rolls (overrides config)
    #[arg(short, long)]
    rolls: Option<usize>,

    /// RNG seed for a reproducible run (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Report to print
    #[arg(long, value_enum, default_value_t = Report::All)]
    report: Report,

    /// Layout of the raw results table (wide or narrow)
    #[arg(long, default_value = "wide")]
    layout: Layout,

    /// Print JSON instead of text tables
    #[arg(long)]
    json: bool,

    /// Emit log lines on stderr as JSON objects
    #[arg(long)]
    log_json: bool,
}

/// Log to stderr, filtered by RUST_LOG (default `montecarlo=info`)
fn init_tracing(log_json: bool) {
    let json_layer = log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "montecarlo=info".into()),
        )
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let mut config = SimConfig::load(args.config.as_deref())?;
    if let Some(rolls) = args.rolls {
        config.rolls = rolls;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    let mut game = config.build_game()?;
    match config.seed {
        Some(seed) => game.play_with(config.rolls, &mut StdRng::seed_from_u64(seed))?,
        None => game.play(config.rolls)?,
    }
    info!(
        rolls = config.rolls,
        dice = game.dice().len(),
        seed = ?config.seed,
        "simulation complete"
    );

    if args.json {
        let report = json_report(&game, args.report, args.layout)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&game, args.report, args.layout)?;
    }

    Ok(())
}

fn wants(selected: Report, section: Report) -> bool {
    selected == Report::All || selected == section
}

fn print_report(game: &Game, report: Report, layout: Layout) -> Result<()> {
    let mut analyzer = Analyzer::new(game);

    if wants(report, Report::Results) {
        println!("== results ==");
        match game.results(layout) {
            PlayResults::Wide(table) => print!("{}", table),
            PlayResults::Narrow(entries) => {
                println!("{:>6} {:>4} {:>8}", "roll", "die", "face");
                for e in entries {
                    println!("{:>6} {:>4} {:>8}", e.roll, e.die, e.face.to_string());
                }
            }
        }
    }
    if wants(report, Report::Jackpot) {
        println!("== jackpots ==");
        println!("{}", analyzer.jackpot_count());
    }
    if wants(report, Report::Faces) {
        println!("== face counts per roll ==");
        print!("{}", analyzer.face_counts_per_roll());
    }
    if wants(report, Report::Permutations) {
        println!("== permutations ==");
        print!("{}", analyzer.permutation_count()?);
    }
    if wants(report, Report::Combos) {
        println!("== combinations ==");
        print!("{}", analyzer.combo_count()?);
    }
    Ok(())
}

fn json_report(game: &Game, report: Report, layout: Layout) -> Result<Value> {
    let mut analyzer = Analyzer::new(game);
    let mut out = Map::new();

    out.insert("faces".into(), json!(analyzer.faces()));
    if wants(report, Report::Results) {
        out.insert("results".into(), serde_json::to_value(game.results(layout))?);
    }
    if wants(report, Report::Jackpot) {
        out.insert("jackpots".into(), json!(analyzer.jackpot_count()));
    }
    if wants(report, Report::Faces) {
        out.insert(
            "face_counts".into(),
            serde_json::to_value(analyzer.face_counts_per_roll())?,
        );
    }
    if wants(report, Report::Permutations) {
        out.insert(
            "permutations".into(),
            serde_json::to_value(analyzer.permutation_count()?)?,
        );
    }
    if wants(report, Report::Combos) {
        out.insert(
            "combinations".into(),
            serde_json::to_value(analyzer.combo_count()?)?,
        );
    }
    Ok(Value::Object(out))
}
