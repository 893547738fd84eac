use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use mindfa::dot::write_dot;
use mindfa::{load, Automaton, DotOptions, LoadOptions, MinimizeOptions, Seeding};

#[derive(Parser, Debug)]
#[command(name = "mindfa", about = "Determinize and minimize a finite automaton", version)]
struct Cli {
    /// Automaton description
    #[arg(value_name = "FILE", default_value = "automate.txt")]
    input: PathBuf,

    /// Where to write the loaded automaton
    #[arg(long, default_value = "automate.dot")]
    dot: PathBuf,

    /// Where to write the minimal automaton
    #[arg(long, default_value = "automate_min.dot")]
    min_dot: PathBuf,

    /// Where to write the automaton after subset construction
    #[arg(long)]
    det_dot: Option<PathBuf>,

    /// Symbol character that marks an epsilon transition
    #[arg(long, default_value_t = 'e')]
    epsilon: char,

    /// Initial partition of the accepting states
    #[arg(long, value_enum, default_value_t = SeedingArg::Standard)]
    seeding: SeedingArg,

    /// Report whether the minimal automaton accepts this word (repeatable)
    #[arg(short, long = "word", value_name = "WORD")]
    words: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SeedingArg {
    /// All accepting states start in one block
    Standard,
    /// Every accepting state starts in its own block
    SplitAccepting,
}

impl From<SeedingArg> for Seeding {
    fn from(arg: SeedingArg) -> Self {
        match arg {
            SeedingArg::Standard => Seeding::Standard,
            SeedingArg::SplitAccepting => Seeding::SplitAccepting,
        }
    }
}

fn save(aut: &Automaton, path: &Path, options: &DotOptions) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_dot(aut, &mut out, options)
        .and_then(|_| out.flush())
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let dot_options = DotOptions { epsilon_label: cli.epsilon };

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;
    let mut aut = load::parse(&text, &LoadOptions { epsilon: cli.epsilon })
        .with_context(|| format!("invalid automaton in {}", cli.input.display()))?;
    info!(
        "loaded {} states, {} transitions",
        aut.state_count(),
        aut.edges().count()
    );
    save(&aut, &cli.dot, &dot_options)?;

    aut.saturate_epsilon();
    let det = aut.powerset_construction().context("subset construction failed")?;
    info!("subset construction: {} states", det.dfa.state_count());
    if let Some(path) = &cli.det_dot {
        save(&det.dfa, path, &dot_options)?;
    }

    let options = MinimizeOptions { seeding: cli.seeding.into() };
    let min = det.dfa.minimize_with(&options).context("minimization failed")?;
    info!("minimization: {} states", min.state_count());
    save(&min, &cli.min_dot, &dot_options)?;

    for word in &cli.words {
        let verdict = if min.accepts(word) { "accepted" } else { "rejected" };
        println!("{} -> {}", word, verdict);
    }
    println!("processed automaton, saved to {}", cli.min_dot.display());
    Ok(())
}
