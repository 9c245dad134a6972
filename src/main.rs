//! `arbor`: build a taxonomy, show its id index, and time a shortest-path query.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use veb_arbor::output::{self, Verbosity};
use veb_arbor::samples::{build_sample_animals, build_synthetic, synthetic_term_count};
use veb_arbor::{ClusterView, Taxonomy};

/// Porphyrian taxonomy indexed by a van Emde Boas tree
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Size of the id universe; must exceed the number of terms
    #[arg(short, long, default_value_t = 256)]
    universe: usize,

    /// Which taxonomy to build
    #[arg(short, long, value_enum, default_value_t = Sample::Animals)]
    sample: Sample,

    /// Levels of the synthetic tree
    #[arg(long, default_value_t = 4)]
    levels: usize,

    /// Children per node in the synthetic tree
    #[arg(long, default_value_t = 3)]
    branching: usize,

    /// Start term of the path query
    #[arg(long, default_value = "Plato")]
    from: String,

    /// End term of the path query
    #[arg(long, default_value = "chicken")]
    to: String,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Sample {
    Animals,
    Synthetic,
}

/// Settings for one demo run.
#[derive(Debug, Clone)]
struct RunConfig {
    universe: usize,
    sample: Sample,
    levels: usize,
    branching: usize,
    from: String,
    to: String,
    verbosity: Verbosity,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            universe: cli.universe,
            sample: cli.sample,
            levels: cli.levels,
            branching: cli.branching,
            from: cli.from,
            to: cli.to,
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        }
    }
}

fn main() {
    let config = RunConfig::from(Cli::parse());
    if let Err(err) = run(&config) {
        output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run(config: &RunConfig) -> Result<()> {
    let v = config.verbosity;
    output::debug(format!("{config:?}"), v);

    let mut taxonomy = Taxonomy::new(config.universe).context("invalid universe size")?;

    let start = Instant::now();
    match config.sample {
        Sample::Animals => {
            build_sample_animals(&mut taxonomy).context("building sample animals")?;
        }
        Sample::Synthetic => {
            let expected = synthetic_term_count(config.levels, config.branching);
            if expected > config.universe {
                output::warn(
                    format!(
                        "synthetic tree needs {expected} ids but the universe holds {}",
                        config.universe
                    ),
                    v,
                );
            }
            build_synthetic(&mut taxonomy, config.levels, config.branching)
                .context("building synthetic taxonomy")?;
        }
    }
    let build_us = start.elapsed().as_micros();

    output::print(
        format!("Build time ({} terms): {build_us} us", taxonomy.len()),
        v,
    );
    output::debug(
        format!(
            "index: {} clusters, ~{} bytes",
            taxonomy.index().cluster_count(),
            taxonomy.index().memory_usage()
        ),
        v,
    );

    output::print(format!("\n{}", ClusterView::of(&taxonomy)), v);

    let start = Instant::now();
    let result = taxonomy.shortest_path(&config.from, &config.to);
    let query_us = start.elapsed().as_micros();

    match result {
        Ok(path) => {
            let hops = path.len() - 1;
            output::print(
                format!(
                    "\nShortest path ({} -> {}):\n  {}",
                    config.from,
                    config.to,
                    taxonomy.join_labels(&path, " -> ")
                ),
                v,
            );
            output::print(format!("Edges (hops): {hops}"), v);
            output::print(
                format!(
                    "Nodes between terms (excluding endpoints): {}",
                    path.len().saturating_sub(2)
                ),
                v,
            );
            output::print(format!("Dijkstra time: {query_us} us"), v);
        }
        Err(err) if err.is_not_found() => {
            output::debug(&err, v);
            output::print(
                format!("\nNo path found between {} and {}", config.from, config.to),
                v,
            );
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
