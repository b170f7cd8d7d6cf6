#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use proplogic::logic::chaining::ChainingStrategy;
use proplogic::logic::cnf::parse_cnf_sentence;
use proplogic::logic::config::ResolutionConfig;
use proplogic::logic::definite::DefiniteKnowledgeBase;
use proplogic::logic::knowledge_base::KnowledgeBase;
use proplogic::logic::parser::parse_formula;
use proplogic::logic::resolution::Resolution;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the reasoner.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "proplogic", version, about = "A propositional logic reasoner")]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute (e.g. `cnf`, `chain`, `ask`).
    #[clap(subcommand)]
    pub command: Commands,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Convert a formula to conjunctive normal form.
    Cnf {
        /// The formula, e.g. "(B11 <=> (P12 | P21)) & !B11".
        #[arg(short, long)]
        input: String,
    },

    /// Answer a query against a definite-clause knowledge base by chaining.
    Chain {
        /// Knowledge base file, one definite clause per line.
        #[arg(long)]
        path: PathBuf,

        /// The symbol to prove.
        #[arg(short, long)]
        query: String,

        /// Forward (data-driven) or backward (goal-driven) chaining.
        #[arg(long, default_value_t = ChainingStrategy::Forward)]
        strategy: ChainingStrategy,
    },

    /// Answer a query against an arbitrary knowledge base by resolution.
    Ask {
        /// Knowledge base file, one formula per line.
        #[arg(long)]
        path: PathBuf,

        /// The formula to prove.
        #[arg(short, long)]
        query: String,

        /// Give up once the working clause set grows past this size.
        #[arg(long)]
        max_clauses: Option<usize>,

        /// Discard resolvents with more literals than this (incomplete).
        #[arg(long)]
        max_clause_len: Option<usize>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) debug: bool,

    /// Print timing, clause and memory statistics.
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) stats: bool,
}

/// Initialises `env_logger`, defaulting to `debug` when `--debug` is given.
pub(crate) fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Dispatches a parsed command line.
///
/// # Errors
///
/// A printable message if an input file cannot be read or does not parse.
pub(crate) fn run(cli: Cli) -> Result<(), String> {
    let common = cli.common;

    match cli.command {
        Commands::Cnf { input } => {
            let time = Instant::now();
            let cnf = parse_cnf_sentence(&input).map_err(|e| e.to_string())?;
            let elapsed = time.elapsed();

            println!("{cnf}");
            if common.stats {
                print_stats(&[
                    ("Conversion time (s)", format!("{:.3}", elapsed.as_secs_f64())),
                    ("Clauses", cnf.len().to_string()),
                    ("Symbols", cnf.symbols().len().to_string()),
                ]);
            }
        }

        Commands::Chain {
            path,
            query,
            strategy,
        } => {
            let time = Instant::now();
            let kb = DefiniteKnowledgeBase::parse(&read_input(&path)?).map_err(|e| e.to_string())?;
            let parse_time = time.elapsed();

            let time = Instant::now();
            let entailed = strategy.to_impl().entails(&kb, &query);
            let elapsed = time.elapsed();

            if common.stats {
                print_stats(&[
                    ("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64())),
                    ("Definite clauses", kb.len().to_string()),
                    ("Facts", kb.facts().count().to_string()),
                    ("Strategy", strategy.to_string()),
                    ("Inference time (s)", format!("{:.3}", elapsed.as_secs_f64())),
                ]);
            }
            print_verdict(entailed);
        }

        Commands::Ask {
            path,
            query,
            max_clauses,
            max_clause_len,
        } => {
            let config = ResolutionConfig {
                max_clauses,
                max_clause_len,
            };

            let time = Instant::now();
            let kb = KnowledgeBase::with_config(&read_input(&path)?, config)
                .map_err(|e| e.to_string())?;
            let query = parse_formula(&query).map_err(|e| e.to_string())?;
            let parse_time = time.elapsed();

            let time = Instant::now();
            let mut prover = Resolution::new(kb.clauses(), &query, config).map_err(|e| e.to_string())?;
            let result = prover.run();
            let elapsed = time.elapsed();

            if common.stats {
                report_resolution(&kb, &prover, parse_time, elapsed);
            }
            print_verdict(result.map_err(|e| e.to_string())?);
        }

        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, String> {
    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }
    std::fs::read_to_string(path).map_err(|e| format!("Unable to read {}: {e}", path.display()))
}

/// Allocated and resident memory in MiB, if jemalloc statistics are available.
fn memory_mib() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

fn report_resolution(kb: &KnowledgeBase, prover: &Resolution, parse_time: Duration, elapsed: Duration) {
    let elapsed_secs = elapsed.as_secs_f64();
    let passes = prover.passes();
    let rate = if elapsed_secs > 0.0 {
        prover.clause_count() as f64 / elapsed_secs
    } else {
        0.0
    };

    let mut lines = vec![
        ("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64())),
        ("Symbols", kb.clauses().symbols().len().to_string()),
        ("Clauses (knowledge base)", kb.clauses().len().to_string()),
        ("Clauses (final)", prover.clause_count().to_string()),
        ("Passes", passes.to_string()),
        ("Clauses per second", format!("{rate:.0}")),
        ("CPU time (s)", format!("{elapsed_secs:.3}")),
    ];
    if let Some((allocated, resident)) = memory_mib() {
        lines.push(("Memory usage (MiB)", format!("{allocated:.2}")));
        lines.push(("Resident memory (MiB)", format!("{resident:.2}")));
    }
    print_stats(&lines);
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

fn print_stats(lines: &[(&str, String)]) {
    println!("\n===========================[ Statistics ]============================");
    for (label, value) in lines {
        stat_line(label, value);
    }
    println!("=====================================================================");
}

fn print_verdict(entailed: bool) {
    if entailed {
        println!("\nENTAILED");
    } else {
        println!("\nNOT ENTAILED");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chain_arguments() {
        let cli = Cli::try_parse_from([
            "proplogic",
            "chain",
            "--path",
            "kb.txt",
            "--query",
            "Q",
            "--strategy",
            "backward",
        ])
        .unwrap();
        match cli.command {
            Commands::Chain {
                query, strategy, ..
            } => {
                assert_eq!(query, "Q");
                assert_eq!(strategy, ChainingStrategy::Backward);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_ask_limits() {
        let cli = Cli::try_parse_from([
            "proplogic",
            "--stats",
            "ask",
            "--path",
            "kb.txt",
            "-q",
            "!P12",
            "--max-clause-len",
            "3",
        ])
        .unwrap();
        assert!(cli.common.stats);
        match cli.command {
            Commands::Ask {
                max_clauses,
                max_clause_len,
                ..
            } => {
                assert_eq!(max_clauses, None);
                assert_eq!(max_clause_len, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_input(Path::new("/definitely/not/here.kb")).unwrap_err();
        assert!(err.starts_with("Provided path is not a file"));
    }
}
