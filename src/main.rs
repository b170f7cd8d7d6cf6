//! # proplogic
//!
//! `proplogic` is a command-line reasoner for propositional logic.
//! It parses formulas written with `!`, `&`, `|`, `=>` and `<=>`, converts them to
//! conjunctive normal form, and answers entailment queries against a knowledge base.
//!
//! Two families of inference are available:
//! 1.  **Chaining**: forward or backward chaining over definite clauses
//!     (`A & B => C`, facts such as `A`).
//! 2.  **Resolution**: refutation by resolution over arbitrary formulas.
//!
//! ## Usage
//!
//! ```sh
//! proplogic [--debug] [--stats] <SUBCOMMAND>
//! ```
//!
//! ### Subcommands
//!
//! -   `cnf --input <FORMULA>`: print the CNF of a formula.
//!
//!     ```sh
//!     proplogic cnf --input "(B11 <=> (P12 | P21)) & !B11"
//!     ```
//!
//! -   `chain --path <FILE> --query <SYMBOL> [--strategy forward|backward]`:
//!     decide a query against a definite-clause knowledge base, one clause per line.
//!
//! -   `ask --path <FILE> --query <FORMULA> [--max-clauses N] [--max-clause-len N]`:
//!     decide a query by resolution against a knowledge base of one formula per line.
//!     A clause-length limit makes the prover faster but incomplete.
//!
//! -   `completions <SHELL>`: print a shell completion script.
//!
//! ### Global Options
//!
//! -   `--debug`: log inference progress. `RUST_LOG` takes precedence when set.
//! -   `--stats`: print timing, clause counts and jemalloc memory usage.

use clap::Parser;
use command_line::cli::{Cli, init_logging, run};

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.common.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
