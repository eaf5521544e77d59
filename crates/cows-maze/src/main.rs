//! CLI entry point for the maze search.
//!
//! Usage:
//!   cows-maze [search] [options]
//!   cows-maze table [--searched] [--rulebook <standard|strict>]
//!
//! Options:
//!   --format <text|json>          Report format (default: text)
//!   --trace-capacity <n>          States kept in the trace buffer (default: 300)
//!   --continue-after-goal         Keep searching after a goal, report every one
//!   --rulebook <standard|strict>  Reading of boxes 26 and 55 (default: standard)
//!   --verbose                     Describe the transition table on stderr

use std::io::{self, BufWriter, Write};

use clap::{Parser, Subcommand, ValueEnum};

use cows_maze::{
    write_report, write_transitions, Pencil, Rulebook, SearchConfig, SearchSummary, StateSpace,
    DEFAULT_TRACE_CAPACITY, STATE_COUNT,
};

#[derive(Parser)]
#[command(name = "cows-maze")]
#[command(about = "Exhaustive state-space search of the Cows in the Maze puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search from pencils on boxes 1 and 7 for a way out (default)
    Search {
        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// States kept in the trace buffer
        #[arg(long, default_value_t = DEFAULT_TRACE_CAPACITY)]
        trace_capacity: usize,

        /// Keep searching after a goal and report every goal reached
        #[arg(long)]
        continue_after_goal: bool,

        /// Reading of the deadly embrace on 26 and the LUGNUT exit of 55
        #[arg(long, value_enum, default_value_t = RulebookArg::Standard)]
        rulebook: RulebookArg,

        /// Describe the transition table on stderr
        #[arg(long)]
        verbose: bool,
    },
    /// Dump every transition of the state space
    Table {
        /// Run the default search first so visit depths are shown
        #[arg(long)]
        searched: bool,

        /// Reading of the deadly embrace on 26 and the LUGNUT exit of 55
        #[arg(long, value_enum, default_value_t = RulebookArg::Standard)]
        rulebook: RulebookArg,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RulebookArg {
    Standard,
    Strict,
}

impl From<RulebookArg> for Rulebook {
    fn from(arg: RulebookArg) -> Self {
        match arg {
            RulebookArg::Standard => Rulebook::Standard,
            RulebookArg::Strict => Rulebook::Strict,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Search {
        format: OutputFormat::Text,
        trace_capacity: DEFAULT_TRACE_CAPACITY,
        continue_after_goal: false,
        rulebook: RulebookArg::Standard,
        verbose: false,
    });

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = match command {
        Commands::Search {
            format,
            trace_capacity,
            continue_after_goal,
            rulebook,
            verbose,
        } => {
            let config = SearchConfig {
                trace_capacity,
                stop_at_first_goal: !continue_after_goal,
            };
            let space = build_space(rulebook.into(), verbose);
            run_search(&mut out, space, &config, format)
        }
        Commands::Table { searched, rulebook } => {
            run_table(&mut out, build_space(rulebook.into(), false), searched)
        }
    };

    if let Err(e) = result.and_then(|_| out.flush()) {
        eprintln!("Error writing report: {}", e);
        std::process::exit(1);
    }
}

fn build_space(rulebook: Rulebook, verbose: bool) -> StateSpace {
    eprintln!("Allocating state space...");
    let space = StateSpace::build_with(rulebook);
    if verbose {
        let with_alternate = space
            .transitions()
            .filter(|t| Pencil::BOTH.iter().any(|&p| t.alt_next(p).is_some()))
            .count();
        eprintln!(
            "Built {} transitions, {} with a LUGNUT alternative",
            STATE_COUNT, with_alternate
        );
    }
    space
}

fn run_search<W: Write>(
    out: &mut W,
    mut space: StateSpace,
    config: &SearchConfig,
    format: OutputFormat,
) -> io::Result<()> {
    let outcome = space.search(config);

    for _ in 0..outcome.illegal_encounters {
        eprintln!("Illegal state encountered!");
    }

    match format {
        OutputFormat::Text => write_report(out, &space, &outcome),
        OutputFormat::Json => {
            let summary = SearchSummary::from(&outcome);
            serde_json::to_writer_pretty(&mut *out, &summary)?;
            writeln!(out)
        }
    }
}

fn run_table<W: Write>(out: &mut W, mut space: StateSpace, searched: bool) -> io::Result<()> {
    if searched {
        space.search(&SearchConfig::default());
    }
    write_transitions(out, space.transitions())
}
