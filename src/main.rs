use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
#[macro_use]
extern crate text_io;

use wordsquare::square::{CandidateOrder, Dictionary, Solver, SolverConfig};
use wordsquare::utils::{logging, serialization};

/// Builds word squares from a bag of letters
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list, one word per line
    #[arg(
        short,
        long,
        global = true,
        env = "WORDSQUARE_DICTIONARY",
        default_value = "words.txt"
    )]
    dictionary: PathBuf,

    /// JSON solver config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a single puzzle
    Solve(SolveArgs),
    /// Read puzzles from stdin, one `<size> <letters>` per line
    Repl,
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// Side length of the square
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(2..))]
    size: u64,

    /// Letters available to build the square
    #[arg(short = 'l', long)]
    sequence: String,

    /// Candidate order, overrides the config file
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Seed for the shuffled order. Also reseeds a shuffled order from the config file
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long)]
    max_nodes: Option<u64>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OrderArg {
    Lexicographic,
    Shuffled,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let debug_enabled = cli.verbose || std::env::var("WORDSQUARE_DEBUG").is_ok();
    logging::init_logger(debug_enabled);

    if let Err(e) = try_main(cli) {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main(cli: Cli) -> Result<(), Box<dyn Error>> {
    let dictionary = Dictionary::load_from_path(&cli.dictionary)?;
    let mut config = match &cli.config {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::default(),
    };

    match cli.command {
        Command::Solve(args) => {
            apply_overrides(&mut config, &args);
            let solver = Solver::new(&dictionary).with_config(config);
            solve_once(&solver, &args)
        }
        Command::Repl => {
            let solver = Solver::new(&dictionary).with_config(config);
            run_repl(&solver)
        }
    }
}

fn apply_overrides(config: &mut SolverConfig, args: &SolveArgs) {
    config.order = match (args.order, config.order) {
        (Some(OrderArg::Lexicographic), _) => CandidateOrder::Lexicographic,
        (Some(OrderArg::Shuffled), CandidateOrder::Shuffled { seed }) => CandidateOrder::Shuffled {
            seed: args.seed.unwrap_or(seed),
        },
        (Some(OrderArg::Shuffled), CandidateOrder::Lexicographic) => CandidateOrder::Shuffled {
            seed: args.seed.unwrap_or(0),
        },
        (None, CandidateOrder::Shuffled { seed }) => CandidateOrder::Shuffled {
            seed: args.seed.unwrap_or(seed),
        },
        (None, CandidateOrder::Lexicographic) => {
            if args.seed.is_some() {
                log::warn!("--seed has no effect with the lexicographic order");
            }
            CandidateOrder::Lexicographic
        }
    };
    if args.timeout_ms.is_some() {
        config.timeout_ms = args.timeout_ms;
    }
    if args.max_nodes.is_some() {
        config.max_nodes = args.max_nodes;
    }
}

fn solve_once(solver: &Solver, args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let size = usize::try_from(args.size)?;
    if args.json {
        let result = solver.solve_detailed(size, &args.sequence)?;
        println!("{}", serialization::to_json_string(&result)?);
        return Ok(());
    }

    let rows = solver.solve(size, &args.sequence)?;
    print_rows(&rows);
    Ok(())
}

fn run_repl(solver: &Solver) -> Result<(), Box<dyn Error>> {
    println!("Enter `<size> <letters>` (e.g. `4 aaccdeeeemmnnnoo`), or `quit` to exit.");
    loop {
        print!("> ");
        io::stdout().flush()?;

        // End of input ends the session
        let line: String = match try_read!("{}\n") {
            Ok(line) => line,
            Err(_) => break,
        };
        let (size, sequence) = match parse_repl_line(&line) {
            ReplLine::Quit => break,
            ReplLine::Solve(size, sequence) => (size, sequence),
            ReplLine::Invalid => {
                eprintln!("Expected a size of at least 2 followed by letters");
                continue;
            }
        };

        match solver.solve_detailed(size, sequence) {
            Ok(result) => match result.solution {
                Some(solution) => print!("{}", solution),
                None if result.status.stop_reason().is_some() => {
                    println!("Search stopped: {:?}", result.status)
                }
                None => println!("No solutions found."),
            },
            Err(e) => eprintln!("Error: {e}"),
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum ReplLine<'a> {
    Quit,
    Solve(usize, &'a str),
    Invalid,
}

/// Parses one REPL line: `<size> <letters>`, `quit`, or a blank line (also quit)
fn parse_repl_line(line: &str) -> ReplLine {
    let line = line.trim();
    if line.is_empty() || line == "quit" {
        return ReplLine::Quit;
    }

    let mut parts = line.split_whitespace();
    let size = parts.next().map(str::parse::<usize>);
    match (size, parts.next(), parts.next()) {
        (Some(Ok(size)), Some(sequence), None) if size >= 2 => ReplLine::Solve(size, sequence),
        _ => ReplLine::Invalid,
    }
}

fn print_rows(rows: &[String]) {
    if rows.is_empty() {
        println!("No solutions found.");
    } else {
        rows.iter().for_each(|row| println!("{}", row));
    }
}
