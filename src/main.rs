use std::process;

use clap::{Parser, Subcommand};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use sortbench::config::OutputFormat;
use sortbench::error::{get_error_suggestion, random_scots_exclamation};
use sortbench::generator::parse_size;
use sortbench::logging::{self, LogLevel};
use sortbench::report::{render_json, render_text};
use sortbench::{
    Algorithm, Config, Distribution, RandomFill, Round, Session, SortError, SortResult,
};

/// Initialize the panic hook so a crash at least says whit happened
fn setup_crash_handlers() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        eprintln!("\n{}", "Och noo! sortbench crashed!".red().bold());
        if let Some(location) = panic_info.location() {
            eprintln!(
                "{}",
                format!("Panic at {}:{}", location.file(), location.line()).red()
            );
        }
        eprintln!(
            "\n{}",
            "This shouldnae hae happened! Please report this issue.".yellow()
        );
        default_panic(panic_info);
    }));
}

/// sortbench - five classic sorts, timed an' measured
#[derive(Parser)]
#[command(name = "sortbench")]
#[command(author = "Arthur")]
#[command(version = "0.1.0")]
#[command(about = "Time bubble, selection, insertion, merge an' quick sort on generated data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Fixed seed fer the random generator (overrides SORTBENCH_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Fill Random arrays wi' independent values instead o' a shuffled 1..n
    #[arg(long, global = true)]
    random_values: bool,

    /// Count comparisons, swaps an' writes fer each sort
    #[arg(long, global = true)]
    count: bool,

    /// Print each round as a JSON object
    #[arg(long, global = true)]
    json: bool,

    /// Only run these sorts, e.g. "merge,quick"
    #[arg(long, global = true, value_delimiter = ',', value_name = "ALGORITHM")]
    only: Vec<Algorithm>,

    /// Log filter, e.g. "info" or "warn,sortbench::harness=debug"
    #[arg(long, global = true, value_name = "SPEC")]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rounds straight aff, nae prompts
    Run {
        /// Number o' elements
        #[arg(short, long)]
        size: usize,

        /// random, sorted or reverse
        #[arg(short, long, default_value = "random")]
        distribution: Distribution,

        /// How many rounds tae run
        #[arg(short, long, default_value_t = 1)]
        rounds: usize,
    },

    /// Start the interactive prompt (the default)
    Interactive,
}

fn main() {
    setup_crash_handlers();

    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log.as_deref()) {
        report_error(&e);
        process::exit(1);
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            report_error(&e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Run {
            size,
            distribution,
            rounds,
        }) => run_batch(config, size, distribution, rounds),
        Some(Commands::Interactive) | None => run_interactive(config),
    };

    if let Err(e) = result {
        report_error(&e);
        process::exit(1);
    }
}

fn init_logging(spec: Option<&str>) -> SortResult<()> {
    logging::init_from_env()?;
    if let Some(spec) = spec {
        logging::set_filter(spec)?;
    }
    Ok(())
}

fn build_config(cli: &Cli) -> SortResult<Config> {
    let mut config = Config::from_env()?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.random_values {
        config.fill = RandomFill::Values;
    }
    config.count_operations = cli.count;
    if cli.json {
        config.output = OutputFormat::Json;
    }
    if !cli.only.is_empty() {
        config.algorithms = cli.only.clone();
    }
    Ok(config)
}

fn report_error(e: &SortError) {
    eprintln!("{}: {}", random_scots_exclamation().red().bold(), e);
    if let Some(hint) = get_error_suggestion(e) {
        eprintln!("{}", hint.yellow());
    }
}

fn print_round(round: &Round, config: &Config) {
    match config.output {
        OutputFormat::Text => print!("{}", render_text(round, config.display_limit)),
        OutputFormat::Json => println!("{}", render_json(round, config.display_limit)),
    }
}

fn run_batch(
    config: Config,
    size: usize,
    distribution: Distribution,
    rounds: usize,
) -> SortResult<()> {
    let mut session = Session::new(config);
    logging::log(
        LogLevel::Info,
        "sortbench::main",
        "batch run",
        vec![
            ("rounds".to_string(), serde_json::json!(rounds)),
            ("seed".to_string(), serde_json::json!(session.seed())),
        ],
    );
    for _ in 0..rounds {
        let round = session.run_round(size, distribution)?;
        print_round(&round, session.config());
    }
    Ok(())
}

/// Read one line; `None` on Ctrl-C or end o' input.
fn prompt(rl: &mut DefaultEditor, text: &str) -> SortResult<Option<String>> {
    match rl.readline(text) {
        Ok(line) => {
            if !line.trim().is_empty() {
                let _ = rl.add_history_entry(line.as_str());
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(SortError::Io(e.to_string())),
    }
}

fn run_interactive(config: Config) -> SortResult<()> {
    println!("{}", "═".repeat(50).cyan());
    println!("{}", "  sortbench - five sorts, one stopwatch".cyan().bold());
    println!("{}", "═".repeat(50).cyan());
    println!();

    let mut rl = DefaultEditor::new().map_err(|e| SortError::Io(e.to_string()))?;

    let history_path = dirs::home_dir()
        .map(|h| h.join(".sortbench_history"))
        .unwrap_or(std::path::PathBuf::from(".sortbench_history"));
    if history_path.exists() {
        let _ = rl.load_history(&history_path);
    }

    let max_size = config.max_size;
    let mut session = Session::new(config);

    loop {
        let size_prompt = format!("Enter array size (up to {}): ", max_size);
        let Some(line) = prompt(&mut rl, &size_prompt)? else {
            break;
        };
        let size = match parse_size(&line).and_then(|size| session.config().check_size(size)) {
            Ok(size) => size,
            Err(e) if e.is_config_error() => {
                report_error(&e);
                break;
            }
            Err(e) => return Err(e),
        };

        println!("Select array type:");
        println!("1. Random\n2. Sorted\n3. Reverse");
        let Some(choice) = prompt(&mut rl, "Enter choice: ")? else {
            break;
        };
        let distribution = match Distribution::from_choice(&choice) {
            Ok(distribution) => distribution,
            Err(e) => {
                println!("Invalid choice.");
                logging::log(
                    LogLevel::Warn,
                    "sortbench::main",
                    e.to_string(),
                    Vec::new(),
                );
                break;
            }
        };

        let round = match session.run_round(size, distribution) {
            Ok(round) => round,
            Err(e) if e.is_config_error() => {
                report_error(&e);
                break;
            }
            Err(e) => return Err(e),
        };
        print_round(&round, session.config());

        let again = prompt(&mut rl, "\nDo you want to run another round? (y/n): ")?;
        println!();
        if !again.is_some_and(|answer| matches!(answer.trim().chars().next(), Some('y' | 'Y'))) {
            break;
        }
    }

    if let Err(e) = rl.save_history(&history_path) {
        eprintln!("Warning: Couldnae save history: {}", e);
    }
    println!("{}", "Haste ye back! Slàinte!".cyan());
    Ok(())
}
