use clap::{ArgAction, Parser as ClapParser, Subcommand};
use jsweep::LintConfig;
use jsweep::cli::{self, CheckOptions, CliError};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "jsweep")]
#[command(about = "jsweep - A static analyzer for JavaScript-like source files")]
#[command(version)]
struct Cli {
    /// More log output on stderr (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// No log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a source file and print the reports as JSON
    Check {
        /// Source file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// JSON config file with disabled_rules and name_pattern
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Disable a rule by name (repeatable)
        #[arg(long = "disable", value_name = "RULE")]
        disabled: Vec<String>,

        /// Regex of variable names to reject
        #[arg(long)]
        name_pattern: Option<String>,
    },

    /// List the built-in rules
    Rules,

    /// Print the token stream of a source file as JSON
    Tokens {
        /// Source file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Check {
            file,
            pretty,
            config,
            disabled,
            name_pattern,
        } => run_check(file, pretty, config, disabled, name_pattern),
        Commands::Rules => {
            print!("{}", cli::render_rule_list(&cli::list_rules()));
            Ok(())
        }
        Commands::Tokens { file, pretty } => run_tokens(file, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_source(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    file: Option<PathBuf>,
    pretty: bool,
    config: Option<PathBuf>,
    disabled: Vec<String>,
    name_pattern: Option<String>,
) -> Result<(), CliError> {
    let mut config = match config {
        Some(path) => LintConfig::from_file(&path)?,
        None => LintConfig::default(),
    };
    config.disabled_rules.extend(disabled);
    if name_pattern.is_some() {
        config.name_pattern = name_pattern;
    }

    let options = CheckOptions {
        source: read_source(file.as_deref())?,
        pretty,
        config,
    };

    let result = cli::execute_check(&options)?;
    println!("{}", result.output);
    if !result.is_clean() {
        std::process::exit(2);
    }
    Ok(())
}

fn run_tokens(file: Option<PathBuf>, pretty: bool) -> Result<(), CliError> {
    let source = read_source(file.as_deref())?;
    println!("{}", cli::dump_tokens(&source, pretty)?);
    Ok(())
}
