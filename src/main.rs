use clap::{Parser as ClapParser, Subcommand};
use dataconv::{
    cli::{self, CliError, ConvertOptions, ConvertReport, Session, ValidateOptions},
    config::Config,
};
use std::{
    io::{self, Read},
    path::PathBuf,
};

#[derive(ClapParser)]
#[command(name = "dataconv")]
#[command(about = "Convert structured data between JSON, TOML, YAML and XML")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert data between formats with optional filtering
    Convert {
        /// Query: "from <source>[path] to <dest> where <conditions>"
        /// (reads from stdin if not provided)
        query: Option<String>,

        /// Validate only, don't save output
        #[arg(short, long)]
        dry_run: bool,

        /// Write the destination directly instead of via a temp file
        #[arg(long)]
        no_atomic: bool,
    },

    /// Validate a file for format compatibility
    ValidateFile {
        /// Path to the file to validate
        file: PathBuf,

        /// Override format detection (json, toml, yaml, xml)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Parse a query and print its descriptor as JSON
    Check {
        /// The query to parse
        query: String,

        /// Single-line output
        #[arg(long)]
        compact: bool,
    },

    /// Show documentation, optionally for one topic
    Docs {
        /// Topic name (omit to list topics)
        topic: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config, cli.verbose);

    let mut session = Session::new(config);

    let result = match cli.command {
        Commands::Convert {
            query,
            dry_run,
            no_atomic,
        } => run_convert(&mut session, query, dry_run, no_atomic),
        Commands::ValidateFile { file, format } => run_validate(&mut session, file, format),
        Commands::Check { query, compact } => {
            cli::execute_check(&query, !compact).map(|json| println!("{}", json))
        }
        Commands::Docs { topic: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Docs { topic: Some(topic) } => {
            cli::get_doc_category(&topic).map(|content| print!("{}", content))
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` means debug, else the configured
/// level. Logs go to stderr so stdout stays clean for output.
fn init_logging(config: &Config, verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let fallback = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_convert(
    session: &mut Session,
    query: Option<String>,
    dry_run: bool,
    no_atomic: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer.trim().to_string()
        }
        None => return Err(CliError::NoInput),
    };
    if query.is_empty() {
        return Err(CliError::NoInput);
    }

    let options = ConvertOptions {
        query,
        dry_run,
        atomic: no_atomic.then_some(false),
    };

    let report = cli::execute_convert(session, &options)?;
    print_convert_report(&report);
    Ok(())
}

fn print_convert_report(report: &ConvertReport) {
    for notice in &report.notices {
        println!("Warning: {}", notice);
    }
    if !report.validation.warnings.is_empty() {
        println!("{}", report.validation);
        println!();
    }

    if !report.saved {
        println!("Validation passed! (Dry run - file not saved)");
        return;
    }

    println!("Conversion complete");
    println!("  Source:       {}", report.source.display());
    println!("  Destination:  {}", report.destination.display());
    println!("  Format:       {}", report.format.tag().to_uppercase());
    if let Some(path) = &report.path {
        println!("  Path:         {}", path);
    }
    if report.conditions > 0 {
        println!("  Conditions:   {} filter(s)", report.conditions);
    }
}

fn run_validate(
    session: &mut Session,
    file: PathBuf,
    format: Option<String>,
) -> Result<(), CliError> {
    let options = ValidateOptions { file, format };
    let report = cli::execute_validate_file(session, &options)?;

    println!(
        "Validating {} as {}",
        report.file.display(),
        report.format.tag().to_uppercase()
    );
    println!();
    println!("{}", report.result);

    if !report.result.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}
