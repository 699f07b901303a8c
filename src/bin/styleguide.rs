//! Styleguide CLI
//!
//! Command line front end to validate a CSS manifest and dump it to JSON.
//!
//! ## Usage
//!
//! ```bash
//! styleguide parse styleguide_manifest.css
//! styleguide parse styleguide_manifest.css --destination manifest.json
//! styleguide --verbose 5 parse styleguide_manifest.css --compiler-support dartsass
//! styleguide version
//! ```

use clap::{Parser, Subcommand};
use css_styleguide::{
    CompilerSupport, Error, Manifest, SerializerOptions, DEFAULT_JSON_INDENT,
};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, warn};

#[derive(Parser)]
#[command(name = "styleguide")]
#[command(about = "Parse and dump CSS styleguide manifests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level from 0 (silent) to 5 (everything)
    #[arg(short, long, global = true, default_value_t = 4,
          value_parser = clap::value_parser!(u8).range(0..=5))]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSS manifest to validate it and possibly dump it to JSON
    Parse {
        /// Path to an existing CSS manifest
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// File to write the JSON manifest to, standard output if not given
        #[arg(long, value_name = "FILE")]
        destination: Option<PathBuf>,

        /// Compiler the CSS has been built with: libsass or dartsass
        #[arg(long, value_name = "NAME")]
        compiler_support: Option<String>,

        /// Maximum length of literals to decode, 0 to disable
        #[arg(long, value_name = "N")]
        evaluation_limit: Option<usize>,
    },

    /// Print the package version
    Version,
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::ERROR,
        2 => LevelFilter::WARN,
        3 => LevelFilter::INFO,
        4 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn run_parse(
    source: PathBuf,
    destination: Option<PathBuf>,
    compiler_support: Option<String>,
    evaluation_limit: Option<usize>,
) -> Result<(), Error> {
    let resolved = source.canonicalize().unwrap_or_else(|_| source.clone());
    debug!("Parsing: {}", resolved.display());

    let mut options = SerializerOptions::new();
    if let Some(name) = compiler_support {
        options = options.with_compiler_support(name.parse::<CompilerSupport>()?);
    }
    if let Some(limit) = evaluation_limit {
        options = options.with_evaluation_limit(limit);
    }

    let mut manifest = Manifest::with_options(options);
    let loaded = manifest.load_path(&source).map(|_| ());

    // Warnings first, a truncation warning explains a failure that follows
    for warning in manifest.warnings() {
        warn!("{}", warning);
    }
    loaded?;

    let json = manifest.to_json(DEFAULT_JSON_INDENT)?;

    match destination {
        Some(destination) => {
            fs::write(&destination, json)?;
            debug!("Manifest written to: {}", destination.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse {
            source,
            destination,
            compiler_support,
            evaluation_limit,
        } => run_parse(source, destination, compiler_support, evaluation_limit),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("{}", err);
        for line in err.diagnostics() {
            error!("{}", line);
        }
        process::exit(1);
    }
}
