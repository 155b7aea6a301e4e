use std::{env, fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use buildfile::{
    config::config::Config, display_error, hash::hash::fingerprint, parser::parser::parse_str,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Build-file toolkit.
#[derive(Parser)]
#[command(name = "buildfile", version, about = "Parse build files and fingerprint build inputs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a build file and print its declarations
    Parse {
        /// Path to the build file
        file: PathBuf,
    },
    /// Print the SHA-256 fingerprint of the given inputs
    Hash {
        /// Absolute files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Only include files with this extension
        #[arg(long)]
        ext: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file } => parse_file(file),
        Commands::Hash { paths, ext } => hash_paths(paths, ext),
    }
}

fn parse_file(file: PathBuf) -> ExitCode {
    let start = Instant::now();

    let source = match read_to_string(&file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned());
    let (document, result) = parse_str(&source, &name, &file.to_string_lossy());

    tracing::info!("Parsed in {:?}", start.elapsed());

    match result {
        Ok(()) => {
            println!("{:#?}", document);
            ExitCode::SUCCESS
        }
        Err(error) => {
            display_error(&error, &file);
            ExitCode::FAILURE
        }
    }
}

fn hash_paths(paths: Vec<PathBuf>, ext: Option<String>) -> ExitCode {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(error) => {
            eprintln!("Failed to read the working directory: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::discover(&cwd) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {} ({})", error.get_error_name(), error);
            return ExitCode::FAILURE;
        }
    };

    // relative arguments are taken from the working directory
    let paths: Vec<PathBuf> = paths.into_iter().map(|p| cwd.join(p)).collect();

    match fingerprint(&paths, ext.as_deref(), &config) {
        Ok(digest) => {
            println!("{}", digest);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {} ({})", error.get_error_name(), error);
            ExitCode::FAILURE
        }
    }
}
