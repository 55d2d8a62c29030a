//! OxiDat CLI - The Oxidized Datafile tool
//!
//! Inspects Allegro 4 datafiles and extracts their assets.

mod commands;
mod export;
mod utils;

use clap::{Parser, Subcommand};
use commands::{ExtractOptions, ListOptions, cmd_detect, cmd_extract, cmd_info, cmd_list};
use std::path::PathBuf;
use utils::init_logging;

#[derive(Parser)]
#[command(name = "oxidat")]
#[command(
    author,
    version,
    about = "The Oxidized Datafile - Pure Rust Allegro 4 datafile tool"
)]
#[command(long_about = "
OxiDat reads Allegro 4 datafiles (.dat), packed or unpacked, with
LZSS-compressed objects and nested FILE containers.

Examples:
  oxidat list game.dat
  oxidat list -v -I 'UNITS/*' game.dat
  oxidat list --json -e windows-1251 game.dat
  oxidat info game.dat
  oxidat detect game.dat
  oxidat extract -o assets -P game.dat
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List objects in a datafile
    #[command(alias = "l")]
    List {
        /// Datafile to list
        file: PathBuf,

        /// Show sizes and property counts, and log parsing to stderr
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Text encoding of NAME properties (utf-8, windows-1251, ...)
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// Include only objects whose path matches pattern (glob syntax: UNITS/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude objects whose path matches pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,
    },

    /// Extract leaf objects to files and write manifest.json
    #[command(alias = "x")]
    Extract {
        /// Datafile to extract
        file: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Text encoding of NAME properties (utf-8, windows-1251, ...)
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// Include only objects whose path matches pattern (glob syntax: UNITS/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude objects whose path matches pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,

        /// Show every extracted object, and log parsing to stderr
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Show information about a datafile
    #[command(alias = "i")]
    Info {
        /// Datafile to inspect
        file: PathBuf,
    },

    /// Detect pack indicator and datafile magic
    Detect {
        /// File to detect
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            file,
            verbose,
            json,
            encoding,
            include,
            exclude,
        } => {
            init_logging(verbose);
            let options = ListOptions {
                verbose,
                json,
                encoding: &encoding,
                include: &include,
                exclude: &exclude,
            };
            cmd_list(&file, &options)
        }
        Commands::Extract {
            file,
            output,
            encoding,
            include,
            exclude,
            verbose,
            progress,
        } => {
            init_logging(verbose);
            let options = ExtractOptions {
                output: &output,
                encoding: &encoding,
                include: &include,
                exclude: &exclude,
                verbose,
                progress,
            };
            cmd_extract(&file, &options)
        }
        Commands::Info { file } => cmd_info(&file),
        Commands::Detect { file } => cmd_detect(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from([
            "oxidat", "extract", "-o", "out", "-I", "UNITS/*", "-P", "game.dat",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract {
                file,
                output,
                include,
                progress,
                ..
            } => {
                assert_eq!(file, PathBuf::from("game.dat"));
                assert_eq!(output, PathBuf::from("out"));
                assert_eq!(include, ["UNITS/*"]);
                assert!(progress);
            }
            _ => panic!("expected extract"),
        }
    }
}
