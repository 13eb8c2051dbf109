//! Stanzagen CLI
//!
//! Usage:
//!   stanzagen [OPTIONS]
//!
//! Options:
//!   -s, --sources <FILE>  Stanza template catalog [default: sources.cfg]
//!   -c, --config <FILE>   Host/group declarations [default: hosts.cfg]
//!   -o, --output <FILE>   Generated output file [default: generated.cfg]
//!       --stdout          Print to stdout instead of writing the file
//!   -h, --help            Print help

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;

use stanzagen::{generate, GenerateError};

#[derive(Parser)]
#[command(name = "stanzagen")]
#[command(about = "Generates monitoring configuration from stanza templates")]
struct Cli {
    /// Stanza template catalog file
    #[arg(short, long, default_value = "sources.cfg")]
    sources: PathBuf,

    /// Host/group declaration file
    #[arg(short, long, default_value = "hosts.cfg")]
    config: PathBuf,

    /// Destination file for the generated configuration
    #[arg(short, long, default_value = "generated.cfg")]
    output: PathBuf,

    /// Print the generated configuration to stdout instead of writing it
    #[arg(long)]
    stdout: bool,
}

fn main() {
    let cli = Cli::parse();

    let sources_text = match fs::read_to_string(&cli.sources) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading sources file '{}': {}", cli.sources.display(), e);
            std::process::exit(1);
        }
    };

    let config_text = match fs::read_to_string(&cli.config) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading config file '{}': {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };

    let output = match generate(&sources_text, &config_text) {
        Ok(output) => output,
        Err(GenerateError::Config(errors)) => {
            let filename = cli.config.display().to_string();
            for error in &errors {
                eprint!("{}", error.format(&config_text, &filename));
            }
            eprintln!("{} config error(s), nothing written", errors.len());
            std::process::exit(1);
        }
    };

    if cli.stdout {
        print!("{}", output);
        return;
    }

    if let Err(e) = write_atomic(&cli.output, &output) {
        eprintln!("Error writing output file '{}': {}", cli.output.display(), e);
        std::process::exit(1);
    }
}

/// Write via a temp file in the destination directory, then rename, so a
/// failed run never leaves a half-written config behind.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let tmp = match path.file_name() {
        Some(name) => {
            let mut tmp_name = name.to_os_string();
            tmp_name.push(".tmp");
            path.with_file_name(tmp_name)
        }
        None => return fs::write(path, contents),
    };

    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}
