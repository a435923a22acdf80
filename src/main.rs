use clap::Parser;
use log::warn;

use std::path::PathBuf;

use sample_manifest::manifest::{build_tsv, write_tsv, ConditionPatterns};
use sample_manifest::ManifestError;

/// Build a patient / sample / condition sample sheet from a directory tree.
///
/// Every file ending on the extension is classified by the tumor / normal
/// folder it sits in (or, lacking one, by its position below DIRECTORY) and
/// written as one tab separated row: patient, sample, condition, path.
#[derive(Parser)]
#[clap(version = "0.1.0")]
struct Opts {
    /// Directory to search for files.
    directory: PathBuf,

    /// File extension to search for (e.g. 'bed', '.txt').
    extension: String,

    /// Path to the output TSV file.
    output_file: PathBuf,
}

fn run(opts: &Opts) -> sample_manifest::Result<()> {
    // an empty match still produces a sheet, only the header line
    let records = match build_tsv(&opts.directory, &opts.extension, &ConditionPatterns::default()) {
        Ok(records) => records,
        Err(e @ ManifestError::NoMatches { .. }) => {
            warn!("{e}");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    write_tsv(&records, &opts.output_file)?;
    Ok(())
}

fn main() {
    let opts: Opts = Opts::parse();

    // warnings only, the sheet path is the one line on stdout
    if let Err(e) = stderrlog::new().verbosity(1usize).init() {
        eprintln!("could not initialise logging: {e}");
    }

    match run(&opts) {
        Ok(()) => println!("Sample sheet created: {}", opts.output_file.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
