use clap::{Args, Parser, Subcommand};
use log::warn;

use std::path::PathBuf;

use sample_manifest::manifest::{
    discover_tn, generate_nested_yaml, generate_samples_yaml, generate_samples_yaml_from_tsv,
    generate_tumor_normal_yaml, timestamped_name, validate_flat_file, validate_tn_file,
    ConditionPatterns, OutputTarget, StripMode,
};
use sample_manifest::{ManifestError, Result};

/// Write sample manifests as YAML and check existing ones.
#[derive(Parser)]
#[clap(version = "0.1.0")]
struct Opts {
    /// More log output (-v info, -vv debug)
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: usize,

    /// Silence all log output
    #[clap(short, long, global = true)]
    quiet: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Args)]
struct OutputArgs {
    /// Output file name; '.yaml' is appended unless it ends on .yaml/.yml.
    /// Defaults to '<prefix>_YYYYMMDD_HHMMSS'
    #[clap(short, long)]
    output: Option<String>,

    /// Directory the manifest is written to (default: current directory)
    #[clap(long)]
    output_dir: Option<PathBuf>,
}

impl OutputArgs {
    fn target(&self, prefix: &str) -> Result<OutputTarget> {
        let dir = match &self.output_dir {
            Some(d) => d.clone(),
            None => std::env::current_dir().map_err(|e| ManifestError::Io {
                path: PathBuf::from("."),
                source: e,
            })?,
        };
        let name = self
            .output
            .clone()
            .unwrap_or_else(|| timestamped_name(prefix, &chrono::Local::now()));
        Ok(OutputTarget::new(dir, name))
    }
}

#[derive(Subcommand)]
enum Command {
    /// samples: <stem> -> <path> for every file with the extension
    Flat {
        directory: PathBuf,
        extension: String,
        #[clap(flatten)]
        out: OutputArgs,
    },

    /// SAMPLES: patient -> TUMOR/NORMAL -> sample -> path, read from file names
    TumorNormal {
        directory: PathBuf,
        #[clap(long, default_value = "SHAH_H")]
        patient_pattern: String,
        #[clap(long, default_value = "_T")]
        tumor_pattern: String,
        #[clap(long, default_value = "_N")]
        normal_pattern: String,
        #[clap(short, long, default_value = ".sorted.bam")]
        extension: String,
        /// Strip the extension only as a true suffix of the file name
        #[clap(long)]
        suffix_strip: bool,
        #[clap(flatten)]
        out: OutputArgs,
    },

    /// SAMPLES: patient -> condition -> sample -> path, read from folder names
    Nested {
        directory: PathBuf,
        extension: String,
        /// Fallback: first path segment containing this string is the patient
        #[clap(long)]
        patient_pattern: Option<String>,
        /// Condition patterns as NAME=pat1,pat2; can be given multiple times.
        /// Order decides ties. Default: TUMOR=tumor NORMAL=normal
        #[clap(short, long = "condition", multiple_occurrences = true)]
        conditions: Vec<String>,
        #[clap(flatten)]
        out: OutputArgs,
    },

    /// samples: manifest from a two column (sample, path) TSV
    FromTsv {
        tsv: PathBuf,
        #[clap(flatten)]
        out: OutputArgs,
    },

    /// Check a manifest; missing files are reported but do not fail
    Validate {
        manifest: PathBuf,
        /// Expect a SAMPLES: tumor/normal manifest instead of samples:
        #[clap(short, long)]
        tumor_normal: bool,
    },
}

fn parse_conditions(args: &[String]) -> Result<ConditionPatterns> {
    if args.is_empty() {
        return Ok(ConditionPatterns::tumor_normal_upper());
    }
    let mut patterns = ConditionPatterns::new();
    for arg in args {
        let (name, pats) = arg.split_once('=').ok_or_else(|| {
            ManifestError::Config(format!("condition '{arg}' is not NAME=pattern[,pattern]"))
        })?;
        patterns.insert(name.trim(), pats.split(',').map(|p| p.trim().to_string()).collect());
    }
    Ok(patterns)
}

fn run(opts: Opts) -> Result<bool> {
    let written = match opts.command {
        Command::Flat { directory, extension, out } => {
            generate_samples_yaml(&directory, &extension, &out.target("samples")?)?
        }
        Command::TumorNormal {
            directory,
            patient_pattern,
            tumor_pattern,
            normal_pattern,
            extension,
            suffix_strip,
            out,
        } => {
            let patient_bams = discover_tn(
                &directory,
                &patient_pattern,
                &tumor_pattern,
                &normal_pattern,
                &extension,
            )?;
            if patient_bams.is_empty() {
                warn!("No tumor-normal samples found in {}", directory.display());
            }
            let mode = if suffix_strip { StripMode::Suffix } else { StripMode::FirstOccurrence };
            generate_tumor_normal_yaml(
                &patient_bams,
                &extension,
                mode,
                &out.target("tumor_normal_samples")?,
            )?
        }
        Command::Nested {
            directory,
            extension,
            patient_pattern,
            conditions,
            out,
        } => {
            let patterns = parse_conditions(&conditions)?;
            generate_nested_yaml(
                &directory,
                &extension,
                patient_pattern.as_deref(),
                &patterns,
                &out.target("nested_samples")?,
            )?
        }
        Command::FromTsv { tsv, out } => generate_samples_yaml_from_tsv(&tsv, &out.target("samples")?)?,
        Command::Validate { manifest, tumor_normal } => {
            let report = if tumor_normal {
                validate_tn_file(&manifest)
            } else {
                validate_flat_file(&manifest)
            };
            // warnings reach stderr through the validator's log output
            if !report.warnings.is_empty() {
                println!("{} warning(s)", report.warnings.len());
            }
            if report.is_valid() {
                println!("{} is valid", manifest.display());
            } else {
                println!(
                    "{} is not valid: {}",
                    manifest.display(),
                    report.error.as_deref().unwrap_or("unknown reason")
                );
            }
            return Ok(report.is_valid());
        }
    };

    println!("{}", written.display());
    Ok(true)
}

fn main() {
    let opts: Opts = Opts::parse();

    if let Err(e) = stderrlog::new()
        .quiet(opts.quiet)
        .verbosity(opts.verbose + 1)
        .init()
    {
        eprintln!("could not initialise logging: {e}");
    }

    match run(opts) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
