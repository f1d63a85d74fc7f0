/// bandpass: design a Butterworth band-pass filter or zero-phase filter one
/// channel of samples with it.
///
///   bandpass design [--low 1 --high 30 --fs 100 --order 5]
///       → coefficients + spec as JSON on stdout
///
///   bandpass apply [--input samples.txt] [--output filtered.txt] [spec flags]
///       → one filtered sample per line; reads stdin / writes stdout by default
///
/// Samples are plain whitespace- or comma-separated numbers.
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;

use eeg_bandpass::{apply_zero_phase, design, dominant_frequency, gain_db, FilterSpec};

#[derive(Parser, Debug)]
#[command(name = "bandpass", about = "Zero-phase Butterworth band-pass filter")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the designed coefficients as JSON.
    Design(SpecArgs),
    /// Filter a single channel of samples.
    Apply {
        #[command(flatten)]
        spec: SpecArgs,

        /// Input file (default: stdin).
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SpecArgs {
    /// Lower band edge (Hz).
    #[arg(long, default_value_t = 1.0)]
    low: f64,

    /// Upper band edge (Hz).
    #[arg(long, default_value_t = 30.0)]
    high: f64,

    /// Sampling rate (Hz).
    #[arg(long, default_value_t = 100.0)]
    fs: f64,

    /// Butterworth prototype order.
    #[arg(long, default_value_t = 5)]
    order: usize,
}

impl SpecArgs {
    fn spec(&self) -> FilterSpec {
        FilterSpec::new(self.low, self.high, self.fs, self.order)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Design(args) => run_design(&args.spec()),
        Command::Apply { spec, input, output } => run_apply(&spec.spec(), input, output),
    }
}

fn run_design(spec: &FilterSpec) -> Result<()> {
    let coeffs = design(spec).context("designing filter")?;
    let report = serde_json::json!({
        "spec": spec,
        "coefficients": coeffs,
        "gain_db": {
            "low_cutoff": gain_db(&coeffs, spec.low_cutoff_hz, spec.sample_rate_hz),
            "high_cutoff": gain_db(&coeffs, spec.high_cutoff_hz, spec.sample_rate_hz),
        },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_apply(spec: &FilterSpec, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let text = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s).context("reading stdin")?;
            s
        }
    };
    let samples = parse_samples(&text)?;
    log::info!("loaded {} samples", samples.len());

    let coeffs = design(spec).context("designing filter")?;
    let filtered = apply_zero_phase(&coeffs, &samples).context("filtering")?;

    if let Some(f) = dominant_frequency(&filtered, spec.sample_rate_hz) {
        log::info!("dominant frequency after filtering: {f:.3} Hz");
    }

    let mut out: Box<dyn Write> = match &output {
        Some(path) => Box::new(std::io::BufWriter::new(
            std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(std::io::BufWriter::new(std::io::stdout().lock())),
    };
    for v in &filtered {
        writeln!(out, "{v}")?;
    }
    out.flush()?;

    if let Some(path) = &output {
        eprintln!("Written → {}", path.display());
    }
    Ok(())
}

fn parse_samples(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .enumerate()
        .map(|(i, tok)| {
            tok.parse::<f64>()
                .with_context(|| format!("sample {i}: cannot parse {tok:?} as a number"))
        })
        .collect()
}
