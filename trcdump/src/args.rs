use std::{fmt, path::PathBuf};

use anyhow::{bail, Result};
use clap::{builder::RangedU64ValueParser, Parser, Subcommand};
use wavedesc::{histogram::DEFAULT_BINS, waveform::DEFAULT_THRESHOLD};

/// Decode and analyse oscilloscope traces saved as raw preamble and waveform
/// data responses. Set RUST_LOG to change the log level.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Command {
    /// Print one trace as `time voltage` lines.
    Decode {
        preamble: PathBuf,
        data: PathBuf,
        /// Write here instead of stdout.
        output: Option<PathBuf>,
    },
    /// Print the decoded descriptor of a preamble.
    Info { preamble: PathBuf },
    /// Time from the start to the stop trace crossing the threshold, per event.
    #[command(name = "deltat")]
    DeltaT {
        /// Level the traces must fall below, in volts.
        #[arg(long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
        threshold: f64,
        /// Start preamble, start data, stop preamble, stop data; repeated.
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
    },
    /// Histogram of the minimum voltage of each trace.
    Minima {
        #[arg(long, default_value_t = DEFAULT_BINS,
              value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        bins: usize,
        /// Preamble and data file of each trace.
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
    },
    /// Concatenate text outputs.
    Merge {
        output: PathBuf,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

/// The two captured buffers that make up one trace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TracePair {
    pub preamble: PathBuf,
    pub data: PathBuf,
}

impl fmt::Display for TracePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.preamble.display(), self.data.display())
    }
}

/// Group preamble and data paths into traces.
pub fn pairs(paths: &[PathBuf]) -> Result<Vec<TracePair>> {
    if paths.is_empty() || paths.len() % 2 != 0 {
        bail!("Expected preamble and data files in pairs, got {} paths", paths.len());
    }
    Ok(paths
        .chunks_exact(2)
        .map(|p| TracePair {
            preamble: p[0].clone(),
            data: p[1].clone(),
        })
        .collect())
}

/// Group paths into (start, stop) traces, four files per event.
pub fn events(paths: &[PathBuf]) -> Result<Vec<(TracePair, TracePair)>> {
    if paths.is_empty() || paths.len() % 4 != 0 {
        bail!(
            "deltat needs groups of 4 files (start preamble, start data, stop preamble, stop data), got {} paths",
            paths.len()
        );
    }
    let traces = pairs(paths)?;
    Ok(traces
        .chunks_exact(2)
        .map(|t| (t[0].clone(), t[1].clone()))
        .collect())
}
