use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use wavedesc::Histogram;

use args::{Cli, Command, TracePair};
use capture::{load_descriptor, load_trace};
use events::delta_t;

mod args;
mod capture;
mod events;
mod output;
mod pool;
#[cfg(test)]
mod test_utils;

fn logging_setup() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() -> Result<()> {
    logging_setup();

    match Cli::parse().command {
        Command::Decode {
            preamble,
            data,
            output: path,
        } => {
            let trace = load_trace(&TracePair { preamble, data })?;
            match path {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Creating {}", path.display()))?;
                    let mut out = BufWriter::new(file);
                    output::write_waveform(&mut out, &trace.waveform)?;
                    out.flush()?;
                    info!("Wrote {} samples to {}", trace.waveform.len(), path.display());
                }
                None => {
                    let mut out = io::stdout().lock();
                    output::write_waveform(&mut out, &trace.waveform)?;
                }
            }
        }
        Command::Info { preamble } => {
            let descriptor = load_descriptor(&preamble)?;
            output::write_descriptor(&mut io::stdout().lock(), &descriptor)?;
        }
        Command::DeltaT { threshold, files } => {
            let events = args::events(&files)?;
            let mut out = io::stdout().lock();
            let mut measured = 0;
            for (start, stop) in &events {
                let result = load_trace(start).and_then(|start_trace| {
                    let stop_trace = load_trace(stop)?;
                    let dt = delta_t(&start_trace.waveform, &stop_trace.waveform, threshold)?;
                    Ok((dt, start_trace.descriptor.trigger_time))
                });
                match result {
                    Ok((dt, trigger_time)) => {
                        writeln!(out, "{dt},{trigger_time}")?;
                        measured += 1;
                    }
                    Err(e) => warn!("Skipping event {start}: {e:#}"),
                }
            }
            info!("Measured {measured} of {} events", events.len());
        }
        Command::Minima { bins, files } => {
            let pairs = args::pairs(&files)?;
            let workers = pool::default_workers();
            info!("Decoding {} traces on {workers} threads", pairs.len());

            let mut minima = Vec::with_capacity(pairs.len());
            for (pair, result) in pairs.iter().zip(pool::decode_all(&pairs, workers)) {
                match result {
                    Ok(trace) => match trace.waveform.min_voltage() {
                        Some(min) => minima.push(min),
                        None => warn!("{pair} has no samples"),
                    },
                    Err(e) => warn!("Skipping {pair}: {e:#}"),
                }
            }
            output::write_histogram(&mut io::stdout().lock(), &Histogram::new(&minima, bins))?;
        }
        Command::Merge {
            output: path,
            inputs,
        } => {
            let bytes = output::merge_files(&path, &inputs)?;
            info!(
                "Merged {} files ({bytes} bytes) into {}",
                inputs.len(),
                path.display()
            );
        }
    }
    Ok(())
}
