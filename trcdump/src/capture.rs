//! Loading captured preamble/data buffers from disk.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::{info, warn};
use wavedesc::{locate_descriptor, parse_descriptor, Trace, TraceDescriptor};

use crate::args::TracePair;

fn warn_if_untested(descriptor: &TraceDescriptor, source: &dyn std::fmt::Display) {
    if descriptor.byte_order_untested() {
        warn!(
            "{source} has byte order indicator {}; it was decoded little endian, which is untested for this indicator",
            descriptor.comm_order
        );
    }
}

pub fn load_trace(pair: &TracePair) -> Result<Trace> {
    let preamble = fs::read(&pair.preamble)
        .with_context(|| format!("Reading preamble {}", pair.preamble.display()))?;
    let data =
        fs::read(&pair.data).with_context(|| format!("Reading data {}", pair.data.display()))?;

    let trace = Trace::decode(&preamble, &data).with_context(|| format!("Decoding {pair}"))?;

    warn_if_untested(&trace.descriptor, pair);
    info!(
        "Decoded {} samples from {} ({})",
        trace.waveform.len(),
        pair,
        trace.descriptor.wave_source
    );
    Ok(trace)
}

pub fn load_descriptor(path: &Path) -> Result<TraceDescriptor> {
    let preamble =
        fs::read(path).with_context(|| format!("Reading preamble {}", path.display()))?;
    let start = locate_descriptor(&preamble)
        .with_context(|| format!("Locating descriptor in {}", path.display()))?;
    let descriptor = parse_descriptor(&preamble, start)
        .with_context(|| format!("Parsing descriptor in {}", path.display()))?;
    warn_if_untested(&descriptor, &path.display());
    Ok(descriptor)
}
