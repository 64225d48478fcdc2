//! Text output: waveform dumps, descriptor summaries, histograms and merged
//! data files.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use wavedesc::{Histogram, TraceDescriptor, Waveform};

/// One `time,voltage` line per sample.
pub fn write_waveform(out: &mut impl Write, wave: &Waveform) -> io::Result<()> {
    for (time, voltage) in wave.iter() {
        writeln!(out, "{time},{voltage}")?;
    }
    Ok(())
}

pub fn write_descriptor(out: &mut impl Write, desc: &TraceDescriptor) -> io::Result<()> {
    writeln!(out, "Template:            {}", desc.template_name)?;
    writeln!(
        out,
        "Instrument:          {} #{}",
        desc.instrument_name, desc.instrument_number
    )?;
    writeln!(out, "Source:              {}", desc.wave_source)?;
    if !desc.trace_label.is_empty() {
        writeln!(out, "Label:               {}", desc.trace_label)?;
    }
    writeln!(out, "Trigger time:        {}", desc.trigger_time)?;
    writeln!(
        out,
        "Encoding:            {:?} ({} byte samples)",
        desc.sample_encoding,
        desc.sample_encoding.width()
    )?;
    writeln!(
        out,
        "Byte order:          {}",
        match desc.byte_order() {
            Some(order) => format!("{order:?}"),
            None => format!("unknown ({})", desc.comm_order),
        }
    )?;
    writeln!(out, "Samples:             {}", desc.declared_sample_count)?;
    writeln!(out, "Timebase:            {}", desc.time_base.label)?;
    writeln!(
        out,
        "Horizontal:          {} {}/sample, offset {} {}",
        desc.horizontal_interval, desc.horizontal_unit, desc.horizontal_offset, desc.horizontal_unit
    )?;
    writeln!(
        out,
        "Vertical:            gain {} {}/count, offset {} {}",
        desc.vertical_gain, desc.vertical_unit, desc.vertical_offset, desc.vertical_unit
    )?;
    if let Some(label) = desc.fixed_vertical_gain_label() {
        writeln!(out, "Fixed vertical gain: {label}")?;
    }
    writeln!(out, "Coupling:            {}", desc.vertical_coupling.label())?;
    writeln!(
        out,
        "Probe attenuation:   {}{}",
        desc.probe_attenuation.value(),
        match desc.probe_attenuation {
            wavedesc::ProbeAttenuation::Tabulated(_) => "",
            wavedesc::ProbeAttenuation::Overridden(_) => " (custom)",
        }
    )?;
    writeln!(
        out,
        "Bandwidth limit:     {}",
        if desc.bandwidth_limit { "on" } else { "off" }
    )?;
    if let Some(record_type) = desc.record_type() {
        writeln!(out, "Record type:         {record_type:?}")?;
    }
    match desc.processing_done() {
        Some(processing) => writeln!(out, "Processing done:     {processing:?}")?,
        None => writeln!(out, "Processing done:     unknown ({})", desc.processing_done)?,
    }
    Ok(())
}

const HISTOGRAM_BAR_WIDTH: usize = 50;

pub fn write_histogram(out: &mut impl Write, histogram: &Histogram) -> io::Result<()> {
    let max = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    for (lower, upper, count) in histogram.bins() {
        let bar = "#".repeat(count * HISTOGRAM_BAR_WIDTH / max);
        writeln!(out, "{lower:>12.6} {upper:>12.6} {count:>6} {bar}")?;
    }
    writeln!(out, "{} values", histogram.total())?;
    Ok(())
}

/// Concatenate `inputs` into `output`, returning the number of bytes written.
pub fn merge_files(output: &Path, inputs: &[PathBuf]) -> Result<u64> {
    if inputs.iter().any(|input| input == output) {
        bail!("Output {} is also an input", output.display());
    }

    let file =
        File::create(output).with_context(|| format!("Creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let mut total = 0;
    for input in inputs {
        let mut reader =
            File::open(input).with_context(|| format!("Opening {}", input.display()))?;
        total += io::copy(&mut reader, &mut writer)
            .with_context(|| format!("Copying {}", input.display()))?;
    }
    writer.flush()?;
    Ok(total)
}
