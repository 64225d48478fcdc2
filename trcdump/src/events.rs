//! Start/stop timing between two channels.

use anyhow::{Context, Result};
use wavedesc::Waveform;

/// Time from the start pulse to the stop pulse in microseconds. Each pulse
/// is the first sample below `threshold`.
pub fn delta_t(start: &Waveform, stop: &Waveform, threshold: f64) -> Result<f64> {
    let t_start = start
        .first_crossing_below(threshold)
        .with_context(|| format!("Start trace never goes below {threshold} V"))?;
    let t_stop = stop
        .first_crossing_below(threshold)
        .with_context(|| format!("Stop trace never goes below {threshold} V"))?;
    Ok((t_stop - t_start) * 1e6)
}
