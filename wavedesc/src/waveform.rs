use derive_more::{From, Into};
use typed_index_collections::TiVec;

use crate::{descriptor::TraceDescriptor, samples::SampleBlock};

/// ADC codes per vertical division. This is fixed for the instrument family,
/// not stored per trace.
pub const QUANTIZATION_DIVISOR: f64 = 30.0;

/// Usual trigger level for the negative going detector pulses, in volts.
pub const DEFAULT_THRESHOLD: f64 = -0.2;

#[derive(From, Into, Debug, Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SampleIndex(pub usize);

/// A trace in physical units. `time` and `voltage` always have the same
/// length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Waveform {
    /// Seconds.
    pub time: TiVec<SampleIndex, f64>,
    /// Volts.
    pub voltage: TiVec<SampleIndex, f64>,
}

/// Convert raw samples to volts and seconds using the descriptor's gain and
/// offsets.
pub fn scale(samples: &SampleBlock, descriptor: &TraceDescriptor) -> Waveform {
    let gain = f64::from(descriptor.vertical_gain);
    let offset = f64::from(descriptor.vertical_offset);
    let interval = f64::from(descriptor.horizontal_interval);
    let delay = descriptor.horizontal_offset;

    let voltage = samples
        .samples
        .iter()
        .map(|&raw| f64::from(raw) * gain / QUANTIZATION_DIVISOR - offset)
        .collect();

    let time = (0..samples.len())
        .map(|i| i as f64 * interval + delay)
        .collect();

    Waveform { time, voltage }
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }

    /// `(time, voltage)` pairs in sample order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time
            .iter()
            .copied()
            .zip(self.voltage.iter().copied())
    }

    pub fn min_voltage(&self) -> Option<f64> {
        self.voltage.iter().copied().reduce(f64::min)
    }

    pub fn max_voltage(&self) -> Option<f64> {
        self.voltage.iter().copied().reduce(f64::max)
    }

    /// Time of the first sample strictly below `threshold`. Pulses from the
    /// photomultipliers are negative going so this is the trigger edge.
    pub fn first_crossing_below(&self, threshold: f64) -> Option<f64> {
        self.voltage
            .iter_enumerated()
            .find(|(_, v)| **v < threshold)
            .map(|(i, _)| self.time[i])
    }

    /// Start and end time, if there are any samples.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((*self.time.first()?, *self.time.last()?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        descriptor::{offset as off, parse_descriptor, SampleEncoding},
        synth::Preamble,
    };

    fn descriptor(gain: f32, offset: f32, interval: f32, delay: f64) -> TraceDescriptor {
        let preamble = Preamble::new()
            .f32_at(off::VERTICAL_GAIN, gain)
            .f32_at(off::VERTICAL_OFFSET, offset)
            .f32_at(off::HORIZ_INTERVAL, interval)
            .f64_at(off::HORIZ_OFFSET, delay)
            .build();
        parse_descriptor(&preamble, Preamble::PREFIX.len()).unwrap()
    }

    fn block(samples: Vec<i16>) -> SampleBlock {
        SampleBlock {
            encoding: SampleEncoding::Bytes2,
            samples,
        }
    }

    #[test]
    fn test_scale_formulas() {
        let desc = descriptor(0.5, 0.25, 4e-9, -1e-8);
        let wave = scale(&block(vec![30, -60, 0, 1]), &desc);

        assert_eq!(wave.len(), 4);
        assert_eq!(wave.time.len(), wave.voltage.len());
        assert_eq!(wave.voltage.raw, vec![0.25, -1.25, -0.25, 0.5 / 30.0 - 0.25]);

        let interval = f64::from(4e-9f32);
        assert_eq!(
            wave.time.raw,
            vec![-1e-8, interval - 1e-8, 2.0 * interval - 1e-8, 3.0 * interval - 1e-8]
        );
    }

    #[test]
    fn test_scale_empty() {
        let wave = scale(&block(vec![]), &descriptor(1.0, 0.0, 1.0, 0.0));
        assert!(wave.is_empty());
        assert_eq!(wave.min_voltage(), None);
        assert_eq!(wave.time_span(), None);
        assert_eq!(wave.first_crossing_below(0.0), None);
    }

    #[test]
    fn test_analysis() {
        let desc = descriptor(3.0, 0.0, 1.0, 10.0);
        // Volts: 0.1, -0.1, -0.3, -0.5, 0.0
        let wave = scale(&block(vec![1, -1, -3, -5, 0]), &desc);

        assert_eq!(wave.min_voltage(), Some(-5.0 * 3.0 / 30.0));
        assert_eq!(wave.max_voltage(), Some(3.0 / 30.0));
        assert_eq!(wave.first_crossing_below(-0.2), Some(12.0));
        assert_eq!(wave.first_crossing_below(-1.0), None);
        assert_eq!(wave.time_span(), Some((10.0, 14.0)));

        let pairs: Vec<(f64, f64)> = wave.iter().take(2).collect();
        assert_eq!(pairs, vec![(10.0, 3.0 / 30.0), (11.0, -3.0 / 30.0)]);
    }
}
