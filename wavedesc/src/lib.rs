//! LeCroy style `WAVEDESC` oscilloscope trace decoding.
//!
//! An instrument answers a preamble query with a fixed layout descriptor
//! record (starting with the ASCII name `WAVEDESC`) and a data query with a
//! `#<d><count><samples>` block of signed 8 or 16 bit ADC counts. `decode`
//! turns those two buffers into time (seconds) and voltage (volts) arrays.
//!
//! # Format
//!
//! The descriptor layout is the `LECROY_2_3` template. Only the first 346
//! bytes (up to and including `WAVE_SOURCE`) are decoded; see
//! `descriptor::offset` for the field positions.
//!
//! The descriptor's `WAVE_ARRAY_COUNT` is the length of the result. A data
//! block holding fewer samples than that is an error; any extra samples in
//! the block are dropped.
//!
//! The descriptor carries a byte order flag (`COMM_ORDER`) but nothing here
//! acts on it. `decode` reads everything little endian, `decode_as` lets the
//! caller pick. Traces flagged high-byte-first have not been tested.

pub mod descriptor;
pub mod error;
mod field;
pub mod histogram;
pub mod samples;
#[cfg(any(test, feature = "synth"))]
pub mod synth;
pub mod tables;
pub mod waveform;

use byteorder::{ByteOrder, LittleEndian};

pub use descriptor::{
    locate_descriptor, parse_descriptor, parse_descriptor_as, Coupling, ProbeAttenuation,
    SampleEncoding, TraceDescriptor, WaveSource,
};
pub use error::DecodeError;
pub use histogram::Histogram;
pub use samples::{parse_samples, parse_samples_as, SampleBlock};
pub use waveform::{scale, SampleIndex, Waveform};

/// Decode a preamble and data buffer pair into physical units.
pub fn decode(preamble: &[u8], data: &[u8]) -> Result<Waveform, DecodeError> {
    decode_as::<LittleEndian>(preamble, data)
}

/// Like `decode`, but read every multi-byte number in the byte order `BO`.
pub fn decode_as<BO: ByteOrder>(preamble: &[u8], data: &[u8]) -> Result<Waveform, DecodeError> {
    Ok(Trace::decode_as::<BO>(preamble, data)?.waveform)
}

/// A decoded trace together with the descriptor it was scaled with.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub descriptor: TraceDescriptor,
    pub waveform: Waveform,
}

impl Trace {
    pub fn decode(preamble: &[u8], data: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_as::<LittleEndian>(preamble, data)
    }

    pub fn decode_as<BO: ByteOrder>(preamble: &[u8], data: &[u8]) -> Result<Self, DecodeError> {
        let start = locate_descriptor(preamble)?;
        let descriptor = parse_descriptor_as::<BO>(preamble, start)?;
        let samples = parse_samples_as::<BO>(data, descriptor.sample_encoding)?
            .take_declared(descriptor.declared_sample_count)?;
        let waveform = scale(&samples, &descriptor);
        Ok(Self {
            descriptor,
            waveform,
        })
    }
}
