//! Synthetic preamble and data buffers for tests. Other crates in the
//! workspace get this through the `synth` feature.

use byteorder::{ByteOrder, LittleEndian};

use crate::descriptor::{offset, DESCRIPTOR_LEN};

/// A preamble as an instrument would return it: a short response header
/// followed by a little endian descriptor. Starts out as a valid 8-bit
/// trace from channel 1 at 10 ns/div, declaring no samples; set the count
/// with `sample_count` to match the data block.
pub struct Preamble {
    desc: Vec<u8>,
}

impl Preamble {
    pub const PREFIX: &'static [u8] = b"C1:WF DESC,#9000000346";

    pub fn new() -> Self {
        Self {
            desc: vec![0; DESCRIPTOR_LEN],
        }
        .text_at(offset::DESCRIPTOR_NAME, "WAVEDESC")
        .text_at(offset::TEMPLATE_NAME, "LECROY_2_3")
        .u16_at(offset::COMM_TYPE, 0)
        .u16_at(offset::COMM_ORDER, 1)
        .u32_at(offset::WAVE_DESCRIPTOR, DESCRIPTOR_LEN as u32)
        .text_at(offset::INSTRUMENT_NAME, "LECROYWR")
        .f32_at(offset::VERTICAL_GAIN, 0.1)
        .f32_at(offset::HORIZ_INTERVAL, 1e-9)
        .text_at(offset::VERTUNIT, "V")
        .text_at(offset::HORUNIT, "S")
        .f64_at(offset::TRIGGER_TIME, 9.25)
        .u8_at(offset::TRIGGER_TIME + 8, 8)
        .u8_at(offset::TRIGGER_TIME + 9, 14)
        .u8_at(offset::TRIGGER_TIME + 10, 17)
        .u8_at(offset::TRIGGER_TIME + 11, 5)
        .u16_at(offset::TRIGGER_TIME + 12, 2023)
        .u16_at(offset::TIMEBASE, 5)
        .u16_at(offset::VERT_COUPLING, 0)
        .u32_at(offset::PROBE_ATT, 3)
        .u16_at(offset::WAVE_SOURCE, 0)
    }

    pub fn u8_at(mut self, at: usize, value: u8) -> Self {
        self.desc[at] = value;
        self
    }

    pub fn u16_at(mut self, at: usize, value: u16) -> Self {
        LittleEndian::write_u16(&mut self.desc[at..at + 2], value);
        self
    }

    pub fn u32_at(mut self, at: usize, value: u32) -> Self {
        LittleEndian::write_u32(&mut self.desc[at..at + 4], value);
        self
    }

    pub fn f32_at(mut self, at: usize, value: f32) -> Self {
        LittleEndian::write_f32(&mut self.desc[at..at + 4], value);
        self
    }

    pub fn f64_at(mut self, at: usize, value: f64) -> Self {
        LittleEndian::write_f64(&mut self.desc[at..at + 8], value);
        self
    }

    pub fn text_at(mut self, at: usize, value: &str) -> Self {
        self.desc[at..at + value.len()].copy_from_slice(value.as_bytes());
        self
    }

    /// Set `WAVE_ARRAY_COUNT`.
    pub fn sample_count(self, count: u32) -> Self {
        self.u32_at(offset::WAVE_ARRAY_COUNT, count)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Self::PREFIX.to_vec();
        out.extend_from_slice(&self.desc);
        out
    }
}

impl Default for Preamble {
    fn default() -> Self {
        Self::new()
    }
}

/// A data response with the sample count written as `count` (so the caller
/// controls the digits, including invalid ones).
pub fn data_block(count: &str, payload: &[u8]) -> Vec<u8> {
    let mut out = b"C1:WF DAT2,#".to_vec();
    out.extend_from_slice(count.len().to_string().as_bytes());
    out.extend_from_slice(count.as_bytes());
    out.extend_from_slice(payload);
    out
}
