//! The binary sample block: `#<d><d digits of count><payload>`.

use byteorder::{ByteOrder, LittleEndian};

use crate::{descriptor::SampleEncoding, error::DecodeError};

/// How far into the data buffer we look for the `#` marker. Instruments put a
/// short response header (e.g. `C1:WF DAT2,`) in front of it.
pub const SAMPLE_BLOCK_SEARCH_WINDOW: usize = 20;

pub const SAMPLE_BLOCK_MARKER: u8 = b'#';

/// Raw ADC counts, widened to i16 whatever their width on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleBlock {
    pub encoding: SampleEncoding,
    pub samples: Vec<i16>,
}

impl SampleBlock {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Cut the block down to the `declared` samples the descriptor promises.
    /// A block holding fewer than that is truncated, not just short.
    pub fn take_declared(mut self, declared: u32) -> Result<Self, DecodeError> {
        let declared = declared as usize;
        let width = self.encoding.width();
        if declared > self.samples.len() {
            return Err(DecodeError::TruncatedSampleBlock {
                declared,
                width,
                available: self.samples.len() * width,
            });
        }
        self.samples.truncate(declared);
        Ok(self)
    }
}

/// Where the payload starts and how many samples it claims to hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub payload_offset: usize,
    pub declared_count: usize,
}

/// Find the `#` marker and decode the length header that follows it.
pub fn locate_sample_block(data: &[u8]) -> Result<BlockHeader, DecodeError> {
    let window = &data[..data.len().min(SAMPLE_BLOCK_SEARCH_WINDOW)];
    let marker = window
        .iter()
        .position(|b| *b == SAMPLE_BLOCK_MARKER)
        .ok_or(DecodeError::SampleBlockMarkerNotFound {
            window: SAMPLE_BLOCK_SEARCH_WINDOW,
        })?;

    // One digit saying how many digits of count follow. `#0` (indefinite
    // length) has no count so we can't use it.
    let num_digits_offset = marker + 1;
    let num_digits = match data.get(num_digits_offset) {
        Some(b @ b'1'..=b'9') => (b - b'0') as usize,
        found => {
            return Err(DecodeError::InvalidDigitCount {
                offset: num_digits_offset,
                found: found.copied(),
            })
        }
    };

    let mut declared_count: usize = 0;
    for offset in num_digits_offset + 1..num_digits_offset + 1 + num_digits {
        match data.get(offset) {
            Some(b @ b'0'..=b'9') => {
                declared_count = declared_count * 10 + (b - b'0') as usize;
            }
            found => {
                return Err(DecodeError::InvalidDigitCount {
                    offset,
                    found: found.copied(),
                })
            }
        }
    }

    Ok(BlockHeader {
        payload_offset: num_digits_offset + 1 + num_digits,
        declared_count,
    })
}

/// Decode the sample block, reading 16-bit samples little endian.
pub fn parse_samples(data: &[u8], encoding: SampleEncoding) -> Result<SampleBlock, DecodeError> {
    parse_samples_as::<LittleEndian>(data, encoding)
}

/// Decode the sample block, reading 16-bit samples in the byte order `BO`.
pub fn parse_samples_as<BO: ByteOrder>(
    data: &[u8],
    encoding: SampleEncoding,
) -> Result<SampleBlock, DecodeError> {
    let header = locate_sample_block(data)?;

    let width = encoding.width();
    let payload = &data[header.payload_offset.min(data.len())..];

    // Anything after the last sample (usually "\n\n") is ignored.
    let needed = header
        .declared_count
        .checked_mul(width)
        .filter(|needed| *needed <= payload.len())
        .ok_or(DecodeError::TruncatedSampleBlock {
            declared: header.declared_count,
            width,
            available: payload.len(),
        })?;
    let payload = &payload[..needed];

    let samples = match encoding {
        SampleEncoding::Bytes1 => payload.iter().map(|b| *b as i8 as i16).collect(),
        SampleEncoding::Bytes2 => payload.chunks_exact(2).map(BO::read_i16).collect(),
    };

    Ok(SampleBlock {
        encoding,
        samples,
    })
}
