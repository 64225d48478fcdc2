use thiserror::Error;

/// Everything that can go wrong while decoding a trace. All of these are
/// fatal to the decode call; nothing is recovered or partially returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("WAVEDESC marker not found in the first {window} bytes of the preamble")]
    DescriptorNotFound { window: usize },

    #[error("descriptor field {field} at offset {offset} is malformed: {detail}")]
    MalformedField {
        field: &'static str,
        /// Offset relative to the start of the descriptor.
        offset: usize,
        detail: String,
    },

    #[error("{table} index {index} is out of range (table has {len} entries)")]
    LookupIndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },

    #[error("'#' sample block marker not found in the first {window} bytes of the data")]
    SampleBlockMarkerNotFound { window: usize },

    #[error("expected an ASCII digit at data offset {offset}, found {found:?}")]
    InvalidDigitCount {
        offset: usize,
        /// The offending byte, or None if the buffer ended.
        found: Option<u8>,
    },

    #[error("{declared} samples of {width} bytes declared but the sample block holds only {available} bytes")]
    TruncatedSampleBlock {
        declared: usize,
        width: usize,
        available: usize,
    },
}

impl DecodeError {
    pub(crate) fn malformed(field: &'static str, offset: usize, detail: impl Into<String>) -> Self {
        Self::MalformedField {
            field,
            offset,
            detail: detail.into(),
        }
    }
}
