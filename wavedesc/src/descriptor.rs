use std::{fmt, io::Cursor};

use byteorder::{ByteOrder, LittleEndian};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::{
    error::DecodeError,
    field::ReadField,
    tables::{
        lookup, COUPLING_LABELS, FIXED_VERT_GAIN_LABELS, PROBE_ATTENUATION, TIMEBASE_LABELS,
        TIMEBASE_SECONDS, UNKNOWN_SOURCE_LABEL, WAVE_SOURCES,
    },
};

/// The descriptor record starts with this name.
pub const DESCRIPTOR_MARKER: &[u8; 8] = b"WAVEDESC";

/// How far into the preamble we look for `DESCRIPTOR_MARKER`. Instruments
/// put a short response header (e.g. `C1:WF DESC,#9000000346`) in front of it.
pub const DESCRIPTOR_SEARCH_WINDOW: usize = 50;

/// Length of the fixed part of the descriptor that we decode.
pub const DESCRIPTOR_LEN: usize = 346;

/// Byte offsets of the descriptor fields, relative to the marker.
pub mod offset {
    pub const DESCRIPTOR_NAME: usize = 0;
    pub const TEMPLATE_NAME: usize = 16;
    pub const COMM_TYPE: usize = 32;
    pub const COMM_ORDER: usize = 34;
    pub const WAVE_DESCRIPTOR: usize = 36;
    pub const USER_TEXT: usize = 40;
    pub const WAVE_ARRAY_1: usize = 60;
    pub const INSTRUMENT_NAME: usize = 76;
    pub const INSTRUMENT_NUMBER: usize = 92;
    pub const TRACE_LABEL: usize = 96;
    pub const WAVE_ARRAY_COUNT: usize = 116;
    pub const FIRST_VALID_PNT: usize = 124;
    pub const LAST_VALID_PNT: usize = 128;
    pub const FIRST_POINT: usize = 132;
    pub const SPARSING_FACTOR: usize = 136;
    pub const SEGMENT_INDEX: usize = 140;
    pub const SWEEPS_PER_ACQ: usize = 148;
    pub const VERTICAL_GAIN: usize = 156;
    pub const VERTICAL_OFFSET: usize = 160;
    pub const MAX_VALUE: usize = 164;
    pub const MIN_VALUE: usize = 168;
    pub const NOMINAL_BITS: usize = 172;
    pub const HORIZ_INTERVAL: usize = 176;
    pub const HORIZ_OFFSET: usize = 180;
    pub const PIXEL_OFFSET: usize = 188;
    pub const VERTUNIT: usize = 196;
    pub const HORUNIT: usize = 244;
    pub const HORIZ_UNCERTAINTY: usize = 292;
    pub const TRIGGER_TIME: usize = 296;
    pub const ACQ_DURATION: usize = 312;
    pub const RECORD_TYPE: usize = 316;
    pub const PROCESSING_DONE: usize = 318;
    pub const RIS_SWEEPS: usize = 322;
    pub const TIMEBASE: usize = 324;
    pub const VERT_COUPLING: usize = 326;
    pub const PROBE_ATT: usize = 328;
    pub const FIXED_VERT_GAIN: usize = 332;
    pub const BANDWIDTH_LIMIT: usize = 334;
    pub const VERTICAL_VERNIER: usize = 336;
    pub const ACQ_VERT_OFFSET: usize = 340;
    pub const WAVE_SOURCE: usize = 344;
}

/// Width of each sample in the data block (the `COMM_TYPE` field).
#[derive(FromPrimitive, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SampleEncoding {
    Bytes1 = 0,
    Bytes2 = 1,
}

impl SampleEncoding {
    pub fn width(self) -> usize {
        match self {
            SampleEncoding::Bytes1 => 1,
            SampleEncoding::Bytes2 => 2,
        }
    }
}

/// The byte order indicator (the `COMM_ORDER` field).
///
/// Decoding does not act on this. Everything is read in the byte order
/// chosen by the caller (little endian unless they use one of the `_as`
/// functions), and traces that claim anything else are untested.
#[derive(FromPrimitive, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CommOrder {
    HiFirst = 0,
    LoFirst = 1,
}

#[derive(FromPrimitive, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Coupling {
    Dc = 0,
    Ac = 1,
    Gnd = 2,
}

impl Coupling {
    pub fn label(self) -> &'static str {
        COUPLING_LABELS[self as usize]
    }
}

#[derive(FromPrimitive, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RecordType {
    SingleSweep = 0,
    Interleaved = 1,
    Histogram = 2,
    Graph = 3,
    FilterCoefficient = 4,
    Complex = 5,
    Extrema = 6,
    SequenceObsolete = 7,
    CenteredRis = 8,
    PeakDetect = 9,
}

#[derive(FromPrimitive, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ProcessingDone {
    NoProcessing = 0,
    FirFilter = 1,
    Interpolated = 2,
    Sparsed = 3,
    Autoscaled = 4,
    NoResult = 5,
    Rolling = 6,
    Cumulative = 7,
}

/// A resolved `TIMEBASE` setting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeBase {
    pub index: u16,
    pub label: &'static str,
    pub seconds_per_div: f64,
}

impl TimeBase {
    pub fn from_index(index: u16) -> Result<Self, DecodeError> {
        Ok(Self {
            index,
            label: lookup("timebase", &TIMEBASE_LABELS, index as usize)?,
            seconds_per_div: lookup("timebase", &TIMEBASE_SECONDS, index as usize)?,
        })
    }
}

/// Probe attenuation, either one of the standard values or a custom one
/// stored in the descriptor as a float.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ProbeAttenuation {
    Tabulated(f32),
    Overridden(f32),
}

/// Highest `PROBE_ATT` index that refers to `PROBE_ATTENUATION`.
pub const PROBE_ATTENUATION_MAX_INDEX: u32 = 15;

impl ProbeAttenuation {
    /// Resolve the 4 bytes of the `PROBE_ATT` field. Read as an integer they
    /// are an index into the standard table; if that index is past the end of
    /// the table the same bytes are the attenuation itself as a float.
    pub fn resolve<BO: ByteOrder>(raw: [u8; 4]) -> Result<Self, DecodeError> {
        let index = BO::read_u32(&raw);
        if index <= PROBE_ATTENUATION_MAX_INDEX {
            Ok(ProbeAttenuation::Tabulated(lookup(
                "probe attenuation",
                &PROBE_ATTENUATION,
                index as usize,
            )?))
        } else {
            Ok(ProbeAttenuation::Overridden(BO::read_f32(&raw)))
        }
    }

    pub fn value(self) -> f32 {
        match self {
            ProbeAttenuation::Tabulated(x) | ProbeAttenuation::Overridden(x) => x,
        }
    }
}

/// The channel a trace came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WaveSource {
    pub id: u16,
    pub label: &'static str,
}

impl WaveSource {
    /// Ids that aren't in the table resolve to "UNKNOWN" rather than failing.
    pub fn from_id(id: u16) -> Self {
        let label = WAVE_SOURCES
            .iter()
            .find(|(source_id, _)| *source_id == id)
            .map(|(_, label)| *label)
            .unwrap_or(UNKNOWN_SOURCE_LABEL);
        Self { id, label }
    }

    pub fn is_known(&self) -> bool {
        self.label != UNKNOWN_SOURCE_LABEL
    }
}

impl fmt::Display for WaveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Trigger timestamp as stored in the descriptor.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TriggerTime {
    pub seconds: f64,
    pub minutes: u8,
    pub hours: u8,
    pub days: u8,
    pub months: u8,
    pub year: i16,
}

impl fmt::Display for TriggerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:06.3}",
            self.year, self.months, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// The decoded `WAVEDESC` record.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceDescriptor {
    pub descriptor_name: String,
    pub template_name: String,
    pub sample_encoding: SampleEncoding,
    /// Raw byte order indicator; see `byte_order()`.
    pub comm_order: u16,
    pub wave_descriptor_length: u32,
    pub user_text_length: u32,
    /// Length of the sample array in bytes.
    pub wave_array_1: u32,
    pub instrument_name: String,
    pub instrument_number: u32,
    pub trace_label: String,
    /// Number of samples the descriptor says the data block holds.
    pub declared_sample_count: u32,
    pub first_valid_point: u32,
    pub last_valid_point: u32,
    pub first_point: u32,
    pub sparsing_factor: u32,
    pub segment_index: u32,
    pub sweeps_per_acquisition: u32,
    /// Volts per ADC count (before the quantization divisor).
    pub vertical_gain: f32,
    pub vertical_offset: f32,
    pub max_value: f32,
    pub min_value: f32,
    pub nominal_bits: u16,
    /// Seconds between samples.
    pub horizontal_interval: f32,
    /// Time of the first sample, in seconds.
    pub horizontal_offset: f64,
    pub pixel_offset: f64,
    pub vertical_unit: String,
    pub horizontal_unit: String,
    pub horizontal_uncertainty: f32,
    pub trigger_time: TriggerTime,
    pub acquisition_duration: f32,
    pub record_type: u16,
    pub processing_done: u16,
    pub ris_sweeps: u16,
    pub time_base: TimeBase,
    pub vertical_coupling: Coupling,
    pub probe_attenuation: ProbeAttenuation,
    pub fixed_vertical_gain: u16,
    pub bandwidth_limit: bool,
    pub vertical_vernier: f32,
    pub acquisition_vertical_offset: f32,
    pub wave_source: WaveSource,
}

impl TraceDescriptor {
    pub fn byte_order(&self) -> Option<CommOrder> {
        CommOrder::from_u16(self.comm_order)
    }

    /// True if the trace claims a byte order other than low-first. We still
    /// decode it, but nobody has checked the result against real data.
    pub fn byte_order_untested(&self) -> bool {
        self.byte_order() != Some(CommOrder::LoFirst)
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.record_type)
    }

    pub fn processing_done(&self) -> Option<ProcessingDone> {
        ProcessingDone::from_u16(self.processing_done)
    }

    pub fn fixed_vertical_gain_label(&self) -> Option<&'static str> {
        FIXED_VERT_GAIN_LABELS
            .get(self.fixed_vertical_gain as usize)
            .copied()
    }
}

/// Find the offset of the descriptor in the preamble.
pub fn locate_descriptor(preamble: &[u8]) -> Result<usize, DecodeError> {
    let window = &preamble[..preamble.len().min(DESCRIPTOR_SEARCH_WINDOW)];
    window
        .windows(DESCRIPTOR_MARKER.len())
        .position(|w| w == DESCRIPTOR_MARKER)
        .ok_or(DecodeError::DescriptorNotFound {
            window: DESCRIPTOR_SEARCH_WINDOW,
        })
}

/// Parse the descriptor starting at `start` (as returned by
/// `locate_descriptor`), reading numbers little endian.
pub fn parse_descriptor(preamble: &[u8], start: usize) -> Result<TraceDescriptor, DecodeError> {
    parse_descriptor_as::<LittleEndian>(preamble, start)
}

/// Parse the descriptor reading all numbers in the byte order `BO`.
pub fn parse_descriptor_as<BO: ByteOrder>(
    preamble: &[u8],
    start: usize,
) -> Result<TraceDescriptor, DecodeError> {
    let record = preamble.get(start..).unwrap_or_default();
    let mut r = Cursor::new(record);

    let descriptor_name = r.field_text::<16>("DESCRIPTOR_NAME")?;
    let template_name = r.field_text::<16>("TEMPLATE_NAME")?;

    let comm_type = r.field_u16::<BO>("COMM_TYPE")?;
    let sample_encoding = SampleEncoding::from_u16(comm_type).ok_or_else(|| {
        DecodeError::malformed(
            "COMM_TYPE",
            offset::COMM_TYPE,
            format!("unknown sample encoding {comm_type}"),
        )
    })?;
    let comm_order = r.field_u16::<BO>("COMM_ORDER")?;

    let wave_descriptor_length = r.field_u32::<BO>("WAVE_DESCRIPTOR")?;
    let user_text_length = r.field_u32::<BO>("USER_TEXT")?;
    r.skip_field("RES_DESC1", 4)?;
    r.skip_field("TRIGTIME_ARRAY", 4)?;
    r.skip_field("RIS_TIME_ARRAY", 4)?;
    r.skip_field("RES_ARRAY1", 4)?;
    let wave_array_1 = r.field_u32::<BO>("WAVE_ARRAY_1")?;
    r.skip_field("WAVE_ARRAY_2", 4)?;
    r.skip_field("RES_ARRAY2", 4)?;
    r.skip_field("RES_ARRAY3", 4)?;

    let instrument_name = r.field_text::<16>("INSTRUMENT_NAME")?;
    let instrument_number = r.field_u32::<BO>("INSTRUMENT_NUMBER")?;
    let trace_label = r.field_text::<16>("TRACE_LABEL")?;
    r.skip_field("RESERVED1", 4)?;

    let declared_sample_count = r.field_u32::<BO>("WAVE_ARRAY_COUNT")?;
    r.skip_field("PNTS_PER_SCREEN", 4)?;
    let first_valid_point = r.field_u32::<BO>("FIRST_VALID_PNT")?;
    let last_valid_point = r.field_u32::<BO>("LAST_VALID_PNT")?;
    let first_point = r.field_u32::<BO>("FIRST_POINT")?;
    let sparsing_factor = r.field_u32::<BO>("SPARSING_FACTOR")?;
    let segment_index = r.field_u32::<BO>("SEGMENT_INDEX")?;
    r.skip_field("SUBARRAY_COUNT", 4)?;
    let sweeps_per_acquisition = r.field_u32::<BO>("SWEEPS_PER_ACQ")?;
    r.skip_field("POINTS_PER_PAIR", 2)?;
    r.skip_field("PAIR_OFFSET", 2)?;

    let vertical_gain = r.field_f32::<BO>("VERTICAL_GAIN")?;
    let vertical_offset = r.field_f32::<BO>("VERTICAL_OFFSET")?;
    let max_value = r.field_f32::<BO>("MAX_VALUE")?;
    let min_value = r.field_f32::<BO>("MIN_VALUE")?;
    let nominal_bits = r.field_u16::<BO>("NOMINAL_BITS")?;
    r.skip_field("NOM_SUBARRAY_COUNT", 2)?;

    let horizontal_interval = r.field_f32::<BO>("HORIZ_INTERVAL")?;
    let horizontal_offset = r.field_f64::<BO>("HORIZ_OFFSET")?;
    let pixel_offset = r.field_f64::<BO>("PIXEL_OFFSET")?;
    let vertical_unit = r.field_text::<48>("VERTUNIT")?;
    let horizontal_unit = r.field_text::<48>("HORUNIT")?;
    let horizontal_uncertainty = r.field_f32::<BO>("HORIZ_UNCERTAINTY")?;

    let trigger_time = TriggerTime {
        seconds: r.field_f64::<BO>("TRIGGER_TIME")?,
        minutes: r.field_u8("TRIGGER_TIME")?,
        hours: r.field_u8("TRIGGER_TIME")?,
        days: r.field_u8("TRIGGER_TIME")?,
        months: r.field_u8("TRIGGER_TIME")?,
        year: r.field_i16::<BO>("TRIGGER_TIME")?,
    };
    r.skip_field("TRIGGER_TIME", 2)?;

    let acquisition_duration = r.field_f32::<BO>("ACQ_DURATION")?;
    let record_type = r.field_u16::<BO>("RECORD_TYPE")?;
    let processing_done = r.field_u16::<BO>("PROCESSING_DONE")?;
    r.skip_field("RESERVED5", 2)?;
    let ris_sweeps = r.field_u16::<BO>("RIS_SWEEPS")?;

    let time_base_index = r.field_u16::<BO>("TIMEBASE")?;
    let vertical_coupling_index = r.field_u16::<BO>("VERT_COUPLING")?;
    let probe_attenuation_raw = r.field_bytes::<4>("PROBE_ATT")?;
    let fixed_vertical_gain = r.field_u16::<BO>("FIXED_VERT_GAIN")?;
    let bandwidth_limit = r.field_u16::<BO>("BANDWIDTH_LIMIT")? != 0;
    let vertical_vernier = r.field_f32::<BO>("VERTICAL_VERNIER")?;
    let acquisition_vertical_offset = r.field_f32::<BO>("ACQ_VERT_OFFSET")?;
    let wave_source_id = r.field_u16::<BO>("WAVE_SOURCE")?;

    debug_assert_eq!(r.position() as usize, DESCRIPTOR_LEN);

    let time_base = TimeBase::from_index(time_base_index)?;
    let vertical_coupling = Coupling::from_u16(vertical_coupling_index).ok_or(
        DecodeError::LookupIndexOutOfRange {
            table: "vertical coupling",
            index: vertical_coupling_index as usize,
            len: COUPLING_LABELS.len(),
        },
    )?;
    let probe_attenuation = ProbeAttenuation::resolve::<BO>(probe_attenuation_raw)?;

    Ok(TraceDescriptor {
        descriptor_name,
        template_name,
        sample_encoding,
        comm_order,
        wave_descriptor_length,
        user_text_length,
        wave_array_1,
        instrument_name,
        instrument_number,
        trace_label,
        declared_sample_count,
        first_valid_point,
        last_valid_point,
        first_point,
        sparsing_factor,
        segment_index,
        sweeps_per_acquisition,
        vertical_gain,
        vertical_offset,
        max_value,
        min_value,
        nominal_bits,
        horizontal_interval,
        horizontal_offset,
        pixel_offset,
        vertical_unit,
        horizontal_unit,
        horizontal_uncertainty,
        trigger_time,
        acquisition_duration,
        record_type,
        processing_done,
        ris_sweeps,
        time_base,
        vertical_coupling,
        probe_attenuation,
        fixed_vertical_gain,
        bandwidth_limit,
        vertical_vernier,
        acquisition_vertical_offset,
        wave_source: WaveSource::from_id(wave_source_id),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::synth::Preamble;
    use byteorder::BigEndian;

    #[test]
    fn test_locate_after_response_header() {
        let preamble = Preamble::new().build();
        assert_eq!(locate_descriptor(&preamble), Ok(Preamble::PREFIX.len()));
    }

    #[test]
    fn test_locate_missing_marker() {
        assert_eq!(
            locate_descriptor(b"C1:WF DESC,#9000000346WAVEDES"),
            Err(DecodeError::DescriptorNotFound {
                window: DESCRIPTOR_SEARCH_WINDOW
            })
        );
        assert!(locate_descriptor(&[]).is_err());
    }

    #[test]
    fn test_locate_only_searches_window() {
        let mut preamble = vec![b' '; DESCRIPTOR_SEARCH_WINDOW];
        preamble.extend_from_slice(DESCRIPTOR_MARKER);
        assert!(matches!(
            locate_descriptor(&preamble),
            Err(DecodeError::DescriptorNotFound { .. })
        ));
    }

    #[test]
    fn test_parse_scaling_fields() {
        let preamble = Preamble::new()
            .f32_at(offset::VERTICAL_GAIN, 0.25)
            .f32_at(offset::VERTICAL_OFFSET, -1.5)
            .f32_at(offset::HORIZ_INTERVAL, 2e-9)
            .f64_at(offset::HORIZ_OFFSET, -5e-7)
            .u32_at(offset::WAVE_ARRAY_COUNT, 700)
            .u16_at(offset::COMM_TYPE, 1)
            .build();
        let start = locate_descriptor(&preamble).unwrap();
        let desc = parse_descriptor(&preamble, start).unwrap();

        assert_eq!(desc.descriptor_name, "WAVEDESC");
        assert_eq!(desc.template_name, "LECROY_2_3");
        assert_eq!(desc.sample_encoding, SampleEncoding::Bytes2);
        assert_eq!(desc.vertical_gain, 0.25);
        assert_eq!(desc.vertical_offset, -1.5);
        assert_eq!(desc.horizontal_interval, 2e-9);
        assert_eq!(desc.horizontal_offset, -5e-7);
        assert_eq!(desc.declared_sample_count, 700);
        assert_eq!(desc.instrument_name, "LECROYWR");
        assert_eq!(desc.vertical_unit, "V");
        assert_eq!(desc.horizontal_unit, "S");
        assert!(!desc.byte_order_untested());
    }

    #[test]
    fn test_parse_lookups() {
        let preamble = Preamble::new()
            .u16_at(offset::TIMEBASE, 5)
            .u16_at(offset::VERT_COUPLING, 1)
            .u16_at(offset::WAVE_SOURCE, 2)
            .u16_at(offset::FIXED_VERT_GAIN, 18)
            .u16_at(offset::RECORD_TYPE, 9)
            .u16_at(offset::PROCESSING_DONE, 2)
            .build();
        let desc = parse_descriptor(&preamble, Preamble::PREFIX.len()).unwrap();

        assert_eq!(desc.time_base.label, "10 ns/div");
        assert_eq!(desc.time_base.seconds_per_div, 10e-9);
        assert_eq!(desc.vertical_coupling, Coupling::Ac);
        assert_eq!(desc.vertical_coupling.label(), "AC");
        assert_eq!(desc.wave_source.label, "CHANNEL 3");
        assert!(desc.wave_source.is_known());
        assert_eq!(desc.fixed_vertical_gain_label(), Some("1 V/div"));
        assert_eq!(desc.record_type(), Some(RecordType::PeakDetect));
        assert_eq!(desc.processing_done(), Some(ProcessingDone::Interpolated));

        let preamble = Preamble::new().u16_at(offset::PROCESSING_DONE, 42).build();
        let desc = parse_descriptor(&preamble, Preamble::PREFIX.len()).unwrap();
        assert_eq!(desc.processing_done(), None);
        assert_eq!(desc.processing_done, 42);
    }

    #[test]
    fn test_probe_attenuation_from_table() {
        let preamble = Preamble::new().u32_at(offset::PROBE_ATT, 3).build();
        let desc = parse_descriptor(&preamble, Preamble::PREFIX.len()).unwrap();
        assert_eq!(desc.probe_attenuation, ProbeAttenuation::Tabulated(1.0));
        assert_eq!(desc.probe_attenuation.value(), 1.0);

        let preamble = Preamble::new().u32_at(offset::PROBE_ATT, 15).build();
        let desc = parse_descriptor(&preamble, Preamble::PREFIX.len()).unwrap();
        assert_eq!(desc.probe_attenuation, ProbeAttenuation::Tabulated(10000.0));
    }

    #[test]
    fn test_probe_attenuation_override() {
        // 123.5 read as an integer is far past the end of the table.
        let preamble = Preamble::new().f32_at(offset::PROBE_ATT, 123.5).build();
        let desc = parse_descriptor(&preamble, Preamble::PREFIX.len()).unwrap();
        assert_eq!(desc.probe_attenuation, ProbeAttenuation::Overridden(123.5));
        assert_eq!(desc.probe_attenuation.value(), 123.5);
    }

    #[test]
    fn test_probe_attenuation_never_indexes_past_table() {
        let raw = 20u32.to_le_bytes();
        assert_eq!(
            ProbeAttenuation::resolve::<LittleEndian>(raw),
            Ok(ProbeAttenuation::Overridden(f32::from_bits(20)))
        );
        let raw = 16u32.to_be_bytes();
        assert!(matches!(
            ProbeAttenuation::resolve::<BigEndian>(raw),
            Ok(ProbeAttenuation::Overridden(_))
        ));
    }

    #[test]
    fn test_timebase_out_of_range() {
        let preamble = Preamble::new().u16_at(offset::TIMEBASE, 39).build();
        assert_eq!(
            parse_descriptor(&preamble, Preamble::PREFIX.len()),
            Err(DecodeError::LookupIndexOutOfRange {
                table: "timebase",
                index: 39,
                len: 39,
            })
        );
    }

    #[test]
    fn test_coupling_out_of_range() {
        let preamble = Preamble::new().u16_at(offset::VERT_COUPLING, 3).build();
        assert!(matches!(
            parse_descriptor(&preamble, Preamble::PREFIX.len()),
            Err(DecodeError::LookupIndexOutOfRange {
                table: "vertical coupling",
                index: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_unmapped_wave_source() {
        let preamble = Preamble::new().u16_at(offset::WAVE_SOURCE, 7).build();
        let desc = parse_descriptor(&preamble, Preamble::PREFIX.len()).unwrap();
        assert_eq!(desc.wave_source.id, 7);
        assert_eq!(desc.wave_source.label, "UNKNOWN");
        assert!(!desc.wave_source.is_known());
        assert_eq!(WaveSource::from_id(9).label, "UNKNOWN");
    }

    #[test]
    fn test_unknown_comm_type() {
        let preamble = Preamble::new().u16_at(offset::COMM_TYPE, 2).build();
        assert!(matches!(
            parse_descriptor(&preamble, Preamble::PREFIX.len()),
            Err(DecodeError::MalformedField {
                field: "COMM_TYPE",
                offset: offset::COMM_TYPE,
                ..
            })
        ));
    }

    #[test]
    fn test_truncated_descriptor() {
        let mut preamble = Preamble::new().build();
        preamble.truncate(Preamble::PREFIX.len() + offset::WAVE_SOURCE + 1);
        assert!(matches!(
            parse_descriptor(&preamble, Preamble::PREFIX.len()),
            Err(DecodeError::MalformedField {
                field: "WAVE_SOURCE",
                offset: offset::WAVE_SOURCE,
                ..
            })
        ));
    }

    #[test]
    fn test_big_endian_indicator_is_flagged() {
        let preamble = Preamble::new().u16_at(offset::COMM_ORDER, 0).build();
        let desc = parse_descriptor(&preamble, Preamble::PREFIX.len()).unwrap();
        assert_eq!(desc.byte_order(), Some(CommOrder::HiFirst));
        assert!(desc.byte_order_untested());
    }

    #[test]
    fn test_trigger_time() {
        let desc = parse_descriptor(&Preamble::new().build(), Preamble::PREFIX.len()).unwrap();
        assert_eq!(desc.trigger_time.year, 2023);
        assert_eq!(desc.trigger_time.to_string(), "2023-05-17 14:08:09.250");
    }
}
