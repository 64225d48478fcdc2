//! Constant lookup tables for the enumerated descriptor fields.

use crate::error::DecodeError;

/// Human readable timebase settings, indexed by the `TIMEBASE` field.
#[rustfmt::skip]
pub static TIMEBASE_LABELS: [&str; 39] = [
    "200 ps/div", "500 ps/div",
    "1 ns/div", "2 ns/div", "5 ns/div", "10 ns/div", "20 ns/div", "50 ns/div",
    "100 ns/div", "200 ns/div", "500 ns/div",
    "1 us/div", "2 us/div", "5 us/div", "10 us/div", "20 us/div", "50 us/div",
    "100 us/div", "200 us/div", "500 us/div",
    "1 ms/div", "2 ms/div", "5 ms/div", "10 ms/div", "20 ms/div", "50 ms/div",
    "100 ms/div", "200 ms/div", "500 ms/div",
    "1 s/div", "2 s/div", "5 s/div", "10 s/div", "20 s/div", "50 s/div",
    "100 s/div", "200 s/div", "500 s/div",
    "1 ks/div",
];

/// Seconds per division for each entry of `TIMEBASE_LABELS`.
#[rustfmt::skip]
pub static TIMEBASE_SECONDS: [f64; 39] = [
    200e-12, 500e-12,
    1e-9, 2e-9, 5e-9, 10e-9, 20e-9, 50e-9, 100e-9, 200e-9, 500e-9,
    1e-6, 2e-6, 5e-6, 10e-6, 20e-6, 50e-6, 100e-6, 200e-6, 500e-6,
    1e-3, 2e-3, 5e-3, 10e-3, 20e-3, 50e-3, 100e-3, 200e-3, 500e-3,
    1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0,
    1000.0,
];

/// Standard probe attenuation factors. Indices above the end of this table
/// mean a custom attenuation stored as a float.
pub static PROBE_ATTENUATION: [f32; 16] = [
    0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0,
    10000.0,
];

pub static COUPLING_LABELS: [&str; 3] = ["DC", "AC", "GND"];

/// Fixed vertical gain settings, indexed by the `FIXED_VERT_GAIN` field.
#[rustfmt::skip]
pub static FIXED_VERT_GAIN_LABELS: [&str; 28] = [
    "1 uV/div", "2 uV/div", "5 uV/div", "10 uV/div", "20 uV/div", "50 uV/div",
    "100 uV/div", "200 uV/div", "500 uV/div",
    "1 mV/div", "2 mV/div", "5 mV/div", "10 mV/div", "20 mV/div", "50 mV/div",
    "100 mV/div", "200 mV/div", "500 mV/div",
    "1 V/div", "2 V/div", "5 V/div", "10 V/div", "20 V/div", "50 V/div",
    "100 V/div", "200 V/div", "500 V/div",
    "1 kV/div",
];

/// Sparse map from wave source id to channel label. Ids not listed here
/// resolve to `UNKNOWN_SOURCE_LABEL`.
pub static WAVE_SOURCES: [(u16, &str); 5] = [
    (0, "CHANNEL 1"),
    (1, "CHANNEL 2"),
    (2, "CHANNEL 3"),
    (3, "CHANNEL 4"),
    (9, UNKNOWN_SOURCE_LABEL),
];

pub const UNKNOWN_SOURCE_LABEL: &str = "UNKNOWN";

/// Bounds-checked lookup into one of the tables above.
pub(crate) fn lookup<T: Copy>(
    table_name: &'static str,
    table: &[T],
    index: usize,
) -> Result<T, DecodeError> {
    table
        .get(index)
        .copied()
        .ok_or(DecodeError::LookupIndexOutOfRange {
            table: table_name,
            index,
            len: table.len(),
        })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_timebase_tables_line_up() {
        assert_eq!(TIMEBASE_LABELS[0], "200 ps/div");
        assert_eq!(TIMEBASE_LABELS[5], "10 ns/div");
        assert_eq!(TIMEBASE_SECONDS[5], 10e-9);
        assert_eq!(TIMEBASE_LABELS[29], "1 s/div");
        assert_eq!(TIMEBASE_SECONDS[29], 1.0);
        assert_eq!(TIMEBASE_LABELS[38], "1 ks/div");
        assert_eq!(TIMEBASE_SECONDS[38], 1000.0);
    }

    #[test]
    fn test_grouped_tables_keep_their_order() {
        // Each row of the grouped layouts is one decade.
        for (i, label) in TIMEBASE_LABELS.iter().enumerate().skip(2) {
            let expected = ["1", "2", "5"][(i - 2) % 3];
            assert!(label.starts_with(expected), "{i}: {label}");
        }
        for pair in TIMEBASE_SECONDS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(FIXED_VERT_GAIN_LABELS[0], "1 uV/div");
        assert_eq!(FIXED_VERT_GAIN_LABELS[9], "1 mV/div");
        assert_eq!(FIXED_VERT_GAIN_LABELS[18], "1 V/div");
        assert_eq!(FIXED_VERT_GAIN_LABELS[27], "1 kV/div");
    }

    #[test]
    fn test_lookup_out_of_range() {
        assert_eq!(lookup("coupling", &COUPLING_LABELS, 2), Ok("GND"));
        assert_eq!(
            lookup("coupling", &COUPLING_LABELS, 3),
            Err(DecodeError::LookupIndexOutOfRange {
                table: "coupling",
                index: 3,
                len: 3,
            })
        );
    }
}
