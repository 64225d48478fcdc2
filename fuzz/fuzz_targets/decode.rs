#![no_main]

use libfuzzer_sys::fuzz_target;

// The first two bytes say where the preamble ends and the data begins.
fuzz_target!(|input: &[u8]| {
    if input.len() < 2 {
        return;
    }
    let (split, rest) = input.split_at(2);
    let split = (u16::from_le_bytes([split[0], split[1]]) as usize).min(rest.len());
    let (preamble, data) = rest.split_at(split);

    if let Ok(wave) = wavedesc::decode(preamble, data) {
        assert_eq!(wave.time.len(), wave.voltage.len());
    }
});
