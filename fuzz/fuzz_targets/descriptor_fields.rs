#![no_main]

use libfuzzer_sys::fuzz_target;
use wavedesc::{
    descriptor::DESCRIPTOR_LEN,
    synth::{data_block, Preamble},
};

// Start from a valid preamble and overwrite the descriptor with the input, so
// the marker is found and the field and table lookups get exercised. The
// marker itself is kept.
fuzz_target!(|input: &[u8]| {
    let mut preamble = Preamble::new().build();
    let start = Preamble::PREFIX.len() + 8;
    let end = (start + input.len()).min(Preamble::PREFIX.len() + DESCRIPTOR_LEN);
    preamble[start..end].copy_from_slice(&input[..end - start]);

    let data = data_block("8", &[0, 1, 2, 3, 0x80, 0x81, 0xFE, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0]);
    if let Ok(trace) = wavedesc::Trace::decode(&preamble, &data) {
        assert_eq!(
            trace.waveform.len(),
            trace.descriptor.declared_sample_count as usize
        );
        assert!(trace.waveform.len() <= 8);
    }
});
