use std::{fs, path::Path};

use wavedesc::synth::{data_block, Preamble};

use crate::args::TracePair;

/// Write an 8-bit trace with the default synthetic descriptor (gain 0.1,
/// 1 ns per sample) to `<name>_preamble.bin` and `<name>_data.bin`.
pub fn write_pair(dir: &Path, name: &str, samples: &[i8]) -> TracePair {
    let pair = TracePair {
        preamble: dir.join(format!("{name}_preamble.bin")),
        data: dir.join(format!("{name}_data.bin")),
    };
    let payload: Vec<u8> = samples.iter().map(|s| *s as u8).collect();
    let preamble = Preamble::new().sample_count(samples.len() as u32);
    fs::write(&pair.preamble, preamble.build()).unwrap();
    fs::write(&pair.data, data_block(&samples.len().to_string(), &payload)).unwrap();
    pair
}
