use std::{
    fmt, fs,
    path::PathBuf,
    sync::{
        atomic::{AtomicI32, Ordering},
        Arc, Mutex, PoisonError,
    },
    thread,
};

use anyhow::{Context, Result};
use log::{info, warn};
use wavedesc::Trace;

/// Where a trace's preamble and data responses were saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracePair {
    pub preamble: PathBuf,
    pub data: PathBuf,
}

impl fmt::Display for TracePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.preamble.display(), self.data.display())
    }
}

/// Read and decode a pair, reporting progress (0-100) as each file is read.
pub fn load_pair(pair: &TracePair, mut progress: impl FnMut(i32)) -> Result<Trace> {
    let preamble = fs::read(&pair.preamble)
        .with_context(|| format!("Reading preamble {}", pair.preamble.display()))?;
    progress(33);
    let data =
        fs::read(&pair.data).with_context(|| format!("Reading data {}", pair.data.display()))?;
    progress(66);

    let trace = Trace::decode(&preamble, &data).with_context(|| format!("Decoding {pair}"))?;
    if trace.descriptor.byte_order_untested() {
        warn!(
            "{pair} has byte order indicator {}; decoded little endian, which is untested",
            trace.descriptor.comm_order
        );
    }
    info!("Loaded {} samples from {pair}", trace.waveform.len());
    Ok(trace)
}

pub struct TraceLoader {
    // When the thread has finished loading it will put the result here.
    // None while it is still running.
    loaded: Arc<Mutex<Option<Result<Trace>>>>,

    // Progress amount, 100 when done.
    progress: Arc<AtomicI32>,
}

impl TraceLoader {
    pub fn new(pair: TracePair, mut update_callback: Box<dyn FnMut() + Send>) -> Self {
        let loaded = Arc::new(Mutex::new(None));
        let loaded_thread = loaded.clone();

        let progress = Arc::new(AtomicI32::new(0));
        let progress_thread = progress.clone();

        thread::spawn(move || {
            let mut report = |p: i32| {
                progress_thread.store(p, Ordering::SeqCst);
                update_callback();
            };
            let trace = load_pair(&pair, &mut report);
            *loaded_thread.lock().unwrap_or_else(PoisonError::into_inner) = Some(trace);
            report(100);
        });

        Self { loaded, progress }
    }

    pub fn progress(&self) -> i32 {
        self.progress.load(Ordering::SeqCst)
    }

    /// None if the trace hasn't finished loading, otherwise the result of
    /// loading it. Only returns Some once.
    pub fn take(&mut self) -> Option<Result<Trace>> {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Preamble and data paths from the command line, if exactly two were given.
pub fn pair_from_args(args: &[String]) -> Option<TracePair> {
    match args {
        [preamble, data] => Some(TracePair {
            preamble: preamble.into(),
            data: data.into(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{
        path::Path,
        time::{Duration, Instant},
    };
    use wavedesc::synth::{data_block, Preamble};

    fn write_pair(dir: &Path) -> TracePair {
        let pair = TracePair {
            preamble: dir.join("c2_preamble.bin"),
            data: dir.join("c2_data.bin"),
        };
        fs::write(&pair.preamble, Preamble::new().sample_count(4).build()).unwrap();
        fs::write(&pair.data, data_block("4", &[0, 0xF0, 0xE0, 0])).unwrap();
        pair
    }

    #[test]
    fn test_load_pair_progress() {
        let dir = tempfile::tempdir().unwrap();
        let pair = write_pair(dir.path());

        let mut seen = Vec::new();
        let trace = load_pair(&pair, |p| seen.push(p)).unwrap();
        assert_eq!(seen, vec![33, 66]);
        assert_eq!(trace.waveform.len(), 4);
        assert_eq!(trace.waveform.min_voltage(), Some(-32.0 * f64::from(0.1f32) / 30.0));

        fs::remove_file(&pair.data).unwrap();
        let mut seen = Vec::new();
        let err = load_pair(&pair, |p| seen.push(p)).unwrap_err();
        assert!(format!("{err:#}").contains("Reading data"));
        assert_eq!(seen, vec![33]);
    }

    #[test]
    fn test_background_loader() {
        let dir = tempfile::tempdir().unwrap();
        let pair = write_pair(dir.path());

        let mut loader = TraceLoader::new(pair, Box::new(|| {}));
        let deadline = Instant::now() + Duration::from_secs(10);
        while loader.progress() < 100 {
            assert!(Instant::now() < deadline, "loader never finished");
            thread::sleep(Duration::from_millis(5));
        }
        let trace = loader.take().unwrap().unwrap();
        assert_eq!(trace.waveform.len(), 4);
        assert!(loader.take().is_none());
    }

    #[test]
    fn test_pair_from_args() {
        let args = vec!["a.bin".to_string(), "b.bin".to_string()];
        assert_eq!(
            pair_from_args(&args),
            Some(TracePair {
                preamble: "a.bin".into(),
                data: "b.bin".into(),
            })
        );
        assert_eq!(pair_from_args(&args[..1]), None);
        assert_eq!(pair_from_args(&[]), None);
    }
}
