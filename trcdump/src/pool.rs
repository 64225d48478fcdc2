//! Decoding many traces on a few worker threads.

use std::thread;

use anyhow::Result;
use crossbeam_channel::unbounded;
use log::debug;
use wavedesc::Trace;

use crate::{args::TracePair, capture::load_trace};

/// Decode every pair, returning the results in input order. A failure of one
/// pair does not stop the others.
pub fn decode_all(pairs: &[TracePair], workers: usize) -> Vec<Result<Trace>> {
    let workers = workers.clamp(1, pairs.len().max(1));

    let (job_tx, job_rx) = unbounded::<(usize, &TracePair)>();
    let (result_tx, result_rx) = unbounded::<(usize, Result<Trace>)>();

    for job in pairs.iter().enumerate() {
        // The receiver is alive until the scope below ends.
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    thread::scope(|s| {
        for worker in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            s.spawn(move || {
                for (index, pair) in job_rx {
                    debug!("Worker {worker} decoding {pair}");
                    if result_tx.send((index, load_trace(pair))).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut results: Vec<Option<Result<Trace>>> = pairs.iter().map(|_| None).collect();
    for (index, result) in result_rx {
        results[index] = Some(result);
    }
    results.into_iter().flatten().collect()
}

/// Worker count for `decode_all`.
pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}
