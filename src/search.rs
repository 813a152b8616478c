//! Exhaustive key search: configuration enumeration, the concurrent
//! fan-out/fan-in pipeline, and result collection.

use std::fmt::Write as _;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use crossbeam_queue::ArrayQueue;

use crate::error::Error;
use crate::frequency::Analysis;
use crate::machine::Machine;
use crate::rotor::Rotor;
use crate::topk::SortedFixedList;

/// 26^3 starting-position triples per wheel order and reflector.
const KEY_SPACE: usize = 26 * 26 * 26;

/// Work queue depth. Producers stall when workers fall behind; that
/// backpressure is the intended flow control, not an error.
const WORK_CHANNEL_CAP: usize = 1024;
const RESULT_CHANNEL_CAP: usize = 4096;

/// Free-list depth for recycled candidate buffers.
const RESULT_POOL_CAP: usize = 8192;

/// Progress log interval, in drained results.
const MILESTONE: usize = 500_000;

/// One point in the search space: an ordered wheel choice (leftmost rotor
/// first), a reflector, and a starting-position key.
#[derive(Debug, Clone, Copy)]
pub struct Configuration<'a> {
    pub rotors: [&'a Rotor; 3],
    pub reflector: &'a Rotor,
    pub key: [u8; 3],
}

/// The full candidate space: ordered 3-permutations of the rotor pool
/// (no wheel used twice), crossed with every reflector and every key triple.
///
/// Only the wheel-order permutations are materialized (small even for large
/// pools); the cross product itself streams lazily through [`iter`].
///
/// [`iter`]: ConfigurationSpace::iter
#[derive(Debug)]
pub struct ConfigurationSpace<'a> {
    rotors: &'a [Rotor],
    reflectors: &'a [Rotor],
    permutations: Vec<[usize; 3]>,
}

impl<'a> ConfigurationSpace<'a> {
    pub fn new(rotors: &'a [Rotor], reflectors: &'a [Rotor]) -> ConfigurationSpace<'a> {
        let mut permutations = Vec::new();
        for a in 0..rotors.len() {
            for b in 0..rotors.len() {
                if a == b {
                    continue;
                }
                for c in 0..rotors.len() {
                    if a == c || b == c {
                        continue;
                    }
                    permutations.push([a, b, c]);
                }
            }
        }
        ConfigurationSpace {
            rotors,
            reflectors,
            permutations,
        }
    }

    /// Exact number of configurations the iterator will produce.
    pub fn len(&self) -> usize {
        self.permutations.len() * self.reflectors.len() * KEY_SPACE
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stream every configuration exactly once, in a fixed order.
    pub fn iter(&self) -> ConfigIter<'a, '_> {
        ConfigIter {
            space: self,
            index: 0,
        }
    }
}

/// Lazy cursor over a [`ConfigurationSpace`]: a linear index decomposed into
/// (wheel order, reflector, key) coordinates.
#[derive(Debug)]
pub struct ConfigIter<'a, 's> {
    space: &'s ConfigurationSpace<'a>,
    index: usize,
}

impl<'a> Iterator for ConfigIter<'a, '_> {
    type Item = Configuration<'a>;

    fn next(&mut self) -> Option<Configuration<'a>> {
        if self.index >= self.space.len() {
            return None;
        }
        let per_permutation = self.space.reflectors.len() * KEY_SPACE;
        let [a, b, c] = self.space.permutations[self.index / per_permutation];
        let rest = self.index % per_permutation;
        let reflector = &self.space.reflectors[rest / KEY_SPACE];
        let key_index = rest % KEY_SPACE;
        self.index += 1;

        Some(Configuration {
            rotors: [
                &self.space.rotors[a],
                &self.space.rotors[b],
                &self.space.rotors[c],
            ],
            reflector,
            key: [
                (key_index / (26 * 26)) as u8,
                (key_index / 26 % 26) as u8,
                (key_index % 26) as u8,
            ],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.space.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ConfigIter<'_, '_> {}

/// One scored decryption attempt. The string buffers are recycled through
/// the candidate free-list once a result is rejected or evicted.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub message: String,
    pub config: String,
    pub score: f64,
}

/// Search the whole configuration space for `rotors` x `reflectors` against
/// `message` and return the `result_count` best-scoring decryptions, best
/// first.
///
/// The ciphertext must be nonempty uppercase A-Z.
pub fn crack(
    message: &str,
    result_count: usize,
    rotors: &[Rotor],
    reflectors: &[Rotor],
) -> Result<Vec<Candidate>, Error> {
    let letters = validate_ciphertext(message)?;
    let space = ConfigurationSpace::new(rotors, reflectors);
    let workers = thread::available_parallelism().map_or(4, |n| n.get());
    tracing::info!(
        configurations = space.len(),
        workers,
        "starting exhaustive search"
    );

    // Rejected and evicted candidates flow back here so their string buffers
    // get reused instead of reallocated; take-or-allocate, never blocking.
    let pool: ArrayQueue<Candidate> = ArrayQueue::new(RESULT_POOL_CAP);

    let ranked = thread::scope(|s| {
        let (work_tx, work_rx) = bounded::<Configuration<'_>>(WORK_CHANNEL_CAP);
        let (result_tx, result_rx) = bounded::<Candidate>(RESULT_CHANNEL_CAP);

        let producer = s.spawn(move || {
            let mut dispatched = 0usize;
            for config in space.iter() {
                if work_tx.send(config).is_err() {
                    break;
                }
                dispatched += 1;
            }
            dispatched
        });

        for _ in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let pool = &pool;
            let letters = letters.as_slice();
            s.spawn(move || decrypt_worker(work_rx, result_tx, pool, letters));
        }
        drop(work_rx);
        drop(result_tx);

        // Single consumer: the aggregator is only ever touched here. The
        // result channel disconnects once every worker has drained the work
        // queue and exited, so each dispatched configuration accounts for
        // exactly one received candidate.
        let mut ranked = SortedFixedList::new(result_count, |a: &Candidate, b: &Candidate| {
            a.score < b.score
        });
        let mut drained = 0usize;
        for candidate in result_rx.iter() {
            drained += 1;
            if drained % MILESTONE == 0 {
                tracing::debug!(drained, "search progress");
            }
            if let Some(recycled) = ranked.offer(candidate) {
                let _ = pool.push(recycled);
            }
        }

        let dispatched = producer.join().expect("enumerator thread panicked");
        if drained != dispatched {
            tracing::error!(
                dispatched,
                drained,
                "search lost results; a worker exited abnormally"
            );
        }
        ranked
    });

    Ok(ranked.into_sorted_vec())
}

/// Decrypt and score every configuration pulled from the work queue. Each
/// worker owns its machine and frequency state outright; the only shared
/// structures are the channels and the candidate free-list.
fn decrypt_worker(
    work_rx: Receiver<Configuration<'_>>,
    result_tx: Sender<Candidate>,
    pool: &ArrayQueue<Candidate>,
    letters: &[u8],
) {
    let mut analysis = Analysis::new();
    for config in work_rx.iter() {
        let mut machine = Machine::new(config.rotors, config.reflector, config.key);
        let mut candidate = pool.pop().unwrap_or_default();
        candidate.message.clear();
        candidate.config.clear();
        analysis.reset();

        for &letter in letters {
            let out = machine.step(letter);
            candidate.message.push((b'A' + out) as char);
            analysis.add(out);
        }
        candidate.score = analysis.divergence();
        let _ = write!(candidate.config, "{machine}");

        if result_tx.send(candidate).is_err() {
            return;
        }
    }
}

fn validate_ciphertext(message: &str) -> Result<Vec<u8>, Error> {
    if message.is_empty() {
        return Err(Error::InvalidCiphertext("message is empty".to_string()));
    }
    message
        .bytes()
        .map(|c| {
            if c.is_ascii_uppercase() {
                Ok(c - b'A')
            } else {
                Err(Error::InvalidCiphertext(format!(
                    "unexpected character {:?}",
                    c as char
                )))
            }
        })
        .collect()
}
