//! Ciphertext-only cryptanalysis of a three-rotor electromechanical cipher
//! machine by exhaustive key search.
//!
//! The attack is brute force: every ordered choice of 3 rotors from the
//! wheel pool, every reflector, and every one of the 26³ starting positions
//! is simulated against the ciphertext. Each candidate decryption is scored
//! by how far its letter distribution diverges from English monogram
//! frequencies, and only the best few candidates are retained.
//!
//! # Pipeline
//!
//! ```text
//! ConfigurationSpace ──► bounded work channel ──► worker threads
//!   (lazy enumerator)                             (Machine + Analysis,
//!                                                  one owned set each)
//!                                                        │
//!                        drain loop ◄── bounded result channel
//!                            │
//!                     SortedFixedList (top-K, best first)
//! ```
//!
//! Rotor wiring is immutable after construction and shared read-only by all
//! workers. Each [`machine::Machine`] is exclusively owned by one worker, so
//! the only synchronization in the hot path is the two channels and the
//! candidate free-list.

pub mod catalog;
pub mod error;
pub mod frequency;
pub mod machine;
pub mod rotor;
pub mod search;
pub mod topk;

pub use catalog::Catalog;
pub use error::Error;
pub use machine::Machine;
pub use rotor::Rotor;
pub use search::{crack, Candidate, ConfigurationSpace};
pub use topk::SortedFixedList;
