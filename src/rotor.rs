//! Rotor wiring: an immutable substitution permutation over the alphabet
//! plus a mechanical turnover notch.

use crate::error::Error;

/// Number of contacts on a rotor, one per letter.
pub const ALPHABET_LEN: u8 = 26;

/// A wired rotor wheel (or reflector — a reflector is just a self-inverse
/// rotor whose notch is never consulted).
///
/// Wiring is stored as letter indices 0..26 in both directions so that a
/// signal pass is two array lookups. Immutable after construction and safe
/// to share across threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    description: String,
    forward: [u8; 26],
    reverse: [u8; 26],
    // Turnover notch, stored as letter offset + 1. Positions are 0..26, so
    // a 'Z' notch (value 26) can only match through the lookbehind/lookahead
    // checks in the stepping logic, never a current-position check. The
    // stepping fixtures depend on this convention; do not "fix" it.
    turnover: u8,
}

impl Rotor {
    /// Build a rotor from a 26-letter wiring permutation and a turnover
    /// letter. `wiring[i]` is the image of the i-th alphabet letter.
    pub fn new(description: &str, wiring: &str, turnover: char) -> Result<Rotor, Error> {
        let bad = |reason: &str| Error::InvalidRotorSpec {
            name: description.to_string(),
            reason: reason.to_string(),
        };

        if !turnover.is_ascii_uppercase() {
            return Err(bad("turnover must be an uppercase letter"));
        }
        if wiring.len() != ALPHABET_LEN as usize {
            return Err(bad("wiring must be exactly 26 letters"));
        }

        let mut forward = [0u8; 26];
        let mut reverse = [0u8; 26];
        let mut seen = [false; 26];
        for (i, c) in wiring.bytes().enumerate() {
            if !c.is_ascii_uppercase() {
                return Err(bad("wiring must contain only uppercase letters"));
            }
            let target = c - b'A';
            if seen[target as usize] {
                return Err(bad("wiring must be a permutation of the alphabet"));
            }
            seen[target as usize] = true;
            forward[i] = target;
            reverse[target as usize] = i as u8;
        }

        Ok(Rotor {
            description: description.to_string(),
            forward,
            reverse,
            turnover: (turnover as u8 - b'A') + 1,
        })
    }

    /// Display label, e.g. `"Rotor 1, 1930"`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Right-to-left signal pass: image of letter index `input`.
    #[inline]
    pub fn forward(&self, input: u8) -> u8 {
        self.forward[input as usize]
    }

    /// Left-to-right signal pass: preimage of letter index `input`.
    #[inline]
    pub fn reverse(&self, input: u8) -> u8 {
        self.reverse[input as usize]
    }

    /// Whether `position` sits on the turnover notch.
    #[inline]
    pub fn at_turnover(&self, position: u8) -> bool {
        position == self.turnover
    }
}
