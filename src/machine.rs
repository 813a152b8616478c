//! The cipher machine proper: three rotors plus a reflector, with the
//! mechanical stepping sequence including the double-step anomaly.
//!
//! Letters are handled as indices 0..26 throughout; callers convert to and
//! from ASCII at the edges.

use std::fmt;

use crate::rotor::{Rotor, ALPHABET_LEN};

/// One machine instance: immutable wiring references plus the mutable rotor
/// positions. Exclusively owned by a single search task, so the position
/// state needs no locking.
///
/// Rotor order is left to right: `r1` is the slow leftmost wheel, `r3` the
/// fast rightmost wheel where the signal enters.
#[derive(Debug, Clone)]
pub struct Machine<'a> {
    r1: &'a Rotor,
    r2: &'a Rotor,
    r3: &'a Rotor,
    reflector: &'a Rotor,
    // Starting letters, kept for the configuration description.
    key: [u8; 3],
    p1: u8,
    p2: u8,
    p3: u8,
}

impl<'a> Machine<'a> {
    /// Build a machine keyed to `key`, a triple of starting letter indices
    /// (leftmost rotor first).
    pub fn new(rotors: [&'a Rotor; 3], reflector: &'a Rotor, key: [u8; 3]) -> Machine<'a> {
        let [r1, r2, r3] = rotors;
        Machine {
            r1,
            r2,
            r3,
            reflector,
            key,
            p1: key[0],
            p2: key[1],
            p3: key[2],
        }
    }

    /// Current rotor positions, leftmost first.
    pub fn positions(&self) -> (u8, u8, u8) {
        (self.p1, self.p2, self.p3)
    }

    /// Press one key: advance the rotors, then trace the signal through the
    /// rotor stack, the reflector, and back. Input and output are letter
    /// indices 0..26.
    pub fn step(&mut self, input: u8) -> u8 {
        self.move_rotors();
        let x = pass(self.r3, self.p3, input, false);
        let x = pass(self.r2, self.p2, x, false);
        let x = pass(self.r1, self.p1, x, false);
        let x = pass(self.reflector, 0, x, false);
        let x = pass(self.r1, self.p1, x, true);
        let x = pass(self.r2, self.p2, x, true);
        pass(self.r3, self.p3, x, true)
    }

    fn move_rotors(&mut self) {
        self.p3 = (self.p3 + 1) % ALPHABET_LEN;
        if self.r3.at_turnover(self.p3) {
            self.p2 = (self.p2 + 1) % ALPHABET_LEN;
            if self.r2.at_turnover(self.p2) {
                self.p1 = (self.p1 + 1) % ALPHABET_LEN;
            }
        }

        // Double step: once the middle rotor sits one short of its notch and
        // the fast rotor has just passed its own, the middle rotor advances
        // again on this keystroke. p3 == 0 means the fast rotor wrapped, and
        // no notch value matches a negative lookbehind.
        if self.p3 > 0 && self.r3.at_turnover(self.p3 - 1) && self.r2.at_turnover(self.p2 + 1) {
            self.p2 = (self.p2 + 1) % ALPHABET_LEN;
            if self.r2.at_turnover(self.p2) {
                self.p1 = (self.p1 + 1) % ALPHABET_LEN;
            }
        }
    }
}

impl fmt::Display for Machine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KEY: {}{}{}\nROTORS: {}, {}, {}\nREFLECTOR: {}",
            (b'A' + self.key[0]) as char,
            (b'A' + self.key[1]) as char,
            (b'A' + self.key[2]) as char,
            self.r1.description(),
            self.r2.description(),
            self.r3.description(),
            self.reflector.description(),
        )
    }
}

/// One signal pass through a rotor sitting at `offset`: shift the contact
/// index by the rotor position, look it up, shift back (wrapping negative
/// results by adding 26).
#[inline]
fn pass(rotor: &Rotor, offset: u8, input: u8, reverse: bool) -> u8 {
    let contact = (input + offset) % ALPHABET_LEN;
    let mapped = if reverse {
        rotor.reverse(contact)
    } else {
        rotor.forward(contact)
    };
    (mapped + ALPHABET_LEN - offset) % ALPHABET_LEN
}
