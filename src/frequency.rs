//! Letter-frequency scoring of candidate plaintexts.

/// Expected English monogram frequencies in percent, indexed by letter
/// offset (A..Z). Fixed calibration data.
pub const ENGLISH_FREQUENCIES: [f64; 26] = [
    8.167,  // A
    1.492,  // B
    2.782,  // C
    4.253,  // D
    12.702, // E
    2.228,  // F
    2.015,  // G
    6.094,  // H
    6.966,  // I
    0.153,  // J
    0.772,  // K
    4.025,  // L
    2.406,  // M
    6.749,  // N
    7.507,  // O
    1.929,  // P
    0.095,  // Q
    5.987,  // R
    6.327,  // S
    9.056,  // T
    2.758,  // U
    0.978,  // V
    2.360,  // W
    0.150,  // X
    1.974,  // Y
    0.074,  // Z
];

/// Running letter counts over one candidate decryption.
///
/// Reused across configurations by the search workers; call [`reset`] between
/// messages.
///
/// [`reset`]: Analysis::reset
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    counts: [u32; 26],
    total: u32,
}

impl Analysis {
    pub fn new() -> Analysis {
        Analysis::default()
    }

    /// Record one output letter (index 0..26).
    #[inline]
    pub fn add(&mut self, letter: u8) {
        self.counts[letter as usize] += 1;
        self.total += 1;
    }

    pub fn reset(&mut self) {
        self.counts = [0; 26];
        self.total = 0;
    }

    /// Sum of |expected - observed| frequency percentages over the letters
    /// that actually occurred. Letters never seen contribute nothing, so an
    /// absent rare letter is not held against a candidate. Lower is better.
    pub fn divergence(&self) -> f64 {
        let mut diff = 0.0;
        for (letter, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let observed = (count as f64 / self.total as f64) * 100.0;
            diff += (ENGLISH_FREQUENCIES[letter] - observed).abs();
        }
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(message: &str) -> f64 {
        let mut analysis = Analysis::new();
        for c in message.bytes() {
            analysis.add(c - b'A');
        }
        analysis.divergence()
    }

    #[test]
    fn common_letter_beats_rare_letter() {
        // All-'E' text sits much closer to English statistics than all-'Z'.
        assert!(score_of("EEEEEEEEEE") < score_of("ZZZZZZZZZZ"));
    }

    #[test]
    fn single_letter_score_is_exact() {
        // One letter observed at 100%: divergence is |expected - 100|.
        assert!((score_of("EEEE") - (100.0 - 12.702)).abs() < 1e-9);
        assert!((score_of("ZZZZ") - (100.0 - 0.074)).abs() < 1e-9);
    }

    #[test]
    fn unseen_letters_do_not_penalize() {
        let mut analysis = Analysis::new();
        assert_eq!(analysis.divergence(), 0.0);

        analysis.add(b'E' - b'A');
        let with_one = analysis.divergence();
        assert!((with_one - (100.0 - 12.702)).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_counts() {
        let mut analysis = Analysis::new();
        for c in "HELLOWORLD".bytes() {
            analysis.add(c - b'A');
        }
        analysis.reset();
        assert_eq!(analysis.divergence(), 0.0);
    }

    #[test]
    fn english_text_beats_uniform_noise() {
        let english =
            "THISISASLIGHTLYLONGERTESTSOIHAVETOSEEIFICANKEEPWRITINGALONGERSTRINGTOUSEASINPUT";
        let noise = "ABCDEFGHIJKLMNOPQRSTUVWXYZABCDEFGHIJKLMNOPQRSTUVWXYZ";
        assert!(score_of(english) < score_of(noise));
    }
}
