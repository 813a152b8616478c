//! Error types for catalog loading and search setup.
//!
//! Nothing on the per-configuration decrypt/score path can fail; errors only
//! arise while building rotors or validating inputs, before any search work
//! starts.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rotor definition is malformed: wiring not a 26-letter permutation,
    /// or the turnover is not an uppercase letter.
    #[error("invalid rotor spec for {name}: {reason}")]
    InvalidRotorSpec { name: String, reason: String },

    /// The ciphertext is empty or contains characters outside A-Z.
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// A rotor catalog file could not be read.
    #[error("cannot read rotor catalog: {0}")]
    CatalogIo(#[from] std::io::Error),

    /// A rotor catalog file could not be parsed.
    #[error("cannot parse rotor catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),
}
