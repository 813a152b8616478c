//! Rotor calibration data.
//!
//! Wheel definitions are data, not code: the built-in historical set is an
//! embedded JSON document, and alternative or synthetic sets load from a file
//! of the same shape.

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::error::Error;
use crate::rotor::Rotor;

/// The five historical rotors and three reflectors, as issued in 1930/1938.
const HISTORICAL_JSON: &str = r#"{
  "rotors": [
    { "name": "Rotor 1, 1930", "wiring": "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "turnover": "Q" },
    { "name": "Rotor 2, 1930", "wiring": "AJDKSIRUXBLHWTMCQGZNPYFVOE", "turnover": "E" },
    { "name": "Rotor 3, 1930", "wiring": "BDFHJLCPRTXVZNYEIWGAKMUSQO", "turnover": "V" },
    { "name": "Rotor 4, 1938", "wiring": "ESOVPZJAYQUIRHXLNFTGKDCMWB", "turnover": "J" },
    { "name": "Rotor 5, 1938", "wiring": "VZBRGITYUPSDNHLXAWMJQOFECK", "turnover": "Z" }
  ],
  "reflectors": [
    { "name": "Reflector A", "wiring": "EJMZALYXVBWFCRQUONTSPIKHGD", "turnover": "Z" },
    { "name": "Reflector B", "wiring": "YRUHQSLDPXNGOKMIEBFZCWVJAT", "turnover": "Z" },
    { "name": "Reflector C", "wiring": "FVPJIAOYEDRZXWGCTKUQSBNMHL", "turnover": "Z" }
  ]
}"#;

/// One wheel definition as it appears in a catalog file. Reflectors carry a
/// placeholder turnover; it is never consulted.
#[derive(Debug, Deserialize)]
pub struct RotorSpec {
    pub name: String,
    pub wiring: String,
    pub turnover: char,
}

#[derive(Debug, Deserialize)]
struct CatalogSpec {
    rotors: Vec<RotorSpec>,
    reflectors: Vec<RotorSpec>,
}

/// A rotor pool and reflector set ready to search over.
#[derive(Debug)]
pub struct Catalog {
    pub rotors: Vec<Rotor>,
    pub reflectors: Vec<Rotor>,
}

lazy_static! {
    static ref HISTORICAL: Catalog = Catalog::from_json(HISTORICAL_JSON)
        .expect("built-in rotor catalog is well-formed");
}

impl Catalog {
    /// The built-in historical wheel set.
    pub fn historical() -> &'static Catalog {
        &HISTORICAL
    }

    /// Load a catalog from a JSON file with `rotors` and `reflectors` arrays.
    pub fn from_json_file(path: &std::path::Path) -> Result<Catalog, Error> {
        let text = std::fs::read_to_string(path)?;
        Catalog::from_json(&text)
    }

    fn from_json(text: &str) -> Result<Catalog, Error> {
        let spec: CatalogSpec = serde_json::from_str(text)?;
        let build = |specs: Vec<RotorSpec>| -> Result<Vec<Rotor>, Error> {
            specs
                .into_iter()
                .map(|s| Rotor::new(&s.name, &s.wiring, s.turnover))
                .collect()
        };
        Ok(Catalog {
            rotors: build(spec.rotors)?,
            reflectors: build(spec.reflectors)?,
        })
    }
}
