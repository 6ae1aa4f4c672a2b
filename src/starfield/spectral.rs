//! Spectral classification - temperature thresholds and display colors

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Single-letter stellar temperature class, O hottest to M coolest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    /// Classify a star by surface temperature (Kelvin).
    ///
    /// The thresholds are fixed; every finite temperature maps to exactly
    /// one class, so classification is total.
    pub fn from_temperature(kelvin: f64) -> Self {
        if kelvin > 30_000.0 {
            SpectralClass::O
        } else if kelvin > 10_000.0 {
            SpectralClass::B
        } else if kelvin > 7_500.0 {
            SpectralClass::A
        } else if kelvin > 6_000.0 {
            SpectralClass::F
        } else if kelvin > 5_200.0 {
            SpectralClass::G
        } else if kelvin > 3_700.0 {
            SpectralClass::K
        } else {
            SpectralClass::M
        }
    }

    /// Representative display color for the class (consumer convenience).
    pub fn color(&self) -> Rgb {
        match self {
            SpectralClass::O => [0.61, 0.69, 1.00],
            SpectralClass::B => [0.67, 0.75, 1.00],
            SpectralClass::A => [0.79, 0.84, 1.00],
            SpectralClass::F => [0.97, 0.95, 1.00],
            SpectralClass::G => [1.00, 0.93, 0.89],
            SpectralClass::K => [1.00, 0.82, 0.63],
            SpectralClass::M => [1.00, 0.60, 0.46],
        }
    }
}
