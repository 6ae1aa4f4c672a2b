//! Star field generation - the galaxy's stellar population
//!
//! A pure total function of (seed, count). Each star draws from its own
//! channel block, so star `i` never depends on star `i - 1` having been
//! generated. Positions sit on a spherical shell; masses follow a four-tier
//! categorical approximation of real stellar demographics.

pub mod names;
pub mod spectral;

use serde::{Deserialize, Serialize};

use crate::core::error::{CosmogenError, Result};
use crate::core::types::{sphere_direction, stable_id, Position, Seed};
use crate::stream::{SeededStream, CHANNEL_STRIDE};

pub use names::star_name;
pub use spectral::SpectralClass;

// ============================================================================
// Constants
// ============================================================================

/// Inner radius of the stellar shell (distance units).
pub const SHELL_MIN_RADIUS: f64 = 600.0;

/// Outer radius of the stellar shell. Doubles as the default galaxy radius
/// handed to the warp lane builder.
pub const SHELL_MAX_RADIUS: f64 = 9_000.0;

/// Mass tiers: cumulative roll threshold, mass range, temperature range.
///
/// Roughly real demographics: ~70% red dwarfs, then orange dwarfs, then
/// sun-like stars, with the last 5% massive and hot. Mass and temperature
/// are sampled independently inside a tier.
const MASS_TIERS: [(f64, (f64, f64), (f64, f64)); 4] = [
    (0.70, (0.08, 0.45), (2_500.0, 3_700.0)),
    (0.85, (0.45, 0.80), (3_700.0, 5_200.0)),
    (0.95, (0.80, 1.40), (5_200.0, 6_000.0)),
    (1.01, (1.40, 18.0), (6_000.0, 34_000.0)),
];

// ============================================================================
// Star
// ============================================================================

/// A generated star. Plain serializable data, immutable after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub spectral_class: SpectralClass,
    /// Solar masses.
    pub mass: f64,
    /// Solar radii.
    pub radius: f64,
    /// Surface temperature in Kelvin.
    pub temperature: f64,
    /// Solar luminosities, derived as mass^3.5.
    pub luminosity: f64,
    /// Billions of years.
    pub age: f64,
    /// Suggested planet count for the system generator (0..=8).
    pub planet_count_hint: u32,
}

impl Star {
    /// Check the caller contract: finite numbers, positive physical fields,
    /// a non-empty id. Garbage input is an error, never fabricated data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(CosmogenError::InvalidStar("empty star id".into()));
        }
        let physical = [
            ("mass", self.mass),
            ("radius", self.radius),
            ("temperature", self.temperature),
            ("luminosity", self.luminosity),
        ];
        for (field, value) in physical {
            if !value.is_finite() || value <= 0.0 {
                return Err(CosmogenError::InvalidStar(format!(
                    "star {}: {} must be finite and positive, got {}",
                    self.name, field, value
                )));
            }
        }
        if !self.position.is_finite() {
            return Err(CosmogenError::InvalidStar(format!(
                "star {}: non-finite position",
                self.name
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Generate the galaxy's star population.
///
/// Deterministic in (seed, count); a count of zero yields an empty list.
pub fn generate_stars(seed: Seed, count: usize) -> Vec<Star> {
    let stream = SeededStream::new(seed);
    (0..count).map(|i| generate_star(&stream, seed, i)).collect()
}

fn generate_star(stream: &SeededStream, seed: Seed, index: usize) -> Star {
    let mut draw = stream.cursor(index as i64 * CHANNEL_STRIDE);

    let direction = sphere_direction(draw.unit(), draw.unit());
    let shell_radius = draw.range(SHELL_MIN_RADIUS, SHELL_MAX_RADIUS);
    let position = direction * shell_radius as f32;

    let tier_roll = draw.unit();
    let (_, mass_range, temp_range) = MASS_TIERS
        .iter()
        .find(|(threshold, _, _)| tier_roll < *threshold)
        .copied()
        .unwrap_or(MASS_TIERS[3]);

    let mass = draw.range(mass_range.0, mass_range.1);
    let temperature = draw.range(temp_range.0, temp_range.1);
    let radius = stellar_radius(mass);
    let luminosity = libm::pow(mass, 3.5);
    let age = draw.range(1.0, 11.0);
    let planet_count_hint = draw.index(9) as u32;

    Star {
        id: stable_id(&format!("star:{}:{}", seed, index)),
        name: star_name(index),
        position,
        spectral_class: SpectralClass::from_temperature(temperature),
        mass,
        radius,
        temperature,
        luminosity,
        age,
        planet_count_hint,
    }
}

/// Radius from mass, three power-law regimes.
///
/// Red dwarfs run smaller than the main-sequence law predicts; giants run
/// larger with a shallower exponent.
pub fn stellar_radius(mass: f64) -> f64 {
    if mass < 0.5 {
        0.7 * libm::pow(mass, 0.8)
    } else if mass > 8.0 {
        1.8 * libm::pow(mass, 0.6)
    } else {
        libm::pow(mass, 0.8)
    }
}
