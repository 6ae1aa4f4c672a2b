//! World types and temperature bands
//!
//! The closed 15-variant `WorldType` enum is the load-bearing table of the
//! system generator: typing, radius ranges, atmospheres, heat behavior, and
//! ring odds are all keyed by it with exhaustive matches, so a missing case
//! is a compile error rather than a silent bug. The temperature-banded
//! weight tables below encode the generator's defining behavior; band
//! boundaries and relative weights are fixed.

use serde::{Deserialize, Serialize};

// ============================================================================
// WorldType
// ============================================================================

/// Closed enumeration of planet types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldType {
    GasGiant,
    FrostGiant,
    AridWorld,
    BarrenWorld,
    DustyWorld,
    GrasslandWorld,
    JungleWorld,
    MarshyWorld,
    MartianWorld,
    MethaneWorld,
    SandyWorld,
    SnowyWorld,
    TundraWorld,
    NuclearWorld,
    OceanWorld,
}

impl WorldType {
    /// Stable snake_case label, used in texture-variant hashing.
    pub fn label(&self) -> &'static str {
        match self {
            WorldType::GasGiant => "gas_giant",
            WorldType::FrostGiant => "frost_giant",
            WorldType::AridWorld => "arid_world",
            WorldType::BarrenWorld => "barren_world",
            WorldType::DustyWorld => "dusty_world",
            WorldType::GrasslandWorld => "grassland_world",
            WorldType::JungleWorld => "jungle_world",
            WorldType::MarshyWorld => "marshy_world",
            WorldType::MartianWorld => "martian_world",
            WorldType::MethaneWorld => "methane_world",
            WorldType::SandyWorld => "sandy_world",
            WorldType::SnowyWorld => "snowy_world",
            WorldType::TundraWorld => "tundra_world",
            WorldType::NuclearWorld => "nuclear_world",
            WorldType::OceanWorld => "ocean_world",
        }
    }

    /// Gas or frost giant.
    pub fn is_giant(&self) -> bool {
        matches!(self, WorldType::GasGiant | WorldType::FrostGiant)
    }

    /// Radius range in Earth radii.
    pub fn radius_range(&self) -> (f64, f64) {
        match self {
            WorldType::GasGiant => (6.0, 14.0),
            WorldType::FrostGiant => (5.0, 11.0),
            WorldType::AridWorld => (0.6, 1.8),
            WorldType::BarrenWorld => (0.3, 1.2),
            WorldType::DustyWorld => (0.4, 1.4),
            WorldType::GrasslandWorld => (0.6, 1.8),
            WorldType::JungleWorld => (0.6, 1.8),
            WorldType::MarshyWorld => (0.6, 1.8),
            WorldType::MartianWorld => (0.4, 1.1),
            WorldType::MethaneWorld => (0.8, 2.2),
            WorldType::SandyWorld => (0.5, 1.5),
            WorldType::SnowyWorld => (0.5, 1.6),
            WorldType::TundraWorld => (0.5, 1.6),
            WorldType::NuclearWorld => (0.6, 1.6),
            WorldType::OceanWorld => (0.6, 1.8),
        }
    }

    /// Habitable types square their radius roll to bias toward the low end.
    pub fn biases_small(&self) -> bool {
        matches!(
            self,
            WorldType::GrasslandWorld
                | WorldType::OceanWorld
                | WorldType::JungleWorld
                | WorldType::MarshyWorld
                | WorldType::AridWorld
        )
    }

    /// Density factor applied to mass = radius^3. Giants are mostly gas.
    pub fn density_factor(&self) -> f64 {
        match self {
            WorldType::GasGiant => 0.3,
            WorldType::FrostGiant => 0.35,
            _ => 1.0,
        }
    }

    /// Surface temperature multiplier: dust traps heat, methane and snow
    /// atmospheres cool.
    pub fn heat_multiplier(&self) -> f64 {
        match self {
            WorldType::DustyWorld => 1.15,
            WorldType::NuclearWorld => 1.3,
            WorldType::MethaneWorld => 0.85,
            WorldType::SnowyWorld => 0.9,
            _ => 1.0,
        }
    }

    /// Atmosphere composition, fixed per type, ordered by abundance.
    pub fn atmosphere(&self) -> &'static [&'static str] {
        match self {
            WorldType::GasGiant => &["hydrogen", "helium", "methane"],
            WorldType::FrostGiant => &["hydrogen", "helium", "methane", "ammonia"],
            WorldType::AridWorld => &["nitrogen", "oxygen", "argon"],
            WorldType::BarrenWorld => &[],
            WorldType::DustyWorld => &["carbon dioxide", "nitrogen"],
            WorldType::GrasslandWorld => &["nitrogen", "oxygen", "argon"],
            WorldType::JungleWorld => &["nitrogen", "oxygen", "water vapor"],
            WorldType::MarshyWorld => &["nitrogen", "oxygen", "methane", "water vapor"],
            WorldType::MartianWorld => &["carbon dioxide", "nitrogen", "argon"],
            WorldType::MethaneWorld => &["nitrogen", "methane"],
            WorldType::SandyWorld => &["nitrogen", "carbon dioxide"],
            WorldType::SnowyWorld => &["nitrogen", "oxygen"],
            WorldType::TundraWorld => &["nitrogen", "oxygen", "carbon dioxide"],
            WorldType::NuclearWorld => &["carbon dioxide", "sulfur dioxide", "radon"],
            WorldType::OceanWorld => &["nitrogen", "oxygen", "water vapor"],
        }
    }

    /// Size of the per-type texture palette the renderer indexes into.
    pub fn palette_size(&self) -> u32 {
        match self {
            WorldType::GasGiant => 6,
            WorldType::FrostGiant => 5,
            WorldType::GrasslandWorld
            | WorldType::OceanWorld
            | WorldType::JungleWorld
            | WorldType::MarshyWorld
            | WorldType::AridWorld => 4,
            _ => 3,
        }
    }
}

// ============================================================================
// TemperatureBand
// ============================================================================

/// Equilibrium-temperature band a planet falls into, used to select its
/// world-type weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureBand {
    VeryHot,
    Hot,
    Warm,
    Cold,
    Frozen,
}

impl TemperatureBand {
    /// Band from equilibrium temperature (Kelvin). Thresholds are fixed.
    pub fn from_kelvin(kelvin: f64) -> Self {
        if kelvin > 1_000.0 {
            TemperatureBand::VeryHot
        } else if kelvin > 600.0 {
            TemperatureBand::Hot
        } else if kelvin > 273.0 {
            TemperatureBand::Warm
        } else if kelvin > 150.0 {
            TemperatureBand::Cold
        } else {
            TemperatureBand::Frozen
        }
    }

    /// Weighted world-type table for this band (weights sum to 100).
    pub fn type_table(&self) -> &'static [(WorldType, u32)] {
        match self {
            TemperatureBand::VeryHot => &[
                (WorldType::BarrenWorld, 30),
                (WorldType::DustyWorld, 25),
                (WorldType::NuclearWorld, 20),
                (WorldType::SandyWorld, 15),
                (WorldType::MartianWorld, 10),
            ],
            TemperatureBand::Hot => &[
                (WorldType::AridWorld, 30),
                (WorldType::SandyWorld, 25),
                (WorldType::DustyWorld, 20),
                (WorldType::BarrenWorld, 15),
                (WorldType::MartianWorld, 10),
            ],
            TemperatureBand::Warm => &[
                (WorldType::GrasslandWorld, 25),
                (WorldType::OceanWorld, 25),
                (WorldType::JungleWorld, 20),
                (WorldType::MarshyWorld, 15),
                (WorldType::AridWorld, 15),
            ],
            TemperatureBand::Cold => &[
                (WorldType::TundraWorld, 25),
                (WorldType::SnowyWorld, 25),
                (WorldType::MartianWorld, 20),
                (WorldType::MethaneWorld, 15),
                (WorldType::GasGiant, 15),
            ],
            TemperatureBand::Frozen => &[
                (WorldType::FrostGiant, 30),
                (WorldType::MethaneWorld, 20),
                (WorldType::SnowyWorld, 20),
                (WorldType::TundraWorld, 15),
                (WorldType::GasGiant, 15),
            ],
        }
    }
}

/// Draw a world type from the band's table.
///
/// Giant entries only survive beyond the frost line; gated-out entries are
/// removed and the remaining weights renormalized before the draw.
pub fn pick_world_type(
    band: TemperatureBand,
    orbit_radius: f64,
    frost_line: f64,
    roll: f64,
) -> WorldType {
    let table = band.type_table();
    let eligible: Vec<(WorldType, u32)> = table
        .iter()
        .filter(|(world_type, _)| !world_type.is_giant() || orbit_radius > frost_line)
        .copied()
        .collect();

    let total: u32 = eligible.iter().map(|(_, weight)| weight).sum();
    let mut target = roll * total as f64;
    for (world_type, weight) in &eligible {
        if target < *weight as f64 {
            return *world_type;
        }
        target -= *weight as f64;
    }
    eligible.last().map(|(t, _)| *t).unwrap_or(table[0].0)
}
