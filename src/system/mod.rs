//! Planetary system generation
//!
//! Given one star and a seed, deterministically lays out orbits, types each
//! planet from its equilibrium-temperature band, and fills in moons, rings,
//! and asteroid belts. The per-system stream is keyed by the caller's seed
//! folded with the star id, so one galaxy seed yields per-star-distinct yet
//! idempotent systems. Callers cache results by star id (see `cache`).

pub mod cache;
pub mod world_type;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::core::error::Result;
use crate::core::types::{roman_numeral, stable_id, Seed};
use crate::starfield::Star;
use crate::stream::{fnv1a, DrawCursor, SeededStream, CHANNEL_STRIDE};

pub use cache::{system_for, MemorySystemCache, SystemCache};
pub use world_type::{pick_world_type, TemperatureBand, WorldType};

// ============================================================================
// Constants
// ============================================================================

/// Equilibrium temperature scale: `255 * sqrt(L / d)` Kelvin.
const EQUILIBRIUM_SCALE: f64 = 255.0;

/// Habitable zone bounds as luminosity divisors: inner `sqrt(L/1.1)`,
/// outer `sqrt(L/0.53)`.
const HZ_INNER_DIVISOR: f64 = 1.1;
const HZ_OUTER_DIVISOR: f64 = 0.53;

/// Frost line at `2.7 * sqrt(L)`; giants only form beyond it.
const FROST_LINE_FACTOR: f64 = 2.7;

/// Outermost orbit allowed, as a multiple of `sqrt(L)`. Layout stops here.
const ORBIT_CAP_FACTOR: f64 = 50.0;

/// Surface temperature: `star temperature / (d^2 * 20)`, before the
/// per-type heat multiplier.
const SURFACE_TEMP_DIVISOR: f64 = 20.0;

/// Orbit spacing factor range for the Titius-Bode-like progression.
const SPACING_FACTOR: (f64, f64) = (1.3, 2.0);

/// Gap ratio between consecutive planets that opens a belt candidate.
const BELT_GAP_RATIO: f64 = 1.8;

/// Channel block for system-level belt draws, clear of any planet block.
const BELT_CHANNEL_BASE: i64 = 100_000;

// ============================================================================
// Data model
// ============================================================================

/// Surface feature slot. The type is part of the data model; feature
/// generation itself is a consumer concern, so generated lists are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceFeature {
    pub id: String,
    pub name: String,
    pub kind: String,
}

/// A moon, owned by exactly one planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moon {
    pub id: String,
    pub name: String,
    /// Earth radii.
    pub radius: f64,
    /// Planet radii.
    pub orbit_radius: f64,
    pub orbit_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingComposition {
    Ice,
    Rock,
    Dust,
    Mixed,
}

impl RingComposition {
    pub fn color(&self) -> Rgb {
        match self {
            RingComposition::Ice => [0.80, 0.85, 0.90],
            RingComposition::Rock => [0.45, 0.40, 0.35],
            RingComposition::Dust => [0.60, 0.50, 0.40],
            RingComposition::Mixed => [0.60, 0.60, 0.60],
        }
    }
}

/// A ring system, owned by exactly one planet. Radii in planet radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRing {
    pub id: String,
    pub name: String,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub thickness: f64,
    pub density: f64,
    pub color: Rgb,
    pub composition: RingComposition,
}

/// A generated planet with its owned moons and rings.
///
/// Position is not stored: the caller computes it analytically from
/// `orbit_radius`, `orbit_speed`, `initial_angle`, and elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: String,
    pub name: String,
    /// Orbital distance in the same units the habitable zone is derived in.
    pub orbit_radius: f64,
    pub orbit_speed: f64,
    pub rotation_speed: f64,
    /// Starting orbital angle in radians.
    pub initial_angle: f64,
    /// Orbital inclination in radians.
    pub inclination: f64,
    /// Earth radii.
    pub radius: f64,
    /// Earth masses (radius^3 scaled by type density).
    pub mass: f64,
    pub world_type: WorldType,
    /// Surface temperature in Kelvin.
    pub temperature: f64,
    /// Gas names, fixed per world type, ordered by abundance.
    pub atmosphere: Vec<String>,
    pub moons: Vec<Moon>,
    pub rings: Vec<PlanetRing>,
    pub surface_features: Vec<SurfaceFeature>,
    /// Index into the renderer's fixed per-type texture palette.
    pub texture_variant: u32,
}

/// An asteroid belt, owned by the system. Radii in absolute orbit units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidBelt {
    pub id: String,
    pub name: String,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub density: f64,
    pub asteroid_count: u32,
}

/// A star's fully generated planetary system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: String,
    pub star_id: String,
    /// Denormalized copy for consumers that hold the system alone.
    pub star: Star,
    pub planets: Vec<Planet>,
    pub belts: Vec<AsteroidBelt>,
}

// ============================================================================
// Orbital zones
// ============================================================================

/// Luminosity-derived distances the layout and typing steps key off.
#[derive(Debug, Clone, Copy)]
struct OrbitalZones {
    hz_inner: f64,
    hz_outer: f64,
    frost_line: f64,
    orbit_cap: f64,
}

impl OrbitalZones {
    fn from_luminosity(luminosity: f64) -> Self {
        let sqrt_l = luminosity.sqrt();
        Self {
            hz_inner: (luminosity / HZ_INNER_DIVISOR).sqrt(),
            hz_outer: (luminosity / HZ_OUTER_DIVISOR).sqrt(),
            frost_line: FROST_LINE_FACTOR * sqrt_l,
            orbit_cap: ORBIT_CAP_FACTOR * sqrt_l,
        }
    }
}

/// Equilibrium temperature from stellar flux alone, used for type banding.
pub fn equilibrium_temperature(luminosity: f64, orbit_radius: f64) -> f64 {
    EQUILIBRIUM_SCALE * (luminosity / orbit_radius).sqrt()
}

// ============================================================================
// Generation
// ============================================================================

/// Generate the star's planetary system.
///
/// Idempotent: the same (star, seed) always yields an identical system.
/// A star whose planet budget resolves to zero gets an empty planet list
/// and a single whole-system belt candidate.
pub fn generate_system(star: &Star, seed: Seed) -> Result<StarSystem> {
    star.validate()?;

    // Fold the star id into the stream seed, masked to 32 bits so
    // seed + channel stays within f64's exact integer range.
    let system_seed = seed ^ ((fnv1a(star.id.as_bytes()) & 0xFFFF_FFFF) as i64);
    let stream = SeededStream::new(system_seed);

    let luminosity = libm::pow(star.mass, 3.5);
    let zones = OrbitalZones::from_luminosity(luminosity);
    let planet_count = resolve_planet_count(star.planet_count_hint, star.mass);

    let distances = layout_orbits(&stream, luminosity, &zones, planet_count);
    let planets: Vec<Planet> = distances
        .iter()
        .enumerate()
        .map(|(i, &distance)| generate_planet(&stream, star, system_seed, i, distance, luminosity, &zones))
        .collect();

    let belts = generate_belts(&stream, star, system_seed, &distances, luminosity);

    tracing::debug!(
        star = %star.name,
        planets = planets.len(),
        belts = belts.len(),
        "generated system"
    );

    Ok(StarSystem {
        id: stable_id(&format!("system:{}:{}", seed, star.id)),
        star_id: star.id.clone(),
        star: star.clone(),
        planets,
        belts,
    })
}

/// Generate systems for many stars at once. Output order matches input
/// order; generation is pure, so the stars parallelize freely.
pub fn generate_systems(stars: &[Star], seed: Seed) -> Result<Vec<StarSystem>> {
    stars
        .par_iter()
        .map(|star| generate_system(star, seed))
        .collect()
}

/// Planet budget from the star's hint, bounded by stellar mass.
///
/// Massive stars disrupt formation and cap low; very low-mass stars pick up
/// an extra close-in planet.
fn resolve_planet_count(hint: u32, mass: f64) -> usize {
    let mut count = hint as usize;
    if mass > 8.0 {
        count = count.min(2);
    } else if mass > 4.0 {
        count = count.min(4);
    }
    if mass < 0.3 {
        count = (count + 1).min(9);
    }
    count
}

/// Lay out orbit distances as a geometric progression.
///
/// The first planet sits in the inner system scaled by luminosity; the
/// second is pulled toward the habitable zone; each later orbit is the
/// previous one times a factor in [1.3, 2.0). Layout stops at the cap, so
/// the returned list may be shorter than the budget.
fn layout_orbits(
    stream: &SeededStream,
    luminosity: f64,
    zones: &OrbitalZones,
    count: usize,
) -> Vec<f64> {
    let mut distances = Vec::with_capacity(count);
    for index in 0..count {
        // Layout draw lives at the head of each planet's channel block.
        let u = stream.unit(index as i64 * CHANNEL_STRIDE);
        let distance = match index {
            0 => luminosity.sqrt() * (0.3 + 0.3 * u),
            1 => {
                let hz_target = zones.hz_inner + u * (zones.hz_outer - zones.hz_inner);
                hz_target.max(distances[0] * SPACING_FACTOR.0)
            }
            _ => distances[index - 1] * (SPACING_FACTOR.0 + u * (SPACING_FACTOR.1 - SPACING_FACTOR.0)),
        };
        if distance > zones.orbit_cap {
            break;
        }
        distances.push(distance);
    }
    distances
}

fn generate_planet(
    stream: &SeededStream,
    star: &Star,
    system_seed: i64,
    index: usize,
    orbit_radius: f64,
    luminosity: f64,
    zones: &OrbitalZones,
) -> Planet {
    // Channel 0 of the block belongs to the layout pass.
    let mut draw = stream.cursor(index as i64 * CHANNEL_STRIDE + 1);

    let band = TemperatureBand::from_kelvin(equilibrium_temperature(luminosity, orbit_radius));
    let world_type = pick_world_type(band, orbit_radius, zones.frost_line, draw.unit());

    let (radius_lo, radius_hi) = world_type.radius_range();
    let roll = draw.unit();
    let radius_roll = if world_type.biases_small() { roll * roll } else { roll };
    let radius = radius_lo + radius_roll * (radius_hi - radius_lo);
    let mass = radius.powi(3) * world_type.density_factor();

    let temperature = star.temperature / (orbit_radius * orbit_radius * SURFACE_TEMP_DIVISOR)
        * world_type.heat_multiplier();

    let initial_angle = draw.range(0.0, std::f64::consts::TAU);
    let inclination = draw.range(-0.15, 0.15);
    let rotation_speed = draw.range(0.02, 0.5);
    let orbit_speed = 0.4 * (star.mass / orbit_radius.powi(3)).sqrt();

    let name = format!("{} {}", star.name, roman_numeral(index + 1));
    let texture_variant =
        (fnv1a(format!("{}:{}:{}", star.name, index, world_type.label()).as_bytes())
            % world_type.palette_size() as u64) as u32;

    let moons = generate_moons(&mut draw, system_seed, index, &name, world_type, radius);
    let rings = generate_rings(&mut draw, system_seed, index, &name, world_type, radius);

    Planet {
        id: stable_id(&format!("planet:{}:{}", system_seed, index)),
        name,
        orbit_radius,
        orbit_speed,
        rotation_speed,
        initial_angle,
        inclination,
        radius,
        mass,
        world_type,
        temperature,
        atmosphere: world_type.atmosphere().iter().map(|s| s.to_string()).collect(),
        moons,
        rings,
        surface_features: Vec::new(),
        texture_variant,
    }
}

// ============================================================================
// Moons
// ============================================================================

/// Moon count scales with planet size: giants carry 2-9, large rocky
/// planets 1-4, medium 0-1, small none.
fn generate_moons(
    draw: &mut DrawCursor<'_>,
    system_seed: i64,
    planet_index: usize,
    planet_name: &str,
    world_type: WorldType,
    planet_radius: f64,
) -> Vec<Moon> {
    let count = if world_type.is_giant() {
        2 + draw.index(8)
    } else if planet_radius > 1.5 {
        1 + draw.index(4)
    } else if planet_radius > 0.8 {
        draw.index(2)
    } else {
        0
    };

    (0..count)
        .map(|j| {
            let radius = planet_radius * draw.range(0.08, 0.22);
            let orbit_radius = planet_radius * (2.2 + 1.6 * j as f64 + 0.8 * draw.unit());
            // Tighter orbits run faster, Kepler-flavored.
            let orbit_speed = draw.range(0.8, 1.2) / orbit_radius.sqrt();
            Moon {
                id: stable_id(&format!("moon:{}:{}:{}", system_seed, planet_index, j)),
                name: format!("{} {}", planet_name, (b'a' + j as u8) as char),
                radius,
                orbit_radius,
                orbit_speed,
            }
        })
        .collect()
}

// ============================================================================
// Rings
// ============================================================================

/// Ring composition odds by planet class (weights sum to 100).
fn ring_composition_table(world_type: WorldType) -> &'static [(RingComposition, u32)] {
    if world_type.is_giant() {
        &[
            (RingComposition::Ice, 50),
            (RingComposition::Rock, 20),
            (RingComposition::Dust, 20),
            (RingComposition::Mixed, 10),
        ]
    } else {
        &[
            (RingComposition::Rock, 40),
            (RingComposition::Dust, 40),
            (RingComposition::Ice, 10),
            (RingComposition::Mixed, 10),
        ]
    }
}

fn pick_ring_composition(world_type: WorldType, roll: f64) -> RingComposition {
    let table = ring_composition_table(world_type);
    let total: u32 = table.iter().map(|(_, w)| w).sum();
    let mut target = roll * total as f64;
    for (composition, weight) in table {
        if target < *weight as f64 {
            return *composition;
        }
        target -= *weight as f64;
    }
    table.last().unwrap().0
}

/// Giants ring 40% of the time with 1-3 ring systems; rocky planets above
/// one Earth radius ring 30% of the time with 1-2; nothing else rings.
fn generate_rings(
    draw: &mut DrawCursor<'_>,
    system_seed: i64,
    planet_index: usize,
    planet_name: &str,
    world_type: WorldType,
    planet_radius: f64,
) -> Vec<PlanetRing> {
    let count = if world_type.is_giant() {
        if draw.chance(0.4) {
            1 + draw.index(3)
        } else {
            0
        }
    } else if planet_radius > 1.0 {
        if draw.chance(0.3) {
            1 + draw.index(2)
        } else {
            0
        }
    } else {
        0
    };

    (0..count)
        .map(|r| {
            let inner_radius = draw.range(1.6, 2.8);
            let outer_radius = inner_radius + draw.range(0.4, 1.9);
            let thickness = draw.range(0.02, 0.14);
            let density = draw.range(0.2, 1.0);
            let composition = pick_ring_composition(world_type, draw.unit());
            PlanetRing {
                id: stable_id(&format!("ring:{}:{}:{}", system_seed, planet_index, r)),
                name: format!("{} Ring {}", planet_name, roman_numeral(r + 1)),
                inner_radius,
                outer_radius,
                thickness,
                density,
                color: composition.color(),
                composition,
            }
        })
        .collect()
}

// ============================================================================
// Asteroid belts
// ============================================================================

/// Scan the ordered orbit list for gaps wide enough to hold a belt.
fn belt_candidates(distances: &[f64], luminosity: f64) -> Vec<(f64, f64)> {
    let mut candidates = Vec::new();
    let sqrt_l = luminosity.sqrt();

    match distances.first() {
        None => {
            // Planetless system: one whole-system candidate.
            candidates.push((0.8 * sqrt_l, 2.2 * sqrt_l));
        }
        Some(&first) => {
            let inner = 0.35 * first;
            if inner > 0.2 {
                candidates.push((inner, 0.65 * first));
            }
            for pair in distances.windows(2) {
                if pair[1] / pair[0] > BELT_GAP_RATIO {
                    candidates.push((1.25 * pair[0], 0.8 * pair[1]));
                }
            }
            let last = *distances.last().unwrap();
            candidates.push((1.5 * last, 2.2 * last));
        }
    }

    candidates
}

/// Materialize 1-4 of the candidate gaps into actual belts.
///
/// Selection is a deterministic partial shuffle over candidate indices;
/// the chosen belts come back ordered by inner radius.
fn generate_belts(
    stream: &SeededStream,
    star: &Star,
    system_seed: i64,
    distances: &[f64],
    luminosity: f64,
) -> Vec<AsteroidBelt> {
    let candidates = belt_candidates(distances, luminosity);
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut draw = stream.cursor(BELT_CHANNEL_BASE);
    let target = (1 + draw.index(4)).min(candidates.len());

    let mut indices: Vec<usize> = (0..candidates.len()).collect();
    for i in 0..target {
        let j = i + draw.index(indices.len() - i);
        indices.swap(i, j);
    }
    let mut chosen: Vec<usize> = indices[..target].to_vec();
    chosen.sort_unstable_by(|a, b| {
        candidates[*a].0.partial_cmp(&candidates[*b].0).unwrap()
    });

    chosen
        .into_iter()
        .enumerate()
        .map(|(k, candidate_index)| {
            let (inner_radius, outer_radius) = candidates[candidate_index];
            let density = draw.range(0.3, 1.0);
            let asteroid_count =
                ((density * (outer_radius - inner_radius) * 350.0) as u32).max(30);
            AsteroidBelt {
                id: stable_id(&format!("belt:{}:{}", system_seed, candidate_index)),
                name: format!("{} Belt {}", star.name, roman_numeral(k + 1)),
                inner_radius,
                outer_radius,
                density,
                asteroid_count,
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
