//! Nebula placement - decorative gas clouds biased toward dense regions
//!
//! When a star population is supplied, stars are bucketed into a sparse 3D
//! hash grid and the heaviest cells become placement hotspots; most nebulas
//! then spawn near a hotspot instead of drifting uniformly through empty
//! space. Nebulas have an independent lifecycle from stars and never
//! reference them.

use ahash::AHashMap;
use glam::Vec3;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, EMISSION_PALETTE, REFLECTION_PALETTE};
use crate::core::error::Result;
use crate::core::types::{sphere_direction, stable_id, Position, Seed};
use crate::starfield::Star;
use crate::stream::{SeededStream, CHANNEL_STRIDE};

// ============================================================================
// Constants
// ============================================================================

/// Edge length of a density grid cell (distance units).
const CELL_SIZE: f64 = 500.0;

/// Minimum stars in a cell before it counts as a hotspot.
const HOTSPOT_MIN_STARS: u32 = 8;

/// Probability a nebula is placed near a hotspot rather than at large.
const HOTSPOT_BIAS: f64 = 0.7;

/// Offset range from a hotspot's cell center.
const HOTSPOT_OFFSET: (f64, f64) = (200.0, 1_000.0);

/// Distance range from the galactic origin for unbiased placement.
const FAR_FIELD: (f64, f64) = (800.0, 9_447.0);

const NAME_TABLE: [&str; 12] = [
    "Veil", "Ember", "Ghost", "Butterfly", "Pelican", "Lagoon", "Rosette", "Serpent", "Wraith",
    "Cinder", "Halo", "Drifter",
];

const COMPOSITION_TABLE: [&str; 5] = [
    "hydrogen",
    "hydrogen-helium",
    "ionized oxygen",
    "hydrogen-sulfur",
    "dust and helium",
];

// ============================================================================
// Data model
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NebulaKind {
    Emission,
    Reflection,
}

/// A generated nebula. Plain serializable data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nebula {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub radius: f64,
    pub color: Rgb,
    pub composition: String,
    pub kind: NebulaKind,
}

// ============================================================================
// Density map
// ============================================================================

#[derive(Default, Clone, Copy)]
struct CellStats {
    count: u32,
    total_mass: f64,
}

/// A density hotspot: a grid cell heavy enough to attract nebulas.
struct Hotspot {
    cell: (i32, i32, i32),
    center: Vec3,
    weight: f64,
}

fn cell_coord(pos: Vec3) -> (i32, i32, i32) {
    (
        (pos.x as f64 / CELL_SIZE).floor() as i32,
        (pos.y as f64 / CELL_SIZE).floor() as i32,
        (pos.z as f64 / CELL_SIZE).floor() as i32,
    )
}

fn cell_center(coord: (i32, i32, i32)) -> Vec3 {
    Vec3::new(
        ((coord.0 as f64 + 0.5) * CELL_SIZE) as f32,
        ((coord.1 as f64 + 0.5) * CELL_SIZE) as f32,
        ((coord.2 as f64 + 0.5) * CELL_SIZE) as f32,
    )
}

/// Bucket stars into grid cells and keep the heaviest cells.
///
/// Weight is `ln(count) * total mass`, so a cell needs both crowding and
/// heavy stars to rank. Keeps the top `max(10, 0.4 * nebula_count)` cells.
fn build_hotspots(stars: &[Star], nebula_count: usize) -> Vec<Hotspot> {
    let mut cells: AHashMap<(i32, i32, i32), CellStats> = AHashMap::new();
    for star in stars {
        let stats = cells.entry(cell_coord(star.position)).or_default();
        stats.count += 1;
        stats.total_mass += star.mass;
    }

    let mut hotspots: Vec<Hotspot> = cells
        .into_iter()
        .filter(|(_, stats)| stats.count >= HOTSPOT_MIN_STARS)
        .map(|(coord, stats)| Hotspot {
            cell: coord,
            center: cell_center(coord),
            weight: libm::log(stats.count as f64) * stats.total_mass,
        })
        .collect();

    // Coordinate tie-break keeps the ranking independent of map iteration
    // order, which ahash randomizes per process.
    hotspots.sort_by_key(|h| (std::cmp::Reverse(OrderedFloat(h.weight)), h.cell));
    let keep = 10usize.max((nebula_count as f64 * 0.4) as usize);
    hotspots.truncate(keep);

    tracing::debug!(hotspots = hotspots.len(), "built nebula density map");
    hotspots
}

/// Pick a hotspot with probability proportional to its weight.
fn weighted_pick(hotspots: &[Hotspot], roll: f64) -> &Hotspot {
    let total: f64 = hotspots.iter().map(|h| h.weight).sum();
    let mut target = roll * total;
    for hotspot in hotspots {
        if target < hotspot.weight {
            return hotspot;
        }
        target -= hotspot.weight;
    }
    // Floating point slack on the last cumulative step.
    hotspots.last().unwrap()
}

// ============================================================================
// Generation
// ============================================================================

/// Place `count` nebulas, biased toward stellar density when `stars` is
/// supplied. Deterministic in (seed, count, stars); zero count yields an
/// empty list.
pub fn generate_nebulas(seed: Seed, count: usize, stars: Option<&[Star]>) -> Result<Vec<Nebula>> {
    if let Some(stars) = stars {
        for star in stars {
            star.validate()?;
        }
    }

    let hotspots = stars
        .map(|stars| build_hotspots(stars, count))
        .unwrap_or_default();

    let stream = SeededStream::new(seed);
    let nebulas = (0..count)
        .map(|i| generate_nebula(&stream, seed, i, &hotspots))
        .collect();
    Ok(nebulas)
}

fn generate_nebula(stream: &SeededStream, seed: Seed, index: usize, hotspots: &[Hotspot]) -> Nebula {
    let mut draw = stream.cursor(index as i64 * CHANNEL_STRIDE);

    let position = if !hotspots.is_empty() && draw.chance(HOTSPOT_BIAS) {
        let hotspot = weighted_pick(hotspots, draw.unit());
        let offset = draw.range(HOTSPOT_OFFSET.0, HOTSPOT_OFFSET.1);
        hotspot.center + sphere_direction(draw.unit(), draw.unit()) * offset as f32
    } else {
        let distance = draw.range(FAR_FIELD.0, FAR_FIELD.1);
        sphere_direction(draw.unit(), draw.unit()) * distance as f32
    };

    let (kind, color, radius) = if draw.chance(0.6) {
        let color = EMISSION_PALETTE[draw.index(EMISSION_PALETTE.len())];
        (NebulaKind::Emission, color, draw.range(30.0, 110.0))
    } else {
        let color = REFLECTION_PALETTE[draw.index(REFLECTION_PALETTE.len())];
        (NebulaKind::Reflection, color, draw.range(15.0, 55.0))
    };

    let name = format!("{} Nebula", NAME_TABLE[draw.index(NAME_TABLE.len())]);
    let composition = COMPOSITION_TABLE[draw.index(COMPOSITION_TABLE.len())].to_string();

    Nebula {
        id: stable_id(&format!("nebula:{}:{}", seed, index)),
        name,
        position,
        radius,
        color,
        composition,
        kind,
    }
}
