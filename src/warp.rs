//! Warp lane generation - long multi-hop routes snapped onto real stars
//!
//! Each lane runs between two stars at least 0.6 galaxy radii apart. A
//! quadratic Bezier curve through a randomly offset control point gives the
//! route its arc; curve waypoints snap to the nearest free stars, then each
//! segment is refined by inserting corridor stars that keep forward
//! progress. A star appears in at most one lane per call; the used set is
//! explicit local state threaded through construction, never module state.
//! Best effort: when the population is too sparse, lanes are skipped with a
//! warning rather than looping forever.

use ahash::AHashSet;
use glam::Vec3;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_rgb, Rgb};
use crate::core::config::WarpLaneConfig;
use crate::core::error::{CosmogenError, Result};
use crate::core::types::sphere_direction;
use crate::starfield::Star;
use crate::stream::{fnv1a_continue, DrawCursor, SeededStream, CHANNEL_STRIDE, FNV_OFFSET_BASIS};

// ============================================================================
// Constants
// ============================================================================

/// Golden-angle hue rotation between consecutive lanes, degrees.
const HUE_STEP: f64 = 137.5;

const LANE_NAMES: [&str; 8] = [
    "Orion Run",
    "Perseus Corridor",
    "Cygnus Passage",
    "Meridian Span",
    "Halcyon Drift",
    "Aquila Reach",
    "Vela Transit",
    "Lyra Crossing",
];

// ============================================================================
// Data model
// ============================================================================

/// A generated warp lane. Every id in `path` references a star from the
/// population the lane was built against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpLane {
    pub id: String,
    pub name: String,
    pub start_star_id: String,
    pub end_star_id: String,
    /// Ordered star ids: start, intermediate hops, end. No repeats.
    pub path: Vec<String>,
    /// Sum of consecutive hop distances.
    pub total_distance: f64,
    pub color: Rgb,
    pub active: bool,
}

// ============================================================================
// Generation
// ============================================================================

/// Build up to `lane_count` warp lanes with the default configuration.
pub fn generate_warp_lanes(
    stars: &[Star],
    galaxy_radius: f64,
    lane_count: usize,
) -> Result<Vec<WarpLane>> {
    generate_warp_lanes_with(stars, galaxy_radius, lane_count, &WarpLaneConfig::default())
}

/// Build up to `lane_count` warp lanes.
///
/// Returns fewer lanes than requested when the population cannot satisfy
/// the separation constraint within the retry ceiling; that shortfall is
/// logged, not an error. Deterministic in (stars, radius, count, config).
pub fn generate_warp_lanes_with(
    stars: &[Star],
    galaxy_radius: f64,
    lane_count: usize,
    config: &WarpLaneConfig,
) -> Result<Vec<WarpLane>> {
    config.validate()?;
    if lane_count == 0 {
        return Ok(Vec::new());
    }
    if !galaxy_radius.is_finite() || galaxy_radius <= 0.0 {
        return Err(CosmogenError::InvalidArgument(format!(
            "galaxy_radius must be finite and positive, got {galaxy_radius}"
        )));
    }
    for star in stars {
        star.validate()?;
    }

    // The interface carries no seed; derive one from the population so the
    // same stars always yield the same lanes. Masked to 31 bits to keep
    // stream arithmetic in f64-exact range.
    let folded = stars
        .iter()
        .fold(FNV_OFFSET_BASIS, |acc, star| fnv1a_continue(acc, star.id.as_bytes()));
    let stream = SeededStream::new((folded & 0x7FFF_FFFF) as i64);

    let mut used: AHashSet<usize> = AHashSet::new();
    let mut lanes = Vec::with_capacity(lane_count);

    for lane_index in 0..lane_count {
        let mut path = None;
        for attempt in 0..config.lane_attempts {
            let base = ((lane_index * config.lane_attempts + attempt) as i64) * CHANNEL_STRIDE;
            let mut draw = stream.cursor(base);
            if let Some(found) = build_lane_path(stars, &used, galaxy_radius, config, &mut draw) {
                path = Some(found);
                break;
            }
        }

        let Some(path) = path else {
            tracing::warn!(
                lane = lane_index,
                stars = stars.len(),
                "skipping warp lane: no valid path within retry ceiling"
            );
            continue;
        };

        used.extend(path.iter().copied());
        lanes.push(assemble_lane(stars, lane_index, (folded & 0x7FFF_FFFF) as i64, &path));
    }

    Ok(lanes)
}

/// One full lane-construction attempt. Returns path indices into `stars`,
/// or None when no valid endpoint pair or too few unique hops remain.
fn build_lane_path(
    stars: &[Star],
    used: &AHashSet<usize>,
    galaxy_radius: f64,
    config: &WarpLaneConfig,
    draw: &mut DrawCursor<'_>,
) -> Option<Vec<usize>> {
    let unused: Vec<usize> = (0..stars.len()).filter(|i| !used.contains(i)).collect();
    if unused.len() < 2 {
        return None;
    }
    let min_separation = galaxy_radius * config.min_separation_factor;

    let mut endpoints = None;
    for _ in 0..config.start_attempts {
        let start = unused[draw.index(unused.len())];
        let far: Vec<usize> = unused
            .iter()
            .copied()
            .filter(|&i| {
                i != start
                    && stars[i].position.distance(stars[start].position) as f64 >= min_separation
            })
            .collect();
        if far.is_empty() {
            continue;
        }
        endpoints = Some((start, far[draw.index(far.len())]));
        break;
    }
    let (start, end) = endpoints?;

    let start_pos = stars[start].position;
    let end_pos = stars[end].position;
    let span = start_pos.distance(end_pos) as f64;
    let hops = config
        .min_hops
        .max((span / (galaxy_radius * config.hop_distance_factor)).round() as usize);

    // Control point pushed off the midpoint bends the route into an arc.
    let offset = galaxy_radius * config.control_offset_factor * (0.5 + 0.5 * draw.unit());
    let control =
        (start_pos + end_pos) * 0.5 + sphere_direction(draw.unit(), draw.unit()) * offset as f32;

    // Attempt-local claims; merged into the caller's used set only on success.
    let mut taken: AHashSet<usize> = AHashSet::new();
    taken.insert(start);
    taken.insert(end);

    let mut coarse = vec![start];
    for w in 1..hops.saturating_sub(1) {
        let t = w as f32 / (hops - 1) as f32;
        let waypoint = bezier(start_pos, control, end_pos, t);
        if let Some(snapped) = nearest_free_star(stars, used, &taken, waypoint) {
            taken.insert(snapped);
            coarse.push(snapped);
        }
    }
    coarse.push(end);

    let refined = refine_path(stars, used, &mut taken, &coarse, galaxy_radius, config);

    // A star must not appear twice in the final path.
    let mut seen = AHashSet::new();
    let path: Vec<usize> = refined.into_iter().filter(|i| seen.insert(*i)).collect();
    if path.len() < 2 {
        return None;
    }
    Some(path)
}

/// Insert corridor stars into each coarse segment.
///
/// A candidate must project inside the segment, deviate less than the
/// configured fraction of galaxy radius from its line, and sit ahead of the
/// last insertion (forward progress only). The best candidate minimizes
/// detour length plus deviation. Claims are immediate so later segments and
/// lanes cannot take the same star.
fn refine_path(
    stars: &[Star],
    used: &AHashSet<usize>,
    taken: &mut AHashSet<usize>,
    coarse: &[usize],
    galaxy_radius: f64,
    config: &WarpLaneConfig,
) -> Vec<usize> {
    let max_deviation = galaxy_radius * config.max_deviation_factor;
    let mut out = Vec::with_capacity(coarse.len() * 2);

    for pair in coarse.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let a_pos = stars[a].position;
        let b_pos = stars[b].position;
        let segment = b_pos - a_pos;
        let length_sq = segment.length_squared();
        out.push(a);

        if length_sq <= f32::EPSILON {
            continue;
        }

        let mut last_t = 0.0f32;
        let mut inserted = Vec::new();
        for _ in 0..config.refinement_insertions_per_segment {
            let best = (0..stars.len())
                .filter(|i| !used.contains(i) && !taken.contains(i))
                .filter_map(|i| {
                    let to_candidate = stars[i].position - a_pos;
                    let t = to_candidate.dot(segment) / length_sq;
                    if t <= last_t || t >= 1.0 {
                        return None;
                    }
                    let deviation = (to_candidate - segment * t).length() as f64;
                    if deviation > max_deviation {
                        return None;
                    }
                    let detour = stars[i].position.distance(a_pos) as f64
                        + stars[i].position.distance(b_pos) as f64;
                    Some((i, t, OrderedFloat(detour + deviation)))
                })
                .min_by_key(|(_, _, score)| *score);

            let Some((index, t, _)) = best else { break };
            taken.insert(index);
            last_t = t;
            inserted.push(index);
        }
        out.extend(inserted);
    }

    out.push(*coarse.last().unwrap());
    out
}

fn nearest_free_star(
    stars: &[Star],
    used: &AHashSet<usize>,
    taken: &AHashSet<usize>,
    point: Vec3,
) -> Option<usize> {
    (0..stars.len())
        .filter(|i| !used.contains(i) && !taken.contains(i))
        .min_by_key(|&i| OrderedFloat(stars[i].position.distance_squared(point)))
}

fn bezier(a: Vec3, control: Vec3, b: Vec3, t: f32) -> Vec3 {
    let inv = 1.0 - t;
    a * (inv * inv) + control * (2.0 * inv * t) + b * (t * t)
}

fn assemble_lane(stars: &[Star], lane_index: usize, stream_seed: i64, path: &[usize]) -> WarpLane {
    let total_distance: f64 = path
        .windows(2)
        .map(|pair| stars[pair[0]].position.distance(stars[pair[1]].position) as f64)
        .sum();

    let base = LANE_NAMES[lane_index % LANE_NAMES.len()];
    let cycle = lane_index / LANE_NAMES.len();
    let name = if cycle == 0 {
        base.to_string()
    } else {
        format!("{} {}", base, cycle + 1)
    };

    WarpLane {
        id: crate::core::types::stable_id(&format!("lane:{}:{}", stream_seed, lane_index)),
        name,
        start_star_id: stars[*path.first().unwrap()].id.clone(),
        end_star_id: stars[*path.last().unwrap()].id.clone(),
        path: path.iter().map(|&i| stars[i].id.clone()).collect(),
        total_distance,
        color: hsl_to_rgb(lane_index as f64 * HUE_STEP, 0.7, 0.55),
        active: true,
    }
}

// ============================================================================
// Tests
// ============================================================================
