//! Cosmogen - deterministic procedural universe generation
//!
//! A galaxy of stars, density-biased nebulas, on-demand planetary systems,
//! and a sparse network of warp lanes, all pure functions of an integer
//! seed. Rendering, UI, and persistence policy are consumer concerns; the
//! library returns plain serializable data.

pub mod color;
pub mod core;
pub mod nebula;
pub mod starfield;
pub mod stream;
pub mod system;
pub mod universe;
pub mod warp;

pub use crate::core::config::{GenerationConfig, WarpLaneConfig};
pub use crate::core::error::{CosmogenError, Result};
pub use crate::core::types::Seed;
pub use crate::nebula::{generate_nebulas, Nebula, NebulaKind};
pub use crate::starfield::{generate_stars, SpectralClass, Star};
pub use crate::system::{
    generate_system, generate_systems, system_for, AsteroidBelt, MemorySystemCache, Moon, Planet,
    PlanetRing, StarSystem, SystemCache, WorldType,
};
pub use crate::universe::{UniverseDocument, UniverseMetadata};
pub use crate::warp::{generate_warp_lanes, generate_warp_lanes_with, WarpLane};
