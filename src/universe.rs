//! Universe document - the round-trippable top-level structure
//!
//! Everything the generators emit is plain data; this module bundles it
//! with seed and version metadata and round-trips it through JSON. The
//! persistence policy beyond that (where files live, when to save) belongs
//! to the caller.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{Seed, DOCUMENT_VERSION};
use crate::nebula::Nebula;
use crate::starfield::Star;
use crate::system::StarSystem;
use crate::warp::WarpLane;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseMetadata {
    pub seed: Seed,
    pub version: String,
    /// Unix seconds at document creation. Informational only; never feeds
    /// back into generation.
    pub generated_at: u64,
}

/// A complete generated universe, ready for structured serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseDocument {
    pub stars: Vec<Star>,
    pub systems: Vec<StarSystem>,
    pub nebulas: Vec<Nebula>,
    pub warp_lanes: Vec<WarpLane>,
    pub metadata: UniverseMetadata,
}

impl UniverseDocument {
    pub fn new(
        seed: Seed,
        stars: Vec<Star>,
        systems: Vec<StarSystem>,
        nebulas: Vec<Nebula>,
        warp_lanes: Vec<WarpLane>,
    ) -> Self {
        let generated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            stars,
            systems,
            nebulas,
            warp_lanes,
            metadata: UniverseMetadata {
                seed,
                version: DOCUMENT_VERSION.to_string(),
                generated_at,
            },
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nebula::generate_nebulas;
    use crate::starfield::{generate_stars, SHELL_MAX_RADIUS};
    use crate::system::generate_systems;
    use crate::warp::generate_warp_lanes;

    fn small_universe(seed: Seed) -> UniverseDocument {
        let stars = generate_stars(seed, 120);
        let systems = generate_systems(&stars[..5], seed).unwrap();
        let nebulas = generate_nebulas(seed, 8, Some(&stars)).unwrap();
        let warp_lanes = generate_warp_lanes(&stars, SHELL_MAX_RADIUS, 2).unwrap();
        UniverseDocument::new(seed, stars, systems, nebulas, warp_lanes)
    }

    #[test]
    fn test_json_round_trip_preserves_everything() {
        let doc = small_universe(12345);
        let json = doc.to_json_string().unwrap();
        let back = UniverseDocument::from_json_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_metadata_carries_seed_and_version() {
        let doc = small_universe(777);
        assert_eq!(doc.metadata.seed, 777);
        assert_eq!(doc.metadata.version, DOCUMENT_VERSION);
    }

    #[test]
    fn test_file_round_trip() {
        let doc = small_universe(42);
        let path = std::env::temp_dir().join("cosmogen_universe_roundtrip_test.json");
        doc.save_to_file(&path).unwrap();
        let back = UniverseDocument::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(UniverseDocument::from_json_str("{not json").is_err());
    }
}
