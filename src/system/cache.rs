//! System cache - injected get-or-generate collaborator
//!
//! System generation is idempotent but not free, so callers cache systems
//! by star id. The cache is a trait so the policy (capacity, eviction,
//! persistence) stays a collaborator concern; the generator itself holds no
//! cross-call state.

use ahash::AHashMap;

use crate::core::error::Result;
use crate::core::types::Seed;
use crate::starfield::Star;
use crate::system::{generate_system, StarSystem};

/// Keyed storage for generated systems.
pub trait SystemCache {
    fn get(&self, star_id: &str) -> Option<&StarSystem>;
    fn put(&mut self, system: StarSystem);
}

/// Unbounded in-memory cache. Systems are small and star counts bounded in
/// the thousands, so no eviction policy is needed.
#[derive(Debug, Default, Clone)]
pub struct MemorySystemCache {
    systems: AHashMap<String, StarSystem>,
}

impl MemorySystemCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl SystemCache for MemorySystemCache {
    fn get(&self, star_id: &str) -> Option<&StarSystem> {
        self.systems.get(star_id)
    }

    fn put(&mut self, system: StarSystem) {
        self.systems.insert(system.star_id.clone(), system);
    }
}

/// Look up the star's system, generating and caching it on first entry.
pub fn system_for<C: SystemCache>(cache: &mut C, star: &Star, seed: Seed) -> Result<StarSystem> {
    if let Some(system) = cache.get(&star.id) {
        return Ok(system.clone());
    }
    let system = generate_system(star, seed)?;
    cache.put(system.clone());
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::generate_stars;

    #[test]
    fn test_repeated_entry_hits_cache() {
        let stars = generate_stars(12345, 3);
        let mut cache = MemorySystemCache::new();

        let first = system_for(&mut cache, &stars[1], 12345).unwrap();
        assert_eq!(cache.len(), 1);

        let second = system_for(&mut cache, &stars[1], 12345).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_stars_get_distinct_entries() {
        let stars = generate_stars(7, 4);
        let mut cache = MemorySystemCache::new();
        for star in &stars {
            system_for(&mut cache, star, 7).unwrap();
        }
        assert_eq!(cache.len(), 4);
    }
}
