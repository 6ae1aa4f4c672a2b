//! Property tests over the seed space
//!
//! Determinism and the structural invariants have to hold for every seed,
//! not just the handful pinned in the integration tests.

use proptest::prelude::*;

use cosmogen::nebula::generate_nebulas;
use cosmogen::starfield::{generate_stars, SpectralClass};
use cosmogen::system::{equilibrium_temperature, generate_system, TemperatureBand};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_star_generation_is_deterministic(seed in any::<i32>(), count in 0usize..64) {
        let a = generate_stars(seed as i64, count);
        let b = generate_stars(seed as i64, count);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), count);
    }

    #[test]
    fn prop_spectral_class_is_total(seed in any::<i32>()) {
        for star in generate_stars(seed as i64, 32) {
            prop_assert_eq!(
                star.spectral_class,
                SpectralClass::from_temperature(star.temperature)
            );
        }
    }

    #[test]
    fn prop_star_fields_are_physical(seed in any::<i32>()) {
        for star in generate_stars(seed as i64, 32) {
            prop_assert!(star.mass > 0.0 && star.mass.is_finite());
            prop_assert!(star.radius > 0.0);
            prop_assert!(star.temperature > 0.0);
            prop_assert!((1.0..11.0).contains(&star.age));
            prop_assert!(star.planet_count_hint <= 8);
            prop_assert!(star.validate().is_ok());
        }
    }

    #[test]
    fn prop_system_types_stay_in_band_tables(seed in any::<i32>()) {
        let stars = generate_stars(seed as i64, 8);
        for star in &stars {
            let system = generate_system(star, seed as i64).unwrap();
            let luminosity = libm::pow(star.mass, 3.5);
            for planet in &system.planets {
                let band = TemperatureBand::from_kelvin(equilibrium_temperature(
                    luminosity,
                    planet.orbit_radius,
                ));
                prop_assert!(
                    band.type_table().iter().any(|(t, _)| *t == planet.world_type),
                    "{:?} outside {:?}", planet.world_type, band
                );
            }
        }
    }

    #[test]
    fn prop_system_regeneration_is_idempotent(seed in any::<i32>()) {
        let stars = generate_stars(seed as i64, 4);
        for star in &stars {
            let a = generate_system(star, seed as i64).unwrap();
            let b = generate_system(star, seed as i64).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn prop_nebulas_deterministic_and_counted(seed in any::<i32>(), count in 0usize..32) {
        let a = generate_nebulas(seed as i64, count, None).unwrap();
        let b = generate_nebulas(seed as i64, count, None).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), count);
    }
}
