//! Core type definitions used throughout the codebase

use glam::Vec3;
use uuid::Uuid;

/// Galaxy seed. Accepts 32-bit seeds; kept as i64 so seed + channel
/// arithmetic in the draw stream stays within f64's exact integer range.
pub type Seed = i64;

/// Galactic position in arbitrary light-year-like units.
pub type Position = Vec3;

/// Version tag written into persisted universe documents.
pub const DOCUMENT_VERSION: &str = "1";

/// Deterministic id for a generated object.
///
/// UUIDv5 of a stable key path (e.g. `star:12345:7`), so the same seed and
/// index always produce the same id across runs and platforms.
pub fn stable_id(key: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
}

/// Unit direction vector from two uniform draws in [0, 1).
///
/// Inverse-cosine sampling for the polar angle, uniform azimuth. Uniform on
/// the sphere, no rejection loop. Transcendentals go through `libm` so the
/// result is bit-identical everywhere.
pub fn sphere_direction(u: f64, v: f64) -> Vec3 {
    let theta = libm::acos(1.0 - 2.0 * u);
    let phi = std::f64::consts::TAU * v;
    let sin_theta = libm::sin(theta);
    Vec3::new(
        (sin_theta * libm::cos(phi)) as f32,
        (sin_theta * libm::sin(phi)) as f32,
        libm::cos(theta) as f32,
    )
}

/// Roman numeral for small positive indices (planet and ring naming).
pub fn roman_numeral(n: usize) -> String {
    const TABLE: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut remainder = n;
    let mut out = String::new();
    for (value, glyph) in TABLE {
        while remainder >= value {
            out.push_str(glyph);
            remainder -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_id_is_deterministic() {
        assert_eq!(stable_id("star:12345:0"), stable_id("star:12345:0"));
        assert_ne!(stable_id("star:12345:0"), stable_id("star:12345:1"));
    }

    #[test]
    fn test_sphere_direction_is_unit_length() {
        for i in 0..100 {
            let u = i as f64 / 100.0;
            let v = (i as f64 * 0.37) % 1.0;
            let dir = sphere_direction(u, v);
            assert!((dir.length() - 1.0).abs() < 1e-5, "not unit at {i}: {dir:?}");
        }
    }

    #[test]
    fn test_sphere_direction_covers_poles() {
        // u = 0 maps to +z, u -> 1 maps toward -z.
        assert!(sphere_direction(0.0, 0.0).z > 0.999);
        assert!(sphere_direction(0.999_999, 0.0).z < -0.99);
    }

    #[test]
    fn test_roman_numerals() {
        assert_eq!(roman_numeral(1), "I");
        assert_eq!(roman_numeral(4), "IV");
        assert_eq!(roman_numeral(9), "IX");
        assert_eq!(roman_numeral(14), "XIV");
    }
}
