//! Star naming - Greek prefix and constellation suffix tables

/// Greek letter prefixes, cycled fastest.
const PREFIXES: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

/// Constellation genitive suffixes, cycled once per full prefix pass.
const SUFFIXES: [&str; 20] = [
    "Centauri",
    "Cygni",
    "Draconis",
    "Eridani",
    "Lyrae",
    "Orionis",
    "Persei",
    "Tauri",
    "Aquilae",
    "Ceti",
    "Leonis",
    "Herculis",
    "Andromedae",
    "Cassiopeiae",
    "Pegasi",
    "Scorpii",
    "Serpentis",
    "Ursae",
    "Velorum",
    "Carinae",
];

/// Name for the star at the given population index.
///
/// Index 0 is always "Sol". Every other index walks the prefix x suffix
/// grid in order; after a full cycle a numeral is appended so names stay
/// unique at any population size.
pub fn star_name(index: usize) -> String {
    if index == 0 {
        return "Sol".to_string();
    }
    let n = index - 1;
    let prefix = PREFIXES[n % PREFIXES.len()];
    let suffix = SUFFIXES[(n / PREFIXES.len()) % SUFFIXES.len()];
    let cycle = n / (PREFIXES.len() * SUFFIXES.len());
    if cycle == 0 {
        format!("{} {}", prefix, suffix)
    } else {
        format!("{} {} {}", prefix, suffix, cycle + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_zero_is_sol() {
        assert_eq!(star_name(0), "Sol");
    }

    #[test]
    fn test_grid_walk_order() {
        assert_eq!(star_name(1), "Alpha Centauri");
        assert_eq!(star_name(2), "Beta Centauri");
        assert_eq!(star_name(25), "Alpha Cygni");
    }

    #[test]
    fn test_numeral_after_full_cycle() {
        let full_cycle = PREFIXES.len() * SUFFIXES.len();
        assert_eq!(star_name(1 + full_cycle), "Alpha Centauri 2");
    }

    #[test]
    fn test_names_unique_over_population() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..2000 {
            assert!(seen.insert(star_name(i)), "duplicate name at {i}");
        }
    }
}
