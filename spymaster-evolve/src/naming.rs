//! Agent naming - Human-readable codenames for tracking evolution
//!
//! Generates memorable two-word codenames (e.g., "silent-raven",
//! "velvet-cipher") from genome weights. Names are deterministic, so the
//! same genome always gets the same codename, across builds and toolchains,
//! so a saved champion keeps its name when reloaded.

use crate::genome::Genome;

// 64 adjectives + 64 nouns = 4096 unique codenames
const ADJECTIVES: [&str; 64] = [
    "silent", "hidden", "masked", "veiled", "shadow", "quiet", "secret", "covert",
    "black", "grey", "white", "crimson", "scarlet", "ashen", "pale", "dark",
    "velvet", "iron", "glass", "paper", "silver", "golden", "copper", "steel",
    "swift", "sly", "cold", "still", "sharp", "keen", "cunning", "patient",
    "north", "south", "east", "west", "inner", "outer", "upper", "lower",
    "double", "single", "twin", "lone", "false", "true", "last", "first",
    "winter", "autumn", "midnight", "dawn", "dusk", "foggy", "rainy", "stormy",
    "broken", "sealed", "burned", "coded", "blind", "deaf", "mute", "lucky",
];

const NOUNS: [&str; 64] = [
    "raven", "crow", "owl", "fox", "wolf", "viper", "cobra", "spider",
    "cipher", "code", "key", "lock", "seal", "stamp", "ledger", "letter",
    "dagger", "blade", "needle", "pin", "wire", "thread", "cord", "knot",
    "agent", "courier", "handler", "asset", "mole", "sleeper", "ghost", "shade",
    "embassy", "safehouse", "bridge", "tunnel", "harbor", "station", "tower", "gate",
    "mirror", "lantern", "candle", "compass", "map", "coin", "ring", "watch",
    "signal", "whisper", "echo", "rumor", "riddle", "puzzle", "token", "badge",
    "queen", "bishop", "knight", "rook", "jack", "ace", "joker", "pawn",
];

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hash of a genome's exact weight bits (little-endian bytes).
///
/// Two genomes share a signature only if every weight matches bit for bit.
pub fn genome_signature(genome: &Genome) -> u64 {
    genome
        .weights()
        .iter()
        .flat_map(|weight| weight.to_bits().to_le_bytes())
        .fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

/// Convert a signature to a deterministic two-word codename
pub fn signature_to_name(sig: u64) -> String {
    let adj_idx = ((sig >> 6) & 0x3F) as usize; // bits 6-11 -> adjective (0-63)
    let noun_idx = (sig & 0x3F) as usize; // bits 0-5 -> noun (0-63)

    format!("{}-{}", ADJECTIVES[adj_idx], NOUNS[noun_idx])
}

/// Generate a codename from a genome's weights.
pub fn agent_name(genome: &Genome) -> String {
    signature_to_name(genome_signature(genome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{CARDS, FEATURES};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_name_deterministic() {
        let genome = Genome::random(&mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(agent_name(&genome), agent_name(&genome.clone()));
    }

    #[test]
    fn test_name_format() {
        let genome = Genome::random(&mut ChaCha8Rng::seed_from_u64(2));
        let name = agent_name(&genome);
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 2, "Name should have two parts: {}", name);
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(NOUNS.contains(&parts[1]));
    }

    #[test]
    fn test_single_weight_changes_signature() {
        let a = Genome::zeros();
        let mut b = Genome::zeros();
        b.set(15, 50, 1e-6);
        assert_ne!(genome_signature(&a), genome_signature(&b));
    }

    #[test]
    fn test_signature_is_stable() {
        let zeros = Genome::zeros();
        assert_eq!(genome_signature(&zeros), 0xdd82_1a79_be84_c225);
        assert_eq!(agent_name(&zeros), "black-station");

        let counting: Vec<f32> = (0..CARDS * FEATURES).map(|i| i as f32).collect();
        let counting = Genome::from_flat(counting).unwrap();
        assert_eq!(genome_signature(&counting), 0x79eb_a9a2_1046_d538);
        assert_eq!(agent_name(&counting), "silver-queen");
    }

    #[test]
    fn test_signature_bits_select_words() {
        assert_eq!(signature_to_name(0), "silent-raven");
        assert_eq!(signature_to_name((1 << 6) | 63), "hidden-pawn");
    }
}
