//! Benchmark utilities.

use rand::Rng;

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key{i}")).collect()
}

/// Generate `count` values drawn from `distinct` possibilities.
pub fn random_values(count: usize, distinct: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| format!("v{}", rng.gen_range(0..distinct.max(1))))
        .collect()
}
