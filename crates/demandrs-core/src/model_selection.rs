use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seed for the train/held-out split. Fixed so that repeated fits on the same
/// data produce identical coefficients and dispersion.
pub const SPLIT_SEED: u64 = 0;

pub const TEST_FRACTION: f64 = 0.2;

/// Shuffle row indices with a seeded RNG and partition them into
/// (train, held-out). The held-out partition takes ceil(n * test_fraction)
/// rows, the rest train.
pub fn train_test_split(n_rows: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_fraction).ceil() as usize;
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    (train, test)
}
