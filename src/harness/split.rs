//! Seeded train/test partitioning of row indices.

use crate::error::{MatchformError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Disjoint row indices, each ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// `ceil(test_fraction * n)`, computed in `f64` with no rounding slack, so
/// `0.07 * 100` (7.000000000000001) yields 8.
pub fn test_size(n: usize, test_fraction: f64) -> usize {
    let raw = (test_fraction * n as f64).ceil();
    (raw.max(0.0) as usize).min(n)
}

/// Shuffle `0..n` with a ChaCha8 stream seeded by `seed`; the first
/// [`test_size`] indices form the test partition, the rest train.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<Split> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(MatchformError::invalid("test_fraction", test_fraction, "must be in (0, 1)"));
    }
    let n_test = test_size(n, test_fraction);
    let n_train = n - n_test;
    if n_test == 0 || n_train == 0 {
        return Err(MatchformError::InsufficientData(format!(
            "{} rows at test_fraction {} gives {} train / {} test",
            n, test_fraction, n_train, n_test
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    let mut test = order[..n_test].to_vec();
    let mut train = order[n_test..].to_vec();
    test.sort_unstable();
    train.sort_unstable();
    Ok(Split { train, test })
}
