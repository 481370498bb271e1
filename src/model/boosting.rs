//! Gradient boosted trees for binary classification (log loss).
//!
//! Starts from the prior log odds of the training labels, then each round fits a
//! regression tree to the residuals `y - p` on a seeded row sample and adds it,
//! shrunk by the learning rate, to every row's log odds.

use super::{check_feature_count, check_training_data, Classifier, RegressionTree};
use crate::config::BoostingConfig;
use crate::error::{MatchformError, Result};
use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Keeps the prior log odds finite when the training labels are one class.
const PROB_CLIP: f64 = 1e-6;

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostingClassifier {
    config: BoostingConfig,
    trees: Vec<RegressionTree>,
    initial_log_odds: f64,
    n_features: Option<usize>,
}

impl GradientBoostingClassifier {
    pub fn new(config: BoostingConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            initial_log_odds: 0.0,
            n_features: None,
        }
    }

    pub fn config(&self) -> &BoostingConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Probability of the positive class for every row.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let n_features = self.n_features.ok_or(MatchformError::ModelNotFitted)?;
        check_feature_count(x, n_features)?;
        x.rows()
            .into_iter()
            .map(|row| {
                let mut z = self.initial_log_odds;
                for tree in &self.trees {
                    z += self.config.learning_rate * tree.predict_row(row)?;
                }
                Ok(sigmoid(z))
            })
            .collect::<Result<Vec<_>>>()
            .map(Array1::from_vec)
    }

    fn validate_config(&self) -> Result<()> {
        let c = &self.config;
        if !(c.learning_rate > 0.0 && c.learning_rate.is_finite()) {
            return Err(MatchformError::invalid(
                "model.learning_rate",
                c.learning_rate,
                "must be positive",
            ));
        }
        if !(c.subsample > 0.0 && c.subsample <= 1.0) {
            return Err(MatchformError::invalid(
                "model.subsample",
                c.subsample,
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }

    fn sample_rows(&self, n: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
        let mut rows: Vec<usize> = (0..n).collect();
        if self.config.subsample < 1.0 {
            let size = ((n as f64) * self.config.subsample).ceil().max(1.0) as usize;
            rows.shuffle(rng);
            rows.truncate(size);
            rows.sort_unstable();
        }
        rows
    }
}

impl Classifier for GradientBoostingClassifier {
    fn name(&self) -> &str {
        "gradient_boosting"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        self.validate_config()?;
        check_training_data(x, y)?;

        let n = x.nrows();
        let p = y.mean().unwrap_or(0.5).clamp(PROB_CLIP, 1.0 - PROB_CLIP);
        if y.iter().all(|&v| v == y[0]) {
            warn!(label = y[0], rows = n, "training labels are a single class");
        }

        self.initial_log_odds = (p / (1.0 - p)).ln();
        self.trees.clear();
        self.n_features = Some(x.ncols());

        let mut log_odds = vec![self.initial_log_odds; n];
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        for round in 0..self.config.n_estimators {
            let residuals: Vec<f64> = y
                .iter()
                .zip(&log_odds)
                .map(|(&yi, &z)| yi - sigmoid(z))
                .collect();
            let rows = self.sample_rows(n, &mut rng);

            let mut tree = RegressionTree::new(self.config.max_depth, self.config.min_samples_leaf);
            tree.fit(x, &residuals, &rows)?;
            for (i, z) in log_odds.iter_mut().enumerate() {
                *z += self.config.learning_rate * tree.predict_row(x.row(i))?;
            }
            self.trees.push(tree);

            if round % 25 == 0 {
                let loss = log_loss(y, &log_odds);
                debug!(round, loss, "boosting round");
            }
        }
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        Ok(self.predict_proba(x)?.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }
}

fn log_loss(y: &Array1<f64>, log_odds: &[f64]) -> f64 {
    let total: f64 = y
        .iter()
        .zip(log_odds)
        .map(|(&yi, &z)| {
            let p = sigmoid(z).clamp(PROB_CLIP, 1.0 - PROB_CLIP);
            -(yi * p.ln() + (1.0 - yi) * (1.0 - p).ln())
        })
        .sum();
    total / y.len() as f64
}
