//! Split → fit → predict → accuracy. The classifier goes in by value and comes
//! back fitted inside the [`Evaluation`], so runs never share model state.

use super::split::{train_test_split, Split};
use crate::config::SplitConfig;
use crate::error::{MatchformError, Result};
use crate::features::FeatureTable;
use crate::model::Classifier;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Evaluation<C> {
    pub run_id: Uuid,
    /// Fraction of test rows predicted correctly
    pub accuracy: f64,
    pub split: Split,
    /// Predictions for `split.test`, same order
    pub predictions: Vec<f64>,
    /// The classifier after fitting on the train partition
    pub classifier: C,
}

/// Serializable summary of an [`Evaluation`], one JSON line per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub run_id: String,
    pub classifier: String,
    pub accuracy: f64,
    pub n_train: usize,
    pub n_test: usize,
}

impl<C: Classifier> Evaluation<C> {
    pub fn n_train(&self) -> usize {
        self.split.train.len()
    }

    pub fn n_test(&self) -> usize {
        self.split.test.len()
    }

    pub fn report(&self) -> EvaluationReport {
        EvaluationReport {
            run_id: self.run_id.to_string(),
            classifier: self.classifier.name().to_string(),
            accuracy: self.accuracy,
            n_train: self.n_train(),
            n_test: self.n_test(),
        }
    }
}

/// Fit `classifier` on a seeded train partition of `table` and score it on the
/// rest. Test labels are read only after fitting.
pub fn evaluate<C, S>(
    table: &FeatureTable,
    feature_columns: &[S],
    label_column: &str,
    test_fraction: f64,
    seed: u64,
    mut classifier: C,
) -> Result<Evaluation<C>>
where
    C: Classifier,
    S: AsRef<str>,
{
    if feature_columns.is_empty() {
        return Err(MatchformError::invalid(
            "feature_columns",
            "[]",
            "at least one column is required",
        ));
    }
    if let Some(c) = feature_columns.iter().find(|c| c.as_ref() == label_column) {
        return Err(MatchformError::invalid(
            "feature_columns",
            c.as_ref(),
            "label column used as a feature",
        ));
    }
    let split = train_test_split(table.len(), test_fraction, seed)?;

    let x_train = table.feature_matrix(feature_columns, &split.train)?;
    let y_train = table.label_vector(label_column, &split.train)?;
    classifier.fit(&x_train, &y_train)?;

    let x_test = table.feature_matrix(feature_columns, &split.test)?;
    let predicted = classifier.predict(&x_test)?;
    let y_test = table.label_vector(label_column, &split.test)?;
    let accuracy = accuracy_score(&y_test, &predicted)?;

    let run_id = Uuid::new_v4();
    info!(
        run_id = %run_id,
        classifier = classifier.name(),
        n_train = split.train.len(),
        n_test = split.test.len(),
        accuracy,
        "evaluation complete"
    );

    Ok(Evaluation {
        run_id,
        accuracy,
        split,
        predictions: predicted.to_vec(),
        classifier,
    })
}

/// [`evaluate`] with the fraction and seed taken from config.
pub fn evaluate_with<C, S>(
    table: &FeatureTable,
    feature_columns: &[S],
    label_column: &str,
    config: &SplitConfig,
    classifier: C,
) -> Result<Evaluation<C>>
where
    C: Classifier,
    S: AsRef<str>,
{
    evaluate(table, feature_columns, label_column, config.test_fraction, config.seed, classifier)
}

/// Fraction of positions where the 0/1 prediction matches the label.
pub fn accuracy_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(MatchformError::ShapeMismatch {
            expected: format!("{} predictions", y_true.len()),
            actual: format!("{} predictions", y_pred.len()),
        });
    }
    if y_true.is_empty() {
        return Err(MatchformError::InsufficientData("no rows to score".to_string()));
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| (*t - *p).abs() < 0.5)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn accuracy_counts_matches() {
        let acc = accuracy_score(&array![1.0, 0.0, 1.0, 1.0], &array![1.0, 1.0, 1.0, 0.0]);
        assert_eq!(acc.unwrap(), 0.5);
    }

    #[test]
    fn accuracy_length_mismatch() {
        assert!(accuracy_score(&array![1.0], &array![1.0, 0.0]).is_err());
    }

    #[test]
    fn accuracy_empty_is_insufficient() {
        let empty: Array1<f64> = Array1::zeros(0);
        assert!(matches!(accuracy_score(&empty, &empty), Err(MatchformError::InsufficientData(_))));
    }
}
