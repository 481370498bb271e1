//! Majority-class baseline: the accuracy floor any real model should beat.

use super::{check_training_data, Classifier};
use crate::error::{MatchformError, Result};
use ndarray::{Array1, Array2};

#[derive(Debug, Clone, Default)]
pub struct MajorityClassifier {
    label: Option<f64>,
}

impl MajorityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted label; ties go to the positive class.
    pub fn label(&self) -> Option<f64> {
        self.label
    }
}

impl Classifier for MajorityClassifier {
    fn name(&self) -> &str {
        "majority"
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_training_data(x, y)?;
        let positives = y.iter().filter(|&&v| v == 1.0).count();
        self.label = Some(if positives * 2 >= y.len() { 1.0 } else { 0.0 });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let label = self.label.ok_or(MatchformError::ModelNotFitted)?;
        Ok(Array1::from_elem(x.nrows(), label))
    }
}
