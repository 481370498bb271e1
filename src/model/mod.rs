//! Binary classifiers over a dense feature matrix. The harness only sees the
//! [`Classifier`] trait; any model with fit/predict plugs in.

mod baseline;
mod boosting;
mod tree;

pub use baseline::MajorityClassifier;
pub use boosting::GradientBoostingClassifier;
pub use tree::RegressionTree;

use crate::error::{MatchformError, Result};
use ndarray::{Array1, Array2};

/// Labels are 0.0 / 1.0; predictions use the same encoding.
pub trait Classifier {
    fn name(&self) -> &str;

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        (**self).fit(x, y)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        (**self).predict(x)
    }
}

/// Shared training-input checks: non-empty, aligned, finite, binary labels.
pub(crate) fn check_training_data(x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(MatchformError::ShapeMismatch {
            expected: format!("{} labels", x.nrows()),
            actual: format!("{} labels", y.len()),
        });
    }
    if x.nrows() == 0 {
        return Err(MatchformError::InsufficientData("no training rows".to_string()));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(MatchformError::schema("features", "non-finite feature value"));
    }
    if let Some(bad) = y.iter().find(|&&v| v != 0.0 && v != 1.0) {
        return Err(MatchformError::schema("label", format!("expected 0 or 1, got {}", bad)));
    }
    Ok(())
}

pub(crate) fn check_feature_count(x: &Array2<f64>, n_features: usize) -> Result<()> {
    if x.ncols() != n_features {
        return Err(MatchformError::ShapeMismatch {
            expected: format!("{} feature columns", n_features),
            actual: format!("{} feature columns", x.ncols()),
        });
    }
    Ok(())
}
