//! Training/evaluation harness over a built feature table.

mod evaluate;
mod split;

pub use evaluate::{accuracy_score, evaluate, evaluate_with, Evaluation, EvaluationReport};
pub use split::{test_size, train_test_split, Split};
