//! Least-squares regression tree, the weak learner of the boosted classifier.

use crate::error::{MatchformError, Result};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Minimum squared-error reduction for a split to count.
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    root: Option<Node>,
}

impl RegressionTree {
    pub fn new(max_depth: usize, min_samples_leaf: usize) -> Self {
        Self {
            max_depth,
            min_samples_leaf: min_samples_leaf.max(1),
            root: None,
        }
    }

    /// Fit `targets` on the subset `rows` of `x`. `targets` is indexed like `x`.
    pub fn fit(&mut self, x: &Array2<f64>, targets: &[f64], rows: &[usize]) -> Result<()> {
        if targets.len() != x.nrows() {
            return Err(MatchformError::ShapeMismatch {
                expected: format!("{} targets", x.nrows()),
                actual: format!("{} targets", targets.len()),
            });
        }
        if rows.is_empty() {
            return Err(MatchformError::InsufficientData("tree fit on zero rows".to_string()));
        }
        self.root = Some(self.build(x, targets, rows, 0));
        Ok(())
    }

    pub fn predict_row(&self, row: ArrayView1<f64>) -> Result<f64> {
        let mut node = self.root.as_ref().ok_or(MatchformError::ModelNotFitted)?;
        loop {
            match node {
                Node::Leaf { value } => return Ok(*value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { &**left } else { &**right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        self.root.as_ref().map_or(0, walk)
    }

    fn build(&self, x: &Array2<f64>, targets: &[f64], rows: &[usize], depth: usize) -> Node {
        let value = rows.iter().map(|&r| targets[r]).sum::<f64>() / rows.len() as f64;
        if depth >= self.max_depth || rows.len() < 2 * self.min_samples_leaf {
            return Node::Leaf { value };
        }
        let Some((feature, threshold)) = self.best_split(x, targets, rows) else {
            return Node::Leaf { value };
        };
        let (left, right): (Vec<usize>, Vec<usize>) =
            rows.iter().partition(|&&r| x[[r, feature]] <= threshold);
        Node::Split {
            feature,
            threshold,
            left: Box::new(self.build(x, targets, &left, depth + 1)),
            right: Box::new(self.build(x, targets, &right, depth + 1)),
        }
    }

    /// Scan every feature with prefix sums over the rows sorted by that feature.
    /// Ties in gain keep the first candidate, so the tree is deterministic.
    fn best_split(&self, x: &Array2<f64>, targets: &[f64], rows: &[usize]) -> Option<(usize, f64)> {
        let n = rows.len();
        let total: f64 = rows.iter().map(|&r| targets[r]).sum();
        let total_sq: f64 = rows.iter().map(|&r| targets[r] * targets[r]).sum();
        let parent_sse = total_sq - total * total / n as f64;

        let mut best: Option<(usize, f64, f64)> = None;
        for feature in 0..x.ncols() {
            let mut pairs: Vec<(f64, f64)> =
                rows.iter().map(|&r| (x[[r, feature]], targets[r])).collect();
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for k in 1..n {
                let (xv, t) = pairs[k - 1];
                left_sum += t;
                left_sq += t * t;
                if k < self.min_samples_leaf || n - k < self.min_samples_leaf {
                    continue;
                }
                if xv == pairs[k].0 {
                    continue;
                }
                let right_sum = total - left_sum;
                let right_sq = total_sq - left_sq;
                let sse = (left_sq - left_sum * left_sum / k as f64)
                    + (right_sq - right_sum * right_sum / (n - k) as f64);
                let gain = parent_sse - sse;
                if gain > MIN_GAIN && best.map_or(true, |(_, _, g)| gain > g) {
                    best = Some((feature, (xv + pairs[k].0) / 2.0, gain));
                }
            }
        }
        best.map(|(f, t, _)| (f, t))
    }
}
