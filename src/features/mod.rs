//! Leakage-safe rolling features: events → per-entity ordered buffer → sliding
//! window means of strictly prior events → feature table.

mod pipeline;
mod window;

pub use pipeline::{build_features, FeatureBuilder};
pub use window::RollingWindow;

use crate::error::{MatchformError, Result};
use crate::events::{Event, FIELD_OUTCOME, FIELD_VALUE_A, FIELD_VALUE_B};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

pub const ROLLING_VALUE_A: &str = "rolling_value_a";
pub const ROLLING_VALUE_B: &str = "rolling_value_b";
pub const ROLLING_OUTCOME_RATE: &str = "rolling_outcome_rate";

/// Which event field gets averaged, and the column it lands in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub source: String,
    pub target: String,
}

impl FeatureSpec {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// value_a → rolling_value_a, value_b → rolling_value_b, outcome → rolling_outcome_rate
    pub fn defaults() -> Vec<FeatureSpec> {
        vec![
            FeatureSpec::new(FIELD_VALUE_A, ROLLING_VALUE_A),
            FeatureSpec::new(FIELD_VALUE_B, ROLLING_VALUE_B),
            FeatureSpec::new(FIELD_OUTCOME, ROLLING_OUTCOME_RATE),
        ]
    }
}

/// An eligible event with its rolling values, aligned to [`FeatureTable::columns`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub event: Event,
    /// Zero-based position of the event within its entity after sorting
    pub position: usize,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub window_size: usize,
    pub input_rows: usize,
    pub output_rows: usize,
    pub entities: usize,
    /// Entities with no more than `window_size` events, hence no output rows
    pub entities_without_history: Vec<String>,
}

/// Output of the feature builder: rows ordered by entity id, then timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<FeatureRow>,
    summary: BuildSummary,
}

impl FeatureTable {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<FeatureRow>, summary: BuildSummary) -> Self {
        Self {
            columns,
            rows,
            summary,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn summary(&self) -> &BuildSummary {
        &self.summary
    }

    pub fn rows_for<'a>(&'a self, entity_id: &'a str) -> impl Iterator<Item = &'a FeatureRow> + 'a {
        self.rows.iter().filter(move |r| r.event.entity_id == entity_id)
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| MatchformError::ColumnNotFound(name.to_string()))
    }

    /// Value of a rolling column, falling back to a numeric event field.
    pub fn value(&self, row: usize, column: &str) -> Result<f64> {
        let r = self.row(row)?;
        if let Ok(idx) = self.column_index(column) {
            return Ok(r.values[idx]);
        }
        r.event
            .field(column)
            .ok_or_else(|| MatchformError::ColumnNotFound(column.to_string()))
    }

    /// Dense `[rows.len(), columns.len()]` matrix for the given rows, in the given order.
    pub fn feature_matrix<S: AsRef<str>>(
        &self,
        columns: &[S],
        rows: &[usize],
    ) -> Result<Array2<f64>> {
        let idx: Vec<usize> = columns
            .iter()
            .map(|c| self.column_index(c.as_ref()))
            .collect::<Result<_>>()?;
        let mut data = Vec::with_capacity(rows.len() * idx.len());
        for &r in rows {
            let row = self.row(r)?;
            data.extend(idx.iter().map(|&i| row.values[i]));
        }
        Array2::from_shape_vec((rows.len(), idx.len()), data).map_err(|e| {
            MatchformError::ShapeMismatch {
                expected: format!("{} x {}", rows.len(), idx.len()),
                actual: e.to_string(),
            }
        })
    }

    /// Label vector for the given rows, read from a rolling column or event field.
    pub fn label_vector(&self, column: &str, rows: &[usize]) -> Result<Array1<f64>> {
        rows.iter()
            .map(|&r| self.value(r, column))
            .collect::<Result<Vec<_>>>()
            .map(Array1::from_vec)
    }

    fn row(&self, index: usize) -> Result<&FeatureRow> {
        self.rows.get(index).ok_or_else(|| {
            MatchformError::invalid("row", index, format!("table has {} rows", self.rows.len()))
        })
    }
}
