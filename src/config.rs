//! Pipeline configuration. Every section has defaults; a JSON file overrides them.

use crate::features::FeatureSpec;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Rolling feature parameters
    pub features: FeaturesConfig,
    /// Train/test partitioning
    pub split: SplitConfig,
    /// Gradient boosting hyperparameters
    pub model: BoostingConfig,
    /// Synthetic season used by the demo binary
    pub mock: MockSeasonConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Number of strictly prior events averaged per rolling feature
    pub window_size: usize,
    /// (source field, target column) pairs
    pub specs: Vec<FeatureSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of rows assigned to the test partition, in (0, 1)
    pub test_fraction: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingConfig {
    /// Boosting rounds
    pub n_estimators: usize,
    /// Shrinkage applied to every tree
    pub learning_rate: f64,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// Row share sampled per round, in (0, 1]
    pub subsample: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockSeasonConfig {
    pub entities: Vec<String>,
    pub games_per_entity: usize,
    pub start_date: NaiveDate,
    /// Inclusive lower bound for generated values
    pub value_min: i64,
    /// Exclusive upper bound for generated values
    pub value_max: i64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            specs: FeatureSpec::defaults(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_leaf: 1,
            subsample: 1.0,
            seed: 42,
        }
    }
}

impl Default for MockSeasonConfig {
    fn default() -> Self {
        Self {
            entities: vec!["LAL".to_string(), "BOS".to_string()],
            games_per_entity: 50,
            start_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap_or_default(),
            value_min: 90,
            value_max: 130,
            seed: 42,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl PipelineConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<PipelineConfig>(&data) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "invalid config; using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "unreadable config; using defaults"
                );
                Self::default()
            }
        }
    }
}
