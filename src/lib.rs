//! matchform — leakage-safe rolling form features and outcome classification.
//!
//! Modular structure:
//! - [`events`] — Event records, raw row validation, synthetic seasons
//! - [`features`] — Per-entity rolling means of strictly prior events
//! - [`model`] — Binary classifiers behind the [`Classifier`] trait
//! - [`harness`] — Seeded train/test split, fit, predict, accuracy
//! - [`logging`] — Structured JSON logging
//!
//! ```no_run
//! use matchform::{build_features, evaluate, FeatureSpec, GradientBoostingClassifier, MockSeason};
//! use matchform::config::{BoostingConfig, MockSeasonConfig};
//!
//! let events = MockSeason::new(MockSeasonConfig::default()).generate()?;
//! let specs = FeatureSpec::defaults();
//! let table = build_features(&events, 5, &specs)?;
//! let columns: Vec<&str> = specs.iter().map(|s| s.target.as_str()).collect();
//! let model = GradientBoostingClassifier::new(BoostingConfig::default());
//! let run = evaluate(&table, &columns, "outcome", 0.2, 42, model)?;
//! println!("accuracy {:.2}", run.accuracy);
//! # Ok::<(), matchform::MatchformError>(())
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod features;
pub mod harness;
pub mod logging;
pub mod model;

pub use config::PipelineConfig;
pub use error::{MatchformError, Result};
pub use events::{parse_rows, Event, MockSeason, Timestamp};
pub use features::{build_features, FeatureBuilder, FeatureRow, FeatureSpec, FeatureTable};
pub use harness::{evaluate, train_test_split, Evaluation, Split};
pub use logging::StructuredLogger;
pub use model::{Classifier, GradientBoostingClassifier, MajorityClassifier};
