//! matchform demo entrypoint: synthetic season → rolling features → boosted
//! classifier → baseline and boosted JSON report lines on stdout. Config path from
//! `MATCHFORM_CONFIG_PATH` (default `config.json`); missing file means defaults.

use matchform::{
    config::PipelineConfig,
    events::{MockSeason, FIELD_OUTCOME},
    features::FeatureBuilder,
    harness::evaluate_with,
    logging::StructuredLogger,
    model::{GradientBoostingClassifier, MajorityClassifier},
};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("MATCHFORM_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = PipelineConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(config = %config_path.display(), "matchform starting");

    let events = MockSeason::new(config.mock.clone()).generate()?;
    let builder = FeatureBuilder::new(config.features.clone());
    let table = builder.build(&events)?;
    info!(
        raw_rows = events.len(),
        feature_rows = table.len(),
        "dropped rows without full history"
    );
    if !table.summary().entities_without_history.is_empty() {
        warn!(
            entities = ?table.summary().entities_without_history,
            "entities without enough history"
        );
    }

    let columns: Vec<&str> = table.columns().iter().map(String::as_str).collect();
    let baseline = evaluate_with(
        &table,
        &columns,
        FIELD_OUTCOME,
        &config.split,
        MajorityClassifier::new(),
    )?;
    let run = evaluate_with(
        &table,
        &columns,
        FIELD_OUTCOME,
        &config.split,
        GradientBoostingClassifier::new(config.model.clone()),
    )?;
    info!(
        accuracy = run.accuracy,
        baseline = baseline.accuracy,
        trees = run.classifier.n_trees(),
        "training complete"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    StructuredLogger::emit_json(&baseline.report(), &mut out)?;
    StructuredLogger::emit_json(&run.report(), &mut out)?;
    Ok(())
}
