//! Feature pipeline: events → entity groups → stable timestamp sort → sliding
//! window means of strictly prior events → eligible rows.

use super::{BuildSummary, FeatureRow, FeatureSpec, FeatureTable, RollingWindow};
use crate::config::FeaturesConfig;
use crate::error::{MatchformError, Result};
use crate::events::{Event, EventField, FIELD_TIMESTAMP};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

pub struct FeatureBuilder {
    config: FeaturesConfig,
}

impl FeatureBuilder {
    pub fn new(config: FeaturesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeaturesConfig {
        &self.config
    }

    /// Build the feature table. Holds no state between calls.
    pub fn build(&self, events: &[Event]) -> Result<FeatureTable> {
        build_features(events, self.config.window_size, &self.config.specs)
    }
}

/// Rolling mean of the `window_size` events strictly before each event of the
/// same entity, for every spec. Events with fewer than `window_size` prior
/// events are dropped. Fails before producing any row if the input or the
/// specs are malformed.
pub fn build_features(
    events: &[Event],
    window_size: usize,
    specs: &[FeatureSpec],
) -> Result<FeatureTable> {
    if window_size == 0 {
        return Err(MatchformError::invalid("window_size", window_size, "must be positive"));
    }
    let sources = resolve_specs(specs)?;
    validate_events(events)?;

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, e) in events.iter().enumerate() {
        groups.entry(e.entity_id.as_str()).or_default().push(i);
    }

    let entities = groups.len();
    let eligible = events.len().saturating_sub(entities.saturating_mul(window_size));
    let mut rows = Vec::with_capacity(eligible);
    let mut entities_without_history = Vec::new();

    for (entity, mut indices) in groups {
        // sort_by_key is stable: equal timestamps keep input order
        indices.sort_by_key(|&i| events[i].timestamp);

        let mut windows: Vec<RollingWindow> =
            sources.iter().map(|_| RollingWindow::new(window_size)).collect();
        let before = rows.len();
        for (position, &i) in indices.iter().enumerate() {
            let event = &events[i];
            // read before pushing: the current event never sees itself
            let values: Option<Vec<f64>> = windows.iter().map(RollingWindow::mean).collect();
            if let Some(values) = values {
                rows.push(FeatureRow {
                    event: event.clone(),
                    position,
                    values,
                });
            }
            for (window, field) in windows.iter_mut().zip(&sources) {
                window.push(field.read(event));
            }
        }

        let emitted = rows.len() - before;
        debug!(entity, events = indices.len(), emitted, "entity group processed");
        if emitted == 0 {
            entities_without_history.push(entity.to_string());
        }
    }

    let summary = BuildSummary {
        window_size,
        input_rows: events.len(),
        output_rows: rows.len(),
        entities,
        entities_without_history,
    };
    info!(
        window_size,
        input_rows = summary.input_rows,
        output_rows = summary.output_rows,
        entities = summary.entities,
        "feature table built"
    );

    let columns = specs.iter().map(|s| s.target.clone()).collect();
    Ok(FeatureTable::new(columns, rows, summary))
}

fn resolve_specs(specs: &[FeatureSpec]) -> Result<Vec<EventField>> {
    if specs.is_empty() {
        return Err(MatchformError::invalid("feature_specs", "[]", "at least one spec is required"));
    }
    let mut targets = HashSet::new();
    specs
        .iter()
        .map(|spec| {
            if !targets.insert(spec.target.as_str()) {
                return Err(MatchformError::invalid(
                    "feature_specs",
                    &spec.target,
                    "duplicate target column",
                ));
            }
            EventField::from_name(&spec.source).ok_or_else(|| {
                MatchformError::schema(spec.source.as_str(), "not a numeric event field")
            })
        })
        .collect()
}

fn validate_events(events: &[Event]) -> Result<()> {
    let mut kind = None;
    for e in events {
        e.validate()?;
        match kind {
            None => kind = Some(e.timestamp.kind()),
            Some(k) if k != e.timestamp.kind() => {
                return Err(MatchformError::schema(
                    FIELD_TIMESTAMP,
                    format!("mixed timestamp kinds: {} and {}", k, e.timestamp.kind()),
                ));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{ROLLING_OUTCOME_RATE, ROLLING_VALUE_A, ROLLING_VALUE_B};

    fn lal(values: &[f64]) -> Vec<Event> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Event::new("LAL", i as i64, v, 100.0, i % 2 == 0))
            .collect()
    }

    #[test]
    fn rejects_zero_window() {
        let err = build_features(&lal(&[1.0]), 0, &FeatureSpec::defaults()).unwrap_err();
        assert!(matches!(err, MatchformError::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_unknown_source_field() {
        let specs = vec![FeatureSpec::new("rebounds", "rolling_rebounds")];
        let err = build_features(&lal(&[1.0]), 3, &specs).unwrap_err();
        assert!(matches!(err, MatchformError::Schema { ref field, .. } if field == "rebounds"));
    }

    #[test]
    fn rejects_duplicate_targets() {
        let specs = vec![
            FeatureSpec::new("value_a", "form"),
            FeatureSpec::new("value_b", "form"),
        ];
        assert!(build_features(&lal(&[1.0]), 3, &specs).is_err());
    }

    #[test]
    fn rejects_mixed_timestamp_kinds() {
        let mut events = lal(&[1.0, 2.0]);
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        events[1].timestamp = crate::events::Timestamp::Date(date);
        let err = build_features(&events, 1, &FeatureSpec::defaults()).unwrap_err();
        assert!(
            matches!(err, MatchformError::Schema { ref field, .. } if field == FIELD_TIMESTAMP)
        );
    }

    #[test]
    fn rejects_empty_entity() {
        let mut events = lal(&[1.0, 2.0]);
        events[0].entity_id = "  ".into();
        assert!(build_features(&events, 1, &FeatureSpec::defaults()).is_err());
    }

    #[test]
    fn columns_follow_spec_order() {
        let table = build_features(&lal(&[1.0, 2.0, 3.0]), 2, &FeatureSpec::defaults()).unwrap();
        assert_eq!(table.columns(), &[ROLLING_VALUE_A, ROLLING_VALUE_B, ROLLING_OUTCOME_RATE]);
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.position, 2);
        assert_eq!(row.values, vec![1.5, 100.0, 0.5]);
    }

    #[test]
    fn summary_lists_short_entities() {
        let mut events = lal(&[1.0, 2.0, 3.0]);
        events.push(Event::new("BOS", 0, 1.0, 1.0, true));
        let table = build_features(&events, 2, &FeatureSpec::defaults()).unwrap();
        let s = table.summary();
        assert_eq!(s.input_rows, 4);
        assert_eq!(s.output_rows, 1);
        assert_eq!(s.entities, 2);
        assert_eq!(s.entities_without_history, vec!["BOS".to_string()]);
    }

    #[test]
    fn window_larger_than_any_group_yields_empty_table() {
        let mut events = lal(&[1.0, 2.0, 3.0]);
        events.push(Event::new("BOS", 0, 1.0, 1.0, true));
        for window_size in [usize::MAX, usize::MAX / 2 + 1, usize::MAX / 3] {
            let table = build_features(&events, window_size, &FeatureSpec::defaults()).unwrap();
            assert!(table.is_empty());
            assert_eq!(table.summary().window_size, window_size);
            assert_eq!(table.summary().entities_without_history.len(), 2);
        }
    }
}
