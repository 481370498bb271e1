//! Event records: one row per entity per time unit, plus validation of loosely
//! typed input rows into typed events.

mod mock;

use crate::error::{MatchformError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use mock::MockSeason;

pub const FIELD_ENTITY_ID: &str = "entity_id";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_VALUE_A: &str = "value_a";
pub const FIELD_VALUE_B: &str = "value_b";
pub const FIELD_OUTCOME: &str = "outcome";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sort key within an entity group. All events of one input must share a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Seq(i64),
    Date(NaiveDate),
}

impl Timestamp {
    pub fn kind(&self) -> &'static str {
        match self {
            Timestamp::Seq(_) => "sequence",
            Timestamp::Date(_) => "date",
        }
    }
}

impl From<i64> for Timestamp {
    fn from(seq: i64) -> Self {
        Timestamp::Seq(seq)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp::Date(date)
    }
}

/// One observation of a tracked entity (e.g. one game of a team)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub entity_id: String,
    pub timestamp: Timestamp,
    /// e.g. points scored
    pub value_a: f64,
    /// e.g. points conceded
    pub value_b: f64,
    /// e.g. win
    pub outcome: bool,
}

/// Numeric event fields that can feed a rolling feature or serve as a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    ValueA,
    ValueB,
    Outcome,
}

impl EventField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            FIELD_VALUE_A => Some(EventField::ValueA),
            FIELD_VALUE_B => Some(EventField::ValueB),
            FIELD_OUTCOME => Some(EventField::Outcome),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventField::ValueA => FIELD_VALUE_A,
            EventField::ValueB => FIELD_VALUE_B,
            EventField::Outcome => FIELD_OUTCOME,
        }
    }

    /// Outcome reads as 1.0 / 0.0.
    pub fn read(&self, event: &Event) -> f64 {
        match self {
            EventField::ValueA => event.value_a,
            EventField::ValueB => event.value_b,
            EventField::Outcome => {
                if event.outcome {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

impl Event {
    pub fn new(
        entity_id: impl Into<String>,
        timestamp: impl Into<Timestamp>,
        value_a: f64,
        value_b: f64,
        outcome: bool,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            timestamp: timestamp.into(),
            value_a,
            value_b,
            outcome,
        }
    }

    /// Numeric view of a named field, `None` if the name is not a numeric field.
    pub fn field(&self, name: &str) -> Option<f64> {
        EventField::from_name(name).map(|f| f.read(self))
    }

    /// Check the invariants a typed event cannot express on its own.
    pub fn validate(&self) -> Result<()> {
        if self.entity_id.trim().is_empty() {
            return Err(MatchformError::schema(FIELD_ENTITY_ID, "entity id is empty"));
        }
        if !self.value_a.is_finite() {
            let reason = format!("non-finite value {}", self.value_a);
            return Err(MatchformError::schema(FIELD_VALUE_A, reason));
        }
        if !self.value_b.is_finite() {
            let reason = format!("non-finite value {}", self.value_b);
            return Err(MatchformError::schema(FIELD_VALUE_B, reason));
        }
        Ok(())
    }

    /// Parse one loosely typed row (e.g. decoded from JSON or a CSV reader).
    pub fn from_row(row: &Map<String, Value>) -> Result<Self> {
        let event = Self {
            entity_id: parse_entity_id(required(row, FIELD_ENTITY_ID)?)?,
            timestamp: parse_timestamp(required(row, FIELD_TIMESTAMP)?)?,
            value_a: parse_number(FIELD_VALUE_A, required(row, FIELD_VALUE_A)?)?,
            value_b: parse_number(FIELD_VALUE_B, required(row, FIELD_VALUE_B)?)?,
            outcome: parse_outcome(required(row, FIELD_OUTCOME)?)?,
        };
        event.validate()?;
        Ok(event)
    }
}

/// Parse every row or fail on the first bad one; no partial output.
pub fn parse_rows(rows: &[Map<String, Value>]) -> Result<Vec<Event>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            Event::from_row(row).map_err(|e| match e {
                MatchformError::Schema { field, reason } => MatchformError::Schema {
                    field,
                    reason: format!("row {}: {}", i, reason),
                },
                other => other,
            })
        })
        .collect()
}

fn required<'a>(row: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    match row.get(field) {
        None | Some(Value::Null) => Err(MatchformError::schema(field, "missing required field")),
        Some(v) => Ok(v),
    }
}

fn parse_entity_id(value: &Value) -> Result<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err(MatchformError::schema(FIELD_ENTITY_ID, "entity id is empty")),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(MatchformError::schema(
            FIELD_ENTITY_ID,
            format!("expected a string or integer id, got {}", other),
        )),
    }
}

fn parse_timestamp(value: &Value) -> Result<Timestamp> {
    match value {
        Value::Number(n) => n.as_i64().map(Timestamp::Seq).ok_or_else(|| {
            let reason = format!("expected an integer sequence number, got {}", n);
            MatchformError::schema(FIELD_TIMESTAMP, reason)
        }),
        Value::String(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Timestamp::Date)
            .map_err(|e| {
                MatchformError::schema(FIELD_TIMESTAMP, format!("bad date {:?}: {}", s, e))
            }),
        other => Err(MatchformError::schema(
            FIELD_TIMESTAMP,
            format!("expected a date or sequence number, got {}", other),
        )),
    }
}

fn parse_number(field: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| MatchformError::schema(field, format!("expected a number, got {}", value)))
}

fn parse_outcome(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 0.0 => Ok(false),
            Some(x) if x == 1.0 => Ok(true),
            _ => Err(MatchformError::schema(FIELD_OUTCOME, format!("expected 0 or 1, got {}", n))),
        },
        other => Err(MatchformError::schema(
            FIELD_OUTCOME,
            format!("expected a binary outcome, got {}", other),
        )),
    }
}
