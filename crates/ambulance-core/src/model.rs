use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::id::{generate_id, validate_id};

/// A predefined condition entry embedded in an ambulance's waiting list.
///
/// Every field falls back to its zero value when it is missing from the
/// incoming JSON, so a partial body deserializes into a `Condition` with empty
/// strings and a zero duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub typical_duration_minutes: i32,
    #[serde(default)]
    pub value: String,
}

impl Condition {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_duration(mut self, minutes: i32) -> Self {
        self.typical_duration_minutes = minutes;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// The aggregate root document stored per ambulance.
///
/// Members other than `id` and `predefinedConditions` (name, room number,
/// waiting list entries, ...) are kept verbatim in `data` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Ambulance {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub predefined_conditions: Vec<Condition>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Ambulance {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            predefined_conditions: Vec::new(),
            data: Map::new(),
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.predefined_conditions = conditions;
        self
    }

    pub fn add_field(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    pub fn get_field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Assigns a fresh identifier when none was supplied, otherwise checks
    /// that the supplied one is addressable.
    pub fn ensure_id(&mut self) -> Result<()> {
        if self.id.is_empty() {
            self.id = generate_id();
            tracing::debug!(ambulance_id = %self.id, "Generated ambulance ID");
            return Ok(());
        }
        validate_id(&self.id).map_err(CoreError::from)
    }

    /// Binds a replacement document to the identifier it is stored under.
    ///
    /// An empty body `id` takes the path identifier; a different non-empty
    /// one is rejected.
    pub fn bind_to_id(&mut self, path_id: &str) -> Result<()> {
        if self.id.is_empty() {
            self.id = path_id.to_string();
            return Ok(());
        }
        if self.id != path_id {
            return Err(CoreError::id_mismatch(path_id, self.id.clone()));
        }
        Ok(())
    }

    /// Rejects a document whose predefined conditions repeat a code.
    pub fn validate_conditions(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for condition in &self.predefined_conditions {
            if !seen.insert(condition.code.as_str()) {
                return Err(CoreError::DuplicateCode(condition.code.clone()));
            }
        }
        Ok(())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Condition>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Condition>>::deserialize(deserializer)?.unwrap_or_default())
}
