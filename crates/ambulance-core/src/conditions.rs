//! Predefined condition management for a single ambulance document.
//!
//! Condition codes are unique within one ambulance. All operations here work on
//! an owned, in-memory [`Ambulance`]; persisting the result is the caller's job.

use thiserror::Error;

use crate::model::{Ambulance, Condition};

/// Reasons a condition operation is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error("Ambulance ID is required")]
    MissingAmbulanceId,

    #[error("Condition code is required")]
    MissingCode,

    #[error("Condition '{0}' already exists")]
    AlreadyExists(String),

    #[error("Condition '{0}' not found")]
    NotFound(String),

    #[error("Cannot change code to '{0}', a condition with that code already exists")]
    CodeTaken(String),

    #[error("Condition '{0}' was not found after insert")]
    NotPersisted(String),
}

impl Ambulance {
    /// The ambulance's predefined conditions in insertion order.
    pub fn conditions(&self) -> &[Condition] {
        &self.predefined_conditions
    }

    pub fn find_condition(&self, code: &str) -> Option<&Condition> {
        self.position_of(code).map(|idx| &self.predefined_conditions[idx])
    }

    fn position_of(&self, code: &str) -> Option<usize> {
        self.predefined_conditions
            .iter()
            .position(|c| c.code == code)
    }

    /// Appends a new condition and returns the stored entry.
    pub fn add_condition(&mut self, condition: Condition) -> Result<&Condition, ConditionError> {
        if self.id.is_empty() {
            return Err(ConditionError::MissingAmbulanceId);
        }
        if condition.code.is_empty() {
            return Err(ConditionError::MissingCode);
        }
        if self.position_of(&condition.code).is_some() {
            return Err(ConditionError::AlreadyExists(condition.code));
        }

        let code = condition.code.clone();
        self.predefined_conditions.push(condition);

        // Hand back the entry as it sits in the list, not the caller's input.
        let idx = self
            .position_of(&code)
            .ok_or_else(|| ConditionError::NotPersisted(code))?;
        Ok(&self.predefined_conditions[idx])
    }

    /// Applies a partial update to the condition stored under `code`.
    ///
    /// `code`, `reference` and `value` are only overwritten by non-empty
    /// values. `typical_duration_minutes` is always overwritten, zero
    /// included.
    pub fn update_condition(
        &mut self,
        code: &str,
        patch: Condition,
    ) -> Result<&Condition, ConditionError> {
        if code.is_empty() {
            return Err(ConditionError::MissingCode);
        }
        let idx = self
            .position_of(code)
            .ok_or_else(|| ConditionError::NotFound(code.to_string()))?;

        if !patch.code.is_empty() {
            if let Some(other) = self.position_of(&patch.code) {
                if other != idx {
                    return Err(ConditionError::CodeTaken(patch.code));
                }
            }
        }

        let entry = &mut self.predefined_conditions[idx];
        if !patch.code.is_empty() {
            entry.code = patch.code;
        }
        if !patch.reference.is_empty() {
            entry.reference = patch.reference;
        }
        entry.typical_duration_minutes = patch.typical_duration_minutes;
        if !patch.value.is_empty() {
            entry.value = patch.value;
        }
        Ok(entry)
    }

    /// Removes the condition stored under `code`, keeping the order of the
    /// remaining entries.
    pub fn remove_condition(&mut self, code: &str) -> Result<Condition, ConditionError> {
        if code.is_empty() {
            return Err(ConditionError::MissingCode);
        }
        let idx = self
            .position_of(code)
            .ok_or_else(|| ConditionError::NotFound(code.to_string()))?;
        Ok(self.predefined_conditions.remove(idx))
    }
}
