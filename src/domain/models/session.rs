use std::collections::HashMap;

use serde_json::Value;

use super::{ChatMessage, ModelOption};
use crate::domain::DomainError;

const CHAT_HISTORY_KEY: &str = "chat_history";
const SELECTED_MODEL_KEY: &str = "selected_model";

/// Per-session key/value store owned by the UI shell.
///
/// Values are untyped so the shell can keep whatever it needs alongside the
/// chat history; [`SessionContext`] provides the typed view.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    values: HashMap<String, Value>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.values.get_mut(key)
    }
}

/// Explicit session context passed to the turn use case.
///
/// The chat history can only grow: there is no API to edit or remove a
/// message once it has been appended.
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: SessionState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::from_state(SessionState::new())
    }

    /// Wrap an existing shell store, creating an empty history if absent.
    pub fn from_state(mut state: SessionState) -> Self {
        if state.get(CHAT_HISTORY_KEY).is_none() {
            state.set(CHAT_HISTORY_KEY, Value::Array(Vec::new()));
        }
        Self { state }
    }

    pub fn append(&mut self, message: ChatMessage) -> Result<(), DomainError> {
        let record = serde_json::to_value(&message)
            .map_err(|e| DomainError::history(format!("failed to encode message: {e}")))?;

        match self.state.get_mut(CHAT_HISTORY_KEY) {
            Some(Value::Array(records)) => {
                records.push(record);
                Ok(())
            }
            Some(other) => Err(DomainError::history(format!(
                "chat history slot holds {other} instead of a list"
            ))),
            None => {
                self.state.set(CHAT_HISTORY_KEY, Value::Array(vec![record]));
                Ok(())
            }
        }
    }

    /// Decode the full history. Fails if any stored record is malformed.
    pub fn history(&self) -> Result<Vec<ChatMessage>, DomainError> {
        let records = self.records()?;
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                serde_json::from_value(record.clone()).map_err(|e| {
                    DomainError::history(format!("malformed message record #{i}: {e}"))
                })
            })
            .collect()
    }

    /// Number of stored records, well-formed or not.
    pub fn len(&self) -> usize {
        self.records().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn select_model(&mut self, model: ModelOption) {
        self.state
            .set(SELECTED_MODEL_KEY, Value::String(model.label().to_string()));
    }

    pub fn selected_model_label(&self) -> Option<&str> {
        self.state.get(SELECTED_MODEL_KEY).and_then(Value::as_str)
    }

    fn records(&self) -> Result<&Vec<Value>, DomainError> {
        match self.state.get(CHAT_HISTORY_KEY) {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(DomainError::history(format!(
                "chat history slot holds {other} instead of a list"
            ))),
            None => Err(DomainError::history("chat history slot is missing")),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
