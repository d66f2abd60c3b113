//! Dirty tracking for partial updates.
//!
//! A [`ComponentState`] holds the values of one wire component (the body or
//! the headers) keyed by wire name, together with the set of keys that were
//! assigned locally and not yet confirmed by the server.
//!
//! # How It Works
//!
//! Local assignment marks a key dirty. Merging a server response overwrites
//! the merged keys and clears their dirty flags; keys the server did not
//! send keep whatever state they had. Only dirty keys are serialized for
//! create and update requests.
//!
//! # Example
//!
//! ```rust
//! use ecl_sdk::rest::ComponentState;
//! use serde_json::json;
//!
//! let mut state = ComponentState::default();
//! state.set("name", json!("web"));
//! assert!(state.is_dirty());
//!
//! state.merge([("name".to_string(), json!("web")), ("status".to_string(), json!("CREATE_COMPLETE"))]);
//! assert!(!state.is_dirty());
//! assert_eq!(state.get("status"), Some(&json!("CREATE_COMPLETE")));
//! ```

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Values of one wire component plus their dirty flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentState {
    attributes: Map<String, Value>,
    dirty: BTreeSet<String>,
}

impl ComponentState {
    /// Assigns a value locally and marks the key dirty.
    pub fn set(&mut self, wire: impl Into<String>, value: Value) {
        let wire = wire.into();
        self.dirty.insert(wire.clone());
        self.attributes.insert(wire, value);
    }

    /// Merges server-provided values, clearing the dirty flag of each.
    pub fn merge<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (wire, value) in values {
            self.dirty.remove(&wire);
            self.attributes.insert(wire, value);
        }
    }

    /// Returns the value stored under a wire name.
    #[must_use]
    pub fn get(&self, wire: &str) -> Option<&Value> {
        self.attributes.get(wire)
    }

    /// Returns `true` if a value (possibly `null`) is stored.
    #[must_use]
    pub fn contains(&self, wire: &str) -> bool {
        self.attributes.contains_key(wire)
    }

    /// Returns `true` if any key is dirty.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns `true` if the key is dirty.
    #[must_use]
    pub fn is_key_dirty(&self, wire: &str) -> bool {
        self.dirty.contains(wire)
    }

    /// Clears every dirty flag.
    pub fn mark_clean(&mut self) {
        self.dirty.clear();
    }

    /// Returns all stored values keyed by wire name.
    #[must_use]
    pub const fn values(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns only the dirty values keyed by wire name.
    #[must_use]
    pub fn dirty_values(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .filter(|(wire, _)| self.dirty.contains(*wire))
            .map(|(wire, value)| (wire.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_state_is_clean_and_empty() {
        let state = ComponentState::default();
        assert!(!state.is_dirty());
        assert!(state.values().is_empty());
        assert!(state.dirty_values().is_empty());
    }

    #[test]
    fn test_set_marks_key_dirty() {
        let mut state = ComponentState::default();
        state.set("stack_name", json!("web"));

        assert!(state.is_dirty());
        assert!(state.is_key_dirty("stack_name"));
        assert_eq!(state.dirty_values().get("stack_name"), Some(&json!("web")));
    }

    #[test]
    fn test_merge_clears_only_merged_keys() {
        let mut state = ComponentState::default();
        state.set("name", json!("local"));
        state.set("description", json!("local desc"));

        state.merge([("name".to_string(), json!("server"))]);

        assert!(!state.is_key_dirty("name"));
        assert!(state.is_key_dirty("description"));
        assert_eq!(state.get("name"), Some(&json!("server")));

        let dirty = state.dirty_values();
        assert_eq!(dirty.len(), 1);
        assert!(dirty.contains_key("description"));
    }

    #[test]
    fn test_merge_keeps_null_values() {
        let mut state = ComponentState::default();
        state.merge([("parent".to_string(), Value::Null)]);

        assert!(state.contains("parent"));
        assert_eq!(state.get("parent"), Some(&Value::Null));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let values = vec![
            ("id".to_string(), json!("1")),
            ("status".to_string(), json!("ACTIVE")),
        ];

        let mut once = ComponentState::default();
        once.merge(values.clone());

        let mut twice = ComponentState::default();
        twice.merge(values.clone());
        twice.merge(values);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_mark_clean_clears_all_flags() {
        let mut state = ComponentState::default();
        state.set("a", json!(1));
        state.set("b", json!(2));
        state.mark_clean();

        assert!(!state.is_dirty());
        assert_eq!(state.values().len(), 2);
    }
}
