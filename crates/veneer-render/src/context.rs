//! Render-time data binding.
//!
//! A [`RenderContext`] is the set of values a template's field references
//! resolve against. It is an ordered field → value mapping built per request
//! and discarded after the response is written; the renderer borrows it and
//! never mutates it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::EngineError;

/// The data bound to field references during rendering.
///
/// Values are stored as [`serde_json::Value`], so scalars, sequences, and
/// nested mappings are all representable. Fields are kept in a `BTreeMap`
/// for deterministic ordering.
///
/// # Example
///
/// ```rust
/// use veneer_render::RenderContext;
///
/// let ctx = RenderContext::new()
///     .set("Username", "John")
///     .set("Count", 7)
///     .set("Names", vec!["Anton", "Vasia", "Maria"]);
/// assert_eq!(ctx.len(), 3);
/// ```
///
/// Arbitrary `Serialize` data goes in via [`try_set`](Self::try_set) or
/// [`from_serialize`](Self::from_serialize).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: BTreeMap<String, serde_json::Value>,
}

impl RenderContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field to any value with a direct JSON representation.
    ///
    /// Covers strings, numbers, booleans, and sequences of those. A later
    /// `set` for the same field replaces the earlier value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets a field to any `Serialize` value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Render`] if the value cannot be serialized
    /// (e.g. a map with non-string keys).
    pub fn try_set(
        mut self,
        key: impl Into<String>,
        value: &impl Serialize,
    ) -> Result<Self, EngineError> {
        let key = key.into();
        let value = serde_json::to_value(value)
            .map_err(|e| EngineError::Render(format!("context field {key:?}: {e}")))?;
        self.values.insert(key, value);
        Ok(self)
    }

    /// Builds a context from any value that serializes to a map.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Render`] if serialization fails or the value
    /// is not a map at the top level.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, EngineError> {
        let value = serde_json::to_value(value)
            .map_err(|e| EngineError::Render(format!("context: {e}")))?;
        match value {
            serde_json::Value::Object(map) => Ok(Self {
                values: map.into_iter().collect(),
            }),
            other => Err(EngineError::Render(format!(
                "context must serialize to a map, got {other}"
            ))),
        }
    }

    /// Returns the value bound to a field, if any.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_scalars_and_sequences() {
        let ctx = RenderContext::new()
            .set("Count", 1)
            .set("Name", "John")
            .set("Flags", vec![true, false]);
        assert_eq!(ctx.get("Count"), Some(&serde_json::json!(1)));
        assert_eq!(ctx.get("Name"), Some(&serde_json::json!("John")));
        assert_eq!(ctx.get("Flags"), Some(&serde_json::json!([true, false])));
    }

    #[test]
    fn test_set_replaces_earlier_value() {
        let ctx = RenderContext::new().set("Count", 1).set("Count", 2);
        assert_eq!(ctx.get("Count"), Some(&serde_json::json!(2)));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_try_set_struct() {
        #[derive(Serialize)]
        struct User {
            id: u32,
            name: &'static str,
        }

        let ctx = RenderContext::new()
            .try_set("User", &User { id: 1, name: "Anton" })
            .unwrap();
        assert_eq!(
            ctx.get("User"),
            Some(&serde_json::json!({"id": 1, "name": "Anton"}))
        );
    }

    #[test]
    fn test_from_serialize_map() {
        #[derive(Serialize)]
        struct Page {
            title: String,
            visits: u64,
        }

        let ctx = RenderContext::from_serialize(&Page {
            title: "Home".into(),
            visits: 9,
        })
        .unwrap();
        assert_eq!(ctx.get("title"), Some(&serde_json::json!("Home")));
        assert_eq!(ctx.get("visits"), Some(&serde_json::json!(9)));
    }

    #[test]
    fn test_from_serialize_rejects_non_map() {
        let result = RenderContext::from_serialize(&vec![1, 2, 3]);
        assert!(matches!(result, Err(EngineError::Render(_))));
    }

    #[test]
    fn test_empty_context() {
        let ctx = RenderContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.get("anything"), None);
    }
}
