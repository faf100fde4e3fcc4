//! Per-form value resolution
//!
//! While a form is open, field builders look display values up through a
//! [`FormState`] bound to either a submitted-value map or a model record.
//! Both shapes sit behind the [`ValueSource`] capability so the builder
//! never knows which one it is talking to.

use std::collections::HashMap;

/// Capability to resolve a field's display value by name.
///
/// Implemented for `HashMap<String, String>` (raw submitted values) and
/// for `serde_json::Value` (model/record attribute lookup).
pub trait ValueSource: Send + Sync {
	/// Resolve `name` to a display value, `None` when the source has no
	/// entry for it.
	fn resolve(&self, name: &str) -> Option<String>;
}

impl ValueSource for HashMap<String, String> {
	fn resolve(&self, name: &str) -> Option<String> {
		self.get(name).cloned()
	}
}

/// Model attribute lookup over a JSON object.
///
/// Strings resolve without quoting, numbers and booleans through their
/// display form; null, arrays, and nested objects have no single display
/// value and resolve to `None`.
impl ValueSource for serde_json::Value {
	fn resolve(&self, name: &str) -> Option<String> {
		match self.get(name)? {
			serde_json::Value::String(s) => Some(s.clone()),
			serde_json::Value::Number(n) => Some(n.to_string()),
			serde_json::Value::Bool(b) => Some(b.to_string()),
			_ => None,
		}
	}
}

/// State of the currently open form: the optional bound data source.
///
/// Created when a form opens, dropped when it closes; the builder enforces
/// that at most one instance is live per builder.
pub struct FormState {
	source: Option<Box<dyn ValueSource>>,
}

impl FormState {
	/// State for a form with no bound data source.
	pub fn new() -> Self {
		Self { source: None }
	}
	/// State bound to a data source.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::state::FormState;
	/// use std::collections::HashMap;
	///
	/// let mut data = HashMap::new();
	/// data.insert("email".to_string(), "d@example.com".to_string());
	///
	/// let state = FormState::bound(Box::new(data));
	/// assert_eq!(state.value("email", None), Some("d@example.com".to_string()));
	/// ```
	pub fn bound(source: Box<dyn ValueSource>) -> Self {
		Self {
			source: Some(source),
		}
	}
	/// Whether a data source is bound.
	pub fn is_bound(&self) -> bool {
		self.source.is_some()
	}
	/// Resolve a field's display value, falling back to `default` when
	/// the source is absent or has no entry for `name`.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::state::FormState;
	///
	/// let state = FormState::new();
	/// assert_eq!(state.value("email", Some("fallback")), Some("fallback".to_string()));
	/// assert_eq!(state.value("email", None), None);
	/// ```
	pub fn value(&self, name: &str, default: Option<&str>) -> Option<String> {
		self.source
			.as_ref()
			.and_then(|source| source.resolve(name))
			.or_else(|| default.map(str::to_string))
	}
}

impl Default for FormState {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_map_source_resolves_entries() {
		let mut data = HashMap::new();
		data.insert("name".to_string(), "x".to_string());
		let state = FormState::bound(Box::new(data));

		assert_eq!(state.value("name", None), Some("x".to_string()));
		assert_eq!(state.value("missing", None), None);
	}

	#[test]
	fn test_source_wins_over_default() {
		let mut data = HashMap::new();
		data.insert("name".to_string(), "bound".to_string());
		let state = FormState::bound(Box::new(data));

		assert_eq!(state.value("name", Some("default")), Some("bound".to_string()));
	}

	#[test]
	fn test_default_used_when_source_misses() {
		let state = FormState::bound(Box::new(HashMap::new()));
		assert_eq!(state.value("name", Some("default")), Some("default".to_string()));
	}

	#[test]
	fn test_model_source_scalar_display() {
		let model = json!({"title": "Post", "count": 3, "draft": true});
		let state = FormState::bound(Box::new(model));

		assert_eq!(state.value("title", None), Some("Post".to_string()));
		assert_eq!(state.value("count", None), Some("3".to_string()));
		assert_eq!(state.value("draft", None), Some("true".to_string()));
	}

	#[test]
	fn test_model_source_non_scalar_resolves_none() {
		let model = json!({"tags": ["a", "b"], "meta": {"k": "v"}, "gone": null});
		let state = FormState::bound(Box::new(model));

		assert_eq!(state.value("tags", None), None);
		assert_eq!(state.value("meta", None), None);
		assert_eq!(state.value("gone", Some("d")), Some("d".to_string()));
	}
}
