//! Markup conventions for generated forms
//!
//! Class hooks, the derived-id prefix, and the names of the injected
//! hidden fields all live here so host applications on a different CSS
//! framework or middleware stack can adjust them in one place.

/// Naming and class conventions applied to generated markup.
#[derive(Debug, Clone)]
pub struct FormConfig {
	/// Class added to the form tag when the inline modifier is requested.
	pub inline_class: String,
	/// Class on the wrapping `<div>` of a form group.
	pub group_class: String,
	/// Class on a form group's help text element.
	pub help_class: String,
	/// Prefix for ids derived from field names.
	pub id_prefix: String,
	/// Name of the hidden field carrying the spoofed HTTP method.
	pub method_field: String,
	/// Name of the hidden CSRF token field.
	pub token_field: String,
}

impl Default for FormConfig {
	fn default() -> Self {
		Self {
			inline_class: "form-inline".into(),
			group_class: "form-group".into(),
			help_class: "form-text".into(),
			id_prefix: "id_".into(),
			method_field: "_method".into(),
			token_field: "csrf_token".into(),
		}
	}
}

impl FormConfig {
	/// Create the default configuration.
	pub fn new() -> Self {
		Self::default()
	}
	/// Override the inline form class.
	pub fn with_inline_class(mut self, class: impl Into<String>) -> Self {
		self.inline_class = class.into();
		self
	}
	/// Override the form group wrapper class.
	pub fn with_group_class(mut self, class: impl Into<String>) -> Self {
		self.group_class = class.into();
		self
	}
	/// Override the help text class.
	pub fn with_help_class(mut self, class: impl Into<String>) -> Self {
		self.help_class = class.into();
		self
	}
	/// Override the derived-id prefix.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::config::FormConfig;
	///
	/// let config = FormConfig::new().with_id_prefix("field_");
	/// assert_eq!(config.field_id("email"), "field_email");
	/// ```
	pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.id_prefix = prefix.into();
		self
	}
	/// Override the method-spoof field name.
	pub fn with_method_field(mut self, name: impl Into<String>) -> Self {
		self.method_field = name.into();
		self
	}
	/// Override the CSRF token field name.
	pub fn with_token_field(mut self, name: impl Into<String>) -> Self {
		self.token_field = name.into();
		self
	}
	/// Derive the id for a field name: the configured prefix plus the
	/// name with bracket/dot/space notation folded to underscores.
	///
	/// The transform is deterministic, so repeated calls for the same
	/// name always agree (labels rely on that).
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::config::FormConfig;
	///
	/// let config = FormConfig::new();
	/// assert_eq!(config.field_id("email"), "id_email");
	/// assert_eq!(config.field_id("user[email]"), "id_user_email");
	/// ```
	pub fn field_id(&self, name: &str) -> String {
		let mut id = self.id_prefix.clone();
		for c in name.chars() {
			match c {
				'[' | '.' | ' ' => id.push('_'),
				']' => {}
				c => id.push(c),
			}
		}
		id
	}
}
