//! Form building
//!
//! [`FormBuilder`] is the context object for one form-building sequence:
//! it owns the open/close guard, the bound [`FormState`], and the injected
//! CSRF token provider. Field builders are methods on it so every lookup
//! goes through the same state, with no module-level slot involved.

use std::sync::Arc;

use crate::config::FormConfig;
use crate::csrf::CsrfTokenProvider;
use crate::error::{FormError, FormResult};
use crate::group::FormGroup;
use crate::html::Element;
use crate::state::{FormState, ValueSource};

/// Options for opening a form.
///
/// # Examples
///
/// ```
/// use grappelli::builder::FormOptions;
///
/// let options = FormOptions::new().inline().with_class("search");
/// assert!(options.inline);
/// assert_eq!(options.class.as_deref(), Some("search"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
	/// Add the configured inline CSS modifier to the form tag.
	pub inline: bool,
	/// Emit `enctype="multipart/form-data"` for file-upload forms.
	pub multipart: bool,
	/// Extra CSS class for the form tag.
	pub class: Option<String>,
	/// Explicit id for the form tag.
	pub id: Option<String>,
}

impl FormOptions {
	/// Default options: block form, no multipart, no extra class or id.
	pub fn new() -> Self {
		Self::default()
	}
	/// Request the inline CSS modifier.
	pub fn inline(mut self) -> Self {
		self.inline = true;
		self
	}
	/// Request `multipart/form-data` encoding.
	pub fn multipart(mut self) -> Self {
		self.multipart = true;
		self
	}
	/// Add a CSS class to the form tag.
	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}
	/// Set the form tag's id.
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}
}

/// Builder for one form at a time.
///
/// `open` transitions the builder to the open state (failing if a form is
/// already open), field builders consult the open form's [`FormState`],
/// and `close` returns the closing tag and clears the state.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use grappelli::builder::{FormBuilder, FormOptions};
/// use grappelli::csrf::StaticTokenProvider;
///
/// let mut form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
///
/// let open = form.open("PUT", "/posts/1", FormOptions::new()).unwrap();
/// assert!(open.starts_with(r#"<form method="POST" action="/posts/1">"#));
/// assert!(open.contains(r#"name="_method" value="PUT""#));
/// assert!(open.contains(r#"name="csrf_token""#));
///
/// let field = form.text("title", None).render();
/// assert_eq!(field, r#"<input type="text" name="title" id="id_title" />"#);
///
/// assert_eq!(form.close().unwrap(), "</form>");
/// ```
pub struct FormBuilder {
	config: FormConfig,
	csrf: Arc<dyn CsrfTokenProvider>,
	state: Option<FormState>,
}

impl FormBuilder {
	/// Create a builder with the default [`FormConfig`].
	pub fn new(csrf: Arc<dyn CsrfTokenProvider>) -> Self {
		Self {
			config: FormConfig::default(),
			csrf,
			state: None,
		}
	}
	/// Replace the markup conventions.
	pub fn with_config(mut self, config: FormConfig) -> Self {
		self.config = config;
		self
	}
	/// Whether a form is currently open.
	pub fn is_open(&self) -> bool {
		self.state.is_some()
	}
	/// The active configuration.
	pub fn config(&self) -> &FormConfig {
		&self.config
	}

	/// Open a form with no bound data source.
	///
	/// The method is normalized to uppercase. PUT, PATCH, and DELETE go
	/// over the wire as POST with a hidden method field carrying the real
	/// verb; any effective method other than GET also gets a hidden CSRF
	/// token field. Fails with [`FormError::AlreadyOpen`] if a form is
	/// open, leaving that form's state untouched.
	pub fn open(&mut self, method: &str, action: &str, options: FormOptions) -> FormResult<String> {
		self.open_with(method, action, options, None)
	}
	/// Open a form bound to a data source (a model record or a map of
	/// submitted values). Field builders resolve display values through
	/// the source until the form is closed.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use std::collections::HashMap;
	/// use grappelli::builder::{FormBuilder, FormOptions};
	/// use grappelli::csrf::StaticTokenProvider;
	///
	/// let mut form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
	/// let mut submitted = HashMap::new();
	/// submitted.insert("title".to_string(), "Minor swing".to_string());
	///
	/// form.open_bound("POST", "/posts", FormOptions::new(), Box::new(submitted)).unwrap();
	/// let field = form.text("title", None).render();
	/// assert!(field.contains(r#"value="Minor swing""#));
	/// form.close().unwrap();
	/// ```
	pub fn open_bound(
		&mut self,
		method: &str,
		action: &str,
		options: FormOptions,
		source: Box<dyn ValueSource>,
	) -> FormResult<String> {
		self.open_with(method, action, options, Some(source))
	}

	fn open_with(
		&mut self,
		method: &str,
		action: &str,
		options: FormOptions,
		source: Option<Box<dyn ValueSource>>,
	) -> FormResult<String> {
		if self.state.is_some() {
			return Err(FormError::AlreadyOpen);
		}
		let method = method.to_ascii_uppercase();
		let spoofed = matches!(method.as_str(), "PUT" | "PATCH" | "DELETE");
		let wire = if spoofed { "POST" } else { method.as_str() };

		let mut form = Element::new("form").attr("method", wire).attr("action", action);
		if options.inline {
			form = form.class(&self.config.inline_class);
		}
		if let Some(class) = &options.class {
			form = form.class(class);
		}
		if let Some(id) = &options.id {
			form = form.id(id);
		}
		if options.multipart {
			form = form.attr("enctype", "multipart/form-data");
		}

		self.state = Some(match source {
			Some(source) => FormState::bound(source),
			None => FormState::new(),
		});

		let mut html = form.render_open();
		if spoofed {
			tracing::debug!(%method, "spoofing method over POST");
			html.push_str(
				&Element::new("input")
					.attr("type", "hidden")
					.attr("name", &self.config.method_field)
					.value(&method)
					.render(),
			);
		}
		if wire != "GET" {
			html.push_str(&self.token().render());
		}
		Ok(html)
	}

	/// Close the open form, returning the closing tag and clearing the
	/// form state so a subsequent `open` succeeds.
	///
	/// Fails with [`FormError::NotOpen`] when no form is open.
	pub fn close(&mut self) -> FormResult<String> {
		if self.state.take().is_none() {
			return Err(FormError::NotOpen);
		}
		tracing::debug!("form closed");
		Ok("</form>".to_string())
	}

	/// Resolve a field's display value: the open form's bound source
	/// first, then the caller-supplied default.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use grappelli::builder::FormBuilder;
	/// use grappelli::csrf::StaticTokenProvider;
	///
	/// let form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
	/// assert_eq!(form.value("title", Some("draft")), Some("draft".to_string()));
	/// assert_eq!(form.value("title", None), None);
	/// ```
	pub fn value(&self, name: &str, default: Option<&str>) -> Option<String> {
		match &self.state {
			Some(state) => state.value(name, default),
			None => default.map(str::to_string),
		}
	}

	// An explicit value always wins; the bound source only fills in when
	// the caller passed none.
	fn field_value(&self, name: &str, explicit: Option<&str>) -> Option<String> {
		match explicit {
			Some(value) => Some(value.to_string()),
			None => self.state.as_ref().and_then(|state| state.value(name, None)),
		}
	}

	/// Generic input builder: type, name, derived id, resolved value.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use grappelli::builder::FormBuilder;
	/// use grappelli::csrf::StaticTokenProvider;
	///
	/// let form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
	/// assert_eq!(
	///     form.input("search", "q", Some("swing")).render(),
	///     r#"<input type="search" name="q" id="id_q" value="swing" />"#
	/// );
	/// ```
	pub fn input(&self, input_type: &str, name: &str, value: Option<&str>) -> Element {
		Element::new("input")
			.attr("type", input_type)
			.attr("name", name)
			.id(self.config.field_id(name))
			.attr_opt("value", self.field_value(name, value))
	}
	/// Text input.
	pub fn text(&self, name: &str, value: Option<&str>) -> Element {
		self.input("text", name, value)
	}
	/// Email input.
	pub fn email(&self, name: &str, value: Option<&str>) -> Element {
		self.input("email", name, value)
	}
	/// Password input. Never echoes a bound or explicit value.
	pub fn password(&self, name: &str) -> Element {
		Element::new("input")
			.attr("type", "password")
			.attr("name", name)
			.id(self.config.field_id(name))
	}
	/// Number input.
	pub fn number(&self, name: &str, value: Option<&str>) -> Element {
		self.input("number", name, value)
	}
	/// Date input.
	pub fn date(&self, name: &str, value: Option<&str>) -> Element {
		self.input("date", name, value)
	}
	/// URL input.
	pub fn url_field(&self, name: &str, value: Option<&str>) -> Element {
		self.input("url", name, value)
	}
	/// Hidden input.
	pub fn hidden(&self, name: &str, value: Option<&str>) -> Element {
		self.input("hidden", name, value)
	}
	/// File input. Carries no value attribute; browsers ignore it.
	pub fn file(&self, name: &str) -> Element {
		Element::new("input")
			.attr("type", "file")
			.attr("name", name)
			.id(self.config.field_id(name))
	}
	/// Textarea with the resolved value as escaped text content.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use grappelli::builder::FormBuilder;
	/// use grappelli::csrf::StaticTokenProvider;
	///
	/// let form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
	/// assert_eq!(
	///     form.textarea("bio", Some("a < b")).render(),
	///     r#"<textarea name="bio" id="id_bio">a &lt; b</textarea>"#
	/// );
	/// ```
	pub fn textarea(&self, name: &str, value: Option<&str>) -> Element {
		let mut el = Element::new("textarea")
			.name(name)
			.id(self.config.field_id(name));
		if let Some(value) = self.field_value(name, value) {
			el = el.text(value);
		}
		el
	}
	/// Select with `(value, label)` choices; the selected value resolves
	/// through the form state like any other field value.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use grappelli::builder::FormBuilder;
	/// use grappelli::csrf::StaticTokenProvider;
	///
	/// let form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
	/// let select = form.select("color", &[("r", "Red"), ("g", "Green")], Some("g"));
	/// assert_eq!(
	///     select.render(),
	///     "<select name=\"color\" id=\"id_color\">\
	///      <option value=\"r\">Red</option>\
	///      <option value=\"g\" selected>Green</option></select>"
	/// );
	/// ```
	pub fn select(&self, name: &str, choices: &[(&str, &str)], selected: Option<&str>) -> Element {
		let current = self.field_value(name, selected);
		let mut el = Element::new("select")
			.name(name)
			.id(self.config.field_id(name));
		for (value, label) in choices {
			let mut option = Element::new("option").value(*value);
			if current.as_deref() == Some(*value) {
				option = option.bool_attr("selected");
			}
			el = el.child(option.text(*label));
		}
		el
	}
	/// Checkbox. When `checked` is not given and a data source is bound,
	/// the box is checked if the bound value equals `value`.
	pub fn checkbox(&self, name: &str, value: &str, checked: Option<bool>) -> Element {
		self.checkable("checkbox", name, value, checked, self.config.field_id(name))
	}
	/// Radio button. The id derives from name and value so radios sharing
	/// a name keep unique ids.
	pub fn radio(&self, name: &str, value: &str, checked: Option<bool>) -> Element {
		let id = self.config.field_id(&format!("{name}_{value}"));
		self.checkable("radio", name, value, checked, id)
	}

	fn checkable(
		&self,
		input_type: &str,
		name: &str,
		value: &str,
		checked: Option<bool>,
		id: String,
	) -> Element {
		let checked = checked.unwrap_or_else(|| {
			self.state
				.as_ref()
				.and_then(|state| state.value(name, None))
				.as_deref()
				== Some(value)
		});
		let mut el = Element::new("input")
			.attr("type", input_type)
			.attr("name", name)
			.id(id)
			.value(value);
		if checked {
			el = el.bool_attr("checked");
		}
		el
	}

	/// Hidden CSRF token field, value sourced from the injected provider.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use grappelli::builder::FormBuilder;
	/// use grappelli::csrf::StaticTokenProvider;
	///
	/// let form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
	/// assert_eq!(
	///     form.token().render(),
	///     r#"<input type="hidden" name="csrf_token" id="id_csrf_token" value="tok" />"#
	/// );
	/// ```
	pub fn token(&self) -> Element {
		Element::new("input")
			.attr("type", "hidden")
			.attr("name", &self.config.token_field)
			.id(self.config.field_id(&self.config.token_field))
			.value(self.csrf.csrf_token())
	}
	/// Submit button.
	pub fn submit(&self, label: &str) -> Element {
		Element::new("button").attr("type", "submit").text(label)
	}
	/// Plain button.
	pub fn button(&self, label: &str) -> Element {
		Element::new("button").attr("type", "button").text(label)
	}
	/// Label pointing at a field's derived id.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use grappelli::builder::FormBuilder;
	/// use grappelli::csrf::StaticTokenProvider;
	///
	/// let form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
	/// assert_eq!(
	///     form.label_for("email", "Email address").render(),
	///     r#"<label for="id_email">Email address</label>"#
	/// );
	/// ```
	pub fn label_for(&self, name: &str, text: &str) -> Element {
		Element::new("label")
			.attr("for", self.config.field_id(name))
			.text(text)
	}
	/// Wrap a control in a [`FormGroup`] using the configured group and
	/// help classes.
	pub fn group(&self, control: Element) -> FormGroup {
		FormGroup::new(control)
			.with_group_class(&self.config.group_class)
			.with_help_class(&self.config.help_class)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::csrf::StaticTokenProvider;
	use rstest::rstest;
	use std::collections::HashMap;

	fn builder() -> FormBuilder {
		FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")))
	}

	#[rstest]
	#[case("put", "PUT")]
	#[case("PATCH", "PATCH")]
	#[case("Delete", "DELETE")]
	fn test_spoofed_methods_go_over_post(#[case] method: &str, #[case] spoofed: &str) {
		let mut form = builder();
		let open = form.open(method, "/posts/1", FormOptions::new()).unwrap();

		assert!(open.starts_with(r#"<form method="POST" action="/posts/1">"#));
		assert!(open.contains(&format!(r#"name="_method" value="{spoofed}""#)));
	}

	#[rstest]
	#[case("GET", false)]
	#[case("POST", true)]
	#[case("PUT", true)]
	#[case("DELETE", true)]
	fn test_csrf_field_on_everything_but_get(#[case] method: &str, #[case] expected: bool) {
		let mut form = builder();
		let open = form.open(method, "/posts", FormOptions::new()).unwrap();

		assert_eq!(open.contains(r#"name="csrf_token""#), expected);
	}

	#[test]
	fn test_get_form_has_no_method_field() {
		let mut form = builder();
		let open = form.open("get", "/search", FormOptions::new()).unwrap();

		assert!(open.starts_with(r#"<form method="GET" action="/search">"#));
		assert!(!open.contains("_method"));
	}

	#[test]
	fn test_double_open_fails_and_keeps_first_form() {
		let mut form = builder();
		let mut submitted = HashMap::new();
		submitted.insert("title".to_string(), "kept".to_string());
		form.open_bound("POST", "/a", FormOptions::new(), Box::new(submitted))
			.unwrap();

		assert_eq!(
			form.open("POST", "/b", FormOptions::new()),
			Err(FormError::AlreadyOpen)
		);
		// First form's bound state is still in effect.
		assert_eq!(form.value("title", None), Some("kept".to_string()));
	}

	#[test]
	fn test_close_clears_state_for_reopen() {
		let mut form = builder();
		form.open("POST", "/a", FormOptions::new()).unwrap();
		assert_eq!(form.close().unwrap(), "</form>");
		assert!(!form.is_open());
		form.open("POST", "/b", FormOptions::new()).unwrap();
	}

	#[test]
	fn test_close_without_open_fails() {
		let mut form = builder();
		assert_eq!(form.close(), Err(FormError::NotOpen));
	}

	#[test]
	fn test_bound_value_used_when_no_explicit_value() {
		let mut form = builder();
		let mut submitted = HashMap::new();
		submitted.insert("name".to_string(), "x".to_string());
		form.open_bound("POST", "/", FormOptions::new(), Box::new(submitted))
			.unwrap();

		let field = form.text("name", None).render();
		assert!(field.contains(r#"value="x""#));
	}

	#[test]
	fn test_explicit_value_wins_over_bound_value() {
		let mut form = builder();
		let mut submitted = HashMap::new();
		submitted.insert("name".to_string(), "bound".to_string());
		form.open_bound("POST", "/", FormOptions::new(), Box::new(submitted))
			.unwrap();

		let field = form.text("name", Some("explicit")).render();
		assert!(field.contains(r#"value="explicit""#));
		assert!(!field.contains("bound"));
	}

	#[test]
	fn test_no_value_attribute_without_state_or_explicit() {
		let form = builder();
		assert_eq!(
			form.text("name", None).render(),
			r#"<input type="text" name="name" id="id_name" />"#
		);
	}

	#[test]
	fn test_field_ids_are_stable() {
		let form = builder();
		let a = form.text("user[email]", None).render();
		let b = form.email("user[email]", None).render();
		assert!(a.contains(r#"id="id_user_email""#));
		assert!(b.contains(r#"id="id_user_email""#));
	}

	#[test]
	fn test_inline_modifier_class() {
		let mut form = builder();
		let open = form
			.open("GET", "/search", FormOptions::new().inline())
			.unwrap();
		assert!(open.contains(r#"class="form-inline""#));
	}

	#[test]
	fn test_multipart_option_sets_enctype() {
		let mut form = builder();
		let open = form
			.open("POST", "/upload", FormOptions::new().multipart())
			.unwrap();
		assert!(open.contains(r#"enctype="multipart/form-data""#));
	}

	#[test]
	fn test_select_marks_bound_choice_selected() {
		let mut form = builder();
		let mut submitted = HashMap::new();
		submitted.insert("color".to_string(), "g".to_string());
		form.open_bound("POST", "/", FormOptions::new(), Box::new(submitted))
			.unwrap();

		let select = form
			.select("color", &[("r", "Red"), ("g", "Green")], None)
			.render();
		assert!(select.contains(r#"<option value="g" selected>Green</option>"#));
		assert!(select.contains(r#"<option value="r">Red</option>"#));
	}

	#[test]
	fn test_checkbox_checked_from_bound_value() {
		let mut form = builder();
		let mut submitted = HashMap::new();
		submitted.insert("subscribe".to_string(), "1".to_string());
		form.open_bound("POST", "/", FormOptions::new(), Box::new(submitted))
			.unwrap();

		let on = form.checkbox("subscribe", "1", None).render();
		let off = form.checkbox("other", "1", None).render();
		assert!(on.contains("checked"));
		assert!(!off.contains("checked"));
	}

	#[test]
	fn test_radio_ids_differ_per_value() {
		let form = builder();
		let a = form.radio("plan", "free", Some(false)).render();
		let b = form.radio("plan", "pro", Some(true)).render();
		assert!(a.contains(r#"id="id_plan_free""#));
		assert!(b.contains(r#"id="id_plan_pro""#));
		assert!(b.contains("checked"));
	}

	#[test]
	fn test_password_never_echoes_bound_value() {
		let mut form = builder();
		let mut submitted = HashMap::new();
		submitted.insert("password".to_string(), "hunter2".to_string());
		form.open_bound("POST", "/", FormOptions::new(), Box::new(submitted))
			.unwrap();

		let field = form.password("password").render();
		assert!(!field.contains("hunter2"));
		assert!(!field.contains("value"));
	}

	#[test]
	fn test_model_bound_form_resolves_attributes() {
		let mut form = builder();
		let model = serde_json::json!({"title": "Nuages", "year": 1940});
		form.open_bound("PUT", "/songs/1", FormOptions::new(), Box::new(model))
			.unwrap();

		assert!(form.text("title", None).render().contains(r#"value="Nuages""#));
		assert!(form.number("year", None).render().contains(r#"value="1940""#));
	}

	#[test]
	fn test_custom_config_field_names() {
		let config = FormConfig::new()
			.with_method_field("__method")
			.with_token_field("_token")
			.with_id_prefix("f-");
		let mut form = builder().with_config(config);

		let open = form.open("DELETE", "/x", FormOptions::new()).unwrap();
		assert!(open.contains(r#"name="__method" value="DELETE""#));
		assert!(open.contains(r#"name="_token""#));
		assert!(form.text("a", None).render().contains(r#"id="f-a""#));
	}
}
