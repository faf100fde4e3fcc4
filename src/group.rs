//! Form groups
//!
//! A [`FormGroup`] wraps one control element with an optional label and
//! optional help text and renders the three as a single unit. Pure
//! composition, no state beyond the render pass.

use crate::html::Element;

/// One control plus its optional label and help text.
///
/// # Examples
///
/// ```
/// use grappelli::group::FormGroup;
/// use grappelli::html::Element;
///
/// let control = Element::new("input")
///     .attr("type", "email")
///     .attr("name", "email")
///     .id("id_email");
/// let group = FormGroup::new(control)
///     .with_label("Email address")
///     .with_help_text("We never share it.");
///
/// assert_eq!(
///     group.render(),
///     "<div class=\"form-group\">\
///      <label for=\"id_email\">Email address</label>\
///      <input type=\"email\" name=\"email\" id=\"id_email\" />\
///      <small class=\"form-text\">We never share it.</small></div>"
/// );
/// ```
pub struct FormGroup {
	control: Element,
	label: Option<String>,
	help_text: Option<String>,
	group_class: String,
	help_class: String,
}

impl FormGroup {
	/// Wrap a control with the default classes.
	pub fn new(control: Element) -> Self {
		Self {
			control,
			label: None,
			help_text: None,
			group_class: "form-group".into(),
			help_class: "form-text".into(),
		}
	}
	/// Attach a label. Its `for` attribute targets the control's id,
	/// when the control has one.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
	/// Attach help text below the control.
	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}
	/// Override the wrapper class.
	pub fn with_group_class(mut self, class: impl Into<String>) -> Self {
		self.group_class = class.into();
		self
	}
	/// Override the help text class.
	pub fn with_help_class(mut self, class: impl Into<String>) -> Self {
		self.help_class = class.into();
		self
	}
	/// Render the group as one `<div>` unit.
	pub fn render(&self) -> String {
		let mut wrapper = Element::new("div").class(&self.group_class);
		if let Some(label) = &self.label {
			let mut el = Element::new("label");
			if let Some(id) = self.control.get_attr("id") {
				el = el.attr("for", id);
			}
			wrapper = wrapper.child(el.text(label));
		}
		wrapper = wrapper.child(self.control.clone());
		if let Some(help_text) = &self.help_text {
			wrapper = wrapper.child(
				Element::new("small")
					.class(&self.help_class)
					.text(help_text),
			);
		}
		wrapper.render()
	}
}
