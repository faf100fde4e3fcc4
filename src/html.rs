//! Minimal HTML element layer
//!
//! Provides [`Element`], a chainable builder that serializes to markup text.
//! Attribute values and text children are escaped through the `html-escape`
//! crate; attribute order is insertion order, so output is deterministic.

/// Tags that never carry children and self-close on render.
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// A child node of an [`Element`].
#[derive(Debug, Clone)]
enum Node {
	/// Text content, escaped on render.
	Text(String),
	/// Pre-rendered markup, emitted verbatim.
	Raw(String),
	/// A nested element.
	Element(Element),
}

/// Chainable HTML element builder.
///
/// Every setter consumes and returns the element, so attributes can be
/// stacked fluently before the final [`render`](Element::render) call.
///
/// # Examples
///
/// ```
/// use grappelli::html::Element;
///
/// let input = Element::new("input")
///     .attr("type", "text")
///     .attr("name", "username")
///     .attr("value", "django");
/// assert_eq!(
///     input.render(),
///     r#"<input type="text" name="username" value="django" />"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Element {
	tag: String,
	attrs: Vec<(String, String)>,
	bool_attrs: Vec<String>,
	children: Vec<Node>,
	void: bool,
}

impl Element {
	/// Create a new element for the given tag.
	///
	/// Void tags (`input`, `br`, ...) are detected here and render
	/// self-closed.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::html::Element;
	///
	/// assert_eq!(Element::new("br").render(), "<br />");
	/// assert_eq!(Element::new("div").render(), "<div></div>");
	/// ```
	pub fn new(tag: impl Into<String>) -> Self {
		let tag = tag.into();
		let void = VOID_TAGS.contains(&tag.as_str());
		Self {
			tag,
			attrs: vec![],
			bool_attrs: vec![],
			children: vec![],
			void,
		}
	}
	/// Set an attribute, replacing any previous value for the same name.
	///
	/// Replacement keeps the attribute's original position so re-setting
	/// a value never reorders the output.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::html::Element;
	///
	/// let el = Element::new("input").attr("name", "a").attr("name", "b");
	/// assert_eq!(el.render(), r#"<input name="b" />"#);
	/// ```
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let name = name.into();
		let value = value.into();
		if let Some(existing) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
			existing.1 = value;
		} else {
			self.attrs.push((name, value));
		}
		self
	}
	/// Set an attribute only when a value is present.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::html::Element;
	///
	/// let el = Element::new("input")
	///     .attr_opt("value", Some("x"))
	///     .attr_opt("placeholder", None::<String>);
	/// assert_eq!(el.render(), r#"<input value="x" />"#);
	/// ```
	pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
		match value {
			Some(value) => self.attr(name, value),
			None => self,
		}
	}
	/// Append a CSS class; classes accumulate into one space-joined
	/// `class` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::html::Element;
	///
	/// let el = Element::new("div").class("card").class("card-wide");
	/// assert_eq!(el.render(), r#"<div class="card card-wide"></div>"#);
	/// ```
	pub fn class(mut self, class: impl Into<String>) -> Self {
		let class = class.into();
		if let Some(existing) = self.attrs.iter_mut().find(|(n, _)| n == "class") {
			existing.1.push(' ');
			existing.1.push_str(&class);
			self
		} else {
			self.attr("class", class)
		}
	}
	/// Set the `id` attribute.
	pub fn id(self, id: impl Into<String>) -> Self {
		self.attr("id", id)
	}
	/// Set the `name` attribute.
	pub fn name(self, name: impl Into<String>) -> Self {
		self.attr("name", name)
	}
	/// Set the `value` attribute.
	pub fn value(self, value: impl Into<String>) -> Self {
		self.attr("value", value)
	}
	/// Add a boolean attribute such as `selected` or `checked`.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::html::Element;
	///
	/// let el = Element::new("option").value("a").bool_attr("selected");
	/// assert_eq!(el.render(), r#"<option value="a" selected></option>"#);
	/// ```
	pub fn bool_attr(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		if !self.bool_attrs.contains(&name) {
			self.bool_attrs.push(name);
		}
		self
	}
	/// Append an escaped text child.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::html::Element;
	///
	/// let el = Element::new("textarea").text("a < b");
	/// assert_eq!(el.render(), "<textarea>a &lt; b</textarea>");
	/// ```
	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.children.push(Node::Text(text.into()));
		self
	}
	/// Append pre-rendered markup as a child, verbatim.
	pub fn raw(mut self, markup: impl Into<String>) -> Self {
		self.children.push(Node::Raw(markup.into()));
		self
	}
	/// Append a nested element.
	pub fn child(mut self, child: Element) -> Self {
		self.children.push(Node::Element(child));
		self
	}
	/// Look up a previously set attribute value.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}
	/// Render only the start tag, for elements whose children are
	/// emitted separately (the `<form>` open/close split).
	///
	/// # Examples
	///
	/// ```
	/// use grappelli::html::Element;
	///
	/// let form = Element::new("form").attr("method", "POST");
	/// assert_eq!(form.render_open(), r#"<form method="POST">"#);
	/// ```
	pub fn render_open(&self) -> String {
		let mut html = format!("<{}", self.tag);
		self.render_attrs(&mut html);
		html.push('>');
		html
	}
	/// Serialize the element to markup text.
	pub fn render(&self) -> String {
		let mut html = format!("<{}", self.tag);
		self.render_attrs(&mut html);
		if self.void {
			html.push_str(" />");
			return html;
		}
		html.push('>');
		for child in &self.children {
			match child {
				Node::Text(text) => html.push_str(&html_escape::encode_text(text)),
				Node::Raw(markup) => html.push_str(markup),
				Node::Element(el) => html.push_str(&el.render()),
			}
		}
		html.push_str(&format!("</{}>", self.tag));
		html
	}

	fn render_attrs(&self, html: &mut String) {
		for (name, value) in &self.attrs {
			html.push_str(&format!(
				r#" {}="{}""#,
				name,
				html_escape::encode_double_quoted_attribute(value)
			));
		}
		for name in &self.bool_attrs {
			html.push(' ');
			html.push_str(name);
		}
	}
}
