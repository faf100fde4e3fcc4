//! Form markup helpers
//!
//! This crate generates HTML form markup bound to request, session, and
//! model state:
//! - One-call form open/close with method spoofing over POST and automatic
//!   CSRF token fields
//! - Field builders (input, textarea, select, hidden, token, ...) that
//!   resolve display values through the form's bound data source
//! - Form groups composing a control with a label and help text
//!
//! State binding, token production, and escaping are delegated: the data
//! source and CSRF provider are constructor-injected, escaping goes
//! through `html-escape`.
//!
//! ```
//! use std::sync::Arc;
//! use grappelli::{FormBuilder, FormOptions, StaticTokenProvider};
//!
//! let mut form = FormBuilder::new(Arc::new(StaticTokenProvider::new("tok")));
//! let mut html = form.open("PUT", "/songs/1", FormOptions::new()).unwrap();
//! html.push_str(
//!     &form
//!         .group(form.text("title", None))
//!         .with_label("Title")
//!         .render(),
//! );
//! html.push_str(&form.submit("Save").render());
//! html.push_str(&form.close().unwrap());
//!
//! assert!(html.contains(r#"name="_method" value="PUT""#));
//! assert!(html.ends_with("</form>"));
//! ```

pub mod builder;
pub mod config;
pub mod csrf;
pub mod error;
pub mod group;
pub mod html;
pub mod state;

pub use builder::{FormBuilder, FormOptions};
pub use config::FormConfig;
pub use csrf::{CsrfTokenProvider, SessionTokenProvider, StaticTokenProvider};
pub use error::{FormError, FormResult};
pub use group::FormGroup;
pub use html::Element;
pub use state::{FormState, ValueSource};
