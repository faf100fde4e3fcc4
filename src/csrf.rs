//! CSRF token sourcing
//!
//! The form builder never generates anti-forgery tokens itself; it asks an
//! injected [`CsrfTokenProvider`]. Two implementations are provided: one
//! wrapping a token the session layer already produced, and one deriving a
//! stable per-session token from a server secret.

use sha2::{Digest, Sha256};

/// Capability to produce the CSRF token for the current session.
pub trait CsrfTokenProvider: Send + Sync {
	/// The token to embed in the form's hidden CSRF field.
	fn csrf_token(&self) -> String;
}

/// Provider wrapping a token already fetched from the session.
///
/// # Examples
///
/// ```
/// use grappelli::csrf::{CsrfTokenProvider, StaticTokenProvider};
///
/// let provider = StaticTokenProvider::new("tok-123");
/// assert_eq!(provider.csrf_token(), "tok-123");
/// ```
pub struct StaticTokenProvider {
	token: String,
}

impl StaticTokenProvider {
	/// Wrap a pre-fetched session token.
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			token: token.into(),
		}
	}
}

impl CsrfTokenProvider for StaticTokenProvider {
	fn csrf_token(&self) -> String {
		self.token.clone()
	}
}

/// Provider deriving the token from a server secret and a session id.
///
/// The token is hex SHA-256 over `secret || session_id`, so it is stable
/// for a session and differs across sessions. Validation against the
/// session on submit belongs to the host application, not this crate.
///
/// # Examples
///
/// ```
/// use grappelli::csrf::{CsrfTokenProvider, SessionTokenProvider};
///
/// let provider = SessionTokenProvider::new("secret", "sess-1");
/// let token = provider.csrf_token();
/// assert_eq!(token.len(), 64);
/// assert_eq!(token, provider.csrf_token());
/// ```
pub struct SessionTokenProvider {
	secret: String,
	session_id: String,
}

impl SessionTokenProvider {
	/// Create a provider for one session.
	pub fn new(secret: impl Into<String>, session_id: impl Into<String>) -> Self {
		Self {
			secret: secret.into(),
			session_id: session_id.into(),
		}
	}
}

impl CsrfTokenProvider for SessionTokenProvider {
	fn csrf_token(&self) -> String {
		let mut hasher = Sha256::new();
		hasher.update(self.secret.as_bytes());
		hasher.update(self.session_id.as_bytes());
		hasher
			.finalize()
			.iter()
			.map(|byte| format!("{byte:02x}"))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_static_provider_returns_wrapped_token() {
		let provider = StaticTokenProvider::new("abc");
		assert_eq!(provider.csrf_token(), "abc");
	}

	#[test]
	fn test_session_token_is_stable_per_session() {
		let provider = SessionTokenProvider::new("secret", "sess-1");
		assert_eq!(provider.csrf_token(), provider.csrf_token());
	}

	#[test]
	fn test_session_token_differs_across_sessions() {
		let a = SessionTokenProvider::new("secret", "sess-1");
		let b = SessionTokenProvider::new("secret", "sess-2");
		assert_ne!(a.csrf_token(), b.csrf_token());
	}

	#[test]
	fn test_session_token_is_lowercase_hex() {
		let token = SessionTokenProvider::new("s", "id").csrf_token();
		assert_eq!(token.len(), 64);
		assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
	}
}
