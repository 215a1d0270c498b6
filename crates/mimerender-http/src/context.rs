//! Request-scoped negotiation context
//!
//! The outcome of negotiation is handed to the handler as a
//! [`NegotiationContext`] and mirrored into the host's context variables
//! for code that only has access to the host request. [`ContextScope`]
//! owns the lifetime of those variables: they are set when the scope is
//! entered and cleared when it drops, whichever way the request ends.

use crate::adapter::HostAdapter;

/// Context variable holding the negotiated media type
pub const CONTEXT_MEDIA_TYPE: &str = "mimerender.media_type";
/// Context variable holding the negotiated short format name
pub const CONTEXT_FORMAT: &str = "mimerender.format";
/// Context variable holding the final `Content-Type` value
pub const CONTEXT_CONTENT_TYPE: &str = "mimerender.content_type";

/// Negotiated representation of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationContext {
	/// Media type chosen by negotiation
	pub media_type: String,
	/// Short format name owning the media type
	pub format: String,
	/// `Content-Type` value, charset included
	pub content_type: String,
}

impl NegotiationContext {
	pub fn new(
		media_type: impl Into<String>,
		format: impl Into<String>,
		content_type: impl Into<String>,
	) -> Self {
		Self {
			media_type: media_type.into(),
			format: format.into(),
			content_type: content_type.into(),
		}
	}
}

/// Guard that keeps the context variables set while it lives
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::collections::HashMap;
///
/// use bytes::Bytes;
/// use mimerender_http::{ContextScope, HeaderList, HostAdapter, NegotiationContext, StatusLine};
/// use mimerender_http::context::CONTEXT_FORMAT;
///
/// #[derive(Default)]
/// struct Vars(RefCell<HashMap<String, String>>);
///
/// impl HostAdapter for Vars {
///     type Response = ();
///     fn request_parameter(&self, _: &str) -> Option<String> { None }
///     fn accept_header(&self) -> Option<String> { None }
///     fn set_context_var(&self, name: &str, value: &str) {
///         self.0.borrow_mut().insert(name.into(), value.into());
///     }
///     fn clear_context_var(&self, name: &str) {
///         self.0.borrow_mut().remove(name);
///     }
///     fn make_response(&self, _: Bytes, _: HeaderList, _: StatusLine) {}
/// }
///
/// let vars = Vars::default();
/// let context = NegotiationContext::new("application/json", "json", "application/json");
/// {
///     let _scope = ContextScope::enter(&vars, &context);
///     assert_eq!(vars.0.borrow()[CONTEXT_FORMAT], "json");
/// }
/// assert!(vars.0.borrow().is_empty());
/// ```
#[must_use = "context variables are cleared as soon as the scope is dropped"]
pub struct ContextScope<'a, A: HostAdapter + ?Sized> {
	adapter: &'a A,
}

impl<'a, A: HostAdapter + ?Sized> ContextScope<'a, A> {
	/// Sets the context variables and returns the guard clearing them
	pub fn enter(adapter: &'a A, context: &NegotiationContext) -> Self {
		adapter.set_context_var(CONTEXT_MEDIA_TYPE, &context.media_type);
		adapter.set_context_var(CONTEXT_FORMAT, &context.format);
		adapter.set_context_var(CONTEXT_CONTENT_TYPE, &context.content_type);
		Self { adapter }
	}
}

impl<A: HostAdapter + ?Sized> Drop for ContextScope<'_, A> {
	fn drop(&mut self) {
		self.adapter.clear_context_var(CONTEXT_MEDIA_TYPE);
		self.adapter.clear_context_var(CONTEXT_FORMAT);
		self.adapter.clear_context_var(CONTEXT_CONTENT_TYPE);
	}
}
