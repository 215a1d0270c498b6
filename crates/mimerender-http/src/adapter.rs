//! Host adapter contract
//!
//! The dispatch layer never talks to a web framework directly. Everything
//! it needs from the host (request inputs, a place for per-request context
//! values and a way to build the final response) goes through
//! [`HostAdapter`].

use bytes::Bytes;

use crate::headers::HeaderList;
use crate::status::StatusLine;

/// Capabilities a host framework provides for one request
///
/// Context variable methods take `&self`; implementations keep the
/// per-request store behind interior mutability.
pub trait HostAdapter {
	/// Response type of the host framework
	type Response;

	/// Returns the request parameter (query or form input) named `name`
	fn request_parameter(&self, name: &str) -> Option<String>;

	/// Returns the raw `Accept` header, if the client sent one
	fn accept_header(&self) -> Option<String>;

	/// Stores a per-request context value
	fn set_context_var(&self, name: &str, value: &str);

	/// Removes a per-request context value
	fn clear_context_var(&self, name: &str);

	/// Builds the host response from a rendered body
	fn make_response(
		&self,
		body: Bytes,
		headers: HeaderList,
		status: StatusLine,
	) -> Self::Response;
}

impl<A: HostAdapter + ?Sized> HostAdapter for &A {
	type Response = A::Response;

	fn request_parameter(&self, name: &str) -> Option<String> {
		(**self).request_parameter(name)
	}

	fn accept_header(&self) -> Option<String> {
		(**self).accept_header()
	}

	fn set_context_var(&self, name: &str, value: &str) {
		(**self).set_context_var(name, value)
	}

	fn clear_context_var(&self, name: &str) {
		(**self).clear_context_var(name)
	}

	fn make_response(
		&self,
		body: Bytes,
		headers: HeaderList,
		status: StatusLine,
	) -> Self::Response {
		(**self).make_response(body, headers, status)
	}
}
