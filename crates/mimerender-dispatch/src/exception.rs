//! Mapping handler errors to represented responses
//!
//! An [`ExceptionMapping`] is an ordered list of `(kind, status line)`
//! rules. [`MapExceptions`] calls an inner endpoint and, when it fails with
//! a handler error matching a rule, negotiates afresh and renders the error
//! payload with the rule's status line. The first matching rule wins, so
//! specific kinds go before the general kinds they derive from.
//!
//! # Examples
//!
//! ```
//! use mimerender_adapters::MemoryAdapter;
//! use mimerender_dispatch::{Endpoint, ErrorKind, ExceptionMapping, HandlerError, Represent};
//! use mimerender_http::{NegotiationContext, Payload};
//!
//! static NOT_FOUND: ErrorKind = ErrorKind::root("NotFound");
//!
//! let inner = Represent::builder()
//!     .renderer("json", |p: &Payload| serde_json::to_string(p))
//!     .build()
//!     .unwrap()
//!     .wrap_fn(|_: &NegotiationContext, _: &[String]| {
//!         Err::<Payload, _>(HandlerError::new(&NOT_FOUND, "no such item"))
//!     });
//!
//! let endpoint = Represent::builder()
//!     .renderer("json", |p: &Payload| serde_json::to_string(p))
//!     .build()
//!     .unwrap()
//!     .map_exceptions(ExceptionMapping::new().map(&NOT_FOUND, "404 Not Found"), inner);
//!
//! let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();
//! assert_eq!(response.status.as_str(), "404 Not Found");
//! assert_eq!(
//!     response.body_str(),
//!     Some(r#"{"exception":{"args":[],"kind":"NotFound","message":"no such item"}}"#)
//! );
//! ```

use mimerender_http::{HostAdapter, ResponseShape, StatusLine};

use crate::error::{DispatchError, ErrorKind, HandlerError, Result};
use crate::handler::{Endpoint, handler_fn};
use crate::represent::Represent;

/// Ordered `(kind, status line)` rules
#[derive(Debug, Clone, Default)]
pub struct ExceptionMapping {
	rules: Vec<(&'static ErrorKind, StatusLine)>,
}

impl ExceptionMapping {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a rule
	pub fn map(mut self, kind: &'static ErrorKind, status: impl Into<StatusLine>) -> Self {
		self.rules.push((kind, status.into()));
		self
	}

	/// Returns the status line of the first rule matching the error
	pub fn status_for(&self, error: &HandlerError) -> Option<&StatusLine> {
		self.rules
			.iter()
			.find(|(kind, _)| error.is_a(kind))
			.map(|(_, status)| status)
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}

/// An endpoint whose matching handler errors are rendered, see
/// [`Represent::map_exceptions`]
pub struct MapExceptions<E> {
	mapping: ExceptionMapping,
	represent: Represent,
	inner: E,
}

impl<E> MapExceptions<E> {
	pub fn new(mapping: ExceptionMapping, represent: Represent, inner: E) -> Self {
		Self {
			mapping,
			represent,
			inner,
		}
	}

	pub fn mapping(&self) -> &ExceptionMapping {
		&self.mapping
	}

	pub fn inner(&self) -> &E {
		&self.inner
	}
}

impl<A, E> Endpoint<A> for MapExceptions<E>
where
	A: HostAdapter,
	E: Endpoint<A>,
{
	fn call(&self, adapter: &A, args: &[String]) -> Result<A::Response> {
		let error = match self.inner.call(adapter, args) {
			Err(DispatchError::Handler(error)) => error,
			other => return other,
		};

		let Some(status) = self.mapping.status_for(&error) else {
			return Err(DispatchError::Handler(error));
		};
		tracing::debug!(
			kind = %error.kind(),
			status = %status,
			"representing mapped handler error"
		);

		let shape = ResponseShape::new(error.to_payload()).with_status(status.clone());
		let represent_error = handler_fn(move |_, _| Ok::<_, HandlerError>(shape.clone()));
		self.represent.respond(adapter, &represent_error, args)
	}
}
