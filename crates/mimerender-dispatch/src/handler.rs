//! Handlers and endpoints
//!
//! A [`Handler`] is the user's request logic: it sees the negotiated
//! context and the positional arguments of the request and returns a
//! payload, optionally with a status line and headers. An [`Endpoint`] is
//! what the host calls: a handler wrapped with negotiation and rendering.

use mimerender_http::{HostAdapter, IntoResponseShape, NegotiationContext};

use crate::error::{HandlerError, Result};

/// Request logic producing a payload for the negotiated representation
pub trait Handler: Send + Sync {
	/// Handler result, normalized into a response shape
	type Output: IntoResponseShape;

	fn handle(
		&self,
		context: &NegotiationContext,
		args: &[String],
	) -> std::result::Result<Self::Output, HandlerError>;
}

/// Handler built from a function, see [`handler_fn`]
#[derive(Clone)]
pub struct HandlerFn<F> {
	f: F,
}

/// Wraps a function into a [`Handler`]
///
/// # Examples
///
/// ```
/// use mimerender_dispatch::{Handler, HandlerError, handler_fn};
/// use mimerender_http::{NegotiationContext, Payload};
///
/// let greet = handler_fn(|context: &NegotiationContext, args: &[String]| {
///     let message = format!("Hello, {}! ({})", args[0], context.format);
///     Ok::<_, HandlerError>(Payload::new().with("message", message))
/// });
///
/// let context = NegotiationContext::new("text/plain", "txt", "text/plain");
/// let payload = greet.handle(&context, &["world".to_string()]).unwrap();
/// assert_eq!(payload.get_str("message"), Some("Hello, world! (txt)"));
/// ```
pub fn handler_fn<F, O>(f: F) -> HandlerFn<F>
where
	F: Fn(&NegotiationContext, &[String]) -> std::result::Result<O, HandlerError> + Send + Sync,
	O: IntoResponseShape,
{
	HandlerFn { f }
}

impl<F, O> Handler for HandlerFn<F>
where
	F: Fn(&NegotiationContext, &[String]) -> std::result::Result<O, HandlerError> + Send + Sync,
	O: IntoResponseShape,
{
	type Output = O;

	fn handle(
		&self,
		context: &NegotiationContext,
		args: &[String],
	) -> std::result::Result<O, HandlerError> {
		(self.f)(context, args)
	}
}

/// A fully wrapped handler, callable by a host adapter
pub trait Endpoint<A: HostAdapter> {
	/// Handles one request
	///
	/// `args` are the positional arguments the host extracted for the
	/// request, such as path captures.
	fn call(&self, adapter: &A, args: &[String]) -> Result<A::Response>;
}
