//! Representation of handler results
//!
//! [`Represent`] is the per-endpoint configuration: the renderers bound to
//! each format plus the override and charset options. It drives one request
//! through the whole pipeline:
//!
//! ```text
//! override/Accept → negotiate → set context → handler → normalize
//!                                                        ↓
//!                    host response ← fix headers ← render
//! ```
//!
//! A malformed Accept header is answered with `400 Bad Request` and an
//! unacceptable one, when a not-acceptable callback is configured, with
//! `406 Not Acceptable`; the handler is not called in either case.
//!
//! # Examples
//!
//! ```
//! use mimerender_adapters::MemoryAdapter;
//! use mimerender_dispatch::{Endpoint, HandlerError, Represent};
//! use mimerender_http::{NegotiationContext, Payload};
//!
//! let endpoint = Represent::builder()
//!     .renderer("xml", |p: &Payload| format!("<xml>{}</xml>", p.get_str("x").unwrap_or_default()))
//!     .renderer("json", |p: &Payload| serde_json::to_string(p))
//!     .default_format("json")
//!     .build()
//!     .unwrap()
//!     .wrap_fn(|_: &NegotiationContext, _: &[String]| {
//!         Ok::<_, HandlerError>(Payload::new().with("x", "test"))
//!     });
//!
//! let adapter = MemoryAdapter::new().with_accept("application/xml");
//! let response = endpoint.call(&adapter, &[]).unwrap();
//! assert_eq!(response.status.as_str(), "200 OK");
//! assert_eq!(response.header("Content-Type"), Some("application/xml"));
//! assert_eq!(response.header("Vary"), Some("Accept"));
//! assert_eq!(response.body_str(), Some("<xml>test</xml>"));
//! ```

use std::fmt;
use std::sync::Arc;

use mimerender_http::headers::{CONTENT_TYPE, content_type_value, fixup_headers};
use mimerender_http::{
	ContextScope, HeaderList, HostAdapter, IntoBody, IntoResponseShape, NegotiationContext, Payload,
	Renderer, StatusLine, renderer,
};
use mimerender_negotiation::{
	FormatRegistry, Negotiation, NegotiationError, NegotiatorBuilder, Negotiator,
	NotAcceptableCallback,
};

use crate::error::{HandlerError, Result};
use crate::exception::{ExceptionMapping, MapExceptions};
use crate::handler::{Endpoint, Handler, HandlerFn, handler_fn};

/// Body of the `400 Bad Request` answer to a malformed Accept header
pub const BAD_ACCEPT_BODY: &str = "Invalid Accept header requested";

const BAD_ACCEPT_MEDIA_TYPE: &str = "text/plain";

/// Builder for [`Represent`]
#[derive(Default)]
pub struct RepresentBuilder {
	negotiator: NegotiatorBuilder<Renderer>,
	override_arg: Option<isize>,
	override_param: Option<String>,
	charset: Option<String>,
}

impl RepresentBuilder {
	/// Creates a builder without any option set
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds a renderer to a format
	///
	/// Binding a format again replaces its renderer.
	pub fn renderer<F, B>(self, format: impl Into<String>, f: F) -> Self
	where
		F: Fn(&Payload) -> B + Send + Sync + 'static,
		B: IntoBody,
	{
		self.shared_renderer(format, renderer(f))
	}

	/// Binds an already shared renderer to a format
	pub fn shared_renderer(mut self, format: impl Into<String>, renderer: Renderer) -> Self {
		self.negotiator = self.negotiator.bind(format, renderer);
		self
	}

	/// Sets the format used when nothing else decides
	pub fn default_format(mut self, format: impl Into<String>) -> Self {
		self.negotiator = self.negotiator.default_format(format);
		self
	}

	/// Reads the override from the positional argument at `index`
	///
	/// Negative indices count from the end.
	pub fn override_arg(mut self, index: isize) -> Self {
		self.override_arg = Some(index);
		self
	}

	/// Reads the override from the request parameter `name`
	pub fn override_param(mut self, name: impl Into<String>) -> Self {
		self.override_param = Some(name.into());
		self
	}

	/// Appends `; charset=<charset>` to the negotiated `Content-Type`
	pub fn charset(mut self, charset: impl Into<String>) -> Self {
		self.charset = Some(charset.into());
		self
	}

	/// Answers unacceptable requests with `406` and the callback's body
	pub fn not_acceptable<F>(mut self, callback: F) -> Self
	where
		F: Fn(&str, &[String]) -> (String, String) + Send + Sync + 'static,
	{
		self.negotiator = self.negotiator.not_acceptable(callback);
		self
	}

	pub(crate) fn not_acceptable_callback(
		mut self,
		callback: Option<NotAcceptableCallback>,
	) -> Self {
		self.negotiator = self.negotiator.not_acceptable_callback(callback);
		self
	}

	/// Builds against the process-wide format registry
	pub fn build(self) -> std::result::Result<Represent, NegotiationError> {
		Ok(Represent {
			negotiator: self.negotiator.build()?,
			override_arg: self.override_arg,
			override_param: self.override_param,
			charset: self.charset,
		})
	}

	/// Builds against an explicit format registry
	pub fn build_with(
		self,
		registry: &FormatRegistry,
	) -> std::result::Result<Represent, NegotiationError> {
		Ok(Represent {
			negotiator: self.negotiator.build_with(registry)?,
			override_arg: self.override_arg,
			override_param: self.override_param,
			charset: self.charset,
		})
	}
}

/// Negotiation and rendering configuration of one endpoint
pub struct Represent {
	negotiator: Negotiator<Renderer>,
	override_arg: Option<isize>,
	override_param: Option<String>,
	charset: Option<String>,
}

impl Represent {
	pub fn builder() -> RepresentBuilder {
		RepresentBuilder::new()
	}

	/// Underlying negotiator
	pub fn negotiator(&self) -> &Negotiator<Renderer> {
		&self.negotiator
	}

	/// Wraps a handler into an endpoint
	pub fn wrap<H: Handler>(self, handler: H) -> Represented<H> {
		Represented {
			represent: self,
			handler,
		}
	}

	/// Wraps a handler function into an endpoint
	pub fn wrap_fn<F, O>(self, f: F) -> Represented<HandlerFn<F>>
	where
		F: Fn(&NegotiationContext, &[String]) -> std::result::Result<O, HandlerError> + Send + Sync,
		O: IntoResponseShape,
	{
		self.wrap(handler_fn(f))
	}

	/// Wraps an endpoint so that matching handler errors are represented
	/// with this configuration instead of being returned
	pub fn map_exceptions<E>(self, mapping: ExceptionMapping, inner: E) -> MapExceptions<E> {
		MapExceptions::new(mapping, self, inner)
	}

	/// Runs one request through negotiation, the handler and rendering
	pub fn respond<A, H>(&self, adapter: &A, handler: &H, args: &[String]) -> Result<A::Response>
	where
		A: HostAdapter + ?Sized,
		H: Handler + ?Sized,
	{
		let override_format = self.override_format(adapter, args);
		let accept = adapter.accept_header();

		let selection = match self
			.negotiator
			.negotiate(override_format.as_deref(), accept.as_deref())
		{
			Ok(Negotiation::Selected(selection)) => selection,
			Ok(Negotiation::NotAcceptable(not_acceptable)) => {
				return Ok(early_response(
					adapter,
					StatusLine::NOT_ACCEPTABLE,
					&not_acceptable.media_type,
					not_acceptable.body,
				));
			}
			Err(NegotiationError::BadAcceptHeader(_)) => {
				return Ok(early_response(
					adapter,
					StatusLine::BAD_REQUEST,
					BAD_ACCEPT_MEDIA_TYPE,
					BAD_ACCEPT_BODY.to_string(),
				));
			}
			Err(error) => return Err(error.into()),
		};

		let context = NegotiationContext::new(
			selection.media_type,
			selection.format,
			content_type_value(selection.media_type, self.charset.as_deref()),
		);
		let _scope = ContextScope::enter(adapter, &context);

		let shape = handler.handle(&context, args)?.into_response_shape()?;
		let body = (selection.renderer)(&shape.payload)?;

		let mut headers = shape.headers;
		fixup_headers(&mut headers, &context.content_type);
		Ok(adapter.make_response(body, headers, shape.status))
	}

	fn override_format<A: HostAdapter + ?Sized>(
		&self,
		adapter: &A,
		args: &[String],
	) -> Option<String> {
		let from_arg = self
			.override_arg
			.and_then(|index| resolve_index(index, args.len()))
			.and_then(|index| args.get(index))
			.filter(|value| !value.is_empty())
			.cloned();
		if from_arg.is_some() {
			return from_arg;
		}

		self.override_param
			.as_deref()
			.and_then(|name| adapter.request_parameter(name))
			.filter(|value| !value.is_empty())
	}
}

impl fmt::Debug for Represent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Represent")
			.field("negotiator", &self.negotiator)
			.field("override_arg", &self.override_arg)
			.field("override_param", &self.override_param)
			.field("charset", &self.charset)
			.finish()
	}
}

fn resolve_index(index: isize, len: usize) -> Option<usize> {
	if index < 0 {
		len.checked_sub(index.unsigned_abs())
	} else {
		usize::try_from(index).ok().filter(|&i| i < len)
	}
}

fn early_response<A: HostAdapter + ?Sized>(
	adapter: &A,
	status: StatusLine,
	media_type: &str,
	body: String,
) -> A::Response {
	let mut headers = HeaderList::new();
	headers.push((CONTENT_TYPE.to_string(), media_type.to_string()));
	fixup_headers(&mut headers, media_type);
	tracing::debug!(
		status = %status,
		media_type = %media_type,
		"answering without calling the handler"
	);
	adapter.make_response(body.into(), headers, status)
}

/// A handler wrapped with its [`Represent`] configuration
pub struct Represented<H> {
	represent: Represent,
	handler: H,
}

impl<H> Represented<H> {
	pub fn represent(&self) -> &Represent {
		&self.represent
	}

	pub fn handler(&self) -> &H {
		&self.handler
	}
}

impl<A, H> Endpoint<A> for Represented<H>
where
	A: HostAdapter,
	H: Handler,
{
	fn call(&self, adapter: &A, args: &[String]) -> Result<A::Response> {
		self.represent.respond(adapter, &self.handler, args)
	}
}

impl<A, E> Endpoint<A> for Arc<E>
where
	A: HostAdapter,
	E: Endpoint<A> + ?Sized,
{
	fn call(&self, adapter: &A, args: &[String]) -> Result<A::Response> {
		(**self).call(adapter, args)
	}
}
