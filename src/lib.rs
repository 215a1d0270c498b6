//! # mimerender
//!
//! RESTful resource variant selection: pick the representation of a
//! handler's result from the client's `Accept` header (or an explicit
//! override), render it and answer with the right `Content-Type` and
//! `Vary: Accept`.
//!
//! ## Core Principles
//!
//! - **Handlers return data, renderers return bodies**: a handler produces a
//!   [`Payload`], one renderer per format turns it into bytes
//! - **Explicit host boundary**: everything framework specific goes through
//!   [`HostAdapter`]
//! - **Configuration errors surface early**: unknown formats and missing
//!   renderers fail when an endpoint is built, not when it is called
//!
//! ## Feature Flags
//!
//! - `adapters` (default) - [`MemoryAdapter`] and [`HttpAdapter`]
//!
//! ## Crates
//!
//! - [`negotiation`]: format registry, Accept matching, negotiator
//! - [`http`]: payload, status line, response shapes, header fixup, adapter contract
//! - [`dispatch`]: endpoint wrapping, exception mapping, process-wide defaults
//! - [`adapters`]: host adapters
//!
//! ## Quick Example
//!
//! ```rust
//! use mimerender::prelude::*;
//!
//! static NOT_FOUND: ErrorKind = ErrorKind::root("NotFound");
//!
//! let mimerender = MimeRender::new().with_default_format(formats::JSON);
//!
//! let greet = mimerender
//!     .represent()
//!     .renderer(formats::JSON, |p: &Payload| serde_json::to_string(p))
//!     .renderer(formats::TXT, |p: &Payload| p.get_str("message").unwrap_or_default().to_string())
//!     .build()
//!     .unwrap()
//!     .wrap_fn(|_: &NegotiationContext, args: &[String]| match args.first() {
//!         Some(name) => Ok(Payload::new().with("message", format!("Hello, {}!", name))),
//!         None => Err(HandlerError::new(&NOT_FOUND, "nobody to greet")),
//!     });
//!
//! let endpoint = mimerender.represent()
//!     .renderer(formats::JSON, |p: &Payload| serde_json::to_string(p))
//!     .renderer(formats::TXT, |p: &Payload| {
//!         p.get("exception").map(|e| e["message"].to_string()).unwrap_or_default()
//!     })
//!     .build()
//!     .unwrap()
//!     .map_exceptions(ExceptionMapping::new().map(&NOT_FOUND, "404 Not Found"), greet);
//!
//! let adapter = MemoryAdapter::new().with_accept("text/plain");
//! let response = endpoint.call(&adapter, &["world".to_string()]).unwrap();
//! assert_eq!(response.body_str(), Some("Hello, world!"));
//!
//! let missing = endpoint.call(&adapter, &[]).unwrap();
//! assert_eq!(missing.status.as_str(), "404 Not Found");
//! assert_eq!(missing.header("Content-Type"), Some("text/plain"));
//! ```

pub use mimerender_dispatch as dispatch;
pub use mimerender_http as http;
pub use mimerender_negotiation as negotiation;

#[cfg(feature = "adapters")]
pub use mimerender_adapters as adapters;

pub use mimerender_dispatch::{
	DispatchError, Endpoint, ErrorKind, ExceptionMapping, Handler, HandlerError, MapExceptions,
	MimeRender, MimeRenderSettings, Represent, RepresentBuilder, Represented, SettingsError,
	handler_fn,
};
pub use mimerender_http::{
	ContextScope, HeaderList, HostAdapter, IntoBody, IntoResponseShape, MalformedHandlerResult,
	NegotiationContext, Payload, RenderError, Renderer, ResponseShape, StatusLine,
};
pub use mimerender_negotiation::{
	AcceptHeader, FormatRegistry, NegotiationError, formats, register_format,
};

#[cfg(feature = "adapters")]
pub use mimerender_adapters::{HttpAdapter, MemoryAdapter, MemoryResponse};

/// Common imports for wrapping handlers
pub mod prelude {
	pub use crate::{
		Endpoint, ErrorKind, ExceptionMapping, Handler, HandlerError, HostAdapter, MimeRender,
		NegotiationContext, Payload, Represent, ResponseShape, StatusLine, formats,
		register_format,
	};

	#[cfg(feature = "adapters")]
	pub use crate::{HttpAdapter, MemoryAdapter};
}
