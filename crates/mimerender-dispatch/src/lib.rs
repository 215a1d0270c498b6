//! # mimerender dispatch
//!
//! Wraps request handlers so that their results are rendered in the
//! representation the client asked for.
//!
//! ## Overview
//!
//! The dispatch layer handles:
//! - Override extraction (positional argument, then request parameter)
//! - Content negotiation against the bound renderers
//! - Per-request negotiation context
//! - Handler result normalization and rendering
//! - `Content-Type` and `Vary` fixup
//! - Mapping handler errors to represented responses
//!
//! ## Architecture
//!
//! ```text
//! Host → Endpoint → Represent ─→ Negotiator ─→ Handler → Renderer → HostAdapter
//!          ↓                                      ↓
//!    MapExceptions ←──────── HandlerError ────────┘
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use mimerender_adapters::MemoryAdapter;
//! use mimerender_dispatch::{Endpoint, HandlerError, MimeRender};
//! use mimerender_http::{NegotiationContext, Payload};
//!
//! let mimerender = MimeRender::new().with_default_format("json");
//! let endpoint = mimerender
//!     .represent()
//!     .renderer("json", |p: &Payload| serde_json::to_string(p))
//!     .renderer("txt", |p: &Payload| p.get_str("message").unwrap_or_default().to_string())
//!     .build()
//!     .unwrap()
//!     .wrap_fn(|_: &NegotiationContext, args: &[String]| {
//!         Ok::<_, HandlerError>(Payload::new().with("message", format!("Hello, {}!", args[0])))
//!     });
//!
//! let adapter = MemoryAdapter::new().with_accept("text/plain");
//! let response = endpoint.call(&adapter, &["world".to_string()]).unwrap();
//! assert_eq!(response.body_str(), Some("Hello, world!"));
//! assert_eq!(response.header("Content-Type"), Some("text/plain"));
//! ```

pub mod defaults;
pub mod error;
pub mod exception;
pub mod handler;
pub mod represent;
pub mod settings;

pub use defaults::MimeRender;
pub use error::{DispatchError, ErrorKind, HandlerError, Result};
pub use exception::{ExceptionMapping, MapExceptions};
pub use handler::{Endpoint, Handler, HandlerFn, handler_fn};
pub use represent::{BAD_ACCEPT_BODY, Represent, RepresentBuilder, Represented};
pub use settings::{MimeRenderSettings, SettingsError};
