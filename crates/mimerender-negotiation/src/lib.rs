//! Content negotiation for mimerender
//!
//! This crate decides *what* to send: it owns the table of known formats,
//! parses `Accept` headers and picks the renderer for a request.
//!
//! ## Modules
//!
//! - [`accept`]: media range parsing and best-match ranking
//! - [`registry`]: short format names to media types
//! - [`negotiator`]: per-endpoint selection of media type and renderer
//!
//! # Examples
//!
//! ```
//! use mimerender_negotiation::{formats, Negotiation, NegotiatorBuilder};
//!
//! let negotiator = NegotiatorBuilder::new()
//!     .bind(formats::JSON, 1)
//!     .bind(formats::TXT, 2)
//!     .build()
//!     .unwrap();
//!
//! let selection = negotiator
//!     .negotiate(Some("txt"), None)
//!     .unwrap()
//!     .selected()
//!     .unwrap();
//! assert_eq!(selection.media_type, "text/plain");
//! assert_eq!(*selection.renderer, 2);
//! ```

pub mod accept;
pub mod error;
pub mod negotiator;
pub mod registry;

pub use accept::{AcceptHeader, MediaRange};
pub use error::{NegotiationError, Result};
pub use negotiator::{
	Negotiation, Negotiator, NegotiatorBuilder, NotAcceptable, NotAcceptableCallback, Selection,
};
pub use registry::{
	FormatRegistry, format_for_media_type, formats, media_types_for, register_format,
	register_format_or_match, registry,
};
