//! Response plumbing for mimerender
//!
//! This crate holds the types that sit between a handler, a renderer and
//! the host framework:
//!
//! - [`Payload`]: named fields a handler produces and a renderer consumes
//! - [`StatusLine`]: verbatim HTTP status line
//! - [`ResponseShape`] and [`IntoResponseShape`]: handler result normalization
//! - [`headers`]: header lists and the `Content-Type`/`Vary` fixup
//! - [`render`]: renderer contract
//! - [`HostAdapter`]: what the host framework must provide
//! - [`NegotiationContext`] and [`ContextScope`]: per-request negotiation outcome

pub mod adapter;
pub mod context;
pub mod headers;
pub mod payload;
pub mod render;
pub mod response;
pub mod status;

pub use adapter::HostAdapter;
pub use context::{ContextScope, NegotiationContext};
pub use headers::{HeaderList, IntoHeaderList, content_type_value, fixup_headers};
pub use payload::Payload;
pub use render::{IntoBody, RenderError, Renderer, renderer};
pub use response::{IntoResponseShape, MalformedHandlerResult, ResponseShape};
pub use status::StatusLine;
