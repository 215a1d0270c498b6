//! Renderer contract
//!
//! A renderer turns a [`Payload`] into the response body for one format.
//! Renderers are plain functions or closures; anything returning a body
//! type or a `Result` of one qualifies through [`IntoBody`].
//!
//! # Examples
//!
//! ```
//! use mimerender_http::{Payload, render::{RenderError, renderer}};
//!
//! let xml = renderer(|payload: &Payload| {
//!     let x = payload.get_str("x").ok_or(RenderError::MissingField("x".into()))?;
//!     Ok::<_, RenderError>(format!("<xml>{}</xml>", x))
//! });
//!
//! let body = xml(&Payload::new().with("x", "test")).unwrap();
//! assert_eq!(&body[..], b"<xml>test</xml>");
//! assert!(xml(&Payload::new()).is_err());
//! ```

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

use crate::payload::Payload;

/// Errors raised while rendering a payload
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RenderError {
	/// The payload could not be serialized
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	/// The renderer needed a field the payload does not have
	#[error("Missing payload field \"{0}\"")]
	MissingField(String),

	/// Any other renderer failure
	#[error("{0}")]
	Custom(String),
}

impl RenderError {
	/// Creates a custom render error
	pub fn custom(message: impl Into<String>) -> Self {
		Self::Custom(message.into())
	}
}

/// Result type for rendering
pub type RenderResult = std::result::Result<Bytes, RenderError>;

/// A shareable renderer
pub type Renderer = Arc<dyn Fn(&Payload) -> RenderResult + Send + Sync>;

/// Conversion of a renderer's return value into a body
pub trait IntoBody {
	fn into_body(self) -> RenderResult;
}

impl IntoBody for Bytes {
	fn into_body(self) -> RenderResult {
		Ok(self)
	}
}

impl IntoBody for String {
	fn into_body(self) -> RenderResult {
		Ok(Bytes::from(self))
	}
}

impl IntoBody for &'static str {
	fn into_body(self) -> RenderResult {
		Ok(Bytes::from_static(self.as_bytes()))
	}
}

impl IntoBody for Vec<u8> {
	fn into_body(self) -> RenderResult {
		Ok(Bytes::from(self))
	}
}

impl<T, E> IntoBody for Result<T, E>
where
	T: IntoBody,
	E: Into<RenderError>,
{
	fn into_body(self) -> RenderResult {
		self.map_err(Into::into)?.into_body()
	}
}

/// Wraps a function into a [`Renderer`]
pub fn renderer<F, B>(f: F) -> Renderer
where
	F: Fn(&Payload) -> B + Send + Sync + 'static,
	B: IntoBody,
{
	Arc::new(move |payload: &Payload| f(payload).into_body())
}

/// Renders the payload as a JSON document
///
/// # Examples
///
/// ```
/// use mimerender_http::{Payload, render::json_renderer};
///
/// let body = json_renderer()(&Payload::new().with("x", 1)).unwrap();
/// assert_eq!(&body[..], br#"{"x":1}"#);
/// ```
pub fn json_renderer() -> Renderer {
	renderer(|payload: &Payload| serde_json::to_vec(payload))
}
