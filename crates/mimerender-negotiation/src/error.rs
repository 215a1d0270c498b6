//! Error types for format registration and content negotiation

use thiserror::Error;

/// Errors raised by the media-type registry and the negotiator
///
/// Everything except [`NegotiationError::BadAcceptHeader`] and
/// [`NegotiationError::UnknownMediaType`] is a configuration error: it is
/// reported when a format is registered or a negotiator is built, before
/// any request is served.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
	/// A binding, default or lookup named a format the registry does not know
	#[error("No known media types for format \"{0}\"")]
	UnknownFormat(String),

	/// A format name was registered twice
	#[error("Format \"{0}\" is already registered")]
	DuplicateFormat(String),

	/// A format was registered with an empty media type list
	#[error("Format \"{0}\" must be registered with at least one media type")]
	EmptyMediaTypes(String),

	/// A registered media type is not of the form `type/subtype`
	#[error("Invalid media type \"{0}\"")]
	InvalidMediaType(String),

	/// A media type is already owned by another format
	#[error("Media type \"{media_type}\" is already registered for format \"{format}\"")]
	MediaTypeConflict { media_type: String, format: String },

	/// Reverse lookup found no format containing the media type
	#[error("No known format for media type \"{0}\"")]
	UnknownMediaType(String),

	/// A negotiator was built without any renderer binding
	#[error("At least one renderer must be configured")]
	NoRenderersConfigured,

	/// The default format is registered but no renderer was bound to it
	#[error("No renderer bound for default format \"{0}\"")]
	UnboundDefault(String),

	/// The client sent an Accept header that cannot be parsed
	#[error("Invalid Accept header: {0:?}")]
	BadAcceptHeader(String),
}

/// Result type for negotiation operations
pub type Result<T> = std::result::Result<T, NegotiationError>;
