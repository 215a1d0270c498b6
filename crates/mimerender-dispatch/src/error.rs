//! Handler errors, their kinds and dispatch failures

use std::fmt;

use mimerender_http::{MalformedHandlerResult, Payload, RenderError};
use mimerender_negotiation::NegotiationError;
use serde_json::{Value, json};
use thiserror::Error;

/// A node in a taxonomy of handler error kinds
///
/// Kinds are declared as statics and linked to their parent, so that an
/// exception rule for a general kind also catches every kind derived from
/// it. Kinds compare by identity: two statics with the same name are
/// different kinds.
///
/// # Examples
///
/// ```
/// use mimerender_dispatch::ErrorKind;
///
/// static LOOKUP: ErrorKind = ErrorKind::root("LookupError");
/// static MISSING_KEY: ErrorKind = ErrorKind::child_of("KeyError", &LOOKUP);
/// static OTHER_LOOKUP: ErrorKind = ErrorKind::root("LookupError");
///
/// assert!(MISSING_KEY.is_a(&LOOKUP));
/// assert!(!LOOKUP.is_a(&MISSING_KEY));
/// assert!(!OTHER_LOOKUP.is_a(&LOOKUP));
/// assert!(LOOKUP.is_a(ErrorKind::ANY));
/// ```
#[derive(Debug)]
pub struct ErrorKind {
	name: &'static str,
	parent: Option<&'static ErrorKind>,
}

static ANY_KIND: ErrorKind = ErrorKind::root("Any");
static ERROR_KIND: ErrorKind = ErrorKind::root("Error");

impl ErrorKind {
	/// Matches every kind
	pub const ANY: &'static ErrorKind = &ANY_KIND;

	/// Kind of errors converted from arbitrary error values
	pub const ERROR: &'static ErrorKind = &ERROR_KIND;

	/// Declares a kind without a parent
	pub const fn root(name: &'static str) -> Self {
		Self { name, parent: None }
	}

	/// Declares a kind derived from `parent`
	pub const fn child_of(name: &'static str, parent: &'static ErrorKind) -> Self {
		Self {
			name,
			parent: Some(parent),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn parent(&self) -> Option<&'static ErrorKind> {
		self.parent
	}

	/// Returns true if this kind is `other` or derives from it
	pub fn is_a(&self, other: &ErrorKind) -> bool {
		if std::ptr::eq(other, Self::ANY) {
			return true;
		}
		let mut current = Some(self);
		while let Some(kind) = current {
			if std::ptr::eq(kind, other) {
				return true;
			}
			current = kind.parent;
		}
		false
	}
}

impl PartialEq for ErrorKind {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self, other)
	}
}

impl Eq for ErrorKind {}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// An error raised by a handler
///
/// # Examples
///
/// ```
/// use mimerender_dispatch::{ErrorKind, HandlerError};
///
/// static NOT_FOUND: ErrorKind = ErrorKind::root("NotFound");
///
/// let error = HandlerError::new(&NOT_FOUND, "no such item").with_arg("item-7");
/// assert!(error.is_a(&NOT_FOUND));
/// assert_eq!(
///     serde_json::Value::from(error.to_payload()),
///     serde_json::json!({
///         "exception": {"kind": "NotFound", "message": "no such item", "args": ["item-7"]}
///     })
/// );
/// ```
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct HandlerError {
	kind: &'static ErrorKind,
	message: String,
	args: Vec<Value>,
}

impl HandlerError {
	pub fn new(kind: &'static ErrorKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
			args: Vec::new(),
		}
	}

	/// Appends a positional argument describing the failure
	pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
		self.args.push(arg.into());
		self
	}

	/// Appends several positional arguments
	pub fn with_args<I, V>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		self.args.extend(args.into_iter().map(Into::into));
		self
	}

	pub fn kind(&self) -> &'static ErrorKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn args(&self) -> &[Value] {
		&self.args
	}

	/// Returns true if the error's kind is `kind` or derives from it
	pub fn is_a(&self, kind: &ErrorKind) -> bool {
		self.kind.is_a(kind)
	}

	/// Payload used to represent this error in a mapped response
	pub fn to_payload(&self) -> Payload {
		Payload::new().with(
			"exception",
			json!({
				"kind": self.kind.name(),
				"message": self.message,
				"args": self.args,
			}),
		)
	}
}

impl From<anyhow::Error> for HandlerError {
	fn from(error: anyhow::Error) -> Self {
		Self::new(ErrorKind::ERROR, format!("{:#}", error))
	}
}

/// Errors returned by a wrapped endpoint
///
/// Malformed Accept headers and unacceptable requests are not errors: they
/// are answered with `400` and `406` responses.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
	/// Negotiation failed for a reason other than the Accept header
	#[error("Negotiation error: {0}")]
	Negotiation(#[from] NegotiationError),

	/// The handler failed and no exception rule matched
	#[error("Handler error: {0}")]
	Handler(#[from] HandlerError),

	/// The handler returned a value that is not a response shape
	#[error(transparent)]
	MalformedHandlerResult(#[from] MalformedHandlerResult),

	/// The renderer failed
	#[error("Render error: {0}")]
	Render(#[from] RenderError),
}

/// Result type for dispatching
pub type Result<T> = std::result::Result<T, DispatchError>;
