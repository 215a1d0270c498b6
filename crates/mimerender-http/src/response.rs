//! Handler results and their normalization
//!
//! A handler may answer with a bare payload, a payload and a status line,
//! or a payload, a status line and headers. [`IntoResponseShape`] folds all
//! of these into one [`ResponseShape`].
//!
//! # Examples
//!
//! ```
//! use mimerender_http::{IntoResponseShape, Payload, StatusLine};
//!
//! let shape = (Payload::new(), "201 Created", vec![("Location", "/items/1")])
//!     .into_response_shape()
//!     .unwrap();
//! assert_eq!(shape.status, StatusLine::from("201 Created"));
//! assert_eq!(shape.headers, vec![("Location".to_string(), "/items/1".to_string())]);
//!
//! let bare = Payload::new().with("x", 1).into_response_shape().unwrap();
//! assert_eq!(bare.status, StatusLine::OK);
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

use crate::headers::{HeaderList, IntoHeaderList};
use crate::payload::Payload;
use crate::status::StatusLine;

/// A handler result that fits none of the recognized shapes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed handler result: {0}")]
pub struct MalformedHandlerResult(pub String);

impl MalformedHandlerResult {
	fn new(reason: impl Into<String>) -> Self {
		Self(reason.into())
	}
}

/// Canonical `(payload, status, headers)` form of a handler result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseShape {
	pub payload: Payload,
	pub status: StatusLine,
	pub headers: HeaderList,
}

impl ResponseShape {
	/// Creates a `200 OK` shape without headers
	pub fn new(payload: Payload) -> Self {
		Self {
			payload,
			status: StatusLine::OK,
			headers: HeaderList::new(),
		}
	}

	/// Sets the status line; a blank line keeps `200 OK`
	pub fn with_status(mut self, status: impl Into<StatusLine>) -> Self {
		self.status = normalize_status(status.into());
		self
	}

	/// Appends a header
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// Appends several headers
	pub fn with_headers(mut self, headers: impl IntoHeaderList) -> Self {
		self.headers.extend(headers.into_header_list());
		self
	}
}

fn normalize_status(status: StatusLine) -> StatusLine {
	if status.as_str().trim().is_empty() {
		StatusLine::OK
	} else {
		status
	}
}

/// Conversion of a handler's return value into a [`ResponseShape`]
pub trait IntoResponseShape {
	fn into_response_shape(self) -> Result<ResponseShape, MalformedHandlerResult>;
}

impl IntoResponseShape for ResponseShape {
	fn into_response_shape(self) -> Result<ResponseShape, MalformedHandlerResult> {
		Ok(self)
	}
}

impl IntoResponseShape for Payload {
	fn into_response_shape(self) -> Result<ResponseShape, MalformedHandlerResult> {
		Ok(ResponseShape::new(self))
	}
}

impl IntoResponseShape for Map<String, Value> {
	fn into_response_shape(self) -> Result<ResponseShape, MalformedHandlerResult> {
		Ok(ResponseShape::new(Payload::from(self)))
	}
}

impl IntoResponseShape for (Payload,) {
	fn into_response_shape(self) -> Result<ResponseShape, MalformedHandlerResult> {
		Ok(ResponseShape::new(self.0))
	}
}

impl<S: Into<StatusLine>> IntoResponseShape for (Payload, S) {
	fn into_response_shape(self) -> Result<ResponseShape, MalformedHandlerResult> {
		Ok(ResponseShape::new(self.0).with_status(self.1))
	}
}

impl<S: Into<StatusLine>, H: IntoHeaderList> IntoResponseShape for (Payload, S, H) {
	fn into_response_shape(self) -> Result<ResponseShape, MalformedHandlerResult> {
		Ok(ResponseShape::new(self.0)
			.with_status(self.1)
			.with_headers(self.2))
	}
}

/// Dynamic results follow the same arity rules, checked at runtime
///
/// An object is a bare payload; an array holds one to three elements:
/// the payload object, a status string and headers given either as
/// `[name, value]` string pairs or as an object of strings.
impl IntoResponseShape for Value {
	fn into_response_shape(self) -> Result<ResponseShape, MalformedHandlerResult> {
		let items = match self {
			Value::Object(map) => return Ok(ResponseShape::new(Payload::from(map))),
			Value::Array(items) => items,
			other => {
				return Err(MalformedHandlerResult::new(format!(
					"expected an object or an array, got {}",
					value_kind(&other)
				)));
			}
		};

		if items.is_empty() || items.len() > 3 {
			return Err(MalformedHandlerResult::new(format!(
				"expected 1 to 3 elements, got {}",
				items.len()
			)));
		}

		let mut items = items.into_iter();
		let payload = match items.next() {
			Some(Value::Object(map)) => Payload::from(map),
			Some(other) => {
				return Err(MalformedHandlerResult::new(format!(
					"payload must be an object, got {}",
					value_kind(&other)
				)));
			}
			None => return Err(MalformedHandlerResult::new("missing payload")),
		};
		let mut shape = ResponseShape::new(payload);

		match items.next() {
			Some(Value::String(status)) => shape = shape.with_status(status),
			Some(other) => {
				return Err(MalformedHandlerResult::new(format!(
					"status must be a string, got {}",
					value_kind(&other)
				)));
			}
			None => return Ok(shape),
		}

		if let Some(headers) = items.next() {
			shape.headers = headers_from_value(headers)?;
		}
		Ok(shape)
	}
}

fn headers_from_value(value: Value) -> Result<HeaderList, MalformedHandlerResult> {
	match value {
		Value::Object(map) => map
			.into_iter()
			.map(|(name, value)| match value {
				Value::String(value) => Ok((name, value)),
				other => Err(MalformedHandlerResult::new(format!(
					"header \"{}\" must be a string, got {}",
					name,
					value_kind(&other)
				))),
			})
			.collect(),
		Value::Array(pairs) => pairs
			.into_iter()
			.map(|pair| match pair {
				Value::Array(pair) => match <[Value; 2]>::try_from(pair) {
					Ok([Value::String(name), Value::String(value)]) => Ok((name, value)),
					_ => Err(MalformedHandlerResult::new(
						"header pairs must be two strings",
					)),
				},
				other => Err(MalformedHandlerResult::new(format!(
					"header pair must be an array, got {}",
					value_kind(&other)
				))),
			})
			.collect(),
		other => Err(MalformedHandlerResult::new(format!(
			"headers must be pairs or an object, got {}",
			value_kind(&other)
		))),
	}
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
