//! Integration test utilities for mimerender
//!
//! Shared renderers, handlers and fixtures used across the end-to-end
//! tests.

use mimerender::{HandlerError, NegotiationContext, Payload};

/// Renderer producing `<prefix>:<x>`
pub fn prefixed(prefix: &'static str) -> impl Fn(&Payload) -> String + Send + Sync + 'static {
	move |payload: &Payload| format!("{}:{}", prefix, field(payload, "x"))
}

/// Renderer producing `<xml><x></xml>`
pub fn xml_tag(payload: &Payload) -> String {
	format!("<xml>{}</xml>", field(payload, "x"))
}

/// Renderer producing an empty body
pub fn empty(_: &Payload) -> &'static str {
	""
}

/// Renderer for mapped exceptions: `<prefix>:(arg, ...)`
pub fn exception_args(prefix: &'static str) -> impl Fn(&Payload) -> String + Send + Sync + 'static {
	move |payload: &Payload| {
		let args = payload
			.get("exception")
			.and_then(|exception| exception.get("args"))
			.and_then(|args| args.as_array())
			.map(|args| {
				args.iter()
					.map(|arg| match arg.as_str() {
						Some(text) => format!("'{}'", text),
						None => arg.to_string(),
					})
					.collect::<Vec<_>>()
					.join(", ")
			})
			.unwrap_or_default();
		format!("{}:({})", prefix, args)
	}
}

/// Handler answering `{"x": <first argument>}`
pub fn echo(_: &NegotiationContext, args: &[String]) -> Result<Payload, HandlerError> {
	Ok(Payload::new().with("x", args.first().cloned().unwrap_or_default()))
}

/// Handler answering `{"x": "test"}`
pub fn test_payload(_: &NegotiationContext, _: &[String]) -> Result<Payload, HandlerError> {
	Ok(Payload::new().with("x", "test"))
}

/// Not-acceptable callback listing the supported media types
pub fn available_types(_accept: &str, supported: &[String]) -> (String, String) {
	(
		"text/plain".to_string(),
		format!("Available Content Types: {}", supported.join(", ")),
	)
}

/// Owned positional arguments
pub fn args(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}

fn field(payload: &Payload, name: &str) -> String {
	match payload.get(name) {
		Some(serde_json::Value::String(text)) => text.clone(),
		Some(other) => other.to_string(),
		None => String::new(),
	}
}
