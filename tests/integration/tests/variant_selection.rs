//! Integration tests for representation selection
//!
//! These tests drive wrapped endpoints end to end through the in-memory
//! adapter and check which renderer answered.

use mimerender::dispatch::BAD_ACCEPT_BODY;
use mimerender::http::context::{CONTEXT_CONTENT_TYPE, CONTEXT_FORMAT, CONTEXT_MEDIA_TYPE};
use mimerender::prelude::*;
use mimerender::{NegotiationError, formats};
use mimerender_integration_tests::{
	args, available_types, echo, empty, prefixed, test_payload, xml_tag,
};
use rstest::*;

// ============================================================================
// Single variant
// ============================================================================

#[rstest]
fn test_single_variant_without_default() {
	// Arrange
	let endpoint = Represent::builder()
		.renderer(formats::XML, xml_tag)
		.build()
		.unwrap()
		.wrap_fn(test_payload);

	// Act
	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();

	// Assert
	assert_eq!(response.status, StatusLine::OK);
	assert_eq!(response.header("Content-Type"), Some("text/xml"));
	assert_eq!(response.body_str(), Some("<xml>test</xml>"));
}

#[rstest]
fn test_single_variant_with_default() {
	let endpoint = Represent::builder()
		.renderer(formats::XML, xml_tag)
		.default_format(formats::XML)
		.build()
		.unwrap()
		.wrap_fn(test_payload);

	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();

	assert_eq!(response.header("Content-Type"), Some("text/xml"));
	assert_eq!(response.body_str(), Some("<xml>test</xml>"));
}

#[rstest]
fn test_no_renderers() {
	let result = Represent::builder().build();
	assert!(matches!(result, Err(NegotiationError::NoRenderersConfigured)));
}

#[rstest]
fn test_unknown_format_fails_at_build() {
	let result = Represent::builder().renderer("pdf", empty).build();
	assert!(matches!(result, Err(NegotiationError::UnknownFormat(name)) if name == "pdf"));
}

// ============================================================================
// Accept header and override parameter
// ============================================================================

#[rstest]
fn test_select_variant() {
	// Arrange
	let endpoint = Represent::builder()
		.default_format(formats::TXT)
		.override_param("mime")
		.renderer(formats::TXT, prefixed("txt"))
		.renderer(formats::XML, prefixed("xml"))
		.renderer(formats::JSON, prefixed("json"))
		.renderer(formats::HTML, prefixed("html"))
		.build()
		.unwrap()
		.wrap_fn(echo);
	let mut adapter = MemoryAdapter::new();

	// Act / Assert: default
	let response = endpoint.call(&adapter, &args(&["default"])).unwrap();
	assert_eq!(response.header("Content-Type"), Some("text/plain"));
	assert_eq!(response.body_str(), Some("txt:default"));

	// Act / Assert: Accept header
	adapter.set_accept(Some("application/xml"));
	let response = endpoint.call(&adapter, &args(&["a"])).unwrap();
	assert_eq!(response.header("Content-Type"), Some("application/xml"));
	assert_eq!(response.body_str(), Some("xml:a"));

	adapter.set_accept(Some("application/json"));
	let response = endpoint.call(&adapter, &args(&["b"])).unwrap();
	assert_eq!(response.header("Content-Type"), Some("application/json"));
	assert_eq!(response.body_str(), Some("json:b"));

	// Act / Assert: request parameter override
	adapter.set_param("mime", Some("html"));
	let response = endpoint.call(&adapter, &args(&["c"])).unwrap();
	assert_eq!(response.header("Content-Type"), Some("text/html"));
	assert_eq!(response.body_str(), Some("html:c"));
}

#[rstest]
#[case(formats::XML, "text/xml")]
#[case(formats::TXT, "text/plain")]
fn test_default_for_wildcard_query(#[case] default: &str, #[case] expected: &str) {
	let endpoint = Represent::builder()
		.default_format(default)
		.renderer(formats::TXT, empty)
		.renderer(formats::XML, empty)
		.build()
		.unwrap()
		.wrap_fn(test_payload);

	let response = endpoint
		.call(&MemoryAdapter::new().with_accept("*/*"), &[])
		.unwrap();

	assert_eq!(response.header("Content-Type"), Some(expected));
}

#[rstest]
#[case(-1, &["a", "json"], "json:a")]
#[case(1, &["a", "xml", "ignored"], "xml:a")]
#[case(-1, &["a", "pdf"], "txt:a")]
#[case(5, &["a"], "txt:a")]
fn test_override_argument(#[case] index: isize, #[case] values: &[&str], #[case] expected: &str) {
	// Arrange
	let endpoint = Represent::builder()
		.default_format(formats::TXT)
		.override_arg(index)
		.renderer(formats::TXT, prefixed("txt"))
		.renderer(formats::XML, prefixed("xml"))
		.renderer(formats::JSON, prefixed("json"))
		.build()
		.unwrap()
		.wrap_fn(echo);

	// Act
	let response = endpoint.call(&MemoryAdapter::new(), &args(values)).unwrap();

	// Assert
	assert_eq!(response.body_str(), Some(expected));
}

#[rstest]
fn test_override_beats_accept() {
	let endpoint = Represent::builder()
		.override_param("format")
		.renderer(formats::JSON, prefixed("json"))
		.renderer(formats::XML, prefixed("xml"))
		.build()
		.unwrap()
		.wrap_fn(echo);
	let adapter = MemoryAdapter::new()
		.with_accept("application/json")
		.with_param("format", "xml");

	let response = endpoint.call(&adapter, &args(&["z"])).unwrap();

	assert_eq!(response.header("Content-Type"), Some("text/xml"));
	assert_eq!(response.body_str(), Some("xml:z"));
}

// ============================================================================
// Unacceptable and malformed requests
// ============================================================================

#[rstest]
fn test_not_acceptable_falls_back_to_default() {
	let endpoint = Represent::builder()
		.default_format(formats::JSON)
		.renderer(formats::XML, prefixed("xml"))
		.renderer(formats::JSON, prefixed("json"))
		.build()
		.unwrap()
		.wrap_fn(echo);

	let response = endpoint
		.call(&MemoryAdapter::new().with_accept("text/plain"), &args(&["default"]))
		.unwrap();

	assert_eq!(response.header("Content-Type"), Some("application/json"));
	assert_eq!(response.status.as_str(), "200 OK");
	assert_eq!(response.body_str(), Some("json:default"));
}

#[rstest]
fn test_not_acceptable_with_callback() {
	// Arrange
	let endpoint = Represent::builder()
		.not_acceptable(available_types)
		.default_format(formats::JSON)
		.renderer(formats::XML, prefixed("xml"))
		.renderer(formats::JSON, prefixed("json"))
		.build()
		.unwrap()
		.wrap_fn(|_: &NegotiationContext, _: &[String]| -> Result<Payload, HandlerError> {
			panic!("handler must not run for unacceptable requests")
		});
	let adapter = MemoryAdapter::new().with_accept("text/plain");

	// Act
	let response = endpoint.call(&adapter, &args(&["default"])).unwrap();

	// Assert
	assert_eq!(response.status.as_str(), "406 Not Acceptable");
	assert_eq!(response.header("Content-Type"), Some("text/plain"));
	assert_eq!(response.header("Vary"), Some("Accept"));
	let body = response.body_str().unwrap();
	assert!(body.starts_with("Available Content Types: "));
	assert!(body.contains("application/xml"));
	assert!(body.contains("application/json"));
	assert!(adapter.context_history().is_empty());
}

#[rstest]
fn test_invalid_accept_header() {
	let endpoint = Represent::builder()
		.default_format(formats::JSON)
		.renderer(formats::XML, prefixed("xml"))
		.renderer(formats::JSON, prefixed("json"))
		.build()
		.unwrap()
		.wrap_fn(echo);

	let response = endpoint
		.call(&MemoryAdapter::new().with_accept("text"), &args(&["default"]))
		.unwrap();

	assert_eq!(response.header("Content-Type"), Some("text/plain"));
	assert_eq!(response.status.as_str(), "400 Bad Request");
	assert_eq!(response.body_str(), Some(BAD_ACCEPT_BODY));
	assert_eq!(response.header("Vary"), Some("Accept"));
}

// ============================================================================
// Context variables
// ============================================================================

#[rstest]
fn test_context_variables_cleared_after_success() {
	// Arrange
	let endpoint = Represent::builder()
		.renderer(formats::JSON, prefixed("json"))
		.charset("utf-8")
		.build()
		.unwrap()
		.wrap_fn(echo);
	let adapter = MemoryAdapter::new();

	// Act
	endpoint.call(&adapter, &args(&["a"])).unwrap();

	// Assert
	let history = adapter.context_history();
	assert_eq!(history.len(), 6);
	assert_eq!(
		history[..3],
		[
			(CONTEXT_MEDIA_TYPE.to_string(), Some("application/json".to_string())),
			(CONTEXT_FORMAT.to_string(), Some("json".to_string())),
			(
				CONTEXT_CONTENT_TYPE.to_string(),
				Some("application/json; charset=utf-8".to_string())
			),
		]
	);
	assert!(adapter.context_vars().is_empty());
}

#[rstest]
fn test_context_variables_cleared_after_handler_error() {
	static FAILURE: ErrorKind = ErrorKind::root("Failure");
	let endpoint = Represent::builder()
		.renderer(formats::JSON, prefixed("json"))
		.build()
		.unwrap()
		.wrap_fn(|_: &NegotiationContext, _: &[String]| {
			Err::<Payload, _>(HandlerError::new(&FAILURE, "boom"))
		});
	let adapter = MemoryAdapter::new();

	let result = endpoint.call(&adapter, &[]);

	assert!(result.is_err());
	assert_eq!(adapter.context_history().len(), 6);
	assert!(adapter.context_vars().is_empty());
}
