//! Integration tests for handler result shapes and header fixup

use std::collections::HashMap;

use mimerender::prelude::*;
use mimerender::{DispatchError, formats};
use mimerender_integration_tests::{empty, prefixed};
use rstest::*;
use serde_json::{Value, json};

fn xml_endpoint<F, O>(handler: F) -> impl Endpoint<MemoryAdapter>
where
	F: Fn(&NegotiationContext, &[String]) -> Result<O, HandlerError> + Send + Sync,
	O: mimerender::IntoResponseShape,
{
	Represent::builder()
		.renderer(formats::XML, empty)
		.build()
		.unwrap()
		.wrap_fn(handler)
}

fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
	pairs
		.iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
}

// ============================================================================
// Vary header
// ============================================================================

#[rstest]
fn test_vary_added_when_absent() {
	let endpoint = xml_endpoint(|_, _| Ok(Payload::new()));
	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();
	assert_eq!(response.header("Vary"), Some("Accept"));
}

#[rstest]
#[case("Accept,X", "Accept,X")]
#[case("X", "X,Accept")]
fn test_vary_merge(#[case] given: &'static str, #[case] expected: &str) {
	// Arrange
	let endpoint = xml_endpoint(move |_, _| Ok((Payload::new(), "", vec![("Vary", given)])));

	// Act
	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();

	// Assert
	assert_eq!(response.header_values("Vary"), vec![expected]);
	assert_eq!(response.status, StatusLine::OK);
}

// ============================================================================
// Response shapes
// ============================================================================

#[rstest]
fn test_payload_only() {
	let endpoint = xml_endpoint(|_, _| Ok(Payload::new()));

	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();

	assert_eq!(response.status.as_str(), "200 OK");
	assert_eq!(
		response.headers,
		headers(&[("Content-Type", "text/xml"), ("Vary", "Accept")])
	);
}

#[rstest]
fn test_payload_and_status() {
	let endpoint = xml_endpoint(|_, _| Ok((Payload::new(), "666 Armaggedon")));

	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();

	assert_eq!(response.status.as_str(), "666 Armaggedon");
	assert_eq!(
		response.headers,
		headers(&[("Content-Type", "text/xml"), ("Vary", "Accept")])
	);
}

#[rstest]
fn test_payload_status_and_headers() {
	let endpoint = xml_endpoint(|_, _| {
		let mut extra = HashMap::new();
		extra.insert("X-Y", "Z");
		Ok((Payload::new(), "666 Armaggedon", extra))
	});

	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();

	assert_eq!(response.status.as_str(), "666 Armaggedon");
	assert_eq!(
		response.headers,
		headers(&[("X-Y", "Z"), ("Content-Type", "text/xml"), ("Vary", "Accept")])
	);
}

#[rstest]
fn test_handler_content_type_is_kept() {
	let endpoint = xml_endpoint(|_, _| {
		Ok(ResponseShape::new(Payload::new())
			.with_header("content-type", "application/vnd.custom+xml"))
	});

	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();

	assert_eq!(
		response.header_values("Content-Type"),
		vec!["application/vnd.custom+xml"]
	);
}

#[rstest]
#[case(json!({"x": "a"}), "200 OK", &[])]
#[case(json!([{"x": "a"}]), "200 OK", &[])]
#[case(json!([{"x": "a"}, "201 Created"]), "201 Created", &[])]
#[case(
	json!([{"x": "a"}, "201 Created", [["Location", "/a"]]]),
	"201 Created",
	&[("Location", "/a")]
)]
fn test_dynamic_results(
	#[case] result: Value,
	#[case] status: &str,
	#[case] extra: &[(&str, &str)],
) {
	// Arrange
	let endpoint = Represent::builder()
		.renderer(formats::TXT, prefixed("txt"))
		.build()
		.unwrap()
		.wrap_fn(move |_: &NegotiationContext, _: &[String]| Ok::<_, HandlerError>(result.clone()));

	// Act
	let response = endpoint.call(&MemoryAdapter::new(), &[]).unwrap();

	// Assert
	assert_eq!(response.status.as_str(), status);
	assert_eq!(response.body_str(), Some("txt:a"));
	let mut expected = headers(extra);
	expected.extend(headers(&[("Content-Type", "text/plain"), ("Vary", "Accept")]));
	assert_eq!(response.headers, expected);
}

#[rstest]
#[case(json!("just text"))]
#[case(json!([{}, "200 OK", {}, {}]))]
#[case(json!([{}, 404]))]
fn test_malformed_dynamic_results(#[case] result: Value) {
	let endpoint = Represent::builder()
		.renderer(formats::TXT, prefixed("txt"))
		.build()
		.unwrap()
		.wrap_fn(move |_: &NegotiationContext, _: &[String]| Ok::<_, HandlerError>(result.clone()));

	let outcome = endpoint.call(&MemoryAdapter::new(), &[]);

	assert!(matches!(outcome, Err(DispatchError::MalformedHandlerResult(_))));
}

// ============================================================================
// Charset
// ============================================================================

#[rstest]
fn test_charset_suffix_on_every_format() {
	// Arrange
	let endpoint = MimeRender::new()
		.with_charset("utf-8")
		.represent()
		.renderer(formats::JSON, empty)
		.renderer(formats::HTML, empty)
		.build()
		.unwrap()
		.wrap_fn(|_: &NegotiationContext, _: &[String]| Ok::<_, HandlerError>(Payload::new()));

	// Act
	let html = endpoint
		.call(&MemoryAdapter::new().with_accept("text/html"), &[])
		.unwrap();
	let json = endpoint
		.call(&MemoryAdapter::new().with_accept("application/json"), &[])
		.unwrap();

	// Assert
	assert_eq!(html.header("Content-Type"), Some("text/html; charset=utf-8"));
	assert_eq!(
		json.header("Content-Type"),
		Some("application/json; charset=utf-8")
	);
}
